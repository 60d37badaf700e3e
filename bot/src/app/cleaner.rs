//! Channel text cleanup
//!
//! Strips the channel's own promo lines, emoji and the urgency tag before
//! text reaches a card or a crosspost.

use std::sync::OnceLock;

use regex::Regex;

use crate::domain::entities::URGENT_TAG;

fn promo_res() -> &'static Vec<Regex> {
    static RES: OnceLock<Vec<Regex>> = OnceLock::new();
    RES.get_or_init(|| {
        [
            r"(?i)Подписаться на новости для своих",
            r"(?i)https://t\.me/newsSVOih",
            r"РФ",
        ]
        .iter()
        .map(|p| Regex::new(p).expect("valid regex"))
        .collect()
    })
}

fn emoji_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"[\x{1F300}-\x{1F5FF}\x{1F600}-\x{1F64F}\x{1F680}-\x{1F6FF}\x{1F1E0}-\x{1F1FF}]+")
            .expect("valid regex")
    })
}

fn space_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("valid regex"))
}

fn urgent_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(&format!("(?i){}", URGENT_TAG)).expect("valid regex"))
}

/// Remove promo patterns and emoji, collapse whitespace
pub fn clean_text(text: &str) -> String {
    let mut out = text.to_string();
    for re in promo_res() {
        out = re.replace_all(&out, "").into_owned();
    }
    let out = emoji_re().replace_all(&out, "");
    space_re().replace_all(&out, " ").trim().to_string()
}

/// Remove the urgency tag wherever it appears
pub fn strip_urgent_tag(text: &str) -> String {
    urgent_re().replace_all(text, "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn promo_lines_removed() {
        let cleaned = clean_text("Новость дня. Подписаться на новости для своих");
        assert_eq!(cleaned, "Новость дня.");
    }

    #[test]
    fn channel_link_removed() {
        assert_eq!(clean_text("смотри https://t.me/newsSVOih тут"), "смотри тут");
    }

    #[test]
    fn emoji_stripped_and_whitespace_collapsed() {
        assert_eq!(clean_text("срочно 🚀🔥   новость\n\nдня"), "срочно новость дня");
    }

    #[test]
    fn urgent_tag_stripped_case_insensitively() {
        assert_eq!(strip_urgent_tag("#СРОЧНО прорыв"), "прорыв");
        assert_eq!(strip_urgent_tag("прорыв #срочно"), "прорыв");
    }

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(clean_text(""), "");
    }
}

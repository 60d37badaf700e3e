//! Sitemap generation

use chrono::{DateTime, FixedOffset};

/// Build `sitemap.xml` for the site's fixed page set
pub fn generate_sitemap(site_base: &str, now: DateTime<FixedOffset>) -> String {
    let lastmod = now.format("%Y-%m-%dT%H:%M:%S%:z");
    let entry = |page: &str, changefreq: &str, priority: &str| {
        format!(
            "  <url><loc>{}/{}</loc><lastmod>{}</lastmod><changefreq>{}</changefreq><priority>{}</priority></url>\n",
            site_base, page, lastmod, changefreq, priority
        )
    };

    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );
    xml.push_str(&entry("index.html", "always", "1.0"));
    xml.push_str(&entry("news.html", "always", "0.9"));
    xml.push_str(&entry("archive.html", "daily", "0.7"));
    xml.push_str(&entry("history.html", "daily", "0.8"));
    xml.push_str("</urlset>");
    xml
}

pub mod card;
pub mod post;

pub use card::{headline_of, Category, CardMedia, NewsCard, MAX_VIDEO_BYTES, VISIBLE_CAP};
pub use post::{ChannelPost, MediaAttachment, MediaKind, URGENT_TAG};

mod feed;
mod media;
mod seen;

pub use feed::FileFeedStore;
pub use media::MediaDir;
pub use seen::FileSeenStore;

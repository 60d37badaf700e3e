mod client;

pub use client::VkWallClient;

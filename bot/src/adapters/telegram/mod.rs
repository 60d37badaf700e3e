mod client;

pub use client::TelegramChannelClient;

//! Ranks a YouTube channel's uploads by view count.
//!
//! The run is a straight pipeline over the YouTube Data API:
//! - `Config`: API key, channel id and output settings from `config.json`
//! - `YouTubeClient`: the single HTTP client, behind the `VideoPlatform` trait
//! - `fetch`: uploads playlist lookup, paginated listing, batched details
//! - `Report`: ranking and rendering to stdout and the report file
//!
//! # Example
//! ```no_run
//! use channel_views::{pipeline, Config, YouTubeClient};
//!
//! async fn example() {
//!     let config = Config::load(Config::DEFAULT_PATH).unwrap();
//!     let client = YouTubeClient::new(&config).unwrap();
//!     pipeline::run(&client, &config).await.unwrap();
//! }
//! ```
pub mod config;
pub mod error;
pub mod fetch;
pub mod pipeline;
pub mod platform;
pub mod report;

#[cfg(test)]
mod testing;

// Re-export commonly used items
pub use config::{Config, DetailFailurePolicy};
pub use error::AppError;
pub use fetch::Fetched;
pub use platform::{PlaylistPage, VideoDetail, VideoPlatform, YouTubeClient};
pub use report::Report;

//! Configuration management for the application.
//!
//! Two keys are required in the JSON file:
//! - `api_key`: developer key passed on every platform call
//! - `channel_id`: channel whose uploads are reported
//!
//! Everything else falls back to the defaults below.

use crate::error::{AppError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Largest page/batch size the platform accepts.
pub const MAX_PAGE_SIZE: u32 = 50;

/// Configuration for a single report run.
///
/// # Examples
///
/// ```
/// use channel_views::Config;
///
/// let config: Config = serde_json::from_str(
///     r#"{"api_key": "key", "channel_id": "UC123"}"#,
/// ).unwrap();
/// assert_eq!(config.page_size, 50);
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub api_key: String,
    pub channel_id: String,
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    #[serde(default)]
    pub detail_failure: DetailFailurePolicy,
}

/// What the detail fetcher hands back when one of its batch calls fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetailFailurePolicy {
    /// Drop every detail fetched so far.
    #[default]
    Discard,
    /// Keep the details of the batches that succeeded before the failure.
    KeepPartial,
}

fn default_output_path() -> PathBuf {
    PathBuf::from("video_details.txt")
}

fn default_api_base_url() -> String {
    String::from("https://www.googleapis.com/youtube/v3")
}

fn default_page_size() -> u32 {
    MAX_PAGE_SIZE
}

impl Config {
    /// Location of the config file, relative to the working directory.
    pub const DEFAULT_PATH: &'static str = "config.json";

    /// Reads and validates the JSON config at `path`.
    ///
    /// # Errors
    /// * `AppError::Io` if the file cannot be read
    /// * `AppError::Config` if the JSON is malformed, a required key is
    ///   missing, or a required value is empty
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let config: Config = serde_json::from_str(&raw)?;
        config.validated()
    }

    fn validated(mut self) -> Result<Self> {
        if self.api_key.trim().is_empty() {
            return Err(AppError::Config("api_key must not be empty".into()));
        }
        if self.channel_id.trim().is_empty() {
            return Err(AppError::Config("channel_id must not be empty".into()));
        }
        self.page_size = self.page_size.clamp(1, MAX_PAGE_SIZE);
        Ok(self)
    }
}

use crate::config::Config;
use crate::error::{AppError, Result};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;
use url::Url;

/// One page of an uploads playlist.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaylistPage {
    pub video_ids: Vec<String>,
    pub next_page_token: Option<String>,
}

/// Title and view count of a single video.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoDetail {
    pub video_id: String,
    pub title: String,
    pub view_count: u64,
}

/// Read-only capabilities the report needs from the video platform.
///
/// `YouTubeClient` is the network implementation; tests substitute a
/// scripted fake.
#[async_trait]
pub trait VideoPlatform: Send + Sync {
    /// Returns the uploads playlist id of `channel_id`, or `None` when the
    /// lookup matched no channel.
    async fn channel_uploads(&self, channel_id: &str) -> Result<Option<String>>;

    /// Fetches one page of `playlist_id`, continuing from `page_token`.
    async fn playlist_page(
        &self,
        playlist_id: &str,
        page_token: Option<&str>,
        page_size: u32,
    ) -> Result<PlaylistPage>;

    /// Looks up snippet and statistics for at most 50 video ids.
    async fn videos(&self, ids: &[String]) -> Result<Vec<VideoDetail>>;
}

/// HTTP client for the YouTube Data API v3.
///
/// Built once per run and shared by every step.
///
/// # Examples
///
/// ```no_run
/// use channel_views::{Config, YouTubeClient};
///
/// let config = Config::load(Config::DEFAULT_PATH).unwrap();
/// let client = YouTubeClient::new(&config).unwrap();
/// ```
pub struct YouTubeClient {
    client: reqwest::Client,
    api_key: String,
    base_url: Url,
}

impl YouTubeClient {
    pub fn new(config: &Config) -> Result<Self> {
        // Url::join drops the last segment unless the base ends with '/'.
        let mut base = config.api_base_url.clone();
        if !base.ends_with('/') {
            base.push('/');
        }

        Ok(Self {
            client: reqwest::Client::new(),
            api_key: config.api_key.clone(),
            base_url: Url::parse(&base)?,
        })
    }

    fn endpoint(&self, resource: &str, params: &[(&str, &str)]) -> Result<Url> {
        let mut url = self.base_url.join(resource)?;
        url.query_pairs_mut()
            .extend_pairs(params)
            .append_pair("key", &self.api_key);
        Ok(url)
    }

    async fn get<T: serde::de::DeserializeOwned>(&self, url: Url) -> Result<T> {
        debug!(path = url.path(), "platform request");
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(api_error(status.as_u16(), &body));
        }

        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl VideoPlatform for YouTubeClient {
    async fn channel_uploads(&self, channel_id: &str) -> Result<Option<String>> {
        let url = self.endpoint(
            "channels",
            &[("part", "contentDetails"), ("id", channel_id)],
        )?;
        let response: ChannelListResponse = self.get(url).await?;

        Ok(response
            .items
            .into_iter()
            .next()
            .map(|channel| channel.content_details.related_playlists.uploads))
    }

    async fn playlist_page(
        &self,
        playlist_id: &str,
        page_token: Option<&str>,
        page_size: u32,
    ) -> Result<PlaylistPage> {
        let max_results = page_size.to_string();
        let mut params = vec![
            ("part", "contentDetails"),
            ("playlistId", playlist_id),
            ("maxResults", max_results.as_str()),
        ];
        if let Some(token) = page_token {
            params.push(("pageToken", token));
        }

        let url = self.endpoint("playlistItems", &params)?;
        let response: PlaylistItemListResponse = self.get(url).await?;
        Ok(response.into())
    }

    async fn videos(&self, ids: &[String]) -> Result<Vec<VideoDetail>> {
        let joined = ids.join(",");
        let url = self.endpoint(
            "videos",
            &[("part", "snippet,statistics"), ("id", joined.as_str())],
        )?;
        let response: VideoListResponse = self.get(url).await?;

        response.items.into_iter().map(VideoDetail::try_from).collect()
    }
}

fn api_error(status: u16, body: &str) -> AppError {
    let message = serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .map(|envelope| envelope.error.message)
        .filter(|message| !message.trim().is_empty())
        .or_else(|| Some(body.trim().to_string()).filter(|raw| !raw.is_empty()))
        .unwrap_or_else(|| {
            reqwest::StatusCode::from_u16(status)
                .ok()
                .and_then(|code| code.canonical_reason())
                .unwrap_or("unknown error")
                .to_string()
        });
    AppError::Api { status, message }
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
struct ChannelListResponse {
    #[serde(default)]
    items: Vec<ChannelItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChannelItem {
    content_details: ChannelContentDetails,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChannelContentDetails {
    related_playlists: RelatedPlaylists,
}

#[derive(Debug, Deserialize)]
struct RelatedPlaylists {
    uploads: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlaylistItemListResponse {
    #[serde(default)]
    items: Vec<PlaylistItem>,
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlaylistItem {
    content_details: PlaylistItemContentDetails,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlaylistItemContentDetails {
    video_id: String,
}

impl From<PlaylistItemListResponse> for PlaylistPage {
    fn from(response: PlaylistItemListResponse) -> Self {
        Self {
            video_ids: response
                .items
                .into_iter()
                .map(|item| item.content_details.video_id)
                .collect(),
            next_page_token: response.next_page_token.filter(|token| !token.is_empty()),
        }
    }
}

#[derive(Debug, Deserialize)]
struct VideoListResponse {
    #[serde(default)]
    items: Vec<VideoItem>,
}

#[derive(Debug, Deserialize)]
struct VideoItem {
    id: String,
    snippet: VideoSnippet,
    #[serde(default)]
    statistics: VideoStatistics,
}

#[derive(Debug, Deserialize)]
struct VideoSnippet {
    title: String,
}

// Counts are serialized as decimal strings; hidden counts are omitted.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoStatistics {
    view_count: Option<String>,
}

impl TryFrom<VideoItem> for VideoDetail {
    type Error = AppError;

    fn try_from(item: VideoItem) -> Result<Self> {
        let view_count = match item.statistics.view_count {
            Some(raw) => raw
                .parse::<u64>()
                .map_err(|e| format!("invalid viewCount {raw:?} for video {}: {e}", item.id))?,
            None => 0,
        };

        Ok(Self {
            video_id: item.id,
            title: item.snippet.title,
            view_count,
        })
    }
}

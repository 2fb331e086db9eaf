use crate::config::DetailFailurePolicy;
use crate::error::{AppError, Result};
use crate::platform::{VideoDetail, VideoPlatform};
use tracing::{debug, error, info, instrument, warn};

/// Most video ids the platform accepts in one `videos` lookup.
pub const MAX_IDS_PER_CALL: usize = 50;

/// Items gathered by a multi-call fetch, plus the error that stopped it early.
///
/// An empty `items` with no `error` is a legitimately empty result; with an
/// `error` it means the fetch failed.
#[derive(Debug)]
pub struct Fetched<T> {
    pub items: Vec<T>,
    pub error: Option<AppError>,
}

impl<T> Fetched<T> {
    pub fn complete(items: Vec<T>) -> Self {
        Self { items, error: None }
    }

    pub fn failed(items: Vec<T>, error: AppError) -> Self {
        Self {
            items,
            error: Some(error),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }
}

/// Resolves the uploads playlist of `channel_id`.
///
/// # Returns
/// * `Ok(Some(id))` - the uploads playlist id
/// * `Ok(None)` - no channel matched the id
/// * `Err(_)` - the lookup call failed
#[instrument(skip(platform))]
pub async fn resolve_uploads(
    platform: &dyn VideoPlatform,
    channel_id: &str,
) -> Result<Option<String>> {
    match platform.channel_uploads(channel_id).await {
        Ok(Some(playlist_id)) => {
            info!(%playlist_id, "resolved uploads playlist");
            Ok(Some(playlist_id))
        }
        Ok(None) => {
            warn!("No channel found with the specified ID.");
            Ok(None)
        }
        Err(e) => {
            error!("Channel lookup failed: {}", e);
            Err(e)
        }
    }
}

/// Collects every video id of `playlist_id`, following continuation tokens
/// until the platform stops returning one.
///
/// A failing page ends the walk; ids from earlier pages are kept.
#[instrument(skip(platform))]
pub async fn list_uploads(
    platform: &dyn VideoPlatform,
    playlist_id: &str,
    page_size: u32,
) -> Fetched<String> {
    let mut video_ids = Vec::new();
    let mut page_token: Option<String> = None;
    let mut pages = 0usize;

    loop {
        let page = match platform
            .playlist_page(playlist_id, page_token.as_deref(), page_size)
            .await
        {
            Ok(page) => page,
            Err(e) => {
                error!(
                    "Playlist listing failed after {} pages ({} videos kept): {}",
                    pages,
                    video_ids.len(),
                    e
                );
                return Fetched::failed(video_ids, e);
            }
        };

        pages += 1;
        debug!(page = pages, items = page.video_ids.len(), "playlist page");
        video_ids.extend(page.video_ids);

        match page.next_page_token {
            Some(token) => page_token = Some(token),
            None => break,
        }
    }

    info!("Listed {} videos across {} pages", video_ids.len(), pages);
    Fetched::complete(video_ids)
}

/// Fetches title and view count for `video_ids`, at most
/// [`MAX_IDS_PER_CALL`] per call, preserving chunk and response order.
///
/// The first failing chunk stops the fetch; `policy` decides whether the
/// details of earlier chunks survive.
#[instrument(skip(platform, video_ids), fields(videos = video_ids.len()))]
pub async fn fetch_details(
    platform: &dyn VideoPlatform,
    video_ids: &[String],
    policy: DetailFailurePolicy,
) -> Fetched<VideoDetail> {
    let mut details = Vec::with_capacity(video_ids.len());

    for (batch, chunk) in video_ids.chunks(MAX_IDS_PER_CALL).enumerate() {
        match platform.videos(chunk).await {
            Ok(items) => {
                debug!(batch, requested = chunk.len(), returned = items.len(), "detail batch");
                details.extend(items);
            }
            Err(e) => {
                error!("Detail batch {} failed: {}", batch + 1, e);
                if policy == DetailFailurePolicy::Discard {
                    details.clear();
                }
                return Fetched::failed(details, e);
            }
        }
    }

    Fetched::complete(details)
}

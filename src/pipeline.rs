use crate::config::Config;
use crate::error::Result;
use crate::fetch::{fetch_details, list_uploads, resolve_uploads};
use crate::platform::{VideoPlatform, YouTubeClient};
use crate::report::Report;
use std::io::{self, Write};
use std::path::Path;
use tracing::{info, instrument, warn};

/// Loads the config at `config_path`, builds the platform client and runs
/// one report.
///
/// # Errors
/// Returns error if the config is missing or invalid, the client cannot be
/// built, or the report file cannot be written.
pub async fn run_from_config(config_path: impl AsRef<Path>) -> Result<Option<Report>> {
    let config = Config::load(config_path)?;
    let client = YouTubeClient::new(&config)?;
    run(&client, &config).await
}

/// Runs one report for the configured channel.
///
/// # Steps
/// 1. Resolves the channel's uploads playlist
/// 2. Lists every video id in that playlist
/// 3. Fetches titles and view counts in batches
/// 4. Ranks the videos, saves the report file and echoes it to stdout
///
/// # Returns
/// * `Ok(Some(report))` - the report that was saved
/// * `Ok(None)` - the uploads playlist could not be resolved; nothing was
///   written
///
/// # Errors
/// Returns error if writing the report file fails. Listing and
/// detail failures are logged and degrade the report instead.
#[instrument(skip_all, fields(channel_id = %config.channel_id))]
pub async fn run(platform: &dyn VideoPlatform, config: &Config) -> Result<Option<Report>> {
    let playlist_id = match resolve_uploads(platform, &config.channel_id).await {
        Ok(Some(playlist_id)) => playlist_id,
        Ok(None) | Err(_) => return Ok(None),
    };

    let listed = list_uploads(platform, &playlist_id, config.page_size).await;
    if !listed.is_complete() {
        warn!("Continuing with {} of the channel's videos", listed.items.len());
    }
    let video_ids = listed.items;

    let details = fetch_details(platform, &video_ids, config.detail_failure).await;
    if !details.is_complete() {
        warn!(
            "Details available for {} of {} videos",
            details.items.len(),
            video_ids.len()
        );
    }

    let report = Report::new(video_ids.len(), details.items);
    publish(&report, &config.output_path, io::stdout())?;

    info!("Reported {} videos", report.videos.len());
    Ok(Some(report))
}

/// Saves the report file, then echoes the report to `console`.
///
/// A console that cannot be written to (e.g. a closed pipe) is logged and
/// does not fail the run.
fn publish<W: Write>(report: &Report, path: &Path, console: W) -> Result<()> {
    report.save(path)?;
    if let Err(e) = report.write_to(console) {
        warn!("Could not print report: {}", e);
    }
    Ok(())
}

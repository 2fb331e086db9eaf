use crate::platform::VideoDetail;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tracing::info;

/// Videos of a channel ranked by popularity.
///
/// # Examples
///
/// ```
/// use channel_views::{Report, VideoDetail};
///
/// let video = |title: &str, views| VideoDetail {
///     video_id: title.to_lowercase(),
///     title: title.to_string(),
///     view_count: views,
/// };
/// let report = Report::new(2, vec![video("Quiet", 3), video("Loud", 90)]);
///
/// let mut out = Vec::new();
/// report.write_to(&mut out).unwrap();
/// assert_eq!(
///     String::from_utf8(out).unwrap(),
///     "Total number of videos: 2\n\nTitle: Loud, Views: 90\nTitle: Quiet, Views: 3\n",
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub total_videos: usize,
    pub videos: Vec<VideoDetail>,
}

impl Report {
    /// Ranks `videos` by view count, highest first.
    ///
    /// `total_videos` is the number of uploads listed, which can exceed
    /// `videos.len()` when some details could not be fetched.
    pub fn new(total_videos: usize, mut videos: Vec<VideoDetail>) -> Self {
        // sort_by is stable: equal counts keep their listing order.
        videos.sort_by(|a, b| b.view_count.cmp(&a.view_count));
        Self {
            total_videos,
            videos,
        }
    }

    pub fn write_to<W: Write>(&self, mut writer: W) -> io::Result<()> {
        writeln!(writer, "Total number of videos: {}", self.total_videos)?;
        writeln!(writer)?;
        for video in &self.videos {
            writeln!(writer, "Title: {}, Views: {}", video.title, video.view_count)?;
        }
        writer.flush()
    }

    /// Writes the report to `path`, replacing any previous contents.
    pub fn save(&self, path: &Path) -> io::Result<()> {
        let file = File::create(path)?;
        self.write_to(BufWriter::new(file))?;
        info!("Report written to {}", path.display());
        Ok(())
    }
}

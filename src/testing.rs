//! Scripted stand-in for the video platform used by unit tests.

use crate::error::{AppError, Result};
use crate::platform::{PlaylistPage, VideoDetail, VideoPlatform};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

enum ChannelScript {
    Found(Option<String>),
    Fails(u16),
}

/// Replays scripted responses and records every call it receives.
pub(crate) struct ScriptedPlatform {
    channel: ChannelScript,
    pages: Mutex<VecDeque<std::result::Result<PlaylistPage, u16>>>,
    views: HashMap<String, u64>,
    failing_batch: Option<usize>,
    channel_calls: Mutex<usize>,
    page_tokens: Mutex<Vec<Option<String>>>,
    batch_sizes: Mutex<Vec<usize>>,
}

impl ScriptedPlatform {
    pub(crate) fn new() -> Self {
        Self {
            channel: ChannelScript::Found(Some("UU-uploads".to_string())),
            pages: Mutex::new(VecDeque::new()),
            views: HashMap::new(),
            failing_batch: None,
            channel_calls: Mutex::new(0),
            page_tokens: Mutex::new(Vec::new()),
            batch_sizes: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn with_channel(mut self, uploads: Option<&str>) -> Self {
        self.channel = ChannelScript::Found(uploads.map(str::to_string));
        self
    }

    pub(crate) fn with_channel_error(mut self, status: u16) -> Self {
        self.channel = ChannelScript::Fails(status);
        self
    }

    pub(crate) fn with_page(self, ids: &[&str], next: Option<&str>) -> Self {
        self.pages.lock().unwrap().push_back(Ok(PlaylistPage {
            video_ids: ids.iter().map(|id| id.to_string()).collect(),
            next_page_token: next.map(str::to_string),
        }));
        self
    }

    pub(crate) fn with_page_error(self, status: u16) -> Self {
        self.pages.lock().unwrap().push_back(Err(status));
        self
    }

    pub(crate) fn with_views(mut self, views: &[(&str, u64)]) -> Self {
        self.views
            .extend(views.iter().map(|(id, count)| (id.to_string(), *count)));
        self
    }

    /// Makes the `batch`-th detail call (1-based) fail.
    pub(crate) fn with_failing_batch(mut self, batch: usize) -> Self {
        self.failing_batch = Some(batch);
        self
    }

    pub(crate) fn channel_calls(&self) -> usize {
        *self.channel_calls.lock().unwrap()
    }

    pub(crate) fn page_tokens(&self) -> Vec<Option<String>> {
        self.page_tokens.lock().unwrap().clone()
    }

    pub(crate) fn batch_sizes(&self) -> Vec<usize> {
        self.batch_sizes.lock().unwrap().clone()
    }
}

fn scripted_error(status: u16) -> AppError {
    AppError::Api {
        status,
        message: "scripted failure".to_string(),
    }
}

#[async_trait]
impl VideoPlatform for ScriptedPlatform {
    async fn channel_uploads(&self, _channel_id: &str) -> Result<Option<String>> {
        *self.channel_calls.lock().unwrap() += 1;
        match &self.channel {
            ChannelScript::Found(uploads) => Ok(uploads.clone()),
            ChannelScript::Fails(status) => Err(scripted_error(*status)),
        }
    }

    async fn playlist_page(
        &self,
        _playlist_id: &str,
        page_token: Option<&str>,
        _page_size: u32,
    ) -> Result<PlaylistPage> {
        self.page_tokens
            .lock()
            .unwrap()
            .push(page_token.map(str::to_string));
        match self.pages.lock().unwrap().pop_front() {
            Some(Ok(page)) => Ok(page),
            Some(Err(status)) => Err(scripted_error(status)),
            None => Err("playlist script exhausted".into()),
        }
    }

    async fn videos(&self, ids: &[String]) -> Result<Vec<VideoDetail>> {
        let batch = {
            let mut sizes = self.batch_sizes.lock().unwrap();
            sizes.push(ids.len());
            sizes.len()
        };
        if self.failing_batch == Some(batch) {
            return Err(scripted_error(500));
        }

        Ok(ids
            .iter()
            .map(|id| VideoDetail {
                video_id: id.clone(),
                title: format!("Title {id}"),
                view_count: self.views.get(id).copied().unwrap_or(0),
            })
            .collect())
    }
}

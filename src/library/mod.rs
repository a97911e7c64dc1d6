//! Resolving video ids to files and opening them for streaming.
//!
//! The streaming handler only ever sees the [`FileSource`] trait. The shipped
//! implementation, [`CatalogSource`], is an immutable id → destination map
//! built from configuration, so concurrent requests share it without locking.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncRead, AsyncSeek};
use vidstream_common::{paths::join_under_root, Error, Result, VideoId};

use crate::config::{LibraryConfig, VideoEntry};

/// A readable, seekable media handle.
pub trait MediaHandle: AsyncRead + AsyncSeek + Send + Unpin {}

impl<T: AsyncRead + AsyncSeek + Send + Unpin> MediaHandle for T {}

/// An opened file and its total length.
///
/// The handle is owned by the request that opened it and closed when this
/// value is dropped, whichever way the request ends.
pub struct StreamTarget {
    pub length: u64,
    pub handle: Box<dyn MediaHandle>,
}

impl StreamTarget {
    pub fn new(length: u64, handle: impl MediaHandle + 'static) -> Self {
        Self {
            length,
            handle: Box::new(handle),
        }
    }
}

impl std::fmt::Debug for StreamTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamTarget")
            .field("length", &self.length)
            .finish_non_exhaustive()
    }
}

/// Lookup-and-open capability used by the streaming route.
#[async_trait]
pub trait FileSource: Send + Sync {
    /// Map an id to the path of its file.
    fn resolve(&self, id: &VideoId) -> Result<PathBuf>;

    /// Open `path` exclusively for this request and report its length.
    async fn open(&self, path: &Path) -> Result<StreamTarget> {
        open_file(path).await
    }
}

/// Open a file on disk and stat it.
pub async fn open_file(path: &Path) -> Result<StreamTarget> {
    let file = tokio::fs::File::open(path).await.map_err(|e| {
        tracing::warn!("Failed to open {}: {}", path.display(), e);
        Error::from(e)
    })?;
    let metadata = file.metadata().await.map_err(|e| {
        tracing::warn!("Failed to stat {}: {}", path.display(), e);
        Error::from(e)
    })?;
    Ok(StreamTarget::new(metadata.len(), file))
}

/// Catalog of videos read from the `[library]` config section.
#[derive(Debug, Clone)]
pub struct CatalogSource {
    media_dir: PathBuf,
    entries: HashMap<VideoId, String>,
}

impl CatalogSource {
    pub fn new(media_dir: impl Into<PathBuf>, videos: impl IntoIterator<Item = VideoEntry>) -> Self {
        let entries = videos
            .into_iter()
            .map(|entry| (entry.id, entry.destination))
            .collect();
        Self {
            media_dir: media_dir.into(),
            entries,
        }
    }

    pub fn from_config(config: &LibraryConfig) -> Self {
        Self::new(config.media_dir.clone(), config.videos.iter().cloned())
    }
}

#[async_trait]
impl FileSource for CatalogSource {
    fn resolve(&self, id: &VideoId) -> Result<PathBuf> {
        let destination = self
            .entries
            .get(id)
            .ok_or_else(|| Error::not_found("video", id))?;
        join_under_root(&self.media_dir, destination)
    }
}

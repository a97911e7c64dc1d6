use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use vidstream_common::VideoId;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub streaming: StreamingConfig,

    #[serde(default)]
    pub library: LibraryConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    3002
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StreamingConfig {
    /// Size of each read/write/flush step, in bytes
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Value of the Content-Type header on every stream response
    #[serde(default = "default_content_type")]
    pub content_type: String,
}

fn default_chunk_size() -> usize {
    8 * 1024
}
fn default_content_type() -> String {
    "video/mp4".to_string()
}

impl Default for StreamingConfig {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            content_type: default_content_type(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LibraryConfig {
    /// Directory that every destination is resolved against
    #[serde(default = "default_media_dir")]
    pub media_dir: PathBuf,

    #[serde(default)]
    pub videos: Vec<VideoEntry>,
}

fn default_media_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            media_dir: default_media_dir(),
            videos: Vec::new(),
        }
    }
}

/// One catalog entry: an id and where its file lives under `media_dir`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct VideoEntry {
    pub id: VideoId,

    pub destination: String,
}

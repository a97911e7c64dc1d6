//! Video identifiers.
//!
//! Identifiers are opaque to the streaming engine. They are validated once at
//! the edge so that nothing downstream ever sees path separators or dots.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::Error;

/// Longest identifier accepted.
pub const MAX_VIDEO_ID_LEN: usize = 128;

/// Opaque identifier of a catalog entry.
///
/// Only ASCII alphanumerics, `-` and `_` are allowed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VideoId(String);

impl VideoId {
    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for VideoId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(Error::validation("video id is empty"));
        }
        if s.len() > MAX_VIDEO_ID_LEN {
            return Err(Error::validation(format!(
                "video id exceeds {MAX_VIDEO_ID_LEN} characters"
            )));
        }
        if !s
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
        {
            return Err(Error::validation(format!("invalid video id: {s:?}")));
        }
        Ok(Self(s.to_owned()))
    }
}

impl TryFrom<String> for VideoId {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<VideoId> for String {
    fn from(id: VideoId) -> Self {
        id.0
    }
}

impl std::fmt::Display for VideoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

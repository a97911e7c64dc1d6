//! Vidstream-Common: Shared types and utilities.
//!
//! This crate provides common functionality used across vidstream:
//!
//! - **Video IDs**: A validated, opaque identifier for catalog entries
//! - **Path Utilities**: Joining catalog destinations onto a media root without escaping it
//! - **Error Handling**: The unified error type and result alias
//!
//! # Examples
//!
//! ```
//! use vidstream_common::{Error, Result, VideoId};
//!
//! let id: VideoId = "intro".parse().unwrap();
//! assert_eq!(id.as_str(), "intro");
//!
//! fn example() -> Result<()> {
//!     Err(Error::not_found("video", "missing"))
//! }
//! assert!(example().is_err());
//! ```

pub mod error;
pub mod ids;
pub mod paths;

pub use error::{Error, Result};
pub use ids::VideoId;

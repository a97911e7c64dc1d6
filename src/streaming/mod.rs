//! Range-request streaming engine.
//!
//! A stream request goes through four steps:
//!
//! 1. the [`FileSource`](crate::library::FileSource) resolves the id and opens the file,
//! 2. [`range`] interprets the `Range` header against the file length,
//! 3. [`plan`] fixes the status and headers,
//! 4. [`transmit`] seeks and copies the window to the client chunk by chunk.
//!
//! # Routes
//!
//! - `GET /watch/{id}` - Whole-file or byte-range streaming

mod direct;
pub mod plan;
pub mod range;
pub mod transmit;

pub use direct::watch;
pub use plan::ResponsePlan;
pub use range::{parse_range_header, resolve_range, ByteWindow, RangeRequest, RequestedRange};
pub use transmit::{ChunkedTransmitter, Span, TransmitOutcome, TransmitReport, DEFAULT_CHUNK_SIZE};

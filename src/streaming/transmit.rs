//! Chunked transmission loop.
//!
//! Copies the planned span from a media handle to a client sink one chunk at a
//! time, flushing after every chunk so playback can start before the transfer
//! finishes. Every transfer tracks the bytes still owed and never reads past
//! them, so the last chunk comes out exactly the right size whatever the
//! buffer size is, and a file that grows while it is being sent cannot
//! overrun the declared `Content-Length`.

use std::io::{self, SeekFrom};

use tokio::io::{AsyncRead, AsyncReadExt, AsyncSeek, AsyncSeekExt, AsyncWrite, AsyncWriteExt};

use super::range::ByteWindow;

/// Default read/write step, in bytes.
pub const DEFAULT_CHUNK_SIZE: usize = 8 * 1024;

/// Which bytes of the handle to send.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Span {
    /// The whole file, as long as it was when it was opened.
    Whole(u64),
    /// Exactly the bytes of the window.
    Window(ByteWindow),
}

impl Span {
    /// Number of bytes the transfer owes the client.
    pub fn budget(&self) -> u64 {
        match self {
            Span::Whole(len) => *len,
            Span::Window(window) => window.len(),
        }
    }
}

/// How a transmission ended.
#[derive(Debug)]
pub enum TransmitOutcome {
    /// Every planned byte was written and flushed.
    Completed,
    /// The handle hit end-of-file before the planned bytes were sent.
    SourceExhausted,
    /// Writing or flushing to the client failed; it most likely went away.
    ClientGone(io::Error),
    /// Reading from the handle failed.
    ReadFailed(io::Error),
}

/// Result of one [`ChunkedTransmitter::run`].
#[derive(Debug)]
pub struct TransmitReport {
    pub bytes_sent: u64,
    pub outcome: TransmitOutcome,
}

impl TransmitReport {
    /// Emit the report at a level matching how it ended.
    pub fn log(&self, video_id: &str) {
        match &self.outcome {
            TransmitOutcome::Completed => {
                tracing::debug!(video_id, bytes_sent = self.bytes_sent, "Stream completed");
            }
            TransmitOutcome::SourceExhausted => {
                tracing::warn!(
                    video_id,
                    bytes_sent = self.bytes_sent,
                    "Media file ended before the planned span"
                );
            }
            TransmitOutcome::ClientGone(e) => {
                tracing::info!(
                    video_id,
                    bytes_sent = self.bytes_sent,
                    error = %e,
                    "Client stopped receiving stream"
                );
            }
            TransmitOutcome::ReadFailed(e) => {
                tracing::warn!(
                    video_id,
                    bytes_sent = self.bytes_sent,
                    error = %e,
                    "Reading media file failed mid-stream"
                );
            }
        }
    }
}

/// Bounded read/write/flush loop with a fixed chunk size.
#[derive(Debug, Clone, Copy)]
pub struct ChunkedTransmitter {
    chunk_size: usize,
}

impl Default for ChunkedTransmitter {
    fn default() -> Self {
        Self::new(DEFAULT_CHUNK_SIZE)
    }
}

impl ChunkedTransmitter {
    /// A zero chunk size is bumped to one byte.
    pub fn new(chunk_size: usize) -> Self {
        Self {
            chunk_size: chunk_size.max(1),
        }
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Position `source` at the first byte of `span`.
    ///
    /// Called before the response headers go out, so a failure here can still
    /// become an error status.
    pub async fn seek<R>(&self, source: &mut R, span: Span) -> io::Result<()>
    where
        R: AsyncSeek + Unpin + ?Sized,
    {
        if let Span::Window(window) = span {
            if window.start > 0 {
                source.seek(SeekFrom::Start(window.start)).await?;
            }
        }
        Ok(())
    }

    /// Copy `span` from the current position of `source` into `sink`.
    ///
    /// Never returns an error: once headers are out there is nobody to report
    /// it to, so the failure is carried in the report instead.
    pub async fn run<R, W>(&self, source: &mut R, span: Span, sink: &mut W) -> TransmitReport
    where
        R: AsyncRead + Unpin + ?Sized,
        W: AsyncWrite + Unpin + ?Sized,
    {
        let mut buf = vec![0u8; self.chunk_size];
        let mut remaining = span.budget();
        let mut bytes_sent = 0u64;

        let outcome = loop {
            if remaining == 0 {
                break TransmitOutcome::Completed;
            }
            let want = remaining.min(self.chunk_size as u64) as usize;

            let n = match source.read(&mut buf[..want]).await {
                Ok(0) => break TransmitOutcome::SourceExhausted,
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => break TransmitOutcome::ReadFailed(e),
            };

            if let Err(e) = sink.write_all(&buf[..n]).await {
                break TransmitOutcome::ClientGone(e);
            }
            if let Err(e) = sink.flush().await {
                break TransmitOutcome::ClientGone(e);
            }

            bytes_sent += n as u64;
            remaining -= n as u64;
        };

        if matches!(outcome, TransmitOutcome::Completed) {
            if let Err(e) = sink.shutdown().await {
                tracing::debug!(bytes_sent, error = %e, "Closing stream sink failed");
            }
        }

        TransmitReport { bytes_sent, outcome }
    }
}

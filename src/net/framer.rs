//! Short-read message framing.
//!
//! # Responsibilities
//! - Read one "complete" message off a byte stream that carries no length
//! - Used identically for the client request and the backend response
//!
//! # Design Decisions
//! - A read that returns fewer bytes than the chunk size ends the message
//! - A zero-byte read means the peer closed before the message ended and is
//!   an error, even when some bytes were already accumulated
//! - Messages whose length is an exact multiple of the chunk size are not
//!   delimited; the framer keeps reading until the peer writes more or closes.
//!   Length- or delimiter-based framing would be required to fix this.
//! - The read deadline covers the whole message rather than each chunk

use std::io;
use std::time::Duration;

use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::resilience::timeouts;

/// Default read chunk size in bytes.
pub const DEFAULT_CHUNK_SIZE: usize = 256;

/// Error type for framed reads.
#[derive(Debug, Error)]
pub enum FrameError {
    /// The peer closed the stream before a short read ended the message.
    #[error("stream closed before message was complete")]
    Closed,
    /// The underlying read failed or timed out.
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Reads messages using the short-read heuristic.
#[derive(Debug, Clone, Copy)]
pub struct Framer {
    chunk_size: usize,
    read_timeout: Option<Duration>,
}

impl Framer {
    /// Create a framer. A zero chunk size is bumped to one byte.
    pub fn new(chunk_size: usize, read_timeout: Option<Duration>) -> Self {
        Self {
            chunk_size: chunk_size.max(1),
            read_timeout,
        }
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Read until a short read, returning every byte received.
    ///
    /// The read timeout, if any, bounds the whole message, so a peer that
    /// keeps sending full chunks cannot hold the read open past it.
    pub async fn read_message<R>(&self, reader: &mut R) -> Result<Vec<u8>, FrameError>
    where
        R: AsyncRead + Unpin,
    {
        let message = timeouts::within(self.read_timeout, "read", self.read_chunks(reader)).await?;

        tracing::trace!(bytes = message.len(), "Message framed");
        Ok(message)
    }

    async fn read_chunks<R>(&self, reader: &mut R) -> Result<Vec<u8>, FrameError>
    where
        R: AsyncRead + Unpin,
    {
        let mut message = Vec::with_capacity(self.chunk_size);
        let mut chunk = vec![0u8; self.chunk_size];

        loop {
            let n = reader.read(&mut chunk).await?;
            if n == 0 {
                return Err(FrameError::Closed);
            }

            message.extend_from_slice(&chunk[..n]);

            if n < self.chunk_size {
                return Ok(message);
            }
        }
    }
}

impl Default for Framer {
    fn default() -> Self {
        Self::new(DEFAULT_CHUNK_SIZE, None)
    }
}

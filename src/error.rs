//! Per-connection error taxonomy.
//!
//! Every variant is terminal for the connection that produced it. None of
//! them propagate past the connection task.

use std::io;

use thiserror::Error;

use crate::http::request::ParseError;
use crate::http::response::SyntheticResponse;
use crate::net::framer::FrameError;

/// Failure of one stage of the request pipeline.
#[derive(Debug, Error)]
pub enum ProxyError {
    /// Reading a framed message failed (client or backend side).
    #[error("read failed: {0}")]
    Read(#[from] FrameError),

    /// The inbound header block could not be parsed.
    #[error("malformed request: {0}")]
    Malformed(#[from] ParseError),

    /// The API key header was missing or did not match.
    #[error("missing or invalid API key")]
    Unauthorized,

    /// The backend could not be resolved or connected.
    #[error("connect to backend {backend} failed: {source}")]
    Connect {
        backend: String,
        #[source]
        source: io::Error,
    },

    /// Writing the request to the backend failed.
    #[error("write to backend {backend} failed: {source}")]
    Write {
        backend: String,
        #[source]
        source: io::Error,
    },
}

impl ProxyError {
    /// The synthesized response the client receives for this failure.
    pub fn response(&self) -> SyntheticResponse {
        match self {
            ProxyError::Unauthorized => SyntheticResponse::Forbidden,
            _ => SyntheticResponse::InternalServerError,
        }
    }

    /// True when the failure came from a deadline rather than the peer.
    pub fn is_timeout(&self) -> bool {
        let kind = match self {
            ProxyError::Read(FrameError::Io(e)) => e.kind(),
            ProxyError::Connect { source, .. } | ProxyError::Write { source, .. } => source.kind(),
            _ => return false,
        };
        kind == io::ErrorKind::TimedOut
    }
}

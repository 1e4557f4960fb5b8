//! Responses written back to the client.
//!
//! # Responsibilities
//! - Relay the backend's raw response bytes unmodified
//! - Synthesize minimal 403 / 500 responses for pipeline failures
//!
//! # Design Decisions
//! - Content-Length is always computed from the literal body
//! - Exactly one outcome is written per connection, with no retries

use tokio::io::{AsyncWrite, AsyncWriteExt};

const FORBIDDEN_BODY: &str = "<html><body>Forbidden</body></html>";
const INTERNAL_ERROR_BODY: &str = "<html><body>Internal Server Error</body></html>";

/// A response generated by the proxy itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntheticResponse {
    /// Authentication failed.
    Forbidden,
    /// Any other pipeline failure.
    InternalServerError,
}

impl SyntheticResponse {
    pub fn status_line(&self) -> &'static str {
        match self {
            SyntheticResponse::Forbidden => "HTTP/1.1 403 Forbidden",
            SyntheticResponse::InternalServerError => "HTTP/1.1 500 Internal Server Error",
        }
    }

    pub fn body(&self) -> &'static str {
        match self {
            SyntheticResponse::Forbidden => FORBIDDEN_BODY,
            SyntheticResponse::InternalServerError => INTERNAL_ERROR_BODY,
        }
    }

    /// Serialize to wire bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let body = self.body();
        format!(
            "{}\r\nContent-Length: {}\r\nContent-Type: text/html\r\n\r\n{}",
            self.status_line(),
            body.len(),
            body
        )
        .into_bytes()
    }
}

/// What the connection handler sends back.
#[derive(Debug)]
pub enum Outcome {
    /// The backend's raw response.
    Relay(Vec<u8>),
    /// A proxy-generated error.
    Synthetic(SyntheticResponse),
}

impl Outcome {
    pub fn as_bytes(&self) -> std::borrow::Cow<'_, [u8]> {
        match self {
            Outcome::Relay(raw) => raw.as_slice().into(),
            Outcome::Synthetic(resp) => resp.to_bytes().into(),
        }
    }
}

/// Write `outcome` verbatim to `writer` and flush.
pub async fn write_outcome<W>(writer: &mut W, outcome: &Outcome) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    writer.write_all(&outcome.as_bytes()).await?;
    writer.flush().await
}

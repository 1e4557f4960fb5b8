//! Optional I/O deadlines.
//!
//! # Responsibilities
//! - Wrap connect, read and write calls with an optional deadline
//! - Report an elapsed deadline as `io::ErrorKind::TimedOut`
//!
//! # Design Decisions
//! - `None` means unbounded, so a silent peer can hold a task forever
//! - Timeouts reuse the I/O error of the operation they guard, so they map
//!   onto the same synthesized response as any other failure of that stage

use std::future::Future;
use std::io;
use std::time::Duration;

/// Convert an optional millisecond setting into a deadline.
pub fn from_millis(ms: Option<u64>) -> Option<Duration> {
    ms.map(Duration::from_millis)
}

/// Run `fut`, failing with `TimedOut` if `limit` elapses first.
///
/// Any error type that wraps `io::Error` can carry the timeout.
pub async fn within<F, T, E>(limit: Option<Duration>, operation: &'static str, fut: F) -> Result<T, E>
where
    F: Future<Output = Result<T, E>>,
    E: From<io::Error>,
{
    match limit {
        None => fut.await,
        Some(limit) => match tokio::time::timeout(limit, fut).await {
            Ok(result) => result,
            Err(_) => Err(io::Error::new(
                io::ErrorKind::TimedOut,
                format!("{} timed out after {:?}", operation, limit),
            )
            .into()),
        },
    }
}

//! Minimal HTTP/1.x request parsing.
//!
//! # Responsibilities
//! - Recover method, path and protocol from the request line
//! - Build a header map from the lines before the first empty line
//!
//! # Design Decisions
//! - Parsing is read-only: the raw bytes are what gets forwarded
//! - Header names are case-sensitive and the last duplicate wins
//! - The body is never inspected

use std::collections::HashMap;

use thiserror::Error;

const CRLF: &[u8] = b"\r\n";

/// Errors produced while parsing a header block.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// The first line has fewer than three space-separated tokens.
    #[error("request line must have method, path and protocol")]
    MalformedRequestLine,
    /// A header line has no colon.
    #[error("header line without ':' separator: {0:?}")]
    MalformedHeader(String),
}

/// A parsed request head.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedRequest {
    pub method: String,
    pub path: String,
    pub protocol: String,
    pub headers: HashMap<String, String>,
}

impl ParsedRequest {
    /// Parse the request line and header block of `raw`.
    pub fn parse(raw: &[u8]) -> Result<Self, ParseError> {
        let mut lines = Lines { rest: Some(raw) };

        let request_line = String::from_utf8_lossy(lines.next().unwrap_or_default());
        let mut tokens = request_line.split(' ');
        let (method, path, protocol) = match (tokens.next(), tokens.next(), tokens.next()) {
            (Some(m), Some(p), Some(v)) => (m.trim(), p.trim(), v.trim()),
            _ => return Err(ParseError::MalformedRequestLine),
        };

        let mut headers = HashMap::new();
        for line in lines {
            if line.is_empty() {
                break;
            }
            let line = String::from_utf8_lossy(line);
            let (name, value) = line
                .split_once(':')
                .ok_or_else(|| ParseError::MalformedHeader(line.to_string()))?;
            headers.insert(name.trim().to_string(), value.trim().to_string());
        }

        Ok(Self {
            method: method.to_string(),
            path: path.to_string(),
            protocol: protocol.to_string(),
            headers,
        })
    }

    /// Look up a header by its exact name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }
}

/// CRLF-separated lines of a byte buffer.
struct Lines<'a> {
    rest: Option<&'a [u8]>,
}

impl<'a> Iterator for Lines<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        let rest = self.rest?;
        match rest.windows(CRLF.len()).position(|w| w == CRLF) {
            Some(idx) => {
                self.rest = Some(&rest[idx + CRLF.len()..]);
                Some(&rest[..idx])
            }
            None => {
                self.rest = None;
                Some(rest)
            }
        }
    }
}

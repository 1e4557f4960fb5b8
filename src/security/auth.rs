use crate::config::AuthConfig;
use crate::error::ProxyError;
use crate::http::ParsedRequest;

/// Shared-secret check on a single request header.
#[derive(Debug, Clone)]
pub struct Authenticator {
    header: String,
    api_key: String,
}

impl Authenticator {
    pub fn new(header: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            api_key: api_key.into(),
        }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(config.header.clone(), config.api_key.clone())
    }

    /// Succeed only if the header is present and matches exactly.
    pub fn check(&self, request: &ParsedRequest) -> Result<(), ProxyError> {
        match request.header(&self.header) {
            Some(value) if value == self.api_key => Ok(()),
            _ => Err(ProxyError::Unauthorized),
        }
    }

    pub fn header_name(&self) -> &str {
        &self.header
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(raw: &str) -> ParsedRequest {
        ParsedRequest::parse(raw.as_bytes()).unwrap()
    }

    #[test]
    fn accepts_matching_key() {
        let auth = Authenticator::new("Api-Key", "MYKEY");
        assert!(auth.check(&request("GET / HTTP/1.1\r\nApi-Key: MYKEY\r\n\r\n")).is_ok());
    }

    #[test]
    fn rejects_missing_key() {
        let auth = Authenticator::new("Api-Key", "MYKEY");
        let err = auth.check(&request("GET / HTTP/1.1\r\nHost: x\r\n\r\n")).unwrap_err();
        assert!(matches!(err, ProxyError::Unauthorized));
    }

    #[test]
    fn rejects_wrong_or_differently_cased_key() {
        let auth = Authenticator::new("Api-Key", "MYKEY");
        assert!(auth.check(&request("GET / HTTP/1.1\r\nApi-Key: mykey\r\n\r\n")).is_err());
        assert!(auth.check(&request("GET / HTTP/1.1\r\nApi-Key: MYKEY2\r\n\r\n")).is_err());
        assert!(auth.check(&request("GET / HTTP/1.1\r\nAPI-KEY: MYKEY\r\n\r\n")).is_err());
    }

    #[test]
    fn custom_header_name() {
        let auth = Authenticator::new("X-Token", "s3cret");
        assert_eq!(auth.header_name(), "X-Token");
        assert!(auth.check(&request("GET / HTTP/1.1\r\nX-Token: s3cret\r\n\r\n")).is_ok());
    }
}

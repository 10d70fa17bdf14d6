//! Service error base type

use uuid::Uuid;

/// Boxed underlying error attached as the cause of a service error.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// An error reported by the identity provider or generated by the client.
///
/// Carries the error code callers match on, the human-readable message, and
/// whatever the token endpoint told us about the failure. Values are built
/// once through the consuming `with_*` methods and are read-only afterwards.
#[derive(Debug, thiserror::Error)]
#[error("{error_code}: {message}")]
pub struct ServiceError {
    error_code: String,
    message: String,
    #[source]
    cause: Option<BoxError>,
    sub_error: Option<String>,
    status_code: Option<u16>,
    claims: Option<String>,
    correlation_id: Option<Uuid>,
    trace_id: Option<Uuid>,
    error_codes: Vec<u32>,
    response_body: Option<String>,
}

impl ServiceError {
    /// Creates a new service error with the given code and message.
    pub fn new(error_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_code: error_code.into(),
            message: message.into(),
            cause: None,
            sub_error: None,
            status_code: None,
            claims: None,
            correlation_id: None,
            trace_id: None,
            error_codes: Vec::new(),
            response_body: None,
        }
    }

    /// Attaches the underlying error that caused this one.
    pub fn with_cause(mut self, cause: impl Into<BoxError>) -> Self {
        self.cause = Some(cause.into());
        self
    }

    /// Sets the provider sub-error code.
    pub fn with_sub_error(mut self, sub_error: impl Into<String>) -> Self {
        self.sub_error = Some(sub_error.into());
        self
    }

    /// Sets the HTTP status code of the failed response.
    pub fn with_status_code(mut self, status_code: u16) -> Self {
        self.status_code = Some(status_code);
        self
    }

    /// Sets the claims challenge returned by the service.
    pub fn with_claims(mut self, claims: impl Into<String>) -> Self {
        self.claims = Some(claims.into());
        self
    }

    /// Sets the correlation ID of the failed request.
    pub fn with_correlation_id(mut self, correlation_id: Uuid) -> Self {
        self.correlation_id = Some(correlation_id);
        self
    }

    /// Sets the trace ID of the failed request.
    pub fn with_trace_id(mut self, trace_id: Uuid) -> Self {
        self.trace_id = Some(trace_id);
        self
    }

    /// Sets the numeric AADSTS error codes.
    pub fn with_error_codes(mut self, error_codes: impl IntoIterator<Item = u32>) -> Self {
        self.error_codes = error_codes.into_iter().collect();
        self
    }

    /// Keeps the raw response body for diagnostics.
    pub fn with_response_body(mut self, body: impl Into<String>) -> Self {
        self.response_body = Some(body.into());
        self
    }

    /// Returns the error code, e.g. `invalid_grant`.
    pub fn error_code(&self) -> &str {
        &self.error_code
    }

    /// Returns the human-readable message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the underlying error, if any.
    pub fn cause(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        self.cause.as_deref()
    }

    /// Returns the provider sub-error code, if any.
    pub fn sub_error(&self) -> Option<&str> {
        self.sub_error.as_deref()
    }

    /// Returns the HTTP status code, if known.
    pub fn status_code(&self) -> Option<u16> {
        self.status_code
    }

    /// Returns the claims challenge, if the service sent one.
    pub fn claims(&self) -> Option<&str> {
        self.claims.as_deref()
    }

    /// Returns the correlation ID, if known.
    pub fn correlation_id(&self) -> Option<Uuid> {
        self.correlation_id
    }

    /// Returns the trace ID, if known.
    pub fn trace_id(&self) -> Option<Uuid> {
        self.trace_id
    }

    /// Returns the numeric AADSTS error codes.
    pub fn error_codes(&self) -> &[u32] {
        &self.error_codes
    }

    /// Returns the raw response body, if kept.
    pub fn response_body(&self) -> Option<&str> {
        self.response_body.as_deref()
    }

    /// Returns `true` if the service reported the given AADSTS code.
    ///
    /// Checks the numeric `error_codes` first, then falls back to looking for
    /// `AADSTS<code>` in the message.
    pub fn has_aadsts_code(&self, code: u32) -> bool {
        if self.error_codes.contains(&code) {
            return true;
        }

        // The match must not be a prefix of a longer code.
        let needle = format!("AADSTS{}", code);
        self.message.match_indices(&needle).any(|(start, _)| {
            !self.message[start + needle.len()..]
                .starts_with(|c: char| c.is_ascii_digit())
        })
    }

    /// Returns `true` if retrying the request may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self.status_code, Some(429 | 500..=599))
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::*;

    #[test]
    fn test_new_has_no_metadata() {
        let err = ServiceError::new("invalid_grant", "bad grant");
        assert_eq!(err.error_code(), "invalid_grant");
        assert_eq!(err.message(), "bad grant");
        assert!(err.cause().is_none());
        assert!(err.sub_error().is_none());
        assert!(err.status_code().is_none());
        assert!(err.error_codes().is_empty());
        assert_eq!(err.to_string(), "invalid_grant: bad grant");
    }

    #[test]
    fn test_empty_code_and_message_allowed() {
        let err = ServiceError::new("", "");
        assert_eq!(err.error_code(), "");
        assert_eq!(err.message(), "");
    }

    #[test]
    fn test_cause_is_source() {
        let io = std::io::Error::other("connection reset");
        let err = ServiceError::new("request_failed", "token request failed").with_cause(io);

        assert_eq!(err.cause().unwrap().to_string(), "connection reset");
        assert_eq!(err.source().unwrap().to_string(), "connection reset");
    }

    #[test]
    fn test_has_aadsts_code() {
        let err = ServiceError::new("invalid_grant", "AADSTS50076: MFA required")
            .with_error_codes([50076]);
        assert!(err.has_aadsts_code(50076));
        assert!(!err.has_aadsts_code(50126));

        let err = ServiceError::new("invalid_grant", "AADSTS50126: Invalid username or password");
        assert!(err.has_aadsts_code(50126));
    }

    #[test]
    fn test_has_aadsts_code_ignores_code_prefixes() {
        let err = ServiceError::new("invalid_grant", "AADSTS50076: MFA required");
        assert!(err.has_aadsts_code(50076));
        assert!(!err.has_aadsts_code(5007));
        assert!(!err.has_aadsts_code(500));
        assert!(!err.has_aadsts_code(50));

        let err = ServiceError::new("invalid_grant", "Trace AADSTS5007 then AADSTS50076");
        assert!(err.has_aadsts_code(5007));
        assert!(err.has_aadsts_code(50076));

        let err = ServiceError::new("invalid_grant", "Failed with AADSTS50126");
        assert!(err.has_aadsts_code(50126));
        assert!(!err.has_aadsts_code(5012));
    }

    #[test]
    fn test_is_retryable() {
        let status = |code| ServiceError::new("x", "y").with_status_code(code);
        assert!(status(429).is_retryable());
        assert!(status(500).is_retryable());
        assert!(status(503).is_retryable());
        assert!(!status(400).is_retryable());
        assert!(!status(401).is_retryable());
        assert!(!ServiceError::new("x", "y").is_retryable());
    }
}

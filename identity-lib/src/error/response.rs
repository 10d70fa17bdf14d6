//! Token endpoint error responses

use serde::Deserialize;
use uuid::Uuid;

use super::ServiceError;

/// Error body returned by the Azure AD token endpoint.
///
/// Only `error` is guaranteed; everything else depends on the endpoint
/// version and the failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TokenErrorResponse {
    /// OAuth2 error code, e.g. `invalid_grant`.
    pub error: String,
    /// Human-readable description, usually prefixed with an AADSTS code.
    #[serde(default)]
    pub error_description: Option<String>,
    /// Numeric AADSTS codes.
    #[serde(default, deserialize_with = "deserialize_nullable_codes")]
    pub error_codes: Vec<u32>,
    /// Provider sub-error, e.g. `basic_action`.
    #[serde(default)]
    pub suberror: Option<String>,
    /// Claims challenge to send on the next interactive request.
    #[serde(default)]
    pub claims: Option<String>,
    #[serde(default, deserialize_with = "deserialize_lenient_uuid")]
    pub correlation_id: Option<Uuid>,
    #[serde(default, deserialize_with = "deserialize_lenient_uuid")]
    pub trace_id: Option<Uuid>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub error_uri: Option<String>,
}

/// Deserializes `error_codes`, treating `null` as empty.
fn deserialize_nullable_codes<'de, D>(deserializer: D) -> Result<Vec<u32>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<u32>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Deserializes a GUID, treating malformed or non-string values as absent.
fn deserialize_lenient_uuid<'de, D>(deserializer: D) -> Result<Option<Uuid>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(Uuid::parse_str(&s).ok()),
        _ => Ok(None),
    }
}

impl TokenErrorResponse {
    /// Parses a token endpoint error body.
    pub fn from_json(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(body)
    }

    /// Builds a [`ServiceError`] carrying everything in this response.
    ///
    /// The message is the description, or the error code when there is none.
    pub fn into_service_error(self, status_code: u16) -> ServiceError {
        let message = self
            .error_description
            .unwrap_or_else(|| self.error.clone());

        let mut service = ServiceError::new(self.error, message)
            .with_status_code(status_code)
            .with_error_codes(self.error_codes);

        if let Some(sub_error) = self.suberror {
            service = service.with_sub_error(sub_error);
        }
        if let Some(claims) = self.claims {
            service = service.with_claims(claims);
        }
        if let Some(id) = self.correlation_id {
            service = service.with_correlation_id(id);
        }
        if let Some(id) = self.trace_id {
            service = service.with_trace_id(id);
        }
        service
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MFA_BODY: &str = r#"{
        "error": "invalid_grant",
        "error_description": "AADSTS50076: Due to a configuration change made by your administrator, or because you moved to a new location, you must use multi-factor authentication.",
        "error_codes": [50076],
        "timestamp": "2024-03-01 10:15:00Z",
        "trace_id": "0e3f6d2a-9a43-4a5c-8e43-2f1e0b7d1c00",
        "correlation_id": "7b2d3c4e-1f2a-4b5c-9d8e-0a1b2c3d4e5f",
        "error_uri": "https://login.microsoftonline.com/error?code=50076",
        "suberror": "basic_action",
        "claims": "{\"access_token\":{\"capolids\":{\"essential\":true,\"values\":[\"abc\"]}}}"
    }"#;

    #[test]
    fn test_parse_full_body() {
        let response = TokenErrorResponse::from_json(MFA_BODY).unwrap();
        assert_eq!(response.error, "invalid_grant");
        assert_eq!(response.error_codes, vec![50076]);
        assert_eq!(response.suberror.as_deref(), Some("basic_action"));
        assert!(response.claims.is_some());
        assert_eq!(
            response.correlation_id,
            Some(Uuid::parse_str("7b2d3c4e-1f2a-4b5c-9d8e-0a1b2c3d4e5f").unwrap())
        );
        assert!(response.trace_id.is_some());
    }

    #[test]
    fn test_parse_minimal_body() {
        let response = TokenErrorResponse::from_json(r#"{"error":"invalid_client"}"#).unwrap();
        assert_eq!(response.error, "invalid_client");
        assert!(response.error_description.is_none());
        assert!(response.error_codes.is_empty());
        assert!(response.suberror.is_none());
    }

    #[test]
    fn test_malformed_guid_is_dropped() {
        let response = TokenErrorResponse::from_json(
            r#"{"error":"invalid_grant","correlation_id":"not-a-guid","trace_id":null}"#,
        )
        .unwrap();
        assert!(response.correlation_id.is_none());
        assert!(response.trace_id.is_none());
    }

    #[test]
    fn test_null_error_codes_are_empty() {
        let response = TokenErrorResponse::from_json(
            r#"{"error":"invalid_grant","suberror":"basic_action","error_codes":null}"#,
        )
        .unwrap();
        assert!(response.error_codes.is_empty());
        assert_eq!(response.suberror.as_deref(), Some("basic_action"));
    }

    #[test]
    fn test_non_string_guid_is_dropped() {
        let response = TokenErrorResponse::from_json(
            r#"{"error":"invalid_grant","correlation_id":12345,"trace_id":{"id":"x"}}"#,
        )
        .unwrap();
        assert!(response.correlation_id.is_none());
        assert!(response.trace_id.is_none());
    }

    #[test]
    fn test_missing_error_fails() {
        assert!(TokenErrorResponse::from_json(r#"{"error_description":"x"}"#).is_err());
        assert!(TokenErrorResponse::from_json("<html>Bad Gateway</html>").is_err());
    }

    #[test]
    fn test_into_service_error() {
        let service = TokenErrorResponse::from_json(MFA_BODY)
            .unwrap()
            .into_service_error(400);

        assert_eq!(service.error_code(), "invalid_grant");
        assert!(service.message().starts_with("AADSTS50076"));
        assert_eq!(service.sub_error(), Some("basic_action"));
        assert_eq!(service.status_code(), Some(400));
        assert!(service.has_aadsts_code(50076));
        assert!(service.claims().is_some());
        assert!(service.correlation_id().is_some());
    }

    #[test]
    fn test_message_falls_back_to_code() {
        let service = TokenErrorResponse {
            error: "login_required".to_string(),
            ..Default::default()
        }
        .into_service_error(400);
        assert_eq!(service.message(), "login_required");
    }
}

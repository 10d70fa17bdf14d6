//! Authentication error types

use super::Classification;
use super::InteractionRequiredError;
use super::ServiceError;
use super::TokenErrorResponse;
use super::sub_error;

/// Errors reported when acquiring a token fails.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The user has to interact (sign in, consent, MFA...) before a token can be issued.
    #[error("Interaction required: {0}")]
    InteractionRequired(#[from] InteractionRequiredError),

    /// Any other error reported by the identity provider.
    #[error("Service error: {0}")]
    Service(#[from] ServiceError),
}

impl AuthError {
    /// Builds an error from a failed token endpoint response.
    ///
    /// Bodies that aren't a token error document become a [`AuthError::Service`]
    /// with code `unknown` and the raw body as message.
    pub fn from_token_response(status_code: u16, body: &str) -> Self {
        match TokenErrorResponse::from_json(body) {
            Ok(response) => Self::from_error_response(status_code, response, body),
            Err(e) => {
                log::warn!("Unparseable token error response (HTTP {}): {}", status_code, e);
                let message = if body.trim().is_empty() {
                    format!("HTTP {}", status_code)
                } else {
                    body.to_string()
                };
                Self::Service(
                    ServiceError::new("unknown", message)
                        .with_status_code(status_code)
                        .with_response_body(body)
                        .with_cause(e),
                )
            }
        }
    }

    /// Builds an error from a parsed token endpoint response.
    pub fn from_error_response(status_code: u16, response: TokenErrorResponse, body: &str) -> Self {
        log::debug!(
            "Token endpoint error (HTTP {}): error={}, suberror={:?}, codes={:?}",
            status_code,
            response.error,
            response.suberror,
            response.error_codes
        );

        let interaction =
            sub_error::requires_interaction(&response.error, response.suberror.as_deref());
        let service = response
            .into_service_error(status_code)
            .with_response_body(body);

        if interaction {
            Self::InteractionRequired(service.into())
        } else {
            Self::Service(service)
        }
    }

    /// Returns the underlying service error.
    pub fn service(&self) -> &ServiceError {
        match self {
            Self::InteractionRequired(err) => err.service(),
            Self::Service(err) => err,
        }
    }

    /// Returns the error code.
    pub fn error_code(&self) -> &str {
        self.service().error_code()
    }

    /// Returns the human-readable message.
    pub fn message(&self) -> &str {
        self.service().message()
    }

    /// Returns the provider sub-error, if any.
    pub fn sub_error(&self) -> Option<&str> {
        self.service().sub_error()
    }

    /// Returns the interaction classification if interaction is required.
    pub fn classification(&self) -> Option<Classification> {
        match self {
            Self::InteractionRequired(err) => Some(err.classification()),
            Self::Service(_) => None,
        }
    }

    /// Returns `true` if the user has to interact to resolve this error.
    pub fn is_interaction_required(&self) -> bool {
        matches!(self, Self::InteractionRequired(_))
    }

    /// Returns `true` if the request is potentially retryable.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::InteractionRequired(_) => false,
            Self::Service(err) => err.is_retryable(),
        }
    }
}

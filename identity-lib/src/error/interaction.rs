//! Interaction required error types

use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use super::BoxError;
use super::ServiceError;
use super::sub_error;

/// What kind of user interaction resolves an [`InteractionRequiredError`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    /// No further detail. Interactive sign-in may resolve the issue.
    #[default]
    None,
    /// A conditional access policy the user can satisfy by signing in interactively.
    BasicAction,
    /// A conditional access policy the user must take extra steps for, e.g. MFA registration.
    AdditionalAction,
    /// Interaction won't help; show the message to the user.
    MessageOnly,
    /// The user or an administrator needs to consent to the application.
    ConsentRequired,
    /// The user's password expired and must be changed.
    UserPasswordExpired,
}

impl Classification {
    /// Every classification, in declaration order.
    pub const ALL: [Classification; 6] = [
        Self::None,
        Self::BasicAction,
        Self::AdditionalAction,
        Self::MessageOnly,
        Self::ConsentRequired,
        Self::UserPasswordExpired,
    ];

    /// Returns the snake_case name used in serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::BasicAction => "basic_action",
            Self::AdditionalAction => "additional_action",
            Self::MessageOnly => "message_only",
            Self::ConsentRequired => "consent_required",
            Self::UserPasswordExpired => "user_password_expired",
        }
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Silent token acquisition failed and the user has to interact to continue.
///
/// Returned when there is no usable token or refresh token, when the user has
/// to consent, when a conditional access policy (MFA and friends) kicks in,
/// and so on. Use [`classification`](Self::classification) to decide what to
/// do about it.
///
/// # Example
///
/// ```
/// use identity_lib::error::{Classification, InteractionRequiredError, ServiceError};
///
/// let service = ServiceError::new("invalid_grant", "AADSTS50076: MFA required")
///     .with_sub_error("basic_action");
/// let err = InteractionRequiredError::from(service);
///
/// assert_eq!(err.classification(), Classification::BasicAction);
/// ```
#[derive(Debug)]
pub struct InteractionRequiredError {
    service: ServiceError,
    classification: Classification,
}

impl InteractionRequiredError {
    /// Creates a new error with the given code and message.
    ///
    /// The error has no cause and its explicit classification is
    /// [`Classification::None`].
    pub fn new(error_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::from_service(ServiceError::new(error_code, message), Classification::None)
    }

    /// Wraps a service error with an explicit classification.
    ///
    /// The explicit classification only applies when the service error's
    /// sub-error is absent or unrecognized.
    pub fn from_service(service: ServiceError, classification: Classification) -> Self {
        Self {
            service,
            classification,
        }
    }

    /// Attaches the underlying error that caused this one.
    pub fn with_cause(self, cause: impl Into<BoxError>) -> Self {
        Self {
            service: self.service.with_cause(cause),
            classification: self.classification,
        }
    }

    /// Sets the explicit classification.
    pub fn with_classification(self, classification: Classification) -> Self {
        Self {
            service: self.service,
            classification,
        }
    }

    /// Returns the error code.
    pub fn error_code(&self) -> &str {
        self.service.error_code()
    }

    /// Returns the human-readable message.
    pub fn message(&self) -> &str {
        self.service.message()
    }

    /// Returns the underlying error, if any.
    pub fn cause(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        self.service.cause()
    }

    /// Returns the raw provider sub-error, if any.
    pub fn sub_error(&self) -> Option<&str> {
        self.service.sub_error()
    }

    /// Returns the classification supplied at construction.
    pub fn explicit_classification(&self) -> Classification {
        self.classification
    }

    /// Returns what kind of interaction resolves this error.
    ///
    /// A recognized provider sub-error always wins; otherwise the explicit
    /// classification is returned as is.
    pub fn classification(&self) -> Classification {
        self.service
            .sub_error()
            .and_then(sub_error::classify)
            .unwrap_or(self.classification)
    }

    /// Returns the underlying service error.
    pub fn service(&self) -> &ServiceError {
        &self.service
    }

    /// Unwraps into the underlying service error.
    pub fn into_service(self) -> ServiceError {
        self.service
    }

    /// Serializes the error to JSON.
    ///
    /// The cause is not included.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&Snapshot::from(self))
    }

    /// Restores an error serialized with [`to_json`](Self::to_json).
    ///
    /// The restored error has no cause.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let snapshot: Snapshot = serde_json::from_str(json)?;
        Ok(snapshot.into())
    }
}

impl From<ServiceError> for InteractionRequiredError {
    fn from(service: ServiceError) -> Self {
        Self::from_service(service, Classification::None)
    }
}

impl std::fmt::Display for InteractionRequiredError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.service, f)
    }
}

impl std::error::Error for InteractionRequiredError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(&self.service)
    }
}

/// Serialized form of an [`InteractionRequiredError`].
#[derive(Debug, Serialize, Deserialize)]
struct Snapshot {
    error_code: String,
    message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sub_error: Option<String>,
    #[serde(default)]
    classification: Classification,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    status_code: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    claims: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    correlation_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    trace_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    error_codes: Vec<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    response_body: Option<String>,
}

impl From<&InteractionRequiredError> for Snapshot {
    fn from(err: &InteractionRequiredError) -> Self {
        let service = &err.service;
        Self {
            error_code: service.error_code().to_string(),
            message: service.message().to_string(),
            sub_error: service.sub_error().map(str::to_string),
            classification: err.classification,
            status_code: service.status_code(),
            claims: service.claims().map(str::to_string),
            correlation_id: service.correlation_id(),
            trace_id: service.trace_id(),
            error_codes: service.error_codes().to_vec(),
            response_body: service.response_body().map(str::to_string),
        }
    }
}

impl From<Snapshot> for InteractionRequiredError {
    fn from(snapshot: Snapshot) -> Self {
        let mut service = ServiceError::new(snapshot.error_code, snapshot.message)
            .with_error_codes(snapshot.error_codes);

        if let Some(sub_error) = snapshot.sub_error {
            service = service.with_sub_error(sub_error);
        }
        if let Some(status) = snapshot.status_code {
            service = service.with_status_code(status);
        }
        if let Some(claims) = snapshot.claims {
            service = service.with_claims(claims);
        }
        if let Some(id) = snapshot.correlation_id {
            service = service.with_correlation_id(id);
        }
        if let Some(id) = snapshot.trace_id {
            service = service.with_trace_id(id);
        }
        if let Some(body) = snapshot.response_body {
            service = service.with_response_body(body);
        }

        Self::from_service(service, snapshot.classification)
    }
}

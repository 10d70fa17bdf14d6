//! Provider sub-error codes

use super::Classification;

/// Conditional access policy that can be satisfied by the user signing in again.
pub const BASIC_ACTION: &str = "basic_action";

/// Conditional access policy the user must satisfy, e.g. registering MFA.
pub const ADDITIONAL_ACTION: &str = "additional_action";

/// The service wants a message shown to the user; interaction won't resolve it.
pub const MESSAGE_ONLY: &str = "message_only";

/// The user (or an administrator) has not consented to the application.
pub const CONSENT_REQUIRED: &str = "consent_required";

/// The user's password has expired.
pub const USER_PASSWORD_EXPIRED: &str = "user_password_expired";

/// The refresh token was issued to a different client.
pub const CLIENT_MISMATCH: &str = "client_mismatch";

/// Top-level OAuth2 error codes that always mean the user has to interact.
pub const INTERACTION_ERROR_CODES: [&str; 3] =
    ["interaction_required", "login_required", "consent_required"];

/// OAuth2 `invalid_grant` error code.
pub const INVALID_GRANT: &str = "invalid_grant";

/// Sub-error codes and the classification each one maps to, in lookup order.
pub const CLASSIFICATIONS: [(&str, Classification); 5] = [
    (BASIC_ACTION, Classification::BasicAction),
    (ADDITIONAL_ACTION, Classification::AdditionalAction),
    (MESSAGE_ONLY, Classification::MessageOnly),
    (CONSENT_REQUIRED, Classification::ConsentRequired),
    (USER_PASSWORD_EXPIRED, Classification::UserPasswordExpired),
];

/// Looks up the classification for a provider sub-error.
///
/// Comparison is ASCII case-insensitive and does not depend on locale.
/// Returns `None` for unrecognized sub-errors.
pub fn classify(sub_error: &str) -> Option<Classification> {
    CLASSIFICATIONS
        .iter()
        .find(|(code, _)| code.eq_ignore_ascii_case(sub_error))
        .map(|(_, classification)| *classification)
}

/// Returns `true` if a token endpoint error code means interaction is required.
///
/// `invalid_grant` counts unless the sub-error says the grant belongs to another client.
pub(crate) fn requires_interaction(error: &str, sub_error: Option<&str>) -> bool {
    if INTERACTION_ERROR_CODES
        .iter()
        .any(|code| code.eq_ignore_ascii_case(error))
    {
        return true;
    }

    error.eq_ignore_ascii_case(INVALID_GRANT)
        && !sub_error.is_some_and(|sub| sub.eq_ignore_ascii_case(CLIENT_MISMATCH))
}

//! Identity client error library
//!
//! Error types for Azure AD / Microsoft Entra token acquisition, centered on
//! telling callers when, and how, the user has to interact to get a token.

pub mod error;

pub use error::AuthError;
pub use error::Classification;
pub use error::InteractionRequiredError;
pub use error::ServiceError;

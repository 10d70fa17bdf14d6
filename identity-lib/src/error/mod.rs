//! Error types

mod auth;
mod interaction;
mod response;
mod service;
pub mod sub_error;

pub use auth::*;
pub use interaction::*;
pub use response::*;
pub use service::*;

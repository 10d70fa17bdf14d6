//! Token error classification example.
//!
//! Run with: cargo run --example classify_response [path/to/body.json]
//!
//! Reads a token endpoint error body (from the given file, or a built-in MFA
//! sample) and prints what the caller should do about it.

use std::env;

use identity_lib::AuthError;
use identity_lib::Classification;
use simplelog::{Config, LevelFilter, SimpleLogger};

const SAMPLE_BODY: &str = r#"{
    "error": "invalid_grant",
    "error_description": "AADSTS50076: Due to a configuration change made by your administrator, you must use multi-factor authentication.",
    "error_codes": [50076],
    "suberror": "basic_action",
    "correlation_id": "7b2d3c4e-1f2a-4b5c-9d8e-0a1b2c3d4e5f"
}"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    SimpleLogger::init(LevelFilter::Debug, Config::default())?;

    let body = match env::args().nth(1) {
        Some(path) => std::fs::read_to_string(path)?,
        None => SAMPLE_BODY.to_string(),
    };

    let err = AuthError::from_token_response(400, &body);

    println!("Error:    {}", err);
    println!("Code:     {}", err.error_code());
    println!("Message:  {}", err.message());
    if let Some(id) = err.service().correlation_id() {
        println!("Correlation ID: {}", id);
    }

    match err.classification() {
        Some(Classification::BasicAction | Classification::None) => {
            println!("-> Sign the user in interactively.");
        }
        Some(Classification::AdditionalAction) => {
            println!("-> Sign in interactively; the user has extra steps to complete.");
        }
        Some(Classification::MessageOnly) => {
            println!("-> Show the message to the user, interaction won't help.");
        }
        Some(Classification::ConsentRequired) => {
            println!("-> Ask the user or an administrator for consent.");
        }
        Some(Classification::UserPasswordExpired) => {
            println!("-> Send the user to change their password.");
        }
        None if err.is_retryable() => println!("-> Transient failure, retry later."),
        None => println!("-> Not an interaction problem, report the error."),
    }

    Ok(())
}

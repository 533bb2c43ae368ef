//! Request and response data transfer objects.

pub mod request;
pub mod response;

use arsip_core::error::AppError;
use validator::Validate;

/// Runs `validator` rules on a payload and folds failures into one
/// validation error listing each offending field.
pub fn validate_payload<T: Validate>(payload: &T) -> Result<(), AppError> {
    payload.validate().map_err(|errors| {
        let mut details: Vec<String> = errors
            .field_errors()
            .iter()
            .map(|(field, field_errors)| {
                let messages: Vec<String> = field_errors
                    .iter()
                    .map(|e| match &e.message {
                        Some(message) => message.to_string(),
                        None => format!("failed rule '{}'", e.code),
                    })
                    .collect();
                format!("{field}: {}", messages.join(", "))
            })
            .collect();
        details.sort();
        AppError::validation(details.join("; "))
    })
}

//! Common validation utilities and helpers.

use validator::ValidationErrors;

use crate::constants::CODE_VALIDATION_FAILED;
use crate::errors::ApiError;

/// Convert validator errors to ApiError::ValidationError.
///
/// This helper function extracts error messages from ValidationErrors
/// and converts them into a format suitable for API responses.
///
/// # Example
/// ```ignore
/// body.validate().map_err(validation_errors_to_api_error)?;
/// ```
pub fn validation_errors_to_api_error(e: ValidationErrors) -> ApiError {
    let mut errors: Vec<String> = e
        .field_errors()
        .iter()
        .flat_map(|(_, errs)| {
            errs.iter()
                .map(|e| e.message.clone().unwrap_or_default().to_string())
        })
        .collect();
    errors.sort();
    ApiError::ValidationError {
        code: CODE_VALIDATION_FAILED.to_string(),
        errors,
    }
}

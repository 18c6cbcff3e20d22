use actix_web::{HttpResponse, ResponseError};
use std::fmt;

use crate::constants::{CODE_INTERNAL_ERROR, ERR_RUNTIME_TIMEOUT};
use crate::models::ErrorResponse;

#[derive(Debug)]
pub enum ApiError {
    BadRequest { code: String, message: String },
    NotFound { code: String, message: String },
    InternalServerError { code: String, message: String },
    ValidationError { code: String, errors: Vec<String> },
}

impl ApiError {
    /// Replace the machine-readable code, keeping the variant and message.
    ///
    /// Services raise runtime failures with a generic code; handlers narrow it
    /// to the operation that failed.
    pub fn with_code(self, new_code: &str) -> Self {
        let code = new_code.to_string();
        match self {
            ApiError::BadRequest { message, .. } => ApiError::BadRequest { code, message },
            ApiError::NotFound { message, .. } => ApiError::NotFound { code, message },
            ApiError::InternalServerError { message, .. } => {
                ApiError::InternalServerError { code, message }
            }
            ApiError::ValidationError { errors, .. } => ApiError::ValidationError { code, errors },
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::BadRequest { code, message } => {
                write!(f, "Bad Request [{}]: {}", code, message)
            }
            ApiError::NotFound { code, message } => {
                write!(f, "Not Found [{}]: {}", code, message)
            }
            ApiError::InternalServerError { code, message } => {
                write!(f, "Internal Server Error [{}]: {}", code, message)
            }
            ApiError::ValidationError { code, errors } => {
                write!(f, "Validation Error [{}]: {:?}", code, errors)
            }
        }
    }
}

impl ResponseError for ApiError {
    fn error_response(&self) -> HttpResponse {
        match self {
            ApiError::BadRequest { code, message } => {
                HttpResponse::BadRequest().json(ErrorResponse {
                    success: false,
                    code: code.clone(),
                    message: message.clone(),
                    errors: None,
                })
            }
            ApiError::NotFound { code, message } => HttpResponse::NotFound().json(ErrorResponse {
                success: false,
                code: code.clone(),
                message: message.clone(),
                errors: None,
            }),
            ApiError::InternalServerError { code, message } => HttpResponse::InternalServerError()
                .json(ErrorResponse {
                    success: false,
                    code: code.clone(),
                    message: message.clone(),
                    errors: None,
                }),
            ApiError::ValidationError { code, errors } => {
                HttpResponse::BadRequest().json(ErrorResponse {
                    success: false,
                    code: code.clone(),
                    message: "Validation failed".to_string(),
                    errors: Some(errors.clone()),
                })
            }
        }
    }
}

impl From<bollard::errors::Error> for ApiError {
    fn from(err: bollard::errors::Error) -> Self {
        ApiError::InternalServerError {
            code: CODE_INTERNAL_ERROR.to_string(),
            message: err.to_string(),
        }
    }
}

impl From<tokio::time::error::Elapsed> for ApiError {
    fn from(_: tokio::time::error::Elapsed) -> Self {
        ApiError::InternalServerError {
            code: CODE_INTERNAL_ERROR.to_string(),
            message: ERR_RUNTIME_TIMEOUT.to_string(),
        }
    }
}

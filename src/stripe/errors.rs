use axum::http::StatusCode;

use crate::app::{errors::DefaultApiError, models::api_error::ApiError};

#[derive(Debug)]
pub enum StripeApiError {
    SignatureNotFound,
    VerificationFailed,
    ProcessingFailed,
}

impl StripeApiError {
    pub fn value(&self) -> ApiError {
        match *self {
            Self::SignatureNotFound => ApiError {
                code: StatusCode::BAD_REQUEST,
                message: "Signature not found".to_string(),
            },
            // Both collapse to 500 so the provider redelivers.
            Self::VerificationFailed | Self::ProcessingFailed => {
                DefaultApiError::InternalServerError.value()
            }
        }
    }
}

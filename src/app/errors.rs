use axum::http::StatusCode;

use super::models::api_error::ApiError;

#[derive(Debug)]
pub enum DefaultApiError {
    InternalServerError,
    ServiceUnavailable,
}

impl DefaultApiError {
    pub fn value(&self) -> ApiError {
        match *self {
            Self::InternalServerError => ApiError {
                code: StatusCode::INTERNAL_SERVER_ERROR,
                message: "Internal Server Error".to_string(),
            },
            Self::ServiceUnavailable => ApiError {
                code: StatusCode::SERVICE_UNAVAILABLE,
                message: "Service Unavailable".to_string(),
            },
        }
    }
}

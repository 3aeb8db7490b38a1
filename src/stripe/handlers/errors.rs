use axum::http::StatusCode;

use crate::app::models::api_error::ApiError;

#[derive(Debug)]
pub enum HandlersApiError {
    InvalidEventObject { event_id: String, field: &'static str },
    HandlerFailed(String),
}

impl HandlersApiError {
    pub fn value(&self) -> ApiError {
        match self {
            Self::InvalidEventObject { event_id, field } => ApiError {
                code: StatusCode::INTERNAL_SERVER_ERROR,
                message: format!("Event {} is missing data.object.{}.", event_id, field),
            },
            Self::HandlerFailed(message) => ApiError {
                code: StatusCode::INTERNAL_SERVER_ERROR,
                message: message.to_string(),
            },
        }
    }
}

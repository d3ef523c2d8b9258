use axum::http::StatusCode;

/// Failures talking to the catch backend or preparing a request for it.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("network or server error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("backend sent an unexpected response: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("backend rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("invalid catch: {0}")]
    Invalid(String),
}

impl ClientError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid(message.into())
    }

    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        Self::Rejected {
            status,
            message: message.into(),
        }
    }
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    pub fn bad_gateway(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::BAD_GATEWAY,
            message: err.to_string(),
        }
    }
}

impl From<ClientError> for AppError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Invalid(message) => Self::bad_request(message),
            other => Self::bad_gateway(other),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use kcentroid_core::DownscaleError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Downscale error: {0}")]
    Downscale(#[from] DownscaleError),

    #[error("Image error: {0}")]
    Image(#[from] ImageError),

    #[error("Internal error: {0}")]
    Internal(String),
}

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("PNG decode error: {0}")]
    PngDecode(String),

    #[error("PNG encode error: {0}")]
    PngEncode(String),

    #[error("Unsupported image layout: {0}")]
    Unsupported(String),

    #[error("Image dimensions {width}x{height} exceed the {max} pixel limit")]
    TooLarge { width: u32, height: u32, max: u64 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Downscale(DownscaleError::InvalidParameter { .. })
            | ApiError::Downscale(DownscaleError::InvalidInput(_)) => StatusCode::BAD_REQUEST,
            ApiError::Downscale(DownscaleError::Quantization { .. }) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::Image(ImageError::PngDecode(_))
            | ApiError::Image(ImageError::Unsupported(_)) => StatusCode::BAD_REQUEST,
            ApiError::Image(ImageError::TooLarge { .. }) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Image(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::debug!(error = %self, "Request rejected");
        }

        let body = Json(json!({
            "status": status.as_u16(),
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}

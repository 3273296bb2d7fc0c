use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
    Json as JsonExtractor,
};
use kcentroid_core::NormalizedImage;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

use crate::error::ApiError;
use crate::services::DownscaleService;

/// Query parameters for the PNG endpoint
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DownscaleQuery {
    /// Target width in pixels (default from config)
    #[serde(default)]
    pub width: Option<i64>,
    /// Target height in pixels (default from config)
    #[serde(default)]
    pub height: Option<i64>,
    /// Palette size per tile (default from config)
    #[serde(default)]
    pub centroids: Option<i64>,
}

/// A normalized RGB image: `height * width * 3` floats in [0, 1], row-major
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct ImagePayload {
    pub width: usize,
    pub height: usize,
    pub data: Vec<f32>,
}

impl TryFrom<ImagePayload> for NormalizedImage {
    type Error = kcentroid_core::DownscaleError;

    fn try_from(payload: ImagePayload) -> Result<Self, Self::Error> {
        NormalizedImage::new(payload.width, payload.height, payload.data)
    }
}

impl From<NormalizedImage> for ImagePayload {
    fn from(image: NormalizedImage) -> Self {
        Self {
            width: image.width(),
            height: image.height(),
            data: image.into_data(),
        }
    }
}

/// Request body for batch downscaling
#[derive(Debug, Deserialize, ToSchema)]
pub struct BatchRequest {
    /// Target width in pixels (default from config)
    #[serde(default)]
    pub width: Option<i64>,
    /// Target height in pixels (default from config)
    #[serde(default)]
    pub height: Option<i64>,
    /// Palette size per tile (default from config)
    #[serde(default)]
    pub centroids: Option<i64>,
    /// Images to downscale, all to the same target size
    pub images: Vec<ImagePayload>,
}

/// Response from batch downscaling
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BatchResponse {
    /// Downscaled images, same order as the request
    pub images: Vec<ImagePayload>,
}

/// Downscale a PNG image
///
/// The request body is a PNG of any color type; the response is an 8-bit RGB
/// PNG of exactly `width x height` pixels.
#[utoipa::path(
    post,
    path = "/api/downscale",
    request_body(content = Vec<u8>, description = "Source PNG", content_type = "image/png"),
    responses(
        (status = 200, description = "Downscaled PNG", content_type = "image/png"),
        (status = 400, description = "Invalid parameters or undecodable image"),
        (status = 413, description = "Image too large"),
        (status = 500, description = "Quantization or encoding failure"),
    ),
    params(DownscaleQuery),
    tag = "Downscale"
)]
pub async fn handle_downscale(
    State(service): State<Arc<DownscaleService>>,
    Query(query): Query<DownscaleQuery>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let params = service.params(query.width, query.height, query.centroids)?;

    tracing::debug!(
        size_bytes = body.len(),
        width = params.width(),
        height = params.height(),
        centroids = params.centroids(),
        "Downscale request"
    );

    let png_bytes = service.downscale_png(body.to_vec(), params).await?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "image/png"),
            (header::CONTENT_LENGTH, &png_bytes.len().to_string()),
        ],
        Bytes::from(png_bytes),
    )
        .into_response())
}

/// Downscale a batch of normalized images
///
/// All images share one target size and palette size. The first failing
/// image fails the whole request.
#[utoipa::path(
    post,
    path = "/api/downscale/batch",
    request_body = BatchRequest,
    responses(
        (status = 200, description = "Downscaled images", body = BatchResponse),
        (status = 400, description = "Invalid parameters or malformed image data"),
        (status = 500, description = "Quantization failure"),
    ),
    tag = "Downscale"
)]
pub async fn handle_downscale_batch(
    State(service): State<Arc<DownscaleService>>,
    JsonExtractor(request): JsonExtractor<BatchRequest>,
) -> Result<Json<BatchResponse>, ApiError> {
    let params = service.params(request.width, request.height, request.centroids)?;

    let images = request
        .images
        .into_iter()
        .map(NormalizedImage::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(count = images.len(), "Batch downscale request");

    let out = service.downscale_batch(images, params).await?;

    Ok(Json(BatchResponse {
        images: out.into_iter().map(ImagePayload::from).collect(),
    }))
}

use std::sync::Arc;

use kcentroid_core::{DownscaleError, DownscaleParams, KCentroid, NormalizedImage};

use crate::error::ApiError;
use crate::imaging::{decode_png, encode_png};
use crate::models::AppConfig;

/// Downscale service configured from [`AppConfig`]
///
/// Cheap to clone; all clones share one configuration.
#[derive(Debug, Clone)]
pub struct DownscaleService {
    config: Arc<AppConfig>,
}

impl DownscaleService {
    pub fn new(config: Arc<AppConfig>) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Validate request parameters, filling gaps with configured defaults
    pub fn params(
        &self,
        width: Option<i64>,
        height: Option<i64>,
        centroids: Option<i64>,
    ) -> Result<DownscaleParams, DownscaleError> {
        self.config.resolve_params(width, height, centroids)
    }

    fn downscaler(&self, params: DownscaleParams) -> KCentroid {
        KCentroid::new(params)
            .quantizer(self.config.kmeans.quantizer())
            .parallel(self.config.parallel)
    }

    /// Decode a PNG, downscale it and encode the result as RGB PNG
    pub fn process_png(&self, bytes: &[u8], params: DownscaleParams) -> Result<Vec<u8>, ApiError> {
        let raster = decode_png(bytes)?;
        let out = self.downscaler(params).downscale_raster(&raster)?;

        tracing::info!(
            source_width = raster.width(),
            source_height = raster.height(),
            width = out.width(),
            height = out.height(),
            centroids = params.centroids(),
            "Downscaled PNG"
        );

        Ok(encode_png(&out)?)
    }

    /// Downscale a batch of normalized images
    pub fn process_batch(
        &self,
        images: &[NormalizedImage],
        params: DownscaleParams,
    ) -> Result<Vec<NormalizedImage>, DownscaleError> {
        let out = self.downscaler(params).downscale_batch(images)?;
        tracing::info!(
            count = images.len(),
            width = params.width(),
            height = params.height(),
            centroids = params.centroids(),
            "Downscaled batch"
        );
        Ok(out)
    }

    /// [`process_png`](Self::process_png) off the async runtime
    ///
    /// Uses spawn_blocking so clustering does not stall request handling.
    pub async fn downscale_png(
        &self,
        bytes: Vec<u8>,
        params: DownscaleParams,
    ) -> Result<Vec<u8>, ApiError> {
        let service = self.clone();
        tokio::task::spawn_blocking(move || service.process_png(&bytes, params))
            .await
            .map_err(|e| ApiError::Internal(format!("Downscale task failed: {e}")))?
    }

    /// [`process_batch`](Self::process_batch) off the async runtime
    pub async fn downscale_batch(
        &self,
        images: Vec<NormalizedImage>,
        params: DownscaleParams,
    ) -> Result<Vec<NormalizedImage>, ApiError> {
        let service = self.clone();
        tokio::task::spawn_blocking(move || service.process_batch(&images, params))
            .await
            .map_err(|e| ApiError::Internal(format!("Downscale task failed: {e}")))?
            .map_err(ApiError::from)
    }
}

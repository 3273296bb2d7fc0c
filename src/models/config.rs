use kcentroid_core::{
    DownscaleError, DownscaleParams, KmeansQuantizer, DEFAULT_CENTROIDS, DEFAULT_MAX_RESOLUTION,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Application configuration loaded from config.yaml
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct AppConfig {
    /// Upper bound for target width and height
    #[serde(default = "default_max_resolution")]
    pub max_resolution: u32,

    /// Target width used when a request omits it
    #[serde(default = "default_size")]
    pub default_width: u32,

    /// Target height used when a request omits it
    #[serde(default = "default_size")]
    pub default_height: u32,

    /// Palette size per tile when a request omits it
    #[serde(default = "default_centroids")]
    pub default_centroids: u32,

    /// Spread images and tiles over all cores
    #[serde(default = "default_parallel")]
    pub parallel: bool,

    /// Maximum accepted request body size in bytes
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,

    /// Clustering settings
    #[serde(default)]
    pub kmeans: KmeansConfig,
}

fn default_max_resolution() -> u32 {
    DEFAULT_MAX_RESOLUTION
}

fn default_size() -> u32 {
    64
}

fn default_centroids() -> u32 {
    DEFAULT_CENTROIDS as u32
}

fn default_parallel() -> bool {
    true
}

fn default_max_upload_bytes() -> usize {
    16 * 1024 * 1024 // 16 MiB
}

/// k-means settings for tile quantization
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq)]
pub struct KmeansConfig {
    /// Iteration cap per run
    #[serde(default = "default_max_iter")]
    pub max_iter: usize,

    /// Convergence threshold on centroid movement
    #[serde(default = "default_converge")]
    pub converge: f32,

    /// Restarts per tile; the best-scoring run is kept
    #[serde(default = "default_runs")]
    pub runs: u32,

    /// Base seed, fixed so output is reproducible
    #[serde(default)]
    pub seed: u64,
}

fn default_max_iter() -> usize {
    20
}

fn default_converge() -> f32 {
    0.0025
}

fn default_runs() -> u32 {
    1
}

impl Default for KmeansConfig {
    fn default() -> Self {
        Self {
            max_iter: default_max_iter(),
            converge: default_converge(),
            runs: default_runs(),
            seed: 0,
        }
    }
}

impl KmeansConfig {
    /// Build the quantizer these settings describe
    pub fn quantizer(&self) -> KmeansQuantizer {
        KmeansQuantizer::new()
            .max_iter(self.max_iter)
            .converge(self.converge)
            .runs(self.runs)
            .seed(self.seed)
    }
}

impl AppConfig {
    /// Load configuration from a YAML file, falling back to defaults
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            tracing::debug!("No config file configured, using defaults");
            return Self::default();
        };

        match std::fs::read_to_string(path) {
            Ok(content) => match Self::from_yaml(&content) {
                Ok(config) => {
                    tracing::info!(
                        path = %path.display(),
                        max_resolution = config.max_resolution,
                        parallel = config.parallel,
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, path = %path.display(), "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, path = %path.display(), "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    /// Load from the file named by the CONFIG_FILE environment variable
    pub fn from_env() -> Self {
        let path = std::env::var("CONFIG_FILE").ok().map(std::path::PathBuf::from);
        Self::load(path.as_deref())
    }

    /// Parse configuration from a YAML string
    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    /// Resolve request parameters, filling gaps with configured defaults
    pub fn resolve_params(
        &self,
        width: Option<i64>,
        height: Option<i64>,
        centroids: Option<i64>,
    ) -> Result<DownscaleParams, DownscaleError> {
        DownscaleParams::validate(
            width.unwrap_or(i64::from(self.default_width)),
            height.unwrap_or(i64::from(self.default_height)),
            centroids.unwrap_or(i64::from(self.default_centroids)),
            self.max_resolution,
        )
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            max_resolution: default_max_resolution(),
            default_width: default_size(),
            default_height: default_size(),
            default_centroids: default_centroids(),
            parallel: default_parallel(),
            max_upload_bytes: default_max_upload_bytes(),
            kmeans: KmeansConfig::default(),
        }
    }
}

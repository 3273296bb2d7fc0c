//! Node descriptors: how the downscale operation is presented to a host.
//!
//! A descriptor declares the operation's inputs, their types and ranges,
//! its outputs and a category label. Hosts (node-graph UIs, CLIs) use it to
//! solicit parameters; nothing here takes part in the algorithm.

use kcentroid_core::MAX_CENTROIDS;
use serde::Serialize;
use utoipa::ToSchema;

use super::AppConfig;

/// Registered name of the k-centroid node.
pub const KCENTROID_NODE: &str = "ImageKCentroidDownscale";

/// Value type of a node input or output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValueType {
    Image,
    Int,
}

/// Inclusive integer range with a step and default
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct IntRange {
    pub default: i64,
    pub min: i64,
    pub max: i64,
    pub step: i64,
}

/// One declared input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct NodeInput {
    pub name: String,
    #[serde(rename = "type")]
    pub value_type: ValueType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<IntRange>,
}

impl NodeInput {
    fn image(name: &str) -> Self {
        Self {
            name: name.to_string(),
            value_type: ValueType::Image,
            range: None,
        }
    }

    fn int(name: &str, default: i64, min: i64, max: i64) -> Self {
        Self {
            name: name.to_string(),
            value_type: ValueType::Int,
            range: Some(IntRange {
                default,
                min,
                max,
                step: 1,
            }),
        }
    }
}

/// Declared capabilities of an operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct NodeDescriptor {
    /// Stable identifier used for registration
    pub name: String,
    /// Label shown to users
    pub display_name: String,
    /// Menu category, slash-separated
    pub category: String,
    /// Entry point invoked by the host
    pub function: String,
    /// Inputs the host must provide
    pub required: Vec<NodeInput>,
    /// Inputs with usable defaults
    pub optional: Vec<NodeInput>,
    /// Output types, in order
    pub returns: Vec<ValueType>,
}

impl NodeDescriptor {
    /// Descriptor for the k-centroid downscale node under `config`
    pub fn k_centroid(config: &AppConfig) -> Self {
        let max = i64::from(config.max_resolution);
        Self {
            name: KCENTROID_NODE.to_string(),
            display_name: "K-Centroid Downscale".to_string(),
            category: "image/downscaling".to_string(),
            function: "downscale".to_string(),
            required: vec![
                NodeInput::image("image"),
                NodeInput::int("width", i64::from(config.default_width).min(max), 1, max),
                NodeInput::int("height", i64::from(config.default_height).min(max), 1, max),
            ],
            optional: vec![NodeInput::int(
                "centroids",
                i64::from(config.default_centroids),
                1,
                MAX_CENTROIDS as i64,
            )],
            returns: vec![ValueType::Image],
        }
    }
}

/// All operations this service exposes
pub fn registry(config: &AppConfig) -> Vec<NodeDescriptor> {
    vec![NodeDescriptor::k_centroid(config)]
}

pub mod config;
pub mod node;

pub use config::{AppConfig, KmeansConfig};
pub use node::{registry, IntRange, NodeDescriptor, NodeInput, ValueType, KCENTROID_NODE};

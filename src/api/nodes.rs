use axum::{extract::State, response::Json};
use std::sync::Arc;

use crate::models::{registry, NodeDescriptor};
use crate::services::DownscaleService;

/// List node descriptors
///
/// Hosts use these to discover the operation's inputs and their ranges.
#[utoipa::path(
    get,
    path = "/api/nodes",
    responses(
        (status = 200, description = "Registered nodes", body = Vec<NodeDescriptor>),
    ),
    tag = "Nodes"
)]
pub async fn handle_nodes(State(service): State<Arc<DownscaleService>>) -> Json<Vec<NodeDescriptor>> {
    Json(registry(service.config()))
}

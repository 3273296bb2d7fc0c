pub mod downscale;
pub mod nodes;

pub use downscale::{__path_handle_downscale, __path_handle_downscale_batch};
pub use downscale::{
    handle_downscale, handle_downscale_batch, BatchRequest, BatchResponse, DownscaleQuery,
    ImagePayload,
};
pub use nodes::{handle_nodes, __path_handle_nodes};

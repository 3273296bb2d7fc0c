pub mod downscaler;

pub use downscaler::DownscaleService;

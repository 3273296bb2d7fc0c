//! File-based batch downscaling for the `downscale` subcommand.

use std::path::{Path, PathBuf};

use kcentroid_core::{DownscaleError, DownscaleParams, NormalizedImage};

use crate::error::{ApiError, ImageError};
use crate::imaging::{decode_png, encode_png};
use crate::services::DownscaleService;

/// Suffix appended to the input stem when no output path is given
pub const OUTPUT_SUFFIX: &str = "_kcentroid";

/// Where downscaled files are written
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// `<stem>_kcentroid.png` next to each input
    BesideInput,
    /// Exactly this file (single input only)
    File(PathBuf),
    /// `<stem>_kcentroid.png` inside this directory
    Directory(PathBuf),
}

impl OutputTarget {
    pub fn from_args(output: Option<PathBuf>, out_dir: Option<PathBuf>) -> Self {
        match (output, out_dir) {
            (Some(file), _) => OutputTarget::File(file),
            (None, Some(dir)) => OutputTarget::Directory(dir),
            (None, None) => OutputTarget::BesideInput,
        }
    }

    /// Output path for `input`
    pub fn path_for(&self, input: &Path) -> PathBuf {
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());
        let name = format!("{stem}{OUTPUT_SUFFIX}.png");

        match self {
            OutputTarget::File(file) => file.clone(),
            OutputTarget::Directory(dir) => dir.join(name),
            OutputTarget::BesideInput => input.with_file_name(name),
        }
    }
}

/// Downscale `inputs` as one batch and write a PNG per input
///
/// Returns the written paths in input order. Nothing is written unless every
/// input decodes and downscales.
pub fn downscale_files(
    service: &DownscaleService,
    inputs: &[PathBuf],
    params: DownscaleParams,
    target: &OutputTarget,
) -> Result<Vec<PathBuf>, ApiError> {
    if inputs.len() > 1 && matches!(target, OutputTarget::File(_)) {
        return Err(DownscaleError::InvalidParameter {
            name: "output",
            reason: format!("takes a single input, got {}; use --out-dir", inputs.len()),
        }
        .into());
    }

    let images = inputs
        .iter()
        .map(|path| {
            let bytes = std::fs::read(path).map_err(ImageError::from)?;
            let raster = decode_png(&bytes)?;
            tracing::debug!(
                path = %path.display(),
                width = raster.width(),
                height = raster.height(),
                "Read input"
            );
            Ok::<_, ApiError>(NormalizedImage::from(&raster))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let out = service.process_batch(&images, params)?;

    if let OutputTarget::Directory(dir) = target {
        std::fs::create_dir_all(dir).map_err(ImageError::from)?;
    }

    let mut written = Vec::with_capacity(out.len());
    for (input, image) in inputs.iter().zip(&out) {
        let path = target.path_for(input);
        let png = encode_png(&image.to_raw())?;
        std::fs::write(&path, png).map_err(ImageError::from)?;
        written.push(path);
    }

    Ok(written)
}

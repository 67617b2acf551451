//! Loading depth frames from disk.
//!
//! Two formats are understood: single-channel 16-bit PNG (the usual output
//! of depth camera recorders) and headerless little-endian `u16` dumps whose
//! dimensions are supplied by the caller.

use std::path::{Path, PathBuf};

use coav_core::{DepthFrame, FrameError};
use image::{DynamicImage, ImageReader};
use log::debug;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::config::CameraConfig;

#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Image(#[from] image::ImageError),

    #[error("depth image must be 16-bit single channel, got {0:?}")]
    UnsupportedColor(image::ColorType),

    #[error("raw depth data has {got} bytes, expected {expected}")]
    InvalidRawSize { expected: usize, got: usize },

    #[error("raw frame size {width}x{height} is too large")]
    RawTooLarge { width: usize, height: usize },

    #[error(transparent)]
    Frame(#[from] FrameError),
}

/// Load a 16-bit grayscale PNG (or any format `image` decodes to `Luma16`).
#[cfg_attr(feature = "tracing", instrument(level = "info", skip_all))]
pub fn load_depth_png(
    path: impl AsRef<Path>,
    camera: &CameraConfig,
) -> Result<DepthFrame, LoadError> {
    let path = path.as_ref();
    let reader = ImageReader::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let img = match reader.decode()? {
        DynamicImage::ImageLuma16(buf) => buf,
        other => return Err(LoadError::UnsupportedColor(other.color())),
    };

    let (width, height) = (img.width() as usize, img.height() as usize);
    debug!("loaded {}: {width}x{height}", path.display());
    Ok(camera.frame(width, height, img.into_raw())?)
}

/// Decode `width * height` little-endian `u16` samples.
pub fn depth_from_le_bytes(
    width: usize,
    height: usize,
    bytes: &[u8],
) -> Result<Vec<u16>, LoadError> {
    let expected = width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(2))
        .ok_or(LoadError::RawTooLarge { width, height })?;
    if bytes.len() != expected {
        return Err(LoadError::InvalidRawSize {
            expected,
            got: bytes.len(),
        });
    }
    Ok(bytes
        .chunks_exact(2)
        .map(|b| u16::from_le_bytes([b[0], b[1]]))
        .collect())
}

/// Load a headerless little-endian `u16` dump of a `width x height` frame.
#[cfg_attr(feature = "tracing", instrument(level = "info", skip_all))]
pub fn load_depth_raw(
    path: impl AsRef<Path>,
    width: usize,
    height: usize,
    camera: &CameraConfig,
) -> Result<DepthFrame, LoadError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let data = depth_from_le_bytes(width, height, &bytes)?;
    Ok(camera.frame(width, height, data)?)
}

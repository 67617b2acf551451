use serde::{Deserialize, Serialize};

/// Raw sample value a depth sensor reports when it has no return for a pixel.
pub const INVALID_DEPTH: u16 = 0;

/// Errors produced when building a [`DepthFrame`] from raw parts.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum FrameError {
    #[error("invalid depth buffer length (expected {expected} samples, got {got})")]
    BufferSizeMismatch { expected: usize, got: usize },

    #[error("invalid depth frame dimensions (width={width}, height={height})")]
    InvalidDimensions { width: usize, height: usize },

    #[error("invalid field of view (hfov={hfov}, vfov={vfov}); expected finite positive radians")]
    InvalidFov { hfov: f64, vfov: f64 },

    #[error("invalid depth scale {0}; expected a finite positive multiplier")]
    InvalidScale(f64),
}

/// Borrowed row-major view over raw depth samples.
#[derive(Clone, Copy, Debug)]
pub struct DepthImageView<'a> {
    pub width: usize,
    pub height: usize,
    pub data: &'a [u16], // row-major, len = w*h
}

impl<'a> DepthImageView<'a> {
    /// Raw sample at `(x, y)`, `None` outside the image.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<u16> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get(y * self.width + x).copied()
    }

    /// One image row; empty if `y` is out of range.
    #[inline]
    pub fn row(&self, y: usize) -> &'a [u16] {
        if y >= self.height {
            return &[];
        }
        let start = y * self.width;
        self.data.get(start..start + self.width).unwrap_or(&[])
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// One frame of a depth sensor.
///
/// `depth_buffer` holds raw sensor units in row-major order; multiply by
/// `scale` to get a physical distance. An empty buffer is a valid "no data"
/// frame. Field of view angles are in radians.
///
/// Deserialization goes through [`DepthFrame::new`], so a decoded frame
/// always satisfies its checks.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawDepthFrame")]
pub struct DepthFrame {
    pub depth_buffer: Vec<u16>,
    pub width: usize,
    pub height: usize,
    pub hfov: f64,
    pub vfov: f64,
    pub scale: f64,
}

/// Unchecked wire form of [`DepthFrame`].
#[derive(Deserialize)]
struct RawDepthFrame {
    #[serde(default)]
    depth_buffer: Vec<u16>,
    width: usize,
    height: usize,
    hfov: f64,
    vfov: f64,
    scale: f64,
}

impl TryFrom<RawDepthFrame> for DepthFrame {
    type Error = FrameError;

    fn try_from(r: RawDepthFrame) -> Result<Self, FrameError> {
        DepthFrame::new(r.depth_buffer, r.width, r.height, r.hfov, r.vfov, r.scale)
    }
}

impl DepthFrame {
    /// Build a frame, checking the buffer against the dimensions.
    ///
    /// An empty `depth_buffer` is accepted for any dimensions.
    pub fn new(
        depth_buffer: Vec<u16>,
        width: usize,
        height: usize,
        hfov: f64,
        vfov: f64,
        scale: f64,
    ) -> Result<Self, FrameError> {
        if !(hfov.is_finite() && vfov.is_finite() && hfov > 0.0 && vfov > 0.0) {
            return Err(FrameError::InvalidFov { hfov, vfov });
        }
        if !(scale.is_finite() && scale > 0.0) {
            return Err(FrameError::InvalidScale(scale));
        }
        if !depth_buffer.is_empty() {
            let Some(expected) = width.checked_mul(height) else {
                return Err(FrameError::InvalidDimensions { width, height });
            };
            if depth_buffer.len() != expected {
                return Err(FrameError::BufferSizeMismatch {
                    expected,
                    got: depth_buffer.len(),
                });
            }
        }
        Ok(Self {
            depth_buffer,
            width,
            height,
            hfov,
            vfov,
            scale,
        })
    }

    /// A frame that carries sensor properties but no samples.
    pub fn empty(width: usize, height: usize, hfov: f64, vfov: f64, scale: f64) -> Self {
        Self {
            depth_buffer: Vec::new(),
            width,
            height,
            hfov,
            vfov,
            scale,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.depth_buffer.is_empty()
    }

    pub fn view(&self) -> DepthImageView<'_> {
        DepthImageView {
            width: self.width,
            height: self.height,
            data: &self.depth_buffer,
        }
    }

    /// Largest distance the sensor can encode, in physical units.
    #[inline]
    pub fn max_range(&self) -> f64 {
        f64::from(u16::MAX) * self.scale
    }

    /// Physical distance of a raw sample. [`INVALID_DEPTH`] reads as
    /// [`max_range`](Self::max_range).
    #[inline]
    pub fn scaled(&self, raw: u16) -> f64 {
        let raw = if raw == INVALID_DEPTH { u16::MAX } else { raw };
        f64::from(raw) * self.scale
    }
}

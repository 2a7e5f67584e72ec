//! Binary silhouette masks.

use serde::{Deserialize, Serialize};

use crate::error::{CarveError, CarveResult};

/// Row-major binary image: zero is background, non-zero is inside the
/// object's silhouette.
///
/// # Example
///
/// ```rust
/// use space_carving::SilhouetteMask;
///
/// let mask = SilhouetteMask::from_fn(4, 3, |col, row| col == row);
/// assert!(mask.is_inside(1, 1));
/// assert!(!mask.is_inside(2, 1));
/// assert!(!mask.is_inside(4, 0)); // outside the image
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "MaskParts")]
pub struct SilhouetteMask {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

/// Unchecked serialized form of [`SilhouetteMask`].
#[derive(Deserialize)]
struct MaskParts {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl TryFrom<MaskParts> for SilhouetteMask {
    type Error = CarveError;

    fn try_from(parts: MaskParts) -> CarveResult<Self> {
        Self::new(parts.width, parts.height, parts.pixels)
    }
}

impl SilhouetteMask {
    /// Wraps a row-major pixel buffer of `width * height` values.
    pub fn new(width: usize, height: usize, pixels: Vec<u8>) -> CarveResult<Self> {
        let expected = width.checked_mul(height).ok_or_else(|| {
            CarveError::dimension_mismatch(format!(
                "mask of {}x{} has too many pixels",
                width, height
            ))
        })?;
        if pixels.len() != expected {
            return Err(CarveError::dimension_mismatch(format!(
                "mask of {}x{} needs {} pixels, got {}",
                width,
                height,
                expected,
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Builds a mask from rows of equal length.
    pub fn from_rows(rows: &[Vec<u8>]) -> CarveResult<Self> {
        let width = rows.first().map_or(0, Vec::len);
        if let Some((row, bad)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
            return Err(CarveError::dimension_mismatch(format!(
                "mask row {} has {} pixels, expected {}",
                row,
                bad.len(),
                width
            )));
        }
        Self::new(width, rows.len(), rows.concat())
    }

    /// Mask with every pixel inside (`true`) or outside (`false`).
    pub fn filled(width: usize, height: usize, inside: bool) -> Self {
        Self::from_fn(width, height, |_, _| inside)
    }

    /// Mask whose pixel `(col, row)` is inside when `f(col, row)` holds.
    pub fn from_fn(width: usize, height: usize, f: impl Fn(usize, usize) -> bool) -> Self {
        let pixels = (0..height)
            .flat_map(|row| (0..width).map(move |col| (col, row)))
            .map(|(col, row)| u8::from(f(col, row)))
            .collect();
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Image width in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height in pixels.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns true if `(col, row)` lies inside the image and the pixel is
    /// non-zero.
    #[inline]
    pub fn is_inside(&self, col: usize, row: usize) -> bool {
        col < self.width && row < self.height && self.pixels[row * self.width + col] != 0
    }

    /// Number of foreground pixels.
    pub fn foreground_count(&self) -> usize {
        self.pixels.iter().filter(|&&p| p != 0).count()
    }
}

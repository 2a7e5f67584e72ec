//! Carving volume parameters.

use config::constants::{snapped_ratio, DEFAULT_CELL_SIZE, DEFAULT_EXTENT, DEFAULT_ORIGIN};
use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::error::{CarveError, CarveResult};

/// Bounding volume and resolution of a carve.
///
/// The volume is centered on `origin` and spans `extent` along each axis;
/// candidate points sit at the centers of `cell_size` cubes.
///
/// # Example
///
/// ```rust
/// use space_carving::CarveConfig;
/// use glam::DVec3;
///
/// let config = CarveConfig::new(0.5, DVec3::ZERO, DVec3::splat(4.0));
/// assert!(config.validate().is_ok());
/// assert_eq!(config.dense_counts(), [8, 8, 8]);
/// assert_eq!(config.volume_dims(), [9, 9, 9]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CarveConfig {
    /// Edge length of one voxel
    pub cell_size: f64,
    /// Center of the carving volume
    pub origin: DVec3,
    /// Length of the volume along x, y and z
    pub extent: DVec3,
}

impl Default for CarveConfig {
    fn default() -> Self {
        Self {
            cell_size: DEFAULT_CELL_SIZE,
            origin: DVec3::from_array(DEFAULT_ORIGIN),
            extent: DVec3::splat(DEFAULT_EXTENT),
        }
    }
}

impl CarveConfig {
    /// Creates a configuration.
    pub fn new(cell_size: f64, origin: DVec3, extent: DVec3) -> Self {
        Self {
            cell_size,
            origin,
            extent,
        }
    }

    /// Checks that cell size and extents are positive and everything is
    /// finite, and that the occupancy grid and dense point set fit in memory
    /// addressing.
    pub fn validate(&self) -> CarveResult<()> {
        if !(self.cell_size.is_finite() && self.cell_size > 0.0) {
            return Err(CarveError::configuration(format!(
                "cell size must be positive and finite, got {}",
                self.cell_size
            )));
        }
        if !self.origin.is_finite() {
            return Err(CarveError::configuration(format!(
                "origin must be finite, got {:?}",
                self.origin
            )));
        }
        if !(self.extent.is_finite() && self.extent.min_element() > 0.0) {
            return Err(CarveError::configuration(format!(
                "extents must be positive and finite, got {:?}",
                self.extent
            )));
        }

        let ratios = self.extent.to_array().map(|e| snapped_ratio(e, self.cell_size));
        if ratios.iter().any(|r| !(r.is_finite() && *r < usize::MAX as f64)) {
            return Err(CarveError::configuration(format!(
                "cell size {} is too small for extents {:?}",
                self.cell_size, self.extent
            )));
        }
        // Volume dims bound the dense counts on every axis.
        let fits = self
            .volume_dims()
            .iter()
            .try_fold(1usize, |acc, &n| acc.checked_mul(n))
            .and_then(|cells| cells.checked_mul(std::mem::size_of::<DVec3>()))
            .is_some_and(|bytes| bytes <= isize::MAX as usize);
        if !fits {
            return Err(CarveError::configuration(format!(
                "cell size {} gives too many cells for extents {:?}",
                self.cell_size, self.extent
            )));
        }
        Ok(())
    }

    /// Center of the lowest cell: `origin - extent / 2 + cell_size / 2`.
    pub fn min_corner(&self) -> DVec3 {
        self.origin - self.extent / 2.0 + DVec3::splat(self.cell_size / 2.0)
    }

    /// Number of dense candidate points per axis: `ceil(extent / cell_size)`.
    pub fn dense_counts(&self) -> [usize; 3] {
        self.extent
            .to_array()
            .map(|e| snapped_ratio(e, self.cell_size).ceil() as usize)
    }

    /// Occupancy grid size per axis: `floor(extent / cell_size) + 1`.
    pub fn volume_dims(&self) -> [usize; 3] {
        self.extent
            .to_array()
            .map(|e| snapped_ratio(e, self.cell_size).floor() as usize + 1)
    }
}

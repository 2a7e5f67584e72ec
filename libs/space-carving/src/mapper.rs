//! # Coordinate Mapper
//!
//! Converts between world coordinates and occupancy grid indices.
//!
//! Grid index `[0, 0, 0]` is the center of the lowest cell of the carving
//! volume, `origin - extent / 2 + cell_size / 2`, and consecutive indices are
//! `cell_size` apart.

use glam::{DVec3, I64Vec3};

use crate::params::CarveConfig;

/// Affine map between world space and grid-index space.
///
/// # Example
///
/// ```rust
/// use space_carving::{CarveConfig, CoordinateMapper};
/// use glam::{DVec3, I64Vec3};
///
/// let mapper = CoordinateMapper::new(&CarveConfig::default());
/// assert_eq!(mapper.index_to_world(I64Vec3::ZERO), DVec3::splat(-4.5));
/// assert_eq!(mapper.world_to_index(DVec3::new(-4.4, 0.6, 4.5)), I64Vec3::new(0, 5, 9));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    min_corner: DVec3,
    cell_size: f64,
}

impl CoordinateMapper {
    /// Creates the mapper for a carving configuration.
    pub fn new(config: &CarveConfig) -> Self {
        Self {
            min_corner: config.min_corner(),
            cell_size: config.cell_size,
        }
    }

    /// World position of grid index `[0, 0, 0]`.
    #[inline]
    pub fn min_corner(&self) -> DVec3 {
        self.min_corner
    }

    /// Edge length of one cell.
    #[inline]
    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Nearest grid index of a world point: `round((p - min_corner) / cell_size)`.
    ///
    /// Ties round to the even index.
    pub fn world_to_index(&self, point: DVec3) -> I64Vec3 {
        let scaled = (point - self.min_corner) / self.cell_size;
        I64Vec3::new(
            scaled.x.round_ties_even() as i64,
            scaled.y.round_ties_even() as i64,
            scaled.z.round_ties_even() as i64,
        )
    }

    /// World position of a grid index: `index * cell_size + min_corner`.
    pub fn index_to_world(&self, index: I64Vec3) -> DVec3 {
        self.grid_to_world(index.as_dvec3())
    }

    /// World position of a fractional grid-index coordinate.
    ///
    /// Used for iso-surface vertices, which lie between grid samples.
    pub fn grid_to_world(&self, grid: DVec3) -> DVec3 {
        grid * self.cell_size + self.min_corner
    }
}

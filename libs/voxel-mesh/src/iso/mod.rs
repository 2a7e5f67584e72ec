//! # Iso-Surface Extraction
//!
//! Turns a sampled scalar field into a triangle surface at a chosen level.
//!
//! ## Conventions
//!
//! - Vertices are returned in grid-index space: sample `[x, y, z]` sits at
//!   `DVec3::new(x, y, z)`.
//! - Triangles are wound so that their right-hand normal points toward
//!   higher field values.
//! - Per-vertex normals point toward lower field values.

mod tetrahedra;

#[cfg(test)]
mod tests;

pub use tetrahedra::MarchingTetrahedra;

use glam::DVec3;

use crate::error::MeshError;
use crate::grid::Grid3;

/// Raw output of an iso-surface extraction, in grid-index space.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IsoSurface {
    /// Vertex positions in index coordinates
    pub vertices: Vec<DVec3>,
    /// Triangle vertex indices
    pub triangles: Vec<[u32; 3]>,
    /// Unit normals, one per vertex
    pub normals: Vec<DVec3>,
}

impl IsoSurface {
    /// Returns true if no triangle was produced.
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }
}

/// Extracts a triangle surface from a scalar volume.
///
/// # Example
///
/// ```rust
/// use voxel_mesh::{Grid3, IsoSurfaceExtractor, MarchingTetrahedra};
///
/// let mut field = Grid3::filled([3, 3, 3], -1.0).unwrap();
/// field.set([1, 1, 1], 1.0);
///
/// let surface = MarchingTetrahedra.extract(&field, 0.0).unwrap();
/// assert!(!surface.is_empty());
/// assert_eq!(surface.vertices.len(), surface.normals.len());
/// ```
pub trait IsoSurfaceExtractor {
    /// Extracts the surface where the field crosses `iso`.
    fn extract(&self, volume: &Grid3<f64>, iso: f64) -> Result<IsoSurface, MeshError>;
}

//! # Voxel Mesh
//!
//! Mesh container and iso-surface extraction for voxel volumes.
//!
//! ## Architecture
//!
//! ```text
//! Grid3<f64> (scalar field) → IsoSurfaceExtractor → IsoSurface → Mesh
//! ```
//!
//! ## Algorithms
//!
//! - **Iso-surface**: Marching tetrahedra (six tetrahedra per cell, shared
//!   edge vertices, gradient normals)
//!
//! ## Usage
//!
//! ```rust
//! use voxel_mesh::{Grid3, IsoSurfaceExtractor, MarchingTetrahedra, Mesh};
//!
//! let mut field = Grid3::filled([3, 3, 3], -1.0).unwrap();
//! field.set([1, 1, 1], 1.0);
//!
//! let surface = MarchingTetrahedra.extract(&field, 0.0).unwrap();
//! let mesh = Mesh::from_parts(surface.vertices, surface.triangles, Some(surface.normals)).unwrap();
//! assert!(mesh.validate());
//! ```

pub mod error;
pub mod grid;
pub mod iso;
pub mod mesh;

pub use error::MeshError;
pub use grid::Grid3;
pub use iso::{IsoSurface, IsoSurfaceExtractor, MarchingTetrahedra};
pub use mesh::Mesh;

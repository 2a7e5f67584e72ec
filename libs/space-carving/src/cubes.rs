//! # Cube Mesh Builder
//!
//! Blocky rendition of a point set: one axis-aligned cube per point.

use glam::DVec3;
use tracing::debug;
use voxel_mesh::{Mesh, MeshError};

use crate::error::{CarveError, CarveResult};
use crate::points::PointSet;

/// Corner offsets in units of half a cell.
const CORNER_SIGNS: [DVec3; 8] = [
    DVec3::new(1.0, 1.0, 1.0),
    DVec3::new(1.0, -1.0, 1.0),
    DVec3::new(-1.0, -1.0, 1.0),
    DVec3::new(-1.0, 1.0, 1.0),
    DVec3::new(1.0, 1.0, -1.0),
    DVec3::new(1.0, -1.0, -1.0),
    DVec3::new(-1.0, -1.0, -1.0),
    DVec3::new(-1.0, 1.0, -1.0),
];

/// Two triangles per face, indexing [`CORNER_SIGNS`].
const CUBE_TRIANGLES: [[u32; 3]; 12] = [
    [0, 1, 2],
    [0, 3, 2],
    [3, 2, 6],
    [3, 7, 6],
    [7, 6, 5],
    [7, 4, 5],
    [4, 5, 1],
    [4, 0, 1],
    [4, 0, 3],
    [4, 7, 3],
    [5, 1, 2],
    [5, 6, 2],
];

/// Builds a mesh with one cube of edge `cell_size` centered on each point.
///
/// Cube `i` owns vertices `8 * i .. 8 * i + 8` and triangles
/// `12 * i .. 12 * i + 12`. Vertices are not shared between cubes and the
/// result is not checked for degeneracy.
///
/// # Example
///
/// ```rust
/// use space_carving::{cube_mesh, PointSet};
/// use glam::DVec3;
///
/// let points = PointSet::from(vec![DVec3::ZERO, DVec3::X]);
/// let mesh = cube_mesh(&points, 0.5).unwrap();
/// assert_eq!(mesh.vertex_count(), 16);
/// assert_eq!(mesh.triangle_count(), 24);
/// ```
pub fn cube_mesh(points: &PointSet, cell_size: f64) -> CarveResult<Mesh> {
    if !(cell_size.is_finite() && cell_size > 0.0) {
        return Err(CarveError::configuration(format!(
            "cell size must be positive and finite, got {}",
            cell_size
        )));
    }
    if points.is_empty() {
        return Err(CarveError::empty("no points to build cubes from"));
    }

    // Fails before allocating when the last cube's corners are not indexable.
    cube_base(points.len() - 1)?;

    let half = cell_size / 2.0;
    let mut mesh = Mesh::with_capacity(points.len() * 8, points.len() * 12);
    for (i, &center) in points.iter().enumerate() {
        let base = cube_base(i)?;
        for sign in CORNER_SIGNS {
            mesh.add_vertex(center + sign * half);
        }
        for [a, b, c] in CUBE_TRIANGLES {
            mesh.add_triangle(base + a, base + b, base + c);
        }
    }

    debug!(
        cubes = points.len(),
        vertices = mesh.vertex_count(),
        "built cube mesh"
    );
    Ok(mesh)
}

/// Index of the first corner of cube `i`, if all 8 corners fit in `u32`.
fn cube_base(i: usize) -> CarveResult<u32> {
    i.checked_mul(8)
        .and_then(|base| base.checked_add(7))
        .and_then(|last| u32::try_from(last).ok())
        .map(|last| last - 7)
        .ok_or_else(|| {
            MeshError::invalid_topology(format!(
                "cube {} has vertex indices beyond u32::MAX",
                i
            ))
            .into()
        })
}

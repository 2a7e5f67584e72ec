//! # Surface Mesh Builder
//!
//! Smooth surface of an occupancy grid via iso-surface extraction.

use tracing::debug;
use voxel_mesh::{IsoSurfaceExtractor, Mesh};

use crate::error::{CarveError, CarveResult};
use crate::mapper::CoordinateMapper;
use crate::volume::OccupancyGrid;

/// Extracts the boundary between occupied and empty cells as a mesh in
/// world coordinates.
///
/// The iso-level is the midpoint of the grid's tags. Extracted faces point
/// toward the occupied side, so their winding is reversed to face outward;
/// vertex normals are kept as extracted.
///
/// # Example
///
/// ```rust
/// use space_carving::{surface_mesh, BoundaryPolicy, CarveConfig, CoordinateMapper, OccupancyGrid, OccupancyTags, PointSet};
/// use voxel_mesh::MarchingTetrahedra;
/// use glam::DVec3;
///
/// let config = CarveConfig::default();
/// let points = PointSet::from(vec![DVec3::ZERO]);
/// let grid = OccupancyGrid::from_points(&points, &config, OccupancyTags::default(), BoundaryPolicy::Reject).unwrap();
///
/// let mesh = surface_mesh(&grid, &CoordinateMapper::new(&config), &MarchingTetrahedra).unwrap();
/// assert!(mesh.triangle_count() > 0);
/// assert!(mesh.normals().is_some());
/// ```
pub fn surface_mesh<E: IsoSurfaceExtractor + ?Sized>(
    grid: &OccupancyGrid,
    mapper: &CoordinateMapper,
    extractor: &E,
) -> CarveResult<Mesh> {
    if grid.occupied_count() == 0 {
        return Err(CarveError::empty("occupancy grid has no occupied cells"));
    }

    let surface = extractor.extract(&grid.to_scalar_field(), grid.tags().iso_level())?;
    if surface.is_empty() {
        return Err(CarveError::empty("iso-surface extraction produced no triangles"));
    }

    let vertices = surface
        .vertices
        .into_iter()
        .map(|v| mapper.grid_to_world(v))
        .collect();
    let mut mesh = Mesh::from_parts(vertices, surface.triangles, Some(surface.normals))?;
    mesh.reverse_winding();

    debug!(
        vertices = mesh.vertex_count(),
        triangles = mesh.triangle_count(),
        "built surface mesh"
    );
    Ok(mesh)
}

//! Marching tetrahedra over a regular grid.
//!
//! Every grid cell is split into six tetrahedra around its main diagonal
//! (corner 0 to corner 6). All cells use the same split, so neighboring
//! cells agree on the diagonal of their shared face and the surface is
//! closed wherever the field is sampled.

use std::collections::HashMap;

use config::constants::approx_zero;
use glam::DVec3;
use tracing::debug;

use super::{IsoSurface, IsoSurfaceExtractor};
use crate::error::MeshError;
use crate::grid::Grid3;

/// Corner offsets of a grid cell.
///
/// ```text
///       7-------6
///      /|      /|
///     4-------5 |
///     | 3-----|-2
///     |/      |/
///     0-------1
/// ```
const CELL_CORNERS: [[usize; 3]; 8] = [
    [0, 0, 0],
    [1, 0, 0],
    [1, 1, 0],
    [0, 1, 0],
    [0, 0, 1],
    [1, 0, 1],
    [1, 1, 1],
    [0, 1, 1],
];

/// Six tetrahedra sharing the 0-6 diagonal.
const CELL_TETRAHEDRA: [[usize; 4]; 6] = [
    [0, 5, 1, 6],
    [0, 1, 2, 6],
    [0, 2, 3, 6],
    [0, 3, 7, 6],
    [0, 7, 4, 6],
    [0, 4, 5, 6],
];

/// Default [`IsoSurfaceExtractor`].
///
/// Crossing vertices are placed by linear interpolation along tetrahedron
/// edges and shared between all triangles touching the same grid edge.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarchingTetrahedra;

impl IsoSurfaceExtractor for MarchingTetrahedra {
    fn extract(&self, volume: &Grid3<f64>, iso: f64) -> Result<IsoSurface, MeshError> {
        let dims = volume.dims();
        if dims.iter().any(|&n| n < 2) {
            return Err(MeshError::invalid_volume(
                dims,
                "at least two samples per axis are required",
            ));
        }
        if !iso.is_finite() {
            return Err(MeshError::degenerate(format!("iso level {} is not finite", iso)));
        }

        let mut builder = SurfaceBuilder::new(volume, iso);
        for x in 0..dims[0] - 1 {
            for y in 0..dims[1] - 1 {
                for z in 0..dims[2] - 1 {
                    builder.march_cell([x, y, z]);
                }
            }
        }

        let surface = builder.finish();
        debug!(
            vertices = surface.vertices.len(),
            triangles = surface.triangles.len(),
            "extracted iso-surface"
        );
        Ok(surface)
    }
}

/// A sampled corner: grid position and field value.
#[derive(Clone, Copy)]
struct Sample {
    index: [usize; 3],
    value: f64,
}

impl Sample {
    fn position(&self) -> DVec3 {
        DVec3::new(
            self.index[0] as f64,
            self.index[1] as f64,
            self.index[2] as f64,
        )
    }
}

struct SurfaceBuilder<'a> {
    volume: &'a Grid3<f64>,
    iso: f64,
    edge_vertices: HashMap<(usize, usize), u32>,
    surface: IsoSurface,
}

impl<'a> SurfaceBuilder<'a> {
    fn new(volume: &'a Grid3<f64>, iso: f64) -> Self {
        Self {
            volume,
            iso,
            edge_vertices: HashMap::new(),
            surface: IsoSurface::default(),
        }
    }

    fn finish(self) -> IsoSurface {
        self.surface
    }

    fn sample(&self, index: [usize; 3]) -> Sample {
        // Callers only pass indices inside the grid.
        let value = self.volume.get(index).unwrap_or(self.iso);
        Sample { index, value }
    }

    fn linear(&self, index: [usize; 3]) -> usize {
        let [_, ny, nz] = self.volume.dims();
        (index[0] * ny + index[1]) * nz + index[2]
    }

    fn march_cell(&mut self, origin: [usize; 3]) {
        let corners: [Sample; 8] = CELL_CORNERS.map(|offset| {
            self.sample([
                origin[0] + offset[0],
                origin[1] + offset[1],
                origin[2] + offset[2],
            ])
        });

        let above = corners.iter().filter(|s| s.value > self.iso).count();
        if above == 0 || above == 8 {
            return;
        }

        for tet in CELL_TETRAHEDRA {
            self.march_tetrahedron(tet.map(|corner| corners[corner]));
        }
    }

    fn march_tetrahedron(&mut self, tet: [Sample; 4]) {
        let (high, low): (Vec<Sample>, Vec<Sample>) =
            tet.iter().partition(|s| s.value > self.iso);

        match (high.len(), low.len()) {
            (1, 3) => {
                let h = high[0];
                let ring = [
                    self.edge_vertex(h, low[0]),
                    self.edge_vertex(h, low[1]),
                    self.edge_vertex(h, low[2]),
                ];
                self.emit_oriented(ring, &high, &low);
            }
            (3, 1) => {
                let l = low[0];
                let ring = [
                    self.edge_vertex(high[0], l),
                    self.edge_vertex(high[1], l),
                    self.edge_vertex(high[2], l),
                ];
                self.emit_oriented(ring, &high, &low);
            }
            (2, 2) => {
                // Quad cycle: h0-l0, h0-l1, h1-l1, h1-l0
                let quad = [
                    self.edge_vertex(high[0], low[0]),
                    self.edge_vertex(high[0], low[1]),
                    self.edge_vertex(high[1], low[1]),
                    self.edge_vertex(high[1], low[0]),
                ];
                self.emit_oriented([quad[0], quad[1], quad[2]], &high, &low);
                self.emit_oriented([quad[0], quad[2], quad[3]], &high, &low);
            }
            _ => {}
        }
    }

    /// Pushes a triangle wound so its normal points from the low corners
    /// toward the high corners.
    fn emit_oriented(&mut self, mut tri: [u32; 3], high: &[Sample], low: &[Sample]) {
        let centroid = |samples: &[Sample]| {
            samples.iter().map(Sample::position).sum::<DVec3>() / samples.len() as f64
        };
        let uphill = centroid(high) - centroid(low);

        let v = &self.surface.vertices;
        let (a, b, c) = (v[tri[0] as usize], v[tri[1] as usize], v[tri[2] as usize]);
        if (b - a).cross(c - a).dot(uphill) < 0.0 {
            tri.swap(1, 2);
        }
        self.surface.triangles.push(tri);
    }

    fn edge_vertex(&mut self, high: Sample, low: Sample) -> u32 {
        let (a, b) = (self.linear(high.index), self.linear(low.index));
        let key = (a.min(b), a.max(b));
        if let Some(&index) = self.edge_vertices.get(&key) {
            return index;
        }

        let t = (self.iso - high.value) / (low.value - high.value);
        let position = high.position().lerp(low.position(), t);

        let gradient = self
            .gradient(high.index)
            .lerp(self.gradient(low.index), t);
        let normal = if !approx_zero(gradient.length_squared()) {
            -gradient.normalize()
        } else {
            (low.position() - high.position()).normalize()
        };

        let index = self.surface.vertices.len() as u32;
        self.surface.vertices.push(position);
        self.surface.normals.push(normal);
        self.edge_vertices.insert(key, index);
        index
    }

    /// Central-difference gradient, one-sided on the grid border.
    fn gradient(&self, index: [usize; 3]) -> DVec3 {
        let dims = self.volume.dims();
        let mut gradient = [0.0; 3];
        for (axis, component) in gradient.iter_mut().enumerate() {
            let mut lo = index;
            let mut hi = index;
            lo[axis] = index[axis].saturating_sub(1);
            hi[axis] = (index[axis] + 1).min(dims[axis] - 1);
            let span = (hi[axis] - lo[axis]) as f64;
            if span > 0.0 {
                *component = (self.sample(hi).value - self.sample(lo).value) / span;
            }
        }
        DVec3::from_array(gradient)
    }
}

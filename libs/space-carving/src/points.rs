//! # Point Sets
//!
//! Ordered candidate points and the dense grid that seeds a carve.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::error::CarveResult;
use crate::params::CarveConfig;

/// Ordered collection of world-space points.
///
/// Iteration order is stable, so per-point flags computed by the view carver
/// line up with the points by position.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PointSet {
    points: Vec<DVec3>,
}

impl PointSet {
    /// Creates an empty point set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of points.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if no point is left.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Points as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[DVec3] {
        &self.points
    }

    /// Iterates over the points.
    pub fn iter(&self) -> std::slice::Iter<'_, DVec3> {
        self.points.iter()
    }

    /// Keeps the points whose flag is true, preserving order.
    ///
    /// `keep` must hold one flag per point; missing flags count as false.
    pub fn retain_flagged(&mut self, keep: &[bool]) {
        let mut flags = keep.iter();
        self.points
            .retain(|_| flags.next().copied().unwrap_or(false));
    }

    /// Consumes the set and returns the points.
    pub fn into_vec(self) -> Vec<DVec3> {
        self.points
    }
}

impl From<Vec<DVec3>> for PointSet {
    fn from(points: Vec<DVec3>) -> Self {
        Self { points }
    }
}

impl FromIterator<DVec3> for PointSet {
    fn from_iter<I: IntoIterator<Item = DVec3>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a PointSet {
    type Item = &'a DVec3;
    type IntoIter = std::slice::Iter<'a, DVec3>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

/// Generates the dense candidate grid for a configuration.
///
/// Each axis steps from `origin - extent / 2 + cell_size / 2` by `cell_size`
/// while below `origin + extent / 2 + cell_size / 2`. The result is the full
/// Cartesian product with `x` varying slowest and `z` fastest.
///
/// The configuration is validated first.
///
/// # Example
///
/// ```rust
/// use space_carving::{dense_points, CarveConfig};
/// use glam::DVec3;
///
/// let points = dense_points(&CarveConfig::new(1.0, DVec3::ZERO, DVec3::splat(2.0))).unwrap();
/// assert_eq!(points.len(), 8);
/// assert_eq!(points.as_slice()[0], DVec3::splat(-0.5));
/// assert_eq!(points.as_slice()[1], DVec3::new(-0.5, -0.5, 0.5));
/// ```
pub fn dense_points(config: &CarveConfig) -> CarveResult<PointSet> {
    config.validate()?;

    let start = config.min_corner();
    let [nx, ny, nz] = config.dense_counts();
    let step = config.cell_size;

    let mut points = Vec::with_capacity(nx * ny * nz);
    for i in 0..nx {
        let x = start.x + i as f64 * step;
        for j in 0..ny {
            let y = start.y + j as f64 * step;
            for k in 0..nz {
                points.push(DVec3::new(x, y, start.z + k as f64 * step));
            }
        }
    }
    Ok(PointSet::from(points))
}

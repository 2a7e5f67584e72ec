//! # Occupancy Volume
//!
//! Dense occupancy grid built from surviving points.

use config::constants::{iso_midpoint, EMPTY_TAG, OCCUPIED_TAG};
use glam::{DVec3, I64Vec3};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use voxel_mesh::Grid3;

use crate::error::{CarveError, CarveResult};
use crate::mapper::CoordinateMapper;
use crate::params::CarveConfig;
use crate::points::PointSet;

/// Sentinel values written into occupancy cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TagPair")]
pub struct OccupancyTags {
    /// Tag of cells holding at least one surviving point
    pub occupied: i32,
    /// Tag of all other cells
    pub empty: i32,
}

/// Unchecked serialized form of [`OccupancyTags`].
#[derive(Deserialize)]
struct TagPair {
    occupied: i32,
    empty: i32,
}

impl TryFrom<TagPair> for OccupancyTags {
    type Error = CarveError;

    fn try_from(pair: TagPair) -> CarveResult<Self> {
        Self::new(pair.occupied, pair.empty)
    }
}

impl Default for OccupancyTags {
    fn default() -> Self {
        Self {
            occupied: OCCUPIED_TAG,
            empty: EMPTY_TAG,
        }
    }
}

impl OccupancyTags {
    /// Creates a tag pair; the two tags must differ.
    pub fn new(occupied: i32, empty: i32) -> CarveResult<Self> {
        if occupied == empty {
            return Err(CarveError::configuration(format!(
                "occupied and empty tags are both {}",
                occupied
            )));
        }
        Ok(Self { occupied, empty })
    }

    /// Iso-level halfway between the two tags.
    pub fn iso_level(&self) -> f64 {
        iso_midpoint(self.occupied, self.empty)
    }
}

/// What to do with a point whose grid index falls outside the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BoundaryPolicy {
    /// Fail with [`CarveError::IndexOutOfRange`].
    #[default]
    Reject,
    /// Clamp the index to the nearest cell and log a warning.
    Clamp,
}

/// Dense 3D grid of occupancy tags.
///
/// # Example
///
/// ```rust
/// use space_carving::{BoundaryPolicy, CarveConfig, OccupancyGrid, OccupancyTags, PointSet};
/// use glam::DVec3;
///
/// let config = CarveConfig::default();
/// let points = PointSet::from(vec![DVec3::ZERO]);
/// let grid = OccupancyGrid::from_points(&points, &config, OccupancyTags::default(), BoundaryPolicy::Reject).unwrap();
///
/// assert_eq!(grid.dims(), [11, 11, 11]);
/// assert_eq!(grid.occupied_count(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OccupancyGrid {
    cells: Grid3<i32>,
    tags: OccupancyTags,
}

impl OccupancyGrid {
    /// An all-empty grid sized for `config`, which is validated first.
    pub fn empty(config: &CarveConfig, tags: OccupancyTags) -> CarveResult<Self> {
        config.validate()?;
        Ok(Self {
            cells: Grid3::filled(config.volume_dims(), tags.empty)?,
            tags,
        })
    }

    /// Marks the cell of every point as occupied.
    ///
    /// Several points in one cell are fine. A point outside the grid fails
    /// under [`BoundaryPolicy::Reject`] and is clamped under
    /// [`BoundaryPolicy::Clamp`].
    pub fn from_points(
        points: &PointSet,
        config: &CarveConfig,
        tags: OccupancyTags,
        policy: BoundaryPolicy,
    ) -> CarveResult<Self> {
        let mapper = CoordinateMapper::new(config);
        let mut grid = Self::empty(config, tags)?;
        for &point in points {
            let index = grid.cell_index(&mapper, point, policy)?;
            grid.cells.set(index, tags.occupied);
        }

        debug!(
            points = points.len(),
            occupied = grid.occupied_count(),
            dims = ?grid.dims(),
            "built occupancy grid"
        );
        Ok(grid)
    }

    fn cell_index(
        &self,
        mapper: &CoordinateMapper,
        point: DVec3,
        policy: BoundaryPolicy,
    ) -> CarveResult<[usize; 3]> {
        let index = mapper.world_to_index(point);
        let dims = self.dims();
        let upper = I64Vec3::new(dims[0] as i64, dims[1] as i64, dims[2] as i64) - I64Vec3::ONE;

        let inside = index.cmpge(I64Vec3::ZERO).all() && index.cmple(upper).all();
        let index = if inside {
            index
        } else {
            match policy {
                BoundaryPolicy::Reject => {
                    return Err(CarveError::IndexOutOfRange {
                        index: index.to_array(),
                        dims,
                    })
                }
                BoundaryPolicy::Clamp => {
                    let clamped = index.clamp(I64Vec3::ZERO, upper);
                    warn!(?point, from = ?index, to = ?clamped, "clamped point into occupancy grid");
                    clamped
                }
            }
        };
        Ok([index.x as usize, index.y as usize, index.z as usize])
    }

    /// Cell counts per axis.
    #[inline]
    pub fn dims(&self) -> [usize; 3] {
        self.cells.dims()
    }

    /// Tags in use.
    #[inline]
    pub fn tags(&self) -> OccupancyTags {
        self.tags
    }

    /// Tag stored at `index`, `None` outside the grid.
    pub fn get(&self, index: [usize; 3]) -> Option<i32> {
        self.cells.get(index)
    }

    /// Returns true if the cell at `index` is occupied.
    pub fn is_occupied(&self, index: [usize; 3]) -> bool {
        self.get(index) == Some(self.tags.occupied)
    }

    /// Number of occupied cells.
    pub fn occupied_count(&self) -> usize {
        self.cells
            .as_slice()
            .iter()
            .filter(|&&tag| tag == self.tags.occupied)
            .count()
    }

    /// Raw tag grid.
    pub fn cells(&self) -> &Grid3<i32> {
        &self.cells
    }

    /// Tags as a scalar field for iso-surface extraction.
    pub fn to_scalar_field(&self) -> Grid3<f64> {
        self.cells.map(f64::from)
    }
}

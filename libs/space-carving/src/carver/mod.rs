//! # Carving Orchestrator
//!
//! Runs the view carver over every view in order and converts the survivors
//! into volumes and meshes.
//!
//! ## Lifecycle
//!
//! ```text
//! SpaceCarver<Unconfigured> --configure(config)--> SpaceCarver<Configured>
//!                                                    |-- carve()
//!                                                    |-- to_volume / to_mesh / to_cubes
//! ```
//!
//! Carving needs a configuration, so `carve` only exists on the configured
//! state.

mod view;


pub use view::carve_view;

use serde::{Deserialize, Serialize};
use tracing::info;
use voxel_mesh::{IsoSurfaceExtractor, MarchingTetrahedra, Mesh};

use crate::camera::{CameraRig, PinholeProjector, Projector};
use crate::cubes::cube_mesh;
use crate::error::CarveResult;
use crate::mapper::CoordinateMapper;
use crate::params::CarveConfig;
use crate::points::{dense_points, PointSet};
use crate::surface::surface_mesh;
use crate::volume::{BoundaryPolicy, OccupancyGrid, OccupancyTags};

// =============================================================================
// STATES
// =============================================================================

/// Carver without a carving volume.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unconfigured;

/// Carver with a validated carving volume.
#[derive(Debug, Clone)]
pub struct Configured {
    config: CarveConfig,
    mapper: CoordinateMapper,
}

// =============================================================================
// REPORT
// =============================================================================

/// Survivors of a carve plus the survivor count after each view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarveReport {
    /// Points kept by every view
    pub survivors: PointSet,
    /// Number of candidate points before the first view
    pub initial_count: usize,
    /// Survivor count after view `i`
    pub pass_counts: Vec<usize>,
}

// =============================================================================
// CARVER
// =============================================================================

/// Silhouette-based space carver.
///
/// # Example
///
/// ```rust
/// use space_carving::{CameraRig, CarveConfig, Distortion, Intrinsics, SilhouetteMask, SpaceCarver};
/// use glam::DVec3;
///
/// let rig = CameraRig::from_parts(
///     Intrinsics::new(10.0, 10.0, 50.0, 50.0),
///     Distortion::none(),
///     &[DVec3::ZERO],
///     &[DVec3::new(0.0, 0.0, 20.0)],
///     vec![SilhouetteMask::filled(100, 100, true)],
/// ).unwrap();
///
/// let carver = SpaceCarver::new(rig).configure(CarveConfig::default()).unwrap();
/// let survivors = carver.carve().unwrap();
/// assert_eq!(survivors.len(), 1000);
/// ```
#[derive(Debug, Clone)]
pub struct SpaceCarver<S = Unconfigured, P = PinholeProjector> {
    rig: CameraRig,
    projector: P,
    state: S,
}

impl SpaceCarver<Unconfigured, PinholeProjector> {
    /// Creates an unconfigured carver with the pinhole projector.
    pub fn new(rig: CameraRig) -> Self {
        Self {
            rig,
            projector: PinholeProjector,
            state: Unconfigured,
        }
    }
}

impl<S, P: Projector> SpaceCarver<S, P> {
    /// Replaces the projector.
    pub fn with_projector<Q: Projector>(self, projector: Q) -> SpaceCarver<S, Q> {
        SpaceCarver {
            rig: self.rig,
            projector,
            state: self.state,
        }
    }

    /// Validates `config` and moves to the configured state.
    ///
    /// Reconfiguring an already configured carver replaces its volume.
    pub fn configure(self, config: CarveConfig) -> CarveResult<SpaceCarver<Configured, P>> {
        config.validate()?;
        Ok(SpaceCarver {
            rig: self.rig,
            projector: self.projector,
            state: Configured {
                mapper: CoordinateMapper::new(&config),
                config,
            },
        })
    }

    /// Camera rig.
    #[inline]
    pub fn rig(&self) -> &CameraRig {
        &self.rig
    }

    /// Survival flags of `points` for a single view.
    pub fn carve_view(&self, view_index: usize, points: &PointSet) -> CarveResult<Vec<bool>> {
        carve_view(&self.projector, &self.rig, view_index, points)
    }

    /// Applies every view in order to `points`, keeping only the points that
    /// every view flags.
    pub fn carve_points(&self, mut points: PointSet) -> CarveResult<CarveReport> {
        let initial_count = points.len();
        info!(
            points = initial_count,
            views = self.rig.view_count(),
            "carving started"
        );

        let mut pass_counts = Vec::with_capacity(self.rig.view_count());
        for view_index in 0..self.rig.view_count() {
            let keep = self.carve_view(view_index, &points)?;
            points.retain_flagged(&keep);
            info!(view = view_index, survivors = points.len(), "carved view");
            pass_counts.push(points.len());
        }

        Ok(CarveReport {
            survivors: points,
            initial_count,
            pass_counts,
        })
    }
}

impl<P: Projector> SpaceCarver<Configured, P> {
    /// Carving volume.
    #[inline]
    pub fn config(&self) -> &CarveConfig {
        &self.state.config
    }

    /// World/grid mapping for the carving volume.
    #[inline]
    pub fn mapper(&self) -> &CoordinateMapper {
        &self.state.mapper
    }

    /// Dense candidate points of the carving volume.
    pub fn dense_points(&self) -> CarveResult<PointSet> {
        dense_points(&self.state.config)
    }

    /// Carves the dense grid and returns the survivors.
    pub fn carve(&self) -> CarveResult<PointSet> {
        Ok(self.carve_report()?.survivors)
    }

    /// Carves the dense grid, keeping per-view survivor counts.
    pub fn carve_report(&self) -> CarveResult<CarveReport> {
        self.carve_points(self.dense_points()?)
    }

    /// Occupancy grid of `points` with default tags, rejecting points
    /// outside the grid.
    pub fn to_volume(&self, points: &PointSet) -> CarveResult<OccupancyGrid> {
        self.to_volume_with(points, OccupancyTags::default(), BoundaryPolicy::default())
    }

    /// Occupancy grid of `points` with explicit tags and boundary policy.
    pub fn to_volume_with(
        &self,
        points: &PointSet,
        tags: OccupancyTags,
        policy: BoundaryPolicy,
    ) -> CarveResult<OccupancyGrid> {
        OccupancyGrid::from_points(points, &self.state.config, tags, policy)
    }

    /// Smooth surface of `points` using marching tetrahedra.
    pub fn to_mesh(&self, points: &PointSet) -> CarveResult<Mesh> {
        self.to_mesh_with(points, &MarchingTetrahedra)
    }

    /// Smooth surface of `points` using `extractor`.
    pub fn to_mesh_with<E: IsoSurfaceExtractor + ?Sized>(
        &self,
        points: &PointSet,
        extractor: &E,
    ) -> CarveResult<Mesh> {
        let grid = self.to_volume(points)?;
        surface_mesh(&grid, &self.state.mapper, extractor)
    }

    /// One axis-aligned cube per point.
    pub fn to_cubes(&self, points: &PointSet) -> CarveResult<Mesh> {
        cube_mesh(points, self.state.config.cell_size)
    }
}

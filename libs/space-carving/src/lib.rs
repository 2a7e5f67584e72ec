//! # Space Carving
//!
//! Reconstructs the visual hull of an object from calibrated camera views
//! and binary silhouettes.
//!
//! ## Architecture
//!
//! ```text
//! CarveConfig → dense_points → carve_view (view 0..N, in order) → survivors
//!     survivors → OccupancyGrid → IsoSurfaceExtractor → surface Mesh
//!     survivors → cube Mesh
//! ```
//!
//! A point survives when every view projects it onto a foreground pixel.
//! Projection runs in parallel over points; views are applied one after
//! another, each on the survivors of the previous one.
//!
//! ## Usage
//!
//! ```rust
//! use space_carving::{CameraRig, CarveConfig, Distortion, Intrinsics, SilhouetteMask, SpaceCarver};
//! use glam::DVec3;
//!
//! // One camera 20 units in front of the volume seeing a centered disc
//! let mask = SilhouetteMask::from_fn(100, 100, |col, row| {
//!     let (dx, dy) = (col as f64 - 50.0, row as f64 - 50.0);
//!     dx * dx + dy * dy <= 400.0
//! });
//! let rig = CameraRig::from_parts(
//!     Intrinsics::new(100.0, 100.0, 50.0, 50.0),
//!     Distortion::none(),
//!     &[DVec3::ZERO],
//!     &[DVec3::new(0.0, 0.0, 20.0)],
//!     vec![mask],
//! ).unwrap();
//!
//! let carver = SpaceCarver::new(rig).configure(CarveConfig::default()).unwrap();
//! let survivors = carver.carve().unwrap();
//! assert!(survivors.len() < 1000);
//!
//! let surface = carver.to_mesh(&survivors).unwrap();
//! let cubes = carver.to_cubes(&survivors).unwrap();
//! assert!(surface.triangle_count() > 0);
//! assert_eq!(cubes.triangle_count(), 12 * survivors.len());
//! ```

pub mod camera;
pub mod carver;
pub mod cubes;
pub mod error;
pub mod mapper;
pub mod params;
pub mod points;
pub mod surface;
pub mod volume;

pub use camera::{
    CameraRig, CameraView, Distortion, Intrinsics, PinholeProjector, Pose, Projector,
    SilhouetteMask,
};
pub use carver::{carve_view, CarveReport, Configured, SpaceCarver, Unconfigured};
pub use cubes::cube_mesh;
pub use error::{CarveError, CarveResult};
pub use mapper::CoordinateMapper;
pub use params::CarveConfig;
pub use points::{dense_points, PointSet};
pub use surface::surface_mesh;
pub use volume::{BoundaryPolicy, OccupancyGrid, OccupancyTags};
pub use voxel_mesh::Mesh;

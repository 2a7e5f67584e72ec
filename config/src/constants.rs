//! # Configuration Constants
//!
//! Centralized constants for the space carving pipeline. Grid defaults,
//! occupancy sentinels, camera model limits and precision values are
//! defined here.
//!
//! ## Categories
//!
//! - **Precision**: Floating-point comparison tolerances
//! - **Grid**: Default carving volume parameters
//! - **Occupancy**: Sentinel tags written into occupancy grids
//! - **Camera**: Projection model limits

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Epsilon for floating-point comparisons.
///
/// Used for determining if two floating-point values are "equal" within
/// numerical tolerance.
///
/// # Example
///
/// ```rust
/// use config::constants::EPSILON;
///
/// fn approximately_equal(a: f64, b: f64) -> bool {
///     (a - b).abs() < EPSILON
/// }
///
/// assert!(approximately_equal(1.0, 1.0 + 1e-11));
/// ```
pub const EPSILON: f64 = 1e-10;

/// Relative tolerance used when turning `extent / cell_size` into a cell count.
///
/// Ratios such as `10.0 / 0.1` evaluate to `100.00000000000001`; within this
/// tolerance the ratio is snapped to the integer so the dense point grid and
/// the occupancy grid agree on the number of cells.
///
/// # Example
///
/// ```rust
/// use config::constants::{snapped_ratio, GRID_SNAP_EPSILON};
///
/// assert!(GRID_SNAP_EPSILON < 1e-6);
/// assert_eq!(snapped_ratio(10.0, 0.1), 100.0);
/// ```
pub const GRID_SNAP_EPSILON: f64 = 1e-9;

/// Minimum triangle area for a face to count as non-degenerate.
///
/// Used by mesh validation. Cube faces of a 1e-4 cell still have an area of
/// 5e-9, well above this bound.
pub const DEGENERATE_AREA_EPSILON: f64 = 1e-14;

// =============================================================================
// GRID CONSTANTS
// =============================================================================

/// Default edge length of a single voxel.
///
/// # Example
///
/// ```rust
/// use config::constants::DEFAULT_CELL_SIZE;
///
/// assert!(DEFAULT_CELL_SIZE > 0.0);
/// ```
pub const DEFAULT_CELL_SIZE: f64 = 1.0;

/// Default center of the carving volume.
pub const DEFAULT_ORIGIN: [f64; 3] = [0.0, 0.0, 0.0];

/// Default length of the carving volume along each axis.
///
/// # Example
///
/// ```rust
/// use config::constants::{DEFAULT_CELL_SIZE, DEFAULT_EXTENT};
///
/// // 10 cells per axis, 1000 candidate points in total
/// let per_axis = (DEFAULT_EXTENT / DEFAULT_CELL_SIZE) as usize;
/// assert_eq!(per_axis.pow(3), 1000);
/// ```
pub const DEFAULT_EXTENT: f64 = 10.0;

// =============================================================================
// OCCUPANCY CONSTANTS
// =============================================================================

/// Tag written into occupancy grid cells that hold a surviving point.
pub const OCCUPIED_TAG: i32 = 1;

/// Tag written into occupancy grid cells without any surviving point.
pub const EMPTY_TAG: i32 = -1;

// =============================================================================
// CAMERA CONSTANTS
// =============================================================================

/// Smallest camera-space depth that still counts as "in front of" the camera.
///
/// Points with `z <= MIN_CAMERA_DEPTH` after the extrinsic transform have no
/// valid projection.
pub const MIN_CAMERA_DEPTH: f64 = 1e-12;

/// Accepted lengths of a distortion coefficient vector.
///
/// - 0: no distortion
/// - 4: `k1 k2 p1 p2`
/// - 5: `k1 k2 p1 p2 k3`
/// - 8: `k1 k2 p1 p2 k3 k4 k5 k6` (rational model)
///
/// # Example
///
/// ```rust
/// use config::constants::DISTORTION_COEFF_COUNTS;
///
/// assert!(DISTORTION_COEFF_COUNTS.contains(&5));
/// assert!(!DISTORTION_COEFF_COUNTS.contains(&3));
/// ```
pub const DISTORTION_COEFF_COUNTS: [usize; 4] = [0, 4, 5, 8];

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Returns the iso-level halfway between the occupied and empty tags.
///
/// # Example
///
/// ```rust
/// use config::constants::{iso_midpoint, EMPTY_TAG, OCCUPIED_TAG};
///
/// assert_eq!(iso_midpoint(OCCUPIED_TAG, EMPTY_TAG), 0.0);
/// assert_eq!(iso_midpoint(2, 0), 1.0);
/// ```
#[inline]
pub fn iso_midpoint(occupied: i32, empty: i32) -> f64 {
    (f64::from(occupied) + f64::from(empty)) / 2.0
}

/// Computes `extent / cell_size`, snapping to the nearest integer when the
/// quotient lies within [`GRID_SNAP_EPSILON`] of it.
///
/// # Example
///
/// ```rust
/// use config::constants::snapped_ratio;
///
/// assert_eq!(snapped_ratio(10.0, 1.0), 10.0);
/// assert_eq!(snapped_ratio(0.3, 0.1), 3.0);
/// assert_eq!(snapped_ratio(10.0, 3.0), 10.0 / 3.0);
/// ```
pub fn snapped_ratio(extent: f64, cell_size: f64) -> f64 {
    let ratio = extent / cell_size;
    let nearest = ratio.round();
    if (ratio - nearest).abs() <= GRID_SNAP_EPSILON * nearest.abs().max(1.0) {
        nearest
    } else {
        ratio
    }
}

/// Checks if a f64 value is approximately zero within EPSILON.
///
/// # Example
///
/// ```rust
/// use config::constants::approx_zero;
///
/// assert!(approx_zero(1e-11));
/// assert!(!approx_zero(0.1));
/// ```
#[inline]
pub fn approx_zero(value: f64) -> bool {
    value.abs() < EPSILON
}

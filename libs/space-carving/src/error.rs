//! # Error Types
//!
//! Error types for space carving. All errors are explicit and local to the
//! call that raised them.
//!
//! ## Error Policy
//!
//! - NO partial results when a stage fails
//! - NO retries: every failure stems from configuration or degenerate input
//! - Errors include context for debugging

use thiserror::Error;
use voxel_mesh::MeshError;

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur while carving or converting survivors.
///
/// ## Example
///
/// ```rust
/// use space_carving::{CarveConfig, CarveError, SpaceCarver, CameraRig, Intrinsics, Distortion};
///
/// let rig = CameraRig::new(Intrinsics::identity(), Distortion::none(), Vec::new());
/// let bad = CarveConfig { cell_size: 0.0, ..CarveConfig::default() };
///
/// match SpaceCarver::new(rig).configure(bad) {
///     Err(CarveError::Configuration(msg)) => assert!(msg.contains("cell size")),
///     _ => unreachable!(),
/// }
/// ```
#[derive(Error, Debug)]
pub enum CarveError {
    /// Carving parameters are missing or invalid.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Views, poses, masks or camera parameters disagree in count or shape.
    #[error("Dimension mismatch: {0}")]
    DimensionMismatch(String),

    /// A surviving point maps outside the occupancy grid.
    #[error("Grid index {index:?} outside grid of size {dims:?}")]
    IndexOutOfRange {
        /// Offending grid index
        index: [i64; 3],
        /// Occupancy grid size
        dims: [usize; 3],
    },

    /// A mesh was requested from an empty survivor set or volume.
    #[error("Empty result: {0}")]
    EmptyResult(String),

    /// Mesh construction or extraction failed.
    #[error("Mesh error: {0}")]
    Mesh(#[from] MeshError),
}

impl CarveError {
    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Creates a dimension mismatch error.
    pub fn dimension_mismatch(message: impl Into<String>) -> Self {
        Self::DimensionMismatch(message.into())
    }

    /// Creates an empty result error.
    pub fn empty(message: impl Into<String>) -> Self {
        Self::EmptyResult(message.into())
    }
}

// =============================================================================
// RESULT TYPE ALIAS
// =============================================================================

/// Result type alias for carving operations.
pub type CarveResult<T> = Result<T, CarveError>;

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CarveError::IndexOutOfRange {
            index: [11, 0, -1],
            dims: [11, 11, 11],
        };
        let text = err.to_string();
        assert!(text.contains("[11, 0, -1]"));
        assert!(text.contains("[11, 11, 11]"));

        let err = CarveError::dimension_mismatch("3 rotations for 2 masks");
        assert!(err.to_string().contains("3 rotations"));
    }

    #[test]
    fn test_mesh_error_converts() {
        let err: CarveError = MeshError::degenerate("flat").into();
        assert!(matches!(err, CarveError::Mesh(_)));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CarveError>();
    }
}

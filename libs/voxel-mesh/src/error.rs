//! # Mesh Errors
//!
//! Error types for mesh construction and iso-surface extraction.

use thiserror::Error;

/// Errors that can occur while building or extracting meshes.
#[derive(Debug, Error)]
pub enum MeshError {
    /// Triangle indices do not match the vertex buffer
    #[error("Invalid topology: {message}")]
    InvalidTopology { message: String },

    /// Degenerate geometry
    #[error("Degenerate geometry: {message}")]
    DegenerateGeometry { message: String },

    /// Sample volume cannot be processed
    #[error("Invalid volume {dims:?}: {message}")]
    InvalidVolume { dims: [usize; 3], message: String },
}

impl MeshError {
    /// Creates an invalid topology error.
    pub fn invalid_topology(message: impl Into<String>) -> Self {
        Self::InvalidTopology {
            message: message.into(),
        }
    }

    /// Creates a degenerate geometry error.
    pub fn degenerate(message: impl Into<String>) -> Self {
        Self::DegenerateGeometry {
            message: message.into(),
        }
    }

    /// Creates an invalid volume error.
    pub fn invalid_volume(dims: [usize; 3], message: impl Into<String>) -> Self {
        Self::InvalidVolume {
            dims,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MeshError::invalid_volume([1, 4, 4], "need two samples per axis");
        let text = err.to_string();
        assert!(text.contains("[1, 4, 4]"));
        assert!(text.contains("two samples"));

        let err = MeshError::invalid_topology("index 9 out of range");
        assert!(err.to_string().starts_with("Invalid topology"));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MeshError>();
    }
}

//! # Config Crate
//!
//! Centralized configuration constants for the space carving pipeline.
//! All magic numbers and tunable parameters are defined here so the mesh
//! and carving crates agree on defaults, sentinels and tolerances.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{DEFAULT_CELL_SIZE, DEFAULT_EXTENT, EMPTY_TAG, OCCUPIED_TAG};
//!
//! // Default grid resolution along one axis
//! let cells = (DEFAULT_EXTENT / DEFAULT_CELL_SIZE) as usize;
//! assert_eq!(cells, 10);
//!
//! // Occupancy sentinels differ
//! assert_ne!(OCCUPIED_TAG, EMPTY_TAG);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Source Compatible**: Defaults match the reference carving parameters
//! - **Well-Documented**: Every constant has clear documentation

pub mod constants;

//! # Camera Model
//!
//! Calibrated views used to carve: shared intrinsics and distortion, and per
//! view an extrinsic pose plus a silhouette mask.
//!
//! ## Conventions
//!
//! - Rotation vectors are axis-angle (Rodrigues): direction is the axis,
//!   length the angle in radians.
//! - `camera = R * world + t`.
//! - Pixel `x` is the mask column, pixel `y` the mask row.

mod mask;
mod projector;

#[cfg(test)]
mod tests;

pub use mask::SilhouetteMask;
pub use projector::{PinholeProjector, Projector};

use config::constants::DISTORTION_COEFF_COUNTS;
use glam::{DMat3, DQuat, DVec3};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{CarveError, CarveResult};

// =============================================================================
// INTRINSICS
// =============================================================================

/// 3x3 camera matrix mapping camera-frame points to pixels.
///
/// ```text
/// | fx  s  cx |
/// |  0  fy cy |
/// |  0  0   1 |
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Intrinsics {
    matrix: DMat3,
}

impl Intrinsics {
    /// Builds intrinsics from focal lengths and principal point.
    pub fn new(fx: f64, fy: f64, cx: f64, cy: f64) -> Self {
        Self {
            matrix: DMat3::from_cols_array_2d(&[[fx, 0.0, 0.0], [0.0, fy, 0.0], [cx, cy, 1.0]]),
        }
    }

    /// Identity camera matrix (unit focal length, principal point at 0).
    pub fn identity() -> Self {
        Self {
            matrix: DMat3::IDENTITY,
        }
    }

    /// Builds intrinsics from three matrix rows.
    pub fn from_rows(rows: [[f64; 3]; 3]) -> CarveResult<Self> {
        let intrinsics = Self {
            matrix: DMat3::from_cols_array_2d(&rows).transpose(),
        };
        intrinsics.validate()?;
        Ok(intrinsics)
    }

    /// Builds intrinsics from nine row-major values.
    ///
    /// # Example
    ///
    /// ```rust
    /// use space_carving::Intrinsics;
    ///
    /// let k = Intrinsics::from_row_major(&[800.0, 0.0, 320.0, 0.0, 800.0, 240.0, 0.0, 0.0, 1.0]).unwrap();
    /// assert_eq!(k.principal_point(), (320.0, 240.0));
    ///
    /// assert!(Intrinsics::from_row_major(&[800.0, 0.0, 320.0]).is_err());
    /// ```
    pub fn from_row_major(values: &[f64]) -> CarveResult<Self> {
        let rows: [[f64; 3]; 3] = match values {
            [a, b, c, d, e, f, g, h, i] => [[*a, *b, *c], [*d, *e, *f], [*g, *h, *i]],
            _ => {
                return Err(CarveError::dimension_mismatch(format!(
                    "intrinsic matrix needs 9 values, got {}",
                    values.len()
                )))
            }
        };
        Self::from_rows(rows)
    }

    fn validate(&self) -> CarveResult<()> {
        if !self.matrix.is_finite() {
            return Err(CarveError::dimension_mismatch(
                "intrinsic matrix contains non-finite values",
            ));
        }
        let (fx, fy) = self.focal_length();
        if fx == 0.0 || fy == 0.0 {
            return Err(CarveError::dimension_mismatch(format!(
                "intrinsic focal lengths must be non-zero, got ({}, {})",
                fx, fy
            )));
        }
        Ok(())
    }

    /// Focal lengths `(fx, fy)` in pixels.
    #[inline]
    pub fn focal_length(&self) -> (f64, f64) {
        (self.matrix.x_axis.x, self.matrix.y_axis.y)
    }

    /// Principal point `(cx, cy)` in pixels.
    #[inline]
    pub fn principal_point(&self) -> (f64, f64) {
        (self.matrix.z_axis.x, self.matrix.z_axis.y)
    }

    /// The full matrix.
    #[inline]
    pub fn matrix(&self) -> DMat3 {
        self.matrix
    }
}

// =============================================================================
// DISTORTION
// =============================================================================

/// Lens distortion coefficients `k1 k2 p1 p2 [k3 [k4 k5 k6]]`.
///
/// Missing trailing coefficients are zero.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Distortion {
    coeffs: Vec<f64>,
}

impl Distortion {
    /// No distortion.
    pub fn none() -> Self {
        Self::default()
    }

    /// Wraps 0, 4, 5 or 8 coefficients.
    ///
    /// # Example
    ///
    /// ```rust
    /// use space_carving::Distortion;
    ///
    /// let d = Distortion::new(vec![0.1, -0.05, 0.0, 0.0, 0.01]).unwrap();
    /// assert_eq!(d.coefficient(0), 0.1);
    /// assert_eq!(d.coefficient(6), 0.0);
    ///
    /// assert!(Distortion::new(vec![0.1, 0.2, 0.3]).is_err());
    /// ```
    pub fn new(coeffs: Vec<f64>) -> CarveResult<Self> {
        if !DISTORTION_COEFF_COUNTS.contains(&coeffs.len()) {
            return Err(CarveError::dimension_mismatch(format!(
                "distortion needs one of {:?} coefficients, got {}",
                DISTORTION_COEFF_COUNTS,
                coeffs.len()
            )));
        }
        if coeffs.iter().any(|c| !c.is_finite()) {
            return Err(CarveError::dimension_mismatch(
                "distortion coefficients must be finite",
            ));
        }
        Ok(Self { coeffs })
    }

    /// Coefficient at position `i`, zero when not supplied.
    #[inline]
    pub fn coefficient(&self, i: usize) -> f64 {
        self.coeffs.get(i).copied().unwrap_or(0.0)
    }

    /// Returns true if every coefficient is zero.
    pub fn is_none(&self) -> bool {
        self.coeffs.iter().all(|&c| c == 0.0)
    }

    /// Raw coefficients.
    pub fn coefficients(&self) -> &[f64] {
        &self.coeffs
    }
}

// =============================================================================
// POSE
// =============================================================================

/// Extrinsic parameters mapping world points into the camera frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    /// Axis-angle rotation vector
    pub rotation: DVec3,
    /// Translation applied after rotation
    pub translation: DVec3,
}

impl Pose {
    /// Creates a pose.
    pub fn new(rotation: DVec3, translation: DVec3) -> Self {
        Self {
            rotation,
            translation,
        }
    }

    /// Rotation as a quaternion.
    pub fn quaternion(&self) -> DQuat {
        DQuat::from_scaled_axis(self.rotation)
    }

    /// Transforms a world point into the camera frame.
    #[inline]
    pub fn world_to_camera(&self, point: DVec3) -> DVec3 {
        self.quaternion() * point + self.translation
    }
}

// =============================================================================
// VIEWS
// =============================================================================

/// One calibrated camera view and its silhouette.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraView {
    /// World-to-camera pose
    pub pose: Pose,
    /// Silhouette of the object in this view
    pub mask: SilhouetteMask,
    /// Distortion overriding the rig's shared coefficients
    pub distortion: Option<Distortion>,
}

impl CameraView {
    /// Creates a view using the rig's shared distortion.
    pub fn new(pose: Pose, mask: SilhouetteMask) -> Self {
        Self {
            pose,
            mask,
            distortion: None,
        }
    }

    /// Overrides the distortion coefficients for this view only.
    pub fn with_distortion(mut self, distortion: Distortion) -> Self {
        self.distortion = Some(distortion);
        self
    }
}

/// All views of a carve, with the camera parameters they share.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraRig {
    intrinsics: Intrinsics,
    distortion: Distortion,
    views: Vec<CameraView>,
}

impl CameraRig {
    /// Creates a rig from already assembled views.
    pub fn new(intrinsics: Intrinsics, distortion: Distortion, views: Vec<CameraView>) -> Self {
        if views.is_empty() {
            warn!("camera rig has no views; carving will keep every candidate point");
        }
        Self {
            intrinsics,
            distortion,
            views,
        }
    }

    /// Creates a rig from parallel lists of rotations, translations and masks.
    ///
    /// # Example
    ///
    /// ```rust
    /// use space_carving::{CameraRig, CarveError, Distortion, Intrinsics, SilhouetteMask};
    /// use glam::DVec3;
    ///
    /// let masks = vec![SilhouetteMask::filled(4, 4, true); 2];
    /// let result = CameraRig::from_parts(
    ///     Intrinsics::identity(),
    ///     Distortion::none(),
    ///     &[DVec3::ZERO, DVec3::ZERO],
    ///     &[DVec3::Z],
    ///     masks,
    /// );
    /// assert!(matches!(result, Err(CarveError::DimensionMismatch(_))));
    /// ```
    pub fn from_parts(
        intrinsics: Intrinsics,
        distortion: Distortion,
        rotations: &[DVec3],
        translations: &[DVec3],
        masks: Vec<SilhouetteMask>,
    ) -> CarveResult<Self> {
        if rotations.len() != translations.len() || rotations.len() != masks.len() {
            return Err(CarveError::dimension_mismatch(format!(
                "{} rotations, {} translations and {} masks",
                rotations.len(),
                translations.len(),
                masks.len()
            )));
        }

        let views = rotations
            .iter()
            .zip(translations)
            .zip(masks)
            .map(|((&r, &t), mask)| CameraView::new(Pose::new(r, t), mask))
            .collect();
        Ok(Self::new(intrinsics, distortion, views))
    }

    /// Number of views.
    #[inline]
    pub fn view_count(&self) -> usize {
        self.views.len()
    }

    /// All views in carving order.
    #[inline]
    pub fn views(&self) -> &[CameraView] {
        &self.views
    }

    /// View at `index`.
    pub fn view(&self, index: usize) -> CarveResult<&CameraView> {
        self.views.get(index).ok_or_else(|| {
            CarveError::dimension_mismatch(format!(
                "view {} requested from a rig of {} views",
                index,
                self.views.len()
            ))
        })
    }

    /// Shared intrinsics.
    #[inline]
    pub fn intrinsics(&self) -> &Intrinsics {
        &self.intrinsics
    }

    /// Distortion in effect for `view`: its override or the shared one.
    pub fn distortion_for<'a>(&'a self, view: &'a CameraView) -> &'a Distortion {
        view.distortion.as_ref().unwrap_or(&self.distortion)
    }
}

//! Batch projection of world points into pixel coordinates.

use config::constants::MIN_CAMERA_DEPTH;
use glam::{DVec2, DVec3};
use rayon::prelude::*;

use super::{Distortion, Intrinsics, Pose};

/// Maps world points to pixel coordinates for one camera.
///
/// Implementations return one entry per input point, in input order;
/// `None` marks a point without a valid projection.
pub trait Projector: Sync {
    /// Projects a batch of world points.
    fn project(
        &self,
        points: &[DVec3],
        pose: &Pose,
        intrinsics: &Intrinsics,
        distortion: &Distortion,
    ) -> Vec<Option<DVec2>>;
}

/// Pinhole camera with radial, tangential and rational distortion.
///
/// For a camera-frame point `(X, Y, Z)` with `x = X/Z`, `y = Y/Z` and
/// `r² = x² + y²`:
///
/// ```text
/// radial = (1 + k1 r² + k2 r⁴ + k3 r⁶) / (1 + k4 r² + k5 r⁴ + k6 r⁶)
/// x'' = x radial + 2 p1 x y + p2 (r² + 2 x²)
/// y'' = y radial + p1 (r² + 2 y²) + 2 p2 x y
/// u = fx x'' + cx,   v = fy y'' + cy
/// ```
///
/// Points at or behind the image plane (`Z <= MIN_CAMERA_DEPTH`) have no
/// projection.
///
/// # Example
///
/// ```rust
/// use space_carving::{Distortion, Intrinsics, PinholeProjector, Pose, Projector};
/// use glam::{DVec2, DVec3};
///
/// let pose = Pose::new(DVec3::ZERO, DVec3::new(0.0, 0.0, 8.0));
/// let k = Intrinsics::new(100.0, 100.0, 50.0, 50.0);
/// let pixels = PinholeProjector.project(&[DVec3::new(2.0, -2.0, 0.0)], &pose, &k, &Distortion::none());
/// assert_eq!(pixels, vec![Some(DVec2::new(75.0, 25.0))]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct PinholeProjector;

impl PinholeProjector {
    fn project_one(
        camera: DVec3,
        intrinsics: &Intrinsics,
        distortion: &Distortion,
    ) -> Option<DVec2> {
        if !(camera.z > MIN_CAMERA_DEPTH) {
            return None;
        }

        let x = camera.x / camera.z;
        let y = camera.y / camera.z;
        let (xd, yd) = if distortion.is_none() {
            (x, y)
        } else {
            let k = |i| distortion.coefficient(i);
            let (k1, k2, p1, p2, k3, k4, k5, k6) =
                (k(0), k(1), k(2), k(3), k(4), k(5), k(6), k(7));

            let r2 = x * x + y * y;
            let r4 = r2 * r2;
            let r6 = r4 * r2;
            let radial = (1.0 + k1 * r2 + k2 * r4 + k3 * r6) / (1.0 + k4 * r2 + k5 * r4 + k6 * r6);
            (
                x * radial + 2.0 * p1 * x * y + p2 * (r2 + 2.0 * x * x),
                y * radial + p1 * (r2 + 2.0 * y * y) + 2.0 * p2 * x * y,
            )
        };

        let (fx, fy) = intrinsics.focal_length();
        let (cx, cy) = intrinsics.principal_point();
        let pixel = DVec2::new(fx * xd + cx, fy * yd + cy);
        pixel.is_finite().then_some(pixel)
    }
}

impl Projector for PinholeProjector {
    fn project(
        &self,
        points: &[DVec3],
        pose: &Pose,
        intrinsics: &Intrinsics,
        distortion: &Distortion,
    ) -> Vec<Option<DVec2>> {
        let rotation = pose.quaternion();
        points
            .par_iter()
            .map(|&p| Self::project_one(rotation * p + pose.translation, intrinsics, distortion))
            .collect()
    }
}

//! Single-view carving: project, round, bounds-check, sample the mask.

use glam::DVec2;
use rayon::prelude::*;

use crate::camera::{CameraRig, Projector, SilhouetteMask};
use crate::error::{CarveError, CarveResult};
use crate::points::PointSet;

/// Decides for every point whether it survives view `view_index`.
///
/// A point is kept when its projection, rounded to the nearest pixel
/// (ties to even), lands inside the image on a non-zero mask pixel. Points
/// without a projection or outside the image are dropped.
pub fn carve_view<P: Projector + ?Sized>(
    projector: &P,
    rig: &CameraRig,
    view_index: usize,
    points: &PointSet,
) -> CarveResult<Vec<bool>> {
    let view = rig.view(view_index)?;
    let pixels = projector.project(
        points.as_slice(),
        &view.pose,
        rig.intrinsics(),
        rig.distortion_for(view),
    );

    if pixels.len() != points.len() {
        return Err(CarveError::dimension_mismatch(format!(
            "projector returned {} pixels for {} points in view {}",
            pixels.len(),
            points.len(),
            view_index
        )));
    }

    Ok(pixels
        .par_iter()
        .map(|&pixel| lands_on_silhouette(&view.mask, pixel))
        .collect())
}

fn lands_on_silhouette(mask: &SilhouetteMask, pixel: Option<DVec2>) -> bool {
    let Some(pixel) = pixel else {
        return false;
    };

    let col = pixel.x.round_ties_even();
    let row = pixel.y.round_ties_even();
    // Also rejects NaN.
    if !(col >= 0.0 && row >= 0.0) {
        return false;
    }
    mask.is_inside(col as usize, row as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounding_picks_nearest_pixel() {
        let mask = SilhouetteMask::from_fn(4, 4, |col, row| col == 2 && row == 1);
        assert!(lands_on_silhouette(&mask, Some(DVec2::new(2.4, 0.6))));
        assert!(lands_on_silhouette(&mask, Some(DVec2::new(1.6, 1.4))));
        assert!(!lands_on_silhouette(&mask, Some(DVec2::new(2.6, 1.0))));
    }

    #[test]
    fn test_rounding_ties_to_even() {
        let mask = SilhouetteMask::from_fn(4, 4, |col, _| col == 2);
        assert!(lands_on_silhouette(&mask, Some(DVec2::new(2.5, 0.0))));
        assert!(lands_on_silhouette(&mask, Some(DVec2::new(1.5, 0.0))));
        assert!(!lands_on_silhouette(&mask, Some(DVec2::new(0.5, 0.0))));
    }

    #[test]
    fn test_small_negative_rounds_into_image() {
        let mask = SilhouetteMask::filled(2, 2, true);
        assert!(lands_on_silhouette(&mask, Some(DVec2::new(-0.4, -0.5))));
        assert!(!lands_on_silhouette(&mask, Some(DVec2::new(-0.6, 0.0))));
    }

    #[test]
    fn test_outside_image_is_dropped() {
        let mask = SilhouetteMask::filled(3, 2, true);
        assert!(!lands_on_silhouette(&mask, Some(DVec2::new(3.0, 0.0))));
        assert!(!lands_on_silhouette(&mask, Some(DVec2::new(0.0, 2.0))));
        assert!(!lands_on_silhouette(&mask, Some(DVec2::new(1e300, 0.0))));
        assert!(!lands_on_silhouette(&mask, Some(DVec2::new(f64::NAN, 0.0))));
        assert!(!lands_on_silhouette(&mask, None));
    }
}

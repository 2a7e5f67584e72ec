//! Tests for the camera model, masks and projection.

use approx::assert_relative_eq;
use glam::{DVec2, DVec3};

use super::*;

fn unit_camera() -> (Intrinsics, Pose) {
    // Camera 4 units in front of the world origin, looking down +z
    (Intrinsics::new(1.0, 1.0, 0.0, 0.0), Pose::new(DVec3::ZERO, DVec3::new(0.0, 0.0, 4.0)))
}

fn project_one(point: DVec3, pose: &Pose, k: &Intrinsics, d: &Distortion) -> Option<DVec2> {
    PinholeProjector.project(&[point], pose, k, d)[0]
}

// =============================================================================
// INTRINSICS / DISTORTION
// =============================================================================

#[test]
fn test_intrinsics_from_rows() {
    let k = Intrinsics::from_rows([[500.0, 0.0, 320.0], [0.0, 400.0, 240.0], [0.0, 0.0, 1.0]]).unwrap();
    assert_eq!(k.focal_length(), (500.0, 400.0));
    assert_eq!(k.principal_point(), (320.0, 240.0));
    assert_eq!(k, Intrinsics::new(500.0, 400.0, 320.0, 240.0));
}

#[test]
fn test_intrinsics_reject_zero_focal_length() {
    let result = Intrinsics::from_rows([[0.0, 0.0, 1.0], [0.0, 1.0, 1.0], [0.0, 0.0, 1.0]]);
    assert!(matches!(result, Err(CarveError::DimensionMismatch(_))));
}

#[test]
fn test_intrinsics_reject_nan() {
    let result = Intrinsics::from_row_major(&[1.0, 0.0, f64::NAN, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0]);
    assert!(result.is_err());
}

#[test]
fn test_distortion_lengths() {
    for len in [0, 4, 5, 8] {
        assert!(Distortion::new(vec![0.0; len]).is_ok());
    }
    for len in [1, 2, 3, 6, 7, 14] {
        assert!(Distortion::new(vec![0.0; len]).is_err());
    }
}

// =============================================================================
// MASKS
// =============================================================================

#[test]
fn test_mask_rejects_wrong_pixel_count() {
    let result = SilhouetteMask::new(3, 2, vec![1; 5]);
    assert!(matches!(result, Err(CarveError::DimensionMismatch(_))));
}

#[test]
fn test_mask_rejects_overflowing_size() {
    let result = SilhouetteMask::new(usize::MAX, 2, Vec::new());
    assert!(matches!(result, Err(CarveError::DimensionMismatch(_))));
}

#[test]
fn test_mask_deserialize_checks_pixel_count() {
    let short = r#"{"width":100,"height":100,"pixels":[1,1,1]}"#;
    let err = serde_json::from_str::<SilhouetteMask>(short).unwrap_err().to_string();
    assert!(err.contains("needs 10000 pixels, got 3"), "{}", err);

    let mask = SilhouetteMask::from_rows(&[vec![0, 3], vec![1, 0]]).unwrap();
    let json = serde_json::to_string(&mask).unwrap();
    assert_eq!(serde_json::from_str::<SilhouetteMask>(&json).unwrap(), mask);
}

#[test]
fn test_rig_with_malformed_mask_is_rejected() {
    let json = r#"{
        "intrinsics": {"matrix": [10.0, 0.0, 0.0, 0.0, 10.0, 0.0, 50.0, 50.0, 1.0]},
        "distortion": {"coeffs": []},
        "views": [{
            "pose": {"rotation": [0.0, 0.0, 0.0], "translation": [0.0, 0.0, 20.0]},
            "mask": {"width": 100, "height": 100, "pixels": [1, 1, 1]},
            "distortion": null
        }]
    }"#;
    let err = serde_json::from_str::<CameraRig>(json).unwrap_err().to_string();
    assert!(err.contains("Dimension mismatch"), "{}", err);
}

#[test]
fn test_mask_from_rows_is_row_major() {
    let mask = SilhouetteMask::from_rows(&[vec![0, 0, 7], vec![1, 0, 0]]).unwrap();
    assert_eq!((mask.width(), mask.height()), (3, 2));
    assert!(mask.is_inside(2, 0));
    assert!(mask.is_inside(0, 1));
    assert!(!mask.is_inside(0, 0));
    assert_eq!(mask.foreground_count(), 2);
}

#[test]
fn test_mask_from_rows_rejects_ragged() {
    assert!(SilhouetteMask::from_rows(&[vec![0, 0], vec![1]]).is_err());
}

#[test]
fn test_filled_masks() {
    assert_eq!(SilhouetteMask::filled(5, 4, true).foreground_count(), 20);
    assert_eq!(SilhouetteMask::filled(5, 4, false).foreground_count(), 0);
}

// =============================================================================
// POSE / RIG
// =============================================================================

#[test]
fn test_rotation_vector_is_axis_angle() {
    let pose = Pose::new(DVec3::new(0.0, 0.0, std::f64::consts::FRAC_PI_2), DVec3::ZERO);
    let rotated = pose.world_to_camera(DVec3::X);
    assert_relative_eq!(rotated.x, 0.0, epsilon = 1e-12);
    assert_relative_eq!(rotated.y, 1.0, epsilon = 1e-12);
    assert_relative_eq!(rotated.z, 0.0, epsilon = 1e-12);
}

#[test]
fn test_translation_applies_after_rotation() {
    let pose = Pose::new(DVec3::new(std::f64::consts::PI, 0.0, 0.0), DVec3::new(0.0, 0.0, 5.0));
    let camera = pose.world_to_camera(DVec3::new(0.0, 0.0, 1.0));
    assert_relative_eq!(camera.z, 4.0, epsilon = 1e-12);
}

#[test]
fn test_rig_from_parts() {
    let masks = vec![SilhouetteMask::filled(2, 2, true), SilhouetteMask::filled(3, 3, false)];
    let rig = CameraRig::from_parts(
        Intrinsics::identity(),
        Distortion::none(),
        &[DVec3::ZERO, DVec3::X],
        &[DVec3::Z, DVec3::Z * 2.0],
        masks,
    )
    .unwrap();

    assert_eq!(rig.view_count(), 2);
    assert_eq!(rig.view(1).unwrap().pose.rotation, DVec3::X);
    assert_eq!(rig.view(1).unwrap().mask.width(), 3);
    assert!(matches!(rig.view(2), Err(CarveError::DimensionMismatch(_))));
}

#[test]
fn test_rig_distortion_override() {
    let shared = Distortion::new(vec![0.1, 0.0, 0.0, 0.0]).unwrap();
    let own = Distortion::new(vec![0.2, 0.0, 0.0, 0.0, 0.0]).unwrap();
    let mask = SilhouetteMask::filled(1, 1, true);
    let pose = Pose::new(DVec3::ZERO, DVec3::Z);

    let rig = CameraRig::new(
        Intrinsics::identity(),
        shared.clone(),
        vec![
            CameraView::new(pose, mask.clone()),
            CameraView::new(pose, mask).with_distortion(own.clone()),
        ],
    );
    assert_eq!(rig.distortion_for(&rig.views()[0]), &shared);
    assert_eq!(rig.distortion_for(&rig.views()[1]), &own);
}

// =============================================================================
// PROJECTION
// =============================================================================

#[test]
fn test_projection_without_distortion() {
    let k = Intrinsics::new(200.0, 100.0, 64.0, 32.0);
    let pose = Pose::new(DVec3::ZERO, DVec3::new(0.0, 0.0, 4.0));
    let pixel = project_one(DVec3::new(1.0, 2.0, 0.0), &pose, &k, &Distortion::none()).unwrap();
    assert_relative_eq!(pixel.x, 200.0 * 0.25 + 64.0);
    assert_relative_eq!(pixel.y, 100.0 * 0.5 + 32.0);
}

#[test]
fn test_projection_behind_camera_is_none() {
    let (k, pose) = unit_camera();
    assert!(project_one(DVec3::new(0.0, 0.0, -4.0), &pose, &k, &Distortion::none()).is_none());
    assert!(project_one(DVec3::new(0.0, 0.0, -10.0), &pose, &k, &Distortion::none()).is_none());
}

#[test]
fn test_radial_distortion() {
    let (k, pose) = unit_camera();
    let d = Distortion::new(vec![0.1, 0.0, 0.0, 0.0]).unwrap();
    // x = 2 / 4 = 0.5, r² = 0.25, radial = 1.025
    let pixel = project_one(DVec3::new(2.0, 0.0, 0.0), &pose, &k, &d).unwrap();
    assert_relative_eq!(pixel.x, 0.5125, epsilon = 1e-12);
    assert_relative_eq!(pixel.y, 0.0, epsilon = 1e-12);
}

#[test]
fn test_tangential_distortion() {
    let (k, pose) = unit_camera();
    let d = Distortion::new(vec![0.0, 0.0, 0.01, 0.0]).unwrap();
    // x = y = 0.5, r² = 0.5
    let pixel = project_one(DVec3::new(2.0, 2.0, 0.0), &pose, &k, &d).unwrap();
    assert_relative_eq!(pixel.x, 0.5 + 2.0 * 0.01 * 0.25, epsilon = 1e-12);
    assert_relative_eq!(pixel.y, 0.5 + 0.01 * (0.5 + 0.5), epsilon = 1e-12);
}

#[test]
fn test_rational_distortion_denominator() {
    let (k, pose) = unit_camera();
    let d = Distortion::new(vec![0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0]).unwrap();
    // radial = 1 / (1 + r²) with r² = 0.25
    let pixel = project_one(DVec3::new(2.0, 0.0, 0.0), &pose, &k, &d).unwrap();
    assert_relative_eq!(pixel.x, 0.5 / 1.25, epsilon = 1e-12);
}

#[test]
fn test_batch_projection_keeps_order() {
    let (k, pose) = unit_camera();
    let points: Vec<DVec3> = (0..100).map(|i| DVec3::new(i as f64, 0.0, 0.0)).collect();
    let pixels = PinholeProjector.project(&points, &pose, &k, &Distortion::none());
    assert_eq!(pixels.len(), 100);
    for (i, pixel) in pixels.iter().enumerate() {
        assert_relative_eq!(pixel.unwrap().x, i as f64 / 4.0, epsilon = 1e-12);
    }
}

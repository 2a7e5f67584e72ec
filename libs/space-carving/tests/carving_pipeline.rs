//! End-to-end carving of a sphere seen by three orthogonal cameras.

use std::f64::consts::FRAC_PI_2;

use glam::DVec3;
use space_carving::{
    BoundaryPolicy, CameraRig, CarveConfig, Distortion, Intrinsics, OccupancyTags, SilhouetteMask,
    SpaceCarver,
};

const MASK_SIZE: usize = 100;
const DISC_RADIUS: f64 = 15.0;

fn disc() -> SilhouetteMask {
    let center = (MASK_SIZE / 2) as f64;
    SilhouetteMask::from_fn(MASK_SIZE, MASK_SIZE, |col, row| {
        let (dx, dy) = (col as f64 - center, row as f64 - center);
        dx * dx + dy * dy <= DISC_RADIUS * DISC_RADIUS
    })
}

/// Cameras on the +z, +x and -y axes, 20 units from the origin.
fn sphere_rig() -> CameraRig {
    CameraRig::from_parts(
        Intrinsics::from_row_major(&[100.0, 0.0, 50.0, 0.0, 100.0, 50.0, 0.0, 0.0, 1.0]).unwrap(),
        Distortion::none(),
        &[
            DVec3::ZERO,
            DVec3::new(0.0, FRAC_PI_2, 0.0),
            DVec3::new(FRAC_PI_2, 0.0, 0.0),
        ],
        &[DVec3::new(0.0, 0.0, 20.0); 3],
        vec![disc(); 3],
    )
    .unwrap()
}

#[test]
fn test_sphere_visual_hull() {
    let carver = SpaceCarver::new(sphere_rig())
        .configure(CarveConfig::default())
        .unwrap();
    let report = carver.carve_report().unwrap();

    assert_eq!(report.initial_count, 1000);
    assert_eq!(report.pass_counts.len(), 3);
    assert_eq!(report.pass_counts.last(), Some(&report.survivors.len()));

    let survivors = &report.survivors;
    assert!(survivors.iter().any(|p| *p == DVec3::splat(0.5)));
    assert!(survivors.iter().all(|p| p.x * p.x + p.y * p.y <= 16.0));
    assert!(survivors.iter().all(|p| p.y * p.y + p.z * p.z <= 16.0));
    assert!(survivors.iter().all(|p| p.x * p.x + p.z * p.z <= 16.0));
}

#[test]
fn test_sphere_surface_and_cubes() {
    let carver = SpaceCarver::new(sphere_rig())
        .configure(CarveConfig::default())
        .unwrap();
    let survivors = carver.carve().unwrap();

    let surface = carver.to_mesh(&survivors).unwrap();
    assert!(surface.validate());
    let (min, max) = surface.bounding_box();
    assert!(min.cmpge(DVec3::splat(-5.0)).all());
    assert!(max.cmple(DVec3::splat(5.0)).all());

    // Normals point away from the hull on average
    let center = survivors.iter().copied().sum::<DVec3>() / survivors.len() as f64;
    let normals = surface.normals().unwrap();
    let outward: f64 = surface
        .vertices()
        .iter()
        .zip(normals)
        .map(|(v, n)| n.dot(*v - center))
        .sum();
    assert!(outward > 0.0);

    let cubes = carver.to_cubes(&survivors).unwrap();
    assert_eq!(cubes.vertex_count(), 8 * survivors.len());
    assert_eq!(cubes.triangle_count(), 12 * survivors.len());
}

#[test]
fn test_finer_grid_keeps_more_points() {
    let coarse = SpaceCarver::new(sphere_rig())
        .configure(CarveConfig::default())
        .unwrap()
        .carve()
        .unwrap();
    let fine = SpaceCarver::new(sphere_rig())
        .configure(CarveConfig::new(0.5, DVec3::ZERO, DVec3::splat(10.0)))
        .unwrap()
        .carve()
        .unwrap();
    assert!(fine.len() > coarse.len());
}

#[test]
fn test_custom_tags_give_same_occupancy() {
    let carver = SpaceCarver::new(sphere_rig())
        .configure(CarveConfig::default())
        .unwrap();
    let survivors = carver.carve().unwrap();

    let default = carver.to_volume(&survivors).unwrap();
    let custom = carver
        .to_volume_with(&survivors, OccupancyTags::new(100, 0).unwrap(), BoundaryPolicy::Clamp)
        .unwrap();
    assert_eq!(default.occupied_count(), custom.occupied_count());
    assert_eq!(custom.tags().iso_level(), 50.0);
}

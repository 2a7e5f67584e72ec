//! Tests for iso-surface extraction.

use std::collections::HashMap;

use approx::assert_relative_eq;
use glam::DVec3;

use super::*;

/// 3x3x3 field of -1 with a single +1 sample in the middle.
fn single_sample_field() -> Grid3<f64> {
    let mut field = Grid3::filled([3, 3, 3], -1.0).unwrap();
    field.set([1, 1, 1], 1.0);
    field
}

#[test]
fn test_rejects_flat_volume() {
    let field = Grid3::filled([1, 4, 4], 1.0).unwrap();
    let result = MarchingTetrahedra.extract(&field, 0.0);
    assert!(matches!(result, Err(MeshError::InvalidVolume { .. })));
}

#[test]
fn test_rejects_non_finite_iso_level() {
    let field = single_sample_field();
    assert!(MarchingTetrahedra.extract(&field, f64::NAN).is_err());
}

#[test]
fn test_uniform_field_has_no_surface() {
    let field = Grid3::filled([4, 4, 4], -1.0).unwrap();
    let surface = MarchingTetrahedra.extract(&field, 0.0).unwrap();
    assert!(surface.is_empty());
    assert!(surface.vertices.is_empty());
}

#[test]
fn test_single_sample_surface_is_closed() {
    let surface = MarchingTetrahedra.extract(&single_sample_field(), 0.0).unwrap();
    assert!(!surface.is_empty());

    let mut edge_uses: HashMap<(u32, u32), usize> = HashMap::new();
    for tri in &surface.triangles {
        for k in 0..3 {
            let (a, b) = (tri[k], tri[(k + 1) % 3]);
            *edge_uses.entry((a.min(b), a.max(b))).or_default() += 1;
        }
    }
    assert!(edge_uses.values().all(|&uses| uses == 2));
}

#[test]
fn test_vertices_are_shared_between_cells() {
    let surface = MarchingTetrahedra.extract(&single_sample_field(), 0.0).unwrap();
    for (i, a) in surface.vertices.iter().enumerate() {
        for b in &surface.vertices[i + 1..] {
            assert!(a.distance(*b) > 1e-9, "duplicate vertex at {:?}", a);
        }
    }
}

#[test]
fn test_single_sample_vertices_sit_halfway() {
    let center = DVec3::splat(1.0);
    let surface = MarchingTetrahedra.extract(&single_sample_field(), 0.0).unwrap();
    for v in &surface.vertices {
        // Every crossing lies on an edge from the center, at t = 0.5
        let offset = *v - center;
        let max = offset.abs().max_element();
        assert_relative_eq!(max, 0.5, epsilon = 1e-12);
    }
}

#[test]
fn test_faces_point_toward_higher_values() {
    let center = DVec3::splat(1.0);
    let surface = MarchingTetrahedra.extract(&single_sample_field(), 0.0).unwrap();
    for tri in &surface.triangles {
        let [a, b, c] = tri.map(|i| surface.vertices[i as usize]);
        let normal = (b - a).cross(c - a);
        let centroid = (a + b + c) / 3.0;
        assert!(normal.dot(centroid - center) < 0.0);
    }
}

#[test]
fn test_normals_point_toward_lower_values() {
    let center = DVec3::splat(1.0);
    let surface = MarchingTetrahedra.extract(&single_sample_field(), 0.0).unwrap();
    for (v, n) in surface.vertices.iter().zip(&surface.normals) {
        assert_relative_eq!(n.length(), 1.0, epsilon = 1e-12);
        assert!(n.dot(*v - center) > 0.0);
    }
}

#[test]
fn test_planar_field() {
    // f(x, y, z) = x - 1.5 crosses zero halfway between x = 1 and x = 2
    let mut field = Grid3::filled([4, 3, 3], 0.0).unwrap();
    for x in 0..4 {
        for y in 0..3 {
            for z in 0..3 {
                field.set([x, y, z], x as f64 - 1.5);
            }
        }
    }

    let surface = MarchingTetrahedra.extract(&field, 0.0).unwrap();
    assert!(!surface.is_empty());
    for (v, n) in surface.vertices.iter().zip(&surface.normals) {
        assert_relative_eq!(v.x, 1.5, epsilon = 1e-12);
        assert!(n.abs_diff_eq(DVec3::NEG_X, 1e-12));
    }
}

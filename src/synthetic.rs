//! Synthetic point clouds for generating test logs and benchmarks.

use std::f32::consts::TAU;

use crate::core::types::{Point3D, PointCloud};

/// A ring of `n_points` at `radius` around the sensor, rotated by `phase`
/// radians.
///
/// Height follows a slow sine so consecutive points are distinguishable.
pub fn ring_cloud(n_points: usize, radius: f32, phase: f32) -> PointCloud {
    (0..n_points)
        .map(|i| {
            let angle = phase + (i as f32 / n_points as f32) * TAU;
            let (sin_a, cos_a) = angle.sin_cos();
            Point3D::new(radius * cos_a, radius * sin_a, 0.1 * (3.0 * angle).sin())
        })
        .collect()
}

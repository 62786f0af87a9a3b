//! Core data types.
//!
//! - [`Point3D`]: 3D point with f32 coordinates
//! - [`PointCloud`]: Ordered collection of points

mod point;

pub use point::{Point3D, PointCloud};

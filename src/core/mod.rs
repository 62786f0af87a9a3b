//! Core foundation layer.
//!
//! This is the bottom layer with no internal dependencies.
//!
//! # Contents
//!
//! - [`types`]: Point and point cloud types
//! - [`clock`]: Time sources for stamping recorded frames

pub mod clock;
pub mod types;

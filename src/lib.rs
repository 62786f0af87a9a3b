//! cloudlog - Binary recording and replay of timestamped 3D point clouds
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                      bin/                           │  ← cloudlog tool
//! └─────────────────────────────────────────────────────┘
//!                          │
//! ┌─────────────────────────────────────────────────────┐
//! │                      io/                            │  ← Recording / replay
//! │        (codec, recorder, player, consumer)          │
//! └─────────────────────────────────────────────────────┘
//!                          │
//! ┌─────────────────────────────────────────────────────┐
//! │                     core/                           │  ← Foundation
//! │                 (types, clock)                      │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! Data flow:
//!
//! ```text
//! capture → CloudRecorder::log (×N) → CloudRecorder::flush → file
//!         → CloudPlayer::load → CloudPlayer::play → CloudConsumer::update (×N)
//! ```
//!
//! Recording and replay are single-threaded and synchronous. The recorder
//! and player share nothing but the file format.

// ============================================================================
// Layer 1: Core foundation (no internal deps)
// ============================================================================
pub mod core;

// ============================================================================
// Layer 2: I/O (depends on core)
// ============================================================================
pub mod io;

// ============================================================================
// Support
// ============================================================================
pub mod config;
pub mod error;
pub mod synthetic;

// ============================================================================
// Convenience re-exports (flat namespace for common use)
// ============================================================================

// Core types
pub use crate::core::clock::{Clock, ManualClock, MonotonicClock};
pub use crate::core::types::{Point3D, PointCloud};

// I/O - Cloud log
pub use io::cloudlog::{
    CloudConsumer, CloudFrame, CloudPlayer, CloudRecorder, CollectingConsumer, DecodeOutcome,
    LogInfo, TruncationPolicy,
};

// Support
pub use config::CloudLogConfig;
pub use error::{CloudLogError, Result};

//! I/O layer.
//!
//! # Contents
//!
//! - [`cloudlog`]: Point-cloud log recording and playback

pub mod cloudlog;

pub use cloudlog::{CloudFrame, CloudPlayer, CloudRecorder, LogInfo};

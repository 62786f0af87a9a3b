//! Core data types for the cloud log format.

use std::path::PathBuf;

use super::codec;
use crate::core::types::{Point3D, PointCloud};

/// Size of the fixed frame prefix (timestamp + point count) in bytes.
pub const FRAME_PREFIX_SIZE: usize = 8;

/// Size of one encoded point (x, y, z as f32) in bytes.
pub const POINT_SIZE: usize = 12;

/// One recorded point cloud.
///
/// `timestamp_ms` is relative to the first frame logged by the recorder
/// that produced the file, so the first frame of a log is always at 0.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CloudFrame {
    /// Milliseconds since the first logged frame
    pub timestamp_ms: u32,
    /// Points in capture order
    pub points: PointCloud,
}

impl CloudFrame {
    /// Create a new frame.
    pub fn new(timestamp_ms: u32, points: PointCloud) -> Self {
        Self {
            timestamp_ms,
            points,
        }
    }

    /// Number of points in this frame.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True for a frame with no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Size of this frame once encoded.
    pub fn encoded_len(&self) -> usize {
        codec::encoded_len(self.points.len())
    }

    /// Bit-exact comparison, treating NaN payloads as equal when their bits match.
    pub fn bit_eq(&self, other: &CloudFrame) -> bool {
        self.timestamp_ms == other.timestamp_ms
            && self.points.len() == other.points.len()
            && self
                .points
                .iter()
                .zip(&other.points)
                .all(|(a, b)| a.to_bits() == b.to_bits())
    }
}

impl From<(u32, Vec<Point3D>)> for CloudFrame {
    fn from((timestamp_ms, points): (u32, Vec<Point3D>)) -> Self {
        Self::new(timestamp_ms, points)
    }
}

/// Summary of a cloud log.
///
/// Returned after flushing a recorder or loading a player.
#[derive(Debug, Clone, PartialEq)]
pub struct LogInfo {
    /// Path to the log file
    pub path: PathBuf,
    /// Number of frames
    pub frame_count: u64,
    /// Total number of points over all frames
    pub point_count: u64,
    /// Timestamp of the last frame minus the first, in milliseconds
    pub duration_ms: u32,
    /// File size in bytes
    pub file_size_bytes: u64,
    /// Bytes of a truncated trailing frame dropped on load (0 for a clean log)
    pub discarded_bytes: u64,
}

impl LogInfo {
    /// Build a summary from a frame sequence.
    pub(crate) fn from_frames(path: PathBuf, frames: &[CloudFrame], file_size_bytes: u64) -> Self {
        Self {
            path,
            frame_count: frames.len() as u64,
            point_count: frames.iter().map(|f| f.points.len() as u64).sum(),
            duration_ms: span_ms(frames),
            file_size_bytes,
            discarded_bytes: 0,
        }
    }

    /// True if the log ended inside a frame that was dropped.
    pub fn is_truncated(&self) -> bool {
        self.discarded_bytes > 0
    }

    /// Recording duration in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.duration_ms as f64 / 1000.0
    }

    /// Average frame rate in Hz.
    pub fn frame_rate_hz(&self) -> f64 {
        if self.duration_ms == 0 {
            0.0
        } else {
            self.frame_count as f64 / self.duration_secs()
        }
    }

    /// Average number of points per frame.
    pub fn mean_points_per_frame(&self) -> f64 {
        if self.frame_count == 0 {
            0.0
        } else {
            self.point_count as f64 / self.frame_count as f64
        }
    }
}

/// Timestamp span between the first and last frame.
pub(crate) fn span_ms(frames: &[CloudFrame]) -> u32 {
    match (frames.first(), frames.last()) {
        (Some(first), Some(last)) => last.timestamp_ms.saturating_sub(first.timestamp_ms),
        _ => 0,
    }
}

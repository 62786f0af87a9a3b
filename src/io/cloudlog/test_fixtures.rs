//! Test fixtures for generating synthetic cloud logs.

use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::TempDir;

use super::recorder::CloudRecorder;
use crate::core::clock::ManualClock;
use crate::core::types::PointCloud;
use crate::synthetic::ring_cloud;

/// Test fixture for cloud log testing.
///
/// Creates temporary log files with synthetic data. The temporary
/// directory is removed when the fixture is dropped.
pub struct LogTestFixture {
    temp_dir: TempDir,
    log_path: PathBuf,
    clouds: Vec<PointCloud>,
}

impl LogTestFixture {
    /// Rotating ring scan at 10 Hz for 2 seconds (20 frames, 64 points each).
    pub fn rotating_ring_2_seconds() -> Self {
        Self::rotating_ring(20, 64, Duration::from_millis(100))
    }

    /// Rotating ring scan with custom frame count, size and period.
    ///
    /// Frame `i` is stamped at exactly `i * period` thanks to a manual clock.
    pub fn rotating_ring(frames: usize, points: usize, period: Duration) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let log_path = temp_dir.path().join("ring.cloudlog");

        let clock = ManualClock::new();
        let mut recorder = CloudRecorder::with_clock(&log_path, clock.clone());
        let mut clouds = Vec::with_capacity(frames);

        for i in 0..frames {
            if i > 0 {
                clock.advance(period);
            }
            let cloud = ring_cloud(points, 2.0, i as f32 * 0.05);
            recorder.log(&cloud);
            clouds.push(cloud);
        }

        recorder.flush().expect("Failed to flush recording");

        Self {
            temp_dir,
            log_path,
            clouds,
        }
    }

    /// Log whose last frame is cut `cut_bytes` before its end.
    pub fn truncated(cut_bytes: usize) -> Self {
        let fixture = Self::rotating_ring(3, 8, Duration::from_millis(50));
        let bytes = std::fs::read(&fixture.log_path).expect("Failed to read log");
        let keep = bytes.len().saturating_sub(cut_bytes);
        std::fs::write(&fixture.log_path, &bytes[..keep]).expect("Failed to truncate log");
        fixture
    }

    /// Path to the log file.
    pub fn path(&self) -> &Path {
        &self.log_path
    }

    /// Clouds in the order they were recorded.
    pub fn clouds(&self) -> &[PointCloud] {
        &self.clouds
    }

    /// Temporary directory holding the log.
    pub fn dir(&self) -> &Path {
        self.temp_dir.path()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::cloudlog::{CloudPlayer, TruncationPolicy};

    #[test]
    fn test_fixture_ring_log() {
        let fixture = LogTestFixture::rotating_ring_2_seconds();
        let player = CloudPlayer::open(fixture.path()).unwrap();

        assert_eq!(player.frame_count(), 20);
        assert_eq!(player.info().duration_ms, 1900);
        assert_eq!(player.info().point_count, 20 * 64);
        for (frame, cloud) in player.frames().iter().zip(fixture.clouds()) {
            assert_eq!(&frame.points, cloud);
        }
    }

    #[test]
    fn test_fixture_truncated() {
        let fixture = LogTestFixture::truncated(5);
        assert!(fixture.dir().exists());

        let player = CloudPlayer::open(fixture.path()).unwrap();
        assert_eq!(player.frame_count(), 2);

        let strict = CloudPlayer::new()
            .with_truncation_policy(TruncationPolicy::Error)
            .load(fixture.path());
        assert!(strict.is_err());
    }
}

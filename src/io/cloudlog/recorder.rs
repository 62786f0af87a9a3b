//! Cloud log recorder for capturing point-cloud frames.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use super::codec;
use super::types::{CloudFrame, LogInfo, span_ms};
use crate::core::clock::{Clock, MonotonicClock};
use crate::core::types::{Point3D, PointCloud};
use crate::error::{CloudLogError, Result};

/// In-memory cloud log recorder.
///
/// Frames are stamped and buffered by [`log`](Self::log) without touching
/// the disk. [`flush`](Self::flush) rewrites the whole target file from the
/// buffer, which is kept so the recorder can go on logging and flush again.
///
/// Calls to `log` must be serialized by the caller; the recorder has no
/// internal locking.
///
/// # Example
///
/// ```no_run
/// use cloudlog::{CloudRecorder, Point3D};
///
/// let mut recorder = CloudRecorder::new("capture.cloudlog");
/// recorder.log(&[Point3D::new(1.0, 0.0, 0.5)]);
/// recorder.log(&[Point3D::new(1.1, 0.0, 0.5), Point3D::new(0.0, 2.0, 0.1)]);
///
/// let info = recorder.flush()?;
/// println!("Recorded {} frames", info.frame_count);
/// # Ok::<(), cloudlog::CloudLogError>(())
/// ```
pub struct CloudRecorder<C: Clock = MonotonicClock> {
    path: PathBuf,
    clock: C,
    start: Option<Instant>,
    frames: Vec<CloudFrame>,
}

impl CloudRecorder<MonotonicClock> {
    /// Create a recorder that will write to `path` on flush.
    ///
    /// No file is created until [`flush`](Self::flush).
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self::with_clock(path, MonotonicClock)
    }
}

impl<C: Clock> CloudRecorder<C> {
    /// Create a recorder stamping frames with `clock`.
    pub fn with_clock(path: impl AsRef<Path>, clock: C) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            clock,
            start: None,
            frames: Vec::new(),
        }
    }

    /// Record a copy of `points` as a new frame.
    ///
    /// Returns the frame timestamp in milliseconds since the first logged
    /// frame. The source slice is copied, so it may be reused afterwards.
    pub fn log(&mut self, points: &[Point3D]) -> u32 {
        self.log_owned(points.to_vec())
    }

    /// Record `points` as a new frame, taking ownership.
    pub fn log_owned(&mut self, points: PointCloud) -> u32 {
        let timestamp_ms = self.elapsed_ms();
        self.frames.push(CloudFrame::new(timestamp_ms, points));
        timestamp_ms
    }

    /// Milliseconds since the first frame, starting the reference on first use.
    fn elapsed_ms(&mut self) -> u32 {
        let now = self.clock.now();
        let start = *self.start.get_or_insert(now);
        let millis = now.saturating_duration_since(start).as_millis();

        match u32::try_from(millis) {
            Ok(ms) => ms,
            Err(_) => {
                log::warn!(
                    "Recording exceeded {} ms, clamping timestamp of frame {}",
                    u32::MAX,
                    self.frames.len()
                );
                u32::MAX
            }
        }
    }

    /// Write every buffered frame to the target file.
    ///
    /// The file is created or truncated on each call. On error the buffer is
    /// untouched and the file contents are undefined.
    pub fn flush(&self) -> Result<LogInfo> {
        let file = File::create(&self.path).map_err(|source| CloudLogError::Open {
            path: self.path.clone(),
            source,
        })?;
        let mut writer = BufWriter::new(file);

        let mut bytes_written = 0u64;
        for frame in &self.frames {
            codec::write_frame(&mut writer, frame)?;
            bytes_written += frame.encoded_len() as u64;
        }

        writer.flush()?;

        log::info!(
            "Flushed {} frames ({} bytes) to {}",
            self.frames.len(),
            bytes_written,
            self.path.display()
        );

        Ok(LogInfo::from_frames(
            self.path.clone(),
            &self.frames,
            bytes_written,
        ))
    }

    /// Target file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Buffered frames in logging order.
    pub fn frames(&self) -> &[CloudFrame] {
        &self.frames
    }

    /// Number of buffered frames.
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Total number of buffered points.
    pub fn point_count(&self) -> u64 {
        self.frames.iter().map(|f| f.points.len() as u64).sum()
    }

    /// Timestamp of the latest frame in milliseconds.
    pub fn duration_ms(&self) -> u32 {
        span_ms(&self.frames)
    }

    /// True before the first `log` call.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::ManualClock;
    use std::fs;
    use std::time::Duration;
    use tempfile::TempDir;

    #[test]
    fn test_recorder_empty_flush_writes_zero_bytes() {
        let temp_dir = TempDir::new().unwrap();
        let log_path = temp_dir.path().join("empty.cloudlog");

        let recorder = CloudRecorder::new(&log_path);
        assert!(recorder.is_empty());
        assert!(!log_path.exists());

        let info = recorder.flush().unwrap();

        assert_eq!(info.frame_count, 0);
        assert_eq!(info.file_size_bytes, 0);
        assert_eq!(fs::metadata(&log_path).unwrap().len(), 0);
    }

    #[test]
    fn test_recorder_first_frame_is_zero() {
        let clock = ManualClock::new();
        clock.advance(Duration::from_secs(100));

        let mut recorder = CloudRecorder::with_clock("unused.cloudlog", clock.clone());
        assert_eq!(recorder.log(&[Point3D::default()]), 0);
    }

    #[test]
    fn test_recorder_timestamps_follow_clock() {
        let clock = ManualClock::new();
        let mut recorder = CloudRecorder::with_clock("unused.cloudlog", clock.clone());

        recorder.log(&[]);
        clock.advance(Duration::from_millis(50));
        recorder.log(&[Point3D::new(1.0, 1.0, 1.0)]);
        clock.advance(Duration::from_micros(33_900));
        recorder.log(&[]);

        let stamps: Vec<u32> = recorder.frames().iter().map(|f| f.timestamp_ms).collect();
        assert_eq!(stamps, vec![0, 50, 83]);
        assert_eq!(recorder.duration_ms(), 83);
        assert_eq!(recorder.point_count(), 1);
    }

    #[test]
    fn test_recorder_copies_source_points() {
        let mut source = vec![Point3D::new(1.0, 2.0, 3.0)];
        let mut recorder = CloudRecorder::with_clock("unused.cloudlog", ManualClock::new());

        recorder.log(&source);
        source[0].x = 99.0;
        source.push(Point3D::default());

        assert_eq!(recorder.frames()[0].points, vec![Point3D::new(1.0, 2.0, 3.0)]);
    }

    #[test]
    fn test_recorder_flush_layout() {
        let temp_dir = TempDir::new().unwrap();
        let log_path = temp_dir.path().join("layout.cloudlog");
        let clock = ManualClock::new();

        let mut recorder = CloudRecorder::with_clock(&log_path, clock.clone());
        recorder.log(&[]);
        clock.advance(Duration::from_millis(20));
        recorder.log(&[Point3D::new(1.0, 2.0, 3.0), Point3D::new(4.0, 5.0, 6.0)]);

        let info = recorder.flush().unwrap();
        let bytes = fs::read(&log_path).unwrap();

        assert_eq!(bytes.len(), 8 + (8 + 24));
        assert_eq!(info.file_size_bytes, bytes.len() as u64);
        assert_eq!(info.frame_count, 2);
        assert_eq!(info.point_count, 2);
        assert_eq!(info.duration_ms, 20);
        assert_eq!(&bytes[8..12], &20u32.to_le_bytes());
        assert_eq!(&bytes[12..16], &2u32.to_le_bytes());
    }

    #[test]
    fn test_recorder_reflush_rewrites_identical_bytes() {
        let temp_dir = TempDir::new().unwrap();
        let log_path = temp_dir.path().join("twice.cloudlog");

        let mut recorder = CloudRecorder::with_clock(&log_path, ManualClock::new());
        recorder.log(&[Point3D::new(0.5, 0.5, 0.5)]);

        recorder.flush().unwrap();
        let first = fs::read(&log_path).unwrap();
        recorder.flush().unwrap();
        let second = fs::read(&log_path).unwrap();

        assert_eq!(first, second);
        assert_eq!(recorder.frame_count(), 1);
    }

    #[test]
    fn test_recorder_flush_after_more_logging() {
        let temp_dir = TempDir::new().unwrap();
        let log_path = temp_dir.path().join("grow.cloudlog");

        let mut recorder = CloudRecorder::with_clock(&log_path, ManualClock::new());
        recorder.log(&[Point3D::default()]);
        recorder.flush().unwrap();
        recorder.log(&[]);
        let info = recorder.flush().unwrap();

        assert_eq!(info.frame_count, 2);
        assert_eq!(fs::metadata(&log_path).unwrap().len(), 20 + 8);
    }

    #[test]
    fn test_recorder_flush_open_failure_keeps_buffer() {
        let temp_dir = TempDir::new().unwrap();
        let log_path = temp_dir.path().join("missing_dir").join("x.cloudlog");

        let mut recorder = CloudRecorder::with_clock(&log_path, ManualClock::new());
        recorder.log(&[Point3D::default()]);

        let err = recorder.flush().unwrap_err();
        assert!(err.is_open_failure());
        assert_eq!(recorder.frame_count(), 1);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_recorder_flush_write_failure_is_io_error() {
        let device = Path::new("/dev/full");
        if !device.exists() {
            return;
        }

        let mut recorder = CloudRecorder::with_clock(device, ManualClock::new());
        recorder.log(&[Point3D::new(1.0, 2.0, 3.0)]);

        let err = recorder.flush().unwrap_err();
        assert!(matches!(err, CloudLogError::Io(_)), "{:?}", err);
        assert!(!err.is_open_failure());
        assert_eq!(recorder.frame_count(), 1);
    }
}

//! Cloud log player for replaying recorded point clouds.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use serde::Deserialize;

use super::codec::{self, DecodeOutcome};
use super::consumer::CloudConsumer;
use super::types::{CloudFrame, LogInfo};
use crate::error::{CloudLogError, Result};

/// What `load` does when the file ends inside a frame.
///
/// A crash during flush leaves exactly this kind of tail, so a truncated
/// frame is either tolerated silently or treated as corruption.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TruncationPolicy {
    /// Drop the partial frame with a warning and keep the complete ones.
    #[default]
    Discard,
    /// Fail the load with [`CloudLogError::TruncatedFrame`].
    Error,
}

/// In-memory cloud log player.
///
/// [`load`](Self::load) reads a whole file into memory;
/// [`play`](Self::play) hands every frame to a consumer in file order,
/// stamped as `origin + timestamp_ms`. Playback does not sleep: timestamps
/// are advisory and pacing is up to the caller, or to
/// [`play_paced`](Self::play_paced).
///
/// # Example
///
/// ```no_run
/// use cloudlog::{CloudPlayer, Point3D};
/// use std::time::Instant;
///
/// let player = CloudPlayer::open("capture.cloudlog")?;
/// let mut count = 0;
/// player.play(&mut |stamp: Instant, cloud: &[Point3D]| {
///     count += 1;
///     println!("{:?}: {} points", stamp, cloud.len());
/// });
/// # Ok::<(), cloudlog::CloudLogError>(())
/// ```
#[derive(Debug, Clone)]
pub struct CloudPlayer {
    origin: Instant,
    truncation: TruncationPolicy,
    path: Option<PathBuf>,
    file_size_bytes: u64,
    discarded_bytes: u64,
    frames: Vec<CloudFrame>,
}

impl CloudPlayer {
    /// Create an empty player whose time origin is now.
    pub fn new() -> Self {
        Self::with_origin(Instant::now())
    }

    /// Create an empty player replaying relative to `origin`.
    pub fn with_origin(origin: Instant) -> Self {
        Self {
            origin,
            truncation: TruncationPolicy::default(),
            path: None,
            file_size_bytes: 0,
            discarded_bytes: 0,
            frames: Vec::new(),
        }
    }

    /// Create a player and load `path` into it.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let mut player = Self::new();
        player.load(path)?;
        Ok(player)
    }

    /// Set how truncated trailing frames are handled.
    pub fn with_truncation_policy(mut self, policy: TruncationPolicy) -> Self {
        self.truncation = policy;
        self
    }

    /// Read every frame from `path`, replacing the current buffer.
    ///
    /// On any error the buffer is left as it was.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<LogInfo> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path).map_err(|source| CloudLogError::Open {
            path: path.clone(),
            source,
        })?;
        let mut reader = BufReader::new(file);

        let mut frames = Vec::new();
        let mut bytes_read = 0u64;
        let mut discarded = 0u64;
        loop {
            match codec::read_frame(&mut reader)? {
                DecodeOutcome::Frame(frame) => {
                    bytes_read += frame.encoded_len() as u64;
                    frames.push(frame);
                }
                DecodeOutcome::EndOfLog => break,
                DecodeOutcome::Truncated { bytes_read: partial } => match self.truncation {
                    TruncationPolicy::Discard => {
                        log::warn!(
                            "Discarding truncated frame {} in {} ({} trailing bytes)",
                            frames.len(),
                            path.display(),
                            partial
                        );
                        discarded = partial as u64;
                        break;
                    }
                    TruncationPolicy::Error => {
                        return Err(CloudLogError::TruncatedFrame {
                            path,
                            frame_index: frames.len(),
                            bytes_read: partial,
                        });
                    }
                },
            }
        }

        log::info!(
            "Loaded {} frames ({} bytes) from {}",
            frames.len(),
            bytes_read + discarded,
            path.display()
        );

        self.frames = frames;
        self.file_size_bytes = bytes_read + discarded;
        self.discarded_bytes = discarded;
        self.path = Some(path);
        Ok(self.info())
    }

    /// Deliver every frame to `consumer` in file order, without pacing.
    pub fn play<C: CloudConsumer + ?Sized>(&self, consumer: &mut C) {
        for frame in &self.frames {
            consumer.update(self.stamp_of(frame), &frame.points);
        }
    }

    /// Deliver every frame with real-time pacing.
    ///
    /// - `speed <= 0.0` or not finite: no pacing, same as [`play`](Self::play)
    /// - `1.0`: original timing
    /// - `2.0`: twice as fast
    ///
    /// Stamps passed to the consumer are the recorded ones regardless of
    /// speed. Timing is relative to the first frame. A frame whose wait does
    /// not fit in a [`Duration`] is delivered without waiting.
    pub fn play_paced<C: CloudConsumer + ?Sized>(&self, consumer: &mut C, speed: f32) {
        if !speed.is_finite() || speed <= 0.0 {
            self.play(consumer);
            return;
        }

        let Some(first) = self.frames.first() else {
            return;
        };
        let playback_start = Instant::now();

        for frame in &self.frames {
            let offset_ms = frame.timestamp_ms.saturating_sub(first.timestamp_ms);
            match Duration::try_from_secs_f64(offset_ms as f64 / 1000.0 / speed as f64) {
                Ok(target_elapsed) => {
                    let elapsed_real = playback_start.elapsed();
                    if target_elapsed > elapsed_real {
                        std::thread::sleep(target_elapsed - elapsed_real);
                    }
                }
                Err(_) => {
                    log::warn!(
                        "Frame at {} ms is out of reach at speed {}, delivering now",
                        frame.timestamp_ms,
                        speed
                    );
                }
            }
            consumer.update(self.stamp_of(frame), &frame.points);
        }
    }

    /// Replay instant of a frame.
    #[inline]
    pub fn stamp_of(&self, frame: &CloudFrame) -> Instant {
        self.origin + Duration::from_millis(frame.timestamp_ms as u64)
    }

    /// Time origin frames are replayed relative to.
    pub fn origin(&self) -> Instant {
        self.origin
    }

    /// Loaded frames in file order.
    pub fn frames(&self) -> &[CloudFrame] {
        &self.frames
    }

    /// Number of loaded frames.
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// True when nothing has been loaded, or the log was empty.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Truncation handling in effect.
    pub fn truncation_policy(&self) -> TruncationPolicy {
        self.truncation
    }

    /// Bytes of a truncated trailing frame dropped by the last load.
    pub fn discarded_bytes(&self) -> u64 {
        self.discarded_bytes
    }

    /// Summary of the loaded log.
    pub fn info(&self) -> LogInfo {
        let mut info = LogInfo::from_frames(
            self.path.clone().unwrap_or_default(),
            &self.frames,
            self.file_size_bytes,
        );
        info.discarded_bytes = self.discarded_bytes;
        info
    }
}

impl Default for CloudPlayer {
    fn default() -> Self {
        Self::new()
    }
}

//! Point-cloud log recording and playback.
//!
//! A capture pipeline records frames with [`CloudRecorder`] and later
//! replays the same sequence into a [`CloudConsumer`] with [`CloudPlayer`].
//!
//! # File Format
//!
//! No header, footer or version tag; frames are concatenated and the end
//! of the file is the end of the log:
//!
//! ```text
//! ┌──────────────────────────────────────────────────┐
//! │ Frame 0                                          │
//! │ - Timestamp: u32 (ms since first frame)          │
//! │ - Point count: u32                               │
//! │ - Points: count × (x: f32, y: f32, z: f32)       │
//! ├──────────────────────────────────────────────────┤
//! │ Frame 1 ...                                      │
//! └──────────────────────────────────────────────────┘
//! ```
//!
//! All fields are little-endian.
//!
//! # Example: Recording
//!
//! ```no_run
//! use cloudlog::{CloudRecorder, Point3D};
//!
//! let mut recorder = CloudRecorder::new("capture.cloudlog");
//! for _ in 0..10 {
//!     let cloud = vec![Point3D::new(0.0, 0.0, 1.0)];
//!     recorder.log(&cloud);
//! }
//! let info = recorder.flush()?;
//! println!("Recorded {} frames in {:.1}s", info.frame_count, info.duration_secs());
//! # Ok::<(), cloudlog::CloudLogError>(())
//! ```
//!
//! # Example: Playback
//!
//! ```no_run
//! use cloudlog::{CloudPlayer, CollectingConsumer};
//!
//! let player = CloudPlayer::open("capture.cloudlog")?;
//! let mut consumer = CollectingConsumer::new();
//!
//! // As fast as possible
//! player.play(&mut consumer);
//!
//! // Or in real time
//! player.play_paced(&mut consumer, 1.0);
//! # Ok::<(), cloudlog::CloudLogError>(())
//! ```

pub mod codec;
mod consumer;
mod player;
mod recorder;
mod types;

pub use codec::DecodeOutcome;
pub use consumer::{CloudConsumer, CollectingConsumer};
pub use player::{CloudPlayer, TruncationPolicy};
pub use recorder::CloudRecorder;
pub use types::{CloudFrame, FRAME_PREFIX_SIZE, LogInfo, POINT_SIZE};

#[cfg(test)]
mod test_fixtures;

#[cfg(test)]
pub use test_fixtures::LogTestFixture;

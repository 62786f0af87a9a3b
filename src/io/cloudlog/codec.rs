//! Frame encoding and decoding.
//!
//! ```text
//! ┌──────────────────┬──────────────────┬─────────────────────────────┐
//! │ timestamp_ms u32 │ count u32        │ count × (x f32, y f32, z f32)│
//! └──────────────────┴──────────────────┴─────────────────────────────┘
//! ```
//!
//! All fields are little-endian with no padding. Frames follow each other
//! directly; end of stream is end of log.

use std::io::{ErrorKind, Read, Write};

use super::types::{CloudFrame, FRAME_PREFIX_SIZE, POINT_SIZE};
use crate::core::types::Point3D;
use crate::error::{CloudLogError, Result};

/// Upper bound on points reserved up front for a single frame.
///
/// A corrupt count must not turn into a multi-gigabyte allocation before
/// the stream proves it actually holds that many points.
const MAX_PREALLOC_POINTS: usize = 1 << 16;

/// Result of decoding one frame from a stream.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodeOutcome {
    /// A complete frame.
    Frame(CloudFrame),
    /// The stream ended cleanly on a frame boundary.
    EndOfLog,
    /// The stream ended inside a frame; the partial frame is discarded.
    Truncated {
        /// Bytes of the partial frame that were available
        bytes_read: usize,
    },
}

impl DecodeOutcome {
    /// Get the frame if decoding produced one.
    pub fn into_frame(self) -> Option<CloudFrame> {
        match self {
            DecodeOutcome::Frame(frame) => Some(frame),
            _ => None,
        }
    }

    /// Check if this is a truncated frame.
    pub fn is_truncated(&self) -> bool {
        matches!(self, DecodeOutcome::Truncated { .. })
    }
}

/// Size of a frame with `point_count` points once encoded.
///
/// Every size computation in the crate goes through here.
#[inline]
pub fn encoded_len(point_count: usize) -> usize {
    FRAME_PREFIX_SIZE + POINT_SIZE * point_count
}

/// Write one frame to `writer`.
pub fn write_frame<W: Write>(writer: &mut W, frame: &CloudFrame) -> Result<()> {
    let count = u32::try_from(frame.points.len())
        .map_err(|_| CloudLogError::PointCountOverflow(frame.points.len()))?;

    writer.write_all(&frame.timestamp_ms.to_le_bytes())?;
    writer.write_all(&count.to_le_bytes())?;

    let mut buf = [0u8; POINT_SIZE];
    for point in &frame.points {
        buf[0..4].copy_from_slice(&point.x.to_le_bytes());
        buf[4..8].copy_from_slice(&point.y.to_le_bytes());
        buf[8..12].copy_from_slice(&point.z.to_le_bytes());
        writer.write_all(&buf)?;
    }

    Ok(())
}

/// Encode one frame into a new byte vector.
pub fn encode_frame(frame: &CloudFrame) -> Result<Vec<u8>> {
    let mut bytes = Vec::with_capacity(frame.encoded_len());
    write_frame(&mut bytes, frame)?;
    Ok(bytes)
}

/// Read one frame from `reader`.
///
/// I/O errors other than running out of data are returned as errors.
pub fn read_frame<R: Read>(reader: &mut R) -> Result<DecodeOutcome> {
    let mut word = [0u8; 4];

    let n = read_full(reader, &mut word)?;
    if n == 0 {
        return Ok(DecodeOutcome::EndOfLog);
    }
    if n < word.len() {
        return Ok(DecodeOutcome::Truncated { bytes_read: n });
    }
    let timestamp_ms = u32::from_le_bytes(word);

    let n = read_full(reader, &mut word)?;
    if n < word.len() {
        return Ok(DecodeOutcome::Truncated { bytes_read: 4 + n });
    }
    let count = u32::from_le_bytes(word) as usize;

    let mut points = Vec::with_capacity(count.min(MAX_PREALLOC_POINTS));
    let mut buf = [0u8; POINT_SIZE];
    for i in 0..count {
        let n = read_full(reader, &mut buf)?;
        if n < POINT_SIZE {
            return Ok(DecodeOutcome::Truncated {
                bytes_read: encoded_len(i) + n,
            });
        }
        points.push(Point3D::new(
            f32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]),
            f32::from_le_bytes([buf[4], buf[5], buf[6], buf[7]]),
            f32::from_le_bytes([buf[8], buf[9], buf[10], buf[11]]),
        ));
    }

    Ok(DecodeOutcome::Frame(CloudFrame::new(timestamp_ms, points)))
}

/// Decode every frame in `bytes`.
///
/// Returns the complete frames and the outcome that stopped decoding
/// (`EndOfLog` or `Truncated`).
pub fn decode_all(mut bytes: &[u8]) -> Result<(Vec<CloudFrame>, DecodeOutcome)> {
    let mut frames = Vec::new();
    loop {
        match read_frame(&mut bytes)? {
            DecodeOutcome::Frame(frame) => frames.push(frame),
            end => return Ok((frames, end)),
        }
    }
}

/// Fill `buf` as far as the stream allows.
///
/// Returns the number of bytes read; less than `buf.len()` means the
/// stream ended.
fn read_full<R: Read>(reader: &mut R, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

//! Error types for cloud log recording and playback.

use std::path::PathBuf;

use thiserror::Error;

/// Cloud log error type
#[derive(Error, Debug)]
pub enum CloudLogError {
    #[error("Cannot open log file {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Truncated frame {frame_index} in {path:?} ({bytes_read} bytes of partial frame)")]
    TruncatedFrame {
        path: PathBuf,
        frame_index: usize,
        bytes_read: usize,
    },

    #[error("Frame has {0} points, more than a u32 count can hold")]
    PointCountOverflow(usize),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl CloudLogError {
    /// True when the log file itself could not be opened or created.
    pub fn is_open_failure(&self) -> bool {
        matches!(self, CloudLogError::Open { .. })
    }
}

impl From<basic_toml::Error> for CloudLogError {
    fn from(e: basic_toml::Error) -> Self {
        CloudLogError::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CloudLogError>;

//! Error types for voxelization and grid-file I/O.

use memkmc_core::ConfigError;
use std::error::Error;
use std::fmt;
use std::io;

/// Errors from building, writing or reading a label grid.
#[derive(Debug)]
pub enum VoxelError {
    /// Invalid input parameters (spacing, box, empty mapping).
    Config(ConfigError),
    /// An I/O error occurred while reading or writing.
    Io(io::Error),
    /// A text input could not be parsed.
    Parse {
        /// 1-based line number of the offending line.
        line: usize,
        /// What went wrong.
        detail: String,
    },
}

impl VoxelError {
    pub(crate) fn parse(line: usize, detail: impl Into<String>) -> Self {
        Self::Parse {
            line,
            detail: detail.into(),
        }
    }
}

impl fmt::Display for VoxelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "configuration: {e}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Parse { line, detail } => write!(f, "line {line}: {detail}"),
        }
    }
}

impl Error for VoxelError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Io(e) => Some(e),
            Self::Parse { .. } => None,
        }
    }
}

impl From<io::Error> for VoxelError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<ConfigError> for VoxelError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

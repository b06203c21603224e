//! Error types for structure readers.

use memkmc_core::ConfigError;
use std::fmt;
use std::io;

/// Errors that can occur while reading a LAMMPS structure.
#[derive(Debug)]
pub enum StructureError {
    /// An I/O error occurred while reading.
    Io(io::Error),
    /// The box bounds do not describe a valid cell.
    Config(ConfigError),
    /// A line could not be parsed.
    Parse {
        /// 1-based line number.
        line: usize,
        /// Human-readable description of what went wrong.
        detail: String,
    },
    /// A required header entry is absent.
    MissingHeader {
        /// Header keyword, e.g. `"atoms"` or `"xlo xhi"`.
        field: &'static str,
    },
    /// A required section is absent.
    MissingSection {
        /// Section title.
        name: &'static str,
    },
    /// The number of atom lines differs from the declared count.
    AtomCountMismatch {
        /// Count declared in the header.
        expected: usize,
        /// Atom lines actually found.
        found: usize,
    },
    /// A trajectory `ITEM: ATOMS` line lacks a required column.
    MissingColumn {
        /// Column name.
        name: &'static str,
        /// 1-based line number of the `ITEM: ATOMS` line.
        line: usize,
    },
    /// The trajectory contains no frames.
    NoFrames,
    /// The requested frame index is past the end of the trajectory.
    FrameOutOfRange {
        /// Requested 0-based index.
        requested: usize,
        /// Frames present.
        available: usize,
    },
}

impl StructureError {
    pub(crate) fn parse(line: usize, detail: impl Into<String>) -> Self {
        Self::Parse {
            line,
            detail: detail.into(),
        }
    }
}

impl fmt::Display for StructureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Config(e) => write!(f, "invalid box: {e}"),
            Self::Parse { line, detail } => write!(f, "line {line}: {detail}"),
            Self::MissingHeader { field } => {
                write!(f, "could not parse header: missing '{field}'")
            }
            Self::MissingSection { name } => write!(f, "no '{name}' section found"),
            Self::AtomCountMismatch { expected, found } => {
                write!(f, "expected {expected} atom lines, found {found}")
            }
            Self::MissingColumn { name, line } => {
                write!(f, "line {line}: ITEM: ATOMS has no '{name}' column")
            }
            Self::NoFrames => write!(f, "no frames found in trajectory"),
            Self::FrameOutOfRange {
                requested,
                available,
            } => write!(
                f,
                "frame {requested} requested but trajectory has {available} frames"
            ),
        }
    }
}

impl std::error::Error for StructureError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for StructureError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<ConfigError> for StructureError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

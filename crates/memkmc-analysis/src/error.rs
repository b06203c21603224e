//! Error types for post-run analysis.

use memkmc_core::ConfigError;
use std::error::Error;
use std::fmt;
use std::io;

/// Errors from reading or analysing kMC output series.
#[derive(Debug)]
pub enum AnalysisError {
    /// Invalid averaging parameters.
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
    /// The input had a header but no usable data rows.
    NoData,
    /// The first row has no TMA, so the degradation fraction is undefined.
    ZeroInitialTma,
    /// The first row has no TMA and no polymer, so VWU is undefined.
    ZeroInitialSites,
    /// No curve had enough points to be averaged.
    NoCurves {
        /// Curves that were offered.
        offered: usize,
    },
}

impl AnalysisError {
    pub(crate) fn parse(line: usize, detail: impl Into<String>) -> Self {
        Self::Parse {
            line,
            detail: detail.into(),
        }
    }
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "configuration: {e}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Parse { line, detail } => write!(f, "line {line}: {detail}"),
            Self::NoData => write!(f, "no data lines found"),
            Self::ZeroInitialTma => {
                write!(f, "initial TMA count is zero; degradation fraction is undefined")
            }
            Self::ZeroInitialSites => {
                write!(f, "initial TMA + POL count is zero; VWU is undefined")
            }
            Self::NoCurves { offered } => {
                write!(f, "none of {offered} curves has enough points to average")
            }
        }
    }
}

impl Error for AnalysisError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for AnalysisError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<ConfigError> for AnalysisError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

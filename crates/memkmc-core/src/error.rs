//! Configuration errors shared by every memkmc stage.
//!
//! These are detected before any computation starts and always name the
//! offending parameter. None of them is recoverable without the caller
//! correcting its input.

use std::error::Error;
use std::fmt;

/// Invalid input parameters for a preparation job.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// A grid or lattice extent is zero or negative.
    NonPositiveDimension {
        /// Axis name (`"nx"`, `"ny"` or `"nz"`).
        axis: &'static str,
        /// The rejected value.
        value: i64,
    },
    /// A simulation box edge is zero, negative or not finite.
    InvalidBoxLength {
        /// Axis name (`"x"`, `"y"` or `"z"`).
        axis: &'static str,
        /// The rejected length.
        value: f64,
    },
    /// A box origin component is not finite.
    InvalidBoxOrigin {
        /// Axis name.
        axis: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// Voxel spacing is zero, negative or not finite.
    InvalidSpacing {
        /// The rejected spacing.
        value: f64,
    },
    /// The type-to-class mapping has no entries.
    EmptyTypeMap,
    /// The structure contains no particles.
    NoParticles,
    /// The extent product exceeds the supported cell count.
    TooManyCells {
        /// `nx * ny * nz` as requested.
        requested: u128,
        /// Largest accepted product.
        limit: u128,
    },
    /// A named parameter failed validation.
    InvalidParameter {
        /// Parameter name as the user sees it.
        name: &'static str,
        /// What is wrong with it.
        reason: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveDimension { axis, value } => {
                write!(f, "{axis} must be positive, got {value}")
            }
            Self::InvalidBoxLength { axis, value } => {
                write!(f, "box length along {axis} must be finite and > 0, got {value}")
            }
            Self::InvalidBoxOrigin { axis, value } => {
                write!(f, "box origin along {axis} must be finite, got {value}")
            }
            Self::InvalidSpacing { value } => {
                write!(f, "voxel spacing must be finite and > 0, got {value}")
            }
            Self::EmptyTypeMap => write!(f, "type-to-class mapping is empty"),
            Self::NoParticles => write!(f, "structure contains zero particles"),
            Self::TooManyCells { requested, limit } => {
                write!(f, "{requested} cells exceed the maximum of {limit}")
            }
            Self::InvalidParameter { name, reason } => write!(f, "{name}: {reason}"),
        }
    }
}

impl Error for ConfigError {}

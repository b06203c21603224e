//! LAMMPS structure readers.
//!
//! - [`read_data`]: data files written by `write_data`, in `atomic`,
//!   `charge`, `full` or any other atom style.
//! - [`read_trajectory`]: one frame of a text dump, selected by
//!   [`FrameSelect`].
//!
//! Both return a [`Structure`] holding the cell and the atoms.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod data;
pub mod error;
pub mod structure;
pub mod trajectory;

use std::fmt;
use std::path::Path;
use std::str::FromStr;

pub use data::{load_data, read_data};
pub use error::StructureError;
pub use structure::{AtomStyle, Structure};
pub use trajectory::{
    load_trajectory, read_trajectory, Frame, FrameIter, FrameSelect, TrajectoryReader,
};

/// Structure file formats.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StructureFormat {
    /// LAMMPS data file.
    #[default]
    Data,
    /// LAMMPS text trajectory.
    Lammpstrj,
}

impl FromStr for StructureFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "data" => Ok(Self::Data),
            "lammpstrj" => Ok(Self::Lammpstrj),
            other => Err(format!("unknown structure format '{other}'")),
        }
    }
}

impl fmt::Display for StructureFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Data => write!(f, "data"),
            Self::Lammpstrj => write!(f, "lammpstrj"),
        }
    }
}

/// Load a structure from `path`.
///
/// `frame` only applies to trajectories.
pub fn load_structure<P: AsRef<Path>>(
    path: P,
    format: StructureFormat,
    frame: FrameSelect,
) -> Result<Structure, StructureError> {
    match format {
        StructureFormat::Data => load_data(path),
        StructureFormat::Lammpstrj => load_trajectory(path, frame).map(|f| f.structure),
    }
}

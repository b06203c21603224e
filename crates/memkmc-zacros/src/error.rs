//! Error types for Zacros input generation.

use memkmc_core::ConfigError;
use memkmc_lattice::LatticeError;
use memkmc_voxel::VoxelError;
use std::error::Error;
use std::fmt;
use std::io;

/// Errors from writing Zacros inputs or preparing run directories.
#[derive(Debug)]
pub enum ZacrosError {
    /// Invalid parameters.
    Config(ConfigError),
    /// The grid file could not be read.
    Grid(VoxelError),
    /// The label-to-species mapping file could not be parsed.
    Mapping(VoxelError),
    /// Grid rows do not enumerate the inferred lattice once, in canonical
    /// order, so row numbers are not lattice site IDs.
    NonCanonicalGrid {
        /// Extents inferred from the largest coordinates.
        dims: [u32; 3],
        /// Number of data rows in the grid file.
        rows: usize,
    },
    /// The lattice could not be built.
    Lattice(LatticeError),
    /// An I/O error occurred while writing.
    Io(io::Error),
}

impl fmt::Display for ZacrosError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "configuration: {e}"),
            Self::Grid(e) => write!(f, "grid input: {e}"),
            Self::Mapping(e) => write!(f, "label-to-species mapping: {e}"),
            Self::NonCanonicalGrid { dims: [nx, ny, nz], rows } => write!(
                f,
                "grid rows do not list the {nx}x{ny}x{nz} lattice in iz/iy/ix order ({rows} rows)"
            ),
            Self::Lattice(e) => write!(f, "lattice: {e}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl Error for ZacrosError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Grid(e) | Self::Mapping(e) => Some(e),
            Self::NonCanonicalGrid { .. } => None,
            Self::Lattice(e) => Some(e),
            Self::Io(e) => Some(e),
        }
    }
}

impl From<ConfigError> for ZacrosError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<VoxelError> for ZacrosError {
    fn from(e: VoxelError) -> Self {
        Self::Grid(e)
    }
}

impl From<LatticeError> for ZacrosError {
    fn from(e: LatticeError) -> Self {
        Self::Lattice(e)
    }
}

impl From<io::Error> for ZacrosError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

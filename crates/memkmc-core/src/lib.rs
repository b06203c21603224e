//! Core types for memkmc.
//!
//! This is the leaf crate of the workspace. It defines the simulation
//! cell ([`SpatialBox`]), particles, the grid/lattice indexing convention
//! ([`GridDims`]), configuration errors and the scoped file-output helper
//! shared by every emitter.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod geometry;
pub mod index;
pub mod output;

pub use error::ConfigError;
pub use geometry::{Particle, SpatialBox, AXIS_NAMES};
pub use index::GridDims;
pub use output::write_file;

//! Periodic simple-cubic lattice topology for Zacros.
//!
//! [`CubicLattice`] numbers the sites of an `nx * ny * nz` lattice with the
//! same convention as voxel grids and builds a validated
//! [`LatticeTopology`] in which every site has exactly six distinct
//! neighbours under full periodic boundaries. [`write_lattice`] emits the
//! topology as a Zacros `lattice explicit` block.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod cubic;
pub mod emit;
pub mod error;

#[cfg(test)]
pub(crate) mod compliance;

pub use cubic::{
    CubicLattice, LatticeSite, LatticeTopology, COORDINATION, DEFAULT_SITE_TYPE,
};
pub use emit::{write_lattice, write_lattice_file};
pub use error::LatticeError;

//! memkmc: membrane voxelization and Zacros kMC input preparation.
//!
//! This is the top-level facade crate that re-exports the public API of
//! the memkmc sub-crates, and ships the `memkmc` command-line binary.
//!
//! # Quick start
//!
//! ```rust
//! use memkmc::prelude::*;
//!
//! // Two water molecules and a TMA group in a 4 Å cube.
//! let cell = SpatialBox::new([0.0; 3], [4.0; 3]).unwrap();
//! let particles = [
//!     Particle::new(5, [0.5, 0.5, 0.5]),
//!     Particle::new(5, [1.5, 0.5, 0.5]),
//!     Particle::new(3, [3.5, 3.5, 3.5]),
//! ];
//! let types = TypeClassMap::from_pairs([(3, "tma"), (5, "water"), (1, "polymer")]);
//!
//! let vox = VoxelClassifier::new(2.0)
//!     .unwrap()
//!     .classify(&cell, &particles, &types)
//!     .unwrap();
//! assert_eq!(vox.grid.dims().as_array(), [2, 2, 2]);
//!
//! // The lattice numbers its sites in the same order as the grid.
//! let lattice = CubicLattice::new(3, 3, 3).unwrap().build().unwrap();
//! assert_eq!(lattice.len(), 27);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `memkmc-core` | Box, particles, grid indexing, configuration errors |
//! | [`voxel`] | `memkmc-voxel` | Type maps, classification rules, grid files, properties |
//! | [`lattice`] | `memkmc-lattice` | Periodic cubic lattice topology and emitter |
//! | [`lammps`] | `memkmc-lammps` | LAMMPS data and trajectory readers |
//! | [`zacros`] | `memkmc-zacros` | Zacros input emitters and run preparation |
//! | [`analysis`] | `memkmc-analysis` | Species-number analysis and IEC/WU averaging |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types (`memkmc-core`).
///
/// [`types::SpatialBox`], [`types::Particle`], the shared site numbering
/// in [`types::GridDims`] and the file-output helper [`types::write_file`].
pub use memkmc_core as types;

/// Voxel classification (`memkmc-voxel`).
///
/// Start from [`voxel::VoxelClassifier`]; grids are written with
/// [`voxel::write_grid`] and read back with [`voxel::GridFile`].
pub use memkmc_voxel as voxel;

/// Simple-cubic periodic lattices (`memkmc-lattice`).
pub use memkmc_lattice as lattice;

/// LAMMPS structure readers (`memkmc-lammps`).
pub use memkmc_lammps as lammps;

/// Zacros inputs (`memkmc-zacros`).
///
/// [`zacros::PrepareRun`] writes complete per-seed run directories.
pub use memkmc_zacros as zacros;

/// Post-run analysis (`memkmc-analysis`).
pub use memkmc_analysis as analysis;

/// Common imports for typical memkmc usage.
///
/// ```rust
/// use memkmc::prelude::*;
/// ```
pub mod prelude {
    // Core
    pub use memkmc_core::{write_file, ConfigError, GridDims, Particle, SpatialBox};

    // Voxelization
    pub use memkmc_voxel::{
        write_grid, ClassId, ClassRegistry, GridFile, LabelGrid, RulePipeline, TypeClassMap,
        VoxelClassifier, VoxelError, VoxelRule, Voxelization,
    };

    // Lattice
    pub use memkmc_lattice::{write_lattice, CubicLattice, LatticeError, LatticeTopology};

    // Structures
    pub use memkmc_lammps::{load_structure, FrameSelect, Structure, StructureError, StructureFormat};

    // Zacros
    pub use memkmc_zacros::{LabelSpeciesMap, PrepareRun, ZacrosError, ZacrosInputs};

    // Analysis
    pub use memkmc_analysis::{analyze_specnum_file, average_curves, AnalysisError};
}

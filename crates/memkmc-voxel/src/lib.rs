//! Voxel classification of atomistic membrane structures.
//!
//! A [`VoxelClassifier`] bins particles into a regular grid over a
//! [`SpatialBox`](memkmc_core::SpatialBox) and labels each voxel from its
//! per-class particle counts through a [`RulePipeline`].
//!
//! # Labels
//!
//! Class names come from a [`TypeClassMap`] and are numbered by a
//! [`ClassRegistry`]: void is 0, the rest in lexicographic order from 1.
//!
//! # Grid files
//!
//! [`write_grid`] and [`GridFile`] serialize and parse the flat
//! `label ix iy iz` format whose row order matches lattice site IDs.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod class;
pub mod classify;
pub mod error;
pub mod grid;
pub mod grid_file;
pub mod mapping;
pub mod properties;
pub mod rule;

pub use class::{ClassId, ClassRegistry};
pub use classify::{Binning, VoxelClassifier, Voxelization, MAX_VOXELS};
pub use error::VoxelError;
pub use grid::LabelGrid;
pub use grid_file::{write_grid, GridFile, GridRow};
pub use mapping::{parse_mapping, TypeClassMap};
pub use properties::{
    build_properties, compute_grid_fractions, compute_iec, compute_lambda, compute_water_uptake,
    count_grid_voxels, count_particles, GridCounts, IecParams, MembraneProperties,
    ParticleCounts, PropertyError,
};
pub use rule::{Majority, RulePipeline, TmaDominance, VoxelCounts, VoxelRule, WaterPolymer};

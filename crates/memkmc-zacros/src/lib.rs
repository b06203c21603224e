//! Zacros input generation for memkmc.
//!
//! Emitters for the four text inputs that accompany a lattice file
//! (initial state, simulation, mechanism, energetics) and two jobs that
//! lay them out in per-seed run directories:
//!
//! - [`PrepareRun`]: all five inputs, lattice inferred from a grid file.
//! - [`ZacrosInputs`]: simulation and mechanism only.
//!
//! Every emitter writes to a `&mut dyn Write`; use
//! [`memkmc_core::write_file`] to target a path.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod energetics;
pub mod error;
pub mod format;
pub mod initial_state;
pub mod mechanism;
pub mod prepare;
pub mod simulation;

pub use energetics::{write_energetics, EnergeticsParams};
pub use error::ZacrosError;
pub use initial_state::{canonical_dims, write_initial_state, LabelSpeciesMap};
pub use mechanism::{write_mechanism, MechanismRates};
pub use prepare::{
    seed_dir, PrepareRun, PrepareRunBuilder, SeedReport, ZacrosInputs, ZacrosInputsBuilder,
    ENERGETICS_FILE, LATTICE_FILE, MECHANISM_FILE, SIMULATION_FILE, STATE_FILE,
};
pub use simulation::{write_simulation_input, GasSpecies, MaxTime, SimulationParams, SurfaceSpecies};

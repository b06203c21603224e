//! Benchmark profiles for memkmc.
//!
//! - [`membrane_profile`]: a cubic box of randomly placed membrane atoms
//!   and the matching type map.

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use memkmc_core::{ConfigError, Particle, SpatialBox};
use memkmc_test_utils::{random_cloud, MEMBRANE_TYPE_PAIRS};
use memkmc_voxel::TypeClassMap;

/// Inputs for one voxelization run.
pub struct MembraneProfile {
    /// Simulation cell.
    pub cell: SpatialBox,
    /// Atoms, uniformly distributed.
    pub particles: Vec<Particle>,
    /// Membrane type mapping (water, tma, polymer).
    pub types: TypeClassMap,
}

/// `n` atoms of all nine membrane types in a cube of edge `edge`.
///
/// Deterministic for a given `seed`.
pub fn membrane_profile(seed: u64, n: usize, edge: f64) -> Result<MembraneProfile, ConfigError> {
    let cell = SpatialBox::new([0.0; 3], [edge; 3])?;
    let type_ids: Vec<i32> = MEMBRANE_TYPE_PAIRS.iter().map(|(t, _)| *t).collect();
    Ok(MembraneProfile {
        particles: random_cloud(seed, n, &cell, &type_ids),
        types: TypeClassMap::from_pairs(MEMBRANE_TYPE_PAIRS),
        cell,
    })
}

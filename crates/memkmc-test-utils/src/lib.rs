//! Test fixtures for memkmc development.
//!
//! Small structure, mapping and grid files as string constants, plus a
//! deterministic random particle cloud generator.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use memkmc_core::{Particle, SpatialBox};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Membrane type mapping: 5, 6 water; 3 tma; the rest polymer.
pub const MEMBRANE_TYPE_MAP: &str = "\
# type  class
1  polymer
2  polymer
3  tma      # trimethylammonium
4  polymer
5  water
6  water
7  polymer
8  polymer
9  polymer
";

/// Membrane type mapping as pairs.
pub const MEMBRANE_TYPE_PAIRS: [(i32, &str); 9] = [
    (1, "polymer"),
    (2, "polymer"),
    (3, "tma"),
    (4, "polymer"),
    (5, "water"),
    (6, "water"),
    (7, "polymer"),
    (8, "polymer"),
    (9, "polymer"),
];

/// Label→species mapping for the membrane registry
/// (void 0, polymer 1, tma 2, water 3).
pub const MEMBRANE_LABEL_SPECIES: &str = "\
# label  species
1  mem*
2  tma*
3  mw*
";

/// An 8 Å cube with eight atoms in `full` style.
///
/// At spacing 4: tma + water in voxel (0,0,0), two polymer in (1,0,0),
/// two water in (0,1,0), one water and one polymer in (1,1,1).
pub const DATA_FULL: &str = "\
LAMMPS data file via write_data

8 atoms
9 atom types

0.0 8.0 xlo xhi
0.0 8.0 ylo yhi
0.0 8.0 zlo zhi

Masses

1 12.011
3 58.12
5 18.015

Atoms # full

1 1 3  1.0 1.0 1.0 1.0
2 1 5  0.0 2.0 2.0 2.0
3 2 1  0.0 5.0 1.0 1.0
4 2 2  0.0 6.0 2.0 1.0
5 3 6  0.0 1.0 5.0 1.0
6 3 5 -0.8 2.0 6.0 1.0
7 4 5  0.0 5.0 5.0 5.0
8 4 7  0.0 6.0 6.0 6.0

Velocities

1 0.0 0.0 0.0
";

/// Two-frame trajectory over a 4 Å cube with three atoms per frame.
pub const TRAJ_TWO_FRAMES: &str = "\
ITEM: TIMESTEP
0
ITEM: NUMBER OF ATOMS
3
ITEM: BOX BOUNDS pp pp pp
0.0 4.0
0.0 4.0
0.0 4.0
ITEM: ATOMS id type x y z
1 1 0.5 0.5 0.5
2 3 1.5 0.5 0.5
3 5 2.5 0.5 0.5
ITEM: TIMESTEP
1000
ITEM: NUMBER OF ATOMS
3
ITEM: BOX BOUNDS pp pp pp
-1.0 5.0
0.0 4.0
0.0 4.0
ITEM: ATOMS id type xs ys zs x y z
1 1 0.0 0.0 0.0 3.5 3.5 3.5
2 3 0.0 0.0 0.0 2.5 2.5 2.5
3 5 0.0 0.0 0.0 1.5 1.5 1.5
";

/// Zacros `specnum_output.txt` excerpt with a header and three samples.
///
/// Columns: entry, nevents, time, temperature, energy, tma*, mem*, mw*.
pub const SPECNUM: &str = "\
Entry  Nevents  Time  Temperature  Energy  tma*  mem*  mw*
1  0    0.0  300.0  -10.0  100  400  50
2  10   1.0  300.0  -10.0   80  400  70
3  25   2.0  300.0  -10.0   50  400  90
";

/// `n` particles uniformly distributed in `cell`, types drawn from `types`.
///
/// Deterministic for a given `seed`.
pub fn random_cloud(seed: u64, n: usize, cell: &SpatialBox, types: &[i32]) -> Vec<Particle> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let origin = cell.origin();
    let length = cell.length();
    (0..n)
        .map(|_| {
            let type_id = types[rng.random_range(0..types.len())];
            let position = [
                origin[0] + rng.random::<f64>() * length[0],
                origin[1] + rng.random::<f64>() * length[1],
                origin[2] + rng.random::<f64>() * length[2],
            ];
            Particle::new(type_id, position)
        })
        .collect()
}

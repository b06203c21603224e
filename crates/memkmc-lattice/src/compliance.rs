//! Topology compliance test helpers.
//!
//! These functions verify that a built [`LatticeTopology`] satisfies the
//! invariants the Zacros lattice file relies on. Reused by the builder
//! tests and the property tests.

use crate::cubic::{LatticeTopology, COORDINATION};
use indexmap::IndexSet;

/// Assert that site IDs run `1..=n` in storage order.
pub fn assert_ids_sequential(topo: &LatticeTopology) {
    for (i, site) in topo.sites().iter().enumerate() {
        assert_eq!(
            site.id as usize,
            i + 1,
            "site at position {i} has ID {}, expected {}",
            site.id,
            i + 1
        );
    }
}

/// Assert that the site count equals `nx * ny * nz` and no ID repeats.
pub fn assert_sites_complete(topo: &LatticeTopology) {
    assert_eq!(
        topo.len(),
        topo.dims().cell_count(),
        "site count ({}) != cell count ({})",
        topo.len(),
        topo.dims().cell_count()
    );
    let unique: IndexSet<u32> = topo.sites().iter().map(|s| s.id).collect();
    assert_eq!(unique.len(), topo.len(), "site IDs have duplicates");
}

/// Assert that every neighbour list holds six distinct, ascending, in-range IDs
/// and never the site itself.
pub fn assert_six_distinct_neighbours(topo: &LatticeTopology) {
    let n = topo.len() as u32;
    for site in topo.sites() {
        let unique: IndexSet<u32> = site.neighbours.iter().copied().collect();
        assert_eq!(
            unique.len(),
            COORDINATION,
            "site {} has neighbours {:?}",
            site.id,
            site.neighbours
        );
        assert!(
            site.neighbours.windows(2).all(|w| w[0] < w[1]),
            "site {} neighbours not ascending: {:?}",
            site.id,
            site.neighbours
        );
        assert!(
            site.neighbours.iter().all(|&nb| nb >= 1 && nb <= n && nb != site.id),
            "site {} has an invalid neighbour in {:?}",
            site.id,
            site.neighbours
        );
    }
}

/// Assert that `b in neighbours(a)` implies `a in neighbours(b)`.
pub fn assert_neighbours_symmetric(topo: &LatticeTopology) {
    for site in topo.sites() {
        for &nb in &site.neighbours {
            let other = topo
                .site(nb)
                .unwrap_or_else(|| panic!("site {} links to missing site {nb}", site.id));
            assert!(
                other.neighbours.contains(&site.id),
                "neighbour symmetry violated: {nb} in N({}) but {} not in N({nb})",
                site.id,
                site.id
            );
        }
    }
}

/// Assert that fractional coordinates lie in `[0, 1)` and are unique.
pub fn assert_frac_coords_unique(topo: &LatticeTopology) {
    let mut seen = IndexSet::new();
    for site in topo.sites() {
        for x in site.frac {
            assert!((0.0..1.0).contains(&x), "site {} frac {:?}", site.id, site.frac);
        }
        let key = site.frac.map(f64::to_bits);
        assert!(seen.insert(key), "site {} repeats frac {:?}", site.id, site.frac);
    }
}

/// Run all compliance checks on a topology.
pub fn run_full_compliance(topo: &LatticeTopology) {
    assert_ids_sequential(topo);
    assert_sites_complete(topo);
    assert_six_distinct_neighbours(topo);
    assert_neighbours_symmetric(topo);
    assert_frac_coords_unique(topo);
}

use std::collections::BTreeMap;

use memkmc_core::GridDims;
use memkmc_lattice::{write_lattice, CubicLattice};

/// Parse the `lattice_structure` block back into `id -> (frac, neighbours)`.
fn parse_structure(text: &str) -> BTreeMap<u32, ([f64; 3], Vec<u32>)> {
    let mut sites = BTreeMap::new();
    let mut inside = false;
    for line in text.lines() {
        match line {
            "lattice_structure" => inside = true,
            "end_lattice_structure" => inside = false,
            _ if inside => {
                let f: Vec<&str> = line.split_whitespace().collect();
                let id: u32 = f[0].parse().unwrap();
                let frac = [
                    f[1].parse().unwrap(),
                    f[2].parse().unwrap(),
                    f[3].parse().unwrap(),
                ];
                let n: usize = f[4].parse().unwrap();
                let nbs: Vec<u32> = f[5..].iter().map(|s| s.parse().unwrap()).collect();
                assert_eq!(n, nbs.len());
                sites.insert(id, (frac, nbs));
            }
            _ => {}
        }
    }
    sites
}

#[test]
fn written_file_is_symmetric_and_matches_grid_order() {
    let lattice = CubicLattice::new(5, 4, 3).unwrap();
    let topo = lattice.build().unwrap();
    let mut out = Vec::new();
    write_lattice(&mut out, &topo).unwrap();
    let sites = parse_structure(&String::from_utf8(out).unwrap());
    assert_eq!(sites.len(), 60);

    for (id, (_, nbs)) in &sites {
        assert_eq!(nbs.len(), 6);
        for nb in nbs {
            assert!(sites[nb].1.contains(id), "{nb} does not link back to {id}");
        }
    }

    // The Nth grid row (canonical order) and lattice site N are one cell.
    let dims = GridDims::new(5, 4, 3).unwrap();
    for (n, [ix, iy, iz]) in dims.iter().enumerate() {
        let (frac, _) = sites[&(n as u32 + 1)];
        let expected = [ix as f64 / 5.0, iy as f64 / 4.0, iz as f64 / 3.0];
        for axis in 0..3 {
            assert!((frac[axis] - expected[axis]).abs() < 1e-6);
        }
    }
}

#[test]
fn one_by_one_by_one_is_rejected() {
    assert!(CubicLattice::new(1, 1, 1).unwrap().build().is_err());
}

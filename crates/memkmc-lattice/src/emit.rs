//! Zacros `lattice explicit` emitter.

use std::io::Write;
use std::path::Path;

use crate::cubic::{CubicLattice, LatticeTopology, COORDINATION};
use crate::error::LatticeError;

/// Write `topo` in Zacros explicit-lattice format.
///
/// ```text
/// lattice explicit
/// n_sites            <n>
/// max_coord          6
/// n_site_types   1
/// site_type_names    <name>
/// lattice_structure
/// <id> <x> <y> <z> 6 <n1> ... <n6>
/// end_lattice_structure
/// end_lattice
/// ```
///
/// Fractional coordinates carry six decimals.
pub fn write_lattice(w: &mut dyn Write, topo: &LatticeTopology) -> Result<(), LatticeError> {
    writeln!(w, "lattice explicit")?;
    writeln!(w, "n_sites            {}", topo.len())?;
    writeln!(w, "max_coord          {COORDINATION}")?;
    writeln!(w, "n_site_types   1")?;
    writeln!(w, "site_type_names    {}", topo.site_type_name())?;
    writeln!(w, "lattice_structure")?;
    for site in topo.sites() {
        let [x, y, z] = site.frac;
        write!(w, "{} {x:.6} {y:.6} {z:.6} {COORDINATION}", site.id)?;
        for nb in site.neighbours {
            write!(w, " {nb}")?;
        }
        writeln!(w)?;
    }
    writeln!(w, "end_lattice_structure")?;
    writeln!(w, "end_lattice")?;
    Ok(())
}

/// Build `lattice` and write it to `path`.
///
/// The topology is validated before the file is created, so a degenerate
/// lattice never leaves a partial file behind.
pub fn write_lattice_file<P: AsRef<Path>>(
    path: P,
    lattice: &CubicLattice,
) -> Result<LatticeTopology, LatticeError> {
    let topo = lattice.build()?;
    memkmc_core::write_file(path, |w| write_lattice(w, &topo))?;
    Ok(topo)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_layout_3x3x3_head() {
        let topo = CubicLattice::new(3, 3, 3).unwrap().build().unwrap();
        let mut out = Vec::new();
        write_lattice(&mut out, &topo).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            &lines[..7],
            &[
                "lattice explicit",
                "n_sites            27",
                "max_coord          6",
                "n_site_types   1",
                "site_type_names    G",
                "lattice_structure",
                "1 0.000000 0.000000 0.000000 6 2 3 4 7 10 19",
            ]
        );
        assert_eq!(lines[7], "2 0.333333 0.000000 0.000000 6 1 3 5 8 11 20");
        assert_eq!(lines[6 + 27], "end_lattice_structure");
        assert_eq!(lines[7 + 27], "end_lattice");
        assert_eq!(lines.len(), 8 + 27);
        assert!(text.ends_with("end_lattice\n"));
    }

    #[test]
    fn custom_site_type_name() {
        let topo = CubicLattice::new(3, 3, 3)
            .unwrap()
            .with_site_type_name("brn")
            .unwrap()
            .build()
            .unwrap();
        let mut out = Vec::new();
        write_lattice(&mut out, &topo).unwrap();
        assert!(String::from_utf8(out)
            .unwrap()
            .contains("\nsite_type_names    brn\n"));
    }

    #[test]
    fn degenerate_lattice_writes_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lattice_input.dat");
        let err = write_lattice_file(&path, &CubicLattice::new(2, 2, 2).unwrap()).unwrap_err();
        assert!(matches!(err, LatticeError::DegenerateSite { site_id: 1, .. }));
        assert!(!path.exists());
    }

    #[test]
    fn file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lattice_input.dat");
        let topo = write_lattice_file(&path, &CubicLattice::new(4, 3, 3).unwrap()).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 8 + topo.len());
        assert!(text.contains("\n36 0.750000 0.666667 0.666667 6 "));
    }
}

//! Zacros `energetics_input.dat` emitter: uniform site energies plus two
//! pair interactions centred on `tma*`.

use std::io::Write;

use memkmc_core::ConfigError;

use crate::error::ZacrosError;
use crate::mechanism::SEPARATOR;

/// Cluster energies in eV.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnergeticsParams {
    /// `mem*` single-site energy.
    pub mem: f64,
    /// `mw*` single-site energy.
    pub mw: f64,
    /// `tma*` single-site energy.
    pub tma: f64,
    /// `hew*` single-site energy.
    pub hew: f64,
    /// `tma*`-`mw*` pair interaction.
    pub tma_mw: f64,
    /// `tma*`-`hew*` pair interaction.
    pub tma_hew: f64,
}

impl Default for EnergeticsParams {
    fn default() -> Self {
        Self {
            mem: -1.0,
            mw: -1.0,
            tma: -1.0,
            hew: -1.0,
            tma_mw: -0.18,
            tma_hew: -0.18,
        }
    }
}

impl EnergeticsParams {
    /// All energies must be finite.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("e_mem", self.mem),
            ("e_mw", self.mw),
            ("e_tma", self.tma),
            ("e_hew", self.hew),
            ("e_tma_mw", self.tma_mw),
            ("e_tma_hew", self.tma_hew),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::InvalidParameter {
                    name,
                    reason: format!("energy must be finite, got {value}"),
                });
            }
        }
        Ok(())
    }
}

fn write_site_cluster(w: &mut dyn Write, name: &str, species: &str, eng: f64) -> std::io::Result<()> {
    writeln!(w, "cluster {name}")?;
    writeln!(w, "  sites 1")?;
    writeln!(w, "  lattice_state")?;
    writeln!(w, "    1 {species:<7} 1")?;
    writeln!(w, "  site_types G")?;
    writeln!(w, "  graph_multiplicity 1")?;
    writeln!(w, "  cluster_eng {eng:.2} # eV")?;
    writeln!(w, "end_cluster")
}

fn write_pair_cluster(w: &mut dyn Write, a: &str, b: &str, eng: f64) -> std::io::Result<()> {
    writeln!(w, "cluster {a}-{b}_Interaction")?;
    writeln!(w, "  sites 2")?;
    writeln!(w, "  neighboring 1-2")?;
    writeln!(w, "  lattice_state")?;
    writeln!(w, "    1 {a:<7} 1")?;
    writeln!(w, "    2 {b:<7} 1")?;
    writeln!(w, "  site_types G G")?;
    writeln!(w, "  cluster_eng {eng:.2} # eV")?;
    writeln!(w, "end_cluster")
}

/// Validate `params` and write `energetics_input.dat`.
pub fn write_energetics(w: &mut dyn Write, params: &EnergeticsParams) -> Result<(), ZacrosError> {
    params.validate()?;

    writeln!(w, "energetics")?;
    writeln!(w)?;
    writeln!(w, "{SEPARATOR}")?;
    writeln!(w)?;

    let sites = [
        ("mem_site", "mem*", params.mem),
        ("mw_site", "mw*", params.mw),
        ("tma_site", "tma*", params.tma),
    ];
    for (name, species, eng) in sites {
        write_site_cluster(w, name, species, eng)?;
        writeln!(w)?;
        writeln!(w, "{SEPARATOR}")?;
        writeln!(w)?;
    }
    for (b, eng) in [("mw*", params.tma_mw), ("hew*", params.tma_hew)] {
        write_pair_cluster(w, "tma*", b, eng)?;
        writeln!(w)?;
        writeln!(w, "{SEPARATOR}")?;
        writeln!(w)?;
    }
    write_site_cluster(w, "hew_site", "hew*", params.hew)?;
    writeln!(w)?;
    writeln!(w, "{SEPARATOR}")?;
    writeln!(w)?;
    writeln!(w, "end_energetics")?;
    Ok(())
}

//! Zacros `mechanism_input.dat` emitter for the degradation model.
//!
//! Four irreversible elementary steps on `G` sites:
//!
//! | step | initial | final | rate |
//! |---|---|---|---|
//! | `sn2_degradation` | `tma* mw*` | `mem* hew*` | `ke` |
//! | `wat_removal1` | `mw* hew* mem*` | `hew* mem* mem*` | `kwe` |
//! | `wat_removal2` | `hew* mw*` | `mw* hew*` | `km` |
//! | `hew_elimination` | `hew* mem*` | `mem* mem*` | `kd` |

use std::io::Write;

use memkmc_core::ConfigError;

use crate::error::ZacrosError;
use crate::format::general;

pub(crate) const SEPARATOR: &str =
    "############################################################################";

/// Pre-exponential factors of the four degradation steps.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MechanismRates {
    /// `sn2_degradation`.
    pub ke: f64,
    /// `wat_removal1`.
    pub kwe: f64,
    /// `wat_removal2`.
    pub km: f64,
    /// `hew_elimination`.
    pub kd: f64,
}

impl Default for MechanismRates {
    fn default() -> Self {
        Self {
            ke: 0.5,
            kwe: 2.5e12,
            km: 1.0e11,
            kd: 1.0e8,
        }
    }
}

impl MechanismRates {
    /// Every rate must be finite and positive.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [("ke", self.ke), ("kwe", self.kwe), ("km", self.km), ("kd", self.kd)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidParameter {
                    name,
                    reason: format!("pre-exponential must be finite and > 0, got {value}"),
                });
            }
        }
        Ok(())
    }
}

struct Step {
    name: &'static str,
    neighboring: &'static str,
    initial: &'static [&'static str],
    final_state: &'static [&'static str],
    activ_eng: f64,
}

const STEPS: [Step; 4] = [
    Step {
        name: "sn2_degradation",
        neighboring: "1-2",
        initial: &["tma*", "mw*"],
        final_state: &["mem*", "hew*"],
        activ_eng: 0.0,
    },
    Step {
        name: "wat_removal1",
        neighboring: "1-2 2-3",
        initial: &["mw*", "hew*", "mem*"],
        final_state: &["hew*", "mem*", "mem*"],
        activ_eng: 0.05,
    },
    Step {
        name: "wat_removal2",
        neighboring: "1-2",
        initial: &["hew*", "mw*"],
        final_state: &["mw*", "hew*"],
        activ_eng: 0.05,
    },
    Step {
        name: "hew_elimination",
        neighboring: "1-2",
        initial: &["hew*", "mem*"],
        final_state: &["mem*", "mem*"],
        activ_eng: 0.05,
    },
];

fn write_step(w: &mut dyn Write, step: &Step, pre_expon: f64) -> std::io::Result<()> {
    let n = step.initial.len();
    writeln!(w, "step {}", step.name)?;
    writeln!(w, "  sites {n}")?;
    writeln!(w, "  neighboring {}", step.neighboring)?;
    writeln!(w, "  initial # (entitynumber, species, dentate)")?;
    for (i, species) in step.initial.iter().enumerate() {
        writeln!(w, "    {} {species:<7} 1", i + 1)?;
    }
    writeln!(w, "  final")?;
    for (i, species) in step.final_state.iter().enumerate() {
        writeln!(w, "    {} {species:<7} 1", i + 1)?;
    }
    write!(w, "  site_types")?;
    for _ in 0..n {
        write!(w, " G")?;
    }
    writeln!(w)?;
    writeln!(w, "  pre_expon  {}", general(pre_expon))?;
    writeln!(w, "  activ_eng  {:.2}", step.activ_eng)?;
    writeln!(w, "end_step")?;
    Ok(())
}

/// Validate `rates` and write `mechanism_input.dat`.
pub fn write_mechanism(w: &mut dyn Write, rates: &MechanismRates) -> Result<(), ZacrosError> {
    rates.validate()?;
    let pre_expon = [rates.ke, rates.kwe, rates.km, rates.kd];

    writeln!(w, "mechanism")?;
    writeln!(w)?;
    writeln!(w, "{SEPARATOR}")?;
    writeln!(w)?;
    for (step, k) in STEPS.iter().zip(pre_expon) {
        write_step(w, step, k)?;
        writeln!(w)?;
        writeln!(w, "{SEPARATOR}")?;
        writeln!(w)?;
    }
    writeln!(w, "end_mechanism")?;
    Ok(())
}

//! Zacros `simulation_input.dat` emitter.

use std::fmt;
use std::io::Write;

use memkmc_core::ConfigError;

use crate::error::ZacrosError;

/// A gas-phase species.
#[derive(Clone, Debug, PartialEq)]
pub struct GasSpecies {
    /// Species name.
    pub name: String,
    /// Formation energy, eV.
    pub energy: f64,
    /// Molecular weight, g/mol.
    pub molec_weight: f64,
    /// Molar fraction in the gas phase.
    pub molar_frac: f64,
}

impl GasSpecies {
    /// Inert gas species of weight 18 g/mol.
    pub fn inert(name: &str) -> Self {
        Self {
            name: name.to_string(),
            energy: 0.0,
            molec_weight: 18.0,
            molar_frac: 0.0,
        }
    }
}

/// A surface species and its denticity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SurfaceSpecies {
    /// Species name, conventionally ending in `*`.
    pub name: String,
    /// Number of sites the species occupies.
    pub dentate: u32,
}

impl SurfaceSpecies {
    /// Monodentate species.
    pub fn mono(name: &str) -> Self {
        Self {
            name: name.to_string(),
            dentate: 1,
        }
    }
}

/// Simulation stop condition on kMC time.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum MaxTime {
    /// No time limit.
    #[default]
    Infinity,
    /// Stop after this much simulated time.
    Seconds(f64),
}

impl fmt::Display for MaxTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Infinity => write!(f, "infinity"),
            Self::Seconds(t) => write!(f, "{t}"),
        }
    }
}

/// Parameters of one `simulation_input.dat`.
///
/// The defaults describe the membrane degradation model: three inert gas
/// species (`tma`, `mem`, `mw`), four monodentate surface species
/// (`tma*`, `mem*`, `mw*`, `hew*`), 300 K and 1 bar.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationParams {
    /// Zacros random seed.
    pub random_seed: u64,
    /// Temperature, K.
    pub temperature: f64,
    /// Pressure, bar.
    pub pressure: f64,
    /// Gas-phase species.
    pub gas_species: Vec<GasSpecies>,
    /// Surface species.
    pub surface_species: Vec<SurfaceSpecies>,
    /// Snapshot interval in events.
    pub snapshots_event: u64,
    /// Process statistics interval in events.
    pub process_statistics_event: u64,
    /// Species numbers interval in events.
    pub species_numbers_event: u64,
    /// Step limit.
    pub max_steps: u64,
    /// Time limit.
    pub max_time: MaxTime,
    /// Wall-clock limit, seconds.
    pub wall_time: u64,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            random_seed: 0,
            temperature: 300.0,
            pressure: 1.0,
            gas_species: ["tma", "mem", "mw"].map(GasSpecies::inert).to_vec(),
            surface_species: ["tma*", "mem*", "mw*", "hew*"]
                .map(SurfaceSpecies::mono)
                .to_vec(),
            snapshots_event: 100,
            process_statistics_event: 100,
            species_numbers_event: 5,
            max_steps: 80_000,
            max_time: MaxTime::Infinity,
            wall_time: 100_800,
        }
    }
}

fn is_token(name: &str) -> bool {
    !name.is_empty() && !name.chars().any(char::is_whitespace)
}

impl SimulationParams {
    /// Default parameters with the given seed.
    pub fn with_seed(random_seed: u64) -> Self {
        Self {
            random_seed,
            ..Self::default()
        }
    }

    /// Check the parameters before writing.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |name: &'static str, reason: String| ConfigError::InvalidParameter { name, reason };

        if !self.temperature.is_finite() || self.temperature <= 0.0 {
            return Err(invalid(
                "temperature",
                format!("must be finite and > 0, got {}", self.temperature),
            ));
        }
        if !self.pressure.is_finite() || self.pressure < 0.0 {
            return Err(invalid(
                "pressure",
                format!("must be finite and >= 0, got {}", self.pressure),
            ));
        }
        for gas in &self.gas_species {
            if !is_token(&gas.name) {
                return Err(invalid("gas_species", format!("invalid name '{}'", gas.name)));
            }
            if !gas.energy.is_finite() || !gas.molec_weight.is_finite() || gas.molec_weight <= 0.0 {
                return Err(invalid(
                    "gas_species",
                    format!("'{}' needs finite energy and positive weight", gas.name),
                ));
            }
            if !(0.0..=1.0).contains(&gas.molar_frac) {
                return Err(invalid(
                    "gas_species",
                    format!("'{}' molar fraction {} outside [0, 1]", gas.name, gas.molar_frac),
                ));
            }
        }
        if self.surface_species.is_empty() {
            return Err(invalid("surface_species", "at least one is required".into()));
        }
        for surf in &self.surface_species {
            if !is_token(&surf.name) {
                return Err(invalid("surface_species", format!("invalid name '{}'", surf.name)));
            }
            if surf.dentate == 0 {
                return Err(invalid(
                    "surface_species",
                    format!("'{}' must occupy at least one site", surf.name),
                ));
            }
        }
        for (name, value) in [
            ("snapshots_event", self.snapshots_event),
            ("process_statistics_event", self.process_statistics_event),
            ("species_numbers_event", self.species_numbers_event),
        ] {
            if value == 0 {
                return Err(invalid(name, "must be positive".into()));
            }
        }
        if let MaxTime::Seconds(t) = self.max_time {
            if !t.is_finite() || t <= 0.0 {
                return Err(invalid("max_time", format!("must be finite and > 0, got {t}")));
            }
        }
        Ok(())
    }
}

/// Validate `params` and write `simulation_input.dat`.
pub fn write_simulation_input(w: &mut dyn Write, params: &SimulationParams) -> Result<(), ZacrosError> {
    params.validate()?;

    writeln!(w, "random_seed               {}", params.random_seed)?;
    writeln!(w)?;
    writeln!(w, "temperature               {:.2}", params.temperature)?;
    writeln!(w, "pressure                  {:.2}", params.pressure)?;
    writeln!(w)?;

    writeln!(w, "n_gas_species             {}", params.gas_species.len())?;
    write!(w, "gas_specs_names           ")?;
    for gas in &params.gas_species {
        write!(w, "{:>6} ", gas.name)?;
    }
    writeln!(w)?;
    write!(w, "gas_energies              ")?;
    for gas in &params.gas_species {
        write!(w, "{:>7.3} ", gas.energy)?;
    }
    writeln!(w, "# eV")?;
    write!(w, "gas_molec_weights         ")?;
    for gas in &params.gas_species {
        write!(w, "{:>7.2} ", gas.molec_weight)?;
    }
    writeln!(w, "# g/mol")?;
    write!(w, "gas_molar_fracs           ")?;
    for gas in &params.gas_species {
        write!(w, "{:>7.3} ", gas.molar_frac)?;
    }
    writeln!(w)?;
    writeln!(w)?;

    writeln!(w, "n_surf_species            {}", params.surface_species.len())?;
    write!(w, "surf_specs_names          ")?;
    for surf in &params.surface_species {
        write!(w, "{:>4} ", surf.name)?;
    }
    writeln!(w)?;
    write!(w, "surf_specs_dent           ")?;
    for surf in &params.surface_species {
        write!(w, "{:>4} ", surf.dentate)?;
    }
    writeln!(w)?;
    writeln!(w)?;

    writeln!(w, "snapshots                 on event {}", params.snapshots_event)?;
    writeln!(w, "process_statistics        on event {}", params.process_statistics_event)?;
    writeln!(w, "species_numbers           on event {}", params.species_numbers_event)?;
    writeln!(w)?;

    writeln!(w, "max_steps                 {}", params.max_steps)?;
    writeln!(w, "max_time                  {}", params.max_time)?;
    writeln!(w)?;
    writeln!(w, "wall_time                 {} # in seconds", params.wall_time)?;
    writeln!(w)?;
    writeln!(w, "finish")?;
    Ok(())
}

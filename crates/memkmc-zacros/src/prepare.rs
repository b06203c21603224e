//! Per-seed run directories.
//!
//! Both jobs write into `<outdir>/seed_<seed>/`. A seed whose directory
//! already holds any of the job's files is skipped unless overwrite is
//! requested; a skipped seed is never partially rewritten.

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexSet;
use memkmc_core::{write_file, ConfigError, GridDims};
use memkmc_lattice::{write_lattice, CubicLattice};
use memkmc_voxel::GridFile;
use tracing::{debug, info};

use crate::energetics::{write_energetics, EnergeticsParams};
use crate::error::ZacrosError;
use crate::initial_state::{canonical_dims, write_initial_state, LabelSpeciesMap};
use crate::mechanism::{write_mechanism, MechanismRates};
use crate::simulation::{write_simulation_input, SimulationParams};

/// Lattice file name inside a seed directory.
pub const LATTICE_FILE: &str = "lattice_input.dat";
/// Initial state file name.
pub const STATE_FILE: &str = "state_input.dat";
/// Simulation parameters file name.
pub const SIMULATION_FILE: &str = "simulation_input.dat";
/// Mechanism file name.
pub const MECHANISM_FILE: &str = "mechanism_input.dat";
/// Energetics file name.
pub const ENERGETICS_FILE: &str = "energetics_input.dat";

/// Directory of one seed below `outdir`.
pub fn seed_dir(outdir: &Path, seed: u64) -> PathBuf {
    outdir.join(format!("seed_{seed}"))
}

/// Outcome of a preparation job.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SeedReport {
    /// Seeds whose inputs were written.
    pub written: Vec<u64>,
    /// Seeds skipped because inputs already existed.
    pub skipped: Vec<u64>,
}

fn dedup_seeds(seeds: Vec<u64>) -> Result<Vec<u64>, ConfigError> {
    if seeds.is_empty() {
        return Err(ConfigError::InvalidParameter {
            name: "seeds",
            reason: "at least one seed is required".into(),
        });
    }
    let n = seeds.len();
    let unique: IndexSet<u64> = seeds.into_iter().collect();
    if unique.len() != n {
        debug!(given = n, unique = unique.len(), "dropped duplicate seeds");
    }
    Ok(unique.into_iter().collect())
}

/// Create the seed directory and decide whether to write into it.
fn claim_seed_dir(
    outdir: &Path,
    seed: u64,
    files: &[&str],
    overwrite: bool,
) -> Result<Option<PathBuf>, ZacrosError> {
    let dir = seed_dir(outdir, seed);
    fs::create_dir_all(&dir)?;
    if !overwrite {
        if let Some(existing) = files.iter().find(|f| dir.join(f).exists()) {
            info!(seed, file = *existing, "skipping seed, inputs already exist");
            return Ok(None);
        }
    }
    Ok(Some(dir))
}

// ── Full run preparation ────────────────────────────────────────

/// Builder for [`PrepareRun`].
#[derive(Debug, Default)]
pub struct PrepareRunBuilder {
    grid: Option<PathBuf>,
    mapping: Option<PathBuf>,
    seeds: Vec<u64>,
    outdir: Option<PathBuf>,
    rates: MechanismRates,
    energetics: EnergeticsParams,
    overwrite: bool,
}

impl PrepareRunBuilder {
    /// Grid file (`label ix iy iz`) shared by every seed. Required.
    pub fn grid(mut self, path: impl Into<PathBuf>) -> Self {
        self.grid = Some(path.into());
        self
    }

    /// Label-to-species mapping file. Required.
    pub fn mapping(mut self, path: impl Into<PathBuf>) -> Self {
        self.mapping = Some(path.into());
        self
    }

    /// Random seeds, one run directory each. At least one is required.
    pub fn seeds(mut self, seeds: impl IntoIterator<Item = u64>) -> Self {
        self.seeds = seeds.into_iter().collect();
        self
    }

    /// Base directory for `seed_*` folders (default: `runs`).
    pub fn outdir(mut self, path: impl Into<PathBuf>) -> Self {
        self.outdir = Some(path.into());
        self
    }

    /// Mechanism pre-exponentials.
    pub fn rates(mut self, rates: MechanismRates) -> Self {
        self.rates = rates;
        self
    }

    /// Cluster energies.
    pub fn energetics(mut self, energetics: EnergeticsParams) -> Self {
        self.energetics = energetics;
        self
    }

    /// Rewrite seeds whose inputs already exist (default: false).
    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `grid` or `mapping` is missing, no seed is given,
    /// or a rate or energy is invalid.
    pub fn build(self) -> Result<PrepareRun, ConfigError> {
        let grid = self.grid.ok_or_else(|| ConfigError::InvalidParameter {
            name: "grid",
            reason: "grid file is required".into(),
        })?;
        let mapping = self.mapping.ok_or_else(|| ConfigError::InvalidParameter {
            name: "mapping",
            reason: "mapping file is required".into(),
        })?;
        let seeds = dedup_seeds(self.seeds)?;
        self.rates.validate()?;
        self.energetics.validate()?;
        Ok(PrepareRun {
            grid,
            mapping,
            seeds,
            outdir: self.outdir.unwrap_or_else(|| PathBuf::from("runs")),
            rates: self.rates,
            energetics: self.energetics,
            overwrite: self.overwrite,
        })
    }
}

/// Writes all five Zacros inputs for a set of seeds from one grid.
#[derive(Clone, Debug)]
pub struct PrepareRun {
    grid: PathBuf,
    mapping: PathBuf,
    seeds: Vec<u64>,
    outdir: PathBuf,
    rates: MechanismRates,
    energetics: EnergeticsParams,
    overwrite: bool,
}

impl PrepareRun {
    /// Start configuring a preparation job.
    pub fn builder() -> PrepareRunBuilder {
        PrepareRunBuilder::default()
    }

    /// Seeds in processing order, duplicates removed.
    pub fn seeds(&self) -> &[u64] {
        &self.seeds
    }

    /// Base output directory.
    pub fn outdir(&self) -> &Path {
        &self.outdir
    }

    /// Lattice extents implied by the grid file.
    pub fn infer_dims(&self) -> Result<GridDims, ZacrosError> {
        canonical_dims(&GridFile::load(&self.grid)?)
    }

    /// Run the job.
    ///
    /// The grid, the mapping and the lattice are read and validated once,
    /// before any directory is created. The grid must list every voxel of
    /// its extents once, in canonical order.
    pub fn run(&self) -> Result<SeedReport, ZacrosError> {
        let grid = GridFile::load(&self.grid)?;
        let species = LabelSpeciesMap::load(&self.mapping)?;
        let dims = canonical_dims(&grid)?;
        let topology = CubicLattice::from_dims(dims).build()?;
        info!(
            grid = %self.grid.display(),
            nx = dims.nx(),
            ny = dims.ny(),
            nz = dims.nz(),
            "inferred lattice from grid"
        );

        fs::create_dir_all(&self.outdir)?;
        let files = [
            LATTICE_FILE,
            STATE_FILE,
            SIMULATION_FILE,
            MECHANISM_FILE,
            ENERGETICS_FILE,
        ];
        let mut report = SeedReport::default();
        for &seed in &self.seeds {
            let Some(dir) = claim_seed_dir(&self.outdir, seed, &files, self.overwrite)? else {
                report.skipped.push(seed);
                continue;
            };

            write_file(dir.join(LATTICE_FILE), |w| write_lattice(w, &topology))?;
            write_file(dir.join(STATE_FILE), |w| {
                write_initial_state(w, &grid, &species).map(|_| ())
            })?;
            write_file(dir.join(SIMULATION_FILE), |w| {
                write_simulation_input(w, &SimulationParams::with_seed(seed))
            })?;
            write_file(dir.join(MECHANISM_FILE), |w| write_mechanism(w, &self.rates))?;
            write_file(dir.join(ENERGETICS_FILE), |w| {
                write_energetics(w, &self.energetics)
            })?;

            info!(seed, dir = %dir.display(), "wrote run inputs");
            report.written.push(seed);
        }
        info!(
            written = report.written.len(),
            skipped = report.skipped.len(),
            "seed directories ready"
        );
        Ok(report)
    }
}

// ── Simulation and mechanism only ───────────────────────────────

/// Builder for [`ZacrosInputs`].
#[derive(Debug, Default)]
pub struct ZacrosInputsBuilder {
    seeds: Vec<u64>,
    outdir: Option<PathBuf>,
    rates: MechanismRates,
    overwrite: bool,
}

impl ZacrosInputsBuilder {
    /// Random seeds. At least one is required.
    pub fn seeds(mut self, seeds: impl IntoIterator<Item = u64>) -> Self {
        self.seeds = seeds.into_iter().collect();
        self
    }

    /// Base directory for `seed_*` folders (default: current directory).
    pub fn outdir(mut self, path: impl Into<PathBuf>) -> Self {
        self.outdir = Some(path.into());
        self
    }

    /// Mechanism pre-exponentials.
    pub fn rates(mut self, rates: MechanismRates) -> Self {
        self.rates = rates;
        self
    }

    /// Rewrite seeds whose inputs already exist (default: false).
    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Validate the configuration.
    pub fn build(self) -> Result<ZacrosInputs, ConfigError> {
        let seeds = dedup_seeds(self.seeds)?;
        self.rates.validate()?;
        Ok(ZacrosInputs {
            seeds,
            outdir: self.outdir.unwrap_or_else(|| PathBuf::from(".")),
            rates: self.rates,
            overwrite: self.overwrite,
        })
    }
}

/// Writes `simulation_input.dat` and `mechanism_input.dat` per seed.
#[derive(Clone, Debug)]
pub struct ZacrosInputs {
    seeds: Vec<u64>,
    outdir: PathBuf,
    rates: MechanismRates,
    overwrite: bool,
}

impl ZacrosInputs {
    /// Start configuring the job.
    pub fn builder() -> ZacrosInputsBuilder {
        ZacrosInputsBuilder::default()
    }

    /// Run the job.
    pub fn run(&self) -> Result<SeedReport, ZacrosError> {
        fs::create_dir_all(&self.outdir)?;
        let files = [SIMULATION_FILE, MECHANISM_FILE];
        let mut report = SeedReport::default();
        for &seed in &self.seeds {
            let Some(dir) = claim_seed_dir(&self.outdir, seed, &files, self.overwrite)? else {
                report.skipped.push(seed);
                continue;
            };
            write_file(dir.join(SIMULATION_FILE), |w| {
                write_simulation_input(w, &SimulationParams::with_seed(seed))
            })?;
            write_file(dir.join(MECHANISM_FILE), |w| write_mechanism(w, &self.rates))?;
            info!(seed, dir = %dir.display(), "wrote simulation and mechanism inputs");
            report.written.push(seed);
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_requires_grid_mapping_and_seeds() {
        let err = PrepareRun::builder().mapping("m").seeds([1]).build().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidParameter { name: "grid", .. }));

        let err = PrepareRun::builder().grid("g").seeds([1]).build().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidParameter { name: "mapping", .. }));

        let err = PrepareRun::builder().grid("g").mapping("m").build().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidParameter { name: "seeds", .. }));
    }

    #[test]
    fn builder_defaults() {
        let job = PrepareRun::builder()
            .grid("g")
            .mapping("m")
            .seeds([3, 1, 3, 2])
            .build()
            .unwrap();
        assert_eq!(job.seeds(), &[3, 1, 2]);
        assert_eq!(job.outdir(), Path::new("runs"));

        let inputs = ZacrosInputs::builder().seeds([7]).build().unwrap();
        assert_eq!(inputs.outdir, PathBuf::from("."));
    }

    #[test]
    fn invalid_rates_fail_at_build() {
        let err = ZacrosInputs::builder()
            .seeds([1])
            .rates(MechanismRates {
                ke: -1.0,
                ..Default::default()
            })
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidParameter { name: "ke", .. }));
    }

    #[test]
    fn seed_dir_name() {
        assert_eq!(
            seed_dir(Path::new("runs"), 101),
            PathBuf::from("runs/seed_101")
        );
    }
}

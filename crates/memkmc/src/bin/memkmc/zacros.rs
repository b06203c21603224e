use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use memkmc_core::write_file;
use memkmc_lattice::{write_lattice_file, CubicLattice, DEFAULT_SITE_TYPE};
use memkmc_voxel::GridFile;
use memkmc_zacros::{
    canonical_dims, write_initial_state, EnergeticsParams, LabelSpeciesMap, MechanismRates,
    PrepareRun, SeedReport, ZacrosInputs,
};
use tracing::info;

// ── Shared argument groups ──────────────────────────────────────

#[derive(Args, Clone, Copy, Debug)]
pub struct RateArgs {
    /// Pre-exponential for sn2_degradation
    #[arg(long, default_value_t = 0.5)]
    pub ke: f64,
    /// Pre-exponential for wat_removal1
    #[arg(long, default_value_t = 2.5e12)]
    pub kwe: f64,
    /// Pre-exponential for wat_removal2
    #[arg(long, default_value_t = 1.0e11)]
    pub km: f64,
    /// Pre-exponential for hew_elimination
    #[arg(long, default_value_t = 1.0e8)]
    pub kd: f64,
}

impl From<RateArgs> for MechanismRates {
    fn from(a: RateArgs) -> Self {
        Self {
            ke: a.ke,
            kwe: a.kwe,
            km: a.km,
            kd: a.kd,
        }
    }
}

#[derive(Args, Clone, Copy, Debug)]
pub struct EnergyArgs {
    /// mem* single-site energy, eV
    #[arg(long, default_value_t = -1.0, allow_hyphen_values = true)]
    pub e_mem: f64,
    /// mw* single-site energy, eV
    #[arg(long, default_value_t = -1.0, allow_hyphen_values = true)]
    pub e_mw: f64,
    /// tma* single-site energy, eV
    #[arg(long, default_value_t = -1.0, allow_hyphen_values = true)]
    pub e_tma: f64,
    /// hew* single-site energy, eV
    #[arg(long, default_value_t = -1.0, allow_hyphen_values = true)]
    pub e_hew: f64,
    /// tma*-mw* interaction energy, eV
    #[arg(long, default_value_t = -0.18, allow_hyphen_values = true)]
    pub e_tma_mw: f64,
    /// tma*-hew* interaction energy, eV
    #[arg(long, default_value_t = -0.18, allow_hyphen_values = true)]
    pub e_tma_hew: f64,
}

impl From<EnergyArgs> for EnergeticsParams {
    fn from(a: EnergyArgs) -> Self {
        Self {
            mem: a.e_mem,
            mw: a.e_mw,
            tma: a.e_tma,
            hew: a.e_hew,
            tma_mw: a.e_tma_mw,
            tma_hew: a.e_tma_hew,
        }
    }
}

fn log_report(job: &str, report: &SeedReport) {
    for seed in &report.skipped {
        info!(seed, "skipped; inputs exist (use --overwrite to regenerate)");
    }
    info!(
        written = report.written.len(),
        skipped = report.skipped.len(),
        "{job} done"
    );
}

// ── lattice ─────────────────────────────────────────────────────

#[derive(Args)]
pub struct LatticeArgs {
    /// Number of sites along x
    #[arg(allow_negative_numbers = true)]
    pub nx: i64,
    /// Number of sites along y
    #[arg(allow_negative_numbers = true)]
    pub ny: i64,
    /// Number of sites along z
    #[arg(allow_negative_numbers = true)]
    pub nz: i64,
    /// Output file
    #[arg(short, long, default_value = "lattice_input.dat")]
    pub output: PathBuf,
    /// Name of the single site type
    #[arg(long, default_value = DEFAULT_SITE_TYPE)]
    pub site_type_name: String,
}

pub fn lattice(args: &LatticeArgs) -> Result<()> {
    let lattice = CubicLattice::new(args.nx, args.ny, args.nz)?
        .with_site_type_name(args.site_type_name.clone())?;
    let topo = write_lattice_file(&args.output, &lattice)
        .with_context(|| format!("writing {}", args.output.display()))?;
    info!(
        output = %args.output.display(),
        nx = args.nx,
        ny = args.ny,
        nz = args.nz,
        sites = topo.len(),
        "wrote 3D PBC lattice"
    );
    Ok(())
}

// ── initial-state ───────────────────────────────────────────────

#[derive(Args)]
pub struct InitialStateArgs {
    /// Grid file (`label ix iy iz`, as written by `memkmc voxelize`)
    pub grid: PathBuf,
    /// Output initial_state file
    #[arg(short, long, default_value = "state_input.dat")]
    pub output: PathBuf,
    /// Label-to-species mapping file (`label species` per line)
    #[arg(long)]
    pub mapping: PathBuf,
}

pub fn initial_state(args: &InitialStateArgs) -> Result<()> {
    let grid = GridFile::load(&args.grid)
        .with_context(|| format!("reading grid {}", args.grid.display()))?;
    let species = LabelSpeciesMap::load(&args.mapping)
        .with_context(|| format!("reading mapping {}", args.mapping.display()))?;
    canonical_dims(&grid).with_context(|| format!("checking grid {}", args.grid.display()))?;
    write_file(&args.output, |w| {
        write_initial_state(w, &grid, &species).map(|_| ())
    })
    .with_context(|| format!("writing {}", args.output.display()))?;
    info!(grid = %args.grid.display(), output = %args.output.display(), "wrote initial state");
    Ok(())
}

// ── inputs ──────────────────────────────────────────────────────

#[derive(Args)]
pub struct InputsArgs {
    /// Random seeds, one seed_<seed> directory each
    #[arg(required = true)]
    pub seeds: Vec<u64>,
    /// Base output directory
    #[arg(long, default_value = ".")]
    pub outdir: PathBuf,
    #[command(flatten)]
    pub rates: RateArgs,
    /// Overwrite existing inputs
    #[arg(long)]
    pub overwrite: bool,
}

pub fn inputs(args: &InputsArgs) -> Result<()> {
    let report = ZacrosInputs::builder()
        .seeds(args.seeds.iter().copied())
        .outdir(&args.outdir)
        .rates(args.rates.into())
        .overwrite(args.overwrite)
        .build()?
        .run()?;
    log_report("inputs", &report);
    Ok(())
}

// ── prepare-run ─────────────────────────────────────────────────

#[derive(Args)]
pub struct PrepareRunArgs {
    /// Grid file (`label ix iy iz`, as written by `memkmc voxelize`)
    pub grid: PathBuf,
    /// Label-to-species mapping file used for the initial state
    #[arg(long)]
    pub mapping: PathBuf,
    /// Random seeds, one seed_<seed> directory each
    #[arg(long, required = true, num_args = 1..)]
    pub seeds: Vec<u64>,
    /// Base output directory
    #[arg(long, default_value = "runs")]
    pub outdir: PathBuf,
    #[command(flatten)]
    pub rates: RateArgs,
    #[command(flatten)]
    pub energies: EnergyArgs,
    /// Overwrite existing inputs in seed directories
    #[arg(long)]
    pub overwrite: bool,
}

pub fn prepare_run(args: &PrepareRunArgs) -> Result<()> {
    let report = PrepareRun::builder()
        .grid(&args.grid)
        .mapping(&args.mapping)
        .seeds(args.seeds.iter().copied())
        .outdir(&args.outdir)
        .rates(args.rates.into())
        .energetics(args.energies.into())
        .overwrite(args.overwrite)
        .build()?
        .run()
        .with_context(|| format!("preparing runs from {}", args.grid.display()))?;
    log_report("prepare-run", &report);
    Ok(())
}

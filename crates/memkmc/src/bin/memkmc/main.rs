//! `memkmc` command-line interface.
//!
//! # Commands
//!
//! - `memkmc voxelize <input> --types <file>` - label grid from a LAMMPS structure
//! - `memkmc lattice <nx> <ny> <nz>` - periodic cubic `lattice_input.dat`
//! - `memkmc initial-state <grid> --mapping <file>` - `state_input.dat`
//! - `memkmc inputs <seeds>...` - simulation and mechanism inputs per seed
//! - `memkmc prepare-run <grid> --mapping <file> --seeds <seeds>...` - full run directories
//! - `memkmc analyze <specnum>` - IEC/WU/VH time series
//! - `memkmc average-iec-wu <files>...` - mean WU-vs-IEC curve
//!
//! Logging goes to stderr; `RUST_LOG` overrides the `-v` level.

mod analyze;
mod voxelize;
mod zacros;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Membrane voxelization and Zacros kMC input preparation
#[derive(Parser)]
#[command(name = "memkmc")]
#[command(about = "Prepare Zacros kMC inputs from atomistic membrane structures", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Voxelize a membrane structure from a LAMMPS data or trajectory file
    Voxelize(voxelize::VoxelizeArgs),

    /// Generate a Zacros explicit cubic lattice with 3D PBC
    Lattice(zacros::LatticeArgs),

    /// Generate a Zacros initial_state file from a grid file
    InitialState(zacros::InitialStateArgs),

    /// Generate simulation_input.dat and mechanism_input.dat for a set of seeds
    Inputs(zacros::InputsArgs),

    /// Prepare complete Zacros input sets for a set of seeds from one grid
    PrepareRun(zacros::PrepareRunArgs),

    /// Compute IEC, WU and VH from a Zacros specnum file
    Analyze(analyze::AnalyzeArgs),

    /// Average WU-vs-IEC curves onto a common IEC axis
    AverageIecWu(analyze::AverageArgs),
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Voxelize(args) => voxelize::run(&args),
        Commands::Lattice(args) => zacros::lattice(&args),
        Commands::InitialState(args) => zacros::initial_state(&args),
        Commands::Inputs(args) => zacros::inputs(&args),
        Commands::PrepareRun(args) => zacros::prepare_run(&args),
        Commands::Analyze(args) => analyze::specnum(&args),
        Commands::AverageIecWu(args) => analyze::average(&args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn subcommand_defaults() {
        let cli = Cli::try_parse_from(["memkmc", "voxelize", "in.data", "--types", "t.txt"]).unwrap();
        let Commands::Voxelize(args) = cli.command else {
            panic!("expected voxelize");
        };
        assert_eq!(args.spacing, 0.4);
        assert_eq!(args.output.to_str(), Some("grid.xyz"));

        let cli = Cli::try_parse_from(["memkmc", "prepare-run", "g.xyz", "--mapping", "m", "--seeds", "1", "2"])
            .unwrap();
        let Commands::PrepareRun(args) = cli.command else {
            panic!("expected prepare-run");
        };
        assert_eq!(args.seeds, [1, 2]);
        assert_eq!(args.outdir.to_str(), Some("runs"));
        assert_eq!(args.rates.kwe, 2.5e12);
        assert_eq!(args.energies.e_tma_mw, -0.18);
    }

    #[test]
    fn frame_must_be_last_or_index() {
        assert!(Cli::try_parse_from([
            "memkmc", "voxelize", "t.lammpstrj", "--format", "lammpstrj", "--types", "t", "--frame", "2"
        ])
        .is_ok());
        assert!(Cli::try_parse_from([
            "memkmc", "voxelize", "t.lammpstrj", "--types", "t", "--frame", "first"
        ])
        .is_err());
    }
}

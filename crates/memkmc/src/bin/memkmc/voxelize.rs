use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use indexmap::IndexMap;
use memkmc_core::{write_file, ConfigError};
use memkmc_lammps::{load_structure, FrameSelect, Structure, StructureFormat};
use memkmc_voxel::{
    build_properties, compute_iec, compute_water_uptake, count_grid_voxels, count_particles,
    write_grid, IecParams, TypeClassMap, VoxelClassifier,
};
use tracing::{info, warn};

#[derive(Args)]
pub struct VoxelizeArgs {
    /// LAMMPS .data or .lammpstrj file
    pub input: PathBuf,

    /// Input format: data or lammpstrj
    #[arg(long, default_value = "data")]
    pub format: StructureFormat,

    /// Target voxel spacing, in the units of the input coordinates
    #[arg(long, default_value_t = 0.4)]
    pub spacing: f64,

    /// Type-to-class mapping file (`type class` per line)
    #[arg(long)]
    pub types: PathBuf,

    /// Trajectory frame: `last` or a 0-based index
    #[arg(long, default_value = "last")]
    pub frame: FrameSelect,

    /// Output grid file
    #[arg(short, long, default_value = "grid.xyz")]
    pub output: PathBuf,

    /// Print membrane properties (lambda, FV, VWU, WU) after voxelizing
    #[arg(long)]
    pub properties: bool,

    /// Dry membrane mass in grams; enables IEC in the properties report
    #[arg(long, requires = "properties")]
    pub mass_dry: Option<f64>,
}

/// Mean particle mass of each class, from the structure's `Masses` section.
fn class_masses(structure: &Structure, types: &TypeClassMap) -> IndexMap<String, f64> {
    let mut totals: IndexMap<String, (f64, usize)> = IndexMap::new();
    for p in &structure.particles {
        let (Some(class), Some(&mass)) = (types.class_of(p.type_id), structure.masses.get(&p.type_id))
        else {
            continue;
        };
        let entry = totals.entry(class.to_string()).or_insert((0.0, 0));
        entry.0 += mass;
        entry.1 += 1;
    }
    totals
        .into_iter()
        .map(|(class, (sum, n))| (class, sum / n as f64))
        .collect()
}

pub fn run(args: &VoxelizeArgs) -> Result<()> {
    let structure = load_structure(&args.input, args.format, args.frame)
        .with_context(|| format!("reading {}", args.input.display()))?;
    if structure.is_empty() {
        return Err(ConfigError::NoParticles)
            .with_context(|| format!("{} has no atoms", args.input.display()));
    }
    let types = TypeClassMap::load(&args.types)
        .with_context(|| format!("reading type map {}", args.types.display()))?;

    let vox = VoxelClassifier::new(args.spacing)?.classify(&structure.cell, &structure.particles, &types)?;
    write_file(&args.output, |w| write_grid(w, &vox.grid))
        .with_context(|| format!("writing {}", args.output.display()))?;
    info!(
        output = %args.output.display(),
        dims = ?vox.grid.dims().as_array(),
        classes = %vox.registry,
        "wrote grid"
    );

    if args.properties {
        let particle_counts = count_particles(&structure.particles, &types);
        let grid_counts = count_grid_voxels(&vox.grid, &vox.registry);
        let iec = args
            .mass_dry
            .map(|m| compute_iec(&particle_counts, &IecParams::new(m)))
            .transpose()?;
        let masses = class_masses(&structure, &types);
        let wu = if masses.is_empty() {
            None
        } else {
            match compute_water_uptake(&particle_counts, &masses) {
                Ok(wu) => Some(wu),
                Err(e) => {
                    warn!(error = %e, "water uptake not computed");
                    None
                }
            }
        };
        let props = build_properties(&particle_counts, &grid_counts, iec, wu)?;
        println!("{props}");
    }
    Ok(())
}

//! Membrane descriptors from particle and voxel counts.
//!
//! Particle-based quantities (λ, water uptake, IEC) come from
//! [`ParticleCounts`]; volume fractions come from [`GridCounts`].

use std::error::Error;
use std::fmt;

use indexmap::IndexMap;
use memkmc_core::Particle;

use crate::class::{ClassRegistry, TMA, WATER};
use crate::grid::LabelGrid;
use crate::mapping::TypeClassMap;

/// Avogadro constant, 1/mol.
pub const AVOGADRO: f64 = 6.022_140_76e23;

/// Class name used for particles whose type is not mapped.
pub const UNKNOWN: &str = "unknown";

/// A property is undefined for the given counts.
#[derive(Clone, Debug, PartialEq)]
pub enum PropertyError {
    /// λ needs at least one `tma` particle.
    NoTma,
    /// The grid has no voxels.
    EmptyGrid,
    /// Water and dry mass sum to zero.
    ZeroMass,
    /// Dry mass must be strictly positive.
    NonPositiveDryMass {
        /// The rejected mass.
        value: f64,
    },
}

impl fmt::Display for PropertyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoTma => write!(f, "cannot compute lambda: no TMA particles"),
            Self::EmptyGrid => write!(f, "grid has zero voxels"),
            Self::ZeroMass => write!(f, "total mass is zero; cannot compute water uptake"),
            Self::NonPositiveDryMass { value } => {
                write!(f, "dry mass must be positive, got {value}")
            }
        }
    }
}

impl Error for PropertyError {}

/// Particle counts per class name.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParticleCounts {
    /// All particles, mapped or not.
    pub total: usize,
    /// Per class, in first-seen order; unmapped types under `"unknown"`.
    pub by_class: IndexMap<String, usize>,
}

impl ParticleCounts {
    /// Count for `class`, 0 if absent.
    pub fn get(&self, class: &str) -> usize {
        self.by_class.get(class).copied().unwrap_or(0)
    }
}

/// Voxel counts per class name.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GridCounts {
    /// Number of voxels.
    pub total: usize,
    /// Per class, in label order; labels outside the registry under `"unknown"`.
    pub by_class: IndexMap<String, usize>,
}

impl GridCounts {
    /// Count for `class`, 0 if absent.
    pub fn get(&self, class: &str) -> usize {
        self.by_class.get(class).copied().unwrap_or(0)
    }
}

/// Count particles by class through `map`.
pub fn count_particles(particles: &[Particle], map: &TypeClassMap) -> ParticleCounts {
    let mut by_class: IndexMap<String, usize> = IndexMap::new();
    for p in particles {
        let class = map.class_of(p.type_id).unwrap_or(UNKNOWN);
        *by_class.entry(class.to_string()).or_default() += 1;
    }
    ParticleCounts {
        total: particles.len(),
        by_class,
    }
}

/// Count voxels by class. Classes with no voxels are omitted.
pub fn count_grid_voxels(grid: &LabelGrid, registry: &ClassRegistry) -> GridCounts {
    let mut per_label = vec![0usize; registry.len()];
    let mut unknown = 0usize;
    for &label in grid.as_slice() {
        match per_label.get_mut(label.index()) {
            Some(n) => *n += 1,
            None => unknown += 1,
        }
    }
    let mut by_class: IndexMap<String, usize> = registry
        .iter()
        .zip(per_label)
        .filter(|(_, n)| *n > 0)
        .map(|((name, _), n)| (name.to_string(), n))
        .collect();
    if unknown > 0 {
        by_class.insert(UNKNOWN.to_string(), unknown);
    }
    GridCounts {
        total: grid.len(),
        by_class,
    }
}

/// λ = N(water) / N(tma).
pub fn compute_lambda(counts: &ParticleCounts) -> Result<f64, PropertyError> {
    let n_tma = counts.get(TMA);
    if n_tma == 0 {
        return Err(PropertyError::NoTma);
    }
    Ok(counts.get(WATER) as f64 / n_tma as f64)
}

/// Voxel fractions `(FV, VWU)`.
///
/// `FV = water / (total - tma)` and `VWU = water / (total - water)`, each 0
/// when its denominator is not positive.
pub fn compute_grid_fractions(counts: &GridCounts) -> Result<(f64, f64), PropertyError> {
    if counts.total == 0 {
        return Err(PropertyError::EmptyGrid);
    }
    let total = counts.total as f64;
    let water = counts.get(WATER) as f64;
    let tma = counts.get(TMA) as f64;

    let fv_den = total - tma;
    let vwu_den = total - water;
    let fv = if fv_den > 0.0 { water / fv_den } else { 0.0 };
    let vwu = if vwu_den > 0.0 { water / vwu_den } else { 0.0 };
    Ok((fv, vwu))
}

/// Mass-based water uptake `m_water / (m_water + m_dry)`.
///
/// Every class with an entry in `mass_by_class` other than water counts as
/// dry mass; classes without a mass are ignored.
pub fn compute_water_uptake(
    counts: &ParticleCounts,
    mass_by_class: &IndexMap<String, f64>,
) -> Result<f64, PropertyError> {
    let mut m_water = 0.0;
    let mut m_dry = 0.0;
    for (class, &n) in &counts.by_class {
        let Some(&mass) = mass_by_class.get(class) else {
            continue;
        };
        if class == WATER {
            m_water += mass * n as f64;
        } else {
            m_dry += mass * n as f64;
        }
    }
    if m_water + m_dry == 0.0 {
        return Err(PropertyError::ZeroMass);
    }
    Ok(m_water / (m_water + m_dry))
}

/// Ion-exchange capacity parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IecParams {
    /// Dry membrane mass in grams (or arbitrary units when `use_moles` is off).
    pub mass_dry: f64,
    /// Valence of the fixed cation.
    pub charge_per_tma: u32,
    /// Convert the TMA count to moles.
    pub use_moles: bool,
}

impl IecParams {
    /// Unit valence, molar IEC.
    pub fn new(mass_dry: f64) -> Self {
        Self {
            mass_dry,
            charge_per_tma: 1,
            use_moles: true,
        }
    }
}

/// IEC in eq/g: `z * N(tma) / N_A / mass_dry`, or `N(tma) * z / mass_dry`
/// without the molar conversion.
pub fn compute_iec(counts: &ParticleCounts, params: &IecParams) -> Result<f64, PropertyError> {
    if params.mass_dry.is_nan() || params.mass_dry <= 0.0 {
        return Err(PropertyError::NonPositiveDryMass {
            value: params.mass_dry,
        });
    }
    let n_tma = counts.get(TMA) as f64;
    let z = params.charge_per_tma as f64;
    if params.use_moles {
        Ok(z * (n_tma / AVOGADRO) / params.mass_dry)
    } else {
        Ok(n_tma * z / params.mass_dry)
    }
}

/// Summary of a voxelized membrane.
#[derive(Clone, Debug, PartialEq)]
pub struct MembraneProperties {
    /// Water particles.
    pub n_water: usize,
    /// TMA particles.
    pub n_tma: usize,
    /// Water per TMA.
    pub lambda: f64,
    /// Ion-exchange capacity, if computed.
    pub iec: Option<f64>,
    /// Water uptake, if computed.
    pub wu: Option<f64>,
    /// Water voxel fraction among non-TMA voxels.
    pub fv: f64,
    /// Water voxels per non-water voxel.
    pub vwu: f64,
    /// All particles.
    pub n_part: usize,
    /// Water voxels.
    pub n_water_grid: usize,
    /// TMA voxels.
    pub n_tma_grid: usize,
    /// Non-TMA voxels.
    pub n_pol_grid: usize,
}

/// Assemble [`MembraneProperties`] from counts and optional IEC/WU.
pub fn build_properties(
    particles: &ParticleCounts,
    grid: &GridCounts,
    iec: Option<f64>,
    wu: Option<f64>,
) -> Result<MembraneProperties, PropertyError> {
    let lambda = compute_lambda(particles)?;
    let (fv, vwu) = compute_grid_fractions(grid)?;
    let n_tma_grid = grid.get(TMA);
    Ok(MembraneProperties {
        n_water: particles.get(WATER),
        n_tma: particles.get(TMA),
        lambda,
        iec,
        wu,
        fv,
        vwu,
        n_part: particles.total,
        n_water_grid: grid.get(WATER),
        n_tma_grid,
        n_pol_grid: grid.total - n_tma_grid,
    })
}

impl fmt::Display for MembraneProperties {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "N_part       {}", self.n_part)?;
        writeln!(f, "N_water      {}", self.n_water)?;
        writeln!(f, "N_tma        {}", self.n_tma)?;
        writeln!(f, "lambda       {:.4}", self.lambda)?;
        if let Some(iec) = self.iec {
            writeln!(f, "IEC          {iec:.6e}")?;
        }
        if let Some(wu) = self.wu {
            writeln!(f, "WU           {wu:.4}")?;
        }
        writeln!(f, "N_water_grid {}", self.n_water_grid)?;
        writeln!(f, "N_tma_grid   {}", self.n_tma_grid)?;
        writeln!(f, "N_pol_grid   {}", self.n_pol_grid)?;
        writeln!(f, "FV           {:.4}", self.fv)?;
        write!(f, "VWU          {:.4}", self.vwu)
    }
}

//! Binning of particles into voxels and per-voxel classification.

use memkmc_core::{ConfigError, GridDims, Particle, SpatialBox};
use tracing::{debug, info};

use crate::class::{ClassId, ClassRegistry};
use crate::error::VoxelError;
use crate::grid::LabelGrid;
use crate::mapping::TypeClassMap;
use crate::rule::{RulePipeline, VoxelCounts};

/// Largest voxel grid a classification run will allocate.
pub const MAX_VOXELS: usize = 1 << 26;

/// Regular subdivision of a [`SpatialBox`].
///
/// Each axis gets `n = max(1, floor(length / spacing))` bins of width
/// `length / n`. The grid always tiles the box exactly, so the effective
/// width can differ from the requested spacing. Grids above
/// [`MAX_VOXELS`] cells are rejected with [`ConfigError::TooManyCells`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Binning {
    origin: [f64; 3],
    width: [f64; 3],
    dims: GridDims,
}

impl Binning {
    /// Subdivide `cell` with the requested `spacing`.
    pub fn new(cell: &SpatialBox, spacing: f64) -> Result<Self, ConfigError> {
        if !spacing.is_finite() || spacing <= 0.0 {
            return Err(ConfigError::InvalidSpacing { value: spacing });
        }
        let length = cell.length();
        let mut n = [1i64; 3];
        let mut width = [0.0; 3];
        for axis in 0..3 {
            // `as` saturates for absurdly small spacings; GridDims rejects those.
            n[axis] = ((length[axis] / spacing).floor() as i64).max(1);
            width[axis] = length[axis] / n[axis] as f64;
        }
        let dims = GridDims::new(n[0], n[1], n[2])?;
        if dims.cell_count() > MAX_VOXELS {
            return Err(ConfigError::TooManyCells {
                requested: dims.cell_count() as u128,
                limit: MAX_VOXELS as u128,
            });
        }
        Ok(Self {
            origin: cell.origin(),
            width,
            dims,
        })
    }

    /// Grid extents.
    pub fn dims(&self) -> GridDims {
        self.dims
    }

    /// Effective bin width per axis.
    pub fn bin_width(&self) -> [f64; 3] {
        self.width
    }

    /// Voxel containing `position`, or `None` if it lies outside the grid.
    ///
    /// Out-of-range particles are dropped rather than clamped so that
    /// boundary atoms are never counted into an edge voxel they do not
    /// belong to. A particle exactly on the upper face is outside.
    pub fn voxel_of(&self, position: [f64; 3]) -> Option<[u32; 3]> {
        let extent = self.dims.as_array();
        let mut index = [0u32; 3];
        for axis in 0..3 {
            let i = ((position[axis] - self.origin[axis]) / self.width[axis]).floor();
            // Also rejects NaN.
            if !(i >= 0.0 && i < extent[axis] as f64) {
                return None;
            }
            index[axis] = i as u32;
        }
        Some(index)
    }
}

/// Result of classifying one structure.
#[derive(Clone, Debug)]
pub struct Voxelization {
    /// Label of every voxel.
    pub grid: LabelGrid,
    /// Class name ↔ label bijection used by `grid`.
    pub registry: ClassRegistry,
    /// Effective bin width per axis.
    pub bin_width: [f64; 3],
    /// Particles binned into a voxel and counted.
    pub counted: usize,
    /// Particles whose position fell outside the grid.
    pub dropped_outside: usize,
    /// Particles whose type has no class (or maps to void).
    pub dropped_unmapped: usize,
}

/// Discretizes particle configurations into labeled voxel grids.
///
/// # Examples
///
/// ```
/// use memkmc_core::{Particle, SpatialBox};
/// use memkmc_voxel::{TypeClassMap, VoxelClassifier};
///
/// let cell = SpatialBox::new([0.0; 3], [8.0; 3]).unwrap();
/// let map = TypeClassMap::from_pairs([(1, "water"), (2, "polymer")]);
/// let particles = [Particle::new(2, [1.0, 1.0, 1.0])];
///
/// let vox = VoxelClassifier::new(4.0).unwrap().classify(&cell, &particles, &map).unwrap();
/// assert_eq!(vox.grid.dims().as_array(), [2, 2, 2]);
/// let polymer = vox.registry.id_of("polymer").unwrap();
/// let water = vox.registry.id_of("water").unwrap();
/// assert_eq!(vox.grid.get(0, 0, 0), polymer);
/// // Empty voxels default to water.
/// assert_eq!(vox.grid.get(1, 1, 1), water);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct VoxelClassifier {
    spacing: f64,
}

impl VoxelClassifier {
    /// Create a classifier for the requested voxel spacing.
    pub fn new(spacing: f64) -> Result<Self, ConfigError> {
        if !spacing.is_finite() || spacing <= 0.0 {
            return Err(ConfigError::InvalidSpacing { value: spacing });
        }
        Ok(Self { spacing })
    }

    /// Requested spacing.
    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    /// Classify with the default three-tier rule for the mapping's classes.
    pub fn classify(
        &self,
        cell: &SpatialBox,
        particles: &[Particle],
        type_map: &TypeClassMap,
    ) -> Result<Voxelization, VoxelError> {
        if type_map.is_empty() {
            return Err(ConfigError::EmptyTypeMap.into());
        }
        let registry = ClassRegistry::from_type_map(type_map);
        let pipeline = RulePipeline::for_registry(&registry);
        self.classify_with(cell, particles, type_map, registry, &pipeline)
    }

    /// Classify with an explicit registry and rule pipeline.
    pub fn classify_with(
        &self,
        cell: &SpatialBox,
        particles: &[Particle],
        type_map: &TypeClassMap,
        registry: ClassRegistry,
        pipeline: &RulePipeline,
    ) -> Result<Voxelization, VoxelError> {
        let binning = Binning::new(cell, self.spacing)?;
        let dims = binning.dims();
        let n_classes = registry.len();

        info!(
            nx = dims.nx(),
            ny = dims.ny(),
            nz = dims.nz(),
            particles = particles.len(),
            classes = %registry,
            tiers = ?pipeline.tier_names(),
            "classifying voxels"
        );

        // Flat per-voxel, per-class counts: voxel-major, label-minor.
        let mut counts = vec![0u32; dims.cell_count() * n_classes];
        let mut counted = 0usize;
        let mut dropped_outside = 0usize;
        let mut dropped_unmapped = 0usize;

        for p in particles {
            let class = match registry.resolve(type_map, p.type_id) {
                Some(id) if id != ClassId::VOID => id,
                _ => {
                    dropped_unmapped += 1;
                    continue;
                }
            };
            let Some([ix, iy, iz]) = binning.voxel_of(p.position) else {
                dropped_outside += 1;
                continue;
            };
            let voxel = dims.linear_index(ix, iy, iz);
            counts[voxel * n_classes + class.index()] += 1;
            counted += 1;
        }

        let mut grid = LabelGrid::new(dims);
        for (voxel, slot) in counts.chunks_exact(n_classes).enumerate() {
            grid.set_linear(voxel, pipeline.label(VoxelCounts::new(slot)));
        }

        debug!(
            counted,
            dropped_outside, dropped_unmapped, "particle binning finished"
        );

        Ok(Voxelization {
            grid,
            registry,
            bin_width: binning.bin_width(),
            counted,
            dropped_outside,
            dropped_unmapped,
        })
    }
}

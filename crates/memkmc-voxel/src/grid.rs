//! Dense 3D label grid.

use memkmc_core::GridDims;

use crate::class::ClassId;

/// A dense grid of voxel labels stored in canonical linear order.
///
/// Element `ix + iy*nx + iz*nx*ny` is voxel `(ix, iy, iz)`; iterating the
/// storage front to back therefore visits voxels in the same order as the
/// lattice assigns site IDs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LabelGrid {
    dims: GridDims,
    labels: Vec<ClassId>,
}

impl LabelGrid {
    /// A grid with every voxel void.
    pub fn new(dims: GridDims) -> Self {
        Self {
            dims,
            labels: vec![ClassId::VOID; dims.cell_count()],
        }
    }

    /// Wrap labels already in canonical order.
    ///
    /// Returns `None` if the length does not match `dims`.
    pub fn from_labels(dims: GridDims, labels: Vec<ClassId>) -> Option<Self> {
        (labels.len() == dims.cell_count()).then_some(Self { dims, labels })
    }

    /// Grid extents.
    pub fn dims(&self) -> GridDims {
        self.dims
    }

    /// Number of voxels.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Always `false`: extents are at least 1.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Label of voxel `(ix, iy, iz)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is out of range.
    pub fn get(&self, ix: u32, iy: u32, iz: u32) -> ClassId {
        self.labels[self.dims.linear_index(ix, iy, iz)]
    }

    pub(crate) fn set_linear(&mut self, index: usize, label: ClassId) {
        self.labels[index] = label;
    }

    /// Labels in canonical order.
    pub fn as_slice(&self) -> &[ClassId] {
        &self.labels
    }

    /// `(coords, label)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = ([u32; 3], ClassId)> + '_ {
        self.dims.iter().zip(self.labels.iter().copied())
    }

    /// Number of voxels carrying `label`.
    pub fn count(&self, label: ClassId) -> usize {
        self.labels.iter().filter(|&&l| l == label).count()
    }
}

//! Shared 3D indexing convention for voxel grids and lattices.
//!
//! Voxels and lattice sites are enumerated with `iz` outermost and `ix`
//! innermost. The linear index of `(ix, iy, iz)` is
//! `ix + iy*nx + iz*nx*ny` and the 1-based site ID is that index plus one.
//! A downstream stage maps the Nth grid-file data line straight to lattice
//! site `N`, so both the grid emitter and the lattice builder go through
//! this type.

use crate::error::ConfigError;

/// Extents of a regular 3D grid, each at least 1.
///
/// # Examples
///
/// ```
/// use memkmc_core::GridDims;
///
/// let dims = GridDims::new(4, 3, 2).unwrap();
/// assert_eq!(dims.cell_count(), 24);
/// assert_eq!(dims.site_id(1, 2, 1), 1 + 2 * 4 + 1 * 12 + 1);
/// assert_eq!(dims.coords_of_site(22), Some([1, 2, 1]));
/// // Periodic wrap: -1 on x is the last column.
/// assert_eq!(dims.wrapped_site_id(-1, 0, 0), 4);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridDims {
    nx: u32,
    ny: u32,
    nz: u32,
}

impl GridDims {
    /// Validate and create grid extents.
    ///
    /// Takes signed values so that a caller-supplied negative extent is
    /// reported as such rather than wrapping. The product must fit a `u32`
    /// site ID.
    pub fn new(nx: i64, ny: i64, nz: i64) -> Result<Self, ConfigError> {
        for (axis, value) in [("nx", nx), ("ny", ny), ("nz", nz)] {
            if value <= 0 {
                return Err(ConfigError::NonPositiveDimension { axis, value });
            }
        }
        let requested = nx as u128 * ny as u128 * nz as u128;
        let limit = u32::MAX as u128;
        if requested > limit {
            return Err(ConfigError::TooManyCells { requested, limit });
        }
        Ok(Self {
            nx: nx as u32,
            ny: ny as u32,
            nz: nz as u32,
        })
    }

    /// Extent along x.
    pub fn nx(&self) -> u32 {
        self.nx
    }

    /// Extent along y.
    pub fn ny(&self) -> u32 {
        self.ny
    }

    /// Extent along z.
    pub fn nz(&self) -> u32 {
        self.nz
    }

    /// Extents as `[nx, ny, nz]`.
    pub fn as_array(&self) -> [u32; 3] {
        [self.nx, self.ny, self.nz]
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.nx as usize * self.ny as usize * self.nz as usize
    }

    /// 0-based linear index of an in-range coordinate.
    #[inline]
    pub fn linear_index(&self, ix: u32, iy: u32, iz: u32) -> usize {
        debug_assert!(ix < self.nx && iy < self.ny && iz < self.nz);
        ix as usize + iy as usize * self.nx as usize + iz as usize * self.plane()
    }

    /// 1-based site ID of an in-range coordinate.
    #[inline]
    pub fn site_id(&self, ix: u32, iy: u32, iz: u32) -> u32 {
        // cell_count <= u32::MAX, so the largest index + 1 still fits.
        self.linear_index(ix, iy, iz) as u32 + 1
    }

    /// 1-based site ID after wrapping each axis modulo its own extent.
    #[inline]
    pub fn wrapped_site_id(&self, ix: i64, iy: i64, iz: i64) -> u32 {
        let ix = ix.rem_euclid(self.nx as i64) as u32;
        let iy = iy.rem_euclid(self.ny as i64) as u32;
        let iz = iz.rem_euclid(self.nz as i64) as u32;
        self.site_id(ix, iy, iz)
    }

    /// Inverse of [`linear_index`](Self::linear_index).
    pub fn coords_of_index(&self, index: usize) -> Option<[u32; 3]> {
        if index >= self.cell_count() {
            return None;
        }
        let nx = self.nx as usize;
        let ix = index % nx;
        let iy = (index / nx) % self.ny as usize;
        let iz = index / self.plane();
        Some([ix as u32, iy as u32, iz as u32])
    }

    /// Inverse of [`site_id`](Self::site_id); `None` outside `[1, cell_count]`.
    pub fn coords_of_site(&self, site_id: u32) -> Option<[u32; 3]> {
        if site_id == 0 {
            return None;
        }
        self.coords_of_index(site_id as usize - 1)
    }

    /// All coordinates in canonical order (`iz`, then `iy`, then `ix`).
    pub fn iter(&self) -> impl Iterator<Item = [u32; 3]> {
        let GridDims { nx, ny, nz } = *self;
        (0..nz).flat_map(move |iz| (0..ny).flat_map(move |iy| (0..nx).map(move |ix| [ix, iy, iz])))
    }

    fn plane(&self) -> usize {
        self.nx as usize * self.ny as usize
    }
}

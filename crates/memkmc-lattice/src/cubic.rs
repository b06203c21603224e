//! Simple-cubic lattice with full 3D periodic boundaries.
//!
//! # Site numbering
//!
//! Site `(ix, iy, iz)` has ID `ix + iy*nx + iz*nx*ny + 1`. Sites are
//! enumerated `iz` outermost, `ix` innermost, which is also the row order
//! of grid files, so grid row `N` and lattice site `N` are the same cell.
//!
//! # Neighbourhood
//!
//! Each site links to `±1` along each axis, wrapped modulo that axis'
//! extent. The six IDs must be pairwise distinct; an extent of 1 or 2
//! makes the `+1` and `-1` images coincide and the build fails.

use memkmc_core::{ConfigError, GridDims};
use smallvec::SmallVec;
use tracing::{debug, info};

use crate::error::LatticeError;

/// Site coordination of the simple-cubic lattice.
pub const COORDINATION: usize = 6;

/// Default Zacros site-type name.
pub const DEFAULT_SITE_TYPE: &str = "G";

/// Unit steps along `x`, `y` and `z`, in `+x, -x, +y, -y, +z, -z` order.
const CUBIC_OFFSETS: [(i64, i64, i64); COORDINATION] = [
    (1, 0, 0),
    (-1, 0, 0),
    (0, 1, 0),
    (0, -1, 0),
    (0, 0, 1),
    (0, 0, -1),
];

/// One site of a built topology.
#[derive(Clone, Debug, PartialEq)]
pub struct LatticeSite {
    /// 1-based site ID.
    pub id: u32,
    /// Fractional coordinates `(ix/nx, iy/ny, iz/nz)`.
    pub frac: [f64; 3],
    /// Neighbour IDs, distinct and ascending.
    pub neighbours: [u32; COORDINATION],
}

/// A complete, validated lattice topology in canonical order.
#[derive(Clone, Debug, PartialEq)]
pub struct LatticeTopology {
    dims: GridDims,
    site_type_name: String,
    sites: Vec<LatticeSite>,
}

impl LatticeTopology {
    /// Extents.
    pub fn dims(&self) -> GridDims {
        self.dims
    }

    /// Zacros site-type name.
    pub fn site_type_name(&self) -> &str {
        &self.site_type_name
    }

    /// Sites in canonical order; `sites()[i].id == i + 1`.
    pub fn sites(&self) -> &[LatticeSite] {
        &self.sites
    }

    /// Number of sites.
    pub fn len(&self) -> usize {
        self.sites.len()
    }

    /// Always `false`: every extent is at least 3.
    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    /// Site by ID.
    pub fn site(&self, id: u32) -> Option<&LatticeSite> {
        id.checked_sub(1).and_then(|i| self.sites.get(i as usize))
    }
}

/// A simple-cubic periodic lattice of `nx * ny * nz` sites.
///
/// # Examples
///
/// ```
/// use memkmc_lattice::CubicLattice;
///
/// let lattice = CubicLattice::new(3, 3, 3).unwrap();
/// assert_eq!(lattice.site_id(0, 0, 0), 1);
/// assert_eq!(lattice.site_id(-1, 0, 0), 3);
/// assert_eq!(lattice.coords_of(27), Some([2, 2, 2]));
///
/// let topo = lattice.build().unwrap();
/// assert_eq!(topo.len(), 27);
/// assert_eq!(topo.sites()[0].neighbours, [2, 3, 4, 7, 10, 19]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CubicLattice {
    dims: GridDims,
    site_type_name: String,
}

impl CubicLattice {
    /// Create a lattice. Every extent must be positive.
    ///
    /// Extents of 1 or 2 are accepted here and rejected by
    /// [`build`](Self::build), so their neighbourhoods can still be
    /// inspected.
    pub fn new(nx: i64, ny: i64, nz: i64) -> Result<Self, LatticeError> {
        Ok(Self::from_dims(GridDims::new(nx, ny, nz)?))
    }

    /// Create a lattice over existing extents.
    pub fn from_dims(dims: GridDims) -> Self {
        Self {
            dims,
            site_type_name: DEFAULT_SITE_TYPE.to_string(),
        }
    }

    /// Replace the site-type name. It must be a single non-empty token.
    pub fn with_site_type_name(mut self, name: impl Into<String>) -> Result<Self, LatticeError> {
        let name = name.into();
        if name.is_empty() || name.chars().any(char::is_whitespace) {
            return Err(ConfigError::InvalidParameter {
                name: "site_type_name",
                reason: format!("must be a single non-empty token, got '{name}'"),
            }
            .into());
        }
        self.site_type_name = name;
        Ok(self)
    }

    /// Extents.
    pub fn dims(&self) -> GridDims {
        self.dims
    }

    /// Zacros site-type name.
    pub fn site_type_name(&self) -> &str {
        &self.site_type_name
    }

    /// Number of sites.
    pub fn n_sites(&self) -> usize {
        self.dims.cell_count()
    }

    /// 1-based ID of `(ix, iy, iz)`, each index wrapped modulo its extent.
    pub fn site_id(&self, ix: i64, iy: i64, iz: i64) -> u32 {
        self.dims.wrapped_site_id(ix, iy, iz)
    }

    /// Inverse of [`site_id`](Self::site_id); `None` outside `[1, n_sites]`.
    pub fn coords_of(&self, id: u32) -> Option<[u32; 3]> {
        self.dims.coords_of_site(id)
    }

    /// Fractional coordinates of an in-range site.
    pub fn frac_coords(&self, [ix, iy, iz]: [u32; 3]) -> [f64; 3] {
        let [nx, ny, nz] = self.dims.as_array();
        [
            ix as f64 / nx as f64,
            iy as f64 / ny as f64,
            iz as f64 / nz as f64,
        ]
    }

    /// The six wrapped neighbour IDs of `(ix, iy, iz)` in offset order,
    /// duplicates included.
    pub fn neighbour_candidates(&self, [ix, iy, iz]: [u32; 3]) -> [u32; COORDINATION] {
        let (x, y, z) = (ix as i64, iy as i64, iz as i64);
        CUBIC_OFFSETS.map(|(dx, dy, dz)| self.site_id(x + dx, y + dy, z + dz))
    }

    /// Distinct neighbour IDs of site `id`, ascending.
    ///
    /// Has fewer than six entries on degenerate lattices. `None` if `id`
    /// is not a site.
    pub fn neighbours_of(&self, id: u32) -> Option<SmallVec<[u32; COORDINATION]>> {
        let coords = self.coords_of(id)?;
        let mut ids: SmallVec<[u32; COORDINATION]> =
            SmallVec::from_buf(self.neighbour_candidates(coords));
        ids.sort_unstable();
        ids.dedup();
        Some(ids)
    }

    /// Build every site in canonical order.
    ///
    /// Fails on the first site with fewer than six distinct neighbours.
    pub fn build(&self) -> Result<LatticeTopology, LatticeError> {
        let [nx, ny, nz] = self.dims.as_array();
        info!(nx, ny, nz, n_sites = self.n_sites(), "building cubic PBC lattice");

        let mut sites = Vec::with_capacity(self.n_sites());
        for coords in self.dims.iter() {
            let id = self.dims.site_id(coords[0], coords[1], coords[2]);
            let mut neighbours = self.neighbour_candidates(coords);
            neighbours.sort_unstable();
            let unique = 1 + neighbours.windows(2).filter(|w| w[0] != w[1]).count();
            if unique != COORDINATION {
                return Err(LatticeError::DegenerateSite {
                    site_id: id,
                    unique_neighbours: unique,
                });
            }
            sites.push(LatticeSite {
                id,
                frac: self.frac_coords(coords),
                neighbours,
            });
        }

        debug!(n_sites = sites.len(), "lattice topology validated");
        Ok(LatticeTopology {
            dims: self.dims,
            site_type_name: self.site_type_name.clone(),
            sites,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compliance;
    use proptest::prelude::*;

    // ── Constructor tests ─────────────────────────────────────────

    #[test]
    fn new_non_positive_dims() {
        for (dims, axis) in [((0, 4, 4), "nx"), ((4, -1, 4), "ny"), ((4, 4, 0), "nz")] {
            let err = CubicLattice::new(dims.0, dims.1, dims.2).unwrap_err();
            match err {
                LatticeError::Config(ConfigError::NonPositiveDimension { axis: a, .. }) => {
                    assert_eq!(a, axis)
                }
                other => panic!("expected config error, got {other:?}"),
            }
        }
    }

    #[test]
    fn site_type_name_must_be_a_token() {
        let l = CubicLattice::new(3, 3, 3).unwrap();
        assert_eq!(l.site_type_name(), "G");
        assert_eq!(
            l.clone().with_site_type_name("brn").unwrap().site_type_name(),
            "brn"
        );
        assert!(l.clone().with_site_type_name("").is_err());
        assert!(l.with_site_type_name("two words").is_err());
    }

    // ── Numbering tests ───────────────────────────────────────────

    #[test]
    fn site_id_wraps_each_axis() {
        let l = CubicLattice::new(4, 3, 5).unwrap();
        assert_eq!(l.site_id(0, 0, 0), 1);
        assert_eq!(l.site_id(3, 2, 4), 60);
        assert_eq!(l.site_id(4, 0, 0), 1);
        assert_eq!(l.site_id(-1, -1, -1), 60);
        assert_eq!(l.site_id(1, 1, 1), 1 + 1 + 4 + 12);
    }

    #[test]
    fn coords_of_rejects_out_of_range() {
        let l = CubicLattice::new(3, 3, 3).unwrap();
        assert_eq!(l.coords_of(0), None);
        assert_eq!(l.coords_of(28), None);
        assert_eq!(l.coords_of(1), Some([0, 0, 0]));
    }

    #[test]
    fn frac_coords() {
        let l = CubicLattice::new(4, 2, 5).unwrap();
        assert_eq!(l.frac_coords([1, 1, 4]), [0.25, 0.5, 0.8]);
    }

    // ── Neighbour tests ───────────────────────────────────────────

    #[test]
    fn corner_neighbours_wrap() {
        let l = CubicLattice::new(3, 3, 3).unwrap();
        // +x 2, -x 3, +y 4, -y 7, +z 10, -z 19.
        assert_eq!(l.neighbour_candidates([0, 0, 0]), [2, 3, 4, 7, 10, 19]);
        assert_eq!(l.neighbours_of(1).unwrap().as_slice(), &[2, 3, 4, 7, 10, 19]);
    }

    #[test]
    fn interior_neighbours() {
        let l = CubicLattice::new(5, 5, 5).unwrap();
        let id = l.site_id(2, 2, 2);
        let n = l.neighbours_of(id).unwrap();
        assert_eq!(
            n.as_slice(),
            &[id - 25, id - 5, id - 1, id + 1, id + 5, id + 25]
        );
    }

    #[test]
    fn extent_two_collapses_neighbours() {
        let l = CubicLattice::new(2, 3, 3).unwrap();
        assert_eq!(l.neighbours_of(1).unwrap().len(), 5);
    }

    #[test]
    fn extent_one_points_at_self() {
        let l = CubicLattice::new(1, 1, 1).unwrap();
        assert_eq!(l.neighbours_of(1).unwrap().as_slice(), &[1]);
    }

    // ── Build tests ───────────────────────────────────────────────

    #[test]
    fn degenerate_lattices_fail_at_site_one() {
        for (dims, unique) in [
            ((1, 1, 1), 1),
            ((2, 2, 2), 3),
            ((2, 3, 3), 5),
            ((3, 3, 2), 5),
            ((1, 4, 4), 5),
        ] {
            let l = CubicLattice::new(dims.0, dims.1, dims.2).unwrap();
            match l.build() {
                Err(LatticeError::DegenerateSite {
                    site_id,
                    unique_neighbours,
                }) => {
                    assert_eq!(site_id, 1, "dims {dims:?}");
                    assert_eq!(unique_neighbours, unique, "dims {dims:?}");
                }
                other => panic!("dims {dims:?}: expected degenerate error, got {other:?}"),
            }
        }
    }

    #[test]
    fn built_sites_match_lookup() {
        let l = CubicLattice::new(3, 4, 5).unwrap();
        let topo = l.build().unwrap();
        assert_eq!(topo.len(), 60);
        for site in topo.sites() {
            let coords = l.coords_of(site.id).unwrap();
            assert_eq!(site.frac, l.frac_coords(coords));
            assert_eq!(
                site.neighbours.as_slice(),
                l.neighbours_of(site.id).unwrap().as_slice()
            );
        }
        assert_eq!(topo.site(60).map(|s| s.id), Some(60));
        assert!(topo.site(0).is_none());
        assert!(topo.site(61).is_none());
    }

    #[test]
    fn compliance_3x3x3() {
        let topo = CubicLattice::new(3, 3, 3).unwrap().build().unwrap();
        compliance::run_full_compliance(&topo);
    }

    #[test]
    fn compliance_4x3x7() {
        let topo = CubicLattice::new(4, 3, 7).unwrap().build().unwrap();
        compliance::run_full_compliance(&topo);
    }

    proptest! {
        #[test]
        fn id_coords_round_trip(nx in 1i64..12, ny in 1i64..12, nz in 1i64..12, seed in 0u32..10_000) {
            let l = CubicLattice::new(nx, ny, nz).unwrap();
            let id = seed % l.n_sites() as u32 + 1;
            let [ix, iy, iz] = l.coords_of(id).unwrap();
            prop_assert_eq!(l.site_id(ix as i64, iy as i64, iz as i64), id);
        }

        #[test]
        fn valid_dims_always_build(nx in 3i64..8, ny in 3i64..8, nz in 3i64..8) {
            let topo = CubicLattice::new(nx, ny, nz).unwrap().build().unwrap();
            prop_assert_eq!(topo.len(), (nx * ny * nz) as usize);
            compliance::run_full_compliance(&topo);
        }

        #[test]
        fn any_small_extent_fails(small in 1i64..3, a in 3i64..6, b in 3i64..6, axis in 0usize..3) {
            let mut dims = [a, b, a];
            dims[axis] = small;
            let l = CubicLattice::new(dims[0], dims[1], dims[2]).unwrap();
            let is_degenerate = matches!(l.build(), Err(LatticeError::DegenerateSite { .. }));
            prop_assert!(is_degenerate);
        }
    }
}

//! Zacros `initial_state` emitter.
//!
//! Every grid row whose label has a species becomes one
//! `seed_on_sites <species> <site_id>` line. The site ID is the 1-based
//! row number, so the grid must list its voxels in canonical order;
//! anything else is rejected before a line is written.

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use indexmap::IndexMap;
use memkmc_core::{ConfigError, GridDims};
use memkmc_voxel::{parse_mapping, ClassId, GridFile};
use tracing::info;

use crate::error::ZacrosError;

/// Mapping from grid labels to Zacros surface species.
///
/// # Examples
///
/// ```
/// use memkmc_voxel::ClassId;
/// use memkmc_zacros::LabelSpeciesMap;
///
/// let map = LabelSpeciesMap::from_reader("1 mem*\n3 mw*\n".as_bytes()).unwrap();
/// assert_eq!(map.species_of(ClassId(3)), Some("mw*"));
/// assert_eq!(map.species_of(ClassId(0)), None);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LabelSpeciesMap {
    entries: IndexMap<u32, String>,
}

impl LabelSpeciesMap {
    /// Build from `(label, species)` pairs.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (u32, S)>,
        S: Into<String>,
    {
        Self {
            entries: pairs.into_iter().map(|(l, s)| (l, s.into())).collect(),
        }
    }

    /// Parse a `label species` file. Fails if it has no entries.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, ZacrosError> {
        let entries = parse_mapping::<u32, _>(reader).map_err(ZacrosError::Mapping)?;
        if entries.is_empty() {
            return Err(ConfigError::InvalidParameter {
                name: "mapping",
                reason: "no label-to-species entries found".into(),
            }
            .into());
        }
        Ok(Self { entries })
    }

    /// Open and parse a mapping file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ZacrosError> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(BufReader::new(file))
    }

    /// Species of `label`, if mapped.
    pub fn species_of(&self, label: ClassId) -> Option<&str> {
        self.entries.get(&label.0).map(String::as_str)
    }

    /// Number of mapped labels.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` if nothing is mapped.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Lattice extents of `grid`, provided its rows are exactly the canonical
/// enumeration of those extents.
pub fn canonical_dims(grid: &GridFile) -> Result<GridDims, ZacrosError> {
    let dims = grid.dims()?;
    if !grid.is_canonical() {
        return Err(ZacrosError::NonCanonicalGrid {
            dims: dims.as_array(),
            rows: grid.len(),
        });
    }
    Ok(dims)
}

/// Write the `initial_state` block for `grid`.
///
/// Returns the number of seeded sites. Rows with unmapped labels are
/// skipped. Fails with [`ZacrosError::NonCanonicalGrid`] before writing
/// anything if row numbers would not match lattice site IDs.
pub fn write_initial_state(
    w: &mut dyn Write,
    grid: &GridFile,
    species: &LabelSpeciesMap,
) -> Result<usize, ZacrosError> {
    canonical_dims(grid)?;
    writeln!(w, "initial_state")?;
    let mut seeded = 0usize;
    for (site_id, row) in grid.sites() {
        if let Some(name) = species.species_of(row.label) {
            writeln!(w, "seed_on_sites {name} {site_id}")?;
            seeded += 1;
        }
    }
    writeln!(w, "end_initial_state")?;
    info!(sites = grid.len(), seeded, "wrote initial state");
    Ok(seeded)
}

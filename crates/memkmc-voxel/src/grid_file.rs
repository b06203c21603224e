//! Flat grid file format.
//!
//! ```text
//! <voxel count>
//! <blank or comment line>
//! <label> <ix> <iy> <iz>
//! ...
//! ```
//!
//! Rows are written in canonical order, so the Nth data row describes the
//! same `(ix, iy, iz)` as lattice site `N`.

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use memkmc_core::GridDims;

use crate::class::ClassId;
use crate::error::VoxelError;
use crate::grid::LabelGrid;

/// Upper bound on rows reserved up front from the header count.
const PREALLOC_ROWS: usize = 1 << 16;

/// Serialize `grid` in canonical order.
pub fn write_grid(w: &mut dyn Write, grid: &LabelGrid) -> Result<(), VoxelError> {
    writeln!(w, "{}", grid.len())?;
    writeln!(w)?;
    for ([ix, iy, iz], label) in grid.iter() {
        writeln!(w, "{label} {ix} {iy} {iz}")?;
    }
    Ok(())
}

/// One data row of a grid file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridRow {
    /// Voxel label.
    pub label: ClassId,
    /// Voxel coordinates.
    pub coords: [u32; 3],
}

/// A parsed grid file, rows kept in file order.
///
/// Row `i` (0-based) belongs to lattice site `i + 1`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridFile {
    rows: Vec<GridRow>,
}

impl GridFile {
    /// Parse a grid file.
    ///
    /// The first line must hold the voxel count and must agree with the
    /// number of data rows. The second line is ignored. Blank lines after
    /// it are skipped and do not consume a site ID.
    pub fn read<R: BufRead>(reader: R) -> Result<Self, VoxelError> {
        let mut lines = reader.lines();
        let declared = match lines.next() {
            Some(line) => {
                let line = line?;
                line.trim().parse::<usize>().map_err(|_| {
                    VoxelError::parse(1, format!("expected voxel count, got '{}'", line.trim()))
                })?
            }
            None => return Err(VoxelError::parse(1, "empty grid file")),
        };
        if let Some(line) = lines.next() {
            line?;
        }

        let mut rows = Vec::with_capacity(declared.min(PREALLOC_ROWS));
        for (i, line) in lines.enumerate() {
            let line = line?;
            let line_no = i + 3;
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.is_empty() {
                continue;
            }
            if fields.len() < 4 {
                return Err(VoxelError::parse(
                    line_no,
                    format!("expected 'label ix iy iz', got {} fields", fields.len()),
                ));
            }
            let mut values = [0u32; 4];
            for (slot, field) in values.iter_mut().zip(&fields) {
                *slot = field.parse().map_err(|_| {
                    VoxelError::parse(line_no, format!("invalid non-negative integer '{field}'"))
                })?;
            }
            rows.push(GridRow {
                label: ClassId(values[0]),
                coords: [values[1], values[2], values[3]],
            });
        }

        if rows.len() != declared {
            return Err(VoxelError::parse(
                1,
                format!("header declares {declared} voxels, found {} rows", rows.len()),
            ));
        }
        Ok(Self { rows })
    }

    /// Open and parse a grid file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, VoxelError> {
        let file = File::open(path.as_ref())?;
        Self::read(BufReader::new(file))
    }

    /// Rows in file order.
    pub fn rows(&self) -> &[GridRow] {
        &self.rows
    }

    /// `(site_id, row)` pairs; site IDs start at 1.
    pub fn sites(&self) -> impl Iterator<Item = (u32, &GridRow)> {
        self.rows.iter().enumerate().map(|(i, r)| (i as u32 + 1, r))
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// `true` if the file declared zero voxels.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Extents inferred as `max + 1` of each coordinate column.
    pub fn dims(&self) -> Result<GridDims, VoxelError> {
        if self.rows.is_empty() {
            return Err(VoxelError::parse(1, "grid has no rows"));
        }
        let mut max = [0u32; 3];
        for row in &self.rows {
            for axis in 0..3 {
                max[axis] = max[axis].max(row.coords[axis]);
            }
        }
        Ok(GridDims::new(
            max[0] as i64 + 1,
            max[1] as i64 + 1,
            max[2] as i64 + 1,
        )?)
    }

    /// `true` if rows cover the inferred extents exactly once, in
    /// canonical order.
    pub fn is_canonical(&self) -> bool {
        let Ok(dims) = self.dims() else {
            return false;
        };
        self.rows.len() == dims.cell_count()
            && self.rows.iter().zip(dims.iter()).all(|(r, c)| r.coords == c)
    }

    /// Rebuild the label grid. Fails unless the rows are canonical.
    pub fn to_label_grid(&self) -> Result<LabelGrid, VoxelError> {
        let dims = self.dims()?;
        if !self.is_canonical() {
            return Err(VoxelError::parse(
                3,
                "rows are not in canonical iz/iy/ix order",
            ));
        }
        let labels = self.rows.iter().map(|r| r.label).collect();
        LabelGrid::from_labels(dims, labels)
            .ok_or_else(|| VoxelError::parse(1, "row count does not match inferred extents"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_grid() -> LabelGrid {
        let dims = GridDims::new(2, 1, 2).unwrap();
        LabelGrid::from_labels(dims, vec![ClassId(3), ClassId(1), ClassId(0), ClassId(2)]).unwrap()
    }

    #[test]
    fn writer_exact_layout() {
        let mut out = Vec::new();
        write_grid(&mut out, &sample_grid()).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "4\n\n3 0 0 0\n1 1 0 0\n0 0 0 1\n2 1 0 1\n"
        );
    }

    #[test]
    fn read_back_written_grid() {
        let grid = sample_grid();
        let mut out = Vec::new();
        write_grid(&mut out, &grid).unwrap();
        let file = GridFile::read(out.as_slice()).unwrap();
        assert!(file.is_canonical());
        assert_eq!(file.dims().unwrap(), grid.dims());
        assert_eq!(file.to_label_grid().unwrap(), grid);
    }

    #[test]
    fn nth_row_is_site_n() {
        let text = "3\ncomment line\n1 0 0 0\n\n4 1 0 0\n2 2 0 0\n";
        let file = GridFile::read(text.as_bytes()).unwrap();
        let sites: Vec<_> = file.sites().map(|(id, r)| (id, r.label.0)).collect();
        assert_eq!(sites, vec![(1, 1), (2, 4), (3, 2)]);
    }

    #[test]
    fn count_mismatch_is_rejected() {
        let err = GridFile::read("3\n\n1 0 0 0\n".as_bytes()).unwrap_err();
        assert!(err.to_string().contains("declares 3"));
    }

    #[test]
    fn malformed_row_reports_line() {
        let err = GridFile::read("2\n\n1 0 0 0\n1 x 0 0\n".as_bytes()).unwrap_err();
        assert!(matches!(err, VoxelError::Parse { line: 4, .. }));

        let err = GridFile::read("1\n\n1 0 0\n".as_bytes()).unwrap_err();
        assert!(matches!(err, VoxelError::Parse { line: 3, .. }));
    }

    #[test]
    fn bad_header_is_rejected() {
        assert!(matches!(
            GridFile::read("".as_bytes()),
            Err(VoxelError::Parse { line: 1, .. })
        ));
        assert!(matches!(
            GridFile::read("four\n\n".as_bytes()),
            Err(VoxelError::Parse { line: 1, .. })
        ));
    }

    #[test]
    fn oversized_header_count_is_a_parse_error() {
        let err = GridFile::read("18446744073709551615\n\n1 0 0 0\n".as_bytes()).unwrap_err();
        assert!(matches!(err, VoxelError::Parse { line: 1, .. }));
    }

    #[test]
    fn shuffled_rows_are_not_canonical() {
        let text = "2\n\n1 1 0 0\n1 0 0 0\n";
        let file = GridFile::read(text.as_bytes()).unwrap();
        assert_eq!(file.dims().unwrap().as_array(), [2, 1, 1]);
        assert!(!file.is_canonical());
        assert!(file.to_label_grid().is_err());
    }
}

//! LAMMPS text trajectory (`.lammpstrj`) reader.
//!
//! Each frame is a sequence of `ITEM:` blocks:
//!
//! ```text
//! ITEM: TIMESTEP
//! <step>
//! ITEM: NUMBER OF ATOMS
//! <n>
//! ITEM: BOX BOUNDS pp pp pp
//! <xlo> <xhi>
//! <ylo> <yhi>
//! <zlo> <zhi>
//! ITEM: ATOMS id type x y z ...
//! <n lines>
//! ```
//!
//! The `type`, `x`, `y` and `z` columns are located by name, so any dump
//! column order works.

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;
use std::str::FromStr;

use indexmap::IndexMap;
use memkmc_core::{Particle, SpatialBox};
use tracing::info;

use crate::error::StructureError;
use crate::structure::Structure;

/// Upper bound on atoms reserved up front from a frame's atom count.
const PREALLOC_ATOMS: usize = 1 << 16;

/// Which frame of a trajectory to use.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FrameSelect {
    /// The final frame.
    #[default]
    Last,
    /// The frame at a 0-based position in file order.
    Index(usize),
}

impl FromStr for FrameSelect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "last" {
            return Ok(Self::Last);
        }
        s.parse()
            .map(Self::Index)
            .map_err(|_| format!("frame must be 'last' or a non-negative integer, got '{s}'"))
    }
}

impl fmt::Display for FrameSelect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Last => write!(f, "last"),
            Self::Index(i) => write!(f, "{i}"),
        }
    }
}

/// One trajectory frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    /// Timestep as written in the dump.
    pub timestep: u64,
    /// Cell and atoms of this frame.
    pub structure: Structure,
}

/// Reads frames one at a time from any `BufRead` source.
pub struct TrajectoryReader<R: BufRead> {
    lines: Lines<R>,
    line_no: usize,
    frames_read: usize,
    done: bool,
}

impl<R: BufRead> TrajectoryReader<R> {
    /// Wrap a reader positioned at the start of a trajectory.
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_no: 0,
            frames_read: 0,
            done: false,
        }
    }

    /// Number of frames read so far.
    pub fn frames_read(&self) -> usize {
        self.frames_read
    }

    fn next_line(&mut self) -> Result<Option<String>, StructureError> {
        match self.lines.next() {
            Some(line) => {
                self.line_no += 1;
                Ok(Some(line?))
            }
            None => Ok(None),
        }
    }

    fn expect_line(&mut self, what: &str) -> Result<String, StructureError> {
        self.next_line()?.ok_or_else(|| {
            StructureError::parse(self.line_no + 1, format!("unexpected end of file, expected {what}"))
        })
    }

    fn expect_item(&mut self, item: &str) -> Result<String, StructureError> {
        let line = self.expect_line(item)?;
        if !line.starts_with(item) {
            return Err(StructureError::parse(
                self.line_no,
                format!("expected '{item}', got '{}'", line.trim()),
            ));
        }
        Ok(line)
    }

    fn expect_value<T: FromStr>(&mut self, what: &str) -> Result<T, StructureError> {
        let line = self.expect_line(what)?;
        line.trim()
            .parse()
            .map_err(|_| StructureError::parse(self.line_no, format!("invalid {what} '{}'", line.trim())))
    }

    /// Read the next frame, or `None` at end of file.
    pub fn next_frame(&mut self) -> Result<Option<Frame>, StructureError> {
        // Anything before the next TIMESTEP item is ignored.
        loop {
            match self.next_line()? {
                None => return Ok(None),
                Some(line) if line.starts_with("ITEM: TIMESTEP") => break,
                Some(_) => {}
            }
        }
        let timestep = self.expect_value("timestep")?;
        self.expect_item("ITEM: NUMBER OF ATOMS")?;
        let n_atoms: usize = self.expect_value("atom count")?;

        self.expect_item("ITEM: BOX BOUNDS")?;
        let mut lo = [0.0; 3];
        let mut hi = [0.0; 3];
        for axis in 0..3 {
            let line = self.expect_line("box bounds")?;
            let mut fields = line.split_whitespace();
            let mut bound = || -> Result<f64, StructureError> {
                let field = fields.next().unwrap_or("");
                field.parse().map_err(|_| {
                    StructureError::parse(self.line_no, format!("invalid box bound '{field}'"))
                })
            };
            lo[axis] = bound()?;
            hi[axis] = bound()?;
        }
        let cell = SpatialBox::from_bounds(lo, hi)?;

        let header = self.expect_item("ITEM: ATOMS")?;
        let header_line = self.line_no;
        let columns: Vec<&str> = header.split_whitespace().skip(2).collect();
        let column = |name: &'static str| {
            columns
                .iter()
                .position(|c| *c == name)
                .ok_or(StructureError::MissingColumn {
                    name,
                    line: header_line,
                })
        };
        let idx_type = column("type")?;
        let idx = [column("x")?, column("y")?, column("z")?];
        let width = columns.len();

        let mut particles = Vec::with_capacity(n_atoms.min(PREALLOC_ATOMS));
        for _ in 0..n_atoms {
            let line = self.expect_line("atom line")?;
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() < width {
                return Err(StructureError::parse(
                    self.line_no,
                    format!("atom line has {} columns, header names {width}", fields.len()),
                ));
            }
            let parse = |i: usize, what: &str| -> Result<f64, StructureError> {
                fields[i].parse().map_err(|_| {
                    StructureError::parse(self.line_no, format!("invalid {what} '{}'", fields[i]))
                })
            };
            let type_id = fields[idx_type].parse().map_err(|_| {
                StructureError::parse(
                    self.line_no,
                    format!("invalid atom type '{}'", fields[idx_type]),
                )
            })?;
            let position = [
                parse(idx[0], "x")?,
                parse(idx[1], "y")?,
                parse(idx[2], "z")?,
            ];
            particles.push(Particle::new(type_id, position));
        }

        self.frames_read += 1;
        Ok(Some(Frame {
            timestep,
            structure: Structure {
                cell,
                particles,
                masses: IndexMap::new(),
            },
        }))
    }

    /// Convert into a frame iterator.
    pub fn frames(self) -> FrameIter<R> {
        FrameIter { reader: self }
    }
}

/// Iterator adapter over trajectory frames.
pub struct FrameIter<R: BufRead> {
    reader: TrajectoryReader<R>,
}

impl<R: BufRead> Iterator for FrameIter<R> {
    type Item = Result<Frame, StructureError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.reader.done {
            return None;
        }
        match self.reader.next_frame() {
            Ok(Some(frame)) => Some(Ok(frame)),
            Ok(None) => {
                self.reader.done = true;
                None
            }
            Err(e) => {
                self.reader.done = true;
                Some(Err(e))
            }
        }
    }
}

/// Read the selected frame of a trajectory.
///
/// `Index(k)` stops reading after frame `k`; `Last` reads the whole file.
pub fn read_trajectory<R: BufRead>(reader: R, select: FrameSelect) -> Result<Frame, StructureError> {
    let mut frames = TrajectoryReader::new(reader).frames();
    let mut last = None;
    let mut count = 0usize;
    while let Some(frame) = frames.next() {
        let frame = frame?;
        if select == FrameSelect::Index(count) {
            last = Some(frame);
            count += 1;
            break;
        }
        count += 1;
        if select == FrameSelect::Last {
            last = Some(frame);
        }
    }
    let frame = match (select, last) {
        (_, Some(frame)) => frame,
        (_, None) if count == 0 => return Err(StructureError::NoFrames),
        (FrameSelect::Index(requested), None) => {
            return Err(StructureError::FrameOutOfRange {
                requested,
                available: count,
            })
        }
        (FrameSelect::Last, None) => return Err(StructureError::NoFrames),
    };
    info!(
        frame = %select,
        timestep = frame.timestep,
        atoms = frame.structure.len(),
        "read LAMMPS trajectory frame"
    );
    Ok(frame)
}

/// Open a trajectory and read the selected frame.
pub fn load_trajectory<P: AsRef<Path>>(path: P, select: FrameSelect) -> Result<Frame, StructureError> {
    let file = File::open(path.as_ref())?;
    read_trajectory(BufReader::new(file), select)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(step: u64, atoms: &[(i32, [f64; 3])]) -> String {
        let mut s = format!(
            "ITEM: TIMESTEP\n{step}\nITEM: NUMBER OF ATOMS\n{}\nITEM: BOX BOUNDS pp pp pp\n0 4\n0 4\n0 4\nITEM: ATOMS id type x y z\n",
            atoms.len()
        );
        for (i, (t, [x, y, z])) in atoms.iter().enumerate() {
            s.push_str(&format!("{} {t} {x} {y} {z}\n", i + 1));
        }
        s
    }

    fn three_frames() -> String {
        [
            frame(0, &[(1, [0.5, 0.5, 0.5])]),
            frame(10, &[(2, [1.5, 0.5, 0.5])]),
            frame(20, &[(3, [2.5, 0.5, 0.5])]),
        ]
        .concat()
    }

    // ── Frame selection ─────────────────────────────────────────

    #[test]
    fn frame_select_parses() {
        assert_eq!("last".parse::<FrameSelect>(), Ok(FrameSelect::Last));
        assert_eq!("3".parse::<FrameSelect>(), Ok(FrameSelect::Index(3)));
        assert!("-1".parse::<FrameSelect>().is_err());
        assert!("first".parse::<FrameSelect>().is_err());
        assert_eq!(FrameSelect::Index(2).to_string(), "2");
    }

    #[test]
    fn last_frame_by_default() {
        let f = read_trajectory(three_frames().as_bytes(), FrameSelect::default()).unwrap();
        assert_eq!(f.timestep, 20);
        assert_eq!(f.structure.particles[0].type_id, 3);
    }

    #[test]
    fn indexed_frames() {
        for (k, step) in [(0, 0), (1, 10), (2, 20)] {
            let f = read_trajectory(three_frames().as_bytes(), FrameSelect::Index(k)).unwrap();
            assert_eq!(f.timestep, step);
        }
    }

    #[test]
    fn index_past_end() {
        let err = read_trajectory(three_frames().as_bytes(), FrameSelect::Index(3)).unwrap_err();
        assert!(matches!(
            err,
            StructureError::FrameOutOfRange {
                requested: 3,
                available: 3
            }
        ));
    }

    #[test]
    fn empty_trajectory_has_no_frames() {
        for select in [FrameSelect::Last, FrameSelect::Index(0)] {
            assert!(matches!(
                read_trajectory("".as_bytes(), select),
                Err(StructureError::NoFrames)
            ));
        }
    }

    #[test]
    fn index_stops_before_a_corrupt_tail() {
        let text = frame(0, &[(1, [0.5, 0.5, 0.5])]) + "ITEM: TIMESTEP\nnot-a-number\n";
        assert!(read_trajectory(text.as_bytes(), FrameSelect::Index(0)).is_ok());
        assert!(matches!(
            read_trajectory(text.as_bytes(), FrameSelect::Last),
            Err(StructureError::Parse { line: 12, .. })
        ));
    }

    // ── Columns ─────────────────────────────────────────────────

    #[test]
    fn columns_located_by_name() {
        let text = "ITEM: TIMESTEP\n5\nITEM: NUMBER OF ATOMS\n1\nITEM: BOX BOUNDS pp pp pp\n\
                    -1 1\n-1 1\n-1 1\nITEM: ATOMS z y x type id\n0.1 0.2 0.3 4 1\n";
        let f = read_trajectory(text.as_bytes(), FrameSelect::Last).unwrap();
        assert_eq!(f.structure.particles[0], Particle::new(4, [0.3, 0.2, 0.1]));
        assert_eq!(f.structure.cell.origin(), [-1.0, -1.0, -1.0]);
    }

    #[test]
    fn missing_column_is_reported() {
        let text = "ITEM: TIMESTEP\n5\nITEM: NUMBER OF ATOMS\n1\nITEM: BOX BOUNDS pp pp pp\n\
                    0 1\n0 1\n0 1\nITEM: ATOMS id type xs ys zs\n1 1 0.1 0.2 0.3\n";
        assert!(matches!(
            read_trajectory(text.as_bytes(), FrameSelect::Last),
            Err(StructureError::MissingColumn { name: "x", line: 9 })
        ));
    }

    #[test]
    fn truncated_frame() {
        let text = "ITEM: TIMESTEP\n5\nITEM: NUMBER OF ATOMS\n2\nITEM: BOX BOUNDS pp pp pp\n\
                    0 1\n0 1\n0 1\nITEM: ATOMS id type x y z\n1 1 0.1 0.2 0.3\n";
        assert!(matches!(
            read_trajectory(text.as_bytes(), FrameSelect::Last),
            Err(StructureError::Parse { line: 11, .. })
        ));
    }

    #[test]
    fn oversized_atom_count_is_a_parse_error() {
        let text = "ITEM: TIMESTEP\n5\nITEM: NUMBER OF ATOMS\n18446744073709551615\n\
                    ITEM: BOX BOUNDS pp pp pp\n0 1\n0 1\n0 1\nITEM: ATOMS id type x y z\n\
                    1 1 0.1 0.2 0.3\n";
        assert!(matches!(
            read_trajectory(text.as_bytes(), FrameSelect::Last),
            Err(StructureError::Parse { line: 11, .. })
        ));
    }

    #[test]
    fn frames_iterator_counts() {
        let text = three_frames();
        let mut reader = TrajectoryReader::new(text.as_bytes());
        while reader.next_frame().unwrap().is_some() {}
        assert_eq!(reader.frames_read(), 3);
        let n = TrajectoryReader::new(three_frames().as_bytes()).frames().count();
        assert_eq!(n, 3);
    }
}

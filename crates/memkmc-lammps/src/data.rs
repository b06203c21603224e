//! LAMMPS data file reader.
//!
//! Only what voxelization needs is read: the atom count, the box bounds,
//! the `Masses` section and the `Atoms` section. Topology sections
//! (`Bonds`, `Angles`, ...) and `Velocities` are skipped.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use indexmap::IndexMap;
use memkmc_core::{Particle, SpatialBox};
use tracing::{debug, info};

use crate::error::StructureError;
use crate::structure::{AtomStyle, Structure};

#[derive(Default)]
struct Header {
    atoms: Option<usize>,
    atom_types: Option<usize>,
    bounds: [Option<(f64, f64)>; 3],
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Section {
    Masses,
    Atoms,
    Skipped,
}

/// Strip a trailing `#` comment.
fn content(line: &str) -> &str {
    line.split('#').next().unwrap_or("").trim()
}

fn parse_num<T: std::str::FromStr>(field: &str, line: usize, what: &str) -> Result<T, StructureError> {
    field
        .parse()
        .map_err(|_| StructureError::parse(line, format!("invalid {what} '{field}'")))
}

/// Section titles start with a letter; header and body lines with a number.
fn is_section_title(text: &str) -> bool {
    text.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
}

fn parse_header_line(header: &mut Header, text: &str, line: usize) -> Result<(), StructureError> {
    let fields: Vec<&str> = text.split_whitespace().collect();
    let Some(first) = fields.first() else {
        return Ok(());
    };
    if text.ends_with("atom types") {
        header.atom_types = Some(parse_num(first, line, "atom type count")?);
    } else if text.ends_with("atoms") {
        header.atoms = Some(parse_num(first, line, "atom count")?);
    } else {
        for (axis, keyword) in ["xlo xhi", "ylo yhi", "zlo zhi"].into_iter().enumerate() {
            if text.ends_with(keyword) && fields.len() >= 4 {
                let lo = parse_num(fields[0], line, "box bound")?;
                let hi = parse_num(fields[1], line, "box bound")?;
                header.bounds[axis] = Some((lo, hi));
            }
        }
    }
    Ok(())
}

fn parse_atom_line(fields: &[&str], style: &AtomStyle, line: usize) -> Result<Particle, StructureError> {
    if fields.len() < style.min_columns() {
        return Err(StructureError::parse(
            line,
            format!(
                "atom line has {} columns, style needs at least {}",
                fields.len(),
                style.min_columns()
            ),
        ));
    }
    let type_id = parse_num(fields[style.type_column()], line, "atom type")?;
    let x = style.x_column(fields.len());
    let position = [
        parse_num(fields[x], line, "coordinate")?,
        parse_num(fields[x + 1], line, "coordinate")?,
        parse_num(fields[x + 2], line, "coordinate")?,
    ];
    Ok(Particle::new(type_id, position))
}

/// Read a LAMMPS data file.
///
/// The first line is the title and is ignored. The `Atoms` section is
/// read according to the style named in its title comment
/// (`Atoms # full`); without one, `atomic` is assumed.
pub fn read_data<R: BufRead>(reader: R) -> Result<Structure, StructureError> {
    let mut header = Header::default();
    let mut masses = IndexMap::new();
    let mut particles = Vec::new();
    let mut style = AtomStyle::Atomic;
    let mut seen_atoms = false;

    let mut section: Option<Section> = None;
    // Body rows started for the current section; a blank line then ends it.
    let mut in_body = false;

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = i + 1;
        if line_no == 1 {
            continue;
        }
        let text = content(&line);

        if text.is_empty() {
            if line.trim().is_empty() && in_body {
                section = Some(Section::Skipped);
                in_body = false;
            }
            continue;
        }

        if is_section_title(text) {
            in_body = false;
            section = Some(match text {
                "Masses" => Section::Masses,
                "Atoms" => {
                    if seen_atoms {
                        return Err(StructureError::parse(line_no, "duplicate Atoms section"));
                    }
                    seen_atoms = true;
                    style = AtomStyle::from_title_comment(line.split_once('#').map(|(_, c)| c));
                    Section::Atoms
                }
                _ => Section::Skipped,
            });
            continue;
        }

        match section {
            None => parse_header_line(&mut header, text, line_no)?,
            Some(Section::Masses) => {
                in_body = true;
                let fields: Vec<&str> = text.split_whitespace().collect();
                if fields.len() >= 2 {
                    let t = parse_num(fields[0], line_no, "atom type")?;
                    let m = parse_num(fields[1], line_no, "mass")?;
                    masses.insert(t, m);
                }
            }
            Some(Section::Atoms) => {
                in_body = true;
                let fields: Vec<&str> = text.split_whitespace().collect();
                particles.push(parse_atom_line(&fields, &style, line_no)?);
            }
            Some(Section::Skipped) => in_body = true,
        }
    }

    let n_atoms = header.atoms.ok_or(StructureError::MissingHeader { field: "atoms" })?;
    header
        .atom_types
        .ok_or(StructureError::MissingHeader { field: "atom types" })?;
    let mut lo = [0.0; 3];
    let mut hi = [0.0; 3];
    for (axis, field) in ["xlo xhi", "ylo yhi", "zlo zhi"].into_iter().enumerate() {
        let (l, h) = header.bounds[axis].ok_or(StructureError::MissingHeader { field })?;
        lo[axis] = l;
        hi[axis] = h;
    }
    if !seen_atoms {
        return Err(StructureError::MissingSection { name: "Atoms" });
    }
    if particles.len() != n_atoms {
        return Err(StructureError::AtomCountMismatch {
            expected: n_atoms,
            found: particles.len(),
        });
    }

    let cell = SpatialBox::from_bounds(lo, hi)?;
    debug!(?style, masses = masses.len(), "parsed data file sections");
    info!(atoms = particles.len(), ?lo, ?hi, "read LAMMPS data file");
    Ok(Structure {
        cell,
        particles,
        masses,
    })
}

/// Open and read a LAMMPS data file.
pub fn load_data<P: AsRef<Path>>(path: P) -> Result<Structure, StructureError> {
    let file = File::open(path.as_ref())?;
    read_data(BufReader::new(file))
}

//! Parsed structure and atom-style column layouts.

use indexmap::IndexMap;
use memkmc_core::{Particle, SpatialBox};

/// A single configuration: cell, atoms and optional per-type masses.
#[derive(Clone, Debug, PartialEq)]
pub struct Structure {
    /// Simulation cell.
    pub cell: SpatialBox,
    /// Atoms in file order.
    pub particles: Vec<Particle>,
    /// Per-type masses from a `Masses` section; empty for trajectories.
    pub masses: IndexMap<i32, f64>,
}

impl Structure {
    /// Number of atoms.
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// `true` if there are no atoms.
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

/// Column layout of a data file `Atoms` section.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AtomStyle {
    /// `id type x y z`
    Atomic,
    /// `id type q x y z`
    Charge,
    /// `id mol type q x y z`
    Full,
    /// Any other style: type in column 2, position in the last three columns.
    Other(String),
}

impl AtomStyle {
    /// Style named by the comment on an `Atoms` title line.
    ///
    /// A missing comment means `atomic`.
    pub fn from_title_comment(comment: Option<&str>) -> Self {
        let Some(name) = comment.and_then(|c| c.split_whitespace().next()) else {
            return Self::Atomic;
        };
        if name.starts_with("atomic") {
            Self::Atomic
        } else if name.starts_with("charge") {
            Self::Charge
        } else if name.starts_with("full") {
            Self::Full
        } else {
            Self::Other(name.to_string())
        }
    }

    /// Minimum number of columns an atom line needs.
    pub fn min_columns(&self) -> usize {
        match self {
            Self::Atomic => 5,
            Self::Charge => 6,
            Self::Full => 7,
            Self::Other(_) => 5,
        }
    }

    /// Column index of the atom type.
    pub fn type_column(&self) -> usize {
        match self {
            Self::Full => 2,
            _ => 1,
        }
    }

    /// Column index of `x`, given the number of columns on the line.
    pub fn x_column(&self, n_columns: usize) -> usize {
        match self {
            Self::Atomic => 2,
            Self::Charge => 3,
            Self::Full => 4,
            Self::Other(_) => n_columns - 3,
        }
    }
}

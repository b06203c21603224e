//! Error types for lattice construction and emission.

use memkmc_core::ConfigError;
use std::error::Error;
use std::fmt;
use std::io;

/// Errors arising from building or writing a lattice topology.
#[derive(Debug)]
pub enum LatticeError {
    /// Invalid extents or site-type name.
    Config(ConfigError),
    /// A site does not have six distinct periodic neighbours.
    ///
    /// Happens whenever an extent is 1 or 2: the `+1` and `-1` neighbours
    /// along that axis collapse onto the same site (or onto the site
    /// itself).
    DegenerateSite {
        /// 1-based ID of the first offending site.
        site_id: u32,
        /// Number of distinct neighbour IDs found.
        unique_neighbours: usize,
    },
    /// An I/O error occurred while writing.
    Io(io::Error),
}

impl fmt::Display for LatticeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "configuration: {e}"),
            Self::DegenerateSite {
                site_id,
                unique_neighbours,
            } => write!(
                f,
                "site {site_id} has {unique_neighbours} neighbours; expected 6"
            ),
            Self::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl Error for LatticeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Io(e) => Some(e),
            Self::DegenerateSite { .. } => None,
        }
    }
}

impl From<ConfigError> for LatticeError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<io::Error> for LatticeError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degenerate_message_names_site_and_count() {
        let e = LatticeError::DegenerateSite {
            site_id: 1,
            unique_neighbours: 4,
        };
        assert_eq!(e.to_string(), "site 1 has 4 neighbours; expected 6");
        assert!(e.source().is_none());
    }
}

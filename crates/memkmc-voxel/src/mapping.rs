//! Line-oriented `key value` mapping files.
//!
//! Both the atom-type→class file and the grid-label→species file share one
//! layout:
//!
//! ```text
//! # type  class  [anything else is ignored]
//! 1       water
//! 2       polymer
//! 3       tma     # trimethylammonium
//! ```
//!
//! `#` starts a comment, blank lines and lines with a single column are
//! skipped, and a later entry for the same key replaces an earlier one.

use std::fs::File;
use std::hash::Hash;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

use indexmap::IndexMap;
use memkmc_core::ConfigError;

use crate::error::VoxelError;

/// Parse `key value` lines into an insertion-ordered map.
///
/// Returns `Ok` with a possibly empty map; callers decide whether an empty
/// mapping is acceptable.
pub fn parse_mapping<K, R>(reader: R) -> Result<IndexMap<K, String>, VoxelError>
where
    K: FromStr + Hash + Eq,
    R: BufRead,
{
    let mut mapping = IndexMap::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let content = line.split('#').next().unwrap_or("").trim();
        let mut parts = content.split_whitespace();
        let (Some(key), Some(value)) = (parts.next(), parts.next()) else {
            continue;
        };
        let key = key
            .parse::<K>()
            .map_err(|_| VoxelError::parse(i + 1, format!("invalid integer key '{key}'")))?;
        mapping.insert(key, value.to_string());
    }
    Ok(mapping)
}

/// Mapping from structure-file atom type IDs to class names.
///
/// # Examples
///
/// ```
/// use memkmc_voxel::TypeClassMap;
///
/// let text = "# type class\n1 water\n2 polymer\n3 tma\n";
/// let map = TypeClassMap::from_reader(text.as_bytes()).unwrap();
/// assert_eq!(map.class_of(3), Some("tma"));
/// assert_eq!(map.class_of(9), None);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TypeClassMap {
    entries: IndexMap<i32, String>,
}

impl TypeClassMap {
    /// Build a mapping from `(type_id, class)` pairs.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (i32, S)>,
        S: Into<String>,
    {
        Self {
            entries: pairs.into_iter().map(|(t, c)| (t, c.into())).collect(),
        }
    }

    /// Parse a mapping file. Fails if it contains no entries.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, VoxelError> {
        let entries = parse_mapping::<i32, _>(reader)?;
        if entries.is_empty() {
            return Err(ConfigError::EmptyTypeMap.into());
        }
        Ok(Self { entries })
    }

    /// Open and parse a mapping file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, VoxelError> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(BufReader::new(file))
    }

    /// Class name for `type_id`, if mapped.
    pub fn class_of(&self, type_id: i32) -> Option<&str> {
        self.entries.get(&type_id).map(String::as_str)
    }

    /// Number of mapped type IDs.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` if nothing is mapped.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(type_id, class)` pairs in file order.
    pub fn iter(&self) -> impl Iterator<Item = (i32, &str)> {
        self.entries.iter().map(|(t, c)| (*t, c.as_str()))
    }

    /// Class names in file order, with repeats.
    pub fn class_names(&self) -> impl Iterator<Item = &str> {
        self.entries.values().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comments_blanks_and_short_lines_are_skipped() {
        let text = "\n# header\n1 water # solvent\n  \n7\n2 polymer extra words\n";
        let map = TypeClassMap::from_reader(text.as_bytes()).unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map.class_of(1), Some("water"));
        assert_eq!(map.class_of(2), Some("polymer"));
        assert_eq!(map.class_of(7), None);
    }

    #[test]
    fn later_entry_overrides_earlier() {
        let map = TypeClassMap::from_reader("5 water\n5 cl\n".as_bytes()).unwrap();
        assert_eq!(map.class_of(5), Some("cl"));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn empty_mapping_is_a_config_error() {
        let err = TypeClassMap::from_reader("# nothing here\n\n".as_bytes()).unwrap_err();
        assert!(matches!(err, VoxelError::Config(ConfigError::EmptyTypeMap)));
    }

    #[test]
    fn non_integer_key_reports_line() {
        let err = TypeClassMap::from_reader("1 water\nx polymer\n".as_bytes()).unwrap_err();
        match err {
            VoxelError::Parse { line, detail } => {
                assert_eq!(line, 2);
                assert!(detail.contains("'x'"));
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn generic_parser_accepts_unsigned_labels() {
        let map = parse_mapping::<u32, _>("1 mw*\n3 mem*\n4 tma*\n".as_bytes()).unwrap();
        assert_eq!(map.get(&3).map(String::as_str), Some("mem*"));
    }
}

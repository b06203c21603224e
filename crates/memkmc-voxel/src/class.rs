//! Interned voxel classes and their integer labels.

use std::collections::BTreeSet;
use std::fmt;

use indexmap::IndexMap;

use crate::mapping::TypeClassMap;

/// Class name of the reserved empty label.
pub const VOID: &str = "void";
/// Fixed-charge group class; dominates any voxel it appears in.
pub const TMA: &str = "tma";
/// Solvent class; wins ties against [`POLYMER`], including empty voxels.
pub const WATER: &str = "water";
/// Backbone class.
pub const POLYMER: &str = "polymer";

/// Integer label of a voxel class, as written to grid files.
///
/// `ClassId(0)` is always void.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ClassId(pub u32);

impl ClassId {
    /// The void label.
    pub const VOID: ClassId = ClassId(0);

    /// Position of this class in per-class arrays.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Bijection between class names and integer labels.
///
/// `"void"` is label 0. Every other distinct class name of the type
/// mapping is numbered from 1 in lexicographic (byte) order, so the
/// numbering depends only on the set of names and never on file order.
///
/// # Examples
///
/// ```
/// use memkmc_voxel::{ClassId, ClassRegistry, TypeClassMap};
///
/// let map = TypeClassMap::from_pairs([(1, "water"), (2, "polymer"), (3, "tma"), (5, "water")]);
/// let reg = ClassRegistry::from_type_map(&map);
/// assert_eq!(reg.id_of("void"), Some(ClassId(0)));
/// assert_eq!(reg.id_of("polymer"), Some(ClassId(1)));
/// assert_eq!(reg.id_of("tma"), Some(ClassId(2)));
/// assert_eq!(reg.id_of("water"), Some(ClassId(3)));
/// assert_eq!(reg.len(), 4);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassRegistry {
    ids: IndexMap<String, ClassId>,
}

impl ClassRegistry {
    /// Number the given class names. Duplicates and `"void"` are ignored.
    pub fn from_names<'a, I>(names: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let sorted: BTreeSet<&str> = names.into_iter().filter(|n| *n != VOID).collect();
        let mut ids = IndexMap::with_capacity(sorted.len() + 1);
        ids.insert(VOID.to_string(), ClassId::VOID);
        for (i, name) in sorted.into_iter().enumerate() {
            ids.insert(name.to_string(), ClassId(i as u32 + 1));
        }
        Self { ids }
    }

    /// Number the classes that appear in a type mapping.
    pub fn from_type_map(map: &TypeClassMap) -> Self {
        Self::from_names(map.class_names())
    }

    /// Label of a class name.
    pub fn id_of(&self, name: &str) -> Option<ClassId> {
        self.ids.get(name).copied()
    }

    /// Class name of a label.
    pub fn name_of(&self, id: ClassId) -> Option<&str> {
        self.ids.get_index(id.index()).map(|(name, _)| name.as_str())
    }

    /// `true` if `name` is a known class (void is always known).
    pub fn contains(&self, name: &str) -> bool {
        self.ids.contains_key(name)
    }

    /// Number of labels including void.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Always `false`: void is always registered.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// `(name, label)` pairs in label order, void first.
    pub fn iter(&self) -> impl Iterator<Item = (&str, ClassId)> {
        self.ids.iter().map(|(n, id)| (n.as_str(), *id))
    }

    /// Resolve a type ID straight to a label through `map`.
    ///
    /// Unmapped types resolve to `None`.
    pub fn resolve(&self, map: &TypeClassMap, type_id: i32) -> Option<ClassId> {
        map.class_of(type_id).and_then(|name| self.id_of(name))
    }
}

impl fmt::Display for ClassRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (name, id)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{name}: {id}")?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn void_is_zero_even_when_mapped_explicitly() {
        let map = TypeClassMap::from_pairs([(1, "void"), (2, "b"), (3, "a")]);
        let reg = ClassRegistry::from_type_map(&map);
        assert_eq!(reg.id_of("void"), Some(ClassId(0)));
        assert_eq!(reg.id_of("a"), Some(ClassId(1)));
        assert_eq!(reg.id_of("b"), Some(ClassId(2)));
        assert_eq!(reg.len(), 3);
    }

    #[test]
    fn numbering_is_byte_lexicographic() {
        let reg = ClassRegistry::from_names(["water", "Polymer", "cl", "tma"]);
        let names: Vec<_> = reg.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["void", "Polymer", "cl", "tma", "water"]);
    }

    #[test]
    fn name_of_inverts_id_of() {
        let reg = ClassRegistry::from_names(["water", "polymer", "tma"]);
        for (name, id) in reg.iter() {
            assert_eq!(reg.name_of(id), Some(name));
        }
        assert_eq!(reg.name_of(ClassId(17)), None);
    }

    #[test]
    fn resolve_unmapped_type_is_none() {
        let map = TypeClassMap::from_pairs([(1, "water")]);
        let reg = ClassRegistry::from_type_map(&map);
        assert_eq!(reg.resolve(&map, 1), reg.id_of("water"));
        assert_eq!(reg.resolve(&map, 2), None);
    }

    #[test]
    fn display_lists_labels_in_order() {
        let reg = ClassRegistry::from_names(["water", "polymer"]);
        assert_eq!(reg.to_string(), "{void: 0, polymer: 1, water: 2}");
    }

    proptest! {
        #[test]
        fn numbering_ignores_input_order(mut names in prop::collection::vec("[a-z]{1,6}", 1..8)) {
            let a = ClassRegistry::from_names(names.iter().map(String::as_str));
            names.reverse();
            let b = ClassRegistry::from_names(names.iter().map(String::as_str));
            prop_assert_eq!(a, b);
        }
    }
}

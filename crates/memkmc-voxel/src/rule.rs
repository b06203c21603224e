//! Per-voxel labeling rules.
//!
//! A voxel's label is decided from its per-class particle counts by an
//! ordered [`RulePipeline`]. Each tier either decides the label or defers
//! to the next one:
//!
//! 1. [`TmaDominance`]: any `tma` particle makes the voxel `tma`.
//! 2. [`WaterPolymer`]: `water` if `count(water) >= count(polymer)`, else
//!    `polymer`. Empty voxels therefore default to `water`.
//! 3. [`Majority`]: highest count wins, ties go to the lexicographically
//!    smallest class, an all-zero voxel is void.
//!
//! Tiers 1 and 2 are only installed when their classes are known to the
//! registry; tier 3 is always last and always decides.

use crate::class::{ClassId, ClassRegistry, POLYMER, TMA, WATER};

/// Particle counts of one voxel, indexed by [`ClassId`].
///
/// Slot 0 (void) is never incremented by the classifier.
#[derive(Clone, Copy, Debug)]
pub struct VoxelCounts<'a> {
    counts: &'a [u32],
}

impl<'a> VoxelCounts<'a> {
    /// Wrap a per-class count slice of length `registry.len()`.
    pub fn new(counts: &'a [u32]) -> Self {
        Self { counts }
    }

    /// Count for one class; 0 for labels outside the slice.
    #[inline]
    pub fn get(&self, id: ClassId) -> u32 {
        self.counts.get(id.index()).copied().unwrap_or(0)
    }

    /// `(label, count)` for every non-void class in label order.
    pub fn classes(&self) -> impl Iterator<Item = (ClassId, u32)> + 'a {
        let counts: &'a [u32] = self.counts;
        counts
            .iter()
            .enumerate()
            .skip(1)
            .map(|(i, &n)| (ClassId(i as u32), n))
    }
}

/// One tier of the labeling decision.
pub trait VoxelRule {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Decide the label, or return `None` to defer to the next tier.
    fn decide(&self, counts: VoxelCounts<'_>) -> Option<ClassId>;
}

/// Any `tma` particle claims the voxel, regardless of other counts.
#[derive(Clone, Copy, Debug)]
pub struct TmaDominance {
    /// Label of the `tma` class.
    pub tma: ClassId,
}

impl VoxelRule for TmaDominance {
    fn name(&self) -> &'static str {
        "tma_dominance"
    }

    fn decide(&self, counts: VoxelCounts<'_>) -> Option<ClassId> {
        (counts.get(self.tma) > 0).then_some(self.tma)
    }
}

/// Water against polymer; ties, including 0 vs 0, go to water.
///
/// Other classes present in the voxel are not considered.
#[derive(Clone, Copy, Debug)]
pub struct WaterPolymer {
    /// Label of the `water` class.
    pub water: ClassId,
    /// Label of the `polymer` class.
    pub polymer: ClassId,
}

impl VoxelRule for WaterPolymer {
    fn name(&self) -> &'static str {
        "water_polymer"
    }

    fn decide(&self, counts: VoxelCounts<'_>) -> Option<ClassId> {
        if counts.get(self.water) >= counts.get(self.polymer) {
            Some(self.water)
        } else {
            Some(self.polymer)
        }
    }
}

/// Strict majority with lexicographic tie-break; void when empty.
///
/// Labels are numbered in lexicographic order of class names, so the
/// smallest label among tied classes is also the smallest name.
#[derive(Clone, Copy, Debug, Default)]
pub struct Majority;

impl VoxelRule for Majority {
    fn name(&self) -> &'static str {
        "majority"
    }

    fn decide(&self, counts: VoxelCounts<'_>) -> Option<ClassId> {
        let mut best = ClassId::VOID;
        let mut best_count = 0u32;
        for (id, n) in counts.classes() {
            if n > best_count {
                best = id;
                best_count = n;
            }
        }
        Some(best)
    }
}

/// Ordered list of labeling tiers for one class registry.
///
/// # Examples
///
/// ```
/// use memkmc_voxel::{ClassRegistry, RulePipeline, VoxelCounts};
///
/// let reg = ClassRegistry::from_names(["polymer", "tma", "water"]);
/// let pipeline = RulePipeline::for_registry(&reg);
/// assert_eq!(pipeline.tier_names(), vec!["tma_dominance", "water_polymer", "majority"]);
///
/// // Labels: void 0, polymer 1, tma 2, water 3.
/// let counts = [0, 0, 1, 100];
/// assert_eq!(pipeline.label(VoxelCounts::new(&counts)), reg.id_of("tma").unwrap());
/// ```
pub struct RulePipeline {
    tiers: Vec<Box<dyn VoxelRule>>,
}

impl RulePipeline {
    /// Install the tiers that apply to the classes of `registry`.
    pub fn for_registry(registry: &ClassRegistry) -> Self {
        let mut tiers: Vec<Box<dyn VoxelRule>> = Vec::with_capacity(3);
        if let Some(tma) = registry.id_of(TMA) {
            tiers.push(Box::new(TmaDominance { tma }));
        }
        if let (Some(water), Some(polymer)) = (registry.id_of(WATER), registry.id_of(POLYMER)) {
            tiers.push(Box::new(WaterPolymer { water, polymer }));
        }
        tiers.push(Box::new(Majority));
        Self { tiers }
    }

    /// Build a pipeline from explicit tiers.
    ///
    /// A [`Majority`] tier is appended so that every voxel gets a label.
    pub fn from_tiers(mut tiers: Vec<Box<dyn VoxelRule>>) -> Self {
        tiers.push(Box::new(Majority));
        Self { tiers }
    }

    /// Names of the installed tiers, in evaluation order.
    pub fn tier_names(&self) -> Vec<&'static str> {
        self.tiers.iter().map(|t| t.name()).collect()
    }

    /// Label one voxel: the first tier that decides wins.
    pub fn label(&self, counts: VoxelCounts<'_>) -> ClassId {
        self.tiers
            .iter()
            .find_map(|tier| tier.decide(counts))
            .unwrap_or(ClassId::VOID)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry(names: &[&str]) -> ClassRegistry {
        ClassRegistry::from_names(names.iter().copied())
    }

    /// Build a count slice from `(name, count)` pairs.
    fn counts(reg: &ClassRegistry, pairs: &[(&str, u32)]) -> Vec<u32> {
        let mut out = vec![0; reg.len()];
        for (name, n) in pairs {
            out[reg.id_of(name).unwrap().index()] = *n;
        }
        out
    }

    fn label_name(reg: &ClassRegistry, pairs: &[(&str, u32)]) -> String {
        let pipeline = RulePipeline::for_registry(reg);
        let c = counts(reg, pairs);
        reg.name_of(pipeline.label(VoxelCounts::new(&c)))
            .unwrap()
            .to_string()
    }

    // ── TmaDominance ────────────────────────────────────────────

    #[test]
    fn tma_defers_when_absent() {
        let reg = registry(&["tma", "water"]);
        let rule = TmaDominance {
            tma: reg.id_of("tma").unwrap(),
        };
        let c = counts(&reg, &[("water", 5)]);
        assert_eq!(rule.decide(VoxelCounts::new(&c)), None);
    }

    #[test]
    fn single_tma_beats_large_water_count() {
        let reg = registry(&["tma", "water", "polymer"]);
        assert_eq!(label_name(&reg, &[("tma", 1), ("water", 100)]), "tma");
        assert_eq!(label_name(&reg, &[("tma", 1), ("polymer", 1000)]), "tma");
    }

    // ── WaterPolymer ────────────────────────────────────────────

    #[test]
    fn empty_voxel_defaults_to_water() {
        let reg = registry(&["water", "polymer"]);
        assert_eq!(label_name(&reg, &[]), "water");
    }

    #[test]
    fn empty_voxel_defaults_to_water_with_tma_known() {
        let reg = registry(&["water", "polymer", "tma"]);
        assert_eq!(label_name(&reg, &[]), "water");
    }

    #[test]
    fn single_polymer_particle_wins() {
        let reg = registry(&["tma", "water", "polymer"]);
        assert_eq!(label_name(&reg, &[("polymer", 1)]), "polymer");
    }

    #[test]
    fn water_wins_ties() {
        let reg = registry(&["water", "polymer"]);
        assert_eq!(label_name(&reg, &[("water", 4), ("polymer", 4)]), "water");
        assert_eq!(label_name(&reg, &[("water", 3), ("polymer", 4)]), "polymer");
    }

    #[test]
    fn other_classes_are_ignored_by_water_polymer() {
        let reg = registry(&["water", "polymer", "cl"]);
        assert_eq!(label_name(&reg, &[("cl", 50)]), "water");
        assert_eq!(label_name(&reg, &[("cl", 50), ("polymer", 1)]), "polymer");
    }

    // ── Majority ────────────────────────────────────────────────

    #[test]
    fn majority_tie_breaks_lexicographically() {
        let reg = registry(&["b", "a"]);
        assert_eq!(label_name(&reg, &[("a", 3), ("b", 3)]), "a");
    }

    #[test]
    fn majority_strict_winner() {
        let reg = registry(&["a", "b", "c"]);
        assert_eq!(label_name(&reg, &[("a", 1), ("c", 2)]), "c");
    }

    #[test]
    fn majority_all_zero_is_void() {
        let reg = registry(&["a", "b"]);
        assert_eq!(label_name(&reg, &[]), "void");
    }

    #[test]
    fn water_alone_uses_majority() {
        // Without polymer the water/polymer tier is not installed.
        let reg = registry(&["water", "cl"]);
        assert_eq!(
            RulePipeline::for_registry(&reg).tier_names(),
            vec!["majority"]
        );
        assert_eq!(label_name(&reg, &[]), "void");
        assert_eq!(label_name(&reg, &[("water", 1), ("cl", 2)]), "cl");
    }

    #[test]
    fn tma_with_generic_classes_still_dominates() {
        let reg = registry(&["tma", "a"]);
        assert_eq!(label_name(&reg, &[("tma", 1), ("a", 9)]), "tma");
        assert_eq!(label_name(&reg, &[("a", 9)]), "a");
        assert_eq!(label_name(&reg, &[]), "void");
    }

    #[test]
    fn custom_tiers_fall_back_to_majority() {
        struct NeverDecides;
        impl VoxelRule for NeverDecides {
            fn name(&self) -> &'static str {
                "never"
            }
            fn decide(&self, _: VoxelCounts<'_>) -> Option<ClassId> {
                None
            }
        }
        let reg = registry(&["a", "b"]);
        let pipeline = RulePipeline::from_tiers(vec![Box::new(NeverDecides)]);
        assert_eq!(pipeline.tier_names(), vec!["never", "majority"]);
        let c = counts(&reg, &[("b", 2)]);
        assert_eq!(pipeline.label(VoxelCounts::new(&c)), reg.id_of("b").unwrap());
    }
}

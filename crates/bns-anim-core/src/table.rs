//! Static lookup table of animation packages
//!
//! Identifiers are the base names of `.upk` files in the client's
//! `CookedPC` directory.

use std::collections::BTreeSet;

use crate::category::{Class, Stage};

/// Packages shared by every class.
pub const COMMON: &[&str] = &[
    "00003814", "00006660", "00007242", "00007307", "00008841", "00008904", "00009393",
    "00009801", "00009812", "00010354", "00010504", "00010771", "00010772", "00010869",
    "00011949", "00012009", "00013263", "00023411", "00023412", "00024690", "00026129",
    "00031769", "00034433", "00056127", "00059534", "00060548", "00060549", "00060550",
    "00060551", "00060552", "00060553", "00060554", "00060555", "00060556", "00060557",
    "00060558", "00060729", "00068166", "00064738",
];

/// Packages that belong to exactly one (class, stage) pair.
#[derive(Debug, Clone)]
pub struct SpecialEntry {
    pub class: Class,
    pub stage: Stage,
    pub files: &'static [&'static str],
}

const fn entry(class: Class, stage: Stage, files: &'static [&'static str]) -> SpecialEntry {
    SpecialEntry {
        class,
        stage,
        files,
    }
}

pub const SPECIAL: &[SpecialEntry] = &[
    entry(Class::ASSASSIN, Stage::BEFORE_AWAKENING, &["00007916"]),
    entry(Class::BLADE_DANCER, Stage::BEFORE_AWAKENING, &["00018601"]),
    entry(Class::BLADE_MASTER, Stage::BEFORE_AWAKENING, &["00007911"]),
    entry(Class::DESTROYER, Stage::BEFORE_AWAKENING, &["00007914"]),
    entry(Class::FORCE_MASTER, Stage::BEFORE_AWAKENING, &["00007913"]),
    entry(Class::GUNSLINGER, Stage::BEFORE_AWAKENING, &["00007915"]),
    entry(Class::KUNG_FU_MASTER, Stage::BEFORE_AWAKENING, &["00007912"]),
    entry(Class::SOUL_FIGHTER, Stage::BEFORE_AWAKENING, &["00034408"]),
    entry(Class::SUMMONER, Stage::BEFORE_AWAKENING, &["00007917"]),
    entry(Class::WARDEN, Stage::BEFORE_AWAKENING, &["00056126", "00056566"]),
    entry(Class::WARLOCK, Stage::BEFORE_AWAKENING, &["00023439"]),
    entry(Class::ASSASSIN, Stage::AFTER_AWAKENING, &["00056572"]),
    entry(Class::BLADE_DANCER, Stage::AFTER_AWAKENING, &["00056574"]),
    entry(Class::BLADE_MASTER, Stage::AFTER_AWAKENING, &["00056567"]),
    entry(Class::DESTROYER, Stage::AFTER_AWAKENING, &["00056570"]),
    entry(Class::FORCE_MASTER, Stage::AFTER_AWAKENING, &["00056569"]),
    entry(Class::GUNSLINGER, Stage::AFTER_AWAKENING, &["00056571"]),
    entry(Class::KUNG_FU_MASTER, Stage::AFTER_AWAKENING, &["00056568"]),
    entry(Class::SOUL_FIGHTER, Stage::AFTER_AWAKENING, &["00056576"]),
    entry(Class::SUMMONER, Stage::AFTER_AWAKENING, &["00056573"]),
    entry(Class::WARDEN, Stage::AFTER_AWAKENING, &["00056577"]),
    entry(Class::WARLOCK, Stage::AFTER_AWAKENING, &["00056575"]),
    entry(Class::ZEN_ARCHER, Stage::AFTER_AWAKENING, &["00068166", "00064738"]),
    entry(Class::ASSASSIN, Stage::THIRD_SPECIALIZATION, &["00068516", "00069254"]),
    entry(Class::BLADE_MASTER, Stage::THIRD_SPECIALIZATION, &["00060548", "00013263"]),
    entry(Class::DESTROYER, Stage::THIRD_SPECIALIZATION, &["00067307"]),
    entry(Class::FORCE_MASTER, Stage::THIRD_SPECIALIZATION, &["00068626", "00072638"]),
    entry(
        Class::KUNG_FU_MASTER,
        Stage::THIRD_SPECIALIZATION,
        &["00064821", "00064820", "00060459"],
    ),
];

/// Files registered for the exact `(class, stage)` key, empty if none.
pub fn special(class: Class, stage: Stage) -> &'static [&'static str] {
    SPECIAL
        .iter()
        .find(|e| e.class == class && e.stage == stage)
        .map(|e| e.files)
        .unwrap_or(&[])
}

/// Keys of the special table in declaration order.
pub fn special_keys() -> impl Iterator<Item = (Class, Stage)> {
    SPECIAL.iter().map(|e| (e.class, e.stage))
}

/// Every identifier the table knows about.
pub fn all_identifiers() -> BTreeSet<&'static str> {
    COMMON
        .iter()
        .chain(SPECIAL.iter().flat_map(|e| e.files.iter()))
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_special_exact_lookup() {
        assert_eq!(special(Class::ASSASSIN, Stage::BEFORE_AWAKENING), &["00007916"]);
        assert_eq!(
            special(Class::WARDEN, Stage::BEFORE_AWAKENING),
            &["00056126", "00056566"]
        );
    }

    #[test]
    fn test_special_missing_key_is_empty() {
        assert!(special(Class::ASTROMANCER, Stage::BEFORE_AWAKENING).is_empty());
        assert!(special(Class::ZEN_ARCHER, Stage::BEFORE_AWAKENING).is_empty());
        // composite keys are never stored
        assert!(special(Class::ALL, Stage::ALL).is_empty());
        assert!(special(Class::ASSASSIN | Class::WARDEN, Stage::BEFORE_AWAKENING).is_empty());
    }

    #[test]
    fn test_keys_are_unique_single_flags() {
        let keys: HashSet<_> = special_keys().collect();
        assert_eq!(keys.len(), SPECIAL.len());
        for (class, stage) in special_keys() {
            assert_eq!(class.bits().count_ones(), 1);
            assert_eq!(stage.bits().count_ones(), 1);
        }
    }

    #[test]
    fn test_identifiers_look_like_packages() {
        for id in all_identifiers() {
            assert_eq!(id.len(), 8);
            assert!(id.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_common_has_no_duplicates() {
        let unique: HashSet<_> = COMMON.iter().collect();
        assert_eq!(unique.len(), COMMON.len());
    }
}

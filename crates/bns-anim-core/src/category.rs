//! Class and progression-stage categories
//!
//! Both are bit sets so a single value can describe "warden or warlock" or
//! "every stage". Parsing accepts the flag names in any case with `-`, `_`
//! or space separators, joined by `|` or `,`. `none` is the empty set:
//!
//! ```rust
//! use bns_anim_core::category::{Class, Stage};
//!
//! let classes: Class = "warden, kung-fu-master".parse().unwrap();
//! assert!(classes.contains(Class::WARDEN | Class::KUNG_FU_MASTER));
//!
//! let stages: Stage = "all".parse().unwrap();
//! assert_eq!(stages, Stage::ALL);
//! ```

use std::fmt;
use std::str::FromStr;

use bitflags::{bitflags, Flags};
use serde::{Deserialize, Serialize};

use crate::error::{BnsAnimError, Result};

bitflags! {
    /// Playable character class.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct Class: u16 {
        const ASSASSIN = 1 << 0;
        const ASTROMANCER = 1 << 1;
        const BLADE_DANCER = 1 << 2;
        const BLADE_MASTER = 1 << 3;
        const DESTROYER = 1 << 4;
        const FORCE_MASTER = 1 << 5;
        const GUNSLINGER = 1 << 6;
        const KUNG_FU_MASTER = 1 << 7;
        const SOUL_FIGHTER = 1 << 8;
        const SUMMONER = 1 << 9;
        const WARDEN = 1 << 10;
        const WARLOCK = 1 << 11;
        const ZEN_ARCHER = 1 << 12;

        const ALL = Self::ASSASSIN.bits()
            | Self::ASTROMANCER.bits()
            | Self::BLADE_DANCER.bits()
            | Self::BLADE_MASTER.bits()
            | Self::DESTROYER.bits()
            | Self::FORCE_MASTER.bits()
            | Self::GUNSLINGER.bits()
            | Self::KUNG_FU_MASTER.bits()
            | Self::SOUL_FIGHTER.bits()
            | Self::SUMMONER.bits()
            | Self::WARDEN.bits()
            | Self::WARLOCK.bits()
            | Self::ZEN_ARCHER.bits();
    }
}

bitflags! {
    /// Character progression milestone.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct Stage: u8 {
        const BEFORE_AWAKENING = 1 << 0;
        const AFTER_AWAKENING = 1 << 1;
        const THIRD_SPECIALIZATION = 1 << 2;

        const ALL = Self::BEFORE_AWAKENING.bits()
            | Self::AFTER_AWAKENING.bits()
            | Self::THIRD_SPECIALIZATION.bits();
    }
}

fn parse_flags<F: Flags>(kind: &'static str, text: &str) -> Result<F> {
    let mut flags = F::empty();
    let mut seen = false;

    for token in text.split(['|', ',']) {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }

        let name = token.to_ascii_uppercase().replace(['-', ' '], "_");
        seen = true;
        if name == "NONE" {
            continue;
        }

        let flag = F::from_name(&name).ok_or_else(|| BnsAnimError::InvalidCategory {
            kind,
            name: token.to_string(),
        })?;
        flags.insert(flag);
    }

    if !seen {
        return Err(BnsAnimError::InvalidCategory {
            kind,
            name: text.to_string(),
        });
    }

    Ok(flags)
}

fn write_flags<F: Flags>(flags: &F, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if flags.is_all() {
        return f.write_str("all");
    }
    if flags.is_empty() {
        return f.write_str("none");
    }

    let names: Vec<String> = flags
        .iter_names()
        .map(|(name, _)| name.to_ascii_lowercase().replace('_', "-"))
        .collect();
    f.write_str(&names.join("|"))
}

impl FromStr for Class {
    type Err = BnsAnimError;

    fn from_str(s: &str) -> Result<Self> {
        parse_flags("class", s)
    }
}

impl FromStr for Stage {
    type Err = BnsAnimError;

    fn from_str(s: &str) -> Result<Self> {
        parse_flags("stage", s)
    }
}

impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_flags(self, f)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_flags(self, f)
    }
}

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::category::{Class, Stage};
use crate::config::QueueConfig;
use crate::error::{BnsAnimError, Result};
use crate::table;

/// Select every special package whose class and stage overlap these sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Selection {
    pub classes: Class,
    pub stages: Stage,
}

impl Selection {
    pub fn new(classes: Class, stages: Stage) -> Self {
        Self { classes, stages }
    }

    pub fn all() -> Self {
        Self::new(Class::ALL, Stage::ALL)
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.classes, self.stages)
    }
}

/// Parses `CLASSES:STAGES`, e.g. `warden|warlock:after-awakening`.
impl FromStr for Selection {
    type Err = BnsAnimError;

    fn from_str(s: &str) -> Result<Self> {
        let (classes, stages) = s
            .split_once(':')
            .ok_or_else(|| BnsAnimError::InvalidSelection {
                value: s.to_string(),
            })?;

        Ok(Self::new(classes.parse()?, stages.parse()?))
    }
}

/// Resolve the configured selections into the set of package identifiers.
///
/// A selection only picks up a special entry when intersecting it with the
/// entry's key reproduces that exact key.
pub fn build_queue(config: &QueueConfig) -> BTreeSet<&'static str> {
    let mut names = BTreeSet::new();

    if config.include_common {
        names.extend(table::COMMON.iter().copied());
    }

    for selection in &config.select {
        for (entry_classes, entry_stages) in table::special_keys() {
            let classes = selection.classes & entry_classes;
            let stages = selection.stages & entry_stages;
            names.extend(table::special(classes, stages).iter().copied());
        }
    }

    names
}

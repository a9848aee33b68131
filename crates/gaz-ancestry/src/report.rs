//! Summary of the unresolved frontier

use std::collections::BTreeMap;

/// Level name for a missing parent key of the given specificity
#[must_use]
pub fn level_name(specificity: usize) -> &'static str {
    match specificity {
        1 => "PCL",
        2 => "ADM1",
        3 => "ADM2",
        4 => "ADM3",
        5 => "ADM4",
        _ => "NULL",
    }
}

/// Snapshot of what is still waiting for a parent
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnresolvedReport {
    /// Registered administrative keys
    pub admin_divisions: usize,
    /// Parent keys with at least one waiting place
    pub missing_keys: usize,
    /// Missing keys per administrative level
    pub missing_by_level: BTreeMap<&'static str, usize>,
    /// Places still waiting
    pub unresolved_places: usize,
    /// Waiting places per `class:code`
    pub by_feature: BTreeMap<String, usize>,
    /// Waiting places per missing key
    pub by_key: BTreeMap<String, usize>,
}

impl UnresolvedReport {
    /// Write the report to the log
    pub fn log(&self) {
        for (key, count) in &self.by_key {
            tracing::trace!("{}: {} unresolved places", key, count);
        }
        tracing::info!("Found {} administrative divisions.", self.admin_divisions);
        tracing::info!("Found {} missing administrative keys.", self.missing_keys);
        for (level, count) in &self.missing_by_level {
            tracing::info!("{}: {}", level, count);
        }
        tracing::info!("{} total unresolved places", self.unresolved_places);
        for (feature, count) in &self.by_feature {
            tracing::trace!("{}: {}", feature, count);
        }
    }
}

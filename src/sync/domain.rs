//! The domain dependency graph.
//!
//! Each domain names the primary table(s) it owns and the relationship
//! tables that have to be refreshed whenever a primary table is.

use std::fmt;
use std::str::FromStr;

/// A named group of one or more primary tables and their relationship tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Domain {
    Modules,
    Resources,
    Skills,
    Terms,
    Tracks,
    All,
}

/// Export tasks for one domain, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncPlan {
    /// Tables exported first, with the operator's override setting.
    pub primary: &'static [&'static str],
    /// Relationship tables, exported with override forced, and only when
    /// no primary table was skipped.
    pub dependents: &'static [&'static str],
    /// Force override on the primary tables too (bulk refresh).
    pub force_override: bool,
}

impl SyncPlan {
    const fn single(primary: &'static [&'static str], dependents: &'static [&'static str]) -> Self {
        Self {
            primary,
            dependents,
            force_override: false,
        }
    }
}

const MODULES: SyncPlan = SyncPlan::single(&["modules"], &["module_resource", "module_track"]);
const RESOURCES: SyncPlan =
    SyncPlan::single(&["resources"], &["module_resource", "resource_term"]);
const SKILLS: SyncPlan = SyncPlan::single(&["skills"], &[]);
const TERMS: SyncPlan = SyncPlan::single(&["terms"], &["resource_term", "term_term"]);
const TRACKS: SyncPlan = SyncPlan::single(&["tracks"], &["module_track"]);
const EVERYTHING: SyncPlan = SyncPlan {
    primary: &["modules", "resources", "skills", "terms", "tracks"],
    dependents: &["module_resource", "module_track", "resource_term", "term_term"],
    force_override: true,
};

impl Domain {
    /// Every domain, in menu order.
    pub const ALL: [Domain; 6] = [
        Domain::Modules,
        Domain::Resources,
        Domain::Skills,
        Domain::Terms,
        Domain::Tracks,
        Domain::All,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Domain::Modules => "Modules",
            Domain::Resources => "Resources",
            Domain::Skills => "Skills",
            Domain::Terms => "Terms",
            Domain::Tracks => "Tracks",
            Domain::All => "All",
        }
    }

    pub fn plan(&self) -> SyncPlan {
        match self {
            Domain::Modules => MODULES,
            Domain::Resources => RESOURCES,
            Domain::Skills => SKILLS,
            Domain::Terms => TERMS,
            Domain::Tracks => TRACKS,
            Domain::All => EVERYTHING,
        }
    }

    /// Menu labels, in the same order as [`Domain::ALL`].
    pub fn menu() -> Vec<String> {
        Self::ALL.iter().map(|d| d.name().to_string()).collect()
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Domain {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|d| d.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown domain '{}'", s))
    }
}

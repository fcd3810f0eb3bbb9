use std::collections::BTreeSet;

use craft_core::Ledger;
use serde::{Deserialize, Serialize};

use crate::SelectionPolicy;

/// Knobs for tree construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuilderOptions {
    /// Gate tool-requiring sources on the lowest qualifying tier only.
    pub prefer_minimal_tools: bool,
    /// Compare recipe shapes by item family, collapsing per-species recipes.
    pub prefer_family_grouping: bool,
    /// Merge interchangeable block and mob sources into one variant-bearing leaf.
    pub combine_similar_variants: bool,
    pub max_depth: usize,
    pub selection: SelectionPolicy,
}

impl Default for BuilderOptions {
    fn default() -> Self {
        Self {
            prefer_minimal_tools: true,
            prefer_family_grouping: true,
            combine_similar_variants: true,
            max_depth: 12,
            selection: SelectionPolicy::default(),
        }
    }
}

/// Immutable state threaded through one build. Every recursive call receives a derived copy.
#[derive(Debug, Clone)]
pub struct BuildContext {
    pub ledger: Ledger,
    /// Items on the current path from the root.
    pub visited: BTreeSet<String>,
    /// Tool whose acquisition is being planned; sources gated on it are skipped.
    pub avoid_tool: Option<String>,
    pub species_hint: Option<String>,
    pub depth: usize,
    pub options: BuilderOptions,
}

impl BuildContext {
    pub fn new(ledger: Ledger) -> Self {
        Self {
            ledger,
            visited: BTreeSet::new(),
            avoid_tool: None,
            species_hint: None,
            depth: 0,
            options: BuilderOptions::default(),
        }
    }

    pub fn with_options(mut self, options: BuilderOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_species_hint(mut self, species: impl Into<String>) -> Self {
        self.species_hint = Some(species.into());
        self
    }

    pub(crate) fn with_ledger(&self, ledger: Ledger) -> Self {
        Self {
            ledger,
            ..self.clone()
        }
    }

    /// Context for the sub-requests of `items`: one level deeper, with `items` on the path.
    pub(crate) fn descend<'a>(&self, items: impl IntoIterator<Item = &'a String>) -> Self {
        let mut next = self.clone();
        next.visited.extend(items.into_iter().cloned());
        next.depth += 1;
        next
    }

    pub(crate) fn avoiding(&self, tool: &str) -> Self {
        Self {
            avoid_tool: Some(tool.to_string()),
            ..self.clone()
        }
    }

    pub(crate) fn depth_exceeded(&self) -> bool {
        self.depth >= self.options.max_depth
    }
}

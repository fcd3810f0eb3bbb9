use craft_core::Ledger;
use craft_data::RecipeDb;
use serde::{Deserialize, Serialize};

/// One way of ranking interchangeable variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionRule {
    /// Prefer a variant the inventory already holds.
    InventoryMatch,
    /// Prefer the variant matching the species of the requested item.
    ContextHint,
    /// Take the first variant in declaration order.
    FirstListed,
}

/// Decides which variant of a group is listed first, and therefore credited against the
/// inventory and used when a plan is simulated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionPolicy {
    pub rules: Vec<SelectionRule>,
    /// Narrow species families to the hinted member when it exists.
    pub bind_species: bool,
}

impl Default for SelectionPolicy {
    fn default() -> Self {
        Self {
            rules: vec![
                SelectionRule::InventoryMatch,
                SelectionRule::ContextHint,
                SelectionRule::FirstListed,
            ],
            bind_species: true,
        }
    }
}

impl SelectionPolicy {
    /// Index of the preferred candidate. The first rule that matches wins.
    pub fn choose(
        &self,
        candidates: &[&str],
        ledger: &Ledger,
        species_hint: Option<&str>,
        db: &RecipeDb,
    ) -> usize {
        for rule in &self.rules {
            let hit = match rule {
                SelectionRule::InventoryMatch => candidates.iter().position(|c| ledger.has(c)),
                SelectionRule::ContextHint => species_hint.and_then(|hint| {
                    candidates
                        .iter()
                        .position(|c| db.species_of(c) == Some(hint))
                }),
                SelectionRule::FirstListed => Some(0),
            };
            if let Some(index) = hit {
                return index;
            }
        }
        0
    }

    /// The candidate a species binding restricts the group to, if any.
    pub fn bound(&self, candidates: &[&str], species_hint: Option<&str>, db: &RecipeDb) -> Option<usize> {
        if !self.bind_species || candidates.len() < 2 {
            return None;
        }
        let hint = species_hint?;
        candidates
            .iter()
            .position(|c| db.species_of(c) == Some(hint))
    }
}

//! Plan enumeration over AND/OR action trees.
//!
//! Every strategy is a lazy iterator: callers take as many plans as they need and the rest of
//! the search space is never computed.

#![forbid(unsafe_code)]

mod frontier;
mod naive;
mod validator;

use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;

use craft_core::{ActionPath, Ledger, PersistentItems, TreeNode};
use serde::{Deserialize, Serialize};

pub use frontier::{PathCost, StepCount, TotalWeight};
pub use validator::PathValidator;

/// How plans are pulled out of a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Discovery order.
    Naive,
    /// Non-decreasing step count.
    ShortestFirst,
    /// Non-decreasing total weight.
    LowestWeightFirst,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [
        Strategy::Naive,
        Strategy::ShortestFirst,
        Strategy::LowestWeightFirst,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Strategy::Naive => "naive",
            Strategy::ShortestFirst => "shortest_first",
            Strategy::LowestWeightFirst => "lowest_weight_first",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Lazily enumerate the plans of `tree` that replay cleanly from `ledger`.
///
/// Every plan is sanitized before it is emitted and exact duplicates are suppressed.
pub fn enumerate<'a>(
    strategy: Strategy,
    tree: &'a TreeNode,
    ledger: &Ledger,
    persistent: &PersistentItems,
) -> Box<dyn Iterator<Item = ActionPath> + 'a> {
    let validator = Rc::new(PathValidator::new(ledger.clone(), persistent.clone()));
    match strategy {
        Strategy::Naive => naive_sanitized(tree, validator),
        Strategy::ShortestFirst => best_first(tree, StepCount, validator),
        Strategy::LowestWeightFirst => best_first(tree, TotalWeight, validator),
    }
}

fn naive_sanitized<'a>(
    tree: &'a TreeNode,
    validator: Rc<PathValidator>,
) -> Box<dyn Iterator<Item = ActionPath> + 'a> {
    let mut emitted: HashSet<ActionPath> = HashSet::new();
    Box::new(
        naive::paths(tree)
            .map({
                let validator = Rc::clone(&validator);
                move |path| validator.sanitize_or_keep(path)
            })
            .filter(move |path| validator.is_feasible(path))
            .filter(move |path| emitted.insert(path.clone())),
    )
}

fn best_first<'a, C>(
    tree: &'a TreeNode,
    cost: C,
    validator: Rc<PathValidator>,
) -> Box<dyn Iterator<Item = ActionPath> + 'a>
where
    C: PathCost + Copy + 'a,
{
    let stream = frontier::stream(tree, cost, &validator);
    Box::new(frontier::Settled::new(stream, cost, validator))
}

#![allow(dead_code)]

use craft_core::{ActionPath, Ledger, TreeNode, WorldSnapshot};
use craft_data::RecipeDb;
use craft_paths::Strategy;
use craft_tree::{BuildContext, RecipeTreeBuilder, WorldPruner};

pub fn db() -> RecipeDb {
    RecipeDb::embedded().expect("embedded dataset loads")
}

pub fn ledger(items: &[(&str, u32)]) -> Ledger {
    items.iter().map(|(name, count)| (*name, *count)).collect()
}

/// Build a tree for `item`, pruned against `world` when one is given.
pub fn tree(
    db: &RecipeDb,
    item: &str,
    count: u32,
    inventory: &Ledger,
    world: Option<&WorldSnapshot>,
) -> TreeNode {
    let ctx = BuildContext::new(inventory.clone());
    let built = RecipeTreeBuilder::new(db).build(item, count, &ctx);
    WorldPruner::default().prune(&built, world, inventory)
}

pub fn plans(
    db: &RecipeDb,
    strategy: Strategy,
    tree: &TreeNode,
    inventory: &Ledger,
    limit: usize,
) -> Vec<ActionPath> {
    craft_paths::enumerate(strategy, tree, inventory, &db.persistent_items())
        .take(limit)
        .collect()
}

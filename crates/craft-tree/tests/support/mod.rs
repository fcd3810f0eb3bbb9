#![allow(dead_code)]

use craft_core::{Ledger, TreeNode};
use craft_data::RecipeDb;
use craft_tree::{BuildContext, BuilderOptions, RecipeTreeBuilder};

pub fn db() -> RecipeDb {
    RecipeDb::embedded().expect("embedded dataset loads")
}

pub fn ledger(items: &[(&str, u32)]) -> Ledger {
    items.iter().map(|(name, count)| (*name, *count)).collect()
}

pub fn build(db: &RecipeDb, item: &str, count: u32, inventory: &Ledger) -> TreeNode {
    build_with(db, item, count, inventory, BuilderOptions::default())
}

pub fn build_with(
    db: &RecipeDb,
    item: &str,
    count: u32,
    inventory: &Ledger,
    options: BuilderOptions,
) -> TreeNode {
    let ctx = BuildContext::new(inventory.clone()).with_options(options);
    RecipeTreeBuilder::new(db).build(item, count, &ctx)
}

/// Every node of the tree, depth first.
pub fn nodes(tree: &TreeNode) -> Vec<&TreeNode> {
    let mut out = vec![tree];
    for child in tree.children() {
        out.extend(nodes(child));
    }
    out
}

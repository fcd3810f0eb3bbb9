mod support;

use craft_core::{TreeNode, WorldSnapshot};
use craft_tree::{PrunerConfig, WorldPruner};
use support::{build, db, ledger, nodes};

fn mine_leaves(tree: &TreeNode) -> Vec<&craft_core::MineNode> {
    nodes(tree)
        .into_iter()
        .filter_map(|n| match n {
            TreeNode::Mine(m) if m.children.is_empty() => Some(m),
            _ => None,
        })
        .collect()
}

#[test]
fn absent_species_are_pruned_through_the_craft_chain() {
    let db = db();
    let inventory = ledger(&[]);
    let tree = build(&db, "stick", 4, &inventory);
    let world = WorldSnapshot::new().with("spruce_log", 12, 4.0, 9.0);

    let pruned = WorldPruner::default().prune(&tree, Some(&world), &inventory);

    let leaves = mine_leaves(&pruned);
    assert_eq!(leaves.len(), 1);
    assert!(leaves[0].what.iter().all(|b| b == "spruce_log"));
    assert!(leaves[0].target_item.iter().all(|t| t == "spruce_log"));

    for node in nodes(&pruned) {
        if let TreeNode::Craft(craft) = node {
            for list in craft.ingredients.iter() {
                assert!(list
                    .iter()
                    .all(|i| !i.item.starts_with("oak") && !i.item.starts_with("birch")));
            }
        }
    }
}

#[test]
fn insufficient_supply_kills_the_branch() {
    let db = db();
    let inventory = ledger(&[]);
    let tree = build(&db, "raw_iron", 2, &inventory);
    let world = WorldSnapshot::new().with("iron_ore", 1, 3.0, 3.0);

    let pruned = WorldPruner::default().prune(&tree, Some(&world), &inventory);
    assert!(pruned.is_dead_end());
}

#[test]
fn any_of_sources_pool_their_supply() {
    let db = db();
    let inventory = ledger(&[("wooden_pickaxe", 1)]);
    let tree = build(&db, "coal", 3, &inventory);

    let pooled = WorldSnapshot::new()
        .with("coal_ore", 2, 5.0, 8.0)
        .with("deepslate_coal_ore", 1, 20.0, 25.0);
    let pruned = WorldPruner::default().prune(&tree, Some(&pooled), &inventory);
    let leaves = mine_leaves(&pruned);
    assert_eq!(leaves.len(), 1);
    assert_eq!(leaves[0].what.len(), 2);

    let short = WorldSnapshot::new().with("coal_ore", 2, 5.0, 8.0);
    assert!(WorldPruner::default()
        .prune(&tree, Some(&short), &inventory)
        .is_dead_end());
}

#[test]
fn distant_sources_are_dropped() {
    let db = db();
    let inventory = ledger(&[("wooden_pickaxe", 1)]);
    let tree = build(&db, "coal", 1, &inventory);
    let world = WorldSnapshot::new()
        .with("coal_ore", 4, 90.0, 120.0)
        .with("deepslate_coal_ore", 4, 10.0, 12.0);

    let pruner = WorldPruner::new(PrunerConfig {
        enabled: true,
        max_distance: Some(32.0),
    });
    let pruned = pruner.prune(&tree, Some(&world), &inventory);
    let leaves = mine_leaves(&pruned);
    assert_eq!(leaves.len(), 1);
    assert_eq!(
        leaves[0].what.iter().map(String::as_str).collect::<Vec<_>>(),
        ["deepslate_coal_ore"]
    );
}

#[test]
fn disabled_or_missing_snapshot_passes_through() {
    let db = db();
    let inventory = ledger(&[]);
    let tree = build(&db, "stick", 4, &inventory);

    assert_eq!(WorldPruner::default().prune(&tree, None, &inventory), tree);

    let off = WorldPruner::new(PrunerConfig {
        enabled: false,
        max_distance: None,
    });
    assert_eq!(off.prune(&tree, Some(&WorldSnapshot::new()), &inventory), tree);
}

#[test]
fn owned_ingredients_survive_an_empty_world() {
    let db = db();
    let inventory = ledger(&[("oak_planks", 3), ("stick", 2), ("crafting_table", 1)]);
    let tree = build(&db, "wooden_pickaxe", 1, &inventory);

    let pruned = WorldPruner::default().prune(&tree, Some(&WorldSnapshot::new()), &inventory);
    let TreeNode::Craft(craft) = &pruned.children()[0] else {
        panic!("expected craft");
    };
    assert_eq!(craft.ingredients.len(), 1);
    assert!(craft
        .ingredients
        .first()
        .unwrap()
        .iter()
        .any(|i| i.item == "oak_planks"));
}

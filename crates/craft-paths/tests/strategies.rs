//! Ordering properties over synthetic trees.
//!
//! Without gates every plan is feasible and sanitizing is a no-op, so all strategies find the
//! same plans. Gated alternatives build their own crafting table, and every table after the
//! first in a plan is shed by sanitizing.

use std::collections::HashSet;

use craft_core::{
    ActionPath, CraftNode, DropChance, HuntNode, Ingredient, ItemRef, Ledger, MineNode,
    PersistentItems, RequireNode, RootNode, Station, TreeNode, VariantGroup, CRAFTING_TABLE,
};
use craft_paths::{enumerate, Strategy as PlanStrategy};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Alt {
    Mine(u32),
    Hunt(u32),
    Craft(Vec<Vec<Alt>>),
    /// A table craft preceded by acquiring the table.
    Gated(Vec<Vec<Alt>>),
}

fn arb_alts(gates: bool) -> impl Strategy<Value = Vec<Alt>> {
    let leaf = prop_oneof![(1u32..4).prop_map(Alt::Mine), (1u32..3).prop_map(Alt::Hunt)];
    let alt = leaf.prop_recursive(3, 24, 3, move |inner| {
        let slots = prop::collection::vec(prop::collection::vec(inner, 1..3), 0..3);
        if gates {
            prop_oneof![
                slots.clone().prop_map(Alt::Craft),
                slots.prop_map(Alt::Gated),
            ]
            .boxed()
        } else {
            slots.prop_map(Alt::Craft).boxed()
        }
    });
    prop::collection::vec(alt, 1..3)
}

fn fresh(prefix: &str, next: &mut u32) -> String {
    *next += 1;
    format!("{prefix}_{next}")
}

fn root(alts: &[Alt], next: &mut u32) -> TreeNode {
    let item = fresh("item", next);
    let children = alts.iter().map(|alt| node(alt, &item, next)).collect();
    TreeNode::Root(RootNode {
        what: VariantGroup::single(item),
        count: 1,
        children,
    })
}

fn mine_leaf(block: String, item: &str, count: u32) -> TreeNode {
    TreeNode::Mine(MineNode {
        what: VariantGroup::single(block),
        target_item: VariantGroup::single(item.to_string()),
        tool: None,
        count,
        children: Vec::new(),
    })
}

fn craft(station: Station, item: &str, children: Vec<TreeNode>) -> TreeNode {
    let ingredients = children
        .iter()
        .flat_map(TreeNode::outputs)
        .map(|input| Ingredient::new(input, 1))
        .collect();
    TreeNode::Craft(CraftNode {
        what: VariantGroup::single(station),
        count: 1,
        result: VariantGroup::single(ItemRef::new(item, 1)),
        ingredients: VariantGroup::single(ingredients),
        children,
    })
}

/// Acquire a crafting table from mined wood, then craft `item` at it.
fn gated(item: &str, children: Vec<TreeNode>) -> TreeNode {
    let table = craft(
        Station::Inventory,
        CRAFTING_TABLE,
        vec![mine_leaf("wood_block".into(), "wood", 1)],
    );
    TreeNode::Require(RequireNode {
        what: CRAFTING_TABLE.to_string(),
        count: 1,
        children: vec![table, craft(Station::Table, item, children)],
    })
}

fn node(alt: &Alt, item: &str, next: &mut u32) -> TreeNode {
    match alt {
        Alt::Mine(count) => mine_leaf(fresh("block", next), item, *count),
        Alt::Hunt(count) => TreeNode::Hunt(HuntNode {
            what: VariantGroup::single(fresh("mob", next)),
            target_item: item.to_string(),
            drop_chance: DropChance::ALWAYS,
            count: *count,
            children: Vec::new(),
        }),
        Alt::Craft(slots) => {
            let children = slots.iter().map(|slot| root(slot, next)).collect();
            craft(Station::Inventory, item, children)
        }
        Alt::Gated(slots) => {
            let children = slots.iter().map(|slot| root(slot, next)).collect();
            gated(item, children)
        }
    }
}

fn persistent() -> PersistentItems {
    [CRAFTING_TABLE].into_iter().collect()
}

fn all_plans(strategy: PlanStrategy, tree: &TreeNode) -> Vec<ActionPath> {
    enumerate(strategy, tree, &Ledger::new(), &persistent()).collect()
}

fn tables(path: &ActionPath) -> usize {
    path.iter().filter(|step| step.produces(CRAFTING_TABLE)).count()
}

#[test]
fn a_shed_table_does_not_break_weight_order() {
    // goal <- [a, b]. `a` is mined directly (2 mines) or crafted at a table it builds itself;
    // `b` always builds a table. Crafting `a` at the table lets `b` reuse it, which ends up
    // cheaper than mining `a` even though the unsanitized plan weighs more.
    let a = TreeNode::Root(RootNode {
        what: VariantGroup::single("a".to_string()),
        count: 1,
        children: vec![
            mine_leaf("a_ore".into(), "a", 2),
            gated("a", vec![mine_leaf("x_ore".into(), "x", 1)]),
        ],
    });
    let b = gated("b", vec![mine_leaf("y_ore".into(), "y", 1)]);
    let tree = TreeNode::Root(RootNode {
        what: VariantGroup::single("goal".to_string()),
        count: 1,
        children: vec![craft(Station::Inventory, "goal", vec![a, b])],
    });

    let weights: Vec<u64> = all_plans(PlanStrategy::LowestWeightFirst, &tree)
        .iter()
        .map(ActionPath::weight)
        .collect();
    assert_eq!(weights, [3_022, 4_012]);

    let lengths: Vec<usize> = all_plans(PlanStrategy::ShortestFirst, &tree)
        .iter()
        .map(ActionPath::len)
        .collect();
    assert_eq!(lengths, [6, 7]);

    for strategy in PlanStrategy::ALL {
        for plan in all_plans(strategy, &tree) {
            assert_eq!(tables(&plan), 1, "{strategy}: {plan:?}");
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn lowest_weight_first_is_monotone(alts in arb_alts(true)) {
        let tree = root(&alts, &mut 0);
        let weights: Vec<u64> = all_plans(PlanStrategy::LowestWeightFirst, &tree)
            .iter()
            .map(ActionPath::weight)
            .collect();
        prop_assert!(weights.windows(2).all(|w| w[0] <= w[1]), "{:?}", weights);
    }

    #[test]
    fn shortest_first_is_monotone(alts in arb_alts(true)) {
        let tree = root(&alts, &mut 0);
        let lengths: Vec<usize> = all_plans(PlanStrategy::ShortestFirst, &tree)
            .iter()
            .map(ActionPath::len)
            .collect();
        prop_assert!(lengths.windows(2).all(|w| w[0] <= w[1]), "{:?}", lengths);
    }

    #[test]
    fn no_strategy_builds_two_tables(alts in arb_alts(true)) {
        let tree = root(&alts, &mut 0);
        for strategy in PlanStrategy::ALL {
            for plan in all_plans(strategy, &tree) {
                prop_assert!(tables(&plan) <= 1, "{}: {:?}", strategy, plan);
            }
        }
    }

    #[test]
    fn strategies_enumerate_the_same_plans(alts in arb_alts(false)) {
        let tree = root(&alts, &mut 0);
        let naive: Vec<ActionPath> = all_plans(PlanStrategy::Naive, &tree);
        prop_assert!(!naive.is_empty());

        let naive: HashSet<ActionPath> = naive.into_iter().collect();
        for strategy in [PlanStrategy::ShortestFirst, PlanStrategy::LowestWeightFirst] {
            let found: HashSet<ActionPath> = all_plans(strategy, &tree).into_iter().collect();
            prop_assert_eq!(&found, &naive);
        }
    }
}

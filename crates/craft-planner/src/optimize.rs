//! Pure post-processing passes over finished plans. Both are idempotent.

use std::collections::{HashMap, HashSet};

use craft_core::{ActionPath, ActionStep, PersistentItems, VariantGroup};
use tracing::trace;

type MineKey = (VariantGroup<String>, VariantGroup<String>, Option<String>);

/// Merge mine steps sharing blocks, targets and tool into their first occurrence.
///
/// Counts are summed; every other step keeps its relative order.
pub fn hoist_mining(path: &ActionPath) -> ActionPath {
    let mut out: Vec<ActionStep> = Vec::with_capacity(path.len());
    let mut first: HashMap<MineKey, usize> = HashMap::new();

    for step in path.iter() {
        if let ActionStep::Mine(mine) = step {
            let key = (
                mine.what.clone(),
                mine.target_item.clone(),
                mine.tool.clone(),
            );
            if let Some(&at) = first.get(&key) {
                if let ActionStep::Mine(kept) = &mut out[at] {
                    kept.count = kept.count.saturating_add(mine.count);
                }
                trace!(%step, "hoisted into earlier mine step");
                continue;
            }
            first.insert(key, out.len());
        }
        out.push(step.clone());
    }
    ActionPath::new(out)
}

/// Keep only the first craft or smelt of each persistent item, making exactly one.
pub fn dedupe_persistent_items(path: &ActionPath, persistent: &PersistentItems) -> ActionPath {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut out = ActionPath::default();

    for step in path.iter() {
        let acquires = match step {
            ActionStep::Craft(_) | ActionStep::Smelt(_) => step
                .output()
                .map(|(item, _)| item)
                .filter(|item| persistent.contains(item)),
            ActionStep::Mine(_) | ActionStep::Hunt(_) => None,
        };
        match acquires {
            Some(item) if !seen.insert(item) => {
                trace!(item, "dropping duplicate persistent acquisition");
            }
            Some(_) => {
                let mut step = step.clone();
                step.set_count(1);
                out.push(step);
            }
            None => out.push(step.clone()),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use craft_core::{CraftStep, Ingredient, ItemRef, MineStep, Station};

    use super::*;

    fn mine(block: &str, count: u32) -> ActionStep {
        ActionStep::Mine(MineStep {
            what: VariantGroup::single(block.to_string()),
            target_item: VariantGroup::single(block.to_string()),
            tool: None,
            count,
        })
    }

    fn craft(item: &str, count: u32) -> ActionStep {
        ActionStep::Craft(CraftStep {
            what: VariantGroup::single(Station::Inventory),
            count,
            result: VariantGroup::single(ItemRef::new(item, 1)),
            ingredients: VariantGroup::single(vec![Ingredient::new("oak_planks", 4)]),
        })
    }

    #[test]
    fn hoisting_sums_into_the_first_occurrence() {
        let path = ActionPath::new(vec![
            mine("oak_log", 1),
            craft("oak_planks", 1),
            mine("cobblestone", 3),
            mine("oak_log", 2),
        ]);
        let hoisted = hoist_mining(&path);
        assert_eq!(hoisted.len(), 3);
        assert_eq!(hoisted.steps[0], mine("oak_log", 3));
        assert_eq!(hoisted.steps[1], craft("oak_planks", 1));
        assert_eq!(hoisted.steps[2], mine("cobblestone", 3));
    }

    #[test]
    fn different_tools_are_not_merged() {
        let mut gated = mine("stone", 1);
        if let ActionStep::Mine(m) = &mut gated {
            m.tool = Some("wooden_pickaxe".into());
        }
        let path = ActionPath::new(vec![mine("stone", 1), gated]);
        assert_eq!(hoist_mining(&path), path);
    }

    #[test]
    fn later_persistent_crafts_are_dropped() {
        let persistent: PersistentItems = ["crafting_table"].into_iter().collect();
        let path = ActionPath::new(vec![
            craft("crafting_table", 2),
            craft("stick", 2),
            craft("crafting_table", 1),
        ]);
        let deduped = dedupe_persistent_items(&path, &persistent);
        assert_eq!(
            deduped,
            ActionPath::new(vec![craft("crafting_table", 1), craft("stick", 2)])
        );
    }
}

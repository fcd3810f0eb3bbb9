use std::collections::HashSet;
use std::sync::Arc;

use craft_core::{ActionPath, ActionStep, PersistentItems, TreeNode, WorldSnapshot};
use craft_paths::{enumerate, Strategy};
use tracing::debug;

use crate::worker::{run_jobs, StrategyJob};
use crate::PlanOptions;

/// Take up to `per_strategy` plans from every strategy, then deduplicate and rank them.
pub fn generate_top_n(
    tree: &TreeNode,
    options: &PlanOptions,
    persistent: &PersistentItems,
    per_strategy: usize,
) -> Vec<ActionPath> {
    let mut found = Vec::new();
    for strategy in Strategy::ALL {
        let before = found.len();
        found.extend(enumerate(strategy, tree, &options.inventory, persistent).take(per_strategy));
        debug!(%strategy, plans = found.len() - before, "strategy finished");
    }
    rank(found, options.world_snapshot.as_ref())
}

/// [`generate_top_n`] with each strategy on its own blocking worker.
pub async fn generate_top_n_parallel(
    tree: &TreeNode,
    options: &PlanOptions,
    persistent: &PersistentItems,
    per_strategy: usize,
) -> Vec<ActionPath> {
    let tree = Arc::new(tree.clone());
    let jobs = Strategy::ALL
        .into_iter()
        .map(|strategy| StrategyJob {
            strategy,
            tree: Arc::clone(&tree),
            ledger: options.inventory.clone(),
            persistent: persistent.clone(),
            limit: per_strategy,
        })
        .collect();

    let found = run_jobs(jobs)
        .await
        .into_iter()
        .flat_map(|reply| reply.into_paths())
        .collect();
    rank(found, options.world_snapshot.as_ref())
}

/// Drop exact duplicates, keeping the first, and sort by weight then distance score.
pub fn rank(paths: Vec<ActionPath>, snapshot: Option<&WorldSnapshot>) -> Vec<ActionPath> {
    let total = paths.len();
    let mut seen: HashSet<ActionPath> = HashSet::with_capacity(total);
    let mut keyed: Vec<(u64, f64, ActionPath)> = paths
        .into_iter()
        .filter(|path| seen.insert(path.clone()))
        .map(|path| (path.weight(), distance_score(&path, snapshot), path))
        .collect();
    keyed.sort_by(|a, b| a.0.cmp(&b.0).then(a.1.total_cmp(&b.1)));
    debug!(total, unique = keyed.len(), "ranked plans");
    keyed.into_iter().map(|(_, _, path)| path).collect()
}

/// Farthest trip a plan's mining needs: over all mine steps, the closest known instance of any
/// of its blocks. Zero without mining, infinite when any mine step's blocks are not in sight.
pub fn distance_score(path: &ActionPath, snapshot: Option<&WorldSnapshot>) -> f64 {
    let mut score = 0.0_f64;
    for step in path.iter() {
        let ActionStep::Mine(mine) = step else {
            continue;
        };
        let closest = snapshot.and_then(|world| {
            mine.what
                .iter()
                .filter_map(|block| world.closest_distance(block))
                .min_by(f64::total_cmp)
        });
        match closest {
            Some(distance) => score = score.max(distance),
            None => return f64::INFINITY,
        }
    }
    score
}

#[cfg(test)]
mod tests {
    use craft_core::{MineStep, VariantGroup, VariantMode};

    use super::*;

    fn mine(blocks: &[&str], count: u32) -> ActionStep {
        ActionStep::Mine(MineStep {
            what: VariantGroup::from_values(VariantMode::AnyOf, blocks.iter().map(|b| b.to_string())),
            target_item: VariantGroup::single(blocks[0].to_string()),
            tool: None,
            count,
        })
    }

    #[test]
    fn distance_uses_the_nearest_variant_of_the_farthest_step() {
        let world = WorldSnapshot::new()
            .with("oak_log", 3, 12.0, 20.0)
            .with("coal_ore", 2, 30.0, 31.0)
            .with("deepslate_coal_ore", 2, 8.0, 9.0);
        let path = ActionPath::new(vec![
            mine(&["oak_log"], 1),
            mine(&["coal_ore", "deepslate_coal_ore"], 1),
        ]);
        assert_eq!(distance_score(&path, Some(&world)), 12.0);
        assert_eq!(distance_score(&ActionPath::default(), None), 0.0);
        assert_eq!(distance_score(&path, None), f64::INFINITY);

        let unseen = ActionPath::new(vec![mine(&["iron_ore"], 1)]);
        assert_eq!(distance_score(&unseen, Some(&world)), f64::INFINITY);
    }

    #[test]
    fn ranking_breaks_weight_ties_by_distance() {
        let world = WorldSnapshot::new()
            .with("oak_log", 3, 12.0, 20.0)
            .with("birch_log", 3, 5.0, 7.0);
        let far = ActionPath::new(vec![mine(&["oak_log"], 1)]);
        let near = ActionPath::new(vec![mine(&["birch_log"], 1)]);
        let unknown = ActionPath::new(vec![mine(&["spruce_log"], 1)]);
        let heavy = ActionPath::new(vec![mine(&["birch_log"], 2)]);

        let ranked = rank(
            vec![unknown.clone(), heavy.clone(), far.clone(), near.clone(), far.clone()],
            Some(&world),
        );
        assert_eq!(ranked, vec![near, far, unknown, heavy]);
    }
}

use std::sync::Arc;

use craft_core::{ActionPath, Ledger, TreeNode, WorldSnapshot};
use craft_data::RecipeDb;
use craft_paths::PathValidator;
use craft_tree::{BuildContext, BuilderOptions, PrunerConfig, RecipeTreeBuilder, WorldPruner};
use tracing::{debug, info};

use crate::optimize::{dedupe_persistent_items, hoist_mining};
use crate::orchestrator::{generate_top_n, generate_top_n_parallel, rank};
use crate::PlannerConfig;

/// Per-request inputs. `None` overrides fall back to the planner's configuration.
#[derive(Debug, Clone, Default)]
pub struct PlanOptions {
    pub inventory: Ledger,
    pub world_snapshot: Option<WorldSnapshot>,
    pub prune_with_world: Option<bool>,
    pub combine_similar_variants: Option<bool>,
    pub prefer_minimal_tools: Option<bool>,
    pub prefer_family_grouping: Option<bool>,
    pub max_depth: Option<usize>,
}

impl PlanOptions {
    pub fn new(inventory: Ledger) -> Self {
        Self {
            inventory,
            ..Self::default()
        }
    }

    pub fn with_world(mut self, snapshot: WorldSnapshot) -> Self {
        self.world_snapshot = Some(snapshot);
        self
    }
}

/// Plans requests against one recipe database.
#[derive(Debug, Clone)]
pub struct Planner {
    db: Arc<RecipeDb>,
    config: PlannerConfig,
}

impl Planner {
    pub fn new(db: Arc<RecipeDb>, config: PlannerConfig) -> Self {
        Self { db, config }
    }

    pub fn db(&self) -> &RecipeDb {
        &self.db
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// The pruned tree for `count` of `item`.
    pub fn build_tree(&self, item: &str, count: u32, options: &PlanOptions) -> TreeNode {
        let ctx = BuildContext::new(options.inventory.clone()).with_options(self.builder_options(options));
        let tree = RecipeTreeBuilder::new(&self.db).build(item, count, &ctx);
        self.pruner(options)
            .prune(&tree, options.world_snapshot.as_ref(), &options.inventory)
    }

    /// Ranked plans for `count` of `item`, best first.
    pub fn plan(&self, item: &str, count: u32, options: &PlanOptions) -> Vec<ActionPath> {
        let tree = self.build_tree(item, count, options);
        let ranked = generate_top_n(
            &tree,
            options,
            &self.db.persistent_items(),
            self.config.per_strategy,
        );
        self.finish(item, ranked, options)
    }

    /// [`plan`](Self::plan) with the strategies on blocking workers.
    pub async fn plan_parallel(
        &self,
        item: &str,
        count: u32,
        options: &PlanOptions,
    ) -> Vec<ActionPath> {
        let tree = self.build_tree(item, count, options);
        let ranked = generate_top_n_parallel(
            &tree,
            options,
            &self.db.persistent_items(),
            self.config.per_strategy,
        )
        .await;
        self.finish(item, ranked, options)
    }

    fn builder_options(&self, options: &PlanOptions) -> BuilderOptions {
        let mut builder = self.config.builder.clone();
        if let Some(combine) = options.combine_similar_variants {
            builder.combine_similar_variants = combine;
        }
        if let Some(minimal) = options.prefer_minimal_tools {
            builder.prefer_minimal_tools = minimal;
        }
        if let Some(family) = options.prefer_family_grouping {
            builder.prefer_family_grouping = family;
        }
        if let Some(depth) = options.max_depth {
            builder.max_depth = depth;
        }
        builder
    }

    fn pruner(&self, options: &PlanOptions) -> WorldPruner {
        WorldPruner::new(PrunerConfig {
            enabled: options
                .prune_with_world
                .unwrap_or(self.config.prune_with_world),
            max_distance: self.config.max_distance,
        })
    }

    /// Optimize each ranked plan, keeping the optimized form only when it still replays, then
    /// re-rank and cut to the configured size.
    fn finish(&self, item: &str, ranked: Vec<ActionPath>, options: &PlanOptions) -> Vec<ActionPath> {
        let persistent = self.db.persistent_items();
        let validator = PathValidator::new(options.inventory.clone(), persistent.clone());
        let optimizers = &self.config.optimizers;

        let optimized: Vec<ActionPath> = ranked
            .into_iter()
            .map(|path| {
                let mut candidate = path.clone();
                if optimizers.hoist_mining {
                    candidate = hoist_mining(&candidate);
                }
                if optimizers.dedupe_persistent {
                    candidate = dedupe_persistent_items(&candidate, &persistent);
                }
                if candidate != path && !validator.is_feasible(&candidate) {
                    debug!(item, "optimized plan fails replay, keeping original");
                    return path;
                }
                candidate
            })
            .collect();

        let mut plans = rank(optimized, options.world_snapshot.as_ref());
        plans.truncate(self.config.top);
        info!(
            item,
            plans = plans.len(),
            best_weight = plans.first().map(ActionPath::weight),
            "planning finished"
        );
        plans
    }
}

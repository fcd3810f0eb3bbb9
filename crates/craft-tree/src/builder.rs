use craft_core::{
    CraftNode, DropChance, HuntNode, Ingredient, ItemRef, Ledger, MineNode, Operator,
    RequireNode, RootNode, SmeltNode, Station, TreeNode, VariantGroup, VariantMode,
    CRAFTING_TABLE, FURNACE,
};
use craft_data::{BlockSource, MobSource, Recipe, RecipeDb, ToolRequirement};
use tracing::{debug, trace};

use crate::BuildContext;

enum Outcome {
    /// The inventory already holds everything asked for.
    Covered,
    Node(TreeNode),
    /// No way to obtain the request.
    Dead,
}

/// A sub-request's result together with the inventory it credited.
///
/// Claims flow back up to the caller so the next sibling is built against what is left.
struct Built {
    outcome: Outcome,
    claims: Ledger,
}

impl Built {
    fn covered(claims: Ledger) -> Self {
        Self {
            outcome: Outcome::Covered,
            claims,
        }
    }

    fn node(node: TreeNode, claims: Ledger) -> Self {
        Self {
            outcome: Outcome::Node(node),
            claims,
        }
    }

    fn dead() -> Self {
        Self {
            outcome: Outcome::Dead,
            claims: Ledger::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Acquire {
    Any,
    /// Only mining and hunting, for ingredients whose recipes loop back to the item being built.
    GatherOnly,
}

/// AND-children built left to right.
struct Sequence {
    base: Ledger,
    children: Vec<TreeNode>,
    claims: Ledger,
}

impl Sequence {
    fn new(base: &Ledger) -> Self {
        Self {
            base: base.clone(),
            children: Vec::new(),
            claims: Ledger::new(),
        }
    }

    /// The inventory left for the next child.
    fn ledger(&self) -> Ledger {
        self.base.without(&self.claims)
    }

    /// Returns `false` when the child is unobtainable, which fails the whole sequence.
    fn push(&mut self, built: Built) -> bool {
        self.claims = self.claims.plus(&built.claims);
        match built.outcome {
            Outcome::Covered => true,
            Outcome::Node(node) => {
                self.children.push(node);
                true
            }
            Outcome::Dead => false,
        }
    }
}

/// Recipes of one canonical shape: same yield, station and ingredient slots once each
/// ingredient is replaced by its family.
struct Shape<'r> {
    result_count: u32,
    station: Station,
    slots: Vec<(String, u32)>,
    variants: Vec<ShapeVariant<'r>>,
}

struct ShapeVariant<'r> {
    recipe: &'r Recipe,
    /// Ingredients in slot order.
    ingredients: Vec<Ingredient>,
}

impl Shape<'_> {
    /// Items that tell the variants apart: the first slot whose item differs between them, else
    /// the results.
    fn distinguishing(&self) -> Vec<&str> {
        for slot in 0..self.slots.len() {
            let items: Vec<&str> = self
                .variants
                .iter()
                .map(|v| v.ingredients[slot].item.as_str())
                .collect();
            if items.iter().any(|i| *i != items[0]) {
                return items;
            }
        }
        self.variants
            .iter()
            .map(|v| v.recipe.result.name.as_str())
            .collect()
    }

    /// Whether the result and ingredient groups built from this shape stay index-aligned.
    fn is_aligned(&self) -> bool {
        let n = self.variants.len();
        let results = distinct(self.variants.iter().map(|v| &v.recipe.result));
        let lists = distinct(self.variants.iter().map(|v| &v.ingredients));
        (results == 1 || results == n) && lists == n
    }
}

fn distinct<T: PartialEq>(values: impl Iterator<Item = T>) -> usize {
    let mut seen: Vec<T> = Vec::new();
    for value in values {
        if !seen.contains(&value) {
            seen.push(value);
        }
    }
    seen.len()
}

struct FuelChoice {
    item: String,
    units: u32,
    built: Built,
}

/// Expands "obtain N of X" into an AND/OR tree over a recipe database.
pub struct RecipeTreeBuilder<'db> {
    db: &'db RecipeDb,
}

impl<'db> RecipeTreeBuilder<'db> {
    pub fn new(db: &'db RecipeDb) -> Self {
        Self { db }
    }

    /// Build the tree for `count` of `item`.
    ///
    /// Unknown items, zero counts and cycles give an empty root. A request the inventory fully
    /// covers gives a root with a zero count and no children.
    pub fn build(&self, item: &str, count: u32, ctx: &BuildContext) -> TreeNode {
        if count == 0 || !self.db.contains(item) || ctx.visited.contains(item) {
            trace!(item, count, "nothing to build");
            return TreeNode::empty_root(item, count);
        }

        let mut ctx = ctx.clone();
        if ctx.species_hint.is_none() && self.db.is_species_specific(item) {
            ctx.species_hint = self.db.species_of(item).map(str::to_string);
        }

        let want = VariantGroup::single(item.to_string());
        let tree = match self.want(&want, count, &ctx, Acquire::Any).outcome {
            Outcome::Node(node) => node,
            Outcome::Covered => TreeNode::Root(RootNode {
                what: want,
                count: 0,
                children: Vec::new(),
            }),
            Outcome::Dead => TreeNode::empty_root(item, count),
        };
        debug!(
            item,
            count,
            nodes = tree.node_count(),
            depth = tree.depth(),
            "built recipe tree"
        );
        tree
    }

    fn want(
        &self,
        want: &VariantGroup<String>,
        count: u32,
        ctx: &BuildContext,
        acquire: Acquire,
    ) -> Built {
        if count == 0 {
            return Built::covered(Ledger::new());
        }

        let mut want = want.clone();
        want.retain(|item| !ctx.visited.contains(item));
        if want.is_empty() {
            trace!("every variant is already on the path");
            return Built::dead();
        }
        self.order(&mut want, ctx);

        let (remaining, claims) = credit(&mut want, count, &ctx.ledger);
        if remaining == 0 {
            return Built::covered(claims);
        }
        if ctx.depth_exceeded() {
            trace!(item = ?want.first(), depth = ctx.depth, "depth limit reached");
            return Built::dead();
        }

        let next = ctx
            .descend(want.iter())
            .with_ledger(ctx.ledger.without(&claims));
        let mut alternatives = Vec::new();
        if acquire == Acquire::Any {
            alternatives.extend(self.craft_alternatives(&want, remaining, &next));
            alternatives.extend(self.smelt_alternatives(&want, remaining, &next));
        }
        alternatives.extend(self.mine_alternatives(&want, remaining, &next));
        alternatives.extend(self.hunt_alternatives(&want, remaining, &next));

        let mut children = Vec::new();
        let mut alternative_claims = Ledger::new();
        for built in alternatives {
            if let Outcome::Node(node) = built.outcome {
                alternative_claims = alternative_claims.max_with(&built.claims);
                children.push(node);
            }
        }
        if children.is_empty() {
            trace!(item = ?want.first(), remaining, "no way to obtain");
            return Built::dead();
        }

        Built::node(
            TreeNode::Root(RootNode {
                what: want,
                count: remaining,
                children,
            }),
            claims.plus(&alternative_claims),
        )
    }

    /// Put the preferred variant first, or narrow to the bound species.
    fn order(&self, want: &mut VariantGroup<String>, ctx: &BuildContext) {
        if want.len() < 2 {
            return;
        }
        let policy = &ctx.options.selection;
        let hint = ctx.species_hint.as_deref();
        let (bound, chosen) = {
            let names: Vec<&str> = want.iter().map(String::as_str).collect();
            (
                policy.bound(&names, hint, self.db),
                policy.choose(&names, &ctx.ledger, hint, self.db),
            )
        };
        match bound {
            Some(index) => want.retain_indices(&[index]),
            None => want.promote(chosen),
        }
    }

    fn craft_alternatives(
        &self,
        want: &VariantGroup<String>,
        remaining: u32,
        ctx: &BuildContext,
    ) -> Vec<Built> {
        self.shapes(want, ctx)
            .into_iter()
            .map(|shape| self.craft(shape, want, remaining, ctx))
            .collect()
    }

    fn shapes(&self, want: &VariantGroup<String>, ctx: &BuildContext) -> Vec<Shape<'db>> {
        let group_families = ctx.options.prefer_family_grouping;
        let mut shapes: Vec<Shape<'db>> = Vec::new();

        for item in want.iter() {
            for recipe in self.db.recipes_for(item) {
                let mut keyed: Vec<(&str, &Ingredient)> = recipe
                    .ingredients
                    .iter()
                    .map(|i| (self.db.canonical_name(&i.item, group_families), i))
                    .collect();
                keyed.sort_by(|(ca, a), (cb, b)| {
                    (*ca, a.count, a.item.as_str()).cmp(&(*cb, b.count, b.item.as_str()))
                });
                let slots: Vec<(String, u32)> = keyed
                    .iter()
                    .map(|(canonical, i)| (canonical.to_string(), i.count))
                    .collect();
                let variant = ShapeVariant {
                    recipe,
                    ingredients: keyed.into_iter().map(|(_, i)| i.clone()).collect(),
                };

                let existing = shapes.iter_mut().find(|s| {
                    s.result_count == recipe.result.count
                        && s.station == recipe.station
                        && s.slots == slots
                });
                match existing {
                    Some(shape) => {
                        let duplicate = shape.variants.iter().any(|v| {
                            v.recipe.result == recipe.result && v.ingredients == variant.ingredients
                        });
                        if !duplicate {
                            shape.variants.push(variant);
                        }
                    }
                    None => shapes.push(Shape {
                        result_count: recipe.result.count,
                        station: recipe.station,
                        slots,
                        variants: vec![variant],
                    }),
                }
            }
        }

        // Groups whose variants cannot be expressed as parallel groups fall apart into one
        // craft node per recipe.
        let mut out = Vec::with_capacity(shapes.len());
        for shape in shapes {
            if shape.is_aligned() {
                out.push(shape);
                continue;
            }
            for variant in shape.variants {
                out.push(Shape {
                    result_count: shape.result_count,
                    station: shape.station,
                    slots: shape.slots.clone(),
                    variants: vec![variant],
                });
            }
        }
        out
    }

    fn craft(
        &self,
        mut shape: Shape<'_>,
        want: &VariantGroup<String>,
        remaining: u32,
        ctx: &BuildContext,
    ) -> Built {
        self.order_shape(&mut shape, ctx);
        let crafts = remaining.div_ceil(shape.result_count.max(1));

        let mut gate = Sequence::new(&ctx.ledger);
        if shape.station == Station::Table && !ctx.ledger.has(CRAFTING_TABLE) {
            let table = self.want(
                &VariantGroup::single(CRAFTING_TABLE.to_string()),
                1,
                ctx,
                Acquire::Any,
            );
            if !gate.push(table) {
                trace!("crafting table unobtainable");
                return Built::dead();
            }
        }

        let mut slots = Sequence::new(&gate.ledger());
        for slot in 0..shape.slots.len() {
            let items: VariantGroup<String> = shape
                .variants
                .iter()
                .map(|v| v.ingredients[slot].item.clone())
                .collect();
            let need = shape.slots[slot].1.saturating_mul(crafts);
            let acquire = if self.loops_back(&items, want) {
                Acquire::GatherOnly
            } else {
                Acquire::Any
            };
            let built = self.want(&items, need, &ctx.with_ledger(slots.ledger()), acquire);
            if !slots.push(built) {
                trace!(ingredient = ?items.first(), need, "ingredient unobtainable");
                return Built::dead();
            }
        }

        let result = VariantGroup::from_values(
            VariantMode::OneOf,
            shape.variants.iter().map(|v| v.recipe.result.clone()),
        );
        let ingredients = VariantGroup::from_values(
            VariantMode::OneOf,
            shape.variants.iter().map(|v| v.ingredients.clone()),
        );
        let claims = gate.claims.plus(&slots.claims);
        let craft = TreeNode::Craft(CraftNode {
            what: VariantGroup::single(shape.station),
            count: crafts,
            result,
            ingredients,
            children: slots.children,
        });

        let node = match gate.children.pop() {
            Some(table) => TreeNode::Require(RequireNode {
                what: CRAFTING_TABLE.to_string(),
                count: 1,
                children: vec![table, craft],
            }),
            None => craft,
        };
        Built::node(node, claims)
    }

    fn order_shape(&self, shape: &mut Shape<'_>, ctx: &BuildContext) {
        if shape.variants.len() < 2 {
            return;
        }
        let policy = &ctx.options.selection;
        let hint = ctx.species_hint.as_deref();
        let (bound, chosen) = {
            let names = shape.distinguishing();
            (
                policy.bound(&names, hint, self.db),
                policy.choose(&names, &ctx.ledger, hint, self.db),
            )
        };
        match bound {
            Some(index) => {
                let kept = shape.variants.swap_remove(index);
                shape.variants = vec![kept];
            }
            None if chosen > 0 => {
                let preferred = shape.variants.remove(chosen);
                shape.variants.insert(0, preferred);
            }
            None => {}
        }
    }

    /// Whether crafting any of `slot` would need one of the items currently being built.
    fn loops_back(&self, slot: &VariantGroup<String>, building: &VariantGroup<String>) -> bool {
        slot.iter().any(|item| {
            self.db
                .recipes_for(item)
                .iter()
                .any(|r| r.ingredients.iter().any(|i| building.contains(&i.item)))
        })
    }

    fn smelt_alternatives(
        &self,
        want: &VariantGroup<String>,
        remaining: u32,
        ctx: &BuildContext,
    ) -> Vec<Built> {
        let mut out = Vec::new();
        for item in want.iter() {
            let mut children = Vec::new();
            let mut inputs = VariantGroup::new(VariantMode::OneOf);
            let mut claims = Ledger::new();

            for source in self.db.smelt_inputs_for(item) {
                if ctx.visited.contains(&source.input) {
                    continue;
                }
                let built = self.smelt(item, &source.input, remaining, ctx);
                if let Outcome::Node(node) = built.outcome {
                    claims = claims.max_with(&built.claims);
                    inputs.push(ItemRef::new(source.input.clone(), 1));
                    children.push(node);
                }
            }

            if children.len() > 1 {
                out.push(Built::node(
                    TreeNode::Smelt(SmeltNode {
                        operator: Operator::Or,
                        input: inputs,
                        result: ItemRef::new(item.clone(), 1),
                        fuel: None,
                        fuel_count: 0,
                        count: remaining,
                        children,
                    }),
                    claims,
                ));
            } else if let Some(node) = children.pop() {
                out.push(Built::node(node, claims));
            }
        }
        out
    }

    /// Furnace, fuel and input prerequisites in that order, then `smelts` smelts.
    fn smelt(&self, result: &str, input: &str, smelts: u32, ctx: &BuildContext) -> Built {
        let mut seq = Sequence::new(&ctx.ledger);
        if !ctx.ledger.has(FURNACE) {
            let furnace = self.want(
                &VariantGroup::single(FURNACE.to_string()),
                1,
                ctx,
                Acquire::Any,
            );
            if !seq.push(furnace) {
                trace!(result, "furnace unobtainable");
                return Built::dead();
            }
        }

        let Some(fuel) = self.choose_fuel(result, smelts, &ctx.with_ledger(seq.ledger())) else {
            trace!(result, "no usable fuel");
            return Built::dead();
        };
        seq.push(fuel.built);

        let input_want = VariantGroup::single(input.to_string());
        let built = self.want(&input_want, smelts, &ctx.with_ledger(seq.ledger()), Acquire::Any);
        if !seq.push(built) {
            return Built::dead();
        }

        Built::node(
            TreeNode::Smelt(SmeltNode {
                operator: Operator::And,
                input: VariantGroup::single(ItemRef::new(input, 1)),
                result: ItemRef::new(result, 1),
                fuel: Some(fuel.item),
                fuel_count: fuel.units,
                count: smelts,
                children: seq.children,
            }),
            seq.claims,
        )
    }

    /// An owned fuel that covers the run, else the fuel whose cheapest acquisition weighs least.
    fn choose_fuel(&self, result: &str, smelts: u32, ctx: &BuildContext) -> Option<FuelChoice> {
        let usable = || {
            self.db
                .fuels()
                .iter()
                .filter(move |f| f.item != result && !ctx.visited.contains(&f.item))
        };

        for fuel in usable() {
            let units = fuel.efficiency.units_for(smelts);
            if ctx.ledger.count(&fuel.item) >= units {
                let claims = [(fuel.item.clone(), units)].into_iter().collect();
                return Some(FuelChoice {
                    item: fuel.item.clone(),
                    units,
                    built: Built::covered(claims),
                });
            }
        }

        let mut best: Option<(u64, FuelChoice)> = None;
        for fuel in usable() {
            let units = fuel.efficiency.units_for(smelts);
            let built = self.want(
                &VariantGroup::single(fuel.item.clone()),
                units,
                ctx,
                Acquire::Any,
            );
            let cost = match &built.outcome {
                Outcome::Node(node) => min_weight(node),
                Outcome::Covered => Some(0),
                Outcome::Dead => None,
            };
            let Some(cost) = cost else {
                continue;
            };
            if best.as_ref().map_or(true, |(c, _)| cost < *c) {
                best = Some((
                    cost,
                    FuelChoice {
                        item: fuel.item.clone(),
                        units,
                        built,
                    },
                ));
            }
        }
        best.map(|(_, choice)| choice)
    }

    fn mine_alternatives(
        &self,
        want: &VariantGroup<String>,
        remaining: u32,
        ctx: &BuildContext,
    ) -> Vec<Built> {
        let mut groups: Vec<(Option<ToolRequirement>, Vec<&BlockSource>)> = Vec::new();
        for item in want.iter() {
            for source in self.db.block_sources(item) {
                match groups.iter_mut().find(|(req, _)| *req == source.tool) {
                    Some((_, sources)) => sources.push(source),
                    None => groups.push((source.tool.clone(), vec![source])),
                }
            }
        }

        // A multi-species request keeps its one-species commitment down to the block.
        let mode = if want.len() > 1 && want.mode == VariantMode::OneOf {
            VariantMode::OneOf
        } else {
            VariantMode::AnyOf
        };
        let combine = ctx.options.combine_similar_variants;

        let mut out = Vec::new();
        for (requirement, sources) in groups {
            let Some(requirement) = requirement else {
                out.push(Built::node(
                    mine_group(&sources, mode, remaining, None, combine),
                    Ledger::new(),
                ));
                continue;
            };

            let qualifying = self.db.tools_satisfying(&requirement);
            if let Some(owned) = qualifying.iter().find(|t| ctx.ledger.has(&t.name)) {
                out.push(Built::node(
                    mine_group(&sources, mode, remaining, Some(owned.name.as_str()), combine),
                    Ledger::new(),
                ));
                continue;
            }

            let mut gates = Vec::new();
            let mut claims = Ledger::new();
            for tool in qualifying {
                let tool = tool.name.as_str();
                if ctx.avoid_tool.as_deref() == Some(tool) || ctx.visited.contains(tool) {
                    continue;
                }
                let built = self.want(
                    &VariantGroup::single(tool.to_string()),
                    1,
                    &ctx.avoiding(tool),
                    Acquire::Any,
                );
                let leaves = mine_group(&sources, mode, remaining, Some(tool), combine);
                match built.outcome {
                    Outcome::Node(tree) => {
                        claims = claims.max_with(&built.claims);
                        gates.push(TreeNode::Require(RequireNode {
                            what: tool.to_string(),
                            count: 1,
                            children: vec![tree, leaves],
                        }));
                    }
                    Outcome::Covered => gates.push(leaves),
                    Outcome::Dead => {
                        trace!(tool, "tool unobtainable");
                        continue;
                    }
                }
                if ctx.options.prefer_minimal_tools {
                    break;
                }
            }

            if gates.len() > 1 {
                out.push(Built::node(
                    TreeNode::Mine(MineNode {
                        what: VariantGroup::from_values(mode, sources.iter().map(|s| s.block.clone())),
                        target_item: VariantGroup::from_values(
                            mode,
                            sources.iter().map(|s| s.drop.clone()),
                        ),
                        tool: None,
                        count: remaining,
                        children: gates,
                    }),
                    claims,
                ));
            } else if let Some(gate) = gates.pop() {
                out.push(Built::node(gate, claims));
            }
        }
        out
    }

    fn hunt_alternatives(
        &self,
        want: &VariantGroup<String>,
        remaining: u32,
        ctx: &BuildContext,
    ) -> Vec<Built> {
        let mut out = Vec::new();
        for item in want.iter() {
            let sources = self.db.mob_sources(item);
            if sources.is_empty() {
                continue;
            }

            let mut groups: Vec<(DropChance, Vec<&MobSource>)> = Vec::new();
            for source in sources {
                let existing = if ctx.options.combine_similar_variants {
                    groups.iter_mut().find(|(chance, _)| *chance == source.chance)
                } else {
                    None
                };
                match existing {
                    Some((_, mobs)) => mobs.push(source),
                    None => groups.push((source.chance, vec![source])),
                }
            }

            let mut leaves: Vec<TreeNode> = groups
                .iter()
                .map(|(chance, mobs)| {
                    TreeNode::Hunt(HuntNode {
                        what: VariantGroup::from_values(
                            VariantMode::AnyOf,
                            mobs.iter().map(|m| m.mob.clone()),
                        ),
                        target_item: item.clone(),
                        drop_chance: *chance,
                        count: chance.kills_for(remaining),
                        children: Vec::new(),
                    })
                })
                .collect();

            let node = if leaves.len() == 1 {
                leaves.remove(0)
            } else {
                TreeNode::Hunt(HuntNode {
                    what: VariantGroup::from_values(
                        VariantMode::AnyOf,
                        sources.iter().map(|m| m.mob.clone()),
                    ),
                    target_item: item.clone(),
                    drop_chance: groups
                        .iter()
                        .map(|(chance, _)| *chance)
                        .max()
                        .unwrap_or_default(),
                    count: remaining,
                    children: leaves,
                })
            };
            out.push(Built::node(node, Ledger::new()));
        }
        out
    }
}

/// Credit owned stock against `count`. A one-of group that draws on a variant is narrowed to it.
fn credit(want: &mut VariantGroup<String>, count: u32, ledger: &Ledger) -> (u32, Ledger) {
    let mut claims = Ledger::new();
    let mut remaining = count;
    match want.mode {
        VariantMode::AnyOf => {
            for item in want.iter() {
                if remaining == 0 {
                    break;
                }
                let take = ledger.count(item).min(remaining);
                if take > 0 {
                    claims.set(item.clone(), take);
                    remaining -= take;
                }
            }
        }
        VariantMode::OneOf => {
            if let Some(first) = want.first().cloned() {
                let take = ledger.count(&first).min(remaining);
                if take > 0 {
                    claims.set(first, take);
                    remaining -= take;
                    want.retain_indices(&[0]);
                }
            }
        }
    }
    (remaining, claims)
}

/// Mine leaves for one tool requirement, under an OR node when there is more than one.
fn mine_group(
    sources: &[&BlockSource],
    mode: VariantMode,
    count: u32,
    tool: Option<&str>,
    combine: bool,
) -> TreeNode {
    let leaf = |blocks: &[&BlockSource]| {
        TreeNode::Mine(MineNode {
            what: VariantGroup::from_values(mode, blocks.iter().map(|b| b.block.clone())),
            target_item: VariantGroup::from_values(mode, blocks.iter().map(|b| b.drop.clone())),
            tool: tool.map(str::to_string),
            count,
            children: Vec::new(),
        })
    };

    let mut leaves: Vec<TreeNode> = if combine {
        let mut drops: Vec<&str> = Vec::new();
        for source in sources {
            if !drops.contains(&source.drop.as_str()) {
                drops.push(&source.drop);
            }
        }
        if drops.len() == 1 || drops.len() == sources.len() {
            vec![leaf(sources)]
        } else {
            drops
                .iter()
                .map(|drop| {
                    let same: Vec<&BlockSource> =
                        sources.iter().copied().filter(|s| s.drop == *drop).collect();
                    leaf(&same)
                })
                .collect()
        }
    } else {
        sources.iter().map(|s| leaf(std::slice::from_ref(s))).collect()
    };

    if leaves.len() == 1 {
        return leaves.remove(0);
    }
    TreeNode::Mine(MineNode {
        what: VariantGroup::from_values(mode, sources.iter().map(|s| s.block.clone())),
        target_item: VariantGroup::from_values(mode, sources.iter().map(|s| s.drop.clone())),
        tool: tool.map(str::to_string),
        count,
        children: leaves,
    })
}

/// Weight of the cheapest plan the subtree can yield, ignoring sanitization.
fn min_weight(node: &TreeNode) -> Option<u64> {
    let own = node.own_step().map_or(0, |step| step.weight());
    if node.children().is_empty() {
        return match node {
            TreeNode::Root(_) => None,
            _ => Some(own),
        };
    }
    match node.operator() {
        Operator::Or => node.children().iter().filter_map(min_weight).min(),
        Operator::And => node
            .children()
            .iter()
            .try_fold(own, |acc, child| Some(acc.saturating_add(min_weight(child)?))),
    }
}

use std::collections::{BTreeMap, BTreeSet};

use craft_core::{
    ActionPath, ActionStep, CraftStep, Ledger, PersistentItems, Shortfall, Station,
    CRAFTING_TABLE, FURNACE,
};
use tracing::trace;

/// Replays plans against a starting inventory and strips redundant steps from them.
#[derive(Debug, Clone)]
pub struct PathValidator {
    ledger: Ledger,
    persistent: PersistentItems,
}

impl PathValidator {
    pub fn new(ledger: Ledger, persistent: PersistentItems) -> Self {
        Self { ledger, persistent }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn persistent(&self) -> &PersistentItems {
        &self.persistent
    }

    /// Run `path` forward from the starting inventory, returning what is left afterwards.
    pub fn replay(&self, path: &ActionPath) -> Result<Ledger, Shortfall> {
        let mut ledger = self.ledger.clone();
        for step in path.iter() {
            apply(&mut ledger, step)?;
        }
        Ok(ledger)
    }

    pub fn is_feasible(&self, path: &ActionPath) -> bool {
        match self.replay(path) {
            Ok(_) => true,
            Err(shortfall) => {
                trace!(%shortfall, steps = path.len(), "plan fails replay");
                false
            }
        }
    }

    /// Drop re-acquisitions of persistent items, then gathering steps nothing downstream
    /// consumes. The last step is always kept.
    pub fn sanitize(&self, path: &ActionPath) -> ActionPath {
        let path = self.drop_reacquisitions(path);
        trim_demand(&path)
    }

    /// The sanitized plan when it still replays. Failing that, `path` without its persistent
    /// re-acquisitions when that replays, otherwise `path` unchanged.
    pub fn sanitize_or_keep(&self, path: ActionPath) -> ActionPath {
        let deduped = self.drop_reacquisitions(&path);
        let sanitized = trim_demand(&deduped);
        if sanitized.len() == path.len() || self.is_feasible(&sanitized) {
            sanitized
        } else if deduped.len() < path.len() && self.is_feasible(&deduped) {
            deduped
        } else {
            path
        }
    }

    /// Like [`sanitize_or_keep`](Self::sanitize_or_keep) for partial plans, which may be
    /// infeasible on their own because a sibling supplies what they need. Sanitizing is only
    /// refused when it would break a plan that replays.
    pub(crate) fn sanitize_partial(&self, path: ActionPath) -> ActionPath {
        let sanitized = self.sanitize(&path);
        if sanitized.len() == path.len() || self.is_feasible(&sanitized) || !self.is_feasible(&path)
        {
            sanitized
        } else {
            path
        }
    }

    fn drop_reacquisitions(&self, path: &ActionPath) -> ActionPath {
        let mut have: BTreeSet<&str> = self
            .persistent
            .iter()
            .filter(|item| self.ledger.has(item))
            .collect();

        let mut out = ActionPath::default();
        for step in path.iter() {
            match step.output() {
                Some((item, _)) if self.persistent.contains(item) => {
                    if have.insert(item) {
                        out.push(step.clone());
                    } else {
                        trace!(item, "dropping persistent re-acquisition");
                    }
                }
                _ => out.push(step.clone()),
            }
        }
        out
    }
}

/// Walk backwards tracking outstanding demand; gathering steps with nothing to satisfy go.
fn trim_demand(path: &ActionPath) -> ActionPath {
    let mut demand: BTreeMap<&str, u64> = BTreeMap::new();
    let mut kept: Vec<&ActionStep> = Vec::with_capacity(path.len());

    for (index, step) in path.steps.iter().enumerate().rev() {
        let last = index + 1 == path.len();
        let gathering = matches!(step, ActionStep::Mine(_) | ActionStep::Hunt(_));
        if gathering && !last {
            let outstanding = |item: &str| demand.get(item).is_some_and(|&n| n > 0);
            let wanted = match step {
                ActionStep::Mine(mine) => mine.target_item.iter().any(|t| outstanding(t.as_str())),
                _ => step.output().is_some_and(|(item, _)| outstanding(item)),
            };
            if !wanted {
                trace!(%step, "dropping unneeded gathering step");
                continue;
            }
        }

        if let Some((item, quantity)) = unambiguous_supply(step) {
            if let Some(outstanding) = demand.get_mut(item) {
                *outstanding = outstanding.saturating_sub(u64::from(quantity));
            }
        }
        for (item, quantity) in consumption(step) {
            *demand.entry(item).or_default() += quantity;
        }
        kept.push(step);
    }

    kept.reverse();
    ActionPath::new(kept.into_iter().cloned().collect())
}

/// What a step yields, when it can only yield one thing.
fn unambiguous_supply(step: &ActionStep) -> Option<(&str, u32)> {
    let single = match step {
        ActionStep::Craft(s) => s.result.len() == 1,
        ActionStep::Mine(s) => s.target_item.len() == 1,
        ActionStep::Smelt(_) | ActionStep::Hunt(_) => true,
    };
    if single {
        step.output()
    } else {
        None
    }
}

/// Items a step may consume. Every craft variant counts, since any one of them may run.
fn consumption(step: &ActionStep) -> Vec<(&str, u64)> {
    match step {
        ActionStep::Craft(s) => s
            .ingredients
            .iter()
            .flatten()
            .map(|i| (i.item.as_str(), u64::from(i.count) * u64::from(s.count)))
            .collect(),
        ActionStep::Smelt(s) => {
            let mut out = vec![(
                s.input.name.as_str(),
                u64::from(s.input.count) * u64::from(s.count),
            )];
            if let Some(fuel) = &s.fuel {
                out.push((fuel.as_str(), u64::from(s.fuel_count)));
            }
            out
        }
        ActionStep::Mine(_) | ActionStep::Hunt(_) => Vec::new(),
    }
}

fn require(ledger: &Ledger, item: &str) -> Result<(), Shortfall> {
    if ledger.has(item) {
        Ok(())
    } else {
        Err(Shortfall {
            item: item.to_string(),
            needed: 1,
            available: 0,
        })
    }
}

/// The ingredient variant a craft would use: the first fully in stock, else the first listed.
fn resolve_variant(ledger: &Ledger, craft: &CraftStep) -> usize {
    craft
        .ingredients
        .iter()
        .position(|list| {
            list.iter().all(|i| {
                u64::from(ledger.count(&i.item)) >= u64::from(i.count) * u64::from(craft.count)
            })
        })
        .unwrap_or(0)
}

fn apply(ledger: &mut Ledger, step: &ActionStep) -> Result<(), Shortfall> {
    match step {
        ActionStep::Craft(craft) => {
            if craft.station() == Station::Table {
                require(ledger, CRAFTING_TABLE)?;
            }
            let variant = resolve_variant(ledger, craft);
            if let Some(list) = craft.ingredients.get(variant) {
                for ingredient in list {
                    ledger.take(&ingredient.item, ingredient.count.saturating_mul(craft.count))?;
                }
            }
            if let Some(result) = craft.result.aligned(variant) {
                ledger.add(&result.name, result.count.saturating_mul(craft.count));
            }
        }
        ActionStep::Smelt(smelt) => {
            require(ledger, FURNACE)?;
            ledger.take(&smelt.input.name, smelt.input.count.saturating_mul(smelt.count))?;
            if let Some(fuel) = &smelt.fuel {
                ledger.take(fuel, smelt.fuel_count)?;
            }
            ledger.add(&smelt.result.name, smelt.result.count.saturating_mul(smelt.count));
        }
        ActionStep::Mine(mine) => {
            if let Some(tool) = &mine.tool {
                require(ledger, tool)?;
            }
            if let Some(target) = mine.target_item.first() {
                ledger.add(target, mine.count);
            }
        }
        ActionStep::Hunt(hunt) => {
            ledger.add(&hunt.target_item, hunt.drop_chance.expected_yield(hunt.count));
        }
    }
    Ok(())
}

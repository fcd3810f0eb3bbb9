use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{DropChance, VariantGroup};

/// Step weights: a strict hierarchy favouring in-place crafting over workstation crafting over
/// smelting over mining over hunting.
pub mod weight {
    pub const CRAFT_IN_PLACE: u64 = 1;
    pub const CRAFT_AT_TABLE: u64 = 10;
    pub const SMELT: u64 = 100;
    pub const MINE: u64 = 1_000;
    pub const HUNT: u64 = 10_000;
}

/// Item name of the workstation that `Station::Table` crafts need.
pub const CRAFTING_TABLE: &str = "crafting_table";
/// Item name of the workstation every smelt needs.
pub const FURNACE: &str = "furnace";

/// Where a craft happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Station {
    /// The 2x2 inventory grid.
    Inventory,
    /// A placed crafting table.
    Table,
}

impl Station {
    pub fn name(self) -> &'static str {
        match self {
            Station::Inventory => "inventory",
            Station::Table => "table",
        }
    }
}

/// An item and a per-operation quantity.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ItemRef {
    pub name: String,
    pub count: u32,
}

impl ItemRef {
    pub fn new(name: impl Into<String>, count: u32) -> Self {
        Self {
            name: name.into(),
            count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Ingredient {
    pub item: String,
    /// Quantity consumed by a single craft.
    pub count: u32,
}

impl Ingredient {
    pub fn new(item: impl Into<String>, count: u32) -> Self {
        Self {
            item: item.into(),
            count,
        }
    }
}

pub type IngredientList = Vec<Ingredient>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ActionKind {
    Craft,
    Smelt,
    Mine,
    Hunt,
}

/// Craft `count` times. `result` and `ingredients` are either singletons or parallel groups.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct CraftStep {
    pub what: VariantGroup<Station>,
    pub count: u32,
    pub result: VariantGroup<ItemRef>,
    pub ingredients: VariantGroup<IngredientList>,
}

impl CraftStep {
    pub fn station(&self) -> Station {
        self.what.first().copied().unwrap_or(Station::Inventory)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct SmeltStep {
    pub input: ItemRef,
    pub result: ItemRef,
    pub fuel: Option<String>,
    /// Fuel units burned across all `count` smelts.
    pub fuel_count: u32,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct MineStep {
    pub what: VariantGroup<String>,
    pub target_item: VariantGroup<String>,
    pub tool: Option<String>,
    /// Blocks to break.
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct HuntStep {
    pub what: VariantGroup<String>,
    pub target_item: String,
    pub drop_chance: DropChance,
    /// Kills needed.
    pub count: u32,
}

/// One executable step of a plan.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "action", rename_all = "snake_case"))]
pub enum ActionStep {
    Craft(CraftStep),
    Smelt(SmeltStep),
    Mine(MineStep),
    Hunt(HuntStep),
}

impl ActionStep {
    pub fn kind(&self) -> ActionKind {
        match self {
            ActionStep::Craft(_) => ActionKind::Craft,
            ActionStep::Smelt(_) => ActionKind::Smelt,
            ActionStep::Mine(_) => ActionKind::Mine,
            ActionStep::Hunt(_) => ActionKind::Hunt,
        }
    }

    pub fn count(&self) -> u32 {
        match self {
            ActionStep::Craft(s) => s.count,
            ActionStep::Smelt(s) => s.count,
            ActionStep::Mine(s) => s.count,
            ActionStep::Hunt(s) => s.count,
        }
    }

    pub fn set_count(&mut self, count: u32) {
        match self {
            ActionStep::Craft(s) => s.count = count,
            ActionStep::Smelt(s) => s.count = count,
            ActionStep::Mine(s) => s.count = count,
            ActionStep::Hunt(s) => s.count = count,
        }
    }

    pub fn weight(&self) -> u64 {
        let per = match self {
            ActionStep::Craft(s) => match s.station() {
                Station::Inventory => weight::CRAFT_IN_PLACE,
                Station::Table => weight::CRAFT_AT_TABLE,
            },
            ActionStep::Smelt(_) => weight::SMELT,
            ActionStep::Mine(_) => weight::MINE,
            ActionStep::Hunt(_) => weight::HUNT,
        };
        per.saturating_mul(u64::from(self.count()))
    }

    /// The preferred output item and the quantity this step yields of it.
    pub fn output(&self) -> Option<(&str, u32)> {
        match self {
            ActionStep::Craft(s) => s
                .result
                .first()
                .map(|r| (r.name.as_str(), r.count.saturating_mul(s.count))),
            ActionStep::Smelt(s) => Some((
                s.result.name.as_str(),
                s.result.count.saturating_mul(s.count),
            )),
            ActionStep::Mine(s) => s.target_item.first().map(|t| (t.as_str(), s.count)),
            ActionStep::Hunt(s) => Some((
                s.target_item.as_str(),
                s.drop_chance.expected_yield(s.count),
            )),
        }
    }

    /// Whether any variant of this step produces `item`.
    pub fn produces(&self, item: &str) -> bool {
        match self {
            ActionStep::Craft(s) => s.result.iter().any(|r| r.name == item),
            ActionStep::Smelt(s) => s.result.name == item,
            ActionStep::Mine(s) => s.target_item.iter().any(|t| t == item),
            ActionStep::Hunt(s) => s.target_item == item,
        }
    }
}

impl fmt::Display for ActionStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn join<'a>(values: impl Iterator<Item = &'a str>) -> String {
            values.collect::<Vec<_>>().join("|")
        }

        match self {
            ActionStep::Craft(s) => write!(
                f,
                "craft {} x{} ({})",
                join(s.result.iter().map(|r| r.name.as_str())),
                s.count,
                s.station().name()
            ),
            ActionStep::Smelt(s) => {
                write!(f, "smelt {} -> {} x{}", s.input.name, s.result.name, s.count)?;
                if let Some(fuel) = &s.fuel {
                    write!(f, " (fuel {fuel} x{})", s.fuel_count)?;
                }
                Ok(())
            }
            ActionStep::Mine(s) => {
                write!(
                    f,
                    "mine {} x{} for {}",
                    join(s.what.iter().map(String::as_str)),
                    s.count,
                    join(s.target_item.iter().map(String::as_str))
                )?;
                if let Some(tool) = &s.tool {
                    write!(f, " (with {tool})")?;
                }
                Ok(())
            }
            ActionStep::Hunt(s) => write!(
                f,
                "hunt {} x{} for {}",
                join(s.what.iter().map(String::as_str)),
                s.count,
                s.target_item
            ),
        }
    }
}

/// An ordered, executable sequence of steps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ActionPath {
    pub steps: Vec<ActionStep>,
}

impl ActionPath {
    pub fn new(steps: Vec<ActionStep>) -> Self {
        Self { steps }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActionStep> {
        self.steps.iter()
    }

    pub fn push(&mut self, step: ActionStep) {
        self.steps.push(step);
    }

    pub fn extend_from(&mut self, other: &ActionPath) {
        self.steps.extend(other.steps.iter().cloned());
    }

    /// Total weight of the plan.
    pub fn weight(&self) -> u64 {
        self.steps
            .iter()
            .fold(0u64, |acc, s| acc.saturating_add(s.weight()))
    }

    pub fn count_kind(&self, kind: ActionKind) -> usize {
        self.steps.iter().filter(|s| s.kind() == kind).count()
    }
}

impl From<Vec<ActionStep>> for ActionPath {
    fn from(steps: Vec<ActionStep>) -> Self {
        Self::new(steps)
    }
}

impl fmt::Display for ActionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.steps.iter().enumerate() {
            writeln!(f, "{:>3}. {step}", i + 1)?;
        }
        Ok(())
    }
}

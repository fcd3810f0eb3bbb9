use std::collections::BTreeMap;

use craft_core::{DropChance, FuelEfficiency, Ingredient, ItemRef, PersistentItems, Station};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ToolSpec {
    pub kind: String,
    pub tier: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemInfo {
    pub name: String,
    /// Semantic category shared by interchangeable members (`planks`, `log`, ...).
    pub family: Option<String>,
    pub species: Option<String>,
    pub persistent: bool,
    /// Set when the item is a harvesting tool.
    pub tool: Option<ToolSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipe {
    pub result: ItemRef,
    /// Sorted by item name.
    pub ingredients: Vec<Ingredient>,
    pub station: Station,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmeltRecipe {
    pub input: String,
    pub result: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fuel {
    pub item: String,
    pub efficiency: FuelEfficiency,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ToolRequirement {
    pub kind: String,
    pub min_tier: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockSource {
    pub block: String,
    pub drop: String,
    pub tool: Option<ToolRequirement>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MobSource {
    pub mob: String,
    pub drop: String,
    pub chance: DropChance,
}

/// Read-only recipe and drop tables, indexed by produced item.
#[derive(Debug, Clone, Default)]
pub struct RecipeDb {
    pub(crate) items: BTreeMap<String, ItemInfo>,
    pub(crate) item_order: Vec<String>,
    pub(crate) recipes: BTreeMap<String, Vec<Recipe>>,
    pub(crate) smelting: BTreeMap<String, Vec<SmeltRecipe>>,
    pub(crate) fuels: Vec<Fuel>,
    pub(crate) blocks: BTreeMap<String, Vec<BlockSource>>,
    pub(crate) mobs: BTreeMap<String, Vec<MobSource>>,
    pub(crate) families: BTreeMap<String, Vec<String>>,
}

impl RecipeDb {
    pub fn item(&self, name: &str) -> Option<&ItemInfo> {
        self.items.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.items.contains_key(name)
    }

    /// All items in declaration order.
    pub fn items(&self) -> impl Iterator<Item = &ItemInfo> {
        self.item_order.iter().filter_map(|n| self.items.get(n))
    }

    pub fn recipes_for(&self, item: &str) -> &[Recipe] {
        self.recipes.get(item).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn smelt_inputs_for(&self, item: &str) -> &[SmeltRecipe] {
        self.smelting.get(item).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn block_sources(&self, item: &str) -> &[BlockSource] {
        self.blocks.get(item).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn mob_sources(&self, item: &str) -> &[MobSource] {
        self.mobs.get(item).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Fuels in preference order.
    pub fn fuels(&self) -> &[Fuel] {
        &self.fuels
    }

    pub fn fuel_efficiency(&self, item: &str) -> Option<FuelEfficiency> {
        self.fuels
            .iter()
            .find(|f| f.item == item)
            .map(|f| f.efficiency)
    }

    pub fn family_of(&self, item: &str) -> Option<&str> {
        self.items.get(item)?.family.as_deref()
    }

    pub fn family_members(&self, family: &str) -> &[String] {
        self.families.get(family).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn species_of(&self, item: &str) -> Option<&str> {
        self.items.get(item)?.species.as_deref()
    }

    /// The semantic category used to compare recipe shapes: the family when grouping, else the
    /// item itself.
    pub fn canonical_name<'a>(&'a self, item: &'a str, group_families: bool) -> &'a str {
        if group_families {
            self.family_of(item).unwrap_or(item)
        } else {
            item
        }
    }

    /// Whether `item` names one species of a family that has at least one other concrete member.
    pub fn is_species_specific(&self, item: &str) -> bool {
        let Some(info) = self.items.get(item) else {
            return false;
        };
        match (&info.family, &info.species) {
            (Some(family), Some(_)) => self.family_members(family).len() >= 2,
            _ => false,
        }
    }

    /// The member of `family` belonging to `species`, if one exists.
    pub fn member_for_species(&self, family: &str, species: &str) -> Option<&str> {
        self.family_members(family)
            .iter()
            .find(|m| self.species_of(m) == Some(species))
            .map(String::as_str)
    }

    /// Tools meeting `req`, lowest tier first.
    pub fn tools_satisfying(&self, req: &ToolRequirement) -> Vec<&ItemInfo> {
        let mut tools: Vec<&ItemInfo> = self
            .items()
            .filter(|i| {
                i.tool
                    .as_ref()
                    .is_some_and(|t| t.kind == req.kind && t.tier >= req.min_tier)
            })
            .collect();
        tools.sort_by_key(|i| i.tool.as_ref().map(|t| t.tier));
        tools
    }

    pub fn persistent_items(&self) -> PersistentItems {
        self.items()
            .filter(|i| i.persistent)
            .map(|i| i.name.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

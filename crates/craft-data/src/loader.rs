use std::collections::BTreeMap;
use std::path::PathBuf;

use craft_core::{DropChance, FuelEfficiency, Ingredient, ItemRef, Station};
use serde::Deserialize;
use thiserror::Error;

use crate::types::{
    BlockSource, Fuel, ItemInfo, MobSource, Recipe, RecipeDb, SmeltRecipe, ToolRequirement,
    ToolSpec,
};

#[derive(Debug, Error)]
pub enum DataError {
    #[error("yaml parse error in {file}: {source}")]
    Yaml {
        file: &'static str,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("{context} references unknown item: {item}")]
    MissingItem { context: String, item: String },
    #[error("invalid entry: {0}")]
    Invalid(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Where to read the dataset from.
pub enum RecipeSource<'a> {
    /// The base dataset compiled into the crate.
    Embedded,
    /// A directory holding `items.yaml`, `recipes.yaml` and the optional `smelting.yaml`,
    /// `fuels.yaml`, `blocks.yaml`, `mobs.yaml`.
    Path(PathBuf),
    Str {
        items: &'a str,
        recipes: &'a str,
        smelting: Option<&'a str>,
        fuels: Option<&'a str>,
        blocks: Option<&'a str>,
        mobs: Option<&'a str>,
    },
}

#[derive(Debug, Deserialize)]
struct RawItem {
    name: String,
    family: Option<String>,
    species: Option<String>,
    #[serde(default)]
    persistent: bool,
    tool: Option<RawTool>,
}

#[derive(Debug, Deserialize)]
struct RawTool {
    kind: String,
    tier: u8,
}

fn one() -> u32 {
    1
}

fn inventory() -> Station {
    Station::Inventory
}

#[derive(Debug, Deserialize)]
struct RawRecipe {
    result: String,
    #[serde(default = "one")]
    count: u32,
    #[serde(default = "inventory")]
    station: Station,
    ingredients: BTreeMap<String, u32>,
}

#[derive(Debug, Deserialize)]
struct RawSmelt {
    input: String,
    result: String,
}

#[derive(Debug, Deserialize)]
struct RawFuel {
    item: String,
    milli_smelts: u32,
}

#[derive(Debug, Deserialize)]
struct RawBlock {
    name: String,
    drops: Option<String>,
    tool: Option<RawToolRequirement>,
}

#[derive(Debug, Deserialize)]
struct RawToolRequirement {
    kind: String,
    min_tier: u8,
}

#[derive(Debug, Deserialize)]
struct RawMob {
    name: String,
    drops: Vec<RawMobDrop>,
}

#[derive(Debug, Deserialize)]
struct RawMobDrop {
    item: String,
    #[serde(default = "always")]
    chance: u16,
}

fn always() -> u16 {
    DropChance::ALWAYS.basis_points()
}

#[derive(Debug, Default)]
struct RawData {
    items: Vec<RawItem>,
    recipes: Vec<RawRecipe>,
    smelting: Vec<RawSmelt>,
    fuels: Vec<RawFuel>,
    blocks: Vec<RawBlock>,
    mobs: Vec<RawMob>,
}

impl RecipeDb {
    pub fn load(source: RecipeSource<'_>) -> Result<Self, DataError> {
        let raw = match source {
            RecipeSource::Embedded => parse_raw(
                include_str!("../data/base/items.yaml"),
                include_str!("../data/base/recipes.yaml"),
                Some(include_str!("../data/base/smelting.yaml")),
                Some(include_str!("../data/base/fuels.yaml")),
                Some(include_str!("../data/base/blocks.yaml")),
                Some(include_str!("../data/base/mobs.yaml")),
            )?,
            RecipeSource::Path(dir) => {
                let items = std::fs::read_to_string(dir.join("items.yaml"))?;
                let recipes = std::fs::read_to_string(dir.join("recipes.yaml"))?;
                let smelting = std::fs::read_to_string(dir.join("smelting.yaml")).ok();
                let fuels = std::fs::read_to_string(dir.join("fuels.yaml")).ok();
                let blocks = std::fs::read_to_string(dir.join("blocks.yaml")).ok();
                let mobs = std::fs::read_to_string(dir.join("mobs.yaml")).ok();
                parse_raw(
                    &items,
                    &recipes,
                    smelting.as_deref(),
                    fuels.as_deref(),
                    blocks.as_deref(),
                    mobs.as_deref(),
                )?
            }
            RecipeSource::Str {
                items,
                recipes,
                smelting,
                fuels,
                blocks,
                mobs,
            } => parse_raw(items, recipes, smelting, fuels, blocks, mobs)?,
        };

        let db = compile(raw)?;
        tracing::debug!(
            items = db.items.len(),
            recipes = db.recipes.values().map(Vec::len).sum::<usize>(),
            fuels = db.fuels.len(),
            "recipe database loaded"
        );
        Ok(db)
    }

    /// The base dataset compiled into the crate.
    pub fn embedded() -> Result<Self, DataError> {
        Self::load(RecipeSource::Embedded)
    }
}

fn parse_list<T: for<'de> Deserialize<'de>>(
    file: &'static str,
    text: Option<&str>,
) -> Result<Vec<T>, DataError> {
    match text {
        Some(s) if !s.trim().is_empty() => {
            let parsed: Option<Vec<T>> =
                serde_yaml::from_str(s).map_err(|source| DataError::Yaml { file, source })?;
            Ok(parsed.unwrap_or_default())
        }
        _ => Ok(Vec::new()),
    }
}

fn parse_raw(
    items: &str,
    recipes: &str,
    smelting: Option<&str>,
    fuels: Option<&str>,
    blocks: Option<&str>,
    mobs: Option<&str>,
) -> Result<RawData, DataError> {
    Ok(RawData {
        items: parse_list("items.yaml", Some(items))?,
        recipes: parse_list("recipes.yaml", Some(recipes))?,
        smelting: parse_list("smelting.yaml", smelting)?,
        fuels: parse_list("fuels.yaml", fuels)?,
        blocks: parse_list("blocks.yaml", blocks)?,
        mobs: parse_list("mobs.yaml", mobs)?,
    })
}

fn compile(raw: RawData) -> Result<RecipeDb, DataError> {
    let mut db = RecipeDb::default();

    for item in raw.items {
        if db.items.contains_key(&item.name) {
            return Err(DataError::Invalid(format!("duplicate item {}", item.name)));
        }
        if let Some(family) = &item.family {
            db.families
                .entry(family.clone())
                .or_default()
                .push(item.name.clone());
        }
        db.item_order.push(item.name.clone());
        db.items.insert(
            item.name.clone(),
            ItemInfo {
                name: item.name,
                family: item.family,
                species: item.species,
                persistent: item.persistent,
                tool: item.tool.map(|t| ToolSpec {
                    kind: t.kind,
                    tier: t.tier,
                }),
            },
        );
    }

    let require = |db: &RecipeDb, context: &str, item: &str| -> Result<(), DataError> {
        if db.items.contains_key(item) {
            Ok(())
        } else {
            Err(DataError::MissingItem {
                context: context.to_string(),
                item: item.to_string(),
            })
        }
    };

    for recipe in raw.recipes {
        let context = format!("recipe for {}", recipe.result);
        require(&db, &context, &recipe.result)?;
        if recipe.count == 0 || recipe.ingredients.is_empty() {
            return Err(DataError::Invalid(context));
        }
        let mut ingredients = Vec::with_capacity(recipe.ingredients.len());
        for (item, count) in recipe.ingredients {
            require(&db, &context, &item)?;
            if count == 0 {
                return Err(DataError::Invalid(format!("{context}: zero {item}")));
            }
            ingredients.push(Ingredient::new(item, count));
        }
        db.recipes
            .entry(recipe.result.clone())
            .or_default()
            .push(Recipe {
                result: ItemRef::new(recipe.result, recipe.count),
                ingredients,
                station: recipe.station,
            });
    }

    for smelt in raw.smelting {
        let context = format!("smelting {} -> {}", smelt.input, smelt.result);
        require(&db, &context, &smelt.input)?;
        require(&db, &context, &smelt.result)?;
        db.smelting
            .entry(smelt.result.clone())
            .or_default()
            .push(SmeltRecipe {
                input: smelt.input,
                result: smelt.result,
            });
    }

    for fuel in raw.fuels {
        require(&db, "fuel table", &fuel.item)?;
        if fuel.milli_smelts == 0 {
            return Err(DataError::Invalid(format!("fuel {} burns for 0", fuel.item)));
        }
        db.fuels.push(Fuel {
            item: fuel.item,
            efficiency: FuelEfficiency(fuel.milli_smelts),
        });
    }

    for block in raw.blocks {
        let drop = block.drops.unwrap_or_else(|| block.name.clone());
        require(&db, &format!("block {}", block.name), &drop)?;
        db.blocks.entry(drop.clone()).or_default().push(BlockSource {
            block: block.name,
            drop,
            tool: block.tool.map(|t| ToolRequirement {
                kind: t.kind,
                min_tier: t.min_tier,
            }),
        });
    }

    for mob in raw.mobs {
        for drop in mob.drops {
            require(&db, &format!("mob {}", mob.name), &drop.item)?;
            if drop.chance == 0 || drop.chance > DropChance::ALWAYS.basis_points() {
                return Err(DataError::Invalid(format!(
                    "mob {} drop {} chance {}",
                    mob.name, drop.item, drop.chance
                )));
            }
            db.mobs.entry(drop.item.clone()).or_default().push(MobSource {
                mob: mob.name.clone(),
                drop: drop.item,
                chance: DropChance(drop.chance),
            });
        }
    }

    Ok(db)
}

//! Recipe/drop database for the craft planner.
//!
//! The database is loaded once from YAML (an embedded base dataset, a directory, or in-memory
//! strings) and is read-only afterwards.

#![forbid(unsafe_code)]

mod loader;
mod types;

pub use loader::{DataError, RecipeSource};
pub use types::{
    BlockSource, Fuel, ItemInfo, MobSource, Recipe, RecipeDb, SmeltRecipe, ToolRequirement,
    ToolSpec,
};

pub use craft_core::{CRAFTING_TABLE, FURNACE};

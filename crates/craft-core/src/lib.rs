//! Deterministic data model for craft/smelt/mine/hunt action planning.
//!
//! Trees and plans are plain values: builders produce them, enumerators read them, nothing
//! shares them mutably.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod catalog;
pub mod ledger;
pub mod node;
pub mod quantity;
pub mod step;
pub mod variant;
pub mod world;

pub use catalog::PersistentItems;
pub use ledger::{Ledger, Shortfall};
pub use node::{
    CraftNode, HuntNode, MineNode, Operator, RequireNode, RootNode, SmeltNode, TreeNode,
};
pub use quantity::{DropChance, FuelEfficiency};
pub use step::{
    weight, ActionKind, ActionPath, ActionStep, CraftStep, HuntStep, Ingredient, IngredientList,
    ItemRef, MineStep, SmeltStep, Station, CRAFTING_TABLE, FURNACE,
};
pub use variant::{Variant, VariantGroup, VariantMode};
pub use world::{ResourceInfo, WorldSnapshot};

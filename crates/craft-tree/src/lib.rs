//! Builds AND/OR action trees from a [`craft_data::RecipeDb`] and prunes them against a world
//! snapshot.
//!
//! Both passes are pure functions of their arguments: the inventory travels inside an explicit
//! [`BuildContext`] value and is never mutated in place.

#![forbid(unsafe_code)]

mod builder;
mod context;
mod pruner;
mod selection;

pub use builder::RecipeTreeBuilder;
pub use context::{BuildContext, BuilderOptions};
pub use pruner::{PrunerConfig, WorldPruner};
pub use selection::{SelectionPolicy, SelectionRule};

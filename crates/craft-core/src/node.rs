use std::collections::BTreeSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    ActionStep, CraftStep, DropChance, HuntStep, IngredientList, ItemRef, MineStep, SmeltStep,
    Station, VariantGroup,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
pub enum Operator {
    And,
    Or,
}

/// Top of a request. Children are alternatives.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RootNode {
    pub what: VariantGroup<String>,
    pub count: u32,
    pub children: Vec<TreeNode>,
}

/// A prerequisite gate: every child runs, in order, and nothing is appended.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RequireNode {
    pub what: String,
    pub count: u32,
    pub children: Vec<TreeNode>,
}

/// Ingredient sub-trees in order, then the craft itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CraftNode {
    pub what: VariantGroup<Station>,
    /// Craft operations to perform.
    pub count: u32,
    pub result: VariantGroup<ItemRef>,
    pub ingredients: VariantGroup<IngredientList>,
    pub children: Vec<TreeNode>,
}

/// `Or` selects among input sources (children are `And` smelt nodes); `And` sequences furnace,
/// fuel and input prerequisites, then smelts.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct SmeltNode {
    pub operator: Operator,
    pub input: VariantGroup<ItemRef>,
    pub result: ItemRef,
    pub fuel: Option<String>,
    pub fuel_count: u32,
    pub count: u32,
    pub children: Vec<TreeNode>,
}

/// An alternative over block sources, or a leaf that breaks `count` blocks.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct MineNode {
    pub what: VariantGroup<String>,
    /// A singleton, or parallel to `what`.
    pub target_item: VariantGroup<String>,
    pub tool: Option<String>,
    pub count: u32,
    pub children: Vec<TreeNode>,
}

/// An alternative over mob sources, or a leaf that kills `count` mobs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct HuntNode {
    pub what: VariantGroup<String>,
    pub target_item: String,
    pub drop_chance: DropChance,
    pub count: u32,
    pub children: Vec<TreeNode>,
}

/// AND/OR action tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "action", rename_all = "snake_case"))]
pub enum TreeNode {
    Root(RootNode),
    Require(RequireNode),
    Craft(CraftNode),
    Smelt(SmeltNode),
    Mine(MineNode),
    Hunt(HuntNode),
}

impl TreeNode {
    /// A root with no alternatives; it yields no plans.
    pub fn empty_root(what: impl Into<String>, count: u32) -> Self {
        TreeNode::Root(RootNode {
            what: VariantGroup::single(what.into()),
            count,
            children: Vec::new(),
        })
    }

    pub fn action_name(&self) -> &'static str {
        match self {
            TreeNode::Root(_) => "root",
            TreeNode::Require(_) => "require",
            TreeNode::Craft(_) => "craft",
            TreeNode::Smelt(_) => "smelt",
            TreeNode::Mine(_) => "mine",
            TreeNode::Hunt(_) => "hunt",
        }
    }

    pub fn count(&self) -> u32 {
        match self {
            TreeNode::Root(n) => n.count,
            TreeNode::Require(n) => n.count,
            TreeNode::Craft(n) => n.count,
            TreeNode::Smelt(n) => n.count,
            TreeNode::Mine(n) => n.count,
            TreeNode::Hunt(n) => n.count,
        }
    }

    pub fn children(&self) -> &[TreeNode] {
        match self {
            TreeNode::Root(n) => &n.children,
            TreeNode::Require(n) => &n.children,
            TreeNode::Craft(n) => &n.children,
            TreeNode::Smelt(n) => &n.children,
            TreeNode::Mine(n) => &n.children,
            TreeNode::Hunt(n) => &n.children,
        }
    }

    pub fn children_mut(&mut self) -> &mut Vec<TreeNode> {
        match self {
            TreeNode::Root(n) => &mut n.children,
            TreeNode::Require(n) => &mut n.children,
            TreeNode::Craft(n) => &mut n.children,
            TreeNode::Smelt(n) => &mut n.children,
            TreeNode::Mine(n) => &mut n.children,
            TreeNode::Hunt(n) => &mut n.children,
        }
    }

    /// The composition rule for this node's children.
    pub fn operator(&self) -> Operator {
        match self {
            TreeNode::Root(_) => Operator::Or,
            TreeNode::Require(_) | TreeNode::Craft(_) => Operator::And,
            TreeNode::Smelt(n) => n.operator,
            TreeNode::Mine(_) | TreeNode::Hunt(_) => Operator::Or,
        }
    }

    /// A root with no alternatives, which can never be satisfied.
    pub fn is_dead_end(&self) -> bool {
        matches!(self, TreeNode::Root(n) if n.children.is_empty())
    }

    /// The step this node appends after its children, if it has one.
    ///
    /// Craft and `And` smelt nodes always append; mine and hunt nodes only as leaves.
    pub fn own_step(&self) -> Option<ActionStep> {
        match self {
            TreeNode::Root(_) | TreeNode::Require(_) => None,
            TreeNode::Craft(n) => Some(ActionStep::Craft(CraftStep {
                what: n.what.clone(),
                count: n.count,
                result: n.result.clone(),
                ingredients: n.ingredients.clone(),
            })),
            TreeNode::Smelt(n) => match n.operator {
                Operator::Or => None,
                Operator::And => Some(ActionStep::Smelt(SmeltStep {
                    input: n
                        .input
                        .first()
                        .cloned()
                        .unwrap_or_else(|| ItemRef::new("", 0)),
                    result: n.result.clone(),
                    fuel: n.fuel.clone(),
                    fuel_count: n.fuel_count,
                    count: n.count,
                })),
            },
            TreeNode::Mine(n) if n.children.is_empty() => Some(ActionStep::Mine(MineStep {
                what: n.what.clone(),
                target_item: n.target_item.clone(),
                tool: n.tool.clone(),
                count: n.count,
            })),
            TreeNode::Hunt(n) if n.children.is_empty() => Some(ActionStep::Hunt(HuntStep {
                what: n.what.clone(),
                target_item: n.target_item.clone(),
                drop_chance: n.drop_chance,
                count: n.count,
            })),
            TreeNode::Mine(_) | TreeNode::Hunt(_) => None,
        }
    }

    /// Items this subtree hands to its parent.
    pub fn outputs(&self) -> BTreeSet<String> {
        let mut out = BTreeSet::new();
        self.collect_outputs(&mut out);
        out
    }

    fn collect_outputs(&self, out: &mut BTreeSet<String>) {
        match self {
            TreeNode::Root(n) => n.children.iter().for_each(|c| c.collect_outputs(out)),
            // Gate children before the last one only acquire prerequisites.
            TreeNode::Require(n) => {
                if let Some(last) = n.children.last() {
                    last.collect_outputs(out);
                }
            }
            TreeNode::Craft(n) => out.extend(n.result.iter().map(|r| r.name.clone())),
            TreeNode::Smelt(n) => {
                out.insert(n.result.name.clone());
            }
            TreeNode::Mine(n) => {
                if n.children.is_empty() {
                    out.extend(n.target_item.iter().cloned());
                } else {
                    n.children.iter().for_each(|c| c.collect_outputs(out));
                }
            }
            TreeNode::Hunt(n) => {
                if n.children.is_empty() {
                    out.insert(n.target_item.clone());
                } else {
                    n.children.iter().for_each(|c| c.collect_outputs(out));
                }
            }
        }
    }

    /// Number of nodes in the subtree, including this one.
    pub fn node_count(&self) -> usize {
        1 + self.children().iter().map(TreeNode::node_count).sum::<usize>()
    }

    pub fn depth(&self) -> usize {
        1 + self
            .children()
            .iter()
            .map(TreeNode::depth)
            .max()
            .unwrap_or(0)
    }
}

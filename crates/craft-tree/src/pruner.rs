use std::collections::BTreeSet;

use craft_core::{
    HuntNode, Ledger, MineNode, Operator, RootNode, TreeNode, VariantGroup, VariantMode,
    WorldSnapshot,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrunerConfig {
    pub enabled: bool,
    /// Sources whose closest instance is farther than this are treated as absent.
    pub max_distance: Option<f64>,
}

impl Default for PrunerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_distance: None,
        }
    }
}

/// Drops tree branches the local world cannot supply.
#[derive(Debug, Clone, Default)]
pub struct WorldPruner {
    config: PrunerConfig,
}

impl WorldPruner {
    pub fn new(config: PrunerConfig) -> Self {
        Self { config }
    }

    /// Prune `tree` against `snapshot`. Without a snapshot, or when disabled, the tree is
    /// returned unchanged. A tree with nothing left becomes a root without children.
    pub fn prune(
        &self,
        tree: &TreeNode,
        snapshot: Option<&WorldSnapshot>,
        ledger: &Ledger,
    ) -> TreeNode {
        let Some(snapshot) = snapshot.filter(|_| self.config.enabled) else {
            return tree.clone();
        };

        let pass = Pass {
            snapshot,
            ledger,
            max_distance: self.config.max_distance,
        };
        let pruned = match pass.node(tree) {
            Some(node) => node,
            None => match tree {
                TreeNode::Root(root) => TreeNode::Root(RootNode {
                    what: root.what.clone(),
                    count: root.count,
                    children: Vec::new(),
                }),
                other => TreeNode::empty_root(other.action_name(), other.count()),
            },
        };
        debug!(
            before = tree.node_count(),
            after = pruned.node_count(),
            "pruned tree against world snapshot"
        );
        pruned
    }
}

struct Pass<'a> {
    snapshot: &'a WorldSnapshot,
    ledger: &'a Ledger,
    max_distance: Option<f64>,
}

impl Pass<'_> {
    fn node(&self, node: &TreeNode) -> Option<TreeNode> {
        match node {
            TreeNode::Mine(mine) if mine.children.is_empty() => self.mine_leaf(mine),
            TreeNode::Hunt(hunt) if hunt.children.is_empty() => self.hunt_leaf(hunt),
            _ => match node.operator() {
                Operator::Or => self.or_node(node),
                Operator::And => self.and_node(node),
            },
        }
    }

    fn or_node(&self, node: &TreeNode) -> Option<TreeNode> {
        let children: Vec<TreeNode> = node.children().iter().filter_map(|c| self.node(c)).collect();
        if children.is_empty() {
            return None;
        }

        let mut out = node.clone();
        match &mut out {
            TreeNode::Smelt(smelt) => {
                let inputs: Vec<String> = children
                    .iter()
                    .filter_map(|c| match c {
                        TreeNode::Smelt(s) => s.input.first().map(|i| i.name.clone()),
                        _ => None,
                    })
                    .collect();
                smelt.input.retain(|i| inputs.contains(&i.name));
            }
            TreeNode::Mine(mine) => {
                let blocks = leaf_values(&children, |c| match c {
                    TreeNode::Mine(m) => Some(&m.what),
                    _ => None,
                });
                mine.what.retain(|b| blocks.contains(&b));
            }
            TreeNode::Hunt(hunt) => {
                let mobs = leaf_values(&children, |c| match c {
                    TreeNode::Hunt(h) => Some(&h.what),
                    _ => None,
                });
                hunt.what.retain(|m| mobs.contains(&m));
            }
            _ => {}
        }
        *out.children_mut() = children;
        Some(out)
    }

    fn and_node(&self, node: &TreeNode) -> Option<TreeNode> {
        let mut children = Vec::with_capacity(node.children().len());
        for child in node.children() {
            children.push(self.node(child)?);
        }

        let mut out = node.clone();
        if let TreeNode::Craft(craft) = &mut out {
            let produced: BTreeSet<String> = children.iter().flat_map(TreeNode::outputs).collect();
            let keep: Vec<usize> = craft
                .ingredients
                .iter()
                .enumerate()
                .filter(|(_, list)| {
                    list.iter()
                        .all(|i| self.ledger.has(&i.item) || produced.contains(&i.item))
                })
                .map(|(index, _)| index)
                .collect();
            if keep.is_empty() {
                trace!(result = ?craft.result.first(), "no ingredient variant survives");
                return None;
            }
            if craft.result.len() == craft.ingredients.len() {
                craft.result.retain_indices(&keep);
            }
            craft.ingredients.retain_indices(&keep);
        }
        *out.children_mut() = children;
        Some(out)
    }

    fn available(&self, name: &str) -> bool {
        if self.snapshot.count(name) == 0 {
            return false;
        }
        match self.max_distance {
            Some(limit) => self
                .snapshot
                .closest_distance(name)
                .is_some_and(|d| d <= limit),
            None => true,
        }
    }

    /// Indices of `group` that are present, nearby, and supply enough between them.
    fn supplied(&self, group: &VariantGroup<String>, needed: u32) -> Vec<usize> {
        let present: Vec<usize> = group
            .iter()
            .enumerate()
            .filter(|(_, name)| self.available(name))
            .map(|(index, _)| index)
            .collect();

        match group.mode {
            VariantMode::AnyOf => {
                let total: u64 = present
                    .iter()
                    .filter_map(|&i| group.get(i))
                    .map(|name| u64::from(self.snapshot.count(name)))
                    .sum();
                if total >= u64::from(needed) {
                    present
                } else {
                    Vec::new()
                }
            }
            VariantMode::OneOf => present
                .into_iter()
                .filter(|&i| group.get(i).is_some_and(|name| self.snapshot.count(name) >= needed))
                .collect(),
        }
    }

    fn mine_leaf(&self, mine: &MineNode) -> Option<TreeNode> {
        let keep = self.supplied(&mine.what, mine.count);
        if keep.is_empty() {
            trace!(blocks = ?mine.what, count = mine.count, "mine source pruned");
            return None;
        }
        let mut out = mine.clone();
        if out.target_item.len() == out.what.len() {
            out.target_item.retain_indices(&keep);
        }
        out.what.retain_indices(&keep);
        Some(TreeNode::Mine(out))
    }

    fn hunt_leaf(&self, hunt: &HuntNode) -> Option<TreeNode> {
        let keep = self.supplied(&hunt.what, hunt.count);
        if keep.is_empty() {
            trace!(mobs = ?hunt.what, count = hunt.count, "hunt source pruned");
            return None;
        }
        let mut out = hunt.clone();
        out.what.retain_indices(&keep);
        Some(TreeNode::Hunt(out))
    }
}

/// Every value of the leaf groups under `nodes`.
fn leaf_values<'n>(
    nodes: &'n [TreeNode],
    group: impl Fn(&'n TreeNode) -> Option<&'n VariantGroup<String>> + Copy,
) -> BTreeSet<&'n String> {
    let mut out = BTreeSet::new();
    for node in nodes {
        if node.children().is_empty() {
            if let Some(values) = group(node) {
                out.extend(values.iter());
            }
        } else {
            out.extend(leaf_values(node.children(), group));
        }
    }
    out
}

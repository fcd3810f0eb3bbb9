use std::iter;

use craft_core::{ActionPath, Operator, TreeNode};

type Paths<'a> = Box<dyn Iterator<Item = ActionPath> + 'a>;

/// All plans of `node` in discovery order: OR children one after another, AND children as a
/// lazily nested cartesian product followed by the node's own step.
pub(crate) fn paths(node: &TreeNode) -> Paths<'_> {
    if node.children().is_empty() {
        return match (node, node.own_step()) {
            (_, Some(step)) => Box::new(iter::once(ActionPath::new(vec![step]))),
            (TreeNode::Root(_), None) => Box::new(iter::empty()),
            (_, None) => Box::new(iter::once(ActionPath::default())),
        };
    }

    match node.operator() {
        Operator::Or => Box::new(node.children().iter().flat_map(paths)),
        Operator::And => {
            let mut combined: Paths<'_> = Box::new(iter::once(ActionPath::default()));
            for child in node.children() {
                combined = Box::new(combined.flat_map(move |prefix| {
                    paths(child).map(move |suffix| {
                        let mut path = prefix.clone();
                        path.extend_from(&suffix);
                        path
                    })
                }));
            }
            let own = node.own_step();
            Box::new(combined.map(move |mut path| {
                if let Some(step) = &own {
                    path.push(step.clone());
                }
                path
            }))
        }
    }
}

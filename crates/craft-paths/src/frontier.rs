//! Best-first plan streams.
//!
//! OR nodes merge their children's streams through a min-heap. AND nodes walk the grid of
//! child-stream index tuples from `[0, 0, ..]` outwards: each pop emits one combination and
//! pushes the tuples that advance exactly one child, so the cartesian product is only ever
//! explored as far as the caller pulls.
//!
//! Streams are ordered by a floor rather than by the cost of the plan itself. Sanitizing may
//! shed the acquisition of a persistent item that a sibling already acquires, so plan costs are
//! not additive over the grid. The floor leaves those acquisitions out: it is additive, and no
//! amount of sanitizing takes a plan below it. [`Settled`] turns floor order back into cost
//! order.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};
use std::iter::{self, Peekable};
use std::rc::Rc;

use craft_core::{ActionPath, ActionStep, Operator, PersistentItems, TreeNode};
use tracing::debug;

use crate::PathValidator;

/// Ordering key for best-first enumeration. Must be additive over steps.
pub trait PathCost {
    fn step(&self, step: &ActionStep) -> u64;

    fn cost(&self, path: &ActionPath) -> u64 {
        path.iter().map(|step| self.step(step)).sum()
    }
}

/// Number of steps.
#[derive(Debug, Clone, Copy, Default)]
pub struct StepCount;

impl PathCost for StepCount {
    fn step(&self, _: &ActionStep) -> u64 {
        1
    }
}

/// Sum of step weights.
#[derive(Debug, Clone, Copy, Default)]
pub struct TotalWeight;

impl PathCost for TotalWeight {
    fn step(&self, step: &ActionStep) -> u64 {
        step.weight()
    }
}

/// A partial plan and the least cost any plan containing it can be sanitized down to.
#[derive(Debug, Clone)]
pub(crate) struct Costed {
    pub floor: u64,
    pub path: ActionPath,
}

type Stream<'a> = Box<dyn Iterator<Item = Costed> + 'a>;

/// Plans of `node` in non-decreasing floor.
pub(crate) fn stream<'a, C>(node: &'a TreeNode, cost: C, validator: &Rc<PathValidator>) -> Stream<'a>
where
    C: PathCost + Copy + 'a,
{
    walk(node, cost, validator, Position::Request)
}

/// Where a node sits relative to the requested item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Position {
    /// On the chain that produces the requested item.
    Request,
    /// Feeding the request, outside any persistent acquisition.
    Kept,
    /// Inside the acquisition of a persistent item, which sanitizing may shed.
    Sheddable,
}

impl Position {
    fn of_child(
        self,
        parent: &TreeNode,
        index: usize,
        child: &TreeNode,
        persistent: &PersistentItems,
    ) -> Self {
        if self == Position::Sheddable {
            return self;
        }
        let carries_request = self == Position::Request
            && match parent {
                TreeNode::Root(_) | TreeNode::Mine(_) | TreeNode::Hunt(_) => true,
                TreeNode::Smelt(smelt) => smelt.operator == Operator::Or,
                // Earlier gate children only acquire the prerequisite.
                TreeNode::Require(gate) => index + 1 == gate.children.len(),
                TreeNode::Craft(_) => false,
            };
        if carries_request {
            Position::Request
        } else if acquires_persistent(child, persistent) {
            Position::Sheddable
        } else {
            Position::Kept
        }
    }

    fn floor<C: PathCost>(self, cost: &C, step: &ActionStep) -> u64 {
        match self {
            Position::Sheddable => 0,
            Position::Request | Position::Kept => cost.step(step),
        }
    }
}

fn acquires_persistent(node: &TreeNode, persistent: &PersistentItems) -> bool {
    let outputs = node.outputs();
    !outputs.is_empty() && outputs.iter().all(|item| persistent.contains(item))
}

fn walk<'a, C>(
    node: &'a TreeNode,
    cost: C,
    validator: &Rc<PathValidator>,
    position: Position,
) -> Stream<'a>
where
    C: PathCost + Copy + 'a,
{
    if node.children().is_empty() {
        let (path, floor) = match (node, node.own_step()) {
            (_, Some(step)) => {
                let floor = position.floor(&cost, &step);
                (ActionPath::new(vec![step]), floor)
            }
            (TreeNode::Root(_), None) => return Box::new(iter::empty()),
            (_, None) => (ActionPath::default(), 0),
        };
        return Box::new(iter::once(Costed { floor, path }));
    }

    let persistent = validator.persistent();
    let children = node
        .children()
        .iter()
        .enumerate()
        .map(|(index, child)| {
            let position = position.of_child(node, index, child, persistent);
            walk(child, cost, validator, position)
        })
        .collect();
    match node.operator() {
        Operator::Or => Box::new(OrMerge::new(children)),
        Operator::And => {
            let own = node.own_step();
            let own_floor = own.as_ref().map_or(0, |step| position.floor(&cost, step));
            Box::new(AndFrontier::new(children, own, own_floor, Rc::clone(validator)))
        }
    }
}

/// Heap entry ordered by `(cost, tie)`, smallest first.
struct Entry<T> {
    cost: u64,
    tie: u64,
    item: T,
}

impl<T> Entry<T> {
    fn key(&self) -> (u64, u64) {
        (self.cost, self.tie)
    }
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl<T> Eq for Entry<T> {}

impl<T> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering to make BinaryHeap behave like a min-heap.
        other.key().cmp(&self.key())
    }
}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

struct OrMerge<'a> {
    sources: Vec<Stream<'a>>,
    heap: BinaryHeap<Entry<(usize, ActionPath)>>,
    tie: u64,
}

impl<'a> OrMerge<'a> {
    fn new(sources: Vec<Stream<'a>>) -> Self {
        let mut merge = Self {
            sources,
            heap: BinaryHeap::new(),
            tie: 0,
        };
        for source in 0..merge.sources.len() {
            merge.pull(source);
        }
        merge
    }

    fn pull(&mut self, source: usize) {
        if let Some(next) = self.sources[source].next() {
            self.heap.push(Entry {
                cost: next.floor,
                tie: self.tie,
                item: (source, next.path),
            });
            self.tie += 1;
        }
    }
}

impl Iterator for OrMerge<'_> {
    type Item = Costed;

    fn next(&mut self) -> Option<Costed> {
        let Entry {
            cost: floor,
            item: (source, path),
            ..
        } = self.heap.pop()?;
        self.pull(source);
        Some(Costed { floor, path })
    }
}

/// A child stream with random access to everything pulled so far.
struct BufferedStream<'a> {
    source: Stream<'a>,
    buffer: Vec<Costed>,
    exhausted: bool,
}

impl<'a> BufferedStream<'a> {
    fn new(source: Stream<'a>) -> Self {
        Self {
            source,
            buffer: Vec::new(),
            exhausted: false,
        }
    }

    fn get(&mut self, index: usize) -> Option<&Costed> {
        while self.buffer.len() <= index && !self.exhausted {
            match self.source.next() {
                Some(next) => self.buffer.push(next),
                None => self.exhausted = true,
            }
        }
        self.buffer.get(index)
    }
}

struct AndFrontier<'a> {
    children: Vec<BufferedStream<'a>>,
    own: Option<ActionStep>,
    own_floor: u64,
    validator: Rc<PathValidator>,
    heap: BinaryHeap<Entry<(Vec<usize>, ActionPath)>>,
    seen: HashSet<Vec<usize>>,
    tie: u64,
    started: bool,
}

impl<'a> AndFrontier<'a> {
    fn new(
        children: Vec<Stream<'a>>,
        own: Option<ActionStep>,
        own_floor: u64,
        validator: Rc<PathValidator>,
    ) -> Self {
        Self {
            children: children.into_iter().map(BufferedStream::new).collect(),
            own,
            own_floor,
            validator,
            heap: BinaryHeap::new(),
            seen: HashSet::new(),
            tie: 0,
            started: false,
        }
    }

    /// Concatenate the children's plans at `indices`, append the own step and sanitize.
    fn combine(&mut self, indices: &[usize]) -> Option<Costed> {
        let mut path = ActionPath::default();
        let mut floor = self.own_floor;
        for (child, &index) in self.children.iter_mut().zip(indices) {
            let part = child.get(index)?;
            path.extend_from(&part.path);
            floor += part.floor;
        }
        if let Some(step) = &self.own {
            path.push(step.clone());
        }
        Some(Costed {
            floor,
            path: self.validator.sanitize_partial(path),
        })
    }

    fn push(&mut self, indices: Vec<usize>) {
        if !self.seen.insert(indices.clone()) {
            return;
        }
        if let Some(Costed { floor, path }) = self.combine(&indices) {
            self.heap.push(Entry {
                cost: floor,
                tie: self.tie,
                item: (indices, path),
            });
            self.tie += 1;
        }
    }
}

impl Iterator for AndFrontier<'_> {
    type Item = Costed;

    fn next(&mut self) -> Option<Costed> {
        if !self.started {
            self.started = true;
            self.push(vec![0; self.children.len()]);
        }

        let Entry {
            cost: floor,
            item: (indices, path),
            ..
        } = self.heap.pop()?;
        for child in 0..indices.len() {
            let mut successor = indices.clone();
            successor[child] += 1;
            self.push(successor);
        }
        Some(Costed { floor, path })
    }
}

/// Finished plans in non-decreasing cost.
///
/// Each plan pulled from the floor-ordered source is sanitized, replayed and held until the
/// next floor in the source is no lower than its cost. Exact duplicates are dropped.
pub(crate) struct Settled<'a, C> {
    source: Peekable<Stream<'a>>,
    cost: C,
    validator: Rc<PathValidator>,
    ready: BinaryHeap<Entry<ActionPath>>,
    admitted: HashSet<ActionPath>,
    released: u64,
    tie: u64,
}

impl<'a, C: PathCost> Settled<'a, C> {
    pub(crate) fn new(source: Stream<'a>, cost: C, validator: Rc<PathValidator>) -> Self {
        Self {
            source: source.peekable(),
            cost,
            validator,
            ready: BinaryHeap::new(),
            admitted: HashSet::new(),
            released: 0,
            tie: 0,
        }
    }

    fn admit(&mut self, path: ActionPath) {
        let path = self.validator.sanitize_or_keep(path);
        if !self.validator.is_feasible(&path) || self.admitted.contains(&path) {
            return;
        }
        let cost = self.cost.cost(&path);
        if cost < self.released {
            // Only reachable if sanitizing removed a step the floor counted.
            debug!(
                cost,
                released = self.released,
                "skipping plan cheaper than one already emitted"
            );
            return;
        }
        self.admitted.insert(path.clone());
        self.ready.push(Entry {
            cost,
            tie: self.tie,
            item: path,
        });
        self.tie += 1;
    }
}

impl<C: PathCost> Iterator for Settled<'_, C> {
    type Item = ActionPath;

    fn next(&mut self) -> Option<ActionPath> {
        loop {
            let bound = self.source.peek().map(|next| next.floor);
            let settled = self
                .ready
                .peek()
                .is_some_and(|cheapest| bound.map_or(true, |floor| cheapest.cost <= floor));
            if settled {
                let Entry { cost, item, .. } = self.ready.pop()?;
                self.released = cost;
                return Some(item);
            }
            let Costed { path, .. } = self.source.next()?;
            self.admit(path);
        }
    }
}

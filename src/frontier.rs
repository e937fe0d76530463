//! Node storage and frontier orderings used by the search driver.
//!
//! All nodes of one search run live in a single [`NodeArena`]. A node refers
//! to the node it was expanded from by [`NodeId`], an index into that arena,
//! so parent links only ever point backwards and the whole run is released at
//! once when the arena is dropped.
//!
//! Two frontier orderings are provided:
//! - [`AStarFrontier`]: ascending `f = g + h`, ties by ascending `h`, then by
//!   insertion order.
//! - [`FifoFrontier`]: plain first-in-first-out, for breadth-first search.
use crate::engine::{Configuration, Move};
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, VecDeque};
use std::ops::Index;

/// Stable handle of a node inside a [`NodeArena`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A configuration reached during search together with how it was reached.
///
/// Nodes are immutable once stored in the arena.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchNode {
    pub configuration: Configuration,
    /// Moves taken from the start configuration.
    pub g: u32,
    /// Heuristic estimate of the moves still needed.
    pub h: u32,
    /// Node this one was expanded from; `None` for the start node.
    pub parent: Option<NodeId>,
    /// Move applied to the parent's configuration; `None` for the start node.
    pub mv: Option<Move>,
}

impl SearchNode {
    pub fn root(configuration: Configuration, h: u32) -> Self {
        SearchNode {
            configuration,
            g: 0,
            h,
            parent: None,
            mv: None,
        }
    }

    /// Builds the successor of `parent` (stored under `parent_id`) reached by `mv`.
    pub fn child(
        parent_id: NodeId,
        parent: &SearchNode,
        mv: Move,
        configuration: Configuration,
        h: u32,
    ) -> Self {
        SearchNode {
            configuration,
            g: parent.g + 1,
            h,
            parent: Some(parent_id),
            mv: Some(mv),
        }
    }

    /// Combined priority `g + h`.
    pub fn f(&self) -> u32 {
        self.g + self.h
    }
}

/// Owner of every node created during one search run.
#[derive(Debug, Default)]
pub struct NodeArena {
    nodes: Vec<SearchNode>,
}

impl NodeArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, node: SearchNode) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    pub fn get(&self, id: NodeId) -> Option<&SearchNode> {
        self.nodes.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Walks from `id` back to the start node, yielding `id`'s node first.
    pub fn ancestry(&self, id: NodeId) -> Ancestry<'_> {
        Ancestry {
            arena: self,
            next: Some(id),
        }
    }
}

impl Index<NodeId> for NodeArena {
    type Output = SearchNode;

    fn index(&self, id: NodeId) -> &SearchNode {
        &self.nodes[id.0]
    }
}

/// Iterator returned by [`NodeArena::ancestry`].
pub struct Ancestry<'a> {
    arena: &'a NodeArena,
    next: Option<NodeId>,
}

impl<'a> Iterator for Ancestry<'a> {
    type Item = &'a SearchNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = &self.arena[self.next?];
        self.next = node.parent;
        Some(node)
    }
}

/// Collection of nodes waiting to be expanded.
pub trait Frontier {
    /// Offers a freshly generated node. Accepted nodes are moved into `arena`
    /// and queued; rejected ones are dropped without touching the arena.
    fn offer(&mut self, node: SearchNode, arena: &mut NodeArena) -> Option<NodeId>;

    /// Removes and returns the next node to expand.
    fn pop(&mut self, arena: &NodeArena) -> Option<NodeId>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// First-in-first-out frontier. Accepts every offered node; the BFS driver
/// deduplicates before offering.
#[derive(Debug, Default)]
pub struct FifoFrontier {
    queue: VecDeque<NodeId>,
}

impl FifoFrontier {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Frontier for FifoFrontier {
    fn offer(&mut self, node: SearchNode, arena: &mut NodeArena) -> Option<NodeId> {
        let id = arena.push(node);
        self.queue.push_back(id);
        Some(id)
    }

    fn pop(&mut self, _arena: &NodeArena) -> Option<NodeId> {
        self.queue.pop_front()
    }

    fn len(&self) -> usize {
        self.queue.len()
    }
}

#[derive(Debug, PartialEq, Eq)]
struct Entry {
    f: u32,
    h: u32,
    seq: u64,
    id: NodeId,
}

// BinaryHeap is a max-heap, so every key is compared in reverse.
impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .cmp(&self.f)
            .then_with(|| other.h.cmp(&self.h))
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Priority frontier for A*.
///
/// A node is rejected when the frontier already holds a node for the same
/// configuration with a cost `g` no larger than the new one. Otherwise it is
/// queued even if a costlier node for that configuration is still queued; the
/// older entry is left in place and skipped by the driver when popped after
/// its configuration has been explored.
#[derive(Debug, Default)]
pub struct AStarFrontier {
    heap: BinaryHeap<Entry>,
    // Lowest g among queued nodes of each configuration that has not been
    // popped yet. Once a configuration is popped the driver marks it explored
    // and never offers it again, so its remaining entries need no tracking.
    best_g: HashMap<Configuration, u32>,
    next_seq: u64,
}

impl AStarFrontier {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Frontier for AStarFrontier {
    fn offer(&mut self, node: SearchNode, arena: &mut NodeArena) -> Option<NodeId> {
        if self
            .best_g
            .get(&node.configuration)
            .is_some_and(|&queued| queued <= node.g)
        {
            return None;
        }
        self.best_g.insert(node.configuration.clone(), node.g);
        let (f, h) = (node.f(), node.h);
        let id = arena.push(node);
        self.heap.push(Entry {
            f,
            h,
            seq: self.next_seq,
            id,
        });
        self.next_seq += 1;
        Some(id)
    }

    fn pop(&mut self, arena: &NodeArena) -> Option<NodeId> {
        let entry = self.heap.pop()?;
        self.best_g.remove(&arena[entry.id].configuration);
        Some(entry.id)
    }

    fn len(&self) -> usize {
        self.heap.len()
    }
}

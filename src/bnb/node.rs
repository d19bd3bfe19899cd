//! Search tree nodes.

use crate::model::EntityId;
use fixedbitset::FixedBitSet;

/// Index of a node in the [`SearchTree`](super::tree::SearchTree) arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Raw arena index.
    pub fn index(self) -> usize {
        self.0
    }
}

/// One slot of a (partial) assignment: the entity placed there and the
/// weight it contributes.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AssignmentEntry {
    pub entity: EntityId,
    pub weight: f64,
}

/// A partial assignment in the search tree.
///
/// Entries `0..depth` are locked; entries `depth..num_slots` hold the greedy
/// fill that makes `total_weight` an upper bound for every completion of
/// this node. Locked entities are recorded in `used`.
///
/// Once `active` is false it stays false, and so does every descendant's.
#[derive(Debug, Clone)]
pub struct SolutionNode {
    pub(crate) entries: Vec<AssignmentEntry>,
    pub(crate) used: FixedBitSet,
    pub(crate) total_weight: f64,
    pub(crate) depth: usize,
    pub(crate) active: bool,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl SolutionNode {
    /// All `num_slots` entries, locked and speculative.
    pub fn entries(&self) -> &[AssignmentEntry] {
        &self.entries
    }

    /// The locked prefix.
    pub fn locked(&self) -> &[AssignmentEntry] {
        &self.entries[..self.depth]
    }

    /// Sum of all stored entry weights.
    pub fn total_weight(&self) -> f64 {
        self.total_weight
    }

    /// Number of locked slots.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Whether the node is still under consideration.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Whether `entity` is locked into this node.
    pub fn is_used(&self, entity: EntityId) -> bool {
        self.used.contains(entity)
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Entity ids in slot order.
    pub fn entity_ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.entries.iter().map(|e| e.entity)
    }
}

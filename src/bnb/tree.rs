//! Arena-backed search tree.
//!
//! Nodes live in one flat vector and refer to each other by [`NodeId`].
//! Children are owned by the tree, parent links are only used to walk up to
//! the nearest active ancestor. The whole arena is dropped at once when the
//! run finishes.

use super::node::{NodeId, SolutionNode};
use crate::error::AssignError;

#[derive(Debug, Default)]
pub struct SearchTree {
    nodes: Vec<SolutionNode>,
}

impl SearchTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes ever created.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> &SolutionNode {
        &self.nodes[id.0]
    }

    /// Reserves room for `additional` nodes, reporting allocation failure
    /// instead of aborting.
    pub fn reserve(&mut self, additional: usize) -> Result<(), AssignError> {
        self.nodes
            .try_reserve(additional)
            .map_err(|e| AssignError::ResourceExhausted(e.to_string()))
    }

    /// Adds a node without a parent.
    pub fn insert_root(&mut self, mut node: SolutionNode) -> Result<NodeId, AssignError> {
        self.reserve(1)?;
        node.parent = None;
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        Ok(id)
    }

    /// Adds `node` as the last child of `parent`.
    ///
    /// An inactive parent cannot gain active children.
    pub fn attach(
        &mut self,
        parent: NodeId,
        mut node: SolutionNode,
    ) -> Result<NodeId, AssignError> {
        self.reserve(1)?;
        self.nodes[parent.0]
            .children
            .try_reserve(1)
            .map_err(|e| AssignError::ResourceExhausted(e.to_string()))?;

        node.parent = Some(parent);
        node.active &= self.nodes[parent.0].active;
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        self.nodes[parent.0].children.push(id);
        Ok(id)
    }

    /// Deactivates `id` and every node below it.
    ///
    /// Returns how many nodes changed from active to inactive.
    pub fn prune(&mut self, id: NodeId) -> usize {
        let mut pruned = 0;
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let node = &mut self.nodes[current.0];
            if node.active {
                node.active = false;
                pruned += 1;
            }
            stack.extend(node.children.iter().copied());
        }
        pruned
    }

    /// Whether any direct child of `id` is still active.
    pub fn has_active_child(&self, id: NodeId) -> bool {
        self.nodes[id.0]
            .children
            .iter()
            .any(|&c| self.nodes[c.0].active)
    }

    /// Walks from `id` towards the root and returns the first active node.
    ///
    /// Stops at the root even when it is inactive.
    pub fn nearest_active_ancestor(&self, id: NodeId) -> NodeId {
        let mut current = id;
        while !self.nodes[current.0].active {
            match self.nodes[current.0].parent {
                Some(parent) => current = parent,
                None => break,
            }
        }
        current
    }
}

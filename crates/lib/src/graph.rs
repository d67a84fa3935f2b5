//! # Graph Explorer Arena
//!
//! Nodes and edges for the co-author and topic networks shown in the graph
//! explorer. Ids are minted from a counter owned by each [`GraphArena`], so
//! separate arenas never interfere with one another.

use crate::{errors::ChatError, types::ParsedResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node-{}", self.0)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgeId(pub u64);

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Author,
    Paper,
    Topic,
    Source,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct GraphNode {
    pub id: NodeId,
    pub label: String,
    pub kind: NodeKind,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct GraphEdge {
    pub id: EdgeId,
    pub from: NodeId,
    pub to: NodeId,
    pub relation: String,
}

/// Owns the nodes, edges and id counter of one explorer view.
#[derive(Debug, Clone, Default)]
pub struct GraphArena {
    nodes: Vec<GraphNode>,
    edges: Vec<GraphEdge>,
    next_id: u64,
    by_label: HashMap<(NodeKind, String), NodeId>,
    edge_keys: HashMap<(NodeId, NodeId, String), EdgeId>,
}

impl GraphArena {
    pub fn new() -> Self {
        Self::default()
    }

    fn mint(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Adds a node, or returns the id of the existing node with the same
    /// kind and label.
    pub fn add_node(&mut self, label: &str, kind: NodeKind) -> NodeId {
        let key = (kind, label.to_string());
        if let Some(id) = self.by_label.get(&key) {
            return *id;
        }
        let id = NodeId(self.mint());
        self.nodes.push(GraphNode {
            id,
            label: label.to_string(),
            kind,
        });
        self.by_label.insert(key, id);
        id
    }

    /// Links two existing nodes. Repeating the same link returns the original
    /// edge id.
    pub fn add_edge(
        &mut self,
        from: NodeId,
        to: NodeId,
        relation: &str,
    ) -> Result<EdgeId, ChatError> {
        for endpoint in [from, to] {
            if self.node(endpoint).is_none() {
                return Err(ChatError::UnknownNode(endpoint.0));
            }
        }

        Ok(self.link(from, to, relation))
    }

    fn link(&mut self, from: NodeId, to: NodeId, relation: &str) -> EdgeId {
        let key = (from, to, relation.to_string());
        if let Some(id) = self.edge_keys.get(&key) {
            return *id;
        }
        let id = EdgeId(self.mint());
        self.edges.push(GraphEdge {
            id,
            from,
            to,
            relation: relation.to_string(),
        });
        self.edge_keys.insert(key, id);
        id
    }

    /// Adds `neighbours` around `center` and links each of them to it.
    ///
    /// Returns the neighbour ids in input order; already-known neighbours keep
    /// their existing ids.
    pub fn expand(
        &mut self,
        center: NodeId,
        neighbours: &[(&str, NodeKind)],
        relation: &str,
    ) -> Result<Vec<NodeId>, ChatError> {
        if self.node(center).is_none() {
            return Err(ChatError::UnknownNode(center.0));
        }

        let mut ids = Vec::with_capacity(neighbours.len());
        for (label, kind) in neighbours {
            let id = self.add_node(label, *kind);
            self.add_edge(center, id, relation)?;
            ids.push(id);
        }
        debug!(%center, added = ids.len(), "Expanded graph node");
        Ok(ids)
    }

    /// Builds a topic network from an interpreted answer: one topic node per
    /// challenge and a `cites` edge to its source, when it has one.
    pub fn from_parsed(result: &ParsedResult) -> Self {
        let mut arena = Self::new();
        for challenge in &result.challenges {
            let topic = arena.add_node(&challenge.name, NodeKind::Topic);
            if !challenge.citation.is_empty() {
                let source = arena.add_node(&challenge.citation, NodeKind::Source);
                arena.link(topic, source, "cites");
            }
        }
        arena
    }

    pub fn node(&self, id: NodeId) -> Option<&GraphNode> {
        // Ids are shared with edges, so positions do not line up with ids.
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn find(&self, label: &str, kind: NodeKind) -> Option<NodeId> {
        self.by_label.get(&(kind, label.to_string())).copied()
    }

    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }
}

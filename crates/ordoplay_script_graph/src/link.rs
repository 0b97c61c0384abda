// SPDX-License-Identifier: MIT OR Apache-2.0
//! Link (edge) definitions for the graph.

use crate::id::{NodeId, PortId};
use serde::{Deserialize, Serialize};

/// A directed link from a node's output port to another node's input port
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Link {
    src_node: NodeId,
    src_output: PortId,
    dst_node: NodeId,
    dst_input: PortId,
}

impl Link {
    /// Create a new link
    pub fn new(src_node: NodeId, src_output: PortId, dst_node: NodeId, dst_input: PortId) -> Self {
        Self {
            src_node,
            src_output,
            dst_node,
            dst_input,
        }
    }

    /// Source node ID
    pub fn src_node(&self) -> NodeId {
        self.src_node
    }

    /// Source output port ID
    pub fn src_output(&self) -> PortId {
        self.src_output
    }

    /// Destination node ID
    pub fn dst_node(&self) -> NodeId {
        self.dst_node
    }

    /// Destination input port ID
    pub fn dst_input(&self) -> PortId {
        self.dst_input
    }

    /// Rebind the source node.
    ///
    /// Bypasses link legality checks; the caller re-validates the graph.
    pub fn set_src_node(&mut self, node_id: NodeId) {
        self.src_node = node_id;
    }

    /// Rebind the destination node.
    ///
    /// Bypasses link legality checks; the caller re-validates the graph.
    pub fn set_dst_node(&mut self, node_id: NodeId) {
        self.dst_node = node_id;
    }

    /// Check if this link involves a specific node
    pub fn involves_node(&self, node_id: NodeId) -> bool {
        self.src_node == node_id || self.dst_node == node_id
    }

    /// Check if this link starts at the given output
    pub fn is_from(&self, node_id: NodeId, output: PortId) -> bool {
        self.src_node == node_id && self.src_output == output
    }

    /// Check if this link ends at the given input
    pub fn is_to(&self, node_id: NodeId, input: PortId) -> bool {
        self.dst_node == node_id && self.dst_input == input
    }
}

// SPDX-License-Identifier: MIT OR Apache-2.0
//! Graph compilation protocol.
//!
//! The graph drives compilation: it orders the nodes along the link
//! topology and calls [`ScriptGraphNode::compile`](crate::node::ScriptGraphNode::compile)
//! for each of them. Nodes describe their contribution through a
//! [`GraphNodeCompiler`] supplied by the backend.

use crate::graph::{ScriptGraph, ScriptGraphType};
use crate::id::{Guid, NodeId, PortId};
use crate::port::PortValue;

/// Backend contract through which nodes emit their compiled form
pub trait GraphNodeCompiler {
    /// Called before a node compiles
    fn begin_node(&mut self, _node: NodeId, _type_id: Guid) {}

    /// Bind the runtime callback that executes the current node
    fn bind_callback(&mut self, name: &str);

    /// Bind a constant consumed by the current node's input
    fn bind_data(&mut self, input: PortId, value: &PortValue);

    /// Called after a node compiled
    fn end_node(&mut self, _node: NodeId) {}
}

/// Where a node input gets its value from
#[derive(Debug, Clone, PartialEq)]
pub enum InputBinding<'g> {
    /// Linked outputs, in link order
    Linked(Vec<(NodeId, PortId)>),
    /// Unconnected, using the port's default value
    Default(&'g PortValue),
    /// Unconnected without a default
    Unbound,
}

/// Read-only view of the graph handed to nodes while compiling
#[derive(Debug)]
pub struct CompilerContext<'g> {
    graph: &'g ScriptGraph,
    compiled: Vec<NodeId>,
}

impl<'g> CompilerContext<'g> {
    /// Create a new compiler context
    pub fn new(graph: &'g ScriptGraph) -> Self {
        Self {
            graph,
            compiled: Vec::new(),
        }
    }

    /// The graph being compiled
    pub fn graph(&self) -> &'g ScriptGraph {
        self.graph
    }

    /// Graph type
    pub fn graph_type(&self) -> ScriptGraphType {
        self.graph.graph_type()
    }

    /// Scope (owning element) of the graph
    pub fn scope(&self) -> Guid {
        self.graph.scope()
    }

    /// Outputs linked into an input, in link order
    pub fn input_sources(&self, node: NodeId, input: PortId) -> Vec<(NodeId, PortId)> {
        self.graph
            .links()
            .filter(|l| l.is_to(node, input))
            .map(|l| (l.src_node(), l.src_output()))
            .collect()
    }

    /// Inputs fed by an output, in link order
    pub fn output_targets(&self, node: NodeId, output: PortId) -> Vec<(NodeId, PortId)> {
        self.graph
            .links()
            .filter(|l| l.is_from(node, output))
            .map(|l| (l.dst_node(), l.dst_input()))
            .collect()
    }

    /// Resolve an input to its linked sources or its default value
    pub fn input_binding(&self, node: NodeId, input: PortId) -> InputBinding<'g> {
        let sources = self.input_sources(node, input);
        if !sources.is_empty() {
            return InputBinding::Linked(sources);
        }

        self.graph
            .node(node)
            .and_then(|n| n.find_input_by_id(input).and_then(|index| n.input_data(index)))
            .map_or(InputBinding::Unbound, InputBinding::Default)
    }

    /// Check if a node has already been compiled
    pub fn is_compiled(&self, node: NodeId) -> bool {
        self.compiled.contains(&node)
    }

    pub(crate) fn mark_compiled(&mut self, node: NodeId) {
        self.compiled.push(node);
    }
}

/// Outcome of a successful compilation
#[derive(Debug, Clone, Default)]
pub struct CompileSummary {
    /// Nodes in the order they were compiled
    pub order: Vec<NodeId>,
}

impl CompileSummary {
    /// Number of compiled nodes
    pub fn node_count(&self) -> usize {
        self.order.len()
    }
}

/// Error during compilation
#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    /// A link does not resolve; sweep broken links first
    #[error("Link {index} has a missing endpoint")]
    DanglingLink {
        /// Position of the link in the graph's link sequence
        index: usize,
    },

    /// A node could not be compiled
    #[error("Node {node} failed to compile: {message}")]
    Node {
        /// Failing node
        node: NodeId,
        /// Reason
        message: String,
    },

    /// Backend failure
    #[error("{0}")]
    Backend(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::ScriptGraphParams;
    use crate::node::ScriptGraphNode;
    use crate::stock::{create_stock_registry, BranchNode};
    use std::sync::Arc;

    #[test]
    fn test_input_binding() {
        let params =
            ScriptGraphParams::new(Guid::new(), "Compile", ScriptGraphType::Signal, Guid::NIL);
        let mut graph = ScriptGraph::new(params, Arc::new(create_stock_registry()));
        let first = BranchNode::new();
        let second = BranchNode::new();
        let (a, b) = (first.id(), second.id());
        graph.add_node(Box::new(first));
        graph.add_node(Box::new(second));
        graph.add_link(a, BranchNode::TRUE, b, BranchNode::IN).unwrap();

        let mut context = CompilerContext::new(&graph);
        assert_eq!(context.graph_type(), ScriptGraphType::Signal);
        assert_eq!(
            context.input_binding(b, BranchNode::IN),
            InputBinding::Linked(vec![(a, BranchNode::TRUE)])
        );
        assert_eq!(context.input_binding(a, BranchNode::IN), InputBinding::Unbound);
        assert_eq!(
            context.input_binding(a, BranchNode::VALUE),
            InputBinding::Default(&PortValue::Bool(false))
        );
        assert_eq!(context.output_targets(a, BranchNode::TRUE), vec![(b, BranchNode::IN)]);
        assert!(context.output_targets(a, BranchNode::FALSE).is_empty());

        assert!(!context.is_compiled(a));
        context.mark_compiled(a);
        assert!(context.is_compiled(a));
    }
}

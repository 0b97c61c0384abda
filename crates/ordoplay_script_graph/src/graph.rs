// SPDX-License-Identifier: MIT OR Apache-2.0
//! Script graph containing nodes and links.
//!
//! The graph is the structural authority: every link it stores passed
//! [`ScriptGraph::check_link`] when it was added. Links can only become
//! invalid afterwards (dangling) when nodes or ports disappear, and are
//! then removed by [`ScriptGraph::remove_broken_links`].

use crate::compiler::{CompileError, CompileSummary, CompilerContext, GraphNodeCompiler};
use crate::config::{GraphConfig, SingleLinkPolicy};
use crate::id::{Guid, NodeId, PortId};
use crate::link::Link;
use crate::node::{DependencyType, GraphBinding, ScriptEvent, ScriptGraphNode};
use crate::port::{DataTypeSystem, StrictTypes};
use crate::registry::{NodeCreationMenu, NodeRegistry, RegistryCommand};
use crate::remap::{GuidRemapper, RemapError};
use crate::validation::{NodeProblems, Problem, Severity, Validator};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};
use std::fmt;
use std::sync::Arc;

/// Kind of graph, fixed at creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScriptGraphType {
    /// Runs when the owning object is constructed
    Construction,
    /// Reacts to signals
    Signal,
    /// Body of a function
    Function,
    /// State machine transition
    Transition,
}

/// Parameters supplied by the element that owns the graph
#[derive(Debug, Clone)]
pub struct ScriptGraphParams {
    /// Scope (owning element)
    pub scope: Guid,
    /// Graph name
    pub name: String,
    /// Graph type
    pub graph_type: ScriptGraphType,
    /// Context type
    pub context: Guid,
}

impl ScriptGraphParams {
    /// Create graph parameters
    pub fn new(
        scope: Guid,
        name: impl Into<String>,
        graph_type: ScriptGraphType,
        context: Guid,
    ) -> Self {
        Self {
            scope,
            name: name.into(),
            graph_type,
            context,
        }
    }
}

/// Returned by visitors to continue or stop the visitation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitStatus {
    /// Visit the next element
    Continue,
    /// Stop visiting
    Stop,
}

/// Outcome of a visitation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitResult {
    /// Every element was visited
    Complete,
    /// The visitor stopped early
    Stopped,
}

/// A script graph.
///
/// Visitors only receive borrows of single nodes or links, so the graph
/// cannot be restructured while a visitation is running.
pub struct ScriptGraph {
    name: String,
    graph_type: ScriptGraphType,
    scope: Guid,
    context: Guid,
    position: [f32; 2],
    config: GraphConfig,
    nodes: IndexMap<NodeId, Box<dyn ScriptGraphNode>>,
    links: Vec<Link>,
    registry: Arc<NodeRegistry>,
    types: Arc<dyn DataTypeSystem>,
}

impl ScriptGraph {
    /// Create a new empty graph
    pub fn new(params: ScriptGraphParams, registry: Arc<NodeRegistry>) -> Self {
        Self {
            name: params.name,
            graph_type: params.graph_type,
            scope: params.scope,
            context: params.context,
            position: [0.0, 0.0],
            config: GraphConfig::default(),
            nodes: IndexMap::new(),
            links: Vec::new(),
            registry,
            types: Arc::new(StrictTypes),
        }
    }

    /// Use the given settings
    pub fn with_config(mut self, config: GraphConfig) -> Self {
        self.config = config;
        self
    }

    /// Use the given data type compatibility rules
    pub fn with_type_system(mut self, types: Arc<dyn DataTypeSystem>) -> Self {
        self.types = types;
        self
    }

    /// Graph name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Graph type
    pub fn graph_type(&self) -> ScriptGraphType {
        self.graph_type
    }

    /// Scope (owning element)
    pub fn scope(&self) -> Guid {
        self.scope
    }

    /// Context type
    pub fn context(&self) -> Guid {
        self.context
    }

    /// Settings
    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    /// Node registry used for factory lookups
    pub fn registry(&self) -> &Arc<NodeRegistry> {
        &self.registry
    }

    /// Set the position
    pub fn set_pos(&mut self, position: [f32; 2]) {
        self.position = position;
    }

    /// Position in the owning element's view
    pub fn pos(&self) -> [f32; 2] {
        self.position
    }

    /// Parameters describing this graph's identity
    pub fn params(&self) -> ScriptGraphParams {
        ScriptGraphParams::new(self.scope, self.name.clone(), self.graph_type, self.context)
    }

    fn binding(&self) -> GraphBinding {
        GraphBinding {
            scope: self.scope,
            graph_type: self.graph_type,
            context: self.context,
        }
    }

    /// Offer every node type accepted by this graph to a creation menu
    pub fn populate_node_creation_menu(&self, menu: &mut dyn NodeCreationMenu) {
        for descriptor in self.registry.types_for_graph(self.graph_type) {
            let command = Arc::new(RegistryCommand::new(Arc::clone(descriptor)));
            if !menu.add_option(
                &descriptor.menu_label(),
                &descriptor.description,
                &descriptor.help_link,
                command,
            ) {
                tracing::debug!("Creation menu refused option {}", descriptor.menu_label());
            }
        }
    }

    /// Add a node. Fails if a node with the same ID exists.
    pub fn add_node(&mut self, mut node: Box<dyn ScriptGraphNode>) -> bool {
        let id = node.id();
        if self.nodes.contains_key(&id) {
            tracing::warn!("Graph '{}' already contains node {}", self.name, id);
            return false;
        }
        node.attach(self.binding());
        tracing::debug!("Added node '{}' ({}) to graph '{}'", node.name(), id, self.name);
        self.nodes.insert(id, node);
        true
    }

    /// Create a node of a registered type and add it
    pub fn add_node_of_type(&mut self, type_id: Guid) -> Option<NodeId> {
        let Some(descriptor) = self.registry.get(type_id) else {
            tracing::warn!("Unknown node type {}", type_id);
            return None;
        };
        if !descriptor.allowed_in(self.graph_type) {
            tracing::warn!(
                "Node type '{}' is not allowed in {:?} graphs",
                descriptor.name,
                self.graph_type
            );
            return None;
        }
        let mut node = descriptor.create();
        node.process_event(&ScriptEvent::EditorAdd);
        let id = node.id();
        self.add_node(node).then_some(id)
    }

    /// Remove a node and every link touching it
    pub fn remove_node(&mut self, node_id: NodeId) -> Option<Box<dyn ScriptGraphNode>> {
        if !self.nodes.contains_key(&node_id) {
            return None;
        }
        let removed_links = self.remove_links(node_id);
        let node = self.nodes.shift_remove(&node_id)?;
        tracing::debug!(
            "Removed node '{}' ({}) and {} link(s)",
            node.name(),
            node_id,
            removed_links.len()
        );
        Some(node)
    }

    /// Number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get a node by ID
    pub fn node(&self, node_id: NodeId) -> Option<&dyn ScriptGraphNode> {
        self.nodes.get(&node_id).map(|n| n.as_ref() as &dyn ScriptGraphNode)
    }

    /// Get a mutable node by ID
    pub fn node_mut(&mut self, node_id: NodeId) -> Option<&mut dyn ScriptGraphNode> {
        match self.nodes.get_mut(&node_id) {
            Some(node) => Some(node.as_mut()),
            None => None,
        }
    }

    /// Get all nodes
    pub fn nodes(&self) -> impl Iterator<Item = &dyn ScriptGraphNode> {
        self.nodes.values().map(|n| n.as_ref() as &dyn ScriptGraphNode)
    }

    /// Get all node IDs
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.keys().copied()
    }

    /// Visit all nodes until the visitor stops
    pub fn visit_nodes(
        &self,
        mut visitor: impl FnMut(&dyn ScriptGraphNode) -> VisitStatus,
    ) -> VisitResult {
        for node in self.nodes.values() {
            if visitor(node.as_ref()) == VisitStatus::Stop {
                return VisitResult::Stopped;
            }
        }
        VisitResult::Complete
    }

    /// Visit all nodes mutably until the visitor stops
    pub fn visit_nodes_mut(
        &mut self,
        mut visitor: impl FnMut(&mut dyn ScriptGraphNode) -> VisitStatus,
    ) -> VisitResult {
        for node in self.nodes.values_mut() {
            if visitor(node.as_mut()) == VisitStatus::Stop {
                return VisitResult::Stopped;
            }
        }
        VisitResult::Complete
    }

    /// Check whether a link may be added
    pub fn can_add_link(
        &self,
        src_node: NodeId,
        src_output: PortId,
        dst_node: NodeId,
        dst_input: PortId,
    ) -> bool {
        self.check_link(src_node, src_output, dst_node, dst_input).is_ok()
    }

    /// Check whether a link may be added, reporting why not
    pub fn check_link(
        &self,
        src_node: NodeId,
        src_output: PortId,
        dst_node: NodeId,
        dst_input: PortId,
    ) -> Result<(), LinkError> {
        let source = self.nodes.get(&src_node).ok_or(LinkError::NodeNotFound(src_node))?;
        let target = self.nodes.get(&dst_node).ok_or(LinkError::NodeNotFound(dst_node))?;

        let output = source
            .find_output_by_id(src_output)
            .and_then(|index| source.output(index))
            .ok_or(LinkError::OutputNotFound(src_output))?;
        let input = target
            .find_input_by_id(dst_input)
            .and_then(|index| target.input(index))
            .ok_or(LinkError::InputNotFound(dst_input))?;

        if src_node == dst_node && (src_output == dst_input || !self.config.allow_node_self_links) {
            return Err(LinkError::SelfLoop);
        }

        if !output.can_connect(input, self.types.as_ref()) {
            return Err(LinkError::IncompatiblePorts);
        }

        let new_link = Link::new(src_node, src_output, dst_node, dst_input);
        if self.links.contains(&new_link) {
            return Err(LinkError::AlreadyLinked);
        }

        if !input.is_multi_link()
            && self.config.single_link_policy == SingleLinkPolicy::Reject
            && self.links.iter().any(|l| l.is_to(dst_node, dst_input))
        {
            return Err(LinkError::InputOccupied(dst_input));
        }

        Ok(())
    }

    /// Add a link, returning its index in the link sequence
    pub fn add_link(
        &mut self,
        src_node: NodeId,
        src_output: PortId,
        dst_node: NodeId,
        dst_input: PortId,
    ) -> Result<usize, LinkError> {
        if let Err(err) = self.check_link(src_node, src_output, dst_node, dst_input) {
            tracing::warn!(
                "Rejected link {}:{} -> {}:{}: {}",
                src_node,
                src_output,
                dst_node,
                dst_input,
                err
            );
            return Err(err);
        }

        let multi_link = self
            .nodes
            .get(&dst_node)
            .and_then(|n| n.find_input_by_id(dst_input).and_then(|index| n.input(index)))
            .is_some_and(|p| p.is_multi_link());
        if !multi_link {
            // Only reachable under the replace policy; a rejecting policy failed the check above
            let before = self.links.len();
            self.links.retain(|l| !l.is_to(dst_node, dst_input));
            if self.links.len() != before {
                tracing::debug!("Replaced existing link into {}:{}", dst_node, dst_input);
            }
        }

        self.links.push(Link::new(src_node, src_output, dst_node, dst_input));
        Ok(self.links.len() - 1)
    }

    /// Remove a link by index.
    ///
    /// Indices of later links shift; treat all indices as invalid after any mutation.
    pub fn remove_link(&mut self, index: usize) -> Option<Link> {
        if index >= self.links.len() {
            return None;
        }
        Some(self.links.remove(index))
    }

    /// Remove every link touching a node
    pub fn remove_links(&mut self, node_id: NodeId) -> Vec<Link> {
        let (removed, kept): (Vec<Link>, Vec<Link>) =
            self.links.drain(..).partition(|l| l.involves_node(node_id));
        self.links = kept;
        removed
    }

    /// Number of links
    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    /// Get a link by index
    pub fn link(&self, index: usize) -> Option<&Link> {
        self.links.get(index)
    }

    /// Get a mutable link by index
    pub fn link_mut(&mut self, index: usize) -> Option<&mut Link> {
        self.links.get_mut(index)
    }

    /// Get all links in order
    pub fn links(&self) -> impl Iterator<Item = &Link> {
        self.links.iter()
    }

    /// Find the index of the first link matching all four endpoint fields
    pub fn find_link(
        &self,
        src_node: NodeId,
        src_output: PortId,
        dst_node: NodeId,
        dst_input: PortId,
    ) -> Option<usize> {
        let wanted = Link::new(src_node, src_output, dst_node, dst_input);
        self.links.iter().position(|l| *l == wanted)
    }

    /// Visit all links in order until the visitor stops
    pub fn visit_links(&self, mut visitor: impl FnMut(&Link) -> VisitStatus) -> VisitResult {
        for link in &self.links {
            if visitor(link) == VisitStatus::Stop {
                return VisitResult::Stopped;
            }
        }
        VisitResult::Complete
    }

    /// Visit all links mutably in order until the visitor stops
    pub fn visit_links_mut(
        &mut self,
        mut visitor: impl FnMut(&mut Link) -> VisitStatus,
    ) -> VisitResult {
        for link in &mut self.links {
            if visitor(link) == VisitStatus::Stop {
                return VisitResult::Stopped;
            }
        }
        VisitResult::Complete
    }

    /// Visit the links into an input
    pub fn visit_input_links(
        &self,
        dst_node: NodeId,
        dst_input: PortId,
        mut visitor: impl FnMut(&Link) -> VisitStatus,
    ) -> VisitResult {
        self.visit_links(|link| {
            if link.is_to(dst_node, dst_input) {
                visitor(link)
            } else {
                VisitStatus::Continue
            }
        })
    }

    /// Visit the links into an input mutably
    pub fn visit_input_links_mut(
        &mut self,
        dst_node: NodeId,
        dst_input: PortId,
        mut visitor: impl FnMut(&mut Link) -> VisitStatus,
    ) -> VisitResult {
        self.visit_links_mut(|link| {
            if link.is_to(dst_node, dst_input) {
                visitor(link)
            } else {
                VisitStatus::Continue
            }
        })
    }

    /// Visit the links out of an output
    pub fn visit_output_links(
        &self,
        src_node: NodeId,
        src_output: PortId,
        mut visitor: impl FnMut(&Link) -> VisitStatus,
    ) -> VisitResult {
        self.visit_links(|link| {
            if link.is_from(src_node, src_output) {
                visitor(link)
            } else {
                VisitStatus::Continue
            }
        })
    }

    /// Visit the links out of an output mutably
    pub fn visit_output_links_mut(
        &mut self,
        src_node: NodeId,
        src_output: PortId,
        mut visitor: impl FnMut(&mut Link) -> VisitStatus,
    ) -> VisitResult {
        self.visit_links_mut(|link| {
            if link.is_from(src_node, src_output) {
                visitor(link)
            } else {
                VisitStatus::Continue
            }
        })
    }

    /// Resolve a link's source node and output index
    pub fn link_src(&self, link: &Link) -> Option<(&dyn ScriptGraphNode, usize)> {
        let node = self.nodes.get(&link.src_node())?;
        let index = node.find_output_by_id(link.src_output())?;
        Some((node.as_ref(), index))
    }

    /// Resolve a link's destination node and input index
    pub fn link_dst(&self, link: &Link) -> Option<(&dyn ScriptGraphNode, usize)> {
        let node = self.nodes.get(&link.dst_node())?;
        let index = node.find_input_by_id(link.dst_input())?;
        Some((node.as_ref(), index))
    }

    /// Check if either endpoint of a link no longer resolves
    pub fn is_link_broken(&self, link: &Link) -> bool {
        self.link_src(link).is_none() || self.link_dst(link).is_none()
    }

    /// Remove every link whose endpoints no longer resolve
    pub fn remove_broken_links(&mut self) -> Vec<Link> {
        let (broken, kept): (Vec<Link>, Vec<Link>) = std::mem::take(&mut self.links)
            .into_iter()
            .partition(|l| self.is_link_broken(l));
        self.links = kept;
        for link in &broken {
            tracing::warn!(
                "Removed broken link {}:{} -> {}:{} from graph '{}'",
                link.src_node(),
                link.src_output(),
                link.dst_node(),
                link.dst_input(),
                self.name
            );
        }
        broken
    }

    pub(crate) fn inherit_settings(&mut self, other: &ScriptGraph) {
        self.config = other.config.clone();
        self.types = Arc::clone(&other.types);
    }

    pub(crate) fn push_link_unchecked(&mut self, link: Link) {
        self.links.push(link);
    }

    /// Deliver an event to every node
    pub fn process_event(&mut self, event: &ScriptEvent) {
        for node in self.nodes.values_mut() {
            node.process_event(event);
        }
    }

    /// Report the dependencies of every node
    pub fn enumerate_dependencies(
        &self,
        enumerator: &mut dyn FnMut(Guid),
        dependency_type: DependencyType,
    ) {
        for node in self.nodes.values() {
            node.enumerate_dependencies(enumerator, dependency_type);
        }
    }

    /// Validate every node and link.
    ///
    /// Dangling links and links whose ports are no longer compatible are
    /// reported as errors against the destination node.
    pub fn validate(&self, validator: &mut dyn Validator) {
        for (id, node) in &self.nodes {
            let mut problems = NodeProblems::new();
            node.validate(&mut problems);
            for problem in problems.iter() {
                validator.report(*id, problem);
            }
        }

        for link in &self.links {
            let message = match (self.link_src(link), self.link_dst(link)) {
                (Some((src, output)), Some((dst, input))) => {
                    let compatible = match (src.output(output), dst.input(input)) {
                        (Some(output), Some(input)) => {
                            output.can_connect(input, self.types.as_ref())
                        }
                        _ => false,
                    };
                    if compatible {
                        continue;
                    }
                    format!("Link from '{}' connects incompatible ports", src.name())
                }
                _ => format!(
                    "Broken link {}:{} -> {}:{}",
                    link.src_node(),
                    link.src_output(),
                    link.dst_node(),
                    link.dst_input()
                ),
            };
            let owner = if self.nodes.contains_key(&link.dst_node()) {
                link.dst_node()
            } else {
                link.src_node()
            };
            validator.report(
                owner,
                &Problem {
                    severity: Severity::Error,
                    message,
                },
            );
        }
    }

    /// Rewrite node identities, node references, link endpoints and scope in one pass.
    ///
    /// Nothing is changed if two nodes would end up with the same identifier.
    pub fn remap_dependencies(&mut self, remapper: &dyn GuidRemapper) -> Result<(), RemapError> {
        let mut new_ids = HashSet::with_capacity(self.nodes.len());
        for id in self.nodes.keys() {
            let new_id = remapper.remap_node(*id);
            if !new_ids.insert(new_id) {
                return Err(RemapError::Collision(new_id));
            }
        }

        self.scope = remapper.remap(self.scope);
        self.context = remapper.remap(self.context);
        let binding = self.binding();

        let nodes = std::mem::take(&mut self.nodes);
        self.nodes = nodes
            .into_iter()
            .map(|(id, mut node)| {
                let new_id = remapper.remap_node(id);
                node.core_mut().id = new_id;
                node.remap_dependencies(remapper);
                node.attach(binding);
                (new_id, node)
            })
            .collect();

        for link in &mut self.links {
            link.set_src_node(remapper.remap_node(link.src_node()));
            link.set_dst_node(remapper.remap_node(link.dst_node()));
        }

        tracing::debug!("Remapped {} node(s) in graph '{}'", self.nodes.len(), self.name);
        Ok(())
    }

    /// Compile every node in link order
    pub fn compile(
        &self,
        compiler: &mut dyn GraphNodeCompiler,
    ) -> Result<CompileSummary, CompileError> {
        if let Some(index) = self.links.iter().position(|l| self.is_link_broken(l)) {
            return Err(CompileError::DanglingLink { index });
        }

        let order = self.compile_order();
        let mut context = CompilerContext::new(self);
        for id in &order {
            let Some(node) = self.nodes.get(id) else {
                continue;
            };
            compiler.begin_node(*id, node.type_guid());
            node.compile(&mut context, compiler)?;
            compiler.end_node(*id);
            context.mark_compiled(*id);
        }

        tracing::info!("Compiled graph '{}' ({} node(s))", self.name, order.len());
        Ok(CompileSummary { order })
    }

    /// Order nodes so that link sources come before their destinations.
    ///
    /// Every node appears exactly once. Isolated nodes keep their node
    /// order, and cycles are broken open at the earliest pending node.
    pub fn compile_order(&self) -> Vec<NodeId> {
        let mut pending: IndexMap<NodeId, usize> = self.nodes.keys().map(|id| (*id, 0)).collect();
        for link in &self.links {
            if link.src_node() == link.dst_node() || !self.nodes.contains_key(&link.src_node()) {
                continue;
            }
            if let Some(count) = pending.get_mut(&link.dst_node()) {
                *count += 1;
            }
        }

        let mut ready: VecDeque<NodeId> = pending
            .iter()
            .filter(|(_, count)| **count == 0)
            .map(|(id, _)| *id)
            .collect();
        let mut done = HashSet::with_capacity(pending.len());
        let mut order = Vec::with_capacity(pending.len());

        while order.len() < pending.len() {
            let next = match ready.pop_front() {
                Some(id) => id,
                None => match pending.keys().find(|id| !done.contains(*id)) {
                    Some(id) => *id,
                    None => break,
                },
            };
            if !done.insert(next) {
                continue;
            }
            order.push(next);

            for link in self.links.iter().filter(|l| l.src_node() == next && l.dst_node() != next) {
                if let Some(count) = pending.get_mut(&link.dst_node()) {
                    *count = count.saturating_sub(1);
                    if *count == 0 && !done.contains(&link.dst_node()) {
                        ready.push_back(link.dst_node());
                    }
                }
            }
        }

        order
    }

    /// Get nodes in strict topological order, failing on cycles
    pub fn topological_order(&self) -> Result<Vec<NodeId>, CycleError> {
        let mut visited = HashSet::new();
        let mut temp_mark = HashSet::new();
        let mut order = Vec::new();

        for node_id in self.nodes.keys() {
            if !visited.contains(node_id) {
                self.visit(*node_id, &mut visited, &mut temp_mark, &mut order)?;
            }
        }

        Ok(order)
    }

    fn visit(
        &self,
        node_id: NodeId,
        visited: &mut HashSet<NodeId>,
        temp_mark: &mut HashSet<NodeId>,
        order: &mut Vec<NodeId>,
    ) -> Result<(), CycleError> {
        if temp_mark.contains(&node_id) {
            return Err(CycleError);
        }
        if visited.contains(&node_id) {
            return Ok(());
        }

        temp_mark.insert(node_id);

        // Visit all nodes that this node depends on
        for link in self.links.iter().filter(|l| l.dst_node() == node_id) {
            if self.nodes.contains_key(&link.src_node()) {
                self.visit(link.src_node(), visited, temp_mark, order)?;
            }
        }

        temp_mark.remove(&node_id);
        visited.insert(node_id);
        order.push(node_id);

        Ok(())
    }
}

impl fmt::Debug for ScriptGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScriptGraph")
            .field("name", &self.name)
            .field("graph_type", &self.graph_type)
            .field("scope", &self.scope)
            .field("context", &self.context)
            .field("nodes", &self.nodes.len())
            .field("links", &self.links)
            .finish_non_exhaustive()
    }
}

/// Error when adding a link
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LinkError {
    /// Node not found
    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    /// Output port not found on the source node
    #[error("Output not found: {0}")]
    OutputNotFound(PortId),

    /// Input port not found on the destination node
    #[error("Input not found: {0}")]
    InputNotFound(PortId),

    /// Incompatible port categories or data types
    #[error("Incompatible ports")]
    IncompatiblePorts,

    /// Single-link input already has a link
    #[error("Input already linked: {0}")]
    InputOccupied(PortId),

    /// Identical link already exists
    #[error("Link already exists")]
    AlreadyLinked,

    /// Self-loop not allowed
    #[error("Self-loop not allowed")]
    SelfLoop,
}

/// Error when graph contains a cycle
#[derive(Debug, thiserror::Error)]
#[error("Graph contains a cycle")]
pub struct CycleError;

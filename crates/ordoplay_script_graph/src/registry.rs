// SPDX-License-Identifier: MIT OR Apache-2.0
//! Node type registry and the node creation menu protocol.

use crate::graph::ScriptGraphType;
use crate::id::Guid;
use crate::node::{ScriptEvent, ScriptGraphNode};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Node type category, used to group creation menu entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeCategory {
    /// Signal receivers and graph entry points
    Event,
    /// Flow control
    Flow,
    /// Function and method calls
    Function,
    /// Variables and constants
    Data,
    /// Comments and other editor-only nodes
    Utility,
    /// Custom/user-defined
    Custom,
}

impl NodeCategory {
    /// Menu label prefix
    pub fn label(&self) -> &'static str {
        match self {
            Self::Event => "Events",
            Self::Flow => "Flow",
            Self::Function => "Functions",
            Self::Data => "Data",
            Self::Utility => "Utility",
            Self::Custom => "Custom",
        }
    }
}

/// Constructs a fresh, unattached node instance
pub type NodeConstructor = Arc<dyn Fn() -> Box<dyn ScriptGraphNode> + Send + Sync>;

/// Node type definition
#[derive(Clone)]
pub struct NodeTypeDescriptor {
    /// Unique type identifier
    pub type_id: Guid,
    /// Display name
    pub name: String,
    /// Category
    pub category: NodeCategory,
    /// Description
    pub description: String,
    /// Documentation link
    pub help_link: String,
    /// Graph types that may contain this node; empty means all
    pub graph_types: Vec<ScriptGraphType>,
    constructor: NodeConstructor,
}

impl NodeTypeDescriptor {
    /// Create a new descriptor
    pub fn new(
        type_id: Guid,
        name: impl Into<String>,
        category: NodeCategory,
        constructor: impl Fn() -> Box<dyn ScriptGraphNode> + Send + Sync + 'static,
    ) -> Self {
        Self {
            type_id,
            name: name.into(),
            category,
            description: String::new(),
            help_link: String::new(),
            graph_types: Vec::new(),
            constructor: Arc::new(constructor),
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the documentation link
    pub fn with_help_link(mut self, help_link: impl Into<String>) -> Self {
        self.help_link = help_link.into();
        self
    }

    /// Restrict the node to the given graph types
    pub fn only_in(mut self, graph_types: &[ScriptGraphType]) -> Self {
        self.graph_types = graph_types.to_vec();
        self
    }

    /// Check if the node may be placed in a graph of the given type
    pub fn allowed_in(&self, graph_type: ScriptGraphType) -> bool {
        self.graph_types.is_empty() || self.graph_types.contains(&graph_type)
    }

    /// Menu label, e.g. `Flow::Branch`
    pub fn menu_label(&self) -> String {
        format!("{}::{}", self.category.label(), self.name)
    }

    /// Construct a new instance
    pub fn create(&self) -> Box<dyn ScriptGraphNode> {
        (self.constructor)()
    }
}

impl fmt::Debug for NodeTypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeTypeDescriptor")
            .field("type_id", &self.type_id)
            .field("name", &self.name)
            .field("category", &self.category)
            .finish_non_exhaustive()
    }
}

/// Registry of available node types
#[derive(Debug, Default)]
pub struct NodeRegistry {
    types: IndexMap<Guid, Arc<NodeTypeDescriptor>>,
}

impl NodeRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a node type, replacing any previous type with the same ID
    pub fn register(&mut self, descriptor: NodeTypeDescriptor) {
        self.types.insert(descriptor.type_id, Arc::new(descriptor));
    }

    /// Get a node type by ID
    pub fn get(&self, type_id: Guid) -> Option<&Arc<NodeTypeDescriptor>> {
        self.types.get(&type_id)
    }

    /// Get all registered types
    pub fn types(&self) -> impl Iterator<Item = &Arc<NodeTypeDescriptor>> {
        self.types.values()
    }

    /// Get types by category
    pub fn types_in_category(
        &self,
        category: NodeCategory,
    ) -> impl Iterator<Item = &Arc<NodeTypeDescriptor>> {
        self.types.values().filter(move |t| t.category == category)
    }

    /// Get the types that may be placed in a graph of the given type
    pub fn types_for_graph(
        &self,
        graph_type: ScriptGraphType,
    ) -> impl Iterator<Item = &Arc<NodeTypeDescriptor>> {
        self.types.values().filter(move |t| t.allowed_in(graph_type))
    }

    /// Create a node from a type ID
    pub fn create_node(&self, type_id: Guid) -> Option<Box<dyn ScriptGraphNode>> {
        self.get(type_id).map(|t| t.create())
    }
}

/// Command behind a node creation menu entry
pub trait NodeCreationCommand {
    /// Construct a new, not yet attached node at the given position
    fn execute(&self, position: [f32; 2]) -> Option<Box<dyn ScriptGraphNode>>;
}

/// Menu the graph populates with the node types it accepts
pub trait NodeCreationMenu {
    /// Add an entry. Returns false if the entry was refused.
    fn add_option(
        &mut self,
        label: &str,
        description: &str,
        help_link: &str,
        command: Arc<dyn NodeCreationCommand>,
    ) -> bool;
}

/// Creation command backed by a registered node type
#[derive(Debug, Clone)]
pub struct RegistryCommand {
    descriptor: Arc<NodeTypeDescriptor>,
}

impl RegistryCommand {
    /// Create a command for a node type
    pub fn new(descriptor: Arc<NodeTypeDescriptor>) -> Self {
        Self { descriptor }
    }
}

impl NodeCreationCommand for RegistryCommand {
    fn execute(&self, position: [f32; 2]) -> Option<Box<dyn ScriptGraphNode>> {
        let mut node = self.descriptor.create();
        node.set_pos(position);
        node.process_event(&ScriptEvent::EditorAdd);
        Some(node)
    }
}

/// A collected creation menu entry
#[derive(Clone)]
pub struct MenuOption {
    /// Label, unique within the menu
    pub label: String,
    /// Description
    pub description: String,
    /// Documentation link
    pub help_link: String,
    /// Command creating the node
    pub command: Arc<dyn NodeCreationCommand>,
}

impl fmt::Debug for MenuOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuOption")
            .field("label", &self.label)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// Creation menu that collects its entries in insertion order
#[derive(Debug, Default)]
pub struct CreationMenuOptions {
    options: IndexMap<String, MenuOption>,
}

impl CreationMenuOptions {
    /// Create an empty menu
    pub fn new() -> Self {
        Self::default()
    }

    /// Collected entries
    pub fn options(&self) -> impl Iterator<Item = &MenuOption> {
        self.options.values()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.options.len()
    }

    /// Check if the menu is empty
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Run the command behind a label
    pub fn execute(&self, label: &str, position: [f32; 2]) -> Option<Box<dyn ScriptGraphNode>> {
        self.options.get(label)?.command.execute(position)
    }
}

impl NodeCreationMenu for CreationMenuOptions {
    fn add_option(
        &mut self,
        label: &str,
        description: &str,
        help_link: &str,
        command: Arc<dyn NodeCreationCommand>,
    ) -> bool {
        if self.options.contains_key(label) {
            return false;
        }
        self.options.insert(
            label.to_string(),
            MenuOption {
                label: label.to_string(),
                description: description.to_string(),
                help_link: help_link.to_string(),
                command,
            },
        );
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeCore;

    const PROBE: Guid = Guid::from_u128(0x51);

    #[derive(Debug)]
    struct Probe(NodeCore);

    impl ScriptGraphNode for Probe {
        fn core(&self) -> &NodeCore {
            &self.0
        }

        fn core_mut(&mut self) -> &mut NodeCore {
            &mut self.0
        }
    }

    fn probe_descriptor() -> NodeTypeDescriptor {
        NodeTypeDescriptor::new(PROBE, "Probe", NodeCategory::Custom, || {
            Box::new(Probe(NodeCore::new(PROBE, "Probe")))
        })
        .with_description("Test node")
        .with_help_link("https://example.invalid/probe")
        .only_in(&[ScriptGraphType::Transition])
    }

    #[test]
    fn test_descriptor_restrictions() {
        let descriptor = probe_descriptor();
        assert!(descriptor.allowed_in(ScriptGraphType::Transition));
        assert!(!descriptor.allowed_in(ScriptGraphType::Function));
        assert_eq!(descriptor.menu_label(), "Custom::Probe");
        assert_eq!(descriptor.create().type_guid(), PROBE);
    }

    #[test]
    fn test_registry_lookup() {
        let mut registry = NodeRegistry::new();
        registry.register(probe_descriptor());
        assert!(registry.get(PROBE).is_some());
        assert!(registry.create_node(Guid::new()).is_none());
        assert_eq!(registry.types_for_graph(ScriptGraphType::Signal).count(), 0);
        assert_eq!(registry.types_in_category(NodeCategory::Custom).count(), 1);
    }

    #[test]
    fn test_menu_rejects_duplicate_labels() {
        let descriptor = Arc::new(probe_descriptor());
        let mut menu = CreationMenuOptions::new();
        let command = Arc::new(RegistryCommand::new(Arc::clone(&descriptor)));
        assert!(menu.add_option("Custom::Probe", "", "", command.clone()));
        assert!(!menu.add_option("Custom::Probe", "", "", command));
        assert_eq!(menu.len(), 1);

        let node = menu.execute("Custom::Probe", [3.0, 4.0]).unwrap();
        assert_eq!(node.pos(), [3.0, 4.0]);
    }
}

// SPDX-License-Identifier: MIT OR Apache-2.0
//! Node definitions for the script graph.
//!
//! Every node kind implements [`ScriptGraphNode`]. The trait only requires
//! access to the node's [`NodeCore`] (identity, metadata and ports); the
//! remaining capabilities (dependencies, events, persistence, validation,
//! remapping and compilation) have default implementations so most node
//! kinds only override what they need.

use crate::archive::ArchiveError;
use crate::compiler::{CompileError, CompilerContext, GraphNodeCompiler};
use crate::graph::ScriptGraphType;
use crate::id::{DataTypeId, Guid, NodeId, PortId};
use crate::port::{Port, PortFlags, PortValue};
use crate::remap::GuidRemapper;
use crate::validation::NodeProblems;
use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;

bitflags! {
    /// Capability flags of a node
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct NodeFlags: u8 {
        /// The node is skipped by copy operations
        const NOT_COPYABLE = 1 << 0;
        /// The editor must not offer removal of the node
        const NOT_REMOVABLE = 1 << 1;
    }
}

/// Header color of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ScriptGraphColor {
    /// No explicit color
    #[default]
    NotSet,
    /// Red
    Red,
    /// Green
    Green,
    /// Blue
    Blue,
    /// Yellow
    Yellow,
    /// Orange
    Orange,
    /// Purple
    Purple,
}

impl ScriptGraphColor {
    /// Get the RGB color (for UI)
    pub fn rgb(&self) -> [u8; 3] {
        match self {
            Self::NotSet => [128, 128, 128],
            Self::Red => [215, 55, 55],
            Self::Green => [38, 184, 33],
            Self::Blue => [4, 152, 255],
            Self::Yellow => [250, 232, 12],
            Self::Orange => [255, 100, 15],
            Self::Purple => [192, 90, 220],
        }
    }
}

/// Lifecycle event delivered to nodes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptEvent {
    /// The node was created in the editor
    EditorAdd,
    /// The graph finished loading; nodes may refresh their ports
    EditorFixUp,
    /// The node was pasted from the clipboard
    EditorPaste,
    /// A script element the node depends on changed
    DependencyModified(Guid),
}

/// Category of a dependency reported by [`ScriptGraphNode::enumerate_dependencies`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DependencyType {
    /// Required to load the node
    Load,
    /// Required to compile the node
    Compile,
    /// Signals/events the node reacts to
    Event,
    /// Advisory reference (e.g. for "find references")
    Reference,
}

/// Identity context a node receives when attached to a graph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphBinding {
    /// Scope (owning element) of the graph
    pub scope: Guid,
    /// Graph type
    pub graph_type: ScriptGraphType,
    /// Context type of the graph
    pub context: Guid,
}

/// State shared by every node kind
#[derive(Debug, Clone)]
pub struct NodeCore {
    /// Node type ID
    pub type_id: Guid,
    /// Unique instance ID
    pub id: NodeId,
    /// Display name
    pub name: String,
    /// Header color
    pub color: ScriptGraphColor,
    /// Capability flags
    pub flags: NodeFlags,
    /// Position in the graph UI
    pub position: [f32; 2],
    inputs: Vec<Port>,
    outputs: Vec<Port>,
    binding: Option<GraphBinding>,
}

impl NodeCore {
    /// Create a new node core with a fresh ID and no ports
    pub fn new(type_id: Guid, name: impl Into<String>) -> Self {
        Self {
            type_id,
            id: NodeId::new(),
            name: name.into(),
            color: ScriptGraphColor::NotSet,
            flags: NodeFlags::empty(),
            position: [0.0, 0.0],
            inputs: Vec::new(),
            outputs: Vec::new(),
            binding: None,
        }
    }

    /// Set the color
    pub fn with_color(mut self, color: ScriptGraphColor) -> Self {
        self.color = color;
        self
    }

    /// Set the capability flags
    pub fn with_flags(mut self, flags: NodeFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Add an input port
    pub fn with_input(mut self, port: Port) -> Self {
        self.add_input(port);
        self
    }

    /// Add an output port
    pub fn with_output(mut self, port: Port) -> Self {
        self.add_output(port);
        self
    }

    /// Graph identity context, if attached
    pub fn binding(&self) -> Option<&GraphBinding> {
        self.binding.as_ref()
    }

    /// Add an input port. Fails if the ID is already used by another input.
    pub fn add_input(&mut self, port: Port) -> bool {
        if self.find_input_by_id(port.id).is_some() {
            return false;
        }
        self.inputs.push(port);
        true
    }

    /// Add an output port. Fails if the ID is already used by another output.
    pub fn add_output(&mut self, port: Port) -> bool {
        if self.find_output_by_id(port.id).is_some() {
            return false;
        }
        self.outputs.push(port);
        true
    }

    /// Remove all ports
    pub fn clear_ports(&mut self) {
        self.inputs.clear();
        self.outputs.clear();
    }

    /// Input ports in display order
    pub fn inputs(&self) -> &[Port] {
        &self.inputs
    }

    /// Output ports in display order
    pub fn outputs(&self) -> &[Port] {
        &self.outputs
    }

    /// Find the index of an input port by ID
    pub fn find_input_by_id(&self, id: PortId) -> Option<usize> {
        self.inputs.iter().position(|p| p.id == id)
    }

    /// Find the index of an output port by ID
    pub fn find_output_by_id(&self, id: PortId) -> Option<usize> {
        self.outputs.iter().position(|p| p.id == id)
    }

    /// Mutable access to an input port by ID
    pub fn input_by_id_mut(&mut self, id: PortId) -> Option<&mut Port> {
        self.inputs.iter_mut().find(|p| p.id == id)
    }

    /// Report default values that do not match their port's declared type
    pub fn validate_defaults(&self, problems: &mut NodeProblems) {
        let sides = [("input", &self.inputs), ("output", &self.outputs)];
        for (side, ports) in sides {
            for port in ports.iter() {
                let Some(value) = &port.default_value else {
                    continue;
                };
                if !port.flags.contains(PortFlags::DATA) {
                    problems.warning(format!(
                        "Default value on non-data {side} '{}' is ignored",
                        port.name
                    ));
                } else if value.type_id() != port.type_id {
                    problems.error(format!(
                        "Default value of {side} '{}' does not match its type",
                        port.name
                    ));
                }
            }
        }
    }
}

/// Capability set implemented by every node kind.
///
/// Graph algorithms only talk to nodes through this trait.
pub trait ScriptGraphNode: fmt::Debug {
    /// Shared node state
    fn core(&self) -> &NodeCore;

    /// Mutable shared node state
    fn core_mut(&mut self) -> &mut NodeCore;

    /// Bind the node to its owning graph
    fn attach(&mut self, binding: GraphBinding) {
        self.core_mut().binding = Some(binding);
    }

    /// Node type ID
    fn type_guid(&self) -> Guid {
        self.core().type_id
    }

    /// Instance ID
    fn id(&self) -> NodeId {
        self.core().id
    }

    /// Display name
    fn name(&self) -> &str {
        &self.core().name
    }

    /// Header color
    fn color(&self) -> [u8; 3] {
        self.core().color.rgb()
    }

    /// Capability flags
    fn flags(&self) -> NodeFlags {
        self.core().flags
    }

    /// Set the position
    fn set_pos(&mut self, position: [f32; 2]) {
        self.core_mut().position = position;
    }

    /// Position in the graph UI
    fn pos(&self) -> [f32; 2] {
        self.core().position
    }

    /// Number of input ports
    fn input_count(&self) -> usize {
        self.core().inputs.len()
    }

    /// Find the index of an input port by ID
    fn find_input_by_id(&self, id: PortId) -> Option<usize> {
        self.core().find_input_by_id(id)
    }

    /// Input port by index
    fn input(&self, index: usize) -> Option<&Port> {
        self.core().inputs.get(index)
    }

    /// Input port ID by index
    fn input_id(&self, index: usize) -> Option<PortId> {
        self.input(index).map(|p| p.id)
    }

    /// Input port name by index
    fn input_name(&self, index: usize) -> Option<&str> {
        self.input(index).map(|p| p.name.as_str())
    }

    /// Input data type by index
    fn input_type_id(&self, index: usize) -> Option<DataTypeId> {
        self.input(index).map(|p| p.type_id)
    }

    /// Input flags by index
    fn input_flags(&self, index: usize) -> Option<PortFlags> {
        self.input(index).map(|p| p.flags)
    }

    /// Input default value by index
    fn input_data(&self, index: usize) -> Option<&PortValue> {
        self.input(index).and_then(|p| p.default_value.as_ref())
    }

    /// Input color by index
    fn input_color(&self, index: usize) -> Option<[u8; 3]> {
        self.input(index).map(Port::color)
    }

    /// Number of output ports
    fn output_count(&self) -> usize {
        self.core().outputs.len()
    }

    /// Find the index of an output port by ID
    fn find_output_by_id(&self, id: PortId) -> Option<usize> {
        self.core().find_output_by_id(id)
    }

    /// Output port by index
    fn output(&self, index: usize) -> Option<&Port> {
        self.core().outputs.get(index)
    }

    /// Output port ID by index
    fn output_id(&self, index: usize) -> Option<PortId> {
        self.output(index).map(|p| p.id)
    }

    /// Output port name by index
    fn output_name(&self, index: usize) -> Option<&str> {
        self.output(index).map(|p| p.name.as_str())
    }

    /// Output data type by index
    fn output_type_id(&self, index: usize) -> Option<DataTypeId> {
        self.output(index).map(|p| p.type_id)
    }

    /// Output flags by index
    fn output_flags(&self, index: usize) -> Option<PortFlags> {
        self.output(index).map(|p| p.flags)
    }

    /// Output data by index
    fn output_data(&self, index: usize) -> Option<&PortValue> {
        self.output(index).and_then(|p| p.default_value.as_ref())
    }

    /// Output color by index
    fn output_color(&self, index: usize) -> Option<[u8; 3]> {
        self.output(index).map(Port::color)
    }

    /// Report the script elements this node depends on
    fn enumerate_dependencies(
        &self,
        _enumerator: &mut dyn FnMut(Guid),
        _dependency_type: DependencyType,
    ) {
    }

    /// React to a lifecycle event
    fn process_event(&mut self, _event: &ScriptEvent) {}

    /// Save node-specific state
    fn save(&self) -> serde_json::Value {
        serde_json::Value::Null
    }

    /// Restore node-specific state and rebuild ports from it
    fn load(&mut self, _params: &serde_json::Value) -> Result<(), ArchiveError> {
        Ok(())
    }

    /// Save node-specific state for the clipboard.
    ///
    /// Identity that would collide on paste must be left out.
    fn copy(&self) -> serde_json::Value {
        self.save()
    }

    /// Restore node-specific state from the clipboard
    fn paste(&mut self, params: &serde_json::Value) -> Result<(), ArchiveError> {
        self.load(params)
    }

    /// Report structural/semantic problems without changing state
    fn validate(&self, problems: &mut NodeProblems) {
        self.core().validate_defaults(problems);
    }

    /// Rewrite references to other elements
    fn remap_dependencies(&mut self, _remapper: &dyn GuidRemapper) {}

    /// Emit this node's contribution to the compiled graph
    fn compile(
        &self,
        _context: &mut CompilerContext<'_>,
        _compiler: &mut dyn GraphNodeCompiler,
    ) -> Result<(), CompileError> {
        Ok(())
    }
}

// SPDX-License-Identifier: MIT OR Apache-2.0
//! Built-in node kinds available in every script graph.
//!
//! - Begin: entry point of function and construction graphs
//! - Branch: if/else on a boolean
//! - Function call: invokes another script function
//! - Comment: editor-only note

use crate::archive::ArchiveError;
use crate::compiler::{CompileError, CompilerContext, GraphNodeCompiler, InputBinding};
use crate::graph::ScriptGraphType;
use crate::id::{DataTypeId, Guid, PortId};
use crate::node::{
    DependencyType, NodeCore, NodeFlags, ScriptEvent, ScriptGraphColor, ScriptGraphNode,
};
use crate::port::{Port, PortFlags, PortValue};
use crate::registry::{NodeCategory, NodeRegistry, NodeTypeDescriptor};
use crate::remap::GuidRemapper;
use crate::validation::NodeProblems;
use serde::{Deserialize, Serialize};

/// Type ID of [`BeginNode`]
pub const BEGIN_NODE: Guid = Guid::from_u128(0x12bdfa06_ba95_4e48_bb2d_bb48a7080abc);
/// Type ID of [`BranchNode`]
pub const BRANCH_NODE: Guid = Guid::from_u128(0x6b9d6e55_3c1d_4bbf_9a2e_22b6f2a7d3c0);
/// Type ID of [`FunctionCallNode`]
pub const FUNCTION_CALL_NODE: Guid = Guid::from_u128(0x9a3e4f21_58c7_4d0e_8f6b_0c2d7e1b5a94);
/// Type ID of [`CommentNode`]
pub const COMMENT_NODE: Guid = Guid::from_u128(0xf4c2b7a8_1e3d_4c59_a06b_7d8e9f0a1b2c);

/// Bind the default of every unlinked data input, failing on inputs without a value
fn bind_unlinked_inputs(
    node: &dyn ScriptGraphNode,
    context: &CompilerContext<'_>,
    compiler: &mut dyn GraphNodeCompiler,
) -> Result<(), CompileError> {
    for port in node.core().inputs() {
        if !port.flags.contains(PortFlags::DATA) {
            continue;
        }
        match context.input_binding(node.id(), port.id) {
            InputBinding::Linked(_) => {}
            InputBinding::Default(value) => compiler.bind_data(port.id, value),
            InputBinding::Unbound => {
                return Err(CompileError::Node {
                    node: node.id(),
                    message: format!("Input '{}' has no value", port.name),
                })
            }
        }
    }
    Ok(())
}

/// Entry point of a graph
#[derive(Debug, Clone)]
pub struct BeginNode {
    core: NodeCore,
}

impl BeginNode {
    /// Output ID
    pub const OUT: PortId = PortId::from_index(0);

    /// Create a new begin node
    pub fn new() -> Self {
        Self {
            core: NodeCore::new(BEGIN_NODE, "Begin")
                .with_color(ScriptGraphColor::Green)
                .with_flags(NodeFlags::NOT_COPYABLE | NodeFlags::NOT_REMOVABLE)
                .with_output(Port::flow(Self::OUT, "Out").with_flags(PortFlags::BEGIN)),
        }
    }
}

impl Default for BeginNode {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptGraphNode for BeginNode {
    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut NodeCore {
        &mut self.core
    }

    fn compile(
        &self,
        _context: &mut CompilerContext<'_>,
        compiler: &mut dyn GraphNodeCompiler,
    ) -> Result<(), CompileError> {
        compiler.bind_callback("begin");
        Ok(())
    }
}

/// If/else on a boolean input
#[derive(Debug, Clone)]
pub struct BranchNode {
    core: NodeCore,
}

impl BranchNode {
    /// Flow input ID
    pub const IN: PortId = PortId::from_index(0);
    /// Condition input ID
    pub const VALUE: PortId = PortId::from_index(1);
    /// True output ID
    pub const TRUE: PortId = PortId::from_index(0);
    /// False output ID
    pub const FALSE: PortId = PortId::from_index(1);

    /// Create a new branch node
    pub fn new() -> Self {
        Self {
            core: NodeCore::new(BRANCH_NODE, "Branch")
                .with_color(ScriptGraphColor::Orange)
                .with_input(Port::flow(Self::IN, "In").with_flags(PortFlags::MULTI_LINK))
                .with_input(
                    Port::data(Self::VALUE, "Value", DataTypeId::BOOL)
                        .with_flags(PortFlags::PERSISTENT | PortFlags::EDITABLE)
                        .with_default(PortValue::Bool(false)),
                )
                .with_output(Port::flow(Self::TRUE, "True"))
                .with_output(Port::flow(Self::FALSE, "False")),
        }
    }
}

impl Default for BranchNode {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptGraphNode for BranchNode {
    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut NodeCore {
        &mut self.core
    }

    fn compile(
        &self,
        context: &mut CompilerContext<'_>,
        compiler: &mut dyn GraphNodeCompiler,
    ) -> Result<(), CompileError> {
        compiler.bind_callback("branch");
        bind_unlinked_inputs(self, context, compiler)
    }
}

/// Parameter or result of a script function
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionParam {
    /// Parameter ID, used as port ID
    pub id: Guid,
    /// Parameter name
    pub name: String,
    /// Data type
    pub type_id: DataTypeId,
}

impl FunctionParam {
    /// Create a parameter with a fresh ID
    pub fn new(name: impl Into<String>, type_id: DataTypeId) -> Self {
        Self {
            id: Guid::new(),
            name: name.into(),
            type_id,
        }
    }
}

/// Signature of the function called by a [`FunctionCallNode`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FunctionSignature {
    /// Called function
    pub function: Guid,
    /// Function name
    pub name: String,
    /// Inputs
    #[serde(default)]
    pub inputs: Vec<FunctionParam>,
    /// Outputs
    #[serde(default)]
    pub outputs: Vec<FunctionParam>,
}

/// Calls another script function
#[derive(Debug, Clone)]
pub struct FunctionCallNode {
    core: NodeCore,
    signature: FunctionSignature,
}

impl FunctionCallNode {
    /// Flow input ID
    pub const IN: PortId = PortId::from_index(0);
    /// Flow output ID
    pub const OUT: PortId = PortId::from_index(0);

    /// Create a call node without a selected function
    pub fn new() -> Self {
        let mut node = Self {
            core: NodeCore::new(FUNCTION_CALL_NODE, "Call").with_color(ScriptGraphColor::Blue),
            signature: FunctionSignature::default(),
        };
        node.refresh_ports();
        node
    }

    /// Create a call node for a function
    pub fn with_signature(signature: FunctionSignature) -> Self {
        let mut node = Self::new();
        node.set_signature(signature);
        node
    }

    /// Called function
    pub fn signature(&self) -> &FunctionSignature {
        &self.signature
    }

    /// Select the called function and rebuild the ports
    pub fn set_signature(&mut self, signature: FunctionSignature) {
        self.signature = signature;
        self.refresh_ports();
    }

    fn refresh_ports(&mut self) {
        let previous: Vec<(PortId, PortValue)> = self
            .core
            .inputs()
            .iter()
            .filter_map(|p| p.default_value.clone().map(|v| (p.id, v)))
            .collect();

        self.core.clear_ports();
        self.core
            .add_input(Port::flow(Self::IN, "In").with_flags(PortFlags::MULTI_LINK));
        self.core.add_output(Port::flow(Self::OUT, "Out"));
        for param in &self.signature.inputs {
            self.core.add_input(
                Port::data(PortId::from_guid(param.id), param.name.clone(), param.type_id)
                    .with_flags(PortFlags::PERSISTENT | PortFlags::EDITABLE),
            );
        }
        for param in &self.signature.outputs {
            self.core.add_output(
                Port::data(PortId::from_guid(param.id), param.name.clone(), param.type_id)
                    .with_flags(PortFlags::PULL),
            );
        }

        for (id, value) in previous {
            if let Some(port) = self.core.input_by_id_mut(id) {
                if port.type_id == value.type_id() {
                    port.default_value = Some(value);
                }
            }
        }

        if !self.signature.name.is_empty() {
            self.core.name = format!("Call {}", self.signature.name);
        }
    }
}

impl Default for FunctionCallNode {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptGraphNode for FunctionCallNode {
    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut NodeCore {
        &mut self.core
    }

    fn enumerate_dependencies(
        &self,
        enumerator: &mut dyn FnMut(Guid),
        dependency_type: DependencyType,
    ) {
        if self.signature.function.is_nil() {
            return;
        }
        match dependency_type {
            DependencyType::Compile | DependencyType::Reference => {
                enumerator(self.signature.function);
            }
            DependencyType::Load | DependencyType::Event => {}
        }
    }

    fn process_event(&mut self, event: &ScriptEvent) {
        match event {
            ScriptEvent::EditorFixUp => self.refresh_ports(),
            ScriptEvent::DependencyModified(guid) if *guid == self.signature.function => {
                tracing::debug!("Function {} changed, refreshing call ports", guid);
                self.refresh_ports();
            }
            _ => {}
        }
    }

    fn save(&self) -> serde_json::Value {
        serde_json::to_value(&self.signature).unwrap_or_default()
    }

    fn load(&mut self, params: &serde_json::Value) -> Result<(), ArchiveError> {
        if params.is_null() {
            return Ok(());
        }
        let signature: FunctionSignature = serde_json::from_value(params.clone())?;
        self.set_signature(signature);
        Ok(())
    }

    fn validate(&self, problems: &mut NodeProblems) {
        self.core.validate_defaults(problems);
        if self.signature.function.is_nil() {
            problems.error("No function selected");
        }
    }

    fn remap_dependencies(&mut self, remapper: &dyn GuidRemapper) {
        self.signature.function = remapper.remap(self.signature.function);
    }

    fn compile(
        &self,
        context: &mut CompilerContext<'_>,
        compiler: &mut dyn GraphNodeCompiler,
    ) -> Result<(), CompileError> {
        if self.signature.function.is_nil() {
            return Err(CompileError::Node {
                node: self.core.id,
                message: "No function selected".to_string(),
            });
        }
        compiler.bind_callback(&format!("call:{}", self.signature.function));
        bind_unlinked_inputs(self, context, compiler)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct CommentParams {
    text: String,
}

/// Editor-only note
#[derive(Debug, Clone)]
pub struct CommentNode {
    core: NodeCore,
    text: String,
}

impl CommentNode {
    /// Create an empty comment
    pub fn new() -> Self {
        Self {
            core: NodeCore::new(COMMENT_NODE, "Comment").with_color(ScriptGraphColor::Yellow),
            text: String::new(),
        }
    }

    /// Comment text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Set the comment text
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }
}

impl Default for CommentNode {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptGraphNode for CommentNode {
    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut NodeCore {
        &mut self.core
    }

    fn save(&self) -> serde_json::Value {
        serde_json::json!({ "text": self.text })
    }

    fn load(&mut self, params: &serde_json::Value) -> Result<(), ArchiveError> {
        if params.is_null() {
            return Ok(());
        }
        let params: CommentParams = serde_json::from_value(params.clone())?;
        self.text = params.text;
        Ok(())
    }
}

/// Register the built-in node kinds
pub fn register_stock_nodes(registry: &mut NodeRegistry) {
    registry.register(
        NodeTypeDescriptor::new(BEGIN_NODE, "Begin", NodeCategory::Event, || {
            Box::new(BeginNode::new())
        })
        .with_description("Entry point of the graph")
        .only_in(&[ScriptGraphType::Construction, ScriptGraphType::Function]),
    );

    registry.register(
        NodeTypeDescriptor::new(BRANCH_NODE, "Branch", NodeCategory::Flow, || {
            Box::new(BranchNode::new())
        })
        .with_description("If/else branching"),
    );

    registry.register(
        NodeTypeDescriptor::new(FUNCTION_CALL_NODE, "Call Function", NodeCategory::Function, || {
            Box::new(FunctionCallNode::new())
        })
        .with_description("Call a script function"),
    );

    registry.register(
        NodeTypeDescriptor::new(COMMENT_NODE, "Comment", NodeCategory::Utility, || {
            Box::new(CommentNode::new())
        })
        .with_description("Add a note to the graph"),
    );
}

/// Create a registry holding the built-in node kinds
pub fn create_stock_registry() -> NodeRegistry {
    let mut registry = NodeRegistry::new();
    register_stock_nodes(&mut registry);
    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remap::{GuidRemapper, IdRemapper};
    use crate::validation::Severity;

    fn add_signature() -> FunctionSignature {
        FunctionSignature {
            function: Guid::new(),
            name: "Add".to_string(),
            inputs: vec![
                FunctionParam::new("A", DataTypeId::INT),
                FunctionParam::new("B", DataTypeId::INT),
            ],
            outputs: vec![FunctionParam::new("Sum", DataTypeId::INT)],
        }
    }

    #[test]
    fn test_registry_contents() {
        let registry = create_stock_registry();
        assert_eq!(registry.types().count(), 4);
        assert_eq!(registry.types_for_graph(ScriptGraphType::Signal).count(), 3);
        assert_eq!(registry.types_in_category(NodeCategory::Flow).count(), 1);
        let node = registry.create_node(BRANCH_NODE).unwrap();
        assert_eq!(node.input_count(), 2);
        assert_eq!(node.output_count(), 2);
        assert!(registry.create_node(Guid::new()).is_none());
    }

    #[test]
    fn test_function_call_ports_follow_signature() {
        let signature = add_signature();
        let node = FunctionCallNode::with_signature(signature.clone());
        assert_eq!(node.input_count(), 3);
        assert_eq!(node.output_count(), 2);
        assert_eq!(node.name(), "Call Add");
        let a = PortId::from_guid(signature.inputs[0].id);
        assert_eq!(node.find_input_by_id(a), Some(1));
        assert_eq!(node.input_type_id(1), Some(DataTypeId::INT));
    }

    #[test]
    fn test_function_call_keeps_defaults_on_refresh() {
        let signature = add_signature();
        let a = PortId::from_guid(signature.inputs[0].id);
        let mut node = FunctionCallNode::with_signature(signature.clone());
        node.core_mut().input_by_id_mut(a).unwrap().default_value = Some(PortValue::Int(4));

        node.process_event(&ScriptEvent::DependencyModified(signature.function));
        let index = node.find_input_by_id(a).unwrap();
        assert_eq!(node.input_data(index), Some(&PortValue::Int(4)));
    }

    #[test]
    fn test_function_call_dependencies_and_remap() {
        let signature = add_signature();
        let mut node = FunctionCallNode::with_signature(signature.clone());

        let mut compile_deps = Vec::new();
        node.enumerate_dependencies(&mut |guid| compile_deps.push(guid), DependencyType::Compile);
        assert_eq!(compile_deps, vec![signature.function]);

        let mut load_deps = Vec::new();
        node.enumerate_dependencies(&mut |guid| load_deps.push(guid), DependencyType::Load);
        assert!(load_deps.is_empty());

        let copied_function = Guid::new();
        let mut remapper = IdRemapper::new();
        assert!(remapper.add(signature.function, copied_function));
        node.remap_dependencies(&remapper);
        assert_eq!(node.signature().function, copied_function);
    }

    #[test]
    fn test_function_call_save_load() {
        let signature = add_signature();
        let node = FunctionCallNode::with_signature(signature.clone());
        let params = node.save();

        let mut loaded = FunctionCallNode::new();
        loaded.load(&params).unwrap();
        assert_eq!(loaded.signature(), &signature);
        assert_eq!(loaded.input_count(), 3);

        let bad = serde_json::json!({ "function": 12 });
        assert!(FunctionCallNode::new().load(&bad).is_err());
    }

    #[test]
    fn test_unselected_function_is_an_error() {
        let node = FunctionCallNode::new();
        let mut problems = NodeProblems::new();
        node.validate(&mut problems);
        assert_eq!(problems.len(), 1);
        assert_eq!(problems.iter().next().unwrap().severity, Severity::Error);
    }

    #[test]
    fn test_comment_params() {
        let mut comment = CommentNode::new();
        comment.set_text("Spawn logic");
        let params = comment.save();

        let mut loaded = CommentNode::new();
        loaded.load(&params).unwrap();
        assert_eq!(loaded.text(), "Spawn logic");
        assert_eq!(loaded.input_count() + loaded.output_count(), 0);
    }

    #[test]
    fn test_begin_flags() {
        let begin = BeginNode::new();
        assert!(begin.flags().contains(NodeFlags::NOT_COPYABLE));
        assert!(begin.output_flags(0).unwrap().contains(PortFlags::BEGIN));
    }
}

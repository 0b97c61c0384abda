// SPDX-License-Identifier: MIT OR Apache-2.0
//! Graph persistence and clipboard support.
//!
//! Graphs are saved as [`GraphDocument`]s (RON on disk). Each node is stored
//! as a [`NodeRecord`]: the registry rebuilds the node from its type ID and
//! the node restores its own state from the record's parameters.
//!
//! Clipboard data stores nodes without their identity and links by position
//! in the copied selection, so pasting never collides with existing nodes.

use crate::graph::{ScriptGraph, ScriptGraphParams, ScriptGraphType};
use crate::id::{Guid, NodeId, PortId};
use crate::link::Link;
use crate::node::{NodeFlags, ScriptEvent, ScriptGraphNode};
use crate::port::{PortFlags, PortValue};
use crate::registry::NodeRegistry;
use crate::remap::{GuidRemapper, IdRemapper, RemapError};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Arc;

/// Current graph document format version
pub const GRAPH_FORMAT_VERSION: u32 = 1;

/// Archived form of a node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    /// Node type ID
    pub type_id: Guid,
    /// Instance ID; omitted for clipboard records
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<NodeId>,
    /// Display name
    pub name: String,
    /// Position in the graph UI
    pub position: [f32; 2],
    /// Values of persistent inputs
    #[serde(default)]
    pub defaults: Vec<(PortId, PortValue)>,
    /// Node-specific state
    #[serde(default)]
    pub params: serde_json::Value,
}

impl NodeRecord {
    /// Archive a node including its identity
    pub fn save(node: &dyn ScriptGraphNode) -> Self {
        Self {
            type_id: node.type_guid(),
            id: Some(node.id()),
            name: node.name().to_string(),
            position: node.pos(),
            defaults: Self::persistent_defaults(node),
            params: node.save(),
        }
    }

    /// Archive a node for the clipboard, leaving out its identity
    pub fn copy(node: &dyn ScriptGraphNode) -> Self {
        Self {
            type_id: node.type_guid(),
            id: None,
            name: node.name().to_string(),
            position: node.pos(),
            defaults: Self::persistent_defaults(node),
            params: node.copy(),
        }
    }

    fn persistent_defaults(node: &dyn ScriptGraphNode) -> Vec<(PortId, PortValue)> {
        node.core()
            .inputs()
            .iter()
            .filter(|p| p.flags.contains(PortFlags::PERSISTENT))
            .filter_map(|p| p.default_value.clone().map(|v| (p.id, v)))
            .collect()
    }

    /// Rebuild the node through the registry.
    ///
    /// Pasted nodes and records without an ID get a fresh ID.
    pub fn instantiate(
        &self,
        registry: &NodeRegistry,
        paste: bool,
    ) -> Result<Box<dyn ScriptGraphNode>, ArchiveError> {
        let mut node = registry
            .create_node(self.type_id)
            .ok_or(ArchiveError::UnknownNodeType(self.type_id))?;

        if paste {
            node.paste(&self.params)?;
        } else {
            node.load(&self.params)?;
        }

        let core = node.core_mut();
        match self.id {
            Some(id) if !paste => core.id = id,
            _ => core.id = NodeId::new(),
        }
        core.name = self.name.clone();
        core.position = self.position;
        for (port_id, value) in &self.defaults {
            match core.input_by_id_mut(*port_id) {
                Some(port) => port.default_value = Some(value.clone()),
                None => tracing::warn!(
                    "Dropped stored value of missing input {} on '{}'",
                    port_id,
                    self.name
                ),
            }
        }

        Ok(node)
    }
}

/// Archived form of a graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphDocument {
    /// Format version
    pub version: u32,
    /// Graph name
    pub name: String,
    /// Graph type
    pub graph_type: ScriptGraphType,
    /// Scope (owning element)
    pub scope: Guid,
    /// Context type
    pub context: Guid,
    /// Position in the owning element's view
    #[serde(default)]
    pub position: [f32; 2],
    /// Nodes in graph order
    pub nodes: Vec<NodeRecord>,
    /// Links in graph order
    pub links: Vec<Link>,
}

impl GraphDocument {
    /// Serialize to pretty RON
    pub fn to_ron(&self) -> Result<String, ron::Error> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
    }

    /// Deserialize from RON
    pub fn from_ron(s: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(s)
    }

    /// Save the document to a file
    pub fn save(&self, path: &Path) -> Result<(), ArchiveError> {
        std::fs::write(path, self.to_ron()?)?;
        Ok(())
    }

    /// Load a document from a file
    pub fn load(path: &Path) -> Result<Self, ArchiveError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(Self::from_ron(&contents)?)
    }
}

/// Link between two copied nodes, addressed by position in the selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClipboardLink {
    /// Index of the source node record
    pub src: usize,
    /// Source output port ID
    pub src_output: PortId,
    /// Index of the destination node record
    pub dst: usize,
    /// Destination input port ID
    pub dst_input: PortId,
}

/// Copied nodes and the links between them
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClipboardData {
    /// Nodes without identity
    pub nodes: Vec<NodeRecord>,
    /// Links internal to the selection
    pub links: Vec<ClipboardLink>,
    /// Identities the nodes were copied from; only used to remap references between copied nodes
    #[serde(default)]
    pub origins: Vec<NodeId>,
}

impl ClipboardData {
    /// Check if nothing was copied
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Serialize to JSON text for the system clipboard
    pub fn to_json(&self) -> Result<String, ArchiveError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse JSON text from the system clipboard
    pub fn from_json(text: &str) -> Result<Self, ArchiveError> {
        Ok(serde_json::from_str(text)?)
    }
}

impl ScriptGraph {
    /// Archive the graph
    pub fn to_document(&self) -> GraphDocument {
        GraphDocument {
            version: GRAPH_FORMAT_VERSION,
            name: self.name().to_string(),
            graph_type: self.graph_type(),
            scope: self.scope(),
            context: self.context(),
            position: self.pos(),
            nodes: self.nodes().map(NodeRecord::save).collect(),
            links: self.links().copied().collect(),
        }
    }

    /// Rebuild a graph from its archived form.
    ///
    /// Links are restored as stored, dangling ones included; callers decide
    /// when to sweep them with [`ScriptGraph::remove_broken_links`].
    pub fn from_document(
        document: &GraphDocument,
        registry: Arc<NodeRegistry>,
    ) -> Result<Self, ArchiveError> {
        if document.version > GRAPH_FORMAT_VERSION {
            return Err(ArchiveError::UnsupportedVersion(document.version));
        }

        let params = ScriptGraphParams::new(
            document.scope,
            document.name.clone(),
            document.graph_type,
            document.context,
        );
        let mut graph = ScriptGraph::new(params, registry);
        graph.set_pos(document.position);

        let mut nodes = Vec::with_capacity(document.nodes.len());
        for record in &document.nodes {
            nodes.push(record.instantiate(graph.registry(), false)?);
        }
        for node in nodes {
            let id = node.id();
            if !graph.add_node(node) {
                return Err(ArchiveError::DuplicateNode(id));
            }
        }
        for link in &document.links {
            if graph.is_link_broken(link) {
                graph.push_link_unchecked(*link);
                continue;
            }
            match graph.check_link(
                link.src_node(),
                link.src_output(),
                link.dst_node(),
                link.dst_input(),
            ) {
                Ok(()) => graph.push_link_unchecked(*link),
                Err(err) => tracing::warn!(
                    "Dropped stored link {}:{} -> {}:{}: {}",
                    link.src_node(),
                    link.src_output(),
                    link.dst_node(),
                    link.dst_input(),
                    err
                ),
            }
        }

        graph.process_event(&ScriptEvent::EditorFixUp);
        tracing::info!(
            "Loaded graph '{}' ({} node(s), {} link(s))",
            graph.name(),
            graph.node_count(),
            graph.link_count()
        );
        Ok(graph)
    }

    /// Rebuild a graph from its archived form with fresh node identities.
    ///
    /// Used when instantiating a template; returns the remapper that maps
    /// the archived identities to the new ones.
    pub fn from_document_remapped(
        document: &GraphDocument,
        registry: Arc<NodeRegistry>,
    ) -> Result<(Self, IdRemapper), ArchiveError> {
        let mut graph = Self::from_document(document, registry)?;
        let node_ids: Vec<NodeId> = graph.node_ids().collect();
        let remapper = IdRemapper::with_fresh_ids(node_ids);
        graph.remap_dependencies(&remapper)?;
        Ok((graph, remapper))
    }

    /// Duplicate the graph under fresh node identities
    pub fn duplicate(&self) -> Result<(Self, IdRemapper), ArchiveError> {
        let document = self.to_document();
        let (mut graph, remapper) =
            Self::from_document_remapped(&document, Arc::clone(self.registry()))?;
        graph.inherit_settings(self);
        Ok((graph, remapper))
    }

    /// Copy nodes and the links between them.
    ///
    /// Nodes flagged [`NodeFlags::NOT_COPYABLE`] and unknown IDs are skipped.
    pub fn copy_nodes(&self, node_ids: &[NodeId]) -> ClipboardData {
        let mut clipboard = ClipboardData::default();
        let mut positions = HashMap::new();

        for id in node_ids {
            let Some(node) = self.node(*id) else {
                continue;
            };
            if node.flags().contains(NodeFlags::NOT_COPYABLE) || positions.contains_key(id) {
                continue;
            }
            positions.insert(*id, clipboard.nodes.len());
            clipboard.nodes.push(NodeRecord::copy(node));
            clipboard.origins.push(*id);
        }

        for link in self.links() {
            let src = positions.get(&link.src_node());
            let dst = positions.get(&link.dst_node());
            if let (Some(src), Some(dst)) = (src, dst) {
                clipboard.links.push(ClipboardLink {
                    src: *src,
                    src_output: link.src_output(),
                    dst: *dst,
                    dst_input: link.dst_input(),
                });
            }
        }

        clipboard
    }

    /// Paste clipboard data at the configured paste offset
    pub fn paste_nodes(&mut self, clipboard: &ClipboardData) -> Result<Vec<NodeId>, ArchiveError> {
        let offset = self.config().paste_offset;
        self.paste(clipboard, offset)
    }

    /// Paste clipboard data, returning the new node IDs in clipboard order.
    ///
    /// Every pasted node gets a fresh ID. All nodes are rebuilt and checked
    /// before the graph is touched, so a failing record leaves the graph
    /// unchanged.
    pub fn paste(
        &mut self,
        clipboard: &ClipboardData,
        offset: [f32; 2],
    ) -> Result<Vec<NodeId>, ArchiveError> {
        let mut nodes = Vec::with_capacity(clipboard.nodes.len());
        let mut seen = HashSet::with_capacity(clipboard.nodes.len());
        for record in &clipboard.nodes {
            let mut node = record.instantiate(self.registry(), true)?;
            let id = node.id();
            if self.node(id).is_some() || !seen.insert(id) {
                return Err(ArchiveError::DuplicateNode(id));
            }
            let [x, y] = record.position;
            node.set_pos([x + offset[0], y + offset[1]]);
            nodes.push(node);
        }

        let mut remapper = IdRemapper::new();
        for (origin, node) in clipboard.origins.iter().zip(&nodes) {
            if !remapper.add(origin.as_guid(), node.id().as_guid()) {
                tracing::warn!(
                    "Clipboard lists node {} more than once; references to it keep the first copy",
                    origin
                );
            }
        }

        // Indexed by record position so clipboard links resolve to the right node
        let mut new_ids: Vec<Option<NodeId>> = Vec::with_capacity(nodes.len());
        for mut node in nodes {
            if !remapper.is_empty() {
                node.remap_dependencies(&remapper);
            }
            node.process_event(&ScriptEvent::EditorPaste);
            let id = node.id();
            new_ids.push(self.add_node(node).then_some(id));
        }

        for link in &clipboard.links {
            let src = new_ids.get(link.src).copied().flatten();
            let dst = new_ids.get(link.dst).copied().flatten();
            let (Some(src), Some(dst)) = (src, dst) else {
                tracing::warn!("Skipped clipboard link with invalid node index");
                continue;
            };
            // Legality is re-checked; the target graph may use different settings
            if let Err(err) = self.add_link(src, link.src_output, dst, link.dst_input) {
                tracing::warn!("Skipped pasted link: {}", err);
            }
        }

        let new_ids: Vec<NodeId> = new_ids.into_iter().flatten().collect();
        tracing::debug!("Pasted {} node(s) into graph '{}'", new_ids.len(), self.name());
        Ok(new_ids)
    }
}

/// Error when saving, loading or pasting graphs
#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    /// No registered node type with this ID
    #[error("Unknown node type: {0}")]
    UnknownNodeType(Guid),

    /// Two records share a node ID
    #[error("Duplicate node: {0}")]
    DuplicateNode(NodeId),

    /// Document written by a newer format
    #[error("Graph version {0} is newer than supported version {max}", max = GRAPH_FORMAT_VERSION)]
    UnsupportedVersion(u32),

    /// Node parameters or clipboard text could not be parsed
    #[error("Invalid data: {0}")]
    Json(#[from] serde_json::Error),

    /// RON write failure
    #[error("Serialization error: {0}")]
    Ron(#[from] ron::Error),

    /// RON parse failure
    #[error("Parse error: {0}")]
    RonParse(#[from] ron::error::SpannedError),

    /// File access failure
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Identity remapping failure
    #[error(transparent)]
    Remap(#[from] RemapError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GraphConfig, SingleLinkPolicy};
    use crate::id::DataTypeId;
    use crate::stock::{
        create_stock_registry, BeginNode, BranchNode, CommentNode, FunctionCallNode, FunctionParam,
        FunctionSignature, BRANCH_NODE,
    };

    fn registry() -> Arc<NodeRegistry> {
        Arc::new(create_stock_registry())
    }

    fn empty_graph() -> ScriptGraph {
        let params = ScriptGraphParams::new(
            Guid::new(),
            "Archive",
            ScriptGraphType::Function,
            Guid::new(),
        );
        ScriptGraph::new(params, registry())
    }

    /// Begin -> Branch -> Call, with a stored default on each data input
    fn sample_graph() -> (ScriptGraph, [NodeId; 3]) {
        let mut graph = empty_graph();
        let signature = FunctionSignature {
            function: Guid::new(),
            name: "Spawn".to_string(),
            inputs: vec![FunctionParam::new("Count", DataTypeId::INT)],
            outputs: vec![FunctionParam::new("Spawned", DataTypeId::GUID)],
        };
        let count = PortId::from_guid(signature.inputs[0].id);

        let mut begin = BeginNode::new();
        begin.set_pos([0.0, 0.0]);
        let mut branch = BranchNode::new();
        branch.set_pos([200.0, 0.0]);
        branch
            .core_mut()
            .input_by_id_mut(BranchNode::VALUE)
            .unwrap()
            .default_value = Some(PortValue::Bool(true));
        let mut call = FunctionCallNode::with_signature(signature);
        call.set_pos([400.0, 50.0]);
        call.core_mut().input_by_id_mut(count).unwrap().default_value = Some(PortValue::Int(7));

        let ids = [begin.id(), branch.id(), call.id()];
        graph.add_node(Box::new(begin));
        graph.add_node(Box::new(branch));
        graph.add_node(Box::new(call));
        graph.add_link(ids[0], BeginNode::OUT, ids[1], BranchNode::IN).unwrap();
        graph.add_link(ids[1], BranchNode::TRUE, ids[2], FunctionCallNode::IN).unwrap();
        (graph, ids)
    }

    #[test]
    fn test_ron_round_trip_preserves_structure() {
        let (graph, ids) = sample_graph();
        let document = graph.to_document();
        assert_eq!(document.nodes.len(), 3);
        assert_eq!(document.links.len(), 2);

        let text = document.to_ron().unwrap();
        let parsed = GraphDocument::from_ron(&text).unwrap();
        assert_eq!(parsed, document);

        let restored = ScriptGraph::from_document(&parsed, registry()).unwrap();
        assert_eq!(restored.to_document(), document);
        assert_eq!(restored.node_ids().collect::<Vec<_>>(), ids);
        assert_eq!(
            restored.find_link(ids[1], BranchNode::TRUE, ids[2], FunctionCallNode::IN),
            Some(1)
        );
        assert_eq!(
            restored.node(ids[1]).unwrap().input_data(1),
            Some(&PortValue::Bool(true))
        );
        assert_eq!(restored.node(ids[2]).unwrap().name(), "Call Spawn");
    }

    #[test]
    fn test_file_round_trip() {
        let (graph, _) = sample_graph();
        let path = std::env::temp_dir().join(format!("script_graph_{}.ron", Guid::new()));
        graph.to_document().save(&path).unwrap();
        let loaded = GraphDocument::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(loaded, graph.to_document());
    }

    #[test]
    fn test_unknown_node_type_fails_load() {
        let (graph, _) = sample_graph();
        let mut document = graph.to_document();
        document.nodes[1].type_id = Guid::new();
        let err = ScriptGraph::from_document(&document, registry()).unwrap_err();
        let unknown = document.nodes[1].type_id;
        assert!(matches!(err, ArchiveError::UnknownNodeType(id) if id == unknown));
    }

    #[test]
    fn test_newer_version_rejected() {
        let (graph, _) = sample_graph();
        let mut document = graph.to_document();
        document.version = GRAPH_FORMAT_VERSION + 1;
        let err = ScriptGraph::from_document(&document, registry()).unwrap_err();
        assert!(matches!(err, ArchiveError::UnsupportedVersion(2)));
        assert_eq!(err.to_string(), "Graph version 2 is newer than supported version 1");
    }

    #[test]
    fn test_duplicate_node_record_rejected() {
        let (graph, _) = sample_graph();
        let mut document = graph.to_document();
        let copy = document.nodes[1].clone();
        document.nodes.push(copy);
        assert!(matches!(
            ScriptGraph::from_document(&document, registry()),
            Err(ArchiveError::DuplicateNode(_))
        ));
    }

    #[test]
    fn test_dangling_links_survive_load() {
        let (graph, ids) = sample_graph();
        let mut document = graph.to_document();
        document
            .links
            .push(Link::new(ids[1], PortId::from_index(7), ids[2], FunctionCallNode::IN));

        let mut restored = ScriptGraph::from_document(&document, registry()).unwrap();
        assert_eq!(restored.link_count(), 3);
        assert_eq!(restored.remove_broken_links().len(), 1);
        assert_eq!(restored.link_count(), 2);
    }

    /// Load the document with one extra link and check that it was dropped
    fn load_with_extra_link(document: &mut GraphDocument, extra: Link) -> ScriptGraph {
        let stored = document.links.len();
        document.links.push(extra);
        let restored = ScriptGraph::from_document(document, registry()).unwrap();
        assert_eq!(restored.link_count(), stored);
        restored
    }

    #[test]
    fn test_incompatible_stored_link_dropped() {
        let (graph, ids) = sample_graph();
        let mut document = graph.to_document();
        let flow_to_data = Link::new(ids[0], BeginNode::OUT, ids[1], BranchNode::VALUE);

        let mut restored = load_with_extra_link(&mut document, flow_to_data);
        assert!(restored.find_link(ids[0], BeginNode::OUT, ids[1], BranchNode::VALUE).is_none());
        assert!(restored.remove_broken_links().is_empty());
    }

    #[test]
    fn test_duplicate_stored_link_dropped() {
        let (graph, _) = sample_graph();
        let mut document = graph.to_document();
        let repeated = document.links[1];

        let restored = load_with_extra_link(&mut document, repeated);
        assert_eq!(restored.links().filter(|l| **l == repeated).count(), 1);
    }

    #[test]
    fn test_second_stored_link_into_single_input_dropped() {
        let (mut graph, ids) = sample_graph();
        let signature = FunctionSignature {
            function: Guid::new(),
            name: "IsReady".to_string(),
            inputs: Vec::new(),
            outputs: vec![FunctionParam::new("Ready", DataTypeId::BOOL)],
        };
        let ready = PortId::from_guid(signature.outputs[0].id);
        let first = FunctionCallNode::with_signature(signature.clone());
        let second = FunctionCallNode::with_signature(signature);
        let (a, b) = (first.id(), second.id());
        graph.add_node(Box::new(first));
        graph.add_node(Box::new(second));
        graph.add_link(a, ready, ids[1], BranchNode::VALUE).unwrap();
        let mut document = graph.to_document();

        let restored = load_with_extra_link(
            &mut document,
            Link::new(b, ready, ids[1], BranchNode::VALUE),
        );
        assert_eq!(restored.find_link(a, ready, ids[1], BranchNode::VALUE), Some(2));
        assert!(restored.find_link(b, ready, ids[1], BranchNode::VALUE).is_none());
    }

    #[test]
    fn test_missing_input_drops_stored_value() {
        let (graph, _) = sample_graph();
        let mut document = graph.to_document();
        document.nodes[1]
            .defaults
            .push((PortId::from_index(42), PortValue::Float(1.0)));
        let restored = ScriptGraph::from_document(&document, registry()).unwrap();
        assert_eq!(restored.node_count(), 3);
    }

    #[test]
    fn test_remapped_load_uses_fresh_ids() {
        let (graph, ids) = sample_graph();
        let document = graph.to_document();
        let (restored, remapper) =
            ScriptGraph::from_document_remapped(&document, registry()).unwrap();

        assert_eq!(remapper.len(), 3);
        for id in ids {
            assert!(restored.node(id).is_none());
            assert!(restored.node(remapper.remap_node(id)).is_some());
        }
        for link in graph.links() {
            assert!(restored
                .find_link(
                    remapper.remap_node(link.src_node()),
                    link.src_output(),
                    remapper.remap_node(link.dst_node()),
                    link.dst_input(),
                )
                .is_some());
        }
    }

    #[test]
    fn test_duplicate_keeps_settings() {
        let config = GraphConfig {
            single_link_policy: SingleLinkPolicy::Replace,
            ..GraphConfig::default()
        };
        let (graph, ids) = sample_graph();
        let graph = graph.with_config(config.clone());

        let (copy, remapper) = graph.duplicate().unwrap();
        assert_eq!(copy.config(), &config);
        assert_eq!(copy.node_count(), 3);
        assert_eq!(copy.link_count(), 2);
        assert!(ids.iter().all(|id| copy.node(*id).is_none()));
        assert!(copy.node(remapper.remap_node(ids[0])).is_some());
        // The source graph is untouched
        assert!(ids.iter().all(|id| graph.node(*id).is_some()));
    }

    #[test]
    fn test_copy_skips_uncopyable_nodes() {
        let (graph, ids) = sample_graph();
        let clipboard = graph.copy_nodes(&ids);

        assert_eq!(clipboard.nodes.len(), 2);
        assert!(clipboard.nodes.iter().all(|record| record.id.is_none()));
        assert_eq!(clipboard.origins, vec![ids[1], ids[2]]);
        assert_eq!(
            clipboard.links,
            vec![ClipboardLink {
                src: 0,
                src_output: BranchNode::TRUE,
                dst: 1,
                dst_input: FunctionCallNode::IN,
            }]
        );
    }

    #[test]
    fn test_paste_creates_new_nodes() {
        let (mut graph, ids) = sample_graph();
        let text = graph.copy_nodes(&ids[1..]).to_json().unwrap();
        let clipboard = ClipboardData::from_json(&text).unwrap();

        let pasted = graph.paste(&clipboard, [20.0, 20.0]).unwrap();
        assert_eq!(pasted.len(), 2);
        assert!(pasted.iter().all(|id| !ids.contains(id)));
        assert_eq!(graph.node_count(), 5);
        assert_eq!(graph.link_count(), 3);
        assert!(graph
            .find_link(pasted[0], BranchNode::TRUE, pasted[1], FunctionCallNode::IN)
            .is_some());

        let branch = graph.node(pasted[0]).unwrap();
        assert_eq!(branch.type_guid(), BRANCH_NODE);
        assert_eq!(branch.pos(), [220.0, 20.0]);
        assert_eq!(branch.input_data(1), Some(&PortValue::Bool(true)));
        assert!(branch.core().binding().is_some());
    }

    #[test]
    fn test_paste_uses_configured_offset() {
        let config = GraphConfig {
            paste_offset: [5.0, -5.0],
            ..GraphConfig::default()
        };
        let (graph, ids) = sample_graph();
        let mut graph = graph.with_config(config);
        let clipboard = graph.copy_nodes(&[ids[2]]);

        let pasted = graph.paste_nodes(&clipboard).unwrap();
        assert_eq!(graph.node(pasted[0]).unwrap().pos(), [405.0, 45.0]);
    }

    #[test]
    fn test_paste_ignores_stored_identity() {
        let (mut graph, ids) = sample_graph();
        let mut clipboard = graph.copy_nodes(&ids[1..]);
        let mut with_identity = clipboard.nodes[0].clone();
        with_identity.id = Some(ids[1]);
        clipboard.nodes.insert(0, with_identity);
        clipboard.origins.clear();
        clipboard.links = vec![ClipboardLink {
            src: 0,
            src_output: BranchNode::TRUE,
            dst: 2,
            dst_input: FunctionCallNode::IN,
        }];

        let pasted = graph.paste(&clipboard, [0.0, 0.0]).unwrap();
        assert_eq!(pasted.len(), 3);
        assert!(pasted.iter().all(|id| !ids.contains(id)));
        assert_eq!(graph.node_count(), 6);
        assert_eq!(graph.link_count(), 3);
        assert!(graph
            .find_link(pasted[0], BranchNode::TRUE, pasted[2], FunctionCallNode::IN)
            .is_some());
        assert!(graph
            .find_link(pasted[1], BranchNode::TRUE, pasted[2], FunctionCallNode::IN)
            .is_none());
    }

    #[test]
    fn test_paste_with_repeated_origin() {
        let (mut graph, ids) = sample_graph();
        let mut clipboard = graph.copy_nodes(&ids[1..]);
        clipboard.origins = vec![ids[1], ids[1]];

        let pasted = graph.paste(&clipboard, [0.0, 0.0]).unwrap();
        assert_eq!(pasted.len(), 2);
        assert_eq!(graph.node_count(), 5);
    }

    #[test]
    fn test_paste_failure_leaves_graph_unchanged() {
        let (mut graph, ids) = sample_graph();
        let mut clipboard = graph.copy_nodes(&ids);
        clipboard.nodes[1].type_id = Guid::new();

        assert!(graph.paste(&clipboard, [0.0, 0.0]).is_err());
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.link_count(), 2);
    }

    #[test]
    fn test_node_params_round_trip() {
        let mut comment = CommentNode::new();
        comment.set_text("Spawns enemies");
        let record = NodeRecord::save(&comment);
        assert_eq!(record.id, Some(comment.id()));

        let node = record.instantiate(&create_stock_registry(), false).unwrap();
        assert_eq!(node.id(), comment.id());
        assert_eq!(node.save(), serde_json::json!({ "text": "Spawns enemies" }));
    }

    #[test]
    fn test_invalid_clipboard_text() {
        assert!(matches!(ClipboardData::from_json("not json"), Err(ArchiveError::Json(_))));
        assert!(ClipboardData::default().is_empty());
    }
}

// SPDX-License-Identifier: MIT OR Apache-2.0
//! Identifier remapping for duplicated or instantiated graphs.

use crate::id::{Guid, NodeId};
use std::collections::{HashMap, HashSet};

/// Rewrites identifiers from a source scope to its copy.
///
/// Identifiers without a mapping are returned unchanged; they refer to
/// something outside the remapped scope.
pub trait GuidRemapper {
    /// Check if no mapping has been added
    fn is_empty(&self) -> bool;

    /// Add a mapping. Fails if `from` is already mapped or `to` is already a target.
    fn add(&mut self, from: Guid, to: Guid) -> bool;

    /// Remap an identifier
    fn remap(&self, guid: Guid) -> Guid;

    /// Remap a node identifier
    fn remap_node(&self, node_id: NodeId) -> NodeId {
        NodeId::from(self.remap(node_id.as_guid()))
    }
}

/// Injective identifier map
#[derive(Debug, Clone, Default)]
pub struct IdRemapper {
    forward: HashMap<Guid, Guid>,
    targets: HashSet<Guid>,
}

impl IdRemapper {
    /// Create an empty remapper
    pub fn new() -> Self {
        Self::default()
    }

    /// Map every given node to a fresh random identifier
    pub fn with_fresh_ids(node_ids: impl IntoIterator<Item = NodeId>) -> Self {
        let mut remapper = Self::new();
        for node_id in node_ids {
            remapper.add(node_id.as_guid(), NodeId::new().as_guid());
        }
        remapper
    }

    /// Number of mappings
    pub fn len(&self) -> usize {
        self.forward.len()
    }

    /// Look up the mapping of an identifier, if any
    pub fn get(&self, guid: Guid) -> Option<Guid> {
        self.forward.get(&guid).copied()
    }
}

impl GuidRemapper for IdRemapper {
    fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    fn add(&mut self, from: Guid, to: Guid) -> bool {
        if self.forward.contains_key(&from) || self.targets.contains(&to) {
            return false;
        }
        self.forward.insert(from, to);
        self.targets.insert(to);
        true
    }

    fn remap(&self, guid: Guid) -> Guid {
        self.forward.get(&guid).copied().unwrap_or(guid)
    }
}

/// Error when remapping a graph
#[derive(Debug, thiserror::Error)]
pub enum RemapError {
    /// Two nodes would share an identifier after remapping
    #[error("Remapping would merge nodes into {0}")]
    Collision(NodeId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapping_is_injective() {
        let a = Guid::new();
        let b = Guid::new();
        let target = Guid::new();
        let mut remapper = IdRemapper::new();
        assert!(remapper.is_empty());
        assert!(remapper.add(a, target));
        assert!(!remapper.add(a, Guid::new()));
        assert!(!remapper.add(b, target));
        assert_eq!(remapper.len(), 1);
    }

    #[test]
    fn test_unmapped_ids_pass_through() {
        let shared_type = Guid::new();
        let node = NodeId::new();
        let remapper = IdRemapper::with_fresh_ids([node]);
        assert_eq!(remapper.remap(shared_type), shared_type);
        assert_ne!(remapper.remap_node(node), node);
        assert_eq!(remapper.get(node.as_guid()), Some(remapper.remap(node.as_guid())));
    }
}

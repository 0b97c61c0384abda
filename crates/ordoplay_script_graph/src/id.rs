// SPDX-License-Identifier: MIT OR Apache-2.0
//! Identifiers used to address graph elements.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Generic script element identity (node types, scopes, contexts, referenced elements)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Guid(pub Uuid);

impl Guid {
    /// The nil identifier
    pub const NIL: Guid = Guid(Uuid::nil());

    /// Create a new random identifier
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Build an identifier from a fixed 128-bit value
    pub const fn from_u128(value: u128) -> Self {
        Self(Uuid::from_u128(value))
    }

    /// Check whether this is the nil identifier
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl Default for Guid {
    fn default() -> Self {
        Self::NIL
    }
}

impl fmt::Display for Guid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Unique identifier for a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub Uuid);

impl NodeId {
    /// Create a new random node ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// View this node ID as a generic element identity
    pub fn as_guid(&self) -> Guid {
        Guid(self.0)
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Guid> for NodeId {
    fn from(guid: Guid) -> Self {
        Self(guid.0)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Identifier of a port, unique within one side of its node.
///
/// Older node kinds address their ports by a fixed index, newer ones by a
/// GUID. Both forms stay stable when the port order of a node changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PortId {
    /// Index-addressed port
    Index(u32),
    /// GUID-addressed port
    Guid(Uuid),
}

impl PortId {
    /// Create a port ID from a legacy index
    pub const fn from_index(index: u32) -> Self {
        Self::Index(index)
    }

    /// Create a port ID from a GUID
    pub const fn from_guid(guid: Guid) -> Self {
        Self::Guid(guid.0)
    }

    /// Create a new random GUID-addressed port ID
    pub fn new() -> Self {
        Self::Guid(Uuid::new_v4())
    }
}

impl Default for PortId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PortId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(index) => write!(f, "#{index}"),
            Self::Guid(guid) => guid.fmt(f),
        }
    }
}

/// Identifier of the data type carried by a port
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DataTypeId(pub Guid);

impl DataTypeId {
    /// No data type (signal and flow ports)
    pub const NONE: DataTypeId = DataTypeId(Guid::NIL);
    /// Boolean
    pub const BOOL: DataTypeId =
        DataTypeId(Guid::from_u128(0x03211ee1_b8d3_42a5_bfdc_296fc535fe43));
    /// 32-bit integer
    pub const INT: DataTypeId = DataTypeId(Guid::from_u128(0x8bbd09f8_8a0d_4a57_8d8c_5a3f1a0e7c11));
    /// 32-bit float
    pub const FLOAT: DataTypeId =
        DataTypeId(Guid::from_u128(0x03d99d5a_cf2c_4f8a_8489_7da5b515c202));
    /// 2D vector
    pub const VECTOR2: DataTypeId =
        DataTypeId(Guid::from_u128(0x6c607bf5_76d7_45d0_9b34_9d81a13c3c5f));
    /// 3D vector
    pub const VECTOR3: DataTypeId =
        DataTypeId(Guid::from_u128(0xe01bd066_2a42_493f_bdd9_6c3c4a9c4e7b));
    /// 4D vector
    pub const VECTOR4: DataTypeId =
        DataTypeId(Guid::from_u128(0x2f1bdfbe_0d72_4fb2_a59d_9c0b1b21f6a4));
    /// RGBA color
    pub const COLOR: DataTypeId =
        DataTypeId(Guid::from_u128(0x4d3b0f5c_0ac5_4a38_8c7b_1f2e88b0e3d9));
    /// String
    pub const STRING: DataTypeId =
        DataTypeId(Guid::from_u128(0x02b79a9f_2f5c_4e8c_9c8a_5b6bd3d8a1e0));
    /// Element reference
    pub const GUID: DataTypeId =
        DataTypeId(Guid::from_u128(0xc7a1f8e2_7b3d_4a96_b1d4_0f5e6a2c9d38));

    /// Check whether this is the empty data type
    pub fn is_none(&self) -> bool {
        self.0.is_nil()
    }
}

impl Default for DataTypeId {
    fn default() -> Self {
        Self::NONE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_ids_are_unique() {
        let a = NodeId::new();
        let b = NodeId::new();
        assert_ne!(a, b);
        assert_eq!(NodeId::from(a.as_guid()), a);
    }

    #[test]
    fn test_port_id_forms_differ() {
        let guid = Guid::from_u128(7);
        assert_ne!(PortId::from_index(7), PortId::from_guid(guid));
        assert_eq!(PortId::from_index(3), PortId::Index(3));
        assert_eq!(PortId::from_index(3).to_string(), "#3");
    }

    #[test]
    fn test_builtin_data_types() {
        assert!(DataTypeId::NONE.is_none());
        assert!(!DataTypeId::FLOAT.is_none());
        assert_ne!(DataTypeId::INT, DataTypeId::FLOAT);
    }
}

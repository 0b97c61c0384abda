// SPDX-License-Identifier: MIT OR Apache-2.0
//! Port descriptors for node inputs/outputs.

use crate::id::{DataTypeId, Guid, PortId};
use bitflags::bitflags;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

bitflags! {
    /// Category and modifier flags of a port.
    ///
    /// Categories are additive: a port may be both a signal and carry data.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct PortFlags: u16 {
        /// Port is a signal
        const SIGNAL = 1 << 0;
        /// Port controls internal flow
        const FLOW = 1 << 1;
        /// Port carries data
        const DATA = 1 << 2;

        /// Multiple links can be connected to the port
        const MULTI_LINK = 1 << 3;

        /// Port initiates flow
        const BEGIN = 1 << 4;
        /// Port terminates flow
        const END = 1 << 5;

        /// Data is a pointer
        const PTR = 1 << 6;
        /// Data is an array
        const ARRAY = 1 << 7;
        /// Data is saved to file
        const PERSISTENT = 1 << 8;
        /// Data can be modified in the editor
        const EDITABLE = 1 << 9;
        /// Data can be pulled without triggering an input
        const PULL = 1 << 10;

        /// Draw spacer above the port
        const SPACER_ABOVE = 1 << 11;
        /// Draw spacer below the port
        const SPACER_BELOW = 1 << 12;
    }
}

impl PortFlags {
    /// All category bits
    pub const CATEGORIES: PortFlags =
        PortFlags::SIGNAL.union(PortFlags::FLOW).union(PortFlags::DATA);

    /// Category bits of this flag set
    pub fn category(&self) -> PortFlags {
        self.intersection(Self::CATEGORIES)
    }
}

impl Serialize for PortFlags {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u16(self.bits())
    }
}

impl<'de> Deserialize<'de> for PortFlags {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let bits = u16::deserialize(deserializer)?;
        Ok(PortFlags::from_bits_truncate(bits))
    }
}

/// Decides whether data of one type may feed a port of another type
pub trait DataTypeSystem: Send + Sync {
    /// Check if an output of type `from` may be linked to an input of type `to`
    fn can_convert(&self, from: DataTypeId, to: DataTypeId) -> bool;
}

/// Only identical data types can be linked
#[derive(Debug, Clone, Copy, Default)]
pub struct StrictTypes;

impl DataTypeSystem for StrictTypes {
    fn can_convert(&self, from: DataTypeId, to: DataTypeId) -> bool {
        from == to
    }
}

/// Identical types plus the implicit numeric/vector widening of the built-in types
#[derive(Debug, Clone, Copy, Default)]
pub struct ImplicitConversions;

/// Conversions accepted by [`ImplicitConversions`] besides identity
const IMPLICIT_CONVERSIONS: &[(DataTypeId, DataTypeId)] = &[
    // Numeric conversions
    (DataTypeId::INT, DataTypeId::FLOAT),
    (DataTypeId::FLOAT, DataTypeId::INT),
    // Vector conversions
    (DataTypeId::FLOAT, DataTypeId::VECTOR2),
    (DataTypeId::FLOAT, DataTypeId::VECTOR3),
    (DataTypeId::FLOAT, DataTypeId::VECTOR4),
    (DataTypeId::VECTOR2, DataTypeId::VECTOR3),
    (DataTypeId::VECTOR2, DataTypeId::VECTOR4),
    (DataTypeId::VECTOR3, DataTypeId::VECTOR4),
    // Color conversions
    (DataTypeId::COLOR, DataTypeId::VECTOR4),
    (DataTypeId::VECTOR4, DataTypeId::COLOR),
];

impl DataTypeSystem for ImplicitConversions {
    fn can_convert(&self, from: DataTypeId, to: DataTypeId) -> bool {
        from == to || IMPLICIT_CONVERSIONS.contains(&(from, to))
    }
}

/// A port on a node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Port {
    /// Port ID, unique on its side of the node
    pub id: PortId,
    /// Port name
    pub name: String,
    /// Declared data type
    pub type_id: DataTypeId,
    /// Category and modifier flags
    pub flags: PortFlags,
    /// Value used when a data input is left unconnected
    pub default_value: Option<PortValue>,
}

impl Port {
    /// Create a new port
    pub fn new(id: PortId, name: impl Into<String>, type_id: DataTypeId, flags: PortFlags) -> Self {
        Self {
            id,
            name: name.into(),
            type_id,
            flags,
            default_value: None,
        }
    }

    /// Create a signal port
    pub fn signal(id: PortId, name: impl Into<String>) -> Self {
        Self::new(id, name, DataTypeId::NONE, PortFlags::SIGNAL)
    }

    /// Create a flow port
    pub fn flow(id: PortId, name: impl Into<String>) -> Self {
        Self::new(id, name, DataTypeId::NONE, PortFlags::FLOW)
    }

    /// Create a data port
    pub fn data(id: PortId, name: impl Into<String>, type_id: DataTypeId) -> Self {
        Self::new(id, name, type_id, PortFlags::DATA)
    }

    /// Add flags
    pub fn with_flags(mut self, flags: PortFlags) -> Self {
        self.flags |= flags;
        self
    }

    /// Set the default value
    pub fn with_default(mut self, value: PortValue) -> Self {
        self.default_value = Some(value);
        self
    }

    /// Check if multiple links may target this port
    pub fn is_multi_link(&self) -> bool {
        self.flags.contains(PortFlags::MULTI_LINK)
    }

    /// Check if this output port may be linked to the given input port
    pub fn can_connect(&self, input: &Port, types: &dyn DataTypeSystem) -> bool {
        let shared = self.flags.category() & input.flags.category();
        if shared.is_empty() {
            return false;
        }

        if shared.contains(PortFlags::DATA) {
            if self.flags.contains(PortFlags::ARRAY) != input.flags.contains(PortFlags::ARRAY) {
                return false;
            }
            return types.can_convert(self.type_id, input.type_id);
        }

        true
    }

    /// Get the color for this port (for UI)
    pub fn color(&self) -> [u8; 3] {
        let category = self.flags.category();
        if category.contains(PortFlags::DATA) {
            return data_type_color(self.type_id);
        }
        if category.contains(PortFlags::FLOW) {
            [200, 200, 200]
        } else if category.contains(PortFlags::SIGNAL) {
            [255, 255, 255]
        } else {
            [128, 128, 128]
        }
    }
}

const DATA_TYPE_COLORS: &[(DataTypeId, [u8; 3])] = &[
    (DataTypeId::BOOL, [200, 80, 80]),
    (DataTypeId::INT, [80, 200, 200]),
    (DataTypeId::FLOAT, [80, 200, 80]),
    (DataTypeId::VECTOR2, [200, 200, 80]),
    (DataTypeId::VECTOR3, [200, 150, 80]),
    (DataTypeId::VECTOR4, [200, 100, 200]),
    (DataTypeId::COLOR, [255, 200, 100]),
    (DataTypeId::STRING, [200, 180, 150]),
    (DataTypeId::GUID, [150, 200, 150]),
];

/// Display color of a data type
pub fn data_type_color(type_id: DataTypeId) -> [u8; 3] {
    DATA_TYPE_COLORS
        .iter()
        .find(|(id, _)| *id == type_id)
        .map_or([150, 150, 150], |(_, color)| *color)
}

/// Value that can be stored in a port
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PortValue {
    /// Boolean
    Bool(bool),
    /// Integer
    Int(i32),
    /// Float
    Float(f32),
    /// 2D vector
    Vector2([f32; 2]),
    /// 3D vector
    Vector3([f32; 3]),
    /// 4D vector
    Vector4([f32; 4]),
    /// Color
    Color([f32; 4]),
    /// String
    String(String),
    /// Reference to another script element
    Guid(Guid),
}

impl PortValue {
    /// Get the data type of this value
    pub fn type_id(&self) -> DataTypeId {
        match self {
            Self::Bool(_) => DataTypeId::BOOL,
            Self::Int(_) => DataTypeId::INT,
            Self::Float(_) => DataTypeId::FLOAT,
            Self::Vector2(_) => DataTypeId::VECTOR2,
            Self::Vector3(_) => DataTypeId::VECTOR3,
            Self::Vector4(_) => DataTypeId::VECTOR4,
            Self::Color(_) => DataTypeId::COLOR,
            Self::String(_) => DataTypeId::STRING,
            Self::Guid(_) => DataTypeId::GUID,
        }
    }
}

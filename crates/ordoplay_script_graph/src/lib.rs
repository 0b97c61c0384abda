// SPDX-License-Identifier: MIT OR Apache-2.0
//! Script graph framework for `OrdoPlay` Editor.
//!
//! This crate provides the data model behind visual scripting graphs:
//! - Nodes with typed, flagged input/output ports
//! - Links whose legality is checked on every edit
//! - Dependency enumeration, validation and compilation hooks
//! - Persistence, copy/paste and identity remapping for duplicated graphs
//!
//! ## Architecture
//!
//! A [`ScriptGraph`] owns its nodes (keyed by [`NodeId`]) and an ordered
//! list of [`Link`]s. Node kinds implement [`ScriptGraphNode`] and are
//! created through a [`NodeRegistry`]. Everything outside the graph refers
//! to nodes by ID or borrows them for the duration of a call.

pub mod archive;
pub mod compiler;
pub mod config;
pub mod graph;
pub mod id;
pub mod link;
pub mod node;
pub mod port;
pub mod registry;
pub mod remap;
pub mod stock;
pub mod validation;

pub use archive::{ArchiveError, ClipboardData, GraphDocument, NodeRecord};
pub use compiler::{CompileError, CompilerContext, GraphNodeCompiler};
pub use config::{GraphConfig, SingleLinkPolicy};
pub use graph::{
    LinkError, ScriptGraph, ScriptGraphParams, ScriptGraphType, VisitResult, VisitStatus,
};
pub use id::{DataTypeId, Guid, NodeId, PortId};
pub use link::Link;
pub use node::{NodeCore, NodeFlags, ScriptEvent, ScriptGraphNode};
pub use port::{Port, PortFlags, PortValue};
pub use registry::{NodeRegistry, NodeTypeDescriptor};
pub use remap::{GuidRemapper, IdRemapper};
pub use validation::{Severity, ValidationReport, Validator};

// SPDX-License-Identifier: MIT OR Apache-2.0
//! Validation problem reporting.

use crate::id::NodeId;
use serde::{Deserialize, Serialize};

/// Severity of a validation problem
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    /// Advisory; the graph still compiles
    Warning,
    /// The graph is not expected to compile correctly
    Error,
}

/// A single reported problem
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    /// Severity
    pub severity: Severity,
    /// Human readable description
    pub message: String,
}

/// Problems reported by one node during validation
#[derive(Debug, Clone, Default)]
pub struct NodeProblems {
    problems: Vec<Problem>,
}

impl NodeProblems {
    /// Create an empty problem list
    pub fn new() -> Self {
        Self::default()
    }

    /// Report a problem
    pub fn report(&mut self, severity: Severity, message: impl Into<String>) {
        self.problems.push(Problem {
            severity,
            message: message.into(),
        });
    }

    /// Report a warning
    pub fn warning(&mut self, message: impl Into<String>) {
        self.report(Severity::Warning, message);
    }

    /// Report an error
    pub fn error(&mut self, message: impl Into<String>) {
        self.report(Severity::Error, message);
    }

    /// Number of problems
    pub fn len(&self) -> usize {
        self.problems.len()
    }

    /// Check if nothing was reported
    pub fn is_empty(&self) -> bool {
        self.problems.is_empty()
    }

    /// Iterate over the problems in report order
    pub fn iter(&self) -> impl Iterator<Item = &Problem> {
        self.problems.iter()
    }
}

/// Receives the problems found while validating a graph
pub trait Validator {
    /// Called once per problem, tagged with the node it belongs to
    fn report(&mut self, node: NodeId, problem: &Problem);
}

/// Validator that collects every problem
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    entries: Vec<(NodeId, Problem)>,
}

impl ValidationReport {
    /// Create an empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// All collected problems
    pub fn entries(&self) -> &[(NodeId, Problem)] {
        &self.entries
    }

    /// Problems reported for one node
    pub fn for_node(&self, node: NodeId) -> impl Iterator<Item = &Problem> {
        self.entries
            .iter()
            .filter(move |(id, _)| *id == node)
            .map(|(_, problem)| problem)
    }

    /// Number of problems with the given severity
    pub fn count(&self, severity: Severity) -> usize {
        self.entries
            .iter()
            .filter(|(_, problem)| problem.severity == severity)
            .count()
    }

    /// Check if any error was reported
    pub fn has_errors(&self) -> bool {
        self.count(Severity::Error) > 0
    }

    /// Check if nothing was reported
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Validator for ValidationReport {
    fn report(&mut self, node: NodeId, problem: &Problem) {
        self.entries.push((node, problem.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_counts() {
        let node = NodeId::new();
        let mut problems = NodeProblems::new();
        problems.warning("unused output");
        problems.error("missing type");

        let mut report = ValidationReport::new();
        for problem in problems.iter() {
            report.report(node, problem);
        }

        assert_eq!(report.count(Severity::Warning), 1);
        assert!(report.has_errors());
        assert_eq!(report.for_node(node).count(), 2);
        assert_eq!(report.for_node(NodeId::new()).count(), 0);
    }
}

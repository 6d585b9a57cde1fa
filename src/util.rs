//! Defines the `Error` type for the xdslnet library

use crate::model::ModelError;

use std::io;
use std::path::PathBuf;
use std::result;

pub type Result<T> = result::Result<T, XdslError>;

#[derive(Debug, thiserror::Error)]
pub enum XdslError {

    /// A parent was referenced before (or without) being declared
    #[error("node '{node}' references unknown node '{name}'")]
    UnknownNode { node: String, name: String },

    /// The same node identifier was declared twice
    #[error("node '{0}' was declared more than once")]
    DuplicateNode(String),

    /// The same parent appears twice in one node's parent list
    #[error("node '{node}' lists parent '{parent}' more than once")]
    DuplicateParent { node: String, parent: String },

    /// The flat probability list does not match the declared cardinalities. `expected` is
    /// `usize::MAX` when the cardinalities multiply past the addressable size.
    #[error("node '{node}' has {actual} probabilities, expected {expected}")]
    ShapeMismatch { node: String, expected: usize, actual: usize },

    /// The interval boundary list does not hold one more entry than there are states
    #[error("node '{node}' has {actual} interval boundaries, expected {expected}")]
    IntervalLength { node: String, expected: usize, actual: usize },

    /// The point value list does not hold one entry per state
    #[error("node '{node}' has {actual} point values, expected {expected}")]
    PointValueLength { node: String, expected: usize, actual: usize },

    /// A node was declared without any states
    #[error("node '{0}' declares no states")]
    EmptyStates(String),

    /// A state identifier appears twice within one node
    #[error("node '{node}' declares state '{state}' more than once")]
    DuplicateState { node: String, state: String },

    /// The assembled graph failed validation
    #[error("model validation failed: {0}")]
    ModelValidation(#[from] ModelError),

    /// The input document does not exist
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Any other failure reading the input document
    #[error("failed to read {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },

    /// The input is not well-formed XML
    #[error("malformed document: {0}")]
    Xml(#[from] roxmltree::Error),

    /// A required element or attribute was absent
    #[error("node '{node}' is missing required element '{element}'")]
    MissingElement { node: String, element: &'static str },

    /// A numeric list entry could not be parsed
    #[error("node '{node}' has a non-numeric value '{value}'")]
    InvalidNumber { node: String, value: String },

    /// An `Assignment` did not cover every variable that was required
    #[error("assignment is missing a state for '{0}'")]
    IncompleteAssignment(String),

    /// An `Assignment` named a state the variable does not have
    #[error("node '{node}' has no state '{state}'")]
    UnknownState { node: String, state: String },
}

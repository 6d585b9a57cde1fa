//! Defines a `Model`, a Bayesian (directed) graphical model representing the factorization of a
//! probability distribution P.

use crate::factor::ConditionalTable;
use crate::util::Result;
use crate::variable::Assignment;

pub mod directed;

/// The `Model` trait represents a Probabilistic Graphical Model.
pub trait Model {

    /// Lookup the conditional table of the variable `name`
    fn cpd(&self, name: &str) -> Option<&ConditionalTable>;

    /// Get the names of all variables in the model.
    fn variables(&self) -> Vec<&str>;

    /// Get the number of variables in the model
    fn num_variables(&self) -> usize;

    /// Determine the probability of a full `Assignment` to the variables in the `Model`.
    ///
    /// Specifically, this computes ```P(zeta)```, where ```zeta``` is a full assignment.
    ///
    /// # Args
    /// * `assignment`: a full `Assignment` to the `Model`
    ///
    /// # Returns
    /// the probability of the `Assignment` given the `Model`
    fn probability(&self, assignment: &Assignment) -> Result<f64>;
}


/// The reasons a graph and its tables can fail to form a valid model.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ModelError {

    /// A table was given for a variable that is not a node of the graph
    #[error("a table was given for '{0}', which is not a node of the graph")]
    DanglingVariable(String),

    /// A node of the graph has no table
    #[error("node '{0}' has no conditional table")]
    MissingCpd(String),

    /// A table's parents differ from the node's parents in the graph
    #[error("the table for '{node}' has parents {table:?}, but the graph gives {graph:?}")]
    ParentMismatch { node: String, table: Vec<String>, graph: Vec<String> },

    /// A table sizes a parent's axis differently from the parent's own table
    #[error("the table for '{node}' gives '{parent}' {expected} states, but its own table has {actual}")]
    CardinalityMismatch { node: String, parent: String, expected: usize, actual: usize },

    /// A table names a parent's states differently from the parent's own table
    #[error("the table for '{node}' disagrees with the table of '{parent}' on its state names")]
    StateMismatch { node: String, parent: String },

    /// A column of a table does not sum to one
    #[error("column {column} of the table for '{node}' sums to {sum}")]
    NotNormalized { node: String, column: usize, sum: f64 },

    /// The edges do not form a DAG
    #[error("the graph contains a cycle through '{0}'")]
    Cycle(String),
}

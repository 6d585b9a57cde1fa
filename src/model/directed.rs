//! Defines a `DirectedModel`, which is a Bayesian model that represents the factorization of
//! a probability distribution P

use crate::factor::ConditionalTable;
use crate::util::Result;
use crate::variable::Assignment;
use super::{Model, ModelError};

use indexmap::IndexMap;
use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;

use std::result;

/// The default tolerance within which every column of a table must sum to one
pub const DEFAULT_TOLERANCE: f64 = 0.001;


/// Represents a Bayesian Network - a Directed Probabilistic Graphical Model.
///
/// # Representation
/// The network is a Directed Acyclic Graph (DAG) over the variable names, with an edge
/// ```P -> X``` for every parent ```P``` of ```X```. Every node carries a `ConditionalTable` with
/// scope ```X U Pa(X)```. The tables are held in topological order to faciliate efficient
/// computations over the graph.
#[derive(Debug)]
pub struct DirectedModel {

    /// The dependency graph. Node weights are the variable names.
    graph: DiGraph<String, ()>,

    /// The graph index of each variable name
    names: IndexMap<String, NodeIndex>,

    /// The conditional table of each variable, in topological order
    cpds: IndexMap<String, ConditionalTable>

}

impl DirectedModel {

    /// Get the variable names in a topological order of the `DirectedModel`
    pub fn topological_order(&self) -> Vec<&str> {
        self.cpds.keys().map(|k| k.as_str()).collect()
    }

    /// Iterate over the conditional tables, in topological order
    pub fn cpds(&self) -> impl Iterator<Item = &ConditionalTable> {
        self.cpds.values()
    }

    /// The parents of `name`, in the order its table declares them
    pub fn parents(&self, name: &str) -> Option<Vec<&str>> {
        self.cpds.get(name).map(|cpd| cpd.evidence().iter().map(|p| p.as_str()).collect())
    }

    /// The children of `name`, in topological order
    pub fn children(&self, name: &str) -> Option<Vec<&str>> {
        let &idx = self.names.get(name)?;

        let mut children: Vec<&str> = self.graph
                                          .neighbors_directed(idx, Direction::Outgoing)
                                          .map(|c| self.graph[c].as_str())
                                          .collect();
        children.sort_by_key(|c| self.cpds.get_index_of(*c));
        Some(children)
    }

    /// All `(parent, child)` edges, grouped by child in topological order
    pub fn edges(&self) -> Vec<(&str, &str)> {
        self.cpds.values()
                 .flat_map(|cpd| cpd.evidence().iter().map(move |p| (p.as_str(), cpd.variable())))
                 .collect()
    }

    /// Get the number of edges in the `DirectedModel`
    pub fn num_edges(&self) -> usize {
        self.graph.edge_count()
    }
}

impl Model for DirectedModel {

    /// Lookup the conditional table of a variable by name
    fn cpd(&self, name: &str) -> Option<&ConditionalTable> {
        self.cpds.get(name)
    }

    /// Get all variable names in the model, in topological order
    fn variables(&self) -> Vec<&str> {
        self.topological_order()
    }

    fn num_variables(&self) -> usize {
        self.cpds.len()
    }

    /// Determine the probability of a full `Assignment` to the variables in the `DirectedModel`.
    fn probability(&self, assignment: &Assignment) -> Result<f64> {
        // for every variable in the graph
        self.cpds.values()
                 // get the probability of the assignment
                 .map(|cpd| cpd.value(assignment))
                 // and multiply those probability by the chain rule
                 // but if there are any errors, just return the error
                 .fold(Ok(1.0), |acc, val| acc.and_then(|p| val.map(|v| p * v)))
    }
}


/// An implementation of the [builder pattern] for creating a `DirectedModel`.
///
/// The graph is fixed at construction; tables are attached with `with_cpds`, and `check_model`
/// validates the whole and produces the model.
///
/// [builder pattern]: https://en.wikipedia.org/wiki/Builder_pattern
#[derive(Debug)]
pub struct DirectedModelBuilder {

    /// The dependency graph
    graph: DiGraph<String, ()>,

    /// The graph index of each variable name
    names: IndexMap<String, NodeIndex>,

    /// The attached tables
    cpds: IndexMap<String, ConditionalTable>,

    /// Tolerance for column normalization
    tolerance: f64,

    /// The error state of the builder
    err: Option<ModelError>

}


impl DirectedModelBuilder {

    /// Construct a new `DirectedModelBuilder` over the graph given by `edges`.
    ///
    /// # Args
    /// * `edges`: ```(parent, child)``` pairs. Every name mentioned becomes a node.
    pub fn new(edges: &[(String, String)]) -> Self {
        let mut builder = DirectedModelBuilder {
            graph: DiGraph::new(),
            names: IndexMap::new(),
            cpds: IndexMap::new(),
            tolerance: DEFAULT_TOLERANCE,
            err: None
        };

        for (parent, child) in edges.iter() {
            let p = builder.node(parent);
            let c = builder.node(child);
            builder.graph.update_edge(p, c, ());
        }

        builder
    }


    /// Add nodes that may not appear in any edge.
    pub fn with_nodes<'a, I>(mut self, nodes: I) -> Self
        where I: IntoIterator<Item = &'a str>
    {
        for name in nodes {
            self.node(name);
        }

        self
    }


    /// Set the tolerance within which every column of a table must sum to one
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }


    /// Attach conditional tables to the nodes of the graph.
    ///
    /// A table for a variable that already has one replaces it. A table for a variable that is
    /// not a node puts the builder in an error state, reported by `check_model`.
    pub fn with_cpds<I>(mut self, cpds: I) -> Self
        where I: IntoIterator<Item = ConditionalTable>
    {
        ///////////////////////////////////////////////////////////////////////
        // 1) if we are in an error state, do nothing
        if self.err.is_some() {
            return self;
        }

        ///////////////////////////////////////////////////////////////////////
        // 2) attach each table to its node
        for cpd in cpds {
            if !self.names.contains_key(cpd.variable()) {
                self.err = Some(ModelError::DanglingVariable(cpd.variable().to_string()));
                return self;
            }

            if self.cpds.contains_key(cpd.variable()) {
                tracing::warn!(variable = cpd.variable(), "replacing conditional table");
            }

            self.cpds.insert(cpd.variable().to_string(), cpd);
        }

        self
    }


    /// Validate the graph and its tables and complete building the model.
    ///
    /// # Returns
    /// the `DirectedModel`, or the first error found
    ///
    /// # Errors
    /// * `ModelError::DanglingVariable` if a table was attached to an unknown variable
    /// * `ModelError::Cycle` if the edges do not form a DAG
    /// * `ModelError::MissingCpd` if a node has no table
    /// * `ModelError::ParentMismatch` if a table's parents are not the node's parents
    /// * `ModelError::CardinalityMismatch` / `ModelError::StateMismatch` if a table disagrees with
    ///   a parent's table about the parent's states
    /// * `ModelError::NotNormalized` if a column does not sum to one
    ///
    /// # Postcondition
    /// This call consumes the `DirectedModelBuilder`
    pub fn check_model(self) -> result::Result<DirectedModel, ModelError> {
        let DirectedModelBuilder { graph, names, mut cpds, tolerance, err } = self;

        if let Some(e) = err {
            return Err(e);
        }

        let order = toposort(&graph, None).map_err(|c| ModelError::Cycle(graph[c.node_id()].clone()))?;

        for &idx in order.iter() {
            let name = &graph[idx];
            let cpd = cpds.get(name).ok_or_else(|| ModelError::MissingCpd(name.clone()))?;

            // the graph and the table must agree on the parents
            let mut graph_parents: Vec<String> = graph.neighbors_directed(idx, Direction::Incoming)
                                                      .map(|p| graph[p].clone())
                                                      .collect();
            graph_parents.sort();
            let mut table_parents = cpd.evidence().to_vec();
            table_parents.sort();

            if graph_parents != table_parents {
                return Err(ModelError::ParentMismatch {
                    node: name.clone(),
                    table: cpd.evidence().to_vec(),
                    graph: graph_parents
                });
            }

            // and on each parent's states
            for (parent, &card) in cpd.evidence().iter().zip(cpd.evidence_card().iter()) {
                let own = cpds.get(parent).ok_or_else(|| ModelError::MissingCpd(parent.clone()))?;

                if own.variable_card() != card {
                    return Err(ModelError::CardinalityMismatch {
                        node: name.clone(),
                        parent: parent.clone(),
                        expected: card,
                        actual: own.variable_card()
                    });
                }

                if cpd.states(parent) != own.states(parent) {
                    return Err(ModelError::StateMismatch { node: name.clone(), parent: parent.clone() });
                }
            }

            if let Some((column, sum)) = cpd.unnormalized_column(tolerance) {
                return Err(ModelError::NotNormalized { node: name.clone(), column, sum });
            }
        }

        // every table belongs to a node and every node has a table, so this keeps them all
        let cpds: IndexMap<String, ConditionalTable> = order.iter()
                                                            .filter_map(|&idx| cpds.swap_remove_entry(&graph[idx]))
                                                            .collect();

        Ok(DirectedModel { graph, names, cpds })
    }


    /// Internal function that finds or adds the node for `name`
    fn node(&mut self, name: &str) -> NodeIndex {
        if let Some(&idx) = self.names.get(name) {
            return idx;
        }

        let idx = self.graph.add_node(name.to_string());
        self.names.insert(name.to_string(), idx);
        idx
    }
}

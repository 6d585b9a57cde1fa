//! Defines the `StateRegistry`, the lookup table of every node's states seen so far in a document.

use crate::util::{Result, XdslError};
use crate::variable::StateList;

use indexmap::IndexMap;

/// Accumulates the `StateList` of each node, in the order the nodes were registered.
///
/// The registry is append-only. A node's states must be registered before any node that names it
/// as a parent is built.
#[derive(Debug, Default)]
pub struct StateRegistry {
    states: IndexMap<String, StateList>
}

impl StateRegistry {

    pub fn new() -> Self {
        StateRegistry { states: IndexMap::new() }
    }

    /// Register the states of node `name`.
    ///
    /// # Errors
    /// * `XdslError::DuplicateNode` if `name` is already registered
    pub fn register(&mut self, name: &str, states: StateList) -> Result<()> {
        if self.states.contains_key(name) {
            return Err(XdslError::DuplicateNode(name.to_string()));
        }

        self.states.insert(name.to_string(), states);
        Ok(())
    }

    /// Look up the states of `name` on behalf of `node`.
    ///
    /// # Errors
    /// * `XdslError::UnknownNode` if `name` was never registered
    pub fn lookup(&self, node: &str, name: &str) -> Result<&StateList> {
        self.states.get(name).ok_or_else(|| XdslError::UnknownNode {
            node: node.to_string(),
            name: name.to_string()
        })
    }

    /// The cardinality of `name`, looked up on behalf of `node`
    pub fn cardinality(&self, node: &str, name: &str) -> Result<usize> {
        self.lookup(node, name).map(|s| s.len())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.states.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

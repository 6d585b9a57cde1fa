//! Builds the `ConditionalTable` of a node from its `NodeRecord`.

use crate::factor::{reshape_blocks, ConditionalTable};
use crate::model::ModelError;
use crate::record::NodeRecord;
use crate::registry::StateRegistry;
use crate::util::{Result, XdslError};
use crate::variable::StateList;

use indexmap::IndexMap;

/// Builds conditional tables against a snapshot of the `StateRegistry`.
///
/// The parents of every record built must already be registered. Building never touches the
/// registry; the caller registers each node's states before building any of its children.
pub struct CptBuilder<'a> {
    registry: &'a StateRegistry
}

impl<'a> CptBuilder<'a> {

    pub fn new(registry: &'a StateRegistry) -> Self {
        CptBuilder { registry }
    }

    /// Build the `ConditionalTable` of `record`.
    ///
    /// The probabilities are read as one block of `|states|` values per parent configuration,
    /// configurations enumerated with the first parent varying slowest. Whether the columns sum
    /// to one is not checked here.
    ///
    /// # Errors
    /// * `XdslError::EmptyStates` / `XdslError::DuplicateState` for an invalid state list
    /// * `XdslError::UnknownNode` if a parent is not registered
    /// * `XdslError::DuplicateParent` if a parent is listed twice
    /// * `XdslError::ModelValidation` if the node lists itself as a parent
    /// * `XdslError::ShapeMismatch` if the number of probabilities does not match the
    ///   cardinalities
    pub fn build(&self, record: &NodeRecord) -> Result<ConditionalTable> {
        let node = record.id.as_str();

        ///////////////////////////////////////////////////////////////////////
        // 1) the node's own axis
        let own = StateList::new(node, record.states.clone())?;
        let card = own.len();

        let mut state_names = IndexMap::with_capacity(record.parents.len() + 1);
        state_names.insert(record.id.clone(), own);

        ///////////////////////////////////////////////////////////////////////
        // 2) one axis per parent, in declared order
        let mut evidence_card = Vec::with_capacity(record.parents.len());

        for parent in record.parents.iter() {
            if parent == &record.id {
                return Err(XdslError::ModelValidation(ModelError::Cycle(record.id.clone())));
            }

            if state_names.contains_key(parent) {
                return Err(XdslError::DuplicateParent {
                    node: record.id.clone(),
                    parent: parent.clone()
                });
            }

            let states = self.registry.lookup(node, parent)?;
            evidence_card.push(states.len());
            state_names.insert(parent.clone(), states.clone());
        }

        ///////////////////////////////////////////////////////////////////////
        // 3) check the flat list covers every (own, configuration) pair exactly once.
        // A shape too large to index reports `usize::MAX` as the expected length.
        let expected = evidence_card.iter()
                                    .try_fold(card, |acc, &c| acc.checked_mul(c))
                                    .unwrap_or(usize::MAX);
        let mismatch = || XdslError::ShapeMismatch {
            node: record.id.clone(),
            expected,
            actual: record.probabilities.len()
        };

        if expected == usize::MAX || record.probabilities.len() != expected {
            return Err(mismatch());
        }

        ///////////////////////////////////////////////////////////////////////
        // 4) reshape
        let values = reshape_blocks(record.probabilities.clone(), card, &evidence_card)
                         .map_err(|_| mismatch())?;

        tracing::debug!(node, card, ?evidence_card, "built conditional table");

        Ok(ConditionalTable::new(record.id.clone(), record.parents.clone(), state_names, values))
    }
}

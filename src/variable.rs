//! Definition of the variable module
//!
//! A node of a network is a discrete random variable identified by name. Its domain is an ordered
//! `StateList`; the position of a state in that list is the index used along the variable's axis
//! of every table that mentions it.

use crate::util::{Result, XdslError};

use indexmap::IndexMap;
use itertools::{Either, Itertools};

use std::iter;
use std::ops::Index;
use std::slice;

/// The ordered, non-empty set of state identifiers of one variable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StateList {
    states: Vec<String>
}

impl StateList {

    /// Construct a new `StateList` for the node `node`.
    ///
    /// # Errors
    /// * `XdslError::EmptyStates` if `states` is empty
    /// * `XdslError::DuplicateState` if an identifier appears more than once
    pub fn new(node: &str, states: Vec<String>) -> Result<Self> {
        if states.is_empty() {
            return Err(XdslError::EmptyStates(node.to_string()));
        }

        if let Some(dup) = states.iter().duplicates().next() {
            return Err(XdslError::DuplicateState {
                node: node.to_string(),
                state: dup.clone()
            });
        }

        Ok(StateList { states })
    }

    /// The number of states, i.e. the cardinality of the variable
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Always `false`; a `StateList` can not be constructed empty
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// The index of `state` along the variable's axis
    pub fn position(&self, state: &str) -> Option<usize> {
        self.states.iter().position(|s| s == state)
    }

    pub fn iter(&self) -> slice::Iter<'_, String> {
        self.states.iter()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.states
    }
}

impl Index<usize> for StateList {
    type Output = String;

    fn index(&self, idx: usize) -> &String {
        &self.states[idx]
    }
}

impl<'a> IntoIterator for &'a StateList {
    type Item = &'a String;
    type IntoIter = slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.states.iter()
    }
}


/// A (possibly partial) assignment of states to variables, by name.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Assignment {
    values: IndexMap<String, String>
}

impl Assignment {

    /// Construct an empty `Assignment`
    pub fn new() -> Self {
        Assignment { values: IndexMap::new() }
    }

    /// Assign `state` to the variable `var`, replacing any previous assignment
    pub fn set(&mut self, var: &str, state: &str) {
        self.values.insert(var.to_string(), state.to_string());
    }

    /// Get the state assigned to `var`, if any
    pub fn get(&self, var: &str) -> Option<&str> {
        self.values.get(var).map(|s| s.as_str())
    }

    /// The number of assigned variables
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for Assignment {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        let mut assn = Assignment::new();
        for (var, state) in iter {
            assn.set(var, state);
        }
        assn
    }
}


/// Enumerate every index combination over `shape`, last axis varying fastest.
///
/// An empty shape has exactly one (empty) combination.
pub fn configurations(shape: &[usize]) -> impl Iterator<Item = Vec<usize>> {
    if shape.is_empty() {
        Either::Left(iter::once(Vec::<usize>::new()))
    } else {
        Either::Right(shape.iter().map(|&n| 0..n).multi_cartesian_product())
    }
}

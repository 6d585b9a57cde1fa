//! Definition of the factor module
//!
//! A `ConditionalTable` is the conditional probability distribution of one variable given its
//! parents, stored as a dense table. Axis 0 of the table is the variable's own states; axes
//! `1..=n` are the parents, in the order they were declared.
//!
//! Source documents store a table as a flat list of numbers: one block of `card` probabilities
//! per parent configuration, with configurations enumerated row-major over the parents (first
//! parent slowest, last parent fastest). `reshape_blocks` and `flatten_blocks` convert between
//! the two layouts.

use crate::util::{Result, XdslError};
use crate::variable::{configurations, Assignment, StateList};

use indexmap::IndexMap;
use ndarray::prelude as nd;
use ndarray::ShapeError;

use std::fmt;
use std::result;

/// Alias f64 ndarray::Array as Table
pub type Table = nd::ArrayD<f64>;


/// Rebuild a table from its flat, block-of-rows source layout.
///
/// # Args
/// * `flat`: `card * product(evidence_card)` probabilities, one block of `card` per parent
///   configuration
/// * `card`: the cardinality of the variable itself
/// * `evidence_card`: the cardinalities of the parents, in declared order
///
/// # Returns
/// a standard-layout table of shape `(card, evidence_card...)`
///
/// # Errors
/// * `ShapeError` if the length of `flat` does not match the requested shape
pub fn reshape_blocks(
    flat: Vec<f64>,
    card: usize,
    evidence_card: &[usize]
) -> result::Result<Table, ShapeError> {
    // read the list as (parents..., own), which is exactly its row-major layout
    let mut shape = evidence_card.to_vec();
    shape.push(card);
    let blocks = Table::from_shape_vec(nd::IxDyn(&shape), flat)?;

    // then move the own axis to the front
    let mut axes = vec![evidence_card.len()];
    axes.extend(0..evidence_card.len());

    Ok(blocks.permuted_axes(nd::IxDyn(&axes)).as_standard_layout().into_owned())
}


/// The inverse of `reshape_blocks`: lay a `(card, evidence_card...)` table back out as a flat list
/// of per-configuration blocks.
pub fn flatten_blocks(table: &Table) -> Vec<f64> {
    let mut axes: Vec<usize> = (1..table.ndim()).collect();
    axes.push(0);

    table.view().permuted_axes(nd::IxDyn(&axes)).iter().cloned().collect()
}


#[derive(Clone, Debug, PartialEq)]
pub struct ConditionalTable {
    /// The name of the variable this table is a distribution over
    variable: String,

    /// The parents of `variable`, in declared order
    evidence: Vec<String>,

    /// The states of `variable` and of each parent. `variable` comes first, then the parents in
    /// declared order
    state_names: IndexMap<String, StateList>,

    /// The values of the table, shape `(card, evidence_card...)`
    values: Table
}


impl ConditionalTable {

    /// Create a new `ConditionalTable`.
    ///
    /// Callers guarantee that `values` has one axis per entry of `state_names`, sized by the
    /// corresponding `StateList`, and that `state_names` is keyed by `variable` followed by
    /// `evidence`.
    pub(crate) fn new(
        variable: String,
        evidence: Vec<String>,
        state_names: IndexMap<String, StateList>,
        values: Table
    ) -> Self {
        ConditionalTable { variable, evidence, state_names, values }
    }

    pub fn variable(&self) -> &str {
        &self.variable
    }

    /// The number of states of the variable
    pub fn variable_card(&self) -> usize {
        self.values.shape()[0]
    }

    /// The parents of the variable, in declared order. Empty for a root node.
    pub fn evidence(&self) -> &[String] {
        &self.evidence
    }

    /// The cardinalities of the parents, in declared order
    pub fn evidence_card(&self) -> &[usize] {
        &self.values.shape()[1..]
    }

    /// The number of parent configurations, i.e. columns of the table
    pub fn column_count(&self) -> usize {
        self.evidence_card().iter().product()
    }

    /// The state-name index of this table
    pub fn state_names(&self) -> &IndexMap<String, StateList> {
        &self.state_names
    }

    /// The states of `var`, if it is in the scope of this table
    pub fn states(&self, var: &str) -> Option<&StateList> {
        self.state_names.get(var)
    }

    pub fn values(&self) -> &Table {
        &self.values
    }

    /// The values in the flat layout they were read from
    pub fn flatten(&self) -> Vec<f64> {
        flatten_blocks(&self.values)
    }

    /// Retrieve the probability of the assigned state of the variable given the assigned states of
    /// its parents.
    ///
    /// # Args
    /// * `assignment`: assigns a state to the variable and each parent. It may assign other
    ///   variables too; those are ignored.
    ///
    /// # Errors
    /// * `XdslError::IncompleteAssignment` if the variable or a parent has no assigned state
    /// * `XdslError::UnknownState` if an assigned state is not a state of its variable
    pub fn value(&self, assignment: &Assignment) -> Result<f64> {
        let mut idx = Vec::with_capacity(self.state_names.len());

        for (var, states) in self.state_names.iter() {
            let state = assignment.get(var)
                                  .ok_or_else(|| XdslError::IncompleteAssignment(var.clone()))?;
            let pos = states.position(state).ok_or_else(|| XdslError::UnknownState {
                node: var.clone(),
                state: state.to_string()
            })?;
            idx.push(pos);
        }

        Ok(self.values[nd::IxDyn(&idx)])
    }

    /// Sum the table over the variable's own axis, leaving one sum per parent configuration
    pub fn column_sums(&self) -> Table {
        self.values.sum_axis(nd::Axis(0))
    }

    /// Check that every column of the table sums to one, within `tolerance`
    pub fn is_normalized(&self, tolerance: f64) -> bool {
        self.unnormalized_column(tolerance).is_none()
    }

    /// The first column, and its sum, that is not within `tolerance` of one. A column holding
    /// `NaN` is never within tolerance.
    pub fn unnormalized_column(&self, tolerance: f64) -> Option<(usize, f64)> {
        self.column_sums()
            .iter()
            .cloned()
            .enumerate()
            .find(|&(_, s)| !((s - 1.0).abs() <= tolerance))
    }
}


/// Renders the full table: one header row per parent, then one row per state of the variable.
impl fmt::Display for ConditionalTable {

    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let columns: Vec<Vec<usize>> = configurations(self.evidence_card()).collect();

        let mut rows: Vec<Vec<String>> = Vec::new();
        for (p, parent) in self.evidence.iter().enumerate() {
            let states = &self.state_names[parent];
            let mut row = vec![parent.clone()];
            row.extend(columns.iter().map(|cfg| states[cfg[p]].clone()));
            rows.push(row);
        }

        let own = &self.state_names[&self.variable];
        for (i, state) in own.iter().enumerate() {
            let mut row = vec![format!("{}({})", self.variable, state)];
            for cfg in columns.iter() {
                let mut idx = vec![i];
                idx.extend(cfg.iter().cloned());
                row.push(format!("{}", self.values[nd::IxDyn(&idx)]));
            }
            rows.push(row);
        }

        let ncols = columns.len() + 1;
        let widths: Vec<usize> = (0..ncols).map(|c| rows.iter().map(|r| r[c].len()).max().unwrap_or(0))
                                           .collect();
        let rule: String = widths.iter().map(|w| format!("+{}", "-".repeat(w + 2))).collect();

        writeln!(f, "{}+", rule)?;
        for row in rows.iter() {
            for (cell, w) in row.iter().zip(widths.iter()) {
                write!(f, "| {:<width$} ", cell, width = w)?;
            }
            writeln!(f, "|")?;
            writeln!(f, "{}+", rule)?;
        }

        Ok(())
    }
}


// Unit tests
#[cfg(test)]
mod tests {
    use super::*;

    use ndarray::array;
    use ndarray_rand::rand_distr::Uniform;
    use ndarray_rand::RandomExt;
    use rand::Rng;

    fn states(node: &str, names: &[&str]) -> StateList {
        StateList::new(node, names.iter().map(|s| s.to_string()).collect()).unwrap()
    }

    #[test]
    fn reshape_no_parents() {
        let flat = vec![0.1, 0.2, 0.7];
        let table = reshape_blocks(flat.clone(), 3, &[]).unwrap();

        assert_eq!(&[3], table.shape());
        assert_eq!(flat, table.iter().cloned().collect::<Vec<f64>>());
        assert_eq!(flat, flatten_blocks(&table));
    }

    #[test]
    fn reshape_one_parent() {
        // P(S | I) with blocks [P(S | i0), P(S | i1)]
        let table = reshape_blocks(vec![0.95, 0.05, 0.2, 0.8], 2, &[2]).unwrap();

        assert_eq!(array![[0.95, 0.2], [0.05, 0.8]].into_dyn(), table);
    }

    #[test]
    fn reshape_two_parents() {
        // own card 2, parents of card 2 and 3
        let flat: Vec<f64> = (0..12).map(|v| v as f64).collect();
        let table = reshape_blocks(flat, 2, &[2, 3]).unwrap();

        assert_eq!(&[2, 2, 3], table.shape());
        for (k, cfg) in configurations(&[2, 3]).enumerate() {
            for i in 0..2 {
                let idx = [i, cfg[0], cfg[1]];
                assert_eq!((k * 2 + i) as f64, table[nd::IxDyn(&idx)]);
            }
        }
    }

    #[test]
    fn reshape_wrong_length() {
        assert!(reshape_blocks(vec![0.5, 0.5, 0.5], 2, &[2]).is_err());
    }

    #[test]
    fn round_trip_random_shapes() {
        let mut rng = rand::thread_rng();

        for _ in 0..50 {
            let card = rng.gen_range(1..5);
            let nparents = rng.gen_range(0..4);
            let evidence_card: Vec<usize> = (0..nparents).map(|_| rng.gen_range(1..4)).collect();

            let len = card * evidence_card.iter().product::<usize>();
            let flat: Vec<f64> = nd::Array1::random(len, Uniform::new(0., 1.)).to_vec();

            let table = reshape_blocks(flat.clone(), card, &evidence_card).unwrap();

            let mut shape = vec![card];
            shape.extend(evidence_card.iter().cloned());
            assert_eq!(shape.as_slice(), table.shape());
            assert_eq!(flat, flatten_blocks(&table));
        }
    }

    #[test]
    fn value_and_normalization() {
        let mut names = IndexMap::new();
        names.insert(String::from("S"), states("S", &["low", "high"]));
        names.insert(String::from("I"), states("I", &["dull", "smart"]));

        let values = array![[0.95, 0.2], [0.05, 0.8]].into_dyn();
        let cpt = ConditionalTable::new(String::from("S"), vec![String::from("I")], names, values);

        assert_eq!(2, cpt.variable_card());
        assert_eq!(&[2], cpt.evidence_card());
        assert_eq!(2, cpt.column_count());
        assert!(cpt.is_normalized(0.001));
        assert_eq!(vec![0.95, 0.05, 0.2, 0.8], cpt.flatten());

        let assn: Assignment = vec![("S", "high"), ("I", "smart"), ("X", "x0")].into_iter().collect();
        assert_eq!(0.8, cpt.value(&assn).unwrap());

        let assn: Assignment = vec![("S", "high")].into_iter().collect();
        match cpt.value(&assn) {
            Err(XdslError::IncompleteAssignment(var)) => assert_eq!("I", var),
            _ => panic!("wrong error type")
        };

        let assn: Assignment = vec![("S", "medium"), ("I", "smart")].into_iter().collect();
        match cpt.value(&assn) {
            Err(XdslError::UnknownState { node, state }) => {
                assert_eq!("S", node);
                assert_eq!("medium", state);
            },
            _ => panic!("wrong error type")
        };
    }

    #[test]
    fn not_normalized() {
        let mut names = IndexMap::new();
        names.insert(String::from("A"), states("A", &["a0", "a1"]));

        let cpt = ConditionalTable::new(String::from("A"), vec![], names, array![0.5, 0.6].into_dyn());
        assert!(!cpt.is_normalized(0.001));
        assert!(cpt.is_normalized(0.2));
    }

    #[test]
    fn nan_column() {
        let mut names = IndexMap::new();
        names.insert(String::from("A"), states("A", &["a0", "a1"]));

        let cpt = ConditionalTable::new(String::from("A"), vec![], names, array![f64::NAN, 0.5].into_dyn());
        assert!(!cpt.is_normalized(1.0));

        let (column, sum) = cpt.unnormalized_column(1.0).unwrap();
        assert_eq!(0, column);
        assert!(sum.is_nan());
    }

    #[test]
    fn display() {
        let mut names = IndexMap::new();
        names.insert(String::from("S"), states("S", &["low", "high"]));
        names.insert(String::from("I"), states("I", &["dull", "smart"]));

        let values = array![[0.95, 0.2], [0.05, 0.8]].into_dyn();
        let cpt = ConditionalTable::new(String::from("S"), vec![String::from("I")], names, values);

        let out = format!("{}", cpt);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(7, lines.len());
        assert!(lines[1].contains("dull") && lines[1].contains("smart"));
        assert!(lines[3].starts_with("| S(low)"));
        assert!(lines[5].contains("0.8"));
    }
}

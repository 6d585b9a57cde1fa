//! Per-state numeric metadata of a node: point values and intervals.
//!
//! Neither map takes part in building the model; both are handed back alongside it for consumers
//! that summarize a node numerically (e.g. an expected value).

use crate::util::{Result, XdslError};
use crate::variable::StateList;

use indexmap::IndexMap;

/// Maps each state of a node to a single value
pub type PointValueMap = IndexMap<String, f64>;

/// Maps each state of a node to a `(lower, upper)` bound pair
pub type IntervalMap = IndexMap<String, (f64, f64)>;


/// Zip the point values of `node` against its states, in declared order.
///
/// # Errors
/// * `XdslError::PointValueLength` if there is not exactly one value per state
pub fn point_values(node: &str, states: &StateList, values: &[f64]) -> Result<PointValueMap> {
    if values.len() != states.len() {
        return Err(XdslError::PointValueLength {
            node: node.to_string(),
            expected: states.len(),
            actual: values.len()
        });
    }

    Ok(states.iter().cloned().zip(values.iter().cloned()).collect())
}


/// Pair consecutive interval boundaries of `node` and assign them to its states, in declared
/// order: state `i` gets `(bounds[i], bounds[i + 1])`.
///
/// # Errors
/// * `XdslError::IntervalLength` if there are not exactly `states.len() + 1` boundaries
pub fn intervals(node: &str, states: &StateList, bounds: &[f64]) -> Result<IntervalMap> {
    if bounds.len() != states.len() + 1 {
        return Err(XdslError::IntervalLength {
            node: node.to_string(),
            expected: states.len() + 1,
            actual: bounds.len()
        });
    }

    Ok(states.iter().cloned().zip(bounds.windows(2).map(|w| (w[0], w[1]))).collect())
}


#[cfg(test)]
mod tests {
    use super::*;

    fn states(node: &str, names: &[&str]) -> StateList {
        StateList::new(node, names.iter().map(|s| s.to_string()).collect()).unwrap()
    }

    #[test]
    fn point_value_zip() {
        let pv = point_values("X", &states("X", &["Low", "High"]), &[1.0, 2.0]).unwrap();

        assert_eq!(2, pv.len());
        assert_eq!(Some(&1.0), pv.get("Low"));
        assert_eq!(Some(&2.0), pv.get("High"));
        assert_eq!(vec!["Low", "High"], pv.keys().collect::<Vec<&String>>());
    }

    #[test]
    fn point_value_length() {
        match point_values("X", &states("X", &["Low", "High"]), &[1.0]) {
            Err(XdslError::PointValueLength { node, expected, actual }) => {
                assert_eq!("X", node);
                assert_eq!(2, expected);
                assert_eq!(1, actual);
            },
            _ => panic!("wrong error type")
        };
    }

    #[test]
    fn interval_pairs() {
        let iv = intervals("X", &states("X", &["A", "B"]), &[0., 5., 10.]).unwrap();

        assert_eq!(2, iv.len());
        assert_eq!(Some(&(0., 5.)), iv.get("A"));
        assert_eq!(Some(&(5., 10.)), iv.get("B"));
    }

    #[test]
    fn interval_too_short() {
        // one boundary per state is one short
        match intervals("X", &states("X", &["A", "B"]), &[0., 5.]) {
            Err(XdslError::IntervalLength { node, expected, actual }) => {
                assert_eq!("X", node);
                assert_eq!(3, expected);
                assert_eq!(2, actual);
            },
            _ => panic!("wrong error type")
        };
    }

    #[test]
    fn interval_too_long() {
        assert!(intervals("X", &states("X", &["A", "B"]), &[0., 5., 10., 15.]).is_err());
    }
}

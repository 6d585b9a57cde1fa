//! Defines a `Network`: a validated `DirectedModel` read from a document, together with the
//! per-state metadata of its nodes.

use crate::assembler::ModelAssembler;
use crate::config::{Config, NodeOrder};
use crate::cpt::CptBuilder;
use crate::metadata::{self, IntervalMap, PointValueMap};
use crate::model::directed::DirectedModel;
use crate::model::ModelError;
use crate::reader;
use crate::record::NodeRecord;
use crate::registry::StateRegistry;
use crate::util::{Result, XdslError};
use crate::variable::StateList;

use indexmap::IndexMap;
use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};

use std::path::Path;

#[derive(Debug)]
pub struct Network {

    /// The validated model
    model: DirectedModel,

    /// The point values of every node that declares them
    point_values: IndexMap<String, PointValueMap>,

    /// The intervals of every node that declares them
    intervals: IndexMap<String, IntervalMap>

}

impl Network {

    /// Load the network described by the XDSL document at `path`.
    ///
    /// # Errors
    /// * `XdslError::FileNotFound` if there is no document at `path`
    /// * any error of `reader::read_file` or `Network::from_records`
    pub fn load_file<P: AsRef<Path>>(path: P, config: &Config) -> Result<Network> {
        Network::from_records(reader::read_file(path)?, config)
    }

    /// Load the network described by the XDSL document `text`.
    pub fn load_str(text: &str, config: &Config) -> Result<Network> {
        Network::from_records(reader::read_str(text)?, config)
    }

    /// Build a network from already-read node records.
    ///
    /// Each record's states are registered before its table is built, so with
    /// `NodeOrder::Document` every parent must come before the records that name it.
    ///
    /// # Errors
    /// The first error encountered; no part of the network is returned.
    pub fn from_records(records: Vec<NodeRecord>, config: &Config) -> Result<Network> {
        let records = match config.order {
            NodeOrder::Document => records,
            NodeOrder::Topological => topological(records)?
        };

        let mut registry = StateRegistry::new();
        let mut tables = Vec::with_capacity(records.len());
        let mut point_values = IndexMap::new();
        let mut intervals = IndexMap::new();

        for record in records.iter() {
            tracing::debug!(node = %record.id, "creating conditional table");

            let states = StateList::new(&record.id, record.states.clone())?;

            if let Some(ref values) = record.point_values {
                point_values.insert(record.id.clone(), metadata::point_values(&record.id, &states, values)?);
            }

            if let Some(ref bounds) = record.intervals {
                intervals.insert(record.id.clone(), metadata::intervals(&record.id, &states, bounds)?);
            }

            registry.register(&record.id, states)?;
            tables.push(CptBuilder::new(&registry).build(record)?);
        }

        let model = ModelAssembler::new(config).assemble(&records, tables)?;

        Ok(Network { model, point_values, intervals })
    }

    pub fn model(&self) -> &DirectedModel {
        &self.model
    }

    /// The point values of `node`, if it declared any
    pub fn point_values(&self, node: &str) -> Option<&PointValueMap> {
        self.point_values.get(node)
    }

    /// The intervals of `node`, if it declared any
    pub fn intervals(&self, node: &str) -> Option<&IntervalMap> {
        self.intervals.get(node)
    }

    pub fn all_point_values(&self) -> &IndexMap<String, PointValueMap> {
        &self.point_values
    }

    pub fn all_intervals(&self) -> &IndexMap<String, IntervalMap> {
        &self.intervals
    }

    /// Split the network into the model and its point value and interval maps
    pub fn into_parts(self) -> (DirectedModel, IndexMap<String, PointValueMap>, IndexMap<String, IntervalMap>) {
        (self.model, self.point_values, self.intervals)
    }
}


/// Reorder `records` so that every parent precedes the records that name it.
fn topological(records: Vec<NodeRecord>) -> Result<Vec<NodeRecord>> {
    let order: Vec<usize> = {
        // node weights are positions in `records`
        let mut graph: DiGraph<usize, ()> = DiGraph::new();
        let mut index: IndexMap<&str, NodeIndex> = IndexMap::new();

        for (i, record) in records.iter().enumerate() {
            if index.contains_key(record.id.as_str()) {
                return Err(XdslError::DuplicateNode(record.id.clone()));
            }
            index.insert(record.id.as_str(), graph.add_node(i));
        }

        for record in records.iter() {
            let child = index[record.id.as_str()];
            for parent in record.parents.iter() {
                let &p = index.get(parent.as_str()).ok_or_else(|| XdslError::UnknownNode {
                    node: record.id.clone(),
                    name: parent.clone()
                })?;
                graph.update_edge(p, child, ());
            }
        }

        let sorted = toposort(&graph, None).map_err(|c| {
            ModelError::Cycle(records[graph[c.node_id()]].id.clone())
        })?;

        sorted.into_iter().map(|idx| graph[idx]).collect()
    };

    let mut slots: Vec<Option<NodeRecord>> = records.into_iter().map(Some).collect();
    Ok(order.into_iter().filter_map(|i| slots[i].take()).collect())
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Model;

    use test_log::test;

    fn scenario() -> Vec<NodeRecord> {
        vec![
            NodeRecord::new("A", &["a0", "a1"], vec![0.6, 0.4]),
            NodeRecord::new("B", &["b0", "b1"], vec![0.7, 0.3]),
            NodeRecord::new("C", &["c0", "c1"], vec![0.9, 0.1, 0.5, 0.5, 0.2, 0.8, 0.1, 0.9])
                .with_parents(&["A", "B"]),
        ]
    }

    #[test]
    fn from_records() {
        let network = Network::from_records(scenario(), &Config::default()).unwrap();
        let model = network.model();

        assert_eq!(3, model.num_variables());
        assert_eq!(Some(vec!["A", "B"]), model.parents("C"));

        let c = model.cpd("C").unwrap();
        let idx = [0, 0, 1];
        assert_eq!(0.5, c.values()[&idx[..]]);
        assert!(network.all_point_values().is_empty());
        assert!(network.all_intervals().is_empty());
    }

    #[test]
    fn forward_reference() {
        let mut records = scenario();
        records.swap(0, 2);

        match Network::from_records(records, &Config::default()) {
            Err(XdslError::UnknownNode { node, name }) => {
                assert_eq!("C", node);
                assert_eq!("A", name);
            },
            other => panic!("expected an unknown node, got {:?}", other)
        };
    }

    #[test]
    fn topological_order() {
        let mut records = scenario();
        records.reverse();

        let config = Config::new().with_order(NodeOrder::Topological);
        let network = Network::from_records(records, &config).unwrap();

        let order = network.model().topological_order();
        assert_eq!("C", order[2]);
    }

    #[test]
    fn topological_unknown_parent() {
        let records = vec![
            NodeRecord::new("C", &["c0", "c1"], vec![0.5; 4]).with_parents(&["Z"]),
        ];

        let config = Config::new().with_order(NodeOrder::Topological);
        match Network::from_records(records, &config) {
            Err(XdslError::UnknownNode { node, name }) => {
                assert_eq!("C", node);
                assert_eq!("Z", name);
            },
            other => panic!("expected an unknown node, got {:?}", other)
        };
    }

    #[test]
    fn topological_cycle() {
        let records = vec![
            NodeRecord::new("A", &["a0", "a1"], vec![0.5; 4]).with_parents(&["B"]),
            NodeRecord::new("B", &["b0", "b1"], vec![0.5; 4]).with_parents(&["A"]),
        ];

        let config = Config::new().with_order(NodeOrder::Topological);
        match Network::from_records(records, &config) {
            Err(XdslError::ModelValidation(ModelError::Cycle(_))) => (),
            other => panic!("expected a cycle, got {:?}", other)
        };
    }

    #[test]
    fn duplicate_node() {
        let records = vec![
            NodeRecord::new("A", &["a0", "a1"], vec![0.6, 0.4]),
            NodeRecord::new("A", &["a0", "a1"], vec![0.6, 0.4]),
        ];

        match Network::from_records(records, &Config::default()) {
            Err(XdslError::DuplicateNode(name)) => assert_eq!("A", name),
            other => panic!("expected a duplicate node, got {:?}", other)
        };
    }

    #[test]
    fn metadata() {
        let records = vec![
            NodeRecord::new("T", &["cold", "warm"], vec![0.4, 0.6])
                .with_point_values(vec![5.0, 25.0])
                .with_intervals(vec![-10.0, 15.0, 40.0]),
        ];

        let network = Network::from_records(records, &Config::default()).unwrap();

        assert_eq!(Some(&25.0), network.point_values("T").unwrap().get("warm"));
        assert_eq!(Some(&(-10.0, 15.0)), network.intervals("T").unwrap().get("cold"));

        let (model, pv, iv) = network.into_parts();
        assert_eq!(1, model.num_variables());
        assert_eq!(1, pv.len());
        assert_eq!(1, iv.len());
    }

    #[test]
    fn interval_length() {
        let records = vec![
            NodeRecord::new("T", &["cold", "warm"], vec![0.4, 0.6]).with_intervals(vec![-10.0, 15.0]),
        ];

        match Network::from_records(records, &Config::default()) {
            Err(XdslError::IntervalLength { node, expected, actual }) => {
                assert_eq!("T", node);
                assert_eq!(3, expected);
                assert_eq!(2, actual);
            },
            other => panic!("expected an interval length error, got {:?}", other)
        };
    }
}

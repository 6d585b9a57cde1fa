//! Assembles the built tables of a document into a validated `DirectedModel`.

use crate::config::Config;
use crate::factor::ConditionalTable;
use crate::model::directed::{DirectedModel, DirectedModelBuilder};
use crate::model::Model;
use crate::record::NodeRecord;
use crate::util::Result;

/// Collect one ```(parent, child)``` edge per declared parent of every record, in record order
pub fn edges(records: &[NodeRecord]) -> Vec<(String, String)> {
    records.iter()
           .flat_map(|r| r.parents.iter().map(move |p| (p.clone(), r.id.clone())))
           .collect()
}

pub struct ModelAssembler {
    tolerance: f64
}

impl ModelAssembler {

    pub fn new(config: &Config) -> Self {
        ModelAssembler { tolerance: config.tolerance }
    }

    /// Build the graph of `records`, attach `tables` and validate the result.
    ///
    /// Every record becomes a node, whether or not it takes part in an edge.
    ///
    /// # Errors
    /// * `XdslError::ModelValidation` wrapping the first problem the model check finds
    pub fn assemble(&self, records: &[NodeRecord], tables: Vec<ConditionalTable>) -> Result<DirectedModel> {
        let edges = edges(records);

        let model = DirectedModelBuilder::new(&edges)
                        .with_nodes(records.iter().map(|r| r.id.as_str()))
                        .with_tolerance(self.tolerance)
                        .with_cpds(tables)
                        .check_model()?;

        tracing::info!(nodes = model.num_variables(), edges = model.num_edges(), "assembled model");

        Ok(model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpt::CptBuilder;
    use crate::model::ModelError;
    use crate::registry::StateRegistry;
    use crate::util::XdslError;
    use crate::variable::StateList;

    use test_log::test;

    fn build_all(records: &[NodeRecord]) -> Vec<ConditionalTable> {
        let mut reg = StateRegistry::new();
        records.iter()
               .map(|r| {
                   reg.register(&r.id, StateList::new(&r.id, r.states.clone()).unwrap()).unwrap();
                   CptBuilder::new(&reg).build(r).unwrap()
               })
               .collect()
    }

    #[test]
    fn edge_direction() {
        let records = vec![
            NodeRecord::new("A", &["a0", "a1"], vec![0.6, 0.4]),
            NodeRecord::new("B", &["b0", "b1"], vec![0.7, 0.3]),
            NodeRecord::new("C", &["c0", "c1"], vec![0.5; 8]).with_parents(&["A", "B"]),
        ];

        let expected = vec![
            (String::from("A"), String::from("C")),
            (String::from("B"), String::from("C"))
        ];
        assert_eq!(expected, edges(&records));
    }

    #[test]
    fn assemble() {
        let records = vec![
            NodeRecord::new("A", &["a0", "a1"], vec![0.6, 0.4]),
            NodeRecord::new("B", &["b0", "b1"], vec![0.7, 0.3]),
            NodeRecord::new("C", &["c0", "c1"], vec![0.9, 0.1, 0.5, 0.5, 0.2, 0.8, 0.1, 0.9])
                .with_parents(&["A", "B"]),
            NodeRecord::new("D", &["d0", "d1"], vec![0.5, 0.5]),
        ];
        let tables = build_all(&records);

        let model = ModelAssembler::new(&Config::default()).assemble(&records, tables).unwrap();

        assert_eq!(4, model.num_variables());
        assert_eq!(2, model.num_edges());
        assert!(model.cpd("D").is_some());

        let mut edges = model.edges();
        edges.sort();
        assert_eq!(vec![("A", "C"), ("B", "C")], edges);
    }

    #[test]
    fn not_normalized() {
        let records = vec![
            NodeRecord::new("A", &["a0", "a1"], vec![0.6, 0.4]),
            NodeRecord::new("B", &["b0", "b1"], vec![0.7, 0.7, 0.5, 0.5]).with_parents(&["A"]),
        ];
        let tables = build_all(&records);

        match ModelAssembler::new(&Config::default()).assemble(&records, tables) {
            Err(XdslError::ModelValidation(ModelError::NotNormalized { node, .. })) => assert_eq!("B", node),
            other => panic!("expected a validation error, got {:?}", other)
        };
    }
}

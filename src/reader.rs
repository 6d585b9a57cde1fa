//! Reads the nodes of a GeNIe `.xdsl` document into `NodeRecord`s.
//!
//! Only chance nodes (`<cpt>`) are read. Every other node kind under `<nodes>` is skipped with a
//! warning; a chance node that names one of them as a parent will fail to build.

use crate::record::NodeRecord;
use crate::util::{Result, XdslError};

use roxmltree::{Document, Node};

use std::fs;
use std::io;
use std::path::Path;

/// Read the `NodeRecord`s of the document at `path`, in document order.
///
/// # Errors
/// * `XdslError::FileNotFound` if there is no file at `path`
/// * `XdslError::Io` if the file can not be read
/// * any error of `read_str`
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<Vec<NodeRecord>> {
    let path = path.as_ref();

    let text = fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => XdslError::FileNotFound(path.to_path_buf()),
        _ => XdslError::Io { path: path.to_path_buf(), source: e }
    })?;

    read_str(&text)
}

/// Read the `NodeRecord`s of an XDSL document, in document order.
///
/// # Errors
/// * `XdslError::Xml` if `text` is not well-formed XML
/// * `XdslError::MissingElement` if there is no `<nodes>` element, or a `<cpt>` lacks its `id`,
///   a state id or its `<probabilities>`
/// * `XdslError::InvalidNumber` if a numeric list holds something other than numbers
pub fn read_str(text: &str) -> Result<Vec<NodeRecord>> {
    let doc = Document::parse(text)?;

    let nodes = doc.descendants()
                   .find(|n| n.has_tag_name("nodes"))
                   .ok_or_else(|| XdslError::MissingElement {
                       node: String::from("<document>"),
                       element: "nodes"
                   })?;

    let mut records = Vec::new();
    for node in nodes.children().filter(|n| n.is_element()) {
        if node.has_tag_name("cpt") {
            records.push(read_cpt(node)?);
        } else {
            tracing::warn!(
                kind = node.tag_name().name(),
                id = node.attribute("id").unwrap_or(""),
                "skipping unsupported node"
            );
        }
    }

    Ok(records)
}

fn read_cpt(node: Node) -> Result<NodeRecord> {
    let id = node.attribute("id")
                 .ok_or_else(|| XdslError::MissingElement {
                     node: String::from("<cpt>"),
                     element: "id"
                 })?
                 .to_string();

    let states = node.children()
                     .filter(|c| c.has_tag_name("state"))
                     .map(|c| {
                         c.attribute("id").map(|s| s.to_string()).ok_or_else(|| XdslError::MissingElement {
                             node: id.clone(),
                             element: "state id"
                         })
                     })
                     .collect::<Result<Vec<String>>>()?;

    let parents = child_text(node, "parents").map(|t| t.split_whitespace().map(|p| p.to_string()).collect::<Vec<String>>())
                                             .unwrap_or_default();

    let probabilities = child_text(node, "probabilities").ok_or_else(|| XdslError::MissingElement {
        node: id.clone(),
        element: "probabilities"
    })?;
    let probabilities = numbers(&id, &probabilities)?;

    let point_values = child_text(node, "pointvalues").map(|t| numbers(&id, &t)).transpose()?;
    let intervals = child_text(node, "intervals").map(|t| numbers(&id, &t)).transpose()?;

    Ok(NodeRecord { id, states, parents, probabilities, point_values, intervals })
}

/// All text under the first child element named `name`, if it has any. Comments are skipped and
/// CDATA sections are included.
fn child_text(node: Node, name: &str) -> Option<String> {
    let text: String = node.children()
                           .find(|c| c.has_tag_name(name))?
                           .descendants()
                           .filter(|d| d.is_text())
                           .filter_map(|d| d.text())
                           .collect::<Vec<&str>>()
                           .join(" ");

    if text.trim().is_empty() { None } else { Some(text) }
}

/// Parse a whitespace-delimited list of numbers
fn numbers(node: &str, text: &str) -> Result<Vec<f64>> {
    text.split_whitespace()
        .map(|v| v.parse::<f64>().map_err(|_| XdslError::InvalidNumber {
            node: node.to_string(),
            value: v.to_string()
        }))
        .collect()
}

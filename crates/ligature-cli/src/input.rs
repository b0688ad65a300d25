//! The TOML graph document read by the CLI.
//!
//! ```toml
//! sheet = "sheet"
//!
//! [[cut]]
//! id = "c"
//!
//! [[vertex]]
//! id = "x"
//! area = "c"
//! constant = "socrates"
//!
//! [[predicate]]
//! id = "man"
//! relation = "Man"
//! arguments = ["x"]
//! area = "c"
//!
//! [names]
//! man = "is a man"
//! ```
//!
//! Tables without an `area` are placed on the sheet. Declaration order is
//! kept: cuts first, then vertices, then predicates.

use std::collections::BTreeMap;

use log::debug;
use serde::Deserialize;
use thiserror::Error;

use ligature::{
    LigatureError,
    graph::{DisplayNames, Graph, GraphBuilder},
    identifier::Id,
};

/// Errors in the input document itself; graph-level problems surface later
/// as [`LigatureError::GraphInvalid`].
#[derive(Debug, Error)]
pub enum InputError {
    #[error("Failed to parse graph document: {0}")]
    Parse(String),

    #[error("display name given for undeclared element `{0}`")]
    UnknownName(String),
}

impl From<InputError> for LigatureError {
    fn from(err: InputError) -> Self {
        LigatureError::Input(err.to_string())
    }
}

fn default_sheet() -> String {
    "sheet".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GraphDocument {
    #[serde(default = "default_sheet")]
    sheet: String,

    #[serde(default, rename = "cut")]
    cuts: Vec<CutEntry>,

    #[serde(default, rename = "vertex")]
    vertices: Vec<VertexEntry>,

    #[serde(default, rename = "predicate")]
    predicates: Vec<PredicateEntry>,

    #[serde(default)]
    names: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CutEntry {
    id: String,
    area: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct VertexEntry {
    id: String,
    area: Option<String>,
    constant: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PredicateEntry {
    id: String,
    relation: String,
    #[serde(default)]
    arguments: Vec<String>,
    area: Option<String>,
}

impl GraphDocument {
    /// Parses a document from TOML source.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::Parse`] for malformed TOML or unknown keys.
    pub fn parse(source: &str) -> Result<Self, InputError> {
        toml::from_str(source).map_err(|e| InputError::Parse(e.to_string()))
    }

    /// Builds the graph, validated, along with its display names.
    ///
    /// # Errors
    ///
    /// Returns [`LigatureError::GraphInvalid`] when the declared structure
    /// breaks a graph invariant, and [`LigatureError::Input`] for a name
    /// without an element.
    pub fn into_graph(self) -> Result<(Graph, DisplayNames), LigatureError> {
        let sheet = Id::new(&self.sheet);
        let area = |area: &Option<String>| area.as_deref().map_or(sheet, Id::new);

        let mut builder = GraphBuilder::new(sheet);
        let mut declared = vec![sheet];

        for cut in &self.cuts {
            let id = Id::new(&cut.id);
            builder.add_cut(id).place(area(&cut.area), id);
            declared.push(id);
        }
        for vertex in &self.vertices {
            let id = Id::new(&vertex.id);
            builder
                .add_vertex(id, vertex.constant.clone())
                .place(area(&vertex.area), id);
            declared.push(id);
        }
        for predicate in &self.predicates {
            let id = Id::new(&predicate.id);
            let arguments = predicate.arguments.iter().map(|a| Id::new(a)).collect();
            builder
                .add_predicate(id, predicate.relation.clone(), arguments)
                .place(area(&predicate.area), id);
            declared.push(id);
        }

        let mut names = DisplayNames::new();
        for (element, name) in self.names {
            let id = Id::new(&element);
            if !declared.contains(&id) {
                return Err(InputError::UnknownName(element).into());
            }
            names.insert(id, name);
        }

        let graph = builder.build()?;
        debug!(
            cuts = self.cuts.len(),
            vertices = self.vertices.len(),
            predicates = self.predicates.len();
            "Graph document loaded"
        );
        Ok((graph, names))
    }
}

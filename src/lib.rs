//! rdfgraph
//!
//! In-memory RDF graphs with the two operations that need real search:
//!
//! - Graph equality up to blank node renaming ([`rdf::are_isomorphic`], also
//!   available as `==` on [`rdf::Graph`])
//! - Basic graph pattern matching ([`query::evaluate`]), returning the
//!   triples that take part in at least one solution
//!
//! Graphs are immutable snapshots for both operations, so they can be shared
//! freely between threads for reading.
//!
//! ## Example Usage
//!
//! ```rust
//! use rdfgraph::{NTriplesParser, NamedNode, TriplePattern, Variable};
//!
//! let graph = NTriplesParser::parse_graph(r#"
//!     <http://example.org/w1> <http://example.org/hasMainTitle> "Le Cosmicomiche" .
//!     <http://example.org/p1> <http://example.org/isPublicationOf> <http://example.org/w1> .
//!     <http://example.org/p1> <http://example.org/hasMainTitle> "The Complete Cosmicomics" .
//! "#).unwrap();
//!
//! let publication = TriplePattern::new(
//!     Variable::new("p").unwrap(),
//!     NamedNode::new("http://example.org/isPublicationOf").unwrap(),
//!     Variable::new("w").unwrap(),
//! );
//! let matched = graph.matching(&[publication]);
//! assert_eq!(matched.len(), 1);
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod query;
pub mod rdf;

// Re-export main types for convenience
pub use rdf::{
    are_isomorphic, BlankNode, Graph, Literal, NTriplesParser, NTriplesSerializer, NamedNode,
    ParseError, RdfError, RdfObject, RdfPredicate, RdfResult, RdfSubject, RdfTerm, TermPattern,
    Triple, TriplePattern, Variable,
};

pub use query::{evaluate, evaluate_with, group_by_variable, MatchConfig, PatternOrder};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}

//! RDF data model
//!
//! This module implements the in-memory RDF graph:
//! - RDF terms (IRIs, literals, blank nodes) and query variables
//! - Triples and triple patterns, with position rules enforced by type
//! - Duplicate-free graphs compared by blank node isomorphism
//! - An N-Triples adapter for reading and writing graphs
//!
//! # Example
//!
//! ```rust
//! use rdfgraph::rdf::{BlankNode, Graph, Literal, RdfPredicate, Triple};
//!
//! let name = RdfPredicate::new("http://xmlns.com/foaf/0.1/name").unwrap();
//!
//! let a = Graph::from_triples(vec![Triple::new(
//!     BlankNode::from_str("alice").unwrap().into(),
//!     name.clone(),
//!     Literal::new_simple_literal("Alice").into(),
//! )]);
//! let b = Graph::from_triples(vec![Triple::new(
//!     BlankNode::from_str("x").unwrap().into(),
//!     name,
//!     Literal::new_simple_literal("Alice").into(),
//! )]);
//!
//! // Blank node labels are local to each graph
//! assert_eq!(a, b);
//! ```

mod graph;
mod isomorphism;
mod serialization;
mod types;

pub use types::{
    BlankNode, Literal, NamedNode, RdfError, RdfObject, RdfPredicate, RdfResult, RdfSubject,
    RdfTerm, TermPattern, Triple, TriplePattern, Variable,
};

pub use graph::Graph;

pub use isomorphism::are_isomorphic;

pub use serialization::{
    NTriplesParser, NTriplesSerializer, ParseError, ParseResult, SerializeError, SerializeResult,
};

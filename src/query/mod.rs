//! Basic graph pattern queries
//!
//! A query is a list of triple patterns joined by shared variables. Patterns
//! are first split into independent groups ([`group_by_variable`]), then each
//! group is joined against the graph ([`evaluate`]). The answer is the set of
//! graph triples that take part in at least one solution.
//!
//! # Example
//!
//! ```rust
//! use rdfgraph::query::evaluate;
//! use rdfgraph::rdf::{Graph, Literal, NamedNode, Triple, TriplePattern, Variable};
//!
//! let title = NamedNode::new("http://example.org/hasMainTitle").unwrap();
//! let graph = Graph::from_triples(vec![Triple::new(
//!     NamedNode::new("http://example.org/w1").unwrap().into(),
//!     title.clone().into(),
//!     Literal::new_simple_literal("Le Cosmicomiche").into(),
//! )]);
//!
//! let pattern = TriplePattern::new(
//!     Variable::new("work").unwrap(),
//!     title,
//!     Variable::new("title").unwrap(),
//! );
//! assert_eq!(evaluate(&graph, &[pattern]).len(), 1);
//! ```

pub mod grouper;
pub mod matcher;

pub use grouper::{group_by_variable, group_indices};
pub use matcher::{evaluate, evaluate_with, MatchConfig, PatternOrder};

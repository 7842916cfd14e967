//! RDF serialization
//!
//! The graph core never parses or prints documents itself. This module is the
//! adapter used by callers, the demo binary and tests to move between
//! N-Triples text and [`Triple`](crate::rdf::Triple) values.

mod ntriples;

pub use ntriples::{NTriplesParser, NTriplesSerializer};

use crate::rdf::RdfError;
use thiserror::Error;

/// Parse errors
#[derive(Error, Debug)]
pub enum ParseError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Syntax error reported by the N-Triples reader
    #[error("Syntax error: {0}")]
    Syntax(#[from] rio_turtle::TurtleError),

    /// Well-formed syntax holding an invalid term
    #[error("Invalid term: {0}")]
    Term(#[from] RdfError),

    /// Construct outside plain RDF triples
    #[error("Unsupported: {0}")]
    Unsupported(String),
}

pub type ParseResult<T> = Result<T, ParseError>;

/// Serialization errors
#[derive(Error, Debug)]
pub enum SerializeError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),
}

pub type SerializeResult<T> = Result<T, SerializeError>;

//! In-memory RDF graph
//!
//! A [`Graph`] is a duplicate-free set of triples. Triples keep their
//! insertion order so iteration and serialization are deterministic, but the
//! order carries no meaning: two graphs are equal when they are isomorphic.

use super::isomorphism::are_isomorphic;
use super::types::{BlankNode, Triple, TriplePattern};
use crate::query::matcher::{self, MatchConfig};
use indexmap::IndexSet;
use rustc_hash::FxHashSet;
use std::fmt;

/// Set of RDF triples
#[derive(Clone, Default)]
pub struct Graph {
    triples: IndexSet<Triple>,
}

impl Graph {
    /// Create a new empty graph
    pub fn new() -> Self {
        Self {
            triples: IndexSet::new(),
        }
    }

    /// Build a graph from a triple sequence, dropping duplicates
    pub fn from_triples(triples: impl IntoIterator<Item = Triple>) -> Self {
        Self {
            triples: triples.into_iter().collect(),
        }
    }

    /// Insert a triple. Returns false if it was already present.
    pub fn insert(&mut self, triple: Triple) -> bool {
        self.triples.insert(triple)
    }

    /// Remove a triple. Returns false if it was not present.
    pub fn remove(&mut self, triple: &Triple) -> bool {
        self.triples.shift_remove(triple)
    }

    /// Check if a triple exists in the graph
    pub fn contains(&self, triple: &Triple) -> bool {
        self.triples.contains(triple)
    }

    /// Get the number of triples
    pub fn len(&self) -> usize {
        self.triples.len()
    }

    /// Check if the graph is empty
    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    /// Get an iterator over all triples, in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Triple> {
        self.triples.iter()
    }

    /// Triple at a position in insertion order
    pub(crate) fn get_index(&self, index: usize) -> Option<&Triple> {
        self.triples.get_index(index)
    }

    /// Distinct blank nodes, in order of first appearance
    pub fn blank_nodes(&self) -> Vec<&BlankNode> {
        let mut seen = FxHashSet::default();
        let mut nodes = Vec::new();
        for triple in &self.triples {
            let candidates = [triple.subject.as_blank_node(), triple.object.as_blank_node()];
            for node in candidates.into_iter().flatten() {
                if seen.insert(node) {
                    nodes.push(node);
                }
            }
        }
        nodes
    }

    /// Check whether the graphs are equal up to a renaming of blank nodes
    pub fn is_isomorphic(&self, other: &Graph) -> bool {
        are_isomorphic(self, other)
    }

    /// Triples taking part in at least one solution of the patterns
    pub fn matching(&self, patterns: &[TriplePattern]) -> Graph {
        matcher::evaluate(self, patterns)
    }

    /// Same as [`Graph::matching`] with explicit evaluation settings
    pub fn matching_with(&self, patterns: &[TriplePattern], config: &MatchConfig) -> Graph {
        matcher::evaluate_with(self, patterns, config)
    }
}

impl PartialEq for Graph {
    fn eq(&self, other: &Self) -> bool {
        are_isomorphic(self, other)
    }
}

impl Eq for Graph {}

impl fmt::Debug for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.triples.iter().map(|t| t.to_string())).finish()
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for triple in &self.triples {
            writeln!(f, "{}", triple)?;
        }
        Ok(())
    }
}

impl FromIterator<Triple> for Graph {
    fn from_iter<I: IntoIterator<Item = Triple>>(iter: I) -> Self {
        Self::from_triples(iter)
    }
}

impl Extend<Triple> for Graph {
    fn extend<I: IntoIterator<Item = Triple>>(&mut self, iter: I) {
        self.triples.extend(iter);
    }
}

impl<'a> IntoIterator for &'a Graph {
    type Item = &'a Triple;
    type IntoIter = indexmap::set::Iter<'a, Triple>;

    fn into_iter(self) -> Self::IntoIter {
        self.triples.iter()
    }
}

impl IntoIterator for Graph {
    type Item = Triple;
    type IntoIter = indexmap::set::IntoIter<Triple>;

    fn into_iter(self) -> Self::IntoIter {
        self.triples.into_iter()
    }
}

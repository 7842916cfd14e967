//! RDF type definitions
//!
//! This module provides wrapper types around the oxrdf library for RDF primitives,
//! plus the pattern-side vocabulary (variables and triple patterns) used by the
//! query module.

use oxrdf::{
    BlankNode as OxBlankNode,
    Literal as OxLiteral,
    NamedNode as OxNamedNode,
    Variable as OxVariable,
};
use std::fmt;
use thiserror::Error;

/// RDF errors
#[derive(Error, Debug)]
pub enum RdfError {
    /// Invalid IRI
    #[error("Invalid IRI: {0}")]
    InvalidIri(String),

    /// Invalid blank node
    #[error("Invalid blank node: {0}")]
    InvalidBlankNode(String),

    /// Invalid literal
    #[error("Invalid literal: {0}")]
    InvalidLiteral(String),

    /// Invalid variable name
    #[error("Invalid variable: {0}")]
    InvalidVariable(String),
}

pub type RdfResult<T> = Result<T, RdfError>;

/// Named node (IRI)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NamedNode(OxNamedNode);

impl NamedNode {
    /// Create a new named node from an absolute IRI string
    ///
    /// Relative references such as `h1` are rejected: oxrdf validates IRIs
    /// the way N-Triples requires them, which means absolute only.
    pub fn new(iri: &str) -> RdfResult<Self> {
        if iri.is_empty() {
            return Err(RdfError::InvalidIri("empty IRI".to_string()));
        }
        OxNamedNode::new(iri)
            .map(Self)
            .map_err(|e| RdfError::InvalidIri(format!("{}: {}", iri, e)))
    }

    /// Get the IRI string
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for NamedNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.as_str())
    }
}

/// Blank node (anonymous node)
///
/// The identifier only addresses the node inside the graph it was read into.
/// Comparing blank nodes of two different graphs says nothing about whether
/// they denote the same thing; use graph isomorphism for that.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BlankNode(OxBlankNode);

impl BlankNode {
    /// Create a new blank node with a unique identifier
    pub fn new() -> Self {
        Self(OxBlankNode::default())
    }

    /// Create a blank node from a string identifier
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> RdfResult<Self> {
        OxBlankNode::new(s)
            .map(Self)
            .map_err(|e| RdfError::InvalidBlankNode(format!("{}: {}", s, e)))
    }

    /// Get the blank node identifier
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Default for BlankNode {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BlankNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "_:{}", self.as_str())
    }
}

/// RDF literal value
///
/// A literal carries either nothing, a language tag, or a datatype IRI. A
/// literal typed `xsd:string` is stored exactly like a simple literal, so
/// `"o"` and `"o"^^xsd:string` compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Literal(OxLiteral);

impl Literal {
    /// Create a simple literal (plain string)
    pub fn new_simple_literal(value: impl Into<String>) -> Self {
        Self(OxLiteral::new_simple_literal(value))
    }

    /// Create a literal with language tag
    pub fn new_language_tagged_literal(
        value: impl Into<String>,
        language: impl Into<String>,
    ) -> RdfResult<Self> {
        OxLiteral::new_language_tagged_literal(value, language)
            .map(Self)
            .map_err(|e| RdfError::InvalidLiteral(e.to_string()))
    }

    /// Create a typed literal
    pub fn new_typed_literal(value: impl Into<String>, datatype: NamedNode) -> Self {
        Self(OxLiteral::new_typed_literal(value, datatype.0))
    }

    /// Get the lexical value
    pub fn value(&self) -> &str {
        self.0.value()
    }

    /// Get the language tag if present
    pub fn language(&self) -> Option<&str> {
        self.0.language()
    }

    /// Get the effective datatype (`xsd:string` for simple literals)
    pub fn datatype(&self) -> NamedNode {
        NamedNode(self.0.datatype().into_owned())
    }

    /// True for literals with neither language tag nor a non-string datatype
    pub fn is_simple(&self) -> bool {
        self.language().is_none() && self.0.datatype() == oxrdf::vocab::xsd::STRING
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // oxrdf already writes the N-Triples form with escapes, and omits
        // the datatype of xsd:string literals.
        write!(f, "{}", self.0)
    }
}

/// Query variable, only legal inside a [`TriplePattern`]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Variable(OxVariable);

impl Variable {
    /// Create a variable from its name (without the leading `?`)
    pub fn new(name: &str) -> RdfResult<Self> {
        OxVariable::new(name)
            .map(Self)
            .map_err(|e| RdfError::InvalidVariable(format!("{}: {}", name, e)))
    }

    /// Get the variable name
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "?{}", self.as_str())
    }
}

/// RDF subject (NamedNode or BlankNode)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RdfSubject {
    /// Named node (IRI)
    NamedNode(NamedNode),
    /// Blank node
    BlankNode(BlankNode),
}

impl RdfSubject {
    /// Check if this is a named node
    pub fn is_named_node(&self) -> bool {
        matches!(self, RdfSubject::NamedNode(_))
    }

    /// Check if this is a blank node
    pub fn is_blank_node(&self) -> bool {
        matches!(self, RdfSubject::BlankNode(_))
    }

    /// The blank node in this position, if any
    pub fn as_blank_node(&self) -> Option<&BlankNode> {
        match self {
            RdfSubject::BlankNode(b) => Some(b),
            RdfSubject::NamedNode(_) => None,
        }
    }
}

impl fmt::Display for RdfSubject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RdfSubject::NamedNode(n) => write!(f, "{}", n),
            RdfSubject::BlankNode(b) => write!(f, "{}", b),
        }
    }
}

impl From<NamedNode> for RdfSubject {
    fn from(node: NamedNode) -> Self {
        RdfSubject::NamedNode(node)
    }
}

impl From<BlankNode> for RdfSubject {
    fn from(node: BlankNode) -> Self {
        RdfSubject::BlankNode(node)
    }
}

/// RDF predicate (always a NamedNode)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RdfPredicate(NamedNode);

impl RdfPredicate {
    /// Create a new predicate from an IRI
    pub fn new(iri: &str) -> RdfResult<Self> {
        Ok(Self(NamedNode::new(iri)?))
    }

    /// Get the underlying named node
    pub fn as_named_node(&self) -> &NamedNode {
        &self.0
    }
}

impl fmt::Display for RdfPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<NamedNode> for RdfPredicate {
    fn from(node: NamedNode) -> Self {
        RdfPredicate(node)
    }
}

impl From<RdfPredicate> for NamedNode {
    fn from(pred: RdfPredicate) -> Self {
        pred.0
    }
}

/// RDF object (NamedNode, BlankNode, or Literal)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RdfObject {
    /// Named node (IRI)
    NamedNode(NamedNode),
    /// Blank node
    BlankNode(BlankNode),
    /// Literal value
    Literal(Literal),
}

impl RdfObject {
    /// Check if this is a named node
    pub fn is_named_node(&self) -> bool {
        matches!(self, RdfObject::NamedNode(_))
    }

    /// Check if this is a blank node
    pub fn is_blank_node(&self) -> bool {
        matches!(self, RdfObject::BlankNode(_))
    }

    /// Check if this is a literal
    pub fn is_literal(&self) -> bool {
        matches!(self, RdfObject::Literal(_))
    }

    /// The blank node in this position, if any
    pub fn as_blank_node(&self) -> Option<&BlankNode> {
        match self {
            RdfObject::BlankNode(b) => Some(b),
            _ => None,
        }
    }
}

impl fmt::Display for RdfObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RdfObject::NamedNode(n) => write!(f, "{}", n),
            RdfObject::BlankNode(b) => write!(f, "{}", b),
            RdfObject::Literal(l) => write!(f, "{}", l),
        }
    }
}

impl From<NamedNode> for RdfObject {
    fn from(node: NamedNode) -> Self {
        RdfObject::NamedNode(node)
    }
}

impl From<BlankNode> for RdfObject {
    fn from(node: BlankNode) -> Self {
        RdfObject::BlankNode(node)
    }
}

impl From<Literal> for RdfObject {
    fn from(lit: Literal) -> Self {
        RdfObject::Literal(lit)
    }
}

/// RDF term (any RDF value that can sit in a stored triple)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RdfTerm {
    /// Named node (IRI)
    NamedNode(NamedNode),
    /// Blank node
    BlankNode(BlankNode),
    /// Literal value
    Literal(Literal),
}

impl fmt::Display for RdfTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RdfTerm::NamedNode(n) => write!(f, "{}", n),
            RdfTerm::BlankNode(b) => write!(f, "{}", b),
            RdfTerm::Literal(l) => write!(f, "{}", l),
        }
    }
}

impl From<RdfSubject> for RdfTerm {
    fn from(subject: RdfSubject) -> Self {
        match subject {
            RdfSubject::NamedNode(n) => RdfTerm::NamedNode(n),
            RdfSubject::BlankNode(b) => RdfTerm::BlankNode(b),
        }
    }
}

impl From<RdfPredicate> for RdfTerm {
    fn from(predicate: RdfPredicate) -> Self {
        RdfTerm::NamedNode(predicate.0)
    }
}

impl From<RdfObject> for RdfTerm {
    fn from(object: RdfObject) -> Self {
        match object {
            RdfObject::NamedNode(n) => RdfTerm::NamedNode(n),
            RdfObject::BlankNode(b) => RdfTerm::BlankNode(b),
            RdfObject::Literal(l) => RdfTerm::Literal(l),
        }
    }
}

impl PartialEq<RdfSubject> for RdfTerm {
    fn eq(&self, other: &RdfSubject) -> bool {
        match (self, other) {
            (RdfTerm::NamedNode(a), RdfSubject::NamedNode(b)) => a == b,
            (RdfTerm::BlankNode(a), RdfSubject::BlankNode(b)) => a == b,
            _ => false,
        }
    }
}

impl PartialEq<RdfPredicate> for RdfTerm {
    fn eq(&self, other: &RdfPredicate) -> bool {
        matches!(self, RdfTerm::NamedNode(n) if n == other.as_named_node())
    }
}

impl PartialEq<RdfObject> for RdfTerm {
    fn eq(&self, other: &RdfObject) -> bool {
        match (self, other) {
            (RdfTerm::NamedNode(a), RdfObject::NamedNode(b)) => a == b,
            (RdfTerm::BlankNode(a), RdfObject::BlankNode(b)) => a == b,
            (RdfTerm::Literal(a), RdfObject::Literal(b)) => a == b,
            _ => false,
        }
    }
}

/// RDF triple (subject-predicate-object)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Triple {
    /// Subject
    pub subject: RdfSubject,
    /// Predicate
    pub predicate: RdfPredicate,
    /// Object
    pub object: RdfObject,
}

impl Triple {
    /// Create a new triple
    pub fn new(subject: RdfSubject, predicate: RdfPredicate, object: RdfObject) -> Self {
        Self {
            subject,
            predicate,
            object,
        }
    }

    /// True when neither subject nor object is a blank node
    pub fn is_ground(&self) -> bool {
        !self.subject.is_blank_node() && !self.object.is_blank_node()
    }
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} .", self.subject, self.predicate, self.object)
    }
}

/// One position of a triple pattern: a concrete term or a variable
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TermPattern<T> {
    /// Concrete term, matched exactly
    Term(T),
    /// Variable, bound by matching
    Variable(Variable),
}

impl<T> TermPattern<T> {
    /// The variable in this position, if any
    pub fn as_variable(&self) -> Option<&Variable> {
        match self {
            TermPattern::Variable(v) => Some(v),
            TermPattern::Term(_) => None,
        }
    }

    /// Check if this position is a variable
    pub fn is_variable(&self) -> bool {
        matches!(self, TermPattern::Variable(_))
    }
}

impl<T: fmt::Display> fmt::Display for TermPattern<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TermPattern::Term(t) => write!(f, "{}", t),
            TermPattern::Variable(v) => write!(f, "{}", v),
        }
    }
}

impl<T> From<Variable> for TermPattern<T> {
    fn from(variable: Variable) -> Self {
        TermPattern::Variable(variable)
    }
}

impl From<RdfSubject> for TermPattern<RdfSubject> {
    fn from(subject: RdfSubject) -> Self {
        TermPattern::Term(subject)
    }
}

impl From<NamedNode> for TermPattern<RdfSubject> {
    fn from(node: NamedNode) -> Self {
        TermPattern::Term(node.into())
    }
}

impl From<BlankNode> for TermPattern<RdfSubject> {
    fn from(node: BlankNode) -> Self {
        TermPattern::Term(node.into())
    }
}

impl From<RdfPredicate> for TermPattern<RdfPredicate> {
    fn from(predicate: RdfPredicate) -> Self {
        TermPattern::Term(predicate)
    }
}

impl From<NamedNode> for TermPattern<RdfPredicate> {
    fn from(node: NamedNode) -> Self {
        TermPattern::Term(node.into())
    }
}

impl From<RdfObject> for TermPattern<RdfObject> {
    fn from(object: RdfObject) -> Self {
        TermPattern::Term(object)
    }
}

impl From<NamedNode> for TermPattern<RdfObject> {
    fn from(node: NamedNode) -> Self {
        TermPattern::Term(node.into())
    }
}

impl From<BlankNode> for TermPattern<RdfObject> {
    fn from(node: BlankNode) -> Self {
        TermPattern::Term(node.into())
    }
}

impl From<Literal> for TermPattern<RdfObject> {
    fn from(lit: Literal) -> Self {
        TermPattern::Term(lit.into())
    }
}

/// Triple pattern for queries
///
/// Each position holds either a term legal for that position or a variable.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TriplePattern {
    /// Subject
    pub subject: TermPattern<RdfSubject>,
    /// Predicate
    pub predicate: TermPattern<RdfPredicate>,
    /// Object
    pub object: TermPattern<RdfObject>,
}

impl TriplePattern {
    /// Create a new triple pattern
    pub fn new(
        subject: impl Into<TermPattern<RdfSubject>>,
        predicate: impl Into<TermPattern<RdfPredicate>>,
        object: impl Into<TermPattern<RdfObject>>,
    ) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
        }
    }

    /// Distinct variables in subject, predicate, object order
    pub fn variables(&self) -> Vec<&Variable> {
        let mut vars: Vec<&Variable> = Vec::with_capacity(3);
        let positions = [
            self.subject.as_variable(),
            self.predicate.as_variable(),
            self.object.as_variable(),
        ];
        for var in positions.into_iter().flatten() {
            if !vars.contains(&var) {
                vars.push(var);
            }
        }
        vars
    }

    /// True when the pattern contains no variable
    pub fn is_ground(&self) -> bool {
        !self.subject.is_variable() && !self.predicate.is_variable() && !self.object.is_variable()
    }
}

impl fmt::Display for TriplePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} .", self.subject, self.predicate, self.object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn var(name: &str) -> Variable {
        Variable::new(name).unwrap()
    }

    #[test]
    fn test_named_node() {
        let node = NamedNode::new("http://example.org/alice").unwrap();
        assert_eq!(node.as_str(), "http://example.org/alice");
        assert_eq!(node.to_string(), "<http://example.org/alice>");
    }

    #[test]
    fn test_named_node_rejects_empty_and_relative() {
        assert!(matches!(NamedNode::new(""), Err(RdfError::InvalidIri(_))));
        assert!(NamedNode::new("not an iri").is_err());
        assert!(RdfPredicate::new("").is_err());
    }

    #[test]
    fn test_blank_node() {
        let node1 = BlankNode::new();
        let node2 = BlankNode::new();
        assert_ne!(node1, node2);

        let labelled = BlankNode::from_str("c1").unwrap();
        assert_eq!(labelled.to_string(), "_:c1");
        assert_eq!(labelled, BlankNode::from_str("c1").unwrap());
    }

    #[test]
    fn test_literal() {
        let lit = Literal::new_simple_literal("Alice");
        assert_eq!(lit.value(), "Alice");
        assert!(lit.is_simple());
        assert_eq!(lit.to_string(), "\"Alice\"");

        let lit = Literal::new_language_tagged_literal("Alice", "en").unwrap();
        assert_eq!(lit.value(), "Alice");
        assert_eq!(lit.language(), Some("en"));
        assert_eq!(lit.to_string(), "\"Alice\"@en");
        assert!(!lit.is_simple());

        assert!(Literal::new_language_tagged_literal("Alice", "").is_err());
    }

    #[test]
    fn test_literal_string_datatype_normalization() {
        let xsd_string = NamedNode::new("http://www.w3.org/2001/XMLSchema#string").unwrap();
        let plain = Literal::new_simple_literal("o");
        let typed = Literal::new_typed_literal("o", xsd_string.clone());
        assert_eq!(plain, typed);
        assert_eq!(plain.datatype(), xsd_string);

        let year = NamedNode::new("http://www.w3.org/2001/XMLSchema#gYear").unwrap();
        assert_ne!(plain, Literal::new_typed_literal("o", year));
        assert_ne!(plain, Literal::new_language_tagged_literal("o", "en").unwrap());
        assert_ne!(plain, Literal::new_simple_literal("o2"));
    }

    #[test]
    fn test_variable() {
        let v = var("title");
        assert_eq!(v.as_str(), "title");
        assert_eq!(v.to_string(), "?title");
        assert!(Variable::new("").is_err());
    }

    #[test]
    fn test_triple() {
        let subject = NamedNode::new("http://example.org/alice").unwrap();
        let predicate = RdfPredicate::new("http://xmlns.com/foaf/0.1/name").unwrap();
        let object = Literal::new_simple_literal("Alice");

        let triple = Triple::new(subject.into(), predicate, object.into());

        assert!(triple.subject.is_named_node());
        assert!(triple.object.is_literal());
        assert!(triple.is_ground());
        assert_eq!(
            triple.to_string(),
            "<http://example.org/alice> <http://xmlns.com/foaf/0.1/name> \"Alice\" ."
        );

        let bnode = Triple::new(
            BlankNode::from_str("b").unwrap().into(),
            RdfPredicate::new("http://example.org/p").unwrap(),
            Literal::new_simple_literal("x").into(),
        );
        assert!(!bnode.is_ground());
    }

    #[test]
    fn test_term_cross_position_equality() {
        let node = NamedNode::new("http://example.org/w1").unwrap();
        let term = RdfTerm::NamedNode(node.clone());
        assert!(term == RdfSubject::from(node.clone()));
        assert!(term == RdfObject::from(node.clone()));
        assert!(term == RdfPredicate::from(node));

        let lit = RdfTerm::Literal(Literal::new_simple_literal("w1"));
        let subject = RdfSubject::from(NamedNode::new("http://example.org/w1").unwrap());
        assert!(lit != subject);
    }

    #[test]
    fn test_pattern_variables_and_ground() {
        let p = NamedNode::new("http://example.org/knows").unwrap();
        let pattern = TriplePattern::new(var("a"), p.clone(), var("a"));
        assert_eq!(pattern.variables(), vec![&var("a")]);
        assert!(!pattern.is_ground());

        let ground = TriplePattern::new(p.clone(), p.clone(), p);
        assert!(ground.variables().is_empty());
        assert!(ground.is_ground());
    }

    #[test]
    fn test_repeated_variable_listed_once() {
        let p = NamedNode::new("http://example.org/sameAs").unwrap();
        let pattern = TriplePattern::new(var("x"), p, var("x"));
        assert_eq!(pattern.variables(), vec![&var("x")]);
        assert_eq!(pattern.to_string(), "?x <http://example.org/sameAs> ?x .");
    }
}

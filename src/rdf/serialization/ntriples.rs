//! N-Triples format implementation

use super::{ParseError, ParseResult, SerializeError, SerializeResult};
use crate::rdf::{
    BlankNode, Graph, Literal, NamedNode, RdfObject, RdfPredicate, RdfSubject, Triple,
};
use rio_api::formatter::TriplesFormatter;
use rio_api::parser::TriplesParser;
use rio_turtle::{NTriplesFormatter, NTriplesParser as RioNTriplesParser};
use std::io::{BufReader, Cursor};
use tracing::debug;

/// N-Triples parser
pub struct NTriplesParser;

impl NTriplesParser {
    /// Parse an N-Triples document into triples, in document order
    pub fn parse(input: &str) -> ParseResult<Vec<Triple>> {
        let mut reader = BufReader::new(Cursor::new(input));
        let mut parser = RioNTriplesParser::new(&mut reader);

        let mut triples = Vec::new();
        parser.parse_all(&mut |t| -> Result<(), ParseError> {
            let subject = convert_subject(t.subject)?;
            let predicate = RdfPredicate::new(t.predicate.iri)?;
            let object = convert_object(t.object)?;
            triples.push(Triple::new(subject, predicate, object));
            Ok(())
        })?;

        debug!(triples = triples.len(), "parsed N-Triples document");
        Ok(triples)
    }

    /// Parse an N-Triples document into a graph, dropping duplicates
    pub fn parse_graph(input: &str) -> ParseResult<Graph> {
        Ok(Graph::from_triples(Self::parse(input)?))
    }
}

/// N-Triples serializer
pub struct NTriplesSerializer;

impl NTriplesSerializer {
    /// Serialize triples to an N-Triples string, one statement per line
    pub fn serialize<'a>(triples: impl IntoIterator<Item = &'a Triple>) -> SerializeResult<String> {
        let mut output = Vec::new();
        let mut formatter = NTriplesFormatter::new(&mut output);

        for triple in triples {
            let subject = match &triple.subject {
                RdfSubject::NamedNode(n) => {
                    rio_api::model::Subject::NamedNode(rio_api::model::NamedNode { iri: n.as_str() })
                }
                RdfSubject::BlankNode(b) => {
                    rio_api::model::Subject::BlankNode(rio_api::model::BlankNode { id: b.as_str() })
                }
            };

            let predicate = rio_api::model::NamedNode {
                iri: triple.predicate.as_named_node().as_str(),
            };

            let datatype;
            let object = match &triple.object {
                RdfObject::NamedNode(n) => {
                    rio_api::model::Term::NamedNode(rio_api::model::NamedNode { iri: n.as_str() })
                }
                RdfObject::BlankNode(b) => {
                    rio_api::model::Term::BlankNode(rio_api::model::BlankNode { id: b.as_str() })
                }
                RdfObject::Literal(l) => {
                    let literal = if let Some(language) = l.language() {
                        rio_api::model::Literal::LanguageTaggedString {
                            value: l.value(),
                            language,
                        }
                    } else if l.is_simple() {
                        rio_api::model::Literal::Simple { value: l.value() }
                    } else {
                        datatype = l.datatype();
                        rio_api::model::Literal::Typed {
                            value: l.value(),
                            datatype: rio_api::model::NamedNode {
                                iri: datatype.as_str(),
                            },
                        }
                    };
                    rio_api::model::Term::Literal(literal)
                }
            };

            formatter.format(&rio_api::model::Triple {
                subject,
                predicate,
                object,
            })?;
        }

        formatter.finish()?;
        String::from_utf8(output).map_err(|e| SerializeError::Serialize(e.to_string()))
    }

    /// Serialize a graph in its iteration order
    pub fn serialize_graph(graph: &Graph) -> SerializeResult<String> {
        Self::serialize(graph.iter())
    }
}

fn convert_subject(s: rio_api::model::Subject) -> ParseResult<RdfSubject> {
    match s {
        rio_api::model::Subject::NamedNode(n) => Ok(NamedNode::new(n.iri)?.into()),
        rio_api::model::Subject::BlankNode(b) => Ok(BlankNode::from_str(b.id)?.into()),
        #[allow(unreachable_patterns)]
        _ => Err(ParseError::Unsupported("quoted triple as subject".to_string())),
    }
}

fn convert_object(o: rio_api::model::Term) -> ParseResult<RdfObject> {
    match o {
        rio_api::model::Term::NamedNode(n) => Ok(NamedNode::new(n.iri)?.into()),
        rio_api::model::Term::BlankNode(b) => Ok(BlankNode::from_str(b.id)?.into()),
        rio_api::model::Term::Literal(l) => match l {
            rio_api::model::Literal::Simple { value } => {
                Ok(Literal::new_simple_literal(value).into())
            }
            rio_api::model::Literal::LanguageTaggedString { value, language } => {
                Ok(Literal::new_language_tagged_literal(value, language)?.into())
            }
            rio_api::model::Literal::Typed { value, datatype } => {
                Ok(Literal::new_typed_literal(value, NamedNode::new(datatype.iri)?).into())
            }
        },
        #[allow(unreachable_patterns)]
        _ => Err(ParseError::Unsupported("quoted triple as object".to_string())),
    }
}

use rdfgraph::{
    Graph, Literal, NTriplesParser, NTriplesSerializer, NamedNode, TriplePattern, Variable,
};

const CATALOGUE: &str = r#"
<http://example.org/w1> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://example.org/Work> .
<http://example.org/w1> <http://example.org/hasMainTitle> "Le Cosmicomiche" .
<http://example.org/w1> <http://example.org/hasContributor> _:c1 .
_:c1 <http://example.org/hasRole> <http://example.org/author> .
_:c1 <http://example.org/hasAgent> <http://example.org/a1> .
<http://example.org/a1> <http://example.org/hasName> "Italo Calvino" .
<http://example.org/p1> <http://example.org/isPublicationOf> <http://example.org/w1> .
<http://example.org/p1> <http://example.org/hasMainTitle> "The Complete Cosmicomics" .
<http://example.org/p1> <http://example.org/isPublishedBy> <http://example.org/c1> .
<http://example.org/c1> <http://example.org/hasName> "Penguin" .
"#;

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    println!("rdfgraph v{}", rdfgraph::version());
    println!("==========================================");
    println!();

    let catalogue = NTriplesParser::parse_graph(CATALOGUE)?;
    println!("Loaded {} triples", catalogue.len());

    demo_isomorphism(&catalogue)?;
    demo_pattern_matching(&catalogue)?;

    Ok(())
}

fn demo_isomorphism(catalogue: &Graph) -> anyhow::Result<()> {
    println!("\n=== Demo 1: Graph Equality ===");

    // Same statements, different blank node label
    let relabelled = NTriplesParser::parse_graph(&CATALOGUE.replace("_:c1", "_:contribution"))?;
    println!("✓ Relabelled blank node: equal = {}", catalogue == &relabelled);

    let retitled =
        NTriplesParser::parse_graph(&CATALOGUE.replace("Le Cosmicomiche", "Cosmicomics"))?;
    println!("✓ Changed title: equal = {}", catalogue == &retitled);

    Ok(())
}

fn demo_pattern_matching(catalogue: &Graph) -> anyhow::Result<()> {
    println!("\n=== Demo 2: Pattern Matching ===");

    let title = NamedNode::new("http://example.org/hasMainTitle")?;
    let patterns = vec![
        TriplePattern::new(
            Variable::new("w")?,
            title.clone(),
            Literal::new_simple_literal("Le Cosmicomiche"),
        ),
        TriplePattern::new(
            Variable::new("p")?,
            NamedNode::new("http://example.org/isPublicationOf")?,
            Variable::new("w")?,
        ),
        TriplePattern::new(Variable::new("p")?, title, Variable::new("pubTitle")?),
    ];
    for pattern in &patterns {
        println!("  {}", pattern);
    }

    let matched = catalogue.matching(&patterns);
    println!("\nMatched {} triples:", matched.len());
    print!("{}", NTriplesSerializer::serialize_graph(&matched)?);

    Ok(())
}

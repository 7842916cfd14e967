//! Basic graph pattern evaluation
//!
//! Patterns are split into groups connected by shared variables. Each group
//! is solved with a backtracking join over the graph; every triple used on a
//! path that satisfies all patterns of the group ends up in the result, and
//! the results of all groups are unioned.

use super::grouper::group_indices;
use crate::rdf::{Graph, RdfTerm, TermPattern, Triple, TriplePattern, Variable};
use rayon::prelude::*;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, trace};

/// Order in which the patterns of one group are joined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PatternOrder {
    /// Input order
    Given,
    /// Most constrained pattern first: concrete terms and variables bound by
    /// earlier patterns count as constraints. Ties keep input order.
    #[default]
    Selective,
}

/// Pattern evaluation settings
///
/// Neither setting changes the result, only how it is computed.
#[derive(Debug, Clone)]
pub struct MatchConfig {
    /// Join order inside a group
    pub order: PatternOrder,
    /// Evaluate independent groups on the rayon thread pool
    pub parallel: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            order: PatternOrder::Selective,
            parallel: false,
        }
    }
}

/// Variable assignments along one search path
#[derive(Debug, Clone, Default, PartialEq)]
struct Bindings {
    values: FxHashMap<Variable, RdfTerm>,
}

impl Bindings {
    fn get(&self, var: &Variable) -> Option<&RdfTerm> {
        self.values.get(var)
    }

    /// Bindings extended by matching `pattern` against `triple`, or None if
    /// the triple contradicts the pattern or the current assignments
    fn unify(&self, pattern: &TriplePattern, triple: &Triple) -> Option<Bindings> {
        let mut pending: Vec<(Variable, RdfTerm)> = Vec::new();
        if !self.bind(&pattern.subject, &triple.subject, &mut pending)
            || !self.bind(&pattern.predicate, &triple.predicate, &mut pending)
            || !self.bind(&pattern.object, &triple.object, &mut pending)
        {
            return None;
        }

        let mut next = self.clone();
        next.values.extend(pending);
        Some(next)
    }

    fn bind<T>(
        &self,
        pattern: &TermPattern<T>,
        value: &T,
        pending: &mut Vec<(Variable, RdfTerm)>,
    ) -> bool
    where
        T: PartialEq + Clone + Into<RdfTerm>,
        RdfTerm: PartialEq<T>,
    {
        match pattern {
            TermPattern::Term(term) => term == value,
            TermPattern::Variable(var) => {
                if let Some(bound) = self.get(var) {
                    return bound == value;
                }
                if let Some((_, bound)) = pending.iter().find(|(v, _)| v == var) {
                    return bound == value;
                }
                pending.push((var.clone(), value.clone().into()));
                true
            }
        }
    }
}

/// Backtracking join over one group of patterns
struct GroupEvaluator<'a> {
    graph: &'a Graph,
    patterns: Vec<&'a TriplePattern>,
}

impl<'a> GroupEvaluator<'a> {
    fn run(&self) -> FxHashSet<usize> {
        let mut found = FxHashSet::default();
        let mut path = Vec::with_capacity(self.patterns.len());
        self.solve(0, &Bindings::default(), &mut path, &mut found);
        found
    }

    fn solve(
        &self,
        depth: usize,
        bindings: &Bindings,
        path: &mut Vec<usize>,
        found: &mut FxHashSet<usize>,
    ) {
        let Some(pattern) = self.patterns.get(depth) else {
            trace!(triples = path.len(), "solution found");
            found.extend(path.iter().copied());
            return;
        };

        for (position, triple) in self.graph.iter().enumerate() {
            if let Some(next) = bindings.unify(pattern, triple) {
                path.push(position);
                self.solve(depth + 1, &next, path, found);
                path.pop();
            }
        }
    }
}

/// Arrange the patterns of a group in join order
fn order_patterns<'a>(
    patterns: Vec<&'a TriplePattern>,
    order: PatternOrder,
) -> Vec<&'a TriplePattern> {
    if order == PatternOrder::Given {
        return patterns;
    }

    let mut remaining = patterns;
    let mut ordered = Vec::with_capacity(remaining.len());
    let mut bound: FxHashSet<&Variable> = FxHashSet::default();

    while !remaining.is_empty() {
        let constraints = |pattern: &TriplePattern| {
            let fixed = |var: Option<&Variable>| var.map_or(true, |v| bound.contains(v));
            [
                pattern.subject.as_variable(),
                pattern.predicate.as_variable(),
                pattern.object.as_variable(),
            ]
            .into_iter()
            .filter(|&var| fixed(var))
            .count()
        };

        let mut best = 0;
        let mut best_score = constraints(remaining[0]);
        for (i, &pattern) in remaining.iter().enumerate().skip(1) {
            let score = constraints(pattern);
            if score > best_score {
                best = i;
                best_score = score;
            }
        }

        let chosen = remaining.remove(best);
        bound.extend(chosen.variables());
        ordered.push(chosen);
    }
    ordered
}

fn evaluate_group(
    graph: &Graph,
    patterns: &[TriplePattern],
    group: &[usize],
    order: PatternOrder,
) -> FxHashSet<usize> {
    let members = group.iter().map(|&i| &patterns[i]).collect();
    let evaluator = GroupEvaluator {
        graph,
        patterns: order_patterns(members, order),
    };
    let found = evaluator.run();
    debug!(patterns = group.len(), triples = found.len(), "group evaluated");
    found
}

/// Triples of `graph` used by at least one solution of `patterns`
pub fn evaluate(graph: &Graph, patterns: &[TriplePattern]) -> Graph {
    evaluate_with(graph, patterns, &MatchConfig::default())
}

/// Same as [`evaluate`] with explicit settings
pub fn evaluate_with(graph: &Graph, patterns: &[TriplePattern], config: &MatchConfig) -> Graph {
    if patterns.is_empty() {
        return Graph::new();
    }

    let groups = group_indices(patterns);
    debug!(
        patterns = patterns.len(),
        groups = groups.len(),
        parallel = config.parallel,
        "evaluating triple patterns"
    );

    let merge = |mut acc: FxHashSet<usize>, found: FxHashSet<usize>| {
        acc.extend(found);
        acc
    };
    let found: FxHashSet<usize> = if config.parallel {
        groups
            .par_iter()
            .map(|group| evaluate_group(graph, patterns, group, config.order))
            .reduce(FxHashSet::default, merge)
    } else {
        groups
            .iter()
            .map(|group| evaluate_group(graph, patterns, group, config.order))
            .fold(FxHashSet::default(), merge)
    };

    let mut positions: Vec<usize> = found.into_iter().collect();
    positions.sort_unstable();
    positions
        .into_iter()
        .filter_map(|i| graph.get_index(i).cloned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rdf::{BlankNode, Literal, NamedNode, RdfObject, RdfPredicate};

    fn iri(s: &str) -> NamedNode {
        NamedNode::new(&format!("http://example.org/{}", s)).unwrap()
    }

    fn var(name: &str) -> Variable {
        Variable::new(name).unwrap()
    }

    fn triple(s: &str, p: &str, o: impl Into<RdfObject>) -> Triple {
        Triple::new(iri(s).into(), RdfPredicate::from(iri(p)), o.into())
    }

    fn social_graph() -> Graph {
        Graph::from_triples(vec![
            triple("alice", "knows", iri("bob")),
            triple("bob", "knows", iri("carol")),
            triple("carol", "knows", iri("dave")),
            triple("alice", "name", Literal::new_simple_literal("Alice")),
            triple("erin", "name", Literal::new_simple_literal("Erin")),
        ])
    }

    #[test]
    fn test_unify_binds_and_checks() {
        let t = triple("alice", "knows", iri("bob"));
        let pattern = TriplePattern::new(var("x"), iri("knows"), var("y"));

        let bindings = Bindings::default().unify(&pattern, &t).unwrap();
        assert_eq!(bindings.get(&var("x")), Some(&RdfTerm::NamedNode(iri("alice"))));
        assert_eq!(bindings.get(&var("y")), Some(&RdfTerm::NamedNode(iri("bob"))));

        // ?y is now bob, so it cannot match alice in subject position
        let follow = TriplePattern::new(var("y"), iri("knows"), var("z"));
        assert!(bindings.unify(&follow, &t).is_none());
    }

    #[test]
    fn test_unify_leaves_original_snapshot_untouched() {
        let t = triple("alice", "knows", iri("bob"));
        let base = Bindings::default();
        let pattern = TriplePattern::new(var("x"), var("p"), var("y"));
        let extended = base.unify(&pattern, &t).unwrap();
        assert_eq!(base, Bindings::default());
        assert_eq!(extended.values.len(), 3);
    }

    #[test]
    fn test_unify_repeated_variable_in_one_pattern() {
        let t = triple("alice", "knows", iri("bob"));
        let pattern = TriplePattern::new(var("x"), iri("knows"), var("x"));
        assert!(Bindings::default().unify(&pattern, &t).is_none());

        let looped = triple("alice", "knows", iri("alice"));
        assert!(Bindings::default().unify(&pattern, &looped).is_some());
    }

    #[test]
    fn test_literal_bound_variable_never_matches_subject() {
        let graph = Graph::from_triples(vec![
            triple("a", "label", Literal::new_simple_literal("x")),
            triple("b", "label", iri("a")),
        ]);
        let patterns = vec![
            TriplePattern::new(iri("a"), iri("label"), var("v")),
            TriplePattern::new(var("v"), var("p"), var("o")),
        ];
        assert!(evaluate(&graph, &patterns).is_empty());
    }

    #[test]
    fn test_empty_patterns() {
        assert!(evaluate(&social_graph(), &[]).is_empty());
    }

    #[test]
    fn test_chain_join() {
        let graph = social_graph();
        let patterns = vec![
            TriplePattern::new(iri("alice"), iri("knows"), var("a")),
            TriplePattern::new(var("a"), iri("knows"), var("b")),
        ];
        let expected = Graph::from_triples(vec![
            triple("alice", "knows", iri("bob")),
            triple("bob", "knows", iri("carol")),
        ]);
        assert_eq!(evaluate(&graph, &patterns), expected);
    }

    #[test]
    fn test_independent_groups_union() {
        let graph = social_graph();
        let patterns = vec![
            TriplePattern::new(iri("carol"), iri("knows"), var("a")),
            TriplePattern::new(var("x"), iri("name"), Literal::new_simple_literal("Erin")),
            TriplePattern::new(var("y"), iri("unknown"), var("z")),
        ];
        let expected = Graph::from_triples(vec![
            triple("carol", "knows", iri("dave")),
            triple("erin", "name", Literal::new_simple_literal("Erin")),
        ]);
        assert_eq!(evaluate(&graph, &patterns), expected);
    }

    #[test]
    fn test_ground_pattern_is_existence_filter() {
        let graph = social_graph();
        let present = vec![TriplePattern::new(iri("alice"), iri("knows"), iri("bob"))];
        let absent = vec![TriplePattern::new(iri("bob"), iri("knows"), iri("alice"))];
        assert_eq!(evaluate(&graph, &present).len(), 1);
        assert!(evaluate(&graph, &absent).is_empty());
    }

    #[test]
    fn test_blank_node_in_pattern_matches_exactly() {
        let c1 = BlankNode::from_str("c1").unwrap();
        let graph = Graph::from_triples(vec![
            Triple::new(c1.clone().into(), iri("role").into(), iri("author").into()),
            Triple::new(
                BlankNode::from_str("c2").unwrap().into(),
                iri("role").into(),
                iri("translator").into(),
            ),
        ]);
        let patterns = vec![TriplePattern::new(c1, iri("role"), var("r"))];
        let result = evaluate(&graph, &patterns);
        assert_eq!(result.len(), 1);
        assert!(result.iter().all(|t| t.object == RdfObject::from(iri("author"))));
    }

    #[test]
    fn test_result_keeps_graph_order() {
        let graph = social_graph();
        let patterns = vec![TriplePattern::new(var("s"), iri("knows"), var("o"))];
        let result = evaluate(&graph, &patterns);
        let collected: Vec<&Triple> = result.iter().collect();
        let expected: Vec<&Triple> = graph.iter().take(3).collect();
        assert_eq!(collected, expected);
    }

    #[test]
    fn test_selective_order_prefers_constrained_patterns() {
        let loose = TriplePattern::new(var("a"), var("p"), var("b"));
        let anchored = TriplePattern::new(iri("alice"), iri("knows"), var("a"));
        let follow = TriplePattern::new(var("b"), iri("name"), var("n"));

        let ordered = order_patterns(vec![&loose, &follow, &anchored], PatternOrder::Selective);
        assert_eq!(ordered, vec![&anchored, &loose, &follow]);

        let given = order_patterns(vec![&loose, &follow, &anchored], PatternOrder::Given);
        assert_eq!(given, vec![&loose, &follow, &anchored]);
    }

    #[test]
    fn test_config_does_not_change_result() {
        let graph = social_graph();
        let patterns = vec![
            TriplePattern::new(var("a"), iri("knows"), var("b")),
            TriplePattern::new(var("b"), iri("knows"), var("c")),
            TriplePattern::new(var("x"), iri("name"), var("n")),
        ];
        let baseline = evaluate(&graph, &patterns);
        for order in [PatternOrder::Given, PatternOrder::Selective] {
            for parallel in [false, true] {
                let config = MatchConfig { order, parallel };
                assert_eq!(evaluate_with(&graph, &patterns, &config), baseline);
            }
        }
        assert_eq!(baseline.len(), 5);
    }
}

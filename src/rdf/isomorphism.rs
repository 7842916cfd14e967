//! Graph isomorphism under blank node renaming
//!
//! Two graphs are equal when some bijection between their blank nodes maps
//! the triple set of one exactly onto the triple set of the other. URIs and
//! literals have to match as they are, which keeps the search small in
//! practice:
//!
//! 1. Triple counts and the ground (blank-free) triples must already agree.
//! 2. Blank nodes are interned per graph and given a local signature: the
//!    multiset of (predicate, position, neighbour) incidences.
//! 3. Signatures are refined into colours shared by both graphs, by hashing
//!    the colours of blank neighbours until the classes stop splitting. Only
//!    nodes of the same colour can map onto each other, and every colour
//!    class must have the same size on both sides.
//! 4. A backtracking search commits one pair at a time. The next node is the
//!    unmapped one with the most mapped neighbours, so every triple around
//!    it can be checked right away.
//! 5. A complete bijection is verified against the full non-ground set.
//!
//! Blank node labels are never compared across graphs.

use super::graph::Graph;
use super::types::{BlankNode, Literal, NamedNode, RdfObject, RdfPredicate, RdfSubject, Triple};
use rustc_hash::{FxHashMap, FxHashSet};
use std::cmp::Reverse;
use tracing::{debug, trace};

/// Side of a triple the blank node sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
enum Position {
    Subject,
    Object,
}

/// Term at the other end of an incident triple
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Neighbor<'a> {
    Named(&'a NamedNode),
    Literal(&'a Literal),
    Blank,
    SelfLoop,
}

type Incidence<'a> = (&'a RdfPredicate, Position, Neighbor<'a>);

/// Multiset of incidences around one blank node
type Signature<'a> = FxHashMap<Incidence<'a>, usize>;

/// Edge to another blank node: predicate IRI, own position, other node
type Link<'a> = (&'a str, Position, usize);

/// Own colour plus the sorted colours seen across links
type ColourKey<'a> = (usize, Vec<(&'a str, Position, usize)>);

/// Blank nodes of one graph, addressed by local index
struct BlankIndex<'a> {
    nodes: Vec<&'a BlankNode>,
    ids: FxHashMap<&'a BlankNode, usize>,
    /// Non-ground triples touching each node
    incident: Vec<Vec<usize>>,
    signatures: Vec<Signature<'a>>,
    /// Links to other blank nodes, self-loops excluded
    links: Vec<Vec<Link<'a>>>,
}

impl<'a> BlankIndex<'a> {
    fn build(non_ground: &[&'a Triple]) -> Self {
        let mut index = Self {
            nodes: Vec::new(),
            ids: FxHashMap::default(),
            incident: Vec::new(),
            signatures: Vec::new(),
            links: Vec::new(),
        };

        for (position, &triple) in non_ground.iter().enumerate() {
            let subject = triple.subject.as_blank_node().map(|node| index.intern(node));
            let object = triple.object.as_blank_node().map(|node| index.intern(node));
            let self_loop = subject.is_some() && subject == object;
            let predicate = triple.predicate.as_named_node().as_str();

            if let Some(id) = subject {
                index.incident[id].push(position);
                let neighbor = match &triple.object {
                    _ if self_loop => Neighbor::SelfLoop,
                    RdfObject::NamedNode(n) => Neighbor::Named(n),
                    RdfObject::Literal(l) => Neighbor::Literal(l),
                    RdfObject::BlankNode(_) => Neighbor::Blank,
                };
                index.record(id, (&triple.predicate, Position::Subject, neighbor));
            }

            if let Some(id) = object {
                if !self_loop {
                    index.incident[id].push(position);
                }
                let neighbor = match &triple.subject {
                    _ if self_loop => Neighbor::SelfLoop,
                    RdfSubject::NamedNode(n) => Neighbor::Named(n),
                    RdfSubject::BlankNode(_) => Neighbor::Blank,
                };
                index.record(id, (&triple.predicate, Position::Object, neighbor));
            }

            if let (Some(s), Some(o)) = (subject, object) {
                if !self_loop {
                    index.links[s].push((predicate, Position::Subject, o));
                    index.links[o].push((predicate, Position::Object, s));
                }
            }
        }

        index
    }

    fn intern(&mut self, node: &'a BlankNode) -> usize {
        if let Some(&id) = self.ids.get(node) {
            return id;
        }
        let id = self.nodes.len();
        self.nodes.push(node);
        self.ids.insert(node, id);
        self.incident.push(Vec::new());
        self.signatures.push(Signature::default());
        self.links.push(Vec::new());
        id
    }

    fn record(&mut self, id: usize, incidence: Incidence<'a>) {
        *self.signatures[id].entry(incidence).or_insert(0) += 1;
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }
}

fn class_sizes(colours: &[usize]) -> FxHashMap<usize, usize> {
    let mut sizes = FxHashMap::default();
    for &colour in colours {
        *sizes.entry(colour).or_insert(0) += 1;
    }
    sizes
}

/// Colours from local signatures, numbered by the first left node carrying them
fn initial_colours<'a>(
    left: &BlankIndex<'a>,
    right: &BlankIndex<'a>,
) -> Option<(Vec<usize>, Vec<usize>)> {
    let left_colours: Vec<usize> = (0..left.len())
        .map(|l| {
            (0..l)
                .find(|&first| left.signatures[first] == left.signatures[l])
                .unwrap_or(l)
        })
        .collect();

    let mut right_colours = Vec::with_capacity(right.len());
    for r in 0..right.len() {
        let Some(l) = (0..left.len()).find(|&l| left.signatures[l] == right.signatures[r]) else {
            debug!(node = %right.nodes[r], "no matching signature on the left");
            return None;
        };
        right_colours.push(left_colours[l]);
    }
    Some((left_colours, right_colours))
}

fn recolour<'a>(
    index: &BlankIndex<'a>,
    colours: &[usize],
    palette: &mut FxHashMap<ColourKey<'a>, usize>,
) -> Vec<usize> {
    (0..index.len())
        .map(|id| {
            let mut around: Vec<_> = index.links[id]
                .iter()
                .map(|&(predicate, position, other)| (predicate, position, colours[other]))
                .collect();
            around.sort_unstable();
            let next = palette.len();
            *palette.entry((colours[id], around)).or_insert(next)
        })
        .collect()
}

/// Colour classes shared by both graphs, refined until stable
///
/// Returns None as soon as some class differs in size between the two sides.
fn refine_colours<'a>(
    left: &BlankIndex<'a>,
    right: &BlankIndex<'a>,
) -> Option<(Vec<usize>, Vec<usize>)> {
    let (mut left_colours, mut right_colours) = initial_colours(left, right)?;
    if class_sizes(&left_colours) != class_sizes(&right_colours) {
        debug!("signature class sizes differ");
        return None;
    }

    let mut classes = class_sizes(&left_colours).len();
    for round in 0..left.len() {
        let mut palette = FxHashMap::default();
        let next_left = recolour(left, &left_colours, &mut palette);
        let next_right = recolour(right, &right_colours, &mut palette);
        if class_sizes(&next_left) != class_sizes(&next_right) {
            debug!(round, "colour classes differ after refinement");
            return None;
        }

        left_colours = next_left;
        right_colours = next_right;
        if palette.len() == classes {
            break;
        }
        classes = palette.len();
    }

    trace!(classes, "colour refinement stable");
    Some((left_colours, right_colours))
}

/// Partial mapping from left blank nodes to right blank nodes
///
/// Extending a bijection produces a new snapshot, so every search branch
/// owns its own state.
#[derive(Debug, Clone)]
struct PartialBijection {
    forward: Vec<Option<usize>>,
    used: Vec<bool>,
    assigned: usize,
}

impl PartialBijection {
    fn new(size: usize) -> Self {
        Self {
            forward: vec![None; size],
            used: vec![false; size],
            assigned: 0,
        }
    }

    fn image(&self, left: usize) -> Option<usize> {
        self.forward[left]
    }

    fn is_used(&self, right: usize) -> bool {
        self.used[right]
    }

    fn with(&self, left: usize, right: usize) -> Self {
        let mut next = self.clone();
        next.forward[left] = Some(right);
        next.used[right] = true;
        next.assigned += 1;
        next
    }
}

struct Search<'a> {
    left_triples: Vec<&'a Triple>,
    right_triples: Vec<&'a Triple>,
    left: BlankIndex<'a>,
    right: BlankIndex<'a>,
    right_graph: &'a Graph,
    /// Right-hand candidates per left node
    candidates: Vec<Vec<usize>>,
}

impl<'a> Search<'a> {
    fn run(&self) -> bool {
        self.extend(&PartialBijection::new(self.left.len()))
    }

    /// Unmapped node with the most mapped neighbours, then fewest candidates
    fn next_node(&self, bijection: &PartialBijection) -> Option<usize> {
        (0..self.left.len())
            .filter(|&l| bijection.image(l).is_none())
            .max_by_key(|&l| {
                let mapped = self.left.links[l]
                    .iter()
                    .filter(|&&(_, _, other)| bijection.image(other).is_some())
                    .count();
                (mapped, Reverse(self.candidates[l].len()), Reverse(l))
            })
    }

    fn extend(&self, bijection: &PartialBijection) -> bool {
        let Some(left) = self.next_node(bijection) else {
            return self.verify(bijection);
        };

        for &right in &self.candidates[left] {
            if bijection.is_used(right) {
                continue;
            }
            trace!(depth = bijection.assigned, left, right, "trying blank node pair");
            let next = bijection.with(left, right);
            if self.consistent(left, &next) && self.extend(&next) {
                return true;
            }
        }
        false
    }

    /// Every triple around `left` whose blank nodes are all mapped must
    /// land on a triple of the right graph.
    fn consistent(&self, left: usize, bijection: &PartialBijection) -> bool {
        self.left.incident[left].iter().all(|&position| {
            match self.map_triple(self.left_triples[position], bijection) {
                Some(image) => self.right_graph.contains(&image),
                None => true,
            }
        })
    }

    fn verify(&self, bijection: &PartialBijection) -> bool {
        let mut images = FxHashSet::default();
        for triple in &self.left_triples {
            match self.map_triple(triple, bijection) {
                Some(image) => {
                    images.insert(image);
                }
                None => return false,
            }
        }
        images.len() == self.right_triples.len()
            && self.right_triples.iter().all(|t| images.contains(*t))
    }

    /// Image of a triple, or None while one of its blank nodes is unmapped
    fn map_triple(&self, triple: &Triple, bijection: &PartialBijection) -> Option<Triple> {
        let subject = match &triple.subject {
            RdfSubject::BlankNode(node) => RdfSubject::BlankNode(self.map_node(node, bijection)?),
            other => other.clone(),
        };
        let object = match &triple.object {
            RdfObject::BlankNode(node) => RdfObject::BlankNode(self.map_node(node, bijection)?),
            other => other.clone(),
        };
        Some(Triple::new(subject, triple.predicate.clone(), object))
    }

    fn map_node(&self, node: &BlankNode, bijection: &PartialBijection) -> Option<BlankNode> {
        let left = *self.left.ids.get(node)?;
        let right = bijection.image(left)?;
        Some(self.right.nodes[right].clone())
    }
}

fn split(graph: &Graph) -> (Vec<&Triple>, Vec<&Triple>) {
    graph.iter().partition(|t| t.is_ground())
}

/// Check whether two graphs are equal up to a renaming of blank nodes
pub fn are_isomorphic(a: &Graph, b: &Graph) -> bool {
    if a.len() != b.len() {
        debug!(left = a.len(), right = b.len(), "triple counts differ");
        return false;
    }

    let (ground_a, non_ground_a) = split(a);
    let (ground_b, non_ground_b) = split(b);
    if ground_a.len() != ground_b.len() || !ground_a.iter().all(|t| b.contains(t)) {
        debug!("ground triples differ");
        return false;
    }
    if non_ground_a.is_empty() {
        return true;
    }

    let left = BlankIndex::build(&non_ground_a);
    let right = BlankIndex::build(&non_ground_b);
    if left.len() != right.len() {
        debug!(left = left.len(), right = right.len(), "blank node counts differ");
        return false;
    }

    let Some((left_colours, right_colours)) = refine_colours(&left, &right) else {
        return false;
    };

    let mut by_colour: FxHashMap<usize, Vec<usize>> = FxHashMap::default();
    for (r, &colour) in right_colours.iter().enumerate() {
        by_colour.entry(colour).or_default().push(r);
    }
    let candidates: Vec<Vec<usize>> = left_colours
        .iter()
        .map(|colour| by_colour.get(colour).cloned().unwrap_or_default())
        .collect();

    let search = Search {
        left_triples: non_ground_a,
        right_triples: non_ground_b,
        left,
        right,
        right_graph: b,
        candidates,
    };
    let found = search.run();
    debug!(found, blank_nodes = search.left.len(), "blank node search finished");
    found
}

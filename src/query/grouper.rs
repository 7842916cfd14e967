//! Partition triple patterns into independent groups
//!
//! Two patterns belong to the same group when a chain of shared variables
//! connects them. Groups can be evaluated separately since no join condition
//! crosses them.

use crate::rdf::{TriplePattern, Variable};
use rustc_hash::FxHashMap;

/// Union-Find data structure over pattern positions
struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<usize>,
}

impl UnionFind {
    fn new(size: usize) -> Self {
        UnionFind {
            parent: (0..size).collect(),
            rank: vec![0; size],
        }
    }

    fn find(&mut self, i: usize) -> usize {
        if self.parent[i] != i {
            self.parent[i] = self.find(self.parent[i]); // Path compression
        }
        self.parent[i]
    }

    fn union(&mut self, i: usize, j: usize) {
        let root_i = self.find(i);
        let root_j = self.find(j);

        if root_i != root_j {
            if self.rank[root_i] < self.rank[root_j] {
                self.parent[root_i] = root_j;
            } else if self.rank[root_i] > self.rank[root_j] {
                self.parent[root_j] = root_i;
            } else {
                self.parent[root_j] = root_i;
                self.rank[root_i] += 1;
            }
        }
    }
}

/// Partition as input positions
///
/// Groups are ordered by their earliest member and keep input order inside.
/// Patterns without variables end up alone in their group.
pub fn group_indices(patterns: &[TriplePattern]) -> Vec<Vec<usize>> {
    let mut uf = UnionFind::new(patterns.len());
    let mut first_seen: FxHashMap<&Variable, usize> = FxHashMap::default();

    for (i, pattern) in patterns.iter().enumerate() {
        for var in pattern.variables() {
            match first_seen.get(var) {
                Some(&j) => uf.union(i, j),
                None => {
                    first_seen.insert(var, i);
                }
            }
        }
    }

    let mut group_of_root: FxHashMap<usize, usize> = FxHashMap::default();
    let mut groups: Vec<Vec<usize>> = Vec::new();
    for i in 0..patterns.len() {
        let root = uf.find(i);
        let group = *group_of_root.entry(root).or_insert_with(|| {
            groups.push(Vec::new());
            groups.len() - 1
        });
        groups[group].push(i);
    }
    groups
}

/// Partition patterns into groups connected by shared variables
pub fn group_by_variable(patterns: &[TriplePattern]) -> Vec<Vec<TriplePattern>> {
    group_indices(patterns)
        .into_iter()
        .map(|group| group.into_iter().map(|i| patterns[i].clone()).collect())
        .collect()
}

//! Disjoint-set forest with union by rank and path compression.
//!
//! Elements are dense vertex indices. Ties in rank attach the second root
//! under the first and bump the first root's rank, so the structure is
//! deterministic for a given sequence of unions.

/// Disjoint-set forest over `0..len`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<usize>,
    sets: usize,
}

impl UnionFind {
    /// `len` singleton sets.
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self {
            parent: (0..len).collect(),
            rank: vec![0; len],
            sets: len,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Root of the set containing `x`, compressing the path on the way.
    ///
    /// Iterative two-pass compression; no recursion depth concerns.
    ///
    /// # Panics
    ///
    /// Panics if `x >= self.len()`.
    pub fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        let mut cursor = x;
        while self.parent[cursor] != root {
            let next = self.parent[cursor];
            self.parent[cursor] = root;
            cursor = next;
        }

        root
    }

    /// Merge the sets containing `a` and `b`.
    ///
    /// Returns `false` when they were already in the same set.
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let root_a = self.find(a);
        let root_b = self.find(b);
        if root_a == root_b {
            return false;
        }

        match self.rank[root_a].cmp(&self.rank[root_b]) {
            std::cmp::Ordering::Greater => self.parent[root_b] = root_a,
            std::cmp::Ordering::Less => self.parent[root_a] = root_b,
            std::cmp::Ordering::Equal => {
                self.parent[root_b] = root_a;
                self.rank[root_a] += 1;
            }
        }
        self.sets -= 1;
        true
    }

    pub fn connected(&mut self, a: usize, b: usize) -> bool {
        self.find(a) == self.find(b)
    }

    /// Number of disjoint sets remaining.
    #[must_use]
    pub const fn set_count(&self) -> usize {
        self.sets
    }

    /// Rank of `x`'s current root.
    pub fn rank_of(&mut self, x: usize) -> usize {
        let root = self.find(x);
        self.rank[root]
    }
}

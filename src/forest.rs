//! Euler tour forest: maintains a forest of trees over a fixed vertex set
//! under edge insertion and removal, with connectivity queries.
//!
//! Every tree with at least one edge is stored as one token sequence
//! holding its Euler tour: one token per directed traversal of each edge,
//! `2(m-1)` tokens for a tree on `m` vertices. Two vertices are connected
//! exactly when their tour tokens share a sequence root, so `link` and
//! `cut` reduce to a constant number of sequence splits, rotations and
//! concatenations.

use std::collections::HashMap;
use std::fmt::{Debug, Formatter};

use crate::seq::{Idx, Sequences, DEFAULT_SEED};

/// One directed traversal of a forest edge; the element type of the tour
/// sequences. An undirected edge `{u, v}` owns two of these.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub from: usize,
    pub to: usize,
}

impl Debug for Edge {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.from, self.to)
    }
}

const NONE: Idx = usize::MAX;

#[derive(Debug, Clone, Copy)]
struct Entry {
    neighbor: usize,
    prev: Idx,
    next: Idx,
}

/// Per-vertex neighbor lists, most recently linked first. Entries live in an
/// arena so a saved handle removes its entry in O(1).
#[derive(Debug)]
struct NeighborLists {
    head: Vec<Idx>,
    entries: Vec<Entry>,
    free: Vec<Idx>,
}

impl NeighborLists {
    fn new(n: usize) -> Self {
        Self {
            head: vec![NONE; n],
            entries: Vec::new(),
            free: Vec::new(),
        }
    }
    /// Push `neighbor` to the front of `v`'s list, returning the handle that
    /// later removes it.
    fn push_front(&mut self, v: usize, neighbor: usize) -> Idx {
        let entry = Entry {
            neighbor,
            prev: NONE,
            next: self.head[v],
        };
        let h = match self.free.pop() {
            Some(h) => {
                self.entries[h] = entry;
                h
            }
            None => {
                self.entries.push(entry);
                self.entries.len() - 1
            }
        };
        if entry.next != NONE {
            self.entries[entry.next].prev = h;
        }
        self.head[v] = h;
        h
    }
    /// Unlink entry `h` from `v`'s list and free its slot.
    fn remove(&mut self, v: usize, h: Idx) {
        let Entry { prev, next, .. } = self.entries[h];
        if prev == NONE {
            self.head[v] = next;
        } else {
            self.entries[prev].next = next;
        }
        if next != NONE {
            self.entries[next].prev = prev;
        }
        self.free.push(h);
    }
    /// Most recently linked neighbor of `v`, if any.
    fn front(&self, v: usize) -> Option<usize> {
        if self.head[v] == NONE {
            None
        } else {
            Some(self.entries[self.head[v]].neighbor)
        }
    }
}

/// A dynamic forest over vertices `0..n`.
///
/// Tour tokens are owned by the sequence structure `S`; the forest keeps the
/// side tables mapping directed edges to their tokens and each vertex to one
/// incident token. An isolated vertex owns no tokens at all.
pub struct EulerForest<S: Sequences<Edge>> {
    n: usize,
    seq: S,
    /// Directed edge key -> its tour token.
    edges: HashMap<u64, Idx>,
    /// Directed edge key -> handle into the `from` vertex's neighbor list.
    pos: HashMap<u64, Idx>,
    neighbors: NeighborLists,
}

impl<S: Sequences<Edge>> EulerForest<S> {
    /// Forest of `n` isolated vertices with the default priority seed.
    pub fn new(n: usize) -> Self {
        Self::with_seed(n, DEFAULT_SEED)
    }

    /// Forest of `n` isolated vertices. `seed` drives the token priorities;
    /// the same seed and call sequence reproduce the same tree shapes.
    pub fn with_seed(n: usize, seed: u64) -> Self {
        Self {
            n,
            seq: S::with_seed(2 * n.saturating_sub(1), seed),
            edges: HashMap::new(),
            pos: HashMap::new(),
            neighbors: NeighborLists::new(n),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.n
    }

    /// Number of undirected edges currently in the forest.
    pub fn edge_count(&self) -> usize {
        self.edges.len() / 2
    }

    /// Number of connected components. Each edge joins two trees, so this is
    /// plain arithmetic over the edge count.
    pub fn component_count(&self) -> usize {
        self.n - self.edge_count()
    }

    fn key(&self, from: usize, to: usize) -> u64 {
        debug_assert!(from < self.n && to < self.n);
        from as u64 * self.n as u64 + to as u64
    }

    /// Token standing in for `v` in the tour sequences: its traversal
    /// towards the most recently linked neighbor. EMPTY when `v` is
    /// isolated.
    fn virtual_token(&self, v: usize) -> Idx {
        match self.neighbors.front(v) {
            Some(u) => self.edges[&self.key(v, u)],
            None => S::EMPTY,
        }
    }

    /// Whether `u` and `v` lie in the same tree. True for `u == v`.
    pub fn connected(&self, u: usize, v: usize) -> bool {
        if u == v {
            return true;
        }
        let (tu, tv) = (self.virtual_token(u), self.virtual_token(v));
        if tu == S::EMPTY || tv == S::EMPTY {
            return false;
        }
        self.seq.on_same_seq(tu, tv)
    }

    /// Add the edge `{u, v}` to the forest.
    ///
    /// `u` and `v` must be distinct, in range, and in different trees. The
    /// no-cycle precondition is checked in debug builds only.
    pub fn link(&mut self, u: usize, v: usize) {
        assert_ne!(u, v, "link endpoints must differ");
        debug_assert!(!self.connected(u, v), "link({u}, {v}) would close a cycle");
        log::trace!("link {u} {v}");
        let (virt_u, virt_v) = (self.virtual_token(u), self.virtual_token(v));
        // All allocation happens up front; the splice below only rewires.
        let fwd = self.seq.create(Edge { from: u, to: v });
        let bwd = self.seq.create(Edge { from: v, to: u });
        self.edges.insert(self.key(u, v), fwd);
        self.edges.insert(self.key(v, u), bwd);
        let hu = self.neighbors.push_front(u, v);
        let hv = self.neighbors.push_front(v, u);
        self.pos.insert(self.key(u, v), hu);
        self.pos.insert(self.key(v, u), hv);
        // Rotate each tour to start at its own endpoint, then splice the
        // four pieces into one tour of the merged tree.
        let su = if virt_u == S::EMPTY {
            S::EMPTY
        } else {
            self.seq.move_to_front(virt_u)
        };
        let sv = if virt_v == S::EMPTY {
            S::EMPTY
        } else {
            self.seq.move_to_front(virt_v)
        };
        self.seq.concat_all([su, fwd, sv, bwd]);
    }

    /// Remove the edge `{u, v}` from the forest.
    ///
    /// Panics if the edge is not present.
    pub fn cut(&mut self, u: usize, v: usize) {
        log::trace!("cut {u} {v}");
        let (kf, kb) = (self.key(u, v), self.key(v, u));
        let fwd = *self
            .edges
            .get(&kf)
            .expect("cut of an edge that is not in the forest");
        let bwd = self.edges[&kb];
        // The two traversals bracket the sub-tour of the far side of the
        // edge; peeling both out leaves the tours of the two new trees.
        let (a, b) = (self.seq.order(fwd), self.seq.order(bwd));
        let (left, middle, right) = self.seq.split_lr(fwd, a.min(b), a.max(b) + 1);
        let mlen = self.seq.len(middle);
        let (e1, _interior, e2) = self.seq.split_lr(middle, 1, mlen - 1);
        debug_assert!((e1 == fwd && e2 == bwd) || (e1 == bwd && e2 == fwd));
        self.seq.concat(left, right);
        self.seq.remove(fwd);
        self.seq.remove(bwd);
        self.edges.remove(&kf);
        self.edges.remove(&kb);
        let hu = self.pos.remove(&kf).expect("neighbor handle out of sync");
        let hv = self.pos.remove(&kb).expect("neighbor handle out of sync");
        self.neighbors.remove(u, hu);
        self.neighbors.remove(v, hv);
    }

    /// The Euler tour of the tree containing `v`, as directed vertex pairs.
    /// Empty for an isolated vertex.
    pub fn tour(&self, v: usize) -> Vec<(usize, usize)> {
        let t = self.virtual_token(v);
        if t == S::EMPTY {
            return Vec::new();
        }
        self.tour_from(self.seq.root(t))
    }

    fn tour_from(&self, root: Idx) -> Vec<(usize, usize)> {
        (0..self.seq.len(root))
            .map(|k| {
                let e = self.seq.data(self.seq.find_kth(root, k));
                (e.from, e.to)
            })
            .collect()
    }

    /// Read access to the underlying sequence structure.
    pub fn inner_seqs(&self) -> &S {
        &self.seq
    }
}

impl<S: Sequences<Edge>> Debug for EulerForest<S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Tours:")?;
        let mut seen = std::collections::HashSet::new();
        for &t in self.edges.values() {
            let root = self.seq.root(t);
            if !seen.insert(root) {
                continue;
            }
            write!(f, " <")?;
            for (a, b) in self.tour_from(root) {
                write!(f, " {a}->{b}")?;
            }
            write!(f, " >")?;
        }
        Ok(())
    }
}

//! A treap, or Cartesian tree, is a BST that is also a heap on randomized
//! priorities. It keeps every sequence balanced in expectation, giving
//! logarithmic cost for all operations.

use std::fmt::{Debug, Formatter};

use debug_tree::{add_branch_to, AsTree, TreeBuilder};
use derivative::Derivative;
use rand::{rngs::StdRng, Rng, SeedableRng};

use super::{Idx, Sequences};

fn node_fmt(u: &Idx, f: &mut Formatter) -> std::fmt::Result {
    if *u == usize::MAX {
        write!(f, "∅")
    } else {
        write!(f, "{u}")
    }
}

fn node2_fmt([u, v]: &[Idx; 2], f: &mut Formatter) -> std::fmt::Result {
    write!(f, "[")?;
    node_fmt(u, f)?;
    write!(f, ", ")?;
    node_fmt(v, f)?;
    write!(f, "]")
}

#[derive(Derivative)]
#[derivative(Debug)]
struct Node<T: Debug> {
    #[derivative(Debug(format_with = "node_fmt"))]
    parent: Idx,
    /// Left and right child
    #[derivative(Debug(format_with = "node2_fmt"))]
    child: [Idx; 2],
    size: usize,
    #[derivative(Debug = "ignore")]
    priority: u32,
    data: T,
}

impl<T: Debug> Node<T> {
    fn new(data: T, priority: u32) -> Self {
        Self {
            parent: Treaps::<T>::EMPTY,
            child: [Treaps::<T>::EMPTY; 2],
            size: 1,
            priority,
            data,
        }
    }
}

/// Arena of treap nodes maintaining multiple token sequences. Freed slots
/// are reused by later [`Sequences::create`] calls; live tokens never move,
/// so handles stay valid until the token is removed.
pub struct Treaps<T: Debug> {
    slots: Vec<Option<Node<T>>>,
    free: Vec<Idx>,
    rng: StdRng,
}

impl<T: Debug> Debug for Treaps<T> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let builder = TreeBuilder::new();
        add_branch_to!(builder, "Treaps");
        for u in 0..self.slots.len() {
            if matches!(&self.slots[u], Some(n) if n.parent == Self::EMPTY) {
                self.tree_inorder_dbg(u, &builder);
            }
        }
        writeln!(f, "{}", builder.string())
    }
}

impl<T: Debug> Treaps<T> {
    fn tree_inorder_dbg<B: AsTree>(&self, u: Idx, tree: &B) {
        let nu = self.node(u);
        if nu.child[0] != Self::EMPTY {
            add_branch_to!(*tree, "left child of {u}");
            self.tree_inorder_dbg(nu.child[0], tree);
        }
        add_branch_to!(*tree, "[{u}] {nu:?}");
        if nu.child[1] != Self::EMPTY {
            self.tree_inorder_dbg(nu.child[1], tree);
        }
    }
    fn n(&self, u: Idx) -> Option<&Node<T>> {
        if u == Self::EMPTY {
            None
        } else {
            self.slots[u].as_ref()
        }
    }
    fn node(&self, u: Idx) -> &Node<T> {
        self.slots[u].as_ref().expect("no token in slot")
    }
    fn node_mut(&mut self, u: Idx) -> &mut Node<T> {
        self.slots[u].as_mut().expect("no token in slot")
    }
    fn size(&self, u: Idx) -> usize {
        self.n(u).map_or(0, |n| n.size)
    }
    fn parent(&self, u: Idx) -> Idx {
        self.n(u).map_or(Self::EMPTY, |n| n.parent)
    }
    /// Rewire the `side` child of `u` (0 = left) and refresh `u`'s size.
    /// `u`'s own parent link is the caller's responsibility.
    fn set_child(&mut self, u: Idx, side: usize, c: Idx) {
        self.node_mut(u).child[side] = c;
        if c != Self::EMPTY {
            self.node_mut(c).parent = u;
        }
        let [l, r] = self.node(u).child;
        self.node_mut(u).size = self.size(l) + 1 + self.size(r);
    }
    fn clear_parent(&mut self, u: Idx) {
        if u != Self::EMPTY {
            self.node_mut(u).parent = Self::EMPTY;
        }
    }
    /// (First k, rest) of the subtree under `u`. Rewires the child on the
    /// descended side directly; the detached half gets its parent cleared.
    fn split_rec(&mut self, u: Idx, k: usize) -> (Idx, Idx) {
        if u == Self::EMPTY {
            return (Self::EMPTY, Self::EMPTY);
        }
        let [l, r] = self.node(u).child;
        if k <= self.size(l) {
            let (a, b) = self.split_rec(l, k);
            self.set_child(u, 0, b);
            self.clear_parent(a);
            (a, u)
        } else {
            let (a, b) = self.split_rec(r, k - self.size(l) - 1);
            self.set_child(u, 1, a);
            self.clear_parent(b);
            (u, b)
        }
    }
    /// Heap-merge of two roots. The higher priority stays on top, so treaps
    /// built from one priority stream interleave into a balanced shape.
    fn concat_rec(&mut self, u: Idx, v: Idx) -> Idx {
        if u == Self::EMPTY {
            return v;
        }
        if v == Self::EMPTY {
            return u;
        }
        if self.node(u).priority > self.node(v).priority {
            let r = self.node(u).child[1];
            let m = self.concat_rec(r, v);
            self.set_child(u, 1, m);
            u
        } else {
            let l = self.node(v).child[0];
            let m = self.concat_rec(u, l);
            self.set_child(v, 0, m);
            v
        }
    }
}

impl<T: Debug> Sequences<T> for Treaps<T> {
    fn with_seed(capacity: usize, seed: u64) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn create(&mut self, data: T) -> Idx {
        let node = Node::new(data, self.rng.gen());
        match self.free.pop() {
            Some(u) => {
                self.slots[u] = Some(node);
                u
            }
            None => {
                self.slots.push(Some(node));
                self.slots.len() - 1
            }
        }
    }

    fn remove(&mut self, u: Idx) {
        let n = self.slots[u].take().expect("no token in slot");
        debug_assert!(
            n.parent == Self::EMPTY && n.child == [Self::EMPTY; 2],
            "removed token must be detached"
        );
        self.free.push(u);
    }

    fn total_size(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    fn data(&self, u: Idx) -> &T {
        &self.node(u).data
    }

    fn root(&self, mut u: Idx) -> Idx {
        while self.parent(u) != Self::EMPTY {
            u = self.parent(u);
        }
        u
    }

    fn order(&self, u: Idx) -> usize {
        let mut ord = self.size(self.node(u).child[0]);
        let mut v = u;
        loop {
            let p = self.node(v).parent;
            if p == Self::EMPTY {
                return ord;
            }
            if self.node(p).child[1] == v {
                ord += self.size(self.node(p).child[0]) + 1;
            }
            v = p;
        }
    }

    fn len(&self, u: Idx) -> usize {
        if u == Self::EMPTY {
            0
        } else {
            self.size(self.root(u))
        }
    }

    fn find_kth(&self, u: Idx, mut k: usize) -> Idx {
        let mut u = self.root(u);
        while u != Self::EMPTY {
            let [l, r] = self.node(u).child;
            let sl = self.size(l);
            if k < sl {
                u = l;
            } else if k == sl {
                return u;
            } else {
                k -= sl + 1;
                u = r;
            }
        }
        Self::EMPTY
    }

    fn concat(&mut self, u: Idx, v: Idx) -> Idx {
        let (u, v) = (self.root(u), self.root(v));
        if u == v {
            return u;
        }
        self.concat_rec(u, v)
    }

    fn split_at(&mut self, u: Idx, k: usize) -> (Idx, Idx) {
        let u = self.root(u);
        self.split_rec(u, k)
    }

    fn assert_invariants(&self) {
        let live = self.slots.iter().filter(|s| s.is_some()).count();
        assert_eq!(live + self.free.len(), self.slots.len(), "slot accounting");
        for (u, slot) in self.slots.iter().enumerate() {
            let Some(n) = slot else { continue };
            let [l, r] = n.child;
            assert_eq!(n.size, 1 + self.size(l) + self.size(r), "size of {u}");
            for c in n.child {
                if c != Self::EMPTY {
                    let cn = self.node(c);
                    assert_eq!(cn.parent, u, "parent link of {c}");
                    assert!(cn.priority <= n.priority, "heap order under {u}");
                }
            }
            if n.parent != Self::EMPTY {
                assert!(
                    self.node(n.parent).child.contains(&u),
                    "child link of {u} in {}",
                    n.parent
                );
            }
        }
    }
}

use std::fmt::Debug;

pub mod treap;

/// Handle to a token. Stable for the whole lifetime of the token.
pub type Idx = usize;

/// Priority seed used by [`Sequences::new`], so runs are reproducible unless
/// a caller opts into a different stream.
pub const DEFAULT_SEED: u64 = 1337;

/// Maintains a collection of ordered token sequences. Tokens are created and
/// freed through the structure and addressed by [`Idx`] handles; positions
/// are implicit, 0-indexed from the front of the containing sequence.
pub trait Sequences<T>
where
    T: Debug,
    Self: Sized + Debug,
{
    /// Returned when the token doesn't exist.
    const EMPTY: Idx = usize::MAX;

    /// New collection with room for `capacity` tokens. `seed` drives the
    /// randomized balancing; implementations without randomness ignore it.
    fn with_seed(capacity: usize, seed: u64) -> Self;
    /// New collection with the default seed.
    fn new(capacity: usize) -> Self {
        Self::with_seed(capacity, DEFAULT_SEED)
    }
    /// Create a token holding `data`, forming a sequence of length one.
    fn create(&mut self, data: T) -> Idx;
    /// Free the token `u`. It must be the only token of its sequence.
    fn remove(&mut self, u: Idx);
    /// Number of live tokens across all sequences.
    fn total_size(&self) -> usize;

    // OPERATIONS
    // They panic if the token doesn't exist.

    /// Data held by `u`.
    fn data(&self, u: Idx) -> &T;
    /// Root of the sequence containing `u`. All tokens of one sequence share
    /// the same root, and no token of any other sequence has it.
    fn root(&self, u: Idx) -> Idx;
    /// Position of `u` in its sequence, 0-indexed.
    fn order(&self, u: Idx) -> usize;
    /// Length of the sequence containing `u`, 0 for EMPTY.
    fn len(&self, u: Idx) -> usize;
    /// K-th token of the sequence containing `u`, EMPTY if out of range.
    fn find_kth(&self, u: Idx, k: usize) -> Idx;

    /// Concatenate the sequences containing `u` and `v`; either may be
    /// EMPTY. Returns the root of the combined sequence.
    fn concat(&mut self, u: Idx, v: Idx) -> Idx;
    /// Split the sequence containing `u` into its first `k` tokens and the
    /// rest, returning both roots. `k` past the end leaves everything on the
    /// left.
    fn split_at(&mut self, u: Idx, k: usize) -> (Idx, Idx);

    fn concat_all(&mut self, all: impl IntoIterator<Item = Idx>) -> Idx {
        let mut u = Self::EMPTY;
        for v in all {
            u = self.concat(u, v);
        }
        u
    }
    /// Split the sequence containing `u` at both ends of `l..r`, returning
    /// the three pieces. Requires `l <= r`.
    fn split_lr(&mut self, u: Idx, l: usize, r: usize) -> (Idx, Idx, Idx) {
        let (left, rest) = self.split_at(u, l);
        let (mid, right) = self.split_at(rest, r - l);
        (left, mid, right)
    }
    /// Insert the lone token `n` into `u`'s sequence so that its position
    /// becomes `k`. Returns the new root.
    fn insert_at(&mut self, u: Idx, n: Idx, k: usize) -> Idx {
        debug_assert_eq!(self.len(n), 1);
        let (left, right) = self.split_at(u, k);
        let left = self.concat(left, n);
        self.concat(left, right)
    }
    /// Rotate the sequence containing `u` left by `k` positions.
    fn cycle_shift_left(&mut self, u: Idx, k: usize) -> Idx {
        let (left, right) = self.split_at(u, k);
        self.concat(right, left)
    }
    /// Rotate the sequence containing `u` so that `u` comes first.
    fn move_to_front(&mut self, u: Idx) -> Idx {
        if self.is_first(u) {
            self.root(u)
        } else {
            let k = self.order(u);
            self.cycle_shift_left(u, k)
        }
    }

    /// First token of the sequence containing `u`.
    fn first(&self, u: Idx) -> Idx {
        self.find_kth(u, 0)
    }
    /// Token after `u` in its sequence, EMPTY if `u` is last.
    fn next(&self, u: Idx) -> Idx {
        self.find_kth(u, self.order(u) + 1)
    }
    fn is_first(&self, u: Idx) -> bool {
        self.order(u) == 0
    }
    /// Is the handle the empty handle?
    fn is_empty(&self, u: Idx) -> bool {
        u == Self::EMPTY
    }
    /// Are the two tokens in the same sequence?
    fn on_same_seq(&self, u: Idx, v: Idx) -> bool {
        self.root(u) == self.root(v)
    }
    /// Structural self-check used by tests. Implementations with internal
    /// bookkeeping override this to panic on a violated invariant.
    fn assert_invariants(&self) {}
}

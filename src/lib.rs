//! This crate maintains a dynamic forest: an undirected acyclic graph over a
//! fixed set of vertices, under an online stream of edge insertions
//! ([`EulerForest::link`]), edge removals ([`EulerForest::cut`]) and
//! connectivity queries, each in expected O(lg n) time.
//!
//! ## Usage
//!
//! Create a forest with [`DynamicForest::new`] and use the methods on
//! [`EulerForest`] to add and remove edges and query connectivity.
//!
//! ```
//! use dynamic_forest::DynamicForest;
//!
//! let mut f = DynamicForest::new(6);
//! f.link(0, 1);
//! f.link(1, 2);
//! assert!(f.connected(0, 2));
//! assert_eq!(f.component_count(), 4);
//! f.cut(0, 1);
//! assert!(!f.connected(0, 2));
//! assert!(f.connected(2, 2));
//! ```
//!
//! You can see example usage at `src/bin/example.rs` and run it with
//! `cargo run`.
//!
//! ## Implementation
//!
//! Each tree of the forest is stored as the sequence of directed-edge
//! traversals of its Euler tour, and the sequences live in an implicit-key
//! treap, so linking and cutting are a handful of sequence splits,
//! rotations and concatenations. Both layers can be used independently.
//!
//! - Treaps: see `impl Sequences for Treaps` in `src/seq/treap.rs`.
//! - Euler tour forest: see `EulerForest` in `src/forest.rs`.
//!
//! ## Testing
//!
//! Run the tests using:
//!
//! ```skip
//! cargo test
//! ```
//!
//! Add `-- --ignored` to also run the large randomized stress tests, and
//! use `cargo bench` to see the benchmarks.
pub mod forest;
pub mod seq;

pub use forest::{Edge, EulerForest};

use seq::treap::Treaps;

/// The forest backed by treap sequences, the implementation callers want
/// unless they bring their own [`seq::Sequences`].
pub type DynamicForest = EulerForest<Treaps<Edge>>;

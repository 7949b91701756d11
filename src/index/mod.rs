//! Ordered Index Module
//!
//! Generic binary search tree used for both the header metadata and the
//! timestamp → byte-offset observation index.
//!
//! ## Responsibilities
//! - Insert-or-update, exact search, removal
//! - In-order listing filtered by a key predicate, returned as a
//!   [`Sequence`](crate::sequence::Sequence) of node references
//! - Optional one-shot rebalancing after an append-only build
//!
//! ## Shape
//! The tree never rebalances on its own. Observation files are written in
//! timestamp order, so building the index from a file scan produces a
//! right-leaning chain of depth N. Every traversal here is iterative so that
//! shape is slow but safe; [`OrderedIndex::rebalance`] rebuilds a balanced
//! tree once the build phase is over.

mod tree;

pub use tree::{Iter, Node, Nodes, OrderedIndex};

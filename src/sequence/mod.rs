//! Sequence Module
//!
//! Singly-linked ordered sequence used to hand query results to callers.
//!
//! ## Responsibilities
//! - O(1) append through a tracked tail
//! - Linear search and removal by value, position, or predicate
//! - Predicate-filtered views that borrow from the source sequence
//!
//! ## Storage
//! Nodes live in a slot arena and link to each other by slot index, so the
//! tail is a plain index rather than a second owner of the last node.
//! Freed slots are recycled; a [`NodeHandle`] carries a generation so a
//! handle to a removed node never resolves to its replacement.

mod list;

pub use list::{IntoIter, Iter, NodeHandle, Sequence};

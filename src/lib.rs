//! This crate exposes an ordered map built on a plain Binary Search Tree (BST)
//! whose nodes know the size of their subtrees.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored records. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` stores a key, the value
//! associated with it, and up to two child `Node`s. The most important
//! invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    key less than its own key.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    key greater than its own key.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Searching for a key takes `O(height)` (where `height` is defined as the longest
//! path from the root `Node` to a leaf `Node`). BSTs also naturally support sorted
//! iteration by visiting the left subtree, then the subtree root, then the right subtree.
//!
//! ## Order statistics
//!
//! [`OrderedMap`] additionally caches, in every `Node`, how many `Node`s its subtree
//! holds. That makes two more questions `O(height)`:
//!
//! - [`rank`](OrderedMap::rank): how many keys are smaller than a given key?
//! - [`select`](OrderedMap::select): which key has exactly `i` smaller keys?
//!
//! Range counts ([`range_len`](OrderedMap::range_len)) fall out of `rank` for free.
//!
//! The tree never rebalances itself, so sorted input degrades it to a linked list.
//! [`OrderedMap::check`] verifies all of the above invariants and is meant for tests.

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

mod check;
mod error;
mod iter;
pub mod map;
mod node;


pub use check::IntegrityError;
pub use error::{Error, Result};
pub use iter::{Iter, Keys};
pub use map::OrderedMap;

//! In-order iterators over an [`OrderedMap`][crate::OrderedMap].
//!
//! Iteration keeps an explicit stack of the nodes still to be visited instead of recursing, so a
//! list-shaped tree is walked without deep recursion. A range iterator only needs its lower bound
//! while seeding the stack: everything pushed afterwards is to the right of a node already known
//! to be in range. The upper bound is turned into a count of remaining entries up front.

use std::borrow::Borrow;
use std::iter::FusedIterator;

use crate::node::{Link, Node};

/// An ascending iterator over the entries of an [`OrderedMap`][crate::OrderedMap].
///
/// Created by [`OrderedMap::iter`][crate::OrderedMap::iter] and
/// [`OrderedMap::range`][crate::OrderedMap::range].
pub struct Iter<'a, K, V> {
    stack: Vec<&'a Node<K, V>>,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    /// Iterates over every node under `root`.
    pub(crate) fn new(root: &'a Link<K, V>, len: usize) -> Self {
        let mut iter = Self {
            stack: Vec::new(),
            remaining: len,
        };
        iter.push_left_spine(root.as_deref());
        iter
    }

    /// Iterates over the `len` smallest keys under `root` that are not less than `lo`.
    pub(crate) fn starting_at<Q>(root: &'a Link<K, V>, lo: &Q, len: usize) -> Self
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut stack = Vec::new();
        let mut link = root.as_deref();
        while let Some(node) = link {
            if node.key.borrow() < lo {
                // This node and its whole left subtree are below the range.
                link = node.right.as_deref();
            } else {
                stack.push(node);
                link = node.left.as_deref();
            }
        }

        Self {
            stack,
            remaining: len,
        }
    }

    fn push_left_spine(&mut self, mut link: Option<&'a Node<K, V>>) {
        while let Some(node) = link {
            self.stack.push(node);
            link = node.left.as_deref();
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.stack.pop()?;
        self.remaining -= 1;
        self.push_left_spine(node.right.as_deref());

        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            stack: self.stack.clone(),
            remaining: self.remaining,
        }
    }
}

/// An ascending iterator over the keys of an [`OrderedMap`][crate::OrderedMap].
///
/// Created by [`OrderedMap::keys`][crate::OrderedMap::keys] and
/// [`OrderedMap::range_keys`][crate::OrderedMap::range_keys].
pub struct Keys<'a, K, V>(pub(crate) Iter<'a, K, V>);

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}

impl<K, V> FusedIterator for Keys<'_, K, V> {}

impl<K, V> Clone for Keys<'_, K, V> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

//! An ordered map backed by an unbalanced, size-annotated Binary Search Tree.
//!
//! Each node remembers how many nodes live in its subtree. That single number is enough to answer
//! order-statistic questions ("how many keys are smaller than this one?", "which key is the
//! fifth smallest?") in `O(height)` without visiting the rest of the tree.
//!
//! The tree is never rebalanced. Its shape depends only on the order of insertions and deletions,
//! so adversarial input (e.g. sorted keys) makes every operation `O(N)`.
//!
//! # Examples
//!
//! ```
//! use bst_map::OrderedMap;
//!
//! let mut map = OrderedMap::new();
//! map.put("b", 2);
//! map.put("a", 1);
//! map.put("c", 3);
//!
//! assert_eq!(map.keys().collect::<Vec<_>>(), [&"a", &"b", &"c"]);
//! assert_eq!(map.min(), Ok(&"a"));
//! assert_eq!(map.rank(&"c"), 2);
//! assert_eq!(map.select(1), Ok(&"b"));
//!
//! // Deleting a node returns its value.
//! assert_eq!(map.delete(&"b"), Some(2));
//! assert_eq!(map.keys().collect::<Vec<_>>(), [&"a", &"c"]);
//! assert_eq!(map.len(), 2);
//! ```

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;

use crate::error::{Error, Result};
use crate::iter::{Iter, Keys};
use crate::node::{self, Link, Node};

/// A map from totally-ordered keys to values, stored in a Binary Search Tree whose nodes cache
/// the size of their subtrees.
pub struct OrderedMap<K, V> {
    pub(crate) root: Link<K, V>,
}

impl<K, V> Default for OrderedMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Drop for OrderedMap<K, V> {
    // Box's own drop would recurse once per level, which a list-shaped tree can't afford.
    fn drop(&mut self) {
        let mut stack: Vec<Box<Node<K, V>>> = self.root.take().into_iter().collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
    }
}

impl<K, V> Clone for OrderedMap<K, V>
where
    K: Clone,
    V: Clone,
{
    fn clone(&self) -> Self {
        Self {
            root: node::clone_tree(&self.root),
        }
    }
}

impl<K, V> fmt::Debug for OrderedMap<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V> OrderedMap<K, V> {
    /// Generate a new, empty `OrderedMap`.
    pub fn new() -> Self {
        Self { root: None }
    }

    /// The number of entries in the map. `O(1)`.
    pub fn len(&self) -> usize {
        node::size(&self.root)
    }

    /// Whether the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates over every entry in ascending key order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(&self.root, self.len())
    }

    /// Iterates over every key in ascending order. An empty map yields nothing.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_map::OrderedMap;
    ///
    /// let map: OrderedMap<_, _> = [(3, 'c'), (1, 'a'), (2, 'b')].into_iter().collect();
    /// assert_eq!(map.keys().copied().collect::<Vec<_>>(), [1, 2, 3]);
    ///
    /// let empty: OrderedMap<i32, char> = OrderedMap::new();
    /// assert_eq!(empty.keys().next(), None);
    /// ```
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys(self.iter())
    }

    /// The smallest key in the map.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyContainer`] if the map has no entries.
    pub fn min(&self) -> Result<&K> {
        let mut node = self.root.as_deref().ok_or(Error::EmptyContainer)?;
        while let Some(left) = node.left.as_deref() {
            node = left;
        }
        Ok(&node.key)
    }

    /// The largest key in the map.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyContainer`] if the map has no entries.
    pub fn max(&self) -> Result<&K> {
        let mut node = self.root.as_deref().ok_or(Error::EmptyContainer)?;
        while let Some(right) = node.right.as_deref() {
            node = right;
        }
        Ok(&node.key)
    }

    /// Returns the key with exactly `rank` smaller keys in the map, i.e. the `rank + 1`th
    /// smallest key.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidRank`] unless `rank < self.len()`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_map::{Error, OrderedMap};
    ///
    /// let map: OrderedMap<_, _> = [(10, ()), (30, ()), (20, ())].into_iter().collect();
    ///
    /// assert_eq!(map.select(0), Ok(&10));
    /// assert_eq!(map.select(2), Ok(&30));
    /// assert_eq!(map.select(3), Err(Error::InvalidRank { rank: 3, len: 3 }));
    /// ```
    pub fn select(&self, rank: usize) -> Result<&K> {
        let len = self.len();
        let out_of_bounds = Error::InvalidRank { rank, len };
        if rank >= len {
            return Err(out_of_bounds);
        }

        let mut rank = rank;
        let mut link = self.root.as_deref();
        while let Some(node) = link {
            let left_size = node::size(&node.left);
            match left_size.cmp(&rank) {
                Ordering::Greater => link = node.left.as_deref(),
                Ordering::Less => {
                    rank -= left_size + 1;
                    link = node.right.as_deref();
                }
                Ordering::Equal => return Ok(&node.key),
            }
        }

        // Only reachable if the cached sizes disagree with the tree.
        Err(out_of_bounds)
    }

    /// Removes the entry with the smallest key and returns it.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyContainer`] if the map has no entries.
    pub fn delete_min(&mut self) -> Result<(K, V)> {
        let min = node::take_min(&mut self.root).ok_or(Error::EmptyContainer)?;
        Ok(min.into_entry())
    }

    /// Removes the entry with the largest key and returns it.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyContainer`] if the map has no entries.
    pub fn delete_max(&mut self) -> Result<(K, V)> {
        let max = node::take_max(&mut self.root).ok_or(Error::EmptyContainer)?;
        Ok(max.into_entry())
    }
}

impl<K, V> OrderedMap<K, V>
where
    K: Ord,
{
    /// Potentially finds the value associated with the given key. If no entry has the key,
    /// `None` is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_map::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.put(1, 2);
    ///
    /// assert_eq!(map.get(&1), Some(&2));
    /// assert_eq!(map.get(&42), None);
    /// ```
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        node::find(&self.root, key)
    }

    /// Like [`get`][Self::get] but allows the value to be changed in place.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        node::find_mut(&mut self.root, key)
    }

    /// Whether the map has an entry for `key`.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.get(key).is_some()
    }

    /// Stores `value` under `key`. Putting a new value for an existing key overwrites its value
    /// and returns the old one.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_map::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    ///
    /// assert_eq!(map.put(1, 2), None);
    /// assert_eq!(map.get(&1), Some(&2));
    ///
    /// assert_eq!(map.put(1, 3), Some(2));
    /// assert_eq!(map.get(&1), Some(&3));
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        node::put(&mut self.root, key, value)
    }

    /// Stores `Some(value)` under `key`, or deletes `key` when given `None`. Either way the value
    /// previously stored under `key` is returned.
    ///
    /// This is for callers that treat a missing value as a request to delete. Everyone else
    /// should call [`put`][Self::put] or [`delete`][Self::delete].
    pub fn put_or_delete(&mut self, key: K, value: Option<V>) -> Option<V> {
        match value {
            Some(value) => self.put(key, value),
            None => self.delete(&key),
        }
    }

    /// Deletes the entry for `key` and returns its value. If the map has no entry for `key`,
    /// nothing happens.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_map::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.put(1, 2);
    ///
    /// assert_eq!(map.delete(&1), Some(2));
    /// assert_eq!(map.delete(&1), None);
    /// assert!(map.is_empty());
    /// ```
    pub fn delete<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        node::delete(&mut self.root, key)
    }

    /// The number of keys in the map strictly less than `key`. `key` doesn't need to be in the
    /// map.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_map::OrderedMap;
    ///
    /// let map: OrderedMap<_, _> = [(10, ()), (20, ()), (30, ())].into_iter().collect();
    ///
    /// assert_eq!(map.rank(&20), 1);
    /// assert_eq!(map.rank(&25), 2);
    /// assert_eq!(map.rank(&5), 0);
    /// ```
    pub fn rank<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut rank = 0;
        let mut link = self.root.as_deref();
        while let Some(node) = link {
            match key.cmp(node.key.borrow()) {
                Ordering::Less => link = node.left.as_deref(),
                Ordering::Equal => return rank + node::size(&node.left),
                Ordering::Greater => {
                    rank += 1 + node::size(&node.left);
                    link = node.right.as_deref();
                }
            }
        }
        rank
    }

    /// How many keys `k` in the map satisfy `lo <= k <= hi`. Zero when `lo > hi`.
    ///
    /// Computed from ranks, so this is `O(height)` however wide the range is.
    pub fn range_len<Q>(&self, lo: &Q, hi: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        if lo > hi {
            return 0;
        }
        self.rank(hi) - self.rank(lo) + usize::from(self.contains(hi))
    }

    /// Iterates in ascending order over the entries whose keys `k` satisfy `lo <= k <= hi`.
    /// Nothing is yielded when `lo > hi`.
    pub fn range<Q>(&self, lo: &Q, hi: &Q) -> Iter<'_, K, V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        Iter::starting_at(&self.root, lo, self.range_len(lo, hi))
    }

    /// Iterates in ascending order over the keys `k` with `lo <= k <= hi`. Nothing is yielded
    /// when `lo > hi`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_map::OrderedMap;
    ///
    /// let map: OrderedMap<_, _> = (0..10).map(|x| (x * 10, x)).collect();
    ///
    /// assert_eq!(map.range_keys(&15, &40).copied().collect::<Vec<_>>(), [20, 30, 40]);
    /// assert_eq!(map.range_keys(&40, &15).count(), 0);
    /// assert_eq!(map.range_len(&15, &40), 3);
    /// ```
    pub fn range_keys<Q>(&self, lo: &Q, hi: &Q) -> Keys<'_, K, V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        Keys(self.range(lo, hi))
    }
}

impl<'a, K, V> IntoIterator for &'a OrderedMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V> Extend<(K, V)> for OrderedMap<K, V>
where
    K: Ord,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}

impl<K, V> FromIterator<(K, V)> for OrderedMap<K, V>
where
    K: Ord,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

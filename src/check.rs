//! Integrity verification for [`OrderedMap`].
//!
//! None of this runs on its own. Mutators never call it; it walks the whole tree (and re-runs
//! `rank`/`select` for every entry) so it is meant for tests and debugging sessions.

use thiserror::Error as ThisError;

use crate::node::Node;
use crate::OrderedMap;

/// The invariant an [`OrderedMap`] was found to break by [`OrderedMap::check`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, ThisError)]
pub enum IntegrityError {
    /// Some key is not strictly between the keys of its ancestors.
    #[error("keys are not in symmetric order")]
    NotOrdered,

    /// Some node's cached size isn't one more than the sizes of its children.
    #[error("subtree counts are not consistent")]
    SizeMismatch,

    /// `rank` and `select` disagree somewhere.
    #[error("ranks are not consistent")]
    RankMismatch,
}

impl<K, V> OrderedMap<K, V>
where
    K: Ord,
{
    /// Verifies that the tree is a BST, that every cached subtree size is right, and that `rank`
    /// and `select` are inverses of each other. Reports the first broken invariant.
    ///
    /// This visits every node several times; don't call it anywhere performance matters.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_map::OrderedMap;
    ///
    /// let mut map: OrderedMap<_, _> = (0..32).map(|x| ((x * 7) % 32, x)).collect();
    /// map.delete(&9);
    /// map.delete_min().unwrap();
    ///
    /// assert_eq!(map.check(), Ok(()));
    /// ```
    pub fn check(&self) -> Result<(), IntegrityError> {
        if !self.is_ordered() {
            return Err(IntegrityError::NotOrdered);
        }
        if !self.is_size_consistent() {
            return Err(IntegrityError::SizeMismatch);
        }
        if !self.is_rank_consistent() {
            return Err(IntegrityError::RankMismatch);
        }
        Ok(())
    }

    /// [`check`][Self::check] reduced to a boolean. A failure is logged at `warn` level.
    pub fn is_consistent(&self) -> bool {
        match self.check() {
            Ok(()) => true,
            Err(e) => {
                log::warn!("integrity check failed: {e}");
                false
            }
        }
    }

    /// Every key must lie strictly between the nearest ancestors it hangs right and left of.
    /// Strictness also rules out duplicate keys.
    fn is_ordered(&self) -> bool {
        // (node, exclusive lower bound, exclusive upper bound)
        let mut stack: Vec<(&Node<K, V>, Option<&K>, Option<&K>)> = Vec::new();
        stack.extend(self.root.as_deref().map(|root| (root, None, None)));

        let mut visited = 0usize;
        while let Some((node, lo, hi)) = stack.pop() {
            visited += 1;
            if !lo.map_or(true, |lo| node.key > *lo) {
                log::debug!("node #{visited} in pre-order is not above its lower bound");
                return false;
            }
            if !hi.map_or(true, |hi| node.key < *hi) {
                log::debug!("node #{visited} in pre-order is not below its upper bound");
                return false;
            }
            stack.extend(node.left.as_deref().map(|left| (left, lo, Some(&node.key))));
            stack.extend(node.right.as_deref().map(|right| (right, Some(&node.key), hi)));
        }
        true
    }

    fn is_size_consistent(&self) -> bool {
        let mut stack: Vec<&Node<K, V>> = self.root.as_deref().into_iter().collect();

        while let Some(node) = stack.pop() {
            let expected = 1 + crate::node::size(&node.left) + crate::node::size(&node.right);
            if node.size != expected {
                log::debug!("node caches size {} but has {expected} nodes", node.size);
                return false;
            }
            stack.extend(node.left.as_deref());
            stack.extend(node.right.as_deref());
        }
        true
    }

    fn is_rank_consistent(&self) -> bool {
        for i in 0..self.len() {
            match self.select(i) {
                Ok(key) if self.rank(key) == i => {}
                _ => {
                    log::debug!("select and rank disagree on rank {i}");
                    return false;
                }
            }
        }

        for (i, key) in self.keys().enumerate() {
            if self.select(self.rank(key)) != Ok(key) {
                log::debug!("select and rank disagree on the key at position {i}");
                return false;
            }
        }
        true
    }
}

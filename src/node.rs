//! Size-annotated tree nodes and the mutators that keep the annotations honest.
//!
//! Every walk here is a loop over a cursor rather than a recursion, so a tree that has
//! degenerated into a long chain (e.g. from sorted input) can't exhaust the call stack. Mutators
//! that may change the shape only adjust sizes once they know the walk will succeed: a fresh key
//! bumps every size on its search path, a present key being removed lowers them.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::mem;

/// An owned, possibly empty, subtree.
pub(crate) type Link<K, V> = Option<Box<Node<K, V>>>;

pub(crate) struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) left: Link<K, V>,
    pub(crate) right: Link<K, V>,
    /// How many nodes are in the subtree rooted at this node, including itself.
    pub(crate) size: usize,
}

/// The number of nodes under `link`. An empty subtree has size 0.
pub(crate) fn size<K, V>(link: &Link<K, V>) -> usize {
    link.as_ref().map_or(0, |n| n.size)
}

impl<K, V> Node<K, V> {
    pub(crate) fn new_boxed(key: K, value: V) -> Box<Self> {
        Box::new(Node {
            key,
            value,
            left: None,
            right: None,
            size: 1,
        })
    }

    /// Recounts `self.size` from the sizes of its children.
    pub(crate) fn fix_size(&mut self) {
        self.size = 1 + size(&self.left) + size(&self.right);
    }

    /// Consumes a node that has already been unlinked from its parent and returns its key and
    /// value. Its children must have been moved elsewhere first.
    pub(crate) fn into_entry(self: Box<Self>) -> (K, V) {
        let Node { key, value, .. } = *self;
        (key, value)
    }

    /// Consumes a node that has been unlinked from its parent and returns its value along with
    /// the subtree that should take its place.
    ///
    /// With two children this is Hibbard deletion: the in-order successor (the smallest node of
    /// the right subtree) is detached and adopts both of the removed node's children.
    fn splice_out(self: Box<Self>) -> (V, Link<K, V>) {
        let Node {
            value, left, right, ..
        } = *self;

        let replacement = match (left, right) {
            (left, None) => left,
            (None, right) => right,
            (left, mut right) => match take_min(&mut right) {
                Some(mut successor) => {
                    successor.left = left;
                    successor.right = right;
                    successor.fix_size();
                    Some(successor)
                }
                None => left,
            },
        };

        (value, replacement)
    }
}

/// Finds the value stored under `key` in the subtree behind `link`.
pub(crate) fn find<'a, K, V, Q>(link: &'a Link<K, V>, key: &Q) -> Option<&'a V>
where
    K: Borrow<Q>,
    Q: ?Sized + Ord,
{
    let mut link = link.as_deref();
    while let Some(node) = link {
        match key.cmp(node.key.borrow()) {
            Ordering::Less => link = node.left.as_deref(),
            Ordering::Equal => return Some(&node.value),
            Ordering::Greater => link = node.right.as_deref(),
        }
    }
    None
}

/// Like [`find`] but hands out the value mutably.
pub(crate) fn find_mut<'a, K, V, Q>(link: &'a mut Link<K, V>, key: &Q) -> Option<&'a mut V>
where
    K: Borrow<Q>,
    Q: ?Sized + Ord,
{
    let mut link = link.as_deref_mut();
    while let Some(node) = link {
        match key.cmp(node.key.borrow()) {
            Ordering::Less => link = node.left.as_deref_mut(),
            Ordering::Equal => return Some(&mut node.value),
            Ordering::Greater => link = node.right.as_deref_mut(),
        }
    }
    None
}

/// Stores `value` under `key` in the subtree behind `root`. Returns the value previously stored
/// under `key`, if there was one. Only a fresh key grows the tree.
pub(crate) fn put<K, V>(root: &mut Link<K, V>, key: K, value: V) -> Option<V>
where
    K: Ord,
{
    if let Some(slot) = find_mut(root, &key) {
        return Some(mem::replace(slot, value));
    }

    // `key` is absent, so every node on the way down gains exactly one descendant.
    let mut link = root;
    while let Some(node) = link {
        node.size += 1;
        link = if key < node.key {
            &mut node.left
        } else {
            &mut node.right
        };
    }
    *link = Some(Node::new_boxed(key, value));
    None
}

/// Removes `key` from the subtree behind `root` and returns its value. If `key` isn't in the
/// subtree nothing changes and `None` is returned.
pub(crate) fn delete<K, V, Q>(root: &mut Link<K, V>, key: &Q) -> Option<V>
where
    K: Borrow<Q>,
    Q: ?Sized + Ord,
{
    find(root, key)?;

    // `key` is present, so every node above it loses exactly one descendant.
    let mut link = root;
    loop {
        let ordering = key.cmp(link.as_deref()?.key.borrow());
        if ordering == Ordering::Equal {
            break;
        }
        let node = link.as_mut()?;
        node.size -= 1;
        link = if ordering == Ordering::Less {
            &mut node.left
        } else {
            &mut node.right
        };
    }

    let (value, replacement) = link.take()?.splice_out();
    *link = replacement;
    Some(value)
}

/// Detaches the smallest node of the subtree behind `root` and returns it with no children.
/// `None` if the subtree is empty.
pub(crate) fn take_min<K, V>(root: &mut Link<K, V>) -> Option<Box<Node<K, V>>> {
    let mut link = root;
    while link.as_deref()?.left.is_some() {
        let node = link.as_mut()?;
        node.size -= 1;
        link = &mut node.left;
    }

    let mut min = link.take()?;
    *link = min.right.take();
    Some(min)
}

/// Detaches the largest node of the subtree behind `root`. Mirror image of [`take_min`].
pub(crate) fn take_max<K, V>(root: &mut Link<K, V>) -> Option<Box<Node<K, V>>> {
    let mut link = root;
    while link.as_deref()?.right.is_some() {
        let node = link.as_mut()?;
        node.size -= 1;
        link = &mut node.right;
    }

    let mut max = link.take()?;
    *link = max.left.take();
    Some(max)
}

/// Deep-copies the subtree behind `root`, one node at a time off an explicit stack.
pub(crate) fn clone_tree<K, V>(root: &Link<K, V>) -> Link<K, V>
where
    K: Clone,
    V: Clone,
{
    let mut copy = None;
    {
        let mut stack: Vec<(&Node<K, V>, &mut Link<K, V>)> = Vec::new();
        if let Some(node) = root.as_deref() {
            stack.push((node, &mut copy));
        }

        while let Some((source, slot)) = stack.pop() {
            let node = slot.insert(Box::new(Node {
                key: source.key.clone(),
                value: source.value.clone(),
                left: None,
                right: None,
                size: source.size,
            }));
            let Node { left, right, .. } = &mut **node;
            if let Some(source_left) = source.left.as_deref() {
                stack.push((source_left, left));
            }
            if let Some(source_right) = source.right.as_deref() {
                stack.push((source_right, right));
            }
        }
    }
    copy
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(keys: &[i32]) -> Link<i32, i32> {
        let mut root = None;
        for &k in keys {
            put(&mut root, k, k * 10);
        }
        root
    }

    /// In-order keys of a subtree.
    fn in_order(link: &Link<i32, i32>, out: &mut Vec<i32>) {
        if let Some(n) = link {
            in_order(&n.left, out);
            out.push(n.key);
            in_order(&n.right, out);
        }
    }

    #[test]
    fn put_counts_only_new_keys() {
        let mut root = build(&[5, 3, 8]);
        assert_eq!(size(&root), 3);

        assert_eq!(put(&mut root, 3, 33), Some(30));
        assert_eq!(size(&root), 3);

        assert_eq!(put(&mut root, 4, 40), None);
        assert_eq!(size(&root), 4);
        assert_eq!(root.as_ref().map(|n| size(&n.left)), Some(2));
    }

    #[test]
    fn delete_missing_key_changes_nothing() {
        let mut root = build(&[5, 3, 8]);
        assert_eq!(delete(&mut root, &42), None);
        assert_eq!(size(&root), 3);
    }

    #[test]
    fn two_child_delete_promotes_successor() {
        let mut root = build(&[5, 3, 8, 1, 4, 7, 9]);

        assert_eq!(delete(&mut root, &5), Some(50));

        let root_node = root.as_ref().expect("tree still has nodes");
        assert_eq!(root_node.key, 7);
        assert_eq!(root_node.size, 6);

        let mut keys = Vec::new();
        in_order(&root, &mut keys);
        assert_eq!(keys, [1, 3, 4, 7, 8, 9]);
    }

    #[test]
    fn two_child_delete_with_deeper_successor() {
        let mut root = build(&[5, 3, 10, 8, 12, 6, 9, 7]);

        assert_eq!(delete(&mut root, &5), Some(50));

        let root_node = root.as_ref().expect("tree still has nodes");
        assert_eq!(root_node.key, 6);
        assert_eq!(root_node.size, 7);
        // 6 was pulled out from under 8, leaving 7 in its place.
        let eight = root_node
            .right
            .as_ref()
            .and_then(|ten| ten.left.as_ref())
            .expect("8 is still left of 10");
        assert_eq!(eight.key, 8);
        assert_eq!(eight.left.as_ref().map(|n| n.key), Some(7));
        assert_eq!(eight.size, 3);
    }

    #[test]
    fn take_min_and_max_detach_extremes() {
        let mut root = build(&[5, 3, 8, 1, 4, 7, 9]);

        let min = take_min(&mut root).expect("non-empty");
        assert_eq!(min.into_entry(), (1, 10));
        assert_eq!(size(&root), 6);
        assert_eq!(root.as_ref().map(|n| size(&n.left)), Some(2));

        let max = take_max(&mut root).expect("non-empty");
        assert_eq!(max.into_entry(), (9, 90));
        assert_eq!(size(&root), 5);
        assert_eq!(root.as_ref().map(|n| size(&n.right)), Some(2));
    }

    #[test]
    fn take_min_of_leaf_leaves_nothing() {
        let mut root = Some(Node::new_boxed(1, 1));
        let min = take_min(&mut root).expect("non-empty");
        assert_eq!(min.key, 1);
        assert!(root.is_none());
        assert!(take_min(&mut root).is_none());
        assert!(take_max(&mut root).is_none());
    }

    #[test]
    fn take_min_keeps_right_child_of_the_minimum() {
        let mut root = build(&[5, 2, 8, 3, 4]);

        let min = take_min(&mut root).expect("non-empty");
        assert_eq!(min.key, 2);
        assert!(min.left.is_none() && min.right.is_none());

        let mut keys = Vec::new();
        in_order(&root, &mut keys);
        assert_eq!(keys, [3, 4, 5, 8]);
        assert_eq!(root.as_ref().map(|n| size(&n.left)), Some(2));
    }

    #[test]
    fn put_and_delete_only_touch_sizes_on_the_search_path() {
        let mut root = build(&[5, 3, 8, 1, 4, 7, 9]);
        let left_size = |root: &Link<i32, i32>| root.as_ref().map(|n| size(&n.left));
        let right_size = |root: &Link<i32, i32>| root.as_ref().map(|n| size(&n.right));

        put(&mut root, 6, 60);
        assert_eq!((size(&root), left_size(&root), right_size(&root)), (8, Some(3), Some(4)));

        delete(&mut root, &4);
        assert_eq!((size(&root), left_size(&root), right_size(&root)), (7, Some(2), Some(4)));

        // Neither a miss nor an overwrite changes any size.
        delete(&mut root, &2);
        put(&mut root, 9, 0);
        assert_eq!((size(&root), left_size(&root), right_size(&root)), (7, Some(2), Some(4)));
    }

    #[test]
    fn clone_tree_copies_shape_and_sizes() {
        let root = build(&[5, 3, 8, 1, 4, 7, 9]);
        let copy = clone_tree(&root);

        let mut keys = Vec::new();
        in_order(&copy, &mut keys);
        assert_eq!(keys, [1, 3, 4, 5, 7, 8, 9]);
        assert_eq!(copy.as_ref().map(|n| (n.key, n.size)), Some((5, 7)));
        assert_eq!(copy.as_ref().map(|n| size(&n.left)), Some(3));
        assert_eq!(find(&copy, &7), Some(&70));
        assert!(clone_tree::<i32, i32>(&None).is_none());
    }
}

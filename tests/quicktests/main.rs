use bst_map::OrderedMap;

use std::collections::{BTreeMap, HashSet};

use quickcheck::quickcheck;

/// Builds both an `OrderedMap` and the equivalent `BTreeMap` from the same puts.
fn both(xs: &[(i8, i8)]) -> (OrderedMap<i8, i8>, BTreeMap<i8, i8>) {
    (xs.iter().copied().collect(), xs.iter().copied().collect())
}

quickcheck! {
    fn keys_are_sorted_and_unique(xs: Vec<(i8, i8)>) -> bool {
        let (bst, map) = both(&xs);
        bst.keys().eq(map.keys()) && bst.iter().eq(map.iter())
    }

    fn select_inverts_rank(xs: Vec<(i8, i8)>) -> bool {
        let (bst, _) = both(&xs);
        (0..bst.len()).all(|i| bst.select(i).map(|k| bst.rank(k)) == Ok(i))
            && bst.keys().all(|k| bst.select(bst.rank(k)) == Ok(k))
    }

    fn range_len_matches_range_keys(xs: Vec<(i8, i8)>, lo: i8, hi: i8) -> bool {
        let (bst, map) = both(&xs);
        let expected = if lo <= hi { map.range(lo..=hi).count() } else { 0 };

        bst.range_len(&lo, &hi) == expected
            && bst.range_keys(&lo, &hi).count() == expected
            && bst.range(&lo, &hi).len() == expected
    }

    fn range_matches_btree_range_after_deletes(
        xs: Vec<(i8, i8)>,
        deletes: Vec<i8>,
        lo: i8,
        hi: i8
    ) -> bool {
        let (mut bst, mut map) = both(&xs);
        for d in &deletes {
            if bst.delete(d) != map.remove(d) {
                return false;
            }
        }

        let expected: Vec<_> = if lo <= hi { map.range(lo..=hi).collect() } else { Vec::new() };
        bst.range(&lo, &hi).collect::<Vec<_>>() == expected
            && bst.range_keys(&lo, &hi).eq(expected.iter().map(|(k, _)| *k))
    }

    fn size_law(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
        let mut bst = OrderedMap::new();
        for x in &xs {
            bst.put(*x, *x);
        }
        let mut deleted = 0;
        for d in &deletes {
            if bst.delete(d).is_some() {
                deleted += 1;
            }
        }

        let distinct: HashSet<_> = xs.iter().collect();
        bst.len() == distinct.len() - deleted && bst.check().is_ok()
    }

    fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
        let mut bst = OrderedMap::new();
        for x in &xs {
            bst.put(*x, *x);
        }
        for delete in &deletes {
            bst.delete(delete);
        }

        let mut still_present = xs;
        for delete in &deletes {
            // We may have put the same value multiple times - delete each one.
            while let Some(pos) = still_present.iter().position(|x| x == delete) {
                still_present.swap_remove(pos);
            }
        }

        deletes.iter().all(|x| bst.get(x).is_none())
            && still_present.iter().all(|x| bst.get(x).is_some())
    }

    fn min_max_match_ends(xs: Vec<(i8, i8)>) -> bool {
        let (bst, map) = both(&xs);
        bst.min().ok() == map.keys().next() && bst.max().ok() == map.keys().next_back()
    }
}

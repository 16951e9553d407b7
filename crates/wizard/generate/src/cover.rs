//! Greedy minimal set cover.

use std::collections::{BTreeMap, BTreeSet};

/// Indices of a minimal subset of `items` whose signatures cover the union
/// of all signatures, in ascending order.
///
/// Each round picks the item adding the most uncovered elements, earliest
/// index on ties. A reverse pass over the picks then drops any item whose
/// elements are all covered by the others, so removing any selected item
/// shrinks the union.
pub fn cover_indices<T, K, I, F>(items: &[T], signature: F) -> Vec<usize>
where
    K: Ord,
    I: IntoIterator<Item = K>,
    F: Fn(&T) -> I,
{
    let signatures: Vec<BTreeSet<K>> = items
        .iter()
        .map(|item| signature(item).into_iter().collect())
        .collect();

    let mut uncovered: BTreeSet<&K> = signatures.iter().flatten().collect();
    let mut picked: Vec<usize> = Vec::new();

    while !uncovered.is_empty() {
        let mut best: Option<(usize, usize)> = None;
        for (i, sig) in signatures.iter().enumerate() {
            let gain = sig.iter().filter(|k| uncovered.contains(k)).count();
            if gain > best.map_or(0, |(_, g)| g) {
                best = Some((i, gain));
            }
        }
        let Some((i, _)) = best else {
            break;
        };
        for k in &signatures[i] {
            uncovered.remove(k);
        }
        picked.push(i);
    }

    let mut counts: BTreeMap<&K, usize> = BTreeMap::new();
    for &i in &picked {
        for k in &signatures[i] {
            *counts.entry(k).or_default() += 1;
        }
    }
    let mut kept: BTreeSet<usize> = picked.iter().copied().collect();
    for &i in picked.iter().rev() {
        let redundant = signatures[i].iter().all(|k| counts.get(k).copied().unwrap_or(0) > 1);
        if redundant {
            for k in &signatures[i] {
                if let Some(n) = counts.get_mut(k) {
                    *n -= 1;
                }
            }
            kept.remove(&i);
        }
    }

    kept.into_iter().collect()
}

/// Owned variant of [`cover_indices`]: the selected items in input order.
pub fn find_cover<T, K, I, F>(items: Vec<T>, signature: F) -> Vec<T>
where
    K: Ord,
    I: IntoIterator<Item = K>,
    F: Fn(&T) -> I,
{
    let selected: BTreeSet<usize> = cover_indices(&items, signature).into_iter().collect();
    items
        .into_iter()
        .enumerate()
        .filter(|(i, _)| selected.contains(i))
        .map(|(_, item)| item)
        .collect()
}

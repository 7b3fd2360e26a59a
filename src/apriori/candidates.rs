use super::storage::SupportTable;
use super::transactions::ItemId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::ops::ControlFlow;

/// How level-`L` candidates are formed from the level `L-1` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JoinStrategy {
    /// Every distinct union of two frequent itemsets with exactly `L` items.
    #[default]
    Union,
    /// Join only itemsets sharing their first `L-2` items, then drop
    /// candidates with an infrequent `(L-1)`-subset.
    Prefix,
}

/// Candidates for `level`, sorted lexicographically.
pub fn generate_candidates(
    previous: &SupportTable,
    level: usize,
    strategy: JoinStrategy,
) -> Vec<Vec<ItemId>> {
    match strategy {
        JoinStrategy::Union => union_join(previous, level),
        JoinStrategy::Prefix => prefix_join(previous, level),
    }
}

fn union_join(previous: &SupportTable, level: usize) -> Vec<Vec<ItemId>> {
    let mut candidates = BTreeSet::new();

    for left in previous.iter_itemsets() {
        for right in previous.iter_itemsets() {
            let union = sorted_union(left, right);
            if union.len() == level {
                candidates.insert(union);
            }
        }
    }

    candidates.into_iter().collect()
}

fn prefix_join(previous: &SupportTable, level: usize) -> Vec<Vec<ItemId>> {
    let mut sorted: Vec<&[ItemId]> = previous.iter_itemsets().collect();
    sorted.sort_unstable();

    let prefix_len = level.saturating_sub(2);
    let mut candidates = Vec::new();

    for (i, left) in sorted.iter().enumerate() {
        for right in &sorted[i + 1..] {
            if left[..prefix_len] != right[..prefix_len] {
                break;
            }

            let mut candidate = left.to_vec();
            candidate.push(right[prefix_len]);

            if all_subsets_frequent(&candidate, previous) {
                candidates.push(candidate);
            }
        }
    }

    candidates
}

fn all_subsets_frequent(candidate: &[ItemId], previous: &SupportTable) -> bool {
    let mut subset = Vec::with_capacity(candidate.len().saturating_sub(1));
    (0..candidate.len()).all(|skip| {
        subset.clear();
        subset.extend(
            candidate
                .iter()
                .enumerate()
                .filter(|&(i, _)| i != skip)
                .map(|(_, &item)| item),
        );
        previous.contains(&subset)
    })
}

fn sorted_union(left: &[ItemId], right: &[ItemId]) -> Vec<ItemId> {
    let mut union = Vec::with_capacity(left.len() + right.len());
    let (mut i, mut j) = (0, 0);

    while i < left.len() && j < right.len() {
        if left[i] < right[j] {
            union.push(left[i]);
            i += 1;
        } else if right[j] < left[i] {
            union.push(right[j]);
            j += 1;
        } else {
            union.push(left[i]);
            i += 1;
            j += 1;
        }
    }
    union.extend_from_slice(&left[i..]);
    union.extend_from_slice(&right[j..]);

    union
}

/// Calls `callback` with every `k`-combination of `items`, in
/// lexicographic order of positions, until it returns `Break`.
pub fn for_each_combination<B, F>(items: &[ItemId], k: usize, callback: &mut F) -> ControlFlow<B>
where
    F: FnMut(&[ItemId]) -> ControlFlow<B>,
{
    if k == 0 || k > items.len() {
        return ControlFlow::Continue(());
    }

    let mut current = Vec::with_capacity(k);
    combinations_recursive(items, k, 0, &mut current, callback)
}

fn combinations_recursive<B, F>(
    items: &[ItemId],
    k: usize,
    start: usize,
    current: &mut Vec<ItemId>,
    callback: &mut F,
) -> ControlFlow<B>
where
    F: FnMut(&[ItemId]) -> ControlFlow<B>,
{
    if current.len() == k {
        return callback(current);
    }

    for i in start..items.len() {
        current.push(items[i]);
        combinations_recursive(items, k, i + 1, current, callback)?;
        current.pop();
    }

    ControlFlow::Continue(())
}

//! Candidate generation for level-wise frequent itemset mining.
//!
//! The join step combines every item that survived the previous level into
//! all itemsets of the next size; the prune step drops any candidate with a
//! sub-itemset that was not frequent at the previous level.

use std::collections::{BTreeSet, HashSet};

use crate::types::{Item, Itemset};

/// Lazy `k`-combinations of a pool, in lexicographic index order.
///
/// Each combination is produced exactly once; the iterator is not
/// restartable.
#[derive(Debug, Clone)]
pub struct Combinations<T> {
    pool: Vec<T>,
    indices: Vec<usize>,
    first: bool,
    done: bool,
}

impl<T: Clone> Combinations<T> {
    pub fn new(pool: Vec<T>, k: usize) -> Self {
        let done = k > pool.len();
        Self {
            pool,
            indices: (0..k).collect(),
            first: true,
            done,
        }
    }

    fn current(&self) -> Vec<T> {
        self.indices.iter().map(|&i| self.pool[i].clone()).collect()
    }
}

impl<T: Clone> Iterator for Combinations<T> {
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        if self.first {
            self.first = false;
            return Some(self.current());
        }

        let n = self.pool.len();
        let k = self.indices.len();

        // Rightmost index that can still move forward.
        let pivot = (0..k).rev().find(|&i| self.indices[i] != i + n - k);
        match pivot {
            Some(i) => {
                self.indices[i] += 1;
                for j in i + 1..k {
                    self.indices[j] = self.indices[j - 1] + 1;
                }
                Some(self.current())
            }
            None => {
                self.done = true;
                None
            }
        }
    }
}

/// Join step: every `k`-itemset over the sorted union of `frequent`.
pub fn join<I: Item>(frequent: &HashSet<Itemset<I>>, k: usize) -> impl Iterator<Item = Itemset<I>> {
    let universe: Vec<I> = frequent
        .iter()
        .flatten()
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    Combinations::new(universe, k).map(|combination| combination.into_iter().collect())
}

/// Whether every `(k-1)`-subset of `candidate` is in `frequent`.
pub fn has_frequent_subsets<I: Item>(
    candidate: &Itemset<I>,
    frequent: &HashSet<Itemset<I>>,
) -> bool {
    candidate.iter().all(|dropped| {
        let subset: Itemset<I> = candidate
            .iter()
            .filter(|item| *item != dropped)
            .cloned()
            .collect();
        frequent.contains(&subset)
    })
}

/// Generate the size-`k` candidates from the itemsets frequent at size `k - 1`.
///
/// Sizes below 2 produce nothing: level one is seeded from the transaction
/// index, not from here.
pub fn apriori_gen<I: Item>(frequent: &HashSet<Itemset<I>>, k: usize) -> Vec<Itemset<I>> {
    if k < 2 {
        return Vec::new();
    }

    let joined = join(frequent, k);

    // Every 1-subset of a pair is a frequent singleton already.
    if k == 2 {
        return joined.collect();
    }

    joined
        .filter(|candidate| has_frequent_subsets(candidate, frequent))
        .collect()
}

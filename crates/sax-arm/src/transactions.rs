//! Transaction index: per-item occurrence sets for fast support queries.

use std::collections::{HashMap, HashSet};

use crate::types::{Item, Itemset};

/// Indexes a list of transactions by the positions each item occurs at.
///
/// Built once per mining run and read-only afterwards.
#[derive(Debug, Clone)]
pub struct TransactionIndex<I: Item> {
    /// Distinct items in first-seen order.
    items: Vec<I>,
    /// Item -> indices of the transactions containing it. Never empty.
    occurrences: HashMap<I, HashSet<usize>>,
    count: usize,
}

impl<I: Item> Default for TransactionIndex<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: Item> TransactionIndex<I> {
    /// Create an empty index.
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            occurrences: HashMap::new(),
            count: 0,
        }
    }

    /// Build an index from a list of transactions.
    pub fn from_transactions<T, U>(transactions: T) -> Self
    where
        T: IntoIterator<Item = U>,
        U: IntoIterator<Item = I>,
    {
        let mut index = Self::new();
        index.ingest(transactions);
        index
    }

    /// Append every transaction, in order.
    pub fn ingest<T, U>(&mut self, transactions: T)
    where
        T: IntoIterator<Item = U>,
        U: IntoIterator<Item = I>,
    {
        for transaction in transactions {
            self.add_transaction(transaction);
        }
    }

    /// Append one transaction and return its index.
    ///
    /// Transactions are not deduplicated; an empty transaction still counts
    /// toward the total.
    pub fn add_transaction<U: IntoIterator<Item = I>>(&mut self, transaction: U) -> usize {
        let index = self.count;
        for item in transaction {
            match self.occurrences.get_mut(&item) {
                Some(positions) => {
                    positions.insert(index);
                }
                None => {
                    self.items.push(item.clone());
                    self.occurrences.insert(item, HashSet::from([index]));
                }
            }
        }
        self.count += 1;
        index
    }

    /// Fraction of transactions containing every item of `candidate`.
    ///
    /// Returns `0.0` if any item was never seen, if the candidate is empty,
    /// or if the index holds no transactions.
    pub fn support(&self, candidate: &Itemset<I>) -> f64 {
        if self.count == 0 || candidate.is_empty() {
            return 0.0;
        }

        let mut sets = Vec::with_capacity(candidate.len());
        for item in candidate {
            match self.occurrences.get(item) {
                Some(positions) => sets.push(positions),
                None => return 0.0,
            }
        }

        // Probe from the smallest set to bound the work.
        sets.sort_by_key(|positions| positions.len());
        let (smallest, rest) = match sets.split_first() {
            Some(split) => split,
            None => return 0.0,
        };

        let hits = smallest
            .iter()
            .filter(|idx| rest.iter().all(|positions| positions.contains(*idx)))
            .count();

        hits as f64 / self.count as f64
    }

    /// Each distinct item as a singleton itemset, in first-seen order.
    pub fn initial_candidates(&self) -> Vec<Itemset<I>> {
        self.items
            .iter()
            .map(|item| Itemset::from([item.clone()]))
            .collect()
    }

    /// Distinct items in first-seen order.
    pub fn items(&self) -> &[I] {
        &self.items
    }

    /// Indices of the transactions containing `item`.
    pub fn occurrences(&self, item: &I) -> Option<&HashSet<usize>> {
        self.occurrences.get(item)
    }

    /// Number of transactions ingested.
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&'static str]) -> Itemset<&'static str> {
        items.iter().copied().collect()
    }

    fn sample() -> TransactionIndex<&'static str> {
        TransactionIndex::from_transactions(vec![
            vec!["a", "b"],
            vec!["a", "b", "c"],
            vec!["a"],
            vec!["b", "c"],
        ])
    }

    #[test]
    fn test_ingest_assigns_sequential_indices() {
        let mut index = TransactionIndex::new();
        assert_eq!(index.add_transaction(vec!["x"]), 0);
        assert_eq!(index.add_transaction(vec!["x", "y"]), 1);
        assert_eq!(index.add_transaction(Vec::new()), 2);
        assert_eq!(index.len(), 3);
        assert_eq!(index.occurrences(&"x"), Some(&HashSet::from([0, 1])));
        assert_eq!(index.occurrences(&"y"), Some(&HashSet::from([1])));
    }

    #[test]
    fn test_items_first_seen_order() {
        let index = TransactionIndex::from_transactions(vec![vec!["c", "a"], vec!["b", "a"]]);
        assert_eq!(index.items(), &["c", "a", "b"]);
        assert_eq!(
            index.initial_candidates(),
            vec![set(&["c"]), set(&["a"]), set(&["b"])]
        );
    }

    #[test]
    fn test_duplicate_transactions_kept() {
        let index = TransactionIndex::from_transactions(vec![vec!["a"], vec!["a"], vec!["b"]]);
        assert_eq!(index.len(), 3);
        assert!((index.support(&set(&["a"])) - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_support_values() {
        let index = sample();
        assert!((index.support(&set(&["a"])) - 0.75).abs() < 1e-12);
        assert!((index.support(&set(&["c"])) - 0.5).abs() < 1e-12);
        assert!((index.support(&set(&["a", "b"])) - 0.5).abs() < 1e-12);
        assert!((index.support(&set(&["a", "c"])) - 0.25).abs() < 1e-12);
        assert!((index.support(&set(&["a", "b", "c"])) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_support_unseen_item_is_zero() {
        let index = sample();
        assert_eq!(index.support(&set(&["z"])), 0.0);
        assert_eq!(index.support(&set(&["a", "z"])), 0.0);
    }

    #[test]
    fn test_support_empty_cases() {
        let index = sample();
        assert_eq!(index.support(&set(&[])), 0.0);

        let empty: TransactionIndex<&str> = TransactionIndex::new();
        assert!(empty.is_empty());
        assert_eq!(empty.support(&set(&["a"])), 0.0);
        assert!(empty.initial_candidates().is_empty());
    }
}

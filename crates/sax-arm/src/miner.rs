//! Level-wise frequent itemset mining (Apriori).

use std::collections::{HashMap, HashSet};

use tracing::{debug, info};

use crate::candidates::apriori_gen;
use crate::config::check_threshold;
use crate::rules::compute_rules;
use crate::transactions::TransactionIndex;
use crate::types::{ArmResult, FrequentItemset, Item, Itemset, Rule};

/// Every itemset that cleared the minimum support, with its support.
///
/// Entries keep discovery order: level by level, candidate order within a
/// level. Nothing is removed once inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct SupportTable<I: Item> {
    entries: Vec<FrequentItemset<I>>,
    positions: HashMap<Itemset<I>, usize>,
}

impl<I: Item> Default for SupportTable<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: Item> SupportTable<I> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            positions: HashMap::new(),
        }
    }

    /// Record an itemset's support. Re-inserting an itemset keeps the first
    /// recorded value.
    pub fn insert(&mut self, items: Itemset<I>, support: f64) {
        if self.positions.contains_key(&items) {
            return;
        }
        self.positions.insert(items.clone(), self.entries.len());
        self.entries.push(FrequentItemset { items, support });
    }

    /// Support of a recorded itemset.
    pub fn get(&self, items: &Itemset<I>) -> Option<f64> {
        self.positions.get(items).map(|&i| self.entries[i].support)
    }

    pub fn contains(&self, items: &Itemset<I>) -> bool {
        self.positions.contains_key(items)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FrequentItemset<I>> {
        self.entries.iter()
    }

    pub fn entries(&self) -> &[FrequentItemset<I>] {
        &self.entries
    }

    /// Size of the largest recorded itemset.
    pub fn max_size(&self) -> usize {
        self.entries.iter().map(|e| e.items.len()).max().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Mine every itemset whose support is at least `min_support`.
///
/// A `min_support` of zero enumerates every combination of the seen items;
/// keep it positive for large item universes.
pub fn compute_supports<I: Item>(index: &TransactionIndex<I>, min_support: f64) -> SupportTable<I> {
    let mut table = SupportTable::new();
    let mut candidates = index.initial_candidates();
    let mut k = 1;

    while !candidates.is_empty() {
        let candidate_count = candidates.len();
        let mut survivors = HashSet::new();

        for candidate in candidates {
            let support = index.support(&candidate);
            if support < min_support {
                continue;
            }
            table.insert(candidate.clone(), support);
            survivors.insert(candidate);
        }

        debug!(
            level = k,
            candidates = candidate_count,
            frequent = survivors.len(),
            "apriori level scored"
        );

        k += 1;
        candidates = apriori_gen(&survivors, k);
    }

    table
}

/// Mine association rules from a list of transactions in one call.
///
/// Support of an itemset is the fraction of transactions containing it.
/// Returns rules with `confidence >= min_confidence`, sorted by support
/// descending.
pub fn apriori<I, T, U>(
    transactions: T,
    min_support: f64,
    min_confidence: f64,
) -> ArmResult<Vec<Rule<I>>>
where
    I: Item,
    T: IntoIterator<Item = U>,
    U: IntoIterator<Item = I>,
{
    check_threshold("min_support", min_support)?;
    check_threshold("min_confidence", min_confidence)?;

    let index = TransactionIndex::from_transactions(transactions);
    let supports = compute_supports(&index, min_support);
    let rules = compute_rules(&index, &supports, min_confidence)?;

    info!(
        "Mined {} frequent itemsets and {} rules from {} transactions",
        supports.len(),
        rules.len(),
        index.len()
    );

    Ok(rules)
}

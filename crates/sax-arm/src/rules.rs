//! Association rule derivation from frequent itemsets.

use std::cmp::Ordering;

use crate::candidates::Combinations;
use crate::miner::SupportTable;
use crate::transactions::TransactionIndex;
use crate::types::{ArmError, ArmResult, Item, Itemset, Rule};

/// Derive every rule `A --> B` from the frequent itemsets in `supports`.
///
/// For each itemset of two or more items, every non-empty proper subset is
/// tried as the antecedent. Supports of both sides are re-queried from
/// `index`. Rows below `min_confidence` are dropped and the rest are sorted
/// by support descending, ties keeping enumeration order.
///
/// A zero-support subset of an itemset with positive support is an
/// [`ArmError::InvariantViolation`]. Itemsets recorded with zero support
/// (only possible when mining with a zero threshold) still yield rows with
/// zero confidence and lift, except splits where a side also has zero
/// support: those are 0/0 and are skipped.
pub fn compute_rules<I: Item>(
    index: &TransactionIndex<I>,
    supports: &SupportTable<I>,
    min_confidence: f64,
) -> ArmResult<Vec<Rule<I>>> {
    let mut rules = Vec::new();

    for entry in supports.iter() {
        if entry.items.len() < 2 {
            continue;
        }

        let sorted: Vec<I> = entry.items.iter().cloned().collect();

        for length in 1..sorted.len() {
            for combination in Combinations::new(sorted.clone(), length) {
                let antecedent: Itemset<I> = combination.into_iter().collect();
                let consequent: Itemset<I> =
                    entry.items.difference(&antecedent).cloned().collect();

                let support_a = index.support(&antecedent);
                let support_b = index.support(&consequent);
                if support_a == 0.0 || support_b == 0.0 {
                    if entry.support > 0.0 {
                        let subset = if support_a == 0.0 { &antecedent } else { &consequent };
                        return Err(zero_support_subset(subset, &entry.items));
                    }
                    // 0/0: undefined.
                    continue;
                }

                let confidence = entry.support / support_a;
                let lift = confidence / support_b;

                if confidence >= min_confidence {
                    rules.push(Rule {
                        antecedent,
                        consequent,
                        support: entry.support,
                        confidence,
                        lift,
                    });
                }
            }
        }
    }

    rules.sort_by(|a, b| b.support.partial_cmp(&a.support).unwrap_or(Ordering::Equal));
    Ok(rules)
}

/// A subset of an itemset with positive support can never have zero support.
fn zero_support_subset<I: Item>(subset: &Itemset<I>, itemset: &Itemset<I>) -> ArmError {
    ArmError::InvariantViolation(format!(
        "subset {subset:?} of frequent itemset {itemset:?} has zero support"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::miner::compute_supports;

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

    fn find<'a>(
        rules: &'a [Rule<&'static str>],
        a: &[&'static str],
        b: &[&'static str],
    ) -> &'a Rule<&'static str> {
        rules
            .iter()
            .find(|r| r.antecedent == set(a) && r.consequent == set(b))
            .expect("rule not found")
    }

    #[test]
    fn test_confidence_and_lift() {
        let index = sample();
        let rules = compute_rules(&index, &compute_supports(&index, 0.5), 0.0).unwrap();

        let rule = find(&rules, &["a"], &["b"]);
        assert!((rule.support - 0.5).abs() < 1e-12);
        assert!((rule.confidence - 0.5 / 0.75).abs() < 1e-12);
        assert!((rule.lift - (0.5 / 0.75) / 0.75).abs() < 1e-12);
        assert!((rule.confidence - 0.667).abs() < 1e-3);
        assert!((rule.lift - 0.889).abs() < 1e-3);

        let rule = find(&rules, &["c"], &["b"]);
        assert!((rule.confidence - 1.0).abs() < 1e-12);
        assert!((rule.lift - 1.0 / 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_enumeration_order_preserved_on_ties() {
        let index = sample();
        let rules = compute_rules(&index, &compute_supports(&index, 0.5), 0.0).unwrap();
        let described: Vec<_> = rules.iter().map(|r| r.description()).collect();
        assert_eq!(
            described,
            vec![
                r#"{"a"} --> {"b"}"#,
                r#"{"b"} --> {"a"}"#,
                r#"{"b"} --> {"c"}"#,
                r#"{"c"} --> {"b"}"#,
            ]
        );
    }

    #[test]
    fn test_sorted_by_support_descending() {
        let index = TransactionIndex::from_transactions(vec![
            vec!["x", "y"],
            vec!["x", "y"],
            vec!["x", "y", "z"],
            vec!["y", "z"],
        ]);
        let rules = compute_rules(&index, &compute_supports(&index, 0.25), 0.0).unwrap();
        assert!(!rules.is_empty());
        assert!(rules.windows(2).all(|w| w[0].support >= w[1].support));
        assert_eq!(rules[0].antecedent, set(&["x"]));
        assert_eq!(rules[0].consequent, set(&["y"]));
    }

    #[test]
    fn test_triple_splits() {
        let index = sample();
        let rules = compute_rules(&index, &compute_supports(&index, 0.25), 0.0).unwrap();
        let from_triple: Vec<_> = rules
            .iter()
            .filter(|r| r.antecedent.len() + r.consequent.len() == 3)
            .collect();
        assert_eq!(from_triple.len(), 6);

        let rule = find(&rules, &["a", "c"], &["b"]);
        assert!((rule.confidence - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_min_confidence_filter() {
        let index = sample();
        let rules = compute_rules(&index, &compute_supports(&index, 0.5), 0.7).unwrap();
        assert_eq!(rules.len(), 1);
        assert!(rules.iter().all(|r| r.confidence >= 0.7));
    }

    #[test]
    fn test_singletons_produce_no_rules() {
        let index = TransactionIndex::from_transactions(vec![vec!["a"], vec!["b"]]);
        let rules = compute_rules(&index, &compute_supports(&index, 0.5), 0.0).unwrap();
        assert!(rules.is_empty());
    }

    #[test]
    fn test_zero_support_itemsets_give_zero_confidence_rows() {
        let index = TransactionIndex::from_transactions(vec![vec!["a"], vec!["b"]]);
        let supports = compute_supports(&index, 0.0);
        assert_eq!(supports.get(&set(&["a", "b"])), Some(0.0));

        let rules = compute_rules(&index, &supports, 0.0).unwrap();
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].description(), r#"{"a"} --> {"b"}"#);
        assert_eq!(rules[1].description(), r#"{"b"} --> {"a"}"#);
        assert!(rules
            .iter()
            .all(|r| r.support == 0.0 && r.confidence == 0.0 && r.lift == 0.0));

        // Any positive confidence threshold removes them.
        assert!(compute_rules(&index, &supports, 0.1).unwrap().is_empty());
    }

    #[test]
    fn test_zero_over_zero_splits_skipped() {
        let index = TransactionIndex::from_transactions(vec![vec!["a"], vec!["b"], vec!["c"]]);
        let supports = compute_supports(&index, 0.0);
        assert_eq!(supports.get(&set(&["a", "b", "c"])), Some(0.0));

        // Three pairs give two rows each; every split of the triple has a
        // zero-support side.
        let rules = compute_rules(&index, &supports, 0.0).unwrap();
        assert_eq!(rules.len(), 6);
        assert!(rules.iter().all(|r| r.antecedent.len() + r.consequent.len() == 2));
    }

    #[test]
    fn test_invariant_violation_reported() {
        let index = sample();
        let mut supports = SupportTable::new();
        supports.insert(set(&["a", "z"]), 0.5);

        let err = compute_rules(&index, &supports, 0.0).unwrap_err();
        assert!(matches!(err, ArmError::InvariantViolation(_)));
        assert!(err.to_string().contains("zero support"));
    }
}

//! Core data types for deviant events, itemsets, and mined rules.

use std::collections::BTreeSet;
use std::fmt;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

/// Anything the miner can index: hashable for occurrence lookups and totally
/// ordered so candidate enumeration is reproducible.
pub trait Item: Clone + Eq + Hash + Ord + fmt::Debug {}

impl<T: Clone + Eq + Hash + Ord + fmt::Debug> Item for T {}

/// A set of items considered together as one pattern.
///
/// Backed by an ordered set so that it hashes, compares, and iterates in a
/// canonical order.
pub type Itemset<I> = BTreeSet<I>;

/// A series showing an extreme symbol at one time step.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DeviantEvent<S> {
    pub series: String,
    pub symbol: S,
}

impl<S> DeviantEvent<S> {
    pub fn new(series: impl Into<String>, symbol: S) -> Self {
        Self {
            series: series.into(),
            symbol,
        }
    }
}

impl<S: fmt::Display> fmt::Display for DeviantEvent<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.series, self.symbol)
    }
}

/// All deviant events observed at a single time step.
pub type Basket<S> = Vec<DeviantEvent<S>>;

/// An itemset that cleared the minimum support threshold.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrequentItemset<I: Ord> {
    pub items: Itemset<I>,
    pub support: f64,
}

/// A directed association rule `antecedent --> consequent`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rule<I: Ord> {
    pub antecedent: Itemset<I>,
    pub consequent: Itemset<I>,
    /// Support of `antecedent ∪ consequent`.
    pub support: f64,
    pub confidence: f64,
    pub lift: f64,
}

impl<I: Ord + fmt::Debug> Rule<I> {
    /// Human-readable form, e.g. `{"a"} --> {"b"}`.
    pub fn description(&self) -> String {
        self.to_string()
    }
}

impl<I: Ord + fmt::Debug> fmt::Display for Rule<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} --> {:?}", self.antecedent, self.consequent)
    }
}

/// Which end of the alphabet a symbol sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Extreme {
    Top,
    Bottom,
}

impl fmt::Display for Extreme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Extreme::Top => f.write_str("top"),
            Extreme::Bottom => f.write_str("bottom"),
        }
    }
}

/// Diagnostics raised while building baskets. Processing continues.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BasketWarning {
    /// Neither extreme symbol occurs anywhere in the matrix.
    NoExtremeSymbols,
    /// One extreme symbol never occurs; its support column is all zeros.
    MissingSymbol { extreme: Extreme, symbol: String },
}

const RETUNE_HINT: &str = "change the window width or alphabet size for better rules";

impl fmt::Display for BasketWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BasketWarning::NoExtremeSymbols => {
                write!(f, "no maximal deviant symbols; {RETUNE_HINT}")
            }
            BasketWarning::MissingSymbol { extreme, symbol } => {
                write!(f, "no {extreme} deviant symbol {symbol}; {RETUNE_HINT}")
            }
        }
    }
}

/// Extreme-symbol supports for one series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesSupport {
    pub series: String,
    pub support_top: f64,
    pub support_bottom: f64,
    pub sum: f64,
}

/// Per-series extreme-symbol supports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupportSummary {
    /// One row per series.
    pub rows: Vec<SeriesSupport>,
    /// `true` when `rows` is sorted by `sum` descending; `false` when no
    /// extreme symbol occurred and rows are left in series order.
    pub ranked: bool,
}

impl SupportSummary {
    /// Look up the row for a series label.
    pub fn get(&self, series: &str) -> Option<&SeriesSupport> {
        self.rows.iter().find(|r| r.series == series)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Errors that can occur while building baskets or mining rules.
#[derive(thiserror::Error, Debug)]
pub enum ArmError {
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Discretization error: {0}")]
    Discretization(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Pipeline has not been processed yet")]
    NotProcessed,
}

/// Convenience result type.
pub type ArmResult<T> = Result<T, ArmError>;

//! SAX-ARM — association rule mining over discretized multivariate time series.
//!
//! Series that show an extreme symbol at the same time step are collected
//! into symbol baskets, frequent itemsets are mined from the baskets with
//! Apriori, and support/confidence/lift rules are derived from them.

pub mod basket;
pub mod candidates;
pub mod config;
pub mod miner;
pub mod pipeline;
pub mod rules;
pub mod transactions;
pub mod types;

pub use basket::{build_baskets, BasketBuild};
pub use candidates::{apriori_gen, Combinations};
pub use config::ArmConfig;
pub use miner::{apriori, compute_supports, SupportTable};
pub use pipeline::{Discretized, Discretizer, SaxArm};
pub use rules::compute_rules;
pub use transactions::TransactionIndex;
pub use types::*;

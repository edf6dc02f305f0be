//! SAX-ARM driver: discretize, build symbol baskets, mine rules.

use std::fmt;

use ndarray::Array2;
use tracing::info;

use crate::basket::build_baskets;
use crate::config::ArmConfig;
use crate::miner::apriori;
use crate::types::{
    ArmError, ArmResult, Basket, BasketWarning, DeviantEvent, Item, Rule, SupportSummary,
};

/// Output of a discretization step.
#[derive(Debug, Clone, PartialEq)]
pub struct Discretized<S> {
    /// Symbol matrix, `(time_steps × series)`.
    pub symbols: Array2<S>,
    /// Alphabet ordered from the lowest bin to the highest.
    pub alphabet: Vec<S>,
    /// Series names; column indices are used when absent.
    pub labels: Option<Vec<String>>,
}

/// Turns raw series into a symbol matrix.
pub trait Discretizer {
    type Symbol: Item + fmt::Display;

    fn discretize(
        &self,
        window_width: usize,
        alphabet_size: usize,
    ) -> ArmResult<Discretized<Self::Symbol>>;
}

/// Already-discretized data passes through unchanged.
impl<S: Item + fmt::Display> Discretizer for Discretized<S> {
    type Symbol = S;

    fn discretize(&self, _window_width: usize, _alphabet_size: usize) -> ArmResult<Discretized<S>> {
        Ok(self.clone())
    }
}

/// Everything one `process` run produces.
#[derive(Debug, Clone)]
struct ArmOutput<S: Item> {
    baskets: Vec<Basket<S>>,
    summary: SupportSummary,
    warnings: Vec<BasketWarning>,
    rules: Vec<Rule<DeviantEvent<S>>>,
}

/// Mines association rules between series that show extreme symbols at the
/// same time.
pub struct SaxArm<D: Discretizer> {
    config: ArmConfig,
    discretizer: D,
    output: Option<ArmOutput<D::Symbol>>,
}

impl<D: Discretizer> SaxArm<D> {
    /// Create a pipeline. Fails if the config is out of range.
    pub fn new(config: ArmConfig, discretizer: D) -> ArmResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            discretizer,
            output: None,
        })
    }

    pub fn config(&self) -> &ArmConfig {
        &self.config
    }

    /// Run discretization, basket generation, and rule mining.
    ///
    /// The highest alphabet symbol is the top extreme and the lowest is the
    /// bottom extreme. Re-running replaces earlier results.
    pub fn process(&mut self) -> ArmResult<()> {
        let discretized = self
            .discretizer
            .discretize(self.config.window_width, self.config.alphabet_size)?;

        let (symbol_bottom, symbol_top) = match discretized.alphabet.as_slice() {
            [first, .., last] => (first, last),
            alphabet => {
                return Err(ArmError::Discretization(format!(
                    "alphabet needs at least 2 symbols, got {}",
                    alphabet.len()
                )))
            }
        };

        let build = build_baskets(
            discretized.symbols.view(),
            symbol_top,
            symbol_bottom,
            discretized.labels.as_deref(),
        )?;

        let rules = apriori(
            build.baskets.iter().cloned(),
            self.config.min_support,
            self.config.min_confidence,
        )?;

        info!(
            "SAX-ARM processed {} time steps: {} baskets, {} rules, {} warnings",
            discretized.symbols.nrows(),
            build.baskets.len(),
            rules.len(),
            build.warnings.len()
        );

        self.output = Some(ArmOutput {
            baskets: build.baskets,
            summary: build.summary,
            warnings: build.warnings,
            rules,
        });
        Ok(())
    }

    /// Support of the deviant events per series.
    pub fn support(&self) -> ArmResult<&SupportSummary> {
        Ok(&self.output()?.summary)
    }

    /// Association rules, sorted by support descending.
    pub fn rules(&self) -> ArmResult<&[Rule<DeviantEvent<D::Symbol>>]> {
        Ok(&self.output()?.rules)
    }

    pub fn baskets(&self) -> ArmResult<&[Basket<D::Symbol>]> {
        Ok(&self.output()?.baskets)
    }

    pub fn warnings(&self) -> ArmResult<&[BasketWarning]> {
        Ok(&self.output()?.warnings)
    }

    fn output(&self) -> ArmResult<&ArmOutput<D::Symbol>> {
        self.output.as_ref().ok_or(ArmError::NotProcessed)
    }
}

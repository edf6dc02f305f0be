//! Symbol basket generation from a discretized multivariate time series.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;

use ndarray::ArrayView2;
use tracing::{debug, warn};

use crate::types::{
    ArmError, ArmResult, Basket, BasketWarning, DeviantEvent, Extreme, SeriesSupport,
    SupportSummary,
};

/// Baskets, per-series supports, and any diagnostics from one build.
#[derive(Debug, Clone, PartialEq)]
pub struct BasketBuild<S> {
    /// One basket per time step that showed at least one extreme symbol.
    pub baskets: Vec<Basket<S>>,
    pub summary: SupportSummary,
    pub warnings: Vec<BasketWarning>,
}

/// Build the symbol baskets for a `(time_steps × series)` symbol matrix.
///
/// A time step's basket holds `(series, symbol)` for every series showing
/// `symbol_top` or `symbol_bottom`; empty baskets are dropped. Series are
/// named by `labels`, or by their column index when `labels` is `None`;
/// labels must be unique.
pub fn build_baskets<S>(
    symbols: ArrayView2<'_, S>,
    symbol_top: &S,
    symbol_bottom: &S,
    labels: Option<&[String]>,
) -> ArmResult<BasketBuild<S>>
where
    S: Clone + PartialEq + fmt::Display,
{
    let (n_steps, n_series) = symbols.dim();

    if symbol_top == symbol_bottom {
        return Err(ArmError::InvalidInput(format!(
            "top and bottom symbols must differ, both are {symbol_top}"
        )));
    }

    let labels: Vec<String> = match labels {
        Some(labels) if labels.len() != n_series => {
            return Err(ArmError::InvalidInput(format!(
                "{} labels given for {n_series} series",
                labels.len()
            )));
        }
        Some(labels) => {
            let mut seen = HashSet::with_capacity(labels.len());
            if let Some(duplicate) = labels.iter().find(|label| !seen.insert(label.as_str())) {
                return Err(ArmError::InvalidInput(format!(
                    "series label {duplicate:?} is used more than once"
                )));
            }
            labels.to_vec()
        }
        None => (0..n_series).map(|i| i.to_string()).collect(),
    };

    let mut top_counts = vec![0usize; n_series];
    let mut bottom_counts = vec![0usize; n_series];
    let mut baskets = Vec::new();

    for (step, row) in symbols.outer_iter().enumerate() {
        let mut basket = Vec::new();

        for (series, symbol) in row.iter().enumerate() {
            if symbol == symbol_top {
                top_counts[series] += 1;
            } else if symbol == symbol_bottom {
                bottom_counts[series] += 1;
            } else {
                continue;
            }
            basket.push(DeviantEvent::new(labels[series].clone(), symbol.clone()));
        }

        if basket.is_empty() {
            debug!(step, "no deviant events, basket dropped");
        } else {
            baskets.push(basket);
        }
    }

    let frequency = |count: usize| {
        if n_steps == 0 {
            0.0
        } else {
            count as f64 / n_steps as f64
        }
    };

    let mut rows: Vec<SeriesSupport> = labels
        .into_iter()
        .enumerate()
        .map(|(i, series)| {
            let support_top = frequency(top_counts[i]);
            let support_bottom = frequency(bottom_counts[i]);
            SeriesSupport {
                series,
                support_top,
                support_bottom,
                sum: support_top + support_bottom,
            }
        })
        .collect();

    let top_seen = top_counts.iter().any(|&c| c > 0);
    let bottom_seen = bottom_counts.iter().any(|&c| c > 0);
    let mut warnings = Vec::new();

    if !top_seen && !bottom_seen {
        let warning = BasketWarning::NoExtremeSymbols;
        warn!("{warning}");
        warnings.push(warning);
        return Ok(BasketBuild {
            baskets,
            summary: SupportSummary { rows, ranked: false },
            warnings,
        });
    }

    for (extreme, symbol, seen) in [
        (Extreme::Top, symbol_top, top_seen),
        (Extreme::Bottom, symbol_bottom, bottom_seen),
    ] {
        if !seen {
            let warning = BasketWarning::MissingSymbol {
                extreme,
                symbol: symbol.to_string(),
            };
            warn!("{warning}");
            warnings.push(warning);
        }
    }

    rows.sort_by(|a, b| b.sum.partial_cmp(&a.sum).unwrap_or(Ordering::Equal));

    debug!(
        baskets = baskets.len(),
        steps = n_steps,
        series = n_series,
        "symbol baskets built"
    );

    Ok(BasketBuild {
        baskets,
        summary: SupportSummary { rows, ranked: true },
        warnings,
    })
}

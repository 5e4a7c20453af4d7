use crate::core::io::traits::{Tabular, format_value};
use crate::core::models::table::CoordinateSeries;
use crate::core::stats::descriptive::quantile_sorted;
use std::num::NonZeroUsize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BinRule {
    /// The larger bin count of the Sturges and Freedman-Diaconis estimators.
    #[default]
    Auto,
    Fixed(NonZeroUsize),
}

/// Counts of one column over equal-width bins; `edges` has one more entry than `counts`.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub label: String,
    pub edges: Vec<f64>,
    pub counts: Vec<u64>,
}

impl Tabular for Histogram {
    fn header(&self) -> Vec<String> {
        ["lower", "upper", "count"].map(String::from).to_vec()
    }

    fn rows(&self) -> Vec<Vec<String>> {
        self.edges
            .windows(2)
            .zip(&self.counts)
            .map(|(edge, count)| vec![format_value(edge[0]), format_value(edge[1]), count.to_string()])
            .collect()
    }
}

fn auto_bin_count(sorted: &[f64], range: f64) -> usize {
    let n = sorted.len() as f64;
    let sturges = range / (n.log2() + 1.0);
    let iqr = quantile_sorted(sorted, 0.75) - quantile_sorted(sorted, 0.25);
    let width = if iqr > 0.0 {
        let freedman_diaconis = 2.0 * iqr * n.powf(-1.0 / 3.0);
        sturges.min(freedman_diaconis)
    } else {
        sturges
    };
    if width > 0.0 {
        (range / width).ceil().max(1.0) as usize
    } else {
        1
    }
}

/// Bins the samples of a (non-empty) series.
///
/// A constant series spans a unit-width range centred on its value; with the `Auto`
/// rule it yields a single bin.
pub fn histogram(series: &CoordinateSeries, rule: BinRule) -> Histogram {
    let mut sorted = series.values.clone();
    sorted.sort_by(f64::total_cmp);
    let (mut lo, mut hi) = match (sorted.first(), sorted.last()) {
        (Some(&lo), Some(&hi)) => (lo, hi),
        _ => (0.0, 0.0),
    };

    let bins = if lo == hi {
        lo -= 0.5;
        hi += 0.5;
        match rule {
            BinRule::Auto => 1,
            BinRule::Fixed(n) => n.get(),
        }
    } else {
        match rule {
            BinRule::Auto => auto_bin_count(&sorted, hi - lo),
            BinRule::Fixed(n) => n.get(),
        }
    };

    let width = (hi - lo) / bins as f64;
    let edges: Vec<f64> = (0..=bins)
        .map(|i| if i == bins { hi } else { lo + width * i as f64 })
        .collect();

    let mut counts = vec![0u64; bins];
    for &v in &sorted {
        let index = (((v - lo) / width) as usize).min(bins - 1);
        counts[index] += 1;
    }

    Histogram {
        label: series.name.clone(),
        edges,
        counts,
    }
}

use crate::core::io::traits::{Record, format_value};
use crate::core::models::table::CoordinateSeries;
use crate::core::stats::descriptive::{mean, std_dev};

/// Arithmetic mean and sample standard deviation of one column.
#[derive(Debug, Clone, PartialEq)]
pub struct AveragesRow {
    pub label: String,
    pub mean: f64,
    pub std: f64,
}

impl Record for AveragesRow {
    fn header() -> Vec<String> {
        vec!["label".to_string(), "mean".to_string(), "std".to_string()]
    }

    fn fields(&self) -> Vec<String> {
        vec![
            self.label.clone(),
            format_value(self.mean),
            format_value(self.std),
        ]
    }
}

/// Plain moments regardless of kind, so angular averages read on the same axis
/// as the raw Curves+ values. The standard deviation is NaN for a single sample.
pub fn summarize(series: &CoordinateSeries) -> AveragesRow {
    AveragesRow {
        label: series.name.clone(),
        mean: mean(&series.values),
        std: std_dev(&series.values),
    }
}

use super::parameter::CoordinateKind;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum TableError {
    #[error("Table has no columns")]
    NoColumns,
    #[error("Series '{name}' is empty")]
    EmptySeries { name: String },
    #[error("Series '{name}' has {found} samples, expected {expected}")]
    Misaligned {
        name: String,
        expected: usize,
        found: usize,
    },
    #[error("Column '{0}' appears more than once")]
    DuplicateColumn(String),
    #[error("Series '{name}' holds a non-finite sample at row {row}")]
    NonFinite { name: String, row: usize },
    #[error("Expected {expected} column labels, found {found}")]
    LabelCount { expected: usize, found: usize },
}

/// Samples of one coordinate (one base or base-pair step of one parameter) over the trajectory.
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateSeries {
    pub name: String,
    pub kind: CoordinateKind,
    pub values: Vec<f64>,
}

impl CoordinateSeries {
    pub fn new(name: impl Into<String>, kind: CoordinateKind, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            kind,
            values,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn validate(&self) -> Result<(), TableError> {
        if self.values.is_empty() {
            return Err(TableError::EmptySeries {
                name: self.name.clone(),
            });
        }
        if let Some(row) = self.values.iter().position(|v| !v.is_finite()) {
            return Err(TableError::NonFinite {
                name: self.name.clone(),
                row,
            });
        }
        Ok(())
    }
}

/// Column-ordered collection of aligned series; row `i` of every column is snapshot `i`.
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateTable {
    columns: Vec<CoordinateSeries>,
    index: HashMap<String, usize>,
}

impl CoordinateTable {
    pub fn new(columns: Vec<CoordinateSeries>) -> Result<Self, TableError> {
        let first = columns.first().ok_or(TableError::NoColumns)?;
        let expected = first.len();

        let mut index = HashMap::with_capacity(columns.len());
        for (i, series) in columns.iter().enumerate() {
            series.validate()?;
            if series.len() != expected {
                return Err(TableError::Misaligned {
                    name: series.name.clone(),
                    expected,
                    found: series.len(),
                });
            }
            if index.insert(series.name.clone(), i).is_some() {
                return Err(TableError::DuplicateColumn(series.name.clone()));
            }
        }

        Ok(Self { columns, index })
    }

    /// Builds a table of a single kind from labels and column-major data.
    pub fn from_columns<S: Into<String>>(
        kind: CoordinateKind,
        columns: impl IntoIterator<Item = (S, Vec<f64>)>,
    ) -> Result<Self, TableError> {
        Self::new(
            columns
                .into_iter()
                .map(|(name, values)| CoordinateSeries::new(name, kind, values))
                .collect(),
        )
    }

    #[inline]
    pub fn n_rows(&self) -> usize {
        self.columns[0].len()
    }

    #[inline]
    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[CoordinateSeries] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&CoordinateSeries> {
        self.index.get(name).map(|&i| &self.columns[i])
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Renames columns in order; `labels` must have exactly one entry per column.
    pub fn relabel(self, labels: Vec<String>) -> Result<Self, TableError> {
        if labels.len() != self.columns.len() {
            return Err(TableError::LabelCount {
                expected: self.columns.len(),
                found: labels.len(),
            });
        }
        let columns = self
            .columns
            .into_iter()
            .zip(labels)
            .map(|(series, name)| CoordinateSeries { name, ..series })
            .collect();
        Self::new(columns)
    }

    /// Keeps the first `n` columns.
    pub fn truncate(mut self, n: usize) -> Result<Self, TableError> {
        self.columns.truncate(n);
        Self::new(self.columns)
    }

    /// Drops the first and last column (terminal base pairs carry no meaningful values).
    pub fn without_terminal_columns(self) -> Result<Self, TableError> {
        let n = self.columns.len();
        if n <= 2 {
            return Err(TableError::NoColumns);
        }
        Self::new(self.columns.into_iter().skip(1).take(n - 2).collect())
    }
}

use crate::core::models::parameter::CoordinateKind;
use crate::core::models::table::{CoordinateTable, TableError};
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum TableReadError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("CSV parsing error for '{path}': {source}")]
    Csv { path: String, source: csv::Error },
    #[error("Invalid number '{value}' in '{path}' at line {line}")]
    Parse {
        path: String,
        line: usize,
        value: String,
    },
    #[error("Line {line} of '{path}' has {found} fields, expected {expected}")]
    RaggedRow {
        path: String,
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("Column {column} requested from '{path}', which has {available} data columns")]
    ColumnOutOfRange {
        path: String,
        column: usize,
        available: usize,
    },
    #[error("'{path}' holds no data rows")]
    Empty { path: String },
    #[error("Unsupported table format for '{path}' (expected .csv or .ser)")]
    UnsupportedFormat { path: String },
    #[error("Invalid table in '{path}': {source}")]
    Table { path: String, source: TableError },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    /// Header row; the first column is the snapshot index.
    Csv,
    /// Curves+ series file: whitespace separated, no header, first column is the snapshot index.
    Ser,
}

impl TableFormat {
    pub fn from_path(path: &Path) -> Result<Self, TableReadError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("csv") => Ok(TableFormat::Csv),
            Some("ser") => Ok(TableFormat::Ser),
            _ => Err(TableReadError::UnsupportedFormat {
                path: path.to_string_lossy().to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReadOptions {
    pub kind: CoordinateKind,
    /// 1-based data-column positions to keep (the index column is never selected).
    pub usecols: Option<Vec<usize>>,
    /// Drop the first and last remaining column after selection.
    pub trim_terminal: bool,
}

impl ReadOptions {
    pub fn new(kind: CoordinateKind) -> Self {
        Self {
            kind,
            usecols: None,
            trim_terminal: false,
        }
    }

    pub fn usecols(mut self, usecols: Vec<usize>) -> Self {
        self.usecols = Some(usecols);
        self
    }

    pub fn trim_terminal(mut self, trim: bool) -> Self {
        self.trim_terminal = trim;
        self
    }
}

type RawColumns = Vec<(String, Vec<f64>)>;

/// Reads a coordinate table, choosing the parser from the file extension.
pub fn read_table(path: &Path, options: &ReadOptions) -> Result<CoordinateTable, TableReadError> {
    let format = TableFormat::from_path(path)?;
    let origin = path.to_string_lossy().to_string();
    let file = File::open(path).map_err(|e| TableReadError::Io {
        path: origin.clone(),
        source: e,
    })?;
    let table = read_table_from(BufReader::new(file), format, &origin, options)?;
    debug!(
        path = %origin,
        columns = table.n_columns(),
        rows = table.n_rows(),
        "Loaded coordinate table."
    );
    Ok(table)
}

/// Reads a coordinate table from any reader; `origin` names the source in errors.
pub fn read_table_from(
    reader: impl BufRead,
    format: TableFormat,
    origin: &str,
    options: &ReadOptions,
) -> Result<CoordinateTable, TableReadError> {
    let columns = match format {
        TableFormat::Csv => parse_csv(reader, origin)?,
        TableFormat::Ser => parse_ser(reader, origin)?,
    };
    if columns.first().is_none_or(|(_, values)| values.is_empty()) {
        return Err(TableReadError::Empty {
            path: origin.to_string(),
        });
    }

    let mut columns = select_columns(columns, options.usecols.as_deref(), origin)?;
    if options.trim_terminal {
        let n = columns.len();
        columns = columns.into_iter().skip(1).take(n.saturating_sub(2)).collect();
    }

    CoordinateTable::from_columns(options.kind, columns).map_err(|e| TableReadError::Table {
        path: origin.to_string(),
        source: e,
    })
}

fn select_columns(
    columns: RawColumns,
    usecols: Option<&[usize]>,
    origin: &str,
) -> Result<RawColumns, TableReadError> {
    let Some(usecols) = usecols else {
        return Ok(columns);
    };
    let available = columns.len();
    let mut slots: Vec<Option<(String, Vec<f64>)>> = columns.into_iter().map(Some).collect();
    usecols
        .iter()
        .map(|&column| {
            column
                .checked_sub(1)
                .and_then(|i| slots.get_mut(i))
                .and_then(Option::take)
                .ok_or_else(|| TableReadError::ColumnOutOfRange {
                    path: origin.to_string(),
                    column,
                    available,
                })
        })
        .collect()
}

fn parse_value(field: &str, origin: &str, line: usize) -> Result<f64, TableReadError> {
    field
        .trim()
        .parse::<f64>()
        .map_err(|_| TableReadError::Parse {
            path: origin.to_string(),
            line,
            value: field.to_string(),
        })
}

fn parse_csv(reader: impl Read, origin: &str) -> Result<RawColumns, TableReadError> {
    let csv_error = |e| TableReadError::Csv {
        path: origin.to_string(),
        source: e,
    };
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut columns: RawColumns = csv_reader
        .headers()
        .map_err(csv_error)?
        .iter()
        .skip(1)
        .map(|name| (name.trim().to_string(), Vec::new()))
        .collect();

    for (row, record) in csv_reader.records().enumerate() {
        let record = record.map_err(csv_error)?;
        let line = row + 2;
        if record.len() != columns.len() + 1 {
            return Err(TableReadError::RaggedRow {
                path: origin.to_string(),
                line,
                expected: columns.len() + 1,
                found: record.len(),
            });
        }
        for ((_, values), field) in columns.iter_mut().zip(record.iter().skip(1)) {
            values.push(parse_value(field, origin, line)?);
        }
    }
    Ok(columns)
}

fn parse_ser(reader: impl BufRead, origin: &str) -> Result<RawColumns, TableReadError> {
    let mut columns: RawColumns = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| TableReadError::Io {
            path: origin.to_string(),
            source: e,
        })?;
        let line_number = i + 1;
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.is_empty() {
            continue;
        }
        if columns.is_empty() {
            columns = (1..fields.len())
                .map(|position| (position.to_string(), Vec::new()))
                .collect();
        }
        if fields.len() != columns.len() + 1 {
            return Err(TableReadError::RaggedRow {
                path: origin.to_string(),
                line: line_number,
                expected: columns.len() + 1,
                found: fields.len(),
            });
        }
        for ((_, values), field) in columns.iter_mut().zip(&fields[1..]) {
            values.push(parse_value(field, origin, line_number)?);
        }
    }
    Ok(columns)
}

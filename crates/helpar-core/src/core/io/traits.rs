use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TableWriteError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("CSV writing error for '{path}': {source}")]
    Csv { path: String, source: csv::Error },
}

/// Defines the interface for results that serialize to a delimited table.
///
/// Implementors provide a header and string-formatted rows; writing to CSV is
/// provided on top of those two methods.
pub trait Tabular {
    /// Column names, in output order.
    fn header(&self) -> Vec<String>;

    /// One entry per output row, each with exactly `header().len()` fields.
    fn rows(&self) -> Vec<Vec<String>>;

    /// Writes header and rows as CSV to `writer`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer fails.
    fn write_csv_to(&self, writer: impl Write) -> Result<(), csv::Error> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(self.header())?;
        for row in self.rows() {
            csv_writer.write_record(row)?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    /// Writes the table as CSV to a file path, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or writing fails.
    fn write_csv_to_path<P: AsRef<Path>>(&self, path: P) -> Result<(), TableWriteError> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| TableWriteError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        self.write_csv_to(BufWriter::new(file))
            .map_err(|e| TableWriteError::Csv {
                path: path.to_string_lossy().to_string(),
                source: e,
            })
    }
}

/// A single labelled result that forms one row of a larger table.
pub trait Record {
    fn header() -> Vec<String>;
    fn fields(&self) -> Vec<String>;
}

impl<R: Record> Tabular for [R] {
    fn header(&self) -> Vec<String> {
        R::header()
    }

    fn rows(&self) -> Vec<Vec<String>> {
        self.iter().map(Record::fields).collect()
    }
}

impl<R: Record> Tabular for Vec<R> {
    fn header(&self) -> Vec<String> {
        R::header()
    }

    fn rows(&self) -> Vec<Vec<String>> {
        self.iter().map(Record::fields).collect()
    }
}

/// Shortest representation that parses back to the same value.
#[inline]
pub fn format_value(value: f64) -> String {
    value.to_string()
}

/// `None` becomes an empty field.
#[inline]
pub fn format_optional(value: Option<f64>) -> String {
    value.map(format_value).unwrap_or_default()
}

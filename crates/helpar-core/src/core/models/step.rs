use super::parameter::{CoordinateKind, HelicalParameter, STEP_COORDINATES};
use super::table::{CoordinateSeries, CoordinateTable};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum StepError {
    #[error("Column '{column}' of the '{parameter}' table is tagged {found:?}, expected {expected:?}")]
    WrongKind {
        parameter: HelicalParameter,
        column: String,
        expected: CoordinateKind,
        found: CoordinateKind,
    },
    #[error("Columns of '{parameter}' {found:?} do not match those of 'shift' {expected:?}")]
    ColumnMismatch {
        parameter: HelicalParameter,
        expected: Vec<String>,
        found: Vec<String>,
    },
    #[error("'{parameter}' has {found} snapshots but 'shift' has {expected}")]
    SnapshotMismatch {
        parameter: HelicalParameter,
        expected: usize,
        found: usize,
    },
}

/// The six base-pair-step tables of one trajectory, aligned column by column.
///
/// Column `j` of every table refers to the same base-pair step, so the six series
/// at column `j` describe that step jointly.
#[derive(Debug, Clone, PartialEq)]
pub struct StepCoordinates {
    tables: [CoordinateTable; 6],
}

/// The six series of one base-pair step, in [`STEP_COORDINATES`] order.
#[derive(Debug, Clone, Copy)]
pub struct StepSeries<'a> {
    pub label: &'a str,
    pub series: [&'a CoordinateSeries; 6],
}

impl StepCoordinates {
    /// Tables must be given in [`STEP_COORDINATES`] order, every column tagged with
    /// its parameter's kind.
    pub fn new(tables: [CoordinateTable; 6]) -> Result<Self, StepError> {
        for (parameter, table) in STEP_COORDINATES.iter().zip(tables.iter()) {
            let expected = parameter.kind();
            if let Some(column) = table.columns().iter().find(|c| c.kind != expected) {
                return Err(StepError::WrongKind {
                    parameter: *parameter,
                    column: column.name.clone(),
                    expected,
                    found: column.kind,
                });
            }
        }

        let reference = &tables[0];
        let expected: Vec<String> = reference.labels().map(str::to_string).collect();
        for (parameter, table) in STEP_COORDINATES.iter().zip(tables.iter()).skip(1) {
            if !table.labels().eq(expected.iter().map(String::as_str)) {
                return Err(StepError::ColumnMismatch {
                    parameter: *parameter,
                    expected,
                    found: table.labels().map(str::to_string).collect(),
                });
            }
            if table.n_rows() != reference.n_rows() {
                return Err(StepError::SnapshotMismatch {
                    parameter: *parameter,
                    expected: reference.n_rows(),
                    found: table.n_rows(),
                });
            }
        }

        Ok(Self { tables })
    }

    pub fn table(&self, parameter: HelicalParameter) -> Option<&CoordinateTable> {
        parameter.step_index().map(|i| &self.tables[i])
    }

    pub fn n_steps(&self) -> usize {
        self.tables[0].n_columns()
    }

    pub fn n_snapshots(&self) -> usize {
        self.tables[0].n_rows()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.tables[0].labels()
    }

    /// The six series at column `index`.
    pub fn step(&self, index: usize) -> Option<StepSeries<'_>> {
        let label = self.tables[0].columns().get(index)?.name.as_str();
        let series = [
            &self.tables[0].columns()[index],
            &self.tables[1].columns()[index],
            &self.tables[2].columns()[index],
            &self.tables[3].columns()[index],
            &self.tables[4].columns()[index],
            &self.tables[5].columns()[index],
        ];
        Some(StepSeries { label, series })
    }

    pub fn steps(&self) -> impl Iterator<Item = StepSeries<'_>> {
        (0..self.n_steps()).filter_map(|i| self.step(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(labels: &[&str], rows: usize, offset: f64) -> CoordinateTable {
        tagged(CoordinateKind::Linear, labels, rows, offset)
    }

    fn tagged(kind: CoordinateKind, labels: &[&str], rows: usize, offset: f64) -> CoordinateTable {
        CoordinateTable::from_columns(
            kind,
            labels
                .iter()
                .enumerate()
                .map(|(j, l)| (*l, (0..rows).map(|r| offset + (r * 10 + j) as f64).collect())),
        )
        .unwrap()
    }

    fn six(labels: &[&str], rows: usize) -> [CoordinateTable; 6] {
        std::array::from_fn(|i| {
            tagged(STEP_COORDINATES[i].kind(), labels, rows, i as f64 * 100.0)
        })
    }

    #[test]
    fn new_keeps_each_table_under_its_parameter() {
        let steps = StepCoordinates::new(six(&["AA", "AT"], 3)).unwrap();
        let twist = steps.table(HelicalParameter::Twist).unwrap();
        assert!(
            twist
                .columns()
                .iter()
                .all(|c| c.kind == CoordinateKind::Circular)
        );
        let rise = steps.table(HelicalParameter::Rise).unwrap();
        assert_eq!(rise.columns()[0].kind, CoordinateKind::Linear);
        assert!(steps.table(HelicalParameter::Shear).is_none());
    }

    #[test]
    fn new_rejects_linear_tagged_angle_table() {
        let mut tables = six(&["AA", "AT"], 3);
        tables[4] = table(&["AA", "AT"], 3, 400.0);
        assert_eq!(
            StepCoordinates::new(tables),
            Err(StepError::WrongKind {
                parameter: HelicalParameter::Roll,
                column: "AA".to_string(),
                expected: CoordinateKind::Circular,
                found: CoordinateKind::Linear,
            })
        );
    }

    #[test]
    fn new_rejects_circular_tagged_distance_table() {
        let mut tables = six(&["AA"], 3);
        tables[2] = tagged(CoordinateKind::Circular, &["AA"], 3, 200.0);
        assert!(matches!(
            StepCoordinates::new(tables),
            Err(StepError::WrongKind {
                parameter: HelicalParameter::Rise,
                ..
            })
        ));
    }

    #[test]
    fn step_collects_matching_column_from_every_table() {
        let steps = StepCoordinates::new(six(&["AA", "AT"], 2)).unwrap();
        let step = steps.step(1).unwrap();
        assert_eq!(step.label, "AT");
        assert_eq!(step.series[0].values, vec![1.0, 11.0]);
        assert_eq!(step.series[5].values, vec![501.0, 511.0]);
        assert!(steps.step(2).is_none());
        assert_eq!(steps.steps().count(), 2);
    }

    #[test]
    fn new_rejects_tables_with_different_columns() {
        let mut tables = six(&["AA", "AT"], 2);
        tables[3] = tagged(CoordinateKind::Circular, &["AA", "TA"], 2, 0.0);
        let result = StepCoordinates::new(tables);
        assert!(matches!(
            result,
            Err(StepError::ColumnMismatch {
                parameter: HelicalParameter::Tilt,
                ..
            })
        ));
    }

    #[test]
    fn new_rejects_tables_with_different_column_order() {
        let mut tables = six(&["AA", "AT"], 2);
        tables[1] = table(&["AT", "AA"], 2, 0.0);
        assert!(matches!(
            StepCoordinates::new(tables),
            Err(StepError::ColumnMismatch { .. })
        ));
    }

    #[test]
    fn new_rejects_tables_with_different_snapshot_counts() {
        let mut tables = six(&["AA"], 4);
        tables[5] = tagged(CoordinateKind::Circular, &["AA"], 3, 0.0);
        assert_eq!(
            StepCoordinates::new(tables),
            Err(StepError::SnapshotMismatch {
                parameter: HelicalParameter::Twist,
                expected: 4,
                found: 3
            })
        );
    }
}

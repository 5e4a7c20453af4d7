use super::parameter::{HelicalParameter, STEP_COORDINATES};
use crate::core::io::traits::{Tabular, format_value};
use nalgebra::Matrix6;

/// A 6×6 matrix over the base-pair-step coordinates of one step, rows and columns
/// in [`STEP_COORDINATES`] order.
#[derive(Debug, Clone, PartialEq)]
pub struct StepMatrix {
    pub label: String,
    pub matrix: Matrix6<f64>,
}

impl StepMatrix {
    pub fn new(label: impl Into<String>, matrix: Matrix6<f64>) -> Self {
        Self {
            label: label.into(),
            matrix,
        }
    }

    /// Entry at (`row`, `column`); `None` for base-pair parameters.
    pub fn get(&self, row: HelicalParameter, column: HelicalParameter) -> Option<f64> {
        Some(self.matrix[(row.step_index()?, column.step_index()?)])
    }

    /// NaN entries compare equal to their mirror.
    pub fn is_symmetric(&self, tolerance: f64) -> bool {
        (0..6).all(|i| {
            (0..6).all(|j| {
                let (a, b) = (self.matrix[(i, j)], self.matrix[(j, i)]);
                (a.is_nan() && b.is_nan()) || (a - b).abs() <= tolerance
            })
        })
    }
}

impl Tabular for StepMatrix {
    fn header(&self) -> Vec<String> {
        std::iter::once(String::new())
            .chain(STEP_COORDINATES.iter().map(|p| p.name().to_string()))
            .collect()
    }

    fn rows(&self) -> Vec<Vec<String>> {
        STEP_COORDINATES
            .iter()
            .enumerate()
            .map(|(i, p)| {
                std::iter::once(p.name().to_string())
                    .chain(self.matrix.row(i).iter().map(|v| format_value(*v)))
                    .collect()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_indexes_by_step_coordinate() {
        let m = StepMatrix::new("AA", Matrix6::from_fn(|i, j| (10 * i + j) as f64));
        assert_eq!(m.get(HelicalParameter::Rise, HelicalParameter::Twist), Some(25.0));
        assert_eq!(m.get(HelicalParameter::Shear, HelicalParameter::Twist), None);
    }

    #[test]
    fn is_symmetric_tolerates_mirrored_nan() {
        let mut matrix = Matrix6::identity();
        matrix[(0, 3)] = f64::NAN;
        matrix[(3, 0)] = f64::NAN;
        assert!(StepMatrix::new("AA", matrix).is_symmetric(0.0));
        matrix[(1, 2)] = 0.5;
        assert!(!StepMatrix::new("AA", matrix).is_symmetric(1e-9));
    }

    #[test]
    fn table_is_labelled_by_coordinate_on_both_axes() {
        let m = StepMatrix::new("AA", Matrix6::identity());
        assert_eq!(
            m.header(),
            vec!["", "shift", "slide", "rise", "tilt", "roll", "twist"]
        );
        let rows = m.rows();
        assert_eq!(rows.len(), 6);
        assert_eq!(rows[2], vec!["rise", "0", "0", "1", "0", "0", "0"]);
    }
}

use super::parameter::ParameterLevel;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SequenceError {
    #[error("Strands must have equal length (strand1: {strand1}, strand2: {strand2})")]
    StrandLengthMismatch { strand1: usize, strand2: usize },
    #[error("Strands of length {length} are too short for {requested} labels")]
    TooShort { length: usize, requested: usize },
    #[error("Strand contains a non-ASCII character")]
    NonAscii,
}

/// The duplex sequence a helical-parameter table was computed on.
///
/// Both strands are given 5'→3'. Position `i` pairs `strand1[i]` with the base of
/// `strand2` read backwards, so labels spell the first strand followed by its partner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Duplex {
    forward: Vec<u8>,
    paired: Vec<u8>,
}

impl Duplex {
    pub fn new(strand1: &str, strand2: &str) -> Result<Self, SequenceError> {
        if !strand1.is_ascii() || !strand2.is_ascii() {
            return Err(SequenceError::NonAscii);
        }
        if strand1.len() != strand2.len() {
            return Err(SequenceError::StrandLengthMismatch {
                strand1: strand1.len(),
                strand2: strand2.len(),
            });
        }
        Ok(Self {
            forward: strand1.to_ascii_uppercase().into_bytes(),
            paired: strand2.to_ascii_uppercase().bytes().rev().collect(),
        })
    }

    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    /// Drops the terminal base pair at each end.
    pub fn trimmed(&self) -> Self {
        let n = self.forward.len();
        if n < 2 {
            return Self {
                forward: Vec::new(),
                paired: Vec::new(),
            };
        }
        Self {
            forward: self.forward[1..n - 1].to_vec(),
            paired: self.paired[1..n - 1].to_vec(),
        }
    }

    /// Label of the base pair (`step == 0`) or step (`step == 1`) starting at `position`.
    fn label_at(&self, position: usize, step: usize) -> String {
        let span = position..position + step + 1;
        let mut label: Vec<u8> = self.forward[span.clone()].to_vec();
        label.extend(self.paired[span].iter().rev());
        String::from_utf8_lossy(&label).into_owned()
    }

    /// Labels for `count` consecutive positions of a parameter at `level`.
    pub fn labels(&self, level: ParameterLevel, count: usize) -> Result<Vec<String>, SequenceError> {
        self.labels_at(level, 0..count)
    }

    /// Labels for explicit positions (0-based, relative to this duplex).
    pub fn labels_at(
        &self,
        level: ParameterLevel,
        positions: impl IntoIterator<Item = usize>,
    ) -> Result<Vec<String>, SequenceError> {
        let step = level.step();
        positions
            .into_iter()
            .map(|pos| {
                if pos + step >= self.forward.len() {
                    Err(SequenceError::TooShort {
                        length: self.forward.len(),
                        requested: pos + 1,
                    })
                } else {
                    Ok(self.label_at(pos, step))
                }
            })
            .collect()
    }
}

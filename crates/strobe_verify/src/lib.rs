//! Simulation output verification.
//!
//! Decodes the testbench's output file row by row and compares it against
//! the expected-results table. Verification is first-failure-wins: the
//! first mismatching row/field is reported and nothing after it is
//! evaluated, matching the pipeline's fail-fast policy. Don't-care entries
//! are never compared.

#![warn(missing_docs)]

use std::fs;
use std::path::Path;

use strobe_common::{ExpectedValue, Port};

/// Verification failures.
///
/// `DecodeMismatch` and `ValueMismatch` identify the first offending row
/// and signal; the remaining variants cover simulator output that is
/// structurally shorter than the expected table.
#[derive(Debug, thiserror::Error)]
pub enum VerifyError {
    /// A field could not be decoded as a binary integer.
    #[error("row {row}: bad result '{field}' for output '{signal}'")]
    DecodeMismatch {
        /// The row index, counted from zero.
        row: usize,
        /// The output signal name.
        signal: String,
        /// The raw field text.
        field: String,
    },

    /// A decoded field differs from the expected value.
    #[error("row {row}: expected {expected} for output '{signal}', but got {actual}")]
    ValueMismatch {
        /// The row index, counted from zero.
        row: usize,
        /// The output signal name.
        signal: String,
        /// The expected integer value.
        expected: u64,
        /// The decoded actual value.
        actual: u64,
    },

    /// A row carries fewer fields than the output signature.
    #[error("row {row}: missing field for output '{signal}'")]
    MissingField {
        /// The row index, counted from zero.
        row: usize,
        /// The output signal name.
        signal: String,
    },

    /// The output file ended before every expected row was seen.
    #[error("simulation output ended after {actual} row(s), expected {expected}")]
    TruncatedOutput {
        /// The number of expected rows.
        expected: usize,
        /// The number of rows actually present.
        actual: usize,
    },

    /// The output file could not be read.
    #[error("failed to read simulation output: {0}")]
    Io(#[from] std::io::Error),
}

/// Reads and verifies the simulation output file at `path`.
pub fn verify(
    path: &Path,
    outputs: &[Port],
    expected: &[Vec<ExpectedValue>],
) -> Result<(), VerifyError> {
    let text = fs::read_to_string(path)?;
    verify_output(&text, outputs, expected)
}

/// Verifies simulation output text against the expected-results table.
///
/// One line per row; fields split on literal single spaces with
/// surrounding whitespace trimmed from each token. Row `i` is aligned by
/// position with `expected[i]`; extra trailing lines beyond the expected
/// table are ignored.
pub fn verify_output(
    output: &str,
    outputs: &[Port],
    expected: &[Vec<ExpectedValue>],
) -> Result<(), VerifyError> {
    let mut lines = output.lines();
    for (row, expected_row) in expected.iter().enumerate() {
        let line = lines.next().ok_or(VerifyError::TruncatedOutput {
            expected: expected.len(),
            actual: row,
        })?;
        let fields: Vec<&str> = line.split(' ').map(str::trim).collect();
        for (idx, (port, entry)) in outputs.iter().zip(expected_row).enumerate() {
            let want = match entry {
                ExpectedValue::Value(v) => *v,
                ExpectedValue::DontCare => continue,
            };
            let field = match fields.get(idx) {
                Some(f) if !f.is_empty() => *f,
                _ => {
                    return Err(VerifyError::MissingField {
                        row,
                        signal: port.name.clone(),
                    })
                }
            };
            let actual =
                strobe_codec::decode(field).map_err(|_| VerifyError::DecodeMismatch {
                    row,
                    signal: port.name.clone(),
                    field: field.to_string(),
                })?;
            if actual != want {
                return Err(VerifyError::ValueMismatch {
                    row,
                    signal: port.name.clone(),
                    expected: want,
                    actual,
                });
            }
        }
    }
    Ok(())
}

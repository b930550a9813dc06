//! Test case aggregation: a DUT source, its signature, and vector tables.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::port::{is_basic_identifier, PortSignature};

/// One expected-output field: either a value that must match exactly or a
/// don't-care sentinel that is never compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExpectedValue {
    /// The decoded output must equal this value.
    Value(u64),
    /// The field is excluded from comparison.
    DontCare,
}

/// Errors produced when validating a test case.
#[derive(Debug, thiserror::Error)]
pub enum CaseError {
    /// The UUT entity name is not a valid VHDL identifier.
    #[error("invalid UUT name '{0}': not a VHDL identifier")]
    InvalidUutName(String),

    /// The vector and expected-result tables have different row counts.
    #[error("vector rows ({vectors}) and expected rows ({expected}) differ")]
    RowCountMismatch {
        /// Number of input-vector rows.
        vectors: usize,
        /// Number of expected-result rows.
        expected: usize,
    },

    /// An input-vector row does not have one value per input signal.
    #[error("vector row {row} has {len} value(s), expected {expected}")]
    VectorArity {
        /// The offending row index.
        row: usize,
        /// Number of values in the row.
        len: usize,
        /// The input-signal count.
        expected: usize,
    },

    /// An expected-result row does not have one entry per output signal.
    #[error("expected row {row} has {len} entr(ies), expected {expected}")]
    ExpectedArity {
        /// The offending row index.
        row: usize,
        /// Number of entries in the row.
        len: usize,
        /// The output-signal count.
        expected: usize,
    },
}

/// A complete test declaration: the DUT source, its port signature, and
/// parallel input/expected tables, one row per simulated step.
///
/// Immutable after construction; validation happens in [`TestCase::new`].
/// Whether each vector value fits its signal's width is *not* checked here —
/// the codec rejects out-of-range values at encode time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCase {
    source: PathBuf,
    uut_name: String,
    signature: PortSignature,
    clocked: bool,
    vectors: Vec<Vec<u64>>,
    expected: Vec<Vec<ExpectedValue>>,
}

impl TestCase {
    /// Creates a validated test case.
    pub fn new(
        source: impl Into<PathBuf>,
        uut_name: impl Into<String>,
        signature: PortSignature,
        clocked: bool,
        vectors: Vec<Vec<u64>>,
        expected: Vec<Vec<ExpectedValue>>,
    ) -> Result<Self, CaseError> {
        let uut_name = uut_name.into();
        if !is_basic_identifier(&uut_name) {
            return Err(CaseError::InvalidUutName(uut_name));
        }
        if vectors.len() != expected.len() {
            return Err(CaseError::RowCountMismatch {
                vectors: vectors.len(),
                expected: expected.len(),
            });
        }
        let input_count = signature.inputs().len();
        for (row, vector) in vectors.iter().enumerate() {
            if vector.len() != input_count {
                return Err(CaseError::VectorArity {
                    row,
                    len: vector.len(),
                    expected: input_count,
                });
            }
        }
        let output_count = signature.outputs().len();
        for (row, entries) in expected.iter().enumerate() {
            if entries.len() != output_count {
                return Err(CaseError::ExpectedArity {
                    row,
                    len: entries.len(),
                    expected: output_count,
                });
            }
        }
        Ok(Self {
            source: source.into(),
            uut_name,
            signature,
            clocked,
            vectors,
            expected,
        })
    }

    /// Path to the DUT source file handed to the external compiler.
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// The DUT entity name instantiated by the testbench.
    pub fn uut_name(&self) -> &str {
        &self.uut_name
    }

    /// The DUT port signature.
    pub fn signature(&self) -> &PortSignature {
        &self.signature
    }

    /// Whether the testbench drives an implicit clock.
    pub fn clocked(&self) -> bool {
        self.clocked
    }

    /// The input-vector rows, one per simulated step, in order.
    pub fn vectors(&self) -> &[Vec<u64>] {
        &self.vectors
    }

    /// The expected-result rows, aligned with [`TestCase::vectors`].
    pub fn expected(&self) -> &[Vec<ExpectedValue>] {
        &self.expected
    }
}

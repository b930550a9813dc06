//! Shared foundational types for the Strobe HDL verification harness.
//!
//! This crate provides the data model used by every other Strobe crate:
//! port signatures describing a DUT's I/O boundary, test cases pairing
//! input vectors with expected results, and the verdict/stage types that
//! name the outcome of a pipeline run.

#![warn(missing_docs)]

pub mod artifact;
pub mod case;
pub mod port;
pub mod verdict;

pub use case::{CaseError, ExpectedValue, TestCase};
pub use port::{Port, PortSignature, SignatureError};
pub use verdict::{Stage, Verdict};

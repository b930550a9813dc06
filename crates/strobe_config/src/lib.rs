//! TOML test-declaration files.
//!
//! A test declaration names a DUT source, its entity and port signature,
//! and the input/expected vector tables:
//!
//! ```toml
//! [test]
//! source = "adder.ecc"
//! uut = "adder"
//! inputs  = [{ name = "a", width = 8 }, { name = "b", width = 8 }]
//! outputs = [{ name = "q", width = 8 }]
//! vectors = [[1, 1], [12, 15], [255, 1]]
//! expects = [[2], [27], [0]]
//! ```
//!
//! An `expects` entry may be the string `"x"` instead of an integer to
//! mark a don't-care field.

#![warn(missing_docs)]

mod error;
mod loader;
mod types;

pub use error::ConfigError;
pub use loader::{load_decl, load_decl_from_str};
pub use types::{ExpectedField, PortDecl, TestDecl, TestSection};

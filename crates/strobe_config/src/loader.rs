//! Declaration file loading, validation, and conversion to a test case.

use std::path::Path;

use strobe_common::{ExpectedValue, Port, PortSignature, TestCase};

use crate::error::ConfigError;
use crate::types::{ExpectedField, TestDecl};

/// Loads a test declaration from a TOML file.
pub fn load_decl(path: &Path) -> Result<TestDecl, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    load_decl_from_str(&content)
}

/// Parses and validates a test declaration from a string.
///
/// Useful for testing without filesystem dependencies.
pub fn load_decl_from_str(content: &str) -> Result<TestDecl, ConfigError> {
    let decl: TestDecl =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_decl(&decl)?;
    Ok(decl)
}

/// Validates that required fields are present.
fn validate_decl(decl: &TestDecl) -> Result<(), ConfigError> {
    if decl.test.source.is_empty() {
        return Err(ConfigError::Invalid("missing test.source".to_string()));
    }
    if decl.test.uut.is_empty() {
        return Err(ConfigError::Invalid("missing test.uut".to_string()));
    }
    Ok(())
}

impl TestDecl {
    /// Converts the declaration into a validated [`TestCase`], resolving
    /// the DUT source path relative to `decl_dir` (the directory containing
    /// the declaration file).
    pub fn into_test_case(self, decl_dir: &Path) -> Result<TestCase, ConfigError> {
        let to_ports = |decls: Vec<crate::types::PortDecl>| {
            decls
                .into_iter()
                .map(|p| Port::new(p.name, p.width))
                .collect::<Vec<_>>()
        };
        let signature = PortSignature::new(to_ports(self.test.inputs), to_ports(self.test.outputs))
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;

        let mut expected = Vec::with_capacity(self.test.expects.len());
        for row in self.test.expects {
            let mut entries = Vec::with_capacity(row.len());
            for field in row {
                entries.push(convert_field(field)?);
            }
            expected.push(entries);
        }

        TestCase::new(
            decl_dir.join(self.test.source),
            self.test.uut,
            signature,
            self.test.clocked,
            self.test.vectors,
            expected,
        )
        .map_err(|e| ConfigError::Invalid(e.to_string()))
    }
}

/// Converts one expected-output entry, validating don't-care spellings.
fn convert_field(field: ExpectedField) -> Result<ExpectedValue, ConfigError> {
    match field {
        ExpectedField::Value(v) => Ok(ExpectedValue::Value(v)),
        ExpectedField::Marker(s) => match s.as_str() {
            "x" | "X" | "-" => Ok(ExpectedValue::DontCare),
            other => Err(ConfigError::Invalid(format!(
                "unknown expected marker '{other}' (use \"x\" for don't-care)"
            ))),
        },
    }
}

//! Declaration types deserialized from test TOML files.

use serde::Deserialize;

/// The top-level declaration parsed from a `*.toml` test file.
#[derive(Debug, Deserialize)]
pub struct TestDecl {
    /// The single `[test]` section.
    pub test: TestSection,
}

/// The body of a test declaration.
#[derive(Debug, Deserialize)]
pub struct TestSection {
    /// Path to the DUT source, relative to the declaration file.
    pub source: String,
    /// The DUT entity name the testbench instantiates.
    pub uut: String,
    /// Whether the testbench drives an implicit clock.
    #[serde(default)]
    pub clocked: bool,
    /// Ordered input signals.
    pub inputs: Vec<PortDecl>,
    /// Ordered output signals.
    pub outputs: Vec<PortDecl>,
    /// Input-vector rows, one per simulated step.
    #[serde(default)]
    pub vectors: Vec<Vec<u64>>,
    /// Expected-result rows, aligned with `vectors`.
    #[serde(default)]
    pub expects: Vec<Vec<ExpectedField>>,
}

/// One named, fixed-width signal.
#[derive(Debug, Deserialize)]
pub struct PortDecl {
    /// The signal name.
    pub name: String,
    /// The signal width in bits.
    pub width: u32,
}

/// One expected-output entry: an integer that must match exactly, or a
/// don't-care marker string.
///
/// Uses serde's untagged enum so a TOML row can mix both forms:
/// `expects = [[2], ["x"], [0]]`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ExpectedField {
    /// The output must decode to exactly this value.
    Value(u64),
    /// A don't-care marker; accepted spellings are `"x"`, `"X"`, and `"-"`.
    Marker(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::load_decl_from_str;

    #[test]
    fn clocked_defaults_to_false() {
        let toml = r#"
[test]
source = "counter.ecc"
uut = "counter"
inputs  = [{ name = "en", width = 1 }]
outputs = [{ name = "count", width = 8 }]
"#;
        let decl = load_decl_from_str(toml).unwrap();
        assert!(!decl.test.clocked);
        assert!(decl.test.vectors.is_empty());
        assert!(decl.test.expects.is_empty());
    }

    #[test]
    fn mixed_expected_fields() {
        let toml = r#"
[test]
source = "adder.ecc"
uut = "adder"
inputs  = [{ name = "a", width = 8 }]
outputs = [{ name = "q", width = 8 }]
vectors = [[1], [2], [3]]
expects = [[2], ["x"], [0]]
"#;
        let decl = load_decl_from_str(toml).unwrap();
        assert!(matches!(decl.test.expects[0][0], ExpectedField::Value(2)));
        assert!(matches!(decl.test.expects[1][0], ExpectedField::Marker(_)));
        assert!(matches!(decl.test.expects[2][0], ExpectedField::Value(0)));
    }

    #[test]
    fn port_widths_parsed() {
        let toml = r#"
[test]
source = "template.ecc"
uut = "template_test"
inputs  = [{ name = "a", width = 24 }, { name = "b", width = 24 }]
outputs = [{ name = "q", width = 16 }]
"#;
        let decl = load_decl_from_str(toml).unwrap();
        assert_eq!(decl.test.inputs.len(), 2);
        assert_eq!(decl.test.inputs[0].width, 24);
        assert_eq!(decl.test.outputs[0].width, 16);
    }
}

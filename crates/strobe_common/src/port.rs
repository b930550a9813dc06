//! Port and signature types describing a DUT's I/O boundary.

use serde::{Deserialize, Serialize};

/// The widest signal value the harness can represent.
///
/// Vector values travel through the harness as `u64`, so port widths are
/// capped at 64 bits.
pub const MAX_PORT_WIDTH: u32 = 64;

/// The signal name reserved for the testbench's clock driver.
///
/// The synthesized wrapper always declares a `clock` signal of its own, so
/// no DUT port may use the name.
pub const CLOCK_NAME: &str = "clock";

/// A single named DUT signal with a fixed bit width.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Port {
    /// The signal name as it appears on the DUT entity.
    pub name: String,
    /// The signal width in bits.
    pub width: u32,
}

impl Port {
    /// Creates a new port. Validation happens when the port is placed in a
    /// [`PortSignature`].
    pub fn new(name: impl Into<String>, width: u32) -> Self {
        Self {
            name: name.into(),
            width,
        }
    }
}

/// Errors produced when validating a port signature.
#[derive(Debug, thiserror::Error)]
pub enum SignatureError {
    /// A port name is not a valid VHDL basic identifier.
    #[error("invalid port name '{0}': not a VHDL identifier")]
    InvalidName(String),

    /// A port uses a name reserved by the testbench template.
    #[error("port name '{0}' is reserved by the testbench")]
    ReservedName(String),

    /// The same name appears more than once across inputs and outputs.
    #[error("duplicate port name '{0}'")]
    DuplicateName(String),

    /// A port width is outside the supported `1..=64` range.
    #[error("port '{name}' has unsupported width {width} (expected 1..={MAX_PORT_WIDTH})")]
    InvalidWidth {
        /// The offending port name.
        name: String,
        /// The declared width.
        width: u32,
    },
}

/// The ordered input and output signals of a DUT.
///
/// Names are unique across the combined input+output set and every width
/// is in `1..=64`. Constructed once per test case and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortSignature {
    inputs: Vec<Port>,
    outputs: Vec<Port>,
}

impl PortSignature {
    /// Creates a validated signature from ordered input and output ports.
    pub fn new(inputs: Vec<Port>, outputs: Vec<Port>) -> Result<Self, SignatureError> {
        let mut seen: Vec<&str> = Vec::with_capacity(inputs.len() + outputs.len());
        for port in inputs.iter().chain(outputs.iter()) {
            if !is_basic_identifier(&port.name) {
                return Err(SignatureError::InvalidName(port.name.clone()));
            }
            if port.name.eq_ignore_ascii_case(CLOCK_NAME) {
                return Err(SignatureError::ReservedName(port.name.clone()));
            }
            if !(1..=MAX_PORT_WIDTH).contains(&port.width) {
                return Err(SignatureError::InvalidWidth {
                    name: port.name.clone(),
                    width: port.width,
                });
            }
            if seen.iter().any(|n| n.eq_ignore_ascii_case(&port.name)) {
                return Err(SignatureError::DuplicateName(port.name.clone()));
            }
            seen.push(&port.name);
        }
        Ok(Self { inputs, outputs })
    }

    /// The input signals in declaration order.
    pub fn inputs(&self) -> &[Port] {
        &self.inputs
    }

    /// The output signals in declaration order.
    pub fn outputs(&self) -> &[Port] {
        &self.outputs
    }
}

/// Returns true if `name` is a VHDL basic identifier: an ASCII letter
/// followed by letters, digits, and single non-trailing underscores.
///
/// VHDL identifiers are case-insensitive, which is why [`PortSignature`]
/// compares names ignoring case.
pub fn is_basic_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    let mut prev_underscore = false;
    for c in chars {
        if c == '_' {
            if prev_underscore {
                return false;
            }
            prev_underscore = true;
        } else if c.is_ascii_alphanumeric() {
            prev_underscore = false;
        } else {
            return false;
        }
    }
    !prev_underscore
}

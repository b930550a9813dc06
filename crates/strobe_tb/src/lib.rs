//! VHDL testbench synthesizer.
//!
//! Produces a self-contained simulation wrapper around a DUT purely from
//! its port signature: the wrapper instantiates the DUT, reads one encoded
//! input row per line from `input.txt`, drives the DUT inputs, lets the
//! design settle (or pulses the clock), and writes the outputs to
//! `output.txt`, one line per consumed row.
//!
//! Synthesis is a pure, deterministic function of
//! `(uut_name, signature, clocked)` — no DUT semantic knowledge is needed,
//! and identical arguments always yield byte-identical wrapper text.

#![warn(missing_docs)]

mod render;

use std::path::Path;

use strobe_common::{Port, PortSignature};

use render::render;

/// Errors produced while synthesizing or writing a testbench.
///
/// Both variants are fatal; there is no partial or retry behavior.
#[derive(Debug, thiserror::Error)]
pub enum TbError {
    /// The template could not be instantiated.
    #[error("testbench generation failed: {0}")]
    Template(String),

    /// Writing the testbench file failed.
    #[error("testbench generation failed: {0}")]
    Io(#[from] std::io::Error),
}

/// The wrapper template. Slots are filled by [`synthesize`]; port names are
/// validated identifiers, so no signal name can collide with a slot token.
const TB_TEMPLATE: &str = r#"-- Generated by strobe; regenerated on every run.
library ieee;
use ieee.std_logic_1164.all;
use ieee.std_logic_textio.all;
use std.textio.all;

entity strobe_default_tb is
end entity strobe_default_tb;

architecture harness of strobe_default_tb is
  signal clock : std_logic := '0';
${SIGNAL_DECLS}
begin
  uut : entity work.${UUT_NAME}
    port map (
${PORT_MAP}
    );

  drive : process
    file input_file  : text open read_mode is "input.txt";
    file output_file : text open write_mode is "output.txt";
    variable input_line  : line;
    variable output_line : line;
    variable space : character;
${INPUT_VARS}
  begin
    while not endfile(input_file) loop
      readline(input_file, input_line);
${READ_INPUTS}
${ASSIGN_INPUTS}
${ADVANCE}
${WRITE_OUTPUTS}
      writeline(output_file, output_line);
    end loop;
    wait;
  end process;
end architecture harness;
"#;

/// Synthesizes the wrapper text for `uut_name` with the given signature.
///
/// Deterministic: identical arguments yield byte-identical text.
pub fn synthesize(
    uut_name: &str,
    signature: &PortSignature,
    clocked: bool,
) -> Result<String, TbError> {
    if !strobe_common::port::is_basic_identifier(uut_name) {
        return Err(TbError::Template(format!(
            "UUT name '{uut_name}' is not a VHDL identifier"
        )));
    }

    let slots = [
        ("UUT_NAME", uut_name.to_string()),
        ("SIGNAL_DECLS", signal_decls(signature)),
        ("PORT_MAP", port_map(signature, clocked)),
        ("INPUT_VARS", input_vars(signature.inputs())),
        ("READ_INPUTS", read_inputs(signature.inputs())),
        ("ASSIGN_INPUTS", assign_inputs(signature.inputs())),
        ("ADVANCE", advance(clocked).to_string()),
        ("WRITE_OUTPUTS", write_outputs(signature.outputs())),
    ];
    let slot_refs: Vec<(&str, &str)> = slots.iter().map(|(n, v)| (*n, v.as_str())).collect();
    render(TB_TEMPLATE, &slot_refs)
}

/// Synthesizes the wrapper and writes it to `path`.
pub fn write_testbench(
    path: &Path,
    uut_name: &str,
    signature: &PortSignature,
    clocked: bool,
) -> Result<(), TbError> {
    let text = synthesize(uut_name, signature, clocked)?;
    std::fs::write(path, text)?;
    Ok(())
}

/// The VHDL type for a signal of the given width: `std_logic` for a single
/// bit, `std_logic_vector(width-1 downto 0)` above.
fn vhdl_type(width: u32) -> String {
    if width > 1 {
        format!("std_logic_vector({} downto 0)", width - 1)
    } else {
        "std_logic".to_string()
    }
}

/// One `signal` declaration per port, inputs then outputs.
fn signal_decls(signature: &PortSignature) -> String {
    signature
        .inputs()
        .iter()
        .chain(signature.outputs())
        .map(|port| format!("  signal {} : {};", port.name, vhdl_type(port.width)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Named port associations in signature order, `clock` first when clocked.
fn port_map(signature: &PortSignature, clocked: bool) -> String {
    let mut entries = Vec::new();
    if clocked {
        entries.push("clock => clock".to_string());
    }
    for port in signature.inputs().iter().chain(signature.outputs()) {
        entries.push(format!("{name} => {name}", name = port.name));
    }
    entries
        .iter()
        .map(|e| format!("      {e}"))
        .collect::<Vec<_>>()
        .join(",\n")
}

/// One read variable per input, sized to its width.
fn input_vars(inputs: &[Port]) -> String {
    inputs
        .iter()
        .map(|port| format!("    variable v_{} : {};", port.name, vhdl_type(port.width)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Reads one value per input from the current line, skipping the single
/// space separator before each non-first field.
fn read_inputs(inputs: &[Port]) -> String {
    let mut lines = Vec::new();
    for (i, port) in inputs.iter().enumerate() {
        if i > 0 {
            lines.push("      read(input_line, space);".to_string());
        }
        lines.push(format!("      read(input_line, v_{});", port.name));
    }
    lines.join("\n")
}

/// Assigns each read variable to its DUT input signal.
fn assign_inputs(inputs: &[Port]) -> String {
    inputs
        .iter()
        .map(|port| format!("      {name} <= v_{name};", name = port.name))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Advances simulation time after the inputs change: a settle wait for
/// combinational DUTs, one full clock pulse for clocked DUTs.
fn advance(clocked: bool) -> &'static str {
    if clocked {
        "      clock <= '1';\n      wait for 5 ns;\n      clock <= '0';\n      wait for 5 ns;"
    } else {
        "      wait for 10 ns;"
    }
}

/// Writes each output signal followed by a single space separator.
fn write_outputs(outputs: &[Port]) -> String {
    outputs
        .iter()
        .flat_map(|port| {
            [
                format!("      write(output_line, {});", port.name),
                "      write(output_line, string'(\" \"));".to_string(),
            ]
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn adder_signature() -> PortSignature {
        PortSignature::new(
            vec![Port::new("a", 8), Port::new("b", 8)],
            vec![Port::new("q", 8)],
        )
        .unwrap()
    }

    #[test]
    fn synthesis_is_deterministic() {
        let sig = adder_signature();
        let first = synthesize("adder", &sig, false).unwrap();
        let second = synthesize("adder", &sig, false).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn wrapper_declares_all_signals() {
        let text = synthesize("adder", &adder_signature(), false).unwrap();
        assert!(text.contains("signal a : std_logic_vector(7 downto 0);"));
        assert!(text.contains("signal b : std_logic_vector(7 downto 0);"));
        assert!(text.contains("signal q : std_logic_vector(7 downto 0);"));
    }

    #[test]
    fn single_bit_uses_scalar_type() {
        let sig =
            PortSignature::new(vec![Port::new("en", 1)], vec![Port::new("rdy", 1)]).unwrap();
        let text = synthesize("gate", &sig, false).unwrap();
        assert!(text.contains("signal en : std_logic;"));
        assert!(text.contains("signal rdy : std_logic;"));
        assert!(text.contains("variable v_en : std_logic;"));
    }

    #[test]
    fn wrapper_instantiates_uut_by_name() {
        let text = synthesize("adder", &adder_signature(), false).unwrap();
        assert!(text.contains("entity work.adder"));
        assert!(text.contains("a => a"));
        assert!(text.contains("q => q"));
    }

    #[test]
    fn wrapper_matches_pipeline_conventions() {
        use strobe_common::artifact;
        let text = synthesize("adder", &adder_signature(), false).unwrap();
        assert!(text.contains(&format!("entity {} is", artifact::TESTBENCH_ENTITY)));
        assert!(text.contains(&format!("\"{}\"", artifact::INPUT_FILE)));
        assert!(text.contains(&format!("\"{}\"", artifact::OUTPUT_FILE)));
    }

    #[test]
    fn unclocked_map_has_no_clock_entry() {
        let text = synthesize("adder", &adder_signature(), false).unwrap();
        assert!(!text.contains("clock => clock"));
        assert!(text.contains("wait for 10 ns;"));
    }

    #[test]
    fn clocked_map_drives_clock_first() {
        let text = synthesize("adder", &adder_signature(), true).unwrap();
        let map_pos = text.find("clock => clock").unwrap();
        let a_pos = text.find("a => a").unwrap();
        assert!(map_pos < a_pos);
        assert!(text.contains("clock <= '1';"));
        assert!(text.contains("clock <= '0';"));
    }

    #[test]
    fn reads_skip_separator_before_non_first_fields() {
        let text = synthesize("adder", &adder_signature(), false).unwrap();
        let read_a = text.find("read(input_line, v_a);").unwrap();
        let sep = text.find("read(input_line, space);").unwrap();
        let read_b = text.find("read(input_line, v_b);").unwrap();
        assert!(read_a < sep && sep < read_b);
        // Exactly one separator read for two inputs.
        assert_eq!(text.matches("read(input_line, space);").count(), 1);
    }

    #[test]
    fn outputs_written_with_space_separator() {
        let text = synthesize("adder", &adder_signature(), false).unwrap();
        assert!(text.contains("write(output_line, q);"));
        assert!(text.contains("write(output_line, string'(\" \"));"));
    }

    #[test]
    fn no_template_tokens_survive() {
        let text = synthesize("adder", &adder_signature(), true).unwrap();
        assert!(!text.contains("${"));
    }

    #[test]
    fn invalid_uut_name_rejected() {
        let err = synthesize("my adder", &adder_signature(), false).unwrap_err();
        assert!(matches!(err, TbError::Template(_)));
        let err = synthesize("${UUT_NAME}", &adder_signature(), false).unwrap_err();
        assert!(matches!(err, TbError::Template(_)));
    }

    #[test]
    fn write_testbench_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("testbench.vhd");
        write_testbench(&path, "adder", &adder_signature(), false).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("entity strobe_default_tb is"));
    }

    #[test]
    fn write_testbench_io_error() {
        let err = write_testbench(
            Path::new("/nonexistent/dir/testbench.vhd"),
            "adder",
            &adder_signature(),
            false,
        )
        .unwrap_err();
        assert!(matches!(err, TbError::Io(_)));
        assert!(format!("{err}").starts_with("testbench generation failed:"));
    }

    #[test]
    fn vhdl_type_widths() {
        assert_eq!(vhdl_type(1), "std_logic");
        assert_eq!(vhdl_type(8), "std_logic_vector(7 downto 0)");
        assert_eq!(vhdl_type(24), "std_logic_vector(23 downto 0)");
    }
}

//! Conventional artifact names shared across the pipeline.
//!
//! The wrapper and the DUT are always named consistently, so every stage
//! after compilation is parameterized only by these fixed names.

/// The HDL artifact the DUT compiler is asked to produce.
pub const DUT_ARTIFACT: &str = "uut.vhd";

/// The synthesized testbench source file.
pub const TESTBENCH_FILE: &str = "testbench.vhd";

/// The encoded input-vector file the testbench reads.
pub const INPUT_FILE: &str = "input.txt";

/// The decoded output file the testbench writes.
pub const OUTPUT_FILE: &str = "output.txt";

/// The reserved top-level entity name of every synthesized testbench.
pub const TESTBENCH_ENTITY: &str = "strobe_default_tb";

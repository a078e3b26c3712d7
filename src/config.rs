//! Configuration constants for the AQA assembly machine.

// Machine geometry
pub const NUM_REGISTERS: usize = 13; // R0..R12
pub const MEMORY_SIZE: usize = 1000; // Addressable memory cells 0..999
pub const WORD_MODULUS: i64 = 256; // Every stored cell is an unsigned 8-bit value

// Execution
pub const DEFAULT_MAX_STEPS: Option<u64> = None; // Unbounded unless the host asks for a limit

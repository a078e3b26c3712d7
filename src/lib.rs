//! An interpreter for the AQA educational assembly language.
//!
//! The host pokes input values into memory, runs a program text, then peeks the results:
//!
//! ```
//! use aqavm::Machine;
//!
//! let mut machine = Machine::new();
//! machine.poke(5, 40).unwrap();
//! machine.run("LDR R0, 5\nADD R0, R0, #2\nSTR R0, 6\nHALT").unwrap();
//! assert_eq!(machine.peek(6), Ok(42));
//! ```

pub mod config;
pub mod logging;
pub mod vm;

pub use vm::{InterpretError, Machine, RunResult, StateError, VMFault};

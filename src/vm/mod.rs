// VM module entry point

pub mod error;
pub mod executor;
pub mod instruction;
pub mod machine;
pub mod memory;
pub mod operand;
pub mod parser;
pub mod registers;
pub mod state;

pub use error::{InterpretError, StateError, VMFault};
pub use machine::{Machine, RunResult};
pub use operand::Operand;

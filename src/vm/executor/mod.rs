// VM Instruction execution: dispatches decoded instructions to per-family processors

pub mod arithmetic_ops;
pub mod bitwise_ops;
pub mod control_flow_ops;
pub mod instruction_executor;
pub mod processor;
pub mod register_ops;

pub use crate::vm::instruction::Instruction;
pub use crate::vm::operand::Operand;
pub use instruction_executor::InstructionExecutor;
pub use processor::InstructionProcessor;

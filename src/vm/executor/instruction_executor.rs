use super::arithmetic_ops::ArithmeticOperations;
use super::bitwise_ops::BitwiseOperations;
use super::control_flow_ops::ControlFlowOperations;
use super::processor::InstructionProcessor;
use super::register_ops::RegisterOperations;
use crate::vm::error::VMFault;
use crate::vm::instruction::Instruction;
use crate::vm::parser::LabelTable;
use crate::vm::state::VMState;

/// A struct that holds all instruction processors
pub struct InstructionExecutor {
    processors: Vec<Box<dyn InstructionProcessor>>,
}

impl InstructionExecutor {
    /// Create a new executor with all processors registered
    pub fn new() -> Self {
        let processors: Vec<Box<dyn InstructionProcessor>> = vec![
            Box::new(RegisterOperations::new()),
            Box::new(ArithmeticOperations::new()),
            Box::new(BitwiseOperations::new()),
            Box::new(ControlFlowOperations::new()),
        ];

        InstructionExecutor { processors }
    }

    /// Execute a single instruction, delegating to the appropriate processor.
    ///
    /// On success the instruction pointer moves past the instruction unless it was a
    /// branch or halt, which position it themselves.
    pub fn execute_instruction(
        &self,
        vm: &mut VMState,
        labels: &LabelTable,
        instr: &Instruction,
    ) -> Result<(), VMFault> {
        let processor = self
            .processors
            .iter()
            .find(|p| p.can_process(instr))
            .ok_or_else(|| VMFault::UnknownInstruction(format!("{:?}", instr)))?;

        processor.process(vm, labels, instr)?;
        if !instr.is_control_flow() {
            vm.advance_ip();
        }
        Ok(())
    }
}

impl Default for InstructionExecutor {
    fn default() -> Self {
        Self::new()
    }
}

use super::processor::InstructionProcessor;
use crate::vm::error::VMFault;
use crate::vm::instruction::Instruction;
use crate::vm::parser::LabelTable;
use crate::vm::state::VMState;

/// Processor for arithmetic operations
pub struct ArithmeticOperations;

impl ArithmeticOperations {
    pub fn new() -> Self {
        ArithmeticOperations
    }
}

impl InstructionProcessor for ArithmeticOperations {
    fn can_process(&self, instruction: &Instruction) -> bool {
        matches!(
            instruction,
            Instruction::Add(_, _, _) | Instruction::Sub(_, _, _)
        )
    }

    fn process(
        &self,
        vm: &mut VMState,
        _labels: &LabelTable,
        instruction: &Instruction,
    ) -> Result<(), VMFault> {
        match instruction {
            Instruction::Add(dest, src, op) => {
                let a = vm.get_register(*src)? as i64;
                let b = op.get_value(vm)?;
                // The register write reduces mod 256
                vm.set_register(*dest, a.wrapping_add(b))?;
                crate::debug_instructions!(
                    line = vm.ip + 1,
                    "Add: {} <- {} + {} = {}",
                    dest,
                    a,
                    b,
                    vm.get_register(*dest)?
                );
                Ok(())
            }
            Instruction::Sub(dest, src, op) => {
                let a = vm.get_register(*src)? as i64;
                let b = op.get_value(vm)?;
                vm.set_register(*dest, a.wrapping_sub(b))?;
                crate::debug_instructions!(
                    line = vm.ip + 1,
                    "Sub: {} <- {} - {} = {}",
                    dest,
                    a,
                    b,
                    vm.get_register(*dest)?
                );
                Ok(())
            }
            _ => Err(VMFault::UnknownInstruction(format!("{:?}", instruction))),
        }
    }
}

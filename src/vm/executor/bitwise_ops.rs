use super::processor::InstructionProcessor;
use crate::vm::error::{StateError, VMFault};
use crate::vm::instruction::Instruction;
use crate::vm::parser::LabelTable;
use crate::vm::state::VMState;

/// Processor for bitwise operations
pub struct BitwiseOperations;

impl BitwiseOperations {
    pub fn new() -> Self {
        BitwiseOperations
    }
}

/// Shift amounts must be non-negative; anything at or past the word width clears the value.
fn shift_amount(amount: i64) -> Result<u32, StateError> {
    if amount < 0 {
        return Err(StateError::InvalidOperand(format!("#{}", amount)));
    }
    Ok(u32::try_from(amount).unwrap_or(u32::MAX))
}

impl InstructionProcessor for BitwiseOperations {
    fn can_process(&self, instruction: &Instruction) -> bool {
        matches!(
            instruction,
            Instruction::And(_, _, _)
                | Instruction::Orr(_, _, _)
                | Instruction::Eor(_, _, _)
                | Instruction::Mvn(_, _)
                | Instruction::Lsl(_, _, _)
                | Instruction::Lsr(_, _, _)
        )
    }

    fn process(
        &self,
        vm: &mut VMState,
        _labels: &LabelTable,
        instruction: &Instruction,
    ) -> Result<(), VMFault> {
        let (dest, result) = match instruction {
            Instruction::And(dest, src, op) => {
                let a = vm.get_register(*src)? as i64;
                (dest, a & op.get_value(vm)?)
            }
            Instruction::Orr(dest, src, op) => {
                let a = vm.get_register(*src)? as i64;
                (dest, a | op.get_value(vm)?)
            }
            Instruction::Eor(dest, src, op) => {
                let a = vm.get_register(*src)? as i64;
                (dest, a ^ op.get_value(vm)?)
            }
            Instruction::Mvn(dest, op) => (dest, !op.get_value(vm)?),
            Instruction::Lsl(dest, src, op) => {
                let a = vm.get_register(*src)? as i64;
                let shift = shift_amount(op.get_value(vm)?)?;
                (dest, a.checked_shl(shift).unwrap_or(0))
            }
            Instruction::Lsr(dest, src, op) => {
                let a = vm.get_register(*src)? as i64;
                let shift = shift_amount(op.get_value(vm)?)?;
                (dest, a.checked_shr(shift).unwrap_or(0))
            }
            _ => return Err(VMFault::UnknownInstruction(format!("{:?}", instruction))),
        };

        vm.set_register(*dest, result)?;
        crate::debug_instructions!(
            line = vm.ip + 1,
            "{:?}: {} <- {:#010b}",
            instruction,
            dest,
            vm.get_register(*dest)?
        );
        Ok(())
    }
}

use super::processor::InstructionProcessor;
use crate::vm::error::VMFault;
use crate::vm::instruction::Instruction;
use crate::vm::parser::LabelTable;
use crate::vm::state::VMState;

/// Processor for control flow operations
pub struct ControlFlowOperations;

impl ControlFlowOperations {
    pub fn new() -> Self {
        ControlFlowOperations
    }
}

impl InstructionProcessor for ControlFlowOperations {
    fn can_process(&self, instruction: &Instruction) -> bool {
        matches!(instruction, Instruction::Branch(_, _) | Instruction::Halt)
    }

    fn process(
        &self,
        vm: &mut VMState,
        labels: &LabelTable,
        instruction: &Instruction,
    ) -> Result<(), VMFault> {
        match instruction {
            Instruction::Halt => {
                crate::debug_instructions!(line = vm.ip + 1, "Halt");
                vm.halt();
                Ok(())
            }
            Instruction::Branch(condition, label) => {
                let taken = condition.holds(&vm.flags)?;
                crate::debug_instructions!(
                    line = vm.ip + 1,
                    "{:?} {}: flags = {:?}. Jumping? {}",
                    condition,
                    label,
                    vm.flags,
                    taken
                );
                if taken {
                    let target = labels
                        .target(label)
                        .ok_or_else(|| VMFault::InvalidBranch(label.clone()))?;
                    vm.jump(target);
                } else {
                    vm.advance_ip();
                }
                Ok(())
            }
            _ => Err(VMFault::UnknownInstruction(format!("{:?}", instruction))),
        }
    }
}

use crate::vm::error::VMFault;
use crate::vm::instruction::Instruction;
use crate::vm::parser::LabelTable;
use crate::vm::state::VMState;

/// A family of instructions the executor can delegate to
pub trait InstructionProcessor {
    /// Returns true if this processor handles the instruction
    fn can_process(&self, instruction: &Instruction) -> bool;

    /// Apply the instruction to the VM state. Only control flow processors touch the
    /// instruction pointer; the executor advances it for everything else.
    fn process(
        &self,
        vm: &mut VMState,
        labels: &LabelTable,
        instruction: &Instruction,
    ) -> Result<(), VMFault>;
}

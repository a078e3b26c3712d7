use super::processor::InstructionProcessor;
use crate::vm::error::VMFault;
use crate::vm::instruction::Instruction;
use crate::vm::parser::LabelTable;
use crate::vm::state::VMState;

/// Processor for register and memory transfer instructions
pub struct RegisterOperations;

impl RegisterOperations {
    pub fn new() -> Self {
        RegisterOperations
    }
}

impl InstructionProcessor for RegisterOperations {
    fn can_process(&self, instruction: &Instruction) -> bool {
        matches!(
            instruction,
            Instruction::Ldr(_, _)
                | Instruction::Str(_, _)
                | Instruction::Mov(_, _)
                | Instruction::Cmp(_, _)
        )
    }

    fn process(
        &self,
        vm: &mut VMState,
        _labels: &LabelTable,
        instruction: &Instruction,
    ) -> Result<(), VMFault> {
        match instruction {
            Instruction::Ldr(reg, addr) => {
                let value = vm.get_memory(*addr)?;
                vm.set_register(*reg, value as i64)?;
                crate::debug_instructions!(
                    line = vm.ip + 1,
                    "Ldr: Loaded {} from memory[{}] into {}",
                    value,
                    addr,
                    reg
                );
                Ok(())
            }
            Instruction::Str(reg, addr) => {
                let value = vm.get_register(*reg)?;
                vm.set_memory(*addr, value as i64)?;
                crate::debug_instructions!(
                    line = vm.ip + 1,
                    "Str: Stored {} from {} into memory[{}]",
                    value,
                    reg,
                    addr
                );
                Ok(())
            }
            Instruction::Mov(reg, op) => {
                let value = op.get_value(vm)?;
                vm.set_register(*reg, value)?;
                crate::debug_instructions!(line = vm.ip + 1, "Mov: {} <- {}", reg, value);
                Ok(())
            }
            Instruction::Cmp(reg, op) => {
                let left = vm.get_register(*reg)? as i64;
                let right = op.get_value(vm)?;
                vm.set_flags(left, right);
                crate::debug_instructions!(
                    line = vm.ip + 1,
                    "Cmp: flags <- ({}, {})",
                    left,
                    right
                );
                Ok(())
            }
            _ => Err(VMFault::UnknownInstruction(format!("{:?}", instruction))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vm::memory::Address;
    use crate::vm::operand::Operand;
    use crate::vm::registers::Register;
    use crate::vm::state::ComparisonFlags;

    fn reg(n: i64) -> Register {
        Register::new(n).unwrap()
    }

    fn addr(n: i64) -> Address {
        Address::new(n).unwrap()
    }

    fn run(vm: &mut VMState, instruction: Instruction) -> Result<(), VMFault> {
        RegisterOperations::new().process(vm, &LabelTable::default(), &instruction)
    }

    #[test]
    fn test_ldr_str() {
        let mut vm = VMState::new();
        vm.set_memory(addr(5), 42).unwrap();
        run(&mut vm, Instruction::Ldr(reg(0), addr(5))).unwrap();
        assert_eq!(vm.get_register(reg(0)).unwrap(), 42);
        run(&mut vm, Instruction::Str(reg(0), addr(6))).unwrap();
        assert_eq!(vm.get_memory(addr(6)).unwrap(), 42);
    }

    #[test]
    fn test_mov_wraps_on_store() {
        let mut vm = VMState::new();
        run(&mut vm, Instruction::Mov(reg(1), Operand::Immediate(300))).unwrap();
        assert_eq!(vm.get_register(reg(1)).unwrap(), 44);
        run(&mut vm, Instruction::Mov(reg(2), Operand::Register(reg(1)))).unwrap();
        assert_eq!(vm.get_register(reg(2)).unwrap(), 44);
    }

    #[test]
    fn test_cmp_sets_flags_only() {
        let mut vm = VMState::new();
        vm.set_register(reg(0), 9).unwrap();
        run(&mut vm, Instruction::Cmp(reg(0), Operand::Immediate(5))).unwrap();
        assert_eq!(vm.flags, ComparisonFlags::Set { left: 9, right: 5 });
        assert_eq!(vm.get_register(reg(0)).unwrap(), 9);
        assert_eq!(vm.ip, 0);
    }

    #[test]
    fn test_rejects_foreign_instruction() {
        let processor = RegisterOperations::new();
        assert!(!processor.can_process(&Instruction::Halt));
        let mut vm = VMState::new();
        assert!(run(&mut vm, Instruction::Halt).is_err());
    }
}

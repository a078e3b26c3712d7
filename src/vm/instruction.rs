use std::fmt;
use std::str::FromStr;

use crate::vm::error::VMFault;
use crate::vm::memory::Address;
use crate::vm::operand::Operand;
use crate::vm::registers::Register;
use crate::vm::state::ComparisonFlags;

/// Every mnemonic the machine recognises
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mnemonic {
    // Memory
    Ldr,
    Str,
    // Arithmetic
    Add,
    Sub,
    // Register
    Mov,
    Cmp,
    // Bitwise
    And,
    Orr,
    Eor,
    Mvn,
    Lsl,
    Lsr,
    // Control flow
    B,
    Beq,
    Bne,
    Bgt,
    Blt,
    Halt,
}

impl Mnemonic {
    pub const ALL: [Mnemonic; 18] = [
        Mnemonic::Ldr,
        Mnemonic::Str,
        Mnemonic::Add,
        Mnemonic::Sub,
        Mnemonic::Mov,
        Mnemonic::Cmp,
        Mnemonic::And,
        Mnemonic::Orr,
        Mnemonic::Eor,
        Mnemonic::Mvn,
        Mnemonic::Lsl,
        Mnemonic::Lsr,
        Mnemonic::B,
        Mnemonic::Beq,
        Mnemonic::Bne,
        Mnemonic::Bgt,
        Mnemonic::Blt,
        Mnemonic::Halt,
    ];

    pub fn name(self) -> &'static str {
        use Mnemonic::*;
        match self {
            Ldr => "LDR",
            Str => "STR",
            Add => "ADD",
            Sub => "SUB",
            Mov => "MOV",
            Cmp => "CMP",
            And => "AND",
            Orr => "ORR",
            Eor => "EOR",
            Mvn => "MVN",
            Lsl => "LSL",
            Lsr => "LSR",
            B => "B",
            Beq => "BEQ",
            Bne => "BNE",
            Bgt => "BGT",
            Blt => "BLT",
            Halt => "HALT",
        }
    }

    /// Number of comma-separated arguments the instruction takes
    pub fn arity(self) -> usize {
        use Mnemonic::*;
        match self {
            Halt => 0,
            B | Beq | Bne | Bgt | Blt => 1,
            Ldr | Str | Mov | Cmp | Mvn => 2,
            Add | Sub | And | Orr | Eor | Lsl | Lsr => 3,
        }
    }
}

impl FromStr for Mnemonic {
    type Err = VMFault;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mnemonic::ALL
            .into_iter()
            .find(|m| m.name() == s)
            .ok_or_else(|| VMFault::UnknownInstruction(s.to_string()))
    }
}

impl fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Branch predicate over the comparison flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    Always,
    Equal,
    NotEqual,
    Greater,
    Less,
}

impl Condition {
    /// Whether the branch is taken. Conditional predicates need a prior `CMP`.
    pub fn holds(self, flags: &ComparisonFlags) -> Result<bool, VMFault> {
        use std::cmp::Ordering;
        if self == Condition::Always {
            return Ok(true);
        }
        let ordering = flags.ordering()?;
        Ok(match self {
            Condition::Always => true,
            Condition::Equal => ordering == Ordering::Equal,
            Condition::NotEqual => ordering != Ordering::Equal,
            Condition::Greater => ordering == Ordering::Greater,
            Condition::Less => ordering == Ordering::Less,
        })
    }
}

/// A fully decoded instruction with typed operands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    Ldr(Register, Address),
    Str(Register, Address),
    Add(Register, Register, Operand),
    Sub(Register, Register, Operand),
    Mov(Register, Operand),
    Cmp(Register, Operand),
    And(Register, Register, Operand),
    Orr(Register, Register, Operand),
    Eor(Register, Register, Operand),
    Mvn(Register, Operand),
    Lsl(Register, Register, Operand),
    Lsr(Register, Register, Operand),
    Branch(Condition, String),
    Halt,
}

impl Instruction {
    /// Decodes a mnemonic and its raw argument tokens.
    ///
    /// Arity is checked before any operand is looked at, so `ADD R0, R1` reports the
    /// missing argument rather than whatever the first bad token happens to be.
    pub fn decode(mnemonic: &str, args: &[&str]) -> Result<Self, VMFault> {
        let mnemonic: Mnemonic = mnemonic.parse()?;
        if args.len() != mnemonic.arity() {
            return Err(VMFault::ArityMismatch {
                mnemonic: mnemonic.name(),
                expected: mnemonic.arity(),
                given: args.len(),
            });
        }

        use Mnemonic as M;
        let instr = match mnemonic {
            M::Halt => Instruction::Halt,
            M::B => Instruction::Branch(Condition::Always, args[0].to_string()),
            M::Beq => Instruction::Branch(Condition::Equal, args[0].to_string()),
            M::Bne => Instruction::Branch(Condition::NotEqual, args[0].to_string()),
            M::Bgt => Instruction::Branch(Condition::Greater, args[0].to_string()),
            M::Blt => Instruction::Branch(Condition::Less, args[0].to_string()),
            M::Ldr => Instruction::Ldr(args[0].parse()?, args[1].parse()?),
            M::Str => Instruction::Str(args[0].parse()?, args[1].parse()?),
            M::Mov => Instruction::Mov(args[0].parse()?, args[1].parse()?),
            M::Cmp => Instruction::Cmp(args[0].parse()?, args[1].parse()?),
            M::Mvn => Instruction::Mvn(args[0].parse()?, args[1].parse()?),
            M::Add => Instruction::Add(args[0].parse()?, args[1].parse()?, args[2].parse()?),
            M::Sub => Instruction::Sub(args[0].parse()?, args[1].parse()?, args[2].parse()?),
            M::And => Instruction::And(args[0].parse()?, args[1].parse()?, args[2].parse()?),
            M::Orr => Instruction::Orr(args[0].parse()?, args[1].parse()?, args[2].parse()?),
            M::Eor => Instruction::Eor(args[0].parse()?, args[1].parse()?, args[2].parse()?),
            M::Lsl => Instruction::Lsl(args[0].parse()?, args[1].parse()?, args[2].parse()?),
            M::Lsr => Instruction::Lsr(args[0].parse()?, args[1].parse()?, args[2].parse()?),
        };
        Ok(instr)
    }

    /// Control flow instructions move the program counter themselves
    pub fn is_control_flow(&self) -> bool {
        matches!(self, Instruction::Branch(..) | Instruction::Halt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vm::error::StateError;

    fn reg(n: i64) -> Register {
        Register::new(n).unwrap()
    }

    #[test]
    fn test_mnemonic_round_trip_names() {
        for m in Mnemonic::ALL {
            assert_eq!(m.name().parse::<Mnemonic>(), Ok(m));
        }
        assert_eq!(
            "add".parse::<Mnemonic>(),
            Err(VMFault::UnknownInstruction("add".to_string()))
        );
        assert_eq!(
            "BLE".parse::<Mnemonic>(),
            Err(VMFault::UnknownInstruction("BLE".to_string()))
        );
    }

    #[test]
    fn test_decode_three_operand() {
        let instr = Instruction::decode("ADD", &["R0", "R1", "#5"]).unwrap();
        assert_eq!(
            instr,
            Instruction::Add(reg(0), reg(1), Operand::Immediate(5))
        );
        let instr = Instruction::decode("LSR", &["R2", "R3", "R4"]).unwrap();
        assert_eq!(
            instr,
            Instruction::Lsr(reg(2), reg(3), Operand::Register(reg(4)))
        );
    }

    #[test]
    fn test_decode_memory_and_branch() {
        assert_eq!(
            Instruction::decode("LDR", &["R0", "5"]).unwrap(),
            Instruction::Ldr(reg(0), Address::new(5).unwrap())
        );
        assert_eq!(
            Instruction::decode("BNE", &["loop"]).unwrap(),
            Instruction::Branch(Condition::NotEqual, "loop".to_string())
        );
        assert_eq!(Instruction::decode("HALT", &[]).unwrap(), Instruction::Halt);
    }

    #[test]
    fn test_decode_arity_mismatch() {
        assert_eq!(
            Instruction::decode("ADD", &["R0", "R1"]),
            Err(VMFault::ArityMismatch {
                mnemonic: "ADD",
                expected: 3,
                given: 2
            })
        );
        assert_eq!(
            Instruction::decode("HALT", &["now"]),
            Err(VMFault::ArityMismatch {
                mnemonic: "HALT",
                expected: 0,
                given: 1
            })
        );
        assert_eq!(
            Instruction::decode("B", &[]),
            Err(VMFault::ArityMismatch {
                mnemonic: "B",
                expected: 1,
                given: 0
            })
        );
    }

    #[test]
    fn test_decode_bad_tokens() {
        assert_eq!(
            Instruction::decode("MOV", &["R0", "#x"]),
            Err(VMFault::State(StateError::InvalidOperand("#x".to_string())))
        );
        assert_eq!(
            Instruction::decode("STR", &["R0", "1000"]),
            Err(VMFault::State(StateError::MemoryOutOfRange(1000)))
        );
        assert_eq!(
            Instruction::decode("MOV", &["#1", "#2"]),
            Err(VMFault::State(StateError::InvalidRegister("#1".to_string())))
        );
    }

    #[test]
    fn test_condition_holds() {
        let unset = ComparisonFlags::Unset;
        assert_eq!(Condition::Always.holds(&unset), Ok(true));
        assert_eq!(
            Condition::Equal.holds(&unset),
            Err(VMFault::ComparisonNotPerformed)
        );

        let flags = ComparisonFlags::Set { left: 6, right: 5 };
        assert_eq!(Condition::Greater.holds(&flags), Ok(true));
        assert_eq!(Condition::Less.holds(&flags), Ok(false));
        assert_eq!(Condition::NotEqual.holds(&flags), Ok(true));
        assert_eq!(Condition::Equal.holds(&flags), Ok(false));
    }
}

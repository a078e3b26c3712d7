use std::str::FromStr;

use crate::vm::error::StateError;
use crate::vm::registers::Register;
use crate::vm::state::VMState;

/// Represents an immediate value or register operand
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    Immediate(i64),
    Register(Register),
}

impl FromStr for Operand {
    type Err = StateError;

    /// Decodes `R<n>` as a register and `#<n>` as a signed literal
    fn from_str(token: &str) -> Result<Self, Self::Err> {
        if token.starts_with('R') {
            return token.parse::<Register>().map(Operand::Register);
        }
        match token.strip_prefix('#') {
            Some(literal) => literal
                .parse::<i64>()
                .map(Operand::Immediate)
                .map_err(|_| StateError::InvalidOperand(token.to_string())),
            None => Err(StateError::InvalidOperand(token.to_string())),
        }
    }
}

impl Operand {
    /// Resolves the operand against the current register file. Literals come back unwrapped.
    pub fn get_value(&self, vm: &VMState) -> Result<i64, StateError> {
        match self {
            Operand::Immediate(val) => Ok(*val),
            Operand::Register(r) => {
                let val = vm.registers.get(*r)?;
                log::trace!(target: "instructions", "Read register {} = {}", r, val);
                Ok(val as i64)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_operands() {
        assert_eq!(
            "R4".parse::<Operand>(),
            Ok(Operand::Register(Register::new(4).unwrap()))
        );
        assert_eq!("#42".parse::<Operand>(), Ok(Operand::Immediate(42)));
        assert_eq!("#-3".parse::<Operand>(), Ok(Operand::Immediate(-3)));
        assert_eq!("#300".parse::<Operand>(), Ok(Operand::Immediate(300)));
    }

    #[test]
    fn test_parse_operand_errors() {
        assert_eq!(
            "#abc".parse::<Operand>(),
            Err(StateError::InvalidOperand("#abc".to_string()))
        );
        assert_eq!(
            "R99".parse::<Operand>(),
            Err(StateError::RegisterOutOfRange(99))
        );
        assert_eq!(
            "Rq".parse::<Operand>(),
            Err(StateError::InvalidRegister("Rq".to_string()))
        );
        assert_eq!(
            "17".parse::<Operand>(),
            Err(StateError::InvalidOperand("17".to_string()))
        );
    }

    #[test]
    fn test_get_value() {
        let mut vm = VMState::new();
        let r2 = Register::new(2).unwrap();
        vm.registers.set(r2, 9).unwrap();
        assert_eq!(Operand::Register(r2).get_value(&vm), Ok(9));
        assert_eq!(Operand::Immediate(-7).get_value(&vm), Ok(-7));
    }
}

// VM Register system: register names, storage, and 8-bit wrapping access logic

use std::fmt;
use std::str::FromStr;

use super::error::StateError;
use crate::config::{NUM_REGISTERS, WORD_MODULUS};

/// Reduce any integer into the unsigned 8-bit range (Euclidean, so -1 becomes 255).
pub(crate) fn wrap_word(value: i64) -> u8 {
    value.rem_euclid(WORD_MODULUS) as u8
}

/// A general purpose register, R0 through R12
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Register(usize);

impl Register {
    /// Builds a register from a raw index, rejecting anything outside the register file.
    pub fn new(index: i64) -> Result<Self, StateError> {
        usize::try_from(index)
            .ok()
            .filter(|&idx| idx < NUM_REGISTERS)
            .map(Register)
            .ok_or(StateError::RegisterOutOfRange(index))
    }

    pub fn index(self) -> usize {
        self.0
    }
}

impl FromStr for Register {
    type Err = StateError;

    /// Parses a register token such as `R7`.
    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let digits = token
            .strip_prefix('R')
            .ok_or_else(|| StateError::InvalidRegister(token.to_string()))?;
        let index = digits
            .parse::<i64>()
            .map_err(|_| StateError::InvalidRegister(token.to_string()))?;
        Register::new(index)
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R{}", self.0)
    }
}

/// Storage for all VM registers
#[derive(Debug, Clone)]
pub struct Registers {
    data: [u8; NUM_REGISTERS],
}

impl Registers {
    pub fn new() -> Self {
        Registers {
            data: [0; NUM_REGISTERS],
        }
    }

    /// Get the value of a register
    pub fn get(&self, reg: Register) -> Result<u8, StateError> {
        self.data
            .get(reg.index())
            .copied()
            .ok_or(StateError::RegisterOutOfRange(reg.index() as i64))
    }

    /// Set the value of a register, wrapping it into 0..=255
    pub fn set(&mut self, reg: Register, value: i64) -> Result<(), StateError> {
        if let Some(slot) = self.data.get_mut(reg.index()) {
            *slot = wrap_word(value);
            Ok(())
        } else {
            Err(StateError::RegisterOutOfRange(reg.index() as i64))
        }
    }

    pub fn clear(&mut self) {
        self.data = [0; NUM_REGISTERS];
    }

    /// Snapshot of the whole register file, R0 first
    pub fn view(&self) -> &[u8] {
        &self.data
    }
}

impl Default for Registers {
    fn default() -> Self {
        Self::new()
    }
}

// VM Error types: state access errors, execution faults, line-tagged interpretation errors

use thiserror::Error;

/// State Errors
///
/// Raised by the register file, memory and operand decoding. These never reach the host
/// directly; the engine wraps them in an [`InterpretError`] carrying the offending line.
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum StateError {
    #[error("invalid register: '{0}'")]
    InvalidRegister(String),
    #[error("register index {0} out of range")]
    RegisterOutOfRange(i64),
    #[error("invalid memory address: '{0}'")]
    InvalidMemoryAddress(String),
    #[error("memory address {0} out of range")]
    MemoryOutOfRange(i64),
    #[error("invalid operand: '{0}'")]
    InvalidOperand(String),
}

/// VM Errors
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum VMFault {
    #[error("unknown instruction '{0}'")]
    UnknownInstruction(String),
    #[error("{mnemonic} expects {expected} argument(s), {given} given")]
    ArityMismatch {
        mnemonic: &'static str,
        expected: usize,
        given: usize,
    },
    #[error("invalid branch: label '{0}' not found")]
    InvalidBranch(String),
    #[error("comparison not performed before this branch")]
    ComparisonNotPerformed,
    #[error("no more instructions")]
    NoMoreInstructions,
    #[error("step limit of {0} exceeded")]
    StepLimitExceeded(u64),
    #[error(transparent)]
    State(#[from] StateError),
}

/// The single failure surfaced to the host: a fault and the 1-based line it was detected on.
#[derive(Error, Debug, PartialEq, Eq, Clone)]
#[error("error at line {line}: {fault}")]
pub struct InterpretError {
    pub line: usize,
    #[source]
    pub fault: VMFault,
}

impl InterpretError {
    pub fn new(line: usize, fault: impl Into<VMFault>) -> Self {
        InterpretError {
            line,
            fault: fault.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_interpret_error_display_names_line() {
        let err = InterpretError::new(
            4,
            VMFault::ArityMismatch {
                mnemonic: "ADD",
                expected: 3,
                given: 2,
            },
        );
        assert_eq!(
            err.to_string(),
            "error at line 4: ADD expects 3 argument(s), 2 given"
        );
    }

    #[test]
    fn test_state_error_is_chained() {
        let err = InterpretError::new(2, StateError::RegisterOutOfRange(13));
        assert_eq!(err.fault, VMFault::State(StateError::RegisterOutOfRange(13)));
        let source = err.source().expect("fault should be the error source");
        assert_eq!(source.to_string(), "register index 13 out of range");
    }
}

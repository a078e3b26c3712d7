// VM Machine: the host-facing surface (poke, run, peek) and the fetch-decode-execute loop

use super::error::{InterpretError, StateError, VMFault};
use super::executor::InstructionExecutor;
use super::instruction::Instruction;
use super::memory::Address;
use super::parser::{Line, Program};
use super::state::{RunStatus, VMState};
use crate::config;

/// Outcome of a run: `Ok` once `HALT` executes, otherwise the line-tagged failure
pub type RunResult = Result<(), InterpretError>;

/// An AQA assembly machine: 13 registers, 1000 memory cells, one program at a time
#[derive(Debug, Clone)]
pub struct Machine {
    state: VMState,
    step_limit: Option<u64>,
}

impl Machine {
    pub fn new() -> Self {
        Machine {
            state: VMState::new(),
            step_limit: config::DEFAULT_MAX_STEPS,
        }
    }

    /// Stop any run that executes more than `limit` instructions
    pub fn with_step_limit(mut self, limit: u64) -> Self {
        self.step_limit = Some(limit);
        self
    }

    /// Pre-load a memory cell before running; the value wraps into 0..=255
    pub fn poke(&mut self, index: i64, value: i64) -> Result<(), StateError> {
        self.state.set_memory(Address::new(index)?, value)
    }

    /// Read a memory cell back after running
    pub fn peek(&self, index: i64) -> Result<u8, StateError> {
        self.state.get_memory(Address::new(index)?)
    }

    pub fn state(&self) -> &VMState {
        &self.state
    }

    pub fn status(&self) -> &RunStatus {
        &self.state.status
    }

    /// Zero registers, memory and flags
    pub fn reset(&mut self) {
        self.state.reset();
    }

    /// Execute `source` until it halts or fails.
    ///
    /// Registers, flags and the program counter start fresh; memory keeps whatever the host
    /// poked. There is no implicit halt: running past the last line is an error.
    pub fn run(&mut self, source: &str) -> RunResult {
        let program = Program::parse(source);
        let executor = InstructionExecutor::new();
        self.state.begin_run();
        crate::debug_vm!(
            "Starting run: {} line(s), {} label(s)",
            program.len(),
            program.labels().len()
        );

        while self.state.is_running() {
            if let Err(err) = self.step(&program, &executor) {
                crate::debug_vm!("Run failed after {} step(s): {}", self.state.steps, err);
                self.state.status = RunStatus::Failed(err.clone());
                return Err(err);
            }
        }

        crate::debug_vm!("Halted after {} step(s)", self.state.steps);
        Ok(())
    }

    /// Fetch the line at the program counter and execute it
    fn step(&mut self, program: &Program<'_>, executor: &InstructionExecutor) -> RunResult {
        let line_no = self.state.ip + 1;
        let fail = |fault: VMFault| InterpretError::new(line_no, fault);

        let Some(line) = program.line(self.state.ip) else {
            return Err(fail(VMFault::NoMoreInstructions));
        };

        match line {
            Line::Blank | Line::Label(_) => {
                self.state.advance_ip();
                Ok(())
            }
            Line::Statement { mnemonic, args, .. } => {
                if let Some(limit) = self.step_limit {
                    if self.state.steps >= limit {
                        return Err(fail(VMFault::StepLimitExceeded(limit)));
                    }
                }
                let instr = Instruction::decode(mnemonic, args).map_err(fail)?;
                executor
                    .execute_instruction(&mut self.state, program.labels(), &instr)
                    .map_err(fail)?;
                self.state.steps += 1;
                Ok(())
            }
        }
    }
}

impl Default for Machine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vm::registers::Register;

    fn register(machine: &Machine, n: i64) -> u8 {
        machine
            .state()
            .get_register(Register::new(n).unwrap())
            .unwrap()
    }

    #[test]
    fn test_poke_peek_bounds() {
        let mut machine = Machine::new();
        machine.poke(999, 300).unwrap();
        assert_eq!(machine.peek(999), Ok(44));
        assert_eq!(machine.poke(1000, 1), Err(StateError::MemoryOutOfRange(1000)));
        assert_eq!(machine.peek(-1), Err(StateError::MemoryOutOfRange(-1)));
    }

    #[test]
    fn test_halt_sets_status() {
        let mut machine = Machine::new();
        machine.run("MOV R0, #7\nHALT").unwrap();
        assert_eq!(machine.status(), &RunStatus::Halted);
        assert_eq!(register(&machine, 0), 7);
        assert_eq!(machine.state().steps, 2);
    }

    #[test]
    fn test_failure_is_recorded_in_status() {
        let mut machine = Machine::new();
        let err = machine.run("MOV R0, #1").unwrap_err();
        assert_eq!(err, InterpretError::new(2, VMFault::NoMoreInstructions));
        assert_eq!(machine.status(), &RunStatus::Failed(err));
    }

    #[test]
    fn test_blank_and_label_lines_are_skipped() {
        let mut machine = Machine::new();
        machine.run("\n  \nhere:\n   MOV R1, #2  \n\nHALT\n").unwrap();
        assert_eq!(register(&machine, 1), 2);
        assert_eq!(machine.state().steps, 2);
    }

    #[test]
    fn test_step_limit_stops_infinite_loop() {
        let mut machine = Machine::new().with_step_limit(10);
        let err = machine.run("spin:\nB spin").unwrap_err();
        assert_eq!(err, InterpretError::new(2, VMFault::StepLimitExceeded(10)));
    }

    #[test]
    fn test_run_clears_registers_but_keeps_memory() {
        let mut machine = Machine::new();
        machine.poke(0, 5).unwrap();
        machine.run("MOV R3, #9\nHALT").unwrap();
        machine.run("LDR R0, 0\nHALT").unwrap();
        assert_eq!(register(&machine, 3), 0);
        assert_eq!(register(&machine, 0), 5);

        machine.reset();
        assert_eq!(machine.peek(0), Ok(0));
    }
}

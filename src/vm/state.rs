// VM State: registers, memory, comparison flags, program counter and run status

use std::cmp::Ordering;

use super::error::{InterpretError, StateError, VMFault};
use super::memory::{Address, Memory};
use super::registers::{Register, Registers};

/// The two values saved by the most recent `CMP`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ComparisonFlags {
    #[default]
    Unset,
    Set { left: i64, right: i64 },
}

impl ComparisonFlags {
    /// Orders left against right, failing if no comparison has run yet
    pub fn ordering(&self) -> Result<Ordering, VMFault> {
        match self {
            ComparisonFlags::Unset => Err(VMFault::ComparisonNotPerformed),
            ComparisonFlags::Set { left, right } => Ok(left.cmp(right)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunStatus {
    Running,
    Halted,
    Failed(InterpretError),
}

/// VM state for one program run
#[derive(Debug, Clone)]
pub struct VMState {
    pub registers: Registers,
    pub memory: Memory,
    pub flags: ComparisonFlags,
    pub ip: usize, // Index into the program's line sequence
    pub status: RunStatus,
    pub steps: u64, // Instructions executed this run
}

impl VMState {
    pub fn new() -> Self {
        VMState {
            registers: Registers::new(),
            memory: Memory::new(),
            flags: ComparisonFlags::Unset,
            ip: 0,
            status: RunStatus::Running,
            steps: 0,
        }
    }

    pub fn advance_ip(&mut self) {
        self.ip += 1;
    }

    pub fn jump(&mut self, target: usize) {
        self.ip = target;
    }

    pub fn halt(&mut self) {
        self.status = RunStatus::Halted;
    }

    pub fn is_running(&self) -> bool {
        self.status == RunStatus::Running
    }

    pub fn set_flags(&mut self, left: i64, right: i64) {
        self.flags = ComparisonFlags::Set { left, right };
    }

    pub fn get_register(&self, reg: Register) -> Result<u8, StateError> {
        self.registers.get(reg)
    }

    pub fn set_register(&mut self, reg: Register, value: i64) -> Result<(), StateError> {
        self.registers.set(reg, value)
    }

    pub fn get_memory(&self, addr: Address) -> Result<u8, StateError> {
        self.memory.get(addr)
    }

    pub fn set_memory(&mut self, addr: Address, value: i64) -> Result<(), StateError> {
        self.memory.set(addr, value)
    }

    /// Prepare for a fresh run. Memory is left alone so host-poked inputs survive.
    pub fn begin_run(&mut self) {
        self.registers.clear();
        self.flags = ComparisonFlags::Unset;
        self.ip = 0;
        self.status = RunStatus::Running;
        self.steps = 0;
    }

    /// Zero everything, memory included
    pub fn reset(&mut self) {
        self.begin_run();
        self.memory.clear();
    }
}

impl Default for VMState {
    fn default() -> Self {
        Self::new()
    }
}

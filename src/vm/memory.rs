// VM Memory: flat array of 8-bit cells addressed by plain decimal tokens

use std::fmt;
use std::str::FromStr;

use super::error::StateError;
use super::registers::wrap_word;
use crate::config::MEMORY_SIZE;

/// A validated memory cell index in 0..MEMORY_SIZE
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address(usize);

impl Address {
    pub fn new(index: i64) -> Result<Self, StateError> {
        usize::try_from(index)
            .ok()
            .filter(|&idx| idx < MEMORY_SIZE)
            .map(Address)
            .ok_or(StateError::MemoryOutOfRange(index))
    }

    pub fn index(self) -> usize {
        self.0
    }
}

impl FromStr for Address {
    type Err = StateError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let index = token
            .parse::<i64>()
            .map_err(|_| StateError::InvalidMemoryAddress(token.to_string()))?;
        Address::new(index)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone)]
pub struct Memory {
    cells: Vec<u8>,
}

impl Memory {
    pub fn new() -> Self {
        Memory {
            cells: vec![0; MEMORY_SIZE],
        }
    }

    pub fn get(&self, addr: Address) -> Result<u8, StateError> {
        self.cells
            .get(addr.index())
            .copied()
            .ok_or(StateError::MemoryOutOfRange(addr.index() as i64))
    }

    /// Store a value, wrapping it into 0..=255
    pub fn set(&mut self, addr: Address, value: i64) -> Result<(), StateError> {
        match self.cells.get_mut(addr.index()) {
            Some(cell) => {
                *cell = wrap_word(value);
                Ok(())
            }
            None => Err(StateError::MemoryOutOfRange(addr.index() as i64)),
        }
    }

    pub fn clear(&mut self) {
        self.cells.iter_mut().for_each(|cell| *cell = 0);
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_memory_round_trip_random() {
        let mut rng = rand::thread_rng();
        let mut mem = Memory::new();
        for _ in 0..2000 {
            let addr = Address::new(rng.gen_range(0..MEMORY_SIZE as i64)).unwrap();
            let value: u8 = rng.r#gen();
            mem.set(addr, value as i64).unwrap();
            assert_eq!(mem.get(addr).unwrap(), value);
        }
    }

    #[test]
    fn test_memory_bounds() {
        let mut mem = Memory::new();
        let last = Address::new(999).unwrap();
        mem.set(last, 7).unwrap();
        assert_eq!(mem.get(last).unwrap(), 7);
        assert_eq!(Address::new(1000), Err(StateError::MemoryOutOfRange(1000)));
        assert_eq!(
            "1000".parse::<Address>(),
            Err(StateError::MemoryOutOfRange(1000))
        );
        assert_eq!(
            "ten".parse::<Address>(),
            Err(StateError::InvalidMemoryAddress("ten".to_string()))
        );
    }

    #[test]
    fn test_memory_write_wraps_and_clears() {
        let mut mem = Memory::new();
        let addr = Address::new(12).unwrap();
        mem.set(addr, 513).unwrap();
        assert_eq!(mem.get(addr).unwrap(), 1);
        mem.clear();
        assert_eq!(mem.get(addr).unwrap(), 0);
        assert_eq!(mem.len(), MEMORY_SIZE);
    }
}

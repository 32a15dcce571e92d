//! Flat byte-addressable memory.
//!
//! A single, unbanked image backs both instruction fetch and data access —
//! there is one memory port, shared and contended for exactly as described
//! by the pipeline's memory-port-busy wire. Reads and writes decompose into
//! individual bytes assembled little-endian, mirroring the reference
//! implementation's `Memory::read`/`Memory::write`.

use crate::common::addr::Address;
use crate::common::error::SimError;

/// The simulator's memory image.
///
/// Holds the loaded program plus whatever extra space was configured for
/// the stack and heap, and the entry PC / stack pointer the loader derived
/// from the ELF image.
#[derive(Clone, Debug)]
pub struct Memory {
    data: Vec<u8>,
    start_pc: Address,
    stack_pointer: u32,
}

impl Memory {
    /// Builds a memory image from loaded bytes and the loader-derived entry
    /// point and stack pointer.
    ///
    /// The image is used exactly as supplied — no fallback is applied if
    /// `start_pc` or `stack_pointer` look implausible; that is the loader's
    /// responsibility, not the memory's.
    pub fn new(data: Vec<u8>, start_pc: Address, stack_pointer: u32) -> Self {
        Self {
            data,
            start_pc,
            stack_pointer,
        }
    }

    /// Returns the total size of the memory image in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns whether the memory image is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the program's entry point, as derived by the loader.
    pub fn get_start_pc(&self) -> Address {
        self.start_pc
    }

    /// Returns the initial stack pointer, as derived by the loader.
    pub fn get_stack_pointer(&self) -> u32 {
        self.stack_pointer
    }

    /// Reads `num_bytes` (1-4) starting at `addr`, little-endian, zero
    /// extended into a `u32`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::MemoryOutOfRange`] if any byte of the access
    /// falls outside the image.
    pub fn read(&self, addr: Address, num_bytes: u32) -> Result<u32, SimError> {
        self.bounds_check(addr, num_bytes)?;
        let start = addr.val() as usize;
        let mut value: u32 = 0;
        for i in 0..num_bytes as usize {
            value |= u32::from(self.data[start + i]) << (8 * i);
        }
        Ok(value)
    }

    /// Writes the low `num_bytes` (1-4) of `value` to `addr`, little-endian.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::MemoryOutOfRange`] if any byte of the access
    /// falls outside the image.
    pub fn write(&mut self, addr: Address, value: u32, num_bytes: u32) -> Result<(), SimError> {
        self.bounds_check(addr, num_bytes)?;
        let start = addr.val() as usize;
        for i in 0..num_bytes as usize {
            self.data[start + i] = ((value >> (8 * i)) & 0xFF) as u8;
        }
        Ok(())
    }

    fn bounds_check(&self, addr: Address, num_bytes: u32) -> Result<(), SimError> {
        let start = addr.val() as usize;
        let end = start.checked_add(num_bytes as usize);
        match end {
            Some(end) if end <= self.data.len() => Ok(()),
            _ => Err(SimError::MemoryOutOfRange {
                addr,
                size: num_bytes,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mem() -> Memory {
        Memory::new(vec![0u8; 64], Address::new(0), 0x40)
    }

    #[test]
    fn write_then_read_round_trips_little_endian() {
        let mut m = mem();
        m.write(Address::new(0), 0x1122_3344, 4).unwrap();
        assert_eq!(m.read(Address::new(0), 4).unwrap(), 0x1122_3344);
        assert_eq!(m.read(Address::new(0), 1).unwrap(), 0x44);
        assert_eq!(m.read(Address::new(1), 1).unwrap(), 0x33);
    }

    #[test]
    fn out_of_range_access_is_fatal() {
        let m = mem();
        let err = m.read(Address::new(62), 4).unwrap_err();
        assert!(matches!(err, SimError::MemoryOutOfRange { .. }));
    }

    #[test]
    fn exact_tail_access_succeeds() {
        let m = mem();
        assert!(m.read(Address::new(60), 4).is_ok());
    }
}

use crate::emulator::error::Error;
use crate::emulator::memory::PROGRAM_START;

pub const NUM_REGISTERS: usize = 16;
pub const STACK_SIZE: usize = 16;
/// VF doubles as the carry, borrow, shift-out and collision flag.
pub const FLAG: usize = 0xF;

/// The CPU state: general registers, index, program counter,
/// call stack and the two timers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registers {
    pub v: [u8; NUM_REGISTERS],
    pub i: u16,
    pub program_counter: u16,
    pub delay_timer: u8,
    pub sound_timer: u8,
    stack: [u16; STACK_SIZE],
    stack_pointer: usize,
}

impl Registers {
    pub fn new() -> Registers {
        Registers {
            v: [0; NUM_REGISTERS],
            i: 0,
            program_counter: PROGRAM_START,
            delay_timer: 0,
            sound_timer: 0,
            stack: [0; STACK_SIZE],
            stack_pointer: 0,
        }
    }

    /// The number of return addresses on the stack.
    pub fn stack_pointer(&self) -> usize {
        self.stack_pointer
    }

    /// The live part of the call stack, oldest first.
    pub fn stack(&self) -> &[u16] {
        &self.stack[..self.stack_pointer]
    }

    pub fn push(&mut self, address: u16) -> Result<(), Error> {
        if self.stack_pointer == STACK_SIZE {
            return Err(Error::StackOverflow);
        }
        self.stack[self.stack_pointer] = address;
        self.stack_pointer += 1;
        Ok(())
    }

    pub fn pop(&mut self) -> Result<u16, Error> {
        if self.stack_pointer == 0 {
            return Err(Error::StackUnderflow);
        }
        self.stack_pointer -= 1;
        Ok(self.stack[self.stack_pointer])
    }

    /// Count both timers down by one, stopping at zero.
    pub fn tick_timers(&mut self) {
        self.delay_timer = self.delay_timer.saturating_sub(1);
        self.sound_timer = self.sound_timer.saturating_sub(1);
    }
}

impl Default for Registers {
    fn default() -> Self {
        Self::new()
    }
}

//! The CHIP-8 interpreter as described at https://en.wikipedia.org/wiki/CHIP-8#Virtual_machine_description.

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

use crate::emulator::error::Error;
use crate::emulator::framebuffer::Framebuffer;
use crate::emulator::instruction::*;
use crate::emulator::keypad::{Keypad, NUM_KEYS};
use crate::emulator::memory::{Memory, FONT_GLYPH_SIZE, FONT_START, MEM_SIZE, PROGRAM_START};
use crate::emulator::opcode::Opcode;
use crate::emulator::quirks::Quirks;
use crate::emulator::registers::{Registers, FLAG};

/// Each opcode is two bytes
const OPCODE_SIZE: u16 = 2;

/// How an executed instruction moves the program counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ProgramCounter {
    /// Continue with the following instruction.
    Next,
    /// Skip the following instruction.
    Skip,
    /// Continue at an absolute address.
    Jump(u16),
    /// Execute the same instruction again on the next cycle.
    Stay,
}

impl ProgramCounter {
    fn skip_if(condition: bool) -> ProgramCounter {
        if condition {
            ProgramCounter::Skip
        } else {
            ProgramCounter::Next
        }
    }
}

/// A complete CHIP-8 machine.
///
/// All state is owned by the instance, including the random generator used
/// by `CXNN`, so separate instances never influence each other.
///
/// The call stack policy is fixed:
/// - a call with a full stack reports [`Error::StackOverflow`] and leaves the
///   program counter on the call, so it is reported again on every cycle;
/// - a return with an empty stack reports [`Error::StackUnderflow`] and
///   restarts the program at `0x200`.
pub struct Emulator<R: RngCore = StdRng> {
    memory: Memory,
    registers: Registers,
    framebuffer: Framebuffer,
    keypad: Keypad,
    quirks: Quirks,
    rng: R,
}

impl Emulator<StdRng> {
    /// Create a new emulator with a random generator seeded from the clock.
    pub fn new() -> Emulator<StdRng> {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_nanos() as u64)
            .unwrap_or_default();
        Emulator::with_seed(seed)
    }

    /// Create a new emulator whose random numbers are reproducible.
    pub fn with_seed(seed: u64) -> Emulator<StdRng> {
        Emulator::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for Emulator<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RngCore> Emulator<R> {

    /// Create a new emulator drawing random numbers from `rng`.
    pub fn with_rng(rng: R) -> Emulator<R> {
        Emulator {
            memory: Memory::new(),
            registers: Registers::new(),
            framebuffer: Framebuffer::new(),
            keypad: Keypad::new(),
            quirks: Quirks::default(),
            rng,
        }
    }

    pub fn with_quirks(mut self, quirks: Quirks) -> Emulator<R> {
        self.quirks = quirks;
        self
    }

    /// Copy a program into memory at 0x200.
    pub fn load(&mut self, program: &[u8]) -> Result<(), Error> {
        self.memory.load(program)?;
        log::debug!("Loaded {} bytes at {:#06X}", program.len(), PROGRAM_START);
        Ok(())
    }

    /// Read a program file and copy it into memory at 0x200.
    pub fn load_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), Error> {
        let program = std::fs::read(path)?;
        self.load(&program)
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn registers(&self) -> &Registers {
        &self.registers
    }

    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    pub fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    pub fn keypad_mut(&mut self) -> &mut Keypad {
        &mut self.keypad
    }

    pub fn set_key(&mut self, key: u8, pressed: bool) {
        self.keypad.set(key, pressed);
    }

    pub fn set_keys(&mut self, keys: &[bool; NUM_KEYS]) {
        self.keypad.set_all(keys);
    }

    pub fn quirks(&self) -> Quirks {
        self.quirks
    }

    pub fn program_counter(&self) -> u16 {
        self.registers.program_counter
    }

    pub fn delay_timer(&self) -> u8 {
        self.registers.delay_timer
    }

    pub fn sound_timer(&self) -> u8 {
        self.registers.sound_timer
    }

    /// Whether a tone should currently be playing.
    pub fn is_beeping(&self) -> bool {
        self.registers.sound_timer > 0
    }

    /// Count the delay and sound timers down once.
    /// Meant to be called at 60 Hz, independently of `cycle`.
    pub fn tick_timers(&mut self) {
        self.registers.tick_timers();
    }

    /// Fetch, decode and execute a single instruction.
    ///
    /// Unknown opcodes are skipped. On error nothing is changed, except
    /// for a return with an empty stack, which restarts the program.
    pub fn cycle(&mut self) -> Result<(), Error> {
        let opcode = self.fetch()?;
        match Instruction::decode(opcode) {
            Some(instruction) => {
                log::trace!("{:#06X}: {} {:?}", self.registers.program_counter, opcode, instruction);
                self.execute_single(instruction)
            }
            None => {
                log::trace!("{:#06X}: unknown opcode {}, skipping", self.registers.program_counter, opcode);
                self.advance(ProgramCounter::Next);
                Ok(())
            }
        }
    }

    /// Execute a single instruction as if it was fetched at the program counter.
    /// Operands out of range are masked the way decoding would have.
    pub fn execute_single(&mut self, instruction: Instruction) -> Result<(), Error> {
        let step = self.execute(instruction.masked())?;
        self.advance(step);
        Ok(())
    }

    /// Execute instructions in order, stopping at the first error.
    pub fn execute_many(&mut self, instructions: &[Instruction]) -> Result<(), Error> {
        instructions
            .iter()
            .try_for_each(|instruction| self.execute_single(*instruction))
    }

    fn fetch(&self) -> Result<Opcode, Error> {
        let pc = self.registers.program_counter as usize;
        if pc >= MEM_SIZE - 1 {
            return Err(Error::OutOfBounds { address: pc });
        }
        let left = self.memory.read(pc)?;
        let right = self.memory.read(pc + 1)?;
        Ok(Opcode::from_bytes(left, right))
    }

    fn advance(&mut self, step: ProgramCounter) {
        let pc = &mut self.registers.program_counter;
        match step {
            ProgramCounter::Next => *pc += OPCODE_SIZE,
            ProgramCounter::Skip => *pc += 2 * OPCODE_SIZE,
            ProgramCounter::Jump(address) => *pc = address,
            ProgramCounter::Stay => {}
        }
    }

    fn execute(&mut self, instruction: Instruction) -> Result<ProgramCounter, Error> {
        let v = &mut self.registers.v;

        let step = match instruction {

            // Clear the screen
            Instruction::ClearScreen => {
                self.framebuffer.clear();
                ProgramCounter::Next
            }

            // Return to the previous call site via the stack.
            Instruction::Return => match self.registers.pop() {
                Ok(address) => ProgramCounter::Jump(address),
                Err(err) => {
                    log::warn!(
                        "Return with an empty stack at {:#06X}, restarting at {:#06X}",
                        self.registers.program_counter,
                        PROGRAM_START
                    );
                    self.registers.program_counter = PROGRAM_START;
                    return Err(err);
                }
            },

            Instruction::Goto(Addr(addr)) => ProgramCounter::Jump(addr),

            // Store the return address on the stack, then jump to the subroutine
            Instruction::Call(Addr(addr)) => {
                let return_address = self.registers.program_counter + OPCODE_SIZE;
                if let Err(err) = self.registers.push(return_address) {
                    log::error!(
                        "Call to {:#06X} at {:#06X} with a full stack",
                        addr,
                        self.registers.program_counter
                    );
                    return Err(err);
                }
                ProgramCounter::Jump(addr)
            }

            Instruction::IfRegEqConst(Reg(x), Const(n)) => {
                ProgramCounter::skip_if(v[x as usize] == n)
            }

            Instruction::IfRegNeqConst(Reg(x), Const(n)) => {
                ProgramCounter::skip_if(v[x as usize] != n)
            }

            Instruction::IfRegEqReg(Reg(x), Reg(y)) => {
                ProgramCounter::skip_if(v[x as usize] == v[y as usize])
            }

            Instruction::IfRegNeqReg(Reg(x), Reg(y)) => {
                ProgramCounter::skip_if(v[x as usize] != v[y as usize])
            }

            Instruction::SetRegToConst(Reg(x), Const(n)) => {
                v[x as usize] = n;
                ProgramCounter::Next
            }

            // Wraps around, VF is left alone
            Instruction::IncRegByConst(Reg(x), Const(n)) => {
                v[x as usize] = v[x as usize].wrapping_add(n);
                ProgramCounter::Next
            }

            Instruction::SetRegToReg(Reg(x), Reg(y)) => {
                v[x as usize] = v[y as usize];
                ProgramCounter::Next
            }

            Instruction::BitwiseOr(Reg(x), Reg(y)) => {
                v[x as usize] |= v[y as usize];
                ProgramCounter::Next
            }

            Instruction::BitwiseAnd(Reg(x), Reg(y)) => {
                v[x as usize] &= v[y as usize];
                ProgramCounter::Next
            }

            Instruction::BitwiseXor(Reg(x), Reg(y)) => {
                v[x as usize] ^= v[y as usize];
                ProgramCounter::Next
            }

            // The flag is written first, so the result wins when X is F.
            Instruction::IncRegByReg(Reg(x), Reg(y)) => {
                let (sum, carry) = v[x as usize].overflowing_add(v[y as usize]);
                v[FLAG] = carry as u8;
                v[x as usize] = sum;
                ProgramCounter::Next
            }

            // VF is 1 when no borrow occurs, strictly `VX > VY`.
            Instruction::DecRegByReg(Reg(x), Reg(y)) => {
                let (minuend, subtrahend) = (v[x as usize], v[y as usize]);
                v[FLAG] = (minuend > subtrahend) as u8;
                v[x as usize] = minuend.wrapping_sub(subtrahend);
                ProgramCounter::Next
            }

            Instruction::SetVxVyMinusVx(Reg(x), Reg(y)) => {
                let (minuend, subtrahend) = (v[y as usize], v[x as usize]);
                v[FLAG] = (minuend > subtrahend) as u8;
                v[x as usize] = minuend.wrapping_sub(subtrahend);
                ProgramCounter::Next
            }

            Instruction::BitshiftRight(Reg(x), Reg(y)) => {
                let source = if self.quirks.shift_uses_vy { v[y as usize] } else { v[x as usize] };
                v[FLAG] = source & 0x1;
                v[x as usize] = source >> 1;
                ProgramCounter::Next
            }

            Instruction::BitshiftLeft(Reg(x), Reg(y)) => {
                let source = if self.quirks.shift_uses_vy { v[y as usize] } else { v[x as usize] };
                v[FLAG] = source >> 7;
                v[x as usize] = source << 1;
                ProgramCounter::Next
            }

            Instruction::SetI(Addr(addr)) => {
                self.registers.i = addr;
                ProgramCounter::Next
            }

            Instruction::SetPcToV0PlusAddr(Addr(addr)) => {
                let base = if self.quirks.jump_with_vx {
                    v[(addr >> 8) as usize]
                } else {
                    v[0]
                };
                let target = base as u16 + addr;
                let in_program = (PROGRAM_START as usize..MEM_SIZE).contains(&(target as usize));
                if self.quirks.validate_jump_with_offset && !in_program {
                    return Err(Error::OutOfBounds { address: target as usize });
                }
                ProgramCounter::Jump(target)
            }

            Instruction::SetVxRand(Reg(x), Const(n)) => {
                v[x as usize] = self.rng.gen::<u8>() & n;
                ProgramCounter::Next
            }

            Instruction::Draw(Reg(x), Reg(y), Const(sprite_height)) => {
                let x_coord = v[x as usize] as usize;
                let y_coord = v[y as usize] as usize;

                // Each sprite row is one byte
                let sprite = self.memory.slice(self.registers.i as usize, sprite_height as usize)?;
                let collision = self.framebuffer.draw_sprite(x_coord, y_coord, sprite);

                // Set VF collision flag
                v[FLAG] = collision as u8;
                ProgramCounter::Next
            }

            // Skip if the key in Vx is pressed
            Instruction::IfKeyEqVx(Reg(x)) => {
                ProgramCounter::skip_if(self.keypad.is_pressed(v[x as usize]))
            }

            // Skip if the key in Vx isn't pressed
            Instruction::IfKeyNeqVx(Reg(x)) => {
                ProgramCounter::skip_if(!self.keypad.is_pressed(v[x as usize]))
            }

            Instruction::SetRegToDelayTimer(Reg(x)) => {
                v[x as usize] = self.registers.delay_timer;
                ProgramCounter::Next
            }

            // Wait for a key press by executing this instruction again until one arrives.
            Instruction::SetRegToGetKey(Reg(x)) => match self.keypad.first_pressed() {
                Some(key) => {
                    v[x as usize] = key;
                    ProgramCounter::Next
                }
                None => ProgramCounter::Stay,
            },

            Instruction::SetDelayTimerToReg(Reg(x)) => {
                self.registers.delay_timer = v[x as usize];
                ProgramCounter::Next
            }

            Instruction::SetSoundTimerToReg(Reg(x)) => {
                self.registers.sound_timer = v[x as usize];
                ProgramCounter::Next
            }

            // Stays within the 12-bit address space
            Instruction::AddRegToI(Reg(x)) => {
                let i = self.registers.i as usize + v[x as usize] as usize;
                self.registers.i = (i % MEM_SIZE) as u16;
                ProgramCounter::Next
            }

            // Set i to character address. Each font element is 5 bytes tall.
            Instruction::SetIToSpriteAddrVx(Reg(x)) => {
                let digit = (v[x as usize] & 0xF) as u16;
                self.registers.i = FONT_START + FONT_GLYPH_SIZE * digit;
                ProgramCounter::Next
            }

            Instruction::SetIToBcdOfReg(Reg(x)) => {
                let value = v[x as usize];
                let digits = self.memory.slice_mut(self.registers.i as usize, 3)?;
                digits[0] = value / 100;
                digits[1] = value / 10 % 10;
                digits[2] = value % 10;
                ProgramCounter::Next
            }

            // Dump register values up to Vx
            Instruction::RegDump(Reg(x)) => {
                let count = x as usize + 1;
                self.memory
                    .slice_mut(self.registers.i as usize, count)?
                    .copy_from_slice(&v[..count]);
                ProgramCounter::Next
            }

            // Load register values up to Vx
            Instruction::RegLoad(Reg(x)) => {
                let count = x as usize + 1;
                let values = self.memory.slice(self.registers.i as usize, count)?;
                v[..count].copy_from_slice(values);
                ProgramCounter::Next
            }
        };

        Ok(step)
    }
}

//! The CHIP-8 virtual machine and the seams used to drive it.

pub mod driver;
pub mod emulator;
pub mod error;
pub mod framebuffer;
pub mod input;
pub mod instruction;
pub mod keypad;
pub mod memory;
pub mod opcode;
pub mod output;
pub mod quirks;
pub mod registers;

pub use self::driver::Driver;
pub use self::emulator::Emulator;
pub use self::error::Error;
pub use self::framebuffer::Framebuffer;
pub use self::keypad::Keypad;
pub use self::quirks::Quirks;

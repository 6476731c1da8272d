//! Command line options shared by the binaries.

use std::path::PathBuf;

use structopt::StructOpt;

use crate::emulator::driver::DEFAULT_CYCLES_PER_FRAME;
use crate::emulator::{Driver, Emulator, Error, Quirks};

/// Options for loading and running a program.
#[derive(StructOpt, Debug)]
pub struct RunOpt {
    /// The program to execute
    #[structopt(parse(from_os_str))]
    pub program: PathBuf,

    /// Instructions executed per frame, frames run at 60 Hz
    #[structopt(short, long, default_value = "10")]
    pub cycles_per_frame: usize,

    /// Seed for the random number instruction, taken from the clock if absent
    #[structopt(long)]
    pub seed: Option<u64>,

    /// Shift VY into VX instead of shifting VX in place
    #[structopt(long)]
    pub shift_uses_vy: bool,

    /// Jump with offset adds VX instead of V0
    #[structopt(long)]
    pub jump_with_vx: bool,

    /// Report jumps with offset that leave the program area
    #[structopt(long)]
    pub validate_jump: bool,
}

impl RunOpt {
    pub fn quirks(&self) -> Quirks {
        Quirks {
            shift_uses_vy: self.shift_uses_vy,
            jump_with_vx: self.jump_with_vx,
            validate_jump_with_offset: self.validate_jump,
        }
    }

    /// An emulator with the program loaded and the quirks applied.
    pub fn emulator(&self) -> Result<Emulator, Error> {
        let emulator = match self.seed {
            Some(seed) => Emulator::with_seed(seed),
            None => Emulator::new(),
        };
        let mut emulator = emulator.with_quirks(self.quirks());
        log::info!("Loading {:?}", &self.program);
        emulator.load_file(&self.program)?;
        Ok(emulator)
    }

    pub fn driver(&self) -> Driver {
        if self.cycles_per_frame == 0 {
            log::warn!("Zero cycles per frame, using {}", DEFAULT_CYCLES_PER_FRAME);
            return Driver::default();
        }
        Driver::new(self.cycles_per_frame)
    }
}

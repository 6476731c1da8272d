//! Paces an emulator in frames: input, a batch of cycles, one timer tick, output.

use std::thread;
use std::time::{Duration, Instant};

use rand::RngCore;

use crate::emulator::emulator::Emulator;
use crate::emulator::error::Error;
use crate::emulator::input::EmulatorInput;
use crate::emulator::output::EmulatorOutput;

pub const DEFAULT_CYCLES_PER_FRAME: usize = 10;
/// Timers count down at 60 Hz, so that is one frame per tick.
pub const DEFAULT_FRAME_RATE: u32 = 60;

pub struct Driver {
    cycles_per_frame: usize,
    frame_duration: Duration,
}

impl Driver {
    pub fn new(cycles_per_frame: usize) -> Driver {
        Driver {
            cycles_per_frame,
            frame_duration: Duration::from_secs(1) / DEFAULT_FRAME_RATE,
        }
    }

    pub fn with_frame_rate(mut self, frames_per_second: u32) -> Driver {
        self.frame_duration = Duration::from_secs(1) / frames_per_second.max(1);
        self
    }

    pub fn cycles_per_frame(&self) -> usize {
        self.cycles_per_frame
    }

    /// Run one frame.
    ///
    /// Stack faults are logged and execution continues, any other error
    /// ends the frame early and is returned.
    pub fn frame<R, I, O>(&self, emulator: &mut Emulator<R>, input: &mut I, output: &mut O) -> Result<(), Error>
    where
        R: RngCore,
        I: EmulatorInput,
        O: EmulatorOutput,
    {
        input.update(emulator.keypad_mut());

        for _ in 0..self.cycles_per_frame {
            match emulator.cycle() {
                Ok(()) => {}
                Err(err) if err.is_recoverable() => log::warn!("{}", err),
                Err(err) => return Err(err),
            }
        }

        emulator.tick_timers();
        output.draw(emulator.framebuffer());
        output.beep(emulator.is_beeping());
        Ok(())
    }

    /// Run `frames` frames back to back, without pacing.
    pub fn run_frames<R, I, O>(&self, emulator: &mut Emulator<R>, input: &mut I, output: &mut O, frames: usize) -> Result<(), Error>
    where
        R: RngCore,
        I: EmulatorInput,
        O: EmulatorOutput,
    {
        for _ in 0..frames {
            if input.quit_requested() {
                break;
            }
            self.frame(emulator, input, output)?;
        }
        Ok(())
    }

    /// Run frames at the configured frame rate until the input asks to quit.
    pub fn run<R, I, O>(&self, emulator: &mut Emulator<R>, input: &mut I, output: &mut O) -> Result<(), Error>
    where
        R: RngCore,
        I: EmulatorInput,
        O: EmulatorOutput,
    {
        while !input.quit_requested() {
            let started = Instant::now();
            self.frame(emulator, input, output)?;
            if let Some(remaining) = self.frame_duration.checked_sub(started.elapsed()) {
                thread::sleep(remaining);
            }
        }
        log::info!("Quit requested, stopping");
        Ok(())
    }
}

impl Default for Driver {
    fn default() -> Self {
        Driver::new(DEFAULT_CYCLES_PER_FRAME)
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::emulator::input::DummyInput;
    use crate::emulator::keypad::Keypad;
    use crate::emulator::output::DummyOutput;
    use pretty_assertions::assert_eq;

    /// Holds one key and asks to quit after a number of updates.
    struct ScriptedInput {
        key: Option<u8>,
        updates: usize,
        quit_after: usize,
    }

    impl EmulatorInput for ScriptedInput {
        fn update(&mut self, keypad: &mut Keypad) {
            keypad.release_all();
            if let Some(key) = self.key {
                keypad.set(key, true);
            }
            self.updates += 1;
        }

        fn quit_requested(&self) -> bool {
            self.updates >= self.quit_after
        }
    }

    fn emulator_with(program: &[u8]) -> Emulator {
        let mut emulator = Emulator::with_seed(0);
        emulator.load(program).unwrap();
        emulator
    }

    #[test]
    fn frame_runs_cycles_then_ticks_and_presents() {
        // V0 = 5, sound = V0, then an endless jump to itself
        let mut emulator = emulator_with(&[0x60, 0x05, 0xF0, 0x18, 0x12, 0x04]);
        let mut output = DummyOutput::new();
        Driver::new(3).frame(&mut emulator, &mut DummyInput, &mut output).unwrap();

        assert_eq!(0x204, emulator.program_counter());
        assert_eq!(4, emulator.sound_timer());
        assert_eq!(1, output.draws());
        assert!(output.is_beeping());
    }

    #[test]
    fn frame_presents_the_framebuffer() {
        // I = glyph of 0, draw it at (0, 0), loop
        let mut emulator = emulator_with(&[0xF0, 0x29, 0xD0, 0x05, 0x12, 0x04]);
        let mut output = DummyOutput::new();
        Driver::new(3).frame(&mut emulator, &mut DummyInput, &mut output).unwrap();
        assert_eq!(emulator.framebuffer(), output.frame());
        assert!(!output.frame().is_blank());
    }

    #[test]
    fn frame_refreshes_keypad_before_cycles() {
        let mut emulator = emulator_with(&[0xF4, 0x0A]);
        let mut input = ScriptedInput { key: Some(0xE), updates: 0, quit_after: usize::MAX };
        Driver::new(1).frame(&mut emulator, &mut input, &mut DummyOutput::new()).unwrap();
        assert_eq!(0xE, emulator.registers().v[4]);
        assert_eq!(0x202, emulator.program_counter());
    }

    #[test]
    fn stack_faults_do_not_stop_the_frame() {
        // Return with an empty stack, restarting the program every cycle
        let mut emulator = emulator_with(&[0x00, 0xEE]);
        let mut output = DummyOutput::new();
        Driver::new(4).frame(&mut emulator, &mut DummyInput, &mut output).unwrap();
        assert_eq!(0x200, emulator.program_counter());
        assert_eq!(1, output.draws());
    }

    #[test]
    fn out_of_bounds_stops_the_frame() {
        // Jump to the last byte of memory
        let mut emulator = emulator_with(&[0x1F, 0xFF]);
        let mut output = DummyOutput::new();
        let result = Driver::new(4).frame(&mut emulator, &mut DummyInput, &mut output);
        assert!(matches!(result, Err(Error::OutOfBounds { address: 0xFFF })));
        assert_eq!(0, output.draws());
    }

    #[test]
    fn run_frames_stops_when_quit_is_requested() {
        let mut emulator = emulator_with(&[0x12, 0x00]);
        let mut input = ScriptedInput { key: None, updates: 0, quit_after: 3 };
        let mut output = DummyOutput::new();
        Driver::new(2).run_frames(&mut emulator, &mut input, &mut output, 10).unwrap();
        assert_eq!(3, output.draws());
    }

    #[test]
    fn run_paces_until_quit() {
        let mut emulator = emulator_with(&[0x12, 0x00]);
        let mut input = ScriptedInput { key: None, updates: 0, quit_after: 2 };
        let mut output = DummyOutput::new();
        Driver::new(2)
            .with_frame_rate(1000)
            .run(&mut emulator, &mut input, &mut output)
            .unwrap();
        assert_eq!(2, output.draws());
    }
}

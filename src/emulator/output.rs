use crate::emulator::framebuffer::Framebuffer;

/// Represents an output device that can present the screen and play a tone.
pub trait EmulatorOutput {
    fn draw(&mut self, frame: &Framebuffer);
    fn beep(&mut self, on: bool);
}

/// A simple output device that keeps the last presented frame.
pub struct DummyOutput {
    frame: Framebuffer,
    draws: usize,
    beeping: bool,
}

impl DummyOutput {
    pub fn new() -> DummyOutput {
        DummyOutput {
            frame: Framebuffer::new(),
            draws: 0,
            beeping: false,
        }
    }

    pub fn frame(&self) -> &Framebuffer {
        &self.frame
    }

    /// How many frames were presented.
    pub fn draws(&self) -> usize {
        self.draws
    }

    pub fn is_beeping(&self) -> bool {
        self.beeping
    }
}

impl Default for DummyOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl EmulatorOutput for DummyOutput {
    fn draw(&mut self, frame: &Framebuffer) {
        self.frame = frame.clone();
        self.draws += 1;
    }

    fn beep(&mut self, on: bool) {
        self.beeping = on;
    }
}

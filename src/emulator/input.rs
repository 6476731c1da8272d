use crate::emulator::keypad::Keypad;

/// Represents an input device that is capable of providing keys in the range 0..0xF.
pub trait EmulatorInput {
    /// Write the currently held keys into `keypad`.
    fn update(&mut self, keypad: &mut Keypad);

    /// Whether the user asked to stop the emulator.
    fn quit_requested(&self) -> bool {
        false
    }
}

/// An input device that never provides any input
pub struct DummyInput;

impl EmulatorInput for DummyInput {
    fn update(&mut self, keypad: &mut Keypad) {
        keypad.release_all();
    }
}

pub const NUM_KEYS: usize = 16;

/// The state of the 16-key hexadecimal keypad.
///
/// Written by an input device before cycles run, read by the interpreter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Keypad {
    keys: [bool; NUM_KEYS],
}

impl Keypad {
    pub fn new() -> Keypad {
        Keypad::default()
    }

    /// Whether `key` is held. Only the low nibble of `key` is used.
    pub fn is_pressed(&self, key: u8) -> bool {
        self.keys[(key & 0xF) as usize]
    }

    /// Press or release `key`. Only the low nibble of `key` is used.
    pub fn set(&mut self, key: u8, pressed: bool) {
        self.keys[(key & 0xF) as usize] = pressed;
    }

    pub fn set_all(&mut self, keys: &[bool; NUM_KEYS]) {
        self.keys = *keys;
    }

    pub fn release_all(&mut self) {
        self.keys = [false; NUM_KEYS];
    }

    /// The lowest-numbered key that is held, if any.
    pub fn first_pressed(&self) -> Option<u8> {
        self.keys.iter().position(|pressed| *pressed).map(|key| key as u8)
    }
}

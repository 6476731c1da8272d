use chip8_vm::emulator::keypad::{Keypad, NUM_KEYS};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::{Duration, Instant};

/// Terminals report key presses, and repeats while a key is held, but never releases.
/// A key therefore counts as held for `timeout` after its last press.
pub struct KeyManager {
    timeout: Duration,
    pressed_at: [Option<Instant>; NUM_KEYS],
    quit: bool,
}

impl KeyManager {
    pub fn new(timeout: Duration) -> KeyManager {
        KeyManager {
            timeout,
            pressed_at: [None; NUM_KEYS],
            quit: false,
        }
    }

    /// Record a terminal key event that happened at `at`.
    pub fn handle(&mut self, event: KeyEvent, at: Instant) {
        let ctrl_c = event.code == KeyCode::Char('c') && event.modifiers.contains(KeyModifiers::CONTROL);
        if event.code == KeyCode::Esc || ctrl_c {
            self.quit = true;
            return;
        }

        match key_to_u8(event.code) {
            Some(key) => self.pressed_at[key as usize] = Some(at),
            None => log::debug!("Ignoring key {:?}", event.code),
        }
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    /// Write the keys held at `now` into the keypad.
    pub fn apply(&self, keypad: &mut Keypad, now: Instant) {
        for (key, pressed_at) in self.pressed_at.iter().enumerate() {
            let held = pressed_at
                .map(|at| now.saturating_duration_since(at) < self.timeout)
                .unwrap_or(false);
            keypad.set(key as u8, held);
        }
    }
}

/// The left side of a QWERTY keyboard, laid out like the hex keypad:
///
/// ```text
/// 1 2 3 4      1 2 3 C
/// q w e r      4 5 6 D
/// a s d f  ->  7 8 9 E
/// z x c v      A 0 B F
/// ```
fn key_to_u8(key: KeyCode) -> Option<u8> {
    let c = match key {
        KeyCode::Char(c) => c.to_ascii_lowercase(),
        _ => return None,
    };
    let key = match c {
        'x' => 0x0,
        '1' => 0x1,
        '2' => 0x2,
        '3' => 0x3,
        'q' => 0x4,
        'w' => 0x5,
        'e' => 0x6,
        'a' => 0x7,
        's' => 0x8,
        'd' => 0x9,
        'z' => 0xA,
        'c' => 0xB,
        '4' => 0xC,
        'r' => 0xD,
        'f' => 0xE,
        'v' => 0xF,
        _ => return None,
    };
    Some(key)
}

#[cfg(test)]
mod tests {

    use super::*;
    use pretty_assertions::assert_eq;

    fn press(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
    }

    #[test]
    fn maps_qwerty_onto_hex_keypad() {
        assert_eq!(Some(0x0), key_to_u8(KeyCode::Char('x')));
        assert_eq!(Some(0xC), key_to_u8(KeyCode::Char('4')));
        assert_eq!(Some(0xF), key_to_u8(KeyCode::Char('V')));
        assert_eq!(None, key_to_u8(KeyCode::Char('p')));
        assert_eq!(None, key_to_u8(KeyCode::Enter));
    }

    #[test]
    fn keys_are_held_until_timeout() {
        let mut km = KeyManager::new(Duration::from_millis(100));
        let start = Instant::now();
        km.handle(press('w'), start);

        let mut keypad = Keypad::new();
        km.apply(&mut keypad, start + Duration::from_millis(50));
        assert_eq!(Some(0x5), keypad.first_pressed());

        km.apply(&mut keypad, start + Duration::from_millis(150));
        assert_eq!(None, keypad.first_pressed());
    }

    #[test]
    fn repeated_presses_extend_the_hold() {
        let mut km = KeyManager::new(Duration::from_millis(100));
        let start = Instant::now();
        km.handle(press('1'), start);
        km.handle(press('1'), start + Duration::from_millis(80));

        let mut keypad = Keypad::new();
        km.apply(&mut keypad, start + Duration::from_millis(150));
        assert!(keypad.is_pressed(0x1));
    }

    #[test]
    fn escape_and_ctrl_c_quit() {
        let mut km = KeyManager::new(Duration::from_millis(100));
        assert!(!km.quit_requested());
        km.handle(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL), Instant::now());
        assert!(km.quit_requested());

        let mut km = KeyManager::new(Duration::from_millis(100));
        km.handle(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE), Instant::now());
        assert!(km.quit_requested());
    }
}

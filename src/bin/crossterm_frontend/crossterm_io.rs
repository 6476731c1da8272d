use chip8_vm::emulator::framebuffer::Framebuffer;
use chip8_vm::emulator::keypad::Keypad;
use chip8_vm::emulator::{input::EmulatorInput, output::EmulatorOutput};

use super::key_manager::KeyManager;

use crossterm::event::{self, Event};
use crossterm::style::Print;
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue};
use std::io::{stdout, Stdout, Write};
use std::time::{Duration, Instant};

pub struct CrosstermInput {
    key_manager: KeyManager,
}

impl CrosstermInput {
    pub fn new(key_timeout: Duration) -> CrosstermInput {
        CrosstermInput {
            key_manager: KeyManager::new(key_timeout),
        }
    }

    /// Drain every pending terminal event without blocking.
    fn poll_events(&mut self) -> crossterm::Result<()> {
        while event::poll(Duration::from_secs(0))? {
            if let Event::Key(key_event) = event::read()? {
                self.key_manager.handle(key_event, Instant::now());
            }
        }
        Ok(())
    }
}

impl EmulatorInput for CrosstermInput {
    fn update(&mut self, keypad: &mut Keypad) {
        if let Err(err) = self.poll_events() {
            log::warn!("Could not read terminal events: {}", err);
        }
        self.key_manager.apply(keypad, Instant::now());
    }

    fn quit_requested(&self) -> bool {
        self.key_manager.quit_requested()
    }
}

/// Draws the screen inside a box, every pixel `scale` terminal columns wide.
pub struct CrosstermOutput {
    stdout: Stdout,
    scale: usize,
    cells: Framebuffer,
    beeping: bool,
}

impl CrosstermOutput {
    pub fn new(scale: usize) -> crossterm::Result<CrosstermOutput> {
        let mut output = CrosstermOutput {
            stdout: stdout(),
            scale: scale.max(1),
            cells: Framebuffer::new(),
            beeping: false,
        };
        terminal::enable_raw_mode()?;
        execute!(output.stdout, EnterAlternateScreen, cursor::Hide, Clear(ClearType::All))?;
        output.draw_border()?;
        Ok(output)
    }

    fn draw_border(&mut self) -> crossterm::Result<()> {
        let right = (self.cells.width() * self.scale + 1) as u16;
        let bottom = (self.cells.height() + 1) as u16;
        let horizontal = "━".repeat(right as usize - 1);
        queue!(self.stdout, cursor::MoveTo(0, 0), Print(format!("┏{}┓", horizontal)))?;
        for y in 1..bottom {
            queue!(
                self.stdout,
                cursor::MoveTo(0, y),
                Print('┃'),
                cursor::MoveTo(right, y),
                Print('┃')
            )?;
        }
        queue!(self.stdout, cursor::MoveTo(0, bottom), Print(format!("┗{}┛", horizontal)))?;
        self.stdout.flush()?;
        Ok(())
    }

    /// Only redraw the pixels that changed since the last frame.
    fn render(&mut self, frame: &Framebuffer) -> crossterm::Result<()> {
        let lit = "█".repeat(self.scale);
        let unlit = " ".repeat(self.scale);
        for y in 0..frame.height() {
            for x in 0..frame.width() {
                let state = frame.get(x, y);
                if state == self.cells.get(x, y) {
                    continue;
                }
                let column = (x * self.scale + 1) as u16;
                let cell = if state { &lit } else { &unlit };
                queue!(self.stdout, cursor::MoveTo(column, y as u16 + 1), Print(cell))?;
            }
        }
        self.stdout.flush()?;
        self.cells = frame.clone();
        Ok(())
    }

    fn ring_bell(&mut self) -> crossterm::Result<()> {
        queue!(self.stdout, Print('\u{7}'))?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Drop for CrosstermOutput {
    fn drop(&mut self) {
        let restored = execute!(self.stdout, cursor::Show, LeaveAlternateScreen)
            .and_then(|_| terminal::disable_raw_mode());
        if let Err(err) = restored {
            log::error!("Could not restore the terminal: {}", err);
        }
    }
}

impl EmulatorOutput for CrosstermOutput {
    fn draw(&mut self, frame: &Framebuffer) {
        if let Err(err) = self.render(frame) {
            log::warn!("Could not draw frame: {}", err);
        }
    }

    // The terminal bell is the closest thing to a tone, ring it when one starts.
    fn beep(&mut self, on: bool) {
        if on && !self.beeping {
            if let Err(err) = self.ring_bell() {
                log::warn!("Could not ring the bell: {}", err);
            }
        }
        self.beeping = on;
    }
}

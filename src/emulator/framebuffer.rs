use std::fmt;

pub const SCREEN_WIDTH: usize = 64;
pub const SCREEN_HEIGHT: usize = 32;
type Screen = [[bool; SCREEN_WIDTH]; SCREEN_HEIGHT];
const EMPTY_SCREEN: Screen = [[false; SCREEN_WIDTH]; SCREEN_HEIGHT];

/// The monochrome 64x32 display.
///
/// Only the interpreter mutates it, renderers get a shared reference.
#[derive(Clone, PartialEq, Eq)]
pub struct Framebuffer {
    pixels: Screen,
}

impl Framebuffer {
    pub fn new() -> Framebuffer {
        Framebuffer { pixels: EMPTY_SCREEN }
    }

    pub fn width(&self) -> usize {
        SCREEN_WIDTH
    }

    pub fn height(&self) -> usize {
        SCREEN_HEIGHT
    }

    /// The pixel at `(x, y)`, coordinates wrap around the edges.
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.pixels[y % SCREEN_HEIGHT][x % SCREEN_WIDTH]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[bool; SCREEN_WIDTH]> {
        self.pixels.iter()
    }

    /// Whether any pixel is lit.
    pub fn is_blank(&self) -> bool {
        self.pixels.iter().all(|row| row.iter().all(|pixel| !pixel))
    }

    pub(crate) fn clear(&mut self) {
        self.pixels = EMPTY_SCREEN;
    }

    /// XOR a sprite into the screen with its top left corner at `(x, y)`.
    /// Every row byte covers 8 pixels, most significant bit leftmost.
    /// Both the origin and each pixel wrap around independently.
    /// Returns whether a lit pixel was turned off.
    pub(crate) fn draw_sprite(&mut self, x: usize, y: usize, sprite: &[u8]) -> bool {
        let x = x % SCREEN_WIDTH;
        let y = y % SCREEN_HEIGHT;

        let mut collision = false;
        for (row, byte) in sprite.iter().enumerate() {
            let screen_y = (y + row) % SCREEN_HEIGHT;
            for col in 0..8 {
                if byte & (0x80 >> col) == 0 {
                    continue;
                }
                let screen_x = (x + col) % SCREEN_WIDTH;
                let pixel = &mut self.pixels[screen_y][screen_x];
                collision |= *pixel;
                *pixel = !*pixel;
            }
        }

        collision
    }
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Framebuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.pixels {
            for pixel in row.iter() {
                write!(f, "{}", if *pixel { "#" } else { " " })?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

impl fmt::Debug for Framebuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Framebuffer {{")?;
        write!(f, "{}", self)?;
        write!(f, "}}")
    }
}

use std::fmt;

/// A raw 16-bit instruction word, with accessors for
/// the fields the different instruction families use.
///
/// ```text
///   F   X   Y   N
/// [ 4 | 4 | 4 | 4 ]
///       [   NN    ]
///   [    NNN      ]
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Opcode(pub u16);

impl Opcode {
    /// Build an opcode from a big-endian byte pair.
    pub fn from_bytes(high: u8, low: u8) -> Opcode {
        Opcode(((high as u16) << 8) | low as u16)
    }

    /// The two bytes, high byte first.
    pub fn to_bytes(self) -> (u8, u8) {
        ((self.0 >> 8) as u8, (self.0 & 0x00FF) as u8)
    }

    /// The top nibble, selecting the instruction family.
    pub fn family(self) -> u8 {
        (self.0 >> 12) as u8
    }

    /// The second nibble, usually a register index.
    pub fn x(self) -> u8 {
        ((self.0 >> 8) & 0x0F) as u8
    }

    /// The third nibble, usually a register index.
    pub fn y(self) -> u8 {
        ((self.0 >> 4) & 0x0F) as u8
    }

    /// The lowest nibble.
    pub fn n(self) -> u8 {
        (self.0 & 0x0F) as u8
    }

    /// The lowest byte.
    pub fn nn(self) -> u8 {
        (self.0 & 0xFF) as u8
    }

    /// The lowest 12 bits, an address.
    pub fn nnn(self) -> u16 {
        self.0 & 0x0FFF
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#06X}", self.0)
    }
}

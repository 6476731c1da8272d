/// Switches for the places where CHIP-8 interpreters disagree.
///
/// The default matches the original COSMAC VIP behaviour for jumps and the
/// common modern behaviour for shifts, with no jump target validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Quirks {
    /// `8XY6` and `8XYE` shift VY into VX instead of shifting VX in place.
    pub shift_uses_vy: bool,
    /// `BNNN` adds VX (X being the high nibble of NNN) instead of V0.
    pub jump_with_vx: bool,
    /// `BNNN` reports targets outside the program area as out of bounds
    /// and leaves the program counter alone.
    pub validate_jump_with_offset: bool,
}

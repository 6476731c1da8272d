use crate::emulator::opcode::Opcode;

/// A wrapper for addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Addr(pub u16);

/// A wrapper for registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reg(pub u8);

/// A wrapper for constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Const(pub u8);

/// A single instruction from the CHIP-8 instruction set.
/// Two bytes written in hexadecimal, with the following special characters:
/// - NNN: address
/// - NN: 8-bit constant
/// - N: 4-bit constant
/// - X and Y: 4-bit register identifier
/// - PC: Program counter
/// - I: 16 bit register for memory address
/// - VN: One of the 16 available variables (register identifiers)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    ClearScreen, // 00E0
    Return, // 00EE
    Goto(Addr), // 1NNN
    Call(Addr), // 2NNN
    IfRegEqConst(Reg, Const), // 3XNN
    IfRegNeqConst(Reg, Const), // 4XNN
    IfRegEqReg(Reg, Reg), // 5XY0
    SetRegToConst(Reg, Const), // 6XNN
    IncRegByConst(Reg, Const), // 7XNN
    SetRegToReg(Reg, Reg), // 8XY0
    BitwiseOr(Reg, Reg), // 8XY1
    BitwiseAnd(Reg, Reg), // 8XY2
    BitwiseXor(Reg, Reg), // 8XY3
    IncRegByReg(Reg, Reg), // 8XY4
    DecRegByReg(Reg, Reg), // 8XY5
    BitshiftRight(Reg, Reg), // 8XY6
    SetVxVyMinusVx(Reg, Reg), // 8XY7
    BitshiftLeft(Reg, Reg), // 8XYE
    IfRegNeqReg(Reg, Reg), // 9XY0
    SetI(Addr), // ANNN
    SetPcToV0PlusAddr(Addr), // BNNN
    SetVxRand(Reg, Const), // CXNN
    Draw(Reg, Reg, Const), // DXYN
    IfKeyEqVx(Reg), // EX9E
    IfKeyNeqVx(Reg), // EXA1
    SetRegToDelayTimer(Reg), // FX07
    SetRegToGetKey(Reg), // FX0A
    SetDelayTimerToReg(Reg), // FX15
    SetSoundTimerToReg(Reg), // FX18
    AddRegToI(Reg), // FX1E
    SetIToSpriteAddrVx(Reg), // FX29
    SetIToBcdOfReg(Reg), // FX33
    RegDump(Reg), // FX55
    RegLoad(Reg) // FX65
}

impl Instruction {

    pub fn from_u16(value: u16) -> Option<Instruction> {
        Instruction::decode(Opcode(value))
    }

    pub fn from_two_u8(left: u8, right: u8) -> Option<Instruction> {
        Instruction::decode(Opcode::from_bytes(left, right))
    }

    /// Clamp the operands to what an opcode can encode: registers to a
    /// nibble, addresses to 12 bits and sprite heights to a nibble.
    /// Decoded instructions are returned unchanged.
    pub fn masked(self) -> Instruction {
        use Instruction::*;

        let r = |Reg(x): Reg| Reg(x & 0xF);
        let a = |Addr(addr): Addr| Addr(addr & 0x0FFF);

        match self {
            ClearScreen => ClearScreen,
            Return => Return,
            Goto(nnn) => Goto(a(nnn)),
            Call(nnn) => Call(a(nnn)),
            IfRegEqConst(x, nn) => IfRegEqConst(r(x), nn),
            IfRegNeqConst(x, nn) => IfRegNeqConst(r(x), nn),
            IfRegEqReg(x, y) => IfRegEqReg(r(x), r(y)),
            SetRegToConst(x, nn) => SetRegToConst(r(x), nn),
            IncRegByConst(x, nn) => IncRegByConst(r(x), nn),
            SetRegToReg(x, y) => SetRegToReg(r(x), r(y)),
            BitwiseOr(x, y) => BitwiseOr(r(x), r(y)),
            BitwiseAnd(x, y) => BitwiseAnd(r(x), r(y)),
            BitwiseXor(x, y) => BitwiseXor(r(x), r(y)),
            IncRegByReg(x, y) => IncRegByReg(r(x), r(y)),
            DecRegByReg(x, y) => DecRegByReg(r(x), r(y)),
            BitshiftRight(x, y) => BitshiftRight(r(x), r(y)),
            SetVxVyMinusVx(x, y) => SetVxVyMinusVx(r(x), r(y)),
            BitshiftLeft(x, y) => BitshiftLeft(r(x), r(y)),
            IfRegNeqReg(x, y) => IfRegNeqReg(r(x), r(y)),
            SetI(nnn) => SetI(a(nnn)),
            SetPcToV0PlusAddr(nnn) => SetPcToV0PlusAddr(a(nnn)),
            SetVxRand(x, nn) => SetVxRand(r(x), nn),
            Draw(x, y, Const(n)) => Draw(r(x), r(y), Const(n & 0xF)),
            IfKeyEqVx(x) => IfKeyEqVx(r(x)),
            IfKeyNeqVx(x) => IfKeyNeqVx(r(x)),
            SetRegToDelayTimer(x) => SetRegToDelayTimer(r(x)),
            SetRegToGetKey(x) => SetRegToGetKey(r(x)),
            SetDelayTimerToReg(x) => SetDelayTimerToReg(r(x)),
            SetSoundTimerToReg(x) => SetSoundTimerToReg(r(x)),
            AddRegToI(x) => AddRegToI(r(x)),
            SetIToSpriteAddrVx(x) => SetIToSpriteAddrVx(r(x)),
            SetIToBcdOfReg(x) => SetIToBcdOfReg(r(x)),
            RegDump(x) => RegDump(r(x)),
            RegLoad(x) => RegLoad(r(x)),
        }
    }

    /// Decode an opcode, first on its family nibble, then on the low
    /// nibble or byte for the families that share a prefix.
    /// Returns `None` when no instruction matches.
    pub fn decode(opcode: Opcode) -> Option<Instruction> {
        let x = Reg(opcode.x());
        let y = Reg(opcode.y());
        let nn = Const(opcode.nn());
        let nnn = Addr(opcode.nnn());

        let instruction = match opcode.family() {
            0x0 => match opcode.nn() {
                0xE0 => Instruction::ClearScreen,
                0xEE => Instruction::Return,
                _ => return None,
            },
            0x1 => Instruction::Goto(nnn),
            0x2 => Instruction::Call(nnn),
            0x3 => Instruction::IfRegEqConst(x, nn),
            0x4 => Instruction::IfRegNeqConst(x, nn),
            0x5 => Instruction::IfRegEqReg(x, y),
            0x6 => Instruction::SetRegToConst(x, nn),
            0x7 => Instruction::IncRegByConst(x, nn),
            0x8 => match opcode.n() {
                0x0 => Instruction::SetRegToReg(x, y),
                0x1 => Instruction::BitwiseOr(x, y),
                0x2 => Instruction::BitwiseAnd(x, y),
                0x3 => Instruction::BitwiseXor(x, y),
                0x4 => Instruction::IncRegByReg(x, y),
                0x5 => Instruction::DecRegByReg(x, y),
                0x6 => Instruction::BitshiftRight(x, y),
                0x7 => Instruction::SetVxVyMinusVx(x, y),
                0xE => Instruction::BitshiftLeft(x, y),
                _ => return None,
            },
            0x9 => Instruction::IfRegNeqReg(x, y),
            0xA => Instruction::SetI(nnn),
            0xB => Instruction::SetPcToV0PlusAddr(nnn),
            0xC => Instruction::SetVxRand(x, nn),
            0xD => Instruction::Draw(x, y, Const(opcode.n())),
            0xE => match opcode.n() {
                0xE => Instruction::IfKeyEqVx(x),
                0x1 => Instruction::IfKeyNeqVx(x),
                _ => return None,
            },
            0xF => match opcode.nn() {
                0x07 => Instruction::SetRegToDelayTimer(x),
                0x0A => Instruction::SetRegToGetKey(x),
                0x15 => Instruction::SetDelayTimerToReg(x),
                0x18 => Instruction::SetSoundTimerToReg(x),
                0x1E => Instruction::AddRegToI(x),
                0x29 => Instruction::SetIToSpriteAddrVx(x),
                0x33 => Instruction::SetIToBcdOfReg(x),
                0x55 => Instruction::RegDump(x),
                0x65 => Instruction::RegLoad(x),
                _ => return None,
            },
            _ => unreachable!("a nibble is at most 0xF"),
        };

        Some(instruction)
    }
}


#[cfg(test)]
mod tests {

    use super::*;
    use test_case::test_case;

    #[test_case(0x00E0 => Some(Instruction::ClearScreen) ; "clear screen")]
    #[test_case(0x00EE => Some(Instruction::Return) ; "return from subroutine")]
    #[test_case(0x1025 => Some(Instruction::Goto(Addr(0x25))) ; "goto")]
    #[test_case(0x2037 => Some(Instruction::Call(Addr(0x37))) ; "call")]
    #[test_case(0x3A08 => Some(Instruction::IfRegEqConst(Reg(0xA), Const(8))) ; "if reg eq const")]
    #[test_case(0x4A08 => Some(Instruction::IfRegNeqConst(Reg(0xA), Const(8))) ; "if reg neq const")]
    #[test_case(0x5AB0 => Some(Instruction::IfRegEqReg(Reg(0xA), Reg(0xB))) ; "if reg eq reg")]
    #[test_case(0x6B23 => Some(Instruction::SetRegToConst(Reg(0xB), Const(0x23))) ; "set reg to const")]
    #[test_case(0x7CA1 => Some(Instruction::IncRegByConst(Reg(0xC), Const(0xA1))) ; "inc reg by const")]
    #[test_case(0x8AB0 => Some(Instruction::SetRegToReg(Reg(0xA), Reg(0xB))) ; "set reg to reg")]
    #[test_case(0x8DE1 => Some(Instruction::BitwiseOr(Reg(0xD), Reg(0xE))) ; "or")]
    #[test_case(0x8DE2 => Some(Instruction::BitwiseAnd(Reg(0xD), Reg(0xE))) ; "and")]
    #[test_case(0x8DE3 => Some(Instruction::BitwiseXor(Reg(0xD), Reg(0xE))) ; "xor")]
    #[test_case(0x8AB4 => Some(Instruction::IncRegByReg(Reg(0xA), Reg(0xB))) ; "add with carry")]
    #[test_case(0x8AB5 => Some(Instruction::DecRegByReg(Reg(0xA), Reg(0xB))) ; "sub with borrow")]
    #[test_case(0x8AB6 => Some(Instruction::BitshiftRight(Reg(0xA), Reg(0xB))) ; "shift right")]
    #[test_case(0x8AB7 => Some(Instruction::SetVxVyMinusVx(Reg(0xA), Reg(0xB))) ; "reverse sub")]
    #[test_case(0x8A0E => Some(Instruction::BitshiftLeft(Reg(0xA), Reg(0x0))) ; "shift left")]
    #[test_case(0x9AB0 => Some(Instruction::IfRegNeqReg(Reg(0xA), Reg(0xB))) ; "if reg neq reg")]
    #[test_case(0xA025 => Some(Instruction::SetI(Addr(0x25))) ; "set i")]
    #[test_case(0xB025 => Some(Instruction::SetPcToV0PlusAddr(Addr(0x25))) ; "jump with offset")]
    #[test_case(0xCA23 => Some(Instruction::SetVxRand(Reg(0xA), Const(0x23))) ; "random")]
    #[test_case(0xDABC => Some(Instruction::Draw(Reg(0xA), Reg(0xB), Const(0xC))) ; "draw")]
    #[test_case(0xEA9E => Some(Instruction::IfKeyEqVx(Reg(0xA))) ; "if key pressed")]
    #[test_case(0xEAA1 => Some(Instruction::IfKeyNeqVx(Reg(0xA))) ; "if key not pressed")]
    #[test_case(0xFA07 => Some(Instruction::SetRegToDelayTimer(Reg(0xA))) ; "get delay timer")]
    #[test_case(0xFA0A => Some(Instruction::SetRegToGetKey(Reg(0xA))) ; "wait for key")]
    #[test_case(0xFA15 => Some(Instruction::SetDelayTimerToReg(Reg(0xA))) ; "set delay timer")]
    #[test_case(0xFA18 => Some(Instruction::SetSoundTimerToReg(Reg(0xA))) ; "set sound timer")]
    #[test_case(0xFA1E => Some(Instruction::AddRegToI(Reg(0xA))) ; "add to i")]
    #[test_case(0xFA29 => Some(Instruction::SetIToSpriteAddrVx(Reg(0xA))) ; "font address")]
    #[test_case(0xFA33 => Some(Instruction::SetIToBcdOfReg(Reg(0xA))) ; "bcd")]
    #[test_case(0xFA55 => Some(Instruction::RegDump(Reg(0xA))) ; "reg dump")]
    #[test_case(0xFA65 => Some(Instruction::RegLoad(Reg(0xA))) ; "reg load")]
    fn opcodes_are_parsed_correctly(opcode: u16) -> Option<Instruction> {
        Instruction::from_u16(opcode)
    }

    #[test_case(0x0000 ; "zero word")]
    #[test_case(0x0123 ; "machine code routine")]
    #[test_case(0x8AB8 ; "unused arithmetic code")]
    #[test_case(0x8ABF ; "unused arithmetic code f")]
    #[test_case(0xEA00 ; "unused key code")]
    #[test_case(0xFA00 ; "unused misc code")]
    #[test_case(0xFAFF ; "unused misc code ff")]
    fn unregistered_secondary_codes_decode_to_none(opcode: u16) {
        assert_eq!(None, Instruction::from_u16(opcode));
    }

    #[test]
    fn secondary_dispatch_ignores_unused_nibbles() {
        // Family 0 only looks at the low byte, 5 and 9 never look at N.
        assert_eq!(Some(Instruction::ClearScreen), Instruction::from_u16(0x03E0));
        assert_eq!(Some(Instruction::IfRegEqReg(Reg(1), Reg(2))), Instruction::from_u16(0x5127));
        assert_eq!(Some(Instruction::IfRegNeqReg(Reg(1), Reg(2))), Instruction::from_u16(0x912F));
        // Family E only looks at the low nibble.
        assert_eq!(Some(Instruction::IfKeyEqVx(Reg(3))), Instruction::from_u16(0xE30E));
    }

    #[test]
    fn masking_keeps_decoded_instructions() {
        for opcode in (0..=0xFFFFu32).step_by(7) {
            if let Some(instruction) = Instruction::from_u16(opcode as u16) {
                assert_eq!(instruction, instruction.masked());
            }
        }
    }

    #[test_case(Instruction::RegDump(Reg(20)) => Instruction::RegDump(Reg(4)) ; "register wraps to a nibble")]
    #[test_case(Instruction::SetRegToConst(Reg(16), Const(1)) => Instruction::SetRegToConst(Reg(0), Const(1)) ; "register sixteen is v0")]
    #[test_case(Instruction::Goto(Addr(0xFFFF)) => Instruction::Goto(Addr(0x0FFF)) ; "address wraps to twelve bits")]
    #[test_case(Instruction::Draw(Reg(1), Reg(2), Const(0x1F)) => Instruction::Draw(Reg(1), Reg(2), Const(0xF)) ; "sprite height wraps to a nibble")]
    fn masking_clamps_hand_built_operands(instruction: Instruction) -> Instruction {
        instruction.masked()
    }

    #[test]
    fn from_two_u8_equals_from_u16() {
        assert_eq!(Instruction::from_two_u8(0x12, 0x34), Instruction::from_u16(0x1234));
        assert_eq!(Instruction::from_two_u8(0x2F, 0x2F), Instruction::from_u16(0x2F2F));
        assert_eq!(Instruction::from_two_u8(0x10, 0x20), Instruction::from_u16(0x1020));
    }
}

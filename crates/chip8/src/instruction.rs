use std::fmt;

/// A register index, `0x0..=0xF`.
pub type Reg = usize;

/// A decoded Chip8 instruction.
///
/// Decoding never fails, bit patterns that are not part of the
/// instruction set decode to [`Instruction::Unknown`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Instruction {
    /// 00E0
    Clear,
    /// 00EE
    Return,
    /// 1nnn
    Jump(u16),
    /// 2nnn
    Call(u16),
    /// 3xnn
    SkipEqImm(Reg, u8),
    /// 4xnn
    SkipNeImm(Reg, u8),
    /// 5xy0
    SkipEqReg(Reg, Reg),
    /// 6xnn
    LoadImm(Reg, u8),
    /// 7xnn
    AddImm(Reg, u8),
    /// 8xy0
    Copy(Reg, Reg),
    /// 8xy1
    Or(Reg, Reg),
    /// 8xy2
    And(Reg, Reg),
    /// 8xy3
    Xor(Reg, Reg),
    /// 8xy4
    AddCarry(Reg, Reg),
    /// 8xy5
    Sub(Reg, Reg),
    /// 8xy6
    ShiftRight(Reg),
    /// 8xy7
    SubReverse(Reg, Reg),
    /// 8xyE
    ShiftLeft(Reg),
    /// 9xy0
    SkipNeReg(Reg, Reg),
    /// Annn
    LoadIndex(u16),
    /// Bnnn
    JumpOffset(u16),
    /// Cxnn
    Random(Reg, u8),
    /// Dxyn
    Draw(Reg, Reg, u8),
    /// Ex9E
    SkipKeyPressed(Reg),
    /// ExA1
    SkipKeyNotPressed(Reg),
    /// Fx07
    LoadDelay(Reg),
    /// Fx0A
    WaitKey(Reg),
    /// Fx15
    SetDelay(Reg),
    /// Fx18
    SetSound(Reg),
    /// Fx1E
    AddIndex(Reg),
    /// Fx29
    LoadGlyph(Reg),
    /// Fx33
    StoreBcd(Reg),
    /// Fx55
    StoreRegisters(Reg),
    /// Fx65
    LoadRegisters(Reg),
    /// Anything else, executed as a no-op.
    Unknown(u16),
}

impl Instruction {
    /// Decode a 16-bit instruction word.
    pub fn decode(opcode: u16) -> Self {
        // define some commonly used variables
        let x = usize::from((opcode & 0x0F00) >> 8);
        let y = usize::from((opcode & 0x00F0) >> 4);
        let n = (opcode & 0x000F) as u8;
        let nn = (opcode & 0x00FF) as u8;
        let nnn = opcode & 0x0FFF;

        use Instruction::*;
        match opcode & 0xF000 {
            0x0000 => match opcode {
                0x00E0 => Clear,
                0x00EE => Return,
                _ => Unknown(opcode),
            },
            0x1000 => Jump(nnn),
            0x2000 => Call(nnn),
            0x3000 => SkipEqImm(x, nn),
            0x4000 => SkipNeImm(x, nn),
            // the low nibble of 5xy_ and 9xy_ is not checked
            0x5000 => SkipEqReg(x, y),
            0x6000 => LoadImm(x, nn),
            0x7000 => AddImm(x, nn),
            0x8000 => match n {
                0x0 => Copy(x, y),
                0x1 => Or(x, y),
                0x2 => And(x, y),
                0x3 => Xor(x, y),
                0x4 => AddCarry(x, y),
                0x5 => Sub(x, y),
                0x6 => ShiftRight(x),
                0x7 => SubReverse(x, y),
                0xE => ShiftLeft(x),
                _ => Unknown(opcode),
            },
            0x9000 => SkipNeReg(x, y),
            0xA000 => LoadIndex(nnn),
            0xB000 => JumpOffset(nnn),
            0xC000 => Random(x, nn),
            0xD000 => Draw(x, y, n),
            0xE000 => match nn {
                0x9E => SkipKeyPressed(x),
                0xA1 => SkipKeyNotPressed(x),
                _ => Unknown(opcode),
            },
            // 0xF000
            _ => match nn {
                0x07 => LoadDelay(x),
                0x0A => WaitKey(x),
                0x15 => SetDelay(x),
                0x18 => SetSound(x),
                0x1E => AddIndex(x),
                0x29 => LoadGlyph(x),
                0x33 => StoreBcd(x),
                0x55 => StoreRegisters(x),
                0x65 => LoadRegisters(x),
                _ => Unknown(opcode),
            },
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Instruction::*;
        match *self {
            Clear => write!(f, "CLS"),
            Return => write!(f, "RET"),
            Jump(addr) => write!(f, "JP {addr:#05X}"),
            Call(addr) => write!(f, "CALL {addr:#05X}"),
            SkipEqImm(x, nn) => write!(f, "SE V{x:X}, {nn:#04X}"),
            SkipNeImm(x, nn) => write!(f, "SNE V{x:X}, {nn:#04X}"),
            SkipEqReg(x, y) => write!(f, "SE V{x:X}, V{y:X}"),
            LoadImm(x, nn) => write!(f, "LD V{x:X}, {nn:#04X}"),
            AddImm(x, nn) => write!(f, "ADD V{x:X}, {nn:#04X}"),
            Copy(x, y) => write!(f, "LD V{x:X}, V{y:X}"),
            Or(x, y) => write!(f, "OR V{x:X}, V{y:X}"),
            And(x, y) => write!(f, "AND V{x:X}, V{y:X}"),
            Xor(x, y) => write!(f, "XOR V{x:X}, V{y:X}"),
            AddCarry(x, y) => write!(f, "ADD V{x:X}, V{y:X}"),
            Sub(x, y) => write!(f, "SUB V{x:X}, V{y:X}"),
            ShiftRight(x) => write!(f, "SHR V{x:X}"),
            SubReverse(x, y) => write!(f, "SUBN V{x:X}, V{y:X}"),
            ShiftLeft(x) => write!(f, "SHL V{x:X}"),
            SkipNeReg(x, y) => write!(f, "SNE V{x:X}, V{y:X}"),
            LoadIndex(addr) => write!(f, "LD I, {addr:#05X}"),
            JumpOffset(addr) => write!(f, "JP V0, {addr:#05X}"),
            Random(x, nn) => write!(f, "RND V{x:X}, {nn:#04X}"),
            Draw(x, y, n) => write!(f, "DRW V{x:X}, V{y:X}, {n}"),
            SkipKeyPressed(x) => write!(f, "SKP V{x:X}"),
            SkipKeyNotPressed(x) => write!(f, "SKNP V{x:X}"),
            LoadDelay(x) => write!(f, "LD V{x:X}, DT"),
            WaitKey(x) => write!(f, "LD V{x:X}, K"),
            SetDelay(x) => write!(f, "LD DT, V{x:X}"),
            SetSound(x) => write!(f, "LD ST, V{x:X}"),
            AddIndex(x) => write!(f, "ADD I, V{x:X}"),
            LoadGlyph(x) => write!(f, "LD F, V{x:X}"),
            StoreBcd(x) => write!(f, "LD B, V{x:X}"),
            StoreRegisters(x) => write!(f, "LD [I], V{x:X}"),
            LoadRegisters(x) => write!(f, "LD V{x:X}, [I]"),
            Unknown(opcode) => write!(f, "DW {opcode:#06X}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Instruction::{self, *};

    #[test]
    fn test_decode_fields() {
        assert_eq!(Instruction::decode(0xD125), Draw(0x1, 0x2, 5));
        assert_eq!(Instruction::decode(0x6AFF), LoadImm(0xA, 0xFF));
        assert_eq!(Instruction::decode(0x2ABC), Call(0xABC));
        assert_eq!(Instruction::decode(0xB123), JumpOffset(0x123));
        assert_eq!(Instruction::decode(0x8CDE), ShiftLeft(0xC));
    }

    #[test]
    fn test_decode_system_instructions() {
        assert_eq!(Instruction::decode(0x00E0), Clear);
        assert_eq!(Instruction::decode(0x00EE), Return);
        // machine code routines are not supported
        assert_eq!(Instruction::decode(0x0123), Unknown(0x0123));
    }

    #[test]
    fn test_decode_unknown_sub_opcodes() {
        for opcode in [0x8128, 0x812F, 0xE19F, 0xE100, 0xF100, 0xF1FF, 0xF10B] {
            assert_eq!(Instruction::decode(opcode), Unknown(opcode));
        }
    }

    #[test]
    fn test_decode_is_total() {
        for opcode in 0..=u16::MAX {
            let instruction = Instruction::decode(opcode);
            assert!(!instruction.to_string().is_empty());
        }
        assert_eq!(Instruction::decode(0xF265), LoadRegisters(2));
    }

    #[test]
    fn test_decode_ignores_low_nibble_of_register_skips() {
        assert_eq!(Instruction::decode(0x5121), SkipEqReg(1, 2));
        assert_eq!(Instruction::decode(0x9127), SkipNeReg(1, 2));
    }

    #[test]
    fn test_display() {
        assert_eq!(Instruction::decode(0x00E0).to_string(), "CLS");
        assert_eq!(Instruction::decode(0x6005).to_string(), "LD V0, 0x05");
        assert_eq!(Instruction::decode(0xD005).to_string(), "DRW V0, V0, 5");
        assert_eq!(Instruction::decode(0x1200).to_string(), "JP 0x200");
        assert_eq!(Instruction::decode(0xFA33).to_string(), "LD B, VA");
        assert_eq!(Instruction::decode(0xFFFF).to_string(), "DW 0xFFFF");
    }
}

use super::Bus;
use crate::{
    error::Result,
    instruction::Instruction,
    memory::{FONT_ADDR, FONT_GLYPH_SIZE, INTERPRETER_SIZE},
    stack::Stack,
};

/// default starting point for most Chip8 programs
pub const STARTING_PC: u16 = INTERPRETER_SIZE as u16;

/// Highest address a complete two byte instruction can start at.
pub const LAST_INSTRUCTION_ADDR: u16 = 0x0FFE;

/// Describes how the program counter should be updated after
/// executing an instruction. The program counter already points
/// at the following instruction when the instruction executes.
enum PCUpdate {
    /// Go directly to the next instruction.
    Next,

    /// Skip the next instruction.
    SkipNext,

    /// Jump to the given address.
    Jump(u16),

    /// Execute the same instruction again on the next cycle.
    Repeat,
}

#[derive(Clone, Default)]
pub struct Processor {
    /// Vx registers, VF doubles as the flag register
    pub v: [u8; 16],

    /// Index register
    pub i: u16,

    /// Program counter
    pub pc: u16,

    /// Return addresses of the active subroutine calls
    pub stack: Stack,

    /// The last opcode that has been processed
    pub last_opcode: u16,

    /// The address of the last opcode that has been processed
    pub last_opcode_addr: u16,
}

impl Processor {
    pub fn new() -> Self {
        Self {
            pc: STARTING_PC,
            ..Default::default()
        }
    }

    /// Returns whether the program counter ran off the end of memory.
    ///
    /// A halted processor ignores further cycles, hosts can detect a
    /// finished program by watching the program counter stop changing.
    pub fn halted(&self) -> bool {
        self.pc > LAST_INSTRUCTION_ADDR
    }

    /// Fetch, decode and execute one instruction.
    ///
    /// If the instruction fails (e.g. a return with an empty stack) the
    /// program counter is left on the failing instruction.
    pub fn cycle(&mut self, bus: &mut Bus) -> Result<()> {
        if self.halted() {
            return Ok(());
        }

        // get the next two bytes and combine into one two-byte instruction
        let addr = self.pc;
        let opcode = bus.memory.fetch(usize::from(addr))?;
        self.last_opcode = opcode;
        self.last_opcode_addr = addr;
        self.pc = addr.wrapping_add(2);

        let instruction = Instruction::decode(opcode);
        log::trace!("{addr:#05X}: {opcode:04X}  {instruction}");

        match self.execute(instruction, bus) {
            Ok(PCUpdate::Next) => {}
            Ok(PCUpdate::SkipNext) => self.pc = self.pc.wrapping_add(2),
            Ok(PCUpdate::Jump(target)) => self.pc = target,
            Ok(PCUpdate::Repeat) => self.pc = addr,
            Err(e) => {
                self.pc = addr;
                return Err(e);
            }
        }
        Ok(())
    }

    fn skip_if(condition: bool) -> PCUpdate {
        if condition {
            PCUpdate::SkipNext
        } else {
            PCUpdate::Next
        }
    }

    fn execute(&mut self, instruction: Instruction, bus: &mut Bus) -> Result<PCUpdate> {
        use Instruction::*;

        let update = match instruction {
            Clear => {
                bus.graphics.clear();
                PCUpdate::Next
            }
            Return => PCUpdate::Jump(self.stack.pop()?),
            Jump(addr) => PCUpdate::Jump(addr),
            Call(addr) => {
                self.stack.push(self.pc);
                PCUpdate::Jump(addr)
            }

            SkipEqImm(x, nn) => Self::skip_if(self.v[x] == nn),
            SkipNeImm(x, nn) => Self::skip_if(self.v[x] != nn),
            SkipEqReg(x, y) => Self::skip_if(self.v[x] == self.v[y]),
            SkipNeReg(x, y) => Self::skip_if(self.v[x] != self.v[y]),

            LoadImm(x, nn) => {
                self.v[x] = nn;
                PCUpdate::Next
            }
            AddImm(x, nn) => {
                self.v[x] = self.v[x].wrapping_add(nn);
                PCUpdate::Next
            }

            Copy(x, y) => {
                self.v[x] = self.v[y];
                PCUpdate::Next
            }
            Or(x, y) => {
                self.v[x] |= self.v[y];
                PCUpdate::Next
            }
            And(x, y) => {
                self.v[x] &= self.v[y];
                PCUpdate::Next
            }
            Xor(x, y) => {
                self.v[x] ^= self.v[y];
                PCUpdate::Next
            }

            // VF is written before the result, when x or y is F the
            // subtractions and shifts operate on the new flag value
            AddCarry(x, y) => {
                let sum = u16::from(self.v[x]) + u16::from(self.v[y]);
                self.v[0xF] = u8::from(sum > 0xFF);
                self.v[x] = sum as u8;
                PCUpdate::Next
            }
            Sub(x, y) => {
                self.v[0xF] = u8::from(self.v[x] > self.v[y]);
                self.v[x] = self.v[x].wrapping_sub(self.v[y]);
                PCUpdate::Next
            }
            ShiftRight(x) => {
                self.v[0xF] = self.v[x] & 1;
                self.v[x] >>= 1;
                PCUpdate::Next
            }
            SubReverse(x, y) => {
                self.v[0xF] = u8::from(self.v[y] > self.v[x]);
                self.v[x] = self.v[y].wrapping_sub(self.v[x]);
                PCUpdate::Next
            }
            ShiftLeft(x) => {
                self.v[0xF] = self.v[x] >> 7;
                self.v[x] <<= 1;
                PCUpdate::Next
            }

            LoadIndex(addr) => {
                self.i = addr;
                PCUpdate::Next
            }
            JumpOffset(addr) => PCUpdate::Jump(addr + u16::from(self.v[0])),
            Random(x, nn) => {
                let mut buf = [0u8; 1];
                getrandom::getrandom(&mut buf)?;
                self.v[x] = buf[0] & nn;
                PCUpdate::Next
            }
            Draw(x, y, n) => {
                self.draw(bus, self.v[x], self.v[y], n)?;
                PCUpdate::Next
            }

            // only the low nibble of Vx selects the key
            SkipKeyPressed(x) => Self::skip_if(bus.input.is_nibble_pressed(self.v[x])),
            SkipKeyNotPressed(x) => Self::skip_if(!bus.input.is_nibble_pressed(self.v[x])),

            LoadDelay(x) => {
                self.v[x] = bus.clock.delay_timer;
                PCUpdate::Next
            }
            WaitKey(x) => match bus.input.first_pressed() {
                Some(key) => {
                    self.v[x] = key;
                    PCUpdate::Next
                }
                // poll again next cycle
                None => PCUpdate::Repeat,
            },
            SetDelay(x) => {
                bus.clock.delay_timer = self.v[x];
                PCUpdate::Next
            }
            SetSound(x) => {
                bus.clock.set_sound_timer(self.v[x]);
                PCUpdate::Next
            }

            AddIndex(x) => {
                self.i = self.i.wrapping_add(u16::from(self.v[x]));
                PCUpdate::Next
            }
            LoadGlyph(x) => {
                // set I to the sprite address of the digit in Vx
                self.i = (FONT_ADDR + FONT_GLYPH_SIZE * usize::from(self.v[x])) as u16;
                PCUpdate::Next
            }
            StoreBcd(x) => {
                let value = self.v[x];
                let digits = bus.memory.slice_mut(usize::from(self.i), 3)?;
                digits[0] = value / 100;
                digits[1] = (value / 10) % 10;
                digits[2] = value % 10;
                PCUpdate::Next
            }
            StoreRegisters(x) => {
                bus.memory
                    .slice_mut(usize::from(self.i), x + 1)?
                    .copy_from_slice(&self.v[..=x]);
                PCUpdate::Next
            }
            LoadRegisters(x) => {
                let values = bus.memory.slice(usize::from(self.i), x + 1)?;
                self.v[..=x].copy_from_slice(values);
                PCUpdate::Next
            }

            Unknown(opcode) => {
                log::warn!(
                    "Ignoring unknown instruction {opcode:04X} at {:#05X}",
                    self.last_opcode_addr
                );
                PCUpdate::Next
            }
        };
        Ok(update)
    }

    /// Draw the `n` byte sprite at `I` with its top left corner at `(vx, vy)`.
    ///
    /// VF is cleared first and set if any lit pixel is turned off.
    fn draw(&mut self, bus: &mut Bus, vx: u8, vy: u8, n: u8) -> Result<()> {
        let sprite = bus.memory.slice(usize::from(self.i), usize::from(n))?;
        let x = usize::from(vx);
        let y = usize::from(vy);

        self.v[0xF] = 0;
        for (row, data) in sprite.iter().enumerate() {
            if bus.graphics.draw_byte(x, y + row, *data) {
                self.v[0xF] = 1;
            }
        }
        Ok(())
    }
}

/**
 * @file command.rs
 * @date 14/10/2026
 * @brief Packed command word of the RAM word peripheral
 *
 * [31:30] mode, [29:25] row, [24:20] column, [19:0] data
 */

pub const MODE_MASK: u32 = 0x3;
pub const ROW_MASK: u32 = 0x1F;
pub const COLUMN_MASK: u32 = 0x1F;
pub const DATA_MASK: u32 = 0xF_FFFF;

pub const MODE_SHIFT: u32 = 30;
pub const ROW_SHIFT: u32 = 25;
pub const COLUMN_SHIFT: u32 = 20;

/// Number of commands issued per phase by the burst variant.
pub const BURST_LEN: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Read = 0b01,
    Program = 0b11,
}

impl Mode {
    /// `0b00` and `0b10` have no defined meaning on the peripheral.
    pub const fn from_bits(bits: u32) -> Option<Self> {
        match bits & MODE_MASK {
            0b01 => Some(Mode::Read),
            0b11 => Some(Mode::Program),
            _ => None,
        }
    }
}

/// Pack the fields into a command word. Out of range bits are dropped.
pub const fn encode(mode: u32, row: u32, column: u32, data: u32) -> u32 {
    ((mode & MODE_MASK) << MODE_SHIFT)
        | ((row & ROW_MASK) << ROW_SHIFT)
        | ((column & COLUMN_MASK) << COLUMN_SHIFT)
        | (data & DATA_MASK)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Command {
    pub mode: u32,
    pub row: u32,
    pub column: u32,
    pub data: u32,
}

impl Command {
    pub const fn program(row: u32, column: u32, data: u32) -> Self {
        Self {
            mode: Mode::Program as u32,
            row,
            column,
            data,
        }
    }

    pub const fn read(row: u32, column: u32) -> Self {
        Self {
            mode: Mode::Read as u32,
            row,
            column,
            data: 0,
        }
    }

    pub const fn encode(&self) -> u32 {
        encode(self.mode, self.row, self.column, self.data)
    }

    pub const fn decode(word: u32) -> Self {
        Self {
            mode: (word >> MODE_SHIFT) & MODE_MASK,
            row: (word >> ROW_SHIFT) & ROW_MASK,
            column: (word >> COLUMN_SHIFT) & COLUMN_MASK,
            data: word & DATA_MASK,
        }
    }

    pub const fn mode(&self) -> Option<Mode> {
        Mode::from_bits(self.mode)
    }
}

/// Command `i` of a burst: row and column follow `i` with 5-bit wrap and
/// the data alternates between 0xFF and 0x00. Read commands carry the same
/// data field as the program command they pair with.
pub const fn burst_command(mode: Mode, i: u32) -> Command {
    let data = if i & 1 == 0 { 0x0_00FF } else { 0x0_0000 };

    Command {
        mode: mode as u32,
        row: i & ROW_MASK,
        column: i & COLUMN_MASK,
        data,
    }
}

/**
 * @file peripherals/ram_word.rs
 * @date 14/10/2026
 * @brief Behavioral model of the RAM word user project
 *
 * A 32x32 array of 20-bit words behind a single command register.
 * Writing the register queues a command:
 *   [31:30] mode (01 read, 11 program), [29:25] row, [24:20] column, [19:0] data
 * Commands run one at a time. A read command pushes the cell into the result
 * queue, reading the register pops it. With nothing queued the register keeps
 * returning the last value handed out.
 */
use super::*;
use crate::inspector::InspectionEvent;
use crate::memory::GenericMemory;
use crate::utils::{extract_bits, Fifo};
use num_derive::FromPrimitive;
use num_traits::FromPrimitive;

pub const CMD_DATA: u16 = 0x0C; // Command on write, oldest read result on read

pub const ROWS: usize = 32;
pub const COLUMNS: usize = 32;
pub const FIFO_DEPTH: usize = 16;

const CELLS_SIZE: usize = ROWS * COLUMNS * 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive)]
pub enum Operation {
    Read = 0b01,
    Program = 0b11,
}

/// Cycles an operation keeps the array busy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RamTiming {
    pub program_cycles: u32,
    pub read_cycles: u32,
}

impl Default for RamTiming {
    fn default() -> Self {
        Self {
            program_cycles: 200,
            read_cycles: 40,
        }
    }
}

impl RamTiming {
    fn latency(&self, operation: Operation) -> u32 {
        let cycles = match operation {
            Operation::Read => self.read_cycles,
            Operation::Program => self.program_cycles,
        };

        cycles.max(1)
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RamCommand(pub u32);

impl RamCommand {
    pub fn mode(&self) -> u32 {
        extract_bits(self.0, 30..=31)
    }

    pub fn row(&self) -> u32 {
        extract_bits(self.0, 25..=29)
    }

    pub fn column(&self) -> u32 {
        extract_bits(self.0, 20..=24)
    }

    pub fn data(&self) -> u32 {
        extract_bits(self.0, 0..=19)
    }

    pub fn operation(&self) -> Option<Operation> {
        Operation::from_u32(self.mode())
    }

    fn cell_address(&self) -> u32 {
        cell_address(self.row(), self.column())
    }
}

fn cell_address(row: u32, column: u32) -> u32 {
    (row * COLUMNS as u32 + column) * 4
}

struct Active {
    command: RamCommand,
    operation: Operation,
    remaining: u32,
}

pub struct RamWord {
    cells: GenericMemory<CELLS_SIZE>,
    commands: Fifo<u32, FIFO_DEPTH>,
    results: Fifo<u32, FIFO_DEPTH>,
    active: Option<Active>,
    last_result: u32,
    timing: RamTiming,
}

impl Default for RamWord {
    fn default() -> Self {
        Self::new(RamTiming::default())
    }
}

impl RamWord {
    pub fn new(timing: RamTiming) -> Self {
        Self {
            cells: GenericMemory::default(),
            commands: Fifo::default(),
            results: Fifo::default(),
            active: None,
            last_result: 0,
            timing,
        }
    }

    /// Direct look at a cell, bypassing the command interface.
    pub fn cell(&self, row: u32, column: u32) -> Option<u32> {
        if row as usize >= ROWS || column as usize >= COLUMNS {
            return None;
        }

        self.cells.read_u32(cell_address(row, column)).ok()
    }

    pub fn is_idle(&self) -> bool {
        self.active.is_none() && self.commands.is_empty()
    }

    pub fn pending_results(&self) -> usize {
        self.results.len()
    }

    fn start_next(&mut self) {
        while let Some(raw) = self.commands.pop() {
            let command = RamCommand(raw);

            match command.operation() {
                Some(operation) => {
                    self.active = Some(Active {
                        command,
                        operation,
                        remaining: self.timing.latency(operation),
                    });
                    return;
                }

                None => {
                    log::warn!(
                        "RAM word: undefined mode {:#04b} in command {:#010x}, dropped",
                        command.mode(),
                        raw
                    );
                }
            }
        }
    }

    fn execute(&mut self, active: Active, ctx: &PeripheralAccessContext) {
        let command = active.command;
        let address = command.cell_address();

        let result = match active.operation {
            Operation::Program => {
                // row/column are 5 bits wide, always inside the array
                self.cells.write_u32(address, command.data()).ok();
                None
            }

            Operation::Read => {
                let value = self.cells.read_u32(address).unwrap_or_default();
                if self.results.push(value).is_err() {
                    log::warn!("RAM word: result queue full, {value:#x} lost");
                }
                Some(value)
            }
        };

        ctx.inspector.emit(InspectionEvent::RamCommand {
            command: command.0,
            result,
            cycle: ctx.cycle,
        });
    }
}

impl Peripheral for RamWord {
    fn read(&mut self, address: u16, _ctx: &PeripheralAccessContext) -> PeripheralResult<u32> {
        match address {
            CMD_DATA => {
                if let Some(value) = self.results.pop() {
                    self.last_result = value;
                }
                Ok(self.last_result)
            }
            _ => Err(PeripheralError::OutOfBounds),
        }
    }

    fn write(
        &mut self,
        address: u16,
        value: u32,
        _ctx: &PeripheralAccessContext,
    ) -> PeripheralResult<()> {
        match address {
            CMD_DATA => self.commands.push(value).map_err(|_| PeripheralError::Busy),
            _ => Err(PeripheralError::OutOfBounds),
        }
    }

    fn tick(&mut self, ctx: &PeripheralAccessContext) {
        if let Some(mut active) = self.active.take() {
            if active.remaining > 1 {
                active.remaining -= 1;
                self.active = Some(active);
                return;
            }

            self.execute(active, ctx);
        }

        self.start_next();
    }

    fn reset(&mut self) {
        self.cells.fill(0);
        self.commands.clear();
        self.results.clear();
        self.active = None;
        self.last_result = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(ram: &mut RamWord, cycles: u32) {
        let ctx = PeripheralAccessContext::default();
        for _ in 0..cycles {
            ram.tick(&ctx);
        }
    }

    #[test]
    fn test_decode() {
        let cmd = RamCommand(0xCA40_0000);
        assert_eq!(cmd.operation(), Some(Operation::Program));
        assert_eq!((cmd.row(), cmd.column(), cmd.data()), (5, 4, 0));

        let cmd = RamCommand(0x4210_0000);
        assert_eq!(cmd.operation(), Some(Operation::Read));
        assert_eq!((cmd.row(), cmd.column()), (1, 1));

        assert_eq!(RamCommand(0x0000_0000).operation(), None);
        assert_eq!(RamCommand(0x8000_0000).operation(), None);
    }

    #[test]
    fn test_program_then_read() {
        let ctx = PeripheralAccessContext::default();
        let mut ram = RamWord::default();

        ram.write(CMD_DATA, 0xC210_00FF, &ctx).unwrap();
        ram.write(CMD_DATA, 0x4210_0000, &ctx).unwrap();

        // program still running, nothing to read yet
        run(&mut ram, 100);
        assert_eq!(ram.cell(1, 1), Some(0));
        assert_eq!(ram.read(CMD_DATA, &ctx), Ok(0));

        run(&mut ram, 200);
        assert!(ram.is_idle());
        assert_eq!(ram.cell(1, 1), Some(0xFF));
        assert_eq!(ram.read(CMD_DATA, &ctx), Ok(0xFF));
        // holds the last value
        assert_eq!(ram.read(CMD_DATA, &ctx), Ok(0xFF));
    }

    #[test]
    fn test_results_in_order() {
        let ctx = PeripheralAccessContext::default();
        let mut ram = RamWord::default();

        for word in [0xC210_00FF, 0xCA40_0000, 0x4A40_0000, 0x4210_0000] {
            ram.write(CMD_DATA, word, &ctx).unwrap();
        }
        run(&mut ram, 1000);

        assert_eq!(ram.pending_results(), 2);
        assert_eq!(ram.read(CMD_DATA, &ctx), Ok(0x00));
        assert_eq!(ram.read(CMD_DATA, &ctx), Ok(0xFF));
    }

    #[test]
    fn test_full_queue_is_busy() {
        let ctx = PeripheralAccessContext::default();
        let mut ram = RamWord::default();

        for _ in 0..FIFO_DEPTH {
            ram.write(CMD_DATA, 0xC000_0001, &ctx).unwrap();
        }
        assert_eq!(ram.write(CMD_DATA, 0xC000_0001, &ctx), Err(PeripheralError::Busy));

        // first command leaves the queue on the next tick
        run(&mut ram, 1);
        assert_eq!(ram.write(CMD_DATA, 0xC000_0001, &ctx), Ok(()));
    }

    #[test]
    fn test_undefined_mode_dropped() {
        let ctx = PeripheralAccessContext::default();
        let mut ram = RamWord::default();

        ram.write(CMD_DATA, 0x8210_00AA, &ctx).unwrap();
        ram.write(CMD_DATA, 0x0210_00AA, &ctx).unwrap();
        run(&mut ram, 10);

        assert!(ram.is_idle());
        assert_eq!(ram.cell(1, 1), Some(0));
        assert_eq!(ram.pending_results(), 0);
    }

    #[test]
    fn test_data_is_20_bits() {
        let ctx = PeripheralAccessContext::default();
        let mut ram = RamWord::new(RamTiming {
            program_cycles: 1,
            read_cycles: 1,
        });

        ram.write(CMD_DATA, 0xFFFF_FFFF, &ctx).unwrap();
        run(&mut ram, 4);
        assert_eq!(ram.cell(31, 31), Some(0xF_FFFF));
    }

    #[test]
    fn test_bad_offset() {
        let ctx = PeripheralAccessContext::default();
        let mut ram = RamWord::default();
        assert_eq!(ram.read(0x00, &ctx), Err(PeripheralError::OutOfBounds));
        assert_eq!(ram.write(0x10, 0, &ctx), Err(PeripheralError::OutOfBounds));
    }

    #[test]
    fn test_reset() {
        let ctx = PeripheralAccessContext::default();
        let mut ram = RamWord::default();
        ram.write(CMD_DATA, 0xC210_00FF, &ctx).unwrap();
        run(&mut ram, 300);

        ram.reset();
        assert_eq!(ram.cell(1, 1), Some(0));
        assert!(ram.is_idle());
    }
}

//! Common types and constants used in the library.

pub const MHZ: u64 = 1e6 as u64;

/// Management core clock, 25ns period.
pub const CORE_FREQUENCY: u64 = 40 * MHZ;

/// Number of user project pads.
pub const MPRJ_IO_PADS: usize = 38;

/// The pads are split over two serial configuration chains.
pub const MPRJ_IO_PADS_1: usize = 19;
pub const MPRJ_IO_PADS_2: usize = MPRJ_IO_PADS - MPRJ_IO_PADS_1;

/// Width of one pad configuration word.
pub const GPIO_CONFIG_BITS: usize = 13;

/// Housekeeping SPI chip select, held by the testbench until released.
pub const CSB_PAD: u8 = 3;

/// Cycles spent inside one firmware library call.
pub const API_CALL_CYCLES: u64 = 8;

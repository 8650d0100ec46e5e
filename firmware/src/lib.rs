#![cfg_attr(not(test), no_std)]
/**
 * @file lib.rs
 * @date 14/10/2026
 * @brief Bring-up firmware for the user project RAM word peripheral
 */
pub mod command;
pub mod delay;
pub mod lfsr;
pub mod platform;
pub mod register;
pub mod sequencer;

pub use command::{Command, Mode};
pub use delay::{Delay, SpinDelay};
pub use lfsr::Lfsr;
pub use platform::{GpioMode, Platform};
pub use register::{Mmio, Register, VolatileMmio};
pub use sequencer::{Capture, Sequencer, Stage, Variant, WaitConfig};

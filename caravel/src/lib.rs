/**
 * @file lib.rs
 * @date 14/10/2026
 * @brief Behavioral model of the Caravel management SoC and its user project
 */
pub mod bus;
pub mod caravel;
pub mod clock;
pub mod common;
pub mod error;
pub mod gpio;
pub mod inspector;
pub mod memory;
pub mod peripherals;

mod utils;

pub use caravel::{Caravel, CaravelConfig};
pub use error::Error as CaravelError;
pub use inspector::{InspectionEvent, Inspector, InspectorRef, Recorder};
pub use peripherals::ram_word::RamTiming;
pub type Result<T> = core::result::Result<T, CaravelError>;

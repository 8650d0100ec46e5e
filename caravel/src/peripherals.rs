/**
 * @file peripherals.rs
 * @date 14/10/2026
 * @brief Peripherals living in the user project wishbone window
 */
use crate::inspector::InspectorRef;

pub mod ram_word;

pub use ram_word::RamWord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeripheralError {
    OutOfBounds,
    /// Cannot accept the access yet, the bus keeps the cycle open.
    Busy,
}

pub type PeripheralResult<T> = std::result::Result<T, PeripheralError>;

#[derive(Default, Clone)]
pub struct PeripheralAccessContext {
    pub cycle: u64,
    pub inspector: InspectorRef,
}

pub trait Peripheral {
    /// Reads may have side effects (popping a result queue).
    fn read(&mut self, address: u16, ctx: &PeripheralAccessContext) -> PeripheralResult<u32>;

    fn write(
        &mut self,
        address: u16,
        value: u32,
        ctx: &PeripheralAccessContext,
    ) -> PeripheralResult<()>;

    /// Called once per core cycle.
    fn tick(&mut self, _ctx: &PeripheralAccessContext) {}

    fn reset(&mut self) {}
}

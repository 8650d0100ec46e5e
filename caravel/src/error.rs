use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    #[error("Management core halted at cycle {0}")]
    Halted(u64),

    #[error("Bus fault at address {0:#010X}")]
    BusFault(u32),

    #[error("Invalid GPIO pin: {0}")]
    InvalidPin(u8),
}

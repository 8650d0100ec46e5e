//! Firmware API of the management SoC as seen by the test.
//!
//! On silicon these are the `ManagmentGpio_*`, `GPIOs_*` and `User_enableIF`
//! routines of the firmware library. None of them report failure.

/// Pad configuration words, as shifted into the GPIO control chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum GpioMode {
    MgmtStdInputNopull = 0x0403,
    MgmtStdInputPulldown = 0x0C01,
    MgmtStdInputPullup = 0x0801,
    MgmtStdOutput = 0x1809,
    MgmtStdBidirectional = 0x1801,
    MgmtStdAnalog = 0x000B,
    UserStdInputNopull = 0x0402,
    UserStdInputPulldown = 0x0C00,
    UserStdInputPullup = 0x0800,
    UserStdOutput = 0x1808,
    UserStdBidirectional = 0x1800,
    UserStdOutMonitored = 0x1802,
    UserStdAnalog = 0x000A,
}

impl GpioMode {
    pub const fn bits(self) -> u16 {
        self as u16
    }
}

pub trait Platform {
    fn mgmt_gpio_output_enable(&mut self);
    fn mgmt_gpio_write(&mut self, value: bool);
    fn gpio_configure_all(&mut self, mode: GpioMode);
    /// Blocks until the configuration is shifted into the pads.
    fn gpio_load_configs(&mut self);
    /// Without this the user project never acknowledges a wishbone cycle.
    fn user_enable_interface(&mut self, enable: bool);
}

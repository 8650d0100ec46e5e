use crate::common::*;
use crate::utils::{extract_bit, extract_bits};
use num_derive::FromPrimitive;
use num_traits::FromPrimitive;

/// Known pad configuration words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive)]
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
    /// Decode a configuration word, `None` for words outside the table.
    pub fn from_bits(bits: u16) -> Option<Self> {
        Self::from_u16(bits)
    }
}

/// Power-on configuration of every pad.
pub const DEFAULT_CONFIG: u16 = GpioMode::MgmtStdInputNopull as u16;

/// The single management GPIO used as status flag.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ManagementGpio {
    output_enable: bool,
    value: bool,
}

impl ManagementGpio {
    pub fn enable_output(&mut self) {
        self.output_enable = true;
    }

    pub fn write(&mut self, value: bool) {
        self.value = value;
    }

    pub fn is_output(&self) -> bool {
        self.output_enable
    }

    /// What the testbench sees on the pad, undriven reads as low.
    pub fn pad(&self) -> bool {
        self.output_enable && self.value
    }
}

#[derive(Debug, Clone)]
pub struct GpioPin {
    index: u8,
    /// Written by the firmware, not yet shifted into the pad.
    pending: u16,
    /// Currently applied.
    active: u16,
    /// Level forced by the testbench, `None` when released.
    external: Option<bool>,
}

impl GpioPin {
    fn new(index: u8) -> Self {
        Self {
            index,
            pending: DEFAULT_CONFIG,
            active: DEFAULT_CONFIG,
            external: None,
        }
    }

    pub fn index(&self) -> u8 {
        self.index
    }

    pub fn pending(&self) -> u16 {
        self.pending
    }

    pub fn config(&self) -> u16 {
        self.active
    }

    pub fn mode(&self) -> Option<GpioMode> {
        GpioMode::from_bits(self.active)
    }

    pub fn is_management(&self) -> bool {
        extract_bit(self.active, 0) == 1
    }

    pub fn output_disable(&self) -> bool {
        extract_bit(self.active, 1) == 1
    }

    pub fn input_disable(&self) -> bool {
        extract_bit(self.active, 3) == 1
    }

    pub fn analog_enable(&self) -> bool {
        extract_bit(self.active, 5) == 1
    }

    pub fn digital_mode(&self) -> u16 {
        extract_bits(self.active, 10..=12)
    }

    pub fn external(&self) -> Option<bool> {
        self.external
    }

    pub fn drive(&mut self, value: bool) {
        self.external = Some(value);
    }

    pub fn release(&mut self) {
        self.external = None;
    }
}

#[derive(Debug, Clone)]
pub struct GpioController {
    pub mgmt: ManagementGpio,
    pub pins: Vec<GpioPin>,
}

impl Default for GpioController {
    fn default() -> Self {
        let pins = (0..MPRJ_IO_PADS as u8).map(GpioPin::new).collect();

        let mut result = Self {
            mgmt: ManagementGpio::default(),
            pins,
        };

        // the testbench keeps the housekeeping SPI deselected during boot
        result.pins[CSB_PAD as usize].drive(true);
        result
    }
}

impl GpioController {
    pub fn get_pin(&self, index: u8) -> crate::Result<&GpioPin> {
        self.pins
            .get(index as usize)
            .ok_or(crate::CaravelError::InvalidPin(index))
    }

    pub fn get_pin_mut(&mut self, index: u8) -> crate::Result<&mut GpioPin> {
        self.pins
            .get_mut(index as usize)
            .ok_or(crate::CaravelError::InvalidPin(index))
    }

    pub fn configure_all(&mut self, config: u16) {
        if GpioMode::from_bits(config).is_none() {
            log::warn!("Unknown GPIO configuration word {config:#06x}");
        }

        for pin in self.pins.iter_mut() {
            pin.pending = config;
        }
    }

    /// Shift cycles needed by [`Self::load_configs`], both chains run in parallel.
    pub fn load_cycles(&self) -> u64 {
        (MPRJ_IO_PADS_1.max(MPRJ_IO_PADS_2) * GPIO_CONFIG_BITS) as u64
    }

    pub fn load_configs(&mut self) {
        for pin in self.pins.iter_mut() {
            pin.active = pin.pending;
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

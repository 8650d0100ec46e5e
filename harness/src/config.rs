/**
 * @file config.rs
 * @date 14/10/2026
 * @brief Configuration handling for the harness.
 */
use caravel::{CaravelConfig, RamTiming};
use ram_word::WaitConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TestVariant {
    #[default]
    Word,
    Burst,
}

impl From<TestVariant> for ram_word::Variant {
    fn from(variant: TestVariant) -> Self {
        match variant {
            TestVariant::Word => ram_word::Variant::Word,
            TestVariant::Burst => ram_word::Variant::Burst,
        }
    }
}

/// Busy-wait lengths handed to the firmware.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct WaitCycles {
    pub settle: u32,
    pub drain: u32,
    pub program: u32,
    pub read: u32,
}

impl Default for WaitCycles {
    fn default() -> Self {
        let waits = WaitConfig::default();
        Self {
            settle: waits.settle_cycles,
            drain: waits.drain_cycles,
            program: waits.program_cycles,
            read: waits.read_cycles,
        }
    }
}

impl From<WaitCycles> for WaitConfig {
    fn from(waits: WaitCycles) -> Self {
        Self {
            settle_cycles: waits.settle,
            drain_cycles: waits.drain,
            program_cycles: waits.program,
            read_cycles: waits.read,
        }
    }
}

/// Latencies of the RAM model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct RamTimingConfig {
    pub program_cycles: u32,
    pub read_cycles: u32,
}

impl Default for RamTimingConfig {
    fn default() -> Self {
        let timing = RamTiming::default();
        Self {
            program_cycles: timing.program_cycles,
            read_cycles: timing.read_cycles,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HarnessConfig {
    pub timeout_cycles: u64,
    pub variant: TestVariant,
    pub waits: WaitCycles,
    pub ram: RamTimingConfig,
    /// Turning this off reproduces the stuck bus.
    pub enable_user_interface: bool,
    pub report_path: Option<String>,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            timeout_cycles: 500_000,
            variant: TestVariant::Word,
            waits: WaitCycles::default(),
            ram: RamTimingConfig::default(),
            enable_user_interface: true,
            report_path: None,
        }
    }
}

impl HarnessConfig {
    pub fn parse(path: &str) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Config::try_from(&HarnessConfig::default())?)
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix("HARNESS")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    pub fn caravel(&self) -> CaravelConfig {
        CaravelConfig {
            timeout_cycles: self.timeout_cycles,
            ram: RamTiming {
                program_cycles: self.ram.program_cycles,
                read_cycles: self.ram.read_cycles,
            },
        }
    }
}

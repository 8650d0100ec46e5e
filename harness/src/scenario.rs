/**
 * @file scenario.rs
 * @date 15/10/2026
 * @brief The RAM word bring-up test, as driven by the testbench
 */
use crate::config::{HarnessConfig, TestVariant};
use crate::env::{CaravelEnv, HarnessError};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub test: &'static str,
    pub variant: TestVariant,
    pub passed: bool,
    pub start_cycle: Option<u64>,
    pub csb_release_cycle: Option<u64>,
    pub end_cycle: Option<u64>,
    /// Cycles the firmware ran for.
    pub total_cycles: u64,
    pub elapsed_ns: u64,
    pub reads: Vec<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Configure, wait for the firmware to raise the management GPIO, release
/// CSB, then wait for the GPIO to drop. The read values are reported, not
/// judged.
pub fn ram_word(config: &HarnessConfig) -> Report {
    log::info!("[TEST] Starting ReRam_word test");
    let mut env = CaravelEnv::test_configure(config);

    let mut report = Report {
        test: "ram_word",
        variant: config.variant,
        passed: false,
        start_cycle: None,
        csb_release_cycle: None,
        end_cycle: None,
        total_cycles: env.firmware_cycles(),
        elapsed_ns: env.firmware_elapsed().as_nanos() as u64,
        reads: env.capture().as_slice().to_vec(),
        error: None,
    };

    if let Err(why) = run(&mut env, &mut report) {
        log::error!("[TEST] {why}");
        report.error = Some(why.to_string());
        return report;
    }

    report.passed = true;
    report
}

fn run(env: &mut CaravelEnv, report: &mut Report) -> Result<(), HarnessError> {
    report.start_cycle = Some(env.wait_mgmt_gpio(true)?);
    log::info!("[TEST] Start Write and Read.");

    report.csb_release_cycle = Some(env.release_csb()?);
    log::info!("[TEST] Processing Write and Read.");
    report.end_cycle = Some(env.wait_mgmt_gpio(false)?);

    log::info!("[TEST] Completed Write and Read");
    log::debug!("Captured reads: {:x?}", report.reads);
    Ok(())
}

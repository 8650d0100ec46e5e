/**
 * @file main.rs
 * @date 14/10/2026
 * @brief Runs the RAM word test on the simulated chip and prints a report.
 */
mod binding;
mod config;
mod env;
mod scenario;

const CONFIG_PATH: &str = "harness.toml";

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let path = std::env::args().nth(1).unwrap_or_else(|| CONFIG_PATH.to_string());
    let config = config::HarnessConfig::parse(&path)?;
    log::debug!("Config: {:?}", config);

    let report = scenario::ram_word(&config);
    let json = serde_json::to_string_pretty(&report)?;
    println!("{json}");

    if let Some(report_path) = &config.report_path {
        std::fs::write(report_path, &json)?;
        log::info!("Report written to {report_path}");
    }

    if !report.passed {
        anyhow::bail!("ram_word test failed after {} cycles", report.total_cycles);
    }

    Ok(())
}

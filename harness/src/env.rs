/**
 * @file env.rs
 * @date 14/10/2026
 * @brief Testbench view of the simulated chip
 *
 * The firmware is started by `test_configure` and runs until it returns or
 * the cycle budget is spent. The waits below then walk the recorded pad
 * history, a wait only succeeds when the level is reached before the timeout.
 */
use crate::binding::CoreBinding;
use crate::config::HarnessConfig;
use caravel::{Caravel, CaravelError, Recorder};
use ram_word::{Capture, Register, Sequencer, WaitConfig};
use std::cell::RefCell;
use std::rc::Rc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("Timeout after {cycles} cycles waiting for management GPIO = {}", *value as u8)]
    Timeout { value: bool, cycles: u64 },

    #[error("Simulation error: {0}")]
    Caravel(#[from] CaravelError),
}

pub struct CaravelEnv {
    soc: Rc<RefCell<Caravel>>,
    recorder: Rc<Recorder>,
    timeout_cycles: u64,
    /// Testbench time, in core cycles.
    cursor: u64,
    capture: Capture,
}

impl CaravelEnv {
    /// Build the chip and run the firmware on it.
    pub fn test_configure(config: &HarnessConfig) -> Self {
        let recorder = Rc::new(Recorder::default());
        let mut soc = Caravel::new(config.caravel());
        soc.set_inspector(recorder.clone());

        let mut env = Self {
            soc: Rc::new(RefCell::new(soc)),
            recorder,
            timeout_cycles: config.timeout_cycles,
            cursor: 0,
            capture: Capture::default(),
        };

        env.capture = env.run_firmware(config);
        env
    }

    fn run_firmware(&self, config: &HarnessConfig) -> Capture {
        let core = CoreBinding::new(Rc::clone(&self.soc));
        let waits: WaitConfig = config.waits.into();

        let mut sequencer = Sequencer::new(
            core.clone(),
            Register::ram_word(core.clone()),
            core,
            waits,
        );

        if config.enable_user_interface {
            return sequencer.run(config.variant.into());
        }

        log::warn!("User interface left disabled, the first bus access will never complete");
        sequencer.configure_gpio();
        let capture = match ram_word::Variant::from(config.variant) {
            ram_word::Variant::Word => sequencer.run_word(),
            ram_word::Variant::Burst => sequencer.run_burst(),
        };
        sequencer.finish();
        capture
    }

    pub fn capture(&self) -> &Capture {
        &self.capture
    }

    /// Cycles the firmware ran for.
    pub fn firmware_cycles(&self) -> u64 {
        self.soc.borrow().now()
    }

    /// Simulated time the firmware ran for.
    pub fn firmware_elapsed(&self) -> std::time::Duration {
        self.soc.borrow().clock.elapsed()
    }

    /// Pad level at `cycle`, low before the first transition.
    fn mgmt_gpio_at(&self, cycle: u64) -> bool {
        self.recorder
            .mgmt_gpio_trace()
            .iter()
            .take_while(|(at, _)| *at <= cycle)
            .last()
            .map(|(_, value)| *value)
            .unwrap_or(false)
    }

    /// Block until the management GPIO reads `value`, return the cycle it did.
    pub fn wait_mgmt_gpio(&mut self, value: bool) -> Result<u64, HarnessError> {
        if self.mgmt_gpio_at(self.cursor) == value {
            return Ok(self.cursor);
        }

        let reached = self
            .recorder
            .mgmt_gpio_trace()
            .into_iter()
            .find(|(at, v)| *at > self.cursor && *v == value && *at <= self.timeout_cycles);

        match reached {
            Some((cycle, _)) => {
                self.cursor = cycle;
                Ok(cycle)
            }
            None => {
                self.cursor = self.timeout_cycles;
                Err(HarnessError::Timeout {
                    value,
                    cycles: self.timeout_cycles,
                })
            }
        }
    }

    /// Stop driving CSB, return the testbench cycle it happened at.
    pub fn release_csb(&mut self) -> Result<u64, HarnessError> {
        self.soc.borrow_mut().release_csb()?;
        log::debug!("[{}] CSB released", self.cursor);
        Ok(self.cursor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wait_mgmt_gpio_sequence() {
        let mut env = CaravelEnv::test_configure(&HarnessConfig::default());

        assert!(!env.mgmt_gpio_at(0));
        let high = env.wait_mgmt_gpio(true).unwrap();
        assert!(high > 0);
        // already high, returns immediately
        assert_eq!(env.wait_mgmt_gpio(true).unwrap(), high);

        let low = env.wait_mgmt_gpio(false).unwrap();
        assert!(low > high);
        assert_eq!(env.capture().as_slice(), &[0xFF, 0x00, 0xFF]);
    }

    #[test]
    fn test_gpio_high_only_while_bus_active() {
        let env = CaravelEnv::test_configure(&HarnessConfig::default());
        let trace = env.recorder.mgmt_gpio_trace();
        let (high, low) = (trace[1].0, trace[2].0);

        for event in env.recorder.events() {
            if let caravel::InspectionEvent::BusStore { cycle, .. }
            | caravel::InspectionEvent::BusLoad { cycle, .. } = event
            {
                assert!(cycle > high && cycle < low);
            }
        }
    }

    #[test]
    fn test_disabled_interface_times_out() {
        let config = HarnessConfig {
            timeout_cycles: 20_000,
            enable_user_interface: false,
            ..Default::default()
        };
        let mut env = CaravelEnv::test_configure(&config);

        assert_eq!(env.firmware_cycles(), 20_000);
        assert!(env.wait_mgmt_gpio(true).is_ok());
        assert!(matches!(
            env.wait_mgmt_gpio(false),
            Err(HarnessError::Timeout { value: false, cycles: 20_000 })
        ));
        assert_eq!(env.capture().as_slice(), &[0, 0, 0]);
    }

    #[test]
    fn test_release_csb() {
        let mut env = CaravelEnv::test_configure(&HarnessConfig::default());
        env.release_csb().unwrap();
        assert_eq!(
            env.soc.borrow().gpio.get_pin(caravel::common::CSB_PAD).unwrap().external(),
            None
        );
    }
}

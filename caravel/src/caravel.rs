/**
 * @file caravel.rs
 * @date 14/10/2026
 * @brief The management SoC as seen from the firmware running on it
 *
 * Every core-side call consumes simulated cycles. The whole run is bounded
 * by a cycle budget: once it is used up the core is halted and every further
 * call fails with `Error::Halted`, which is how a wedged bus shows up.
 */
use crate::bus::{Bus, LoadStatus, StoreStatus};
use crate::clock::Clock;
use crate::common::*;
use crate::gpio::GpioController;
use crate::inspector::{InspectionEvent, Inspector, InspectorRef};
use crate::peripherals::ram_word::RamTiming;
use crate::peripherals::{PeripheralAccessContext, RamWord};
use crate::{CaravelError, Result};
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaravelConfig {
    /// Cycle budget of the run.
    pub timeout_cycles: u64,
    pub ram: RamTiming,
}

impl Default for CaravelConfig {
    fn default() -> Self {
        Self {
            timeout_cycles: 500_000,
            ram: RamTiming::default(),
        }
    }
}

pub struct Caravel {
    pub clock: Clock,
    pub bus: Bus,
    pub gpio: GpioController,
    config: CaravelConfig,
    inspector: InspectorRef,
    halted: bool,
}

impl Default for Caravel {
    fn default() -> Self {
        Self::new(CaravelConfig::default())
    }
}

impl Caravel {
    pub fn new(config: CaravelConfig) -> Self {
        Self {
            clock: Clock::default(),
            bus: Bus::new(RamWord::new(config.ram)),
            gpio: GpioController::default(),
            config,
            inspector: InspectorRef::default(),
            halted: false,
        }
    }

    pub fn set_inspector(&mut self, inspector: Rc<dyn Inspector>) {
        self.inspector.set_inspector(inspector);
    }

    pub fn now(&self) -> u64 {
        self.clock.ticks()
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    pub fn reset(&mut self) {
        self.clock = Clock::default();
        self.bus.reset();
        self.gpio.reset();
        self.halted = false;
    }

    fn context(&self) -> PeripheralAccessContext {
        PeripheralAccessContext {
            cycle: self.clock.ticks(),
            inspector: self.inspector.clone(),
        }
    }

    fn emit(&self, event: InspectionEvent) {
        self.inspector.emit(event);
    }

    fn check_running(&self) -> Result<()> {
        if self.halted {
            return Err(CaravelError::Halted(self.now()));
        }

        Ok(())
    }

    /// Advance one cycle.
    pub fn tick(&mut self) -> Result<()> {
        self.check_running()?;

        if self.clock.ticks() >= self.config.timeout_cycles {
            self.halted = true;
            self.emit(InspectionEvent::Halted { cycle: self.now() });
            return Err(CaravelError::Halted(self.now()));
        }

        self.clock.tick();
        let ctx = self.context();
        self.bus.tick(&ctx);

        Ok(())
    }

    /// Keep the core busy for `cycles` cycles.
    pub fn stall(&mut self, cycles: u64) -> Result<()> {
        self.check_running()?;
        self.emit(InspectionEvent::Stall {
            cycles,
            cycle: self.now(),
        });

        for _ in 0..cycles {
            self.tick()?;
        }

        Ok(())
    }

    pub fn store(&mut self, address: u32, value: u32) -> Result<()> {
        self.check_running()?;

        let status = self
            .bus
            .store(address, value)
            .map_err(|_| CaravelError::BusFault(address))?;

        loop {
            self.tick()?;

            let current = *status.borrow();
            match current {
                StoreStatus::Waiting => continue,
                StoreStatus::Done => break,
                StoreStatus::Error(_) => return Err(CaravelError::BusFault(address)),
            }
        }

        self.emit(InspectionEvent::BusStore {
            address,
            value,
            cycle: self.now(),
        });

        Ok(())
    }

    pub fn load(&mut self, address: u32) -> Result<u32> {
        self.check_running()?;

        let status = self
            .bus
            .load(address)
            .map_err(|_| CaravelError::BusFault(address))?;

        let value = loop {
            self.tick()?;

            let current = *status.borrow();
            match current {
                LoadStatus::Waiting => continue,
                LoadStatus::Done(value) => break value,
                LoadStatus::Error(_) => return Err(CaravelError::BusFault(address)),
            }
        };

        self.emit(InspectionEvent::BusLoad {
            address,
            value,
            cycle: self.now(),
        });

        Ok(value)
    }

    pub fn mgmt_gpio_output_enable(&mut self) -> Result<()> {
        self.stall(API_CALL_CYCLES)?;
        self.gpio.mgmt.enable_output();
        Ok(())
    }

    pub fn mgmt_gpio_write(&mut self, value: bool) -> Result<()> {
        self.stall(API_CALL_CYCLES)?;
        self.gpio.mgmt.write(value);

        self.emit(InspectionEvent::MgmtGpio {
            value: self.gpio.mgmt.pad(),
            cycle: self.now(),
        });
        Ok(())
    }

    /// What the testbench sees on the management GPIO pad.
    pub fn mgmt_gpio(&self) -> bool {
        self.gpio.mgmt.pad()
    }

    pub fn gpio_configure_all(&mut self, config: u16) -> Result<()> {
        self.stall(API_CALL_CYCLES)?;
        self.gpio.configure_all(config);

        self.emit(InspectionEvent::GpioConfigure {
            mode: config,
            cycle: self.now(),
        });
        Ok(())
    }

    /// Blocks until the configuration is shifted out.
    pub fn gpio_load_configs(&mut self) -> Result<()> {
        self.stall(API_CALL_CYCLES + self.gpio.load_cycles())?;
        self.gpio.load_configs();

        self.emit(InspectionEvent::GpioConfigsLoaded { cycle: self.now() });
        Ok(())
    }

    pub fn user_enable_interface(&mut self, enable: bool) -> Result<()> {
        self.stall(API_CALL_CYCLES)?;
        self.bus.set_user_interface(enable);

        self.emit(InspectionEvent::UserInterface {
            enabled: enable,
            cycle: self.now(),
        });
        Ok(())
    }

    /// Testbench side: stop driving the housekeeping SPI chip select.
    pub fn release_csb(&mut self) -> Result<()> {
        self.gpio.get_pin_mut(CSB_PAD)?.release();
        Ok(())
    }
}

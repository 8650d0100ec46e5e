/**
 * @file binding.rs
 * @date 14/10/2026
 * @brief Runs the firmware against the SoC model
 *
 * The firmware cannot see a hang. Once the model halts, every call returns
 * immediately and reads come back as zero, the testbench notices the timeout
 * on its own.
 */
use caravel::{Caravel, CaravelError};
use ram_word::{Delay, GpioMode, Mmio, Platform};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Clone)]
pub struct CoreBinding {
    soc: Rc<RefCell<Caravel>>,
}

impl CoreBinding {
    pub fn new(soc: Rc<RefCell<Caravel>>) -> Self {
        Self { soc }
    }

    fn call<T: Default>(
        &self,
        name: &str,
        f: impl FnOnce(&mut Caravel) -> caravel::Result<T>,
    ) -> T {
        let mut soc = self.soc.borrow_mut();

        match f(&mut soc) {
            Ok(value) => value,
            Err(CaravelError::Halted(cycle)) => {
                log::trace!("{name} ignored, core halted at cycle {cycle}");
                T::default()
            }
            Err(why) => {
                log::error!("{name} failed: {why}");
                T::default()
            }
        }
    }
}

impl Mmio for CoreBinding {
    fn read_u32(&self, address: u32) -> u32 {
        self.call("load", |soc| soc.load(address))
    }

    fn write_u32(&self, address: u32, value: u32) {
        self.call("store", |soc| soc.store(address, value))
    }
}

impl Delay for CoreBinding {
    fn wait_cycles(&mut self, cycles: u32) {
        self.call("wait_cycles", |soc| soc.stall(cycles as u64))
    }
}

impl Platform for CoreBinding {
    fn mgmt_gpio_output_enable(&mut self) {
        self.call("ManagmentGpio_outputEnable", |soc| soc.mgmt_gpio_output_enable())
    }

    fn mgmt_gpio_write(&mut self, value: bool) {
        self.call("ManagmentGpio_write", |soc| soc.mgmt_gpio_write(value))
    }

    fn gpio_configure_all(&mut self, mode: GpioMode) {
        self.call("GPIOs_configureAll", |soc| soc.gpio_configure_all(mode.bits()))
    }

    fn gpio_load_configs(&mut self) {
        self.call("GPIOs_loadConfigs", |soc| soc.gpio_load_configs())
    }

    fn user_enable_interface(&mut self, enable: bool) {
        self.call("User_enableIF", |soc| soc.user_enable_interface(enable))
    }
}

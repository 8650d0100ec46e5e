/**
 * @file sequencer.rs
 * @date 14/10/2026
 * @brief Ordered bring-up of the RAM word test
 *
 * Init -> GpioConfigured -> InterfaceEnabled -> Running -> Done
 *
 * The management GPIO is the only thing the outside world can see: it is
 * low until the bus is usable, high while the sequence runs, low again once
 * the last read returned. Nothing here judges the data, the captured values
 * are checked by whoever drives the simulation.
 */
use crate::command::{BURST_LEN, Mode, burst_command};
use crate::delay::Delay;
use crate::platform::{GpioMode, Platform};
use crate::register::{Mmio, Register};

/// Program row 1 / column 1 with 0xFF.
pub const WORD_PROGRAM: u32 = 0xC210_00FF;
/// Read back row 1 / column 1.
pub const WORD_READ: u32 = 0x4210_0000;
/// Program row 5 / column 4 with 0x00.
pub const WORD_PROGRAM_2: u32 = 0xCA40_0000;
/// Read back row 5 / column 4.
pub const WORD_READ_2: u32 = 0x4A40_0000;

pub const MAX_CAPTURE: usize = BURST_LEN as usize;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    #[default]
    Init,
    GpioConfigured,
    InterfaceEnabled,
    Running,
    Done,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// Two single-word program/read rounds.
    #[default]
    Word,
    /// Ten programs, ten reads, ten read-backs.
    Burst,
}

/// Busy-wait lengths, in delay loop iterations.
///
/// The defaults were tuned on the simulation and are not derived from the
/// peripheral timing, keep them unless the RTL changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitConfig {
    /// After the first program/read pair of the word test.
    pub settle_cycles: u32,
    /// After the second batch of the word test.
    pub drain_cycles: u32,
    /// After the program burst.
    pub program_cycles: u32,
    /// After the read burst.
    pub read_cycles: u32,
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self {
            settle_cycles: 300,
            drain_cycles: 900,
            program_cycles: 3000,
            read_cycles: 500,
        }
    }
}

/// Values returned by the register reads, in read order.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Capture {
    values: [u32; MAX_CAPTURE],
    len: usize,
}

impl Capture {
    fn push(&mut self, value: u32) {
        if self.len < MAX_CAPTURE {
            self.values[self.len] = value;
            self.len += 1;
        }
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.values[..self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

pub struct Sequencer<P: Platform, M: Mmio, D: Delay> {
    platform: P,
    register: Register<M>,
    delay: D,
    waits: WaitConfig,
    stage: Stage,
}

impl<P: Platform, M: Mmio, D: Delay> Sequencer<P, M, D> {
    pub fn new(platform: P, register: Register<M>, delay: D, waits: WaitConfig) -> Self {
        Self {
            platform,
            register,
            delay,
            waits,
            stage: Stage::Init,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    fn advance(&mut self, stage: Stage) {
        log::debug!("Sequencer: {:?} -> {:?}", self.stage, stage);
        self.stage = stage;
    }

    /// Status GPIO as output and low, every pad to user output (monitored).
    pub fn configure_gpio(&mut self) {
        self.platform.mgmt_gpio_output_enable();
        self.platform.mgmt_gpio_write(false);
        self.platform.gpio_configure_all(GpioMode::UserStdOutMonitored);
        self.platform.gpio_load_configs();
        self.advance(Stage::GpioConfigured);
    }

    /// Must happen before the first register access, otherwise the access
    /// is never acknowledged.
    pub fn enable_interface(&mut self) {
        self.platform.user_enable_interface(true);
        self.advance(Stage::InterfaceEnabled);
    }

    fn start(&mut self) {
        self.platform.mgmt_gpio_write(true);
        self.advance(Stage::Running);
    }

    pub fn run_word(&mut self) -> Capture {
        let mut capture = Capture::default();
        self.start();

        self.register.write(WORD_PROGRAM);
        self.register.write(WORD_READ);
        self.delay.wait_cycles(self.waits.settle_cycles);
        capture.push(self.register.read());

        self.register.write(WORD_PROGRAM_2);
        self.register.write(WORD_READ_2);
        self.register.write(WORD_READ);
        self.delay.wait_cycles(self.waits.drain_cycles);
        capture.push(self.register.read());
        capture.push(self.register.read());

        capture
    }

    pub fn run_burst(&mut self) -> Capture {
        let mut capture = Capture::default();
        self.start();

        for i in 0..BURST_LEN {
            self.register.write(burst_command(Mode::Program, i).encode());
        }
        self.delay.wait_cycles(self.waits.program_cycles);

        for i in 0..BURST_LEN {
            self.register.write(burst_command(Mode::Read, i).encode());
        }
        self.delay.wait_cycles(self.waits.read_cycles);

        for _ in 0..BURST_LEN {
            capture.push(self.register.read());
        }

        capture
    }

    /// Drop the status GPIO, the harness takes this as "finished".
    pub fn finish(&mut self) {
        self.platform.mgmt_gpio_write(false);
        self.advance(Stage::Done);
    }

    pub fn run(&mut self, variant: Variant) -> Capture {
        self.configure_gpio();
        self.enable_interface();

        let capture = match variant {
            Variant::Word => self.run_word(),
            Variant::Burst => self.run_burst(),
        };

        self.finish();
        capture
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::register::tests::{Access, RecordingMmio};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Step {
        Bus(Access),
        Wait(u32),
        OutputEnable,
        Gpio(bool),
        Configure(GpioMode),
        Load,
        Interface(bool),
    }

    type Trace = Rc<RefCell<Vec<Step>>>;

    struct TracePlatform(Trace);

    impl Platform for TracePlatform {
        fn mgmt_gpio_output_enable(&mut self) {
            self.0.borrow_mut().push(Step::OutputEnable);
        }

        fn mgmt_gpio_write(&mut self, value: bool) {
            self.0.borrow_mut().push(Step::Gpio(value));
        }

        fn gpio_configure_all(&mut self, mode: GpioMode) {
            self.0.borrow_mut().push(Step::Configure(mode));
        }

        fn gpio_load_configs(&mut self) {
            self.0.borrow_mut().push(Step::Load);
        }

        fn user_enable_interface(&mut self, enable: bool) {
            self.0.borrow_mut().push(Step::Interface(enable));
        }
    }

    struct TraceDelay(Trace);

    impl Delay for TraceDelay {
        fn wait_cycles(&mut self, cycles: u32) {
            self.0.borrow_mut().push(Step::Wait(cycles));
        }
    }

    struct TraceMmio(Trace, RecordingMmio);

    impl Mmio for TraceMmio {
        fn read_u32(&self, address: u32) -> u32 {
            self.0.borrow_mut().push(Step::Bus(Access::Read(address)));
            self.1.read_u32(address)
        }

        fn write_u32(&self, address: u32, value: u32) {
            self.0.borrow_mut().push(Step::Bus(Access::Write(address, value)));
            self.1.write_u32(address, value)
        }
    }

    fn sequencer(answers: &[u32]) -> (Sequencer<TracePlatform, TraceMmio, TraceDelay>, Trace) {
        let trace = Trace::default();
        let mmio = RecordingMmio::default();
        mmio.answers.borrow_mut().extend_from_slice(answers);

        let sequencer = Sequencer::new(
            TracePlatform(trace.clone()),
            Register::ram_word(TraceMmio(trace.clone(), mmio)),
            TraceDelay(trace.clone()),
            WaitConfig::default(),
        );

        (sequencer, trace)
    }

    const REG: u32 = 0x3000_000C;

    #[test]
    fn test_word_sequence() {
        let (mut seq, trace) = sequencer(&[0xFF, 0x00, 0xFF]);
        assert_eq!(seq.stage(), Stage::Init);

        let capture = seq.run(Variant::Word);
        assert_eq!(seq.stage(), Stage::Done);
        assert_eq!(capture.as_slice(), &[0xFF, 0x00, 0xFF]);

        assert_eq!(
            *trace.borrow(),
            vec![
                Step::OutputEnable,
                Step::Gpio(false),
                Step::Configure(GpioMode::UserStdOutMonitored),
                Step::Load,
                Step::Interface(true),
                Step::Gpio(true),
                Step::Bus(Access::Write(REG, 0xC210_00FF)),
                Step::Bus(Access::Write(REG, 0x4210_0000)),
                Step::Wait(300),
                Step::Bus(Access::Read(REG)),
                Step::Bus(Access::Write(REG, 0xCA40_0000)),
                Step::Bus(Access::Write(REG, 0x4A40_0000)),
                Step::Bus(Access::Write(REG, 0x4210_0000)),
                Step::Wait(900),
                Step::Bus(Access::Read(REG)),
                Step::Bus(Access::Read(REG)),
                Step::Gpio(false),
            ]
        );
    }

    #[test]
    fn test_burst_sequence() {
        let (mut seq, trace) = sequencer(&[]);
        let capture = seq.run(Variant::Burst);
        assert_eq!(capture.len(), 10);

        let trace = trace.borrow();
        let writes: Vec<u32> = trace
            .iter()
            .filter_map(|step| match step {
                Step::Bus(Access::Write(_, value)) => Some(*value),
                _ => None,
            })
            .collect();

        assert_eq!(writes.len(), 20);
        assert_eq!(writes[0], 0xC000_00FF);
        assert_eq!(writes[1], 0xC210_0000);
        assert_eq!(writes[10], 0x4000_00FF);
        assert_eq!(writes[19], 0x5290_0000);

        let waits: Vec<u32> = trace
            .iter()
            .filter_map(|step| match step {
                Step::Wait(cycles) => Some(*cycles),
                _ => None,
            })
            .collect();
        assert_eq!(waits, vec![3000, 500]);

        // the gpio stays high for the whole burst
        let first_bus = trace.iter().position(|s| matches!(s, Step::Bus(_))).unwrap();
        let last_bus = trace.iter().rposition(|s| matches!(s, Step::Bus(_))).unwrap();
        assert_eq!(trace[first_bus - 1], Step::Gpio(true));
        assert_eq!(trace[last_bus + 1], Step::Gpio(false));
    }

    #[test]
    fn test_custom_waits() {
        let trace = Trace::default();
        let waits = WaitConfig {
            settle_cycles: 10,
            drain_cycles: 20,
            ..Default::default()
        };

        let mut seq = Sequencer::new(
            TracePlatform(trace.clone()),
            Register::ram_word(TraceMmio(trace.clone(), RecordingMmio::default())),
            TraceDelay(trace.clone()),
            waits,
        );
        seq.run(Variant::Word);

        assert!(trace.borrow().contains(&Step::Wait(10)));
        assert!(trace.borrow().contains(&Step::Wait(20)));
        assert!(!trace.borrow().contains(&Step::Wait(300)));
    }

    #[test]
    fn test_stage_transitions() {
        let (mut seq, _trace) = sequencer(&[]);
        seq.configure_gpio();
        assert_eq!(seq.stage(), Stage::GpioConfigured);
        seq.enable_interface();
        assert_eq!(seq.stage(), Stage::InterfaceEnabled);
        seq.run_word();
        assert_eq!(seq.stage(), Stage::Running);
        seq.finish();
        assert_eq!(seq.stage(), Stage::Done);
    }
}

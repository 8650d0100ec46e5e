use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InspectionEvent {
    BusStore {
        address: u32,
        value: u32,
        cycle: u64,
    },
    BusLoad {
        address: u32,
        value: u32,
        cycle: u64,
    },
    MgmtGpio {
        value: bool,
        cycle: u64,
    },
    GpioConfigure {
        mode: u16,
        cycle: u64,
    },
    GpioConfigsLoaded {
        cycle: u64,
    },
    UserInterface {
        enabled: bool,
        cycle: u64,
    },
    RamCommand {
        command: u32,
        result: Option<u32>,
        cycle: u64,
    },
    Stall {
        cycles: u64,
        cycle: u64,
    },
    Halted {
        cycle: u64,
    },
}

impl InspectionEvent {
    pub fn cycle(&self) -> u64 {
        match self {
            InspectionEvent::BusStore { cycle, .. }
            | InspectionEvent::BusLoad { cycle, .. }
            | InspectionEvent::MgmtGpio { cycle, .. }
            | InspectionEvent::GpioConfigure { cycle, .. }
            | InspectionEvent::GpioConfigsLoaded { cycle }
            | InspectionEvent::UserInterface { cycle, .. }
            | InspectionEvent::RamCommand { cycle, .. }
            | InspectionEvent::Stall { cycle, .. }
            | InspectionEvent::Halted { cycle } => *cycle,
        }
    }
}

pub trait Inspector {
    fn handle_event(&self, event: InspectionEvent);
}

#[derive(Clone)]
pub struct InspectorRef {
    inspector: Rc<dyn Inspector>,
}

impl Default for InspectorRef {
    fn default() -> Self {
        Self {
            inspector: Rc::new(DummyInspector),
        }
    }
}

impl Inspector for InspectorRef {
    fn handle_event(&self, event: InspectionEvent) {
        self.inspector.handle_event(event);
    }
}

impl InspectorRef {
    pub fn set_inspector(&mut self, inspector: Rc<dyn Inspector>) {
        self.inspector = inspector;
    }

    pub fn emit(&self, event: InspectionEvent) {
        self.inspector.handle_event(event);
    }
}

pub struct DummyInspector;

impl Inspector for DummyInspector {
    fn handle_event(&self, event: InspectionEvent) {
        match event {
            InspectionEvent::BusStore {
                address,
                value,
                cycle,
            } => {
                log::debug!("[{cycle}] Store {value:#010x} -> {address:#010x}");
            }

            InspectionEvent::BusLoad {
                address,
                value,
                cycle,
            } => {
                log::debug!("[{cycle}] Load {address:#010x} -> {value:#010x}");
            }

            InspectionEvent::MgmtGpio { value, cycle } => {
                log::info!("[{cycle}] Management GPIO: {}", value as u8);
            }

            InspectionEvent::GpioConfigure { mode, cycle } => {
                log::debug!("[{cycle}] GPIO configure all: {mode:#06x}");
            }

            InspectionEvent::GpioConfigsLoaded { cycle } => {
                log::debug!("[{cycle}] GPIO configuration loaded");
            }

            InspectionEvent::UserInterface { enabled, cycle } => {
                log::info!("[{cycle}] User interface enabled: {enabled}");
            }

            InspectionEvent::RamCommand {
                command,
                result,
                cycle,
            } => match result {
                Some(value) => {
                    log::debug!("[{cycle}] RAM command {command:#010x} returned {value:#x}")
                }
                None => log::debug!("[{cycle}] RAM command {command:#010x} done"),
            },

            InspectionEvent::Stall { cycles, cycle } => {
                log::trace!("[{cycle}] Stall for {cycles} cycles");
            }

            InspectionEvent::Halted { cycle } => {
                log::warn!("[{cycle}] Management core halted, cycle budget exhausted");
            }
        }
    }
}

/// Keeps every event, logs them through [`DummyInspector`] as well.
#[derive(Default)]
pub struct Recorder {
    events: RefCell<Vec<InspectionEvent>>,
}

impl Inspector for Recorder {
    fn handle_event(&self, event: InspectionEvent) {
        DummyInspector.handle_event(event.clone());
        self.events.borrow_mut().push(event);
    }
}

impl Recorder {
    pub fn events(&self) -> Vec<InspectionEvent> {
        self.events.borrow().clone()
    }

    /// Management GPIO transitions as `(cycle, value)`.
    pub fn mgmt_gpio_trace(&self) -> Vec<(u64, bool)> {
        self.events
            .borrow()
            .iter()
            .filter_map(|event| match event {
                InspectionEvent::MgmtGpio { value, cycle } => Some((*cycle, *value)),
                _ => None,
            })
            .collect()
    }

    /// Values returned by bus loads, in order.
    pub fn loads(&self) -> Vec<u32> {
        self.events
            .borrow()
            .iter()
            .filter_map(|event| match event {
                InspectionEvent::BusLoad { value, .. } => Some(*value),
                _ => None,
            })
            .collect()
    }
}

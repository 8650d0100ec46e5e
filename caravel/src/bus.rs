use crate::peripherals::*;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusError {
    BusFault,
    LoadError,
    StoreError,
}

type BusResult<T> = Result<T, BusError>;

/// Status of a load transaction
/// this will be wrapped in a RC<RefCell<>> so the core can poll it
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    #[default]
    Waiting,
    Done(u32),
    Error(BusError),
}

/// Status of a store transaction
/// this will be wrapped in a RC<RefCell<>> so the core can poll it
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum StoreStatus {
    #[default]
    Waiting,
    Done,
    Error(BusError),
}

enum StatusType {
    Load(Rc<RefCell<LoadStatus>>),
    Store(u32, Rc<RefCell<StoreStatus>>),
}

struct Status {
    address: u32,
    wait_cycles: u8,
    status: StatusType,
}

/// Wishbone interconnect between the management core and the user project.
///
/// Only one transaction is in flight at a time. A cycle towards the user
/// project completes when the user project acknowledges it, which never
/// happens while the interface is disabled or when nothing is mapped at the
/// address.
#[derive(Default)]
pub struct Bus {
    pub ram_word: RamWord,
    user_interface: bool,
    access: Option<Status>,
}

impl Bus {
    // Address Map
    pub const USER_SPACE: u32 = 0x3000_0000;
    pub const RAM_WORD: u32 = 0x3000_0000;

    pub fn new(ram_word: RamWord) -> Self {
        Self {
            ram_word,
            ..Default::default()
        }
    }

    pub fn set_user_interface(&mut self, enabled: bool) {
        self.user_interface = enabled;
    }

    pub fn is_busy(&self) -> bool {
        self.access.is_some()
    }

    pub fn reset(&mut self) {
        self.ram_word.reset();
        self.user_interface = false;
        self.access = None;
    }

    pub fn tick(&mut self, ctx: &PeripheralAccessContext) {
        self.ram_word.tick(ctx);

        if let Some(status) = self.access.take() {
            self.access = self.update_status(status, ctx);
        }
    }

    fn update_status(
        &mut self,
        mut status: Status,
        ctx: &PeripheralAccessContext,
    ) -> Option<Status> {
        if status.wait_cycles > 1 {
            status.wait_cycles -= 1;
            return Some(status);
        }

        // no ack from the user project, the cycle stays open
        if !self.user_interface {
            return Some(status);
        }

        let Some(peripheral) = self.find_peripheral_mut(status.address) else {
            return Some(status);
        };
        let offset = (status.address & 0xFF) as u16;

        let done = match &status.status {
            StatusType::Load(load_status) => match peripheral.read(offset, ctx) {
                Err(PeripheralError::Busy) => false,
                result => {
                    *load_status.borrow_mut() = match result {
                        Ok(v) => LoadStatus::Done(v),
                        Err(_e) => LoadStatus::Error(BusError::LoadError),
                    };
                    true
                }
            },

            StatusType::Store(value, store_status) => {
                match peripheral.write(offset, *value, ctx) {
                    Err(PeripheralError::Busy) => false,
                    result => {
                        *store_status.borrow_mut() = match result {
                            Ok(_) => StoreStatus::Done,
                            Err(_e) => StoreStatus::Error(BusError::StoreError),
                        };
                        true
                    }
                }
            }
        };

        if done { None } else { Some(status) }
    }

    /// Call by a load instruction
    pub fn load(&mut self, address: u32) -> BusResult<Rc<RefCell<LoadStatus>>> {
        self.check_address(address)?;

        let load_status = Rc::new(RefCell::new(LoadStatus::Waiting));

        self.access = Some(Status {
            address,
            wait_cycles: Self::address_cycle().0,
            status: StatusType::Load(Rc::clone(&load_status)),
        });

        Ok(load_status)
    }

    /// Call by a store instruction
    pub fn store(&mut self, address: u32, value: u32) -> BusResult<Rc<RefCell<StoreStatus>>> {
        self.check_address(address)?;

        let store_status = Rc::new(RefCell::new(StoreStatus::Waiting));

        self.access = Some(Status {
            address,
            wait_cycles: Self::address_cycle().1,
            status: StatusType::Store(value, Rc::clone(&store_status)),
        });

        Ok(store_status)
    }

    /// Cycle required for read and write access
    fn address_cycle() -> (u8, u8) {
        (3, 4)
    }

    fn check_address(&self, address: u32) -> BusResult<()> {
        if self.access.is_some() {
            // the core stalls on every access, a second one cannot be issued
            return Err(BusError::BusFault);
        }

        if address & 0b11 != 0 || address & 0xF000_0000 != Self::USER_SPACE {
            return Err(BusError::BusFault);
        }

        Ok(())
    }

    fn find_peripheral_mut(&mut self, address: u32) -> Option<&mut dyn Peripheral> {
        match address & 0xFFFF_FF00 {
            Self::RAM_WORD => Some(&mut self.ram_word as &mut dyn Peripheral),
            _ => None,
        }
    }
}

//! Memory mapped register access.
//!
//! Every call on [`Mmio`] is exactly one 32-bit bus transaction. Nothing is
//! cached and accesses are issued in program order, so two writes to the same
//! register reach the peripheral in the order they were written.

/// Base of the user project wishbone window.
pub const USER_SPACE_BASE: u32 = 0x3000_0000;

/// Command / data register of the RAM word peripheral.
pub const RAM_WORD_REGISTER: u32 = USER_SPACE_BASE + 0x0C;

pub trait Mmio {
    fn read_u32(&self, address: u32) -> u32;
    fn write_u32(&self, address: u32, value: u32);
}

impl<T: Mmio + ?Sized> Mmio for &T {
    fn read_u32(&self, address: u32) -> u32 {
        (**self).read_u32(address)
    }

    fn write_u32(&self, address: u32, value: u32) {
        (**self).write_u32(address, value)
    }
}

/// Direct volatile access to the physical address space of the management core.
#[derive(Debug, Clone, Copy)]
pub struct VolatileMmio {
    _private: (),
}

impl VolatileMmio {
    /// # Safety
    ///
    /// The caller must be running on the target, where every address handed
    /// to this accessor is a valid, aligned MMIO location.
    pub const unsafe fn new() -> Self {
        Self { _private: () }
    }
}

impl Mmio for VolatileMmio {
    fn read_u32(&self, address: u32) -> u32 {
        // SAFETY: guaranteed by the contract of `VolatileMmio::new`
        unsafe { core::ptr::read_volatile(address as usize as *const u32) }
    }

    fn write_u32(&self, address: u32, value: u32) {
        // SAFETY: guaranteed by the contract of `VolatileMmio::new`
        unsafe { core::ptr::write_volatile(address as usize as *mut u32, value) }
    }
}

/// Handle bound to a single register.
///
/// A handle never changes its address.
#[derive(Debug, Clone)]
pub struct Register<M: Mmio> {
    mmio: M,
    address: u32,
}

impl<M: Mmio> Register<M> {
    pub const fn new(mmio: M, address: u32) -> Self {
        Self { mmio, address }
    }

    pub fn address(&self) -> u32 {
        self.address
    }

    pub fn read(&self) -> u32 {
        self.mmio.read_u32(self.address)
    }

    pub fn write(&self, value: u32) {
        self.mmio.write_u32(self.address, value)
    }
}

impl<M: Mmio> Register<M> {
    /// The RAM word command register on the given bus.
    pub const fn ram_word(mmio: M) -> Self {
        Self::new(mmio, RAM_WORD_REGISTER)
    }
}

//! Calibrated busy wait.
//!
//! The peripheral exposes no ready flag, the only way to let an operation
//! settle is to burn a known number of cycles before the next access.

pub trait Delay {
    fn wait_cycles(&mut self, cycles: u32);
}

/// Spin on the management core.
#[derive(Debug, Default, Clone, Copy)]
pub struct SpinDelay;

impl Delay for SpinDelay {
    fn wait_cycles(&mut self, cycles: u32) {
        spin(cycles);
    }
}

/// Run `cycles` iterations of an empty loop, return the number executed.
#[inline(never)]
pub fn spin(cycles: u32) -> u32 {
    let mut executed = 0u32;

    for i in 0..cycles {
        nop();
        executed = core::hint::black_box(executed + 1);
        core::hint::black_box(i);
    }

    executed
}

#[cfg(target_arch = "riscv32")]
#[inline(always)]
fn nop() {
    // SAFETY: `nop` has no effect on memory or registers
    unsafe { core::arch::asm!("nop", options(nomem, nostack, preserves_flags)) }
}

#[cfg(not(target_arch = "riscv32"))]
#[inline(always)]
fn nop() {
    core::hint::spin_loop();
}

//! 16-bit Galois LFSR, low byte of the state is the output.

pub const DEFAULT_SEED: u16 = 0xACE1;
pub const TAPS: u16 = 0xB400;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lfsr {
    state: u16,
}

impl Default for Lfsr {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl Lfsr {
    /// A zero seed locks the register at zero.
    pub const fn new(seed: u16) -> Self {
        Self { state: seed }
    }

    pub const fn state(&self) -> u16 {
        self.state
    }

    pub fn next_u8(&mut self) -> u8 {
        let feedback = (self.state & 1).wrapping_neg() & TAPS;
        self.state = (self.state >> 1) ^ feedback;
        self.state as u8
    }
}

impl Iterator for Lfsr {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        Some(self.next_u8())
    }
}

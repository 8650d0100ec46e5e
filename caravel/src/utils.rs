//! Bit helpers and data structures shared by the models.

pub mod fifo;

pub use fifo::Fifo;

use num_traits::{AsPrimitive, PrimInt};

pub fn extract_bit<T>(bits: T, bit: T) -> T
where
    T: PrimInt + AsPrimitive<u32> + Copy,
    u32: AsPrimitive<T>,
{
    extract_bits(bits, bit..=bit)
}

pub fn extract_bits<T>(bits: T, range: std::ops::RangeInclusive<T>) -> T
where
    T: PrimInt + AsPrimitive<u32> + Copy,
    u32: AsPrimitive<T>,
{
    let lsb: u32 = range.start().as_();
    let msb: u32 = range.end().as_();
    let bits: u32 = bits.as_();

    let mask = 1u32.checked_shl(msb + 1).map(|v| v - 1).unwrap_or(u32::MAX);
    let result = (bits & mask) >> lsb;

    result.as_()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_bits() {
        let word = 0xCA40_00FFu32;
        assert_eq!(extract_bits(word, 30..=31), 0b11);
        assert_eq!(extract_bits(word, 25..=29), 5);
        assert_eq!(extract_bits(word, 20..=24), 4);
        assert_eq!(extract_bits(word, 0..=19), 0xFF);

        assert_eq!(extract_bit(0x1802u16, 1), 1);
        assert_eq!(extract_bit(0x1802u16, 0), 0);
    }
}

use std::ops::Deref;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryOutOfBoundsError;

type MemoryResult<T> = Result<T, MemoryOutOfBoundsError>;

/// Little endian byte array with word access, used as the RAM cell storage.
#[derive(Debug, Clone)]
pub struct GenericMemory<const N: usize> {
    data: Vec<u8>,
}

impl<const N: usize> Deref for GenericMemory<N> {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

impl<const N: usize> Default for GenericMemory<N> {
    fn default() -> Self {
        Self { data: vec![0; N] }
    }
}

impl<const N: usize> GenericMemory<N> {
    pub fn read_u32(&self, address: u32) -> MemoryResult<u32> {
        let start = address as usize;
        let bytes = self
            .data
            .get(start..start + 4)
            .ok_or(MemoryOutOfBoundsError)?;

        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    pub fn write_u32(&mut self, address: u32, value: u32) -> MemoryResult<()> {
        let start = address as usize;
        let bytes = self
            .data
            .get_mut(start..start + 4)
            .ok_or(MemoryOutOfBoundsError)?;

        bytes.copy_from_slice(&value.to_le_bytes());
        Ok(())
    }

    pub fn fill(&mut self, value: u8) {
        self.data.fill(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_access() {
        let mut memory: GenericMemory<1024> = Default::default();

        memory.write_u32(0, 0x12345678).unwrap();
        assert_eq!(memory.read_u32(0).unwrap(), 0x12345678);
        assert_eq!(memory[0], 0x78);

        memory.write_u32(1020, 0xFF).unwrap();
        assert_eq!(memory.read_u32(1020).unwrap(), 0xFF);
    }

    #[test]
    fn test_memory_fill() {
        let mut memory: GenericMemory<8> = GenericMemory::default();
        assert_eq!(memory.len(), 8);

        memory.write_u32(4, 0xF_FFFF).unwrap();
        memory.fill(0);
        assert_eq!(memory.read_u32(4).unwrap(), 0);
    }

    #[test]
    fn test_memory_access_out_of_bounds() {
        let mut memory: GenericMemory<1024> = GenericMemory::default();

        assert_eq!(memory.read_u32(1024).unwrap_err(), MemoryOutOfBoundsError);
        assert_eq!(memory.read_u32(1021).unwrap_err(), MemoryOutOfBoundsError);
        assert_eq!(
            memory.write_u32(1024, 0x12345678).unwrap_err(),
            MemoryOutOfBoundsError
        );
    }
}

//! Fixed capacity FIFO backing the command and result queues.

use core::mem;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FifoError {
    Full,
}

#[derive(Debug)]
pub struct Fifo<T, const N: usize> {
    slots: [T; N],
    /// Oldest entry.
    read: usize,
    len: usize,
}

impl<T: Default + Copy, const N: usize> Default for Fifo<T, N> {
    fn default() -> Self {
        Self {
            slots: [T::default(); N],
            read: 0,
            len: 0,
        }
    }
}

impl<T: Default, const N: usize> Fifo<T, N> {
    pub fn push(&mut self, value: T) -> Result<(), FifoError> {
        if self.is_full() {
            return Err(FifoError::Full);
        }

        let write = (self.read + self.len) % N;
        self.slots[write] = value;
        self.len += 1;
        Ok(())
    }

    pub fn pop(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }

        let value = mem::take(&mut self.slots[self.read]);
        self.read = (self.read + 1) % N;
        self.len -= 1;
        Some(value)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len == N
    }

    pub fn clear(&mut self) {
        while self.pop().is_some() {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifo_order() {
        let mut fifo = Fifo::<u32, 3>::default();

        assert!(fifo.is_empty());
        assert!(fifo.pop().is_none());

        fifo.push(0xC210_00FF).unwrap();
        fifo.push(0x4210_0000).unwrap();
        assert_eq!(fifo.len(), 2);
        assert_eq!(fifo.pop(), Some(0xC210_00FF));

        fifo.push(1).unwrap();
        fifo.push(2).unwrap();
        assert!(fifo.is_full());
        assert_eq!(fifo.push(3), Err(FifoError::Full));

        assert_eq!(fifo.pop(), Some(0x4210_0000));
        assert_eq!(fifo.pop(), Some(1));
        assert_eq!(fifo.pop(), Some(2));
        assert!(fifo.is_empty());
    }

    #[test]
    fn test_fifo_clear() {
        let mut fifo = Fifo::<u32, 4>::default();
        fifo.push(1).unwrap();
        fifo.push(2).unwrap();
        fifo.clear();
        assert!(fifo.is_empty());
        assert!(fifo.pop().is_none());
    }
}

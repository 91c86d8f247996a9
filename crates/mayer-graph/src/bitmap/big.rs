use mayer_core::MayerError;
use num_bigint::BigUint;

use super::{check_bit, word_count, Bitset};

/// Arbitrary precision bit store for very large diagrams.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BigBitmap {
    value: BigUint,
    size: usize,
}

impl BigBitmap {
    /// Creates an all-zero store of `size` bits.
    pub fn new(size: usize) -> Self {
        Self {
            value: BigUint::default(),
            size,
        }
    }

    pub(crate) fn from_words(size: usize, words: &[u64]) -> Self {
        let mut digits = Vec::with_capacity(words.len() * 2);
        for word in words.iter().take(word_count(size)) {
            digits.push(*word as u32);
            digits.push((*word >> 32) as u32);
        }
        let value = BigUint::new(digits) & max_value(size);
        Self { value, size }
    }

    /// Returns the integer value of the store.
    pub fn value(&self) -> &BigUint {
        &self.value
    }
}

fn max_value(size: usize) -> BigUint {
    (BigUint::from(1u32) << size) - 1u32
}

impl Bitset for BigBitmap {
    fn bit_size(&self) -> usize {
        self.size
    }

    fn test_bit(&self, bit: usize) -> Result<bool, MayerError> {
        check_bit(bit, self.size)?;
        Ok(self.value.bit(bit as u64))
    }

    fn set_bit(&mut self, bit: usize) -> Result<(), MayerError> {
        check_bit(bit, self.size)?;
        self.value.set_bit(bit as u64, true);
        Ok(())
    }

    fn clear_bit(&mut self, bit: usize) -> Result<(), MayerError> {
        check_bit(bit, self.size)?;
        self.value.set_bit(bit as u64, false);
        Ok(())
    }

    fn flip_bit(&mut self, bit: usize) -> Result<(), MayerError> {
        check_bit(bit, self.size)?;
        let current = self.value.bit(bit as u64);
        self.value.set_bit(bit as u64, !current);
        Ok(())
    }

    fn bit_count(&self) -> usize {
        self.value.count_ones() as usize
    }

    fn inc(&mut self) -> bool {
        if self.is_full() {
            return false;
        }
        self.value += 1u32;
        true
    }

    fn dec(&mut self) -> bool {
        if self.value.bits() == 0 {
            return false;
        }
        self.value -= 1u32;
        true
    }

    fn highest_set_bit(&self) -> Option<usize> {
        match self.value.bits() {
            0 => None,
            bits => Some(bits as usize - 1),
        }
    }

    fn lowest_set_bit(&self) -> Option<usize> {
        self.value.trailing_zeros().map(|bit| bit as usize)
    }

    fn highest_unset_bit(&self) -> Option<usize> {
        (0..self.size).rev().find(|bit| !self.value.bit(*bit as u64))
    }

    fn lowest_unset_bit(&self) -> Option<usize> {
        (0..self.size).find(|bit| !self.value.bit(*bit as u64))
    }

    fn set_all(&mut self) {
        self.value = max_value(self.size);
    }

    fn clear_all(&mut self) {
        self.value = BigUint::default();
    }

    fn to_words(&self) -> Vec<u64> {
        let mut words = self.value.to_u64_digits();
        words.resize(word_count(self.size), 0);
        words
    }
}

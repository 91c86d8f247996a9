use mayer_core::MayerError;

use super::{check_bit, Bitset};

/// Bit store backed by a single machine word (at most 64 bits).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WordBitmap {
    bits: u64,
    size: usize,
}

impl WordBitmap {
    /// Largest bit size a single word can hold.
    pub const CAPACITY: usize = 64;

    /// Creates an all-zero store of `size` bits.
    pub fn new(size: usize) -> Result<Self, MayerError> {
        if size > Self::CAPACITY {
            return Err(MayerError::bitmap(
                "size-out-of-range",
                "word backed bitmaps hold at most 64 bits",
            )
            .with_context("bit_size", size));
        }
        Ok(Self { bits: 0, size })
    }

    pub(crate) fn from_word(size: usize, word: u64) -> Self {
        let mut bitmap = Self { bits: 0, size };
        bitmap.bits = word & bitmap.mask();
        bitmap
    }

    /// Returns the raw word; bits at or above `bit_size` are always zero.
    pub fn word(&self) -> u64 {
        self.bits
    }

    fn mask(&self) -> u64 {
        if self.size >= 64 {
            u64::MAX
        } else {
            (1u64 << self.size) - 1
        }
    }
}

impl Bitset for WordBitmap {
    fn bit_size(&self) -> usize {
        self.size
    }

    fn test_bit(&self, bit: usize) -> Result<bool, MayerError> {
        check_bit(bit, self.size)?;
        Ok((self.bits >> bit) & 1 == 1)
    }

    fn set_bit(&mut self, bit: usize) -> Result<(), MayerError> {
        check_bit(bit, self.size)?;
        self.bits |= 1u64 << bit;
        Ok(())
    }

    fn clear_bit(&mut self, bit: usize) -> Result<(), MayerError> {
        check_bit(bit, self.size)?;
        self.bits &= !(1u64 << bit);
        Ok(())
    }

    fn flip_bit(&mut self, bit: usize) -> Result<(), MayerError> {
        check_bit(bit, self.size)?;
        self.bits ^= 1u64 << bit;
        Ok(())
    }

    fn bit_count(&self) -> usize {
        self.bits.count_ones() as usize
    }

    fn inc(&mut self) -> bool {
        if self.bits == self.mask() {
            return false;
        }
        self.bits += 1;
        true
    }

    fn dec(&mut self) -> bool {
        if self.bits == 0 {
            return false;
        }
        self.bits -= 1;
        true
    }

    fn highest_set_bit(&self) -> Option<usize> {
        highest(self.bits)
    }

    fn lowest_set_bit(&self) -> Option<usize> {
        lowest(self.bits)
    }

    fn highest_unset_bit(&self) -> Option<usize> {
        highest(!self.bits & self.mask())
    }

    fn lowest_unset_bit(&self) -> Option<usize> {
        lowest(!self.bits & self.mask())
    }

    fn set_all(&mut self) {
        self.bits = self.mask();
    }

    fn clear_all(&mut self) {
        self.bits = 0;
    }

    fn to_words(&self) -> Vec<u64> {
        if self.size == 0 {
            Vec::new()
        } else {
            vec![self.bits]
        }
    }
}

fn highest(word: u64) -> Option<usize> {
    if word == 0 {
        None
    } else {
        Some(63 - word.leading_zeros() as usize)
    }
}

fn lowest(word: u64) -> Option<usize> {
    if word == 0 {
        None
    } else {
        Some(word.trailing_zeros() as usize)
    }
}

use mayer_core::MayerError;

use super::{check_bit, last_word_mask, word_count, Bitset};

/// Bit store backed by a vector of little-endian words.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VectorBitmap {
    words: Vec<u64>,
    size: usize,
}

impl VectorBitmap {
    /// Creates an all-zero store of `size` bits.
    pub fn new(size: usize) -> Self {
        Self {
            words: vec![0; word_count(size)],
            size,
        }
    }

    pub(crate) fn from_words(size: usize, words: &[u64]) -> Self {
        let mut bitmap = Self::new(size);
        for (slot, word) in bitmap.words.iter_mut().zip(words) {
            *slot = *word;
        }
        bitmap.trim();
        bitmap
    }

    fn trim(&mut self) {
        if let Some(last) = self.words.last_mut() {
            *last &= last_word_mask(self.size);
        }
    }

    fn mask_for(&self, index: usize) -> u64 {
        if index + 1 == self.words.len() {
            last_word_mask(self.size)
        } else {
            u64::MAX
        }
    }

    /// Sets every bit below `bit` to `value`.
    fn fill_below(&mut self, bit: usize, value: bool) {
        let full_words = bit / 64;
        let fill = if value { u64::MAX } else { 0 };
        for word in &mut self.words[..full_words] {
            *word = fill;
        }
        let rem = bit % 64;
        if rem > 0 {
            let partial = (1u64 << rem) - 1;
            if value {
                self.words[full_words] |= partial;
            } else {
                self.words[full_words] &= !partial;
            }
        }
    }
}

impl Bitset for VectorBitmap {
    fn bit_size(&self) -> usize {
        self.size
    }

    fn test_bit(&self, bit: usize) -> Result<bool, MayerError> {
        check_bit(bit, self.size)?;
        Ok((self.words[bit / 64] >> (bit % 64)) & 1 == 1)
    }

    fn set_bit(&mut self, bit: usize) -> Result<(), MayerError> {
        check_bit(bit, self.size)?;
        self.words[bit / 64] |= 1u64 << (bit % 64);
        Ok(())
    }

    fn clear_bit(&mut self, bit: usize) -> Result<(), MayerError> {
        check_bit(bit, self.size)?;
        self.words[bit / 64] &= !(1u64 << (bit % 64));
        Ok(())
    }

    fn flip_bit(&mut self, bit: usize) -> Result<(), MayerError> {
        check_bit(bit, self.size)?;
        self.words[bit / 64] ^= 1u64 << (bit % 64);
        Ok(())
    }

    fn bit_count(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    // Adding one clears the trailing run of ones and sets the first zero above it.
    fn inc(&mut self) -> bool {
        let Some(bit) = self.lowest_unset_bit() else {
            return false;
        };
        self.fill_below(bit, false);
        self.words[bit / 64] |= 1u64 << (bit % 64);
        true
    }

    fn dec(&mut self) -> bool {
        let Some(bit) = self.lowest_set_bit() else {
            return false;
        };
        self.words[bit / 64] &= !(1u64 << (bit % 64));
        self.fill_below(bit, true);
        true
    }

    fn highest_set_bit(&self) -> Option<usize> {
        self.words
            .iter()
            .enumerate()
            .rev()
            .find(|(_, w)| **w != 0)
            .map(|(idx, w)| idx * 64 + 63 - w.leading_zeros() as usize)
    }

    fn lowest_set_bit(&self) -> Option<usize> {
        self.words
            .iter()
            .enumerate()
            .find(|(_, w)| **w != 0)
            .map(|(idx, w)| idx * 64 + w.trailing_zeros() as usize)
    }

    fn highest_unset_bit(&self) -> Option<usize> {
        (0..self.words.len()).rev().find_map(|idx| {
            let inv = !self.words[idx] & self.mask_for(idx);
            (inv != 0).then(|| idx * 64 + 63 - inv.leading_zeros() as usize)
        })
    }

    fn lowest_unset_bit(&self) -> Option<usize> {
        (0..self.words.len()).find_map(|idx| {
            let inv = !self.words[idx] & self.mask_for(idx);
            (inv != 0).then(|| idx * 64 + inv.trailing_zeros() as usize)
        })
    }

    fn set_all(&mut self) {
        for word in &mut self.words {
            *word = u64::MAX;
        }
        self.trim();
    }

    fn clear_all(&mut self) {
        for word in &mut self.words {
            *word = 0;
        }
    }

    fn to_words(&self) -> Vec<u64> {
        self.words.clone()
    }
}

//! Fixed-size bit stores with integer ordering, the edge substrate of a diagram.
//!
//! A [`Bitmap`] behaves like an unsigned integer of `bit_size` bits: bit `i`
//! carries weight `2^i`, values compare numerically and [`Bitset::inc`] /
//! [`Bitset::dec`] step through every pattern in order. Three backings share
//! the [`Bitset`] contract and are picked from the requested size.

mod big;
mod vector;
mod word;

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use mayer_core::MayerError;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub use big::BigBitmap;
pub use vector::VectorBitmap;
pub use word::WordBitmap;

/// Bit size above which the vector backing gives way to arbitrary precision.
pub const VECTOR_CAPACITY: usize = 1024;

/// Shared contract of every bit store backing.
pub trait Bitset {
    /// Number of addressable bits; fixed at construction.
    fn bit_size(&self) -> usize;

    /// Returns whether `bit` is set.
    fn test_bit(&self, bit: usize) -> Result<bool, MayerError>;

    /// Sets `bit`.
    fn set_bit(&mut self, bit: usize) -> Result<(), MayerError>;

    /// Clears `bit`.
    fn clear_bit(&mut self, bit: usize) -> Result<(), MayerError>;

    /// Toggles `bit`.
    fn flip_bit(&mut self, bit: usize) -> Result<(), MayerError>;

    /// Population count.
    fn bit_count(&self) -> usize;

    /// Adds one. Returns `false` and leaves the store untouched when every bit is set.
    fn inc(&mut self) -> bool;

    /// Subtracts one. Returns `false` and leaves the store untouched when it is zero.
    fn dec(&mut self) -> bool;

    /// Index of the most significant set bit.
    fn highest_set_bit(&self) -> Option<usize>;

    /// Index of the least significant set bit.
    fn lowest_set_bit(&self) -> Option<usize>;

    /// Index of the most significant clear bit.
    fn highest_unset_bit(&self) -> Option<usize>;

    /// Index of the least significant clear bit.
    fn lowest_unset_bit(&self) -> Option<usize>;

    /// Sets every bit.
    fn set_all(&mut self);

    /// Clears every bit.
    fn clear_all(&mut self);

    /// Little-endian words holding the pattern; bits past `bit_size` are zero.
    fn to_words(&self) -> Vec<u64>;

    /// Returns whether no bit is set.
    fn is_zero(&self) -> bool {
        self.bit_count() == 0
    }

    /// Returns whether every bit is set.
    fn is_full(&self) -> bool {
        self.bit_count() == self.bit_size()
    }
}

/// Identifies one of the bitmap backings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BitmapKind {
    /// Single `u64`.
    Word,
    /// Vector of `u64` words.
    Vector,
    /// `num_bigint::BigUint`.
    Big,
}

impl BitmapKind {
    /// Picks the backing used for stores of `bit_size` bits.
    pub fn for_size(bit_size: usize) -> Self {
        if bit_size <= WordBitmap::CAPACITY {
            BitmapKind::Word
        } else if bit_size <= VECTOR_CAPACITY {
            BitmapKind::Vector
        } else {
            BitmapKind::Big
        }
    }
}

/// Bit store with integer-like ordering.
///
/// Equality, hashing and ordering depend only on `bit_size` and the bit
/// pattern, never on the backing.
///
/// Human-readable formats carry the big-endian `0`/`1` string; binary formats
/// carry the bit size and little-endian words.
#[derive(Debug, Clone)]
pub enum Bitmap {
    /// Single word backing.
    Word(WordBitmap),
    /// Word vector backing.
    Vector(VectorBitmap),
    /// Arbitrary precision backing.
    Big(BigBitmap),
}

macro_rules! dispatch {
    ($self:expr, $inner:ident => $body:expr) => {
        match $self {
            Bitmap::Word($inner) => $body,
            Bitmap::Vector($inner) => $body,
            Bitmap::Big($inner) => $body,
        }
    };
}

impl Bitmap {
    /// Creates an all-zero store of `bit_size` bits using the size-selected backing.
    pub fn new(bit_size: usize) -> Self {
        Self::zeroed(bit_size, BitmapKind::for_size(bit_size))
    }

    /// Creates an all-zero store with an explicit backing.
    pub fn with_kind(bit_size: usize, kind: BitmapKind) -> Result<Self, MayerError> {
        match kind {
            BitmapKind::Word => Ok(Bitmap::Word(WordBitmap::new(bit_size)?)),
            BitmapKind::Vector => Ok(Bitmap::Vector(VectorBitmap::new(bit_size))),
            BitmapKind::Big => Ok(Bitmap::Big(BigBitmap::new(bit_size))),
        }
    }

    fn zeroed(bit_size: usize, kind: BitmapKind) -> Self {
        match kind {
            BitmapKind::Word => Bitmap::Word(WordBitmap::from_word(bit_size, 0)),
            BitmapKind::Vector => Bitmap::Vector(VectorBitmap::new(bit_size)),
            BitmapKind::Big => Bitmap::Big(BigBitmap::new(bit_size)),
        }
    }

    /// Creates a store with every bit set.
    pub fn full(bit_size: usize) -> Self {
        let mut bitmap = Self::new(bit_size);
        bitmap.set_all();
        bitmap
    }

    /// Creates a store from little-endian words; bits past `bit_size` are dropped.
    pub fn from_words(bit_size: usize, words: &[u64]) -> Self {
        match BitmapKind::for_size(bit_size) {
            BitmapKind::Word => {
                Bitmap::Word(WordBitmap::from_word(bit_size, words.first().copied().unwrap_or(0)))
            }
            BitmapKind::Vector => Bitmap::Vector(VectorBitmap::from_words(bit_size, words)),
            BitmapKind::Big => Bitmap::Big(BigBitmap::from_words(bit_size, words)),
        }
    }

    /// Creates a store holding the integer `value` (truncated to `bit_size` bits).
    pub fn from_value(bit_size: usize, value: u64) -> Self {
        Self::from_words(bit_size, &[value])
    }

    /// Re-encodes the pattern with another backing.
    pub fn to_kind(&self, kind: BitmapKind) -> Result<Self, MayerError> {
        let size = self.bit_size();
        let words = self.to_words();
        Ok(match kind {
            BitmapKind::Word => {
                WordBitmap::new(size)?;
                Bitmap::Word(WordBitmap::from_word(size, words.first().copied().unwrap_or(0)))
            }
            BitmapKind::Vector => Bitmap::Vector(VectorBitmap::from_words(size, &words)),
            BitmapKind::Big => Bitmap::Big(BigBitmap::from_words(size, &words)),
        })
    }

    /// Returns the backing in use.
    pub fn kind(&self) -> BitmapKind {
        match self {
            Bitmap::Word(_) => BitmapKind::Word,
            Bitmap::Vector(_) => BitmapKind::Vector,
            Bitmap::Big(_) => BitmapKind::Big,
        }
    }

    /// Bitwise AND. Operands of different sizes are truncated to the smaller size.
    pub fn and(&self, other: &Bitmap) -> Bitmap {
        self.combine(other, |a, b| a & b)
    }

    /// Bitwise OR. Operands of different sizes are truncated to the smaller size.
    pub fn or(&self, other: &Bitmap) -> Bitmap {
        self.combine(other, |a, b| a | b)
    }

    /// Bitwise XOR. Operands of different sizes are truncated to the smaller size.
    pub fn xor(&self, other: &Bitmap) -> Bitmap {
        self.combine(other, |a, b| a ^ b)
    }

    /// Bitwise NAND. Operands of different sizes are truncated to the smaller size.
    pub fn nand(&self, other: &Bitmap) -> Bitmap {
        self.combine(other, |a, b| !(a & b))
    }

    /// Bitwise complement within `bit_size`.
    pub fn not(&self) -> Bitmap {
        let words: Vec<u64> = self.to_words().into_iter().map(|w| !w).collect();
        Bitmap::from_words(self.bit_size(), &words)
    }

    fn combine(&self, other: &Bitmap, op: impl Fn(u64, u64) -> u64) -> Bitmap {
        let size = self.bit_size().min(other.bit_size());
        let ours = self.to_words();
        let theirs = other.to_words();
        let words: Vec<u64> = (0..word_count(size))
            .map(|idx| op(ours[idx], theirs[idx]))
            .collect();
        Bitmap::from_words(size, &words)
    }

    /// Returns the lowest `count` bits as a new store of `count` bits.
    pub fn copy_lowest(&self, count: usize) -> Result<Bitmap, MayerError> {
        self.check_span(count)?;
        Ok(Bitmap::from_words(count, &self.to_words()))
    }

    /// Returns the highest `count` bits as a new store of `count` bits.
    pub fn copy_highest(&self, count: usize) -> Result<Bitmap, MayerError> {
        self.check_span(count)?;
        let offset = self.bit_size() - count;
        Ok(Bitmap::from_words(count, &shift_down(&self.to_words(), offset)))
    }

    fn check_span(&self, count: usize) -> Result<(), MayerError> {
        if count > self.bit_size() {
            return Err(MayerError::bitmap(
                "size-out-of-range",
                "cannot copy more bits than the store holds",
            )
            .with_context("requested", count)
            .with_context("bit_size", self.bit_size()));
        }
        Ok(())
    }

    /// Iterates over the indices of set bits in increasing order.
    pub fn ones(&self) -> impl Iterator<Item = usize> + '_ {
        let words = self.to_words();
        (0..self.bit_size()).filter(move |bit| (words[bit / 64] >> (bit % 64)) & 1 == 1)
    }
}

impl Bitset for Bitmap {
    fn bit_size(&self) -> usize {
        dispatch!(self, inner => inner.bit_size())
    }

    fn test_bit(&self, bit: usize) -> Result<bool, MayerError> {
        dispatch!(self, inner => inner.test_bit(bit))
    }

    fn set_bit(&mut self, bit: usize) -> Result<(), MayerError> {
        dispatch!(self, inner => inner.set_bit(bit))
    }

    fn clear_bit(&mut self, bit: usize) -> Result<(), MayerError> {
        dispatch!(self, inner => inner.clear_bit(bit))
    }

    fn flip_bit(&mut self, bit: usize) -> Result<(), MayerError> {
        dispatch!(self, inner => inner.flip_bit(bit))
    }

    fn bit_count(&self) -> usize {
        dispatch!(self, inner => inner.bit_count())
    }

    fn inc(&mut self) -> bool {
        dispatch!(self, inner => inner.inc())
    }

    fn dec(&mut self) -> bool {
        dispatch!(self, inner => inner.dec())
    }

    fn highest_set_bit(&self) -> Option<usize> {
        dispatch!(self, inner => inner.highest_set_bit())
    }

    fn lowest_set_bit(&self) -> Option<usize> {
        dispatch!(self, inner => inner.lowest_set_bit())
    }

    fn highest_unset_bit(&self) -> Option<usize> {
        dispatch!(self, inner => inner.highest_unset_bit())
    }

    fn lowest_unset_bit(&self) -> Option<usize> {
        dispatch!(self, inner => inner.lowest_unset_bit())
    }

    fn set_all(&mut self) {
        dispatch!(self, inner => inner.set_all())
    }

    fn clear_all(&mut self) {
        dispatch!(self, inner => inner.clear_all())
    }

    fn to_words(&self) -> Vec<u64> {
        dispatch!(self, inner => inner.to_words())
    }
}

impl PartialEq for Bitmap {
    fn eq(&self, other: &Self) -> bool {
        self.bit_size() == other.bit_size() && self.to_words() == other.to_words()
    }
}

impl Eq for Bitmap {}

impl Hash for Bitmap {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bit_size().hash(state);
        self.to_words().hash(state);
    }
}

impl Ord for Bitmap {
    fn cmp(&self, other: &Self) -> Ordering {
        let ours = self.to_words();
        let theirs = other.to_words();
        let len = ours.len().max(theirs.len());
        for idx in (0..len).rev() {
            let a = ours.get(idx).copied().unwrap_or(0);
            let b = theirs.get(idx).copied().unwrap_or(0);
            match a.cmp(&b) {
                Ordering::Equal => continue,
                unequal => return unequal,
            }
        }
        self.bit_size().cmp(&other.bit_size())
    }
}

impl PartialOrd for Bitmap {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Bitmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let words = self.to_words();
        for bit in (0..self.bit_size()).rev() {
            let set = (words[bit / 64] >> (bit % 64)) & 1 == 1;
            f.write_str(if set { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl FromStr for Bitmap {
    type Err = MayerError;

    /// Parses a big-endian `0`/`1` string; its length becomes the bit size.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let size = s.chars().count();
        let mut bitmap = Bitmap::new(size);
        for (pos, ch) in s.chars().enumerate() {
            match ch {
                '0' => {}
                '1' => bitmap.set_bit(size - 1 - pos)?,
                other => {
                    return Err(MayerError::bitmap(
                        "invalid-bit-string",
                        "bit strings contain only '0' and '1'",
                    )
                    .with_context("position", pos)
                    .with_context("found", other))
                }
            }
        }
        Ok(bitmap)
    }
}

#[derive(Serialize, Deserialize)]
struct PackedBitmap {
    bit_size: u64,
    words: Vec<u64>,
}

impl PackedBitmap {
    fn into_bitmap(self) -> Result<Bitmap, MayerError> {
        let bit_size = usize::try_from(self.bit_size).map_err(|_| {
            MayerError::bitmap("size-out-of-range", "packed bit size does not fit usize")
                .with_context("bit_size", self.bit_size)
        })?;
        let expected = word_count(bit_size);
        if self.words.len() != expected {
            return Err(
                MayerError::bitmap("word-count", "packed words do not match the bit size")
                    .with_context("bit_size", bit_size)
                    .with_context("expected", expected)
                    .with_context("found", self.words.len()),
            );
        }
        if let Some(&last) = self.words.last() {
            if last & !last_word_mask(bit_size) != 0 {
                return Err(MayerError::bitmap(
                    "bit-out-of-range",
                    "packed words set bits past the bit size",
                )
                .with_context("bit_size", bit_size));
            }
        }
        Ok(Bitmap::from_words(bit_size, &self.words))
    }
}

impl Serialize for Bitmap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.collect_str(self)
        } else {
            PackedBitmap {
                bit_size: self.bit_size() as u64,
                words: self.to_words(),
            }
            .serialize(serializer)
        }
    }
}

impl<'de> Deserialize<'de> for Bitmap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            let text = String::deserialize(deserializer)?;
            text.parse().map_err(D::Error::custom)
        } else {
            PackedBitmap::deserialize(deserializer)?
                .into_bitmap()
                .map_err(D::Error::custom)
        }
    }
}

pub(crate) fn check_bit(bit: usize, size: usize) -> Result<(), MayerError> {
    if bit >= size {
        return Err(
            MayerError::bitmap("bit-out-of-range", "bit index outside the store")
                .with_context("bit", bit)
                .with_context("bit_size", size),
        );
    }
    Ok(())
}

pub(crate) fn word_count(bit_size: usize) -> usize {
    bit_size.div_ceil(64)
}

pub(crate) fn last_word_mask(bit_size: usize) -> u64 {
    match bit_size % 64 {
        0 => u64::MAX,
        rem => (1u64 << rem) - 1,
    }
}

fn shift_down(words: &[u64], offset: usize) -> Vec<u64> {
    let skip = offset / 64;
    let shift = offset % 64;
    let tail = &words[skip.min(words.len())..];
    (0..tail.len())
        .map(|idx| {
            let low = tail[idx] >> shift;
            let high = match (shift, tail.get(idx + 1)) {
                (0, _) | (_, None) => 0,
                (_, Some(next)) => next << (64 - shift),
            };
            low | high
        })
        .collect()
}

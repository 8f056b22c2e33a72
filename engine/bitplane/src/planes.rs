// engine/bitplane/src/planes.rs

use rayon::prelude::*;

use crate::BitWidth;

/// Elements per rayon task in `PlaneCounts::tally_par`.
const PAR_CHUNK: usize = 4096;

/// A fixed-width integer whose two's-complement bit pattern can be tallied.
pub trait PlaneWord: Copy + Send + Sync {
    /// Bit pattern, zero-extended to 64 bits (`-1i32` becomes `0xFFFF_FFFF`).
    fn pattern(self) -> u64;
}

impl PlaneWord for i32 {
    #[inline]
    fn pattern(self) -> u64 {
        self as u32 as u64
    }
}

impl PlaneWord for u32 {
    #[inline]
    fn pattern(self) -> u64 {
        self as u64
    }
}

impl PlaneWord for i64 {
    #[inline]
    fn pattern(self) -> u64 {
        self as u64
    }
}

impl PlaneWord for u64 {
    #[inline]
    fn pattern(self) -> u64 {
        self
    }
}

/// Per-plane set-bit counts of a sequence. `count(b) <= len()` for every plane.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlaneCounts {
    counts: [u64; 64],
    len: u64,
    width: BitWidth,
}

impl PlaneCounts {
    /// Zero counts over an empty sequence.
    pub fn empty(width: BitWidth) -> Self {
        Self { counts: [0; 64], len: 0, width }
    }

    /// Count set bits per plane in one pass. Bits at or above `width` are ignored.
    pub fn tally<T: PlaneWord>(seq: &[T], width: BitWidth) -> Self {
        let mask = width.mask();
        let mut counts = [0u64; 64];
        for &v in seq {
            let mut bits = v.pattern() & mask;
            while bits != 0 {
                counts[bits.trailing_zeros() as usize] += 1;
                bits &= bits - 1;
            }
        }
        Self { counts, len: seq.len() as u64, width }
    }

    /// Same result as `tally`, split across the rayon pool and reduced.
    pub fn tally_par<T: PlaneWord>(seq: &[T], width: BitWidth) -> Self {
        seq.par_chunks(PAR_CHUNK)
            .map(|chunk| Self::tally(chunk, width))
            .reduce(|| Self::empty(width), Self::merge)
    }

    /// Combine counts of two disjoint sub-sequences tallied at the same width.
    pub fn merge(mut self, other: Self) -> Self {
        debug_assert_eq!(self.width, other.width, "merging tallies of different widths");
        for (a, b) in self.counts.iter_mut().zip(other.counts.iter()) {
            *a += *b;
        }
        self.len += other.len;
        self
    }

    #[inline]
    pub fn len(&self) -> u64 {
        self.len
    }
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
    #[inline]
    pub fn width(&self) -> BitWidth {
        self.width
    }
    #[inline]
    fn check(&self, b: u32) {
        assert!(b < self.width.bits(), "plane {b} outside width {}", self.width.bits());
    }

    /// Elements with bit `b` set.
    #[inline]
    pub fn count(&self, b: u32) -> u64 {
        self.check(b);
        self.counts[b as usize]
    }

    /// Elements with bit `b` clear.
    #[inline]
    pub fn unset(&self, b: u32) -> u64 {
        self.len - self.count(b)
    }

    /// `(plane, set count)` for every plane in the width, low to high.
    pub fn iter(&self) -> impl Iterator<Item = (u32, u64)> + '_ {
        self.width.planes().map(move |b| (b, self.counts[b as usize]))
    }

    /// Pattern of planes whose count is not a multiple of `modulus`.
    ///
    /// `modulus` must be non-zero; a zero modulus panics in debug builds and
    /// yields `0` otherwise.
    pub fn residue_pattern(&self, modulus: u64) -> u64 {
        debug_assert!(modulus > 0, "modulus must be non-zero");
        self.iter()
            .filter(|&(_, c)| c.checked_rem(modulus).is_some_and(|r| r != 0))
            .fold(0u64, |acc, (b, _)| acc | (1u64 << b))
    }
}

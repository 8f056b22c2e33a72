// engine/bitplane/src/kbits.rs

use crate::{BitWidth, BitsError, Result};

/// `C(n, k)` exactly; every intermediate product stays below `2^128` for `n <= 64`.
pub fn binomial(n: u32, k: u32) -> u128 {
    if k > n {
        return 0;
    }
    let k = k.min(n - k) as u128;
    let n = n as u128;
    (0..k).fold(1u128, |acc, i| acc * (n - i) / (i + 1))
}

/// Next larger value with the same popcount (Gosper's hack), if it fits in `mask`.
#[inline]
fn next_same_popcount(v: u64, mask: u64) -> Option<u64> {
    let low = v & v.wrapping_neg();
    let ripple = v.checked_add(low)?;
    let ones = ((ripple ^ v) >> 2) >> low.trailing_zeros();
    let next = ripple | ones;
    (next <= mask).then_some(next)
}

/// Values in `[0, x]` (within `width`) having exactly `k` set bits, counted
/// without materializing them.
pub fn count_k_set_bits_up_to(x: u64, k: u32, width: BitWidth) -> u64 {
    let x = x.min(width.mask());
    let mut total = 0u128;
    let mut ones = 0u32;
    for b in (0..64u32).rev() {
        if (x >> b) & 1 == 0 {
            continue;
        }
        // clear bit b, keep the prefix, choose the rest freely below b
        if k >= ones {
            total += binomial(b, k - ones);
        }
        ones += 1;
        if ones > k {
            break;
        }
    }
    if x.count_ones() == k {
        total += 1;
    }
    total as u64
}

/// Split a signed range into the unsigned pattern ranges it covers: the
/// negative half (bit 63 set) and the non-negative half. Pattern order within
/// each half matches signed order.
fn signed_pattern_ranges(l: i64, r: i64) -> [Option<(u64, u64)>; 2] {
    if l > r {
        return [None, None];
    }
    let negative = (l < 0).then(|| (l as u64, r.min(-1) as u64));
    let non_negative = (r >= 0).then(|| (l.max(0) as u64, r as u64));
    [negative, non_negative]
}

/// Values in `[l, r]` with exactly `k` set bits among all 64-bit patterns,
/// each read as a two's-complement `i64`. `l > r` gives 0.
pub fn count_values_with_k_set_bits_in_range(l: i64, r: i64, k: u32) -> i64 {
    signed_pattern_ranges(l, r)
        .into_iter()
        .flatten()
        .map(|(lo, hi)| {
            let upper = count_k_set_bits_up_to(hi, k, BitWidth::W64);
            let below = if lo == 0 { 0 } else { count_k_set_bits_up_to(lo - 1, k, BitWidth::W64) };
            upper - below
        })
        .sum::<u64>() as i64
}

/// Every value within `width` that has exactly `k` set bits, ascending.
/// Build once, then answer any number of range queries by binary search.
#[derive(Clone, Debug)]
pub struct KSetBitTable {
    k: u32,
    width: BitWidth,
    values: Box<[u64]>,
}

impl KSetBitTable {
    /// Upper bound on table entries (`C(64, 3) = 41_664` fits comfortably).
    pub const MAX_ENTRIES: u128 = 1 << 24;

    pub fn new(k: u32, width: BitWidth) -> Result<Self> {
        let w = width.bits();
        let entries = binomial(w, k);
        if entries > Self::MAX_ENTRIES {
            tracing::warn!(k, width = w, %entries, "refusing to build k-set-bit table");
            return Err(BitsError::TableTooLarge { k, width: w, entries });
        }

        let mut values = Vec::with_capacity(entries as usize);
        if k <= w {
            let mut v = if k == 64 { u64::MAX } else { (1u64 << k) - 1 };
            values.push(v);
            // k == 0 has the single value 0; Gosper's step needs a set bit
            if k > 0 {
                while let Some(next) = next_same_popcount(v, width.mask()) {
                    values.push(next);
                    v = next;
                }
            }
        }
        debug_assert_eq!(values.len() as u128, entries);

        tracing::info!(k, width = w, entries = values.len(), "built k-set-bit table");
        Ok(Self { k, width, values: values.into_boxed_slice() })
    }

    #[inline]
    pub fn k(&self) -> u32 {
        self.k
    }
    #[inline]
    pub fn width(&self) -> BitWidth {
        self.width
    }
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
    #[inline]
    pub fn values(&self) -> &[u64] {
        &self.values
    }

    pub fn contains(&self, v: u64) -> bool {
        self.values.binary_search(&v).is_ok()
    }

    /// Slice of table values within `[lo, hi]`.
    pub fn values_in_range(&self, lo: u64, hi: u64) -> &[u64] {
        if lo > hi {
            return &[];
        }
        let start = self.values.partition_point(|&v| v < lo);
        let end = self.values.partition_point(|&v| v <= hi);
        &self.values[start..end]
    }

    pub fn count_in_range_u64(&self, lo: u64, hi: u64) -> u64 {
        self.values_in_range(lo, hi).len() as u64
    }

    /// Signed-range query: entries are compared as two's-complement `i64`,
    /// so patterns with bit 63 set count toward negative bounds.
    pub fn count_in_range(&self, l: i64, r: i64) -> i64 {
        signed_pattern_ranges(l, r)
            .into_iter()
            .flatten()
            .map(|(lo, hi)| self.count_in_range_u64(lo, hi))
            .sum::<u64>() as i64
    }
}

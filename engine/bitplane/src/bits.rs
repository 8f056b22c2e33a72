//! Single-value bit utilities.

use crate::{BitsError, Result};

/// Bits that must flip to turn `a` into `b`.
#[inline]
pub fn count_bits_flip(a: i32, b: i32) -> u32 {
    (a ^ b).count_ones()
}

#[inline]
pub fn binary_to_gray(b: u32) -> u32 {
    b ^ (b >> 1)
}

/// Inverse of `binary_to_gray`: prefix XOR of every higher bit.
#[inline]
pub fn gray_to_binary(g: u32) -> u32 {
    let mut b = g;
    b ^= b >> 1;
    b ^= b >> 2;
    b ^= b >> 4;
    b ^= b >> 8;
    b ^= b >> 16;
    b
}

/// OR of every integer in `[l, r]`; 0 when `l > r`.
pub fn bitwise_or_range(l: u64, r: u64) -> u64 {
    if l > r {
        return 0;
    }
    let diff = l ^ r;
    if diff == 0 {
        return l;
    }
    // every bit below the highest differing one is hit somewhere in the range
    l | r | (u64::MAX >> diff.leading_zeros())
}

/// Total set bits over `1..=n`, one plane at a time: plane `b` is set for
/// `2^b` values out of every `2^(b+1)`.
pub fn count_set_bits_up_to(n: u64) -> u128 {
    let span = n as u128 + 1;
    (0..64u32)
        .map(|b| {
            let half = 1u128 << b;
            let cycle = half << 1;
            (span / cycle) * half + (span % cycle).saturating_sub(half)
        })
        .sum()
}

/// `x` minimizing `x ^ a` subject to `popcount(x) == popcount(b)`.
pub fn min_xor_with_popcount_of(a: u32, b: u32) -> u32 {
    let mut need = b.count_ones();
    let mut x = 0u32;
    // reuse a's bits from the top down
    for i in (0..32).rev() {
        if need == 0 {
            break;
        }
        if a & (1 << i) != 0 {
            x |= 1 << i;
            need -= 1;
        }
    }
    // then fill the lowest clear positions
    for i in 0..32 {
        if need == 0 {
            break;
        }
        if x & (1 << i) == 0 {
            x |= 1 << i;
            need -= 1;
        }
    }
    x
}

/// Length of the longest run of consecutive set bits.
pub fn max_consecutive_ones(n: u32) -> u32 {
    let mut x = n;
    let mut run = 0;
    while x != 0 {
        x &= x << 1;
        run += 1;
    }
    run
}

/// Unset bits of `n` at 1-based positions `l..=r` (clamped to `1..=32`).
pub fn count_unset_bits_in_range(n: u32, l: u32, r: u32) -> u32 {
    let l = l.max(1);
    let r = r.min(32);
    if l > r {
        return 0;
    }
    let hi = u32::MAX >> (32 - r);
    let lo = (1u32 << (l - 1)) - 1;
    (!n & hi & !lo).count_ones()
}

/// True when no `x` satisfies `x + popcount(x) == n`.
pub fn is_bleak(n: u32) -> bool {
    // popcount(x) <= 32, so only the last 32 candidates below n matter
    let start = n.saturating_sub(32).max(1);
    !(start..n).any(|x| x as u64 + x.count_ones() as u64 == n as u64)
}

/// Every submask of `n` (values `i` with `n & i == i`), largest first.
pub fn submasks_desc(n: u32) -> Vec<u32> {
    let mut out = Vec::with_capacity(1usize << n.count_ones());
    let mut s = n;
    loop {
        out.push(s);
        if s == 0 {
            break;
        }
        s = (s - 1) & n;
    }
    out
}

/// Whether a binary string (most significant digit first) encodes a multiple
/// of three. The empty string encodes zero.
pub fn is_binary_multiple_of_three(s: &str) -> Result<bool> {
    let mut rem = 0u8;
    for (index, ch) in s.chars().enumerate() {
        let bit = match ch {
            '0' => 0,
            '1' => 1,
            found => return Err(BitsError::InvalidDigit { index, found }),
        };
        rem = (rem * 2 + bit) % 3;
    }
    Ok(rem == 0)
}

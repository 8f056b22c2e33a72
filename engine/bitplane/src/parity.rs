//! Finders for values with odd multiplicity, via XOR parity or per-plane
//! residues.
//!
//! Every finder relies on an occurrence-count precondition that is *not*
//! checked: inputs of the wrong shape yield an unspecified value, never a
//! panic.

use crate::{BitWidth, BitsError, PlaneCounts, PlaneWord, Result};

#[inline]
fn xor_all(seq: &[i32]) -> i32 {
    seq.iter().fold(0, |acc, &v| acc ^ v)
}

/// XOR of every integer in `0..=n`, in constant time.
#[inline]
pub fn xor_up_to(n: u64) -> u64 {
    match n % 4 {
        0 => n,
        1 => 1,
        2 => n + 1,
        _ => 0,
    }
}

/// The single value occurring once when every other value occurs twice.
pub fn find_unique_among_pairs(seq: &[i32]) -> i32 {
    xor_all(seq)
}

/// The two values occurring once when every other value occurs an even
/// number of times. Returned smaller first.
pub fn find_two_uniques_among_pairs(seq: &[i32]) -> (i32, i32) {
    let x = xor_all(seq);
    // lowest bit where the two uniques differ
    let pivot = x & x.wrapping_neg();
    let (set, unset) = seq.iter().fold((0i32, 0i32), |(s, u), &v| {
        if v & pivot != 0 { (s ^ v, u) } else { (s, u ^ v) }
    });
    if set < unset { (set, unset) } else { (unset, set) }
}

/// The single value occurring once when every other value occurs three times.
/// All 32 planes are inspected, so negative values are recovered too.
pub fn find_unique_among_triples(seq: &[i32]) -> i32 {
    PlaneCounts::tally(seq, BitWidth::W32).residue_pattern(3) as u32 as i32
}

/// Bit pattern of the single value occurring once when every other value
/// occurs exactly `repeat` times, over the low `width` bits.
pub fn find_unique_among_repeats<T: PlaneWord>(seq: &[T], repeat: u32, width: BitWidth) -> Result<u64> {
    unique_pattern(&PlaneCounts::tally(seq, width), repeat)
}

/// Residue pattern of already-tallied planes, rejecting repeat counts below 2.
pub(crate) fn unique_pattern(planes: &PlaneCounts, repeat: u32) -> Result<u64> {
    if repeat < 2 {
        return Err(BitsError::InvalidRepeat(repeat));
    }
    Ok(planes.residue_pattern(repeat as u64))
}

/// The value absent from `seq`, which holds `1..=n+1` minus one value
/// (`n = seq.len()`), in any order.
pub fn find_missing_number(seq: &[i32]) -> i64 {
    let expected = xor_up_to(seq.len() as u64 + 1);
    let seen = seq.iter().fold(0u64, |acc, &v| acc ^ v as i64 as u64);
    (expected ^ seen) as i64
}

/// `(repeating, missing)` for a sequence of length `n` drawn from `1..=n`
/// where exactly one value appears twice and exactly one is absent.
pub fn find_missing_and_repeating(seq: &[i32]) -> (i64, i64) {
    let n = seq.len() as u64;
    let values = || seq.iter().map(|&v| v as i64 as u64);

    // repeating ^ missing
    let x = values().fold(xor_up_to(n), |acc, v| acc ^ v);
    let pivot = x & x.wrapping_neg();

    let (mut a, mut b) = (0u64, 0u64);
    for v in values().chain(1..=n) {
        if v & pivot != 0 { a ^= v } else { b ^= v }
    }
    if values().any(|v| v == a) { (a as i64, b as i64) } else { (b as i64, a as i64) }
}

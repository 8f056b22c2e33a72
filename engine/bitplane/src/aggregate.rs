//! Pairwise aggregates computed one bit plane at a time.
//!
//! At a fixed plane every unordered pair contributes according to how many of
//! its two operands have the bit set, so an `O(n²)` pairwise sum reduces to
//! `W` scalar problems over the plane counts.

use crate::{BitWidth, PlaneCounts, PlaneWord};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum PairwiseOp {
    /// Sum of `a & b` over unordered pairs.
    And,
    /// Sum of `a | b` over unordered pairs.
    Or,
    /// Sum of `a ^ b` over unordered pairs.
    Xor,
    /// Total Hamming distance over unordered pairs.
    Hamming,
    /// Sum of differing bits over ordered pairs (`i != j`), i.e. twice Hamming.
    BitDifference,
}

#[inline]
fn choose2(c: u128) -> u128 {
    if c < 2 { 0 } else { c * (c - 1) / 2 }
}

impl PairwiseOp {
    pub const ALL: [PairwiseOp; 5] =
        [PairwiseOp::And, PairwiseOp::Or, PairwiseOp::Xor, PairwiseOp::Hamming, PairwiseOp::BitDifference];

    /// Whether a plane's pair count is scaled by the plane's place value.
    #[inline]
    pub fn weighted(self) -> bool {
        matches!(self, PairwiseOp::And | PairwiseOp::Or | PairwiseOp::Xor)
    }

    /// Pairs contributing at a plane where `c` of `n` elements have the bit set.
    #[inline]
    pub fn plane_pairs(self, n: u64, c: u64) -> u128 {
        let (n, c) = (n as u128, c as u128);
        match self {
            PairwiseOp::And => choose2(c),
            PairwiseOp::Or => choose2(n) - choose2(n - c),
            PairwiseOp::Xor | PairwiseOp::Hamming => c * (n - c),
            PairwiseOp::BitDifference => 2 * c * (n - c),
        }
    }

    /// Value of the aggregate for a single pair of bit patterns.
    #[inline]
    pub fn apply(self, a: u64, b: u64) -> u64 {
        match self {
            PairwiseOp::And => a & b,
            PairwiseOp::Or => a | b,
            PairwiseOp::Xor => a ^ b,
            PairwiseOp::Hamming => (a ^ b).count_ones() as u64,
            PairwiseOp::BitDifference => 2 * (a ^ b).count_ones() as u64,
        }
    }

    /// Signed value of the aggregate for a single pair of 32-bit operands.
    #[inline]
    pub fn apply_i32(self, a: i32, b: i32) -> i64 {
        match self {
            PairwiseOp::And => (a & b) as i64,
            PairwiseOp::Or => (a | b) as i64,
            PairwiseOp::Xor => (a ^ b) as i64,
            PairwiseOp::Hamming => (a ^ b).count_ones() as i64,
            PairwiseOp::BitDifference => 2 * (a ^ b).count_ones() as i64,
        }
    }
}

/// Fold precomputed plane counts into the aggregate for `op`.
pub fn aggregate_planes(planes: &PlaneCounts, op: PairwiseOp) -> u128 {
    let n = planes.len();
    planes
        .iter()
        .map(|(b, c)| {
            let pairs = op.plane_pairs(n, c);
            if op.weighted() { pairs << b } else { pairs }
        })
        .sum()
}

/// Fold plane counts into a two's-complement aggregate: the top plane of the
/// width is the sign plane and weighs `-2^(W-1)`. Unweighted ops are unchanged.
pub fn aggregate_planes_signed(planes: &PlaneCounts, op: PairwiseOp) -> i128 {
    let n = planes.len();
    let sign = planes.width().bits() - 1;
    planes
        .iter()
        .map(|(b, c)| {
            let pairs = op.plane_pairs(n, c) as i128;
            match (op.weighted(), b == sign) {
                (false, _) => pairs,
                (true, false) => pairs << b,
                (true, true) => -(pairs << b),
            }
        })
        .sum()
}

/// Aggregate over `seq` at an explicit width, every pattern read unsigned.
/// The `u128` result cannot overflow for any sequence addressable in memory, even at `W = 64`.
pub fn bit_plane_aggregate_wide<T: PlaneWord>(seq: &[T], op: PairwiseOp, width: BitWidth) -> u128 {
    aggregate_planes(&PlaneCounts::tally(seq, width), op)
}

/// Aggregate over signed 32-bit values: equals the sum of `a op b` taken as
/// `i32` results, so bit 31 contributes `i32::MIN` per pair.
///
/// Accumulation is widened; a total outside the `i64` range (only reachable
/// with billions of elements) saturates rather than wrapping.
pub fn bit_plane_aggregate(seq: &[i32], op: PairwiseOp) -> i64 {
    let total = aggregate_planes_signed(&PlaneCounts::tally(seq, BitWidth::W32), op);
    i64::try_from(total).unwrap_or(if total < 0 { i64::MIN } else { i64::MAX })
}

/// Largest `a & b` over all pairs. Greedy from the top plane: keep a bit in
/// the candidate mask while at least two elements still carry every kept bit.
pub fn max_pairwise_and(seq: &[u32]) -> u32 {
    let mut best = 0u32;
    for b in (0..32).rev() {
        let cand = best | (1u32 << b);
        if seq.iter().filter(|&&v| v & cand == cand).nth(1).is_some() {
            best = cand;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brute(seq: &[i32], op: PairwiseOp) -> i64 {
        let mut total = 0i64;
        for i in 0..seq.len() {
            for j in i + 1..seq.len() {
                total += op.apply_i32(seq[i], seq[j]);
            }
        }
        total
    }

    fn brute_unsigned(seq: &[i32], op: PairwiseOp) -> u128 {
        let mut total = 0u128;
        for i in 0..seq.len() {
            for j in i + 1..seq.len() {
                total += op.apply(seq[i].pattern(), seq[j].pattern()) as u128;
            }
        }
        total
    }

    #[test]
    fn xor_sum_of_small_sequence() {
        // 7^3 + 7^5 + 3^5 = 4 + 2 + 6
        assert_eq!(bit_plane_aggregate(&[7, 3, 5], PairwiseOp::Xor), 12);
    }

    #[test]
    fn and_sum_matches_pair_products() {
        // 1&2 + 1&3 + 2&3 = 0 + 1 + 2
        assert_eq!(bit_plane_aggregate(&[1, 2, 3], PairwiseOp::And), 3);
        // 5&10 + 5&15 + 10&15 = 0 + 5 + 10
        assert_eq!(bit_plane_aggregate(&[5, 10, 15], PairwiseOp::And), 15);
    }

    #[test]
    fn or_sum_matches_pair_unions() {
        // 1|2 + 1|3 + 2|3 = 3 + 3 + 3
        assert_eq!(bit_plane_aggregate(&[1, 2, 3], PairwiseOp::Or), 9);
    }

    #[test]
    fn hamming_and_bit_difference() {
        assert_eq!(bit_plane_aggregate(&[4, 14, 2], PairwiseOp::Hamming), 6);
        assert_eq!(bit_plane_aggregate(&[1, 2], PairwiseOp::BitDifference), 4);
        assert_eq!(bit_plane_aggregate(&[1, 3, 5], PairwiseOp::BitDifference), 8);
    }

    #[test]
    fn sign_plane_counts_negative() {
        // -1^0 + -1^5 + 0^5 = -1 - 6 + 5
        assert_eq!(bit_plane_aggregate(&[-1, 0, 5], PairwiseOp::Xor), -2);
        // -1&-1 + -1&4 + -1&4 = -1 + 4 + 4
        assert_eq!(bit_plane_aggregate(&[-1, -1, 4], PairwiseOp::And), 7);
        assert_eq!(bit_plane_aggregate(&[i32::MIN, 0], PairwiseOp::Or), i32::MIN as i64);
        assert_eq!(bit_plane_aggregate(&[-1, 0, 5], PairwiseOp::Hamming), 32 + 30 + 2);
    }

    #[test]
    fn every_op_agrees_with_brute_force_including_negatives() {
        let seq = [-7, 0, 13, i32::MIN, 255, -1, 1 << 30, 42];
        for op in PairwiseOp::ALL {
            assert_eq!(bit_plane_aggregate(&seq, op), brute(&seq, op), "{op:?}");
            assert_eq!(bit_plane_aggregate_wide(&seq, op, BitWidth::W32), brute_unsigned(&seq, op), "{op:?}");
        }
    }

    #[test]
    fn empty_and_singleton_give_zero() {
        for op in PairwiseOp::ALL {
            assert_eq!(bit_plane_aggregate(&[], op), 0);
            assert_eq!(bit_plane_aggregate(&[99], op), 0);
        }
    }

    #[test]
    fn large_inputs_do_not_wrap() {
        // 10_000 copies of 0 and of -1: 10^8 differing pairs per plane
        let mut seq = vec![0i32; 10_000];
        seq.extend(std::iter::repeat(-1i32).take(10_000));
        assert_eq!(bit_plane_aggregate(&seq, PairwiseOp::Xor), -100_000_000);
        assert_eq!(bit_plane_aggregate(&seq, PairwiseOp::And), -49_995_000);
        assert_eq!(bit_plane_aggregate(&seq, PairwiseOp::Or), -149_995_000);
        assert_eq!(bit_plane_aggregate(&seq, PairwiseOp::Hamming), 100_000_000 * 32);
        let unsigned = bit_plane_aggregate_wide(&seq, PairwiseOp::Xor, BitWidth::W32);
        assert_eq!(unsigned, 100_000_000u128 * u32::MAX as u128);
    }

    #[test]
    fn wide_width_sums_64_bit_values() {
        let seq = [u64::MAX, 0];
        assert_eq!(bit_plane_aggregate_wide(&seq, PairwiseOp::Xor, BitWidth::W64), u64::MAX as u128);
        assert_eq!(bit_plane_aggregate_wide(&seq, PairwiseOp::Hamming, BitWidth::W64), 64);
    }

    #[test]
    fn max_pairwise_and_picks_best_pair() {
        assert_eq!(max_pairwise_and(&[4, 8, 12, 16]), 8);
        assert_eq!(max_pairwise_and(&[4, 8, 16, 2]), 0);
        assert_eq!(max_pairwise_and(&[u32::MAX, u32::MAX - 1, 1]), u32::MAX - 1);
        assert_eq!(max_pairwise_and(&[7]), 0);
        assert_eq!(max_pairwise_and(&[]), 0);
    }
}

// Bitplane - aggregate bitwise queries over fixed-width integer sequences

mod error;
mod width;
mod planes;
mod aggregate;
mod parity;
mod kbits;
mod bits;
mod config;

pub use error::{BitsError, Result};
pub use width::BitWidth;
pub use planes::{PlaneCounts, PlaneWord};
pub use aggregate::{
    aggregate_planes, aggregate_planes_signed, bit_plane_aggregate, bit_plane_aggregate_wide,
    max_pairwise_and, PairwiseOp,
};
pub use parity::{
    find_missing_and_repeating, find_missing_number, find_two_uniques_among_pairs,
    find_unique_among_pairs, find_unique_among_repeats, find_unique_among_triples, xor_up_to,
};
pub use kbits::{binomial, count_k_set_bits_up_to, count_values_with_k_set_bits_in_range, KSetBitTable};
pub use bits::{
    binary_to_gray, bitwise_or_range, count_bits_flip, count_set_bits_up_to, count_unset_bits_in_range,
    gray_to_binary, is_binary_multiple_of_three, is_bleak, max_consecutive_ones, min_xor_with_popcount_of,
    submasks_desc,
};
pub use config::AggregateCfg;

/// Width used when no configuration says otherwise.
pub const DEFAULT_WIDTH_BITS: u32 = 32;

/// Inputs shorter than this are always tallied on the calling thread.
pub const DEFAULT_PARALLEL_MIN_LEN: usize = 65_536;

/// Binds a validated configuration to the plane-based queries.
pub struct Calculator {
    cfg: AggregateCfg,
    width: BitWidth,
}

impl Calculator {
    pub fn new(cfg: AggregateCfg) -> Result<Self> {
        let width = cfg.validate()?;
        Ok(Self { cfg, width })
    }

    #[inline] pub fn width(&self) -> BitWidth { self.width }
    #[inline] pub fn config(&self) -> &AggregateCfg { &self.cfg }

    /// Plane counts of `seq` at the configured width.
    pub fn planes<T: PlaneWord>(&self, seq: &[T]) -> PlaneCounts {
        if self.cfg.parallel && seq.len() >= self.cfg.parallel_min_len {
            tracing::debug!(len = seq.len(), width = self.width.bits(), "parallel plane tally");
            PlaneCounts::tally_par(seq, self.width)
        } else {
            PlaneCounts::tally(seq, self.width)
        }
    }

    pub fn aggregate<T: PlaneWord>(&self, seq: &[T], op: PairwiseOp) -> u128 {
        aggregate_planes(&self.planes(seq), op)
    }

    /// Bit pattern of the value seen once when all others repeat `repeat` times.
    pub fn find_unique_among_repeats<T: PlaneWord>(&self, seq: &[T], repeat: u32) -> Result<u64> {
        parity::unique_pattern(&self.planes(seq), repeat)
    }

    /// Precompute the `k`-set-bit table at the configured width.
    pub fn k_set_bit_table(&self, k: u32) -> Result<KSetBitTable> {
        KSetBitTable::new(k, self.width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn calculator_paths_agree() {
        let seq: Vec<i64> = (0..5_000i64).map(|i| i * 7919 - 12_345).collect();
        let serial = Calculator::new(AggregateCfg { width_bits: 64, ..Default::default() }).unwrap();
        let par = Calculator::new(AggregateCfg {
            width_bits: 64,
            parallel: true,
            parallel_min_len: 1,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(serial.planes(&seq), par.planes(&seq));
        for op in PairwiseOp::ALL {
            assert_eq!(serial.aggregate(&seq, op), par.aggregate(&seq, op));
        }
    }

    #[test]
    fn calculator_defaults_to_32_bits() {
        let calc = Calculator::new(AggregateCfg::default()).unwrap();
        assert_eq!(calc.width(), BitWidth::W32);
        // non-negative, so unsigned and signed sums agree
        let seq = [3i32, 0x7FFF_0000, 17, 0];
        for op in PairwiseOp::ALL {
            assert_eq!(calc.aggregate(&seq, op) as i64, bit_plane_aggregate(&seq, op));
        }
    }

    #[test]
    fn calculator_rejects_bad_config() {
        assert!(matches!(
            Calculator::new(AggregateCfg { width_bits: 0, ..Default::default() }),
            Err(BitsError::InvalidWidth(0))
        ));
    }

    #[test]
    fn calculator_repeats_and_tables() {
        let calc = Calculator::new(AggregateCfg { width_bits: 8, ..Default::default() }).unwrap();
        assert_eq!(calc.find_unique_among_repeats(&[9u32, 9, 9, 9, 200], 4).unwrap(), 200);
        assert!(matches!(calc.find_unique_among_repeats(&[1u32], 0), Err(BitsError::InvalidRepeat(0))));
        assert!(matches!(calc.find_unique_among_repeats(&[1u32], 1), Err(BitsError::InvalidRepeat(1))));
        assert_eq!(calc.find_unique_among_repeats(&[5u32, 7, 5], 2).unwrap(), 7);

        let t = calc.k_set_bit_table(3).unwrap();
        assert_eq!(t.len(), 56);
        assert_eq!(t.count_in_range(0, 255), 56);
    }
}

use crate::{BitsError, Result};

/// Number of low bit positions a query looks at. Always within `1..=64`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct BitWidth(u32);

impl BitWidth {
    pub const MAX_BITS: u32 = 64;
    pub const W32: BitWidth = BitWidth(32);
    pub const W64: BitWidth = BitWidth(64);

    pub fn new(bits: u32) -> Result<Self> {
        if bits == 0 || bits > Self::MAX_BITS {
            return Err(BitsError::InvalidWidth(bits));
        }
        Ok(Self(bits))
    }

    #[inline]
    pub fn bits(self) -> u32 {
        self.0
    }

    /// Plane indices `0..W`, low to high.
    #[inline]
    pub fn planes(self) -> core::ops::Range<u32> {
        0..self.0
    }

    /// Mask covering the low `W` bits.
    #[inline]
    pub fn mask(self) -> u64 {
        u64::MAX >> (Self::MAX_BITS - self.0)
    }

    /// Largest value representable in `W` bits.
    #[inline]
    pub fn max_value(self) -> u64 {
        self.mask()
    }
}

impl Default for BitWidth {
    fn default() -> Self {
        Self::W32
    }
}

impl TryFrom<u32> for BitWidth {
    type Error = BitsError;

    fn try_from(bits: u32) -> Result<Self> {
        Self::new(bits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masks_cover_low_bits() {
        assert_eq!(BitWidth::new(1).unwrap().mask(), 1);
        assert_eq!(BitWidth::new(3).unwrap().mask(), 0b111);
        assert_eq!(BitWidth::W32.mask(), u32::MAX as u64);
        assert_eq!(BitWidth::W64.mask(), u64::MAX);
        assert_eq!(BitWidth::W32.planes().len(), 32);
    }

    #[test]
    fn rejects_out_of_range_widths() {
        assert!(matches!(BitWidth::new(0), Err(BitsError::InvalidWidth(0))));
        assert!(matches!(BitWidth::try_from(65), Err(BitsError::InvalidWidth(65))));
        assert_eq!(BitWidth::default(), BitWidth::W32);
    }
}

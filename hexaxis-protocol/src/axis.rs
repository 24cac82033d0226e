//! Axis addressing
//!
//! The wire uses 1-based axis digits; everything behind the tokenizer uses
//! a validated 0-based index.

/// Number of independently controlled axes
pub const AXIS_COUNT: usize = 6;

/// Validated axis index in `0..AXIS_COUNT`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AxisId(u8);

impl AxisId {
    /// Create an axis from a 0-based index
    pub const fn new(index: usize) -> Option<Self> {
        if index < AXIS_COUNT {
            Some(Self(index as u8))
        } else {
            None
        }
    }

    /// Decode the wire digit `'1'..='6'`
    pub fn from_digit(byte: u8) -> Option<Self> {
        match byte {
            b'1'..=b'9' => Self::new((byte - b'1') as usize),
            _ => None,
        }
    }

    /// 0-based index, suitable for array access
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// 1-based axis number as printed on the wire
    pub const fn number(self) -> u8 {
        self.0 + 1
    }

    /// Iterate over all axes in order
    pub fn all() -> impl Iterator<Item = AxisId> {
        (0..AXIS_COUNT as u8).map(AxisId)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digit_mapping() {
        assert_eq!(AxisId::from_digit(b'1').map(AxisId::index), Some(0));
        assert_eq!(AxisId::from_digit(b'6').map(AxisId::index), Some(5));
        assert_eq!(AxisId::from_digit(b'6').map(AxisId::number), Some(6));
    }

    #[test]
    fn test_out_of_range_digits() {
        assert_eq!(AxisId::from_digit(b'0'), None);
        assert_eq!(AxisId::from_digit(b'7'), None);
        assert_eq!(AxisId::from_digit(b'9'), None);
        assert_eq!(AxisId::from_digit(b'x'), None);
        assert_eq!(AxisId::new(AXIS_COUNT), None);
    }

    #[test]
    fn test_all_in_order() {
        let indices: Vec<usize> = AxisId::all().map(AxisId::index).collect();
        assert_eq!(indices, vec![0, 1, 2, 3, 4, 5]);
    }
}

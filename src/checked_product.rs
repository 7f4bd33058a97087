//! Overflow-checked product of an iterator of numbers.

use num_traits::{CheckedMul, One};

/// Iterator extension trait for calculating the product of numbers with overflow checking.
pub trait CheckedProduct<T> {
    /// Multiplies numbers in an iterator, checking for overflow.
    /// Returns `None` if overflow occurred.
    fn checked_product(self) -> Option<T>;
}

impl<T, I> CheckedProduct<T> for I
where
    T: CheckedMul + One,
    I: Iterator<Item = T>,
{
    fn checked_product(mut self) -> Option<T> {
        self.try_fold(T::one(), |acc, value| acc.checked_mul(&value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multiplies_quadrant_counts() {
        let counts = [12_u32, 9, 11, 7];
        assert_eq!(counts.into_iter().checked_product(), Some(8316));
    }

    #[test]
    fn empty_product_is_one() {
        assert_eq!(std::iter::empty::<u64>().checked_product(), Some(1));
    }

    #[test]
    fn overflow_is_none() {
        assert_eq!([16_u8, 16].into_iter().checked_product(), None);
        assert_eq!([0_u8, 16, 16].into_iter().checked_product(), Some(0));
    }
}

//! Arbitrary-precision signed integers.
//!
//! [`Integer`] keeps values that fit in an `i64` in a native word and falls
//! back to [`BigInt`] for everything else. The representation is canonical:
//! a value that fits in an `i64` is never stored as a `BigInt`, so derived
//! equality and hashing agree with numeric equality.
//!
//! # Example
//!
//! ```
//! use keycoder::Integer;
//!
//! let small = Integer::from(-129i64);
//! assert_eq!(small.to_i64(), Some(-129));
//! assert_eq!(small.magnitude_be(), vec![0x81]);
//!
//! let big: Integer = "340282366920938463463374607431768211456".parse().unwrap();
//! assert!(big.to_i64().is_none());
//! assert!(big > Integer::from(u64::MAX));
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use num_bigint::{BigInt, BigUint, Sign};
use num_traits::{Signed, ToPrimitive};
use serde::{Deserialize, Serialize};

/// A signed integer of unbounded precision.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "BigInt", into = "BigInt")]
pub struct Integer(Repr);

#[derive(Clone, PartialEq, Eq, Hash)]
enum Repr {
    /// Any value in `i64` range.
    Small(i64),
    /// Only values outside `i64` range.
    Big(BigInt),
}

/// Big-endian magnitude bytes of an [`Integer`] without leading zeros.
pub(crate) enum Magnitude {
    Word([u8; 8], usize),
    Big(Vec<u8>),
}

impl Magnitude {
    pub(crate) fn as_slice(&self) -> &[u8] {
        match self {
            Self::Word(bytes, start) => &bytes[*start..],
            Self::Big(bytes) => bytes,
        }
    }
}

impl Integer {
    /// The integer zero.
    pub const ZERO: Self = Self(Repr::Small(0));

    /// Build an integer from a sign and a big-endian magnitude.
    ///
    /// Leading zero bytes are allowed here; an empty magnitude is zero, and a
    /// zero magnitude is zero regardless of `negative`.
    #[must_use]
    pub fn from_sign_magnitude(negative: bool, magnitude: &[u8]) -> Self {
        let first = magnitude.iter().position(|&b| b != 0).unwrap_or(magnitude.len());
        let magnitude = &magnitude[first..];
        if magnitude.len() <= 8 {
            let mut word = [0u8; 8];
            word[8 - magnitude.len()..].copy_from_slice(magnitude);
            let abs = i128::from(u64::from_be_bytes(word));
            let value = if negative { -abs } else { abs };
            return Self::from(value);
        }
        let sign = if negative { Sign::Minus } else { Sign::Plus };
        Self(Repr::Big(BigInt::from_bytes_be(sign, magnitude)))
    }

    /// Returns `true` if the value is below zero.
    #[inline]
    #[must_use]
    pub fn is_negative(&self) -> bool {
        match &self.0 {
            Repr::Small(v) => *v < 0,
            Repr::Big(v) => v.is_negative(),
        }
    }

    /// Returns `true` if the value is zero.
    #[inline]
    #[must_use]
    pub fn is_zero(&self) -> bool {
        matches!(self.0, Repr::Small(0))
    }

    /// Returns the value as an `i64` if it fits.
    #[inline]
    #[must_use]
    pub fn to_i64(&self) -> Option<i64> {
        match &self.0 {
            Repr::Small(v) => Some(*v),
            Repr::Big(_) => None,
        }
    }

    /// Returns the value as a `u64` if it fits.
    #[must_use]
    pub fn to_u64(&self) -> Option<u64> {
        match &self.0 {
            Repr::Small(v) => u64::try_from(*v).ok(),
            Repr::Big(v) => v.to_u64(),
        }
    }

    /// Returns the value as an `i128` if it fits.
    #[must_use]
    pub fn to_i128(&self) -> Option<i128> {
        match &self.0 {
            Repr::Small(v) => Some(i128::from(*v)),
            Repr::Big(v) => v.to_i128(),
        }
    }

    /// Returns the value as a [`BigInt`].
    #[must_use]
    pub fn to_bigint(&self) -> BigInt {
        match &self.0 {
            Repr::Small(v) => BigInt::from(*v),
            Repr::Big(v) => v.clone(),
        }
    }

    /// Big-endian bytes of the absolute value in minimal form.
    ///
    /// Zero has an empty magnitude.
    #[must_use]
    pub fn magnitude_be(&self) -> Vec<u8> {
        self.magnitude().as_slice().to_vec()
    }

    pub(crate) fn magnitude(&self) -> Magnitude {
        match &self.0 {
            Repr::Small(v) => {
                let bytes = v.unsigned_abs().to_be_bytes();
                let start = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
                Magnitude::Word(bytes, start)
            }
            Repr::Big(v) => Magnitude::Big(v.magnitude().to_bytes_be()),
        }
    }
}

impl Default for Integer {
    fn default() -> Self {
        Self::ZERO
    }
}

impl Ord for Integer {
    fn cmp(&self, other: &Self) -> Ordering {
        match (&self.0, &other.0) {
            (Repr::Small(a), Repr::Small(b)) => a.cmp(b),
            // A big value lies outside i64 range, so its sign decides.
            (Repr::Small(_), Repr::Big(b)) => {
                if b.is_negative() {
                    Ordering::Greater
                } else {
                    Ordering::Less
                }
            }
            (Repr::Big(a), Repr::Small(_)) => {
                if a.is_negative() {
                    Ordering::Less
                } else {
                    Ordering::Greater
                }
            }
            (Repr::Big(a), Repr::Big(b)) => a.cmp(b),
        }
    }
}

impl PartialOrd for Integer {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Repr::Small(v) => fmt::Display::fmt(v, f),
            Repr::Big(v) => fmt::Display::fmt(v, f),
        }
    }
}

impl fmt::Debug for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl FromStr for Integer {
    type Err = num_bigint::ParseBigIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BigInt::from_str(s).map(Self::from)
    }
}

impl From<BigInt> for Integer {
    fn from(v: BigInt) -> Self {
        match v.to_i64() {
            Some(small) => Self(Repr::Small(small)),
            None => Self(Repr::Big(v)),
        }
    }
}

impl From<BigUint> for Integer {
    fn from(v: BigUint) -> Self {
        Self::from(BigInt::from(v))
    }
}

impl From<Integer> for BigInt {
    fn from(v: Integer) -> Self {
        match v.0 {
            Repr::Small(small) => Self::from(small),
            Repr::Big(big) => big,
        }
    }
}

macro_rules! impl_from_word {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Integer {
                #[inline]
                fn from(v: $t) -> Self {
                    Self(Repr::Small(i64::from(v)))
                }
            }
        )*
    };
}

impl_from_word!(i8, i16, i32, i64, u8, u16, u32);

macro_rules! impl_from_wide {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Integer {
                fn from(v: $t) -> Self {
                    match i64::try_from(v) {
                        Ok(small) => Self(Repr::Small(small)),
                        Err(_) => Self(Repr::Big(BigInt::from(v))),
                    }
                }
            }
        )*
    };
}

impl_from_wide!(u64, i128, u128, isize, usize);

// SPDX-FileCopyrightText: 2024 Alexandru Fikl <alexfikl@gmail.com>
// SPDX-License-Identifier: MIT

//! Signed fixed-point numbers in a 32-bit word.
//!
//! ```text
//!   | sign:1 | integer:(31 - FRAC) | fraction:FRAC |
//! ```
//!
//! The split is a type parameter, so the three widths always add up to 32.
//! Addition and subtraction wrap like the underlying `i32`. Multiplication
//! truncates the low bits and does not check for overflow of the integer part.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use num_traits::{One, Zero};

use crate::bits::{F32Fields, IEEE_BIAS, IEEE_EXPONENT_MASK, IEEE_IMPLICIT_ONE, IEEE_MANTISSA_BITS};
use crate::mandelbrot::EscapeScalar;

/// Fixed point with 4 integer bits (including the sign) and 28 fractional bits.
pub type I4F28 = Fixed<28>;

/// Fixed point with 7 integer bits (including the sign) and 25 fractional bits.
///
/// Every intermediate of the Mandelbrot iteration stays below 64 in magnitude,
/// so this is the split used for rendering.
pub type I7F25 = Fixed<25>;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Fixed<const FRAC: u32>(i32);

impl<const FRAC: u32> Fixed<FRAC> {
    const VALID_SPLIT: () = assert!(FRAC >= 1 && FRAC <= 30, "unsupported fixed-point split");

    /// Number of fractional bits.
    pub const FRAC_BITS: u32 = FRAC;
    /// Number of integer bits, not counting the sign.
    pub const INT_BITS: u32 = 31 - FRAC;

    pub const fn from_bits(bits: i32) -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::VALID_SPLIT;
        Fixed(bits)
    }

    pub const fn to_bits(self) -> i32 {
        self.0
    }

    /// Convert a native float by decoding its bit fields.
    ///
    /// Denormals, infinities and NaNs are not representable and become zero.
    /// Values outside the integer range wrap.
    pub fn from_f32(value: f32) -> Self {
        let fields = F32Fields::from_f32(value);
        if fields.exponent == 0 || fields.exponent == IEEE_EXPONENT_MASK {
            return Self::from_bits(0);
        }

        let exponent = fields.exponent as i32 - IEEE_BIAS;
        let mut mantissa = IEEE_IMPLICIT_ONE | fields.mantissa;
        mantissa = if exponent >= 0 {
            mantissa.checked_shl(exponent as u32).unwrap_or(0)
        } else {
            mantissa.checked_shr((-exponent) as u32).unwrap_or(0)
        };

        // mantissa is now in units of 2^-23
        let magnitude = if FRAC >= IEEE_MANTISSA_BITS {
            mantissa << (FRAC - IEEE_MANTISSA_BITS)
        } else {
            mantissa >> (IEEE_MANTISSA_BITS - FRAC)
        } as i32;

        if fields.sign == 1 {
            Self::from_bits(magnitude.wrapping_neg())
        } else {
            Self::from_bits(magnitude)
        }
    }

    pub fn to_f32(self) -> f32 {
        (self.0 as f64 / (1u64 << FRAC) as f64) as f32
    }

    /// Widening multiply followed by an arithmetic right shift.
    ///
    /// The shift truncates towards negative infinity; there is no rounding.
    pub fn multiply(self, rhs: Self) -> Self {
        let product = (self.0 as i64) * (rhs.0 as i64);
        Self::from_bits((product >> FRAC) as i32)
    }

    /// Bits as `sign | integer | fraction`.
    pub fn format_bits(self) -> String {
        crate::bits::format_bits(self.0 as u32, &[1, Self::INT_BITS, FRAC])
    }
}

impl<const FRAC: u32> Add for Fixed<FRAC> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::from_bits(self.0.wrapping_add(rhs.0))
    }
}

impl<const FRAC: u32> Sub for Fixed<FRAC> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::from_bits(self.0.wrapping_sub(rhs.0))
    }
}

impl<const FRAC: u32> Mul for Fixed<FRAC> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        self.multiply(rhs)
    }
}

impl<const FRAC: u32> Neg for Fixed<FRAC> {
    type Output = Self;

    fn neg(self) -> Self {
        Self::from_bits(self.0.wrapping_neg())
    }
}

impl<const FRAC: u32> Zero for Fixed<FRAC> {
    fn zero() -> Self {
        Self::from_bits(0)
    }

    fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl<const FRAC: u32> One for Fixed<FRAC> {
    fn one() -> Self {
        Self::from_bits(1 << FRAC)
    }
}

impl<const FRAC: u32> EscapeScalar for Fixed<FRAC> {
    fn from_f32(value: f32) -> Self {
        Fixed::from_f32(value)
    }

    fn less_than(self, other: Self) -> bool {
        self.0 < other.0
    }
}

impl<const FRAC: u32> fmt::Binary for Fixed<FRAC> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_bits())
    }
}

impl<const FRAC: u32> fmt::Display for Fixed<FRAC> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_f32())
    }
}

// {{{ tests


// }}}

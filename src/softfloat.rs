// SPDX-FileCopyrightText: 2024 Alexandru Fikl <alexfikl@gmail.com>
// SPDX-License-Identifier: MIT

//! A 32-bit floating point format implemented on integer operations only.
//!
//! ```text
//!   bit 31   30 ............ 8   7 ........ 0
//!   | sign |   mantissa:23     | exponent:8 |
//! ```
//!
//! The exponent is biased by 250 and the mantissa carries an implicit leading
//! one. There are no denormals, infinities or NaNs: an exponent field of 0 is
//! zero (or underflow) and 255 is the saturated overflow value.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use num_traits::{One, Zero};

use crate::bits::{
    F32Fields, SoftFields, BIAS_DIFFERENCE, SIGN_MASK, SOFT_BIAS,
    SOFT_EXPONENT_BITS, SOFT_EXPONENT_MASK, SOFT_IMPLICIT_ONE, SOFT_MANTISSA_BITS,
    SOFT_MANTISSA_FIELD_MASK,
};
use crate::mandelbrot::EscapeScalar;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct SoftFloat(u32);

impl SoftFloat {
    /// All bits clear.
    pub const ZERO: SoftFloat = SoftFloat(0);

    pub const fn from_bits(bits: u32) -> Self {
        SoftFloat(bits)
    }

    pub const fn to_bits(self) -> u32 {
        self.0
    }

    pub fn sign(self) -> u32 {
        self.0 >> 31
    }

    pub fn exponent(self) -> u32 {
        self.0 & SOFT_EXPONENT_MASK
    }

    pub fn is_saturated(self) -> bool {
        self.exponent() == SOFT_EXPONENT_MASK
    }

    // {{{ conversion

    /// Move the fields of a native float into place and rebias the exponent.
    ///
    /// Unlike the fixed-point conversion, nothing is special-cased: the
    /// rebiased exponent simply wraps into 8 bits.
    pub fn from_f32(value: f32) -> Self {
        let native = F32Fields::from_f32(value);
        SoftFloat(
            SoftFields {
                sign: native.sign,
                exponent: (native.exponent + BIAS_DIFFERENCE) & SOFT_EXPONENT_MASK,
                mantissa: native.mantissa,
            }
            .pack(),
        )
    }

    /// Decode back into a native float.
    ///
    /// Exponents below the native normal range flush to a signed zero.
    pub fn to_f32(self) -> f32 {
        let fields = SoftFields::unpack(self.0);
        if fields.exponent <= BIAS_DIFFERENCE {
            return F32Fields {
                sign: fields.sign,
                exponent: 0,
                mantissa: 0,
            }
            .to_f32();
        }

        F32Fields {
            sign: fields.sign,
            exponent: fields.exponent - BIAS_DIFFERENCE,
            mantissa: fields.mantissa,
        }
        .to_f32()
    }

    // }}}

    // {{{ arithmetic

    /// Sum of two values.
    ///
    /// The exponent is allowed to wrap through 0 and 255 during normalization:
    /// unlike [`SoftFloat::multiply`], no saturation is applied here.
    pub fn add(self, rhs: Self) -> Self {
        let a = SoftFields::unpack(self.0);
        let b = SoftFields::unpack(rhs.0);

        let mut mantissa_a = a.mantissa | SOFT_IMPLICIT_ONE;
        let mut mantissa_b = b.mantissa | SOFT_IMPLICIT_ONE;

        // align on the larger exponent
        let exponent = if a.exponent > b.exponent {
            mantissa_b = mantissa_b.checked_shr(a.exponent - b.exponent).unwrap_or(0);
            a.exponent
        } else {
            mantissa_a = mantissa_a.checked_shr(b.exponent - a.exponent).unwrap_or(0);
            b.exponent
        };

        let (mut mantissa, sign) = if a.sign == b.sign {
            (mantissa_a + mantissa_b, a.sign)
        } else {
            match mantissa_a.cmp(&mantissa_b) {
                Ordering::Greater => (mantissa_a - mantissa_b, a.sign),
                Ordering::Less => (mantissa_b - mantissa_a, b.sign),
                // exact cancellation
                Ordering::Equal => return SoftFloat::ZERO,
            }
        };

        let mut exponent = exponent as u8;
        if mantissa & (SOFT_IMPLICIT_ONE << 1) != 0 {
            mantissa >>= 1;
            exponent = exponent.wrapping_add(1);
        }
        while mantissa & SOFT_IMPLICIT_ONE == 0 && mantissa != 0 {
            mantissa <<= 1;
            exponent = exponent.wrapping_sub(1);
        }

        SoftFloat(
            SoftFields {
                sign,
                exponent: exponent as u32,
                mantissa: mantissa & SOFT_MANTISSA_FIELD_MASK,
            }
            .pack(),
        )
    }

    /// Product of two values.
    ///
    /// Results whose exponent would reach 255 saturate to `sign | 0xFF`, and
    /// results whose exponent would drop to 0 or below become a signed zero.
    pub fn multiply(self, rhs: Self) -> Self {
        let a = SoftFields::unpack(self.0);
        let b = SoftFields::unpack(rhs.0);
        let sign = a.sign ^ b.sign;

        let mantissa_a = (a.mantissa | SOFT_IMPLICIT_ONE) as u64;
        let mantissa_b = (b.mantissa | SOFT_IMPLICIT_ONE) as u64;
        let mut product = mantissa_a * mantissa_b;

        // both factors are in [1, 2), so the product is in [1, 4) scaled by 2^46
        let mut exponent_a = a.exponent as i32;
        if product >= 1u64 << (2 * SOFT_MANTISSA_BITS + 1) {
            product >>= SOFT_MANTISSA_BITS + 1;
            exponent_a += 1;
        } else {
            product >>= SOFT_MANTISSA_BITS;
        }

        // adding two biased exponents counts the bias twice
        let exponent = exponent_a + b.exponent as i32 - SOFT_BIAS;
        if exponent >= SOFT_EXPONENT_MASK as i32 {
            return SoftFloat((sign << 31) | SOFT_EXPONENT_MASK);
        } else if exponent <= 0 {
            return SoftFloat(sign << 31);
        }

        SoftFloat(
            SoftFields {
                sign,
                exponent: exponent as u32,
                mantissa: product as u32 & SOFT_MANTISSA_FIELD_MASK,
            }
            .pack(),
        )
    }

    pub fn negate(self) -> Self {
        SoftFloat(self.0 ^ SIGN_MASK)
    }

    /// Strict ordering computed on the fields, without converting to `f32`.
    pub fn less_than(self, rhs: Self) -> bool {
        let a = SoftFields::unpack(self.0);
        let b = SoftFields::unpack(rhs.0);

        if a.sign != b.sign {
            return a.sign > b.sign;
        }

        let negative = a.sign == 1;
        if a.exponent != b.exponent {
            return (a.exponent < b.exponent) != negative;
        }
        if a.mantissa != b.mantissa {
            return (a.mantissa < b.mantissa) != negative;
        }

        false
    }

    // }}}

    /// Bits as `sign | mantissa | exponent`.
    pub fn format_bits(self) -> String {
        crate::bits::format_bits(self.0, &[1, SOFT_MANTISSA_BITS, SOFT_EXPONENT_BITS])
    }
}

// {{{ operators

impl Add for SoftFloat {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        SoftFloat::add(self, rhs)
    }
}

impl Sub for SoftFloat {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        SoftFloat::add(self, rhs.negate())
    }
}

impl Mul for SoftFloat {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        self.multiply(rhs)
    }
}

impl Neg for SoftFloat {
    type Output = Self;

    fn neg(self) -> Self {
        self.negate()
    }
}

impl Ord for SoftFloat {
    fn cmp(&self, other: &Self) -> Ordering {
        if self.0 == other.0 {
            Ordering::Equal
        } else if self.less_than(*other) {
            Ordering::Less
        } else {
            Ordering::Greater
        }
    }
}

impl PartialOrd for SoftFloat {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Only the words with every exponent and mantissa bit clear are zero.
///
/// [`SoftFloat::from_f32`] does not special-case native zero, which lands on
/// exponent 123 (the value `2^-127`), so `from_f32(0.0).is_zero()` is false.
impl Zero for SoftFloat {
    fn zero() -> Self {
        SoftFloat::ZERO
    }

    fn is_zero(&self) -> bool {
        self.0 & !SIGN_MASK == 0
    }
}

impl One for SoftFloat {
    fn one() -> Self {
        SoftFloat(SOFT_BIAS as u32)
    }
}

impl EscapeScalar for SoftFloat {
    fn from_f32(value: f32) -> Self {
        SoftFloat::from_f32(value)
    }

    fn less_than(self, other: Self) -> bool {
        SoftFloat::less_than(self, other)
    }
}

impl fmt::Binary for SoftFloat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_bits())
    }
}

impl fmt::Display for SoftFloat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_f32())
    }
}

// }}}

// {{{ tests

#[cfg(test)]
mod tests {
    use super::*;

    fn soft(value: f32) -> SoftFloat {
        SoftFloat::from_f32(value)
    }

    #[test]
    fn test_from_f32_layout() {
        // 1.5: native exponent 127 -> 250, mantissa 0b100..0
        assert_eq!(soft(1.5).to_bits(), (1 << 22) << 8 | 250);
        assert_eq!(soft(-1.5).to_bits(), SIGN_MASK | (1 << 22) << 8 | 250);
        assert_eq!(soft(1.0), SoftFloat::one());

        // native zero has a zero exponent field and lands on 123
        assert_eq!(soft(0.0).to_bits(), 123);
        assert_eq!(soft(-0.0).to_bits(), SIGN_MASK | 123);
    }

    #[test]
    fn test_from_f32_exponent_wraps() {
        // 64.0 has native exponent 133 and wraps to 0
        assert_eq!(soft(64.0).exponent(), 0);
        assert_eq!(soft(32.0).exponent(), 255);
    }

    #[test]
    fn test_to_f32() {
        for value in [1.5, 4.75, -0.5, 0.125, -15.785, 31.5, 1.0e-30] {
            assert_eq!(soft(value).to_f32(), value);
        }
        assert_eq!(SoftFloat::ZERO.to_f32(), 0.0);
        assert_eq!(soft(0.0).to_f32(), 0.0);
    }

    #[test]
    fn test_add_vectors() {
        assert_eq!(soft(1.5) + soft(4.75), soft(6.25));
        assert_eq!(soft(-0.5) + soft(4.75), soft(4.25));
        assert_eq!(soft(0.75) + soft(-0.5), soft(0.25));
        assert_eq!(soft(-0.5) + soft(-4.75), soft(-5.25));
        assert_eq!(soft(-0.5) + soft(0.125), soft(-0.375));
    }

    #[test]
    fn test_add_cancellation() {
        assert_eq!(soft(2.5) + soft(-2.5), SoftFloat::ZERO);
        assert_eq!(soft(-2.5) + soft(2.5), SoftFloat::ZERO);
        assert_eq!(soft(2.5) - soft(2.5), SoftFloat::ZERO);
    }

    #[test]
    fn test_add_carry() {
        // 1.75 + 1.75 carries into bit 24
        assert_eq!(soft(1.75) + soft(1.75), soft(3.5));
        assert_eq!(soft(3.0) - soft(1.0), soft(2.0));
    }

    #[test]
    fn test_add_negligible() {
        // the smaller operand is shifted out entirely
        assert_eq!(soft(1.0) + soft(1.0e-10), soft(1.0));
        assert_eq!(soft(4.0) + SoftFloat::ZERO, soft(4.0));
    }

    #[test]
    fn test_mul_vectors() {
        assert_eq!(soft(1.5) * soft(4.75), soft(7.125));
        assert_eq!(soft(0.5) * soft(4.75), soft(2.375));
        assert_eq!(soft(0.5) * soft(0.75), soft(0.375));
        assert_eq!(soft(-0.5) * soft(4.75), soft(-2.375));
        assert_eq!(soft(-0.5) * soft(-4.75), soft(2.375));
        assert_eq!(soft(-0.5) * soft(-0.75), soft(0.375));
    }

    #[test]
    fn test_mul_saturation() {
        // 2^4 * 2^2 = 2^6 needs exponent 256
        let overflow = soft(16.0) * soft(4.0);
        assert!(overflow.is_saturated());
        assert_eq!(overflow.to_bits(), 0xFF);

        let overflow = soft(-16.0) * soft(4.0);
        assert_eq!(overflow.to_bits(), SIGN_MASK | 0xFF);

        // 2^-126 lands on exponent 124, and 124 + 124 - 250 < 0
        let underflow = soft(f32::MIN_POSITIVE) * soft(-f32::MIN_POSITIVE);
        assert_eq!(underflow.to_bits(), SIGN_MASK);
        assert_eq!((soft(1.0e-30) * soft(1.0e-30)).exponent(), 50);
    }

    #[test]
    fn test_add_exponent_wraps() {
        // 32 + 32 carries out of exponent 255 and wraps to 0, without saturating
        let sum = soft(32.0) + soft(32.0);
        assert_eq!(sum.to_bits(), 0);
        assert_eq!(sum.exponent(), 0);
        assert!(!sum.is_saturated());

        // the same magnitude saturates when produced by multiply
        assert_eq!((soft(40.0) * soft(1.0)).to_bits(), 0xFF);

        // 1.0 * 2^-249 - 1.25 * 2^-249 needs two left shifts from exponent 1
        let a = SoftFloat::from_bits(1);
        let b = SoftFloat::from_bits(SIGN_MASK | (0x20_0000 << 8) | 1);
        let diff = a + b;
        assert_eq!(diff.to_bits(), SIGN_MASK | 0xFF);
        assert_eq!(b + a, diff);
    }

    #[test]
    fn test_zero_words() {
        assert!(SoftFloat::ZERO.is_zero());
        assert!(SoftFloat::from_bits(SIGN_MASK).is_zero());
        assert!(!soft(0.0).is_zero());
        assert_eq!(soft(0.0).to_f32(), 0.0);
    }

    #[test]
    fn test_negate() {
        assert_eq!(-soft(1.5), soft(-1.5));
        assert_eq!(soft(1.5).negate().negate(), soft(1.5));
        assert_eq!(SoftFloat::ZERO.negate().to_bits(), SIGN_MASK);
    }

    #[test]
    fn test_less_than_vectors() {
        assert!(soft(1.5).less_than(soft(2.0)));
        assert!(soft(-16.5).less_than(soft(2.0)));
        assert!(!soft(-15.785).less_than(soft(-15.85)));
        assert!(!soft(12.9).less_than(soft(12.88)));

        assert!(soft(-15.85) < soft(-15.785));
        assert!(soft(12.88) < soft(12.9));
        assert!(!soft(3.0).less_than(soft(3.0)));
    }

    #[test]
    fn test_format_bits() {
        assert_eq!(
            soft(-1.5).format_bits(),
            "1 | 10000000000000000000000 | 11111010"
        );
    }
}

// }}}

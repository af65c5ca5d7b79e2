// SPDX-FileCopyrightText: 2024 Alexandru Fikl <alexfikl@gmail.com>
// SPDX-License-Identifier: MIT

//! Bit-field helpers for the native `f32` layout and the soft-float layout.
//!
//! ```text
//!   native f32:  | sign:1 | exponent:8 | mantissa:23 |
//!   soft float:  | sign:1 | mantissa:23 | exponent:8 |
//! ```

// {{{ constants

pub const SIGN_MASK: u32 = 1 << 31;

pub const IEEE_EXPONENT_BITS: u32 = 8;
pub const IEEE_EXPONENT_MASK: u32 = (1 << IEEE_EXPONENT_BITS) - 1;
pub const IEEE_MANTISSA_BITS: u32 = 23;
pub const IEEE_MANTISSA_MASK: u32 = (1 << IEEE_MANTISSA_BITS) - 1;
pub const IEEE_BIAS: i32 = 127;
pub const IEEE_IMPLICIT_ONE: u32 = 1 << IEEE_MANTISSA_BITS;

pub const SOFT_EXPONENT_BITS: u32 = 8;
pub const SOFT_EXPONENT_MASK: u32 = (1 << SOFT_EXPONENT_BITS) - 1;
pub const SOFT_MANTISSA_BITS: u32 = 23;
/// Mantissa mask once shifted down to bit 0.
pub const SOFT_MANTISSA_FIELD_MASK: u32 = (1 << SOFT_MANTISSA_BITS) - 1;
/// Mantissa mask in place, i.e. bits 8 through 30.
pub const SOFT_MANTISSA_MASK: u32 = SOFT_MANTISSA_FIELD_MASK << SOFT_EXPONENT_BITS;
pub const SOFT_BIAS: i32 = 250;
pub const SOFT_IMPLICIT_ONE: u32 = 1 << SOFT_MANTISSA_BITS;

/// Difference between the soft-float and native exponent biases (123).
pub const BIAS_DIFFERENCE: u32 = (SOFT_BIAS - IEEE_BIAS) as u32;

// }}}

// {{{ native fields

/// Sign, biased exponent and stored mantissa of a native `f32`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct F32Fields {
    pub sign: u32,
    pub exponent: u32,
    pub mantissa: u32,
}

impl F32Fields {
    pub fn from_bits(bits: u32) -> Self {
        F32Fields {
            sign: bits >> 31,
            exponent: (bits >> IEEE_MANTISSA_BITS) & IEEE_EXPONENT_MASK,
            mantissa: bits & IEEE_MANTISSA_MASK,
        }
    }

    pub fn from_f32(value: f32) -> Self {
        Self::from_bits(value.to_bits())
    }

    pub fn to_bits(&self) -> u32 {
        ((self.sign & 1) << 31)
            | ((self.exponent & IEEE_EXPONENT_MASK) << IEEE_MANTISSA_BITS)
            | (self.mantissa & IEEE_MANTISSA_MASK)
    }

    pub fn to_f32(&self) -> f32 {
        f32::from_bits(self.to_bits())
    }
}

// }}}

// {{{ soft fields

/// Fields of a soft-float word, with the mantissa shifted down to bits 0..23.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SoftFields {
    pub sign: u32,
    pub exponent: u32,
    pub mantissa: u32,
}

impl SoftFields {
    pub fn unpack(word: u32) -> Self {
        SoftFields {
            sign: word >> 31,
            exponent: word & SOFT_EXPONENT_MASK,
            mantissa: (word & SOFT_MANTISSA_MASK) >> SOFT_EXPONENT_BITS,
        }
    }

    pub fn pack(&self) -> u32 {
        ((self.sign & 1) << 31)
            | ((self.mantissa << SOFT_EXPONENT_BITS) & SOFT_MANTISSA_MASK)
            | (self.exponent & SOFT_EXPONENT_MASK)
    }
}

// }}}

// {{{ formatting

/// Render the low `sum(widths)` bits of *word* as binary groups separated by
/// `" | "`, most significant group first.
pub fn format_bits(word: u32, widths: &[u32]) -> String {
    let total: u32 = widths.iter().sum();
    debug_assert!(total <= 32);

    let mut out = String::with_capacity(total as usize + 3 * widths.len());
    let mut offset = total;
    for (i, &width) in widths.iter().enumerate() {
        if i > 0 {
            out.push_str(" | ");
        }
        for bit in (0..width).rev() {
            let pos = offset - width + bit;
            out.push(if (word >> pos) & 1 == 1 { '1' } else { '0' });
        }
        offset -= width;
    }

    out
}

/// Native `f32` bits as `sign | exponent | mantissa`.
pub fn format_f32_bits(value: f32) -> String {
    format_bits(value.to_bits(), &[1, IEEE_EXPONENT_BITS, IEEE_MANTISSA_BITS])
}

// }}}

// {{{ tests


// }}}

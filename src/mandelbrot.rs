// SPDX-FileCopyrightText: 2024 Alexandru Fikl <alexfikl@gmail.com>
// SPDX-License-Identifier: MIT

use std::fmt;
use std::ops::{Add, Mul, Sub};

// {{{ traits

/// Arithmetic needed by the escape-time iteration.
///
/// Implemented by the fixed-point and soft-float backends; neither goes through
/// native floating point except in [`EscapeScalar::from_f32`], which decodes
/// the float's bits.
pub trait EscapeScalar:
    Copy + Add<Output = Self> + Sub<Output = Self> + Mul<Output = Self> + fmt::Binary
{
    fn from_f32(value: f32) -> Self;

    fn less_than(self, other: Self) -> bool;
}

/// Maps a point `(cx, cy)` of the complex plane to an iteration count in
/// `[0, n_max]`.
pub trait Fractal<T> {
    fn iterations(&self, cx: T, cy: T, n_max: u16) -> u16;
}

impl<T, F> Fractal<T> for F
where
    F: Fn(T, T, u16) -> u16,
{
    fn iterations(&self, cx: T, cy: T, n_max: u16) -> u16 {
        self(cx, cy, n_max)
    }
}

// }}}

// {{{ escape

/// The quadratic Mandelbrot map
///
/// $$
///     f(z) = z^2 + c
/// $$
#[derive(Clone, Copy, Debug, Default)]
pub struct Mandelbrot;

impl<T: EscapeScalar> Fractal<T> for Mandelbrot {
    fn iterations(&self, cx: T, cy: T, n_max: u16) -> u16 {
        mandelbrot_escape_time(cx, cy, n_max)
    }
}

/// Count the iterations before `|z|^2 >= 4`, starting from `z = c`.
///
/// At least one step is always taken, so escaping points return a count of 1
/// or more. Points that do not escape return `n_max`.
pub fn mandelbrot_escape_time<T: EscapeScalar>(cx: T, cy: T, n_max: u16) -> u16 {
    if n_max == 0 {
        return 0;
    }

    let two = T::from_f32(2.0);
    let four = T::from_f32(4.0);

    let mut x = cx;
    let mut y = cy;
    let mut n: u16 = 0;
    loop {
        let xx = x * x;
        let yy = y * y;
        let two_xy = two * x * y;

        x = xx - yy + cx;
        y = two_xy + cy;
        n += 1;

        if !(xx + yy).less_than(four) || n >= n_max {
            return n;
        }
    }
}

// }}}

// {{{ tests

#[cfg(test)]
mod tests {
    use super::*;

    use crate::fixed::{I4F28, I7F25};
    use crate::softfloat::SoftFloat;

    fn escape<T: EscapeScalar>(cx: f32, cy: f32, n_max: u16) -> u16 {
        Mandelbrot.iterations(T::from_f32(cx), T::from_f32(cy), n_max)
    }

    #[test]
    fn test_origin_never_escapes() {
        for n_max in [1, 2, 64, 1000] {
            assert_eq!(escape::<I4F28>(0.0, 0.0, n_max), n_max);
            assert_eq!(escape::<I7F25>(0.0, 0.0, n_max), n_max);
            assert_eq!(escape::<SoftFloat>(0.0, 0.0, n_max), n_max);
        }
    }

    #[test]
    fn test_outside_escapes_immediately() {
        for n_max in [2, 64, 1000] {
            assert_eq!(escape::<I4F28>(2.0, 0.0, n_max), 1);
            assert_eq!(escape::<I7F25>(2.0, 0.0, n_max), 1);
            assert_eq!(escape::<SoftFloat>(2.0, 0.0, n_max), 1);
        }
    }

    #[test]
    fn test_zero_iterations() {
        assert_eq!(escape::<I7F25>(0.0, 0.0, 0), 0);
        assert_eq!(escape::<SoftFloat>(2.0, 0.0, 0), 0);
    }

    #[test]
    fn test_backends_agree() {
        // c = -1 is a period-2 cycle, c = 0.5 escapes after a few steps
        for (cx, cy) in [(-1.0, 0.0), (-0.5, 0.25), (0.5, 0.0), (1.0, 1.0)] {
            let fixed = escape::<I7F25>(cx, cy, 64);
            let soft = escape::<SoftFloat>(cx, cy, 64);
            assert_eq!(fixed, soft, "mismatch at ({}, {})", cx, cy);
        }

        assert_eq!(escape::<SoftFloat>(-1.0, 0.0, 64), 64);
        assert!(escape::<SoftFloat>(0.5, 0.0, 64) < 64);
    }

    #[test]
    fn test_closure_as_fractal() {
        let constant = |_: I7F25, _: I7F25, n_max: u16| n_max / 2;
        assert_eq!(constant.iterations(I7F25::from_f32(1.0), I7F25::from_f32(1.0), 10), 5);
    }
}

// }}}

// SPDX-FileCopyrightText: 2024 Alexandru Fikl <alexfikl@gmail.com>
// SPDX-License-Identifier: MIT

use log::{debug, info};

use crate::clock::{Clock, Time};
use crate::colorschemes::{ColorMap, Rgb565};
use crate::config::{Backend, RenderConfig};
use crate::error::RenderError;
use crate::fixed::{I4F28, I7F25};
use crate::mandelbrot::{EscapeScalar, Fractal, Mandelbrot};
use crate::softfloat::SoftFloat;

/// Region of the complex plane covered by a frame.
///
/// Pixel `(i, k)` samples `(origin_x + i * step, origin_y + k * step)`, so the
/// imaginary part grows downwards.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport<T> {
    pub origin_x: T,
    pub origin_y: T,
    pub step: T,
}

impl<T: EscapeScalar> Viewport<T> {
    pub fn new(origin_x: T, origin_y: T, step: T) -> Self {
        Viewport {
            origin_x,
            origin_y,
            step,
        }
    }

    pub fn from_f32(origin_x: f32, origin_y: f32, step: f32) -> Self {
        Viewport {
            origin_x: T::from_f32(origin_x),
            origin_y: T::from_f32(origin_y),
            step: T::from_f32(step),
        }
    }

    /// Bit patterns of the origin and step, for tracing.
    pub fn format_bits(&self) -> String {
        format!(
            "origin ({:b}, {:b}) step {:b}",
            self.origin_x, self.origin_y, self.step
        )
    }
}

// {{{ render

/// Render `fractal` into a row-major buffer of `bounds.0 * bounds.1` pixels.
///
/// Coordinates are advanced by repeatedly adding `viewport.step` in the
/// backend's own arithmetic. Every pixel is written, rows first. When a
/// *clock* is given, the run time is logged.
pub fn draw_fractal<T, F, C>(
    pixels: &mut [Rgb565],
    bounds: (usize, usize),
    fractal: &F,
    colors: &C,
    viewport: &Viewport<T>,
    n_max: u16,
    clock: Option<&dyn Clock>,
) -> Result<(), RenderError>
where
    T: EscapeScalar,
    F: Fractal<T> + ?Sized,
    C: ColorMap + ?Sized,
{
    let (width, height) = bounds;
    let expected = frame_len(bounds)?;
    if pixels.len() != expected {
        return Err(RenderError::BufferSize {
            expected,
            actual: pixels.len(),
        });
    }

    debug!("Drawing {}x{} pixels with n_max {}", width, height, n_max);
    debug!("Viewport {}", viewport.format_bits());
    let start = clock.map(|c| c.now());

    let mut cy = viewport.origin_y;
    for row in pixels.chunks_exact_mut(width.max(1)).take(height) {
        let mut cx = viewport.origin_x;
        for pixel in row.iter_mut() {
            let n_iter = fractal.iterations(cx, cy, n_max);
            *pixel = colors.color(n_iter, n_max);
            cx = cx + viewport.step;
        }
        cy = cy + viewport.step;
    }

    if let (Some(clock), Some(start)) = (clock, start) {
        let end = clock.now();
        info!(
            "Run time: {}",
            Time::from_seconds(start.seconds_until(&end))
        );
    }

    Ok(())
}

fn frame_len(bounds: (usize, usize)) -> Result<usize, RenderError> {
    bounds.0.checked_mul(bounds.1).ok_or(RenderError::TooLarge {
        width: bounds.0,
        height: bounds.1,
    })
}

/// Allocate a frame and render the Mandelbrot set as described by *config*.
pub fn render_mandelbrot(
    config: &RenderConfig,
    clock: Option<&dyn Clock>,
) -> Result<Vec<Rgb565>, RenderError> {
    let bounds = config.bounds();
    let mut pixels = vec![0; frame_len(bounds)?];

    info!(
        "Rendering {}x{} with {:?} arithmetic and {:?} colours",
        bounds.0, bounds.1, config.backend, config.palette
    );
    match config.backend {
        Backend::Fixed => draw_fractal(
            &mut pixels,
            bounds,
            &Mandelbrot,
            &config.palette,
            &config.viewport::<I7F25>(),
            config.n_max,
            clock,
        )?,
        Backend::FixedQ4F28 => draw_fractal(
            &mut pixels,
            bounds,
            &Mandelbrot,
            &config.palette,
            &config.viewport::<I4F28>(),
            config.n_max,
            clock,
        )?,
        Backend::Soft => draw_fractal(
            &mut pixels,
            bounds,
            &Mandelbrot,
            &config.palette,
            &config.viewport::<SoftFloat>(),
            config.n_max,
            clock,
        )?,
    }

    Ok(pixels)
}

// }}}

// {{{ tests

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    use crate::colorschemes::{BlackWhite, Palette, BLACK, WHITE};

    struct StepClock {
        calls: Cell<u32>,
    }

    impl Clock for StepClock {
        fn now(&self) -> Time {
            let calls = self.calls.get();
            self.calls.set(calls + 1);
            Time::from_seconds(calls * 61)
        }
    }

    #[test]
    fn test_buffer_size_mismatch() {
        let mut pixels = vec![0; 5];
        let viewport = Viewport::<I7F25>::from_f32(0.0, 0.0, 1.0);
        let result = draw_fractal(&mut pixels, (2, 3), &Mandelbrot, &BlackWhite, &viewport, 8, None);
        assert_eq!(
            result,
            Err(RenderError::BufferSize {
                expected: 6,
                actual: 5
            })
        );
    }

    #[test]
    fn test_oversized_frame() {
        let mut pixels: Vec<Rgb565> = vec![];
        let viewport = Viewport::<I7F25>::from_f32(0.0, 0.0, 1.0);
        let result = draw_fractal(
            &mut pixels,
            (usize::MAX, 2),
            &Mandelbrot,
            &BlackWhite,
            &viewport,
            8,
            None,
        );
        assert_eq!(
            result,
            Err(RenderError::TooLarge {
                width: usize::MAX,
                height: 2
            })
        );

        let config = RenderConfig {
            width: usize::MAX,
            height: 2,
            ..RenderConfig::default()
        };
        assert!(matches!(
            render_mandelbrot(&config, None),
            Err(RenderError::TooLarge { .. })
        ));
    }

    #[test]
    fn test_viewport_format_bits() {
        let viewport = Viewport::<I7F25>::from_f32(0.0, -1.0, 1.0);
        let bits = viewport.format_bits();
        let zeros = "0".repeat(25);
        assert!(bits.starts_with(&format!(
            "origin (0 | 000000 | {}, 1 | 111111 | {})",
            zeros, zeros
        )));
        assert!(bits.ends_with(&format!("step 0 | 000001 | {}", zeros)));
    }

    #[test]
    fn test_row_major_coordinates() {
        // encode the sampled point into the "iteration count" to check the layout
        let probe = |cx: I7F25, cy: I7F25, _: u16| {
            (cx.to_f32() as u16) * 10 + cy.to_f32() as u16
        };
        let identity = |iter: u16, _: u16| iter;

        let mut pixels = vec![0; 3 * 2];
        let viewport = Viewport::<I7F25>::from_f32(1.0, 2.0, 1.0);
        draw_fractal(&mut pixels, (3, 2), &probe, &identity, &viewport, 8, None).unwrap();
        assert_eq!(pixels, vec![12, 22, 32, 13, 23, 33]);
    }

    #[test]
    fn test_clock_is_read_twice() {
        let clock = StepClock {
            calls: Cell::new(0),
        };
        let mut pixels = vec![0; 4];
        let viewport = Viewport::<I7F25>::from_f32(-2.0, -1.5, 0.75);
        draw_fractal(
            &mut pixels,
            (2, 2),
            &Mandelbrot,
            &BlackWhite,
            &viewport,
            16,
            Some(&clock),
        )
        .unwrap();
        assert_eq!(clock.calls.get(), 2);
    }

    #[test]
    fn test_empty_frame() {
        let mut pixels: Vec<Rgb565> = vec![];
        let viewport = Viewport::<I7F25>::from_f32(0.0, 0.0, 1.0);
        draw_fractal(&mut pixels, (0, 4), &Mandelbrot, &BlackWhite, &viewport, 8, None).unwrap();
    }

    #[test]
    fn test_draw_black_and_white() {
        // samples -2, -1.25, -0.5, 0.25 by -1.5, -0.75, 0, 0.75
        let mut pixels = vec![0x1234; 16];
        let viewport = Viewport::<I7F25>::from_f32(-2.0, -1.5, 0.75);
        draw_fractal(&mut pixels, (4, 4), &Mandelbrot, &BlackWhite, &viewport, 64, None).unwrap();

        assert_eq!(pixels[0], WHITE);
        // c = -0.5 + 0i
        assert_eq!(pixels[2 * 4 + 2], BLACK);
        assert!(pixels.iter().all(|&p| p == BLACK || p == WHITE));
    }

    #[test]
    fn test_render_mandelbrot_backends_agree() {
        let config = RenderConfig {
            width: 8,
            height: 8,
            frac_width: 3.0,
            palette: Palette::BlackWhite,
            ..RenderConfig::default()
        };

        let fixed = render_mandelbrot(&config, None).unwrap();
        let soft = render_mandelbrot(
            &RenderConfig {
                backend: Backend::Soft,
                ..config.clone()
            },
            None,
        )
        .unwrap();

        assert_eq!(fixed.len(), 64);
        assert_eq!(fixed, soft);
    }
}

// }}}

// SPDX-FileCopyrightText: 2024 Alexandru Fikl <alexfikl@gmail.com>
// SPDX-License-Identifier: MIT

//! Mandelbrot escape-time rendering on integer arithmetic only.
//!
//! Two numeric backends are provided: [`fixed::Fixed`], a signed fixed-point
//! word, and [`softfloat::SoftFloat`], a 32-bit float with its own field layout
//! and bias. Both implement [`mandelbrot::EscapeScalar`] and can be plugged into
//! [`render::draw_fractal`] together with any [`colorschemes::ColorMap`].

#![warn(rust_2018_idioms)]

pub mod bits;
pub mod clock;
pub mod colorschemes;
pub mod config;
pub mod error;
pub mod fixed;
pub mod gallery;
pub mod mandelbrot;
pub mod render;
pub mod sink;
pub mod softfloat;

pub use colorschemes::{ColorMap, Palette, Rgb565};
pub use config::{Backend, RenderConfig};
pub use error::{ConfigError, RenderError, SinkError};
pub use fixed::{Fixed, I4F28, I7F25};
pub use mandelbrot::{EscapeScalar, Fractal, Mandelbrot};
pub use render::{draw_fractal, render_mandelbrot, Viewport};
pub use softfloat::SoftFloat;

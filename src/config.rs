// SPDX-FileCopyrightText: 2024 Alexandru Fikl <alexfikl@gmail.com>
// SPDX-License-Identifier: MIT

use clap::ValueEnum;

use crate::colorschemes::Palette;
use crate::error::ConfigError;
use crate::gallery::Exhibit;
use crate::mandelbrot::EscapeScalar;
use crate::render::Viewport;

pub const SCREEN_WIDTH: usize = 512;
pub const SCREEN_HEIGHT: usize = 512;
pub const N_MAX: u16 = 64;

/// Arithmetic used for the iteration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Backend {
    /// Fixed point with 25 fractional bits.
    #[default]
    Fixed,
    /// Fixed point with 28 fractional bits.
    #[value(name = "fixed-q4-28")]
    FixedQ4F28,
    /// Soft float with bias 250.
    Soft,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RenderConfig {
    pub width: usize,
    pub height: usize,
    /// Point sampled by the first pixel.
    pub origin_x: f32,
    pub origin_y: f32,
    /// Extent of the frame along the real axis; pixels are square.
    pub frac_width: f32,
    pub n_max: u16,
    pub backend: Backend,
    pub palette: Palette,
    /// Whether the frame buffer is in display (byte-swapped) order.
    pub byte_swapped: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            width: SCREEN_WIDTH,
            height: SCREEN_HEIGHT,
            origin_x: -2.0,
            origin_y: -1.5,
            frac_width: 3.0,
            n_max: N_MAX,
            backend: Backend::default(),
            palette: Palette::default(),
            byte_swapped: true,
        }
    }
}

impl RenderConfig {
    pub fn with_exhibit(mut self, exhibit: &Exhibit) -> Self {
        self.origin_x = exhibit.origin.0;
        self.origin_y = exhibit.origin.1;
        self.frac_width = exhibit.width;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        // the frame must fit in memory and in an image
        let fits = self.width.checked_mul(self.height).is_some()
            && u32::try_from(self.width).is_ok()
            && u32::try_from(self.height).is_ok();
        if !fits {
            return Err(ConfigError::TooLarge {
                width: self.width,
                height: self.height,
            });
        }
        if !(self.frac_width.is_finite() && self.frac_width > 0.0) {
            return Err(ConfigError::InvalidWidth(self.frac_width));
        }

        Ok(())
    }

    pub fn bounds(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn step(&self) -> f32 {
        self.frac_width / self.width as f32
    }

    pub fn viewport<T: EscapeScalar>(&self) -> Viewport<T> {
        Viewport::from_f32(self.origin_x, self.origin_y, self.step())
    }
}

// {{{ tests

#[cfg(test)]
mod tests {
    use super::*;

    use crate::fixed::I7F25;
    use crate::gallery::EXHIBIT_SEAHORSE_VALLEY;

    #[test]
    fn test_defaults() {
        let config = RenderConfig::default();
        assert_eq!(config.bounds(), (512, 512));
        assert_eq!(config.step(), 3.0 / 512.0);
        assert_eq!(config.validate(), Ok(()));

        let viewport = config.viewport::<I7F25>();
        assert_eq!(viewport.origin_x, I7F25::from_f32(-2.0));
        assert_eq!(viewport.step.to_bits(), 3 << (25 - 9));
    }

    #[test]
    fn test_validate() {
        let config = RenderConfig {
            height: 0,
            ..RenderConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidDimensions {
                width: 512,
                height: 0
            })
        );

        let config = RenderConfig {
            width: usize::MAX,
            height: 2,
            ..RenderConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::TooLarge {
                width: usize::MAX,
                height: 2
            })
        );

        let config = RenderConfig {
            frac_width: -1.0,
            ..RenderConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidWidth(-1.0)));
    }

    #[test]
    fn test_with_exhibit() {
        let config = RenderConfig::default().with_exhibit(&EXHIBIT_SEAHORSE_VALLEY);
        assert_eq!(config.origin_x, -0.8);
        assert_eq!(config.frac_width, 0.1);
    }
}

// }}}

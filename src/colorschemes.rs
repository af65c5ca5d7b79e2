// SPDX-FileCopyrightText: 2024 Alexandru Fikl <alexfikl@gmail.com>
// SPDX-License-Identifier: MIT

//! Iteration count to RGB565 colour maps.
//!
//! All colours are returned with their two bytes swapped, which is the order the
//! display controller reads them in. Points inside the set (`iter == n_max`)
//! are always black.

use clap::ValueEnum;

/// 5-bit red, 6-bit green, 5-bit blue.
pub type Rgb565 = u16;

pub const BLACK: Rgb565 = 0x0000;
pub const WHITE: Rgb565 = 0xFFFF;

/// Pack 5/6/5 channels and swap into display byte order.
pub fn pack_rgb565(r: u16, g: u16, b: u16) -> Rgb565 {
    (((r & 0x1F) << 11) | ((g & 0x3F) << 5) | (b & 0x1F)).swap_bytes()
}

pub trait ColorMap {
    fn color(&self, iter: u16, n_max: u16) -> Rgb565;
}

impl<F> ColorMap for F
where
    F: Fn(u16, u16) -> Rgb565,
{
    fn color(&self, iter: u16, n_max: u16) -> Rgb565 {
        self(iter, n_max)
    }
}

// {{{ policies

#[derive(Clone, Copy, Debug, Default)]
pub struct BlackWhite;

impl ColorMap for BlackWhite {
    fn color(&self, iter: u16, n_max: u16) -> Rgb565 {
        if iter == n_max {
            BLACK
        } else {
            WHITE
        }
    }
}

/// Sixteen grey levels cycling with the low four bits of the count.
#[derive(Clone, Copy, Debug, Default)]
pub struct Grayscale;

impl ColorMap for Grayscale {
    fn color(&self, iter: u16, n_max: u16) -> Rgb565 {
        if iter == n_max {
            return BLACK;
        }

        let brightness = iter & 0xF;
        pack_rgb565(brightness << 1, brightness << 2, brightness << 1)
    }
}

/// Bits 3, 2 and 1 of the count switch red, green and blue on; bit 0 picks
/// between two brightness levels.
#[derive(Clone, Copy, Debug, Default)]
pub struct Colour;

impl ColorMap for Colour {
    fn color(&self, iter: u16, n_max: u16) -> Rgb565 {
        if iter == n_max {
            return BLACK;
        }

        let brightness = ((iter & 1) << 4) | 0xF;
        let r = if iter & (1 << 3) != 0 { brightness } else { 0 };
        let g = if iter & (1 << 2) != 0 { brightness } else { 0 };
        let b = if iter & (1 << 1) != 0 { brightness } else { 0 };

        // green is 6 bits wide and takes the 5-bit level in its upper bits
        pack_rgb565(r, g << 1, b)
    }
}

/// Bits 2, 1 and 0 of the count switch the channels; bits 6 to 3 dim the
/// brightness as the count grows.
#[derive(Clone, Copy, Debug, Default)]
pub struct ColourAlt;

impl ColorMap for ColourAlt {
    fn color(&self, iter: u16, n_max: u16) -> Rgb565 {
        if iter == n_max {
            return BLACK;
        }

        let brightness = ((iter & 0x78) >> 2) ^ 0x1F;
        let r = if iter & (1 << 2) != 0 { brightness } else { 0 };
        let g = if iter & (1 << 1) != 0 { brightness } else { 0 };
        let b = if iter & 1 != 0 { brightness } else { 0 };

        // only the low four bits of the level survive, placed at the top of
        // each channel
        pack_rgb565((r & 0xF) << 1, (g & 0xF) << 2, (b & 0xF) << 1)
    }
}

// }}}

// {{{ palette

/// Run-time choice between the colour maps above.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Palette {
    #[value(name = "bw")]
    BlackWhite,
    #[value(name = "gray")]
    Grayscale,
    #[default]
    Colour,
    #[value(name = "colour-alt")]
    ColourAlt,
}

impl ColorMap for Palette {
    fn color(&self, iter: u16, n_max: u16) -> Rgb565 {
        match self {
            Palette::BlackWhite => BlackWhite.color(iter, n_max),
            Palette::Grayscale => Grayscale.color(iter, n_max),
            Palette::Colour => Colour.color(iter, n_max),
            Palette::ColourAlt => ColourAlt.color(iter, n_max),
        }
    }
}

// }}}

// {{{ tests


// }}}

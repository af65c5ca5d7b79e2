// SPDX-FileCopyrightText: 2024 Alexandru Fikl <alexfikl@gmail.com>
// SPDX-License-Identifier: MIT

//! Output side of the renderer: something that accepts a finished frame.

use std::path::PathBuf;

use image::{Rgb, RgbImage};
use log::info;

use crate::colorschemes::Rgb565;
use crate::error::SinkError;

pub trait FrameSink {
    fn present(&mut self, pixels: &[Rgb565], bounds: (usize, usize)) -> Result<(), SinkError>;
}

/// Expand an RGB565 word to 8 bits per channel.
///
/// *byte_swapped* says whether the word is stored in display byte order, as
/// produced by the colour maps.
pub fn decode_rgb565(word: Rgb565, byte_swapped: bool) -> Rgb<u8> {
    let word = if byte_swapped { word.swap_bytes() } else { word };

    let r = ((word >> 11) & 0x1F) as u8;
    let g = ((word >> 5) & 0x3F) as u8;
    let b = (word & 0x1F) as u8;

    // replicate the high bits into the low bits so full scale maps to 255
    Rgb([(r << 3) | (r >> 2), (g << 2) | (g >> 4), (b << 3) | (b >> 2)])
}

/// Convert a frame into an 8-bit RGB image.
pub fn frame_to_image(
    pixels: &[Rgb565],
    bounds: (usize, usize),
    byte_swapped: bool,
) -> Result<RgbImage, SinkError> {
    let (width, height) = bounds;
    let expected = width
        .checked_mul(height)
        .ok_or(SinkError::TooLarge { width, height })?;
    if pixels.len() != expected {
        return Err(SinkError::BufferSize {
            expected,
            actual: pixels.len(),
        });
    }

    let (Ok(img_width), Ok(img_height)) = (u32::try_from(width), u32::try_from(height)) else {
        return Err(SinkError::TooLarge { width, height });
    };
    let mut img = RgbImage::new(img_width, img_height);
    for (pixel, &word) in img.pixels_mut().zip(pixels.iter()) {
        *pixel = decode_rgb565(word, byte_swapped);
    }

    Ok(img)
}

/// Writes every presented frame to a PNG file.
#[derive(Clone, Debug)]
pub struct PngSink {
    pub path: PathBuf,
    pub byte_swapped: bool,
}

impl PngSink {
    pub fn new(path: impl Into<PathBuf>, byte_swapped: bool) -> Self {
        PngSink {
            path: path.into(),
            byte_swapped,
        }
    }
}

impl FrameSink for PngSink {
    fn present(&mut self, pixels: &[Rgb565], bounds: (usize, usize)) -> Result<(), SinkError> {
        let img = frame_to_image(pixels, bounds, self.byte_swapped)?;
        img.save(&self.path)?;
        info!("Wrote {}x{} frame to {}", bounds.0, bounds.1, self.path.display());

        Ok(())
    }
}

// {{{ tests


// }}}

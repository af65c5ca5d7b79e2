// SPDX-FileCopyrightText: 2024 Alexandru Fikl <alexfikl@gmail.com>
// SPDX-License-Identifier: MIT

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RenderError {
    #[error("frame buffer holds {actual} pixels, expected {expected}")]
    BufferSize { expected: usize, actual: usize },
    #[error("frame of {width}x{height} pixels does not fit in memory")]
    TooLarge { width: usize, height: usize },
}

#[derive(Error, Debug)]
pub enum SinkError {
    #[error("frame holds {actual} pixels, expected {expected}")]
    BufferSize { expected: usize, actual: usize },
    #[error("frame of {width}x{height} pixels is too large for an image")]
    TooLarge { width: usize, height: usize },
    #[error("failed to write image: {0}")]
    Image(#[from] image::ImageError),
}

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("invalid frame dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    #[error("frame dimensions too large: {width}x{height}")]
    TooLarge { width: usize, height: usize },
    #[error("invalid fractal width: {0}")]
    InvalidWidth(f32),
}

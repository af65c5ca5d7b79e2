// SPDX-FileCopyrightText: 2024 Alexandru Fikl <alexfikl@gmail.com>
// SPDX-License-Identifier: MIT

use clap::ValueEnum;

pub struct Exhibit {
    /// Corner of the frame with the smallest real and imaginary parts.
    pub origin: (f32, f32),
    /// Extent of the frame along the real axis.
    pub width: f32,
}

pub const EXHIBIT_FULL: Exhibit = Exhibit {
    origin: (-2.0, -1.5),
    width: 3.0,
};

pub const EXHIBIT_SEAHORSE_VALLEY: Exhibit = Exhibit {
    origin: (-0.8, 0.05),
    width: 0.1,
};

pub const EXHIBIT_ELEPHANT_VALLEY: Exhibit = Exhibit {
    origin: (0.25, -0.05),
    width: 0.1,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Gallery {
    #[default]
    Full,
    Seahorse,
    Elephant,
}

impl Gallery {
    pub fn exhibit(&self) -> &'static Exhibit {
        match self {
            Gallery::Full => &EXHIBIT_FULL,
            Gallery::Seahorse => &EXHIBIT_SEAHORSE_VALLEY,
            Gallery::Elephant => &EXHIBIT_ELEPHANT_VALLEY,
        }
    }
}

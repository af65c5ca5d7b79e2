// SPDX-FileCopyrightText: 2024 Alexandru Fikl <alexfikl@gmail.com>
// SPDX-License-Identifier: MIT

#![warn(rust_2018_idioms)]

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::{debug, info};

use softbrot::bits::format_f32_bits;
use softbrot::clock::SystemClock;
use softbrot::config::{Backend, RenderConfig, N_MAX, SCREEN_HEIGHT, SCREEN_WIDTH};
use softbrot::gallery::Gallery;
use softbrot::render::render_mandelbrot;
use softbrot::sink::{FrameSink, PngSink};
use softbrot::{Palette, SoftFloat, I7F25};

/// Render the Mandelbrot set using integer-only arithmetic
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a frame and write it to a PNG file
    Render(RenderArgs),
    /// Print the arithmetic test vectors with their bit patterns
    Vectors,
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Output image path
    #[arg(short, long, default_value = "mandelbrot.png")]
    output: PathBuf,

    /// Frame width in pixels
    #[arg(long, default_value_t = SCREEN_WIDTH)]
    width: usize,

    /// Frame height in pixels
    #[arg(long, default_value_t = SCREEN_HEIGHT)]
    height: usize,

    /// Maximum number of iterations per pixel
    #[arg(short, long, default_value_t = N_MAX)]
    n_max: u16,

    /// Numeric backend
    #[arg(short, long, value_enum, default_value_t = Backend::default())]
    backend: Backend,

    /// Colour map
    #[arg(short, long, value_enum, default_value_t = Palette::default())]
    palette: Palette,

    /// Predefined view of the complex plane
    #[arg(short, long, value_enum, default_value_t = Gallery::default())]
    exhibit: Gallery,

    /// Real part of the first sampled point (overrides the exhibit)
    #[arg(long, allow_hyphen_values = true)]
    cx: Option<f32>,

    /// Imaginary part of the first sampled point (overrides the exhibit)
    #[arg(long, allow_hyphen_values = true)]
    cy: Option<f32>,

    /// Extent along the real axis (overrides the exhibit)
    #[arg(long)]
    frac_width: Option<f32>,

    /// Treat the frame buffer as native byte order instead of display order
    #[arg(long)]
    native_byte_order: bool,
}

impl RenderArgs {
    fn to_config(&self) -> RenderConfig {
        let mut config = RenderConfig {
            width: self.width,
            height: self.height,
            n_max: self.n_max,
            backend: self.backend,
            palette: self.palette,
            byte_swapped: !self.native_byte_order,
            ..RenderConfig::default()
        }
        .with_exhibit(self.exhibit.exhibit());

        if let Some(cx) = self.cx {
            config.origin_x = cx;
        }
        if let Some(cy) = self.cy {
            config.origin_y = cy;
        }
        if let Some(frac_width) = self.frac_width {
            config.frac_width = frac_width;
        }

        config
    }
}

fn render(args: &RenderArgs) -> Result<()> {
    let config = args.to_config();
    config.validate().context("invalid render configuration")?;
    debug!("{:?}", config);

    let pixels = render_mandelbrot(&config, Some(&SystemClock)).context("failed to render")?;

    let mut sink = PngSink::new(&args.output, config.byte_swapped);
    sink.present(&pixels, config.bounds())
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    Ok(())
}

// {{{ vectors

fn print_soft(label: &str, expected: f32, value: SoftFloat) {
    println!("{} = {} (expected {})", label, value, expected);
    println!("  {}", value.format_bits());
    debug!("  native {}", format_f32_bits(value.to_f32()));
}

fn vectors() {
    let soft = SoftFloat::from_f32;

    println!("Addition");
    let additions = [
        (1.5, 4.75, 6.25),
        (-0.5, 4.75, 4.25),
        (0.75, -0.5, 0.25),
        (-0.5, -4.75, -5.25),
        (-0.5, 0.125, -0.375),
    ];
    for (a, b, expected) in additions {
        print_soft(&format!("  {} + {}", a, b), expected, soft(a) + soft(b));
    }

    println!("Multiplication");
    let products = [
        (1.5, 4.75, 7.125),
        (0.5, 4.75, 2.375),
        (0.5, 0.75, 0.375),
        (-0.5, 4.75, -2.375),
        (-0.5, -4.75, 2.375),
        (-0.5, -0.75, 0.375),
    ];
    for (a, b, expected) in products {
        print_soft(&format!("  {} * {}", a, b), expected, soft(a) * soft(b));
    }

    println!("Less than");
    let comparisons = [(1.5, 2.0), (-16.5, 2.0), (-15.785, -15.85), (12.9, 12.88)];
    for (a, b) in comparisons {
        println!("  {} < {} = {}", a, b, soft(a).less_than(soft(b)));
    }

    println!("Fixed point");
    for (a, b) in [(1.5, 4.75), (-0.5, 4.75), (-2.0, -1.5)] {
        let product = I7F25::from_f32(a) * I7F25::from_f32(b);
        println!("  {} * {} = {}", a, b, product);
        println!("  {:b}", product);
    }
}

// }}}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match &cli.command {
        Command::Render(args) => render(args)?,
        Command::Vectors => vectors(),
    }

    info!("Done");
    Ok(())
}

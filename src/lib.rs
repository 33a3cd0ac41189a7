#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Mandelbrot renderer
//!
//! The Mandelbrot set is the set of points c on the complex plane for
//! which repeatedly squaring z and adding c, starting from zero, never
//! sends z off to infinity.  For any point outside the set we can
//! count how many iterations it takes z to leave the circle of radius
//! two; that count is the "escape time," and shading each pixel by it
//! renders the familiar image.
//!
//! A run is three stages with explicit handoffs:
//!
//! 1. a `View` is sampled by the `PlaneMapper` into a `ComplexGrid`,
//! 2. the `EscapeTimeRenderer` turns that into an `IntegerGrid`, one
//!    row per unit of work, spread across worker threads,
//! 3. `render::save` shades the counts into a 16-bit grayscale PNG.
//!
//! `run` strings them together from a `Config`.

extern crate crossbeam;
#[macro_use]
extern crate failure;
extern crate image;
#[macro_use]
extern crate log;
extern crate num;
extern crate num_cpus;

pub mod config;
pub mod error;
pub mod escape;
pub mod grid;
pub mod planes;
pub mod render;

pub use config::Config;
pub use error::{Error, Result};
pub use escape::{escape_time, EscapeTimeRenderer, IntegerGrid};
pub use grid::Grid;
pub use planes::{ComplexGrid, ComplexPlane, Pixel, PlaneMapper, View};

use std::time::Instant;

/// Samples the configured view and computes its escape counts,
/// without touching the file system.
pub fn compute(config: &Config) -> Result<IntegerGrid> {
    config.validate()?;
    let view = config.view()?;
    let renderer = EscapeTimeRenderer::new(config.max_iterations)?;

    let started = Instant::now();
    let samples = PlaneMapper::new(view).complex_grid();
    info!(
        "sampled {}x{} view centered at {} (half-span {}) in {:?}",
        view.width(),
        view.height(),
        view.center(),
        view.span(),
        started.elapsed()
    );

    Ok(renderer.render(&samples, config.threads))
}

/// The whole pipeline: validate, sample, compute, and write the image
/// to `config.output`.
pub fn run(config: &Config) -> Result<()> {
    let counts = compute(config)?;
    render::save(&counts, config.max_iterations, &config.output)?;
    info!("wrote {}", config.output.display());
    Ok(())
}

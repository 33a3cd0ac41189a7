// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Contains the View, which describes what part of the complex plane
//! we're looking at and at what resolution, and the PlaneMapper, which
//! describes the relationship between the integral plane of pixels
//! with an origin at 0,0 and the rectangle of the complex plane the
//! View covers.
use error::{Error, Result};
use grid::Grid;
use num::Complex;
use std::mem;

/// The largest width or height a PNG can carry.
pub const MAX_DIMENSION: usize = i32::MAX as usize;

/// The grid of complex samples, one per pixel.
pub type ComplexGrid = Grid<Complex<f64>>;

/// Describes the start and end corners of a rectangle on the complex
/// plane, treating the real part of each value as the x-component and
/// the imaginary part of each value as the y-component.  The start
/// corner has the smaller real and imaginary parts.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ComplexPlane(pub Complex<f64>, pub Complex<f64>);

/// Describes the x, y of a pixel on the integral plane.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pixel(pub usize, pub usize);

/// A viewport: a center point, the vertical half-span around it, and
/// the size of the pixel grid used to sample it.  The horizontal
/// half-span is derived from the aspect ratio of the pixel grid so
/// that a non-square image is not stretched.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct View {
    center: Complex<f64>,
    span: f64,
    width: usize,
    height: usize,
}

impl View {
    /// Checks every parameter before anything is allocated.  Width and
    /// height must be positive and fit in an image dimension, and the
    /// grid of samples must be addressable; span must be positive and
    /// finite; the center must be finite.
    pub fn new(center: Complex<f64>, span: f64, width: usize, height: usize) -> Result<View> {
        if width == 0 || width > MAX_DIMENSION {
            return Err(Error::invalid(
                "width",
                format!("must be between 1 and {}, got {}", MAX_DIMENSION, width),
            ));
        }
        if height == 0 || height > MAX_DIMENSION {
            return Err(Error::invalid(
                "height",
                format!("must be between 1 and {}, got {}", MAX_DIMENSION, height),
            ));
        }
        let bytes = width
            .checked_mul(height)
            .and_then(|cells| cells.checked_mul(mem::size_of::<Complex<f64>>()));
        match bytes {
            Some(bytes) if bytes <= isize::MAX as usize => {}
            _ => {
                return Err(Error::invalid(
                    "size",
                    format!("{}x{} is too many pixels to sample", width, height),
                ))
            }
        }
        if !(span.is_finite() && span > 0.0) {
            return Err(Error::invalid(
                "span",
                format!("must be a positive number, got {}", span),
            ));
        }
        if !(center.re.is_finite() && center.im.is_finite()) {
            return Err(Error::invalid(
                "center",
                format!("must be a finite point, got {}", center),
            ));
        }
        Ok(View {
            center,
            span,
            width,
            height,
        })
    }

    /// The center of the view.
    pub fn center(&self) -> Complex<f64> {
        self.center
    }

    /// The vertical half-span.
    pub fn span(&self) -> f64 {
        self.span
    }

    /// The horizontal half-span: the vertical half-span scaled by the
    /// aspect ratio of the pixel grid.
    pub fn horizontal_span(&self) -> f64 {
        self.span * (self.width as f64 / self.height as f64)
    }

    /// Pixel width.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Pixel height.
    pub fn height(&self) -> usize {
        self.height
    }

    /// The corners of the rectangle this view covers.
    pub fn bounds(&self) -> ComplexPlane {
        let half = Complex::new(self.horizontal_span(), self.span);
        ComplexPlane(self.center - half, self.center + half)
    }
}

/// Maps pixels on the integral plane of a View to points on the
/// complex plane.
#[derive(Debug)]
pub struct PlaneMapper {
    view: View,
    complex_plane: ComplexPlane,
    // The width and height, on the complex plane, of a single pixel.
    increments: (f64, f64),
}

impl PlaneMapper {
    /// Constructor.  The View has already been validated, so this
    /// cannot fail.
    pub fn new(view: View) -> PlaneMapper {
        let complex_plane = view.bounds();
        let ComplexPlane(start, end) = complex_plane;
        PlaneMapper {
            view,
            complex_plane,
            increments: (
                (end.re - start.re) / (view.width as f64),
                (end.im - start.im) / (view.height as f64),
            ),
        }
    }

    /// The view being mapped.
    pub fn view(&self) -> &View {
        &self.view
    }

    /// The start and end corners on the complex plane.
    pub fn complex_plane(&self) -> ComplexPlane {
        self.complex_plane
    }

    /// Given a pixel on the integral plane, return the complex number
    /// it samples.  Row 0 samples the smallest imaginary part, so the
    /// image's top row is the bottom of the view.
    pub fn pixel_to_point(&self, pixel: &Pixel) -> Complex<f64> {
        let start = self.complex_plane.0;
        Complex::new(
            start.re + (pixel.0 as f64) * self.increments.0,
            start.im + (pixel.1 as f64) * self.increments.1,
        )
    }

    /// Sample every pixel of the view, row by row.
    pub fn complex_grid(&self) -> ComplexGrid {
        Grid::from_fn(self.view.width, self.view.height, |column, row| {
            self.pixel_to_point(&Pixel(column, row))
        })
    }
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The parameters of a single run.

use error::{Error, Result};
use num::Complex;
use num_cpus;
use planes::View;
use std::path::PathBuf;

/// Default image width in pixels.
pub const DEFAULT_WIDTH: usize = 1920;
/// Default image height in pixels.
pub const DEFAULT_HEIGHT: usize = 1080;
/// Default iteration budget.
pub const DEFAULT_ITERATIONS: usize = 200;
/// Default center of the view.
pub const DEFAULT_CENTER: (f64, f64) = (-0.1, -0.9);
/// Default vertical half-span.
pub const DEFAULT_SPAN: f64 = 0.1;
/// Default destination.
pub const DEFAULT_OUTPUT: &str = "image.png";

/// Everything a run needs: where to look, how hard, with how many
/// threads, and where to put the picture.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Center of the view on the complex plane.
    pub center: Complex<f64>,
    /// Vertical half-span of the view.
    pub span: f64,
    /// Image width in pixels.
    pub width: usize,
    /// Image height in pixels.
    pub height: usize,
    /// Iteration budget per point.
    pub max_iterations: usize,
    /// Worker threads for the escape-time stage.
    pub threads: usize,
    /// Destination PNG.
    pub output: PathBuf,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            center: Complex::new(DEFAULT_CENTER.0, DEFAULT_CENTER.1),
            span: DEFAULT_SPAN,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            max_iterations: DEFAULT_ITERATIONS,
            threads: num_cpus::get(),
            output: PathBuf::from(DEFAULT_OUTPUT),
        }
    }
}

impl Config {
    /// The validated view this configuration describes.
    pub fn view(&self) -> Result<View> {
        View::new(self.center, self.span, self.width, self.height)
    }

    /// Checks every parameter, returning the first one out of range.
    pub fn validate(&self) -> Result<()> {
        self.view()?;
        if self.max_iterations == 0 {
            return Err(Error::invalid("iterations", "must be at least 1, got 0"));
        }
        if self.threads == 0 {
            return Err(Error::invalid("threads", "must be at least 1, got 0"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!((config.width, config.height), (1920, 1080));
        assert_eq!(config.max_iterations, 200);
        assert_eq!(config.center, Complex::new(-0.1, -0.9));
        assert_eq!(config.span, 0.1);
        assert_eq!(config.output, PathBuf::from("image.png"));
        assert!(config.threads >= 1);
    }

    #[test]
    fn validate_names_the_bad_parameter() {
        let cases = vec![
            (
                Config {
                    width: 0,
                    ..Config::default()
                },
                "width",
            ),
            (
                Config {
                    span: 0.0,
                    ..Config::default()
                },
                "span",
            ),
            (
                Config {
                    max_iterations: 0,
                    ..Config::default()
                },
                "iterations",
            ),
            (
                Config {
                    threads: 0,
                    ..Config::default()
                },
                "threads",
            ),
        ];
        for (config, expected) in cases {
            match config.validate() {
                Err(Error::InvalidParameter { name, .. }) => assert_eq!(name, expected),
                other => panic!("expected invalid {}, got {:?}", expected, other),
            }
        }
    }
}

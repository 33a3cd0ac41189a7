// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The escape-time engine.  Every point c on the complex plane is
//! iterated as z -> z * z + c, starting from zero, until the magnitude
//! of z exceeds two or the iteration budget runs out.  The number of
//! iterations that took is the "velocity" used to shade the pixel.
//!
//! Rows are the unit of parallel work.  A row near the boundary of the
//! set can take orders of magnitude longer than one that escapes
//! uniformly, so workers pull rows one at a time from a shared queue
//! instead of being handed fixed zones, and send each finished row
//! back tagged with its index.  The aggregator writes every row into
//! its own slot, so the result does not depend on which worker
//! finished first.

use crossbeam;
use crossbeam::channel;
use error::{Error, Result};
use grid::Grid;
use num::Complex;
use planes::ComplexGrid;
use std::panic;
use std::time::Instant;

/// The grid of escape counts, one per pixel.
pub type IntegerGrid = Grid<usize>;

const ESCAPE_RADIUS: f64 = 2.0;

/// This is our classic iterator function.  Returns the zero-based
/// index of the first iteration whose result lies outside the circle
/// of radius two, or `max_iterations` if no iteration within the
/// budget escapes.  `3 + 0i` escapes on the first update and returns
/// 0; the origin never escapes.
pub fn escape_time(c: Complex<f64>, max_iterations: usize) -> usize {
    let mut z: Complex<f64> = Complex { re: 0.0, im: 0.0 };
    for i in 0..max_iterations {
        z = z * z + c;
        if z.norm() > ESCAPE_RADIUS {
            return i;
        }
    }
    max_iterations
}

fn escape_row(samples: &[Complex<f64>], max_iterations: usize) -> Vec<usize> {
    samples
        .iter()
        .map(|&c| escape_time(c, max_iterations))
        .collect()
}

// A row of samples, borrowed from the complex grid for the lifetime of
// the scope.
struct Row<'a> {
    index: usize,
    samples: &'a [Complex<f64>],
}

struct Counts {
    index: usize,
    counts: Vec<usize>,
}

/// Holds the iteration budget.  Once set, this object should not be
/// mutable.
#[derive(Copy, Clone, Debug)]
pub struct EscapeTimeRenderer {
    max_iterations: usize,
}

impl EscapeTimeRenderer {
    /// The budget must allow at least one iteration.
    pub fn new(max_iterations: usize) -> Result<Self> {
        if max_iterations == 0 {
            return Err(Error::invalid("iterations", "must be at least 1, got 0"));
        }
        Ok(EscapeTimeRenderer { max_iterations })
    }

    /// The iteration budget, which is also the "never escaped"
    /// sentinel.
    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// Escape counts for every sample, computed on the calling thread.
    pub fn render_single(&self, samples: &ComplexGrid) -> IntegerGrid {
        let mut counts = Grid::filled(samples.width(), samples.height(), 0);
        for (index, row) in samples.rows().enumerate() {
            counts.put_row(index, &escape_row(row, self.max_iterations));
        }
        counts
    }

    /// Escape counts for every sample, with rows spread across up to
    /// `threads` workers.  The result is identical to `render_single`.
    pub fn render(&self, samples: &ComplexGrid, threads: usize) -> IntegerGrid {
        let height = samples.height();
        let mut counts = Grid::filled(samples.width(), height, 0);
        if samples.is_empty() {
            return counts;
        }

        let workers = threads.max(1).min(height);
        let max_iterations = self.max_iterations;
        let started = Instant::now();
        debug!(
            "dispatching {} rows of {} samples to {} workers",
            height,
            samples.width(),
            workers
        );

        let (row_tx, row_rx) = channel::unbounded::<Row>();
        let (counts_tx, counts_rx) = channel::unbounded::<Counts>();

        let outcome = crossbeam::scope(|spawner| {
            for worker in 0..workers {
                let rows = row_rx.clone();
                let results = counts_tx.clone();
                spawner.spawn(move |_| {
                    let mut done = 0;
                    for row in rows.iter() {
                        let line = Counts {
                            index: row.index,
                            counts: escape_row(row.samples, max_iterations),
                        };
                        if results.send(line).is_err() {
                            break;
                        }
                        done += 1;
                    }
                    debug!("worker {} finished {} rows", worker, done);
                });
            }
            // Only the workers may hold these, so the channels close when
            // the last worker exits.
            drop(row_rx);
            drop(counts_tx);

            for (index, row) in samples.rows().enumerate() {
                if row_tx.send(Row { index, samples: row }).is_err() {
                    break;
                }
            }
            drop(row_tx);

            for _ in 0..height {
                match counts_rx.recv() {
                    Ok(Counts { index, counts: line }) => counts.put_row(index, &line),
                    Err(_) => break,
                }
            }
        });

        // A worker panic is a bug; hand it back to the caller as-is.
        if let Err(payload) = outcome {
            panic::resume_unwind(payload);
        }

        info!(
            "computed {}x{} escape counts on {} threads in {:?}",
            samples.width(),
            height,
            workers,
            started.elapsed()
        );
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use planes::{PlaneMapper, View};

    fn samples(width: usize, height: usize) -> ComplexGrid {
        let view = View::new(Complex::new(-0.1, -0.9), 0.1, width, height).unwrap();
        PlaneMapper::new(view).complex_grid()
    }

    #[test]
    fn origin_never_escapes() {
        assert_eq!(escape_time(Complex::new(0.0, 0.0), 200), 200);
        assert_eq!(escape_time(Complex::new(0.0, 0.0), 1), 1);
    }

    #[test]
    fn three_escapes_on_the_first_iteration() {
        // z1 = 0^2 + 3 = 3, and |3| > 2 is observed at index 0.
        assert_eq!(escape_time(Complex::new(3.0, 0.0), 200), 0);
        assert_eq!(escape_time(Complex::new(0.0, 3.0), 200), 0);
    }

    #[test]
    fn two_escapes_on_the_second_iteration() {
        // z1 = 2 sits exactly on the radius and does not count; z2 = 6 does.
        assert_eq!(escape_time(Complex::new(2.0, 0.0), 200), 1);
    }

    #[test]
    fn minus_two_sits_on_the_boundary_forever() {
        // z goes -2, 2, 2, 2, ...; |z| is never strictly greater than 2.
        assert_eq!(escape_time(Complex::new(-2.0, 0.0), 500), 500);
    }

    #[test]
    fn renderer_rejects_empty_budget() {
        assert!(EscapeTimeRenderer::new(0).is_err());
        assert_eq!(EscapeTimeRenderer::new(50).unwrap().max_iterations(), 50);
    }

    #[test]
    fn counts_match_sample_shape() {
        let grid = samples(64, 36);
        let counts = EscapeTimeRenderer::new(50).unwrap().render(&grid, 4);
        assert_eq!(counts.width(), 64);
        assert_eq!(counts.height(), 36);
        assert!(counts.rows().all(|row| row.len() == 64));
    }

    #[test]
    fn counts_stay_within_budget() {
        let grid = samples(64, 36);
        let counts = EscapeTimeRenderer::new(50).unwrap().render(&grid, 3);
        assert!(counts.as_slice().iter().all(|&n| n <= 50));
    }

    #[test]
    fn threaded_matches_single() {
        let grid = samples(48, 27);
        let renderer = EscapeTimeRenderer::new(120).unwrap();
        let expected = renderer.render_single(&grid);
        for threads in &[1, 2, 5, 8, 27, 100] {
            assert_eq!(renderer.render(&grid, *threads), expected);
        }
    }

    #[test]
    fn repeated_runs_are_identical() {
        let grid = samples(40, 40);
        let renderer = EscapeTimeRenderer::new(200).unwrap();
        let first = renderer.render(&grid, 8);
        for _ in 0..5 {
            assert_eq!(renderer.render(&grid, 8), first);
        }
    }

    #[test]
    fn every_cell_is_its_own_sample() {
        let grid = samples(20, 10);
        let counts = EscapeTimeRenderer::new(80).unwrap().render(&grid, 4);
        for y in 0..10 {
            for x in 0..20 {
                let c = *grid.get(x, y).unwrap();
                assert_eq!(*counts.get(x, y).unwrap(), escape_time(c, 80));
            }
        }
    }

    #[test]
    fn zero_threads_still_renders() {
        let grid = samples(8, 4);
        let renderer = EscapeTimeRenderer::new(30).unwrap();
        assert_eq!(renderer.render(&grid, 0), renderer.render_single(&grid));
    }

    #[test]
    fn empty_grid_renders_empty() {
        let grid: ComplexGrid = Grid::from_raw(0, 0, vec![]).unwrap();
        let counts = EscapeTimeRenderer::new(30).unwrap().render(&grid, 4);
        assert!(counts.is_empty());
    }
}

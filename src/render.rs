// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Turns escape counts into a 16-bit grayscale PNG.

use error::{Error, Result};
use escape::IntegerGrid;
use image::codecs::png::PngEncoder;
use image::{ColorType, EncodableLayout, ImageBuffer, ImageEncoder, Luma};
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;

/// A single-channel, 16-bit image.
pub type GrayImage16 = ImageBuffer<Luma<u16>, Vec<u16>>;

/// Scales an escape count to the full 16-bit range, so that a point
/// that never escaped is white and one that escaped at once is black.
pub fn intensity(count: usize, max_iterations: usize) -> u16 {
    let scaled = f64::from(u16::MAX) * (count as f64) / (max_iterations as f64);
    scaled.round().min(f64::from(u16::MAX)) as u16
}

/// Shades every cell of the grid.  Grid row 0 becomes image row 0.
pub fn intensities(counts: &IntegerGrid, max_iterations: usize) -> GrayImage16 {
    let mut image: GrayImage16 = ImageBuffer::new(counts.width() as u32, counts.height() as u32);
    // Both buffers are row-major and the same size.
    for (pixel, &count) in image.pixels_mut().zip(counts.as_slice()) {
        *pixel = Luma([intensity(count, max_iterations)]);
    }
    image
}

/// Encodes the image as PNG onto any writer.
pub fn write_png<W: Write>(image: &GrayImage16, writer: W) -> Result<()> {
    PngEncoder::new(writer)
        .write_image(
            image.as_raw().as_bytes(),
            image.width(),
            image.height(),
            ColorType::L16,
        )
        .map_err(Error::Encode)
}

/// Shades the grid and writes it to `outfile`.  The PNG is encoded in
/// memory first, so a failed encode never creates the file, and a
/// failed write removes whatever was partially written.  Only regular
/// files and symlinks are removed; a device such as `/dev/full` is
/// left alone.
pub fn save<P: AsRef<Path>>(
    counts: &IntegerGrid,
    max_iterations: usize,
    outfile: P,
) -> Result<()> {
    let path = outfile.as_ref();
    let image = intensities(counts, max_iterations);
    let mut encoded: Vec<u8> = Vec::new();
    write_png(&image, &mut encoded)?;

    let io_error = |cause: io::Error| Error::Io {
        path: path.display().to_string(),
        cause,
    };
    let mut output = File::create(path).map_err(|e| io_error(e))?;
    let written = output.write_all(&encoded).and_then(|_| output.flush());
    if let Err(cause) = written {
        drop(output);
        let removable = fs::symlink_metadata(path)
            .map(|meta| meta.file_type().is_file() || meta.file_type().is_symlink())
            .unwrap_or(false);
        if removable {
            let _ = fs::remove_file(path);
        }
        return Err(io_error(cause));
    }
    debug!("wrote {} bytes to {}", encoded.len(), path.display());
    Ok(())
}

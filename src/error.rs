// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The error type shared by every stage of the renderer.  There are
//! only two ways a run can fail: the parameters were wrong before we
//! started, or the image could not be written when we finished.  The
//! escape-time loop itself is total.

use image::ImageError;
use std::io;

/// Everything that can go wrong between parsing a view and writing
/// the image file.
#[derive(Debug, Fail)]
pub enum Error {
    /// A view or run parameter is out of range.  Raised before any
    /// grid is allocated.
    #[fail(display = "invalid {}: {}", name, reason)]
    InvalidParameter {
        /// The name of the offending parameter, as the user sees it.
        name: &'static str,
        /// What was wrong with it.
        reason: String,
    },

    /// The destination could not be created or written.
    #[fail(display = "I/O failure writing {}: {}", path, cause)]
    Io {
        /// The destination path.
        path: String,
        /// The underlying I/O error.
        #[cause]
        cause: io::Error,
    },

    /// The PNG encoder rejected the intensity buffer.
    #[fail(display = "image encoding failed: {}", _0)]
    Encode(#[cause] ImageError),
}

impl Error {
    /// Shorthand for building an `InvalidParameter`.
    pub fn invalid<S: Into<String>>(name: &'static str, reason: S) -> Error {
        Error::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    /// True if this is an I/O failure rather than a configuration
    /// failure.
    pub fn is_io(&self) -> bool {
        match *self {
            Error::Io { .. } => true,
            _ => false,
        }
    }
}

/// A Result carrying the crate's Error.
pub type Result<T> = ::std::result::Result<T, Error>;

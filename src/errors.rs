//! Every way a render can fail.  Nothing here is retried: a failed
//! render is simply run again from the start.

use std::io;

/// The error type shared by the evaluator, the writers and the ring.
#[derive(Debug, Fail)]
pub enum Error {
    /// The requested size or worker count cannot produce an image.
    #[fail(display = "Invalid argument: {}", _0)]
    InvalidArgument(String),

    /// A pixel coordinate outside the image was handed to the evaluator.
    #[fail(
        display = "Invalid coordinates ({}, {}) for a pixel in a {} x {} image",
        x, y, width, height
    )]
    OutOfBounds {
        /// Column that was requested.
        x: usize,
        /// Row that was requested.
        y: usize,
        /// Width of the image.
        width: usize,
        /// Height of the image.
        height: usize,
    },

    /// The pixel buffer for a row range could not be reserved.
    #[fail(display = "Unable to allocate {} bytes for the pixel array", bytes)]
    AllocationFailure {
        /// Size of the reservation that failed.
        bytes: usize,
    },

    /// A worker could not open the shared output file.
    #[fail(display = "[Process {}] Error opening file {}: {}", rank, path, cause)]
    FileOpenFailure {
        /// Worker that failed.
        rank: usize,
        /// Output file path.
        path: String,
        /// Underlying I/O error.
        #[fail(cause)]
        cause: io::Error,
    },

    /// The leader could not create the output file or write its header.
    #[fail(display = "Failed to write BMP header to {}: {}", path, cause)]
    HeaderWriteFailure {
        /// Output file path.
        path: String,
        /// Underlying I/O error.
        #[fail(cause)]
        cause: io::Error,
    },

    /// Seeking or writing pixel rows failed after the file was opened.
    #[fail(display = "[Process {}] Failed to write rows to {}: {}", rank, path, cause)]
    WriteFailure {
        /// Worker that failed.
        rank: usize,
        /// Output file path.
        path: String,
        /// Underlying I/O error.
        #[fail(cause)]
        cause: io::Error,
    },

    /// The upstream neighbour left the ring without passing the token.
    #[fail(display = "[Process {}] Aborted: process {} never handed over the token", rank, upstream)]
    GroupAborted {
        /// Worker that gave up waiting.
        rank: usize,
        /// Worker whose token never arrived.
        upstream: usize,
    },

    /// A worker thread panicked instead of returning.
    #[fail(display = "[Process {}] Worker panicked", rank)]
    WorkerPanicked {
        /// Worker that panicked.
        rank: usize,
    },

    /// The benchmark CSV could not be appended to.
    #[fail(display = "Unable to open report file {} for writing: {}", path, cause)]
    ReportFailure {
        /// Report file path.
        path: String,
        /// Underlying I/O error.
        #[fail(cause)]
        cause: io::Error,
    },
}

/// Result alias used across the crate.
pub type Result<T> = ::std::result::Result<T, Error>;

#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Julia set renderer
//!
//! A Julia set is drawn by taking every pixel of an image as a point
//! on the complex plane and repeatedly squaring it and adding a fixed
//! constant, measuring how quickly the result runs off to infinity.
//! That "velocity" is the number used to color the pixel; points that
//! never leave get a flat interior color.
//!
//! The image is written as a 24-bit BMP.  It can be rendered by one
//! thread into one buffer, or by a group of workers that each own a
//! band of rows.  The workers compute in parallel but write into the
//! shared file strictly in rank order, passing a token down a ring.

extern crate crossbeam;
extern crate itertools;
extern crate num;
#[macro_use]
extern crate failure;
#[macro_use]
extern crate log;

#[cfg(test)]
extern crate tempfile;

pub mod bmp;
pub mod buffer;
pub mod errors;
pub mod fractal;
pub mod partition;
pub mod planes;
pub mod progress;
pub mod renderer;
pub mod report;
pub mod ring;

pub use errors::{Error, Result};
pub use renderer::JuliaRenderer;

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The escape-time evaluator.  Each pixel is mapped onto the complex
//! plane and iterated under `z -> z^2 + c` until it either leaves the
//! circle of radius 2 or runs out of iterations.  How much of the
//! iteration budget is left over decides the pixel's color.

use errors::{Error, Result};
use num::Complex;
use planes::{Dimensions, Pixel, Viewport};

/// Left edge of the rendered window.
pub const X_MIN: f32 = -1.6;
/// Right edge of the rendered window.
pub const X_MAX: f32 = 1.6;
/// Top edge of the rendered window.
pub const Y_MIN: f32 = -0.9;
/// Bottom edge of the rendered window.
pub const Y_MAX: f32 = 0.9;
/// Real part of the constant defining the Julia set.
pub const JULIA_RE: f32 = -0.79;
/// Imaginary part of the constant defining the Julia set.
pub const JULIA_IM: f32 = 0.15;
/// Iteration cap per pixel.
pub const MAX_ITER: u32 = 300;
/// An orbit has escaped once its magnitude reaches this value.
pub const ESCAPE_RADIUS: f32 = 2.0;
/// Color of points that never escape.
pub const INTERIOR: Rgb = Rgb(200, 100, 100);

/// A 24-bit color, in the order the pixel bytes are written.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Everything the evaluator needs besides the pixel itself.  The
/// defaults are the only configuration the renderers ever use.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct JuliaParams {
    /// Window of the complex plane covered by the image.
    pub viewport: Viewport,
    /// The constant `c` in `z^2 + c`.
    pub c: Complex<f32>,
    /// Iteration cap.
    pub max_iter: u32,
    /// Escape radius.
    pub escape_radius: f32,
}

impl Default for JuliaParams {
    fn default() -> Self {
        JuliaParams {
            viewport: Viewport {
                x_min: X_MIN,
                x_max: X_MAX,
                y_min: Y_MIN,
                y_max: Y_MAX,
            },
            c: Complex::new(JULIA_RE, JULIA_IM),
            max_iter: MAX_ITER,
            escape_radius: ESCAPE_RADIUS,
        }
    }
}

// Truncate toward zero, keep the low byte.
#[inline]
fn narrow(v: f64) -> u8 {
    (v as i32) as u8
}

impl JuliaParams {
    /// Iterates the orbit starting at `z` and returns how many of the
    /// `max_iter` iterations were left unused when it escaped.  Zero
    /// means the point never escaped.
    pub fn remaining_iterations(&self, mut z: Complex<f32>) -> u32 {
        let bound = self.escape_radius * self.escape_radius;
        let mut remaining = self.max_iter;
        while z.norm_sqr() < bound && remaining > 0 {
            z = z * z + self.c;
            remaining -= 1;
        }
        remaining
    }

    /// Maps the leftover iteration budget to a color.  `tint_bias`
    /// shifts the red and blue channels; 1.0 leaves them alone.  The
    /// channels are deliberately not clamped before narrowing, so the
    /// red and green ramps wrap around.
    pub fn colorize(&self, remaining: u32, tint_bias: f32) -> Rgb {
        if remaining == 0 {
            return INTERIOR;
        }
        let bias = f64::from(remaining as f32 / self.max_iter as f32);
        let tint = f64::from(tint_bias).powf(1.2);
        Rgb(
            narrow(-500.0 * tint * bias.powf(1.6)),
            narrow(-255.0 * bias.powf(0.3)),
            narrow(255.0 - 255.0 * tint * bias.powf(3.0)),
        )
    }

    /// Computes the color of one pixel of a `dims` sized image.
    pub fn evaluate(&self, pixel: Pixel, dims: Dimensions, tint_bias: f32) -> Result<Rgb> {
        if !dims.contains(&pixel) {
            return Err(Error::OutOfBounds {
                x: pixel.0,
                y: pixel.1,
                width: dims.width,
                height: dims.height,
            });
        }
        let z = self.viewport.pixel_to_point(&pixel, &dims);
        Ok(self.colorize(self.remaining_iterations(z), tint_bias))
    }
}

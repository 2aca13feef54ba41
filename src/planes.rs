//! Contains the Viewport struct, which describes a relationship
//! between a rectangle on the integral plane with an origin at 0,0,
//! and a rectangle on the complex plane bounded by fixed minimum and
//! maximum coordinates along each axis.
use errors::{Error, Result};
use num::Complex;

/// The largest `n` accepted for an image of `2n x n` pixels.  Beyond
/// this the BMP header's 32-bit size fields overflow.
pub const MAX_RESOLUTION: usize = 16_384;

/// Describes the width and height of the integral plane, which is
/// assumed to start at 0,0.  Images are always twice as wide as they
/// are tall.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Dimensions {
    /// Pixels per row.
    pub width: usize,
    /// Number of rows.
    pub height: usize,
}

/// Describes the x, y of a point in a region.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pixel(pub usize, pub usize);

impl Dimensions {
    /// Derives a `2n x n` image from the resolution given on the command
    /// line.
    pub fn from_resolution(n: usize) -> Result<Dimensions> {
        if n == 0 {
            return Err(Error::InvalidArgument(
                "<n> must be a strictly positive integer".to_string(),
            ));
        }
        if n > MAX_RESOLUTION {
            return Err(Error::InvalidArgument(format!(
                "<n> must not exceed {}",
                MAX_RESOLUTION
            )));
        }
        Ok(Dimensions {
            width: 2 * n,
            height: n,
        })
    }

    /// The total number of pixels in the integral grid.
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    /// Describes that the integral plane is of a size.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Whether a pixel lies inside the image.
    pub fn contains(&self, pixel: &Pixel) -> bool {
        pixel.0 < self.width && pixel.1 < self.height
    }
}

/// The window of the complex plane that the image shows.  Real parts
/// run along the image's columns, imaginary parts along its rows.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Viewport {
    /// Left edge.
    pub x_min: f32,
    /// Right edge.
    pub x_max: f32,
    /// Top edge.
    pub y_min: f32,
    /// Bottom edge.
    pub y_max: f32,
}

impl Viewport {
    /// Given a pixel on the integral cartesian plane, map it onto the
    /// complex plane.  The arithmetic is single precision and ordered as
    /// `(max - min) * p / extent + min` so that every image comes out
    /// byte for byte the same.
    pub fn pixel_to_point(&self, pixel: &Pixel, dims: &Dimensions) -> Complex<f32> {
        let re = (self.x_max - self.x_min) * (pixel.0 as f32) / (dims.width as f32) + self.x_min;
        let im = (self.y_max - self.y_min) * (pixel.1 as f32) / (dims.height as f32) + self.y_min;
        Complex::new(re, im)
    }
}

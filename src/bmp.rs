//! A minimal 24-bit BMP writer.  The header is always the same 54
//! bytes, so a file can be laid out before any of its pixels exist and
//! each band of rows can later be written straight to its own offset.

use buffer::{RenderBuffer, BYTES_PER_PIXEL};
use errors::{Error, Result};
use planes::Dimensions;
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Seek, SeekFrom, Write};
use std::path::Path;

/// Size of the file header plus the info header.
pub const HEADER_SIZE: usize = 54;
const INFO_HEADER_SIZE: u32 = 40;
const PADDING: [u8; 3] = [0, 0, 0];

/// Length in bytes of one stored row, padded to a multiple of four.
pub fn row_stride(width: usize) -> usize {
    (width * BYTES_PER_PIXEL + 3) & !3
}

/// Number of zero bytes appended to each row.
pub fn row_padding(width: usize) -> usize {
    (4 - (width * BYTES_PER_PIXEL) % 4) % 4
}

/// Absolute file offset of the first byte of `row`.
pub fn row_offset(width: usize, row: usize) -> u64 {
    HEADER_SIZE as u64 + (row as u64) * (row_stride(width) as u64)
}

/// The fields of the header that vary with the image.  Everything else
/// is fixed: one plane, 24 bits per pixel, no compression, no palette.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BmpHeader {
    /// Total size of the file in bytes.
    pub file_size: u32,
    /// Where the pixel rows start.
    pub data_offset: u32,
    /// Image width in pixels.
    pub width: i32,
    /// Image height in pixels.
    pub height: i32,
    /// Number of color planes.
    pub planes: u16,
    /// Bits per pixel.
    pub bits_per_pixel: u16,
    /// Unpadded size of the pixel data.
    pub image_size: u32,
}

impl BmpHeader {
    /// Header for an image of the given size.
    pub fn new(dims: Dimensions) -> Self {
        BmpHeader {
            file_size: (HEADER_SIZE + row_stride(dims.width) * dims.height) as u32,
            data_offset: HEADER_SIZE as u32,
            width: dims.width as i32,
            height: dims.height as i32,
            planes: 1,
            bits_per_pixel: 24,
            image_size: (dims.width * dims.height * BYTES_PER_PIXEL) as u32,
        }
    }

    /// Serializes the header, little-endian, field by field.
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut out = [0u8; HEADER_SIZE];
        out[0..2].copy_from_slice(b"BM");
        out[2..6].copy_from_slice(&self.file_size.to_le_bytes());
        // 6..10: two reserved shorts, zero.
        out[10..14].copy_from_slice(&self.data_offset.to_le_bytes());
        out[14..18].copy_from_slice(&INFO_HEADER_SIZE.to_le_bytes());
        out[18..22].copy_from_slice(&self.width.to_le_bytes());
        out[22..26].copy_from_slice(&self.height.to_le_bytes());
        out[26..28].copy_from_slice(&self.planes.to_le_bytes());
        out[28..30].copy_from_slice(&self.bits_per_pixel.to_le_bytes());
        // 30..34: compression, zero.
        out[34..38].copy_from_slice(&self.image_size.to_le_bytes());
        // 38..54: resolution, palette size and important colors, all zero.
        out
    }

    /// Reads a header back.  Returns `None` unless the bytes carry the
    /// `BM` signature and a 40 byte info header.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < HEADER_SIZE || &bytes[0..2] != b"BM" {
            return None;
        }
        let u32_at = |i: usize| u32::from_le_bytes([bytes[i], bytes[i + 1], bytes[i + 2], bytes[i + 3]]);
        let u16_at = |i: usize| u16::from_le_bytes([bytes[i], bytes[i + 1]]);
        if u32_at(14) != INFO_HEADER_SIZE {
            return None;
        }
        Some(BmpHeader {
            file_size: u32_at(2),
            data_offset: u32_at(10),
            width: u32_at(18) as i32,
            height: u32_at(22) as i32,
            planes: u16_at(26),
            bits_per_pixel: u16_at(28),
            image_size: u32_at(34),
        })
    }
}

/// Writes the rows of `buffer` to `out`, padding each one.
pub fn write_rows<W: Write>(out: &mut W, buffer: &RenderBuffer) -> io::Result<()> {
    let padding = &PADDING[..row_padding(buffer.width())];
    for row in buffer.rows() {
        out.write_all(row)?;
        out.write_all(padding)?;
    }
    Ok(())
}

/// Creates (or truncates) the file at `path` and writes just the
/// header.  The rows are filled in later by [`write_band`].
pub fn create_with_header(path: &Path, dims: Dimensions) -> Result<()> {
    let header_failure = |cause| Error::HeaderWriteFailure {
        path: path.display().to_string(),
        cause,
    };
    let mut file = File::create(path).map_err(header_failure)?;
    file.write_all(&BmpHeader::new(dims).to_bytes())
        .and_then(|_| file.flush())
        .map_err(header_failure)
}

/// Opens a fresh read/write handle on an existing file, seeks to the
/// first row of the buffer's band and writes the band.  The handle is
/// closed again before returning.
pub fn write_band(path: &Path, rank: usize, buffer: &RenderBuffer) -> Result<()> {
    let file = OpenOptions::new()
        .read(true)
        .write(true)
        .open(path)
        .map_err(|cause| Error::FileOpenFailure {
            rank,
            path: path.display().to_string(),
            cause,
        })?;
    let offset = row_offset(buffer.width(), buffer.band().start_row);
    let mut out = BufWriter::new(file);
    out.seek(SeekFrom::Start(offset))
        .and_then(|_| write_rows(&mut out, buffer))
        .and_then(|_| out.flush())
        .map_err(|cause| Error::WriteFailure {
            rank,
            path: path.display().to_string(),
            cause,
        })
}

/// Writes a complete image in one pass: header, then every row.
/// Returns the size of the finished file.
pub fn save_image(path: &Path, dims: Dimensions, buffer: &RenderBuffer) -> Result<u64> {
    let file = File::create(path).map_err(|cause| Error::FileOpenFailure {
        rank: 0,
        path: path.display().to_string(),
        cause,
    })?;
    let mut out = BufWriter::new(file);
    out.write_all(&BmpHeader::new(dims).to_bytes())
        .map_err(|cause| Error::HeaderWriteFailure {
            path: path.display().to_string(),
            cause,
        })?;
    write_rows(&mut out, buffer)
        .and_then(|_| out.flush())
        .and_then(|_| out.seek(SeekFrom::End(0)))
        .map_err(|cause| Error::WriteFailure {
            rank: 0,
            path: path.display().to_string(),
            cause,
        })
}

extern crate image;
extern crate julia;
extern crate tempfile;

use image::{GenericImageView, Pixel as ImagePixel};
use julia::bmp::{row_stride, BmpHeader, HEADER_SIZE};
use julia::fractal::{JuliaParams, INTERIOR};
use julia::planes::{Dimensions, Pixel};
use julia::JuliaRenderer;
use std::fs;
use std::io;
use std::path::Path;
use tempfile::tempdir;

fn pixel_at(bytes: &[u8], dims: Dimensions, x: usize, y: usize) -> [u8; 3] {
    let i = HEADER_SIZE + y * row_stride(dims.width) + x * 3;
    [bytes[i], bytes[i + 1], bytes[i + 2]]
}

fn render_single(path: &Path, n: usize) -> Vec<u8> {
    JuliaRenderer::new(n)
        .unwrap()
        .render_single(path, &mut io::sink())
        .unwrap();
    fs::read(path).unwrap()
}

fn render_ring(path: &Path, n: usize, workers: usize) -> Vec<u8> {
    JuliaRenderer::new(n)
        .unwrap()
        .render_ring(path, workers)
        .unwrap();
    fs::read(path).unwrap()
}

#[test]
fn single_worker_end_to_end() {
    let dir = tempdir().unwrap();
    let bytes = render_single(&dir.path().join("julia.bmp"), 4);
    assert_eq!(bytes.len(), 150);

    let header = BmpHeader::from_bytes(&bytes).unwrap();
    assert_eq!(header.file_size, 150);
    assert_eq!(header.data_offset, 54);
    assert_eq!(header.width, 8);
    assert_eq!(header.height, 4);
    assert_eq!(header.planes, 1);
    assert_eq!(header.bits_per_pixel, 24);

    let dims = Dimensions { width: 8, height: 4 };
    let params = JuliaParams::default();
    for y in 0..4 {
        for x in 0..8 {
            let rgb = params.evaluate(Pixel(x, y), dims, 1.0).unwrap();
            assert_eq!(pixel_at(&bytes, dims, x, y), [rgb.0, rgb.1, rgb.2]);
        }
    }
    let interior = [INTERIOR.0, INTERIOR.1, INTERIOR.2];
    assert_eq!(pixel_at(&bytes, dims, 3, 2), interior);
    assert_eq!(pixel_at(&bytes, dims, 5, 2), interior);
}

#[test]
fn ring_matches_single_byte_for_byte() {
    let dir = tempdir().unwrap();
    let single = render_single(&dir.path().join("single.bmp"), 4);
    let ring = render_ring(&dir.path().join("ring.bmp"), 4, 2);
    assert_eq!(single, ring);
}

#[test]
fn uneven_bands_and_padding_match_single() {
    // 2 x 13 = 26 pixels = 78 bytes per row, padded to 80.
    let dir = tempdir().unwrap();
    let single = render_single(&dir.path().join("single.bmp"), 13);
    for workers in &[3, 5, 13] {
        let ring = render_ring(&dir.path().join(format!("ring{}.bmp", workers)), 13, *workers);
        assert_eq!(single, ring, "{} workers", workers);
    }
}

#[test]
fn more_workers_than_rows() {
    let dir = tempdir().unwrap();
    let single = render_single(&dir.path().join("single.bmp"), 1);
    let path = dir.path().join("ring.bmp");
    let reports = JuliaRenderer::new(1).unwrap().render_ring(&path, 4).unwrap();
    assert_eq!(reports.len(), 4);
    assert_eq!(reports[0].band.rows, 1);
    assert!(reports[1..].iter().all(|r| r.band.rows == 0));
    assert_eq!(fs::read(&path).unwrap(), single);
    assert_eq!(single.len(), 54 + 8);
}

#[test]
fn ring_truncates_a_stale_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("julia.bmp");
    fs::write(&path, vec![0xAAu8; 4096]).unwrap();
    let bytes = render_ring(&path, 4, 3);
    assert_eq!(bytes.len(), 150);
}

#[test]
fn output_decodes_as_a_bmp() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("julia.bmp");
    let bytes = render_ring(&path, 4, 2);
    let decoded = image::open(&path).unwrap();
    assert_eq!(decoded.dimensions(), (8, 4));

    // BMP readers take the first stored row as the bottom one and read
    // the channels as blue, green, red.
    let rgb = decoded.to_rgb();
    let dims = Dimensions { width: 8, height: 4 };
    let stored = pixel_at(&bytes, dims, 0, 0);
    let shown = rgb.get_pixel(0, 3);
    assert_eq!(shown.channels(), &[stored[2], stored[1], stored[0]]);
}

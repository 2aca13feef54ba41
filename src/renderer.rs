// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Julia set renderer
//!
//! Two ways to get the same image onto disk.  `render_single` computes
//! every row in one buffer and writes the file in a single pass.
//! `render_ring` splits the rows into one band per worker, computes the
//! bands in parallel, and then lets the workers write their own bands
//! into the shared file one after another, in rank order.  The two
//! produce byte-identical files.

use bmp;
use buffer::RenderBuffer;
use crossbeam;
use errors::{Error, Result};
use fractal::JuliaParams;
use partition::{partition, RowRange};
use planes::Dimensions;
use progress::{ProgressBar, Timer};
use report::WorkerReport;
use ring::{ring, RingMember};
use std::io::Write;
use std::path::Path;
use std::time::{Duration, Instant};

/// The tint every image is rendered with; 1.0 is no adjustment.
pub const DEFAULT_TINT: f32 = 1.0;

/// Summary of a single-buffer render.
#[derive(Clone, Debug, PartialEq)]
pub struct SingleReport {
    /// Size of the written file.
    pub file_size: u64,
    /// Wall clock time of the whole render.
    pub elapsed: Duration,
}

/// Renders a `2n x n` Julia set image.  Once set, this object should not
/// be mutable; it is shared read-only by every worker.
#[derive(Debug)]
pub struct JuliaRenderer {
    params: JuliaParams,
    dims: Dimensions,
    tint_bias: f32,
}

impl JuliaRenderer {
    /// Requires the resolution `n` of the image.  Fails unless `n` is
    /// positive and small enough for a BMP file.
    pub fn new(resolution: usize) -> Result<Self> {
        Ok(JuliaRenderer {
            params: JuliaParams::default(),
            dims: Dimensions::from_resolution(resolution)?,
            tint_bias: DEFAULT_TINT,
        })
    }

    /// Size of the image being rendered.
    pub fn dimensions(&self) -> Dimensions {
        self.dims
    }

    /// Fills a buffer for `band`.
    pub fn render_band<F: FnMut(usize)>(&self, band: RowRange, on_row: F) -> Result<RenderBuffer> {
        let mut buffer = RenderBuffer::allocate(self.dims.width, band)?;
        buffer.fill(&self.params, self.dims, self.tint_bias, on_row)?;
        Ok(buffer)
    }

    /// The main function for single-threaded rendering.  Draws progress
    /// to `progress` after every row, then saves the image to `path`.
    pub fn render_single<W: Write>(&self, path: &Path, progress: &mut W) -> Result<SingleReport> {
        let started = Instant::now();
        let timer = Timer::start();
        let bar = ProgressBar::default();
        let band = RowRange {
            start_row: 0,
            rows: self.dims.height,
        };
        info!(
            "Rendering {}x{} image into {}",
            self.dims.width,
            self.dims.height,
            path.display()
        );
        let height = self.dims.height;
        let buffer = self.render_band(band, |done| {
            // The bar is cosmetic; a closed terminal must not stop the render.
            let _ = bar.update(&mut *progress, &timer, done, height);
        })?;
        let _ = writeln!(progress);
        let file_size = bmp::save_image(path, self.dims, &buffer)?;
        let elapsed = started.elapsed();
        info!("Wrote {} bytes to {} in {:?}", file_size, path.display(), elapsed);
        Ok(SingleReport { file_size, elapsed })
    }

    /// A multi-threaded version of the render function.  Each of
    /// `workers` threads renders its own band and writes it into `path`
    /// when its turn in the ring comes.  Returns one timing report per
    /// worker, in rank order, or the error of the lowest-ranked worker
    /// that failed.
    pub fn render_ring(&self, path: &Path, workers: usize) -> Result<Vec<WorkerReport>> {
        if workers == 0 {
            return Err(Error::InvalidArgument(
                "the worker count must be at least 1".to_string(),
            ));
        }
        info!(
            "Rendering {}x{} image into {} with {} workers",
            self.dims.width,
            self.dims.height,
            path.display(),
            workers
        );
        let bands = partition(self.dims.height, workers);
        let members = ring(workers);
        let results = crossbeam::scope(|spawner| {
            let handles: Vec<_> = members
                .into_iter()
                .zip(bands)
                .map(|(member, band)| spawner.spawn(move |_| self.ring_worker(member, band, path)))
                .collect();
            handles
                .into_iter()
                .enumerate()
                .map(|(rank, handle)| {
                    handle
                        .join()
                        .unwrap_or_else(|_| Err(Error::WorkerPanicked { rank }))
                })
                .collect::<Vec<_>>()
        })
        .map_err(|_| Error::WorkerPanicked { rank: 0 })?;

        for result in &results {
            if let Err(ref e) = *result {
                error!("{}", e);
            }
        }
        results.into_iter().collect()
    }

    // One worker of the ring.  Any early return drops `member`, which
    // releases the barrier and disconnects the successor.
    fn ring_worker(&self, mut member: RingMember, band: RowRange, path: &Path) -> Result<WorkerReport> {
        let rank = member.rank();
        let started = Instant::now();
        debug!("[Process {}] rows {:?}", rank, band.as_range());

        let mut buffer = RenderBuffer::allocate(self.dims.width, band)?;
        let setup = started.elapsed();

        let mark = Instant::now();
        buffer.fill(&self.params, self.dims, self.tint_bias, |_| ())?;
        let computation = mark.elapsed();
        debug!("[Process {}] computed {} rows", rank, band.rows);

        let mut header_writing = Duration::from_secs(0);
        if member.is_leader() {
            let mark = Instant::now();
            bmp::create_with_header(path, self.dims)?;
            header_writing = mark.elapsed();
            debug!("[Process {}] header written", rank);
        }

        let mark = Instant::now();
        member.barrier();
        let barrier = mark.elapsed();

        let mut file_writing = Duration::from_secs(0);
        member.take_turn(|| {
            let mark = Instant::now();
            bmp::write_band(path, rank, &buffer)?;
            file_writing = mark.elapsed();
            debug!("[Process {}] band written, passing the token", rank);
            Ok(())
        })?;
        drop(buffer);

        Ok(WorkerReport {
            rank,
            band,
            setup,
            computation,
            header_writing,
            file_writing,
            barrier,
            total: started.elapsed(),
        })
    }
}

//! Benchmark bookkeeping: the CSV every run appends to, and the
//! per-worker timing breakdown of a ring render.

use errors::{Error, Result};
use partition::RowRange;
use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::time::Duration;

/// Header line written to an empty benchmark file.
pub const CSV_HEADER: &str = "Processes,Resolution,ExecutionTime";

fn seconds(d: Duration) -> f64 {
    d.as_secs() as f64 + f64::from(d.subsec_nanos()) * 1e-9
}

/// Appends one `processes,resolution,seconds` row to the CSV at `path`,
/// creating the file and its header line if needed.
pub fn append_to_csv(
    path: &Path,
    processes: usize,
    resolution: usize,
    elapsed: Duration,
) -> Result<()> {
    let failure = |cause| Error::ReportFailure {
        path: path.display().to_string(),
        cause,
    };
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(failure)?;
    let empty = file.metadata().map_err(failure)?.len() == 0;
    if empty {
        writeln!(file, "{}", CSV_HEADER).map_err(failure)?;
    }
    writeln!(file, "{},{},{:.6}", processes, resolution, seconds(elapsed)).map_err(failure)
}

/// Where one worker of a ring render spent its time.
#[derive(Clone, Debug, PartialEq)]
pub struct WorkerReport {
    /// Position of the worker in the ring.
    pub rank: usize,
    /// Rows the worker rendered.
    pub band: RowRange,
    /// Reserving the pixel buffer.
    pub setup: Duration,
    /// Evaluating the band.
    pub computation: Duration,
    /// Creating the file and writing its header; leader only.
    pub header_writing: Duration,
    /// Writing the band once the token arrived.
    pub file_writing: Duration,
    /// Waiting at the barrier.
    pub barrier: Duration,
    /// Start of setup to the hand-off.
    pub total: Duration,
}

impl fmt::Display for WorkerReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.band.is_empty() {
            writeln!(f, "[Process {}] Timing Report [no rows]:", self.rank)?;
        } else {
            writeln!(
                f,
                "[Process {}] Timing Report [{}-{}]:",
                self.rank,
                self.band.start_row,
                self.band.end_row() - 1
            )?;
        }
        writeln!(f, "  Setup: {:.3} seconds", seconds(self.setup))?;
        writeln!(f, "  Computation: {:.3} seconds", seconds(self.computation))?;
        writeln!(f, "  Header Writing: {:.3} seconds", seconds(self.header_writing))?;
        writeln!(f, "  File Writing: {:.3} seconds", seconds(self.file_writing))?;
        writeln!(f, "  Barrier Synchronization: {:.3} seconds", seconds(self.barrier))?;
        write!(f, "  Total Execution: {:.3} seconds", seconds(self.total))
    }
}

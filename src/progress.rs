//! A one-line terminal progress bar.

use std::io::{self, Write};
use std::time::{Duration, Instant};

/// Measures elapsed time from the moment it is created.  The caller
/// owns it and hands it to every [`ProgressBar::update`].
#[derive(Copy, Clone, Debug)]
pub struct Timer {
    start: Instant,
}

impl Timer {
    /// Starts timing now.
    pub fn start() -> Self {
        Timer {
            start: Instant::now(),
        }
    }

    /// Time since the timer started.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

/// Rendering options for the bar.
#[derive(Clone, Debug)]
pub struct ProgressBar {
    width: usize,
    precision: usize,
    show_time: bool,
    label: Option<String>,
}

impl Default for ProgressBar {
    fn default() -> Self {
        ProgressBar {
            width: 50,
            precision: 2,
            show_time: true,
            label: None,
        }
    }
}

impl ProgressBar {
    /// Sets the number of cells in the bar.  Zero restores the default.
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = if width == 0 { 50 } else { width };
        self
    }

    /// Sets the decimals of the elapsed time.  Anything above 5 falls
    /// back to the default of 2.
    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = if precision > 5 { 2 } else { precision };
        self
    }

    /// Whether to print the elapsed time when the bar fills up.
    pub fn with_time(mut self, show_time: bool) -> Self {
        self.show_time = show_time;
        self
    }

    /// Prefixes the bar with `[Process rank]`.
    pub fn for_process(mut self, rank: usize) -> Self {
        self.label = Some(format!("[Process {}] ", rank));
        self
    }

    /// Formats the bar for `current` out of `total` without the leading
    /// carriage return.
    pub fn render(&self, timer: &Timer, current: usize, total: usize) -> String {
        let current = current.min(total);
        let progress = if total == 0 {
            1.0
        } else {
            current as f64 / total as f64
        };
        let position = (self.width as f64 * progress) as usize;
        let cells: String = (0..self.width)
            .map(|i| if i <= position { '=' } else { ' ' })
            .collect();
        let mut line = format!(
            "{}[{}] {}%",
            self.label.as_ref().map(String::as_str).unwrap_or(""),
            cells,
            (progress * 100.0) as u32
        );
        if current == total && self.show_time {
            let elapsed = timer.elapsed();
            let ms = elapsed.as_secs() as f64 * 1000.0 + f64::from(elapsed.subsec_nanos()) / 1e6;
            line.push_str(&format!(" ({:.*} ms)", self.precision, ms));
        }
        line
    }

    /// Redraws the bar in place on `out`.
    pub fn update<W: Write>(
        &self,
        out: &mut W,
        timer: &Timer,
        current: usize,
        total: usize,
    ) -> io::Result<()> {
        write!(out, "\r{}", self.render(timer, current, total))?;
        out.flush()
    }
}

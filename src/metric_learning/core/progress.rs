//! Progress reporting for NCA fits.
//!
//! A [`ProgressReporter`] receives one [`Progress`] record per objective
//! evaluation. Reporting is purely observational: reporters cannot change
//! the optimization. [`LogReporter`] is the default used when
//! `NcaOptions::verbose` is set and writes a small table through the `log`
//! facade at `info` level.
use log::info;

/// Snapshot passed to reporters after each objective evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progress {
    /// 0-based evaluation counter.
    pub iteration: u64,
    /// Un-signed loss: expected number of correctly classified points.
    pub objective: f64,
    /// Wall-clock seconds spent inside this evaluation.
    pub elapsed_seconds: f64,
}

/// Observer invoked once per objective evaluation.
pub trait ProgressReporter {
    fn report(&mut self, progress: &Progress);
}

/// Column header shared by [`LogReporter`] rows.
pub(crate) fn header_line() -> String {
    format!("{:>10} {:>20} {:>10}", "Iteration", "Objective Value", "Time(s)")
}

/// Format one table row.
pub(crate) fn format_row(progress: &Progress) -> String {
    format!(
        "{:>10} {:>20.6e} {:>10.2}",
        progress.iteration, progress.objective, progress.elapsed_seconds
    )
}

/// Writes `[NCA]`-prefixed rows through `log::info!`.
///
/// The header and separator are emitted before the first row.
#[derive(Debug, Clone, Default)]
pub struct LogReporter {
    header_written: bool,
}

impl LogReporter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProgressReporter for LogReporter {
    fn report(&mut self, progress: &Progress) {
        if !self.header_written {
            let header = header_line();
            info!("[NCA]");
            info!("[NCA] {header}");
            info!("[NCA] {}", "-".repeat(header.len()));
            self.header_written = true;
        }
        info!("[NCA] {}", format_row(progress));
    }
}

//! Derived performance metrics and the append-only results log.

use std::fs::OpenOptions;
use std::io::Write;
use std::mem;
use std::path::Path;
use std::time::Duration;

use crate::error::Error;

/// Coordinator-side wall-clock samples for one parallel phase.
///
/// `compute` covers only the local work; `total` additionally includes
/// buffer allocation and the collective.
#[derive(Debug, Clone, Copy)]
pub struct PhaseTiming {
    pub compute: Duration,
    pub total: Duration,
}

/// One completed parallel-transpose run, ready for reporting.
///
/// Immutable once computed; persisted as a single semicolon-delimited
/// line. The speedup denominator is the serial compute time passed in
/// explicitly by the caller — there is no hidden cross-phase state.
#[derive(Debug, Clone, Copy)]
pub struct MetricsRecord {
    pub workers: usize,
    pub n: usize,
    pub compute_secs: f64,
    pub total_secs: f64,
    pub bandwidth_gbps: f64,
    pub speedup: f64,
    pub efficiency_pct: f64,
}

impl MetricsRecord {
    /// Derive the record from the serial baseline and the phase timing.
    ///
    /// Bandwidth counts one read and one write per element:
    /// `2 * n^2 * sizeof(f32) / compute / 1e9`.
    pub fn new(workers: usize, n: usize, serial_compute: Duration, timing: PhaseTiming) -> Self {
        let compute_secs = timing.compute.as_secs_f64();
        let total_secs = timing.total.as_secs_f64();
        let bytes_moved = 2.0 * (n * n) as f64 * mem::size_of::<f32>() as f64;
        let bandwidth_gbps = bytes_moved / compute_secs / 1e9;
        let speedup = serial_compute.as_secs_f64() / compute_secs;
        let efficiency_pct = 100.0 * speedup / workers as f64;
        MetricsRecord {
            workers,
            n,
            compute_secs,
            total_secs,
            bandwidth_gbps,
            speedup,
            efficiency_pct,
        }
    }

    /// Human-readable report lines for the console.
    pub fn report(&self) {
        println!(
            "\nMATRIX TRANSPOSITION GROUP time (compute only) = {:12.8} sec",
            self.compute_secs
        );
        println!(
            "MATRIX TRANSPOSITION GROUP time (end to end)   = {:12.8} sec",
            self.total_secs
        );
        println!(
            "MATRIX TRANSPOSITION GROUP bandwidth = {:5.4} GB/sec",
            self.bandwidth_gbps
        );
        println!("MATRIX TRANSPOSITION GROUP speedup = {:5.2}", self.speedup);
        println!(
            "MATRIX TRANSPOSITION GROUP efficiency = {:5.2}%",
            self.efficiency_pct
        );
    }

    /// The persisted form: fixed-width fields, semicolon-separated.
    pub fn log_line(&self) -> String {
        format!(
            "{:11};{:11};{:12.8};{:12.8};{:5.4};{:5.2};{:5.2}",
            self.workers,
            self.n,
            self.compute_secs,
            self.total_secs,
            self.bandwidth_gbps,
            self.speedup,
            self.efficiency_pct
        )
    }

    /// Append one record line to the results log, never truncating prior
    /// runs. Failure here is [`Error::Sink`]: the caller reports it and
    /// moves on, since metrics persistence is best-effort.
    pub fn append_to(&self, path: &Path) -> Result<(), Error> {
        let mut file = OpenOptions::new().append(true).create(true).open(path)?;
        writeln!(file, "{}", self.log_line())?;
        Ok(())
    }
}

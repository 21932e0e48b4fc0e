//! Sinks for solver progress and results.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{info, warn};

use crate::{BreakupError, Partition, Result};

/// Statistics for a completed level.
#[derive(Clone, Debug, PartialEq)]
pub struct LevelProgress {
    pub parts: usize,
    pub count: usize,
    pub peak_memory_bytes: Option<u64>,
    pub elapsed: Duration,
}

pub trait Reporter {
    fn start(&mut self, _n: usize) -> Result<()> {
        Ok(())
    }

    fn append_progress(&mut self, progress: &LevelProgress) -> Result<()>;

    /// Called right before the first stable structure is reported.
    fn start_results(&mut self, _n: usize) -> Result<()> {
        Ok(())
    }

    fn append_error(&mut self, message: &str) -> Result<()>;

    fn append_result(&mut self, partition: &Partition) -> Result<()>;

    fn finish(&mut self, _elapsed: Duration) -> Result<()> {
        Ok(())
    }
}

/// Peak resident set size of the process, where the platform exposes it.
pub fn peak_memory_bytes() -> Option<u64> {
    let status = fs::read_to_string("/proc/self/status").ok()?;
    let line = status.lines().find(|l| l.starts_with("VmHWM:"))?;
    let kb: u64 = line.split_whitespace().nth(1)?.parse().ok()?;
    Some(kb * 1024)
}

/// Appends the run log to `log.txt` and the stable structures to
/// `result.txt` in the output directory.
pub struct FileReporter {
    log: File,
    result: File,
}

impl FileReporter {
    pub fn open(dir: &Path) -> Result<Self> {
        Ok(Self {
            log: Self::open_append(dir.join("log.txt"))?,
            result: Self::open_append(dir.join("result.txt"))?,
        })
    }

    fn open_append(path: PathBuf) -> Result<File> {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| BreakupError::Sink { path, source })
    }
}

impl Reporter for FileReporter {
    fn start(&mut self, n: usize) -> Result<()> {
        writeln!(self.log, "n={n}")?;
        Ok(())
    }

    fn append_progress(&mut self, progress: &LevelProgress) -> Result<()> {
        let gb = progress.peak_memory_bytes.unwrap_or(0) as f64 / 1024.0 / 1024.0 / 1024.0;
        let secs = progress.elapsed.as_secs_f64();
        info!(parts = progress.parts, count = progress.count, memory_gb = gb, elapsed = secs, "level done");
        writeln!(
            self.log,
            "k={}, count={}, memory usage: {:.3} GB, elapsed: {:.3} seconds.",
            progress.parts, progress.count, gb, secs
        )?;
        Ok(())
    }

    fn start_results(&mut self, n: usize) -> Result<()> {
        writeln!(self.result, "Stable descendant(s) of ({n}) is/are:")?;
        Ok(())
    }

    fn append_error(&mut self, message: &str) -> Result<()> {
        warn!("{message}");
        writeln!(self.log, "Error: {message}")?;
        Ok(())
    }

    fn append_result(&mut self, partition: &Partition) -> Result<()> {
        info!(%partition, "stable descendant");
        let line = partition.parts().iter().map(|q| q.to_string()).collect::<Vec<_>>().join(" ");
        writeln!(self.result, "{line}")?;
        Ok(())
    }

    fn finish(&mut self, elapsed: Duration) -> Result<()> {
        writeln!(self.log, "Elapsed time: {:.3} seconds.", elapsed.as_secs_f64())?;
        writeln!(self.log, "{}", "=".repeat(51))?;
        self.log.flush()?;
        self.result.flush()?;
        Ok(())
    }
}

/// Keeps everything in memory.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    pub progress: Vec<LevelProgress>,
    pub errors: Vec<String>,
    pub results: Vec<Partition>,
}

impl Reporter for RecordingReporter {
    fn append_progress(&mut self, progress: &LevelProgress) -> Result<()> {
        self.progress.push(progress.clone());
        Ok(())
    }

    fn append_error(&mut self, message: &str) -> Result<()> {
        self.errors.push(message.to_string());
        Ok(())
    }

    fn append_result(&mut self, partition: &Partition) -> Result<()> {
        self.results.push(partition.clone());
        Ok(())
    }
}

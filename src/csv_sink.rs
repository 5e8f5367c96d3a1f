//! CSV output, grounded in the original `writer.c`'s exact row format:
//! a header written once per file (unless appending to one that
//! already has it), then one `difficulty,seed,score,<payload>` row
//! per accepted attempt.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};

/// A single output file shared by every worker thread generating for
/// one engine. The lock serializes writes so rows from concurrent
/// workers never interleave mid-line.
pub struct CsvSink {
    path: PathBuf,
    file: Mutex<BufWriter<File>>,
}

impl CsvSink {
    /// Opens `path` for writing. When `append` is true and the file
    /// already exists, rows are added after its current content and
    /// no header is written; otherwise the file is created or
    /// truncated and a fresh header line is written immediately.
    pub fn open(path: &Path, header: &str, append: bool) -> Result<Self> {
        let already_has_header = append && path.exists();

        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .append(append)
            .truncate(!append)
            .open(path)
            .with_context(|| format!("failed to open CSV output at {}", path.display()))?;

        let mut writer = BufWriter::new(file);
        if !already_has_header {
            writeln!(writer, "difficulty,seed,score,{header}")
                .with_context(|| format!("failed to write CSV header to {}", path.display()))?;
            writer.flush()?;
        }

        Ok(CsvSink {
            path: path.to_path_buf(),
            file: Mutex::new(writer),
        })
    }

    /// Appends one accepted attempt as a CSV row: `difficulty`, `seed`,
    /// `score` formatted to exactly one decimal place, then the
    /// module's own payload fields verbatim.
    pub fn write_row(&self, difficulty: &str, seed: u32, score: f64, payload: &str) -> Result<()> {
        let mut writer = self
            .file
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        writeln!(writer, "{difficulty},{seed},{score:.1},{payload}")
            .with_context(|| format!("failed to write CSV row to {}", self.path.display()))?;
        writer.flush().with_context(|| {
            format!("failed to flush CSV output to {}", self.path.display())
        })?;
        Ok(())
    }
}

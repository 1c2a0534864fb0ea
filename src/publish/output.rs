//! Output sinks for forwarded tool output

use crate::core::OutputSink;
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Run log name, resolved against the working directory
pub const RUN_LOG_FILENAME: &str = "lastlog.log";

/// UTF-8 log file, truncated on open and flushed after every line
#[derive(Debug)]
pub struct LogFileSink {
    path: PathBuf,
    file: Mutex<File>,
}

impl LogFileSink {
    pub fn create(path: &Path) -> io::Result<Self> {
        let file = File::create(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            file: Mutex::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Independent writer onto the same file, for routing diagnostics
    pub fn try_clone_writer(&self) -> io::Result<File> {
        lock(&self.file).try_clone()
    }
}

impl OutputSink for LogFileSink {
    fn write_line(&self, line: &str) -> io::Result<()> {
        let mut file = lock(&self.file);
        writeln!(file, "{}", line)?;
        file.flush()
    }
}

/// In-memory sink that records lines in write order
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        lock(&self.lines).clone()
    }
}

impl OutputSink for MemorySink {
    fn write_line(&self, line: &str) -> io::Result<()> {
        lock(&self.lines).push(line.to_string());
        Ok(())
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

//! Append-only JSONL file for one session.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use super::entry::JsonLogEntry;

/// Appends entries to `<logs_dir>/<date>_<session>.jsonl`.
pub struct SessionLogWriter {
    session: String,
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl SessionLogWriter {
    /// Open (or create) today's file for `session`, creating `logs_dir` if needed.
    pub fn new(logs_dir: impl AsRef<Path>, session: impl Into<String>) -> io::Result<Self> {
        let session = session.into();
        let logs_dir = logs_dir.as_ref();
        fs::create_dir_all(logs_dir)?;

        let date = chrono::Local::now().format("%Y-%m-%d");
        let path = logs_dir.join(format!("{}_{}.jsonl", date, session));

        let file = OpenOptions::new().create(true).append(true).open(&path)?;

        Ok(Self {
            session,
            writer: Mutex::new(BufWriter::new(file)),
            path,
        })
    }

    pub fn session(&self) -> &str {
        &self.session
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(&self) -> io::Result<MutexGuard<'_, BufWriter<File>>> {
        self.writer
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "log writer poisoned"))
    }

    /// Write one entry as a line and flush it.
    pub fn write(&self, entry: &JsonLogEntry) -> io::Result<()> {
        let json = entry
            .to_json_line()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        let mut writer = self.lock()?;
        writeln!(writer, "{}", json)?;
        writer.flush()
    }

    pub fn flush(&self) -> io::Result<()> {
        self.lock()?.flush()
    }
}

impl Drop for SessionLogWriter {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

/// Read every entry under `logs_dir`, sorted by timestamp.
///
/// Lines that do not parse are skipped.
pub fn read_entries(logs_dir: impl AsRef<Path>) -> io::Result<Vec<JsonLogEntry>> {
    let logs_dir = logs_dir.as_ref();
    if !logs_dir.exists() {
        return Ok(Vec::new());
    }

    let mut entries = Vec::new();
    for dir_entry in fs::read_dir(logs_dir)? {
        let path = dir_entry?.path();
        if path.extension().is_some_and(|e| e == "jsonl") {
            let content = fs::read_to_string(&path)?;
            entries.extend(
                content
                    .lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty())
                    .filter_map(|line| JsonLogEntry::from_json_line(line).ok()),
            );
        }
    }

    entries.sort_by(|a, b| a.ts.cmp(&b.ts));
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_writer_creates_file() {
        let temp = TempDir::new().unwrap();
        let logs_dir = temp.path().join("logs");

        let writer = SessionLogWriter::new(&logs_dir, "demo").unwrap();

        assert!(writer.path().exists());
        assert!(writer.path().to_string_lossy().ends_with("_demo.jsonl"));
        assert_eq!(writer.session(), "demo");
    }

    #[test]
    fn test_read_entries_across_sessions() {
        let temp = TempDir::new().unwrap();
        let logs_dir = temp.path().join("logs");

        let first = SessionLogWriter::new(&logs_dir, "first").unwrap();
        let second = SessionLogWriter::new(&logs_dir, "second").unwrap();
        first
            .write(&JsonLogEntry::new("info", "first", "t", "cheer sent"))
            .unwrap();
        second
            .write(&JsonLogEntry::new("warn", "second", "t", "cheer request failed"))
            .unwrap();
        drop(first);
        drop(second);

        fs::write(logs_dir.join("notes.txt"), "not a log").unwrap();

        let entries = read_entries(&logs_dir).unwrap();
        assert_eq!(entries.len(), 2);
        let sessions: Vec<_> = entries.iter().map(|e| e.session.as_str()).collect();
        assert!(sessions.contains(&"first"));
        assert!(sessions.contains(&"second"));
    }

    #[test]
    fn test_missing_dir_reads_empty() {
        let temp = TempDir::new().unwrap();
        assert!(read_entries(temp.path().join("nope")).unwrap().is_empty());
    }
}

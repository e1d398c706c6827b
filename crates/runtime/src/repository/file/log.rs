//! Append-only JSON-lines event log.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, LineWriter, Write};
use std::path::{Path, PathBuf};

use crate::events::Event;
use crate::repository::{EventRepository, RepositoryError, Result};

/// File-backed event log, one JSON object per line.
///
/// Lines are flushed as they are written, so readers always see complete
/// entries.
pub struct FileEventLog {
    path: PathBuf,
    writer: LineWriter<File>,
    len: u64,
}

impl FileEventLog {
    /// Open or create a log at `base_dir/filename`, appending to existing content.
    pub fn open_or_create(base_dir: impl AsRef<Path>, filename: impl AsRef<str>) -> Result<Self> {
        let base_dir = base_dir.as_ref();
        std::fs::create_dir_all(base_dir)?;

        let path = base_dir.join(filename.as_ref());
        let file = OpenOptions::new().create(true).append(true).open(&path)?;

        let len = BufReader::new(File::open(&path)?)
            .lines()
            .filter(|line| line.as_ref().map_or(true, |l| !l.trim().is_empty()))
            .count() as u64;

        tracing::debug!("Opened event log {} with {} entries", path.display(), len);

        Ok(Self {
            path,
            writer: LineWriter::new(file),
            len,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl EventRepository for FileEventLog {
    fn append(&mut self, event: &Event) -> Result<u64> {
        let line = serde_json::to_string(event)?;
        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(b"\n")?;
        let seq = self.len;
        self.len += 1;
        Ok(seq)
    }

    fn read_all(&self) -> Result<Vec<Event>> {
        let reader = BufReader::new(File::open(&self.path)?);
        let mut events = Vec::new();
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let event = serde_json::from_str(&line).map_err(|source| {
                RepositoryError::MalformedEvent {
                    line: index + 1,
                    source,
                }
            })?;
            events.push(event);
        }
        Ok(events)
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    fn len(&self) -> Result<u64> {
        Ok(self.len)
    }
}

//! Output destinations

use crate::cli::StreamTarget;
use crate::error::OutputError;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// A file opened for writing, truncated on open
///
/// Buffered; flushed by [`FileSink::close`] or, ignoring errors, on drop.
#[derive(Debug)]
pub struct FileSink {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl FileSink {
    /// Create or truncate `path`
    ///
    /// # Errors
    /// Returns `OutputError::Unavailable` if the file cannot be opened.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self, OutputError> {
        let path = path.as_ref().to_path_buf();
        let file = File::create(&path).map_err(|source| OutputError::Unavailable {
            path: path.clone(),
            source,
        })?;
        log::debug!("Opened {} for writing", path.display());
        Ok(Self {
            path,
            writer: BufWriter::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Flush and close
    pub fn close(mut self) -> Result<(), OutputError> {
        self.writer.flush()?;
        Ok(())
    }
}

impl Write for FileSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writer.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

/// Where a write goes
#[derive(Debug)]
pub enum Destination {
    Stdout,
    Stderr,
    File(FileSink),
}

impl Destination {
    /// Resolve a stream value, opening the file if it names one
    ///
    /// # Errors
    /// Returns `OutputError::Unavailable` if the file cannot be opened.
    pub fn open(target: &StreamTarget) -> Result<Self, OutputError> {
        match target {
            StreamTarget::Std => Ok(Destination::Stdout),
            StreamTarget::Path(path) => Ok(Destination::File(FileSink::create(path)?)),
        }
    }

    pub fn is_file(&self) -> bool {
        matches!(self, Destination::File(_))
    }

    /// Flush and close a file destination; no-op for standard streams
    pub fn close(self) -> Result<(), OutputError> {
        match self {
            Destination::File(sink) => sink.close(),
            Destination::Stdout | Destination::Stderr => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_std() {
        let dest = Destination::open(&StreamTarget::Std).unwrap();
        assert!(matches!(dest, Destination::Stdout));
        assert!(!dest.is_file());
    }

    #[test]
    fn test_open_truncates() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.txt");
        std::fs::write(&path, "old content that is long").unwrap();

        let mut dest = Destination::open(&StreamTarget::Path(path.clone())).unwrap();
        if let Destination::File(sink) = &mut dest {
            sink.write_all(b"new").unwrap();
        }
        dest.close().unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new");
    }

    #[test]
    fn test_open_unavailable() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing-dir").join("out.txt");

        let err = Destination::open(&StreamTarget::Path(path.clone())).unwrap_err();
        assert!(matches!(err, OutputError::Unavailable { path: ref p, .. } if *p == path));
    }

    #[test]
    fn test_drop_flushes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("dropped.txt");
        {
            let mut sink = FileSink::create(&path).unwrap();
            sink.write_all(b"kept").unwrap();
        }
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "kept");
    }
}

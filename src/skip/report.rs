use crate::skip::SkipStoreError;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Plain-text report of the videos skipped during a run
///
/// One line per video: `<language> - <topic> - <url> - <license>`.
pub struct SkipReport {
    path: PathBuf,
    file: File,
    lines: usize,
}

impl SkipReport {
    /// Creates the report, discarding any report from a previous run
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self, SkipStoreError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&path)?;

        Ok(Self {
            path,
            file,
            lines: 0,
        })
    }

    /// Appends one skipped video
    pub fn append(
        &mut self,
        language: &str,
        topic: &str,
        url: &str,
        license: &str,
    ) -> Result<(), SkipStoreError> {
        writeln!(self.file, "{} - {} - {} - {}", language, topic, url, license)?;
        self.lines += 1;
        Ok(())
    }

    pub fn lines(&self) -> usize {
        self.lines
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

use crate::skip::SkipStoreError;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Video ids excluded from resolution
///
/// Two layers: the ids persisted by earlier runs (loaded once, consulted by
/// [`SkipList::contains`]) and the ids recorded during this run. The run
/// layer is only written out by [`SkipList::flush`].
#[derive(Debug)]
pub struct SkipList {
    path: PathBuf,
    persisted: HashSet<String>,
    pending: Vec<String>,
}

impl SkipList {
    /// Loads the persisted skip-list
    ///
    /// A missing file, an unreadable file, or JSON that is not an array of
    /// strings all yield an empty list; the latter two are logged.
    pub fn load<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let persisted = read_ids(&path).into_iter().collect();
        Self {
            path,
            persisted,
            pending: Vec::new(),
        }
    }

    /// Returns true if an earlier run excluded this id
    pub fn contains(&self, id: &str) -> bool {
        self.persisted.contains(id)
    }

    /// Records an id excluded during this run
    pub fn record(&mut self, id: impl Into<String>) {
        self.pending.push(id.into());
    }

    /// Ids recorded during this run, in order
    pub fn pending(&self) -> &[String] {
        &self.pending
    }

    pub fn persisted_len(&self) -> usize {
        self.persisted.len()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes this run's ids followed by the ids currently on disk
    ///
    /// The file is re-read at write time. Nothing is deduplicated: N new
    /// ids and M persisted ids produce an array of N + M entries.
    ///
    /// # Returns
    ///
    /// The number of ids written
    pub fn flush(&self) -> Result<usize, SkipStoreError> {
        let mut data = self.pending.clone();
        data.extend(read_ids(&self.path));

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string(&data)?;
        std::fs::write(&self.path, json)?;

        tracing::info!(
            "Flushed {} skip ids ({} new) to {}",
            data.len(),
            self.pending.len(),
            self.path.display()
        );
        Ok(data.len())
    }

    /// Deletes the persisted skip-list file if it exists
    pub fn clear<P: AsRef<Path>>(path: P) -> Result<(), SkipStoreError> {
        let path = path.as_ref();
        if path.exists() {
            std::fs::remove_file(path)?;
            tracing::info!("Removed skip cache {}", path.display());
        }
        Ok(())
    }
}

/// Reads the persisted id array, treating every failure as empty
fn read_ids(path: &Path) -> Vec<String> {
    if !path.exists() {
        return Vec::new();
    }

    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!("Failed to read skip cache {}: {}", path.display(), e);
            return Vec::new();
        }
    };

    match serde_json::from_str::<Vec<String>>(&content) {
        Ok(ids) => ids,
        Err(e) => {
            tracing::warn!("Failed to load skip cache {}: {}", path.display(), e);
            Vec::new()
        }
    }
}

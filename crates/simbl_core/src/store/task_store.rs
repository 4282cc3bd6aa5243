//! Task document persistence.

use super::{SimblPaths, StoreResult};
use crate::document::{parse_bytes, serialize_document};
use crate::model::task::SimblFile;
use crate::tasklog::file_log::{self, FileLogEntry};
use log::debug;
use std::fs;
use std::io;
use std::path::Path;

/// Load/save contract used by the task service.
pub trait TaskStore {
    /// Loads `tasks.md`.
    fn load(&self) -> StoreResult<SimblFile>;
    /// Replaces `tasks.md` with the serialized document.
    fn save(&self, file: &SimblFile) -> StoreResult<()>;
    /// Loads the archive; a missing archive is an empty document.
    fn load_archive(&self) -> StoreResult<SimblFile>;
    fn save_archive(&self, file: &SimblFile) -> StoreResult<()>;
    /// Appends task events to the centralized log.
    fn append_events(&self, entries: &[FileLogEntry]) -> StoreResult<()>;
}

/// Store over the files of one `.simbl` directory.
#[derive(Debug, Clone)]
pub struct FileTaskStore {
    paths: SimblPaths,
}

impl FileTaskStore {
    pub fn new(simbl_dir: &Path) -> Self {
        Self {
            paths: SimblPaths::new(simbl_dir),
        }
    }

    pub fn paths(&self) -> &SimblPaths {
        &self.paths
    }
}

fn read_document(path: &Path) -> StoreResult<SimblFile> {
    let bytes = fs::read(path)?;
    Ok(parse_bytes(&bytes)?)
}

fn write_document(path: &Path, file: &SimblFile) -> StoreResult<()> {
    fs::write(path, serialize_document(file))?;
    debug!(
        "event=document_write module=store status=ok tasks={}",
        file.backlog.len() + file.done.len()
    );
    Ok(())
}

impl TaskStore for FileTaskStore {
    fn load(&self) -> StoreResult<SimblFile> {
        read_document(&self.paths.tasks)
    }

    fn save(&self, file: &SimblFile) -> StoreResult<()> {
        write_document(&self.paths.tasks, file)
    }

    fn load_archive(&self) -> StoreResult<SimblFile> {
        match read_document(&self.paths.archive) {
            Err(super::StoreError::Io(err)) if err.kind() == io::ErrorKind::NotFound => {
                Ok(SimblFile::default())
            }
            other => other,
        }
    }

    fn save_archive(&self, file: &SimblFile) -> StoreResult<()> {
        write_document(&self.paths.archive, file)
    }

    fn append_events(&self, entries: &[FileLogEntry]) -> StoreResult<()> {
        file_log::append_many(&self.paths.root, entries)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{FileTaskStore, TaskStore};
    use crate::store::{init_simbl_dir, StoreError};
    use std::fs;

    #[test]
    fn load_reports_corrupt_document() {
        let base = tempfile::tempdir().unwrap();
        let dir = init_simbl_dir(base.path()).unwrap();
        let store = FileTaskStore::new(&dir);
        fs::write(&store.paths().tasks, b"# Backlog\n\n## \xff\n".as_slice()).unwrap();

        assert!(matches!(store.load(), Err(StoreError::Corrupt(_))));
    }

    #[test]
    fn missing_archive_loads_empty() {
        let base = tempfile::tempdir().unwrap();
        let store = FileTaskStore::new(base.path());
        let archive = store.load_archive().unwrap();
        assert!(archive.backlog.is_empty() && archive.done.is_empty());
        assert!(matches!(store.load(), Err(StoreError::Io(_))));
    }
}

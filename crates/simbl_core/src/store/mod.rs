//! `.simbl` directory layout and persistence seams.
//!
//! # Responsibility
//! - Name the files inside a `.simbl` directory.
//! - Create the directory with default files.
//! - Define load/save contracts for task documents and project config.
//!
//! # Invariants
//! - `init_simbl_dir` never overwrites an existing file.
//! - Document stores parse all-or-nothing; a corrupt `tasks.md` is an error,
//!   never an empty document.

use crate::document::DocumentError;
use crate::tasklog::file_log::{FileLogError, LOG_FILE_NAME};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub mod config;
pub mod task_store;

pub use config::{ConfigError, ConfigStore, ProjectConfig, YamlConfigStore};
pub use task_store::{FileTaskStore, TaskStore};

pub const SIMBL_DIR_NAME: &str = ".simbl";
pub const CONFIG_FILE_NAME: &str = "config.yaml";
pub const TASKS_FILE_NAME: &str = "tasks.md";
pub const ARCHIVE_FILE_NAME: &str = "tasks-archive.md";

const EMPTY_TASKS_DOCUMENT: &str = "# Backlog\n\n# Done\n";
const EMPTY_ARCHIVE_DOCUMENT: &str = "# Archived Tasks\n";

pub type StoreResult<T> = Result<T, StoreError>;

/// File locations inside one `.simbl` directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimblPaths {
    pub root: PathBuf,
    pub config: PathBuf,
    pub tasks: PathBuf,
    pub archive: PathBuf,
    pub log: PathBuf,
}

impl SimblPaths {
    pub fn new(simbl_dir: impl Into<PathBuf>) -> Self {
        let root = simbl_dir.into();
        Self {
            config: root.join(CONFIG_FILE_NAME),
            tasks: root.join(TASKS_FILE_NAME),
            archive: root.join(ARCHIVE_FILE_NAME),
            log: root.join(LOG_FILE_NAME),
            root,
        }
    }
}

/// Errors from store reads and writes.
#[derive(Debug)]
pub enum StoreError {
    Io(io::Error),
    /// Stored document exists but cannot be parsed.
    Corrupt(DocumentError),
    Config(ConfigError),
    Log(FileLogError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "store io error: {err}"),
            Self::Corrupt(err) => write!(f, "corrupt task document: {err}"),
            Self::Config(err) => write!(f, "{err}"),
            Self::Log(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Corrupt(err) => Some(err),
            Self::Config(err) => Some(err),
            Self::Log(err) => Some(err),
        }
    }
}

impl From<io::Error> for StoreError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<DocumentError> for StoreError {
    fn from(value: DocumentError) -> Self {
        Self::Corrupt(value)
    }
}

impl From<ConfigError> for StoreError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<FileLogError> for StoreError {
    fn from(value: FileLogError) -> Self {
        Self::Log(value)
    }
}

/// Creates `<base>/.simbl` with a default config, an empty task document and
/// an empty archive. Returns the `.simbl` path.
pub fn init_simbl_dir(base_dir: &Path) -> StoreResult<PathBuf> {
    let simbl_dir = base_dir.join(SIMBL_DIR_NAME);
    fs::create_dir_all(&simbl_dir)?;
    let paths = SimblPaths::new(&simbl_dir);

    if !paths.config.exists() {
        YamlConfigStore::new(&simbl_dir).save(&ProjectConfig::default())?;
    }
    if !paths.tasks.exists() {
        fs::write(&paths.tasks, EMPTY_TASKS_DOCUMENT)?;
    }
    if !paths.archive.exists() {
        fs::write(&paths.archive, EMPTY_ARCHIVE_DOCUMENT)?;
    }

    info!("event=store_init module=store status=ok");
    Ok(simbl_dir)
}

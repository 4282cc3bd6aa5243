use simbl_core::store::config::{ConfigResult, ConfigStore, YamlConfigStore};
use simbl_core::store::{init_simbl_dir, ConfigError, ProjectConfig, SimblPaths};
use simbl_core::tasklog::file_log::read_all;
use simbl_core::tasklog::migrate::{migrate, needs_migration};
use simbl_core::tasklog::{LogMigrator, MigrationReport};
use std::fs;
use std::io;
use std::path::PathBuf;

const LEGACY_DOCUMENT: &str = "# Backlog\n\n## task-1 First\n\n[p1]\n\nBody\n***\n\ntask-log\n\n- 2025-01-02T00:00:00Z | Priority changed\n- 2025-01-01T00:00:00Z | Task created\n\n# Done\n\n## task-2 Second\n\n***\n\ntask-log\n\n- 2025-01-03T00:00:00Z | Moved to Done\n";

fn legacy_dir(document: &str) -> (tempfile::TempDir, PathBuf) {
    let base = tempfile::tempdir().unwrap();
    let dir = init_simbl_dir(base.path()).unwrap();
    fs::write(SimblPaths::new(&dir).tasks, document).unwrap();
    (base, dir)
}

#[test]
fn migrate_moves_entries_strips_content_and_sets_flag() {
    let (_base, dir) = legacy_dir(LEGACY_DOCUMENT);
    let paths = SimblPaths::new(&dir);
    assert!(needs_migration(&dir).unwrap());

    let report = migrate(&dir).unwrap();
    assert_eq!(report.tasks_migrated, 2);
    assert_eq!(report.entries_migrated, 3);
    assert!(report.errors.is_empty(), "{:?}", report.errors);

    let backup = report.backup_path.clone().unwrap();
    assert!(backup
        .file_name()
        .unwrap()
        .to_string_lossy()
        .starts_with("tasks.md.backup."));
    assert_eq!(fs::read_to_string(&backup).unwrap(), LEGACY_DOCUMENT);

    assert_eq!(
        fs::read_to_string(&paths.tasks).unwrap(),
        "# Backlog\n\n## task-1 First\n\n[p1]\n\nBody\n\n# Done\n\n## task-2 Second\n"
    );

    let raw_log = fs::read_to_string(&paths.log).unwrap();
    assert_eq!(
        raw_log.lines().next().unwrap(),
        "{\"taskId\":\"task-1\",\"timestamp\":\"2025-01-02T00:00:00.000Z\",\"message\":\"Priority changed\"}"
    );
    let messages: Vec<String> = read_all(&dir)
        .unwrap()
        .into_iter()
        .map(|entry| format!("{}:{}", entry.task_id, entry.message))
        .collect();
    assert_eq!(
        messages,
        vec![
            "task-1:Priority changed",
            "task-1:Task created",
            "task-2:Moved to Done"
        ]
    );

    assert!(YamlConfigStore::new(&dir).load().unwrap().is_log_centralized());
    assert!(!needs_migration(&dir).unwrap());
}

#[test]
fn second_migration_is_a_no_op() {
    let (_base, dir) = legacy_dir(LEGACY_DOCUMENT);
    let paths = SimblPaths::new(&dir);

    migrate(&dir).unwrap();
    let log_before = fs::read(&paths.log).unwrap();
    let tasks_before = fs::read(&paths.tasks).unwrap();

    let second = migrate(&dir).unwrap();
    assert_eq!(second, MigrationReport::default());
    assert_eq!(fs::read(&paths.log).unwrap(), log_before);
    assert_eq!(fs::read(&paths.tasks).unwrap(), tasks_before);
}

#[test]
fn unrecognized_log_section_is_reported_and_left_alone() {
    let document = "# Backlog\n\n## task-1\n\n***\n\ntask-log\n\nfreeform note\n\n## task-2\n\n***\n\ntask-log\n\n- 2025-01-01T00:00:00Z | Task created\n\n# Done\n";
    let (_base, dir) = legacy_dir(document);

    let report = migrate(&dir).unwrap();
    assert_eq!(report.tasks_migrated, 1);
    assert_eq!(report.entries_migrated, 1);
    assert_eq!(report.errors.len(), 1);
    assert!(report.errors[0].contains("task-1"));
    assert!(report.errors[0].contains("moved by hand"));

    let tasks = fs::read_to_string(SimblPaths::new(&dir).tasks).unwrap();
    assert!(tasks.contains("## task-1\n\n***\n\ntask-log\n\nfreeform note"));
    assert!(tasks.ends_with("## task-2\n\n# Done\n"));
}

#[test]
fn marker_without_entries_is_left_byte_identical() {
    let document = "# Backlog\n\n## task-1 Only marker\n\nBody\n\n***\n\ntask-log\n\n# Done\n";
    let (_base, dir) = legacy_dir(document);
    let paths = SimblPaths::new(&dir);

    let report = migrate(&dir).unwrap();
    assert_eq!(report.tasks_migrated, 0);
    assert_eq!(report.entries_migrated, 0);
    assert!(report.errors.is_empty());
    assert_eq!(fs::read_to_string(&paths.tasks).unwrap(), document);
    assert!(!paths.log.exists());
}

#[test]
fn crlf_legacy_document_is_detected_and_migrated() {
    let (_base, dir) = legacy_dir(&LEGACY_DOCUMENT.replace('\n', "\r\n"));
    let paths = SimblPaths::new(&dir);
    assert!(needs_migration(&dir).unwrap());

    let report = migrate(&dir).unwrap();
    assert_eq!(report.tasks_migrated, 2);
    assert_eq!(report.entries_migrated, 3);
    assert!(report.errors.is_empty(), "{:?}", report.errors);
    assert_eq!(
        fs::read_to_string(&paths.tasks).unwrap(),
        "# Backlog\n\n## task-1 First\n\n[p1]\n\nBody\n\n# Done\n\n## task-2 Second\n"
    );
    assert_eq!(read_all(&dir).unwrap().len(), 3);
}

#[test]
fn missing_tasks_file_only_sets_flag() {
    let base = tempfile::tempdir().unwrap();
    let dir = base.path().join(".simbl");
    fs::create_dir_all(&dir).unwrap();

    assert!(!needs_migration(&dir).unwrap());
    let report = migrate(&dir).unwrap();
    assert_eq!(report, MigrationReport::default());
    assert!(YamlConfigStore::new(&dir).load().unwrap().is_log_centralized());
    assert!(!SimblPaths::new(&dir).log.exists());
}

#[test]
fn document_without_logs_needs_no_migration() {
    let (_base, dir) = legacy_dir("# Backlog\n\n## task-1 Clean\n\n# Done\n");
    assert!(!needs_migration(&dir).unwrap());

    let report = migrate(&dir).unwrap();
    assert_eq!(report.tasks_migrated, 0);
    assert!(report.backup_path.is_some());
    assert!(!SimblPaths::new(&dir).log.exists());
}

struct ReadOnlyConfig;

impl ConfigStore for ReadOnlyConfig {
    fn load(&self) -> ConfigResult<ProjectConfig> {
        Ok(ProjectConfig::default())
    }

    fn save(&self, _config: &ProjectConfig) -> ConfigResult<()> {
        Err(ConfigError::Io(io::Error::new(
            io::ErrorKind::PermissionDenied,
            "config is read-only",
        )))
    }
}

#[test]
fn failed_flag_write_is_reported_not_fatal() {
    let (_base, dir) = legacy_dir(LEGACY_DOCUMENT);
    let report = LogMigrator::new(&dir, ReadOnlyConfig).migrate().unwrap();

    assert_eq!(report.tasks_migrated, 2);
    assert_eq!(report.errors.len(), 1);
    assert!(report.errors[0].contains("log version"));
}

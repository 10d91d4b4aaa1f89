// rsvc-common/src/store.rs
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::config::Config;
use super::error::{Result, RsvcError};
use super::fs;
use super::model::{DependencyRecord, LibraryDependency};

/// Version written to and required from `repo.json`.
pub const STATE_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PersistedRecord {
    #[serde(flatten)]
    dependency: LibraryDependency,
    installed: bool,
}

#[derive(Debug, Serialize, Deserialize)]
struct StateFile {
    version: u32,
    #[serde(default)]
    libraries: BTreeMap<String, PersistedRecord>,
}

/// Installed-state of every library the engine has seen, keyed by `group:artifact:version`.
#[derive(Debug)]
pub struct DependencyStore {
    libraries: BTreeMap<String, DependencyRecord>,
    state_file: PathBuf,
    /// Directory trees owned by the store and wiped by [`clear`](Self::clear).
    owned_dirs: Vec<PathBuf>,
}

impl DependencyStore {
    pub fn new(state_file: PathBuf, owned_dirs: Vec<PathBuf>) -> Self {
        Self {
            libraries: BTreeMap::new(),
            state_file,
            owned_dirs,
        }
    }

    pub fn for_config(config: &Config) -> Self {
        Self::new(
            config.state_file(),
            vec![config.libraries_dir(), config.cache_dir()],
        )
    }

    /// Loads the state file if present; a missing file yields an empty store.
    pub fn load(state_file: PathBuf, owned_dirs: Vec<PathBuf>) -> Result<Self> {
        let mut store = Self::new(state_file, owned_dirs);
        if !store.state_file.is_file() {
            debug!(
                "State file {} not found, starting with an empty store.",
                store.state_file.display()
            );
            return Ok(store);
        }

        let raw = std::fs::read_to_string(&store.state_file)?;
        let state: StateFile = serde_json::from_str(&raw)?;
        if state.version != STATE_SCHEMA_VERSION {
            return Err(RsvcError::StateVersion {
                found: state.version,
                expected: STATE_SCHEMA_VERSION,
            });
        }

        for (key, persisted) in state.libraries {
            let record = DependencyRecord::new(persisted.dependency, persisted.installed);
            if record.key() != key {
                warn!(
                    "Dropping state entry '{}': embedded dependency has key '{}'",
                    key,
                    record.key()
                );
                continue;
            }
            store.libraries.insert(key, record);
        }
        debug!(
            "Loaded {} dependency records from {}",
            store.libraries.len(),
            store.state_file.display()
        );
        Ok(store)
    }

    pub fn load_for_config(config: &Config) -> Result<Self> {
        Self::load(
            config.state_file(),
            vec![config.libraries_dir(), config.cache_dir()],
        )
    }

    pub fn get(&self, key: &str) -> Option<&DependencyRecord> {
        self.libraries.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.libraries.contains_key(key)
    }

    /// Inserts under the record's own key, returning any record it replaced.
    pub fn put(&mut self, record: DependencyRecord) -> Option<DependencyRecord> {
        self.libraries.insert(record.key(), record)
    }

    pub fn mark_installed(&mut self, dependency: &LibraryDependency) {
        debug!("Marking {} as installed", dependency);
        self.put(DependencyRecord::new(dependency.clone(), true));
    }

    /// True when a record exists for the dependency and it is installed.
    pub fn is_fulfilled(&self, dependency: &LibraryDependency) -> bool {
        self.libraries
            .get(&dependency.key())
            .is_some_and(DependencyRecord::is_installed)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DependencyRecord> {
        self.libraries.values()
    }

    pub fn len(&self) -> usize {
        self.libraries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.libraries.is_empty()
    }

    pub fn state_file(&self) -> &Path {
        &self.state_file
    }

    /// Best-effort reset: owned directory trees, the state file, then memory.
    /// A failed deletion is logged and the remaining steps still run.
    pub fn clear(&mut self) {
        for dir in &self.owned_dirs {
            info!("clearing {}", dir.display());
            fs::remove_path_logged(dir);
        }
        info!("clearing {}", self.state_file.display());
        fs::remove_path_logged(&self.state_file);
        info!("clearing memory");
        self.libraries.clear();
    }

    pub fn save(&self) -> Result<()> {
        let state = StateFile {
            version: STATE_SCHEMA_VERSION,
            libraries: self
                .libraries
                .iter()
                .map(|(key, record)| {
                    (
                        key.clone(),
                        PersistedRecord {
                            dependency: record.dependency().clone(),
                            installed: record.installed,
                        },
                    )
                })
                .collect(),
        };
        let json = serde_json::to_string_pretty(&state)?;
        fs::write_atomic(&self.state_file, json.as_bytes())?;
        debug!(
            "Saved {} dependency records to {}",
            self.libraries.len(),
            self.state_file.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn serial() -> LibraryDependency {
        LibraryDependency::new("drv", "serial", "2.2")
    }

    #[test]
    fn save_then_load_keeps_records_in_key_order() {
        let tmp = tempfile::tempdir().unwrap();
        let config = Config::with_root(tmp.path());
        let mut store = DependencyStore::for_config(&config);
        store.mark_installed(&serial());
        store.put(DependencyRecord::new(
            LibraryDependency::new("alpha", "lib", "1.0"),
            false,
        ));
        store.save().unwrap();

        let loaded = DependencyStore::load_for_config(&config).unwrap();
        let keys: Vec<String> = loaded.iter().map(DependencyRecord::key).collect();
        assert_eq!(keys, vec!["alpha:lib:1.0".to_string(), "drv:serial:2.2".to_string()]);
        assert!(loaded.is_fulfilled(&serial()));
        assert!(!loaded.get("alpha:lib:1.0").unwrap().is_installed());
    }

    #[test]
    fn missing_state_file_gives_empty_store() {
        let tmp = tempfile::tempdir().unwrap();
        let store = DependencyStore::load_for_config(&Config::with_root(tmp.path())).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn unknown_schema_version_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let config = Config::with_root(tmp.path());
        std::fs::write(config.state_file(), r#"{"version": 99, "libraries": {}}"#).unwrap();
        let err = DependencyStore::load_for_config(&config).unwrap_err();
        assert!(matches!(
            err,
            RsvcError::StateVersion {
                found: 99,
                expected: STATE_SCHEMA_VERSION
            }
        ));
    }

    #[test]
    fn mismatched_keys_are_dropped_on_load() {
        let tmp = tempfile::tempdir().unwrap();
        let config = Config::with_root(tmp.path());
        let raw = r#"{"version": 1, "libraries": {
            "wrong:key:1": {"groupId": "drv", "artifactId": "serial", "version": "2.2", "installed": true},
            "drv:serial:2.2": {"groupId": "drv", "artifactId": "serial", "version": "2.2", "installed": true}
        }}"#;
        std::fs::write(config.state_file(), raw).unwrap();
        let store = DependencyStore::load_for_config(&config).unwrap();
        assert_eq!(store.len(), 1);
        assert!(store.contains("drv:serial:2.2"));
    }

    #[test]
    fn clear_wipes_memory_file_and_owned_trees() {
        let tmp = tempfile::tempdir().unwrap();
        let config = Config::with_root(tmp.path());
        std::fs::create_dir_all(config.install_dir()).unwrap();
        std::fs::write(config.install_dir().join("serial-2.2.jar"), b"jar").unwrap();
        std::fs::create_dir_all(config.cache_dir()).unwrap();

        let mut store = DependencyStore::for_config(&config);
        store.mark_installed(&serial());
        store.save().unwrap();

        store.clear();

        assert!(store.is_empty());
        assert!(!config.state_file().exists());
        assert!(!config.libraries_dir().exists());
        assert!(!config.cache_dir().exists());
    }

    #[test]
    fn clear_keeps_going_after_a_failed_removal() {
        let tmp = tempfile::tempdir().unwrap();
        let config = Config::with_root(tmp.path());
        let blocker = tmp.path().join("blocker");
        std::fs::write(&blocker, b"not a dir").unwrap();
        std::fs::create_dir_all(config.cache_dir().join("drv")).unwrap();

        // A path under a regular file fails with ENOTDIR, not NotFound.
        let mut store = DependencyStore::new(
            config.state_file(),
            vec![blocker.join("sub"), config.cache_dir()],
        );
        store.mark_installed(&serial());
        store.save().unwrap();

        store.clear();

        assert!(store.is_empty());
        assert!(!config.state_file().exists());
        assert!(!config.cache_dir().exists());
        assert!(blocker.is_file());
    }
}

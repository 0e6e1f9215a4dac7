use enver_backend::{KeyValueStore, RegistryError, Version, VersionRecord, VersionSource};
use log::{debug, info, warn};
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::schema::{self, Decoded};

/// The two independently persisted version lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VersionsKey {
    /// Cache of the remote catalog. Replaced wholesale on refresh.
    Known,
    /// User-added builds. Every entry carries a local path.
    Local,
}

impl VersionsKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            VersionsKey::Known => "known-versions",
            VersionsKey::Local => "local-versions",
        }
    }
}

/// Loads the list stored under `key`, absorbing every failure.
///
/// Missing or unreadable data yields `fallback()`. A local list in a legacy
/// or invalid shape is migrated and written back before it is returned; the
/// catalog cache is never migrated since a refresh can rebuild it.
pub fn load_versions<F>(store: &mut dyn KeyValueStore, key: VersionsKey, fallback: F) -> Vec<Version>
where
    F: FnOnce() -> Vec<Version>,
{
    let Some(raw) = store.get(key.as_str()) else {
        debug!("No stored data for {}", key.as_str());
        return fallback();
    };

    let decoded = match schema::decode(&raw) {
        Ok(decoded) => decoded,
        Err(e) => {
            warn!("Stored {} is not valid JSON: {}", key.as_str(), e);
            return fallback();
        }
    };

    match (decoded, key) {
        (Decoded::Current(versions), _) => {
            debug!("Loaded {} entries from {}", versions.len(), key.as_str());
            versions
        }
        (Decoded::Unsupported(found), _) => {
            warn!(
                "Stored {} uses schema {} (this build reads up to {}), ignoring it",
                key.as_str(),
                found,
                schema::CURRENT_SCHEMA
            );
            fallback()
        }
        (Decoded::Legacy { reason, .. }, VersionsKey::Known) => {
            info!("Discarding cached catalog ({}), a refresh is needed", reason);
            fallback()
        }
        (Decoded::Legacy { entries, reason }, VersionsKey::Local) => {
            let migrated = schema::migrate_legacy(&entries);
            info!(
                "Migrated local versions ({}): kept {} of {} entries",
                reason,
                migrated.len(),
                entries.len()
            );

            let records: Vec<VersionRecord> =
                migrated.iter().cloned().map(VersionRecord::from).collect();
            if let Err(e) = save_versions(store, key, &records) {
                warn!("Failed to persist migrated local versions: {}", e);
            }
            migrated
        }
    }
}

/// Overwrites the list stored under `key` and returns what was written.
///
/// Records with a blank version are never written, since a single one would
/// fail validation for the whole list on the next load. For the local list,
/// annotated records whose source is remote are dropped as well.
pub fn save_versions(
    store: &mut dyn KeyValueStore,
    key: VersionsKey,
    records: &[VersionRecord],
) -> Result<Vec<Version>, RegistryError> {
    let named: Vec<&VersionRecord> = records
        .iter()
        .filter(|record| !record.version().trim().is_empty())
        .collect();

    let blank = records.len() - named.len();
    if blank > 0 {
        warn!(
            "Dropped {} records with a blank version from {}",
            blank,
            key.as_str()
        );
    }

    let versions: Vec<Version> = named
        .into_iter()
        .filter(|record| match key {
            VersionsKey::Local => record.source().is_none_or(|s| s == VersionSource::Local),
            VersionsKey::Known => true,
        })
        .cloned()
        .map(VersionRecord::into_version)
        .collect();

    let dropped = records.len() - blank - versions.len();
    if dropped > 0 {
        debug!("Dropped {} remote records from {}", dropped, key.as_str());
    }

    let raw = schema::encode(&versions)?;
    store.set(key.as_str(), &raw)?;
    Ok(versions)
}

/// Stores each key as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        let path = self.path_for(key);
        match std::fs::read_to_string(&path) {
            Ok(content) => Some(content),
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => {
                warn!("Failed to read {:?}: {}", path, e);
                None
            }
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), RegistryError> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.path_for(key);
        std::fs::write(&path, value)
            .map_err(|e| RegistryError::Store(format!("Failed to write {:?}: {}", path, e)))
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), RegistryError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use enver_backend::{RunnableVersion, VersionState};
    use tempfile::tempdir;

    fn runnable(version: &str, source: VersionSource) -> RunnableVersion {
        RunnableVersion {
            version: version.to_string(),
            name: None,
            local_path: match source {
                VersionSource::Local => Some(PathBuf::from(format!("/builds/{}", version))),
                VersionSource::Remote => None,
            },
            source,
            state: VersionState::Missing,
        }
    }

    #[test]
    fn test_missing_key_uses_fallback() {
        let mut store = MemoryStore::new();
        let versions = load_versions(&mut store, VersionsKey::Known, || {
            vec![Version::remote("1.0.0")]
        });
        assert_eq!(versions, vec![Version::remote("1.0.0")]);
    }

    #[test]
    fn test_invalid_json_uses_fallback() {
        let mut store = MemoryStore::new();
        store.set("local-versions", "{oops").unwrap();
        assert!(load_versions(&mut store, VersionsKey::Local, Vec::new).is_empty());
        assert_eq!(store.get("local-versions").as_deref(), Some("{oops"));
    }

    #[test]
    fn test_local_round_trip_keeps_only_local_records() {
        let mut store = MemoryStore::new();
        let records = vec![
            VersionRecord::from(runnable("1.0.0", VersionSource::Local)),
            VersionRecord::from(runnable("2.0.0", VersionSource::Remote)),
            VersionRecord::from(Version::local("3.0.0", None, "/builds/3")),
        ];

        save_versions(&mut store, VersionsKey::Local, &records).unwrap();
        let loaded = load_versions(&mut store, VersionsKey::Local, Vec::new);

        assert_eq!(
            loaded,
            vec![
                Version::local("1.0.0", None, "/builds/1.0.0"),
                Version::local("3.0.0", None, "/builds/3"),
            ]
        );
    }

    #[test]
    fn test_known_save_keeps_every_record() {
        let mut store = MemoryStore::new();
        let records = vec![VersionRecord::from(runnable("2.0.0", VersionSource::Remote))];
        let saved = save_versions(&mut store, VersionsKey::Known, &records).unwrap();
        assert_eq!(saved, vec![Version::remote("2.0.0")]);
    }

    #[test]
    fn test_save_is_idempotent() {
        let mut store = MemoryStore::new();
        let records = vec![VersionRecord::from(Version::local("1.0.0", None, "/a"))];

        save_versions(&mut store, VersionsKey::Local, &records).unwrap();
        let first = store.get("local-versions").unwrap();
        save_versions(&mut store, VersionsKey::Local, &records).unwrap();
        assert_eq!(store.get("local-versions").unwrap(), first);
    }

    #[test]
    fn test_legacy_local_entries_are_migrated_and_persisted() {
        let mut store = MemoryStore::new();
        store
            .set(
                "local-versions",
                r#"[{"tag_name":"v1.0.0","name":"n","url":"/p"},{"tag_name":"v2.0.0","name":"x"}]"#,
            )
            .unwrap();

        let loaded = load_versions(&mut store, VersionsKey::Local, Vec::new);
        let expected = vec![Version::local("v1.0.0", Some("n".to_string()), "/p")];
        assert_eq!(loaded, expected);

        let raw = store.get("local-versions").unwrap();
        assert!(raw.starts_with(r#"{"schema":2,"#));
        assert_eq!(load_versions(&mut store, VersionsKey::Local, Vec::new), expected);
    }

    #[test]
    fn test_legacy_catalog_is_a_cache_miss() {
        let mut store = MemoryStore::new();
        let legacy = r#"[{"tag_name":"v1.0.0","name":"n","url":"/p"}]"#;
        store.set("known-versions", legacy).unwrap();

        let loaded = load_versions(&mut store, VersionsKey::Known, || {
            vec![Version::remote("9.9.9")]
        });
        assert_eq!(loaded, vec![Version::remote("9.9.9")]);
        assert_eq!(store.get("known-versions").as_deref(), Some(legacy));
    }

    #[test]
    fn test_future_schema_is_left_untouched() {
        let mut store = MemoryStore::new();
        let future = r#"{"schema":3,"versions":[{"id":"x"}]}"#;
        store.set("local-versions", future).unwrap();

        assert!(load_versions(&mut store, VersionsKey::Local, Vec::new).is_empty());
        assert_eq!(store.get("local-versions").as_deref(), Some(future));
    }

    #[test]
    fn test_blank_versions_are_not_written_to_local_list() {
        let mut store = MemoryStore::new();
        let records = vec![
            VersionRecord::from(Version::local("1.0.0", None, "/a")),
            VersionRecord::from(Version::local(" ", None, "/c")),
            VersionRecord::from(Version::local("", None, "/d")),
            VersionRecord::from(Version::local("2.0.0", None, "/b")),
        ];

        let saved = save_versions(&mut store, VersionsKey::Local, &records).unwrap();
        let expected = vec![
            Version::local("1.0.0", None, "/a"),
            Version::local("2.0.0", None, "/b"),
        ];
        assert_eq!(saved, expected);
        assert_eq!(load_versions(&mut store, VersionsKey::Local, Vec::new), expected);
    }

    #[test]
    fn test_blank_versions_are_not_written_to_catalog() {
        let mut store = MemoryStore::new();
        let records = vec![
            VersionRecord::from(Version::remote("12.0.0")),
            VersionRecord::from(Version::remote("")),
            VersionRecord::from(runnable("  ", VersionSource::Remote)),
        ];

        save_versions(&mut store, VersionsKey::Known, &records).unwrap();
        let loaded = load_versions(&mut store, VersionsKey::Known, || {
            vec![Version::remote("fallback")]
        });
        assert_eq!(loaded, vec![Version::remote("12.0.0")]);
    }

    #[test]
    fn test_json_file_store() {
        let dir = tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("nested"));

        assert!(store.get("local-versions").is_none());
        store.set("local-versions", "[]").unwrap();
        assert_eq!(store.get("local-versions").as_deref(), Some("[]"));
        assert!(dir.path().join("nested/local-versions.json").exists());
    }
}

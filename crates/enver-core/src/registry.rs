use enver_backend::{
    Filesystem, KeyValueStore, RegistryError, ReleaseFetcher, ReleaseInfo, RunnableVersion,
    Version, VersionRecord, VersionSource,
};
use log::{debug, info};
use std::path::Path;

use crate::normalize::normalize_version;
use crate::select::{SELECTED_VERSION_KEY, pick_default_version};
use crate::state::resolve_state;
use crate::store::{VersionsKey, load_versions, save_versions};
use crate::support::{self, DEFAULT_SUPPORTED_BRANCHES, SUPPORTED_BRANCHES_ENV};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    /// How many major branches count as supported.
    pub supported_branches: usize,
}

impl RegistryConfig {
    /// Reads the branch count from the environment, falling back to
    /// `configured` and then the default.
    pub fn from_env(configured: Option<u32>) -> Self {
        let env_value = std::env::var(SUPPORTED_BRANCHES_ENV).ok();
        Self {
            supported_branches: support::resolve_branch_count(env_value.as_deref(), configured),
        }
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            supported_branches: DEFAULT_SUPPORTED_BRANCHES,
        }
    }
}

/// Registry state for one application session.
///
/// Both version lists are read from the store the first time they are
/// needed and every mutation is written through immediately. Release
/// metadata only lives in memory and is filled by a refresh or by
/// [`VersionRegistry::seed_releases`].
pub struct VersionRegistry {
    store: Box<dyn KeyValueStore>,
    fs: Box<dyn Filesystem>,
    config: RegistryConfig,
    known: Option<Vec<Version>>,
    local: Option<Vec<Version>>,
    releases: Vec<ReleaseInfo>,
}

impl std::fmt::Debug for VersionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VersionRegistry")
            .field("config", &self.config)
            .field("known", &self.known.as_ref().map(Vec::len))
            .field("local", &self.local.as_ref().map(Vec::len))
            .field("releases", &self.releases.len())
            .finish()
    }
}

impl VersionRegistry {
    pub fn new(
        store: Box<dyn KeyValueStore>,
        fs: Box<dyn Filesystem>,
        config: RegistryConfig,
    ) -> Self {
        Self {
            store,
            fs,
            config,
            known: None,
            local: None,
            releases: Vec::new(),
        }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    /// Catalog versions in the order the catalog supplied them.
    pub fn known_versions(&mut self) -> &[Version] {
        let store = self.store.as_mut();
        self.known
            .get_or_insert_with(|| load_versions(store, VersionsKey::Known, Vec::new))
    }

    /// User-added builds in the order they were added.
    pub fn local_versions(&mut self) -> &[Version] {
        let store = self.store.as_mut();
        self.local
            .get_or_insert_with(|| load_versions(store, VersionsKey::Local, Vec::new))
    }

    /// True when no catalog is cached and a refresh should be awaited.
    pub fn needs_refresh(&mut self) -> bool {
        self.known_versions().is_empty()
    }

    pub fn make_runnable(&self, version: &Version) -> RunnableVersion {
        make_runnable(self.fs.as_ref(), version)
    }

    /// Catalog entries followed by local entries, each annotated with its
    /// source and current install state. Duplicates are kept.
    pub fn assemble(&mut self) -> Vec<RunnableVersion> {
        self.known_versions();
        self.local_versions();

        let fs = self.fs.as_ref();
        let runnable: Vec<RunnableVersion> = self
            .known
            .iter()
            .flatten()
            .chain(self.local.iter().flatten())
            .map(|v| make_runnable(fs, v))
            .collect();

        debug!("Assembled {} runnable versions", runnable.len());
        runnable
    }

    pub fn preferred_version(&self) -> Option<String> {
        self.store
            .get(SELECTED_VERSION_KEY)
            .filter(|v| !v.is_empty())
    }

    /// Stores the normalized form so it compares equal to assembled
    /// versions. Returns what was stored.
    pub fn set_preferred_version(&mut self, version: &str) -> Result<String, RegistryError> {
        let normalized = normalize_version(version);
        info!("Storing preferred version {}", normalized);
        self.store.set(SELECTED_VERSION_KEY, &normalized)?;
        Ok(normalized)
    }

    /// See [`pick_default_version`]. An error here is unrecoverable.
    pub fn default_version(&self, candidates: &[RunnableVersion]) -> Result<String, RegistryError> {
        let preferred = self.preferred_version();
        pick_default_version(candidates, preferred.as_deref())
    }

    /// Registers a local build and persists the local list. A build whose
    /// path is already registered is not added twice.
    pub fn add_local_version(&mut self, version: Version) -> Result<Vec<Version>, RegistryError> {
        let Some(root) = version.local_root() else {
            return Err(RegistryError::MissingLocalPath(version.version));
        };
        if version.version.trim().is_empty() {
            return Err(RegistryError::BlankVersion(root.display().to_string()));
        }

        let mut versions = self.local_versions().to_vec();
        if versions.iter().any(|v| v.local_root() == Some(root)) {
            debug!("{:?} is already registered", root);
        } else {
            info!("Adding local version {} at {:?}", version.version, root);
            versions.push(version);
        }

        self.write_local(versions.into_iter().map(VersionRecord::from).collect())
    }

    /// Removes every local entry registered at `path` and persists the rest.
    pub fn remove_local_version(&mut self, path: &Path) -> Result<Vec<Version>, RegistryError> {
        let before = self.local_versions().len();
        let versions: Vec<VersionRecord> = self
            .local_versions()
            .iter()
            .filter(|v| v.local_root() != Some(path))
            .cloned()
            .map(VersionRecord::from)
            .collect();

        info!(
            "Removing local versions at {:?} ({} entries)",
            path,
            before - versions.len()
        );
        self.write_local(versions)
    }

    /// Replaces the local list. Annotated records from the catalog are
    /// filtered out before writing.
    pub fn save_local_versions(
        &mut self,
        records: &[VersionRecord],
    ) -> Result<Vec<Version>, RegistryError> {
        self.write_local(records.to_vec())
    }

    pub fn find_local_version_by_path(&mut self, path: &Path) -> Option<Version> {
        self.local_versions()
            .iter()
            .find(|v| v.local_root() == Some(path))
            .cloned()
    }

    pub fn is_released_major(&mut self, major: u64) -> bool {
        support::is_released_major(self.known_versions(), major)
    }

    pub fn oldest_supported_major(&mut self) -> Option<u64> {
        let branches = self.config.supported_branches;
        support::oldest_supported_major(self.known_versions(), branches)
    }

    pub fn release_info(&self, version: &Version) -> Option<&ReleaseInfo> {
        let wanted = normalize_version(&version.version);
        self.releases
            .iter()
            .find(|r| normalize_version(&r.version) == wanted)
    }

    /// Release metadata from the last refresh or seed, in catalog order.
    pub fn releases(&self) -> &[ReleaseInfo] {
        &self.releases
    }

    /// Replaces in-memory release metadata without touching the catalog.
    pub fn seed_releases(&mut self, releases: Vec<ReleaseInfo>) {
        debug!("Seeding {} releases", releases.len());
        self.releases = releases;
    }

    /// Fetches the catalog and replaces the cached copy wholesale.
    pub async fn refresh_known_versions(
        &mut self,
        fetcher: &dyn ReleaseFetcher,
    ) -> Result<Vec<Version>, RegistryError> {
        let releases = fetcher.fetch_releases().await?;

        let records: Vec<VersionRecord> = releases
            .iter()
            .map(|r| VersionRecord::from(Version::remote(r.version.clone())))
            .collect();
        let saved = save_versions(self.store.as_mut(), VersionsKey::Known, &records)?;

        info!("Catalog refreshed with {} versions", saved.len());
        self.known = Some(saved.clone());
        self.seed_releases(releases);
        Ok(saved)
    }

    fn write_local(&mut self, records: Vec<VersionRecord>) -> Result<Vec<Version>, RegistryError> {
        let saved = save_versions(self.store.as_mut(), VersionsKey::Local, &records)?;
        self.local = Some(saved.clone());
        Ok(saved)
    }
}

fn make_runnable(fs: &dyn Filesystem, version: &Version) -> RunnableVersion {
    let source = if version.local_root().is_some() {
        VersionSource::Local
    } else {
        VersionSource::Remote
    };

    RunnableVersion {
        version: normalize_version(&version.version),
        name: version.name.clone(),
        local_path: version.local_path.clone(),
        source,
        state: resolve_state(fs, version),
    }
}

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::error::RegistryError;
use crate::types::ReleaseInfo;

/// Source of the remote release catalog.
#[async_trait]
pub trait ReleaseFetcher: Send + Sync {
    /// Fetches every known release, in the order the catalog lists them.
    async fn fetch_releases(&self) -> Result<Vec<ReleaseInfo>, RegistryError>;
}

pub trait Filesystem {
    fn exists(&self, path: &Path) -> bool;

    /// Expected location of the engine executable inside a local build root.
    fn exec_path(&self, local_root: &Path) -> PathBuf;
}

/// String-keyed persistent storage. Writes overwrite the previous value.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), RegistryError>;
}

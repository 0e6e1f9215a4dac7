mod channel;
mod fs;
mod normalize;
mod registry;
mod releases;
mod schema;
mod select;
mod state;
mod store;
mod support;

pub use channel::classify_channel;
pub use fs::NativeFilesystem;
pub use normalize::normalize_version;
pub use registry::{RegistryConfig, VersionRegistry};
pub use releases::{DEFAULT_RELEASES_URL, ReleasesClient};
pub use schema::CURRENT_SCHEMA;
pub use select::{SELECTED_VERSION_KEY, pick_default_version};
pub use state::resolve_state;
pub use store::{JsonFileStore, MemoryStore, VersionsKey, load_versions, save_versions};
pub use support::{
    DEFAULT_SUPPORTED_BRANCHES, SUPPORTED_BRANCHES_ENV, is_released_major, oldest_supported_major,
    resolve_branch_count,
};

pub use enver_backend::{
    Filesystem, KeyValueStore, RegistryError, ReleaseChannel, ReleaseFetcher, ReleaseInfo,
    RunnableVersion, Version, VersionRecord, VersionSource, VersionState,
};
pub use enver_platform::{AppPaths, Platform};

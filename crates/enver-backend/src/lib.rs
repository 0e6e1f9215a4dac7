mod error;
mod traits;
mod types;

pub use error::RegistryError;
pub use traits::{Filesystem, KeyValueStore, ReleaseFetcher};
pub use types::{
    ReleaseChannel, ReleaseInfo, RunnableVersion, Version, VersionRecord, VersionSource,
    VersionState,
};

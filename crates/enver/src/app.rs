use log::{debug, info, warn};
use std::path::PathBuf;

use enver_core::{
    JsonFileStore, NativeFilesystem, RegistryConfig, RegistryError, ReleasesClient,
    RunnableVersion, Version, VersionRegistry, classify_channel,
};
use enver_platform::AppPaths;

use crate::cache::DiskCache;
use crate::cli::Command;
use crate::settings::AppSettings;

pub struct App {
    paths: AppPaths,
    settings: AppSettings,
    registry: VersionRegistry,
    client: ReleasesClient,
}

impl App {
    pub fn new(paths: AppPaths, settings: AppSettings) -> Self {
        let store_dir = settings.store_dir(&paths);
        debug!("Using version store at {:?}", store_dir);

        let registry = VersionRegistry::new(
            Box::new(JsonFileStore::new(store_dir)),
            Box::new(NativeFilesystem::new()),
            RegistryConfig::from_env(settings.supported_branches),
        );

        let mut client = ReleasesClient::new(reqwest::Client::new());
        if let Some(url) = &settings.releases_url {
            client = client.with_url(url.clone());
        }

        Self {
            paths,
            settings,
            registry,
            client,
        }
    }

    pub async fn run(&mut self, command: Command) -> Result<(), RegistryError> {
        match command {
            Command::List => {
                self.ensure_catalog().await;
                let versions = self.registry.assemble();
                if versions.is_empty() {
                    println!("No versions known. Run `enver refresh` to fetch the catalog.");
                }
                for version in &versions {
                    println!("{}", format_row(version));
                }
            }
            Command::Default => {
                self.ensure_catalog().await;
                let versions = self.registry.assemble();
                println!("{}", self.registry.default_version(&versions)?);
            }
            Command::Select { version } => {
                let stored = self.registry.set_preferred_version(&version)?;
                println!("Preferred version set to {}", stored);
            }
            Command::Channel { version } => {
                println!("{}", classify_channel(&version));
            }
            Command::Add {
                path,
                version,
                name,
            } => {
                let path = absolute(path);
                let entry = Version::local(version, name, path.clone());
                let state = self.registry.make_runnable(&entry).state;
                let versions = self.registry.add_local_version(entry)?;
                println!(
                    "Registered {:?} ({}), {} local versions",
                    path,
                    state,
                    versions.len()
                );
            }
            Command::Remove { path } => {
                let path = absolute(path);
                let Some(existing) = self.registry.find_local_version_by_path(&path) else {
                    println!("No local version registered at {:?}", path);
                    return Ok(());
                };
                self.registry.remove_local_version(&path)?;
                println!("Removed {} at {:?}", existing.version, path);
            }
            Command::Refresh => {
                let count = self.refresh().await?;
                println!("Fetched {} versions", count);
            }
            Command::Support { major } => {
                self.ensure_catalog().await;
                match self.registry.oldest_supported_major() {
                    Some(oldest) => println!(
                        "Oldest supported major: {} ({} branches)",
                        oldest,
                        self.registry.config().supported_branches
                    ),
                    None => println!("Not enough release branches to resolve a support window"),
                }
                if let Some(major) = major {
                    let released = self.registry.is_released_major(major);
                    println!(
                        "Major {} is {}",
                        major,
                        if released { "released" } else { "unreleased" }
                    );
                }
            }
            Command::Info { version } => {
                self.ensure_catalog().await;
                match self.registry.release_info(&Version::remote(version.clone())) {
                    Some(info) => {
                        println!("version: {}", info.version);
                        println!("channel: {}", classify_channel(&info.version));
                        if let Some(date) = info.date {
                            println!("date:    {}", date);
                        }
                        for (label, value) in [
                            ("node", &info.node),
                            ("chrome", &info.chrome),
                            ("v8", &info.v8),
                            ("modules", &info.modules),
                        ] {
                            if let Some(value) = value {
                                println!("{:<8} {}", format!("{}:", label), value);
                            }
                        }
                    }
                    None => println!("No release information for {}", version),
                }
            }
        }

        Ok(())
    }

    /// Seeds release metadata from disk and refreshes when the catalog is
    /// missing or the metadata is older than the configured TTL. Refresh
    /// failures are logged and the cached state is used as-is.
    async fn ensure_catalog(&mut self) {
        let disk_cache = DiskCache::load(&self.paths);
        let stale = disk_cache
            .as_ref()
            .is_none_or(|c| c.is_stale(self.settings.cache_ttl_hours, chrono::Utc::now()));

        if let Some(cache) = disk_cache {
            debug!(
                "Loaded release cache from {} ({} releases)",
                cache.cached_at,
                cache.releases.len()
            );
            self.registry.seed_releases(cache.releases);
        }

        if !self.registry.needs_refresh() && !stale {
            return;
        }

        if let Err(e) = self.refresh().await {
            warn!("Catalog refresh failed, using cached data: {}", e);
        }
    }

    async fn refresh(&mut self) -> Result<usize, RegistryError> {
        info!("Refreshing catalog from {}", self.client.url());
        let versions = self.registry.refresh_known_versions(&self.client).await?;
        DiskCache::new(self.registry.releases().to_vec()).save(&self.paths);
        Ok(versions.len())
    }
}

fn format_row(version: &RunnableVersion) -> String {
    let location = match (&version.name, &version.local_path) {
        (Some(name), Some(path)) => format!("{} ({})", name, path.display()),
        (None, Some(path)) => path.display().to_string(),
        (Some(name), None) => name.clone(),
        (None, None) => String::new(),
    };

    format!(
        "{:<28} {:<8} {:<7} {:<10} {}",
        version.version,
        classify_channel(&version.version),
        version.source,
        version.state,
        location
    )
    .trim_end()
    .to_string()
}

fn absolute(path: PathBuf) -> PathBuf {
    std::path::absolute(&path).unwrap_or(path)
}

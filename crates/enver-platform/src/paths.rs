use log::warn;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "enver";

pub struct AppPaths {
    pub config_dir: PathBuf,
    pub cache_dir: PathBuf,
    pub data_dir: PathBuf,
}

impl AppPaths {
    pub fn new() -> Self {
        #[cfg(target_os = "macos")]
        {
            let home = base_dir(dirs::home_dir(), "home");
            Self {
                config_dir: home.join("Library/Application Support").join(APP_DIR),
                cache_dir: home.join("Library/Caches").join(APP_DIR),
                data_dir: home.join("Library/Application Support").join(APP_DIR),
            }
        }

        #[cfg(not(target_os = "macos"))]
        {
            Self {
                config_dir: base_dir(dirs::config_dir(), "config").join(APP_DIR),
                cache_dir: base_dir(dirs::cache_dir(), "cache").join(APP_DIR),
                data_dir: base_dir(dirs::data_dir(), "data").join(APP_DIR),
            }
        }
    }

    /// Places every directory under a single root.
    pub fn with_root(root: &Path) -> Self {
        Self {
            config_dir: root.join("config"),
            cache_dir: root.join("cache"),
            data_dir: root.join("data"),
        }
    }

    pub fn settings_file(&self) -> PathBuf {
        self.config_dir.join("settings.json")
    }

    pub fn store_dir(&self) -> PathBuf {
        self.data_dir.join("store")
    }

    pub fn release_cache_file(&self) -> PathBuf {
        self.cache_dir.join("releases.json")
    }

    pub fn log_file(&self) -> PathBuf {
        self.data_dir.join("debug.log")
    }

    pub fn ensure_dirs(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.config_dir)?;
        std::fs::create_dir_all(&self.cache_dir)?;
        std::fs::create_dir_all(&self.data_dir)?;
        Ok(())
    }
}

impl Default for AppPaths {
    fn default() -> Self {
        Self::new()
    }
}

fn base_dir(dir: Option<PathBuf>, kind: &str) -> PathBuf {
    dir.unwrap_or_else(|| {
        let fallback = std::env::temp_dir();
        warn!("No {} directory available, falling back to {:?}", kind, fallback);
        fallback
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_root_layout() {
        let paths = AppPaths::with_root(Path::new("/tmp/enver-test"));
        assert_eq!(
            paths.settings_file(),
            PathBuf::from("/tmp/enver-test/config/settings.json")
        );
        assert_eq!(paths.store_dir(), PathBuf::from("/tmp/enver-test/data/store"));
        assert_eq!(
            paths.release_cache_file(),
            PathBuf::from("/tmp/enver-test/cache/releases.json")
        );
    }

    #[test]
    fn test_default_paths_end_in_app_dir() {
        let paths = AppPaths::new();
        assert!(paths.config_dir.ends_with(APP_DIR));
        assert!(paths.cache_dir.ends_with(APP_DIR));
    }
}

use enver_platform::AppPaths;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    /// Overridden by `ENVER_SUPPORTED_BRANCHES`.
    #[serde(default)]
    pub supported_branches: Option<u32>,

    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_hours: u64,

    #[serde(default)]
    pub releases_url: Option<String>,

    #[serde(default)]
    pub store_dir: Option<PathBuf>,

    #[serde(default)]
    pub debug_logging: bool,
}

fn default_cache_ttl() -> u64 {
    1
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            supported_branches: None,
            cache_ttl_hours: 1,
            releases_url: None,
            store_dir: None,
            debug_logging: false,
        }
    }
}

impl AppSettings {
    pub fn load(paths: &AppPaths) -> Self {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            match std::fs::read_to_string(&settings_path) {
                Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
                Err(_) => Self::default(),
            }
        } else {
            Self::default()
        }
    }

    pub fn save(&self, paths: &AppPaths) -> Result<(), std::io::Error> {
        paths.ensure_dirs()?;

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(paths.settings_file(), content)?;
        Ok(())
    }

    pub fn store_dir(&self, paths: &AppPaths) -> PathBuf {
        self.store_dir.clone().unwrap_or_else(|| paths.store_dir())
    }
}

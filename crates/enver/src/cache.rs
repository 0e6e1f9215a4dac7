use chrono::{DateTime, Duration, Utc};
use enver_core::ReleaseInfo;
use enver_platform::AppPaths;
use serde::{Deserialize, Serialize};

/// Release metadata from the last successful refresh.
#[derive(Debug, Serialize, Deserialize)]
pub struct DiskCache {
    pub releases: Vec<ReleaseInfo>,
    pub cached_at: DateTime<Utc>,
}

impl DiskCache {
    pub fn new(releases: Vec<ReleaseInfo>) -> Self {
        Self {
            releases,
            cached_at: Utc::now(),
        }
    }

    pub fn load(paths: &AppPaths) -> Option<Self> {
        let data = std::fs::read_to_string(paths.release_cache_file()).ok()?;
        serde_json::from_str(&data).ok()
    }

    pub fn save(&self, paths: &AppPaths) {
        if let Err(e) = paths.ensure_dirs() {
            log::warn!("Failed to create cache directories: {}", e);
        }
        if let Ok(data) = serde_json::to_string(self) {
            if let Err(e) = std::fs::write(paths.release_cache_file(), data) {
                log::warn!("Failed to write release cache: {}", e);
            }
        }
    }

    pub fn is_stale(&self, ttl_hours: u64, now: DateTime<Utc>) -> bool {
        let hours = i64::try_from(ttl_hours)
            .unwrap_or(i64::MAX)
            .min(i64::MAX / 3_600_000);
        let ttl = Duration::hours(hours);
        now - self.cached_at >= ttl
    }
}

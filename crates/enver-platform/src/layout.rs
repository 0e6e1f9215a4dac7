use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Operating system families with distinct engine build layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Macos,
    Windows,
    Linux,
}

impl Platform {
    pub fn current() -> Self {
        #[cfg(target_os = "macos")]
        return Platform::Macos;

        #[cfg(target_os = "windows")]
        return Platform::Windows;

        #[cfg(not(any(target_os = "macos", target_os = "windows")))]
        Platform::Linux
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Platform::Macos => "macOS",
            Platform::Windows => "Windows",
            Platform::Linux => "Linux",
        }
    }

    /// Path of the engine executable relative to a build root.
    pub fn executable_relative_path(&self) -> &'static [&'static str] {
        match self {
            Platform::Macos => &["Electron.app", "Contents", "MacOS", "Electron"],
            Platform::Windows => &["electron.exe"],
            Platform::Linux => &["electron"],
        }
    }
}

pub fn executable_path(platform: Platform, local_root: &Path) -> PathBuf {
    platform
        .executable_relative_path()
        .iter()
        .fold(local_root.to_path_buf(), |path, part| path.join(part))
}

use enver_backend::Filesystem;
use enver_platform::{Platform, executable_path};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy)]
pub struct NativeFilesystem {
    platform: Platform,
}

impl NativeFilesystem {
    pub fn new() -> Self {
        Self::for_platform(Platform::current())
    }

    pub fn for_platform(platform: Platform) -> Self {
        Self { platform }
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }
}

impl Default for NativeFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for NativeFilesystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn exec_path(&self, local_root: &Path) -> PathBuf {
        executable_path(self.platform, local_root)
    }
}

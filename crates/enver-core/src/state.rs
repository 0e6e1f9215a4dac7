use enver_backend::{Filesystem, Version, VersionState};
use log::trace;

/// Checks the disk on every call; nothing is cached.
pub fn resolve_state(fs: &dyn Filesystem, version: &Version) -> VersionState {
    let Some(root) = version.local_root() else {
        return VersionState::Missing;
    };

    let exec = fs.exec_path(root);
    let state = if fs.exists(&exec) {
        VersionState::Installed
    } else {
        VersionState::Missing
    };
    trace!("{} at {:?}: {}", version.version, exec, state);
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::NativeFilesystem;
    use enver_platform::Platform;
    use std::fs;
    use tempfile::tempdir;

    fn fake_build(root: &std::path::Path) {
        let exec = NativeFilesystem::new().exec_path(root);
        fs::create_dir_all(exec.parent().unwrap()).unwrap();
        fs::write(&exec, b"").unwrap();
    }

    #[test]
    fn test_remote_entry_is_always_missing() {
        let fs = NativeFilesystem::new();
        assert_eq!(
            resolve_state(&fs, &Version::remote("10.0.0")),
            VersionState::Missing
        );
    }

    #[test]
    fn test_local_entry_reflects_disk_at_call_time() {
        let dir = tempdir().unwrap();
        let fs = NativeFilesystem::new();
        let version = Version::local("10.0.0", None, dir.path());

        assert_eq!(resolve_state(&fs, &version), VersionState::Missing);

        fake_build(dir.path());
        assert_eq!(resolve_state(&fs, &version), VersionState::Installed);

        std::fs::remove_file(fs.exec_path(dir.path())).unwrap();
        assert_eq!(resolve_state(&fs, &version), VersionState::Missing);
    }

    #[test]
    fn test_root_without_executable_is_missing() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("README"), b"").unwrap();
        let fs = NativeFilesystem::for_platform(Platform::Linux);
        let version = Version::local("10.0.0", None, dir.path());
        assert_eq!(resolve_state(&fs, &version), VersionState::Missing);
    }
}

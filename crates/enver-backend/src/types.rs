use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// A known engine version, either from the catalog or a user-added build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Version {
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_path: Option<PathBuf>,
}

impl Version {
    pub fn remote(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            name: None,
            local_path: None,
        }
    }

    pub fn local(version: impl Into<String>, name: Option<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            version: version.into(),
            name,
            local_path: Some(path.into()),
        }
    }

    /// The build root, if set and non-empty.
    pub fn local_root(&self) -> Option<&Path> {
        self.local_path
            .as_deref()
            .filter(|p| !p.as_os_str().is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VersionSource {
    Local,
    Remote,
}

impl fmt::Display for VersionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionSource::Local => write!(f, "local"),
            VersionSource::Remote => write!(f, "remote"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VersionState {
    Installed,
    Missing,
}

impl fmt::Display for VersionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionState::Installed => write!(f, "installed"),
            VersionState::Missing => write!(f, "missing"),
        }
    }
}

/// A version annotated for display and selection. Recomputed on every
/// assembly and never persisted as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunnableVersion {
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_path: Option<PathBuf>,
    pub source: VersionSource,
    pub state: VersionState,
}

impl RunnableVersion {
    pub fn to_version(&self) -> Version {
        Version {
            version: self.version.clone(),
            name: self.name.clone(),
            local_path: self.local_path.clone(),
        }
    }
}

/// Either a plain stored version or an annotated one. The discriminant is
/// always explicit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum VersionRecord {
    Plain(Version),
    Runnable(RunnableVersion),
}

impl VersionRecord {
    pub fn version(&self) -> &str {
        match self {
            VersionRecord::Plain(v) => &v.version,
            VersionRecord::Runnable(v) => &v.version,
        }
    }

    /// `None` for plain records, which carry no source.
    pub fn source(&self) -> Option<VersionSource> {
        match self {
            VersionRecord::Plain(_) => None,
            VersionRecord::Runnable(v) => Some(v.source),
        }
    }

    pub fn into_version(self) -> Version {
        match self {
            VersionRecord::Plain(v) => v,
            VersionRecord::Runnable(v) => Version {
                version: v.version,
                name: v.name,
                local_path: v.local_path,
            },
        }
    }
}

impl From<Version> for VersionRecord {
    fn from(version: Version) -> Self {
        VersionRecord::Plain(version)
    }
}

impl From<RunnableVersion> for VersionRecord {
    fn from(version: RunnableVersion) -> Self {
        VersionRecord::Runnable(version)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReleaseChannel {
    Stable,
    Beta,
    Nightly,
}

impl fmt::Display for ReleaseChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReleaseChannel::Stable => write!(f, "stable"),
            ReleaseChannel::Beta => write!(f, "beta"),
            ReleaseChannel::Nightly => write!(f, "nightly"),
        }
    }
}

/// Catalog metadata for a single release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseInfo {
    pub version: String,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub node: Option<String>,
    #[serde(default)]
    pub chrome: Option<String>,
    #[serde(default)]
    pub v8: Option<String>,
    #[serde(default)]
    pub modules: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_serializes_camel_case_without_empty_fields() {
        let local = Version::local("1.0.0", Some("dev".to_string()), "/builds/dev");
        let json = serde_json::to_string(&local).unwrap();
        assert_eq!(json, r#"{"version":"1.0.0","name":"dev","localPath":"/builds/dev"}"#);

        let remote = Version::remote("2.0.0");
        assert_eq!(serde_json::to_string(&remote).unwrap(), r#"{"version":"2.0.0"}"#);
    }

    #[test]
    fn test_empty_local_path_is_not_a_root() {
        let v = Version::local("1.0.0", None, "");
        assert!(v.local_root().is_none());
    }

    #[test]
    fn test_record_source_discriminant() {
        let plain = VersionRecord::from(Version::remote("1.0.0"));
        assert_eq!(plain.source(), None);

        let runnable = VersionRecord::from(RunnableVersion {
            version: "1.0.0".to_string(),
            name: None,
            local_path: None,
            source: VersionSource::Remote,
            state: VersionState::Missing,
        });
        assert_eq!(runnable.source(), Some(VersionSource::Remote));
        assert_eq!(runnable.into_version(), Version::remote("1.0.0"));
    }

    #[test]
    fn test_release_info_ignores_unknown_fields() {
        let json = r#"{"version":"30.0.0","date":"2024-04-16","node":"20.11.1","files":["linux-x64"]}"#;
        let info: ReleaseInfo = serde_json::from_str(json).unwrap();
        assert_eq!(info.version, "30.0.0");
        assert_eq!(info.date, NaiveDate::from_ymd_opt(2024, 4, 16));
        assert_eq!(info.node.as_deref(), Some("20.11.1"));
        assert!(info.chrome.is_none());
    }
}

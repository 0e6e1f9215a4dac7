use enver_backend::{RegistryError, RunnableVersion};
use log::debug;

/// Store key holding the user's last selected version.
pub const SELECTED_VERSION_KEY: &str = "selected-version";

/// Picks the version to pre-select.
///
/// A stored preference matching a candidate exactly always wins. Otherwise
/// the newest candidate without a `-` in its version is chosen. No such
/// candidate means the catalog is corrupt or empty, which is reported as
/// [`RegistryError::CorruptedVersionData`] and must not be retried.
pub fn pick_default_version(
    candidates: &[RunnableVersion],
    preferred: Option<&str>,
) -> Result<String, RegistryError> {
    if let Some(preferred) = preferred {
        if candidates.iter().any(|c| c.version == preferred) {
            return Ok(preferred.to_string());
        }
        debug!("Stored preference {} is not among the candidates", preferred);
    }

    let mut stable: Vec<(semver::Version, &str)> = candidates
        .iter()
        .filter(|c| !c.version.contains('-'))
        .filter_map(|c| match semver::Version::parse(&c.version) {
            Ok(parsed) => Some((parsed, c.version.as_str())),
            Err(e) => {
                debug!("Skipping unparsable candidate {}: {}", c.version, e);
                None
            }
        })
        .collect();

    stable.sort_by(|a, b| b.0.cmp(&a.0));

    stable
        .first()
        .map(|(_, version)| version.to_string())
        .ok_or(RegistryError::CorruptedVersionData)
}

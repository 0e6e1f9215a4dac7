use log::trace;

/// Canonicalizes a loosely formatted version tag.
///
/// Surrounding whitespace and a leading `v`/`V` are removed and build
/// metadata (`+...`) is dropped. A tag that does not parse as semver is
/// returned with only the first two steps applied.
pub fn normalize_version(raw: &str) -> String {
    let trimmed = raw.trim();
    let stripped = trimmed
        .strip_prefix('v')
        .or_else(|| trimmed.strip_prefix('V'))
        .unwrap_or(trimmed);

    match semver::Version::parse(stripped) {
        Ok(mut parsed) => {
            parsed.build = semver::BuildMetadata::EMPTY;
            parsed.to_string()
        }
        Err(e) => {
            trace!("Keeping non-semver tag {:?} as-is: {}", stripped, e);
            stripped.to_string()
        }
    }
}

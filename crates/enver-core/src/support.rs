use enver_backend::Version;

pub const DEFAULT_SUPPORTED_BRANCHES: usize = 4;

/// Environment variable overriding the supported branch count.
pub const SUPPORTED_BRANCHES_ENV: &str = "ENVER_SUPPORTED_BRANCHES";

/// Resolves how many major branches are supported. The environment value
/// wins over the configured one; non-numeric or zero values count as unset.
pub fn resolve_branch_count(env_value: Option<&str>, configured: Option<u32>) -> usize {
    env_value
        .and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|&n| n > 0)
        .or_else(|| configured.map(|n| n as usize).filter(|&n| n > 0))
        .unwrap_or(DEFAULT_SUPPORTED_BRANCHES)
}

/// Whether any catalog version belongs to `major`. Local builds numbered
/// ahead of every release are not considered released.
pub fn is_released_major(catalog: &[Version], major: u64) -> bool {
    let prefix = format!("{}.", major);
    catalog.iter().any(|v| v.version.starts_with(&prefix))
}

/// The oldest major among the newest `branches` branch markers (versions
/// ending in `.0.0`), or `None` when fewer markers exist.
pub fn oldest_supported_major(catalog: &[Version], branches: usize) -> Option<u64> {
    let mut majors: Vec<u64> = catalog
        .iter()
        .filter(|v| v.version.ends_with(".0.0"))
        .filter_map(|v| leading_integer(&v.version))
        .collect();

    majors.sort_unstable();

    let idx = majors.len().checked_sub(branches)?;
    majors.get(idx).copied()
}

fn leading_integer(version: &str) -> Option<u64> {
    let end = version
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(version.len());
    version[..end].parse().ok()
}

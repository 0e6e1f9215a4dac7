use enver_backend::ReleaseChannel;

/// First match wins: a tag carrying both a pre-release token and "nightly"
/// is `Beta`.
pub fn classify_channel(version: &str) -> ReleaseChannel {
    if version.contains("alpha") || version.contains("beta") {
        ReleaseChannel::Beta
    } else if version.contains("nightly") {
        ReleaseChannel::Nightly
    } else {
        ReleaseChannel::Stable
    }
}

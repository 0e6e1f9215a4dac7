//! Versioned on-disk format for persisted version lists.
//!
//! Lists are written as `{"schema": N, "versions": [...]}`. Schema 1 holds
//! the legacy `{tag_name, name, url}` entries, schema 2 holds [`Version`]
//! entries. Bare arrays predate the envelope and are decoded as schema 2
//! when every entry is well formed, otherwise as schema 1.

use enver_backend::Version;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::PathBuf;

pub const CURRENT_SCHEMA: u32 = 2;
const LEGACY_SCHEMA: u32 = 1;

#[derive(Serialize)]
struct EnvelopeRef<'a> {
    schema: u32,
    versions: &'a [Version],
}

#[derive(Deserialize)]
struct RawEnvelope {
    schema: u32,
    #[serde(default)]
    versions: Vec<Value>,
}

#[derive(Deserialize)]
struct LegacyEntry {
    tag_name: Option<String>,
    name: Option<String>,
    url: Option<String>,
}

#[derive(Debug, PartialEq)]
pub(crate) enum Decoded {
    Current(Vec<Version>),
    /// Entries that need the legacy migrator, with the reason they did not
    /// decode as the current schema.
    Legacy { entries: Vec<Value>, reason: String },
    /// Written by a newer build.
    Unsupported(u32),
}

/// Fails only when `raw` is not JSON at all.
pub(crate) fn decode(raw: &str) -> Result<Decoded, serde_json::Error> {
    let value: Value = serde_json::from_str(raw)?;

    let is_envelope = value.as_object().is_some_and(|map| map.contains_key("schema"));

    let decoded = match value {
        Value::Array(entries) => decode_current(entries),
        envelope if is_envelope => {
            match serde_json::from_value::<RawEnvelope>(envelope) {
                Ok(envelope) if envelope.schema == CURRENT_SCHEMA => {
                    decode_current(envelope.versions)
                }
                Ok(envelope) if envelope.schema == LEGACY_SCHEMA => Decoded::Legacy {
                    entries: envelope.versions,
                    reason: format!("schema {}", LEGACY_SCHEMA),
                },
                Ok(envelope) if envelope.schema > CURRENT_SCHEMA => {
                    Decoded::Unsupported(envelope.schema)
                }
                Ok(envelope) => Decoded::Legacy {
                    entries: envelope.versions,
                    reason: format!("unknown schema {}", envelope.schema),
                },
                Err(e) => Decoded::Legacy {
                    entries: Vec::new(),
                    reason: format!("malformed envelope: {}", e),
                },
            }
        }
        other => Decoded::Legacy {
            entries: Vec::new(),
            reason: format!("unexpected root value: {}", json_kind(&other)),
        },
    };

    Ok(decoded)
}

fn decode_current(entries: Vec<Value>) -> Decoded {
    match serde_json::from_value::<Vec<Version>>(Value::Array(entries.clone())) {
        Ok(versions) => {
            if let Some(idx) = versions.iter().position(|v| v.version.trim().is_empty()) {
                Decoded::Legacy {
                    entries,
                    reason: format!("entry {} has an empty version", idx),
                }
            } else {
                Decoded::Current(versions)
            }
        }
        Err(e) => Decoded::Legacy {
            entries,
            reason: e.to_string(),
        },
    }
}

pub(crate) fn encode(versions: &[Version]) -> Result<String, serde_json::Error> {
    serde_json::to_string(&EnvelopeRef {
        schema: CURRENT_SCHEMA,
        versions,
    })
}

/// Rewrites `{tag_name, name, url}` entries. Entries missing any of the
/// three are dropped.
pub(crate) fn migrate_legacy(entries: &[Value]) -> Vec<Version> {
    entries
        .iter()
        .filter_map(|entry| {
            let legacy: LegacyEntry = serde_json::from_value(entry.clone()).ok()?;
            let tag_name = legacy.tag_name.filter(|s| !s.is_empty())?;
            let name = legacy.name.filter(|s| !s.is_empty())?;
            let url = legacy.url.filter(|s| !s.is_empty())?;

            Some(Version {
                version: tag_name,
                name: Some(name),
                local_path: Some(PathBuf::from(url)),
            })
        })
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_current_envelope() {
        let raw = r#"{"schema":2,"versions":[{"version":"1.0.0"}]}"#;
        assert_eq!(
            decode(raw).unwrap(),
            Decoded::Current(vec![Version::remote("1.0.0")])
        );
    }

    #[test]
    fn test_decode_bare_current_array() {
        let raw = r#"[{"version":"1.0.0","localPath":"/p"}]"#;
        assert_eq!(
            decode(raw).unwrap(),
            Decoded::Current(vec![Version::local("1.0.0", None, "/p")])
        );
    }

    #[test]
    fn test_decode_bare_legacy_array() {
        let raw = r#"[{"tag_name":"v1.0.0","name":"n","url":"/p"}]"#;
        match decode(raw).unwrap() {
            Decoded::Legacy { entries, .. } => assert_eq!(entries.len(), 1),
            other => panic!("expected legacy, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_version_is_not_current() {
        let raw = r#"{"schema":2,"versions":[{"version":""}]}"#;
        assert!(matches!(decode(raw).unwrap(), Decoded::Legacy { .. }));
    }

    #[test]
    fn test_newer_schema_is_unsupported() {
        let raw = r#"{"schema":7,"versions":[]}"#;
        assert_eq!(decode(raw).unwrap(), Decoded::Unsupported(7));
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(decode("{not json").is_err());
    }

    #[test]
    fn test_migrate_legacy_entries() {
        let entries = vec![
            json!({"tag_name": "v1.0.0", "name": "n", "url": "/p"}),
            json!({"tag_name": "v2.0.0", "name": "missing url"}),
            json!("not an object"),
        ];
        assert_eq!(
            migrate_legacy(&entries),
            vec![Version::local("v1.0.0", Some("n".to_string()), "/p")]
        );
    }

    #[test]
    fn test_encode_is_stable() {
        let versions = vec![Version::local("1.0.0", Some("a".to_string()), "/a")];
        let first = encode(&versions).unwrap();
        assert_eq!(first, encode(&versions).unwrap());
        assert_eq!(
            first,
            r#"{"schema":2,"versions":[{"version":"1.0.0","name":"a","localPath":"/a"}]}"#
        );
    }
}

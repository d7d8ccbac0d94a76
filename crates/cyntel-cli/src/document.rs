//! Shared document loading: turn a JSON file into the kind name and
//! property set that feed record construction.

use std::path::Path;

use anyhow::{bail, Context};
use cyntel_objects::{Properties, Record};

/// Load a JSON document and validate it by constructing a record of its
/// declared `type`.
pub fn load_and_validate(path: &Path) -> anyhow::Result<Record> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let value: serde_json::Value = serde_json::from_str(&text)
        .with_context(|| format!("parsing {} as JSON", path.display()))?;
    record_from_value(&value)
}

/// Construct a record from a parsed JSON document.
pub fn record_from_value(value: &serde_json::Value) -> anyhow::Result<Record> {
    let Some(members) = value.as_object() else {
        bail!("document is not a JSON object");
    };
    let Some(kind) = members.get("type").and_then(|v| v.as_str()) else {
        bail!("document has no string 'type' member");
    };

    let mut props = Properties::new();
    for (name, member) in members {
        props = match member {
            serde_json::Value::String(s) => props.set(name.clone(), s.as_str()),
            serde_json::Value::Bool(b) => props.set(name.clone(), *b),
            serde_json::Value::Array(items) => {
                let mut strings = Vec::with_capacity(items.len());
                for item in items {
                    let Some(s) = item.as_str() else {
                        bail!("member '{name}' contains a non-string list element");
                    };
                    strings.push(s.to_string());
                }
                props.set(name.clone(), strings)
            }
            other => bail!("member '{name}' has unsupported JSON value: {other}"),
        };
    }

    Ok(Record::construct(kind, props)?)
}

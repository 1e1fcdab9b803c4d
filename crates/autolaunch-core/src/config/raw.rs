//! On-disk shapes of `config.json` and their normalization.
//!
//! Field values are kept as untyped JSON until [`normalize`] so that a
//! bad `Delay` reports [`ConfigError::InvalidDelay`] instead of failing
//! the whole document as an unknown shape.

use std::time::Duration;

use serde::Deserialize;
use serde_json::{Map, Value};

use super::{ConfigError, ProgramEntry};

/// Either accepted top-level shape.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum RawConfig {
    /// `[ { "Name": .., "Path": .., "Delay": .. }, ... ]`
    List(Vec<RawEntry>),
    /// `{ "Delay": .., "Programs": [ ... ] }`
    Grouped(GroupedConfig),
}

/// Only read from a JSON object; a positional array never matches.
#[derive(Debug, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub(crate) struct GroupedConfig {
    delay: Option<Value>,
    programs: Vec<RawEntry>,
}

impl TryFrom<Map<String, Value>> for GroupedConfig {
    type Error = String;

    fn try_from(mut fields: Map<String, Value>) -> Result<Self, Self::Error> {
        let programs = fields
            .remove("Programs")
            .ok_or_else(|| "missing \"Programs\"".to_string())?;
        Ok(Self {
            delay: fields.remove("Delay"),
            programs: serde_json::from_value(programs).map_err(|e| e.to_string())?,
        })
    }
}

/// A single entry object as written, fields looked up by name.
/// Unknown fields are ignored; anything but an object is rejected.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub(crate) struct RawEntry(Map<String, Value>);

/// Resolves either shape into the ordered list of entries.
///
/// In the grouped shape an entry's own `Delay` overrides the global one.
pub(crate) fn normalize(raw: RawConfig) -> Result<Vec<ProgramEntry>, ConfigError> {
    let (global_delay, entries) = match raw {
        RawConfig::List(entries) => (Duration::ZERO, entries),
        RawConfig::Grouped(grouped) => {
            let delay = match grouped.delay {
                Some(value) => parse_delay(&value).ok_or_else(|| ConfigError::InvalidDelay {
                    index: None,
                    name: String::new(),
                    value: value.to_string(),
                })?,
                None => Duration::ZERO,
            };
            (delay, grouped.programs)
        }
    };

    entries
        .into_iter()
        .enumerate()
        .map(|(i, entry)| entry.resolve(i + 1, global_delay))
        .collect()
}

impl RawEntry {
    fn resolve(self, index: usize, default_delay: Duration) -> Result<ProgramEntry, ConfigError> {
        let mut fields = self.0;
        let name = required_string(fields.remove("Name"), index, "Name")?;
        let path = required_string(fields.remove("Path"), index, "Path")?;

        let delay = match fields.remove("Delay") {
            Some(value) => parse_delay(&value).ok_or_else(|| ConfigError::InvalidDelay {
                index: Some(index),
                name: name.clone(),
                value: value.to_string(),
            })?,
            None => default_delay,
        };

        let enabled = match fields.remove("Enabled") {
            None => true,
            Some(Value::Bool(b)) => b,
            Some(other) => {
                return Err(ConfigError::Schema(format!(
                    "entry {index} ({name}): \"Enabled\" must be true or false, got {other}"
                )));
            }
        };

        let args = match fields.remove("Args") {
            None => Vec::new(),
            Some(Value::Array(items)) => items
                .into_iter()
                .map(|item| match item {
                    Value::String(s) => Ok(s),
                    other => Err(ConfigError::Schema(format!(
                        "entry {index} ({name}): \"Args\" must contain strings, got {other}"
                    ))),
                })
                .collect::<Result<_, _>>()?,
            Some(other) => {
                return Err(ConfigError::Schema(format!(
                    "entry {index} ({name}): \"Args\" must be a list of strings, got {other}"
                )));
            }
        };

        Ok(ProgramEntry {
            name,
            path,
            args,
            delay,
            enabled,
        })
    }
}

fn required_string(
    value: Option<Value>,
    index: usize,
    field: &str,
) -> Result<String, ConfigError> {
    match value {
        Some(Value::String(s)) if !s.trim().is_empty() => Ok(s),
        Some(Value::String(_)) => Err(ConfigError::Schema(format!(
            "entry {index}: \"{field}\" must not be empty"
        ))),
        Some(other) => Err(ConfigError::Schema(format!(
            "entry {index}: \"{field}\" must be a string, got {other}"
        ))),
        None => Err(ConfigError::Schema(format!(
            "entry {index}: missing \"{field}\""
        ))),
    }
}

/// Accepts a number or a numeric string of seconds, non-negative and finite.
fn parse_delay(value: &Value) -> Option<Duration> {
    let secs = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    if secs < 0.0 {
        return None;
    }
    Duration::try_from_secs_f64(secs).ok()
}

//! The quad normalizer: flattens nested JSON records into the storage
//! engine's subject/predicate/object/label quads.
//!
//! Blank-node identifiers derive purely from the owning primary key and the
//! predicate name, so re-running normalization on the same input yields
//! byte-identical output. The caller's input is never mutated; the walk runs
//! over a scratch copy.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{CayleyError, Result};

/// Field naming the record's subject.
pub const PRIMARY_KEY_FIELD: &str = "primaryKey";
/// Field naming the label carried by every quad of the record.
pub const LABEL_FIELD: &str = "label";

/// A subject/predicate/object(/label) fact record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quad {
    /// Node identifier: the record's primary key or a synthesized blank node.
    pub subject: String,
    /// Bracket-wrapped field name.
    pub predicate: String,
    /// Node identifier or literal coerced to a string.
    pub object: String,
    /// Optional label shared by every quad of the originating record.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Which normalizer generation to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalizeMode {
    /// Accepts flat scalar arrays as multi-valued predicates. The default.
    Nested,
    /// Rejects every array value.
    Flat,
}

/// Normalizes a JSON array of records into quads.
///
/// Non-array input is fatal. Records lacking a usable primary key are
/// silently skipped.
pub fn normalize(input: &Value, mode: NormalizeMode) -> Result<Vec<Quad>> {
    match input {
        Value::Array(records) => normalize_records(records, mode),
        _ => Err(CayleyError::NotAnArray),
    }
}

/// Normalizes an already-unwrapped slice of records into quads.
pub fn normalize_records(records: &[Value], mode: NormalizeMode) -> Result<Vec<Quad>> {
    let mut quads = Vec::new();
    for record in records {
        let Value::Object(fields) = record else {
            continue;
        };
        let Some(primary_key) = fields.get(PRIMARY_KEY_FIELD).and_then(Value::as_str) else {
            continue;
        };
        let subject = wrap_brackets(primary_key);
        let label = fields
            .get(LABEL_FIELD)
            .and_then(|v| scalar_text(v));

        let mut scratch = Map::new();
        for (key, value) in fields {
            if key == PRIMARY_KEY_FIELD || key == LABEL_FIELD {
                continue;
            }
            scratch.insert(key.clone(), value.clone());
        }
        let mut scratch = Value::Object(scratch);
        cleanup(&mut scratch);
        if let Value::Object(clean) = scratch {
            walk(&clean, &subject, &subject, label.as_deref(), mode, &mut quads)?;
        }
    }
    Ok(quads)
}

fn walk(
    fields: &Map<String, Value>,
    subject: &str,
    owner: &str,
    label: Option<&str>,
    mode: NormalizeMode,
    out: &mut Vec<Quad>,
) -> Result<()> {
    for (key, value) in fields {
        let predicate = wrap_brackets(key);
        match value {
            Value::Array(items) => {
                if mode == NormalizeMode::Flat {
                    return Err(CayleyError::InvalidNesting {
                        predicate,
                        detail: "array values are not accepted in flat mode".into(),
                    });
                }
                for item in items {
                    let Some(object) = scalar_text(item) else {
                        return Err(CayleyError::InvalidNesting {
                            predicate,
                            detail: "arrays may only hold scalars".into(),
                        });
                    };
                    out.push(quad(subject, &predicate, object, label));
                }
            }
            Value::Object(nested) => {
                let blank = format!("_:BN@{owner}.{predicate}");
                out.push(quad(subject, &predicate, blank.clone(), label));
                walk(nested, &blank, owner, label, mode, out)?;
            }
            scalar => {
                // Cleanup already pruned nulls; anything left coerces.
                if let Some(object) = scalar_text(scalar) {
                    out.push(quad(subject, &predicate, object, label));
                }
            }
        }
    }
    Ok(())
}

fn quad(subject: &str, predicate: &str, object: String, label: Option<&str>) -> Quad {
    Quad {
        subject: subject.to_owned(),
        predicate: predicate.to_owned(),
        object,
        label: label.map(str::to_owned),
    }
}

/// Wraps a node identifier in angle brackets; re-wrapping is a no-op.
fn wrap_brackets(name: &str) -> String {
    let mut wrapped = String::with_capacity(name.len() + 2);
    if !name.starts_with('<') {
        wrapped.push('<');
    }
    wrapped.push_str(name);
    if !name.ends_with('>') {
        wrapped.push('>');
    }
    wrapped
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Bottom-up cleanup: trims strings, then prunes null, blank-string,
/// empty-array, and empty-object values so no vacuous quads are emitted.
fn cleanup(value: &mut Value) {
    match value {
        Value::Array(items) => {
            for item in items.iter_mut() {
                cleanup(item);
            }
            items.retain(|v| !is_vacuous(v));
        }
        Value::Object(fields) => {
            for (_, field) in fields.iter_mut() {
                cleanup(field);
            }
            fields.retain(|_, v| !is_vacuous(v));
        }
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.len() != s.len() {
                *s = trimmed.to_owned();
            }
        }
        _ => {}
    }
}

fn is_vacuous(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
        _ => false,
    }
}

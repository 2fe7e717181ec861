use std::fmt;

use serde::Serialize;

use crate::value::{format_float, tuple_repr, TagValue};

const BYTES_PREVIEW: usize = 16;
const LIST_PASS_THROUGH: usize = 16;
const LIST_PREVIEW: usize = 8;

/// Display-safe shape of a tag value, printable as text and serializable as JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DisplayValue {
    Int(i64),
    Float(f64),
    Text(String),
    Sequence(Vec<DisplayValue>),
}

impl fmt::Display for DisplayValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayValue::Int(v) => write!(f, "{}", v),
            DisplayValue::Float(v) => f.write_str(&format_float(*v)),
            DisplayValue::Text(s) => f.write_str(s),
            DisplayValue::Sequence(items) => {
                f.write_str(&tuple_repr(items.iter().map(|i| i.to_string())))
            }
        }
    }
}

impl From<DisplayValue> for TagValue {
    fn from(value: DisplayValue) -> Self {
        match value {
            DisplayValue::Int(v) => TagValue::Int(v),
            DisplayValue::Float(v) => TagValue::Float(v),
            DisplayValue::Text(s) => TagValue::Ascii(s),
            DisplayValue::Sequence(items) => {
                TagValue::List(items.into_iter().map(TagValue::from).collect())
            }
        }
    }
}

/// Shape a raw value for display. Arms are checked in priority order:
/// rational, bytes, list, mapping, then scalars unchanged.
pub fn summarize(value: &TagValue) -> DisplayValue {
    match value {
        TagValue::Rational(r) => DisplayValue::Float(r.to_f64()),
        TagValue::Bytes(bytes) => {
            let preview: Vec<String> = bytes
                .iter()
                .take(BYTES_PREVIEW)
                .map(|b| format!("{:02x}", b))
                .collect();
            let suffix = if bytes.len() > BYTES_PREVIEW { "..." } else { "" };
            DisplayValue::Text(format!(
                "bytes len={} [{}{}]",
                bytes.len(),
                preview.join(" "),
                suffix
            ))
        }
        TagValue::List(items) => {
            if items.len() <= LIST_PASS_THROUGH && items.iter().all(TagValue::is_number) {
                return DisplayValue::Sequence(items.iter().map(summarize).collect());
            }
            let head: Vec<String> = items
                .iter()
                .take(LIST_PREVIEW)
                .map(|i| i.to_string())
                .collect();
            let suffix = if items.len() > LIST_PREVIEW { "..." } else { "" };
            DisplayValue::Text(format!(
                "tuple len={} [{}{}]",
                items.len(),
                head.join(", "),
                suffix
            ))
        }
        TagValue::Map(map) => DisplayValue::Text(format!("dict len={}", map.len())),
        TagValue::Int(v) => DisplayValue::Int(*v),
        TagValue::Float(v) => DisplayValue::Float(*v),
        TagValue::Ascii(s) => DisplayValue::Text(s.clone()),
    }
}

use std::collections::BTreeMap;
use std::fmt;

use tiff::decoder::ifd::Value;
use tiff::tags::Type;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rational {
    pub numerator: i64,
    pub denominator: i64,
}

impl Rational {
    pub fn new(numerator: i64, denominator: i64) -> Self {
        Rational {
            numerator,
            denominator,
        }
    }

    pub fn to_f64(&self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }
}

/// A decoded directory value before any display shaping.
#[derive(Debug, Clone, PartialEq)]
pub enum TagValue {
    Int(i64),
    Float(f64),
    Rational(Rational),
    Ascii(String),
    Bytes(Vec<u8>),
    List(Vec<TagValue>),
    Map(BTreeMap<u16, TagValue>),
}

impl TagValue {
    pub fn is_number(&self) -> bool {
        matches!(self, TagValue::Int(_) | TagValue::Float(_))
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            TagValue::Int(v) => Some(*v),
            TagValue::List(items) if items.len() == 1 => items[0].as_int(),
            _ => None,
        }
    }

    pub fn as_ints(&self) -> Option<Vec<i64>> {
        match self {
            TagValue::Int(v) => Some(vec![*v]),
            TagValue::List(items) => items.iter().map(TagValue::as_int).collect(),
            _ => None,
        }
    }

    pub fn as_rational(&self) -> Option<Rational> {
        match self {
            TagValue::Rational(r) => Some(*r),
            TagValue::Int(v) => Some(Rational::new(*v, 1)),
            _ => None,
        }
    }

    /// Quoted form, as a value shows up nested inside a mapping or a tuple.
    pub fn repr(&self) -> String {
        match self {
            TagValue::Ascii(s) => quote(s),
            TagValue::Bytes(b) => bytes_repr(b),
            TagValue::List(items) => tuple_repr(items.iter().map(TagValue::repr)),
            TagValue::Map(map) => {
                let fields: Vec<String> = map
                    .iter()
                    .map(|(k, v)| format!("{}: {}", k, v.repr()))
                    .collect();
                format!("{{{}}}", fields.join(", "))
            }
            other => other.to_string(),
        }
    }
}

impl fmt::Display for TagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagValue::Int(v) => write!(f, "{}", v),
            TagValue::Float(v) => f.write_str(&format_float(*v)),
            TagValue::Rational(r) => f.write_str(&format_float(r.to_f64())),
            TagValue::Ascii(s) => f.write_str(s),
            _ => f.write_str(&self.repr()),
        }
    }
}

pub fn format_float(v: f64) -> String {
    if v.is_nan() {
        "nan".to_string()
    } else if v == f64::INFINITY {
        "inf".to_string()
    } else if v == f64::NEG_INFINITY {
        "-inf".to_string()
    } else {
        format!("{:?}", v)
    }
}

pub(crate) fn tuple_repr<I: Iterator<Item = String>>(items: I) -> String {
    let items: Vec<String> = items.collect();
    if items.len() == 1 {
        format!("({},)", items[0])
    } else {
        format!("({})", items.join(", "))
    }
}

fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 || c as u32 == 0x7f => {
                out.push_str(&format!("\\x{:02x}", c as u32))
            }
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}

fn bytes_repr(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() + 3);
    out.push_str("b'");
    for &b in bytes {
        match b {
            b'\\' => out.push_str("\\\\"),
            b'\'' => out.push_str("\\'"),
            b'\n' => out.push_str("\\n"),
            b'\r' => out.push_str("\\r"),
            b'\t' => out.push_str("\\t"),
            0x20..=0x7e => out.push(b as char),
            _ => out.push_str(&format!("\\x{:02x}", b)),
        }
    }
    out.push('\'');
    out
}

/// Convert a value read by the tiff decoder.
///
/// `UNDEFINED` and `BYTE` data stay byte strings whatever their count.
/// Other single values come back from the decoder as scalars already.
pub fn from_tiff(value: Value, field_type: Type) -> TagValue {
    if matches!(field_type, Type::UNDEFINED | Type::BYTE) {
        return TagValue::Bytes(value_bytes(value));
    }
    match value {
        Value::Byte(v) => TagValue::Int(v as i64),
        Value::Short(v) => TagValue::Int(v as i64),
        Value::SignedByte(v) => TagValue::Int(v as i64),
        Value::SignedShort(v) => TagValue::Int(v as i64),
        Value::Signed(v) => TagValue::Int(v as i64),
        Value::SignedBig(v) => TagValue::Int(v),
        Value::Unsigned(v) | Value::Ifd(v) => TagValue::Int(v as i64),
        Value::UnsignedBig(v) | Value::IfdBig(v) => match i64::try_from(v) {
            Ok(v) => TagValue::Int(v),
            Err(_) => TagValue::Float(v as f64),
        },
        Value::Float(v) => TagValue::Float(v as f64),
        Value::Double(v) => TagValue::Float(v),
        Value::Rational(n, d) => TagValue::Rational(Rational::new(n as i64, d as i64)),
        Value::SRational(n, d) => TagValue::Rational(Rational::new(n as i64, d as i64)),
        Value::Ascii(s) => TagValue::Ascii(s),
        Value::List(items) => TagValue::List(
            items
                .into_iter()
                .map(|item| from_tiff(item, field_type))
                .collect(),
        ),
        other => TagValue::Ascii(format!("{:?}", other)),
    }
}

fn value_bytes(value: Value) -> Vec<u8> {
    match value {
        Value::Byte(b) => vec![b],
        Value::List(items) => items.into_iter().flat_map(value_bytes).collect(),
        _ => Vec::new(),
    }
}

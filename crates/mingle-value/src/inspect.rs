//! Deterministic debug rendering of values.
//!
//! The format is an observable contract used by tests and debug
//! logging: `null`, native boolean/number literals, RFC4627-escaped
//! quoted strings, `buffer:[<hex>]`, `<qtype>.<member>` for enums,
//! `[v1, v2]` for lists, `{k1:v1, k2:v2}` for maps, and the same
//! brace form prefixed with the qualified type for structs.

use std::fmt;

use crate::value::{SymbolMap, Value};

/// Renders a value in the canonical inspection format.
pub fn inspect(value: &Value) -> String {
    let mut out = String::new();
    write_value(&mut out, value);
    out
}

fn write_value(out: &mut String, value: &Value) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Boolean(v) => out.push_str(if *v { "true" } else { "false" }),
        Value::Int32(v) => out.push_str(&v.to_string()),
        Value::Int64(v) => out.push_str(&v.to_string()),
        Value::Uint32(v) => out.push_str(&v.to_string()),
        Value::Uint64(v) => out.push_str(&v.to_string()),
        Value::Float32(v) => out.push_str(&v.to_string()),
        Value::Float64(v) => out.push_str(&v.to_string()),
        Value::String(s) => write_rfc4627_string(out, s),
        Value::Buffer(buf) => {
            out.push_str("buffer:[");
            out.push_str(&buf.to_hex());
            out.push(']');
        }
        Value::Timestamp(ts) => out.push_str(&ts.rfc3339()),
        Value::Enum(en) => {
            out.push_str(&en.enum_type().external_form());
            out.push('.');
            out.push_str(en.value().as_str());
        }
        Value::List(elements) => {
            out.push('[');
            for (i, element) in elements.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_value(out, element);
            }
            out.push(']');
        }
        Value::SymbolMap(map) => write_fields(out, map),
        Value::Struct(st) => {
            out.push_str(&st.struct_type().external_form());
            write_fields(out, st.fields());
        }
    }
}

fn write_fields(out: &mut String, map: &SymbolMap) {
    out.push('{');
    for (i, (field, value)) in map.fields().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        out.push_str(field.as_str());
        out.push(':');
        write_value(out, value);
    }
    out.push('}');
}

/// RFC4627 string escaping: quotes, backslash, the short escapes, and
/// `\u00xx` for remaining control characters.
fn write_rfc4627_string(out: &mut String, s: &str) {
    use fmt::Write;

    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{0008}' => out.push_str("\\b"),
            '\u{000c}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => {
                // write! to a String cannot fail
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&inspect(self))
    }
}

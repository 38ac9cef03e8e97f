//! JSON emitter (component C7): walks a [`Value`] tree back into text,
//! either compactly or with configurable indentation whitespace.

use crate::encoder::encode_string;
use crate::options::WhitespaceStyle;
use crate::ordered_map::OrderedMap;
use crate::value::Value;

/// Emit a value as compact JSON text (no insignificant whitespace).
///
/// ```
/// use fsmjson::{parse, to_json};
///
/// let v = parse(br#"{ "a" : 1 }"#);
/// assert_eq!(to_json(&v), r#"{"a":1}"#);
/// ```
pub fn to_json(value: &Value) -> String {
    to_json_with_style(value, WhitespaceStyle::Compact)
}

/// Emit a value as JSON text using the given [`WhitespaceStyle`].
///
/// ```
/// use fsmjson::{parse, to_json_with_style, WhitespaceStyle};
///
/// let v = parse(br#"{"a":[1,2]}"#);
/// let pretty = to_json_with_style(&v, WhitespaceStyle::SpaceLf);
/// assert_eq!(pretty, "{\n    \"a\": [\n        1,\n        2\n    ]\n}");
/// ```
pub fn to_json_with_style(value: &Value, style: WhitespaceStyle) -> String {
    let mut out = String::new();
    write_value(&mut out, value, style, 0);
    out
}

fn write_indent(out: &mut String, style: WhitespaceStyle, level: usize) {
    for _ in 0..level {
        out.push_str(style.indent_unit());
    }
}

fn write_value(out: &mut String, value: &Value, style: WhitespaceStyle, level: usize) {
    match value {
        Value::Error(msg) => out.push_str(&encode_string(msg.as_bytes())),
        Value::Null => out.push_str("null"),
        Value::Boolean(true) => out.push_str("true"),
        Value::Boolean(false) => out.push_str("false"),
        Value::Number(text) => out.push_str(text),
        Value::String(s) => out.push_str(&encode_string(s.as_bytes())),
        Value::Array(items) => write_array(out, items, style, level),
        Value::Object(map) => write_object(out, map, style, level),
    }
}

fn write_array(out: &mut String, items: &[Value], style: WhitespaceStyle, level: usize) {
    if items.is_empty() {
        out.push_str("[]");
        return;
    }
    out.push('[');
    out.push_str(style.newline());
    for (i, item) in items.iter().enumerate() {
        write_indent(out, style, level + 1);
        write_value(out, item, style, level + 1);
        if i + 1 < items.len() {
            out.push(',');
        }
        out.push_str(style.newline());
    }
    write_indent(out, style, level);
    out.push(']');
}

fn write_object(out: &mut String, map: &OrderedMap, style: WhitespaceStyle, level: usize) {
    if map.is_empty() {
        out.push_str("{}");
        return;
    }
    out.push('{');
    out.push_str(style.newline());
    let len = map.len();
    for (i, (key, value)) in map.iter().enumerate() {
        write_indent(out, style, level + 1);
        out.push_str(&encode_string(key.as_bytes()));
        out.push(':');
        if !style.is_compact() {
            out.push(' ');
        }
        write_value(out, value, style, level + 1);
        if i + 1 < len {
            out.push(',');
        }
        out.push_str(style.newline());
    }
    write_indent(out, style, level);
    out.push('}');
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::parser::parse;

    #[test]
    fn compact_round_trip_identity() {
        let text = br#"{"a":1,"b":[true,null,"x"]}"#;
        let v = parse(text);
        assert_eq!(to_json(&v), std::str::from_utf8(text).unwrap());
    }

    #[test]
    fn empty_containers_stay_on_one_line() {
        let v = parse(b"{}");
        assert_eq!(to_json(&v), "{}");
        let v = parse(b"[]");
        assert_eq!(to_json(&v), "[]");
    }

    #[test]
    fn indented_style_nests_and_uses_configured_newline() {
        let v = parse(br#"{"a":[1,2]}"#);
        let out = to_json_with_style(&v, WhitespaceStyle::SpaceLf);
        assert_eq!(out, "{\n    \"a\": [\n        1,\n        2\n    ]\n}");
    }

    #[test]
    fn tab_crlf_style() {
        let v = parse(br#"[1]"#);
        let out = to_json_with_style(&v, WhitespaceStyle::TabCrLf);
        assert_eq!(out, "[\r\n\t1\r\n]");
    }

    #[test]
    fn whitespace_irrelevance_is_idempotent_under_parse_then_compact_emit() {
        let a = parse(b" [ 1 , 2 ] ");
        let b = parse(b"[1,2]");
        assert_eq!(to_json(&a), to_json(&b));
    }

    #[test]
    fn non_utf8_strings_escape_through_emit() {
        let v = parse(&[b'"', 0xFF, b'"']);
        assert_eq!(to_json(&v), "\"\\u00ff\"");
    }
}

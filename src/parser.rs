//! Whole-input JSON parser (component C6): drives `tables::tables().parser_states`,
//! a flat `(state, byte) -> state` lookup table with 69 states, one byte at a
//! time over a complete `&[u8]`. Sixteen states are accepting: reaching one of
//! them with no more input left and an empty container stack means the parse
//! succeeded.
//!
//! The table alone can't express everything the grammar needs — a number's
//! exact extent depends on which byte ends it, a closing `]`/`}` must match
//! the container that is actually open, and a completed string may turn out
//! to be an object key rather than a value. Those decisions live in the
//! driver loop below, keyed off the state a byte left *from* as well as the
//! one it lands *in*.
//!
//! Parsing never panics: a malformed or truncated input produces a
//! [`ParseError`], and [`parse`]/[`parse_with_options`] package that as a
//! [`Value::Error`] rather than returning a `Result`, so a round trip through
//! the emitter preserves the failure report.

use crate::error::ParseError;
use crate::options::ParserOptions;
use crate::ordered_map::OrderedMap;
use crate::tables::{
    tables, tail_len, PS_ARR_CLOSE, PS_ARR_EMPTY, PS_ARR_OPEN, PS_COLON, PS_COMMA, PS_ENTRY,
    PS_ESC_BACKSLASH, PS_ESC_BS, PS_ESC_CR, PS_ESC_FF, PS_ESC_LF, PS_ESC_QUOTE, PS_ESC_SLASH,
    PS_ESC_TAB, PS_EXPECT_VALUE, PS_FALSE, PS_NULL, PS_NUM_EXP_FIRST, PS_NUM_EXP_REST,
    PS_NUM_FRAC_FIRST, PS_NUM_FRAC_REST, PS_NUM_INT, PS_NUM_MINUS, PS_NUM_ZERO, PS_OBJ_CLOSE,
    PS_OBJ_EMPTY, PS_OBJ_OPEN, PS_STR_CLOSE, PS_STR_ENTRY, PS_STR_ESCAPE, PS_STR_LOOP, PS_TRUE,
    PS_U_D1, PS_U_D2_D, PS_U_D2_OTHER, PS_U_D2_ZERO, PS_U_D3_00, PS_U_D3_3BYTE, PS_U_D3_HIGH,
    PS_U_D3_LOW, PS_U_D4_1BYTE, PS_U_D4_2BYTE_A, PS_U_D4_2BYTE_B, PS_U_D4_3BYTE, PS_UTF8_3_E0_T1,
    PS_UTF8_3_ED_T1, PS_UTF8_4_F0_T1, PS_UTF8_4_F4_T1, PS_UTF8_TAIL_PEND, PS_WS_AFTER_KEY,
    PS_WS_AFTER_VALUE, PS_WS_BEFORE_KEY,
};
use crate::value::Value;

/// Parse a complete JSON text, using default [`ParserOptions`].
///
/// A malformed or truncated input never panics; it yields a [`Value::Error`]
/// carrying a diagnostic message rather than a top-level `Result`.
///
/// ```
/// use fsmjson::{parse, Value};
/// assert_eq!(parse(b"42"), Value::Number("42".into()));
/// assert!(parse(b"{").is_error());
/// ```
pub fn parse(bytes: &[u8]) -> Value {
    parse_with_options(bytes, ParserOptions::default())
}

/// Parse a complete JSON text with the given [`ParserOptions`].
///
/// ```
/// use fsmjson::{parse_with_options, ParserOptionsBuilder};
/// let options = ParserOptionsBuilder::default().with_max_depth(2).build();
/// assert!(parse_with_options(b"[[[1]]]", options).is_error());
/// ```
pub fn parse_with_options(bytes: &[u8], options: ParserOptions) -> Value {
    match Parser::new(bytes, options).run() {
        Ok(v) => v,
        Err(e) => Value::Error(e.to_string()),
    }
}

/// An open array or object on the container stack, holding what has been
/// accumulated so far plus, for an object, the key awaiting its value.
enum Frame {
    Array(Vec<Value>),
    Object(OrderedMap, Option<String>),
}

struct Parser<'a> {
    bytes: &'a [u8],
    pos: usize,
    state: u8,
    stack: Vec<Frame>,
    root: Option<Value>,
    string_buf: String,
    number_start: usize,
    hex_accum: u16,
    utf8_remaining: u8,
    utf8_buf: Vec<u8>,
    max_depth: usize,
}

impl<'a> Parser<'a> {
    fn new(bytes: &'a [u8], options: ParserOptions) -> Self {
        Parser {
            bytes,
            pos: 0,
            state: PS_ENTRY,
            stack: Vec::new(),
            root: None,
            string_buf: String::new(),
            number_start: 0,
            hex_accum: 0,
            utf8_remaining: 0,
            utf8_buf: Vec::with_capacity(4),
            max_depth: options.max_depth(),
        }
    }

    fn run(mut self) -> Result<Value, ParseError> {
        let t = tables();

        while self.pos < self.bytes.len() {
            let b = self.bytes[self.pos];
            let prev = self.state;
            let next = t.parser_states[prev as usize][b as usize];

            if next == 0 {
                if is_number_accepting(prev) {
                    let text = std::str::from_utf8(&self.bytes[self.number_start..self.pos])
                        .expect("the number grammar only matches ASCII bytes")
                        .to_owned();
                    self.state = self.complete_value(Value::Number(text));
                    continue;
                }
                return Err(self.reject(prev, b));
            }

            if is_value_start_source(prev) && matches!(next, PS_NUM_MINUS | PS_NUM_ZERO | PS_NUM_INT)
            {
                self.number_start = self.pos;
            }
            if next == PS_STR_ENTRY {
                self.string_buf.clear();
            }

            if is_utf8_tail_source(prev) {
                self.utf8_buf.push(b);
                self.utf8_remaining -= 1;
                self.state = if self.utf8_remaining == 0 {
                    let decoded = std::str::from_utf8(&self.utf8_buf)
                        .expect("parser_states only confirms RFC 3629 well-formed byte ranges");
                    self.string_buf.push_str(decoded);
                    self.utf8_buf.clear();
                    PS_STR_LOOP
                } else {
                    PS_UTF8_TAIL_PEND
                };
                self.pos += 1;
                continue;
            }

            if is_string_content_source(prev) && is_utf8_lead_target(next) {
                let class = t.utf8_class[b as usize];
                self.utf8_buf.clear();
                self.utf8_buf.push(b);
                self.utf8_remaining = tail_len(class) as u8;
                self.state = next;
                self.pos += 1;
                continue;
            }

            if is_hex_digit_source(prev) {
                self.hex_accum = self.hex_accum * 16 + t.hex_decode[b as usize] as u16;
                if is_hex_digit_final(prev) {
                    let ch = char::from_u32(self.hex_accum as u32)
                        .expect("surrogate code points are rejected before the fourth hex digit");
                    self.string_buf.push(ch);
                    self.hex_accum = 0;
                }
                self.state = next;
                self.pos += 1;
                continue;
            }

            if next == PS_U_D1 {
                self.hex_accum = 0;
                self.state = next;
                self.pos += 1;
                continue;
            }

            if is_string_content_source(prev) && next == PS_STR_LOOP {
                self.string_buf.push(b as char);
                self.state = next;
                self.pos += 1;
                continue;
            }

            self.state = self.apply(next, b)?;
            self.pos += 1;
        }

        if is_number_accepting(self.state) {
            let text = std::str::from_utf8(&self.bytes[self.number_start..])
                .expect("the number grammar only matches ASCII bytes")
                .to_owned();
            self.state = self.complete_value(Value::Number(text));
        }

        if self.stack.is_empty() && self.root.is_some() && t.parser_accepting[self.state as usize] {
            Ok(self.root.take().unwrap())
        } else {
            Err(ParseError::UnexpectedEof {
                offset: self.bytes.len(),
                expected: expected_description(self.state),
            })
        }
    }

    /// Everything reachable on `next` that the flat table alone can't fully
    /// resolve: short-escape emission, string/value completion, container
    /// push/pop with the depth check, and comma routing by container kind.
    fn apply(&mut self, next: u8, b: u8) -> Result<u8, ParseError> {
        Ok(match next {
            PS_ESC_QUOTE => {
                self.string_buf.push('"');
                next
            }
            PS_ESC_BACKSLASH => {
                self.string_buf.push('\\');
                next
            }
            PS_ESC_SLASH => {
                self.string_buf.push('/');
                next
            }
            PS_ESC_BS => {
                self.string_buf.push('\u{8}');
                next
            }
            PS_ESC_FF => {
                self.string_buf.push('\u{C}');
                next
            }
            PS_ESC_LF => {
                self.string_buf.push('\n');
                next
            }
            PS_ESC_CR => {
                self.string_buf.push('\r');
                next
            }
            PS_ESC_TAB => {
                self.string_buf.push('\t');
                next
            }
            PS_STR_CLOSE => {
                let s = std::mem::take(&mut self.string_buf);
                self.complete_value(Value::String(s))
            }
            PS_NULL => self.complete_value(Value::Null),
            PS_FALSE => self.complete_value(Value::Boolean(false)),
            PS_TRUE => self.complete_value(Value::Boolean(true)),
            PS_ARR_OPEN => {
                if self.stack.len() >= self.max_depth {
                    return Err(ParseError::DepthExceeded { offset: self.pos });
                }
                self.stack.push(Frame::Array(Vec::new()));
                next
            }
            PS_OBJ_OPEN => {
                if self.stack.len() >= self.max_depth {
                    return Err(ParseError::DepthExceeded { offset: self.pos });
                }
                self.stack.push(Frame::Object(OrderedMap::new(), None));
                next
            }
            PS_ARR_EMPTY => match self.stack.pop() {
                Some(Frame::Array(items)) => self.complete_value(Value::Array(items)),
                _ => unreachable!("PS_ARR_OPEN always pushes a matching Frame::Array"),
            },
            PS_OBJ_EMPTY => match self.stack.pop() {
                Some(Frame::Object(map, _)) => self.complete_value(Value::Object(map)),
                _ => unreachable!("PS_OBJ_OPEN always pushes a matching Frame::Object"),
            },
            // PS_WS_AFTER_VALUE maps both ']' and '}' regardless of which
            // container is actually open, since that table row is shared by
            // every value position; the mismatch has to be caught here.
            PS_ARR_CLOSE => match self.stack.pop() {
                Some(Frame::Array(items)) => self.complete_value(Value::Array(items)),
                Some(other) => {
                    self.stack.push(other);
                    return Err(ParseError::UnexpectedByte {
                        byte: b,
                        offset: self.pos,
                        expected: "'}' to close the open object",
                    });
                }
                None => {
                    return Err(ParseError::UnexpectedByte {
                        byte: b,
                        offset: self.pos,
                        expected: "a value",
                    })
                }
            },
            PS_OBJ_CLOSE => match self.stack.pop() {
                Some(Frame::Object(map, _)) => self.complete_value(Value::Object(map)),
                Some(other) => {
                    self.stack.push(other);
                    return Err(ParseError::UnexpectedByte {
                        byte: b,
                        offset: self.pos,
                        expected: "']' to close the open array",
                    });
                }
                None => {
                    return Err(ParseError::UnexpectedByte {
                        byte: b,
                        offset: self.pos,
                        expected: "a value",
                    })
                }
            },
            PS_COMMA => match self.stack.last() {
                Some(Frame::Array(_)) => PS_EXPECT_VALUE,
                Some(Frame::Object(..)) => PS_WS_BEFORE_KEY,
                None => {
                    return Err(ParseError::UnexpectedByte {
                        byte: b,
                        offset: self.pos,
                        expected: "end of input",
                    })
                }
            },
            _ => next,
        })
    }

    /// Attach a completed value to whatever is waiting for it: the root slot
    /// if the container stack is empty, the current array's tail, or the
    /// current object — as its pending key if none is set yet, otherwise as
    /// the value for the key already taken.
    fn complete_value(&mut self, v: Value) -> u8 {
        match self.stack.last_mut() {
            None => {
                self.root = Some(v);
                PS_WS_AFTER_VALUE
            }
            Some(Frame::Array(items)) => {
                items.push(v);
                PS_WS_AFTER_VALUE
            }
            Some(Frame::Object(map, pending_key)) => {
                if pending_key.is_none() {
                    let Value::String(key) = v else {
                        unreachable!("the grammar only allows a string before ':'");
                    };
                    *pending_key = Some(key);
                    PS_WS_AFTER_KEY
                } else {
                    let key = pending_key.take().unwrap();
                    map.put(key, v);
                    PS_WS_AFTER_VALUE
                }
            }
        }
    }

    fn reject(&self, prev: u8, b: u8) -> ParseError {
        if prev == PS_U_D2_D {
            return ParseError::SurrogateEscape { offset: self.pos };
        }
        if is_utf8_tail_source(prev) {
            return ParseError::InvalidUtf8 { offset: self.pos };
        }
        if is_string_content_source(prev) && b >= 0x80 {
            return ParseError::InvalidUtf8 { offset: self.pos };
        }
        if prev == PS_WS_AFTER_VALUE && self.stack.is_empty() && self.root.is_some() {
            return ParseError::TrailingData { offset: self.pos };
        }
        ParseError::UnexpectedByte {
            byte: b,
            offset: self.pos,
            expected: expected_description(prev),
        }
    }
}

fn is_number_accepting(s: u8) -> bool {
    matches!(
        s,
        PS_NUM_ZERO
            | PS_NUM_INT
            | PS_NUM_FRAC_FIRST
            | PS_NUM_EXP_FIRST
            | PS_NUM_FRAC_REST
            | PS_NUM_EXP_REST
    )
}

fn is_value_start_source(s: u8) -> bool {
    matches!(s, PS_ENTRY | PS_ARR_OPEN | PS_EXPECT_VALUE | PS_COLON)
}

fn is_string_content_source(s: u8) -> bool {
    matches!(s, PS_STR_ENTRY | PS_STR_LOOP)
}

fn is_hex_digit_source(s: u8) -> bool {
    matches!(
        s,
        PS_U_D1
            | PS_U_D2_ZERO
            | PS_U_D2_D
            | PS_U_D2_OTHER
            | PS_U_D3_00
            | PS_U_D3_LOW
            | PS_U_D3_HIGH
            | PS_U_D3_3BYTE
            | PS_U_D4_1BYTE
            | PS_U_D4_2BYTE_A
            | PS_U_D4_2BYTE_B
            | PS_U_D4_3BYTE
    )
}

fn is_hex_digit_final(s: u8) -> bool {
    matches!(
        s,
        PS_U_D4_1BYTE | PS_U_D4_2BYTE_A | PS_U_D4_2BYTE_B | PS_U_D4_3BYTE
    )
}

fn is_utf8_tail_source(s: u8) -> bool {
    matches!(
        s,
        PS_UTF8_3_E0_T1 | PS_UTF8_3_ED_T1 | PS_UTF8_4_F0_T1 | PS_UTF8_4_F4_T1 | PS_UTF8_TAIL_PEND
    )
}

fn is_utf8_lead_target(s: u8) -> bool {
    matches!(
        s,
        PS_UTF8_TAIL_PEND | PS_UTF8_3_E0_T1 | PS_UTF8_3_ED_T1 | PS_UTF8_4_F0_T1 | PS_UTF8_4_F4_T1
    )
}

fn expected_description(state: u8) -> &'static str {
    match state {
        PS_ENTRY | PS_ARR_OPEN | PS_EXPECT_VALUE | PS_COLON => "a value",
        PS_OBJ_OPEN | PS_WS_BEFORE_KEY => "a string key or '}'",
        PS_WS_AFTER_KEY => "':'",
        PS_WS_AFTER_VALUE => "',' or a closing bracket",
        PS_STR_ENTRY | PS_STR_LOOP => "a string character or closing '\"'",
        PS_STR_ESCAPE => "an escape character",
        _ => "valid JSON input",
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn ok(bytes: &[u8]) -> Value {
        let v = parse(bytes);
        assert!(!v.is_error(), "unexpected parse error for {bytes:?}: {v:?}");
        v
    }

    #[test]
    fn s1_object_with_mixed_values() {
        let v = ok(br#"{"a":1,"b":[true,null]}"#);
        let obj = v.as_object().unwrap();
        assert_eq!(obj.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(obj.get("a"), Some(&Value::Number("1".into())));
        assert_eq!(
            obj.get("b"),
            Some(&Value::Array(vec![Value::Boolean(true), Value::Null]))
        );
    }

    #[test]
    fn s2_whitespace_irrelevance() {
        let v = ok(b" \n\t[\r\n 1 , 2 ,3 ] ");
        assert_eq!(
            v,
            Value::Array(vec![
                Value::Number("1".into()),
                Value::Number("2".into()),
                Value::Number("3".into()),
            ])
        );
    }

    #[test]
    fn s3_unicode_escapes_decode_to_utf8() {
        let v = ok(b"\"\\u0041\\u00E9\\u4E2D\"");
        assert_eq!(
            v.as_string().unwrap().as_bytes(),
            &[0x41, 0xC3, 0xA9, 0xE4, 0xB8, 0xAD]
        );
    }

    #[test]
    fn s3_raw_utf8_in_string_parses_directly() {
        let v = ok("\"A\u{e9}\u{4e2d}\"".as_bytes());
        assert_eq!(
            v.as_string().unwrap().as_bytes(),
            &[0x41, 0xC3, 0xA9, 0xE4, 0xB8, 0xAD]
        );
    }

    #[test]
    fn s4_lone_surrogate_rejected() {
        let v = parse(br#""\uD834""#);
        assert!(v.is_error());
    }

    #[test]
    fn s4_paired_surrogate_escapes_also_rejected() {
        // `\uXXXX` never combines two escapes into one scalar value, so a
        // correctly paired UTF-16 surrogate escape sequence is rejected at
        // its first (high) half, same as a lone one.
        let v = parse(br#""𝄞""#);
        assert!(v.is_error());
    }

    #[test]
    fn s4_raw_astral_utf8_parses_successfully() {
        // An already-UTF-8-encoded astral character (U+1D11E) embedded
        // directly in the string body is well-formed input and must parse,
        // unlike the surrogate-escape spelling of the same code point above.
        let v = ok("\"\u{1D11E}\"".as_bytes());
        assert_eq!(v.as_string().unwrap().chars().next(), Some('\u{1D11E}'));
    }

    #[test]
    fn s6_truncated_object_reports_eof() {
        let v = parse(br#"{"a":1,"#);
        assert!(v.is_error());
    }

    #[test]
    fn rejects_trailing_data() {
        let v = parse(b"1 2");
        assert!(v.is_error());
    }

    #[test]
    fn rejects_trailing_comma() {
        assert!(parse(b"[1,2,]").is_error());
        assert!(parse(br#"{"a":1,}"#).is_error());
    }

    #[test]
    fn rejects_leading_zero() {
        assert!(parse(b"01").is_error());
    }

    #[test]
    fn accepts_negative_and_exponent_numbers() {
        assert_eq!(ok(b"-12.5e+10"), Value::Number("-12.5e+10".into()));
        assert_eq!(ok(b"0.0"), Value::Number("0.0".into()));
    }

    #[test]
    fn number_followed_by_closing_bracket_is_not_swallowed() {
        assert_eq!(
            ok(b"[1,2]"),
            Value::Array(vec![Value::Number("1".into()), Value::Number("2".into())])
        );
    }

    #[test]
    fn rejects_unescaped_control_character_in_string() {
        let bytes = [b'"', 0x01, b'"'];
        assert!(parse(&bytes).is_error());
    }

    #[test]
    fn rejects_invalid_utf8_in_string() {
        assert!(parse(&[b'"', 0xFF, b'"']).is_error());
    }

    #[test]
    fn rejects_overlong_and_surrogate_forming_raw_sequences() {
        assert!(parse(&[b'"', 0xC0, 0x80, b'"']).is_error());
        assert!(parse(&[b'"', 0xED, 0xA0, 0x80, b'"']).is_error());
    }

    #[test]
    fn rejects_truncated_multibyte_sequence_in_string() {
        assert!(parse(&[b'"', 0xE4, 0xB8, b'"']).is_error());
    }

    #[test]
    fn rejects_mismatched_closing_bracket() {
        assert!(parse(b"[1}").is_error());
        assert!(parse(br#"{"a":1]"#).is_error());
    }

    #[test]
    fn depth_limit_is_enforced() {
        let opts = crate::options::ParserOptionsBuilder::default()
            .with_max_depth(2)
            .build();
        let shallow = b"[[1]]";
        assert!(!parse_with_options(shallow, opts).is_error());
        let deep = b"[[[1]]]";
        assert!(parse_with_options(deep, opts).is_error());
    }

    #[test]
    fn duplicate_keys_keep_last_value_at_first_position() {
        let v = ok(br#"{"a":1,"b":2,"a":3}"#);
        let obj = v.as_object().unwrap();
        assert_eq!(obj.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(obj.get("a"), Some(&Value::Number("3".into())));
    }

    #[test]
    fn nested_containers_round_trip_structurally() {
        let v = ok(br#"{"x":[1,{"y":2},[3,4]],"z":null}"#);
        assert!(v.is_object());
    }

    #[test]
    fn empty_array_and_object_parse_without_elements() {
        assert_eq!(ok(b"[]"), Value::Array(vec![]));
        assert_eq!(ok(b"{}"), Value::Object(OrderedMap::new()));
    }
}

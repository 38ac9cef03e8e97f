//! # fsmjson
//!
//! A table-driven JSON parser and emitter, with strict UTF-8 enforcement, a
//! Base64 codec, and an insertion-ordered map used to represent objects.
//!
//! Unlike a reactive, event-based parser this crate is a whole-input
//! library: feed it a complete byte slice and get back a [`Value`] tree (or,
//! for a failed parse, a [`Value::Error`] carrying a diagnostic — parsing
//! never panics or returns a `Result` at the top level).
//!
//! ## Examples
//!
//! ### Parsing a byte slice
//!
//! ```
//! use fsmjson::{parse, Value};
//!
//! let json = r#"{"name": "Elvis", "hits": [1, 2, 3]}"#.as_bytes();
//! let value = parse(json);
//!
//! assert!(value.is_object());
//! assert_eq!(value.as_object().unwrap().get("name"), Some(&Value::String("Elvis".into())));
//! ```
//!
//! ### Emitting a value back to text
//!
//! ```
//! use fsmjson::{parse, to_json, to_json_with_style, WhitespaceStyle};
//!
//! let value = parse(br#"{"a":[1,2]}"#);
//! assert_eq!(to_json(&value), r#"{"a":[1,2]}"#);
//! assert_eq!(
//!     to_json_with_style(&value, WhitespaceStyle::SpaceLf),
//!     "{\n    \"a\": [\n        1,\n        2\n    ]\n}"
//! );
//! ```
//!
//! ### Limiting nesting depth
//!
//! ```
//! use fsmjson::{parse_with_options, ParserOptionsBuilder};
//!
//! let options = ParserOptionsBuilder::default().with_max_depth(4).build();
//! let value = parse_with_options(b"[[[[[1]]]]]", options);
//! assert!(value.is_error());
//! ```
//!
//! ### Ill-formed UTF-8 is repaired, never rejected, when encoding
//!
//! ```
//! use fsmjson::encode_string;
//!
//! // 0xFF is not valid UTF-8 anywhere; it is hex-escaped rather than
//! // causing a failure.
//! assert_eq!(encode_string(&[b'a', 0xFF, b'b']), "\"a\\u00ffb\"");
//! ```
//!
//! ### Base64
//!
//! ```
//! use fsmjson::{base64_decode, base64_encode};
//!
//! let encoded = base64_encode(b"Elvis");
//! assert_eq!(encoded, "RWx2aXM=");
//! assert_eq!(base64_decode(encoded.as_bytes()).unwrap(), b"Elvis");
//! ```

mod base64;
mod encoder;
mod error;
mod emitter;
mod options;
mod ordered_map;
mod parser;
mod tables;
mod value;

pub use base64::{base64_decode, base64_encode};
pub use emitter::{to_json, to_json_with_style};
pub use encoder::encode_string;
pub use error::{Base64Error, JsonError, ParseError, WrongTypeError};
pub use options::{ParserOptions, ParserOptionsBuilder, WhitespaceStyle};
pub use ordered_map::OrderedMap;
pub use parser::{parse, parse_with_options};
pub use value::Value;

//! The in-memory JSON value representation (component C5): a tagged sum
//! type constructed by the parser and walked by the emitter.

use crate::error::WrongTypeError;
use crate::ordered_map::OrderedMap;

/// A JSON value.
///
/// A fresh, default-constructed value is always [`Value::Null`]. Assigning a
/// new value of the same tag (e.g. `*v.as_array_mut()? = vec![]`) mutates the
/// payload in place; assigning across tags (`*v = Value::Boolean(true)`)
/// replaces the whole enum, dropping the previous payload rather than
/// attempting any in-place reinterpretation across variants.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A parse failure, carrying a diagnostic message. Emitting an `Error`
    /// value produces a JSON string literal containing the diagnostic, so
    /// that round-tripping a failed parse preserves the report.
    Error(String),
    /// Singleton: carries no payload, so cloning and dropping it are no-ops
    /// beyond the tag itself.
    Null,
    Boolean(bool),
    /// The exact lexical form that matched the JSON `number` production.
    /// Never numerically normalized; numeric evaluation is out of scope.
    Number(String),
    /// Always well-formed UTF-8.
    String(String),
    Array(Vec<Value>),
    Object(OrderedMap),
}

impl Default for Value {
    fn default() -> Self {
        Value::Null
    }
}

macro_rules! predicate {
    ($is:ident, $not:ident, $variant:ident) => {
        #[doc = concat!("`true` if this value is `", stringify!($variant), "`.")]
        pub fn $is(&self) -> bool {
            matches!(self, Value::$variant(..))
        }

        #[doc = concat!("`true` if this value is not `", stringify!($variant), "`.")]
        pub fn $not(&self) -> bool {
            !self.$is()
        }
    };
}

macro_rules! accessor {
    ($as_ref:ident, $as_mut:ident, $variant:ident, $payload:ty, $name:literal) => {
        #[doc = concat!("Borrow the payload if this is a `", stringify!($variant), "`.")]
        pub fn $as_ref(&self) -> Result<&$payload, WrongTypeError> {
            match self {
                Value::$variant(v) => Ok(v),
                other => Err(WrongTypeError {
                    expected: $name,
                    found: other.type_name(),
                }),
            }
        }

        #[doc = concat!("Mutably borrow the payload if this is a `", stringify!($variant), "`.")]
        pub fn $as_mut(&mut self) -> Result<&mut $payload, WrongTypeError> {
            let found = self.type_name();
            match self {
                Value::$variant(v) => Ok(v),
                _ => Err(WrongTypeError {
                    expected: $name,
                    found,
                }),
            }
        }
    };
}

impl Value {
    /// Name of this value's tag, used in `WrongType` diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Error(_) => "error",
            Value::Null => "null",
            Value::Boolean(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }

    predicate!(is_error, not_error, Error);
    predicate!(is_null, not_null, Null);
    predicate!(is_boolean, not_boolean, Boolean);
    predicate!(is_number, not_number, Number);
    predicate!(is_string, not_string, String);
    predicate!(is_array, not_array, Array);
    predicate!(is_object, not_object, Object);

    accessor!(as_error, as_error_mut, Error, String, "error");
    accessor!(as_boolean, as_boolean_mut, Boolean, bool, "boolean");
    accessor!(as_number, as_number_mut, Number, String, "number");
    accessor!(as_string, as_string_mut, String, String, "string");
    accessor!(as_array, as_array_mut, Array, Vec<Value>, "array");
    accessor!(as_object, as_object_mut, Object, OrderedMap, "object");

    /// Replace this value's tag and payload with a boolean, discarding
    /// whatever it held before.
    pub fn to_boolean(&mut self, b: bool) {
        *self = Value::Boolean(b);
    }

    /// Replace this value's tag and payload with a number, discarding
    /// whatever it held before. `text` is trusted to already match the JSON
    /// number grammar; this method does not validate it (callers that need
    /// validation should go through [`crate::parse`]).
    pub fn to_number(&mut self, text: impl Into<String>) {
        *self = Value::Number(text.into());
    }

    /// Replace this value's tag and payload with a string.
    pub fn to_string_value(&mut self, s: impl Into<String>) {
        *self = Value::String(s.into());
    }

    /// Replace this value's tag and payload with an empty array.
    pub fn to_array(&mut self) {
        *self = Value::Array(Vec::new());
    }

    /// Replace this value's tag and payload with an empty object.
    pub fn to_object(&mut self) {
        *self = Value::Object(OrderedMap::new());
    }

    /// Replace this value's tag and payload with `Null`.
    pub fn to_null(&mut self) {
        *self = Value::Null;
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::Array(v)
    }
}

impl From<OrderedMap> for Value {
    fn from(m: OrderedMap) -> Self {
        Value::Object(m)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn default_is_null() {
        assert_eq!(Value::default(), Value::Null);
    }

    #[test]
    fn predicates_never_fail() {
        let v = Value::Boolean(true);
        assert!(v.is_boolean());
        assert!(v.not_array());
        assert!(!v.is_null());
    }

    #[test]
    fn accessor_mismatch_is_wrong_type() {
        let v = Value::Boolean(true);
        let err = v.as_string().unwrap_err();
        assert_eq!(err.expected, "string");
        assert_eq!(err.found, "boolean");
    }

    #[test]
    fn coercion_replaces_tag_and_payload() {
        let mut v = Value::Number("1".into());
        v.to_array();
        assert!(v.is_array());
        assert_eq!(v.as_array().unwrap(), &Vec::<Value>::new());
    }

    #[test]
    fn in_place_mutation_preserves_tag() {
        let mut v = Value::Array(vec![Value::Null]);
        v.as_array_mut().unwrap().push(Value::Boolean(false));
        assert_eq!(v.as_array().unwrap().len(), 2);
    }
}

use fsmjson::{
    base64_decode, base64_encode, parse, parse_with_options, to_json, to_json_with_style,
    ParserOptionsBuilder, Value, WhitespaceStyle,
};

#[test]
fn object_with_mixed_value_types() {
    let json = r#"{"name": "Elvis", "age": 42, "hits": [1, 2, 3], "retired": true, "manager": null}"#;
    let value = parse(json.as_bytes());

    let obj = value.as_object().unwrap();
    assert_eq!(obj.get("name"), Some(&Value::String("Elvis".into())));
    assert_eq!(obj.get("age"), Some(&Value::Number("42".into())));
    assert_eq!(obj.get("retired"), Some(&Value::Boolean(true)));
    assert_eq!(obj.get("manager"), Some(&Value::Null));
    assert_eq!(
        obj.get("hits"),
        Some(&Value::Array(vec![
            Value::Number("1".into()),
            Value::Number("2".into()),
            Value::Number("3".into()),
        ]))
    );
}

#[test]
fn compact_emit_round_trips_canonical_text() {
    let json = r#"{"a":1,"b":[true,null,"x"]}"#;
    let value = parse(json.as_bytes());
    assert_eq!(to_json(&value), json);
}

#[test]
fn whitespace_is_irrelevant_to_the_parsed_value() {
    let tight = parse(br#"{"a":1,"b":2}"#);
    let loose = parse(b" {\n  \"a\" : 1 ,\n  \"b\" : 2\n} \t");
    assert_eq!(tight, loose);
}

#[test]
fn ill_formed_utf8_survives_a_decode_then_encode_cycle() {
    // Bytes that are not valid UTF-8 cannot appear inside a JSON text
    // literal directly; this checks that the encoder's hex-escaping and the
    // parser's `\u` decoding compose into a faithful representation of the
    // original bytes at the `String` level.
    let raw = [b'n', b'a', 0xFFu8, b'v', b'e'];
    let encoded = fsmjson::encode_string(&raw);
    let parsed = parse(encoded.as_bytes());
    assert_eq!(
        parsed.as_string().unwrap().as_bytes(),
        &[b'n', b'a', 0xC3, 0xBF, b'v', b'e']
    );
}

#[test]
fn base64_round_trips_through_the_public_api() {
    let encoded = base64_encode(b"hello, world");
    assert_eq!(base64_decode(encoded.as_bytes()).unwrap(), b"hello, world");
}

#[test]
fn depth_exceeding_configured_maximum_is_reported_as_a_value_error() {
    let options = ParserOptionsBuilder::default().with_max_depth(3).build();
    let value = parse_with_options(b"[[[[1]]]]", options);
    assert!(value.is_error());
}

#[test]
fn indented_emit_nests_and_then_reparses_to_the_same_value() {
    let original = parse(br#"{"a":[1,2],"b":{}}"#);
    let pretty = to_json_with_style(&original, WhitespaceStyle::SpaceLf);
    let reparsed = parse(pretty.as_bytes());
    assert_eq!(original, reparsed);
}

#[test]
fn object_keys_keep_insertion_order_after_parsing() {
    let value = parse(br#"{"z":1,"a":2,"m":3}"#);
    let obj = value.as_object().unwrap();
    assert_eq!(obj.keys().collect::<Vec<_>>(), vec!["z", "a", "m"]);
}

#[test]
fn sorting_an_object_after_parsing_does_not_invalidate_lookups() {
    let value = parse(br#"{"z":1,"a":2,"m":3}"#);
    let mut obj = value.as_object().unwrap().clone();
    obj.sort();
    assert_eq!(obj.keys().collect::<Vec<_>>(), vec!["a", "m", "z"]);
    assert_eq!(obj.get("z"), Some(&Value::Number("1".into())));
}

#[test]
fn malformed_input_yields_an_error_value_not_a_panic() {
    for bad in [&b"{"[..], b"[1,]", b"tru", br#"{"a":}"#, b""] {
        let value = parse(bad);
        assert!(value.is_error(), "expected error for {bad:?}, got {value:?}");
    }
}

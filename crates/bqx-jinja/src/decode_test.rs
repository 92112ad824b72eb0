use super::*;

fn b64(text: &str) -> String {
    STANDARD.encode(text.as_bytes())
}

#[test]
fn test_decode_variables_object() {
    let vars = decode_variables(r#"{"country": "NL", "limit": 10, "tags": ["a", "b"]}"#);
    assert_eq!(vars.len(), 3);
    assert_eq!(vars["country"], "NL");
    assert_eq!(vars["limit"], 10);
    assert_eq!(vars["tags"], serde_json::json!(["a", "b"]));
}

#[test]
fn test_decode_variables_empty_object() {
    assert!(decode_variables("{}").is_empty());
}

#[test]
fn test_decode_variables_equals_parsed_object() {
    let raw = r#"{"nested": {"x": [1, 2.5, null]}, "flag": false}"#;
    let expected: serde_json::Value = serde_json::from_str(raw).unwrap();
    let vars = decode_variables(raw);
    assert_eq!(serde_json::Value::Object(vars), expected);
}

#[test]
fn test_decode_variables_malformed_falls_back_to_empty() {
    for raw in ["", "{", "not json", "{'single': 'quotes'}", r#"{"a": 1,}"#] {
        assert!(decode_variables(raw).is_empty(), "expected empty for {raw:?}");
        assert!(matches!(
            try_decode_variables(raw),
            Err(DecodeError::InvalidJson(_))
        ));
    }
}

#[test]
fn test_decode_variables_non_object_falls_back_to_empty() {
    for raw in ["[1, 2]", "42", "\"text\"", "null", "true"] {
        assert!(decode_variables(raw).is_empty(), "expected empty for {raw:?}");
        assert!(matches!(
            try_decode_variables(raw),
            Err(DecodeError::NotAnObject { .. })
        ));
    }
}

#[test]
fn test_not_an_object_message() {
    let err = try_decode_variables("[1]").unwrap_err();
    assert_eq!(
        err.to_string(),
        "[J102] Variables payload must be a JSON object, found an array"
    );
}

#[test]
fn test_decode_sql_base64() {
    let sql = "SELECT *\nFROM `proj.ds.orders`\nWHERE day = '{{ today_dash }}'";
    assert_eq!(decode_sql(&b64(sql)), sql);
}

#[test]
fn test_decode_sql_base64_special_characters() {
    let sql = "SELECT 'ünïcødé', \"quoted\", $1 -- comment; `backticks`";
    assert_eq!(decode_sql(&b64(sql)), sql);
}

#[test]
fn test_decode_sql_wrapped_base64() {
    let sql = "SELECT column_one, column_two, column_three FROM a_rather_long_table_name";
    let encoded = b64(sql);
    let wrapped = format!("{}\n{}\n", &encoded[..40], &encoded[40..]);
    assert_eq!(decode_sql(&wrapped), sql);
}

#[test]
fn test_decode_sql_plain_text_unchanged() {
    for raw in [
        "SELECT 1 AS x",
        "SELECT * FROM t WHERE a = 'b'",
        "select\n  1",
        "{{ sql }}",
    ] {
        assert_eq!(decode_sql(raw), raw);
    }
}

#[test]
fn test_decode_sql_invalid_utf8_unchanged() {
    // Valid base64 of the bytes 0xff 0xfe 0xfd
    let raw = "//79";
    assert!(matches!(
        try_decode_sql(raw),
        Err(DecodeError::InvalidUtf8(_))
    ));
    assert_eq!(decode_sql(raw), raw);
}

#[test]
fn test_decode_sql_invalid_alphabet() {
    assert!(matches!(
        try_decode_sql("SELECT 1"),
        Err(DecodeError::InvalidBase64(_))
    ));
}

#[test]
fn test_decode_sql_empty() {
    assert!(matches!(try_decode_sql(""), Err(DecodeError::EmptySql)));
    assert!(matches!(try_decode_sql("\n"), Err(DecodeError::EmptySql)));
    assert_eq!(decode_sql(""), "");
    assert_eq!(decode_sql("\n"), "\n");
}

#![allow(missing_docs)]

mod common;

use std::io::Cursor;

use quickjson::{
    BigInt, DEFAULT_CHUNK_SIZE, DEFAULT_MAX_TOKEN_SIZE, ParserOptions, TokenKind, Value,
    parse_reader, parse_str,
};

use crate::common::{CONFIG, CONFIG_COMPACT};

#[test_log::test]
fn config_document() {
    let root = parse_str(CONFIG, ParserOptions::default()).unwrap();
    assert_eq!(root.to_string(), CONFIG_COMPACT);

    let service = root.get("service").unwrap();
    assert_eq!(service.get("replicas").unwrap().value().as_i64(), Some(3));
    assert_eq!(service.get("ratio").unwrap().value().as_f64(), Some(0.75));
    assert!(service.get("owner").unwrap().value().is_null());

    let limits = root.get("limits").unwrap().value().as_array().unwrap();
    let kinds: Vec<TokenKind> = limits.iter().map(quickjson::Token::kind).collect();
    assert_eq!(
        kinds,
        [
            TokenKind::Integer,
            TokenKind::Integer,
            TokenKind::UnsignedInteger,
            TokenKind::BigInteger
        ]
    );
    assert_eq!(
        limits[3].value(),
        &Value::BigInteger(BigInt::from(u128::MAX) + 1u32)
    );

    let routes = root.get("routes").unwrap();
    assert_eq!(
        routes.index(1).and_then(|r| r.get("path")).unwrap().value().as_str(),
        Some("/v1/items/{id}")
    );
    assert_eq!(
        root.get("banner").unwrap().value().as_str(),
        Some("caf\u{e9} \"quoted\"\ttabbed")
    );
}

#[test]
fn reader_matches_str() {
    let expected = parse_str(CONFIG, ParserOptions::default()).unwrap();
    for chunk_size in [8, 13, 32, 100, DEFAULT_CHUNK_SIZE] {
        let streamed = parse_reader(
            Cursor::new(CONFIG),
            ParserOptions::default(),
            chunk_size,
            DEFAULT_MAX_TOKEN_SIZE,
        )
        .unwrap();
        assert_eq!(streamed, expected, "chunk size {chunk_size}");
    }
}

#[test]
fn matches_serde_json_on_serde_representable_input() {
    let text = r#"{"a":[1,2,{"b":3}],"c":"dé","e":-0.5,"f":[true,false,null]}"#;
    let ours = parse_str(text, ParserOptions::default()).unwrap();
    let theirs: serde_json::Value = serde_json::from_str(text).unwrap();
    assert_eq!(ours.to_string(), serde_json::to_string(&theirs).unwrap());
}

#[test]
fn diagnostic_line() {
    let text = "{\n  \"a\": [1, 2,],\n  \"b\": 2\n}";
    let err = parse_str(text, ParserOptions::default()).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @r#"JSON trailing comma at 16   "a": [1, 2,] <ERROR> ,"#);

    let relaxed = ParserOptions {
        allow_trailing_commas: true,
        ..Default::default()
    };
    let root = parse_str(text, relaxed).unwrap();
    insta::assert_snapshot!(root.to_string(), @r#"{"a":[1,2],"b":2}"#);
}

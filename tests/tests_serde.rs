#![cfg(feature = "serde")]

use fml::{Parse, parse};

#[test]
fn test_parse_round_trips_through_json() {
    let parse = parse("Smith (Smyth)\n\nAnn + Bob = 1. Cid\n2. Dee? // twins\n");

    let json = serde_json::to_string(&parse).unwrap();
    let back: Parse = serde_json::from_str(&json).unwrap();

    assert_eq!(back, parse);
}

#[test]
fn test_token_kinds_serialize_by_name() {
    let parse = parse("Ann = Bob");
    let json = serde_json::to_value(&parse.tokens[0]).unwrap();

    assert_eq!(json["kind"], "Name");
    assert_eq!(json["text"], "Ann");
}

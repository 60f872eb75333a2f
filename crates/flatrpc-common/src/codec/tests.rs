//! Tests for the path codec over structured values
//!
//! These tests verify flattening, rebuilding and path layout of nested
//! structured types declared with `structured!`.

use super::*;
use crate::protocol::FlatrpcError;
use crate::structured;
use std::collections::HashSet;

structured! {
    #[derive(Debug, Clone, Default, PartialEq)]
    pub struct Point {
        pub x: i32,
        pub y: i32,
    }
}

structured! {
    #[derive(Debug, Clone, Default, PartialEq)]
    pub struct Segment {
        pub from: Point,
        pub to: Point,
    }
}

structured! {
    #[derive(Debug, Clone, Default, PartialEq)]
    pub struct Profile {
        pub name: String,
        pub initial: char,
        pub active: bool,
        pub score: f64,
        pub visits: u64,
        pub home: Point,
    }
}

structured! {
    #[derive(Debug, Clone, Default, PartialEq)]
    struct Empty {}
}

fn params(pairs: &[(&str, &str)]) -> Parameters {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn sample_profile() -> Profile {
    Profile {
        name: "Ada Lovelace".to_string(),
        initial: 'A',
        active: true,
        score: -12.625,
        visits: 18_446_744_073_709_551_615,
        home: Point { x: -7, y: 42 },
    }
}

#[test]
fn test_point_encodes_under_parameter_name() {
    let encoded = encode("p", &Point { x: 1, y: 2 }).unwrap();
    assert_eq!(encoded, params(&[("p.x", "1"), ("p.y", "2")]));
}

#[test]
fn test_structured_kind() {
    assert_eq!(kind_of(&Point::default()), Kind::Structured);
    assert_eq!(kind_of_type::<Segment>(), Kind::Structured);
}

#[test]
fn test_declared_field_order() {
    assert_eq!(<Point as Structured>::FIELDS, &["x", "y"]);
    assert_eq!(
        <Profile as Structured>::FIELDS,
        &["name", "initial", "active", "score", "visits", "home"]
    );
}

#[test]
fn test_nested_paths() {
    let seg = Segment {
        from: Point { x: 1, y: 2 },
        to: Point { x: 3, y: 4 },
    };
    let encoded = encode("seg", &seg).unwrap();
    assert_eq!(
        encoded,
        params(&[
            ("seg.from.x", "1"),
            ("seg.from.y", "2"),
            ("seg.to.x", "3"),
            ("seg.to.y", "4"),
        ])
    );
}

#[test]
fn test_structured_round_trip() {
    let profile = sample_profile();
    let encoded = encode("x", &profile).unwrap();
    let decoded: Profile = decode_within("x", &encoded).unwrap();
    assert_eq!(decoded, profile);
}

#[test]
fn test_nested_round_trip() {
    let seg = Segment {
        from: Point { x: i32::MIN, y: 0 },
        to: Point { x: i32::MAX, y: -1 },
    };
    let decoded: Segment = decode_within("s", &encode("s", &seg).unwrap()).unwrap();
    assert_eq!(decoded, seg);
}

#[test]
fn test_encode_produces_unique_paths() {
    let encoded = encode("profile", &sample_profile()).unwrap();
    let keys: HashSet<_> = encoded.keys().collect();
    assert_eq!(keys.len(), encoded.len());
    // name, initial, active, score, visits, home.x, home.y
    assert_eq!(encoded.len(), 7);
}

#[test]
fn test_terminal_round_trips() {
    fn check<T: Encode + Decode + PartialEq + std::fmt::Debug>(value: T) {
        let encoded = encode("x", &value).unwrap();
        let decoded: T = decode_within("x", &encoded).unwrap();
        assert_eq!(decoded, value);
    }

    check(true);
    check(false);
    check('z');
    check('\u{1F980}');
    check(i8::MIN);
    check(i16::MAX);
    check(-123_456i32);
    check(i64::MIN);
    check(i128::MAX);
    check(isize::MIN);
    check(u8::MAX);
    check(u16::MAX);
    check(u32::MAX);
    check(u64::MAX);
    check(u128::MAX);
    check(usize::MAX);
    check(0.1f32);
    check(f32::MIN_POSITIVE);
    check(1e300f64);
    check(-0.000_001f64);
    check(f64::INFINITY);
    check(String::from("hello world"));
    check(String::new());
    check(String::from("with.dots = and spaces"));
    check(());
}

#[test]
fn test_nan_survives_round_trip() {
    let encoded = encode("x", &f64::NAN).unwrap();
    let decoded: f64 = decode_within("x", &encoded).unwrap();
    assert!(decoded.is_nan());
}

#[test]
fn test_missing_field_names_the_field() {
    let err = decode_within::<Point>("p", &params(&[("p.x", "1")])).unwrap_err();
    match err {
        FlatrpcError::Decoding(msg) => assert!(msg.contains("Point.y"), "{}", msg),
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_unparseable_field_is_a_decoding_error() {
    let err = decode_within::<Point>("p", &params(&[("p.x", "one"), ("p.y", "2")])).unwrap_err();
    assert!(matches!(err, FlatrpcError::Decoding(_)));
}

#[test]
fn test_extra_keys_are_ignored() {
    let decoded: Point =
        decode_within("p", &params(&[("p.x", "1"), ("p.y", "2"), ("p.z", "3")])).unwrap();
    assert_eq!(decoded, Point { x: 1, y: 2 });
}

#[test]
fn test_sibling_prefixes_do_not_collide() {
    // "p" and "pp" share a textual prefix but not a segment
    let mut all = encode("p", &Point { x: 1, y: 2 }).unwrap();
    all.extend(encode("pp", &Point { x: 3, y: 4 }).unwrap());

    let p: Point = decode_within("p", &all).unwrap();
    let pp: Point = decode_within("pp", &all).unwrap();
    assert_eq!(p, Point { x: 1, y: 2 });
    assert_eq!(pp, Point { x: 3, y: 4 });
}

#[test]
fn test_empty_structured_value_encodes_nothing() {
    assert!(encode("e", &Empty::default()).unwrap().is_empty());
    assert!(decode::<Empty>(&Parameters::new()).is_err());
}

#[test]
fn test_structured_with_empty_base() {
    let encoded = encode("", &Point { x: 5, y: 6 }).unwrap();
    assert_eq!(encoded, params(&[("x", "5"), ("y", "6")]));
    assert_eq!(decode::<Point>(&encoded).unwrap(), Point { x: 5, y: 6 });
}

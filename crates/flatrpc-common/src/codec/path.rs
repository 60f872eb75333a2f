use std::ops::Bound;

use super::wire::{Decode, Encode};
use super::{Parameters, SEPARATOR};
use crate::protocol::{FlatrpcError, Result};

/// Flattens `value` into pairs rooted at `base`.
///
/// # Example
///
/// ```
/// use flatrpc_common::codec;
///
/// let params = codec::encode("dx", &3i32).unwrap();
/// assert_eq!(params.get("dx").map(String::as_str), Some("3"));
/// ```
pub fn encode<T: Encode + ?Sized>(base: &str, value: &T) -> Result<Parameters> {
    let mut out = Parameters::new();
    value.encode_into(base, &mut out)?;
    Ok(out)
}

/// Rebuilds a `T` from pairs whose keys are already relative to `T`.
///
/// # Errors
///
/// Returns `FlatrpcError::Decoding` if:
/// - `params` is empty and `T` is not the unit type
/// - a terminal value is missing or cannot be parsed
/// - a field of a structured value cannot be decoded
pub fn decode<T: Decode>(params: &Parameters) -> Result<T> {
    if params.is_empty() && !T::ACCEPTS_EMPTY {
        return Err(FlatrpcError::Decoding(format!(
            "expected parameters for {} but none were supplied",
            std::any::type_name::<T>()
        )));
    }
    T::decode_from(params)
}

/// Strips `prefix` from `params` and decodes the remainder.
pub fn decode_within<T: Decode>(prefix: &str, params: &Parameters) -> Result<T> {
    decode(&strip_prefix(prefix, params))
}

/// Joins a base path and a field name. An empty base yields the field alone.
pub fn join(base: &str, field: &str) -> String {
    if base.is_empty() {
        field.to_string()
    } else {
        format!("{}{}{}", base, SEPARATOR, field)
    }
}

/// Returns the pairs of `params` that live under `prefix`, re-keyed relative
/// to it.
///
/// A key equal to `prefix` maps to the empty key; a key `prefix.rest` maps to
/// `rest`. Matching is per segment, so prefix `x` leaves `xy` alone. An empty
/// prefix returns a copy of everything. The input is never modified.
///
/// # Example
///
/// ```
/// use flatrpc_common::codec::{strip_prefix, Parameters};
///
/// let mut params = Parameters::new();
/// params.insert("p.x".into(), "1".into());
/// params.insert("p.y".into(), "2".into());
/// params.insert("px".into(), "9".into());
///
/// let inner = strip_prefix("p", &params);
/// assert_eq!(inner.len(), 2);
/// assert_eq!(inner.get("x").map(String::as_str), Some("1"));
/// ```
pub fn strip_prefix(prefix: &str, params: &Parameters) -> Parameters {
    if prefix.is_empty() {
        return params.clone();
    }

    // Every key starting with `prefix` sorts at or after it, contiguously
    params
        .range::<str, _>((Bound::Included(prefix), Bound::Unbounded))
        .take_while(|(key, _)| key.starts_with(prefix))
        .filter_map(|(key, value)| {
            let rest = &key[prefix.len()..];
            if rest.is_empty() {
                Some((String::new(), value.clone()))
            } else {
                rest.strip_prefix(SEPARATOR)
                    .map(|sub| (sub.to_string(), value.clone()))
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> Parameters {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_strip_prefix_exact_key_maps_to_empty() {
        let stripped = strip_prefix("result", &params(&[("result", "Ok")]));
        assert_eq!(stripped, params(&[("", "Ok")]));
    }

    #[test]
    fn test_strip_prefix_removes_separator() {
        let stripped = strip_prefix("p", &params(&[("p.x", "1"), ("p.y", "2"), ("q", "3")]));
        assert_eq!(stripped, params(&[("x", "1"), ("y", "2")]));
    }

    #[test]
    fn test_strip_prefix_respects_segment_boundaries() {
        let input = params(&[("x", "1"), ("xy", "2"), ("x.z", "3")]);
        let stripped = strip_prefix("x", &input);
        assert_eq!(stripped, params(&[("", "1"), ("z", "3")]));
    }

    #[test]
    fn test_strip_prefix_nested() {
        let input = params(&[("seg.from.x", "1"), ("seg.from.y", "2"), ("seg.to.x", "3")]);
        let from = strip_prefix("from", &strip_prefix("seg", &input));
        assert_eq!(from, params(&[("x", "1"), ("y", "2")]));
    }

    #[test]
    fn test_strip_prefix_empty_prefix_copies() {
        let input = params(&[("a", "1"), ("b.c", "2")]);
        assert_eq!(strip_prefix("", &input), input);
    }

    #[test]
    fn test_strip_prefix_does_not_mutate_and_is_repeatable() {
        let input = params(&[("p.x", "1"), ("p.y", "2")]);
        let snapshot = input.clone();
        let first = strip_prefix("p", &input);
        let second = strip_prefix("p", &input);
        assert_eq!(first, second);
        assert_eq!(input, snapshot);
    }

    #[test]
    fn test_strip_prefix_no_match_is_empty() {
        assert!(strip_prefix("missing", &params(&[("p.x", "1")])).is_empty());
    }

    #[test]
    fn test_join() {
        assert_eq!(join("p", "x"), "p.x");
        assert_eq!(join("", "x"), "x");
        assert_eq!(join("a.b", "c"), "a.b.c");
    }

    #[test]
    fn test_encode_standalone_terminal_with_empty_base() {
        let out = encode("", &7u16).unwrap();
        assert_eq!(out, params(&[("", "7")]));
    }

    #[test]
    fn test_decode_empty_mapping_fails_for_values() {
        let err = decode::<i32>(&Parameters::new()).unwrap_err();
        assert!(matches!(err, FlatrpcError::Decoding(_)));
    }

    #[test]
    fn test_decode_empty_mapping_succeeds_for_unit() {
        assert!(decode::<()>(&Parameters::new()).is_ok());
    }

    #[test]
    fn test_decode_within_result_prefix() {
        let reply = params(&[("result", "42")]);
        assert_eq!(decode_within::<i64>("result", &reply).unwrap(), 42);
    }
}

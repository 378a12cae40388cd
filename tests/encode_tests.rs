//! Tests for parameter encoding.

use request_helper::{encode, NameValuePair};

mod common;
use common::helpers::*;

#[test]
fn test_empty_query_has_no_question_mark() {
    assert_eq!(encode(&[], false, true), "");
}

#[test]
fn test_documented_examples() {
    assert_eq!(encode(&pairs(&[("a", "1"), ("b", "2")]), true, true), "a=1&b=2");
    assert_eq!(encode(&pairs(&[("a", "1")]), false, true), "?a=1");
    assert_eq!(encode(&pairs(&[("q", "hello world")]), false, true), "?q=hello+world");
}

#[test]
fn test_round_trip_through_standard_decoder() {
    let original = pairs(&[
        ("name", "Jöhn Dœ"),
        ("expr", "1+1=2 & 3/4?"),
        ("empty", ""),
        ("name", "again"),
        ("emoji", "🦀 crab"),
    ]);

    let body = encode(&original, true, true);
    let decoded: Vec<NameValuePair> = form_urlencoded::parse(body.as_bytes())
        .map(|(k, v)| NameValuePair::new(k, v))
        .collect();
    assert_eq!(decoded, original);

    let query = encode(&original, false, true);
    assert_eq!(query.strip_prefix('?'), Some(body.as_str()));
}

#[test]
fn test_segment_count_matches_pair_count() {
    let original = pairs(&[("a", "x&y"), ("b", "=="), ("c", "")]);
    let body = encode(&original, true, true);
    assert_eq!(body.split('&').count(), original.len());
    assert!(body.split('&').all(|segment| segment.contains('=')));
}

#[test]
fn test_distinct_inputs_give_distinct_outputs() {
    let one = encode(&pairs(&[("a", "1&b=2")]), true, true);
    let two = encode(&pairs(&[("a", "1"), ("b", "2")]), true, true);
    assert_ne!(one, two);
}

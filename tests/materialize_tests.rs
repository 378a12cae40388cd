//! Tests for entity materialization and release discipline.

use request_helper::response::MAX_BULK_LENGTH;
use request_helper::{entity_to_string, Body, Entity, Error};

mod common;
use common::helpers::*;

#[tokio::test]
async fn test_absent_entity_fails() {
    let err = entity_to_string(None).await.unwrap_err();
    assert!(matches!(err, Error::EmptyEntity));
}

#[tokio::test]
async fn test_known_length_matches_source_bytes() {
    let counter = ReleaseCounter::default();
    let entity = counter.track(Entity::from_bytes(TEST_BODY));

    let body = entity_to_string(Some(entity)).await.unwrap();

    assert_eq!(body, Body::Complete(TEST_BODY.to_string()));
    assert_eq!(counter.count(), 1);
}

#[tokio::test]
async fn test_known_length_split_over_chunks() {
    let entity = chunked_entity(Some(TEST_BODY.len() as u64), &[&TEST_BODY[..4], &TEST_BODY[4..]]);
    let body = entity_to_string(Some(entity)).await.unwrap();
    assert_eq!(body.to_string(), TEST_BODY);
}

#[tokio::test]
async fn test_unknown_length_concatenates_lines() {
    let counter = ReleaseCounter::default();
    let entity = counter.track(chunked_entity(None, &[TEST_BODY]));

    let body = entity_to_string(Some(entity)).await.unwrap();

    assert_eq!(
        body,
        Body::Streamed("first linesecond linethird line".to_string())
    );
    assert_eq!(counter.count(), 1);
}

#[tokio::test]
async fn test_lines_split_across_chunks() {
    let entity = chunked_entity(None, &["par", "tial\r", "\nrest"]);
    let body = entity_to_string(Some(entity)).await.unwrap();
    assert_eq!(body.to_string(), "partialrest");
}

#[tokio::test]
async fn test_oversized_length_uses_streaming() {
    let entity = chunked_entity(Some(MAX_BULK_LENGTH + 1), &["a\nb"]);
    let body = entity_to_string(Some(entity)).await.unwrap();
    assert_eq!(body, Body::Streamed("ab".to_string()));
}

#[tokio::test]
async fn test_stream_error_becomes_diagnostic_text() {
    let counter = ReleaseCounter::default();
    let entity = counter.track(failing_entity(
        None,
        &["some\n", "data"],
        "connection reset by peer",
    ));

    let body = entity_to_string(Some(entity)).await.unwrap();

    assert!(body.is_failed());
    assert!(body
        .to_string()
        .ends_with("Stream has experienced an io exception connection reset by peer"));
    assert_eq!(counter.count(), 1);
}

#[tokio::test]
async fn test_bulk_error_still_releases() {
    let counter = ReleaseCounter::default();
    let entity = counter.track(failing_entity(Some(100), &["abc"], "boom"));

    let err = entity_to_string(Some(entity)).await.unwrap_err();

    assert!(matches!(err, Error::IOError { .. }));
    assert_eq!(counter.count(), 1);
}

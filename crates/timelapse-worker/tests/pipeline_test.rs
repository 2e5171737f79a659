//! End-to-end runs against a mocked camera and an in-memory bucket.
//!
//! Run with: `cargo test -p timelapse-worker --test pipeline_test`

mod helpers;

use chrono::{TimeZone, Utc};
use helpers::{camera_server, mock_camera, orchestrator_for, CameraBehaviour};
use image::{GenericImageView, ImageFormat};
use timelapse_core::{ErrorMetadata, PipelineError};
use timelapse_storage::MemoryStorage;
use timelapse_worker::{RunOutcome, RunState};

#[tokio::test]
async fn test_full_run_archives_first_frame() {
    let mut server = camera_server().await;
    let mocks = mock_camera(&mut server, CameraBehaviour::default()).await;
    let storage = MemoryStorage::new();
    let orchestrator = orchestrator_for(&server, &storage);

    let outcome = orchestrator.run_once().await.unwrap();

    let RunOutcome::Completed { filename } = outcome else {
        panic!("expected a completed run, got {:?}", outcome);
    };
    assert_eq!(filename.to_string(), "000001.jpg");

    mocks.initialize.assert_async().await;
    mocks.shutter.assert_async().await;
    mocks.media_list.assert_async().await;
    mocks.capture.assert_async().await;
    mocks.delete.assert_async().await;

    let stored = storage.get("000001.jpg").unwrap();
    assert_eq!(stored.content_type, "image/jpeg");
    assert_eq!(image::guess_format(&stored.data).unwrap(), ImageFormat::Jpeg);
    let decoded = image::load_from_memory(&stored.data).unwrap();
    assert_eq!(decoded.dimensions(), (320, 240));

    assert_eq!(orchestrator.state(), RunState::Idle);
}

#[tokio::test]
async fn test_run_continues_existing_sequence() {
    let mut server = camera_server().await;
    mock_camera(&mut server, CameraBehaviour::default()).await;
    let storage = MemoryStorage::new();
    storage.insert("000001.jpg", vec![1u8], Utc.timestamp_opt(1_700_000_000, 0).unwrap());
    storage.insert("000004.jpg", vec![4u8], Utc.timestamp_opt(1_700_000_300, 0).unwrap());
    storage.insert("000002.jpg", vec![2u8], Utc.timestamp_opt(1_700_000_100, 0).unwrap());
    let orchestrator = orchestrator_for(&server, &storage);

    let outcome = orchestrator.run_once().await.unwrap();

    assert!(matches!(outcome, RunOutcome::Completed { filename } if filename.counter() == 5));
    assert!(storage.get("000005.jpg").is_some());
}

#[tokio::test]
async fn test_shutter_failure_is_fatal_and_stops_the_run() {
    let mut server = camera_server().await;
    let mocks = mock_camera(
        &mut server,
        CameraBehaviour {
            shutter: 500,
            ..Default::default()
        },
    )
    .await;
    let storage = MemoryStorage::new();
    let orchestrator = orchestrator_for(&server, &storage);

    let err = orchestrator.run_once().await.unwrap_err();

    assert!(matches!(err, PipelineError::CameraUnavailable(_)));
    assert_eq!(err.error_code(), "CAMERA_UNAVAILABLE");
    assert!(err.is_fatal());

    mocks.initialize.assert_async().await;
    mocks.shutter.assert_async().await;
    assert!(!mocks.media_list.matched_async().await);
    assert!(!mocks.capture.matched_async().await);
    assert!(!mocks.delete.matched_async().await);
    assert!(storage.is_empty());

    assert_eq!(orchestrator.state(), RunState::Terminated);
}

#[tokio::test]
async fn test_empty_media_list_is_parse_error() {
    let mut server = camera_server().await;
    server
        .mock("GET", "/camera/CM")
        .match_query(helpers::token())
        .with_status(200)
        .create_async()
        .await;
    server
        .mock("GET", "/camera/SH")
        .match_query(helpers::token())
        .with_status(200)
        .create_async()
        .await;
    server
        .mock("GET", "/gp/gpMediaList")
        .with_status(200)
        .with_body(r#"{"media":[]}"#)
        .create_async()
        .await;
    let delete = server
        .mock("GET", "/camera/DL")
        .match_query(helpers::token())
        .with_status(200)
        .create_async()
        .await;
    let storage = MemoryStorage::new();
    let orchestrator = orchestrator_for(&server, &storage);

    let err = orchestrator.run_once().await.unwrap_err();

    assert!(matches!(err, PipelineError::Parse(_)));
    assert!(!delete.matched_async().await);
    assert!(storage.is_empty());
}

#[tokio::test]
async fn test_capture_fetch_failure_keeps_capture_on_camera() {
    let mut server = camera_server().await;
    let mocks = mock_camera(
        &mut server,
        CameraBehaviour {
            capture: 404,
            ..Default::default()
        },
    )
    .await;
    let storage = MemoryStorage::new();
    let orchestrator = orchestrator_for(&server, &storage);

    let err = orchestrator.run_once().await.unwrap_err();

    assert!(matches!(err, PipelineError::Composite(_)));
    assert!(!mocks.delete.matched_async().await);
    assert!(storage.is_empty());
}

#[tokio::test]
async fn test_upload_failure_keeps_capture_on_camera() {
    let mut server = camera_server().await;
    let mocks = mock_camera(&mut server, CameraBehaviour::default()).await;
    let storage = MemoryStorage::new();
    storage.set_fail_put(true);
    let orchestrator = orchestrator_for(&server, &storage);

    let err = orchestrator.run_once().await.unwrap_err();

    assert!(matches!(err, PipelineError::Storage(_)));
    mocks.capture.assert_async().await;
    assert!(!mocks.delete.matched_async().await);
}

#[tokio::test]
async fn test_delete_failure_after_upload_is_fatal() {
    let mut server = camera_server().await;
    mock_camera(
        &mut server,
        CameraBehaviour {
            delete: 503,
            ..Default::default()
        },
    )
    .await;
    let storage = MemoryStorage::new();
    let orchestrator = orchestrator_for(&server, &storage);

    let err = orchestrator.run_once().await.unwrap_err();

    assert!(matches!(err, PipelineError::CameraUnavailable(_)));
    // The frame is already archived when the delete fails.
    assert_eq!(storage.keys(), vec!["000001.jpg"]);
    assert_eq!(orchestrator.state(), RunState::Terminated);
}

//! Shared setup for worker integration tests.
//!
//! The camera is a single mockito server that serves both the control
//! endpoints and the media port; the archive is an in-memory bucket.

#![allow(dead_code)]

pub mod fixtures;

use mockito::{Matcher, Mock, Server, ServerGuard};
use std::sync::Arc;
use timelapse_camera::CameraClient;
use timelapse_processing::{BitmapFont, TimestampCompositor};
use timelapse_storage::{Archiver, MemoryStorage};
use timelapse_worker::Orchestrator;

pub const TOKEN: &str = "goprohero";

pub const MEDIA_LIST: &str = r#"{"media":[{"d":"100GOPRO","fs":[{"n":"GOPR0001.JPG"}]}]}"#;
pub const CAPTURE_PATH: &str = "/videos/DCIM/100GOPRO/GOPR0001.JPG";

/// One mock per camera endpoint touched by a run.
pub struct CameraMocks {
    pub initialize: Mock,
    pub shutter: Mock,
    pub media_list: Mock,
    pub capture: Mock,
    pub delete: Mock,
}

/// Status codes returned by each mocked camera endpoint.
#[derive(Debug, Clone, Copy)]
pub struct CameraBehaviour {
    pub initialize: usize,
    pub shutter: usize,
    pub media_list: usize,
    pub capture: usize,
    pub delete: usize,
}

impl Default for CameraBehaviour {
    fn default() -> Self {
        Self {
            initialize: 200,
            shutter: 200,
            media_list: 200,
            capture: 200,
            delete: 200,
        }
    }
}

pub fn token() -> Matcher {
    Matcher::UrlEncoded("t".into(), TOKEN.into())
}

pub async fn mock_camera(server: &mut ServerGuard, behaviour: CameraBehaviour) -> CameraMocks {
    let initialize = server
        .mock("GET", "/camera/CM")
        .match_query(token())
        .with_status(behaviour.initialize)
        .create_async()
        .await;

    let shutter = server
        .mock("GET", "/camera/SH")
        .match_query(token())
        .with_status(behaviour.shutter)
        .create_async()
        .await;

    let media_list = server
        .mock("GET", "/gp/gpMediaList")
        .with_status(behaviour.media_list)
        .with_header("content-type", "application/json")
        .with_body(MEDIA_LIST)
        .create_async()
        .await;

    let capture = server
        .mock("GET", CAPTURE_PATH)
        .with_status(behaviour.capture)
        .with_header("content-type", "image/jpeg")
        .with_body(fixtures::jpeg(320, 240))
        .create_async()
        .await;

    let delete = server
        .mock("GET", "/camera/DL")
        .match_query(token())
        .with_status(behaviour.delete)
        .create_async()
        .await;

    CameraMocks {
        initialize,
        shutter,
        media_list,
        capture,
        delete,
    }
}

pub async fn camera_server() -> ServerGuard {
    Server::new_async().await
}

pub fn orchestrator_for(server: &ServerGuard, storage: &MemoryStorage) -> Orchestrator {
    let camera = CameraClient::new(server.url(), server.url(), TOKEN).unwrap();
    let compositor = TimestampCompositor::new(BitmapFont::new(2)).unwrap();
    Orchestrator::new(
        Arc::new(camera),
        Arc::new(compositor),
        Archiver::new(Arc::new(storage.clone())),
    )
}

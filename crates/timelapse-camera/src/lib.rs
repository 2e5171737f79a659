//! Timelapse Camera Library
//!
//! Client for the camera's HTTP control plane: power-on, shutter, media
//! listing and deletion of the newest capture.
//!
//! # Endpoints
//!
//! Control endpoints live on the camera's default HTTP port and take the shared
//! token as the `t` query parameter. The media list and the raw captures are
//! served from a secondary port without authentication.

pub mod client;
pub mod error;
pub mod media_list;
pub mod traits;

pub use client::CameraClient;
pub use error::{CameraError, CameraResult};
pub use media_list::MediaList;
pub use traits::CameraControl;

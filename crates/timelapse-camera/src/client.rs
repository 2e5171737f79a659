use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use timelapse_core::{Config, MediaReference};

use crate::error::{CameraError, CameraResult};
use crate::media_list::MediaList;
use crate::traits::CameraControl;

const INITIALIZE: &str = "initialize";
const SHUTTER: &str = "shutter";
const MEDIA_LIST: &str = "media list";
const DELETE: &str = "delete";

/// Value of the `p` parameter that switches a camera setting on (`%01`).
const ENABLE: &str = "\u{1}";

/// HTTP client for the camera's control plane.
///
/// No request timeout is configured: a camera that stops answering stalls the
/// current run until the process is restarted.
#[derive(Clone)]
pub struct CameraClient {
    http: Client,
    control_url: String,
    media_url: String,
    token: String,
}

impl CameraClient {
    /// Create a new CameraClient
    ///
    /// # Arguments
    /// * `control_url` - Base URL of the `/camera/...` endpoints (e.g. "http://10.5.5.9")
    /// * `media_url` - Base URL of the media list and captures (e.g. "http://10.5.5.9:8080")
    /// * `token` - Shared secret sent as the `t` query parameter
    pub fn new(
        control_url: impl Into<String>,
        media_url: impl Into<String>,
        token: impl Into<String>,
    ) -> reqwest::Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("timelapse/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            control_url: control_url.into().trim_end_matches('/').to_string(),
            media_url: media_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        })
    }

    pub fn from_config(config: &Config) -> reqwest::Result<Self> {
        Self::new(
            config.camera_control_url(),
            config.camera_media_url(),
            config.camera_password.clone(),
        )
    }

    async fn get(
        &self,
        endpoint: &'static str,
        url: String,
        query: &[(&str, &str)],
    ) -> CameraResult<Response> {
        let start = std::time::Instant::now();

        let response = self
            .http
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|source| CameraError::Transport { endpoint, source })?;

        let status = response.status();
        tracing::debug!(
            endpoint,
            status = status.as_u16(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Camera request completed"
        );

        if status != StatusCode::OK {
            return Err(CameraError::UnexpectedStatus {
                endpoint,
                status: status.as_u16(),
            });
        }

        Ok(response)
    }

    /// Issue a control command and discard the response body.
    async fn command(
        &self,
        endpoint: &'static str,
        path: &str,
        query: &[(&str, &str)],
    ) -> CameraResult<()> {
        let url = format!("{}{}", self.control_url, path);
        let response = self.get(endpoint, url, query).await?;
        response
            .bytes()
            .await
            .map_err(|source| CameraError::Transport { endpoint, source })?;
        Ok(())
    }
}

#[async_trait]
impl CameraControl for CameraClient {
    async fn initialize(&self) -> CameraResult<()> {
        self.command(
            INITIALIZE,
            "/camera/CM",
            &[("t", self.token.as_str()), ("p", ENABLE)],
        )
        .await
        .inspect_err(|e| tracing::error!(error = %e, "Unable to initialize camera."))
    }

    async fn trigger_shutter(&self) -> CameraResult<()> {
        self.command(
            SHUTTER,
            "/camera/SH",
            &[("t", self.token.as_str()), ("p", ENABLE)],
        )
        .await
        .inspect_err(|e| tracing::error!(error = %e, "Error taking picture."))?;

        tracing::info!("Picture taken!");
        Ok(())
    }

    async fn locate_latest_media(&self) -> CameraResult<MediaReference> {
        let url = format!("{}/gp/gpMediaList", self.media_url);

        let body = async {
            let response = self.get(MEDIA_LIST, url, &[]).await?;
            response
                .bytes()
                .await
                .map_err(|source| CameraError::Transport {
                    endpoint: MEDIA_LIST,
                    source,
                })
        }
        .await
        .inspect_err(|e| tracing::error!(error = %e, "Error retrieving files."))?;

        let media = MediaList::parse(&body)
            .and_then(|list| list.latest())
            .inspect_err(|e| tracing::error!(error = %e, "Unexpected media list format"))?;

        tracing::debug!(media = %media, "Located latest capture");
        Ok(media)
    }

    async fn delete_latest_capture(&self) -> CameraResult<()> {
        self.command(DELETE, "/camera/DL", &[("t", self.token.as_str())])
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Error deleting picture."))?;

        tracing::info!("Picture deleted!");
        Ok(())
    }

    fn media_url(&self, media: &MediaReference) -> String {
        format!("{}{}", self.media_url, media.dcim_path())
    }
}

use async_trait::async_trait;
use image::codecs::jpeg::JpegEncoder;
use image::ImageReader;
use reqwest::Client;
use std::io::Cursor;
use timelapse_core::{CompositeImage, Timestamp};

use crate::error::{CompositeError, CompositeResult};
use crate::font::BitmapFont;

/// Top-left corner of the timestamp, in pixels
pub const TEXT_ORIGIN: (i32, i32) = (10, 10);
pub const JPEG_QUALITY: u8 = 90;

/// Produces the archived frame for a capture.
#[async_trait]
pub trait Compositor: Send + Sync {
    /// Fetch the capture at `url` and stamp `timestamp` onto it.
    async fn composite(&self, url: &str, timestamp: &Timestamp)
        -> CompositeResult<CompositeImage>;
}

/// Decode `raw`, draw `text` at [`TEXT_ORIGIN`] and encode the result as JPEG.
pub fn overlay_timestamp(raw: &[u8], text: &str, font: &BitmapFont) -> CompositeResult<Vec<u8>> {
    let reader = ImageReader::new(Cursor::new(raw))
        .with_guessed_format()
        .map_err(|e| CompositeError::Decode(e.to_string()))?;
    let mut frame = reader
        .decode()
        .map_err(|e| CompositeError::Decode(e.to_string()))?
        .to_rgb8();

    font.draw(&mut frame, TEXT_ORIGIN.0, TEXT_ORIGIN.1, text)?;

    let mut buffer = Vec::new();
    JpegEncoder::new_with_quality(&mut buffer, JPEG_QUALITY)
        .encode_image(&frame)
        .map_err(|e| CompositeError::Encode(e.to_string()))?;

    Ok(buffer)
}

/// Compositor that downloads the capture over HTTP.
#[derive(Clone)]
pub struct TimestampCompositor {
    http: Client,
    font: BitmapFont,
}

impl TimestampCompositor {
    pub fn new(font: BitmapFont) -> reqwest::Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("timelapse/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http, font })
    }

    async fn fetch(&self, url: &str) -> CompositeResult<Vec<u8>> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| CompositeError::Fetch(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CompositeError::Fetch(format!("{} returned HTTP {}", url, status)));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| CompositeError::Fetch(e.to_string()))?;
        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl Compositor for TimestampCompositor {
    #[tracing::instrument(skip(self, timestamp), fields(timestamp = %timestamp))]
    async fn composite(
        &self,
        url: &str,
        timestamp: &Timestamp,
    ) -> CompositeResult<CompositeImage> {
        let start = std::time::Instant::now();

        let raw = self
            .fetch(url)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Error fetching picture."))?;
        let raw_size = raw.len();

        let font = self.font;
        let text = timestamp.as_str().to_string();
        // Decode and encode are CPU-bound; keep them off the async workers.
        let encoded = tokio::task::spawn_blocking(move || overlay_timestamp(&raw, &text, &font))
            .await
            .map_err(|e| CompositeError::Worker(e.to_string()))?
            .inspect_err(|e| tracing::error!(error = %e, "Error adding timestamp."))?;

        tracing::info!(
            raw_size_bytes = raw_size,
            size_bytes = encoded.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Timestamp added"
        );

        Ok(CompositeImage::new(encoded))
    }
}

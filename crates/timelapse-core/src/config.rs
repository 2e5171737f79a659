//! Configuration module
//!
//! Configuration is read once from the environment (after loading an optional
//! `.env` file) and never changes while the process runs. Only the camera
//! token and the bucket are required; everything else has a fixed default.

use std::env;
use std::str::FromStr;
use std::time::Duration;

const CAMERA_HOST: &str = "10.5.5.9";
const CAMERA_MEDIA_PORT: u16 = 8080;
const INTERVAL_SECS: u64 = 60;
const AWS_REGION: &str = "us-east-1";
const AWS_PROFILE: &str = "timelapse";

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" | "pretty" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            _ => Err(anyhow::anyhow!("Invalid log format: {}", s)),
        }
    }
}

#[derive(Clone)]
pub struct Config {
    /// Shared secret passed to the camera as the `t` query parameter
    pub camera_password: String,
    /// Bucket that receives the archived frames
    pub bucket: String,
    pub camera_host: String,
    pub camera_media_port: u16,
    pub interval_secs: u64,
    pub aws_region: String,
    /// Shared credentials file profile; `None` uses the default provider chain
    pub aws_profile: Option<String>,
    /// Custom endpoint for S3-compatible providers (e.g. MinIO)
    pub s3_endpoint: Option<String>,
    pub log_format: LogFormat,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("camera_password", &"<redacted>")
            .field("bucket", &self.bucket)
            .field("camera_host", &self.camera_host)
            .field("camera_media_port", &self.camera_media_port)
            .field("interval_secs", &self.interval_secs)
            .field("aws_region", &self.aws_region)
            .field("aws_profile", &self.aws_profile)
            .field("s3_endpoint", &self.s3_endpoint)
            .field("log_format", &self.log_format)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let camera_password = lookup("TIMELAPSE_CAMERA_PASSWORD")
            .ok_or_else(|| anyhow::anyhow!("TIMELAPSE_CAMERA_PASSWORD must be set"))?;

        let bucket = lookup("TIMELAPSE_BUCKET")
            .ok_or_else(|| anyhow::anyhow!("TIMELAPSE_BUCKET must be set"))?;

        let camera_host =
            lookup("TIMELAPSE_CAMERA_HOST").unwrap_or_else(|| CAMERA_HOST.to_string());

        let camera_media_port = match lookup("TIMELAPSE_CAMERA_MEDIA_PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|e| {
                anyhow::anyhow!("TIMELAPSE_CAMERA_MEDIA_PORT is not a valid port: {}", e)
            })?,
            None => CAMERA_MEDIA_PORT,
        };

        let interval_secs = match lookup("TIMELAPSE_INTERVAL_SECS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|e| {
                anyhow::anyhow!("TIMELAPSE_INTERVAL_SECS is not a valid number: {}", e)
            })?,
            None => INTERVAL_SECS,
        };

        let aws_region = lookup("AWS_REGION").unwrap_or_else(|| AWS_REGION.to_string());

        // An explicitly empty profile opts out of the shared credentials file.
        let aws_profile = match lookup("TIMELAPSE_AWS_PROFILE") {
            Some(p) if p.trim().is_empty() => None,
            Some(p) => Some(p),
            None => Some(AWS_PROFILE.to_string()),
        };

        let s3_endpoint = lookup("S3_ENDPOINT").filter(|e| !e.trim().is_empty());

        let log_format = match lookup("LOG_FORMAT") {
            Some(raw) => raw.parse()?,
            None => LogFormat::default(),
        };

        Ok(Config {
            camera_password,
            bucket,
            camera_host,
            camera_media_port,
            interval_secs,
            aws_region,
            aws_profile,
            s3_endpoint,
            log_format,
        })
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.camera_password.trim().is_empty() {
            return Err(anyhow::anyhow!("TIMELAPSE_CAMERA_PASSWORD cannot be empty"));
        }

        if self.bucket.trim().is_empty() {
            return Err(anyhow::anyhow!("TIMELAPSE_BUCKET cannot be empty"));
        }

        if self.camera_host.trim().is_empty()
            || self.camera_host.contains("://")
            || self.camera_host.contains('/')
        {
            return Err(anyhow::anyhow!(
                "TIMELAPSE_CAMERA_HOST must be a bare host name or IP address, got '{}'",
                self.camera_host
            ));
        }

        if self.interval_secs == 0 {
            return Err(anyhow::anyhow!(
                "TIMELAPSE_INTERVAL_SECS must be greater than zero"
            ));
        }

        Ok(())
    }

    /// Base URL of the camera control endpoints (`/camera/...`)
    pub fn camera_control_url(&self) -> String {
        format!("http://{}", self.camera_host)
    }

    /// Base URL of the media list and raw capture endpoints
    pub fn camera_media_url(&self) -> String {
        format!("http://{}:{}", self.camera_host, self.camera_media_port)
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup_from(&[
            ("TIMELAPSE_CAMERA_PASSWORD", "goprohero"),
            ("TIMELAPSE_BUCKET", "timelapse-frames"),
        ]))
        .unwrap();

        assert_eq!(config.camera_host, "10.5.5.9");
        assert_eq!(config.camera_media_port, 8080);
        assert_eq!(config.interval(), Duration::from_secs(60));
        assert_eq!(config.aws_region, "us-east-1");
        assert_eq!(config.aws_profile.as_deref(), Some("timelapse"));
        assert!(config.s3_endpoint.is_none());
        assert_eq!(config.log_format, LogFormat::Text);
        assert_eq!(config.camera_control_url(), "http://10.5.5.9");
        assert_eq!(config.camera_media_url(), "http://10.5.5.9:8080");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_secret() {
        let err = Config::from_lookup(lookup_from(&[("TIMELAPSE_BUCKET", "b")])).unwrap_err();
        assert!(err.to_string().contains("TIMELAPSE_CAMERA_PASSWORD"));

        let err =
            Config::from_lookup(lookup_from(&[("TIMELAPSE_CAMERA_PASSWORD", "p")])).unwrap_err();
        assert!(err.to_string().contains("TIMELAPSE_BUCKET"));
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("TIMELAPSE_CAMERA_PASSWORD", "p"),
            ("TIMELAPSE_BUCKET", "b"),
            ("TIMELAPSE_CAMERA_HOST", "192.168.1.20"),
            ("TIMELAPSE_CAMERA_MEDIA_PORT", "9090"),
            ("TIMELAPSE_INTERVAL_SECS", "30"),
            ("TIMELAPSE_AWS_PROFILE", ""),
            ("S3_ENDPOINT", "http://localhost:9000"),
            ("LOG_FORMAT", "json"),
        ]))
        .unwrap();

        assert_eq!(config.camera_media_url(), "http://192.168.1.20:9090");
        assert_eq!(config.interval_secs, 30);
        assert!(config.aws_profile.is_none());
        assert_eq!(config.s3_endpoint.as_deref(), Some("http://localhost:9000"));
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_invalid_port() {
        let result = Config::from_lookup(lookup_from(&[
            ("TIMELAPSE_CAMERA_PASSWORD", "p"),
            ("TIMELAPSE_BUCKET", "b"),
            ("TIMELAPSE_CAMERA_MEDIA_PORT", "not-a-port"),
        ]));
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let base = Config::from_lookup(lookup_from(&[
            ("TIMELAPSE_CAMERA_PASSWORD", "p"),
            ("TIMELAPSE_BUCKET", "b"),
        ]))
        .unwrap();

        let mut config = base.clone();
        config.camera_password = "  ".to_string();
        assert!(config.validate().is_err());

        let mut config = base.clone();
        config.camera_host = "http://10.5.5.9".to_string();
        assert!(config.validate().is_err());

        let mut config = base;
        config.interval_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_debug_redacts_password() {
        let config = Config::from_lookup(lookup_from(&[
            ("TIMELAPSE_CAMERA_PASSWORD", "supersecret"),
            ("TIMELAPSE_BUCKET", "b"),
        ]))
        .unwrap();
        assert!(!format!("{:?}", config).contains("supersecret"));
    }
}

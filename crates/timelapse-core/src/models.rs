//! Request-scoped values passed between pipeline stages.
//!
//! None of these outlive a single run.

use chrono::{DateTime, Local, TimeZone};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Newest capture on the camera: a DCIM directory and a file inside it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaReference {
    pub directory: String,
    pub file_name: String,
}

impl MediaReference {
    pub fn new(directory: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            file_name: file_name.into(),
        }
    }

    /// Path of the capture below the camera's media root.
    pub fn dcim_path(&self) -> String {
        format!("/videos/DCIM/{}/{}", self.directory, self.file_name)
    }
}

impl Display for MediaReference {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}/{}", self.directory, self.file_name)
    }
}

/// Local date-time text burned into each frame (`yyyy-MM-dd HH:mm`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timestamp(String);

impl Timestamp {
    pub const FORMAT: &'static str = "%Y-%m-%d %H:%M";

    pub fn now() -> Self {
        Self::from_datetime(&Local::now())
    }

    pub fn from_datetime<Tz>(at: &DateTime<Tz>) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        Self(at.format(Self::FORMAT).to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Timestamp {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

/// JPEG payload produced by the compositor.
#[derive(Debug, Clone)]
pub struct CompositeImage {
    pub data: Vec<u8>,
}

impl CompositeImage {
    pub const CONTENT_TYPE: &'static str = "image/jpeg";

    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }
}

/// Six-digit sequential object key, e.g. `000042.jpg`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ArchiveFilename(u32);

impl ArchiveFilename {
    pub const WIDTH: usize = 6;
    pub const MAX_COUNTER: u32 = 999_999;
    pub const EXTENSION: &'static str = "jpg";

    /// Name used when the bucket holds no objects yet.
    pub const FIRST: ArchiveFilename = ArchiveFilename(1);

    /// Returns `None` when the counter does not fit in six digits.
    pub fn from_counter(counter: u32) -> Option<Self> {
        (counter <= Self::MAX_COUNTER).then_some(Self(counter))
    }

    pub fn counter(&self) -> u32 {
        self.0
    }

    /// Name following a key whose numeric stem is `counter`.
    pub fn after(counter: u32) -> Option<Self> {
        counter.checked_add(1).and_then(Self::from_counter)
    }
}

impl Display for ArchiveFilename {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{:0width$}.{}", self.0, Self::EXTENSION, width = Self::WIDTH)
    }
}

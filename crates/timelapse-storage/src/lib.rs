//! Timelapse Storage Library
//!
//! This crate provides the archive storage abstraction, the S3 backend and the
//! sequential naming scheme for archived frames.
//!
//! # Key format
//!
//! Every archived frame is stored at the bucket root under a six-digit,
//! zero-padded counter: `000001.jpg`, `000002.jpg`, ... The next key is derived
//! from the most recently modified object, see [`naming`].

pub mod archive;
#[cfg(any(test, feature = "test-util"))]
pub mod memory;
pub mod naming;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use archive::Archiver;
#[cfg(any(test, feature = "test-util"))]
pub use memory::MemoryStorage;
pub use naming::next_archive_filename;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use traits::{ArchiveStorage, ObjectSummary, StorageError, StorageResult};

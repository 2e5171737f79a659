//! Timelapse Processing Library
//!
//! Fetches a raw capture, burns the run timestamp into its top-left corner and
//! re-encodes it as JPEG.

pub mod compositor;
pub mod error;
pub mod font;

pub use compositor::{overlay_timestamp, Compositor, TimestampCompositor};
pub use error::{CompositeError, CompositeResult};
pub use font::BitmapFont;

//! Sequential archive naming.
//!
//! The next name is derived from the most recently modified object, not from
//! the numerically largest key. Ties on modification time fall back to the
//! lexicographically greatest key so the result does not depend on listing
//! order.

use timelapse_core::ArchiveFilename;

use crate::traits::{ObjectSummary, StorageError, StorageResult};

/// Pick the name for the next upload given the current bucket contents.
///
/// * empty bucket: [`ArchiveFilename::FIRST`]
/// * newest key `NNNNNN.ext`: `NNNNNN + 1`, zero-padded to six digits
///
/// Fails with [`StorageError::InvalidKey`] when the newest key has no
/// extension or a non-numeric stem, and with [`StorageError::CounterExhausted`]
/// when the successor would need seven digits.
pub fn next_archive_filename(objects: &[ObjectSummary]) -> StorageResult<ArchiveFilename> {
    let newest = objects.iter().max_by(|a, b| {
        a.last_modified
            .cmp(&b.last_modified)
            .then_with(|| a.key.cmp(&b.key))
    });

    let Some(newest) = newest else {
        return Ok(ArchiveFilename::FIRST);
    };

    let counter = parse_counter(&newest.key)?;
    ArchiveFilename::after(counter)
        .ok_or_else(|| StorageError::CounterExhausted(newest.key.clone()))
}

/// Numeric stem of `key`, i.e. everything before the final `.`.
fn parse_counter(key: &str) -> StorageResult<u32> {
    let (stem, _extension) = key
        .rsplit_once('.')
        .ok_or_else(|| StorageError::InvalidKey(format!("{key}: missing extension")))?;

    if stem.is_empty() || !stem.bytes().all(|b| b.is_ascii_digit()) {
        return Err(StorageError::InvalidKey(format!("{key}: stem is not a number")));
    }

    stem.parse::<u32>()
        .map_err(|e| StorageError::InvalidKey(format!("{key}: {e}")))
}

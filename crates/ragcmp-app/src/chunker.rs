//! Fixed-window text chunking.

use std::num::NonZeroUsize;

/// Window used when no chunk size is configured.
pub const DEFAULT_CHUNK_SIZE: NonZeroUsize = match NonZeroUsize::new(500) {
    Some(size) => size,
    None => unreachable!(),
};

/// Split `text` into consecutive, non-overlapping windows of `chunk_size`
/// characters. The last window may be shorter. Empty text yields no chunks.
///
/// Windows are counted in `char`s, so multi-byte text is never split inside
/// a code point.
#[must_use]
pub fn split_text(text: &str, chunk_size: NonZeroUsize) -> Vec<String> {
    let size = chunk_size.get();
    let mut chunks = Vec::with_capacity(text.len().div_ceil(size));
    let mut current = String::new();
    let mut count = 0;

    for ch in text.chars() {
        current.push(ch);
        count += 1;
        if count == size {
            chunks.push(std::mem::take(&mut current));
            count = 0;
        }
    }
    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}

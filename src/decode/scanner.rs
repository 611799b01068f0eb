//! Forward substring search over a byte buffer.

/// Index of the first occurrence of `pattern` in `haystack` at or after
/// `start`, or `None`.
///
/// An empty pattern never matches, and neither does a `start` past the end.
pub fn find(haystack: &[u8], pattern: &[u8], start: usize) -> Option<usize> {
    if pattern.is_empty() {
        return None;
    }
    haystack
        .get(start..)?
        .windows(pattern.len())
        .position(|window| window == pattern)
        .map(|pos| pos + start)
}

/// Resumable scan for one pattern.
///
/// The cursor only ever moves forward; callers move it past whatever block
/// they consumed after each hit so matches never overlap.
#[derive(Debug, Clone)]
pub struct ByteScanner<'a> {
    haystack: &'a [u8],
    pattern: &'a [u8],
    cursor: usize,
}

impl<'a> ByteScanner<'a> {
    pub fn new(haystack: &'a [u8], pattern: &'a [u8]) -> Self {
        Self {
            haystack,
            pattern,
            cursor: 0,
        }
    }

    /// Next match at or after the cursor. Does not move the cursor.
    pub fn next_hit(&self) -> Option<usize> {
        find(self.haystack, self.pattern, self.cursor)
    }

    /// Resume the next search at `pos`.
    pub fn advance_to(&mut self, pos: usize) {
        debug_assert!(pos >= self.cursor, "scanner cursor moved backwards");
        self.cursor = self.cursor.max(pos);
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }
}

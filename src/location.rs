//! Byte offset to line conversion for error reporting

/// Provides fast conversion from byte offsets to line/column positions
pub struct SourceLocation {
    /// Byte offsets where each line starts
    line_starts: Vec<usize>,
}

impl SourceLocation {
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];

        for (byte_pos, ch) in source.char_indices() {
            if ch == '\n' {
                line_starts.push(byte_pos + 1);
            }
        }

        Self { line_starts }
    }

    /// Convert a byte offset to a 0-based (line, column) pair
    pub fn byte_to_position(&self, byte_offset: usize) -> (usize, usize) {
        let line = self
            .line_starts
            .binary_search(&byte_offset)
            .unwrap_or_else(|i| i - 1);

        (line, byte_offset - self.line_starts[line])
    }

    /// 1-based line number of a byte offset, as shown to users
    pub fn line_number(&self, byte_offset: usize) -> usize {
        self.byte_to_position(byte_offset).0 + 1
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}

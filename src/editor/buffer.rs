use ropey::Rope;

/// Rope-backed text of the editor widget
pub struct Buffer {
    text: Rope,
}

impl Buffer {
    pub fn new() -> Self {
        Self { text: Rope::new() }
    }

    pub fn from_text(s: &str) -> Self {
        Self {
            text: Rope::from_str(s),
        }
    }

    /// Full contents, as reported to change listeners
    pub fn text(&self) -> String {
        self.text.to_string()
    }

    pub fn line_count(&self) -> usize {
        self.text.len_lines()
    }

    pub fn line(&self, idx: usize) -> ropey::RopeSlice<'_> {
        self.text.line(idx)
    }

    pub fn line_len(&self, idx: usize) -> usize {
        // Length excluding newline character
        let line = self.text.line(idx);
        let len = line.len_chars();
        if len > 0 && line.char(len - 1) == '\n' {
            len - 1
        } else {
            len
        }
    }

    /// Convert (line, col) to a char index in the rope
    fn line_col_to_char(&self, line: usize, col: usize) -> usize {
        self.text.line_to_char(line) + col
    }

    pub fn insert_char(&mut self, line: usize, col: usize, ch: char) {
        let idx = self.line_col_to_char(line, col);
        self.text.insert_char(idx, ch);
    }

    pub fn insert_str(&mut self, line: usize, col: usize, s: &str) {
        let idx = self.line_col_to_char(line, col);
        self.text.insert(idx, s);
    }

    /// Delete the character at the given position, joining lines at a line end
    pub fn delete_char(&mut self, line: usize, col: usize) -> bool {
        let idx = self.line_col_to_char(line, col);
        if idx < self.text.len_chars() {
            self.text.remove(idx..idx + 1);
            true
        } else {
            false
        }
    }

    /// Delete the character before the given position (backspace)
    pub fn delete_char_backward(&mut self, line: usize, col: usize) -> bool {
        let idx = self.line_col_to_char(line, col);
        if idx > 0 {
            self.text.remove(idx - 1..idx);
            true
        } else {
            false
        }
    }

    pub fn insert_newline(&mut self, line: usize, col: usize) {
        self.insert_char(line, col, '\n');
    }
}

impl Default for Buffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_buffer_is_empty() {
        let buf = Buffer::new();
        assert_eq!(buf.line_count(), 1); // empty rope has 1 line
        assert_eq!(buf.text(), "");
    }

    #[test]
    fn line_count_counts_lines() {
        let buf = Buffer::from_text("hello\nworld\ntest\n");
        assert_eq!(buf.line_count(), 4); // 3 lines + trailing newline creates 4th
    }

    #[test]
    fn line_len_excludes_newline() {
        let buf = Buffer::from_text("hello\n\nworld");
        assert_eq!(buf.line_len(0), 5);
        assert_eq!(buf.line_len(1), 0);
        assert_eq!(buf.line_len(2), 5);
    }

    #[test]
    fn insert_and_delete_round_trip() {
        let mut buf = Buffer::from_text("let x;");
        buf.insert_str(0, 5, " = 1");
        assert_eq!(buf.text(), "let x = 1;");

        assert!(buf.delete_char_backward(0, 5));
        assert_eq!(buf.text(), "let  = 1;");
        assert!(buf.delete_char(0, 4));
        assert_eq!(buf.text(), "let = 1;");
    }

    #[test]
    fn backspace_at_line_start_joins_lines() {
        let mut buf = Buffer::from_text("a\nb");
        assert!(buf.delete_char_backward(1, 0));
        assert_eq!(buf.text(), "ab");
        assert!(!buf.delete_char_backward(0, 0));
    }

    #[test]
    fn delete_at_end_of_text_is_noop() {
        let mut buf = Buffer::from_text("ab");
        assert!(!buf.delete_char(0, 2));
        assert_eq!(buf.text(), "ab");
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cursor {
    pub line: usize,
    pub col: usize,
}

impl Cursor {
    pub fn new() -> Self {
        Self { line: 0, col: 0 }
    }

    pub fn move_left(&mut self) {
        if self.col > 0 {
            self.col -= 1;
        }
    }

    pub fn move_right(&mut self, line_len: usize) {
        self.col = (self.col + 1).min(line_len);
    }

    pub fn move_up(&mut self) {
        if self.line > 0 {
            self.line -= 1;
        }
    }

    pub fn move_down(&mut self, line_count: usize) {
        self.line = (self.line + 1).min(line_count.saturating_sub(1));
    }

    /// Keep the column inside a line of `line_len` characters
    pub fn clamp_col(&mut self, line_len: usize) {
        self.col = self.col.min(line_len);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_left_stops_at_zero() {
        let mut cursor = Cursor { line: 0, col: 1 };
        cursor.move_left();
        cursor.move_left();
        assert_eq!(cursor.col, 0);
    }

    #[test]
    fn move_right_clamps_to_line_len() {
        let mut cursor = Cursor { line: 0, col: 9 };
        cursor.move_right(10);
        assert_eq!(cursor.col, 10);
        cursor.move_right(10);
        assert_eq!(cursor.col, 10); // stays at max
    }

    #[test]
    fn move_up_stops_at_zero() {
        let mut cursor = Cursor { line: 1, col: 0 };
        cursor.move_up();
        cursor.move_up();
        assert_eq!(cursor.line, 0);
    }

    #[test]
    fn move_down_clamps_to_last_line() {
        let mut cursor = Cursor { line: 8, col: 0 };
        cursor.move_down(10); // 10 lines = indices 0-9
        assert_eq!(cursor.line, 9);
        cursor.move_down(10);
        assert_eq!(cursor.line, 9);
    }

    #[test]
    fn move_down_on_empty_document_stays_put() {
        let mut cursor = Cursor::new();
        cursor.move_down(0);
        assert_eq!(cursor, Cursor::new());
    }

    #[test]
    fn clamp_col_pulls_back_long_columns() {
        let mut cursor = Cursor { line: 2, col: 30 };
        cursor.clamp_col(4);
        assert_eq!(cursor.col, 4);
    }
}

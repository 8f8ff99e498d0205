use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Editable single-field text with a cursor counted in grapheme clusters.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TextBuffer {
    text: String,
    cursor: usize,
}

impl TextBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    fn graphemes(&self) -> Vec<&str> {
        self.text.graphemes(true).collect()
    }

    fn grapheme_len(&self) -> usize {
        self.text.graphemes(true).count()
    }

    /// Replace the contents and park the cursor at the end.
    pub fn set_text(&mut self, s: &str) {
        self.text = s.to_string();
        self.cursor = self.grapheme_len();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    pub fn set_cursor(&mut self, cursor: usize) {
        self.cursor = cursor.min(self.grapheme_len());
    }

    /// Display width of the text before the cursor.
    pub fn cursor_column(&self) -> usize {
        self.text
            .graphemes(true)
            .take(self.cursor)
            .map(UnicodeWidthStr::width)
            .sum()
    }

    /// Place the cursor on the grapheme drawn at display column `col`.
    pub fn set_cursor_from_column(&mut self, col: usize) {
        let mut acc = 0usize;
        let mut idx = 0usize;
        for g in self.text.graphemes(true) {
            let w = UnicodeWidthStr::width(g);
            if acc + w > col {
                break;
            }
            acc += w;
            idx += 1;
        }
        self.cursor = idx;
    }

    pub fn insert_str(&mut self, s: &str) {
        let parts = self.graphemes();
        let idx = self.cursor.min(parts.len());
        let mut out = parts[..idx].concat();
        out.push_str(s);
        out.push_str(&parts[idx..].concat());
        self.text = out;
        let added = s.graphemes(true).count();
        self.cursor = (idx + added).min(self.grapheme_len());
    }

    pub fn insert_char(&mut self, c: char) {
        let mut tmp = [0u8; 4];
        self.insert_str(c.encode_utf8(&mut tmp));
    }

    pub fn delete_left(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let mut parts = self.graphemes();
        let idx = self.cursor.min(parts.len());
        parts.remove(idx - 1);
        self.text = parts.concat();
        self.cursor = idx - 1;
    }

    pub fn delete_right(&mut self) {
        let mut parts = self.graphemes();
        let idx = self.cursor.min(parts.len());
        if idx < parts.len() {
            parts.remove(idx);
            self.text = parts.concat();
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.grapheme_len());
    }

    pub fn move_home(&mut self) {
        self.cursor = line_start(&self.graphemes(), self.cursor);
    }

    pub fn move_end(&mut self) {
        self.cursor = line_end(&self.graphemes(), self.cursor);
    }

    pub fn move_word_left(&mut self) {
        self.cursor = word_start(&self.graphemes(), self.cursor);
    }

    pub fn move_word_right(&mut self) {
        let parts = self.graphemes();
        let mut i = self.cursor.min(parts.len());
        while i < parts.len() && parts[i].trim().is_empty() {
            i += 1;
        }
        while i < parts.len() && !parts[i].trim().is_empty() {
            i += 1;
        }
        self.cursor = i;
    }

    pub fn delete_prev_word(&mut self) {
        let (start, end) = {
            let parts = self.graphemes();
            let end = self.cursor.min(parts.len());
            (word_start(&parts, end), end)
        };
        self.splice(start, end);
    }

    pub fn kill_to_start(&mut self) {
        let (start, end) = {
            let parts = self.graphemes();
            let end = self.cursor.min(parts.len());
            (line_start(&parts, end), end)
        };
        self.splice(start, end);
    }

    pub fn kill_to_end(&mut self) {
        let (start, end) = {
            let parts = self.graphemes();
            let start = self.cursor.min(parts.len());
            (start, line_end(&parts, start))
        };
        self.splice(start, end);
    }

    // Drop graphemes `start..end` and leave the cursor at `start`.
    fn splice(&mut self, start: usize, end: usize) {
        let kept = {
            let parts = self.graphemes();
            let mut kept = parts[..start].concat();
            kept.push_str(&parts[end..].concat());
            kept
        };
        self.text = kept;
        self.cursor = start;
    }
}

fn line_start(parts: &[&str], from: usize) -> usize {
    let mut i = from.min(parts.len());
    while i > 0 && parts[i - 1] != "\n" {
        i -= 1;
    }
    i
}

fn line_end(parts: &[&str], from: usize) -> usize {
    let mut i = from.min(parts.len());
    while i < parts.len() && parts[i] != "\n" {
        i += 1;
    }
    i
}

fn word_start(parts: &[&str], from: usize) -> usize {
    let mut i = from.min(parts.len());
    while i > 0 && parts[i - 1].trim().is_empty() {
        i -= 1;
    }
    while i > 0 && !parts[i - 1].trim().is_empty() {
        i -= 1;
    }
    i
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buf(s: &str) -> TextBuffer {
        let mut b = TextBuffer::new();
        b.set_text(s);
        b
    }

    #[test]
    fn insert_in_the_middle() {
        let mut b = buf("stat");
        b.set_cursor(0);
        b.insert_str("/");
        b.move_end();
        b.insert_char(' ');
        b.insert_str("fps");
        assert_eq!(b.text(), "/stat fps");
        assert_eq!(b.cursor(), 9);
    }

    #[test]
    fn deletes_whole_grapheme_clusters() {
        let mut b = buf("ae\u{301}z");
        b.move_left();
        b.delete_left();
        assert_eq!(b.text(), "az");
        assert_eq!(b.cursor(), 1);
        b.delete_right();
        assert_eq!(b.text(), "a");
    }

    #[test]
    fn word_motions_and_kills() {
        let mut b = buf("r.vsync  0 extra");
        b.delete_prev_word();
        assert_eq!(b.text(), "r.vsync  0 ");
        b.move_word_left();
        assert_eq!(b.cursor(), 9);
        b.move_home();
        b.move_word_right();
        assert_eq!(b.cursor(), 7);
        b.kill_to_end();
        assert_eq!(b.text(), "r.vsync");
        b.kill_to_start();
        assert!(b.is_empty());
    }

    #[test]
    fn kills_stop_at_line_breaks() {
        let mut b = buf("bind F1\nstat fps");
        b.set_cursor(12);
        b.kill_to_start();
        assert_eq!(b.text(), "bind F1\n fps");
        assert_eq!(b.cursor(), 8);
        b.kill_to_end();
        assert_eq!(b.text(), "bind F1\n");
        b.set_cursor(4);
        b.kill_to_end();
        assert_eq!(b.text(), "bind\n");
        assert_eq!(b.cursor(), 4);
    }

    #[test]
    fn column_mapping_accounts_for_wide_glyphs() {
        let mut b = buf("a\u{4e2d}b");
        b.set_cursor_from_column(2);
        assert_eq!(b.cursor(), 1);
        b.set_cursor_from_column(3);
        assert_eq!(b.cursor(), 2);
        assert_eq!(b.cursor_column(), 3);
        b.set_cursor_from_column(40);
        assert_eq!(b.cursor(), 3);
    }
}

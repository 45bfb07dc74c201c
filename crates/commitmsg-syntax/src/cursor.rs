/// Read position over the message text.
///
/// Offsets are byte offsets into the source. `current()` and `peek()` return
/// `None` as the end-of-input sentinel, which never satisfies a character
/// class, so matching loops stop at the end without extra checks.
#[derive(Debug, Clone)]
pub struct Cursor<'src> {
    source: &'src str,
    pos: usize,
}

/// Restore point handed out by [`Cursor::mark`].
pub type Mark = usize;

impl<'src> Cursor<'src> {
    pub fn new(source: &'src str) -> Self {
        Self { source, pos: 0 }
    }

    #[inline]
    pub fn source(&self) -> &'src str {
        self.source
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn current(&self) -> Option<char> {
        self.source[self.pos..].chars().next()
    }

    #[inline]
    pub fn peek(&self) -> Option<char> {
        let mut chars = self.source[self.pos..].chars();
        chars.next()?;
        chars.next()
    }

    /// Steps over the current character. Callers check `current()` first.
    #[inline]
    pub fn advance(&mut self) {
        if let Some(ch) = self.current() {
            self.pos += ch.len_utf8();
        }
    }

    #[inline]
    pub fn mark(&self) -> Mark {
        self.pos
    }

    #[inline]
    pub fn restore(&mut self, mark: Mark) {
        debug_assert!(mark <= self.source.len());
        self.pos = mark;
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.pos >= self.source.len()
    }

    /// Text consumed so far.
    pub fn consumed(&self) -> &'src str {
        &self.source[..self.pos]
    }

    /// Advances over the maximal run of characters satisfying `pred` and
    /// returns how many were consumed.
    pub fn eat_while(&mut self, pred: impl Fn(char) -> bool) -> usize {
        let mut count = 0;
        while let Some(ch) = self.current() {
            if !pred(ch) {
                break;
            }
            self.advance();
            count += 1;
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_and_peek() {
        let mut cursor = Cursor::new("ab");
        assert_eq!(cursor.current(), Some('a'));
        assert_eq!(cursor.peek(), Some('b'));
        cursor.advance();
        assert_eq!(cursor.current(), Some('b'));
        assert_eq!(cursor.peek(), None);
        cursor.advance();
        assert_eq!(cursor.current(), None);
        assert!(cursor.is_at_end());
    }

    #[test]
    fn test_empty_input_is_end() {
        let cursor = Cursor::new("");
        assert_eq!(cursor.current(), None);
        assert_eq!(cursor.peek(), None);
        assert!(cursor.is_at_end());
    }

    #[test]
    fn test_mark_and_restore() {
        let mut cursor = Cursor::new("feat");
        let mark = cursor.mark();
        cursor.advance();
        cursor.advance();
        assert_eq!(cursor.consumed(), "fe");
        cursor.restore(mark);
        assert_eq!(cursor.position(), 0);
        assert_eq!(cursor.current(), Some('f'));
    }

    #[test]
    fn test_eat_while_stops_at_end() {
        let mut cursor = Cursor::new("abc123");
        assert_eq!(cursor.eat_while(|c| c.is_ascii_alphanumeric()), 6);
        assert!(cursor.is_at_end());
        assert_eq!(cursor.eat_while(|c| c.is_ascii_alphanumeric()), 0);
    }

    #[test]
    fn test_multibyte_characters_advance_by_width() {
        let mut cursor = Cursor::new("é!");
        cursor.advance();
        assert_eq!(cursor.position(), 2);
        assert_eq!(cursor.current(), Some('!'));
    }
}

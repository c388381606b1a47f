//! Per-parse line cursor shared with the line rules.

/// Lines of one document plus the index of the line being examined.
///
/// Rules receive the cursor mutably and may [`advance`](Self::advance) it to
/// consume lookahead lines. The parser loop always resumes at the line after
/// wherever the cursor was left.
#[derive(Debug, Clone)]
pub struct ParserCursor<'a> {
    lines: Vec<&'a str>,
    index: usize,
}

impl<'a> ParserCursor<'a> {
    pub fn new(text: &'a str) -> Self {
        ParserCursor {
            lines: text.lines().collect(),
            index: 0,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn current(&self) -> Option<&'a str> {
        self.lines.get(self.index).copied()
    }

    /// The line after the current one, without moving.
    pub fn peek(&self) -> Option<&'a str> {
        self.lines.get(self.index + 1).copied()
    }

    /// Move to the next line and return it.
    pub fn advance(&mut self) -> Option<&'a str> {
        if self.index < self.lines.len() {
            self.index += 1;
        }
        self.current()
    }

    /// Advance past every following line accepted by `accept`, returning them.
    pub fn take_while_next<F>(&mut self, mut accept: F) -> Vec<&'a str>
    where
        F: FnMut(&str) -> bool,
    {
        let mut taken = Vec::new();
        while let Some(next) = self.peek() {
            if !accept(next) {
                break;
            }
            self.index += 1;
            taken.push(next);
        }
        taken
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walks_lines_in_order() {
        let mut cursor = ParserCursor::new("a\nb\nc");
        assert_eq!(cursor.current(), Some("a"));
        assert_eq!(cursor.peek(), Some("b"));
        assert_eq!(cursor.advance(), Some("b"));
        assert_eq!(cursor.advance(), Some("c"));
        assert_eq!(cursor.advance(), None);
        assert_eq!(cursor.advance(), None);
        assert_eq!(cursor.index(), 3);
    }

    #[test]
    fn take_while_next_stops_at_first_rejected_line() {
        let mut cursor = ParserCursor::new("head\n- a\n- b\ntext\n- c");
        let taken = cursor.take_while_next(|l| l.starts_with('-'));
        assert_eq!(taken, vec!["- a", "- b"]);
        assert_eq!(cursor.current(), Some("- b"));
    }
}

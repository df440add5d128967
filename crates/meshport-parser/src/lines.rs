//! Line-by-line cursor over the source text.

use crate::{
    error::{Diagnostic, ErrorCode, Result},
    span::Span,
};

/// One source line, without its line terminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Line<'src> {
    text: &'src str,
    number: usize,
    offset: usize,
}

impl<'src> Line<'src> {
    pub(crate) fn text(&self) -> &'src str {
        self.text
    }

    /// 1-based line number.
    pub(crate) fn number(&self) -> usize {
        self.number
    }

    /// Byte offset of the first character of this line.
    pub(crate) fn offset(&self) -> usize {
        self.offset
    }

    pub(crate) fn span(&self) -> Span {
        Span::new(self.offset()..self.offset() + self.text.len())
    }

    /// Span of `part`, which must be a subslice of this line's text.
    pub(crate) fn span_of(&self, part: &str) -> Span {
        let start = self.offset() + (part.as_ptr() as usize - self.text.as_ptr() as usize);
        Span::new(start..start + part.len())
    }
}

/// Hands out source lines in order.
///
/// Lines end at `\n`, `\r\n` or a lone `\r`. A final line without a
/// terminator still counts, an empty tail after the last terminator does not.
#[derive(Debug)]
pub(crate) struct LineCursor<'src> {
    source: &'src str,
    offset: usize,
    consumed: usize,
}

impl<'src> LineCursor<'src> {
    pub(crate) fn new(source: &'src str) -> Self {
        Self {
            source,
            offset: 0,
            consumed: 0,
        }
    }

    /// Returns the next line, or `None` at end of input.
    pub(crate) fn next_line(&mut self) -> Option<Line<'src>> {
        let rest = self.source.get(self.offset..).filter(|rest| !rest.is_empty())?;

        let (text, advance) = match rest.find(['\r', '\n']) {
            Some(end) if rest[end..].starts_with("\r\n") => (&rest[..end], end + 2),
            Some(end) => (&rest[..end], end + 1),
            None => (rest, rest.len()),
        };

        self.consumed += 1;
        let line = Line {
            text,
            number: self.consumed,
            offset: self.offset,
        };
        self.offset += advance;
        Some(line)
    }

    /// Returns the next line, failing with an end-of-input diagnostic that
    /// names `expected` when the source is exhausted.
    pub(crate) fn expect_line(&mut self, expected: impl AsRef<str>) -> Result<Line<'src>> {
        self.next_line().ok_or_else(|| {
            let end = self.source.len();
            Diagnostic::error(format!(
                "unexpected end of input after line {}: expected {}",
                self.consumed,
                expected.as_ref()
            ))
            .with_code(ErrorCode::E001)
            .with_label(Span::new(end..end), "input ends here")
        })
    }

    /// Number of lines left after the cursor.
    pub(crate) fn remaining(&self) -> usize {
        let mut rest = LineCursor {
            source: self.source,
            offset: self.offset,
            consumed: self.consumed,
        };
        std::iter::from_fn(|| rest.next_line()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_and_offsets() {
        let mut cursor = LineCursor::new("ab\ncd\n");

        let first = cursor.next_line().unwrap();
        assert_eq!(first.text(), "ab");
        assert_eq!(first.number(), 1);
        assert_eq!(first.offset(), 0);

        let second = cursor.next_line().unwrap();
        assert_eq!(second.text(), "cd");
        assert_eq!(second.number(), 2);
        assert_eq!(second.offset(), 3);
        assert_eq!(second.span(), Span::new(3..5));

        assert!(cursor.next_line().is_none());
    }

    #[test]
    fn test_crlf_terminators() {
        let mut cursor = LineCursor::new("ab\r\ncd");
        assert_eq!(cursor.next_line().unwrap().text(), "ab");

        let last = cursor.next_line().unwrap();
        assert_eq!(last.text(), "cd");
        assert_eq!(last.offset(), 4);
    }

    #[test]
    fn test_lone_cr_terminators() {
        let mut cursor = LineCursor::new("ab\rcd\r\ref");

        let first = cursor.next_line().unwrap();
        assert_eq!(first.text(), "ab");
        assert_eq!(first.offset(), 0);

        let second = cursor.next_line().unwrap();
        assert_eq!(second.text(), "cd");
        assert_eq!(second.number(), 2);
        assert_eq!(second.span(), Span::new(3..5));

        let third = cursor.next_line().unwrap();
        assert_eq!(third.text(), "ef");
        assert_eq!(third.offset(), 7);

        assert!(cursor.next_line().is_none());
    }

    #[test]
    fn test_cr_then_blank_line() {
        let mut cursor = LineCursor::new("a\r\rb\n");
        assert_eq!(cursor.next_line().unwrap().text(), "a");
        assert_eq!(cursor.next_line().unwrap().text(), "");
        assert_eq!(cursor.next_line().unwrap().text(), "b");
        assert!(cursor.next_line().is_none());
    }

    #[test]
    fn test_blank_lines_are_lines() {
        let mut cursor = LineCursor::new("\n\nx\n");
        assert_eq!(cursor.next_line().unwrap().text(), "");
        assert_eq!(cursor.next_line().unwrap().text(), "");
        assert_eq!(cursor.next_line().unwrap().text(), "x");
        assert!(cursor.next_line().is_none());
    }

    #[test]
    fn test_empty_source_has_no_lines() {
        let mut cursor = LineCursor::new("");
        assert!(cursor.next_line().is_none());
    }

    #[test]
    fn test_expect_line_at_end() {
        let mut cursor = LineCursor::new("only\n");
        cursor.expect_line("header").unwrap();

        let diag = cursor.expect_line("node count").unwrap_err();
        assert_eq!(diag.code(), Some(ErrorCode::E001));
        assert!(diag.message().contains("after line 1"));
        assert!(diag.message().contains("node count"));
        assert_eq!(diag.primary_span(), Some(Span::new(5..5)));
    }

    #[test]
    fn test_span_of_subslice() {
        let mut cursor = LineCursor::new("skip\n 1.5  2.0 7\n");
        cursor.next_line().unwrap();
        let line = cursor.next_line().unwrap();

        let field = &line.text()[6..9];
        assert_eq!(field, "2.0");
        assert_eq!(line.span_of(field), Span::new(11..14));
    }

    #[test]
    fn test_remaining_does_not_advance() {
        let mut cursor = LineCursor::new("a\nb\nc");
        cursor.next_line().unwrap();
        assert_eq!(cursor.remaining(), 2);
        assert_eq!(cursor.next_line().unwrap().text(), "b");
    }
}

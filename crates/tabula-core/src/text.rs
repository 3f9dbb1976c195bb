//! Styled text: a run of spans whose style never counts toward its width.

use std::fmt;

use ratatui::style::Style;
use ratatui::text::{Line, Span};

use crate::runeutil::{char_width, display_width, parse_ansi};

/// A string made of styled spans.
///
/// Styles live beside the text rather than inside it, so
/// [`visible_length`](StyledText::visible_length) is always the number of
/// terminal columns the text occupies. Strings carrying embedded SGR escape
/// sequences are parsed into spans on conversion, which keeps that markup out
/// of the count as well.
///
/// # Example
///
/// ```
/// use ratatui::style::{Color, Style};
/// use tabula_core::text::StyledText;
///
/// let price = StyledText::raw("2.4").style(Style::default().fg(Color::Red));
/// assert_eq!(price.visible_length(), 3);
/// assert_eq!(price.plain(), "2.4");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyledText {
    spans: Vec<Span<'static>>,
}

impl StyledText {
    /// Empty text.
    pub fn new() -> Self {
        Self::default()
    }

    /// Text taken verbatim, without parsing escape sequences.
    pub fn raw(s: impl Into<String>) -> Self {
        Self::styled(s, Style::default())
    }

    /// Text with a single style.
    pub fn styled(s: impl Into<String>, style: Style) -> Self {
        let s = s.into();
        if s.is_empty() {
            return Self::new();
        }
        Self {
            spans: vec![Span::styled(s, style)],
        }
    }

    /// Parse `s`, turning embedded SGR sequences into span styles.
    pub fn from_ansi(s: &str) -> Self {
        Self::from_spans(parse_ansi(s))
    }

    /// Build from existing spans. Empty spans are discarded.
    pub fn from_spans(spans: impl IntoIterator<Item = Span<'static>>) -> Self {
        Self {
            spans: spans.into_iter().filter(|s| !s.content.is_empty()).collect(),
        }
    }

    /// The spans making up this text.
    pub fn spans(&self) -> &[Span<'static>] {
        &self.spans
    }

    /// Return a copy of this text with `style` as its base.
    ///
    /// Each span keeps whatever its own style sets; `style` only fills in the
    /// fields a span leaves unset. Styling a highlighted cell with a stripe
    /// therefore leaves the highlight visible.
    pub fn style(&self, style: Style) -> Self {
        Self {
            spans: self
                .spans
                .iter()
                .map(|span| Span::styled(span.content.clone(), style.patch(span.style)))
                .collect(),
        }
    }

    /// Append a styled fragment.
    pub fn push_str(&mut self, s: impl Into<String>, style: Style) {
        let s = s.into();
        if !s.is_empty() {
            self.spans.push(Span::styled(s, style));
        }
    }

    /// Append a span as is.
    pub fn push_span(&mut self, span: Span<'static>) {
        if !span.content.is_empty() {
            self.spans.push(span);
        }
    }

    /// Append all spans of `other`.
    pub fn append(&mut self, other: &StyledText) {
        self.spans.extend(other.spans.iter().cloned());
    }

    /// Concatenate two texts into a new one.
    pub fn concat(&self, other: &StyledText) -> Self {
        let mut out = self.clone();
        out.append(other);
        out
    }

    /// Number of terminal columns the text occupies.
    pub fn visible_length(&self) -> usize {
        self.spans.iter().map(|s| display_width(&s.content)).sum()
    }

    /// Whether there is no content at all.
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// The content without any style.
    pub fn plain(&self) -> String {
        self.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    /// Convert into a ratatui [`Line`] for painting.
    pub fn to_line(&self) -> Line<'static> {
        Line::from(self.spans.clone())
    }

    /// Word-wrap into display lines no wider than `width` columns.
    ///
    /// Lines break after the last whitespace that fits; the whole run of
    /// whitespace at a break is dropped. Words wider than `width` are split hard. A `'\n'`
    /// always ends a line. The iterator is lazy and recomputed from the text
    /// each time `wrap` is called.
    pub fn wrap(&self, width: u16) -> WrappedLines {
        let glyphs = self
            .spans
            .iter()
            .flat_map(|span| span.content.chars().map(move |c| (c, span.style)))
            .collect();
        WrappedLines {
            glyphs,
            pos: 0,
            width: width as usize,
        }
    }
}

impl fmt::Display for StyledText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for span in &self.spans {
            f.write_str(&span.content)?;
        }
        Ok(())
    }
}

impl From<&str> for StyledText {
    fn from(s: &str) -> Self {
        Self::from_ansi(s)
    }
}

impl From<String> for StyledText {
    fn from(s: String) -> Self {
        Self::from_ansi(&s)
    }
}

impl From<&String> for StyledText {
    fn from(s: &String) -> Self {
        Self::from_ansi(s)
    }
}

impl From<Span<'static>> for StyledText {
    fn from(span: Span<'static>) -> Self {
        Self::from_spans([span])
    }
}

macro_rules! impl_from_display {
    ($($t:ty),*) => {
        $(
            impl From<$t> for StyledText {
                fn from(value: $t) -> Self {
                    Self::raw(value.to_string())
                }
            }
        )*
    };
}

impl_from_display!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, char, bool
);

/// Lazy iterator over the wrapped lines of a [`StyledText`].
///
/// Created by [`StyledText::wrap`].
#[derive(Debug, Clone)]
pub struct WrappedLines {
    glyphs: Vec<(char, Style)>,
    pos: usize,
    width: usize,
}

impl WrappedLines {
    /// Find where the line starting at `self.pos` ends.
    ///
    /// Returns `(end, next)`: the line covers `pos..end` and the following
    /// line starts at `next`.
    fn next_break(&self) -> (usize, usize) {
        let start = self.pos;
        let mut used = 0;
        let mut last_space: Option<usize> = None;
        let mut i = start;

        while i < self.glyphs.len() {
            let (c, _) = self.glyphs[i];
            if c == '\n' {
                return (i, i + 1);
            }
            let w = char_width(c);
            if used + w > self.width {
                if c.is_whitespace() {
                    return self.soft_break(i, i + 1);
                }
                return match last_space {
                    Some(space) => self.soft_break(space, space + 1),
                    // A single glyph wider than the line still has to go somewhere.
                    None if i == start => (i + 1, i + 1),
                    None => (i, i),
                };
            }
            if c.is_whitespace() {
                last_space = Some(i);
            }
            used += w;
            i += 1;
        }
        (self.glyphs.len(), self.glyphs.len())
    }

    /// Widen a break at whitespace to the whole run around it, so neither
    /// line keeps any of it. A newline ends the run and still breaks.
    fn soft_break(&self, mut end: usize, mut next: usize) -> (usize, usize) {
        while end > self.pos && self.is_blank(end - 1) {
            end -= 1;
        }
        while next < self.glyphs.len() && self.is_blank(next) {
            next += 1;
        }
        (end, next)
    }

    fn is_blank(&self, i: usize) -> bool {
        let c = self.glyphs[i].0;
        c != '\n' && c.is_whitespace()
    }
}

impl Iterator for WrappedLines {
    type Item = StyledText;

    fn next(&mut self) -> Option<StyledText> {
        if self.width == 0 || self.pos >= self.glyphs.len() {
            return None;
        }
        let (end, next) = self.next_break();
        let mut line = StyledText::new();
        let mut run = String::new();
        let mut run_style = None;
        for &(c, style) in &self.glyphs[self.pos..end] {
            if run_style.is_some_and(|s| s != style) {
                line.push_str(std::mem::take(&mut run), run_style.unwrap_or_default());
            }
            run_style = Some(style);
            run.push(c);
        }
        if let Some(style) = run_style {
            line.push_span(Span::styled(run, style));
        }
        self.pos = next;
        Some(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::{Color, Modifier};

    fn plain_lines(text: &StyledText, width: u16) -> Vec<String> {
        text.wrap(width).map(|l| l.plain()).collect()
    }

    #[test]
    fn visible_length_ignores_style() {
        let t = StyledText::styled("abc", Style::default().add_modifier(Modifier::BOLD));
        assert_eq!(t.visible_length(), 3);
    }

    #[test]
    fn from_str_strips_embedded_markup() {
        let t = StyledText::from("\x1b[31m2.4\x1b[0m");
        assert_eq!(t.visible_length(), 3);
        assert_eq!(t.plain(), "2.4");
        assert_eq!(t.spans()[0].style.fg, Some(Color::Red));
    }

    #[test]
    fn numbers_are_stringified() {
        assert_eq!(StyledText::from(17.9).plain(), "17.9");
        assert_eq!(StyledText::from(25).plain(), "25");
    }

    #[test]
    fn style_is_non_destructive() {
        let t = StyledText::raw("x");
        let styled = t.style(Style::default().bg(Color::Blue));
        assert_eq!(t.spans()[0].style, Style::default());
        assert_eq!(styled.spans()[0].style.bg, Some(Color::Blue));
    }

    #[test]
    fn style_keeps_inner_fields() {
        let inner = StyledText::styled("x", Style::default().bg(Color::Gray));
        let outer = inner.style(Style::default().bg(Color::Black).fg(Color::White));
        assert_eq!(outer.spans()[0].style.bg, Some(Color::Gray));
        assert_eq!(outer.spans()[0].style.fg, Some(Color::White));
    }

    #[test]
    fn wrap_breaks_at_whitespace() {
        let t = StyledText::raw("the quick brown fox");
        assert_eq!(plain_lines(&t, 10), vec!["the quick", "brown fox"]);
    }

    #[test]
    fn wrap_splits_long_words() {
        let t = StyledText::raw("abcdefghij");
        assert_eq!(plain_lines(&t, 4), vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn wrap_honours_newlines() {
        let t = StyledText::raw("ab\ncd");
        assert_eq!(plain_lines(&t, 10), vec!["ab", "cd"]);
    }

    #[test]
    fn wrap_consumes_whitespace_run() {
        let t = StyledText::raw("> ab   cd\u{2588}");
        assert_eq!(plain_lines(&t, 5), vec!["> ab", "cd\u{2588}"]);
        let t = StyledText::raw("one  two   three");
        assert_eq!(plain_lines(&t, 4), vec!["one", "two", "thre", "e"]);
    }

    #[test]
    fn wrap_whitespace_run_stops_at_newline() {
        let t = StyledText::raw("ab  \ncd");
        assert_eq!(plain_lines(&t, 3), vec!["ab", "", "cd"]);
    }

    #[test]
    fn wrap_exact_fit_is_one_line() {
        let t = StyledText::raw("abcd");
        assert_eq!(plain_lines(&t, 4), vec!["abcd"]);
    }

    #[test]
    fn wrap_empty_or_zero_width_yields_nothing() {
        assert_eq!(StyledText::new().wrap(10).count(), 0);
        assert_eq!(StyledText::raw("abc").wrap(0).count(), 0);
    }

    #[test]
    fn wrap_preserves_styles_across_lines() {
        let red = Style::default().fg(Color::Red);
        let mut t = StyledText::raw("> ");
        t.push_str("hello world", red);
        let lines: Vec<StyledText> = t.wrap(8).collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].plain(), "> hello");
        assert_eq!(lines[0].spans()[1].style, red);
        assert_eq!(lines[1].plain(), "world");
        assert_eq!(lines[1].spans()[0].style, red);
    }

    #[test]
    fn wrap_is_restartable() {
        let t = StyledText::raw("one two three");
        assert_eq!(t.wrap(5).count(), t.wrap(5).count());
    }
}

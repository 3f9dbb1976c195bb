//! Fixed-width cell formatting: justification and padding.

use ratatui::style::Style;
use tabula_core::runeutil::char_width;
use tabula_core::text::StyledText;

/// Horizontal placement of a value inside its cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Justify {
    /// Value first, padding after.
    #[default]
    Left,
    /// Padding first, value after.
    Right,
    /// Padding split around the value; an odd column goes after it.
    Center,
}

/// How one column formats its cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnFormat {
    /// Placement of the value.
    pub justify: Justify,
    /// Glyph used to pad the value to the column width.
    pub justify_character: char,
}

impl Default for ColumnFormat {
    fn default() -> Self {
        Self {
            justify: Justify::Left,
            justify_character: ' ',
        }
    }
}

impl ColumnFormat {
    /// A format with the given justification and fill glyph.
    pub fn new(justify: Justify, justify_character: char) -> Self {
        Self {
            justify,
            justify_character,
        }
    }

    /// Overwrite the fields `patch` sets, keep the rest.
    pub fn merge(&mut self, patch: ColumnFormatPatch) {
        if let Some(justify) = patch.justify {
            self.justify = justify;
        }
        if let Some(c) = patch.justify_character {
            self.justify_character = c;
        }
    }
}

/// A partial [`ColumnFormat`]: `None` fields leave the current value alone.
///
/// # Example
///
/// ```
/// use tabula_widgets::cell::{ColumnFormat, ColumnFormatPatch, Justify};
///
/// let mut format = ColumnFormat::default();
/// format.merge(ColumnFormatPatch::justify(Justify::Right));
/// format.merge(ColumnFormatPatch::justify_character('*'));
/// assert_eq!(format, ColumnFormat::new(Justify::Right, '*'));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnFormatPatch {
    /// New justification, if any.
    pub justify: Option<Justify>,
    /// New fill glyph, if any.
    pub justify_character: Option<char>,
}

impl ColumnFormatPatch {
    /// A patch that only changes the justification.
    pub fn justify(justify: Justify) -> Self {
        Self {
            justify: Some(justify),
            justify_character: None,
        }
    }

    /// A patch that only changes the fill glyph.
    pub fn justify_character(c: char) -> Self {
        Self {
            justify: None,
            justify_character: Some(c),
        }
    }
}

impl From<Justify> for ColumnFormatPatch {
    fn from(justify: Justify) -> Self {
        Self::justify(justify)
    }
}

/// `cols` columns of fill made of `c`.
///
/// A glyph wider than one column is repeated as often as it fits and the
/// remainder is filled with spaces, so the pad is always exactly `cols` wide.
fn pad(c: char, cols: usize) -> String {
    let w = char_width(c);
    if w == 0 {
        return " ".repeat(cols);
    }
    let mut out = c.to_string().repeat(cols / w);
    out.push_str(&" ".repeat(cols % w));
    out
}

/// Pad `value` to `width` visible columns according to `format`.
///
/// The value's own styling is kept; the padding is unstyled, ready for a row
/// style to be layered underneath. A value wider than `width` is returned
/// unpadded and unclipped.
///
/// # Example
///
/// ```
/// use tabula_core::text::StyledText;
/// use tabula_widgets::cell::{format_cell, ColumnFormat, Justify};
///
/// let format = ColumnFormat::new(Justify::Center, '.');
/// let cell = format_cell(&StyledText::raw("ab"), &format, 7);
/// assert_eq!(cell.plain(), "..ab...");
/// ```
pub fn format_cell(value: &StyledText, format: &ColumnFormat, width: u16) -> StyledText {
    let visible = value.visible_length();
    let width = width as usize;
    if visible >= width {
        if visible > width {
            log::trace!("cell '{value}' overflows its {width}-column cell");
        }
        return value.clone();
    }

    let pad_len = width - visible;
    let c = format.justify_character;
    let (before, after) = match format.justify {
        Justify::Left => (0, pad_len),
        Justify::Right => (pad_len, 0),
        Justify::Center => (pad_len / 2, pad_len - pad_len / 2),
    };

    let mut out = StyledText::new();
    out.push_str(pad(c, before), Style::default());
    out.append(value);
    out.push_str(pad(c, after), Style::default());
    out
}

//! Text measurement and ANSI markup utilities.
//!
//! Provides functions for calculating the display width of text and for
//! parsing embedded SGR escape sequences into styled ratatui spans.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ESC: char = '\x1b';

/// Calculate the display width of a single character.
///
/// Wide (CJK, fullwidth) characters count as 2 columns, control characters
/// and zero-width marks as 0.
pub fn char_width(c: char) -> usize {
    if c.is_control() {
        return 0;
    }
    c.width().unwrap_or(0)
}

/// Calculate the display width of a string that contains no markup.
pub fn display_width(s: &str) -> usize {
    if s.chars().any(char::is_control) {
        return s.chars().map(char_width).sum();
    }
    s.width()
}

/// Map a standard ANSI color offset (0-7) to a ratatui `Color`.
fn ansi_color(offset: u16) -> Option<Color> {
    match offset {
        0 => Some(Color::Black),
        1 => Some(Color::Red),
        2 => Some(Color::Green),
        3 => Some(Color::Yellow),
        4 => Some(Color::Blue),
        5 => Some(Color::Magenta),
        6 => Some(Color::Cyan),
        7 => Some(Color::Gray),
        _ => None,
    }
}

/// Map a bright ANSI color offset (0-7) to a ratatui `Color`.
fn ansi_bright_color(offset: u16) -> Option<Color> {
    match offset {
        0 => Some(Color::DarkGray),
        1 => Some(Color::LightRed),
        2 => Some(Color::LightGreen),
        3 => Some(Color::LightYellow),
        4 => Some(Color::LightBlue),
        5 => Some(Color::LightMagenta),
        6 => Some(Color::LightCyan),
        7 => Some(Color::White),
        _ => None,
    }
}

/// Read an extended color (`5;N` or `2;R;G;B`) starting at `codes[i]`.
///
/// Returns the color and the number of parameters consumed.
fn extended_color(codes: &[u16]) -> Option<(Color, usize)> {
    match codes {
        [5, n, ..] => Some((Color::Indexed(*n as u8), 2)),
        [2, r, g, b, ..] => Some((Color::Rgb(*r as u8, *g as u8, *b as u8), 4)),
        _ => None,
    }
}

/// Apply a sequence of SGR parameter codes to a `Style`.
fn apply_sgr_codes(codes: &[u16], style: &mut Style) {
    let mut i = 0;
    while i < codes.len() {
        let code = codes[i];
        match code {
            0 => *style = Style::default(),
            1 => *style = style.add_modifier(Modifier::BOLD),
            2 => *style = style.add_modifier(Modifier::DIM),
            3 => *style = style.add_modifier(Modifier::ITALIC),
            4 => *style = style.add_modifier(Modifier::UNDERLINED),
            5 => *style = style.add_modifier(Modifier::SLOW_BLINK),
            7 => *style = style.add_modifier(Modifier::REVERSED),
            22 => *style = style.remove_modifier(Modifier::BOLD | Modifier::DIM),
            23 => *style = style.remove_modifier(Modifier::ITALIC),
            24 => *style = style.remove_modifier(Modifier::UNDERLINED),
            25 => *style = style.remove_modifier(Modifier::SLOW_BLINK),
            27 => *style = style.remove_modifier(Modifier::REVERSED),
            30..=37 => {
                if let Some(c) = ansi_color(code - 30) {
                    *style = style.fg(c);
                }
            }
            39 => *style = style.fg(Color::Reset),
            40..=47 => {
                if let Some(c) = ansi_color(code - 40) {
                    *style = style.bg(c);
                }
            }
            49 => *style = style.bg(Color::Reset),
            90..=97 => {
                if let Some(c) = ansi_bright_color(code - 90) {
                    *style = style.fg(c);
                }
            }
            100..=107 => {
                if let Some(c) = ansi_bright_color(code - 100) {
                    *style = style.bg(c);
                }
            }
            38 | 48 => {
                if let Some((color, used)) = extended_color(&codes[i + 1..]) {
                    *style = if code == 38 {
                        style.fg(color)
                    } else {
                        style.bg(color)
                    };
                    i += used;
                }
            }
            _ => {}
        }
        i += 1;
    }
}

/// Parse a string containing ANSI SGR escape sequences into styled spans.
///
/// The markup itself never reaches the spans, so the summed span width is the
/// visible width of `s`. Non-SGR CSI sequences and lone escapes are dropped.
/// Newlines are kept as content.
pub fn parse_ansi(s: &str) -> Vec<Span<'static>> {
    if !s.contains(ESC) {
        return vec![Span::raw(s.to_string())];
    }

    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut current_style = Style::default();
    let mut buf = String::new();
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c != ESC {
            buf.push(c);
            continue;
        }
        if chars.peek() != Some(&'[') {
            // Lone ESC: skip it and the byte it was introducing.
            chars.next();
            continue;
        }
        chars.next();

        let mut param_str = String::new();
        let mut final_byte = None;
        for pc in chars.by_ref() {
            if ('\x40'..='\x7e').contains(&pc) {
                final_byte = Some(pc);
                break;
            }
            param_str.push(pc);
        }

        if final_byte != Some('m') {
            continue;
        }
        if !buf.is_empty() {
            spans.push(Span::styled(std::mem::take(&mut buf), current_style));
        }
        let codes: Vec<u16> = if param_str.is_empty() {
            vec![0] // ESC[m is ESC[0m
        } else {
            param_str
                .split(';')
                .map(|p| p.parse::<u16>().unwrap_or(0))
                .collect()
        };
        apply_sgr_codes(&codes, &mut current_style);
    }

    if !buf.is_empty() {
        spans.push(Span::styled(buf, current_style));
    }
    spans
}

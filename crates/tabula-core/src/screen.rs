//! A double-buffered screen and the [`Window`] regions carved out of it.
//!
//! Windows paint into the screen's back buffer when drawn; nothing reaches
//! the terminal until the screen is flushed, at which point only the cells
//! that changed since the previous flush are written.

use std::cell::{Ref, RefCell};
use std::io::{self, stdout, Stdout, Write};
use std::rc::Rc;

use crossterm::cursor::{self, MoveTo};
use crossterm::style::{
    Attribute, Color as CColor, Print, ResetColor, SetAttribute, SetBackgroundColor,
    SetForegroundColor,
};
use crossterm::terminal::{Clear, ClearType};
use crossterm::{execute, queue};
use ratatui::buffer::{Buffer, Cell};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier};

use crate::error::ScreenError;
use crate::region::{column_rects, top_rects, Region};
use crate::terminal::Terminal;
use crate::text::StyledText;

/// Front and back cell buffers plus the writer they are flushed to.
pub struct Screen<W: Write> {
    current: Buffer,
    previous: Buffer,
    writer: W,
    cleared: bool,
}

impl Screen<Stdout> {
    /// A screen covering the whole terminal, writing to stdout.
    pub fn stdout() -> io::Result<Self> {
        let (width, height) = crossterm::terminal::size()?;
        Ok(Self::new(stdout(), Rect::new(0, 0, width, height)))
    }
}

impl<W: Write> Screen<W> {
    /// Create a blank screen of the given size over `writer`.
    pub fn new(writer: W, area: Rect) -> Self {
        Self {
            current: Buffer::empty(area),
            previous: Buffer::empty(area),
            writer,
            cleared: false,
        }
    }

    /// The area the screen covers.
    pub fn area(&self) -> Rect {
        self.current.area
    }

    /// The back buffer: what the terminal will show after the next flush.
    pub fn buffer(&self) -> &Buffer {
        &self.current
    }

    /// The underlying writer.
    pub fn writer(&self) -> &W {
        &self.writer
    }

    /// Reset every cell of `area` and paint `lines` into it top-down.
    ///
    /// Lines beyond the area's height and text beyond its width are clipped.
    pub fn paint(&mut self, area: Rect, lines: &[StyledText]) {
        let area = area.intersection(self.current.area);
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                self.current[(x, y)].reset();
            }
        }
        for (row, line) in lines.iter().take(area.height as usize).enumerate() {
            self.current
                .set_line(area.x, area.y + row as u16, &line.to_line(), area.width);
        }
    }

    /// Write the changed cells to the writer and flush it.
    pub fn flush(&mut self) -> io::Result<()> {
        if !self.cleared {
            queue!(self.writer, Clear(ClearType::All))?;
            self.cleared = true;
        }
        let updates = self.previous.diff(&self.current);
        write_cells(&mut self.writer, updates)?;
        self.writer.flush()?;
        self.previous = self.current.clone();
        Ok(())
    }

    /// Hide the hardware cursor immediately.
    pub fn hide_cursor(&mut self) -> io::Result<()> {
        execute!(self.writer, cursor::Hide)
    }

    /// Show the hardware cursor immediately.
    pub fn show_cursor(&mut self) -> io::Result<()> {
        execute!(self.writer, cursor::Show)
    }

    /// The back buffer's content as plain text, one line per row.
    pub fn render_string(&self) -> String {
        let area = self.current.area;
        let mut output = String::new();
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                output.push_str(self.current[(x, y)].symbol());
            }
            if y + 1 < area.bottom() {
                output.push('\n');
            }
        }
        output
    }
}

fn write_cells<W: Write>(writer: &mut W, updates: Vec<(u16, u16, &Cell)>) -> io::Result<()> {
    let mut last_pos: Option<(u16, u16)> = None;
    let mut pen: Option<(Color, Color, Modifier)> = None;

    for (x, y, cell) in updates {
        if !matches!(last_pos, Some((px, py)) if px + 1 == x && py == y) {
            queue!(writer, MoveTo(x, y))?;
        }
        last_pos = Some((x, y));

        let wanted = (cell.fg, cell.bg, cell.modifier);
        if pen != Some(wanted) {
            queue!(writer, SetAttribute(Attribute::Reset))?;
            for attribute in attributes(cell.modifier) {
                queue!(writer, SetAttribute(attribute))?;
            }
            queue!(
                writer,
                SetForegroundColor(crossterm_color(cell.fg)),
                SetBackgroundColor(crossterm_color(cell.bg))
            )?;
            pen = Some(wanted);
        }
        queue!(writer, Print(cell.symbol()))?;
    }

    queue!(writer, ResetColor, SetAttribute(Attribute::Reset))
}

fn attributes(modifier: Modifier) -> Vec<Attribute> {
    [
        (Modifier::BOLD, Attribute::Bold),
        (Modifier::DIM, Attribute::Dim),
        (Modifier::ITALIC, Attribute::Italic),
        (Modifier::UNDERLINED, Attribute::Underlined),
        (Modifier::SLOW_BLINK, Attribute::SlowBlink),
        (Modifier::RAPID_BLINK, Attribute::RapidBlink),
        (Modifier::REVERSED, Attribute::Reverse),
        (Modifier::HIDDEN, Attribute::Hidden),
        (Modifier::CROSSED_OUT, Attribute::CrossedOut),
    ]
    .into_iter()
    .filter(|(m, _)| modifier.contains(*m))
    .map(|(_, a)| a)
    .collect()
}

fn crossterm_color(color: Color) -> CColor {
    match color {
        Color::Reset => CColor::Reset,
        Color::Black => CColor::Black,
        Color::Red => CColor::DarkRed,
        Color::Green => CColor::DarkGreen,
        Color::Yellow => CColor::DarkYellow,
        Color::Blue => CColor::DarkBlue,
        Color::Magenta => CColor::DarkMagenta,
        Color::Cyan => CColor::DarkCyan,
        Color::Gray => CColor::Grey,
        Color::DarkGray => CColor::DarkGrey,
        Color::LightRed => CColor::Red,
        Color::LightGreen => CColor::Green,
        Color::LightYellow => CColor::Yellow,
        Color::LightBlue => CColor::Blue,
        Color::LightMagenta => CColor::Magenta,
        Color::LightCyan => CColor::Cyan,
        Color::White => CColor::White,
        Color::Indexed(i) => CColor::AnsiValue(i),
        Color::Rgb(r, g, b) => CColor::Rgb { r, g, b },
    }
}

/// Shared handle to a [`Screen`].
///
/// Every [`Window`] keeps one so that it can paint itself; the handle also
/// serves as the [`Terminal`]. Sharing is single-threaded (`Rc<RefCell<_>>`).
pub struct ScreenHandle<W: Write> {
    inner: Rc<RefCell<Screen<W>>>,
}

impl<W: Write> Clone for ScreenHandle<W> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<W: Write> ScreenHandle<W> {
    /// Take ownership of `screen` and share it.
    pub fn new(screen: Screen<W>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(screen)),
        }
    }

    /// The area the screen covers.
    pub fn area(&self) -> Rect {
        self.inner.borrow().area()
    }

    /// Borrow the screen, e.g. to inspect its buffer.
    pub fn borrow(&self) -> Ref<'_, Screen<W>> {
        self.inner.borrow()
    }

    /// A window over `area` (clipped to the screen) with an empty line buffer.
    pub fn window(&self, area: Rect) -> Window<W> {
        Window {
            area: area.intersection(self.area()),
            lines: Vec::new(),
            screen: self.clone(),
        }
    }

    /// A window over the whole screen.
    pub fn full_window(&self) -> Window<W> {
        self.window(self.area())
    }
}

impl<W: Write> Terminal for ScreenHandle<W> {
    fn hide_cursor(&mut self) -> Result<(), ScreenError> {
        Ok(self.inner.borrow_mut().hide_cursor()?)
    }

    fn show_cursor(&mut self) -> Result<(), ScreenError> {
        Ok(self.inner.borrow_mut().show_cursor()?)
    }

    fn flush(&mut self) -> Result<(), ScreenError> {
        Ok(self.inner.borrow_mut().flush()?)
    }
}

/// A [`Region`] of a shared [`Screen`].
///
/// # Example
///
/// ```
/// use ratatui::layout::Rect;
/// use tabula_core::region::Region;
/// use tabula_core::screen::{Screen, ScreenHandle};
///
/// let screen = ScreenHandle::new(Screen::new(Vec::new(), Rect::new(0, 0, 5, 1)));
/// let mut window = screen.full_window();
/// window.append_line("hi".into());
/// window.draw().unwrap();
/// assert_eq!(screen.borrow().render_string(), "hi   ");
/// ```
pub struct Window<W: Write> {
    area: Rect,
    lines: Vec<StyledText>,
    screen: ScreenHandle<W>,
}

impl<W: Write> Region for Window<W> {
    fn area(&self) -> Rect {
        self.area
    }

    fn split_into_columns(&self, widths: &[u16]) -> Vec<Self> {
        column_rects(self.area, widths)
            .into_iter()
            .map(|rect| self.screen.window(rect))
            .collect()
    }

    fn split_off_top(&self, rows: u16) -> (Self, Self) {
        let (top, rest) = top_rects(self.area, rows);
        (self.screen.window(top), self.screen.window(rest))
    }

    fn append_line(&mut self, line: StyledText) {
        self.lines.push(line);
    }

    fn clear(&mut self) {
        self.lines.clear();
    }

    fn lines(&self) -> &[StyledText] {
        &self.lines
    }

    fn draw(&mut self) -> Result<(), ScreenError> {
        self.screen.inner.borrow_mut().paint(self.area, &self.lines);
        Ok(())
    }
}

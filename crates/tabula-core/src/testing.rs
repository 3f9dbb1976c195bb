//! Test doubles for the collaborator traits.
//!
//! These let widget behaviour be exercised without a terminal: regions record
//! what they were asked to draw, key sources replay a script, and the terminal
//! counts calls.
//!
//! # Example
//!
//! ```
//! use ratatui::layout::Rect;
//! use tabula_core::region::Region;
//! use tabula_core::testing::RecordingRegion;
//!
//! let mut region = RecordingRegion::new(Rect::new(0, 0, 10, 2));
//! region.append_line("hello".into());
//! region.draw().unwrap();
//! assert_eq!(region.log().draws()[0].lines, vec!["hello".to_string()]);
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use ratatui::layout::Rect;

use crate::error::ScreenError;
use crate::key::{EventSource, Key};
use crate::region::{column_rects, top_rects, Region};
use crate::terminal::Terminal;
use crate::text::StyledText;

/// One recorded [`Region::draw`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawRecord {
    /// Area of the region that drew.
    pub area: Rect,
    /// Plain text of its buffered lines at the time.
    pub lines: Vec<String>,
}

/// Draw calls shared by a region and everything split from it.
#[derive(Debug, Clone, Default)]
pub struct DrawLog {
    records: Rc<RefCell<Vec<DrawRecord>>>,
}

impl DrawLog {
    /// Snapshot of all draws so far, in order.
    pub fn draws(&self) -> Vec<DrawRecord> {
        self.records.borrow().clone()
    }

    /// Number of draws of the region covering exactly `area`.
    pub fn draws_of(&self, area: Rect) -> usize {
        self.records.borrow().iter().filter(|r| r.area == area).count()
    }

    /// Forget everything recorded so far.
    pub fn reset(&self) {
        self.records.borrow_mut().clear();
    }

    fn push(&self, record: DrawRecord) {
        self.records.borrow_mut().push(record);
    }
}

/// A [`Region`] that keeps its lines in memory and logs every draw.
#[derive(Debug, Clone)]
pub struct RecordingRegion {
    area: Rect,
    lines: Vec<StyledText>,
    log: DrawLog,
}

impl RecordingRegion {
    /// A region over `area` with a fresh log.
    pub fn new(area: Rect) -> Self {
        Self {
            area,
            lines: Vec::new(),
            log: DrawLog::default(),
        }
    }

    /// The log shared with every region split from this one.
    pub fn log(&self) -> DrawLog {
        self.log.clone()
    }

    fn child(&self, area: Rect) -> Self {
        Self {
            area,
            lines: Vec::new(),
            log: self.log.clone(),
        }
    }
}

impl Region for RecordingRegion {
    fn area(&self) -> Rect {
        self.area
    }

    fn split_into_columns(&self, widths: &[u16]) -> Vec<Self> {
        column_rects(self.area, widths)
            .into_iter()
            .map(|rect| self.child(rect))
            .collect()
    }

    fn split_off_top(&self, rows: u16) -> (Self, Self) {
        let (top, rest) = top_rects(self.area, rows);
        (self.child(top), self.child(rest))
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
        self.log.push(DrawRecord {
            area: self.area,
            lines: self.lines.iter().map(StyledText::plain).collect(),
        });
        Ok(())
    }
}

/// An [`EventSource`] that replays a fixed list of keys, then returns.
#[derive(Debug, Clone, Default)]
pub struct ScriptedKeys {
    keys: Vec<Key>,
}

impl ScriptedKeys {
    /// Replay `keys` in order.
    pub fn new(keys: impl IntoIterator<Item = Key>) -> Self {
        Self {
            keys: keys.into_iter().collect(),
        }
    }

    /// One [`Key::Char`] per character of `s`.
    pub fn typed(s: &str) -> Self {
        Self::new(s.chars().map(Key::Char))
    }

    /// Append a key to the script.
    pub fn then(mut self, key: Key) -> Self {
        self.keys.push(key);
        self
    }
}

impl EventSource for ScriptedKeys {
    fn listen(
        &mut self,
        on_key: &mut dyn FnMut(Key) -> Result<(), ScreenError>,
    ) -> Result<(), ScreenError> {
        for key in std::mem::take(&mut self.keys) {
            on_key(key)?;
        }
        Ok(())
    }
}

/// Call counts of a [`RecordingTerminal`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TerminalCalls {
    /// `hide_cursor` calls.
    pub hide_cursor: usize,
    /// `show_cursor` calls.
    pub show_cursor: usize,
    /// `flush` calls.
    pub flush: usize,
}

/// A [`Terminal`] that only counts calls. Clones share the counts.
#[derive(Debug, Clone, Default)]
pub struct RecordingTerminal {
    calls: Rc<RefCell<TerminalCalls>>,
}

impl RecordingTerminal {
    /// A terminal with zeroed counts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts so far.
    pub fn calls(&self) -> TerminalCalls {
        *self.calls.borrow()
    }
}

impl Terminal for RecordingTerminal {
    fn hide_cursor(&mut self) -> Result<(), ScreenError> {
        self.calls.borrow_mut().hide_cursor += 1;
        Ok(())
    }

    fn show_cursor(&mut self) -> Result<(), ScreenError> {
        self.calls.borrow_mut().show_cursor += 1;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), ScreenError> {
        self.calls.borrow_mut().flush += 1;
        Ok(())
    }
}

//! The rectangular screen area widgets draw into.

use ratatui::layout::Rect;

use crate::error::ScreenError;
use crate::text::StyledText;

/// A rectangular area of the screen with its own line buffer.
///
/// Widgets only ever talk to a `Region`: they fill its buffer with
/// [`append_line`](Region::append_line) and paint it with
/// [`draw`](Region::draw). Splitting hands out disjoint sub-regions that are
/// owned by whoever asked for them.
pub trait Region: Sized {
    /// The area covered, in absolute screen coordinates.
    fn area(&self) -> Rect;

    /// Width in columns.
    fn width(&self) -> u16 {
        self.area().width
    }

    /// Height in rows.
    fn height(&self) -> u16 {
        self.area().height
    }

    /// Split into consecutive full-height columns of the given widths, left to
    /// right.
    ///
    /// Splitting stops once the region's width is used up: a width that would
    /// cross the right edge is clipped to what is left, and nothing is
    /// returned for widths after that. Callers that need exact widths resolve
    /// them first.
    fn split_into_columns(&self, widths: &[u16]) -> Vec<Self>;

    /// Split into the top `rows` rows and the rest.
    fn split_off_top(&self, rows: u16) -> (Self, Self);

    /// Add a line to the end of the buffer.
    fn append_line(&mut self, line: StyledText);

    /// Empty the buffer. The screen is not touched until the next draw.
    fn clear(&mut self);

    /// The buffered lines.
    fn lines(&self) -> &[StyledText];

    /// Repaint the whole area from the buffer.
    fn draw(&mut self) -> Result<(), ScreenError>;
}

/// Slice `area` into consecutive columns, as described on
/// [`Region::split_into_columns`].
pub fn column_rects(area: Rect, widths: &[u16]) -> Vec<Rect> {
    let mut rects = Vec::with_capacity(widths.len());
    let mut x = area.x;
    let right = area.right();
    for &w in widths {
        if x >= right && w > 0 {
            break;
        }
        let w = w.min(right - x);
        rects.push(Rect::new(x, area.y, w, area.height));
        x += w;
    }
    rects
}

/// Split `area` into its top `rows` rows and the remainder.
pub fn top_rects(area: Rect, rows: u16) -> (Rect, Rect) {
    let rows = rows.min(area.height);
    let top = Rect::new(area.x, area.y, area.width, rows);
    let rest = Rect::new(area.x, area.y + rows, area.width, area.height - rows);
    (top, rest)
}

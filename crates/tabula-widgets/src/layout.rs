//! Column layout: resolving column widths against a region.

use tabula_core::region::Region;

/// Width of one column in a table layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnWidth {
    /// Exactly this many columns.
    Fixed(u16),
    /// Whatever is left of the container after every fixed column.
    ///
    /// Only the first `Remainder` in a layout gets that space; any
    /// later one resolves to zero.
    Remainder,
}

impl From<u16> for ColumnWidth {
    fn from(width: u16) -> Self {
        ColumnWidth::Fixed(width)
    }
}

impl From<Option<u16>> for ColumnWidth {
    fn from(width: Option<u16>) -> Self {
        width.map_or(ColumnWidth::Remainder, ColumnWidth::Fixed)
    }
}

/// Resolve `columns` against a container `container_width` columns wide.
///
/// Columns are placed left to right. The first one that would cross the
/// container's right edge ends the layout: it and everything after it are
/// dropped.
///
/// # Example
///
/// ```
/// use tabula_widgets::layout::{resolve_widths, ColumnWidth};
///
/// let columns = [ColumnWidth::Remainder, ColumnWidth::Fixed(6), ColumnWidth::Fixed(6)];
/// assert_eq!(resolve_widths(40, &columns), vec![28, 6, 6]);
/// assert_eq!(resolve_widths(10, &columns), vec![0, 6]);
/// ```
pub fn resolve_widths(container_width: u16, columns: &[ColumnWidth]) -> Vec<u16> {
    let fixed: u32 = columns
        .iter()
        .map(|w| match w {
            ColumnWidth::Fixed(n) => u32::from(*n),
            ColumnWidth::Remainder => 0,
        })
        .sum();
    let mut remaining = u32::from(container_width).saturating_sub(fixed) as u16;

    let mut widths = Vec::with_capacity(columns.len());
    let mut used: u32 = 0;
    for entry in columns {
        let width = match entry {
            ColumnWidth::Fixed(n) => *n,
            ColumnWidth::Remainder => std::mem::take(&mut remaining),
        };
        if used + u32::from(width) > u32::from(container_width) {
            log::debug!(
                "dropping {} of {} columns: {container_width} columns available",
                columns.len() - widths.len(),
                columns.len()
            );
            break;
        }
        used += u32::from(width);
        widths.push(width);
    }
    widths
}

/// Column regions carved out of a container, plus an optional header strip.
///
/// The header, when requested, is the container's top row split by the same
/// widths as the body below it.
pub struct ColumnLayout<R: Region> {
    widths: Vec<u16>,
    columns: Vec<R>,
    header: Option<Vec<R>>,
}

impl<R: Region> ColumnLayout<R> {
    /// Lay `container` out according to `columns`.
    pub fn new(container: &R, columns: &[ColumnWidth], with_header: bool) -> Self {
        let widths = resolve_widths(container.width(), columns);
        let (header, body) = if with_header {
            let (top, rest) = container.split_off_top(1);
            (Some(top.split_into_columns(&widths)), rest)
        } else {
            let (_, all) = container.split_off_top(0);
            (None, all)
        };
        let columns = body.split_into_columns(&widths);
        Self {
            widths,
            columns,
            header,
        }
    }

    /// The resolved width of every column.
    pub fn widths(&self) -> &[u16] {
        &self.widths
    }

    /// The body column regions.
    pub fn columns(&self) -> &[R] {
        &self.columns
    }

    /// The header column regions, if a header was requested.
    pub fn header(&self) -> Option<&[R]> {
        self.header.as_deref()
    }

    /// Take the body and header regions apart.
    pub fn into_parts(self) -> (Vec<R>, Option<Vec<R>>) {
        (self.columns, self.header)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::ColumnWidth::{Fixed, Remainder};
    use ratatui::layout::Rect;
    use tabula_core::testing::RecordingRegion;

    #[test]
    fn remainder_takes_leftover_width() {
        assert_eq!(resolve_widths(40, &[Remainder, Fixed(6), Fixed(6)]), vec![28, 6, 6]);
        assert_eq!(resolve_widths(40, &[Fixed(10), Remainder]), vec![10, 30]);
    }

    #[test]
    fn fixed_only_keeps_what_fits() {
        assert_eq!(resolve_widths(20, &[Fixed(8), Fixed(8), Fixed(8)]), vec![8, 8]);
        assert_eq!(resolve_widths(24, &[Fixed(8), Fixed(8), Fixed(8)]), vec![8, 8, 8]);
    }

    #[test]
    fn truncation_drops_everything_after_first_misfit() {
        assert_eq!(resolve_widths(10, &[Fixed(4), Fixed(8), Fixed(2)]), vec![4]);
    }

    #[test]
    fn second_remainder_gets_nothing() {
        assert_eq!(resolve_widths(20, &[Remainder, Fixed(4), Remainder]), vec![16, 4, 0]);
    }

    #[test]
    fn no_columns() {
        assert!(resolve_widths(20, &[]).is_empty());
    }

    #[test]
    fn option_conversion() {
        assert_eq!(ColumnWidth::from(None), Remainder);
        assert_eq!(ColumnWidth::from(Some(6)), Fixed(6));
    }

    #[test]
    fn layout_without_header_spans_full_height() {
        let container = RecordingRegion::new(Rect::new(0, 0, 40, 10));
        let layout = ColumnLayout::new(&container, &[Remainder, Fixed(6), Fixed(6)], false);
        let areas: Vec<Rect> = layout.columns().iter().map(|c| c.area()).collect();
        assert_eq!(
            areas,
            vec![
                Rect::new(0, 0, 28, 10),
                Rect::new(28, 0, 6, 10),
                Rect::new(34, 0, 6, 10),
            ]
        );
        assert!(layout.header().is_none());
    }

    #[test]
    fn layout_with_header_carves_top_row() {
        let container = RecordingRegion::new(Rect::new(0, 0, 40, 10));
        let layout = ColumnLayout::new(&container, &[Remainder, Fixed(6), Fixed(6)], true);
        let header: Vec<Rect> = layout.header().unwrap().iter().map(|c| c.area()).collect();
        let body: Vec<Rect> = layout.columns().iter().map(|c| c.area()).collect();
        assert_eq!(
            header,
            vec![
                Rect::new(0, 0, 28, 1),
                Rect::new(28, 0, 6, 1),
                Rect::new(34, 0, 6, 1),
            ]
        );
        assert_eq!(
            body,
            vec![
                Rect::new(0, 1, 28, 9),
                Rect::new(28, 1, 6, 9),
                Rect::new(34, 1, 6, 9),
            ]
        );
    }

    #[test]
    fn layout_drops_columns_that_do_not_fit() {
        let container = RecordingRegion::new(Rect::new(0, 0, 10, 3));
        let layout = ColumnLayout::new(&container, &[Fixed(6), Fixed(6)], false);
        assert_eq!(layout.columns().len(), 1);
        assert_eq!(layout.widths(), &[6]);
    }
}

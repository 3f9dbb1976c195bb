//! Column table with fixed-width justified cells, alternating row stripes, a
//! one-off header strip and per-row highlighting.

use ratatui::style::{Color, Modifier, Style};
use tabula_core::error::ScreenError;
use tabula_core::region::Region;
use tabula_core::text::StyledText;

use crate::cell::{format_cell, ColumnFormat, ColumnFormatPatch};
use crate::layout::{ColumnLayout, ColumnWidth};

/// Errors from table column lookups.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    /// The index does not name a laid-out column.
    #[error("column {index} out of range for a table with {len} columns")]
    ColumnOutOfRange {
        /// The requested column.
        index: usize,
        /// How many columns the table has.
        len: usize,
    },
}

/// Style configuration for the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableStyle {
    /// Base style of even rows (0, 2, ...) when striping.
    pub row: Style,
    /// Base style of odd rows when striping.
    pub alt_row: Style,
    /// Style laid under a row passed through [`Table::highlight_row`].
    pub highlight: Style,
    /// Style of the header cells.
    pub header: Style,
}

impl Default for TableStyle {
    fn default() -> Self {
        Self {
            row: Style::default().bg(Color::Rgb(0x00, 0x00, 0x00)),
            alt_row: Style::default().bg(Color::Rgb(0x2c, 0x2c, 0x2c)),
            highlight: Style::default().bg(Color::Rgb(0x80, 0x80, 0x80)),
            header: Style::default().add_modifier(Modifier::BOLD),
        }
    }
}

/// Construction options for a [`Table`].
///
/// Each table takes its own copy; changing one table's configuration never
/// affects another. Use struct update syntax to override only what you need:
///
/// ```
/// use tabula_widgets::table::TableConfig;
///
/// let config = TableConfig {
///     striped: false,
///     header: Some(vec!["Items".into(), "Price".into()]),
///     ..TableConfig::default()
/// };
/// assert!(config.header.is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableConfig {
    /// Alternate row backgrounds (default: true).
    pub striped: bool,
    /// Row, highlight and header styles.
    pub style: TableStyle,
    /// Format every column starts with (default: left, space-padded).
    pub default_format: ColumnFormat,
    /// Header labels. When set, the container's top row becomes the header.
    pub header: Option<Vec<StyledText>>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            striped: true,
            style: TableStyle::default(),
            default_format: ColumnFormat::default(),
            header: None,
        }
    }
}

/// One row of cell values.
///
/// Rows produced by [`Table::style_row`] or [`Table::highlight_row`] are
/// *prestyled*: [`Table::update`] leaves them as they are instead of striping
/// them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    cells: Vec<StyledText>,
    prestyled: bool,
}

impl Row {
    /// A plain row from anything that converts into cell text.
    pub fn new<I, T>(cells: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<StyledText>,
    {
        Self {
            cells: cells.into_iter().map(Into::into).collect(),
            prestyled: false,
        }
    }

    /// The cell values.
    pub fn cells(&self) -> &[StyledText] {
        &self.cells
    }

    /// Whether the row already carries its own row style.
    pub fn is_prestyled(&self) -> bool {
        self.prestyled
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the row has no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl From<Vec<StyledText>> for Row {
    fn from(cells: Vec<StyledText>) -> Self {
        Self {
            cells,
            prestyled: false,
        }
    }
}

impl FromIterator<StyledText> for Row {
    fn from_iter<I: IntoIterator<Item = StyledText>>(iter: I) -> Self {
        Self::new(iter)
    }
}

/// Build a [`Row`] from values of mixed types.
///
/// ```
/// use tabula_widgets::row;
///
/// let r = row!["Textiles", 5.8, 18];
/// assert_eq!(r.cells()[1].plain(), "5.8");
/// ```
#[macro_export]
macro_rules! row {
    () => {
        $crate::table::Row::default()
    };
    ($($cell:expr),+ $(,)?) => {
        $crate::table::Row::new([$(<$crate::StyledText>::from($cell)),*])
    };
}

struct Header<R: Region> {
    columns: Vec<R>,
    labels: Vec<StyledText>,
    drawn: bool,
}

/// A table of fixed-width columns laid out over a container region.
///
/// Columns are created once, at construction, from a list of
/// [`ColumnWidth`]s; widths that do not fit the container are dropped. Each
/// column buffers one formatted line per row. Paging is left to the caller,
/// who passes [`update`](Table::update) the slice of rows to show.
///
/// # Example
///
/// ```
/// use ratatui::layout::Rect;
/// use tabula_core::screen::{Screen, ScreenHandle};
/// use tabula_widgets::cell::Justify;
/// use tabula_widgets::layout::ColumnWidth;
/// use tabula_widgets::row;
/// use tabula_widgets::table::{Table, TableConfig};
///
/// let screen = ScreenHandle::new(Screen::new(Vec::new(), Rect::new(0, 0, 16, 2)));
/// let mut table = Table::new(
///     &screen.full_window(),
///     &[ColumnWidth::Remainder, ColumnWidth::Fixed(6)],
///     TableConfig::default(),
/// );
/// table.set_column_format(1, Justify::Right).unwrap();
/// table.update([row!["Food", 2.4], row!["Textiles", 5.8]]);
/// table.draw().unwrap();
/// assert_eq!(screen.borrow().render_string(), "Food         2.4\nTextiles     5.8");
/// ```
pub struct Table<R: Region> {
    columns: Vec<R>,
    formats: Vec<ColumnFormat>,
    striped: bool,
    style: TableStyle,
    header: Option<Header<R>>,
}

impl<R: Region> Table<R> {
    /// Lay a table out over `container`.
    pub fn new(container: &R, widths: &[ColumnWidth], config: TableConfig) -> Self {
        let TableConfig {
            striped,
            style,
            default_format,
            header,
        } = config;

        let (columns, header_columns) =
            ColumnLayout::new(container, widths, header.is_some()).into_parts();
        let header = header.zip(header_columns).map(|(labels, columns)| Header {
            columns,
            labels,
            drawn: false,
        });

        Self {
            formats: vec![default_format; columns.len()],
            columns,
            striped,
            style,
            header,
        }
    }

    /// Number of columns that fit the container.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// The body column regions.
    pub fn columns(&self) -> &[R] {
        &self.columns
    }

    /// Width of column `index`.
    pub fn column_width(&self, index: usize) -> Result<u16, TableError> {
        self.check_index(index)?;
        Ok(self.columns[index].width())
    }

    /// Format of column `index`.
    pub fn column_format(&self, index: usize) -> Result<&ColumnFormat, TableError> {
        self.formats.get(index).ok_or(TableError::ColumnOutOfRange {
            index,
            len: self.formats.len(),
        })
    }

    /// Merge `patch` into column `index`'s format. Fields the patch leaves
    /// unset keep their current value.
    pub fn set_column_format(
        &mut self,
        index: usize,
        patch: impl Into<ColumnFormatPatch>,
    ) -> Result<(), TableError> {
        self.check_index(index)?;
        self.formats[index].merge(patch.into());
        Ok(())
    }

    /// Number of rows the body can show, i.e. a sensible page size.
    pub fn page_size(&self) -> u16 {
        self.columns.first().map_or(0, |c| c.height())
    }

    /// Whether rows are striped.
    pub fn is_striped(&self) -> bool {
        self.striped
    }

    /// Turn striping on or off for subsequent updates.
    pub fn set_striped(&mut self, striped: bool) {
        self.striped = striped;
    }

    /// The style configuration.
    pub fn style(&self) -> &TableStyle {
        &self.style
    }

    /// Whether the header has been drawn (always `false` without a header).
    pub fn header_drawn(&self) -> bool {
        self.header.as_ref().is_some_and(|h| h.drawn)
    }

    /// Format every cell of `row` to its column's width and lay `style` under
    /// it.
    ///
    /// Styles already on a cell take precedence over `style`. Missing cells
    /// are filled with empty ones; cells past the last column are dropped. The
    /// result is prestyled, so [`update`](Table::update) will not stripe it.
    pub fn style_row(&self, row: impl Into<Row>, style: Style) -> Row {
        let row = row.into();
        let empty = StyledText::new();
        let cells = self
            .columns
            .iter()
            .zip(&self.formats)
            .enumerate()
            .map(|(i, (column, format))| {
                let value = row.cells.get(i).unwrap_or(&empty);
                format_cell(value, format, column.width()).style(style)
            })
            .collect();
        Row {
            cells,
            prestyled: true,
        }
    }

    /// Style `row` with the highlight style, whatever its position ends up
    /// being.
    pub fn highlight_row(&self, row: impl Into<Row>) -> Row {
        self.style_row(row, self.style.highlight)
    }

    /// Replace the table's content with `rows`, in order.
    ///
    /// With striping on, rows that are not prestyled get the row style at
    /// even indices and the alt-row style at odd ones.
    pub fn update<I>(&mut self, rows: I)
    where
        I: IntoIterator<Item = Row>,
    {
        self.clear();
        let empty = StyledText::new();
        let mut count = 0;
        for (i, row) in rows.into_iter().enumerate() {
            let row = if self.striped && !row.prestyled {
                let stripe = if i % 2 == 1 {
                    self.style.alt_row
                } else {
                    self.style.row
                };
                self.style_row(row, stripe)
            } else {
                row
            };
            for (c, column) in self.columns.iter_mut().enumerate() {
                let value = row.cells.get(c).unwrap_or(&empty);
                let width = column.width();
                column.append_line(format_cell(value, &self.formats[c], width));
            }
            count += 1;
        }
        log::trace!("table updated with {count} rows");
    }

    /// Empty every column's line buffer. Layout and formats are kept.
    pub fn clear(&mut self) {
        for column in &mut self.columns {
            column.clear();
        }
    }

    /// Paint the table.
    ///
    /// The header is painted on the first call only; body columns are fully
    /// repainted on every call.
    pub fn draw(&mut self) -> Result<(), ScreenError> {
        if let Some(header) = self.header.as_mut().filter(|h| !h.drawn) {
            let empty = StyledText::new();
            for (i, (column, format)) in header.columns.iter_mut().zip(&self.formats).enumerate() {
                let label = header.labels.get(i).unwrap_or(&empty);
                let width = column.width();
                column.clear();
                column.append_line(format_cell(label, format, width).style(self.style.header));
                column.draw()?;
            }
            header.drawn = true;
            log::debug!("table header drawn");
        }
        for column in &mut self.columns {
            column.draw()?;
        }
        Ok(())
    }

    fn check_index(&self, index: usize) -> Result<(), TableError> {
        if index < self.columns.len() {
            Ok(())
        } else {
            Err(TableError::ColumnOutOfRange {
                index,
                len: self.columns.len(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::Justify;
    use crate::layout::ColumnWidth::{Fixed, Remainder};
    use ratatui::layout::Rect;
    use tabula_core::screen::{Screen, ScreenHandle};
    use tabula_core::testing::RecordingRegion;

    fn region(width: u16, height: u16) -> RecordingRegion {
        RecordingRegion::new(Rect::new(0, 0, width, height))
    }

    fn sample_table() -> Table<RecordingRegion> {
        Table::new(
            &region(20, 6),
            &[Remainder, Fixed(6)],
            TableConfig::default(),
        )
    }

    /// Background of every span of a buffered line.
    fn backgrounds(line: &StyledText) -> Vec<Option<Color>> {
        line.spans().iter().map(|s| s.style.bg).collect()
    }

    fn all_bg(line: &StyledText, bg: Color) -> bool {
        backgrounds(line).iter().all(|b| *b == Some(bg))
    }

    // ── Layout and formats ──

    #[test]
    fn columns_follow_requested_widths() {
        let t = sample_table();
        assert_eq!(t.column_count(), 2);
        assert_eq!(t.column_width(0), Ok(14));
        assert_eq!(t.column_width(1), Ok(6));
        assert_eq!(t.page_size(), 6);
    }

    #[test]
    fn dropped_columns_have_no_format() {
        let mut t = Table::new(&region(10, 2), &[Fixed(6), Fixed(6)], TableConfig::default());
        assert_eq!(t.column_count(), 1);
        assert_eq!(
            t.set_column_format(1, Justify::Right),
            Err(TableError::ColumnOutOfRange { index: 1, len: 1 })
        );
    }

    #[test]
    fn every_column_starts_with_default_format() {
        let config = TableConfig {
            default_format: ColumnFormat::new(Justify::Center, '.'),
            ..TableConfig::default()
        };
        let t = Table::new(&region(20, 2), &[Fixed(5), Fixed(5), Remainder], config);
        for i in 0..3 {
            assert_eq!(t.column_format(i), Ok(&ColumnFormat::new(Justify::Center, '.')));
        }
    }

    #[test]
    fn set_column_format_merges_partially() {
        let mut t = sample_table();
        t.set_column_format(1, ColumnFormatPatch::justify(Justify::Right))
            .unwrap();
        t.set_column_format(1, ColumnFormatPatch::justify_character('*'))
            .unwrap();
        assert_eq!(t.column_format(1), Ok(&ColumnFormat::new(Justify::Right, '*')));
        // other columns untouched
        assert_eq!(t.column_format(0), Ok(&ColumnFormat::default()));
    }

    #[test]
    fn out_of_range_index_fails() {
        let mut t = sample_table();
        let err = t.set_column_format(5, Justify::Right).unwrap_err();
        assert_eq!(err, TableError::ColumnOutOfRange { index: 5, len: 2 });
        assert!(t.column_format(2).is_err());
        assert!(t.column_width(2).is_err());
        assert_eq!(
            err.to_string(),
            "column 5 out of range for a table with 2 columns"
        );
    }

    // ── Update and striping ──

    #[test]
    fn update_writes_one_padded_line_per_column() {
        let mut t = sample_table();
        t.set_column_format(1, Justify::Right).unwrap();
        t.update([row!["Food", 2.4], row!["Textiles", 5.8]]);
        let col0: Vec<String> = t.columns()[0].lines().iter().map(StyledText::plain).collect();
        let col1: Vec<String> = t.columns()[1].lines().iter().map(StyledText::plain).collect();
        assert_eq!(col0, vec!["Food          ", "Textiles      "]);
        assert_eq!(col1, vec!["   2.4", "   5.8"]);
    }

    #[test]
    fn striping_alternates_by_index() {
        let mut t = sample_table();
        t.update((0..5).map(|i| row![i, i * 10]));
        let style = TableStyle::default();
        let (row_bg, alt_bg) = (style.row.bg.unwrap(), style.alt_row.bg.unwrap());
        for column in t.columns() {
            for (i, line) in column.lines().iter().enumerate() {
                let expected = if i % 2 == 1 { alt_bg } else { row_bg };
                assert!(all_bg(line, expected), "row {i}: {:?}", backgrounds(line));
            }
        }
    }

    #[test]
    fn highlight_wins_regardless_of_parity() {
        let mut t = sample_table();
        let highlight = t.style().highlight.bg.unwrap();
        let rows = vec![
            t.highlight_row(row!["even", 1]),
            t.highlight_row(row!["odd", 2]),
            row!["plain", 3],
        ];
        t.update(rows);
        for column in t.columns() {
            assert!(all_bg(&column.lines()[0], highlight));
            assert!(all_bg(&column.lines()[1], highlight));
            assert!(!all_bg(&column.lines()[2], highlight));
        }
    }

    #[test]
    fn cell_style_layers_over_stripe() {
        let mut t = sample_table();
        let red = Style::default().fg(Color::Red);
        t.update([
            row!["Textiles", 5.8],
            Row::new([StyledText::raw("Food"), StyledText::styled("2.4", red)]),
        ]);
        let cell = &t.columns()[1].lines()[1];
        let value = cell.spans().iter().find(|s| s.content == "2.4").unwrap();
        assert_eq!(value.style.fg, Some(Color::Red));
        assert_eq!(value.style.bg, t.style().alt_row.bg);
    }

    #[test]
    fn no_striping_leaves_rows_unstyled() {
        let config = TableConfig {
            striped: false,
            ..TableConfig::default()
        };
        let mut t = Table::new(&region(20, 4), &[Remainder, Fixed(6)], config);
        t.update([row!["a", 1], row!["b", 2]]);
        for column in t.columns() {
            for line in column.lines() {
                assert!(backgrounds(line).iter().all(Option::is_none));
            }
        }
    }

    #[test]
    fn set_striped_toggles_for_next_update() {
        let mut t = sample_table();
        t.set_striped(false);
        assert!(!t.is_striped());
        t.update([row!["a", 1]]);
        assert!(backgrounds(&t.columns()[0].lines()[0])
            .iter()
            .all(Option::is_none));
    }

    #[test]
    fn empty_row_macro_fills_every_column() {
        let empty = row![];
        assert!(empty.is_empty());
        let mut t = sample_table();
        t.update([empty]);
        assert_eq!(t.columns()[0].lines()[0].plain(), " ".repeat(14));
        assert_eq!(t.columns()[1].lines()[0].plain(), "      ");
    }

    #[test]
    fn short_rows_are_filled_and_long_rows_cut() {
        let mut t = sample_table();
        t.update([row!["only"], row!["a", 1, "extra"]]);
        assert_eq!(t.columns()[1].lines().len(), 2);
        assert_eq!(t.columns()[1].lines()[0].plain(), "      ");
        assert_eq!(t.columns()[1].lines()[1].plain(), "1     ");
    }

    #[test]
    fn update_replaces_previous_content() {
        let mut t = sample_table();
        t.update([row!["a", 1], row!["b", 2], row!["c", 3]]);
        t.update([row!["z", 26]]);
        assert_eq!(t.columns()[0].lines().len(), 1);
        assert_eq!(t.columns()[0].lines()[0].plain().trim_end(), "z");
    }

    #[test]
    fn clear_empties_without_touching_formats() {
        let mut t = sample_table();
        t.set_column_format(0, Justify::Center).unwrap();
        t.update([row!["a", 1]]);
        t.clear();
        assert!(t.columns().iter().all(|c| c.lines().is_empty()));
        assert_eq!(t.column_format(0).unwrap().justify, Justify::Center);
        assert_eq!(t.column_count(), 2);
    }

    #[test]
    fn paging_by_slicing() {
        let rows: Vec<Row> = (0..10).map(|i| row![format!("item {i}"), i]).collect();
        let mut t = sample_table();
        let page = usize::from(t.page_size());
        t.update(rows[page..].iter().cloned());
        assert_eq!(t.columns()[0].lines().len(), 4);
        assert_eq!(t.columns()[0].lines()[0].plain().trim_end(), "item 6");
    }

    // ── Header and drawing ──

    fn header_table(container: &RecordingRegion) -> Table<RecordingRegion> {
        let config = TableConfig {
            header: Some(vec!["Items".into(), "Price".into()]),
            ..TableConfig::default()
        };
        Table::new(container, &[Remainder, Fixed(6)], config)
    }

    #[test]
    fn header_is_drawn_exactly_once() {
        let container = region(20, 5);
        let log = container.log();
        let mut t = header_table(&container);
        let header_rects = [Rect::new(0, 0, 14, 1), Rect::new(14, 0, 6, 1)];

        assert!(!t.header_drawn());
        t.update([row!["Food", 2.4]]);
        t.draw().unwrap();
        assert!(t.header_drawn());
        t.draw().unwrap();
        t.update([row!["Textiles", 5.8]]);
        t.draw().unwrap();

        for rect in header_rects {
            assert_eq!(log.draws_of(rect), 1);
        }
        assert_eq!(log.draws_of(Rect::new(0, 1, 14, 4)), 3);
        assert_eq!(log.draws()[0].lines, vec!["Items         ".to_string()]);
    }

    #[test]
    fn header_shrinks_the_body() {
        let t = header_table(&region(20, 5));
        assert_eq!(t.page_size(), 4);
        assert_eq!(t.columns()[0].area(), Rect::new(0, 1, 14, 4));
    }

    #[test]
    fn header_uses_header_style_and_column_format() {
        let container = region(20, 5);
        let log = container.log();
        let mut t = header_table(&container);
        t.set_column_format(1, Justify::Right).unwrap();
        t.draw().unwrap();
        assert_eq!(log.draws()[1].lines, vec![" Price".to_string()]);
    }

    #[test]
    fn draw_without_header_only_paints_body() {
        let container = region(20, 3);
        let log = container.log();
        let mut t = Table::new(&container, &[Remainder, Fixed(6)], TableConfig::default());
        t.draw().unwrap();
        assert_eq!(log.draws().len(), 2);
        assert!(!t.header_drawn());
    }

    #[test]
    fn renders_to_screen() {
        let screen = ScreenHandle::new(Screen::new(Vec::new(), Rect::new(0, 0, 20, 4)));
        let config = TableConfig {
            header: Some(vec!["Items".into(), "Price".into()]),
            ..TableConfig::default()
        };
        let mut t = Table::new(&screen.full_window(), &[Remainder, Fixed(6)], config);
        t.set_column_format(1, Justify::Right).unwrap();
        t.update([row!["Food", 2.4], row!["Radioactives", 17.9]]);
        let rows = vec![row!["Food", 2.4], t.highlight_row(row!["Luxuries", 98.1])];
        t.update(rows);
        t.draw().unwrap();
        assert_eq!(
            screen.borrow().render_string(),
            "Items          Price\n\
             Food             2.4\n\
             Luxuries        98.1\n                    "
        );
        let highlight = t.style().highlight.bg.unwrap();
        assert_eq!(screen.borrow().buffer()[(0, 2)].bg, highlight);
        assert_eq!(screen.borrow().buffer()[(19, 2)].bg, highlight);
    }

    #[test]
    fn overflowing_cell_is_clipped_by_its_column() {
        let screen = ScreenHandle::new(Screen::new(Vec::new(), Rect::new(0, 0, 12, 1)));
        let mut t = Table::new(
            &screen.full_window(),
            &[Fixed(6), Fixed(6)],
            TableConfig::default(),
        );
        t.update([row!["Radioactives", 17.9]]);
        assert_eq!(t.columns()[0].lines()[0].plain(), "Radioactives");
        t.draw().unwrap();
        assert_eq!(screen.borrow().render_string(), "Radioa17.9  ");
    }
}

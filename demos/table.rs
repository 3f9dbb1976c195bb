//! Fixed-width table with a header, custom styles, a styled cell and a
//! highlighted row. Press Ctrl+C to quit.
//!
//! Run with `RUST_LOG=debug` to get a trace in `tabula.log`.

use tabula::ratatui::layout::Rect;
use tabula::ratatui::style::{Color, Modifier, Style};
use tabula::widgets::{row, ColumnWidth, Justify, Table, TableConfig, TableStyle};
use tabula::{
    log_to_file, CrosstermKeys, EventSource, Screen, ScreenHandle, StyledText, Terminal,
    TerminalSession,
};

fn rgb(hex: u32) -> Color {
    Color::Rgb((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(Box::new(log_to_file("tabula.log")?)))
        .init();

    let _session = TerminalSession::start()?;
    let mut screen = ScreenHandle::new(Screen::stdout()?);
    let fg = rgb(0xA2AADD);

    // 40x10 window at the top left
    let window = screen.window(Rect::new(0, 0, 40, 10));
    let config = TableConfig {
        header: Some(vec!["Items".into(), "Price".into(), "Count".into()]),
        style: TableStyle {
            header: Style::default()
                .bg(rgb(0x232D51))
                .fg(fg)
                .add_modifier(Modifier::BOLD),
            row: Style::default().bg(rgb(0x1B1E2D)).fg(fg),
            alt_row: Style::default().bg(rgb(0x181A28)).fg(fg),
            highlight: Style::default().bg(rgb(0x232D51)).fg(fg),
        },
        ..TableConfig::default()
    };
    let widths = [ColumnWidth::Remainder, ColumnWidth::Fixed(6), ColumnWidth::Fixed(6)];
    let mut table = Table::new(&window, &widths, config);
    table.set_column_format(1, Justify::Right)?;
    table.set_column_format(2, Justify::Right)?;

    let rows = vec![
        row!["Food", StyledText::styled("2.4", Style::default().fg(rgb(0xff0000))), 10],
        row!["Textiles", 5.8, 18],
        row!["Radioactives", 17.9, 25],
        table.highlight_row(row!["Luxuries", "98.1", "2"]),
        row!["Computers", 67.2, 7],
        row!["Machinery", 45.8, 8],
    ];
    // slicing is how callers page through longer data
    let page = usize::from(table.page_size()).min(rows.len());
    table.update(rows[..page].iter().cloned());
    table.draw()?;
    screen.flush()?;

    log::info!("table demo drawn, waiting for Ctrl+C");
    CrosstermKeys::new().listen(&mut |_| Ok(()))?;
    Ok(())
}

//! Input prompt echoing every submitted line into a table above it.
//!
//! Enter submits the line, Tab shows how many tokens it has, Ctrl+C quits.

use std::cell::RefCell;
use std::rc::Rc;

use tabula::ratatui::layout::Rect;
use tabula::ratatui::style::{Color, Style};
use tabula::widgets::{
    row, ColumnWidth, InputPrompt, InputPromptStyle, Justify, Row, Table, TableConfig,
};
use tabula::{
    log_to_file, CrosstermKeys, Region, Screen, ScreenHandle, StyledText, TerminalSession,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(Box::new(log_to_file("tabula.log")?)))
        .init();

    let _session = TerminalSession::start()?;
    let screen = ScreenHandle::new(Screen::stdout()?);
    let area = screen.area();
    let body = area.height.saturating_sub(2);

    let config = TableConfig {
        header: Some(vec!["Line".into(), "Tokens".into()]),
        ..TableConfig::default()
    };
    let mut table = Table::new(
        &screen.window(Rect::new(0, 0, area.width, body)),
        &[ColumnWidth::Remainder, ColumnWidth::Fixed(8)],
        config,
    );
    table.set_column_format(1, Justify::Right)?;
    table.draw()?;

    let table = Rc::new(RefCell::new(table));
    let history: Rc<RefCell<Vec<Row>>> = Rc::default();
    let status = Rc::new(RefCell::new(screen.window(Rect::new(0, body, area.width, 1))));

    let on_enter = {
        let table = Rc::clone(&table);
        move |line: &str, tokens: &[&str]| {
            let mut history = history.borrow_mut();
            history.push(row![line, tokens.len()]);
            let mut table = table.borrow_mut();
            let skip = history.len().saturating_sub(usize::from(table.page_size()));
            table.update(history[skip..].iter().cloned());
            table.draw()
        }
    };
    let on_tab = {
        let status = Rc::clone(&status);
        move |_: &str, tokens: &[&str]| {
            let mut status = status.borrow_mut();
            status.clear();
            status.append_line(StyledText::styled(
                format!("{} tokens", tokens.len()),
                Style::default().fg(Color::DarkGray),
            ));
            status.draw()
        }
    };

    let style = InputPromptStyle {
        prefix: Style::default().fg(Color::Cyan),
        text: Style::default(),
    };
    let mut prompt = InputPrompt::new(
        screen.window(Rect::new(0, body + 1, area.width, 1)),
        screen.clone(),
        on_enter,
    )
    .with_style(style)
    .with_on_tab(on_tab);

    log::info!("prompt demo started");
    prompt.listen(&mut CrosstermKeys::new())?;
    Ok(())
}

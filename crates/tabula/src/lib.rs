//! **tabula** -- column tables and input prompts for the terminal.
//!
//! Umbrella crate re-exporting everything from a single dependency:
//!
//! ```toml
//! [dependencies]
//! tabula = "0.1"
//! ```
//!
//! # Re-exports
//!
//! * All public items from [`tabula_core`] are available at the crate root
//!   ([`Region`], [`StyledText`], [`Screen`], [`CrosstermKeys`],
//!   [`TerminalSession`], etc.).
//! * The [`widgets`] module re-exports everything from [`tabula_widgets`]
//!   ([`Table`](widgets::Table), [`InputPrompt`](widgets::InputPrompt) and
//!   their configuration types).
//! * [`ratatui`] and [`crossterm`] are re-exported so downstream crates do not
//!   need to depend on them directly.
//!
//! # Quick start
//!
//! ```no_run
//! use tabula::widgets::{row, ColumnWidth, Justify, Table, TableConfig};
//! use tabula::{Screen, ScreenHandle, Terminal, TerminalSession};
//!
//! fn main() -> Result<(), tabula::ScreenError> {
//!     let _session = TerminalSession::start()?;
//!     let mut screen = ScreenHandle::new(Screen::stdout()?);
//!     let mut table = Table::new(
//!         &screen.full_window(),
//!         &[ColumnWidth::Remainder, ColumnWidth::Fixed(8)],
//!         TableConfig::default(),
//!     );
//!     table.set_column_format(1, Justify::Right).expect("two columns");
//!     table.update([row!["Food", 2.4], row!["Textiles", 5.8]]);
//!     table.draw()?;
//!     screen.flush()
//! }
//! ```

pub use tabula_core::*;
pub mod widgets {
    pub use tabula_widgets::*;
}

// Re-export dependencies for use in demos and downstream crates
pub use crossterm;
pub use ratatui;

//! Collaborator layer for the **tabula** widgets.
//!
//! Widgets in `tabula-widgets` never touch the terminal directly. They go
//! through the small set of contracts defined here, so every one of them can
//! be swapped for a test double.
//!
//! # Key types
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`Region`] | Rectangular screen area with a line buffer; splits into sub-regions |
//! | [`StyledText`] | Spans of text whose style never counts toward visible width |
//! | [`EventSource`] | Blocking source of [`Key`] events |
//! | [`Terminal`] | Cursor visibility and output flushing |
//! | [`Screen`] / [`Window`] | Double-buffered crossterm implementation of the above |
//! | [`CrosstermKeys`] | Keyboard [`EventSource`] backed by crossterm |
//! | [`TerminalSession`] | Raw-mode guard that restores the terminal on drop |
//!
//! The [`testing`] module holds in-memory doubles for every contract.

pub mod error;
pub mod key;
pub mod region;
pub mod runeutil;
pub mod screen;
pub mod session;
pub mod terminal;
pub mod testing;
pub mod text;

pub use error::ScreenError;
pub use key::{CrosstermKeys, EventSource, Key, KeyCombination};
pub use region::Region;
pub use screen::{Screen, ScreenHandle, Window};
pub use session::{log_to_file, SessionOptions, TerminalSession};
pub use terminal::Terminal;
pub use text::{StyledText, WrappedLines};

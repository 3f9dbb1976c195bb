//! Table and prompt widgets for **tabula**.
//!
//! Widgets are generic over the collaborator traits of [`tabula_core`]
//! ([`Region`](tabula_core::Region), [`Terminal`](tabula_core::Terminal),
//! [`EventSource`](tabula_core::EventSource)), so they draw to a real
//! [`Screen`](tabula_core::Screen) or to the in-memory
//! [`testing`](tabula_core::testing) doubles alike.
//!
//! # Widgets
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`table`] | Fixed-width column table with striping, highlight and a header |
//! | [`input_prompt`] | Blocking single-line prompt with enter/tab callbacks |
//!
//! # Building blocks
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`layout`] | Resolving column widths and splitting a region into columns |
//! | [`cell`] | Justifying and padding a value to its column |

pub mod cell;
pub mod input_prompt;
pub mod layout;
pub mod table;

pub use cell::{format_cell, ColumnFormat, ColumnFormatPatch, Justify};
pub use input_prompt::{InputPrompt, InputPromptStyle, SubmitFn};
pub use layout::{resolve_widths, ColumnLayout, ColumnWidth};
pub use table::{Row, Table, TableConfig, TableError, TableStyle};
pub use tabula_core::StyledText;

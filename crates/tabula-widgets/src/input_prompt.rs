//! Single-line input prompt driven by a blocking key source.

use ratatui::style::Style;
use tabula_core::error::ScreenError;
use tabula_core::key::{EventSource, Key};
use tabula_core::region::Region;
use tabula_core::terminal::Terminal;
use tabula_core::text::StyledText;

/// Callback run with the buffer and its whitespace-separated tokens.
pub type SubmitFn = Box<dyn FnMut(&str, &[&str]) -> Result<(), ScreenError>>;

/// Style configuration for the input prompt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputPromptStyle {
    /// Base style of the prefix.
    pub prefix: Style,
    /// Style of the typed text.
    pub text: Style,
}

/// A prompt reading one line at a time into a buffer.
///
/// Every key is applied to the buffer, then the prompt repaints
/// `prefix + buffer + cursor`, word-wrapped to its region, and flushes the
/// terminal. Enter hands the line to `on_enter` and empties the buffer; Tab
/// hands it to `on_tab`, if set, and leaves it alone.
///
/// # Example
///
/// ```
/// use ratatui::layout::Rect;
/// use tabula_core::testing::{RecordingRegion, RecordingTerminal, ScriptedKeys};
/// use tabula_core::key::Key;
/// use tabula_widgets::input_prompt::InputPrompt;
///
/// let region = RecordingRegion::new(Rect::new(0, 0, 20, 1));
/// let mut prompt = InputPrompt::new(region, RecordingTerminal::new(), |line, tokens| {
///     assert_eq!(line, "go north");
///     assert_eq!(tokens, ["go", "north"]);
///     Ok(())
/// });
/// prompt.listen(&mut ScriptedKeys::typed("go north").then(Key::Enter)).unwrap();
/// assert_eq!(prompt.value(), "");
/// ```
pub struct InputPrompt<R: Region, T: Terminal> {
    buffer: String,
    prefix: StyledText,
    cursor: StyledText,
    style: InputPromptStyle,
    region: R,
    terminal: T,
    on_enter: SubmitFn,
    on_tab: Option<SubmitFn>,
}

impl<R: Region, T: Terminal> InputPrompt<R, T> {
    /// A prompt over `region` with prefix `"> "` and a block cursor.
    pub fn new<F>(region: R, terminal: T, on_enter: F) -> Self
    where
        F: FnMut(&str, &[&str]) -> Result<(), ScreenError> + 'static,
    {
        Self {
            buffer: String::new(),
            prefix: StyledText::raw("> "),
            cursor: StyledText::raw("\u{2588}"),
            style: InputPromptStyle::default(),
            region,
            terminal,
            on_enter: Box::new(on_enter),
            on_tab: None,
        }
    }

    /// Set the prefix shown before the buffer.
    pub fn with_prefix(mut self, prefix: impl Into<StyledText>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Set the glyph drawn after the buffer.
    pub fn with_cursor(mut self, cursor: impl Into<StyledText>) -> Self {
        self.cursor = cursor.into();
        self
    }

    /// Set the style configuration.
    pub fn with_style(mut self, style: InputPromptStyle) -> Self {
        self.style = style;
        self
    }

    /// Register the Tab callback.
    pub fn with_on_tab<F>(mut self, on_tab: F) -> Self
    where
        F: FnMut(&str, &[&str]) -> Result<(), ScreenError> + 'static,
    {
        self.on_tab = Some(Box::new(on_tab));
        self
    }

    /// Change the prefix; shown from the next refresh on.
    pub fn set_prefix(&mut self, prefix: impl Into<StyledText>) {
        self.prefix = prefix.into();
    }

    /// The line typed so far.
    pub fn value(&self) -> &str {
        &self.buffer
    }

    /// The region the prompt paints into.
    pub fn region(&self) -> &R {
        &self.region
    }

    /// Apply one key to the buffer, running callbacks as needed.
    ///
    /// Backspace on an empty buffer and Tab without a callback do nothing.
    pub fn handle_key(&mut self, key: Key) -> Result<(), ScreenError> {
        log::trace!("prompt key {key:?}");
        match key {
            Key::Backspace => {
                self.buffer.pop();
            }
            Key::Tab => {
                if let Some(on_tab) = self.on_tab.as_mut() {
                    let tokens: Vec<&str> = self.buffer.split_whitespace().collect();
                    on_tab(&self.buffer, &tokens)?;
                }
            }
            Key::Enter => {
                let line = std::mem::take(&mut self.buffer);
                let tokens: Vec<&str> = line.split_whitespace().collect();
                log::debug!("prompt submitted {} tokens", tokens.len());
                (self.on_enter)(&line, &tokens)?;
            }
            Key::Char(c) => self.buffer.push(c),
        }
        Ok(())
    }

    /// Repaint the prompt and flush the terminal.
    pub fn refresh(&mut self) -> Result<(), ScreenError> {
        let text = self
            .prefix
            .style(self.style.prefix)
            .concat(&StyledText::styled(self.buffer.as_str(), self.style.text))
            .concat(&self.cursor);

        self.region.clear();
        for line in text.wrap(self.region.width()) {
            self.region.append_line(line);
        }
        self.region.draw()?;
        self.terminal.flush()
    }

    /// Hide the cursor, paint the prompt, then handle and repaint for every
    /// key `events` delivers.
    ///
    /// Returns when `events` runs dry or anything fails. The cursor is shown
    /// again either way.
    pub fn listen(&mut self, events: &mut impl EventSource) -> Result<(), ScreenError> {
        log::debug!("prompt listening");
        self.terminal.hide_cursor()?;
        let result = self.refresh().and_then(|()| {
            events.listen(&mut |key: Key| -> Result<(), ScreenError> {
                self.handle_key(key)?;
                self.refresh()
            })
        });
        let restored = self.terminal.show_cursor();
        log::debug!("prompt stopped listening");
        result.and(restored)
    }
}

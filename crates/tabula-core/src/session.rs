//! Terminal setup and teardown for interactive use.

use std::io::{stdout, Write};

use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};

use crate::error::ScreenError;

/// Configuration options for a [`TerminalSession`].
///
/// Use struct update syntax to override only the options you need:
///
/// ```rust,ignore
/// let opts = SessionOptions {
///     alt_screen: false,
///     ..SessionOptions::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Switch to the alternate screen (default: true).
    pub alt_screen: bool,
    /// Restore the terminal before a panic message is printed (default: true).
    pub catch_panics: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            alt_screen: true,
            catch_panics: true,
        }
    }
}

/// Puts the terminal into raw mode for as long as it lives.
///
/// Dropping the session disables raw mode, leaves the alternate screen and
/// shows the cursor, whatever state widgets left it in.
#[derive(Debug)]
pub struct TerminalSession {
    options: SessionOptions,
}

impl TerminalSession {
    /// Enter raw mode with default options.
    pub fn start() -> Result<Self, ScreenError> {
        Self::with_options(SessionOptions::default())
    }

    /// Enter raw mode with the given options.
    pub fn with_options(options: SessionOptions) -> Result<Self, ScreenError> {
        // Install panic hook that restores terminal (only once to avoid stacking)
        if options.catch_panics {
            use std::sync::Once;
            static HOOK_INSTALLED: Once = Once::new();
            let alt_screen = options.alt_screen;
            HOOK_INSTALLED.call_once(|| {
                let original_hook = std::panic::take_hook();
                std::panic::set_hook(Box::new(move |info| {
                    let _ = restore_terminal(alt_screen);
                    original_hook(info);
                }));
            });
        }

        enable_raw_mode()?;
        if options.alt_screen {
            execute!(stdout(), EnterAlternateScreen)?;
        }
        log::debug!("terminal session started (alt_screen: {})", options.alt_screen);
        Ok(Self { options })
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        if let Err(e) = restore_terminal(self.options.alt_screen) {
            log::warn!("failed to restore terminal: {e}");
        }
    }
}

fn restore_terminal(alt_screen: bool) -> Result<(), std::io::Error> {
    // Use best-effort cleanup: continue even if individual steps fail,
    // so we restore as much terminal state as possible.
    let r1 = disable_raw_mode();
    let mut writer = stdout();
    execute!(writer, crossterm::cursor::Show).ok();
    if alt_screen {
        execute!(writer, LeaveAlternateScreen).ok();
    }
    writer.flush().ok();
    r1
}

/// Open a log file for debugging terminal applications.
///
/// The screen belongs to the UI, so log output has to go elsewhere. The file
/// is opened in append mode; hand it to a logger such as `env_logger`'s
/// `Target::Pipe`.
///
/// # Example
///
/// ```no_run
/// use std::io::Write;
/// use tabula_core::session::log_to_file;
///
/// let mut f = log_to_file("debug.log").unwrap();
/// writeln!(f, "debug message").unwrap();
/// ```
pub fn log_to_file(path: impl AsRef<std::path::Path>) -> Result<std::fs::File, std::io::Error> {
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options() {
        let opts = SessionOptions::default();
        assert!(opts.alt_screen);
        assert!(opts.catch_panics);
    }

    #[test]
    fn log_to_file_appends() {
        let path = std::env::temp_dir().join(format!("tabula-log-{}.log", std::process::id()));
        {
            let mut f = log_to_file(&path).unwrap();
            writeln!(f, "one").unwrap();
        }
        {
            let mut f = log_to_file(&path).unwrap();
            writeln!(f, "two").unwrap();
        }
        let content = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(content, "one\ntwo\n");
    }
}

/// Errors raised while drawing, flushing, reading keys or setting up the terminal.
#[derive(Debug, thiserror::Error)]
pub enum ScreenError {
    /// An I/O error from terminal setup, painting, flushing or event reading.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

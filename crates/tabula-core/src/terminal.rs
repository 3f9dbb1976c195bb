use crate::error::ScreenError;

/// Terminal-level control: cursor visibility and pushing output to the device.
pub trait Terminal {
    /// Hide the hardware cursor.
    fn hide_cursor(&mut self) -> Result<(), ScreenError>;

    /// Show the hardware cursor again.
    fn show_cursor(&mut self) -> Result<(), ScreenError>;

    /// Write everything drawn so far to the output stream.
    fn flush(&mut self) -> Result<(), ScreenError>;
}

//! Status bar message.

/// User-facing status line.
pub struct StatusState {
    /// Message shown in the status bar.
    pub text: String,
    /// Whether `text` reports a failure.
    pub is_error: bool,
}

impl Default for StatusState {
    fn default() -> Self {
        Self {
            text: "Drop a map (upper half) or reference (lower half)".to_string(),
            is_error: false,
        }
    }
}

impl StatusState {
    /// Show an informational message.
    pub fn set(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.is_error = false;
    }

    /// Show an error message.
    pub fn set_error(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.is_error = true;
    }
}

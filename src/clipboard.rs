//! System clipboard access

use anyhow::Result;

/// Source of pasted text
#[cfg_attr(test, mockall::automock)]
pub trait ClipboardProvider {
    /// Current clipboard text
    fn text(&mut self) -> Result<String>;
}

/// Clipboard backed by the OS, opened on first use
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ClipboardProvider for SystemClipboard {
    fn text(&mut self) -> Result<String> {
        let clipboard = match self.inner.as_mut() {
            Some(clipboard) => clipboard,
            None => self.inner.insert(arboard::Clipboard::new()?),
        };
        Ok(clipboard.get_text()?)
    }
}

//! InputDriver - Abstract Automation Capability
//!
//! The check routines only ever talk to the page through this trait, so the
//! same checklist runs against a real Chromium page ([`CdpInputDriver`]
//! behind the `browser` feature) or the in-memory [`MockPage`].
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │  InputDriver (Abstract Trait)                                 │
//! ├───────────────────────────────────────────────────────────────┤
//! │  ┌─────────────────────┐        ┌─────────────────────┐       │
//! │  │  CdpInputDriver     │        │  MockPage           │       │
//! │  │  (feature browser)  │        │  (always available) │       │
//! │  │  chromiumoxide CDP  │        │  in-memory DOM      │       │
//! │  └─────────────────────┘        └─────────────────────┘       │
//! └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! [`CdpInputDriver`]: crate::CdpInputDriver
//! [`MockPage`]: crate::MockPage

use crate::locator::{Locator, Selector};
use crate::result::FormsResult;
use async_trait::async_trait;
use std::path::PathBuf;

/// Key and key-combo names understood by drivers
pub mod keys {
    /// Increment a number/range field
    pub const ARROW_UP: &str = "ArrowUp";
    /// Decrement a number/range field
    pub const ARROW_DOWN: &str = "ArrowDown";
    /// Clear a search field
    pub const ESCAPE: &str = "Escape";
    /// Submit the enclosing form
    pub const ENTER: &str = "Enter";
    /// Paste on Linux and Windows
    pub const CONTROL_V: &str = "Control+V";
    /// Paste on macOS
    pub const META_V: &str = "Meta+V";

    /// Platform paste shortcut
    #[must_use]
    pub const fn platform_paste() -> &'static str {
        if cfg!(target_os = "macos") {
            META_V
        } else {
            CONTROL_V
        }
    }

    /// Whether a key combo is a paste shortcut
    #[must_use]
    pub fn is_paste(combo: &str) -> bool {
        let mut parts = combo.split('+').map(str::trim);
        let key = parts.next_back().unwrap_or_default();
        let has_modifier = parts.any(|m| {
            m.eq_ignore_ascii_case("control")
                || m.eq_ignore_ascii_case("meta")
                || m.eq_ignore_ascii_case("controlormeta")
        });
        has_modifier && key.eq_ignore_ascii_case("v")
    }
}

/// Abstract driver trait for form-input automation
///
/// Element-scoped operations take the target [`Locator`]; page-scoped ones
/// (clipboard, keyboard) act on whatever currently has focus.
///
/// Implementations must return [`FormsError::NotFillable`] from
/// [`fill`](Self::fill) when the element type does not accept text
/// (checkbox, radio, file).
///
/// [`FormsError::NotFillable`]: crate::FormsError::NotFillable
#[async_trait]
pub trait InputDriver: Send + Sync {
    /// Whether the element is rendered and visible
    async fn is_visible(&self, target: &Locator) -> FormsResult<bool>;

    /// Whether the element is absent from the layout (present but not visible)
    async fn is_hidden(&self, target: &Locator) -> FormsResult<bool> {
        Ok(!self.is_visible(target).await?)
    }

    /// Replace the element's value as a user would
    async fn fill(&self, target: &Locator, value: &str) -> FormsResult<()>;

    /// Current value of the element
    async fn input_value(&self, target: &Locator) -> FormsResult<String>;

    /// Read an attribute (`None` when absent)
    async fn get_attribute(&self, target: &Locator, name: &str) -> FormsResult<Option<String>>;

    /// Read a computed style property
    async fn computed_style(&self, target: &Locator, property: &str) -> FormsResult<String>;

    /// Focus the element
    async fn focus(&self, target: &Locator) -> FormsResult<()>;

    /// Whether the element has focus
    async fn is_focused(&self, target: &Locator) -> FormsResult<bool>;

    /// Click the element
    async fn click(&self, target: &Locator) -> FormsResult<()>;

    /// Check a checkbox or radio
    async fn check(&self, target: &Locator) -> FormsResult<()>;

    /// Uncheck a checkbox
    async fn uncheck(&self, target: &Locator) -> FormsResult<()>;

    /// Whether a checkbox or radio is checked
    async fn is_checked(&self, target: &Locator) -> FormsResult<bool>;

    /// Whether the element is disabled
    async fn is_disabled(&self, target: &Locator) -> FormsResult<bool>;

    /// Set the selected files of a file input (empty clears it)
    async fn set_input_files(&self, target: &Locator, files: &[PathBuf]) -> FormsResult<()>;

    /// Number of files currently selected
    async fn selected_file_count(&self, target: &Locator) -> FormsResult<usize>;

    /// Focus the element and press a key combo on it
    async fn press(&self, target: &Locator, key: &str) -> FormsResult<()>;

    /// Write text to the system clipboard
    async fn write_clipboard(&self, text: &str) -> FormsResult<()>;

    /// Press a key combo on whatever has focus
    async fn keyboard_press(&self, key: &str) -> FormsResult<()>;

    /// Other elements matching `selector`, excluding `target`, in document order
    async fn query_siblings(&self, target: &Locator, selector: &Selector)
        -> FormsResult<Vec<Locator>>;
}

#[cfg(test)]
mod tests {
    use super::keys;

    #[test]
    fn test_paste_detection() {
        assert!(keys::is_paste("Control+V"));
        assert!(keys::is_paste("Meta+v"));
        assert!(keys::is_paste("ControlOrMeta+V"));
        assert!(!keys::is_paste("V"));
        assert!(!keys::is_paste("Control+C"));
        assert!(!keys::is_paste("Shift+V"));
    }

    #[test]
    fn test_platform_paste_is_a_paste() {
        assert!(keys::is_paste(keys::platform_paste()));
    }
}

//! Locator abstraction for the input element under test.
//!
//! A [`Locator`] is an opaque, cloneable handle: the suite never resolves it
//! itself, it only hands it back to the [`InputDriver`](crate::InputDriver).
//! Drivers that talk to a real page render it to a DOM query expression.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Selector type for locating elements
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Selector {
    /// CSS selector (e.g., "input#email")
    Css(String),
    /// Test ID selector (data-testid attribute)
    TestId(String),
    /// The `index`-th match of a CSS selector
    Nth {
        /// Base CSS selector
        css: String,
        /// Zero-based match index
        index: usize,
    },
}

impl Selector {
    /// Create a CSS selector
    #[must_use]
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css(selector.into())
    }

    /// Create a test ID selector
    #[must_use]
    pub fn test_id(id: impl Into<String>) -> Self {
        Self::TestId(id.into())
    }

    /// Selector matching every radio button of a named group
    #[must_use]
    pub fn radio_group(name: &str) -> Self {
        Self::Css(format!(
            "input[type=\"radio\"][name=\"{}\"]",
            css_string(name)
        ))
    }

    /// Equivalent CSS selector (without the match index for `Nth`)
    #[must_use]
    pub fn to_css(&self) -> String {
        match self {
            Self::Css(s) | Self::Nth { css: s, .. } => s.clone(),
            Self::TestId(id) => format!("[data-testid=\"{}\"]", css_string(id)),
        }
    }

    /// Convert to a JavaScript expression yielding the element (or null)
    #[must_use]
    pub fn to_query(&self) -> String {
        match self {
            Self::Css(_) | Self::TestId(_) => {
                format!("document.querySelector({})", js_string(&self.to_css()))
            }
            Self::Nth { css, index } => {
                format!("(document.querySelectorAll({})[{index}] || null)", js_string(css))
            }
        }
    }
}

/// Escape a value for a double-quoted CSS attribute string
fn css_string(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// JSON string literal, which is also a valid JavaScript string literal
fn js_string(s: &str) -> String {
    serde_json::Value::from(s).to_string()
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Css(s) => write!(f, "{s}"),
            Self::TestId(id) => write!(f, "[data-testid=\"{id}\"]"),
            Self::Nth { css, index } => write!(f, "{css} >> nth={index}"),
        }
    }
}

/// Handle to one rendered input control.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Locator {
    selector: Selector,
}

impl Locator {
    /// Create a locator from a CSS selector
    #[must_use]
    pub fn new(selector: impl Into<String>) -> Self {
        Self::from_selector(Selector::css(selector))
    }

    /// Create a locator from a data-testid
    #[must_use]
    pub fn test_id(id: impl Into<String>) -> Self {
        Self::from_selector(Selector::test_id(id))
    }

    /// Create a locator from any selector
    #[must_use]
    pub const fn from_selector(selector: Selector) -> Self {
        Self { selector }
    }

    /// Narrow to the `index`-th match
    #[must_use]
    pub fn nth(&self, index: usize) -> Self {
        Self::from_selector(Selector::Nth {
            css: self.selector.to_css(),
            index,
        })
    }

    /// The underlying selector
    #[must_use]
    pub const fn selector(&self) -> &Selector {
        &self.selector
    }

    /// JavaScript expression resolving this locator
    #[must_use]
    pub fn to_query(&self) -> String {
        self.selector.to_query()
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.selector.fmt(f)
    }
}

impl From<&str> for Locator {
    fn from(selector: &str) -> Self {
        Self::new(selector)
    }
}

impl From<Selector> for Locator {
    fn from(selector: Selector) -> Self {
        Self::from_selector(selector)
    }
}

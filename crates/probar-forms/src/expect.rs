//! Soft expectations against a live element.
//!
//! An [`Expectation`] reads the element's state through the driver once and
//! records the result into a [`SoftAssertions`] collector. A mismatch is an
//! `Ok(())` with a failed outcome recorded; only driver errors (or fail-fast
//! mode) produce `Err`.
//!
//! ```ignore
//! Expectation::new(&driver, &target, &mut soft, "Email input should accept a valid email.")
//!     .to_have_value("test@example.com")
//!     .await?;
//! Expectation::new(&driver, &target, &mut soft, "URL input should not accept an invalid URL.")
//!     .not()
//!     .to_have_value("invalid-url")
//!     .await?;
//! ```

use crate::assertion::soft::SoftAssertions;
use crate::driver::InputDriver;
use crate::locator::Locator;
use crate::result::FormsResult;

/// A pending soft assertion on one element
#[derive(Debug)]
pub struct Expectation<'r, D: InputDriver + ?Sized> {
    driver: &'r D,
    target: &'r Locator,
    soft: &'r mut SoftAssertions,
    message: String,
    negated: bool,
}

impl<'r, D: InputDriver + ?Sized> Expectation<'r, D> {
    /// Create an expectation with the message recorded on pass or fail
    pub fn new(
        driver: &'r D,
        target: &'r Locator,
        soft: &'r mut SoftAssertions,
        message: impl Into<String>,
    ) -> Self {
        Self {
            driver,
            target,
            soft,
            message: message.into(),
            negated: false,
        }
    }

    /// Invert the following matcher
    #[must_use]
    pub const fn not(mut self) -> Self {
        self.negated = !self.negated;
        self
    }

    /// Element is visible
    pub async fn to_be_visible(self) -> FormsResult<()> {
        let visible = self.driver.is_visible(self.target).await?;
        self.conclude(visible, "visible", if visible { "visible" } else { "hidden" })
    }

    /// Element is present but not visible
    pub async fn to_be_hidden(self) -> FormsResult<()> {
        let hidden = self.driver.is_hidden(self.target).await?;
        self.conclude(hidden, "hidden", if hidden { "hidden" } else { "visible" })
    }

    /// Element value equals `expected`
    pub async fn to_have_value(self, expected: &str) -> FormsResult<()> {
        let actual = self.driver.input_value(self.target).await?;
        let matched = actual == expected;
        self.conclude(
            matched,
            &format!("value {expected:?}"),
            &format!("{actual:?}"),
        )
    }

    /// Attribute `name` equals `expected`
    pub async fn to_have_attribute(self, name: &str, expected: &str) -> FormsResult<()> {
        let actual = self.driver.get_attribute(self.target, name).await?;
        let matched = actual.as_deref() == Some(expected);
        let received = actual.map_or_else(|| "no attribute".to_string(), |v| format!("{v:?}"));
        self.conclude(matched, &format!("{name}={expected:?}"), &received)
    }

    /// Computed style `property` equals `expected`
    pub async fn to_have_css(self, property: &str, expected: &str) -> FormsResult<()> {
        let actual = self.driver.computed_style(self.target, property).await?;
        let matched = actual == expected;
        self.conclude(
            matched,
            &format!("{property}: {expected}"),
            &format!("{property}: {actual}"),
        )
    }

    /// Element is disabled
    pub async fn to_be_disabled(self) -> FormsResult<()> {
        let disabled = self.driver.is_disabled(self.target).await?;
        self.conclude(
            disabled,
            "disabled",
            if disabled { "disabled" } else { "enabled" },
        )
    }

    /// Element is checked
    pub async fn to_be_checked(self) -> FormsResult<()> {
        self.to_be_checked_with(true).await
    }

    /// Element checked state equals `checked`
    pub async fn to_be_checked_with(self, checked: bool) -> FormsResult<()> {
        let actual = self.driver.is_checked(self.target).await?;
        let label = |c: bool| if c { "checked" } else { "unchecked" };
        self.conclude(actual == checked, label(checked), label(actual))
    }

    /// Element has focus
    pub async fn to_be_focused(self) -> FormsResult<()> {
        let focused = self.driver.is_focused(self.target).await?;
        self.conclude(
            focused,
            "focused",
            if focused { "focused" } else { "not focused" },
        )
    }

    fn conclude(self, matched: bool, expected: &str, received: &str) -> FormsResult<()> {
        let passed = matched != self.negated;
        let detail = (!passed).then(|| {
            let not = if self.negated { "not " } else { "" };
            format!("expected {not}{expected}, received {received}")
        });
        tracing::debug!(element = %self.target, passed, "expectation evaluated");
        self.soft.record(passed, self.message, detail)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::mock::{MockElement, MockPage};

    fn page() -> MockPage {
        MockPage::new()
            .with_element(
                MockElement::new("name", "text")
                    .with_attribute("placeholder", "Your name")
                    .with_value("Ada"),
            )
            .with_element(MockElement::new("token", "hidden"))
    }

    #[tokio::test]
    async fn test_value_match_and_mismatch() {
        let page = page();
        let target = Locator::new("#name");
        let mut soft = SoftAssertions::new();

        Expectation::new(&page, &target, &mut soft, "has Ada")
            .to_have_value("Ada")
            .await
            .unwrap();
        Expectation::new(&page, &target, &mut soft, "has Bob")
            .to_have_value("Bob")
            .await
            .unwrap();

        assert_eq!(soft.assertion_count(), 2);
        assert_eq!(soft.failure_count(), 1);
        let failed = soft.failures().next().unwrap();
        assert_eq!(failed.message, "has Bob");
        assert_eq!(
            failed.detail.as_deref(),
            Some("expected value \"Bob\", received \"Ada\"")
        );
    }

    #[tokio::test]
    async fn test_negation() {
        let page = page();
        let target = Locator::new("#name");
        let mut soft = SoftAssertions::new();

        Expectation::new(&page, &target, &mut soft, "not Bob")
            .not()
            .to_have_value("Bob")
            .await
            .unwrap();
        Expectation::new(&page, &target, &mut soft, "not Ada")
            .not()
            .to_have_value("Ada")
            .await
            .unwrap();

        assert_eq!(soft.failure_count(), 1);
        let detail = soft.failures().next().unwrap().detail.clone().unwrap();
        assert!(detail.starts_with("expected not value"));
    }

    #[tokio::test]
    async fn test_attribute_missing() {
        let page = page();
        let target = Locator::new("#name");
        let mut soft = SoftAssertions::new();

        Expectation::new(&page, &target, &mut soft, "max")
            .to_have_attribute("max", "10")
            .await
            .unwrap();
        let detail = soft.failures().next().unwrap().detail.clone().unwrap();
        assert!(detail.ends_with("received no attribute"));
    }

    #[tokio::test]
    async fn test_hidden_and_css() {
        let page = page();
        let target = Locator::new("#token");
        let mut soft = SoftAssertions::new();

        Expectation::new(&page, &target, &mut soft, "hidden")
            .to_be_hidden()
            .await
            .unwrap();
        Expectation::new(&page, &target, &mut soft, "display none")
            .to_have_css("display", "none")
            .await
            .unwrap();
        Expectation::new(&page, &target, &mut soft, "not visible")
            .not()
            .to_be_visible()
            .await
            .unwrap();
        assert!(soft.all_passed());
    }

    #[tokio::test]
    async fn test_missing_element_is_error() {
        let page = page();
        let target = Locator::new("#nope");
        let mut soft = SoftAssertions::new();

        let result = Expectation::new(&page, &target, &mut soft, "visible")
            .to_be_visible()
            .await;
        assert!(result.is_err());
        assert_eq!(soft.assertion_count(), 0);
    }
}

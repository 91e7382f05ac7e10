//! Free-text categories: text, password, email, search, url, tel.

use super::{InputFieldSuite, InputKind};
use crate::config::{FieldConfig, TelConstraints};
use crate::driver::{keys, InputDriver};
use crate::reporter::CheckReport;
use crate::result::{FormsError, FormsResult};
use regex::Regex;

/// Value that a phone-number pattern is expected to refuse
const PATTERN_MISMATCH: &str = "invalidPhoneNumber";

impl<'d, D: InputDriver + ?Sized> InputFieldSuite<'d, D> {
    /// Check a `type="text"` input
    ///
    /// # Errors
    ///
    /// Returns driver errors, or [`FormsError::AssertionFailed`] in fail-fast mode.
    pub async fn text_input(&self, field: &FieldConfig) -> FormsResult<CheckReport> {
        let mut run = self.begin(InputKind::Text, field);
        run.visible().await?;
        run.type_attribute().await?;

        run.accepts("QA Test", "Text input should accept text.")
            .await?;
        run.accepts("QATest123", "Text input should accept alphanumeric characters.")
            .await?;
        run.accepts("@#$%^&*()_+", "Text input should accept special characters.")
            .await?;
        if let Some(max) = field.max_length {
            run.max_length_check(&"A".repeat(max + 1)).await?;
        }
        run.accepts("", "Text input should accept an empty value.")
            .await?;

        run.fill("Clear me").await?;
        run.fill_expecting("", "", "Text input should be clearable.")
            .await?;
        run.accepts("123456", "Text input should accept numbers as text.")
            .await?;

        run.field_state_checks().await?;
        let pasted = run.within_max_length("CopiedText");
        run.paste_check("CopiedText", &pasted).await?;
        Ok(run.finish())
    }

    /// Check a `type="password"` input
    ///
    /// With `auto_complete_off`, the `autocomplete` attribute must not be `on`.
    ///
    /// # Errors
    ///
    /// Returns driver errors, or [`FormsError::AssertionFailed`] in fail-fast mode.
    pub async fn password_input(&self, field: &FieldConfig) -> FormsResult<CheckReport> {
        let mut run = self.begin(InputKind::Password, field);
        run.visible().await?;
        run.type_attribute().await?;

        run.accepts("QATest@123", "Password input should accept a valid password.")
            .await?;
        if let Some(max) = field.max_length {
            run.max_length_check(&"A".repeat(max + 1)).await?;
        }
        run.accepts("!@#$%^&*()", "Password input should accept special characters.")
            .await?;
        run.accepts("Hello World", "Password input should accept spaces.")
            .await?;
        if field.auto_complete_off {
            run.expect("Password input should have autocomplete turned off.")
                .not()
                .to_have_attribute("autocomplete", "on")
                .await?;
        }

        run.field_state_checks().await?;
        let pasted = run.within_max_length("CopiedPassword");
        run.paste_check("CopiedPassword", &pasted).await?;
        Ok(run.finish())
    }

    /// Check a `type="email"` input
    ///
    /// # Errors
    ///
    /// Returns driver errors, or [`FormsError::AssertionFailed`] in fail-fast mode.
    pub async fn email_input(&self, field: &FieldConfig) -> FormsResult<CheckReport> {
        let mut run = self.begin(InputKind::Email, field);
        run.visible().await?;
        run.type_attribute().await?;

        run.accepts("test@example.com", "Email input should accept a valid email.")
            .await?;
        run.accepts(
            "valid.email@example.com",
            "Email input should accept a dotted local part.",
        )
        .await?;
        run.accepts(
            "user+alias@example.com",
            "Email input should accept a plus alias.",
        )
        .await?;
        if let Some(max) = field.max_length {
            run.max_length_check(&format!("{}@example.com", "a".repeat(max + 1)))
                .await?;
        }

        run.field_state_checks().await?;
        let pasted = run.within_max_length("paste@example.com");
        run.paste_check("paste@example.com", &pasted).await?;
        Ok(run.finish())
    }

    /// Check a `type="search"` input
    ///
    /// Escape must clear the field; Enter is pressed and logged as a
    /// submission without asserting on it.
    ///
    /// # Errors
    ///
    /// Returns driver errors, or [`FormsError::AssertionFailed`] in fail-fast mode.
    pub async fn search_input(&self, field: &FieldConfig) -> FormsResult<CheckReport> {
        let mut run = self.begin(InputKind::Search, field);
        run.visible().await?;
        run.type_attribute().await?;

        run.accepts("playwright", "Search input should accept text.")
            .await?;
        run.accepts(
            "test@search.com",
            "Search input should accept special characters.",
        )
        .await?;
        run.accepts("search query", "Search input should accept spaces.")
            .await?;

        run.fill("clear this").await?;
        run.press(keys::ESCAPE).await?;
        run.expect("Search input should clear on Escape.")
            .to_have_value("")
            .await?;

        run.fill("search term").await?;
        run.press(keys::ENTER).await?;
        tracing::info!(element = %field.input, "search submitted with Enter");

        if let Some(max) = field.max_length {
            run.max_length_check(&"a".repeat(max + 5)).await?;
        }

        run.field_state_checks().await?;
        let pasted = run.within_max_length("pasteSearchQuery");
        run.paste_check("pasteSearchQuery", &pasted).await?;
        Ok(run.finish())
    }

    /// Check a `type="url"` input
    ///
    /// # Errors
    ///
    /// Returns driver errors, or [`FormsError::AssertionFailed`] in fail-fast mode.
    pub async fn url_input(&self, field: &FieldConfig) -> FormsResult<CheckReport> {
        let mut run = self.begin(InputKind::Url, field);
        run.visible().await?;
        run.type_attribute().await?;

        run.accepts("https://example.com", "URL input should accept an https URL.")
            .await?;
        run.accepts("http://example.org", "URL input should accept an http URL.")
            .await?;
        run.accepts(
            "https://sub.domain.com/path?query=1#fragment",
            "URL input should accept a URL with path, query and fragment.",
        )
        .await?;
        run.rejects("invalid-url", "URL input should not accept an invalid URL.")
            .await?;
        if let Some(max) = field.max_length {
            run.max_length_check(&format!("https://{}.com", "a".repeat(max)))
                .await?;
        }

        run.field_state_checks().await?;
        let pasted = run.within_max_length("https://pasted-url.com");
        run.paste_check("https://pasted-url.com", &pasted).await?;
        Ok(run.finish())
    }

    /// Check a `type="tel"` input
    ///
    /// When `tel.pattern` is set and does not match `invalidPhoneNumber`,
    /// that value must be rejected.
    ///
    /// # Errors
    ///
    /// Returns [`FormsError::InvalidConstraint`] for a pattern that is not a
    /// valid regular expression, driver errors, or
    /// [`FormsError::AssertionFailed`] in fail-fast mode.
    pub async fn tel_input(
        &self,
        field: &FieldConfig,
        tel: &TelConstraints,
    ) -> FormsResult<CheckReport> {
        let pattern = tel
            .pattern
            .as_deref()
            .map(|p| {
                Regex::new(&format!("^(?:{p})$"))
                    .map_err(|e| FormsError::constraint("pattern", e.to_string()))
            })
            .transpose()?;

        let mut run = self.begin(InputKind::Tel, field);
        run.visible().await?;
        run.type_attribute().await?;

        run.accepts("1234567890", "Telephone input should accept digits.")
            .await?;
        run.accepts(
            "+1234567890123",
            "Telephone input should accept an international number.",
        )
        .await?;
        run.rejects(
            "abcdefg123",
            "Telephone input should not accept alphabetic characters.",
        )
        .await?;
        run.accepts(
            "(123) 456-7890",
            "Telephone input should accept formatting characters.",
        )
        .await?;
        run.accepts("123 456 7890", "Telephone input should accept spaces.")
            .await?;
        if let Some(max) = field.max_length {
            run.max_length_check(&"1".repeat(max + 5)).await?;
        }
        if let Some(pattern) = pattern {
            if pattern.is_match(PATTERN_MISMATCH) {
                tracing::debug!(element = %field.input, "pattern admits mismatch sample, skipping");
            } else {
                run.rejects(
                    PATTERN_MISMATCH,
                    "Telephone input should enforce its pattern.",
                )
                .await?;
            }
        }

        run.field_state_checks().await?;
        let pasted = run.within_max_length("+1122334455");
        run.paste_check("+1122334455", &pasted).await?;
        Ok(run.finish())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::mock::{MockElement, MockPage};

    #[tokio::test]
    async fn test_text_with_max_length() {
        let page = MockPage::new().with_element(MockElement::new("t", "text").with_max_length(5));
        let field = FieldConfig::new("#t").with_max_length(5);
        let report = InputFieldSuite::new(&page).text_input(&field).await.unwrap();

        assert!(report.passed(), "{:?}", report.failures());
        let max = report
            .outcome("Text input should not accept more than the maximum length.")
            .unwrap();
        assert!(max.passed);
        assert!(page.was_called("fill:#t=AAAAAA"));
    }

    #[tokio::test]
    async fn test_url_without_validation_fails_rejection() {
        let page = MockPage::new().with_element(MockElement::new("u", "text").with_attribute("type", "url"));
        let report = InputFieldSuite::new(&page)
            .url_input(&FieldConfig::new("#u"))
            .await
            .unwrap();
        // a plain text box accepts "invalid-url"
        let rejected = report
            .outcome("URL input should not accept an invalid URL.")
            .unwrap();
        assert!(!rejected.passed);
    }

    #[tokio::test]
    async fn test_bad_tel_pattern_is_fatal() {
        let page = MockPage::new().with_element(MockElement::new("p", "tel"));
        let tel = TelConstraints {
            pattern: Some("[0-9".to_string()),
        };
        let err = InputFieldSuite::new(&page)
            .tel_input(&FieldConfig::new("#p"), &tel)
            .await
            .unwrap_err();
        assert!(matches!(err, FormsError::InvalidConstraint { .. }));
        assert!(page.history().is_empty());
    }

    #[tokio::test]
    async fn test_search_escape_and_enter() {
        let page = MockPage::new().with_element(MockElement::new("s", "search"));
        let report = InputFieldSuite::new(&page)
            .search_input(&FieldConfig::new("#s"))
            .await
            .unwrap();
        assert!(report.passed(), "{:?}", report.failures());
        assert!(page.was_called("key:Enter"));
    }
}

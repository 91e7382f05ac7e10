//! Checkable categories: checkbox and radio.

use super::{InputFieldSuite, InputKind};
use crate::config::{FieldConfig, ToggleOptions};
use crate::driver::InputDriver;
use crate::locator::Selector;
use crate::reporter::CheckReport;
use crate::result::FormsResult;

impl<'d, D: InputDriver + ?Sized> InputFieldSuite<'d, D> {
    /// Check a `type="checkbox"` input
    ///
    /// The default state must equal `toggle.checked` (unchecked when unset);
    /// two clicks must flip and restore it.
    ///
    /// # Errors
    ///
    /// Returns driver errors, or [`FormsError::AssertionFailed`](crate::FormsError::AssertionFailed)
    /// in fail-fast mode.
    pub async fn checkbox_input(
        &self,
        field: &FieldConfig,
        toggle: &ToggleOptions,
    ) -> FormsResult<CheckReport> {
        let initial = toggle.checked.unwrap_or(false);
        let mut run = self.begin(InputKind::Checkbox, field);
        run.visible().await?;
        run.type_attribute().await?;
        if let Some(name) = &toggle.name {
            run.attribute("name", name).await?;
        }

        run.expect("Checkbox should have the expected default state.")
            .to_be_checked_with(initial)
            .await?;

        run.driver.click(&field.input).await?;
        run.expect("Checkbox should toggle when clicked.")
            .to_be_checked_with(!initial)
            .await?;
        run.driver.click(&field.input).await?;
        run.expect("Checkbox should toggle back when clicked again.")
            .to_be_checked_with(initial)
            .await?;

        run.driver.check(&field.input).await?;
        run.expect("Checkbox should be checked programmatically.")
            .to_be_checked()
            .await?;
        run.driver.uncheck(&field.input).await?;
        run.expect("Checkbox should be unchecked programmatically.")
            .not()
            .to_be_checked()
            .await?;

        run.field_state_checks().await?;
        Ok(run.finish())
    }

    /// Check a `type="radio"` input
    ///
    /// With `toggle.name`, the first other radio of that group is checked and
    /// this one must end up unchecked.
    ///
    /// # Errors
    ///
    /// Returns driver errors, or [`FormsError::AssertionFailed`](crate::FormsError::AssertionFailed)
    /// in fail-fast mode.
    pub async fn radio_input(
        &self,
        field: &FieldConfig,
        toggle: &ToggleOptions,
    ) -> FormsResult<CheckReport> {
        let mut run = self.begin(InputKind::Radio, field);
        run.visible().await?;
        run.type_attribute().await?;
        if let Some(name) = &toggle.name {
            run.attribute("name", name).await?;
        }

        run.expect("Radio should have the expected default state.")
            .to_be_checked_with(toggle.checked.unwrap_or(false))
            .await?;

        run.driver.check(&field.input).await?;
        run.expect("Radio should be checked when selected.")
            .to_be_checked()
            .await?;

        if let Some(name) = &toggle.name {
            let siblings = run
                .driver
                .query_siblings(&field.input, &Selector::radio_group(name))
                .await?;
            match siblings.first() {
                Some(sibling) => {
                    run.driver.check(sibling).await?;
                    run.expect("Radio should be unchecked when another option in its group is selected.")
                        .not()
                        .to_be_checked()
                        .await?;
                }
                None => {
                    tracing::debug!(element = %field.input, group = %name, "radio group has no other options");
                }
            }
        }

        run.field_state_checks().await?;
        Ok(run.finish())
    }
}

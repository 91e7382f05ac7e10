//! Hidden inputs.

use super::{InputFieldSuite, InputKind};
use crate::config::FieldConfig;
use crate::driver::InputDriver;
use crate::reporter::CheckReport;
use crate::result::FormsResult;

impl<'d, D: InputDriver + ?Sized> InputFieldSuite<'d, D> {
    /// Check a `type="hidden"` input
    ///
    /// The field must be present but not rendered, hold a programmatic value
    /// and never take focus.
    ///
    /// # Errors
    ///
    /// Returns driver errors, or [`FormsError::AssertionFailed`](crate::FormsError::AssertionFailed)
    /// in fail-fast mode.
    pub async fn hidden_input(&self, field: &FieldConfig) -> FormsResult<CheckReport> {
        let mut run = self.begin(InputKind::Hidden, field);
        run.expect("Hidden input should not be visible.")
            .to_be_hidden()
            .await?;
        run.type_attribute().await?;

        run.accepts("HiddenValue", "Hidden input should hold a value set programmatically.")
            .await?;

        run.driver.focus(&field.input).await?;
        run.expect("Hidden input should not be focusable.")
            .not()
            .to_be_focused()
            .await?;
        run.driver.click(&field.input).await?;
        run.expect("Hidden input should not gain focus when clicked.")
            .not()
            .to_be_focused()
            .await?;
        run.expect("Hidden input should not be displayed.")
            .to_have_css("display", "none")
            .await?;

        run.field_state_checks().await?;
        Ok(run.finish())
    }
}

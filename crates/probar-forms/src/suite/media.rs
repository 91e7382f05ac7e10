//! File and color inputs.

use super::{InputFieldSuite, InputKind};
use crate::config::{ColorOptions, FieldConfig, FileOptions};
use crate::driver::InputDriver;
use crate::reporter::CheckReport;
use crate::result::FormsResult;

impl<'d, D: InputDriver + ?Sized> InputFieldSuite<'d, D> {
    /// Check a `type="file"` input
    ///
    /// Uploads the sample files from [`SuiteConfig::fixtures`](crate::SuiteConfig::fixtures).
    ///
    /// # Errors
    ///
    /// Returns [`FormsError::FixtureError`](crate::FormsError::FixtureError)
    /// before touching the page when a sample file is missing, and driver
    /// errors.
    pub async fn file_input(
        &self,
        field: &FieldConfig,
        file: &FileOptions,
    ) -> FormsResult<CheckReport> {
        let [first, second] = self.config.fixtures.resolve()?;

        let mut run = self.begin(InputKind::File, field);
        run.visible().await?;
        run.type_attribute().await?;
        if let Some(accept) = &file.accept {
            run.attribute("accept", accept).await?;
        }
        if file.multiple {
            run.expect("File input should allow multiple files.")
                .to_have_attribute("multiple", "")
                .await?;
        }

        run.driver
            .set_input_files(&field.input, std::slice::from_ref(&first))
            .await?;
        let count = run.driver.selected_file_count(&field.input).await?;
        run.soft
            .assert_eq(&count, &1, "File input should accept a single file.")?;

        if file.multiple {
            let both = [first, second];
            run.driver.set_input_files(&field.input, &both).await?;
            let count = run.driver.selected_file_count(&field.input).await?;
            run.soft
                .assert_eq(&count, &both.len(), "File input should accept multiple files.")?;
        }

        run.driver.set_input_files(&field.input, &[]).await?;
        let count = run.driver.selected_file_count(&field.input).await?;
        run.soft
            .assert_eq(&count, &0, "File input should clear its selection.")?;

        run.field_state_checks().await?;
        Ok(run.finish())
    }

    /// Check a `type="color"` input
    ///
    /// # Errors
    ///
    /// Returns driver errors, or [`FormsError::AssertionFailed`](crate::FormsError::AssertionFailed)
    /// in fail-fast mode.
    pub async fn color_input(
        &self,
        field: &FieldConfig,
        color: &ColorOptions,
    ) -> FormsResult<CheckReport> {
        let mut run = self.begin(InputKind::Color, field);
        run.visible().await?;
        run.type_attribute().await?;
        if let Some(default) = &color.default_value {
            run.expect(format!("Color input should default to {default}."))
                .to_have_value(default)
                .await?;
        }
        run.accepts("#ff5733", "Color input should accept a hex color.")
            .await?;

        run.field_state_checks().await?;
        Ok(run.finish())
    }
}

//! Numeric categories: number and range.

use super::{InputFieldSuite, InputKind};
use crate::config::{format_number, FieldConfig, NumberConstraints, RangeConstraints};
use crate::driver::{keys, InputDriver};
use crate::reporter::CheckReport;
use crate::result::FormsResult;

impl<'d, D: InputDriver + ?Sized> InputFieldSuite<'d, D> {
    /// Check a `type="number"` input
    ///
    /// Expected values assume a field that clamps to `min`/`max` and handles
    /// decimals per [`SuiteConfig::decimal_rule`](crate::SuiteConfig::decimal_rule)
    /// unless the step is fractional.
    ///
    /// # Errors
    ///
    /// Returns [`FormsError::InvalidConstraint`](crate::FormsError::InvalidConstraint)
    /// for a step that is not a positive number or `any`, and driver errors.
    pub async fn number_input(
        &self,
        field: &FieldConfig,
        number: &NumberConstraints,
    ) -> FormsResult<CheckReport> {
        let step = number.step_value()?;
        let rule = self.config.decimal_rule;
        let expected = |typed: &str| number.expected_value(typed, rule);

        let mut run = self.begin(InputKind::Number, field);
        run.visible().await?;
        run.type_attribute().await?;

        run.fill_expecting("123", &expected("123"), "Number input should accept an integer.")
            .await?;
        let decimal_message = if number.allows_decimals() {
            "Number input should accept decimals when the step allows them."
        } else {
            "Number input should round decimals if step does not allow them."
        };
        run.fill_expecting("123.45", &expected("123.45"), decimal_message)
            .await?;
        run.fill_expecting("-50", &expected("-50"), "Number input should accept negative numbers.")
            .await?;

        if let Some(min) = number.min {
            run.fill_expecting(
                &format_number(min - 1.0),
                &format_number(min),
                format!("Number input should not go below min {}.", format_number(min)),
            )
            .await?;
        }
        if let Some(max) = number.max {
            run.fill_expecting(
                &format_number(max + 1.0),
                &format_number(max),
                format!("Number input should not go above max {}.", format_number(max)),
            )
            .await?;
        }

        run.fill_expecting("abc", "", "Number input should not accept letters.")
            .await?;
        run.accepts("", "Number input should accept an empty value.")
            .await?;

        if let Some(step) = step {
            let base = expected("10");
            run.fill_expecting("10", &base, "Number input should accept the step base value.")
                .await?;
            let base_value = base.parse::<f64>().unwrap_or(10.0);
            run.press(keys::ARROW_UP).await?;
            run.expect(format!("Number input should increase by step {}.", format_number(step)))
                .to_have_value(&format_number(base_value + step))
                .await?;
            run.press(keys::ARROW_DOWN).await?;
            run.expect(format!("Number input should decrease by step {}.", format_number(step)))
                .to_have_value(&format_number(base_value))
                .await?;
        }

        run.field_state_checks().await?;
        run.paste_check("42", &expected("42")).await?;
        Ok(run.finish())
    }

    /// Check a `type="range"` input
    ///
    /// Attribute, boundary and midpoint checks run only for the bounds given.
    ///
    /// # Errors
    ///
    /// Returns [`FormsError::InvalidConstraint`](crate::FormsError::InvalidConstraint)
    /// before touching the page for a step that is not a positive number or
    /// `min > max`, driver errors, or
    /// [`FormsError::AssertionFailed`](crate::FormsError::AssertionFailed) in fail-fast mode.
    pub async fn range_input(
        &self,
        field: &FieldConfig,
        range: &RangeConstraints,
    ) -> FormsResult<CheckReport> {
        range.validate()?;
        let mut run = self.begin(InputKind::Range, field);
        run.visible().await?;
        run.type_attribute().await?;

        if let Some(min) = range.min {
            run.attribute("min", &format_number(min)).await?;
        }
        if let Some(max) = range.max {
            run.attribute("max", &format_number(max)).await?;
        }
        if let Some(step) = range.step {
            run.attribute("step", &format_number(step)).await?;
        }

        if let Some(min) = range.min {
            let value = format_number(min);
            run.accepts(&value, "Range input should accept its minimum.")
                .await?;
        }
        if let Some(max) = range.max {
            let value = format_number(max);
            run.accepts(&value, "Range input should accept its maximum.")
                .await?;
        }
        if let (Some(min), Some(max)) = (range.min, range.max) {
            let step = range.step.unwrap_or(1.0);
            let midpoint = ((max - min) / 2.0 / step).round().mul_add(step, min);
            let value = format_number(midpoint);
            run.accepts(&value, "Range input should accept its midpoint.")
                .await?;
        }
        if let Some(max) = range.max {
            run.rejects(
                &format_number(max + 10.0),
                "Range input should not go above its maximum.",
            )
            .await?;
        }
        if let Some(step) = range.step {
            let value = format_number(range.min.unwrap_or(0.0) + step);
            run.accepts(&value, "Range input should accept a value on its step.")
                .await?;
        }

        run.field_state_checks().await?;
        Ok(run.finish())
    }
}

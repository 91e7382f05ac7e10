//! Date and time categories: date, time, datetime-local.

use super::{InputFieldSuite, InputKind};
use crate::config::{DateBounds, DateTimeBounds, FieldConfig, TimeBounds};
use crate::driver::InputDriver;
use crate::reporter::CheckReport;
use crate::result::FormsResult;
use crate::temporal::{
    day_after, day_before, parse_date, parse_datetime, parse_time, shift_datetime, shift_time,
    validate_date, validate_datetime, validate_time,
};

const VALID_DATETIME: &str = "2025-02-12T14:30";
const FAR_PAST: &str = "1999-12-31T23:59";
const FAR_FUTURE: &str = "2099-12-31T23:59";

/// Pull a literal inside `[min, max]` so in-range checks stay in range
fn clamp_literal<'a, T: PartialOrd>(
    literal: &'a str,
    min: Option<&'a str>,
    max: Option<&'a str>,
    parse: fn(&str) -> Option<T>,
) -> &'a str {
    let Some(value) = parse(literal) else {
        return literal;
    };
    if let Some(min) = min.filter(|m| parse(m).is_some_and(|m| value < m)) {
        return min;
    }
    if let Some(max) = max.filter(|m| parse(m).is_some_and(|m| value > m)) {
        return max;
    }
    literal
}

impl<'d, D: InputDriver + ?Sized> InputFieldSuite<'d, D> {
    /// Check a `type="date"` input
    ///
    /// Without caller bounds the out-of-range checks use
    /// [`SuiteConfig::default_date_min`](crate::SuiteConfig::default_date_min)
    /// and `default_date_max`.
    ///
    /// # Errors
    ///
    /// Returns [`FormsError::InvalidDateFormat`](crate::FormsError::InvalidDateFormat)
    /// for a bound that is not `YYYY-MM-DD`, and driver errors.
    pub async fn date_input(
        &self,
        field: &FieldConfig,
        dates: &DateBounds,
    ) -> FormsResult<CheckReport> {
        let min = dates.min.as_deref().unwrap_or(&self.config.default_date_min);
        let max = dates.max.as_deref().unwrap_or(&self.config.default_date_max);
        let min_date = validate_date(min)?;
        let max_date = validate_date(max)?;
        let clamp = |literal| clamp_literal(literal, Some(min), Some(max), parse_date);

        let mut run = self.begin(InputKind::Date, field);
        run.visible().await?;
        run.type_attribute().await?;

        run.accepts(clamp("2025-02-12"), "Date input should accept a valid date.")
            .await?;
        run.rejects("invalid-date", "Date input should not accept an invalid date.")
            .await?;
        run.accepts(clamp("2025-12-31"), "Date input should accept the end of a year.")
            .await?;

        run.rejects(
            &day_before(min_date),
            format!("Date input should not accept a date before {min}."),
        )
        .await?;
        run.rejects(
            &day_after(max_date),
            format!("Date input should not accept a date after {max}."),
        )
        .await?;
        if let Some(length) = field.max_length {
            run.max_length_check(&"2025-02-12".repeat(length + 5))
                .await?;
        }

        run.field_state_checks().await?;
        let pasted = clamp("2025-05-15");
        run.paste_check(pasted, pasted).await?;
        Ok(run.finish())
    }

    /// Check a `type="time"` input
    ///
    /// `min_time`/`max_time` are validated after the paste check; a bad
    /// bound aborts with the earlier outcomes discarded.
    ///
    /// # Errors
    ///
    /// Returns [`FormsError::InvalidTimeFormat`](crate::FormsError::InvalidTimeFormat)
    /// for a bound that is not `HH:mm`, and driver errors.
    pub async fn time_input(
        &self,
        field: &FieldConfig,
        times: &TimeBounds,
    ) -> FormsResult<CheckReport> {
        let min = times.min_time.as_deref();
        let max = times.max_time.as_deref();
        let clamp = |literal| clamp_literal(literal, min, max, parse_time);

        let mut run = self.begin(InputKind::Time, field);
        run.visible().await?;
        run.type_attribute().await?;

        run.accepts(clamp("12:30"), "Time input should accept a valid time.")
            .await?;
        run.rejects("invalid-time", "Time input should not accept an invalid time.")
            .await?;
        run.accepts(clamp("23:59"), "Time input should accept the last minute of the day.")
            .await?;
        run.rejects("25:00", "Time input should not accept an hour past 23.")
            .await?;
        run.rejects("12:60", "Time input should not accept a minute past 59.")
            .await?;

        let pasted = clamp("15:45");
        run.paste_check(pasted, pasted).await?;

        if let Some(min) = min {
            let earliest = validate_time(min)?;
            match shift_time(earliest, -1) {
                Some(before) => {
                    run.rejects(
                        &before,
                        format!("Time input should not accept a time before {min}."),
                    )
                    .await?;
                }
                None => tracing::debug!(element = %field.input, %min, "no time before min"),
            }
        }
        if let Some(max) = max {
            let latest = validate_time(max)?;
            match shift_time(latest, 1) {
                Some(after) => {
                    run.rejects(
                        &after,
                        format!("Time input should not accept a time after {max}."),
                    )
                    .await?;
                }
                None => tracing::debug!(element = %field.input, %max, "no time after max"),
            }
        }
        if let Some(length) = field.max_length {
            run.max_length_check(&"12:30".repeat(length + 5)).await?;
        }

        run.field_state_checks().await?;
        Ok(run.finish())
    }

    /// Check a `type="datetime-local"` input
    ///
    /// Each bound is checked to round-trip, then tried against a fixed far
    /// literal (when it lies outside) and the value one minute beyond it.
    ///
    /// # Errors
    ///
    /// Returns [`FormsError::InvalidDateFormat`](crate::FormsError::InvalidDateFormat)
    /// for a bound that is not `YYYY-MM-DDTHH:mm`, and driver errors.
    pub async fn datetime_local_input(
        &self,
        field: &FieldConfig,
        bounds: &DateTimeBounds,
    ) -> FormsResult<CheckReport> {
        let min = bounds.min.as_deref();
        let max = bounds.max.as_deref();
        let earliest = min.map(validate_datetime).transpose()?;
        let latest = max.map(validate_datetime).transpose()?;
        let clamp = |literal| clamp_literal(literal, min, max, parse_datetime);

        let mut run = self.begin(InputKind::DatetimeLocal, field);
        run.visible().await?;
        run.type_attribute().await?;

        run.accepts(clamp(VALID_DATETIME), "Datetime-local input should accept a valid date and time.")
            .await?;
        run.rejects(
            "invalid-date",
            "Datetime-local input should not accept an invalid value.",
        )
        .await?;
        run.accepts(
            clamp("2030-12-31T23:59"),
            "Datetime-local input should accept a future date.",
        )
        .await?;
        run.accepts(
            clamp("2000-01-01T00:00"),
            "Datetime-local input should accept a past date.",
        )
        .await?;

        if let (Some(min), Some(earliest)) = (min, earliest) {
            run.accepts(min, format!("Datetime-local input should accept its minimum {min}."))
                .await?;
            let message = format!("Datetime-local input should not accept a value before {min}.");
            let derived = shift_datetime(earliest, -1);
            if parse_datetime(FAR_PAST).is_some_and(|p| p < earliest) {
                run.rejects(FAR_PAST, message.as_str()).await?;
            }
            if derived != FAR_PAST {
                run.rejects(&derived, message).await?;
            }
        }
        if let (Some(max), Some(latest)) = (max, latest) {
            run.accepts(max, format!("Datetime-local input should accept its maximum {max}."))
                .await?;
            let message = format!("Datetime-local input should not accept a value after {max}.");
            let derived = shift_datetime(latest, 1);
            if parse_datetime(FAR_FUTURE).is_some_and(|p| p > latest) {
                run.rejects(FAR_FUTURE, message.as_str()).await?;
            }
            if derived != FAR_FUTURE {
                run.rejects(&derived, message).await?;
            }
        }
        if let Some(length) = field.max_length {
            run.max_length_check(&VALID_DATETIME.repeat(length + 5)).await?;
        }

        run.field_state_checks().await?;
        let pasted = clamp("2026-06-15T10:15");
        run.paste_check(pasted, pasted).await?;
        Ok(run.finish())
    }
}

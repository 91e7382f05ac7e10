//! A single `<input>` in the mock page and its value sanitization rules.

use crate::config::{format_number, DecimalRule};
use crate::temporal::{parse_date, parse_datetime, parse_time};
use regex::Regex;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::OnceLock;

fn float_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^-?(\d+(\.\d*)?|\.\d+)([eE][-+]?\d+)?$").expect("valid regex")
    })
}

fn color_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^#[0-9a-fA-F]{6}$").expect("valid regex"))
}

fn url_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[a-zA-Z][a-zA-Z0-9+.\-]*://[^\s/?#]+[^\s]*$").expect("valid regex")
    })
}

/// An input element held by [`MockPage`](super::MockPage)
///
/// The element behaves like a well-built form control: number fields clamp
/// to their bounds, date/time fields drop out-of-range values, `tel` fields
/// strip letters and `url` fields drop anything without a scheme.
#[derive(Debug, Clone, PartialEq)]
pub struct MockElement {
    id: String,
    input_type: String,
    attributes: BTreeMap<String, String>,
    value: String,
    checked: bool,
    files: Vec<PathBuf>,
    styled_hidden: bool,
    decimal_rule: DecimalRule,
}

impl MockElement {
    /// Create an element with `id` and `type` attributes set
    #[must_use]
    pub fn new(id: impl Into<String>, input_type: impl Into<String>) -> Self {
        let id = id.into();
        let input_type = input_type.into().to_ascii_lowercase();
        let mut attributes = BTreeMap::new();
        attributes.insert("id".to_string(), id.clone());
        attributes.insert("type".to_string(), input_type.clone());
        let value = if input_type == "color" {
            "#000000".to_string()
        } else {
            String::new()
        };
        Self {
            id,
            input_type,
            attributes,
            value,
            checked: false,
            files: Vec::new(),
            styled_hidden: false,
            decimal_rule: DecimalRule::Truncate,
        }
    }

    /// Set an attribute
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Set the initial value (sanitized like any typed value)
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = self.sanitize(&value.into());
        self
    }

    /// Set the placeholder attribute
    #[must_use]
    pub fn with_placeholder(self, placeholder: impl Into<String>) -> Self {
        self.with_attribute("placeholder", placeholder)
    }

    /// Mark disabled
    #[must_use]
    pub fn disabled(self) -> Self {
        self.with_attribute("disabled", "")
    }

    /// Mark read-only
    #[must_use]
    pub fn read_only(self) -> Self {
        self.with_attribute("readonly", "")
    }

    /// Set `maxlength`
    #[must_use]
    pub fn with_max_length(self, max_length: usize) -> Self {
        self.with_attribute("maxlength", max_length.to_string())
    }

    /// Set `min`
    #[must_use]
    pub fn with_min(self, min: impl Into<String>) -> Self {
        self.with_attribute("min", min)
    }

    /// Set `max`
    #[must_use]
    pub fn with_max(self, max: impl Into<String>) -> Self {
        self.with_attribute("max", max)
    }

    /// Set `step`
    #[must_use]
    pub fn with_step(self, step: impl Into<String>) -> Self {
        self.with_attribute("step", step)
    }

    /// Set `pattern`
    #[must_use]
    pub fn with_pattern(self, pattern: impl Into<String>) -> Self {
        self.with_attribute("pattern", pattern)
    }

    /// Set `name`
    #[must_use]
    pub fn with_name(self, name: impl Into<String>) -> Self {
        self.with_attribute("name", name)
    }

    /// Set `accept`
    #[must_use]
    pub fn with_accept(self, accept: impl Into<String>) -> Self {
        self.with_attribute("accept", accept)
    }

    /// Allow multiple files
    #[must_use]
    pub fn multiple(self) -> Self {
        self.with_attribute("multiple", "")
    }

    /// Start checked
    #[must_use]
    pub const fn checked(mut self) -> Self {
        self.checked = true;
        self
    }

    /// Hide with `display: none`
    #[must_use]
    pub const fn styled_hidden(mut self) -> Self {
        self.styled_hidden = true;
        self
    }

    /// How decimals are handled when the step is integral
    #[must_use]
    pub const fn with_decimal_rule(mut self, rule: DecimalRule) -> Self {
        self.decimal_rule = rule;
        self
    }

    /// Element id
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Lower-cased `type`
    #[must_use]
    pub fn input_type(&self) -> &str {
        &self.input_type
    }

    /// Attribute value
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Current value
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Checked state
    #[must_use]
    pub const fn is_checked(&self) -> bool {
        self.checked
    }

    /// Selected files
    #[must_use]
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// `disabled` attribute present
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.attributes.contains_key("disabled")
    }

    /// `readonly` attribute present
    #[must_use]
    pub fn is_read_only(&self) -> bool {
        self.attributes.contains_key("readonly")
    }

    /// Rendered (not `type=hidden`, not `display: none`)
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.input_type != "hidden" && !self.styled_hidden
    }

    /// Can receive focus
    #[must_use]
    pub fn is_focusable(&self) -> bool {
        self.is_visible() && !self.is_disabled()
    }

    /// Accepts text through `fill`
    #[must_use]
    pub fn is_fillable(&self) -> bool {
        !matches!(self.input_type.as_str(), "checkbox" | "radio" | "file")
    }

    /// Typed input changes the value
    #[must_use]
    pub fn is_editable(&self) -> bool {
        self.is_fillable() && !self.is_disabled() && !self.is_read_only()
    }

    /// Computed style property
    #[must_use]
    pub fn computed_style(&self, property: &str) -> String {
        match property {
            "display" if self.is_visible() => "inline-block".to_string(),
            "display" => "none".to_string(),
            "visibility" => "visible".to_string(),
            _ => String::new(),
        }
    }

    pub(super) fn set_raw_value(&mut self, raw: &str) {
        self.value = self.sanitize(raw);
    }

    pub(super) fn set_checked(&mut self, checked: bool) {
        self.checked = checked;
    }

    pub(super) fn set_files(&mut self, files: Vec<PathBuf>) {
        self.files = files;
    }

    /// Apply an arrow-key step (`direction` is `1.0` or `-1.0`)
    pub(super) fn step_by(&mut self, direction: f64) {
        match self.input_type.as_str() {
            "number" => {
                let step = self.step_or(1.0);
                let current = self.value.parse::<f64>().unwrap_or(0.0);
                self.value = format_number(direction.mul_add(step, current));
            }
            "range" => {
                let step = self.step_or(1.0);
                let current = self.value.parse::<f64>().unwrap_or(0.0);
                let next = direction.mul_add(step, current);
                self.value = self.sanitize(&format_number(next));
            }
            _ => {}
        }
    }

    fn numeric_attribute(&self, name: &str) -> Option<f64> {
        self.attribute(name)
            .and_then(|v| v.trim().parse::<f64>().ok())
            .filter(|v| v.is_finite())
    }

    fn step_or(&self, fallback: f64) -> f64 {
        self.numeric_attribute("step")
            .filter(|s| *s > 0.0)
            .unwrap_or(fallback)
    }

    fn max_length(&self) -> Option<usize> {
        self.attribute("maxlength").and_then(|v| v.parse().ok())
    }

    /// Value the element ends up with after `raw` is entered
    #[must_use]
    pub fn sanitize(&self, raw: &str) -> String {
        match self.input_type.as_str() {
            "text" | "search" | "password" | "tel" | "url" | "email" => self.sanitize_text(raw),
            "number" => self.sanitize_number(raw),
            "range" => self.sanitize_range(raw),
            "color" => {
                if color_pattern().is_match(raw) {
                    raw.to_ascii_lowercase()
                } else {
                    "#000000".to_string()
                }
            }
            "date" => self.sanitize_bounded(raw, parse_date),
            "time" => self.sanitize_bounded(raw, parse_time),
            "datetime-local" => self.sanitize_bounded(raw, parse_datetime),
            _ => raw.to_string(),
        }
    }

    fn sanitize_text(&self, raw: &str) -> String {
        let mut value: String = raw.chars().filter(|c| *c != '\n' && *c != '\r').collect();
        match self.input_type.as_str() {
            "email" => value = value.trim().to_string(),
            "tel" => value.retain(|c| !c.is_ascii_alphabetic()),
            "url" if !value.is_empty() && !url_pattern().is_match(&value) => {
                return String::new();
            }
            _ => {}
        }
        if let Some(pattern) = self.attribute("pattern") {
            let anchored = Regex::new(&format!("^(?:{pattern})$"));
            if !value.is_empty() && anchored.is_ok_and(|re| !re.is_match(&value)) {
                return String::new();
            }
        }
        match self.max_length() {
            Some(max) => value.chars().take(max).collect(),
            None => value,
        }
    }

    fn sanitize_number(&self, raw: &str) -> String {
        let trimmed = raw.trim();
        if !float_pattern().is_match(trimmed) {
            return String::new();
        }
        let Ok(mut number) = trimmed.parse::<f64>() else {
            return String::new();
        };
        let mut changed = false;

        let fractional_step = self
            .attribute("step")
            .is_some_and(|s| s.contains('.') || s.eq_ignore_ascii_case("any"));
        if !fractional_step && number.fract() != 0.0 {
            match self.decimal_rule {
                DecimalRule::Truncate => number = number.trunc(),
                DecimalRule::Round => number = number.round(),
                DecimalRule::Keep => {}
            }
            changed = self.decimal_rule != DecimalRule::Keep;
        }
        if let Some(min) = self.numeric_attribute("min") {
            if number < min {
                number = min;
                changed = true;
            }
        }
        if let Some(max) = self.numeric_attribute("max") {
            if number > max {
                number = max;
                changed = true;
            }
        }

        if changed {
            format_number(number)
        } else {
            trimmed.to_string()
        }
    }

    fn sanitize_range(&self, raw: &str) -> String {
        let min = self.numeric_attribute("min").unwrap_or(0.0);
        let max = self
            .numeric_attribute("max")
            .unwrap_or(100.0)
            .max(min);
        let step = self.step_or(1.0);

        let trimmed = raw.trim();
        let number = if float_pattern().is_match(trimmed) {
            trimmed.parse::<f64>().unwrap_or((min + max) / 2.0)
        } else {
            (min + max) / 2.0
        };

        let mut snapped = ((number.clamp(min, max) - min) / step).round().mul_add(step, min);
        if snapped > max {
            snapped -= step;
        }
        format_number(snapped)
    }

    fn sanitize_bounded<T: PartialOrd>(&self, raw: &str, parse: fn(&str) -> Option<T>) -> String {
        let Some(value) = parse(raw) else {
            return String::new();
        };
        let below = self
            .attribute("min")
            .and_then(parse)
            .is_some_and(|min| value < min);
        let above = self
            .attribute("max")
            .and_then(parse)
            .is_some_and(|max| value > max);
        if below || above {
            String::new()
        } else {
            raw.to_string()
        }
    }
}

//! Property-based tests for probar-forms.
//!
//! Uses proptest to check that the conforming mock field and the expected
//! values the checklists compute agree for arbitrary inputs.

#![allow(clippy::unwrap_used)]

use futures::executor::block_on;
use probar_forms::{
    format_number, DecimalRule, FieldConfig, InputDriver, InputFieldSuite, Locator, MockElement,
    MockPage, NumberConstraints, SuiteConfig,
};
use proptest::prelude::*;

fn filled(page: &MockPage, selector: &str, value: &str) -> String {
    let target = Locator::new(selector);
    block_on(async {
        page.fill(&target, value).await.unwrap();
        page.input_value(&target).await.unwrap()
    })
}

// === Number Property Tests ===

proptest! {
    /// A bounded number field never leaves its bounds.
    #[test]
    fn prop_number_value_clamped(typed in -1000i64..1000) {
        let page = MockPage::new().with_element(
            MockElement::new("n", "number").with_min("0").with_max("10").with_step("1"),
        );
        let value = filled(&page, "#n", &typed.to_string());
        let parsed: f64 = value.parse().unwrap();
        prop_assert!((0.0..=10.0).contains(&parsed), "out of bounds: {}", value);
    }

    /// The mock field shows exactly what the checklist expects.
    #[test]
    fn prop_number_matches_expected_value(
        whole in -500i32..500,
        frac in 1u32..100,
        rule_idx in 0usize..3,
    ) {
        let rule = [DecimalRule::Truncate, DecimalRule::Round, DecimalRule::Keep][rule_idx];
        let typed = format!("{whole}.{frac:02}");
        let page = MockPage::new().with_element(
            MockElement::new("n", "number")
                .with_min("-100")
                .with_max("100")
                .with_decimal_rule(rule),
        );
        let constraints = NumberConstraints::new(Some(-100.0), Some(100.0), None);
        let value = filled(&page, "#n", &typed);
        prop_assert_eq!(value, constraints.expected_value(&typed, rule));
    }

    /// Truncation never moves a value away from zero.
    #[test]
    fn prop_truncate_toward_zero(value in -1.0e6f64..1.0e6) {
        let typed = format!("{value}");
        let truncated: f64 = DecimalRule::Truncate.expected(&typed).parse().unwrap();
        prop_assert!(truncated.abs() <= value.abs());
        prop_assert!((value - truncated).abs() < 1.0);
    }

    /// Integers render without a fractional part.
    #[test]
    fn prop_format_integer(n in -100_000i64..100_000) {
        #[allow(clippy::cast_precision_loss)]
        let rendered = format_number(n as f64);
        prop_assert_eq!(rendered, n.to_string());
    }
}

// === Text Property Tests ===

proptest! {
    /// Free text survives filling, cut at maxlength.
    #[test]
    fn prop_text_round_trip_within_max_length(
        text in "[a-zA-Z0-9 @#%_-]{0,40}",
        max in 1usize..30,
    ) {
        let page = MockPage::new()
            .with_element(MockElement::new("t", "text").with_max_length(max));
        let value = filled(&page, "#t", &text);
        let expected: String = text.chars().take(max).collect();
        prop_assert_eq!(value, expected);
    }

    /// Whatever the sentinel, a read-only field keeps its value.
    #[test]
    fn prop_read_only_sentinel_never_lands(sentinel in "[A-Za-z][A-Za-z ]{0,20}") {
        prop_assume!(sentinel != "locked");
        let page = MockPage::new()
            .with_element(MockElement::new("r", "text").read_only().with_value("locked"));
        let suite = InputFieldSuite::new(&page)
            .with_config(SuiteConfig::default().with_read_only_sentinel(sentinel.clone()));
        let report = block_on(
            suite.text_input(&FieldConfig::new("#r").with_read_only(true)),
        )
        .unwrap();
        let outcome = report.outcome("Read-only input should not allow typing.").unwrap();
        prop_assert!(outcome.passed);
        let element = page.element("r").unwrap();
        prop_assert_eq!(element.value(), "locked");
    }

    /// The same field config gives the same verdicts on a fresh page.
    #[test]
    fn prop_outcomes_repeatable(max in 1usize..12, declared in 1usize..12) {
        let run = || {
            let page = MockPage::new()
                .with_element(MockElement::new("t", "text").with_max_length(max));
            let report = block_on(
                InputFieldSuite::new(&page)
                    .text_input(&FieldConfig::new("#t").with_max_length(declared)),
            )
            .unwrap();
            report
                .outcomes
                .iter()
                .map(|o| o.passed)
                .collect::<Vec<_>>()
        };
        prop_assert_eq!(run(), run());
    }
}

//! Probar Forms: soft-assertion checklists for HTML form inputs
//!
//! One routine per input category (text, number, date, file, ...) drives a
//! field through a fixed checklist: visibility, type attribute, accepted and
//! rejected values, boundaries, keyboard behavior, paste, and the
//! disabled/read-only/placeholder/max-length settings the caller declares.
//! Every check is recorded as a soft assertion, so one run reports every
//! defect of the field instead of stopping at the first.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                  PROBAR FORMS Architecture                      │
//! ├─────────────────────────────────────────────────────────────────┤
//! │   ┌────────────┐    ┌────────────┐    ┌────────────┐            │
//! │   │ FieldConfig│    │ InputField │    │ InputDriver│            │
//! │   │ + bounds   │───►│ Suite      │───►│ CDP / Mock │            │
//! │   └────────────┘    └─────┬──────┘    └────────────┘            │
//! │                           │                                     │
//! │                     ┌─────▼──────┐    ┌────────────┐            │
//! │                     │ Soft       │───►│ CheckReport│            │
//! │                     │ Assertions │    │ SuiteReport│            │
//! │                     └────────────┘    └────────────┘            │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use probar_forms::{FieldConfig, InputFieldSuite, MockElement, MockPage, SuiteReport};
//!
//! # futures::executor::block_on(async {
//! let page = MockPage::new()
//!     .with_element(MockElement::new("username", "text").with_max_length(5));
//! let suite = InputFieldSuite::new(&page);
//!
//! let mut report = SuiteReport::new("signup");
//! report.push(
//!     suite
//!         .text_input(&FieldConfig::new("#username").with_max_length(5))
//!         .await?,
//! );
//! assert!(report.all_passed());
//! # Ok::<(), probar_forms::FormsError>(())
//! # }).unwrap();
//! ```

#![warn(missing_docs)]
// Lints are configured in workspace Cargo.toml [workspace.lints.clippy]

mod assertion;
#[cfg(feature = "browser")]
mod browser;
mod config;
mod driver;
mod expect;
mod fixture;
mod locator;
pub mod mock;
mod reporter;
mod result;
mod suite;
pub mod temporal;

pub use assertion::soft::{AssertionMode, AssertionSummary, SoftAssertionError, SoftAssertions};
pub use assertion::AssertionOutcome;
#[cfg(feature = "browser")]
pub use browser::CdpInputDriver;
pub use config::{
    format_number, ColorOptions, DateBounds, DateTimeBounds, DecimalRule, FieldConfig,
    FileOptions, NumberConstraints, RangeConstraints, SuiteConfig, TelConstraints, TimeBounds,
    ToggleOptions,
};
pub use driver::{keys, InputDriver};
pub use expect::Expectation;
pub use fixture::{FixtureFiles, FIXTURE_DIR_ENV};
pub use locator::{Locator, Selector};
pub use mock::{MockElement, MockPage};
pub use reporter::{CheckReport, SuiteReport};
pub use result::{FormsError, FormsResult};
pub use suite::{InputFieldSuite, InputKind};

//! In-memory page for running checklists without a browser.
//!
//! [`MockPage`] models a well-behaved form: every built-in validation the
//! checklists look for is honoured, so a full routine against a correctly
//! configured [`MockElement`] passes. Break an element (drop its `max`,
//! give it the wrong placeholder) to see the matching check fail.

mod element;
mod page;

pub use element::MockElement;
pub use page::MockPage;

//! In-memory page implementing [`InputDriver`].

use super::element::MockElement;
use crate::driver::{keys, InputDriver};
use crate::locator::{Locator, Selector};
use crate::result::{FormsError, FormsResult};
use async_trait::async_trait;
use regex::Regex;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};

fn compound_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(?P<tag>[a-zA-Z][\w-]*)?(?:#(?P<id>[\w-]+))?(?P<attrs>(?:\[[^\]]+\])*)$")
            .expect("valid regex")
    })
}

fn attribute_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"\[\s*([\w-]+)\s*(?:=\s*(?:"([^"]*)"|'([^']*)'|([^\]\s]*)))?\s*\]"#)
            .expect("valid regex")
    })
}

/// A parsed compound selector such as `input#email[type="text"]`
#[derive(Debug, Default)]
struct SimpleSelector {
    tag: Option<String>,
    id: Option<String>,
    attributes: Vec<(String, Option<String>)>,
}

impl SimpleSelector {
    fn parse(css: &str) -> FormsResult<Self> {
        let caps = compound_pattern()
            .captures(css.trim())
            .ok_or_else(|| FormsError::driver(format!("unsupported selector: {css}")))?;
        let attributes = caps
            .name("attrs")
            .map(|m| {
                attribute_pattern()
                    .captures_iter(m.as_str())
                    .map(|a| {
                        let name = a[1].to_string();
                        let value = a
                            .get(2)
                            .or_else(|| a.get(3))
                            .or_else(|| a.get(4))
                            .map(|v| v.as_str().to_string());
                        (name, value)
                    })
                    .collect()
            })
            .unwrap_or_default();
        Ok(Self {
            tag: caps.name("tag").map(|m| m.as_str().to_ascii_lowercase()),
            id: caps.name("id").map(|m| m.as_str().to_string()),
            attributes,
        })
    }

    fn matches(&self, element: &MockElement) -> bool {
        if self.tag.as_deref().is_some_and(|t| t != "input") {
            return false;
        }
        if self.id.as_deref().is_some_and(|id| id != element.id()) {
            return false;
        }
        self.attributes.iter().all(|(name, value)| {
            match (element.attribute(name), value.as_deref()) {
                (Some(actual), Some(expected)) => actual == expected,
                (Some(_), None) => true,
                (None, _) => false,
            }
        })
    }
}

#[derive(Debug, Default)]
struct MockState {
    elements: Vec<MockElement>,
    focused: Option<usize>,
    clipboard: String,
    history: Vec<String>,
}

impl MockState {
    fn matching(&self, selector: &Selector) -> FormsResult<Vec<usize>> {
        let parsed = match selector {
            Selector::TestId(id) => SimpleSelector {
                attributes: vec![("data-testid".to_string(), Some(id.clone()))],
                ..SimpleSelector::default()
            },
            Selector::Css(css) | Selector::Nth { css, .. } => SimpleSelector::parse(css)?,
        };
        let all = self
            .elements
            .iter()
            .enumerate()
            .filter(|(_, el)| parsed.matches(el))
            .map(|(i, _)| i);
        Ok(match selector {
            Selector::Nth { index, .. } => all.skip(*index).take(1).collect(),
            _ => all.collect(),
        })
    }

    fn resolve(&self, target: &Locator) -> FormsResult<usize> {
        self.matching(target.selector())?
            .first()
            .copied()
            .ok_or_else(|| FormsError::ElementNotFound {
                selector: target.to_string(),
            })
    }

    fn element_mut(&mut self, index: usize) -> FormsResult<&mut MockElement> {
        self.elements
            .get_mut(index)
            .ok_or_else(|| FormsError::driver("element detached"))
    }

    fn focus(&mut self, index: usize) {
        if self.elements.get(index).is_some_and(MockElement::is_focusable) {
            self.focused = Some(index);
        }
    }

    fn set_checked(&mut self, index: usize, checked: bool) -> FormsResult<()> {
        let element = self.element_mut(index)?;
        if element.is_disabled() {
            return Ok(());
        }
        let input_type = element.input_type().to_string();
        match input_type.as_str() {
            "checkbox" => element.set_checked(checked),
            "radio" => {
                element.set_checked(checked);
                let group = element.attribute("name").map(str::to_string);
                if let (true, Some(group)) = (checked, group) {
                    for (i, other) in self.elements.iter_mut().enumerate() {
                        if i != index
                            && other.input_type() == "radio"
                            && other.attribute("name") == Some(group.as_str())
                        {
                            other.set_checked(false);
                        }
                    }
                }
            }
            other => {
                return Err(FormsError::driver(format!(
                    "not a checkbox or radio input: type={other}"
                )))
            }
        }
        Ok(())
    }

    fn key(&mut self, key: &str) -> FormsResult<()> {
        self.history.push(format!("key:{key}"));
        let Some(index) = self.focused else {
            return Ok(());
        };
        let clipboard = self.clipboard.clone();
        let element = self.element_mut(index)?;
        if !element.is_editable() {
            return Ok(());
        }
        if keys::is_paste(key) {
            let pasted = format!("{}{clipboard}", element.value());
            element.set_raw_value(&pasted);
            return Ok(());
        }
        match key {
            keys::ARROW_UP => element.step_by(1.0),
            keys::ARROW_DOWN => element.step_by(-1.0),
            keys::ESCAPE if element.input_type() == "search" => element.set_raw_value(""),
            _ => {}
        }
        Ok(())
    }
}

/// Mock page for testing without a browser
///
/// Holds a flat list of `<input>` elements addressed by `#id`,
/// `[data-testid="..."]`, `input[type="..."][name="..."]` and similar
/// compound selectors.
///
/// ```
/// use probar_forms::{InputFieldSuite, FieldConfig, MockElement, MockPage};
///
/// # futures::executor::block_on(async {
/// let page = MockPage::new().with_element(MockElement::new("name", "text"));
/// let report = InputFieldSuite::new(&page)
///     .text_input(&FieldConfig::new("#name"))
///     .await
///     .unwrap();
/// assert!(report.passed());
/// # });
/// ```
#[derive(Debug, Default)]
pub struct MockPage {
    state: Mutex<MockState>,
}

impl MockPage {
    /// Create an empty page
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an element (builder style)
    #[must_use]
    pub fn with_element(self, element: MockElement) -> Self {
        let mut state = self
            .state
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner);
        state.elements.push(element);
        Self {
            state: Mutex::new(state),
        }
    }

    /// Add an element to a shared page
    pub fn add_element(&self, element: MockElement) {
        self.lock().elements.push(element);
    }

    /// Snapshot of the element with `id`
    #[must_use]
    pub fn element(&self, id: &str) -> Option<MockElement> {
        self.lock().elements.iter().find(|e| e.id() == id).cloned()
    }

    /// Current clipboard text
    #[must_use]
    pub fn clipboard(&self) -> String {
        self.lock().clipboard.clone()
    }

    /// Driver calls in order
    #[must_use]
    pub fn history(&self) -> Vec<String> {
        self.lock().history.clone()
    }

    /// Whether any recorded call starts with `prefix`
    #[must_use]
    pub fn was_called(&self, prefix: &str) -> bool {
        self.lock().history.iter().any(|h| h.starts_with(prefix))
    }

    /// Forget recorded calls
    pub fn clear_history(&self) {
        self.lock().history.clear();
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn with_element_at<T>(
        &self,
        target: &Locator,
        f: impl FnOnce(&MockElement) -> T,
    ) -> FormsResult<T> {
        let state = self.lock();
        let index = state.resolve(target)?;
        state
            .elements
            .get(index)
            .map(f)
            .ok_or_else(|| FormsError::driver("element detached"))
    }
}

#[async_trait]
impl InputDriver for MockPage {
    async fn is_visible(&self, target: &Locator) -> FormsResult<bool> {
        self.with_element_at(target, MockElement::is_visible)
    }

    async fn fill(&self, target: &Locator, value: &str) -> FormsResult<()> {
        let mut state = self.lock();
        state.history.push(format!("fill:{target}={value}"));
        let index = state.resolve(target)?;
        state.focus(index);
        let element = state.element_mut(index)?;
        if !element.is_fillable() {
            return Err(FormsError::NotFillable {
                selector: target.to_string(),
                input_type: element.input_type().to_string(),
            });
        }
        if element.is_editable() {
            element.set_raw_value(value);
        }
        Ok(())
    }

    async fn input_value(&self, target: &Locator) -> FormsResult<String> {
        self.with_element_at(target, |e| e.value().to_string())
    }

    async fn get_attribute(&self, target: &Locator, name: &str) -> FormsResult<Option<String>> {
        self.with_element_at(target, |e| e.attribute(name).map(str::to_string))
    }

    async fn computed_style(&self, target: &Locator, property: &str) -> FormsResult<String> {
        self.with_element_at(target, |e| e.computed_style(property))
    }

    async fn focus(&self, target: &Locator) -> FormsResult<()> {
        let mut state = self.lock();
        state.history.push(format!("focus:{target}"));
        let index = state.resolve(target)?;
        state.focus(index);
        Ok(())
    }

    async fn is_focused(&self, target: &Locator) -> FormsResult<bool> {
        let state = self.lock();
        let index = state.resolve(target)?;
        Ok(state.focused == Some(index))
    }

    async fn click(&self, target: &Locator) -> FormsResult<()> {
        let mut state = self.lock();
        state.history.push(format!("click:{target}"));
        let index = state.resolve(target)?;
        let (input_type, checked) = match state.elements.get(index) {
            Some(el) if el.is_visible() && !el.is_disabled() => {
                (el.input_type().to_string(), el.is_checked())
            }
            Some(_) => return Ok(()),
            None => return Err(FormsError::driver("element detached")),
        };
        match input_type.as_str() {
            "checkbox" => state.set_checked(index, !checked)?,
            "radio" => state.set_checked(index, true)?,
            _ => {}
        }
        state.focus(index);
        Ok(())
    }

    async fn check(&self, target: &Locator) -> FormsResult<()> {
        let mut state = self.lock();
        state.history.push(format!("check:{target}"));
        let index = state.resolve(target)?;
        state.set_checked(index, true)
    }

    async fn uncheck(&self, target: &Locator) -> FormsResult<()> {
        let mut state = self.lock();
        state.history.push(format!("uncheck:{target}"));
        let index = state.resolve(target)?;
        state.set_checked(index, false)
    }

    async fn is_checked(&self, target: &Locator) -> FormsResult<bool> {
        self.with_element_at(target, MockElement::is_checked)
    }

    async fn is_disabled(&self, target: &Locator) -> FormsResult<bool> {
        self.with_element_at(target, MockElement::is_disabled)
    }

    async fn set_input_files(&self, target: &Locator, files: &[PathBuf]) -> FormsResult<()> {
        let mut state = self.lock();
        state
            .history
            .push(format!("set_input_files:{target}={}", files.len()));
        let index = state.resolve(target)?;
        let element = state.element_mut(index)?;
        if element.input_type() != "file" {
            return Err(FormsError::driver(format!(
                "not a file input: type={}",
                element.input_type()
            )));
        }
        if files.len() > 1 && element.attribute("multiple").is_none() {
            return Err(FormsError::driver(
                "non-multiple file input can only accept a single file",
            ));
        }
        element.set_files(files.to_vec());
        Ok(())
    }

    async fn selected_file_count(&self, target: &Locator) -> FormsResult<usize> {
        self.with_element_at(target, |e| e.files().len())
    }

    async fn press(&self, target: &Locator, key: &str) -> FormsResult<()> {
        let mut state = self.lock();
        state.history.push(format!("press:{target}"));
        let index = state.resolve(target)?;
        state.focus(index);
        state.key(key)
    }

    async fn write_clipboard(&self, text: &str) -> FormsResult<()> {
        let mut state = self.lock();
        state.history.push(format!("clipboard:{text}"));
        state.clipboard = text.to_string();
        Ok(())
    }

    async fn keyboard_press(&self, key: &str) -> FormsResult<()> {
        self.lock().key(key)
    }

    async fn query_siblings(
        &self,
        target: &Locator,
        selector: &Selector,
    ) -> FormsResult<Vec<Locator>> {
        let state = self.lock();
        let own = state.resolve(target)?;
        Ok(state
            .matching(selector)?
            .into_iter()
            .filter(|i| *i != own)
            .filter_map(|i| state.elements.get(i))
            .map(|e| Locator::new(format!("#{}", e.id())))
            .collect())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    mod selector_tests {
        use super::*;

        #[test]
        fn test_parse_compound() {
            let s = SimpleSelector::parse(r#"input#a[type="radio"][name='g'][disabled]"#).unwrap();
            assert_eq!(s.tag.as_deref(), Some("input"));
            assert_eq!(s.id.as_deref(), Some("a"));
            assert_eq!(s.attributes.len(), 3);
            assert_eq!(s.attributes[2], ("disabled".to_string(), None));
        }

        #[test]
        fn test_unsupported_selector() {
            assert!(SimpleSelector::parse("div > input").is_err());
        }

        #[tokio::test]
        async fn test_resolution_by_test_id_and_nth() {
            let page = MockPage::new()
                .with_element(MockElement::new("a", "text").with_attribute("data-testid", "x"))
                .with_element(MockElement::new("b", "text").with_value("second"));

            page.fill(&Locator::test_id("x"), "first").await.unwrap();
            assert_eq!(page.element("a").unwrap().value(), "first");

            let second = Locator::new("input[type=\"text\"]").nth(1);
            assert_eq!(page.input_value(&second).await.unwrap(), "second");
        }

        #[tokio::test]
        async fn test_missing_element() {
            let page = MockPage::new();
            let err = page.input_value(&Locator::new("#x")).await.unwrap_err();
            assert!(matches!(err, FormsError::ElementNotFound { .. }));
        }
    }

    mod fill_tests {
        use super::*;

        #[tokio::test]
        async fn test_fill_focuses() {
            let page = MockPage::new().with_element(MockElement::new("a", "text"));
            let target = Locator::new("#a");
            page.fill(&target, "hello").await.unwrap();
            assert!(page.is_focused(&target).await.unwrap());
            assert_eq!(page.input_value(&target).await.unwrap(), "hello");
        }

        #[tokio::test]
        async fn test_fill_read_only_is_noop() {
            let page = MockPage::new()
                .with_element(MockElement::new("a", "text").read_only().with_value("keep"));
            let target = Locator::new("#a");
            page.fill(&target, "changed").await.unwrap();
            assert_eq!(page.input_value(&target).await.unwrap(), "keep");
        }

        #[tokio::test]
        async fn test_fill_checkbox_not_fillable() {
            let page = MockPage::new().with_element(MockElement::new("c", "checkbox"));
            let err = page.fill(&Locator::new("#c"), "x").await.unwrap_err();
            assert!(matches!(err, FormsError::NotFillable { ref input_type, .. } if input_type == "checkbox"));
        }
    }

    mod keyboard_tests {
        use super::*;

        #[tokio::test]
        async fn test_paste_appends_clipboard() {
            let page = MockPage::new().with_element(MockElement::new("a", "text"));
            let target = Locator::new("#a");
            page.write_clipboard("Copied").await.unwrap();
            page.fill(&target, "").await.unwrap();
            page.keyboard_press(keys::CONTROL_V).await.unwrap();
            assert_eq!(page.input_value(&target).await.unwrap(), "Copied");
        }

        #[tokio::test]
        async fn test_arrow_keys() {
            let page = MockPage::new().with_element(MockElement::new("n", "number").with_step("5"));
            let target = Locator::new("#n");
            page.fill(&target, "10").await.unwrap();
            page.press(&target, keys::ARROW_UP).await.unwrap();
            assert_eq!(page.input_value(&target).await.unwrap(), "15");
            page.press(&target, keys::ARROW_DOWN).await.unwrap();
            page.press(&target, keys::ARROW_DOWN).await.unwrap();
            assert_eq!(page.input_value(&target).await.unwrap(), "5");
        }

        #[tokio::test]
        async fn test_escape_clears_search() {
            let page = MockPage::new().with_element(MockElement::new("s", "search"));
            let target = Locator::new("#s");
            page.fill(&target, "clear this").await.unwrap();
            page.press(&target, keys::ESCAPE).await.unwrap();
            assert_eq!(page.input_value(&target).await.unwrap(), "");
            assert!(page.was_called("key:Escape"));
        }
    }

    mod toggle_tests {
        use super::*;

        #[tokio::test]
        async fn test_checkbox_click_toggles() {
            let page = MockPage::new().with_element(MockElement::new("c", "checkbox"));
            let target = Locator::new("#c");
            page.click(&target).await.unwrap();
            assert!(page.is_checked(&target).await.unwrap());
            page.click(&target).await.unwrap();
            assert!(!page.is_checked(&target).await.unwrap());
        }

        #[tokio::test]
        async fn test_radio_group_is_exclusive() {
            let page = MockPage::new()
                .with_element(MockElement::new("r1", "radio").with_name("g").checked())
                .with_element(MockElement::new("r2", "radio").with_name("g"));
            let r1 = Locator::new("#r1");

            let siblings = page
                .query_siblings(&r1, &Selector::radio_group("g"))
                .await
                .unwrap();
            assert_eq!(siblings, vec![Locator::new("#r2")]);

            page.check(&siblings[0]).await.unwrap();
            assert!(!page.is_checked(&r1).await.unwrap());
        }

        #[tokio::test]
        async fn test_check_on_text_errors() {
            let page = MockPage::new().with_element(MockElement::new("a", "text"));
            assert!(page.check(&Locator::new("#a")).await.is_err());
        }
    }

    mod file_tests {
        use super::*;

        #[tokio::test]
        async fn test_single_file_input_rejects_many() {
            let page = MockPage::new().with_element(MockElement::new("f", "file"));
            let target = Locator::new("#f");
            let files = [PathBuf::from("a"), PathBuf::from("b")];
            assert!(page.set_input_files(&target, &files).await.is_err());
            page.set_input_files(&target, &files[..1]).await.unwrap();
            assert_eq!(page.selected_file_count(&target).await.unwrap(), 1);
            page.set_input_files(&target, &[]).await.unwrap();
            assert_eq!(page.selected_file_count(&target).await.unwrap(), 0);
        }
    }
}

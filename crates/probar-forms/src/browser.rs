//! Real-browser [`InputDriver`] over the Chrome DevTools Protocol.
//!
//! Only compiled with the `browser` feature. Reads go through `Runtime.evaluate`
//! against the locator's query expression; typing uses `Input.insertText`,
//! key combos use `Input.dispatchKeyEvent` (with the `paste` editing command
//! for the paste shortcut) and file selection uses `DOM.setFileInputFiles`.
//!
//! ```ignore
//! let (browser, mut handler) = Browser::launch(BrowserConfig::builder().build()?).await?;
//! tokio::spawn(async move { while handler.next().await.is_some() {} });
//! let page = browser.new_page("http://localhost:8080/signup").await?;
//!
//! let driver = CdpInputDriver::new(page);
//! let report = InputFieldSuite::new(&driver)
//!     .email_input(&FieldConfig::new("#email"))
//!     .await?;
//! ```

use crate::driver::{keys, InputDriver};
use crate::locator::{Locator, Selector};
use crate::result::{FormsError, FormsResult};
use async_trait::async_trait;
use chromiumoxide::cdp::browser_protocol::browser::{GrantPermissionsParams, PermissionType};
use chromiumoxide::cdp::browser_protocol::dom::SetFileInputFilesParams;
use chromiumoxide::cdp::browser_protocol::input::{
    DispatchKeyEventParams, DispatchKeyEventType, InsertTextParams,
};
use chromiumoxide::cdp::js_protocol::runtime::EvaluateParams;
use chromiumoxide::element::Element;
use chromiumoxide::page::Page as CdpPage;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Input types whose value is assigned directly rather than typed
const ASSIGNED_TYPES: [&str; 7] = [
    "color",
    "date",
    "time",
    "datetime-local",
    "month",
    "range",
    "week",
];

const MOD_ALT: i64 = 1;
const MOD_CTRL: i64 = 2;
const MOD_META: i64 = 4;
const MOD_SHIFT: i64 = 8;

#[derive(Debug, Deserialize)]
struct Lookup<T> {
    found: bool,
    value: Option<T>,
}

/// Key description for `Input.dispatchKeyEvent`
#[derive(Debug, Clone, PartialEq, Eq)]
struct KeyStroke {
    key: String,
    code: String,
    key_code: i64,
    modifiers: i64,
    text: Option<String>,
}

impl KeyStroke {
    /// Parse a combo like `Control+V` or `ArrowUp`
    fn parse(combo: &str) -> FormsResult<Self> {
        let mut parts: Vec<&str> = combo.split('+').map(str::trim).collect();
        let key = parts
            .pop()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| FormsError::driver(format!("empty key combo: {combo:?}")))?;

        let mut modifiers = 0;
        for modifier in parts {
            modifiers |= match modifier.to_ascii_lowercase().as_str() {
                "alt" => MOD_ALT,
                "control" | "ctrl" => MOD_CTRL,
                "meta" | "command" => MOD_META,
                "controlormeta" if cfg!(target_os = "macos") => MOD_META,
                "controlormeta" => MOD_CTRL,
                "shift" => MOD_SHIFT,
                other => {
                    return Err(FormsError::driver(format!("unknown modifier: {other}")));
                }
            };
        }

        let (key, code, key_code, text) = match key {
            keys::ARROW_UP => (key.to_string(), key.to_string(), 38, None),
            keys::ARROW_DOWN => (key.to_string(), key.to_string(), 40, None),
            keys::ESCAPE => (key.to_string(), key.to_string(), 27, None),
            keys::ENTER => (key.to_string(), key.to_string(), 13, Some("\r".to_string())),
            "Tab" => (key.to_string(), key.to_string(), 9, None),
            "Backspace" => (key.to_string(), key.to_string(), 8, None),
            single if single.chars().count() == 1 => {
                let c = single.chars().next().unwrap_or_default();
                let upper = c.to_ascii_uppercase();
                let code = if upper.is_ascii_alphabetic() {
                    format!("Key{upper}")
                } else if upper.is_ascii_digit() {
                    format!("Digit{upper}")
                } else {
                    String::new()
                };
                let text = (modifiers & (MOD_CTRL | MOD_META | MOD_ALT) == 0)
                    .then(|| single.to_string());
                (c.to_ascii_lowercase().to_string(), code, i64::from(u32::from(upper)), text)
            }
            other => return Err(FormsError::driver(format!("unsupported key: {other}"))),
        };

        Ok(Self {
            key,
            code,
            key_code,
            modifiers,
            text,
        })
    }

    fn params(
        &self,
        kind: DispatchKeyEventType,
        commands: &[&str],
    ) -> FormsResult<DispatchKeyEventParams> {
        let mut builder = DispatchKeyEventParams::builder()
            .r#type(kind.clone())
            .key(self.key.clone())
            .code(self.code.clone())
            .windows_virtual_key_code(self.key_code)
            .native_virtual_key_code(self.key_code)
            .modifiers(self.modifiers);
        if kind == DispatchKeyEventType::KeyDown {
            if let Some(text) = &self.text {
                builder = builder.text(text.clone());
            }
            if !commands.is_empty() {
                let commands: Vec<String> = commands.iter().map(|c| (*c).to_string()).collect();
                builder = builder.commands(commands);
            }
        }
        builder.build().map_err(FormsError::driver)
    }
}

/// [`InputDriver`] for a chromiumoxide page
#[derive(Debug, Clone)]
pub struct CdpInputDriver {
    page: Arc<Mutex<CdpPage>>,
}

impl CdpInputDriver {
    /// Wrap a page
    #[must_use]
    pub fn new(page: CdpPage) -> Self {
        Self {
            page: Arc::new(Mutex::new(page)),
        }
    }

    /// Share a page already guarded by a mutex
    #[must_use]
    pub const fn from_shared(page: Arc<Mutex<CdpPage>>) -> Self {
        Self { page }
    }

    async fn evaluate<T: DeserializeOwned>(
        &self,
        expression: String,
        await_promise: bool,
    ) -> FormsResult<T> {
        let params = EvaluateParams::builder()
            .expression(expression)
            .await_promise(await_promise)
            .return_by_value(true)
            .build()
            .map_err(FormsError::driver)?;
        let page = self.page.lock().await;
        page.evaluate_expression(params)
            .await
            .map_err(|e| FormsError::driver(e.to_string()))?
            .into_value()
            .map_err(|e| FormsError::driver(e.to_string()))
    }

    /// Evaluate `body` with `el` bound to the target element
    async fn on_element<T: DeserializeOwned>(
        &self,
        target: &Locator,
        body: &str,
    ) -> FormsResult<T> {
        let expression = format!(
            "(() => {{ const el = {}; if (!el) return {{ found: false, value: null }}; \
             return {{ found: true, value: ({body}) }}; }})()",
            target.to_query()
        );
        let lookup: Lookup<T> = self.evaluate(expression, false).await?;
        if !lookup.found {
            return Err(FormsError::ElementNotFound {
                selector: target.to_string(),
            });
        }
        lookup
            .value
            .ok_or_else(|| FormsError::driver(format!("no value from {target}")))
    }

    async fn element(&self, target: &Locator) -> FormsResult<Element> {
        let page = self.page.lock().await;
        let not_found = || FormsError::ElementNotFound {
            selector: target.to_string(),
        };
        match target.selector() {
            Selector::Nth { css, index } => page
                .find_elements(css.as_str())
                .await
                .map_err(|_| not_found())?
                .into_iter()
                .nth(*index)
                .ok_or_else(not_found),
            other => page
                .find_element(other.to_css())
                .await
                .map_err(|_| not_found()),
        }
    }

    async fn dispatch(&self, combo: &str) -> FormsResult<()> {
        let stroke = KeyStroke::parse(combo)?;
        let commands: &[&str] = if keys::is_paste(combo) { &["paste"] } else { &[] };
        let down = stroke.params(DispatchKeyEventType::KeyDown, commands)?;
        let up = stroke.params(DispatchKeyEventType::KeyUp, &[])?;

        let page = self.page.lock().await;
        page.execute(down)
            .await
            .map_err(|e| FormsError::driver(e.to_string()))?;
        page.execute(up)
            .await
            .map_err(|e| FormsError::driver(e.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl InputDriver for CdpInputDriver {
    async fn is_visible(&self, target: &Locator) -> FormsResult<bool> {
        self.on_element(
            target,
            "(() => { const s = getComputedStyle(el); const r = el.getBoundingClientRect(); \
             return s.display !== 'none' && s.visibility !== 'hidden' && r.width > 0 && r.height > 0; })()",
        )
        .await
    }

    async fn fill(&self, target: &Locator, value: &str) -> FormsResult<()> {
        let input_type: String = self.on_element(target, "(el.type || '').toLowerCase()").await?;
        if matches!(input_type.as_str(), "checkbox" | "radio" | "file") {
            return Err(FormsError::NotFillable {
                selector: target.to_string(),
                input_type,
            });
        }
        let editable: bool = self
            .on_element(target, "!el.disabled && !el.readOnly")
            .await?;
        if !editable {
            tracing::debug!(element = %target, "fill skipped on non-editable element");
            return Ok(());
        }

        let literal = serde_json::to_string(value)?;
        if ASSIGNED_TYPES.contains(&input_type.as_str()) || input_type == "hidden" {
            let _: bool = self
                .on_element(
                    target,
                    &format!(
                        "(el.focus(), el.value = {literal}, \
                         el.dispatchEvent(new Event('input', {{ bubbles: true }})), \
                         el.dispatchEvent(new Event('change', {{ bubbles: true }})), true)"
                    ),
                )
                .await?;
            return Ok(());
        }

        let _: bool = self
            .on_element(
                target,
                "(el.focus(), el.select && el.select(), el.value = '', \
                 el.dispatchEvent(new Event('input', { bubbles: true })), true)",
            )
            .await?;
        if !value.is_empty() {
            let page = self.page.lock().await;
            page.execute(InsertTextParams::new(value))
                .await
                .map_err(|e| FormsError::driver(e.to_string()))?;
        }
        Ok(())
    }

    async fn input_value(&self, target: &Locator) -> FormsResult<String> {
        self.on_element(target, "String(el.value ?? '')").await
    }

    async fn get_attribute(&self, target: &Locator, name: &str) -> FormsResult<Option<String>> {
        let name = serde_json::to_string(name)?;
        let value: serde_json::Value = self
            .on_element(target, &format!("el.getAttribute({name}) ?? false"))
            .await?;
        Ok(value.as_str().map(str::to_string))
    }

    async fn computed_style(&self, target: &Locator, property: &str) -> FormsResult<String> {
        let property = serde_json::to_string(property)?;
        self.on_element(
            target,
            &format!("getComputedStyle(el).getPropertyValue({property})"),
        )
        .await
    }

    async fn focus(&self, target: &Locator) -> FormsResult<()> {
        let _: bool = self.on_element(target, "(el.focus(), true)").await?;
        Ok(())
    }

    async fn is_focused(&self, target: &Locator) -> FormsResult<bool> {
        self.on_element(target, "document.activeElement === el").await
    }

    async fn click(&self, target: &Locator) -> FormsResult<()> {
        let _: bool = self
            .on_element(target, "(el.focus(), el.click(), true)")
            .await?;
        Ok(())
    }

    async fn check(&self, target: &Locator) -> FormsResult<()> {
        let _: bool = self
            .on_element(target, "(el.checked || el.click(), true)")
            .await?;
        Ok(())
    }

    async fn uncheck(&self, target: &Locator) -> FormsResult<()> {
        let _: bool = self
            .on_element(target, "(el.checked && el.click(), true)")
            .await?;
        Ok(())
    }

    async fn is_checked(&self, target: &Locator) -> FormsResult<bool> {
        self.on_element(target, "!!el.checked").await
    }

    async fn is_disabled(&self, target: &Locator) -> FormsResult<bool> {
        self.on_element(target, "!!el.disabled").await
    }

    async fn set_input_files(&self, target: &Locator, files: &[PathBuf]) -> FormsResult<()> {
        let element = self.element(target).await?;
        let paths = files
            .iter()
            .map(|f| {
                std::fs::canonicalize(f)
                    .map(|p| p.to_string_lossy().into_owned())
                    .map_err(FormsError::from)
            })
            .collect::<FormsResult<Vec<_>>>()?;
        let params = SetFileInputFilesParams::builder()
            .files(paths)
            .backend_node_id(element.backend_node_id)
            .build()
            .map_err(FormsError::driver)?;
        let page = self.page.lock().await;
        page.execute(params)
            .await
            .map_err(|e| FormsError::driver(e.to_string()))?;
        Ok(())
    }

    async fn selected_file_count(&self, target: &Locator) -> FormsResult<usize> {
        self.on_element(target, "el.files ? el.files.length : 0")
            .await
    }

    async fn press(&self, target: &Locator, key: &str) -> FormsResult<()> {
        self.focus(target).await?;
        self.dispatch(key).await
    }

    async fn write_clipboard(&self, text: &str) -> FormsResult<()> {
        {
            let page = self.page.lock().await;
            let grant = GrantPermissionsParams::new(vec![
                PermissionType::ClipboardReadWrite,
                PermissionType::ClipboardSanitizedWrite,
            ]);
            if let Err(e) = page.execute(grant).await {
                tracing::warn!(error = %e, "clipboard permission not granted");
            }
        }
        let literal = serde_json::to_string(text)?;
        let _: bool = self
            .evaluate(
                format!("navigator.clipboard.writeText({literal}).then(() => true)"),
                true,
            )
            .await?;
        Ok(())
    }

    async fn keyboard_press(&self, key: &str) -> FormsResult<()> {
        self.dispatch(key).await
    }

    async fn query_siblings(
        &self,
        target: &Locator,
        selector: &Selector,
    ) -> FormsResult<Vec<Locator>> {
        let css = selector.to_css();
        let literal = serde_json::to_string(&css)?;
        let indices: Vec<usize> = self
            .on_element(
                target,
                &format!(
                    "Array.from(document.querySelectorAll({literal})) \
                     .map((e, i) => (e === el ? -1 : i)).filter((i) => i >= 0)"
                ),
            )
            .await?;
        Ok(indices
            .into_iter()
            .map(|index| {
                Locator::from_selector(Selector::Nth {
                    css: css.clone(),
                    index,
                })
            })
            .collect())
    }
}

//! Rusty Forms WASM
//!
//! Browser binding for rusty-forms. `validate(form, rules)` installs a submit
//! listener that cancels native submission, clears the previous pass's error
//! paragraphs and renders a `<p class="form-error">` after every field that
//! fails a rule.
//!
//! ```javascript
//! import init, { validate } from './rusty_forms_wasm.js';
//!
//! await init();
//! validate(document.querySelector('form'), {
//!     email: { required: true, type: 'email' },
//!     phone: { pattern: /^[0-9]{10}$/ },
//! });
//! ```
//!
//! Fields are looked up and stale errors cleared across the whole document,
//! so a configured field outside the form is handled like one inside it.
//! `pattern` may be a `RegExp` or its source string; the `i`, `m` and `s`
//! flags carry over, other flags are ignored.

use rusty_forms::{
    check_value, Document as FormDocument, ErrorNode, PassStatus, RuleDescriptor, RuleSet,
    SubmitEvent, Validator, ValidatorConfig, Violation,
};
use js_sys::{Array, Object, Reflect, RegExp};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Element, Event, HtmlFormElement, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement,
};

/// Set panic hook for better error messages in the browser
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// The live page, seen through the validator's document interface
pub struct BrowserDocument {
    document: web_sys::Document,
}

impl BrowserDocument {
    pub fn new(document: web_sys::Document) -> Self {
        Self { document }
    }
}

impl FormDocument for BrowserDocument {
    type Field = Element;
    type Error = JsValue;

    fn locate(&self, identifier: &str) -> Option<Element> {
        // An identifier that is not a valid selector locates nothing
        self.document
            .query_selector(&format!(".{}", identifier))
            .ok()
            .flatten()
    }

    fn current_value(&self, field: &Element) -> String {
        if let Some(input) = field.dyn_ref::<HtmlInputElement>() {
            input.value()
        } else if let Some(textarea) = field.dyn_ref::<HtmlTextAreaElement>() {
            textarea.value()
        } else if let Some(select) = field.dyn_ref::<HtmlSelectElement>() {
            select.value()
        } else {
            field.text_content().unwrap_or_default()
        }
    }

    fn insert_after(&mut self, field: &Element, node: ErrorNode) -> Result<(), JsValue> {
        let paragraph = self.document.create_element("p")?;
        paragraph.set_class_name(&node.class);
        paragraph.set_text_content(Some(&node.message));
        field.after_with_node_1(&paragraph)
    }

    fn remove_all(&mut self, marker_class: &str) -> Result<usize, JsValue> {
        // querySelectorAll returns a static list, so removing while iterating is safe
        let stale = self.document.query_selector_all(&format!(".{}", marker_class))?;
        let mut removed = 0;
        for index in 0..stale.length() {
            if let Some(element) = stale.get(index).and_then(|node| node.dyn_into::<Element>().ok()) {
                element.remove();
                removed += 1;
            }
        }
        Ok(removed)
    }
}

struct ListenerEvent<'a>(&'a Event);

impl SubmitEvent for ListenerEvent<'_> {
    fn prevent_default(&self) {
        self.0.prevent_default();
    }
}

/// Validate a form on every submission
///
/// # Arguments
/// * `form` - The form whose `submit` event is intercepted
/// * `rules` - Object mapping field class names to rule objects
///   (`required`, `minLength`, `maxLength`, `pattern`, `type`)
#[wasm_bindgen]
pub fn validate(form: HtmlFormElement, rules: JsValue) -> Result<(), JsValue> {
    bind(form, parse_rules(rules)?, ValidatorConfig::default())
}

/// Same as `validate`, with validator options
/// (`{ errorClass: string, legacyMaxLengthMessage: boolean }`)
#[wasm_bindgen(js_name = validateWithOptions)]
pub fn validate_with_options(
    form: HtmlFormElement,
    rules: JsValue,
    options: JsValue,
) -> Result<(), JsValue> {
    let config = if options.is_undefined() || options.is_null() {
        ValidatorConfig::default()
    } else {
        serde_wasm_bindgen::from_value(options)
            .map_err(|e| JsValue::from_str(&format!("Failed to parse options: {}", e)))?
    };
    bind(form, parse_rules(rules)?, config)
}

/// Check one value against one rule object without touching the page
///
/// # Returns
/// Array of `{ field, kind, message }` violations (empty if valid)
#[wasm_bindgen(js_name = checkField)]
pub fn check_field(field_name: &str, value: &str, rules: JsValue) -> Result<JsValue, JsValue> {
    let rules: RuleDescriptor = serde_wasm_bindgen::from_value(pattern_as_source(&rules)?)
        .map_err(|e| JsValue::from_str(&format!("Failed to parse rules: {}", e)))?;
    let config = ValidatorConfig::default();

    let violations: Vec<Violation> = check_value(&rules, value)
        .into_iter()
        .map(|kind| Violation {
            field: field_name.to_string(),
            message: kind.message(field_name, &rules, &config),
            kind,
        })
        .collect();

    Ok(serde_wasm_bindgen::to_value(&violations)?)
}

fn parse_rules(rules: JsValue) -> Result<RuleSet, JsValue> {
    serde_wasm_bindgen::from_value(patterns_as_source(&rules)?)
        .map_err(|e| JsValue::from_str(&format!("Failed to parse rules: {}", e)))
}

/// Copy of a rule set object with every `RegExp` pattern turned into a string
fn patterns_as_source(rules: &JsValue) -> Result<JsValue, JsValue> {
    let Some(fields) = rules.dyn_ref::<Object>() else {
        return Ok(rules.clone());
    };

    let normalized = Object::new();
    for entry in Object::entries(fields).iter() {
        let entry: Array = entry.unchecked_into();
        Reflect::set(&normalized, &entry.get(0), &pattern_as_source(&entry.get(1))?)?;
    }
    Ok(normalized.into())
}

/// Copy of one rule object whose `RegExp` pattern is replaced by its source
fn pattern_as_source(descriptor: &JsValue) -> Result<JsValue, JsValue> {
    let Some(object) = descriptor.dyn_ref::<Object>() else {
        return Ok(descriptor.clone());
    };

    let key = JsValue::from_str("pattern");
    let pattern = Reflect::get(object, &key)?;
    let Some(regexp) = pattern.dyn_ref::<RegExp>() else {
        return Ok(descriptor.clone());
    };

    let copy = Object::assign(&Object::new(), object);
    Reflect::set(&copy, &key, &JsValue::from_str(&regexp_source(regexp)))?;
    Ok(copy.into())
}

/// `RegExp` source with its `i`/`m`/`s` flags as an inline group
fn regexp_source(regexp: &RegExp) -> String {
    let source = String::from(regexp.source());
    let flags: String = String::from(regexp.flags())
        .chars()
        .filter(|flag| matches!(flag, 'i' | 'm' | 's'))
        .collect();

    if flags.is_empty() {
        source
    } else {
        format!("(?{}){}", flags, source)
    }
}

fn bind(form: HtmlFormElement, rules: RuleSet, config: ValidatorConfig) -> Result<(), JsValue> {
    let document = form
        .owner_document()
        .ok_or_else(|| JsValue::from_str("form is not attached to a document"))?;

    tracing::debug!(fields = rules.len(), "binding submit validation");

    let validator = Validator::with_config(rules, config);
    let mut host = BrowserDocument::new(document);

    let listener = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        match validator.handle_submit(&ListenerEvent(&event), &mut host) {
            Ok(report) => {
                if let PassStatus::Aborted { missing_field } = &report.status {
                    web_sys::console::warn_1(&JsValue::from_str(&format!(
                        "rusty-forms: no element with class \"{}\", validation stopped",
                        missing_field
                    )));
                }
            }
            Err(err) => {
                web_sys::console::error_2(&JsValue::from_str("rusty-forms: validation failed"), &err);
            }
        }
    });

    form.add_event_listener_with_callback("submit", listener.as_ref().unchecked_ref())?;
    // The listener lives as long as the page
    listener.forget();
    Ok(())
}

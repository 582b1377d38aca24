//! Small DOM helpers shared by the controllers

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, Window};

pub fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("No window object available"))
}

pub fn document(window: &Window) -> Result<Document, JsValue> {
    window
        .document()
        .ok_or_else(|| JsValue::from_str("No document object available"))
}

/// Element with `id`, cast to `T`
///
/// # Errors
/// Returns JsValue error if the element is missing or has the wrong type
pub fn required_by_id<T: JsCast>(document: &Document, id: &str) -> Result<T, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("Missing element #{}", id)))?
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("Element #{} has an unexpected type", id)))
}

/// First element matching `selector`
///
/// # Errors
/// Returns JsValue error if nothing matches or the selector is invalid
pub fn required_query(document: &Document, selector: &str) -> Result<Element, JsValue> {
    document
        .query_selector(selector)?
        .ok_or_else(|| JsValue::from_str(&format!("Missing element {}", selector)))
}

/// All elements matching `selector`, in document order
pub fn query_all(document: &Document, selector: &str) -> Result<Vec<Element>, JsValue> {
    let list = document.query_selector_all(selector)?;
    Ok((0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

/// Add or remove a class
pub fn set_class(element: &Element, class: &str, on: bool) -> Result<(), JsValue> {
    let classes = element.class_list();
    if on {
        classes.add_1(class)
    } else {
        classes.remove_1(class)
    }
}

/// Set an inline style property on an element that is an `HtmlElement`
pub fn set_style(element: &Element, property: &str, value: &str) -> Result<(), JsValue> {
    match element.dyn_ref::<HtmlElement>() {
        Some(html) => html.style().set_property(property, value),
        None => Ok(()),
    }
}

/// Run `f` once after `delay_ms`
pub fn set_timeout(
    window: &Window,
    delay_ms: u32,
    f: impl FnOnce() + 'static,
) -> Result<i32, JsValue> {
    let callback = Closure::once_into_js(f);
    window.set_timeout_with_callback_and_timeout_and_arguments_0(
        callback.unchecked_ref(),
        delay_ms as i32,
    )
}

/// Create an element with optional class and text content
pub fn create(
    document: &Document,
    tag: &str,
    class: Option<&str>,
    text: Option<&str>,
) -> Result<Element, JsValue> {
    let element = document.create_element(tag)?;
    if let Some(class) = class {
        element.set_class_name(class);
    }
    if let Some(text) = text {
        element.set_text_content(Some(text));
    }
    Ok(element)
}

/// Message of a thrown JS value, for error reporting
pub fn js_error_message(value: &JsValue) -> String {
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    value
        .as_string()
        .unwrap_or_else(|| format!("{:?}", value))
}

#[cfg(test)]
#[cfg(target_arch = "wasm32")]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_set_class_toggles() {
        let document = document(&window().unwrap()).unwrap();
        let div = create(&document, "div", Some("box"), Some("hi")).unwrap();
        set_class(&div, "active", true).unwrap();
        assert!(div.class_list().contains("active"));
        set_class(&div, "active", false).unwrap();
        assert!(!div.class_list().contains("active"));
        assert_eq!(div.text_content().as_deref(), Some("hi"));
    }

    #[wasm_bindgen_test]
    fn test_required_by_id_missing() {
        let document = document(&window().unwrap()).unwrap();
        let result = required_by_id::<Element>(&document, "definitely-not-here");
        assert!(result.is_err());
    }

    #[wasm_bindgen_test]
    fn test_js_error_message() {
        let err: JsValue = js_sys::Error::new("Failed to fetch").into();
        assert_eq!(js_error_message(&err), "Failed to fetch");
        assert_eq!(js_error_message(&JsValue::from_str("plain")), "plain");
    }
}

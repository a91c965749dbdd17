// Small DOM helpers shared by both widgets.

use wasm_bindgen::JsValue;

pub fn clog(msg: &str) {
    web_sys::console::log_1(&JsValue::from_str(msg));
}

pub fn document() -> Option<web_sys::Document> {
    web_sys::window().and_then(|w| w.document())
}

/// Whether the page renders right-to-left; swipe displacement and arrow
/// keys are mirrored under RTL.
pub fn detect_rtl() -> bool {
    document()
        .and_then(|d| d.document_element())
        .and_then(|el| el.get_attribute("dir"))
        .map(|dir| dir == "rtl")
        .unwrap_or(false)
}

/// Toggle a marker class on <body> (scroll locking for the zoom modal).
pub fn body_class(name: &str, on: bool) {
    if let Some(body) = document().and_then(|d| d.body()) {
        let list = body.class_list();
        let _ = if on { list.add_1(name) } else { list.remove_1(name) };
    }
}

/// Set body overflow directly (scroll locking for the mobile drawer).
/// An empty value clears the inline style.
pub fn body_overflow(value: &str) {
    if let Some(body) = document().and_then(|d| d.body()) {
        let _ = body.style().set_property("overflow", value);
    }
}

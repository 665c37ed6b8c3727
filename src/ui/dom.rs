/// Thin wrappers over the page DOM used by both pages
use crate::validation::ColorEngine;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

/// Asks the browser's style engine whether a string is a CSS color
pub struct DomColorEngine;

impl ColorEngine for DomColorEngine {
    fn accepts(&self, color: &str) -> bool {
        computed_color(color).map_or(false, |computed| computed != "transparent")
    }
}

/// Assign `color` to a detached element and read back what the browser kept.
/// Returns `None` when the value was rejected.
pub fn computed_color(color: &str) -> Option<String> {
    let document = web_sys::window()?.document()?;
    let element: HtmlElement = document.create_element("div").ok()?.dyn_into().ok()?;

    let style = element.style();
    style.set_property("color", color.trim()).ok()?;
    let value = style.get_property_value("color").ok()?;

    if value.is_empty() { None } else { Some(value) }
}

pub fn set_body_background(color: &str) {
    let body = web_sys::window().and_then(|w| w.document()).and_then(|d| d.body());

    match body {
        Some(body) => {
            if let Err(e) = body.style().set_property("background-color", color.trim()) {
                log::error!("Failed to set background color {}: {:?}", color, e);
            }
        }
        None => log::error!("No document body to apply background color to"),
    }
}

pub fn navigate_to(url: &str) {
    let Some(window) = web_sys::window() else {
        log::error!("No window to navigate from");
        return;
    };

    if let Err(e) = window.location().set_href(url) {
        log::error!("Navigation to {} failed: {:?}", url, e);
    }
}

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;

mod active_modal;
mod announcer;
mod components;
mod config;
mod model;
mod registry;
mod state;
mod util;

use registry::WidgetRegistry;

fn main() {
    let registry = WidgetRegistry::new();
    registry.watch_section_reloads();
    boot(registry);
}

/// Mount immediately if the document has already parsed, otherwise wait
/// for DOMContentLoaded (the module may load from <head>).
fn boot(registry: WidgetRegistry) {
    let Some(document) = util::document() else {
        return;
    };
    if document.ready_state() == "loading" {
        let on_ready = Closure::wrap(Box::new(move |_: web_sys::Event| {
            registry.mount_all();
        }) as Box<dyn FnMut(_)>);
        let _ = document
            .add_event_listener_with_callback("DOMContentLoaded", on_ready.as_ref().unchecked_ref());
        on_ready.forget();
    } else {
        registry.mount_all();
    }
}

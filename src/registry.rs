//! Widget mounting: one component instance per matching container.
//!
//! Mounted containers are tracked in an element registry compared by JS
//! identity, so re-running the scan (initial load, theme-editor section
//! reload) never mounts twice into the same element. Containers whose
//! config is missing or malformed are skipped silently.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::Element;
use yew::Renderer;

use crate::active_modal::{self, ActiveModal};
use crate::announcer::Announcer;
use crate::components::gallery::{GalleryProps, ProductGallery};
use crate::components::mega_menu::{MegaMenu, MegaMenuProps};
use crate::config::{GalleryConfig, NavConfig};
use crate::model::GalleryId;
use crate::util;

pub const GALLERY_SELECTOR: &str = "[data-product-gallery]";
pub const NAV_SELECTOR: &str = "[data-mega-nav]";
/// Fired by the theme editor when a section's markup is re-injected.
const SECTION_LOAD_EVENT: &str = "shopify:section:load";

#[derive(Clone)]
pub struct WidgetRegistry {
    inner: Rc<Inner>,
}

struct Inner {
    mounted: RefCell<Vec<Element>>,
    next_gallery_id: Cell<usize>,
    announcer: Announcer,
    active_modal: ActiveModal,
}

impl WidgetRegistry {
    /// Build the registry and its injected services, and install the
    /// process-wide modal keyboard router.
    pub fn new() -> Self {
        let registry = Self {
            inner: Rc::new(Inner {
                mounted: RefCell::new(Vec::new()),
                next_gallery_id: Cell::new(0),
                announcer: Announcer::new(),
                active_modal: ActiveModal::new(),
            }),
        };
        active_modal::install_keyboard_router(&registry.inner.active_modal);
        registry
    }

    /// Scan the document and mount widgets into any container not yet
    /// mounted. Safe to call repeatedly.
    pub fn mount_all(&self) {
        let Some(document) = util::document() else {
            return;
        };
        // Containers that left the document (section re-render) are
        // forgotten; their replacement elements mount fresh.
        self.inner.mounted.borrow_mut().retain(|el| el.is_connected());

        self.mount_matching(&document, GALLERY_SELECTOR, |registry, root| {
            let Some(config) = GalleryConfig::from_element(root) else {
                util::clog("storefront-widgets: gallery container without usable config, skipping");
                return false;
            };
            let id = GalleryId(registry.inner.next_gallery_id.get());
            registry.inner.next_gallery_id.set(id.0 + 1);
            Renderer::<ProductGallery>::with_root_and_props(
                root.clone(),
                GalleryProps {
                    id,
                    config,
                    announcer: registry.inner.announcer.clone(),
                    active_modal: registry.inner.active_modal.clone(),
                },
            )
            .render();
            true
        });

        self.mount_matching(&document, NAV_SELECTOR, |_, root| {
            let Some(config) = NavConfig::from_element(root) else {
                util::clog("storefront-widgets: mega nav container without usable config, skipping");
                return false;
            };
            Renderer::<MegaMenu>::with_root_and_props(root.clone(), MegaMenuProps { config })
                .render();
            true
        });
    }

    fn mount_matching(
        &self,
        document: &web_sys::Document,
        selector: &str,
        mount: impl Fn(&Self, &Element) -> bool,
    ) {
        let Ok(nodes) = document.query_selector_all(selector) else {
            return;
        };
        for i in 0..nodes.length() {
            let Some(root) = nodes.get(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
                continue;
            };
            if self.is_mounted(&root) {
                continue;
            }
            if mount(self, &root) {
                self.inner.mounted.borrow_mut().push(root);
            }
        }
    }

    fn is_mounted(&self, el: &Element) -> bool {
        self.inner.mounted.borrow().iter().any(|mounted| mounted == el)
    }

    /// Theme-editor support: re-scan whenever a section is re-rendered.
    /// The listener lives for the page, so the closure is leaked.
    pub fn watch_section_reloads(&self) {
        let Some(document) = util::document() else {
            return;
        };
        let registry = self.clone();
        let on_reload = Closure::wrap(Box::new(move |_: web_sys::Event| {
            registry.mount_all();
        }) as Box<dyn FnMut(_)>);
        let _ = document
            .add_event_listener_with_callback(SECTION_LOAD_EVENT, on_reload.as_ref().unchecked_ref());
        on_reload.forget();
    }
}

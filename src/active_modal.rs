//! Keyboard routing for the full-screen zoom modal.
//!
//! At most one gallery owns the modal at a time. Ownership lives in an
//! injected registry handed to each gallery at mount, and a single
//! document-level keydown listener forwards keys to whoever currently
//! holds it. With no owner, keys are ignored.

use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::KeyboardEvent;
use yew::Callback;

use crate::model::GalleryId;

/// Keys the router forwards. Arrow keys are delivered raw; the owning
/// gallery applies its own RTL mapping.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModalKey {
    Close,
    ArrowLeft,
    ArrowRight,
}

struct Owner {
    id: GalleryId,
    on_key: Callback<ModalKey>,
}

/// Shared ownership slot. Cloning shares the slot.
#[derive(Clone, Default)]
pub struct ActiveModal {
    owner: Rc<RefCell<Option<Owner>>>,
}

impl PartialEq for ActiveModal {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.owner, &other.owner)
    }
}

impl ActiveModal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `id` the sole keyboard target, replacing any previous owner.
    pub fn acquire(&self, id: GalleryId, on_key: Callback<ModalKey>) {
        *self.owner.borrow_mut() = Some(Owner { id, on_key });
    }

    /// Release ownership, but only if `id` still holds it: a gallery
    /// closing after losing ownership must not clobber the new owner.
    pub fn release(&self, id: GalleryId) {
        let mut owner = self.owner.borrow_mut();
        if owner.as_ref().is_some_and(|o| o.id == id) {
            *owner = None;
        }
    }

    pub fn owner_id(&self) -> Option<GalleryId> {
        self.owner.borrow().as_ref().map(|o| o.id)
    }

    /// Forward a key to the current owner, if any. The borrow is dropped
    /// before emitting so the handler may acquire/release reentrantly.
    pub fn dispatch(&self, key: ModalKey) {
        let on_key = self.owner.borrow().as_ref().map(|o| o.on_key.clone());
        if let Some(on_key) = on_key {
            on_key.emit(key);
        }
    }
}

/// Install the process-wide keydown listener. Called once at startup;
/// the listener lives for the page, so the closure is leaked.
pub fn install_keyboard_router(registry: &ActiveModal) {
    let Some(document) = crate::util::document() else {
        return;
    };
    let registry = registry.clone();
    let on_keydown = Closure::wrap(Box::new(move |e: KeyboardEvent| {
        let key = match e.key().as_str() {
            "Escape" => ModalKey::Close,
            "ArrowLeft" => ModalKey::ArrowLeft,
            "ArrowRight" => ModalKey::ArrowRight,
            _ => return,
        };
        registry.dispatch(key);
    }) as Box<dyn FnMut(_)>);
    let _ = document
        .add_event_listener_with_callback("keydown", on_keydown.as_ref().unchecked_ref());
    on_keydown.forget();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorder() -> (Callback<ModalKey>, Rc<RefCell<Vec<ModalKey>>>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let cb = Callback::from(move |key| sink.borrow_mut().push(key));
        (cb, seen)
    }

    #[test]
    fn acquire_transfers_ownership() {
        let registry = ActiveModal::new();
        let (cb_a, seen_a) = recorder();
        let (cb_b, seen_b) = recorder();

        registry.acquire(GalleryId(0), cb_a);
        registry.acquire(GalleryId(1), cb_b);
        assert_eq!(registry.owner_id(), Some(GalleryId(1)));

        registry.dispatch(ModalKey::Close);
        assert!(seen_a.borrow().is_empty());
        assert_eq!(*seen_b.borrow(), vec![ModalKey::Close]);
    }

    #[test]
    fn release_only_clears_the_current_owner() {
        let registry = ActiveModal::new();
        let (cb_a, _) = recorder();
        let (cb_b, _) = recorder();

        registry.acquire(GalleryId(0), cb_a);
        registry.acquire(GalleryId(1), cb_b);

        // A closes late; B keeps the keyboard.
        registry.release(GalleryId(0));
        assert_eq!(registry.owner_id(), Some(GalleryId(1)));

        registry.release(GalleryId(1));
        assert_eq!(registry.owner_id(), None);
    }

    #[test]
    fn dispatch_without_owner_is_a_no_op() {
        let registry = ActiveModal::new();
        registry.dispatch(ModalKey::ArrowLeft);
        assert_eq!(registry.owner_id(), None);
    }

    #[test]
    fn owner_may_release_from_inside_its_handler() {
        let registry = ActiveModal::new();
        let inner = registry.clone();
        registry.acquire(
            GalleryId(0),
            Callback::from(move |_| inner.release(GalleryId(0))),
        );
        registry.dispatch(ModalKey::Close);
        assert_eq!(registry.owner_id(), None);
    }
}

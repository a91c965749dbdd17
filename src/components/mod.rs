pub mod gallery;
pub mod gallery_modal;
pub mod mega_menu;
pub mod slide;

use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{AddEventListenerOptions, HtmlElement, TouchEvent};
use yew::Callback;

use crate::state::swipe::SwipeTracker;

/// Wire the three strip touch listeners onto `target`, feeding a fresh
/// tracker and reporting each finished swipe's displacement (start minus
/// end x) to `on_swipe`. touchmove is registered non-passive so a
/// committed horizontal swipe can suppress page scroll; start/end stay
/// passive. Returns a cleanup closure detaching everything.
fn attach_swipe_listeners(target: &HtmlElement, on_swipe: Callback<f64>) -> impl FnOnce() + use<> {
    let tracker = Rc::new(RefCell::new(SwipeTracker::default()));

    let touchstart = {
        let tracker = tracker.clone();
        Closure::wrap(Box::new(move |e: TouchEvent| {
            if let Some(touch) = e.touches().item(0) {
                tracker
                    .borrow_mut()
                    .begin(touch.client_x() as f64, touch.client_y() as f64);
            }
        }) as Box<dyn FnMut(_)>)
    };
    let touchmove = {
        let tracker = tracker.clone();
        Closure::wrap(Box::new(move |e: TouchEvent| {
            if let Some(touch) = e.touches().item(0) {
                if tracker
                    .borrow_mut()
                    .track(touch.client_x() as f64, touch.client_y() as f64)
                {
                    e.prevent_default();
                }
            }
        }) as Box<dyn FnMut(_)>)
    };
    let touchend = {
        let tracker = tracker.clone();
        Closure::wrap(Box::new(move |e: TouchEvent| {
            if let Some(touch) = e.changed_touches().item(0) {
                if let Some(displacement) = tracker.borrow_mut().finish(touch.client_x() as f64) {
                    on_swipe.emit(displacement);
                }
            }
        }) as Box<dyn FnMut(_)>)
    };

    let passive = AddEventListenerOptions::new();
    passive.set_passive(true);
    let blocking = AddEventListenerOptions::new();
    blocking.set_passive(false);
    let _ = target.add_event_listener_with_callback_and_add_event_listener_options(
        "touchstart",
        touchstart.as_ref().unchecked_ref(),
        &passive,
    );
    let _ = target.add_event_listener_with_callback_and_add_event_listener_options(
        "touchmove",
        touchmove.as_ref().unchecked_ref(),
        &blocking,
    );
    let _ = target.add_event_listener_with_callback_and_add_event_listener_options(
        "touchend",
        touchend.as_ref().unchecked_ref(),
        &passive,
    );

    let target = target.clone();
    move || {
        let _ = target
            .remove_event_listener_with_callback("touchstart", touchstart.as_ref().unchecked_ref());
        let _ = target
            .remove_event_listener_with_callback("touchmove", touchmove.as_ref().unchecked_ref());
        let _ = target
            .remove_event_listener_with_callback("touchend", touchend.as_ref().unchecked_ref());
        drop((touchstart, touchmove, touchend));
    }
}

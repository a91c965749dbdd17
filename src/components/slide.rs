use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{AddEventListenerOptions, HtmlElement, HtmlImageElement, TouchEvent};
use yew::prelude::*;

use crate::config::GalleryImage;
use crate::state::magnifier::{self, HoldGesture, HoldMove};

#[derive(Properties, PartialEq, Clone)]
pub struct SlideProps {
    pub image: GalleryImage,
    pub index: usize,
    pub active: bool,
    pub on_open_modal: Callback<usize>,
}

/// One main-strip slide: the image, its wrapper, and the hold-to-magnify
/// lens. Tapping the image opens the zoom modal on this slide.
#[function_component(GallerySlide)]
pub fn gallery_slide(props: &SlideProps) -> Html {
    let wrapper_ref = use_node_ref();
    let image_ref = use_node_ref();
    let lens_ref = use_node_ref();

    {
        let wrapper_ref = wrapper_ref.clone();
        let image_ref = image_ref.clone();
        let lens_ref = lens_ref.clone();
        use_effect_with((), move |_| {
            let cleanup = match (
                wrapper_ref.cast::<HtmlElement>(),
                image_ref.cast::<HtmlImageElement>(),
                lens_ref.cast::<HtmlElement>(),
            ) {
                (Some(wrapper), Some(image), Some(lens)) => {
                    Some(attach_magnifier(&wrapper, image, lens))
                }
                _ => None,
            };
            move || {
                if let Some(cleanup) = cleanup {
                    cleanup();
                }
            }
        });
    }

    let onclick = {
        let on_open_modal = props.on_open_modal.clone();
        let index = props.index;
        Callback::from(move |_: MouseEvent| on_open_modal.emit(index))
    };

    html! {
        <figure class={classes!("product-gallery__slide", props.active.then_some("is-active"))}>
            <div class="product-gallery__image-wrapper" ref={wrapper_ref}>
                <img
                    ref={image_ref}
                    class="product-gallery__image"
                    src={props.image.src.clone()}
                    srcset={props.image.srcset.clone()}
                    alt={props.image.alt.clone().unwrap_or_default()}
                    {onclick}
                />
                <div class="product-gallery__magnifier" ref={lens_ref} aria-hidden="true"></div>
            </div>
        </figure>
    }
}

/// Wire the wrapper's touch listeners for the hold-to-magnify gesture.
///
/// The gesture races the strip's swipe tracker on the same events: a
/// quick horizontal move cancels the hold timer and propagates to the
/// strip; a held finger brings the lens up, after which moves and the
/// final touchend are swallowed so the strip never resolves them as a
/// swipe. Returns a cleanup closure detaching everything.
fn attach_magnifier(
    wrapper: &HtmlElement,
    image: HtmlImageElement,
    lens: HtmlElement,
) -> impl FnOnce() + use<> {
    let gesture = Rc::new(RefCell::new(HoldGesture::default()));
    let hold_timer: Rc<RefCell<Option<Timeout>>> = Rc::new(RefCell::new(None));
    let lens_src: Rc<RefCell<Option<String>>> = Rc::new(RefCell::new(None));

    let show_lens: Rc<dyn Fn(f64, f64)> = {
        let wrapper = wrapper.clone();
        let lens = lens.clone();
        let lens_src = lens_src.clone();
        Rc::new(move |client_x: f64, client_y: f64| {
            let rect = wrapper.get_bounding_client_rect();
            let image_rect = image.get_bounding_client_rect();
            let x = client_x - rect.left();
            let y = client_y - rect.top();
            let placement = magnifier::lens_placement(
                x,
                y,
                rect.width(),
                rect.height(),
                image_rect.width(),
                image_rect.height(),
            );

            let style = lens.style();
            let _ = style.set_property("left", &format!("{}px", placement.left));
            let _ = style.set_property("top", &format!("{}px", placement.top));

            // The responsive source the browser actually rendered, not
            // the nominal src attribute; only reassigned on change so
            // the background is not reloaded on every move.
            let mut src = image.current_src();
            if src.is_empty() {
                src = image.src();
            }
            if lens_src.borrow().as_deref() != Some(src.as_str()) {
                let _ = style.set_property("background-image", &format!("url({})", src));
                *lens_src.borrow_mut() = Some(src);
            }

            let _ = style.set_property(
                "background-size",
                &format!("{}px {}px", placement.bg_width, placement.bg_height),
            );
            let _ = style.set_property(
                "background-position",
                &format!("{}px {}px", placement.bg_x, placement.bg_y),
            );
            let _ = lens.class_list().add_1("is-visible");
        })
    };
    let hide_lens: Rc<dyn Fn()> = {
        let lens = lens.clone();
        Rc::new(move || {
            let _ = lens.class_list().remove_1("is-visible");
        })
    };
    let cancel_hold: Rc<dyn Fn()> = {
        let hold_timer = hold_timer.clone();
        Rc::new(move || {
            if let Some(timer) = hold_timer.borrow_mut().take() {
                timer.cancel();
            }
        })
    };

    let touchstart = {
        let gesture = gesture.clone();
        let hold_timer = hold_timer.clone();
        let cancel_hold = cancel_hold.clone();
        let show_lens = show_lens.clone();
        Closure::wrap(Box::new(move |e: TouchEvent| {
            let Some(touch) = e.touches().item(0) else {
                return;
            };
            gesture
                .borrow_mut()
                .begin(touch.client_x() as f64, touch.client_y() as f64);
            cancel_hold();
            let fire = {
                let gesture = gesture.clone();
                let hold_timer = hold_timer.clone();
                let show_lens = show_lens.clone();
                move || {
                    hold_timer.borrow_mut().take();
                    let mut g = gesture.borrow_mut();
                    if g.fire_hold() {
                        let (x, y) = g.last_point();
                        drop(g);
                        show_lens(x, y);
                    }
                }
            };
            *hold_timer.borrow_mut() = Some(Timeout::new(magnifier::HOLD_DELAY_MS, fire));
        }) as Box<dyn FnMut(_)>)
    };

    let touchmove = {
        let gesture = gesture.clone();
        let cancel_hold = cancel_hold.clone();
        let show_lens = show_lens.clone();
        Closure::wrap(Box::new(move |e: TouchEvent| {
            let Some(touch) = e.touches().item(0) else {
                return;
            };
            let x = touch.client_x() as f64;
            let y = touch.client_y() as f64;
            match gesture.borrow_mut().track(x, y) {
                // Let it propagate: the strip's handler owns navigation.
                HoldMove::SwipeDetected => cancel_hold(),
                HoldMove::Swiping | HoldMove::Pending => {}
                HoldMove::Magnify => {
                    e.stop_propagation();
                    e.prevent_default();
                    show_lens(x, y);
                }
            }
        }) as Box<dyn FnMut(_)>)
    };

    let touchend = {
        let gesture = gesture.clone();
        let cancel_hold = cancel_hold.clone();
        let hide_lens = hide_lens.clone();
        Closure::wrap(Box::new(move |e: TouchEvent| {
            cancel_hold();
            if gesture.borrow_mut().finish() {
                // Lens was up: the strip must not resolve this as a swipe.
                e.stop_propagation();
            }
            hide_lens();
        }) as Box<dyn FnMut(_)>)
    };

    let touchcancel = {
        let gesture = gesture.clone();
        let cancel_hold = cancel_hold.clone();
        let hide_lens = hide_lens.clone();
        Closure::wrap(Box::new(move |_: TouchEvent| {
            cancel_hold();
            gesture.borrow_mut().finish();
            hide_lens();
        }) as Box<dyn FnMut(_)>)
    };

    let passive = AddEventListenerOptions::new();
    passive.set_passive(true);
    let blocking = AddEventListenerOptions::new();
    blocking.set_passive(false);
    let _ = wrapper.add_event_listener_with_callback_and_add_event_listener_options(
        "touchstart",
        touchstart.as_ref().unchecked_ref(),
        &passive,
    );
    let _ = wrapper.add_event_listener_with_callback_and_add_event_listener_options(
        "touchmove",
        touchmove.as_ref().unchecked_ref(),
        &blocking,
    );
    let _ = wrapper
        .add_event_listener_with_callback("touchend", touchend.as_ref().unchecked_ref());
    let _ = wrapper
        .add_event_listener_with_callback("touchcancel", touchcancel.as_ref().unchecked_ref());

    let wrapper = wrapper.clone();
    move || {
        let _ = wrapper
            .remove_event_listener_with_callback("touchstart", touchstart.as_ref().unchecked_ref());
        let _ = wrapper
            .remove_event_listener_with_callback("touchmove", touchmove.as_ref().unchecked_ref());
        let _ = wrapper
            .remove_event_listener_with_callback("touchend", touchend.as_ref().unchecked_ref());
        let _ = wrapper.remove_event_listener_with_callback(
            "touchcancel",
            touchcancel.as_ref().unchecked_ref(),
        );
        cancel_hold();
        drop((touchstart, touchmove, touchend, touchcancel));
    }
}

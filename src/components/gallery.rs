use web_sys::HtmlElement;
use yew::prelude::*;

use crate::active_modal::{ActiveModal, ModalKey};
use crate::announcer::{self, Announcer};
use crate::config::GalleryConfig;
use crate::model::{ArrowKey, GalleryAction, GalleryId, GalleryState};
use crate::util;

use super::gallery_modal::GalleryModal;
use super::slide::GallerySlide;

/// Body marker class while a zoom modal is open; the stylesheet turns it
/// into a scroll lock.
pub const MODAL_OPEN_CLASS: &str = "gallery-modal-open";

#[derive(Properties, PartialEq, Clone)]
pub struct GalleryProps {
    pub id: GalleryId,
    pub config: GalleryConfig,
    pub announcer: Announcer,
    pub active_modal: ActiveModal,
}

#[function_component(ProductGallery)]
pub fn product_gallery(props: &GalleryProps) -> Html {
    let len = props.config.images.len();
    let rtl = *use_memo((), |_| util::detect_rtl());
    let state = use_reducer(move || GalleryState::new(len, rtl));
    let slider_ref = use_node_ref();
    let modal_close_ref = use_node_ref();

    // Strip swipe listeners.
    {
        let slider_ref = slider_ref.clone();
        let dispatch = state.dispatcher();
        use_effect_with((), move |_| {
            let cleanup = slider_ref.cast::<HtmlElement>().map(|slider| {
                let on_swipe = Callback::from(move |displacement: f64| {
                    dispatch.dispatch(GalleryAction::SwipeMain { displacement })
                });
                super::attach_swipe_listeners(&slider, on_swipe)
            });
            move || {
                if let Some(cleanup) = cleanup {
                    cleanup();
                }
            }
        });
    }

    // Announce slide changes (covers the initial "Image 1 of N").
    {
        let announcer = props.announcer.clone();
        use_effect_with((state.current, len), move |deps| {
            let (current, len) = *deps;
            if len > 0 {
                announcer.announce(&announcer::slide_message(current + 1, len));
            }
            || ()
        });
    }

    // Modal open/close side effects: scroll lock, keyboard ownership,
    // focus on the close control.
    {
        let active_modal = props.active_modal.clone();
        let id = props.id;
        let dispatch = state.dispatcher();
        let modal_close_ref = modal_close_ref.clone();
        use_effect_with(state.modal_open, move |open| {
            util::body_class(MODAL_OPEN_CLASS, *open);
            if *open {
                let on_key = Callback::from(move |key: ModalKey| match key {
                    ModalKey::Close => dispatch.dispatch(GalleryAction::CloseModal),
                    ModalKey::ArrowLeft => {
                        dispatch.dispatch(GalleryAction::ModalArrow(ArrowKey::Left))
                    }
                    ModalKey::ArrowRight => {
                        dispatch.dispatch(GalleryAction::ModalArrow(ArrowKey::Right))
                    }
                });
                active_modal.acquire(id, on_key);
                if let Some(close) = modal_close_ref.cast::<HtmlElement>() {
                    let _ = close.focus();
                }
            } else {
                active_modal.release(id);
            }
            || ()
        });
    }

    let open_modal = {
        let dispatch = state.dispatcher();
        Callback::from(move |index: usize| dispatch.dispatch(GalleryAction::OpenModal(index)))
    };

    let dots = (0..len)
        .map(|i| {
            let active = i == state.current;
            let onclick = {
                let dispatch = state.dispatcher();
                Callback::from(move |_: MouseEvent| dispatch.dispatch(GalleryAction::GoTo(i)))
            };
            html! {
                <button
                    class={classes!("product-gallery__dot", active.then_some("is-active"))}
                    type="button"
                    aria-label={format!("Go to image {}", i + 1)}
                    aria-current={active.then(|| AttrValue::from("true"))}
                    {onclick}
                />
            }
        })
        .collect::<Html>();

    html! {
        <div class="product-gallery">
            <div class="product-gallery__slider" ref={slider_ref}>
                { for props.config.images.iter().enumerate().map(|(i, image)| html! {
                    <GallerySlide
                        image={image.clone()}
                        index={i}
                        active={i == state.current}
                        on_open_modal={open_modal.clone()}
                    />
                }) }
            </div>
            if len > 1 {
                <div class="product-gallery__dots">{ dots }</div>
            }
            <GalleryModal
                images={props.config.images.clone()}
                state={state.clone()}
                close_ref={modal_close_ref}
            />
        </div>
    }
}

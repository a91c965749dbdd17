use web_sys::HtmlElement;
use yew::prelude::*;

use crate::config::GalleryImage;
use crate::model::{GalleryAction, GalleryState, NavDirection};

#[derive(Properties, PartialEq, Clone)]
pub struct GalleryModalProps {
    pub images: Vec<GalleryImage>,
    pub state: UseReducerHandle<GalleryState>,
    /// Owned by the parent so it can move focus here on open.
    pub close_ref: NodeRef,
}

/// Full-screen zoom view. Always rendered, shown/hidden via aria-hidden;
/// its slide index is independent of the main strip and wraps.
#[function_component(GalleryModal)]
pub fn gallery_modal(props: &GalleryModalProps) -> Html {
    let slider_ref = use_node_ref();

    // Modal strip swipe listeners, same thresholds as the main strip.
    {
        let slider_ref = slider_ref.clone();
        let dispatch = props.state.dispatcher();
        use_effect_with((), move |_| {
            let cleanup = slider_ref.cast::<HtmlElement>().map(|slider| {
                let on_swipe = Callback::from(move |displacement: f64| {
                    dispatch.dispatch(GalleryAction::SwipeModal { displacement })
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

    let state = &props.state;
    let open = state.modal_open;

    let close = {
        let dispatch = state.dispatcher();
        Callback::from(move |_: MouseEvent| dispatch.dispatch(GalleryAction::CloseModal))
    };
    let prev = {
        let dispatch = state.dispatcher();
        Callback::from(move |_: MouseEvent| {
            dispatch.dispatch(GalleryAction::ModalNav(NavDirection::Prev))
        })
    };
    let next = {
        let dispatch = state.dispatcher();
        Callback::from(move |_: MouseEvent| {
            dispatch.dispatch(GalleryAction::ModalNav(NavDirection::Next))
        })
    };
    let block_drag = Callback::from(|e: DragEvent| e.prevent_default());

    let dots = (0..props.images.len())
        .map(|i| {
            let active = i == state.modal_index;
            let onclick = {
                let dispatch = state.dispatcher();
                Callback::from(move |_: MouseEvent| dispatch.dispatch(GalleryAction::OpenModal(i)))
            };
            html! {
                <button
                    class={classes!("product-gallery__modal-dot", active.then_some("is-active"))}
                    type="button"
                    aria-label={format!("Go to image {}", i + 1)}
                    {onclick}
                />
            }
        })
        .collect::<Html>();

    html! {
        <div
            class="product-gallery__modal"
            aria-hidden={if open { "false" } else { "true" }}
        >
            <div class="product-gallery__modal-overlay" onclick={close.clone()}></div>
            <button
                class="product-gallery__modal-close"
                type="button"
                aria-label="Close image zoom"
                ref={props.close_ref.clone()}
                onclick={close}
            >{ "\u{00d7}" }</button>
            <button
                class="product-gallery__modal-nav product-gallery__modal-nav--prev"
                type="button"
                aria-label="Previous image"
                onclick={prev}
            >{ "\u{2039}" }</button>
            <button
                class="product-gallery__modal-nav product-gallery__modal-nav--next"
                type="button"
                aria-label="Next image"
                onclick={next}
            >{ "\u{203a}" }</button>
            <div class="product-gallery__modal-slider" ref={slider_ref}>
                { for props.images.iter().enumerate().map(|(i, image)| {
                    let active = i == state.modal_index;
                    html! {
                        <figure class={classes!("product-gallery__modal-slide", active.then_some("is-active"))}>
                            <img
                                src={image.src.clone()}
                                srcset={image.srcset.clone()}
                                alt={image.alt.clone().unwrap_or_default()}
                                loading="lazy"
                                ondragstart={block_drag.clone()}
                            />
                        </figure>
                    }
                }) }
            </div>
            if props.images.len() > 1 {
                <div class="product-gallery__modal-dots">{ dots }</div>
            }
        </div>
    }
}

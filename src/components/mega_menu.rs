use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Element, Node};
use yew::prelude::*;

use crate::config::NavConfig;
use crate::util;

/// Delay (ms) before a pointer leaving a trigger actually closes its
/// panel. The close re-checks `:hover` at expiry so trigger-to-panel
/// travel survives without flicker.
const CLOSE_DELAY_MS: u32 = 100;

#[derive(Properties, PartialEq, Clone)]
pub struct MegaMenuProps {
    pub config: NavConfig,
}

/// Site header navigation: desktop dropdown panels (at most one open)
/// and a mobile drawer with its own scroll lock.
#[function_component(MegaMenu)]
pub fn mega_menu(props: &MegaMenuProps) -> Html {
    let section_count = props.config.sections.len();
    let open_panel = use_state(|| None::<usize>);
    let drawer_open = use_state(|| false);
    let header_ref = use_node_ref();
    let trigger_refs = use_memo(section_count, |count| {
        (0..*count).map(|_| NodeRef::default()).collect::<Vec<_>>()
    });
    let panel_refs = use_memo(section_count, |count| {
        (0..*count).map(|_| NodeRef::default()).collect::<Vec<_>>()
    });
    let close_timer = use_mut_ref(|| None::<Timeout>);

    let open_section = {
        let open_panel = open_panel.clone();
        let close_timer = close_timer.clone();
        Callback::from(move |index: usize| {
            // A pending close must never fire against the panel we are
            // about to show.
            if let Some(timer) = close_timer.borrow_mut().take() {
                timer.cancel();
            }
            open_panel.set(Some(index));
        })
    };

    let schedule_close = {
        let open_panel = open_panel.clone();
        let close_timer = close_timer.clone();
        let trigger_refs = trigger_refs.clone();
        let panel_refs = panel_refs.clone();
        Callback::from(move |index: usize| {
            let open_panel = open_panel.clone();
            let trigger = trigger_refs.get(index).cloned();
            let panel = panel_refs.get(index).cloned();
            if let Some(timer) = close_timer.borrow_mut().take() {
                timer.cancel();
            }
            *close_timer.borrow_mut() = Some(Timeout::new(CLOSE_DELAY_MS, move || {
                let hovered = |node_ref: &Option<NodeRef>| {
                    node_ref
                        .as_ref()
                        .and_then(|r| r.cast::<Element>())
                        .map(|el| el.matches(":hover").unwrap_or(false))
                        .unwrap_or(false)
                };
                if !hovered(&trigger) && !hovered(&panel) {
                    open_panel.set(None);
                }
            }));
        })
    };

    // Document-level wiring: click outside the header closes every
    // panel, Escape force-closes the mobile drawer.
    {
        let header_ref = header_ref.clone();
        let open_panel = open_panel.clone();
        let drawer_open = drawer_open.clone();
        use_effect_with((), move |_| {
            let document = util::document();
            let click_cb = {
                let open_panel = open_panel.clone();
                Closure::wrap(Box::new(move |e: MouseEvent| {
                    let inside = header_ref
                        .cast::<Element>()
                        .zip(e.target().and_then(|t| t.dyn_into::<Node>().ok()))
                        .is_some_and(|(header, target)| header.contains(Some(&target)));
                    if !inside {
                        open_panel.set(None);
                    }
                }) as Box<dyn FnMut(_)>)
            };
            let key_cb = {
                let drawer_open = drawer_open.clone();
                Closure::wrap(Box::new(move |e: KeyboardEvent| {
                    if e.key() == "Escape" {
                        drawer_open.set(false);
                    }
                }) as Box<dyn FnMut(_)>)
            };
            if let Some(document) = &document {
                let _ = document
                    .add_event_listener_with_callback("click", click_cb.as_ref().unchecked_ref());
                let _ = document
                    .add_event_listener_with_callback("keydown", key_cb.as_ref().unchecked_ref());
            }
            move || {
                if let Some(document) = &document {
                    let _ = document.remove_event_listener_with_callback(
                        "click",
                        click_cb.as_ref().unchecked_ref(),
                    );
                    let _ = document.remove_event_listener_with_callback(
                        "keydown",
                        key_cb.as_ref().unchecked_ref(),
                    );
                }
                drop((click_cb, key_cb));
            }
        });
    }

    // Drawer scroll lock.
    {
        use_effect_with(*drawer_open, move |open| {
            util::body_overflow(if *open { "hidden" } else { "" });
            || ()
        });
    }

    let toggle_drawer = {
        let drawer_open = drawer_open.clone();
        Callback::from(move |_: MouseEvent| drawer_open.set(!*drawer_open))
    };

    html! {
        <header class="site-header" ref={header_ref}>
            <nav class="mega-nav" aria-label="Main navigation">
                <ul class="mega-nav__list">
                    { for props.config.sections.iter().enumerate().map(|(i, section)| {
                        let is_open = *open_panel == Some(i);
                        let on_enter = {
                            let open_section = open_section.clone();
                            Callback::from(move |_: MouseEvent| open_section.emit(i))
                        };
                        let on_focus = {
                            let open_section = open_section.clone();
                            Callback::from(move |_: FocusEvent| open_section.emit(i))
                        };
                        let on_leave = {
                            let schedule_close = schedule_close.clone();
                            Callback::from(move |_: MouseEvent| schedule_close.emit(i))
                        };
                        let on_blur = {
                            let schedule_close = schedule_close.clone();
                            Callback::from(move |_: FocusEvent| schedule_close.emit(i))
                        };
                        html! {
                            <li class="mega-nav__item">
                                <button
                                    ref={trigger_refs[i].clone()}
                                    class={classes!("mega-nav__trigger", is_open.then_some("is-open"))}
                                    type="button"
                                    aria-expanded={if is_open { "true" } else { "false" }}
                                    onmouseenter={on_enter}
                                    onmouseleave={on_leave}
                                    onfocus={on_focus}
                                    onblur={on_blur}
                                >{ &section.label }</button>
                                <div
                                    ref={panel_refs[i].clone()}
                                    class={classes!(
                                        "mega-nav__panel",
                                        format!("mega-nav__panel--{}", section.handle),
                                    )}
                                    aria-hidden={if is_open { "false" } else { "true" }}
                                >
                                    { for section.columns.iter().map(|column| html! {
                                        <div class="mega-nav__column">
                                            if let Some(heading) = &column.heading {
                                                <p class="mega-nav__heading">{ heading }</p>
                                            }
                                            <ul class="mega-nav__links">
                                                { for column.links.iter().map(|link| html! {
                                                    <li><a href={link.url.clone()}>{ &link.label }</a></li>
                                                }) }
                                            </ul>
                                        </div>
                                    }) }
                                </div>
                            </li>
                        }
                    }) }
                </ul>
            </nav>
            <button
                class="mega-nav__mobile-toggle"
                type="button"
                aria-label="Open menu"
                onclick={toggle_drawer}
            >{ "\u{2630}" }</button>
            <div
                class="mega-nav__drawer"
                aria-hidden={if *drawer_open { "false" } else { "true" }}
            >
                <ul class="mega-nav__drawer-list">
                    { for props.config.sections.iter().map(|section| html! {
                        <li class="mega-nav__drawer-section">
                            <p class="mega-nav__drawer-label">{ &section.label }</p>
                            <ul>
                                { for section.columns.iter().flat_map(|c| c.links.iter()).map(|link| html! {
                                    <li><a href={link.url.clone()}>{ &link.label }</a></li>
                                }) }
                            </ul>
                        </li>
                    }) }
                </ul>
            </div>
        </header>
    }
}

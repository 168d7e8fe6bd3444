use log::debug;
use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlElement, MouseEvent, ScrollBehavior, ScrollToOptions};
use yew::prelude::*;
use yew_hooks::{use_event_with_window, use_timeout};

use crate::analytics;
use crate::catalog::{self, format_eur};
use crate::checkout::dialog::{CHECKOUT_CLOSED_EVENT, CHECKOUT_OPEN_EVENT};
use crate::config;
use crate::error::{self, AppError};
use crate::visibility::{
    intersects_viewport, scroll_percentage, scroll_target, VisibilityState, TIME_TRIGGER_MS,
};

struct PageMetrics {
    percent: f64,
    pricing_in_view: bool,
}

fn measure() -> Result<PageMetrics, AppError> {
    let window = error::window()?;
    let document = window.document().ok_or(AppError::NoDocument)?;
    let scroll_y = window.scroll_y()?;
    let viewport_height = window.inner_height()?.as_f64().unwrap_or(0.0);
    let document_height = document
        .document_element()
        .map(|el| el.scroll_height() as f64)
        .unwrap_or(0.0);
    let pricing_in_view = document
        .get_element_by_id(config::PRICING_SECTION_ID)
        .map(|section| {
            let rect = section.get_bounding_client_rect();
            intersects_viewport(rect.top(), rect.bottom(), viewport_height)
        })
        .unwrap_or(false);
    Ok(PageMetrics {
        percent: scroll_percentage(scroll_y, document_height, viewport_height),
        pricing_in_view,
    })
}

fn scroll_to_pricing() -> Result<(), AppError> {
    let window = error::window()?;
    let document = window.document().ok_or(AppError::NoDocument)?;
    let pricing = document
        .get_element_by_id(config::PRICING_SECTION_ID)
        .ok_or_else(|| AppError::MissingElement(config::PRICING_SECTION_ID.to_string()))?;
    let header_height = document
        .query_selector(config::HEADER_SELECTOR)?
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        .map(|el| el.offset_height() as f64)
        .unwrap_or(0.0);
    let top = scroll_target(pricing.get_bounding_client_rect().top(), window.scroll_y()?, header_height);

    let options = ScrollToOptions::new();
    options.set_top(top);
    options.set_behavior(ScrollBehavior::Smooth);
    window.scroll_to_with_scroll_to_options(&options);
    Ok(())
}

/// Bottom bar that appears after 20 seconds or half a page of scrolling.
#[function_component(StickyCta)]
pub fn sticky_cta() -> Html {
    let state = use_mut_ref(VisibilityState::new);
    let visible = use_state_eq(|| false);

    {
        let state = state.clone();
        let visible = visible.clone();
        use_timeout(
            move || {
                state.borrow_mut().on_time_elapsed();
                visible.set(state.borrow().is_visible());
            },
            TIME_TRIGGER_MS,
        );
    }

    let check_scroll = {
        let state = state.clone();
        let visible = visible.clone();
        move || match measure() {
            Ok(metrics) => {
                state.borrow_mut().on_scroll(metrics.percent, metrics.pricing_in_view);
                visible.set(state.borrow().is_visible());
            }
            Err(e) => debug!("Skipping scroll check: {}", e),
        }
    };

    // Catch up when the page is restored already scrolled.
    {
        let check_scroll = check_scroll.clone();
        use_effect_with_deps(
            move |_| {
                check_scroll();
                || ()
            },
            (),
        );
    }

    {
        let check_scroll = check_scroll.clone();
        use_event_with_window("scroll", move |_: Event| check_scroll());
    }
    use_event_with_window("resize", move |_: Event| check_scroll());

    {
        let state = state.clone();
        let visible = visible.clone();
        use_event_with_window(CHECKOUT_OPEN_EVENT, move |_: Event| {
            state.borrow_mut().on_checkout_opened();
            visible.set(state.borrow().is_visible());
        });
    }

    {
        let state = state.clone();
        let visible = visible.clone();
        use_event_with_window(CHECKOUT_CLOSED_EVENT, move |_: Event| {
            let percent = measure().map(|m| m.percent).unwrap_or(0.0);
            state.borrow_mut().on_checkout_closed(percent);
            visible.set(state.borrow().is_visible());
        });
    }

    let featured = catalog::featured_package();
    let onclick = Callback::from(move |e: MouseEvent| {
        e.prevent_default();
        analytics::track_checkout_initiated(featured.key, "sticky_cta");
        if let Err(e) = scroll_to_pricing() {
            debug!("Could not scroll to pricing: {}", e);
        }
    });

    html! {
        <div class={classes!("sticky-cta", (*visible).then(|| "visible"))} aria-hidden={(!*visible).to_string()}>
            <div class="sticky-cta-content">
                <div class="sticky-cta-text">
                    <strong>{featured.name}</strong>
                    <span>{format!(" · {} instead of {} ", format_eur(featured.total_price), format_eur(featured.unit_price * featured.quantity as f64))}</span>
                    <span class="sticky-cta-badge">{format!("-{}%", featured.discount_percent)}</span>
                </div>
                <button class="sticky-cta-button" {onclick}>{"Order now"}</button>
            </div>
            <style>
                {r#"
                    .sticky-cta {
                        position: fixed;
                        left: 0;
                        right: 0;
                        bottom: 0;
                        z-index: 900;
                        background: #ffffff;
                        border-top: 1px solid #dfe7e2;
                        box-shadow: 0 -8px 24px rgba(0, 0, 0, 0.08);
                        transform: translateY(100%);
                        visibility: hidden;
                        transition: transform 0.3s ease, visibility 0.3s;
                    }
                    .sticky-cta.visible {
                        transform: translateY(0);
                        visibility: visible;
                    }
                    .sticky-cta-content {
                        max-width: 1100px;
                        margin: 0 auto;
                        padding: 0.9rem 1.5rem;
                        display: flex;
                        align-items: center;
                        justify-content: space-between;
                        gap: 1rem;
                    }
                    .sticky-cta-badge {
                        background: #e3f1ea;
                        color: #2f7d5b;
                        border-radius: 6px;
                        padding: 0.1rem 0.4rem;
                        font-weight: 600;
                    }
                    .sticky-cta-button {
                        background: #2f7d5b;
                        color: #fff;
                        border: none;
                        border-radius: 10px;
                        padding: 0.8rem 1.6rem;
                        font-size: 1rem;
                        cursor: pointer;
                    }
                    @media (max-width: 600px) {
                        .sticky-cta-text span {
                            display: none;
                        }
                    }
                "#}
            </style>
        </div>
    }
}

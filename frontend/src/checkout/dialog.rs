use log::warn;
use web_sys::{CustomEvent, MouseEvent};
use yew::prelude::*;

use crate::catalog::{self, format_eur, PackageKey, COLOR_VARIANTS};
use crate::checkout::cart_link::CartLink;
use crate::checkout::mount::{container_id, use_buy_button};
use crate::config;
use crate::error::{self, AppError};

pub const CHECKOUT_OPEN_EVENT: &str = "checkoutOpen";
pub const CHECKOUT_CLOSED_EVENT: &str = "checkoutClosed";

fn announce(event_name: &str) {
    let dispatched = (|| -> Result<(), AppError> {
        let event = CustomEvent::new(event_name)?;
        error::window()?.dispatch_event(&event)?;
        Ok(())
    })();
    if let Err(e) = dispatched {
        warn!("Failed to dispatch {}: {}", event_name, e);
    }
}

#[derive(Properties, PartialEq)]
pub struct CheckoutDialogProps {
    pub package: PackageKey,
    pub open: bool,
    pub on_close: Callback<()>,
}

/// Modal holding the Buy Button for one package.
///
/// The widget container stays in the DOM while the dialog is closed so the
/// rendered button survives open/close cycles.
#[function_component(CheckoutDialog)]
pub fn checkout_dialog(props: &CheckoutDialogProps) -> Html {
    let container = use_node_ref();
    let color = use_state(|| 0usize);

    use_buy_button(container.clone(), props.package, props.open);

    use_effect_with_deps(
        |&open| {
            if open {
                announce(CHECKOUT_OPEN_EVENT);
            }
            move || {
                if open {
                    announce(CHECKOUT_CLOSED_EVENT);
                }
            }
        },
        props.open,
    );

    let close = {
        let on_close = props.on_close.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            on_close.emit(());
        })
    };

    let package = catalog::package(props.package);
    let selected = COLOR_VARIANTS.get(*color).unwrap_or(&COLOR_VARIANTS[0]);
    let fallback = CartLink::for_package(package, selected);

    html! {
        <div class={classes!("checkout-dialog", props.open.then(|| "open"))} aria-hidden={(!props.open).to_string()}>
            <div class="checkout-backdrop" onclick={close.clone()}></div>
            <div class="checkout-panel" role="dialog" aria-modal="true" aria-label={package.name}>
                <button class="checkout-close" onclick={close}>{"✕"}</button>
                <h3>{package.name}</h3>
                <p class="checkout-summary">
                    {format!("{} × Toeflex · {}", package.quantity, format_eur(package.total_price))}
                </p>
                <div class="checkout-colors">
                    {
                        COLOR_VARIANTS.iter().enumerate().map(|(i, variant)| {
                            let onclick = {
                                let color = color.clone();
                                Callback::from(move |_: MouseEvent| color.set(i))
                            };
                            html! {
                                <button
                                    class={classes!("color-chip", (i == *color).then(|| "selected"))}
                                    {onclick}
                                >
                                    {variant.name}
                                </button>
                            }
                        }).collect::<Html>()
                    }
                </div>
                <div id={container_id(props.package)} class="checkout-widget" ref={container}></div>
                if !fallback.is_empty() {
                    <a
                        class="checkout-fallback"
                        href={fallback.build(config::get_shop_domain())}
                        target="_blank"
                        rel="noopener noreferrer"
                    >
                        {format!("Button not loading? Order {} in our shop", selected.name)}
                    </a>
                }
            </div>
            <style>
                {r#"
                    .checkout-dialog {
                        position: fixed;
                        inset: 0;
                        z-index: 1000;
                        display: flex;
                        align-items: center;
                        justify-content: center;
                        visibility: hidden;
                        opacity: 0;
                        transition: opacity 0.2s ease;
                    }
                    .checkout-dialog.open {
                        visibility: visible;
                        opacity: 1;
                    }
                    .checkout-backdrop {
                        position: absolute;
                        inset: 0;
                        background: rgba(20, 30, 25, 0.55);
                    }
                    .checkout-panel {
                        position: relative;
                        width: min(440px, 92vw);
                        background: #fff;
                        border-radius: 18px;
                        padding: 2rem;
                        box-shadow: 0 24px 48px rgba(0, 0, 0, 0.2);
                    }
                    .checkout-close {
                        position: absolute;
                        top: 1rem;
                        right: 1rem;
                        border: none;
                        background: none;
                        font-size: 1.2rem;
                        cursor: pointer;
                    }
                    .checkout-summary {
                        color: #4a5a52;
                        margin-bottom: 1rem;
                    }
                    .checkout-colors {
                        display: flex;
                        gap: 0.5rem;
                        margin-bottom: 1rem;
                    }
                    .color-chip {
                        border: 1px solid #cfd8d3;
                        background: #f6f8f7;
                        border-radius: 999px;
                        padding: 0.3rem 0.9rem;
                        cursor: pointer;
                    }
                    .color-chip.selected {
                        border-color: #2f7d5b;
                        background: #e3f1ea;
                    }
                    .checkout-widget {
                        min-height: 56px;
                    }
                    .checkout-fallback {
                        display: block;
                        margin-top: 1rem;
                        font-size: 0.85rem;
                        color: #4a5a52;
                        text-align: center;
                    }
                "#}
            </style>
        </div>
    }
}

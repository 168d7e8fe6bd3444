use yew::prelude::*;
use web_sys::MouseEvent;

use crate::analytics::{self, EventParams};
use crate::catalog::{format_eur, Package, PackageKey, PACKAGES};
use crate::checkout::dialog::CheckoutDialog;
use crate::checkout::tracking::use_checkout_click_tracking;
use crate::config;

#[derive(Properties, PartialEq)]
struct PricingCardProps {
    package: &'static Package,
    on_choose: Callback<PackageKey>,
}

#[function_component(PricingCard)]
fn pricing_card(props: &PricingCardProps) -> Html {
    let package = props.package;

    let onclick = {
        let on_choose = props.on_choose.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            on_choose.emit(package.key);
        })
    };

    let regular_price = package.unit_price * package.quantity as f64;

    html! {
        <div class={classes!("pricing-card", package.key.as_str(), package.featured.then(|| "featured"))}>
            if package.featured {
                <div class="popular-tag">{"Most Popular"}</div>
            }
            <div class="card-header">
                <h3>{package.name}</h3>
                <p class="card-description">{package.description}</p>
                <div class="price">
                    if package.discount_percent > 0 {
                        <span class="regular">{format_eur(regular_price)}</span>
                    }
                    <span class="amount">{format_eur(package.total_price)}</span>
                </div>
                if package.discount_percent > 0 {
                    <span class="savings">
                        {format!("You save {} ({}%)", format_eur(package.savings()), package.discount_percent)}
                    </span>
                }
            </div>
            <ul>
                {
                    package.features.iter().map(|feature| html! {
                        <li class={classes!(feature.important.then(|| "important"))}>
                            {feature.text}
                            if feature.free {
                                <span class="feature-tag free">{"free"}</span>
                            }
                            if feature.new {
                                <span class="feature-tag new">{"new"}</span>
                            }
                        </li>
                    }).collect::<Html>()
                }
            </ul>
            <button class="order-button" {onclick}><b>{"Choose"}</b></button>
        </div>
    }
}

/// Package cards plus one checkout dialog per package.
///
/// Dialogs are always rendered so their widget containers exist for the
/// click tracker; only one is open at a time.
#[function_component(PricingSection)]
pub fn pricing_section() -> Html {
    let open_package = use_state(|| None::<PackageKey>);

    use_checkout_click_tracking();

    let on_choose = {
        let open_package = open_package.clone();
        Callback::from(move |key: PackageKey| {
            let package = crate::catalog::package(key);
            let mut params = EventParams::new();
            params.insert("package".into(), key.as_str().into());
            params.insert("value".into(), package.total_price.into());
            params.insert("currency".into(), config::CURRENCY.into());
            analytics::track_event("view_item", &params);
            open_package.set(Some(key));
        })
    };

    let on_close = {
        let open_package = open_package.clone();
        Callback::from(move |_: ()| open_package.set(None))
    };

    html! {
        <section id={config::PRICING_SECTION_ID} class="pricing-container">
            <div class="pricing-header">
                <h2>{"Choose your set"}</h2>
                <p>{"Free shipping within Germany. 30-day money-back guarantee."}</p>
            </div>
            <div class="pricing-grid">
                {
                    PACKAGES.iter().map(|package| html! {
                        <PricingCard key={package.key.as_str()} {package} on_choose={on_choose.clone()} />
                    }).collect::<Html>()
                }
            </div>
            {
                PackageKey::ALL.iter().map(|&key| html! {
                    <CheckoutDialog
                        key={key.as_str()}
                        package={key}
                        open={*open_package == Some(key)}
                        on_close={on_close.clone()}
                    />
                }).collect::<Html>()
            }
            <style>
                {r#"
                    .pricing-container {
                        max-width: 1100px;
                        margin: 0 auto;
                        padding: 5rem 1.5rem;
                    }
                    .pricing-header {
                        text-align: center;
                        margin-bottom: 3rem;
                    }
                    .pricing-grid {
                        display: grid;
                        grid-template-columns: repeat(auto-fit, minmax(280px, 1fr));
                        gap: 1.5rem;
                        align-items: stretch;
                    }
                    .pricing-card {
                        position: relative;
                        display: flex;
                        flex-direction: column;
                        background: #fff;
                        border: 1px solid #dfe7e2;
                        border-radius: 18px;
                        padding: 2rem;
                    }
                    .pricing-card.featured {
                        border: 2px solid #2f7d5b;
                        transform: scale(1.03);
                        box-shadow: 0 16px 40px rgba(47, 125, 91, 0.15);
                    }
                    .popular-tag {
                        position: absolute;
                        top: -0.8rem;
                        left: 50%;
                        transform: translateX(-50%);
                        background: #2f7d5b;
                        color: #fff;
                        border-radius: 999px;
                        padding: 0.2rem 1rem;
                        font-size: 0.85rem;
                    }
                    .price .regular {
                        text-decoration: line-through;
                        color: #8a9690;
                        margin-right: 0.5rem;
                    }
                    .price .amount {
                        font-size: 2rem;
                        font-weight: 700;
                    }
                    .savings {
                        color: #2f7d5b;
                        font-weight: 600;
                    }
                    .pricing-card ul {
                        list-style: none;
                        padding: 0;
                        margin: 1.5rem 0;
                        flex: 1;
                    }
                    .pricing-card li {
                        padding: 0.4rem 0;
                    }
                    .pricing-card li.important {
                        font-weight: 600;
                    }
                    .feature-tag {
                        margin-left: 0.4rem;
                        font-size: 0.75rem;
                        border-radius: 6px;
                        padding: 0.05rem 0.4rem;
                        background: #e3f1ea;
                        color: #2f7d5b;
                    }
                    .order-button {
                        background: #2f7d5b;
                        color: #fff;
                        border: none;
                        border-radius: 10px;
                        padding: 0.9rem;
                        font-size: 1rem;
                        cursor: pointer;
                    }
                "#}
            </style>
        </section>
    }
}

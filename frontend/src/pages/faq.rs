use yew::prelude::*;
use web_sys::MouseEvent;

use crate::analytics::{self, EventParams};
use crate::catalog::{FaqEntry, FAQ_ENTRIES};

#[derive(Properties, PartialEq)]
struct FaqItemProps {
    entry: &'static FaqEntry,
}

#[function_component(FaqItem)]
fn faq_item(props: &FaqItemProps) -> Html {
    let is_open = use_state(|| false);
    let entry = props.entry;

    let toggle = {
        let is_open = is_open.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            if !*is_open {
                let mut params = EventParams::new();
                params.insert("faq_id".into(), entry.id.into());
                analytics::track_event("faq_opened", &params);
            }
            is_open.set(!*is_open);
        })
    };

    html! {
        <div id={entry.id} class={classes!("faq-item", if *is_open { "open" } else { "" })}>
            <button class="faq-question" onclick={toggle} aria-expanded={is_open.to_string()}>
                <span class="question-text">{entry.question}</span>
                <span class="toggle-icon">{if *is_open { "−" } else { "+" }}</span>
            </button>
            <div class="faq-answer">
                <p>{entry.answer}</p>
            </div>
        </div>
    }
}

#[function_component(FaqSection)]
pub fn faq_section() -> Html {
    html! {
        <section id="faq" class="faq-section">
            <h2>{"Frequently Asked Questions"}</h2>
            <div class="faq-list">
                { for FAQ_ENTRIES.iter().map(|entry| html! { <FaqItem key={entry.id} {entry} /> }) }
            </div>
            <style>
                {r#"
                    .faq-section {
                        max-width: 760px;
                        margin: 0 auto;
                        padding: 5rem 1.5rem;
                    }
                    .faq-section h2 {
                        text-align: center;
                        margin-bottom: 2rem;
                    }
                    .faq-item {
                        border-bottom: 1px solid #dfe7e2;
                    }
                    .faq-question {
                        width: 100%;
                        display: flex;
                        justify-content: space-between;
                        align-items: center;
                        padding: 1.2rem 0;
                        background: none;
                        border: none;
                        font-size: 1.05rem;
                        text-align: left;
                        cursor: pointer;
                    }
                    .faq-answer {
                        max-height: 0;
                        overflow: hidden;
                        transition: max-height 0.3s ease;
                        color: #4a5a52;
                    }
                    .faq-item.open .faq-answer {
                        max-height: 400px;
                    }
                "#}
            </style>
        </section>
    }
}

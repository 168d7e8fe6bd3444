use yew::prelude::*;
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use wasm_bindgen_futures::spawn_local;
use log::warn;

use crate::analytics::{self, EventParams};
use crate::catalog::{average_rating, seed_reviews, Rating, Review};
use crate::components::notification::{Notice, Toast, ToastKind};
use crate::config;
use crate::reviews::{ReviewDraft, SimulatedReviewIntake, MAX_COMMENT_CHARS};

fn stars(rating: Rating) -> String {
    let filled = rating.get() as usize;
    format!("{}{}", "★".repeat(filled), "☆".repeat(Rating::MAX as usize - filled))
}

#[derive(Properties, PartialEq)]
struct ReviewCardProps {
    review: Review,
}

#[function_component(ReviewCard)]
fn review_card(props: &ReviewCardProps) -> Html {
    let review = &props.review;
    html! {
        <div class="review-card">
            <div class="review-stars" aria-label={format!("{} out of 5 stars", review.rating.get())}>
                {stars(review.rating)}
            </div>
            <p class="review-comment">{review.comment.clone()}</p>
            <div class="review-meta">
                <span class="review-author">{review.author.clone()}</span>
                <span class="review-date">{review.date.clone()}</span>
            </div>
        </div>
    }
}

#[function_component(ReviewsSection)]
pub fn reviews_section() -> Html {
    let reviews = use_state(seed_reviews);
    let draft = use_state(|| ReviewDraft { rating: 5, ..Default::default() });
    let submitting = use_state(|| false);
    let toast = use_state(|| None::<Notice>);
    let last_notice = use_mut_ref(|| None::<Notice>);

    let on_author = {
        let draft = draft.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            draft.set(ReviewDraft { author: input.value(), ..(*draft).clone() });
        })
    };

    let on_rating = {
        let draft = draft.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            let rating = select.value().parse().unwrap_or(0);
            draft.set(ReviewDraft { rating, ..(*draft).clone() });
        })
    };

    let on_comment = {
        let draft = draft.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlTextAreaElement = e.target_unchecked_into();
            draft.set(ReviewDraft { comment: input.value(), ..(*draft).clone() });
        })
    };

    let onsubmit = {
        let reviews = reviews.clone();
        let draft = draft.clone();
        let submitting = submitting.clone();
        let toast = toast.clone();
        let last_notice = last_notice.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *submitting {
                return;
            }
            submitting.set(true);
            let reviews = reviews.clone();
            let draft = draft.clone();
            let submitting = submitting.clone();
            let toast = toast.clone();
            let last_notice = last_notice.clone();
            let submission = (*draft).clone();
            spawn_local(async move {
                let intake = SimulatedReviewIntake::new(config::get_review_intake_delay_ms());
                match intake.submit(submission).await {
                    Ok(review) => {
                        let mut params = EventParams::new();
                        params.insert("rating".into(), (review.rating.get() as u32).into());
                        analytics::track_event("review_submitted", &params);

                        let mut updated = vec![review];
                        updated.extend((*reviews).iter().cloned());
                        reviews.set(updated);
                        draft.set(ReviewDraft { rating: 5, ..Default::default() });
                        let notice = Notice::follow(last_notice.borrow().as_ref(), ToastKind::Success, "Thank you for your review!");
                        *last_notice.borrow_mut() = Some(notice.clone());
                        toast.set(Some(notice));
                    }
                    Err(e) => {
                        warn!("Review submission failed: {}", e);
                        let notice = Notice::follow(last_notice.borrow().as_ref(), ToastKind::Error, e.to_string());
                        *last_notice.borrow_mut() = Some(notice.clone());
                        toast.set(Some(notice));
                    }
                }
                submitting.set(false);
            });
        })
    };

    let on_dismiss = {
        let toast = toast.clone();
        Callback::from(move |_: ()| toast.set(None))
    };

    let average = average_rating(&reviews);

    html! {
        <section id="reviews" class="reviews-section">
            <h2>{"What our customers say"}</h2>
            if let Some(average) = average {
                <p class="reviews-summary">
                    {format!("{:.1} / 5 from {} reviews", average, reviews.len())}
                </p>
            }
            <div class="reviews-grid">
                {
                    reviews.iter().enumerate().map(|(i, review)| html! {
                        <ReviewCard key={format!("{}-{}", reviews.len() - i, review.author)} review={review.clone()} />
                    }).collect::<Html>()
                }
            </div>

            <form class="review-form" {onsubmit}>
                <h3>{"Share your experience"}</h3>
                <input
                    type="text"
                    placeholder="Your name"
                    value={draft.author.clone()}
                    oninput={on_author}
                />
                <select onchange={on_rating}>
                    {
                        (1..=Rating::MAX).rev().map(|value| html! {
                            <option value={value.to_string()} selected={draft.rating == value}>
                                {format!("{} stars", value)}
                            </option>
                        }).collect::<Html>()
                    }
                </select>
                <textarea
                    placeholder="How do you like Toeflex?"
                    maxlength={MAX_COMMENT_CHARS.to_string()}
                    value={draft.comment.clone()}
                    oninput={on_comment}
                />
                <button type="submit" disabled={*submitting}>
                    {if *submitting { "Sending..." } else { "Submit review" }}
                </button>
            </form>

            if let Some(notice) = (*toast).clone() {
                <Toast {notice} {on_dismiss} />
            }

            <style>
                {r#"
                    .reviews-section {
                        max-width: 1100px;
                        margin: 0 auto;
                        padding: 5rem 1.5rem;
                    }
                    .reviews-section h2 {
                        text-align: center;
                    }
                    .reviews-summary {
                        text-align: center;
                        color: #4a5a52;
                        margin-bottom: 2rem;
                    }
                    .reviews-grid {
                        display: grid;
                        grid-template-columns: repeat(auto-fill, minmax(260px, 1fr));
                        gap: 1.2rem;
                    }
                    .review-card {
                        background: #fff;
                        border: 1px solid #dfe7e2;
                        border-radius: 14px;
                        padding: 1.4rem;
                    }
                    .review-stars {
                        color: #e0a526;
                        letter-spacing: 2px;
                    }
                    .review-meta {
                        display: flex;
                        justify-content: space-between;
                        color: #8a9690;
                        font-size: 0.85rem;
                    }
                    .review-form {
                        max-width: 520px;
                        margin: 3rem auto 0;
                        display: flex;
                        flex-direction: column;
                        gap: 0.8rem;
                    }
                    .review-form input,
                    .review-form select,
                    .review-form textarea {
                        padding: 0.8rem;
                        border: 1px solid #cfd8d3;
                        border-radius: 10px;
                        font: inherit;
                    }
                    .review-form textarea {
                        min-height: 120px;
                    }
                    .review-form button {
                        background: #2f7d5b;
                        color: #fff;
                        border: none;
                        border-radius: 10px;
                        padding: 0.9rem;
                        cursor: pointer;
                    }
                    .review-form button:disabled {
                        opacity: 0.6;
                        cursor: default;
                    }
                "#}
            </style>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stars_pad_to_five() {
        assert_eq!(stars(Rating::try_from(3).unwrap()), "★★★☆☆");
        assert_eq!(stars(Rating::try_from(5).unwrap()), "★★★★★");
    }
}

use yew::prelude::*;
use yew_router::prelude::*;

use crate::catalog::{self, average_rating, format_eur, seed_reviews, TESTIMONIALS};
use crate::components::sticky_cta::StickyCta;
use crate::pages::faq::FaqSection;
use crate::pages::pricing::PricingSection;
use crate::pages::reviews::ReviewsSection;
use crate::Route;

const CONSEQUENCES: [(&str, &str); 4] = [
    ("Bunions", "Toes pushed inward for years slowly bend the big toe joint out of line."),
    ("Hammer toes", "Cramped toes curl to find room and stiffen in that position."),
    ("Forefoot pain", "Pressure concentrates on the ball of the foot with every step."),
    ("Poor balance", "Toes that can't spread can't stabilise you when you walk or run."),
];

#[function_component(Landing)]
pub fn landing() -> Html {
    // Scroll to top only on initial mount
    use_effect_with_deps(
        move |_| {
            if let Some(window) = web_sys::window() {
                window.scroll_to_with_x_and_y(0.0, 0.0);
            }
            || ()
        },
        (),
    );

    let featured = catalog::featured_package();
    let rating = average_rating(&seed_reviews()).unwrap_or(5.0);

    html! {
        <div class="landing-page">
            <header class="hero">
                <div class="hero-content">
                    <h1>{"Give your toes the room they were made for"}</h1>
                    <p class="hero-subtitle">
                        {"Toeflex silicone toe separators gently realign cramped toes after a long day in shoes."}
                    </p>
                    <div class="hero-rating">
                        {format!("★ {:.1} / 5 from happy customers", rating)}
                    </div>
                    <a href="#pricing" class="hero-cta">
                        {format!("Get the {} for {}", featured.name, format_eur(featured.total_price))}
                    </a>
                </div>
            </header>

            <section class="problem-section">
                <h2>{"Your shoes are reshaping your feet"}</h2>
                <p>
                    {"Narrow toe boxes squeeze your toes together for hours every day. Over time the muscles \
                      that spread and stabilise your toes weaken, and the joints get used to the wrong position."}
                </p>
            </section>

            <section class="consequences-section">
                <h2>{"What happens if you ignore it"}</h2>
                <div class="consequences-grid">
                    {
                        CONSEQUENCES.iter().map(|(title, text)| html! {
                            <div class="consequence-card" key={*title}>
                                <h3>{*title}</h3>
                                <p>{*text}</p>
                            </div>
                        }).collect::<Html>()
                    }
                </div>
            </section>

            <section class="testimonials-section">
                <h2>{"Recommended by people on their feet all day"}</h2>
                <div class="testimonials-grid">
                    {
                        TESTIMONIALS.iter().map(|t| html! {
                            <blockquote class="testimonial" key={t.name}>
                                <p>{format!("\u{201c}{}\u{201d}", t.quote)}</p>
                                <footer>
                                    <strong>{t.name}</strong>
                                    <span>{t.role}</span>
                                </footer>
                            </blockquote>
                        }).collect::<Html>()
                    }
                </div>
            </section>

            <PricingSection />
            <ReviewsSection />
            <FaqSection />

            <footer class="landing-footer">
                <div class="footer-links">
                    <Link<Route> to={Route::Terms} classes="footer-link">{"Terms & Conditions"}</Link<Route>>
                    <Link<Route> to={Route::Privacy} classes="footer-link">{"Privacy Policy"}</Link<Route>>
                </div>
                <p>{"© Toeflex. All prices include VAT."}</p>
            </footer>

            <StickyCta />

            <style>
                {r#"
                    .landing-page {
                        color: #1f2b25;
                        background: #f6f8f7;
                    }
                    .hero {
                        min-height: 80vh;
                        display: flex;
                        align-items: center;
                        justify-content: center;
                        text-align: center;
                        padding: 8rem 1.5rem 4rem;
                        background: linear-gradient(180deg, #e3f1ea 0%, #f6f8f7 100%);
                    }
                    .hero-content {
                        max-width: 720px;
                    }
                    .hero h1 {
                        font-size: clamp(2rem, 5vw, 3.4rem);
                        line-height: 1.1;
                    }
                    .hero-subtitle {
                        font-size: 1.2rem;
                        color: #4a5a52;
                    }
                    .hero-rating {
                        color: #e0a526;
                        margin: 1rem 0 2rem;
                    }
                    .hero-cta {
                        display: inline-block;
                        background: #2f7d5b;
                        color: #fff;
                        text-decoration: none;
                        border-radius: 12px;
                        padding: 1rem 2rem;
                        font-weight: 600;
                    }
                    .problem-section,
                    .consequences-section,
                    .testimonials-section {
                        max-width: 1100px;
                        margin: 0 auto;
                        padding: 4rem 1.5rem;
                    }
                    .problem-section {
                        max-width: 760px;
                        text-align: center;
                    }
                    .consequences-grid,
                    .testimonials-grid {
                        display: grid;
                        grid-template-columns: repeat(auto-fit, minmax(240px, 1fr));
                        gap: 1.2rem;
                    }
                    .consequence-card,
                    .testimonial {
                        background: #fff;
                        border-radius: 14px;
                        padding: 1.5rem;
                        margin: 0;
                        border: 1px solid #dfe7e2;
                    }
                    .testimonial footer {
                        display: flex;
                        flex-direction: column;
                        margin-top: 1rem;
                        color: #4a5a52;
                    }
                    .landing-footer {
                        text-align: center;
                        padding: 3rem 1.5rem 7rem;
                        color: #8a9690;
                    }
                    .footer-links {
                        display: flex;
                        justify-content: center;
                        gap: 1.5rem;
                        margin-bottom: 1rem;
                    }
                    .footer-link {
                        color: #4a5a52;
                    }
                "#}
            </style>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consequence_titles_are_unique_keys() {
        let mut titles: Vec<_> = CONSEQUENCES.iter().map(|(t, _)| *t).collect();
        titles.sort();
        titles.dedup();
        assert_eq!(titles.len(), CONSEQUENCES.len());
    }
}

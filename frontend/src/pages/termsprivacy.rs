use yew::prelude::*;
use yew_router::prelude::*;

use crate::config;
use crate::Route;

#[function_component(LegalLinks)]
fn legal_links() -> Html {
    html! {
        <div class="legal-links">
            <Link<Route> to={Route::Home}>{"Home"}</Link<Route>>
            {" | "}
            <Link<Route> to={Route::Terms}>{"Terms & Conditions"}</Link<Route>>
            {" | "}
            <Link<Route> to={Route::Privacy}>{"Privacy Policy"}</Link<Route>>
        </div>
    }
}

#[function_component(PrivacyPolicy)]
pub fn privacy_policy() -> Html {
    html! {
        <div class="legal-content privacy-policy">
            <h1>{"Privacy Policy"}</h1>

            <section>
                <h2>{"1. What we collect"}</h2>
                <p>{"This website does not have user accounts and stores nothing on our servers. We process:"}</p>
                <ul>
                    <li>{"Usage statistics through Google Analytics (pages viewed, approximate location, device type)"}</li>
                    <li>{"Conversion events through the Meta (Facebook) Pixel"}</li>
                    <li>{"Order data you enter in the Shopify checkout (name, address, payment details)"}</li>
                </ul>
            </section>

            <section>
                <h2>{"2. Checkout"}</h2>
                <p>
                    {format!(
                        "Orders are processed by Shopify on {}. Payment data never passes through this website.",
                        config::get_shop_domain()
                    )}
                </p>
            </section>

            <section>
                <h2>{"3. Reviews"}</h2>
                <p>{"Reviews you submit on this page are shown for your current visit only and are not stored."}</p>
            </section>

            <section>
                <h2>{"4. Your rights"}</h2>
                <p>{"You have the right to:"}</p>
                <ul>
                    <li>{"Access the personal data we hold about you"}</li>
                    <li>{"Request correction or deletion of your order data"}</li>
                    <li>{"Object to analytics tracking by blocking cookies in your browser"}</li>
                </ul>
            </section>

            <section>
                <h2>{"5. Contact"}</h2>
                <p>{"For privacy-related inquiries contact: support@toeflex.de"}</p>
            </section>
            <LegalLinks />
        </div>
    }
}

#[function_component(TermsAndConditions)]
pub fn terms_and_conditions() -> Html {
    html! {
        <div class="legal-content terms-and-conditions">
            <h1>{"Terms & Conditions"}</h1>

            <section>
                <h2>{"1. Scope"}</h2>
                <p>{"These Terms apply to all orders of Toeflex products placed through this website."}</p>
            </section>

            <section>
                <h2>{"2. Prices and payment"}</h2>
                <p>
                    {format!(
                        "All prices are in {} and include VAT. Bundle discounts are applied automatically at checkout.",
                        config::CURRENCY
                    )}
                </p>
            </section>

            <section>
                <h2>{"3. Shipping"}</h2>
                <p>{"Orders placed before 2 pm on working days ship the same day. Shipping within Germany is free."}</p>
            </section>

            <section>
                <h2>{"4. Returns"}</h2>
                <ul>
                    <li>{"You may return your order within 30 days of delivery."}</li>
                    <li>{"We refund the full purchase price once the return arrives."}</li>
                </ul>
            </section>

            <section>
                <h2>{"5. Health notice"}</h2>
                <p>{"Toeflex is not a medical device. If you have diabetes, circulation problems or acute foot pain, consult a doctor before use."}</p>
            </section>
            <LegalLinks />
        </div>
    }
}

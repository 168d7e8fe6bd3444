use yew::prelude::*;
use yew_router::prelude::*;
use log::{info, warn, Level};
use web_sys::MouseEvent;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

mod analytics;
mod catalog;
mod config;
mod error;
mod reviews;
mod visibility;
mod checkout {
    pub mod cart_link;
    pub mod dialog;
    pub mod mount;
    pub mod tracking;
}
mod components {
    pub mod notification;
    pub mod sticky_cta;
}
mod pages {
    pub mod faq;
    pub mod landing;
    pub mod pricing;
    pub mod reviews;
    pub mod termsprivacy;
}

use pages::{
    landing::Landing,
    termsprivacy::{TermsAndConditions, PrivacyPolicy},
};

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/terms")]
    Terms,
    #[at("/privacy")]
    Privacy,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(routes: Route) -> Html {
    match routes {
        Route::Home => {
            info!("Rendering Home page");
            html! { <Landing /> }
        },
        Route::Terms => {
            info!("Rendering Terms page");
            html! { <TermsAndConditions /> }
        },
        Route::Privacy => {
            info!("Rendering Privacy page");
            html! { <PrivacyPolicy /> }
        },
        Route::NotFound => {
            info!("Rendering NotFound page");
            html! {
                <div class="legal-content not-found">
                    <h1>{"Page not found"}</h1>
                    <Link<Route> to={Route::Home}>{"Back to Toeflex"}</Link<Route>>
                </div>
            }
        },
    }
}

/// Reports a page view whenever the router location changes.
#[function_component(PageViewTracker)]
fn page_view_tracker() -> Html {
    let location = use_location();
    let path = location.map(|l| l.path().to_string()).unwrap_or_default();

    use_effect_with_deps(
        |path: &String| {
            if let Some(window) = web_sys::window() {
                let url = window.location().href().unwrap_or_else(|_| path.clone());
                let title = window.document().map(|d| d.title()).unwrap_or_default();
                analytics::track_page_view(path, &url, &title);
            }
            || ()
        },
        path,
    );

    html! {}
}

#[function_component(Nav)]
pub fn nav() -> Html {
    let menu_open = use_state(|| false);
    let is_scrolled = use_state(|| false);

    {
        let is_scrolled = is_scrolled.clone();
        use_effect_with_deps(move |_| {
            let listener = web_sys::window().map(|window| {
                let window_clone = window.clone();
                let scroll_callback = Closure::wrap(Box::new(move || {
                    let scroll_top = window_clone.scroll_y().unwrap_or(0.0);
                    is_scrolled.set(scroll_top > 80.0);
                }) as Box<dyn FnMut()>);

                if let Err(e) = window.add_event_listener_with_callback("scroll", scroll_callback.as_ref().unchecked_ref()) {
                    warn!("Could not attach nav scroll listener: {:?}", e);
                }
                (window, scroll_callback)
            });

            move || {
                if let Some((window, scroll_callback)) = listener {
                    let _ = window.remove_event_listener_with_callback("scroll", scroll_callback.as_ref().unchecked_ref());
                }
            }
        }, ());
    }

    let toggle_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            menu_open.set(!*menu_open);
        })
    };

    // Anchor clicks only close the menu; the browser handles the jump.
    let close_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |_: MouseEvent| {
            menu_open.set(false);
        })
    };

    let menu_class = if *menu_open {
        "nav-right mobile-menu-open"
    } else {
        "nav-right"
    };

    html! {
        <nav class={classes!("top-nav", (*is_scrolled).then(|| "scrolled"))}>
            <div class="nav-content">
                <Link<Route> to={Route::Home} classes="nav-logo">
                    {"Toeflex"}
                </Link<Route>>

                <button class="burger-menu" onclick={toggle_menu}>
                    <span></span>
                    <span></span>
                    <span></span>
                </button>
                <div class={menu_class}>
                    <a href="/#pricing" class="nav-link" onclick={close_menu.clone()}>{"Pricing"}</a>
                    <a href="/#reviews" class="nav-link" onclick={close_menu.clone()}>{"Reviews"}</a>
                    <a href="/#faq" class="nav-link" onclick={close_menu.clone()}>{"FAQ"}</a>
                    <a href="/#pricing" class="nav-order-button" onclick={close_menu}>{"Order now"}</a>
                </div>
            </div>
        </nav>
    }
}

#[function_component]
fn App() -> Html {
    html! {
        <BrowserRouter>
            <PageViewTracker />
            <Nav />
            <Switch<Route> render={switch} />
        </BrowserRouter>
    }
}

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    let level = if cfg!(debug_assertions) { Level::Debug } else { Level::Info };
    console_log::init_with_level(level).expect("error initializing log");

    info!("Starting application");
    yew::Renderer::<App>::new().render();
}

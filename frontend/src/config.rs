// Store and tracking settings. Values can be swapped at build time through the
// TOEFLEX_* environment variables so the same source deploys to staging.

pub const CURRENCY: &str = "EUR";
pub const MONEY_FORMAT: &str = "{{amount_with_comma_separator}} €";
pub const PRODUCT_CATEGORY: &str = "Toe Separator";

pub const BUY_BUTTON_SDK_URL: &str =
    "https://sdks.shopifycdn.com/buy-button/latest/buy-button-storefront.min.js";
pub const BUY_BUTTON_LOADER_ID: &str = "shopify-buy-button-sdk";

pub fn get_shop_domain() -> &'static str {
    option_env!("TOEFLEX_SHOP_DOMAIN").unwrap_or("toeflex-shop.myshopify.com")
}

pub fn get_storefront_token() -> &'static str {
    option_env!("TOEFLEX_STOREFRONT_TOKEN").unwrap_or("5f1c3c3a9e0b4c3f8d2a7b6e4c1d0a9f")
}

pub fn get_measurement_id() -> &'static str {
    option_env!("TOEFLEX_GA_ID").unwrap_or("G-TFX4R2L9QK")
}

#[cfg(debug_assertions)]
pub fn get_review_intake_delay_ms() -> u32 {
    300 // Keep the form snappy while developing
}

#[cfg(not(debug_assertions))]
pub fn get_review_intake_delay_ms() -> u32 {
    1500
}

// Page anchors shared by the navigation and the sticky call-to-action.
pub const PRICING_SECTION_ID: &str = "pricing";
pub const HEADER_SELECTOR: &str = ".top-nav";

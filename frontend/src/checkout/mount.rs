//! Mounts one Shopify Buy Button per checkout container.
//!
//! The SDK loader is shared by the whole page and keyed by a fixed element id;
//! each container gets its own inline init script that renders the product
//! component into it.

use std::cell::Cell;
use std::rc::Rc;

use gloo_timers::future::TimeoutFuture;
use log::{debug, warn};
use serde_json::{json, Value};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, HtmlScriptElement};
use yew::prelude::*;

use crate::catalog::{self, PackageKey};
use crate::config;
use crate::error::AppError;

const CONTAINER_PREFIX: &str = "product-component-";

pub fn container_id(key: PackageKey) -> String {
    format!("{}{}", CONTAINER_PREFIX, key.as_str())
}

pub fn package_for_container(id: &str) -> Option<PackageKey> {
    id.strip_prefix(CONTAINER_PREFIX)?.parse().ok()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    pub delay_ms: u32,
    pub max_attempts: u32,
}

impl RetryPolicy {
    /// Delay to wait before `attempt` (0-based), or `None` once attempts are used up.
    pub fn delay_before(&self, attempt: u32) -> Option<u32> {
        (attempt < self.max_attempts).then_some(self.delay_ms)
    }
}

pub const INJECTION_RETRY: RetryPolicy = RetryPolicy { delay_ms: 100, max_attempts: 10 };

/// The part of the document the loader check needs.
pub trait ScriptHost {
    fn has_element(&self, id: &str) -> bool;
    fn append_script(&self, id: &str, src: &str) -> Result<(), AppError>;
}

impl ScriptHost for Document {
    fn has_element(&self, id: &str) -> bool {
        self.get_element_by_id(id).is_some()
    }

    fn append_script(&self, id: &str, src: &str) -> Result<(), AppError> {
        let script = create_script(self)?;
        script.set_id(id);
        script.set_src(src);
        script.set_async(true);
        match self.head() {
            Some(head) => head.append_child(&script)?,
            None => self
                .body()
                .ok_or_else(|| AppError::MissingElement("body".to_string()))?
                .append_child(&script)?,
        };
        Ok(())
    }
}

/// Inserts the shared SDK loader unless an element with its id already exists.
/// Returns whether a script was inserted.
pub fn ensure_loader_script<H: ScriptHost + ?Sized>(host: &H) -> Result<bool, AppError> {
    if host.has_element(config::BUY_BUTTON_LOADER_ID) {
        return Ok(false);
    }
    host.append_script(config::BUY_BUTTON_LOADER_ID, config::BUY_BUTTON_SDK_URL)?;
    Ok(true)
}

fn js_string(value: &str) -> String {
    Value::from(value).to_string()
}

fn component_options() -> Value {
    json!({
        "product": {
            "iframe": false,
            "buttonDestination": "checkout",
            "contents": { "img": false, "title": false, "price": false },
            "text": { "button": "Buy now" },
            "styles": {
                "button": {
                    "font-family": "inherit",
                    "font-size": "17px",
                    "padding-top": "16px",
                    "padding-bottom": "16px",
                    "width": "100%",
                    "border-radius": "10px",
                    "background-color": "#2f7d5b",
                    ":hover": { "background-color": "#276a4d" },
                    ":focus": { "background-color": "#276a4d" }
                }
            }
        },
        "cart": {
            "popup": false,
            "text": { "total": "Subtotal", "button": "Checkout" }
        }
    })
}

/// Inline script that renders `product_id` into the element with `container_id`.
///
/// Uses the SDK right away when it is loaded, otherwise waits for the shared
/// loader and re-creates the loader if somebody removed it.
pub fn init_script(container_id: &str, product_id: &str) -> String {
    let client = json!({
        "domain": config::get_shop_domain(),
        "storefrontAccessToken": config::get_storefront_token(),
    });
    let component = json!({
        "id": product_id,
        "moneyFormat": config::MONEY_FORMAT,
        "options": component_options(),
    });
    format!(
        r#"(function () {{
  var loaderId = {loader_id};
  function init() {{
    var client = ShopifyBuy.buildClient({client});
    ShopifyBuy.UI.onReady(client).then(function (ui) {{
      var component = {component};
      component.node = document.getElementById({container_id});
      ui.createComponent('product', component);
    }});
  }}
  function loadScript() {{
    var script = document.createElement('script');
    script.id = loaderId;
    script.async = true;
    script.src = {sdk_url};
    (document.head || document.body).appendChild(script);
    script.onload = init;
  }}
  if (window.ShopifyBuy && window.ShopifyBuy.UI) {{
    init();
  }} else {{
    var loader = document.getElementById(loaderId);
    if (loader) {{
      loader.addEventListener('load', init);
    }} else {{
      loadScript();
    }}
  }}
}})();"#,
        loader_id = js_string(config::BUY_BUTTON_LOADER_ID),
        client = client,
        component = component,
        container_id = js_string(container_id),
        sdk_url = js_string(config::BUY_BUTTON_SDK_URL),
    )
}

fn create_script(document: &Document) -> Result<HtmlScriptElement, AppError> {
    document
        .create_element("script")?
        .dyn_into::<HtmlScriptElement>()
        .map_err(|_| AppError::Dom("created element is not a script".to_string()))
}

const INITIALISED_ATTR: &str = "data-buy-button-initialised";

/// A checkout container as seen by the mount step.
pub trait WidgetSlot {
    fn is_initialised(&self) -> bool;
    fn mark_initialised(&self) -> Result<(), AppError>;
    fn append_init_script(&self, source: &str) -> Result<(), AppError>;
    fn slot_id(&self) -> String;
}

impl WidgetSlot for Element {
    fn is_initialised(&self) -> bool {
        self.has_attribute(INITIALISED_ATTR)
    }

    fn mark_initialised(&self) -> Result<(), AppError> {
        self.set_attribute(INITIALISED_ATTR, "true")?;
        Ok(())
    }

    fn append_init_script(&self, source: &str) -> Result<(), AppError> {
        let document = self.owner_document().ok_or(AppError::NoDocument)?;
        let script = create_script(&document)?;
        script.set_type("text/javascript");
        script.set_text(source)?;
        self.append_child(&script)?;
        Ok(())
    }

    fn slot_id(&self) -> String {
        self.id()
    }
}

/// Appends the init script unless one was ever injected into `slot`.
///
/// The marker outlives script removal: an init script that already ran keeps
/// its pending SDK callbacks after its element is gone.
/// Returns whether a script was injected.
pub fn inject_once<S: WidgetSlot + ?Sized>(slot: &S, key: PackageKey) -> Result<bool, AppError> {
    if slot.is_initialised() {
        return Ok(false);
    }
    slot.append_init_script(&init_script(&slot.slot_id(), catalog::package(key).product_id))?;
    slot.mark_initialised()?;
    Ok(true)
}

pub fn mount_widget(container: &Element, key: PackageKey) -> Result<(), AppError> {
    let document = container.owner_document().ok_or(AppError::NoDocument)?;
    if ensure_loader_script(&document)? {
        debug!("Inserted Buy Button loader");
    }
    if inject_once(container, key)? {
        debug!("Injected Buy Button init script for {}", key);
    } else {
        debug!("Buy Button for {} already initialised", key);
    }
    Ok(())
}

pub fn remove_child_scripts(container: &Element) {
    let scripts = match container.query_selector_all(":scope > script") {
        Ok(scripts) => scripts,
        Err(e) => {
            warn!("Failed to query scripts in {}: {:?}", container.id(), e);
            return;
        }
    };
    for i in 0..scripts.length() {
        if let Some(script) = scripts.item(i) {
            let _ = container.remove_child(&script);
        }
    }
}

async fn inject_when_mounted(
    container: NodeRef,
    key: PackageKey,
    policy: RetryPolicy,
    cancelled: Rc<Cell<bool>>,
) {
    let mut attempt = 0;
    while let Some(delay) = policy.delay_before(attempt) {
        TimeoutFuture::new(delay).await;
        if cancelled.get() {
            return;
        }
        if let Some(element) = container.cast::<Element>().filter(|el| el.is_connected()) {
            if let Err(e) = mount_widget(&element, key) {
                warn!("Failed to mount Buy Button for {}: {}", key, e);
            }
            return;
        }
        attempt += 1;
    }
    warn!(
        "Checkout container for {} never mounted, gave up after {} attempts",
        key, policy.max_attempts
    );
}

/// Renders the Buy Button for `key` into `container` while `active` is true.
#[hook]
pub fn use_buy_button(container: NodeRef, key: PackageKey, active: bool) {
    use_effect_with_deps(
        move |&(active, key)| {
            let cancelled = Rc::new(Cell::new(false));
            if active {
                spawn_local(inject_when_mounted(
                    container.clone(),
                    key,
                    INJECTION_RETRY,
                    cancelled.clone(),
                ));
            }
            move || {
                cancelled.set(true);
                if let Some(element) = container.cast::<Element>() {
                    remove_child_scripts(&element);
                }
            }
        },
        (active, key),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashSet;

    #[derive(Default)]
    struct FakeHost {
        ids: RefCell<HashSet<String>>,
        inserted: Cell<u32>,
    }

    impl ScriptHost for FakeHost {
        fn has_element(&self, id: &str) -> bool {
            self.ids.borrow().contains(id)
        }

        fn append_script(&self, id: &str, _src: &str) -> Result<(), AppError> {
            self.ids.borrow_mut().insert(id.to_string());
            self.inserted.set(self.inserted.get() + 1);
            Ok(())
        }
    }

    #[test]
    fn loader_is_inserted_once_for_many_widgets() {
        let host = FakeHost::default();
        let inserted: Vec<bool> = PackageKey::ALL
            .iter()
            .map(|_| ensure_loader_script(&host).unwrap())
            .collect();
        assert_eq!(inserted, vec![true, false, false]);
        assert_eq!(host.inserted.get(), 1);
    }

    #[test]
    fn existing_loader_is_left_alone() {
        let host = FakeHost::default();
        host.ids.borrow_mut().insert(config::BUY_BUTTON_LOADER_ID.to_string());
        assert!(!ensure_loader_script(&host).unwrap());
        assert_eq!(host.inserted.get(), 0);
    }

    #[test]
    fn removed_loader_is_inserted_again() {
        let host = FakeHost::default();
        ensure_loader_script(&host).unwrap();
        host.ids.borrow_mut().clear();
        assert!(ensure_loader_script(&host).unwrap());
        assert_eq!(host.inserted.get(), 2);
    }

    struct FakeSlot {
        id: String,
        initialised: Cell<bool>,
        scripts: RefCell<Vec<String>>,
    }

    impl FakeSlot {
        fn new(key: PackageKey) -> Self {
            Self {
                id: container_id(key),
                initialised: Cell::new(false),
                scripts: RefCell::new(Vec::new()),
            }
        }

        // What the hook's cleanup does on close.
        fn remove_scripts(&self) {
            self.scripts.borrow_mut().clear();
        }
    }

    impl WidgetSlot for FakeSlot {
        fn is_initialised(&self) -> bool {
            self.initialised.get()
        }

        fn mark_initialised(&self) -> Result<(), AppError> {
            self.initialised.set(true);
            Ok(())
        }

        fn append_init_script(&self, source: &str) -> Result<(), AppError> {
            self.scripts.borrow_mut().push(source.to_string());
            Ok(())
        }

        fn slot_id(&self) -> String {
            self.id.clone()
        }
    }

    #[test]
    fn first_open_injects_scoped_init_script() {
        let slot = FakeSlot::new(PackageKey::Double);
        assert!(inject_once(&slot, PackageKey::Double).unwrap());
        let scripts = slot.scripts.borrow();
        assert_eq!(scripts.len(), 1);
        assert!(scripts[0].contains(r#"document.getElementById("product-component-double")"#));
        assert!(scripts[0].contains(catalog::package(PackageKey::Double).product_id));
    }

    #[test]
    fn reopening_before_render_does_not_inject_again() {
        let slot = FakeSlot::new(PackageKey::Basic);
        assert!(inject_once(&slot, PackageKey::Basic).unwrap());
        slot.remove_scripts();
        assert!(!inject_once(&slot, PackageKey::Basic).unwrap());
        assert!(slot.scripts.borrow().is_empty());

        slot.remove_scripts();
        assert!(!inject_once(&slot, PackageKey::Basic).unwrap());
        assert!(slot.scripts.borrow().is_empty());
    }

    #[test]
    fn each_container_is_initialised_independently() {
        let slots: Vec<_> = PackageKey::ALL.iter().map(|&key| (key, FakeSlot::new(key))).collect();
        for (key, slot) in &slots {
            assert!(inject_once(slot, *key).unwrap());
        }
        for (key, slot) in &slots {
            assert!(!inject_once(slot, *key).unwrap());
            assert_eq!(slot.scripts.borrow().len(), 1);
        }
    }

    #[test]
    fn container_ids_round_trip_to_packages() {
        for key in PackageKey::ALL {
            assert_eq!(package_for_container(&container_id(key)), Some(key));
        }
        assert_eq!(package_for_container("product-component-premium"), None);
        assert_eq!(package_for_container("pricing"), None);
    }

    #[test]
    fn retry_policy_is_bounded() {
        let policy = RetryPolicy { delay_ms: 100, max_attempts: 3 };
        assert_eq!(policy.delay_before(0), Some(100));
        assert_eq!(policy.delay_before(2), Some(100));
        assert_eq!(policy.delay_before(3), None);
    }

    #[test]
    fn init_script_targets_container_and_product() {
        let script = init_script("product-component-family", "8712045805847");
        assert!(script.contains(r#"document.getElementById("product-component-family")"#));
        assert!(script.contains(r#""id":"8712045805847""#));
        assert!(script.contains(r#"var loaderId = "shopify-buy-button-sdk";"#));
        assert!(script.contains(r#""iframe":false"#));
        assert!(script.contains(config::get_shop_domain()));
    }

    #[test]
    fn init_script_escapes_ids() {
        let script = init_script("odd\"id", "1");
        assert!(script.contains(r#"document.getElementById("odd\"id")"#));
    }
}

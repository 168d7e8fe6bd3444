use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::js_sys::Array;
use web_sys::{Document, Element, MouseEvent, MutationObserver, MutationObserverInit};
use yew::prelude::*;

use crate::analytics;
use crate::catalog::PackageKey;
use crate::checkout::mount::{container_id, package_for_container};
use crate::error::{self, AppError};

pub const BUY_BUTTON_SELECTOR: &str = ".shopify-buy__btn";
const TRACKED_ATTR: &str = "data-checkout-tracked";

/// First id in `ids` (innermost first) that names a checkout container, else basic.
pub fn resolve_package<I, S>(ids: I) -> PackageKey
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    ids.into_iter()
        .find_map(|id| package_for_container(id.as_ref()))
        .unwrap_or(PackageKey::Basic)
}

pub fn package_for_element(element: &Element) -> PackageKey {
    let ids = std::iter::successors(Some(element.clone()), |el| el.parent_element()).map(|el| el.id());
    resolve_package(ids)
}

/// Runs a callback once for every element under `root` matching `selector`,
/// including ones that show up later. Disconnects when dropped.
pub struct ElementWatcher {
    observer: MutationObserver,
    _callback: Closure<dyn FnMut(Array, MutationObserver)>,
}

impl ElementWatcher {
    pub fn watch<F>(root: &Element, selector: &'static str, mut on_found: F) -> Result<Self, AppError>
    where
        F: FnMut(Element) + 'static,
    {
        let scan_root = root.clone();
        let mut scan = move || {
            if let Err(e) = scan_unmarked(&scan_root, selector, &mut on_found) {
                warn!("Scanning {} for {} failed: {}", scan_root.id(), selector, e);
            }
        };
        scan();

        let callback = Closure::wrap(Box::new(move |_records: Array, _observer: MutationObserver| {
            scan();
        }) as Box<dyn FnMut(Array, MutationObserver)>);

        let observer = MutationObserver::new(callback.as_ref().unchecked_ref())?;
        let options = MutationObserverInit::new();
        options.set_child_list(true);
        options.set_subtree(true);
        observer.observe_with_options(root, &options)?;

        Ok(Self { observer, _callback: callback })
    }
}

impl Drop for ElementWatcher {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

/// Something a watcher can tag as already handled.
pub trait Trackable {
    fn is_tracked(&self) -> bool;
    fn mark_tracked(&self) -> Result<(), AppError>;
}

impl Trackable for Element {
    fn is_tracked(&self) -> bool {
        self.has_attribute(TRACKED_ATTR)
    }

    fn mark_tracked(&self) -> Result<(), AppError> {
        self.set_attribute(TRACKED_ATTR, "true")?;
        Ok(())
    }
}

/// Subtree a watcher scans for matching elements.
pub trait ScanRoot {
    type Found: Trackable;
    fn query_all(&self, selector: &str) -> Result<Vec<Self::Found>, AppError>;
}

impl ScanRoot for Element {
    type Found = Element;

    fn query_all(&self, selector: &str) -> Result<Vec<Element>, AppError> {
        let matches = self.query_selector_all(selector)?;
        Ok((0..matches.length())
            .filter_map(|i| matches.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect())
    }
}

fn scan_unmarked<R, F>(root: &R, selector: &str, on_found: &mut F) -> Result<(), AppError>
where
    R: ScanRoot + ?Sized,
    F: FnMut(R::Found),
{
    for element in root.query_all(selector)? {
        if element.is_tracked() {
            continue;
        }
        element.mark_tracked()?;
        on_found(element);
    }
    Ok(())
}

struct ClickListener {
    target: Element,
    callback: Closure<dyn FnMut(MouseEvent)>,
}

impl Drop for ClickListener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback("click", self.callback.as_ref().unchecked_ref());
    }
}

/// Reports `begin_checkout` whenever a rendered Buy Button is clicked.
pub struct CheckoutClickTracker {
    // Declared first so observers stop before their listeners go away.
    _watchers: Vec<ElementWatcher>,
    _listeners: Rc<RefCell<Vec<ClickListener>>>,
}

impl CheckoutClickTracker {
    pub fn attach(document: &Document) -> Self {
        let listeners = Rc::new(RefCell::new(Vec::new()));
        let mut watchers = Vec::new();
        for key in PackageKey::ALL {
            let id = container_id(key);
            let Some(container) = document.get_element_by_id(&id) else {
                warn!("Checkout container {} missing, clicks there won't be tracked", id);
                continue;
            };
            let listeners = listeners.clone();
            match ElementWatcher::watch(&container, BUY_BUTTON_SELECTOR, move |button| {
                instrument(button, &listeners)
            }) {
                Ok(watcher) => watchers.push(watcher),
                Err(e) => warn!("Failed to watch {}: {}", id, e),
            }
        }
        Self { _watchers: watchers, _listeners: listeners }
    }
}

fn instrument(button: Element, listeners: &Rc<RefCell<Vec<ClickListener>>>) {
    let clicked = button.clone();
    let callback = Closure::wrap(Box::new(move |_e: MouseEvent| {
        let key = package_for_element(&clicked);
        gloo_console::log!("Checkout started for", key.as_str());
        analytics::track_checkout_initiated(key, "buy_button");
    }) as Box<dyn FnMut(MouseEvent)>);

    if let Err(e) = button.add_event_listener_with_callback("click", callback.as_ref().unchecked_ref()) {
        warn!("Failed to attach checkout click listener: {:?}", e);
        return;
    }
    debug!("Instrumented Buy Button in {}", package_for_element(&button));
    listeners.borrow_mut().push(ClickListener { target: button, callback });
}

/// Keeps a [`CheckoutClickTracker`] alive for the lifetime of the calling component.
#[hook]
pub fn use_checkout_click_tracking() {
    use_effect_with_deps(
        |_| {
            let tracker = match error::document() {
                Ok(document) => Some(CheckoutClickTracker::attach(&document)),
                Err(e) => {
                    warn!("Checkout click tracking disabled: {}", e);
                    None
                }
            };
            move || drop(tracker)
        },
        (),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn nearest_container_decides_package() {
        let ids = ["", "shopify-buy-component", "product-component-family", "pricing", "app"];
        assert_eq!(resolve_package(ids), PackageKey::Family);
    }

    #[test]
    fn innermost_container_wins() {
        let ids = ["product-component-double", "product-component-family"];
        assert_eq!(resolve_package(ids), PackageKey::Double);
    }

    #[test]
    fn unmatched_click_defaults_to_basic() {
        assert_eq!(resolve_package(["", "sticky-cta", "app"]), PackageKey::Basic);
        assert_eq!(resolve_package(Vec::<String>::new()), PackageKey::Basic);
    }

    #[test]
    fn unknown_package_suffix_is_ignored() {
        let ids = vec!["product-component-premium".to_string(), "product-component-basic".to_string()];
        assert_eq!(resolve_package(ids), PackageKey::Basic);
        let ids = vec!["product-component-premium".to_string()];
        assert_eq!(resolve_package(ids), PackageKey::Basic);
    }

    #[derive(Clone)]
    struct FakeButton {
        name: &'static str,
        tracked: Rc<Cell<bool>>,
    }

    impl Trackable for FakeButton {
        fn is_tracked(&self) -> bool {
            self.tracked.get()
        }

        fn mark_tracked(&self) -> Result<(), AppError> {
            self.tracked.set(true);
            Ok(())
        }
    }

    #[derive(Default)]
    struct FakeContainer {
        buttons: RefCell<Vec<FakeButton>>,
    }

    impl FakeContainer {
        fn render(&self, name: &'static str) {
            self.buttons.borrow_mut().push(FakeButton { name, tracked: Rc::new(Cell::new(false)) });
        }
    }

    impl ScanRoot for FakeContainer {
        type Found = FakeButton;

        fn query_all(&self, _selector: &str) -> Result<Vec<FakeButton>, AppError> {
            Ok(self.buttons.borrow().clone())
        }
    }

    #[test]
    fn rescans_report_each_button_once() {
        let container = FakeContainer::default();
        container.render("buy");
        let mut found = Vec::new();
        let mut record = |button: FakeButton| found.push(button.name);

        scan_unmarked(&container, BUY_BUTTON_SELECTOR, &mut record).unwrap();
        scan_unmarked(&container, BUY_BUTTON_SELECTOR, &mut record).unwrap();
        container.render("buy-again");
        scan_unmarked(&container, BUY_BUTTON_SELECTOR, &mut record).unwrap();
        scan_unmarked(&container, BUY_BUTTON_SELECTOR, &mut record).unwrap();

        assert_eq!(found, vec!["buy", "buy-again"]);
        assert!(container.buttons.borrow().iter().all(|b| b.is_tracked()));
    }

    #[test]
    fn already_marked_buttons_are_skipped() {
        let container = FakeContainer::default();
        container.render("earlier");
        container.buttons.borrow()[0].tracked.set(true);
        let mut calls = 0;
        scan_unmarked(&container, BUY_BUTTON_SELECTOR, &mut |_: FakeButton| calls += 1).unwrap();
        assert_eq!(calls, 0);
    }
}

//! Best-effort reporting to the page tag (`gtag`) and the pixel (`fbq`).
//!
//! Both globals are installed by `index.html` and may be missing entirely
//! (ad blockers, consent not given). Every call feature-tests the global first
//! and silently skips a channel that isn't there. Nothing is queued or retried.

use std::collections::BTreeMap;

use log::{debug, warn};
use serde::Serialize;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::{Function, Reflect};

use crate::catalog::{self, PackageKey};
use crate::config;

pub const CHECKOUT_INITIATED: &str = "begin_checkout";

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    Text(String),
    Number(f64),
    Flag(bool),
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Text(value)
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Number(value)
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        ParamValue::Number(value as f64)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Flag(value)
    }
}

pub type EventParams = BTreeMap<String, ParamValue>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Channel {
    PageTag,
    Pixel,
}

impl Channel {
    pub fn global_name(self) -> &'static str {
        match self {
            Channel::PageTag => "gtag",
            Channel::Pixel => "fbq",
        }
    }
}

/// One call to a reporter: `global(command, target, params)`.
#[derive(Clone, Debug, PartialEq)]
pub struct Beacon {
    pub channel: Channel,
    pub command: &'static str,
    pub target: String,
    pub params: EventParams,
}

pub fn page_view_beacons(path: &str, url: &str, title: &str, measurement_id: &str) -> [Beacon; 2] {
    let mut page = EventParams::new();
    page.insert("page_path".into(), path.into());
    page.insert("page_location".into(), url.into());
    page.insert("page_title".into(), title.into());
    [
        Beacon {
            channel: Channel::PageTag,
            command: "config",
            target: measurement_id.to_string(),
            params: page,
        },
        Beacon {
            channel: Channel::Pixel,
            command: "track",
            target: "PageView".to_string(),
            params: EventParams::new(),
        },
    ]
}

/// Maps an event name to the pixel command and event it should be sent as.
pub fn pixel_command(name: &str) -> (&'static str, String) {
    match name {
        CHECKOUT_INITIATED => ("track", "InitiateCheckout".to_string()),
        "view_item" => ("track", "ViewContent".to_string()),
        "generate_lead" => ("track", "Lead".to_string()),
        other => ("trackCustom", other.to_string()),
    }
}

pub fn event_beacons(name: &str, params: &EventParams) -> [Beacon; 2] {
    let (command, target) = pixel_command(name);
    [
        Beacon {
            channel: Channel::PageTag,
            command: "event",
            target: name.to_string(),
            params: params.clone(),
        },
        Beacon {
            channel: Channel::Pixel,
            command,
            target,
            params: params.clone(),
        },
    ]
}

pub fn checkout_initiated_params(key: PackageKey, source: Option<&str>) -> EventParams {
    let package = catalog::package(key);
    let mut params = EventParams::new();
    params.insert("package".into(), key.as_str().into());
    params.insert("package_name".into(), package.name.into());
    params.insert("content_category".into(), config::PRODUCT_CATEGORY.into());
    params.insert("value".into(), package.total_price.into());
    params.insert("currency".into(), config::CURRENCY.into());
    params.insert("num_items".into(), package.quantity.into());
    if let Some(source) = source {
        params.insert("source".into(), source.into());
    }
    params
}

/// Where beacons go. The browser implementation looks up the globals on `window`.
pub trait Sink {
    fn is_available(&self, channel: Channel) -> bool;
    fn send(&self, beacon: &Beacon);
}

pub struct Tracker<S: Sink> {
    sink: S,
}

impl<S: Sink> Tracker<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    pub fn page_view(&self, path: &str, url: &str, title: &str) {
        self.dispatch(&page_view_beacons(path, url, title, config::get_measurement_id()));
    }

    pub fn event(&self, name: &str, params: &EventParams) {
        self.dispatch(&event_beacons(name, params));
    }

    fn dispatch(&self, beacons: &[Beacon]) {
        for beacon in beacons {
            if self.sink.is_available(beacon.channel) {
                self.sink.send(beacon);
            } else {
                debug!("{} not loaded, skipping {}", beacon.channel.global_name(), beacon.target);
            }
        }
    }
}

pub struct WindowSink;

impl WindowSink {
    fn reporter(channel: Channel) -> Option<Function> {
        let window = web_sys::window()?;
        Reflect::get(&window, &JsValue::from_str(channel.global_name()))
            .ok()?
            .dyn_into::<Function>()
            .ok()
    }
}

impl Sink for WindowSink {
    fn is_available(&self, channel: Channel) -> bool {
        Self::reporter(channel).is_some()
    }

    fn send(&self, beacon: &Beacon) {
        let Some(reporter) = Self::reporter(beacon.channel) else {
            return;
        };
        let params = match beacon
            .params
            .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        {
            Ok(params) => params,
            Err(e) => {
                warn!("Failed to serialize {} params: {}", beacon.target, e);
                return;
            }
        };
        if let Err(e) = reporter.call3(
            &JsValue::NULL,
            &JsValue::from_str(beacon.command),
            &JsValue::from_str(&beacon.target),
            &params,
        ) {
            warn!("{} threw while reporting {}: {:?}", beacon.channel.global_name(), beacon.target, e);
        }
    }
}

pub fn tracker() -> Tracker<WindowSink> {
    Tracker::new(WindowSink)
}

pub fn track_page_view(path: &str, url: &str, title: &str) {
    tracker().page_view(path, url, title);
}

pub fn track_event(name: &str, params: &EventParams) {
    tracker().event(name, params);
}

pub fn track_checkout_initiated(key: PackageKey, source: &str) {
    track_event(CHECKOUT_INITIATED, &checkout_initiated_params(key, Some(source)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct RecordingSink {
        page_tag: bool,
        pixel: bool,
        sent: RefCell<Vec<Beacon>>,
    }

    impl RecordingSink {
        fn new(page_tag: bool, pixel: bool) -> Self {
            Self { page_tag, pixel, sent: RefCell::new(Vec::new()) }
        }
    }

    impl Sink for &RecordingSink {
        fn is_available(&self, channel: Channel) -> bool {
            match channel {
                Channel::PageTag => self.page_tag,
                Channel::Pixel => self.pixel,
            }
        }

        fn send(&self, beacon: &Beacon) {
            self.sent.borrow_mut().push(beacon.clone());
        }
    }

    #[test]
    fn nothing_is_sent_without_reporters() {
        let sink = RecordingSink::new(false, false);
        let tracker = Tracker::new(&sink);
        tracker.page_view("/", "https://toeflex.de/", "Toeflex");
        tracker.event(CHECKOUT_INITIATED, &checkout_initiated_params(PackageKey::Basic, None));
        assert!(sink.sent.borrow().is_empty());
    }

    #[test]
    fn missing_channel_is_skipped_independently() {
        let sink = RecordingSink::new(false, true);
        Tracker::new(&sink).event("faq_opened", &EventParams::new());
        let sent = sink.sent.borrow();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].channel, Channel::Pixel);
        assert_eq!(sent[0].command, "trackCustom");
        assert_eq!(sent[0].target, "faq_opened");
    }

    #[test]
    fn page_view_reaches_both_reporters() {
        let sink = RecordingSink::new(true, true);
        Tracker::new(&sink).page_view("/terms", "https://toeflex.de/terms", "Terms");
        let sent = sink.sent.borrow();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].command, "config");
        assert_eq!(sent[0].target, config::get_measurement_id());
        assert_eq!(sent[0].params.get("page_path"), Some(&ParamValue::from("/terms")));
        assert_eq!(sent[0].params.get("page_title"), Some(&ParamValue::from("Terms")));
        assert_eq!(sent[1].target, "PageView");
    }

    #[test]
    fn double_checkout_reports_package_totals() {
        let params = checkout_initiated_params(PackageKey::Double, None);
        assert_eq!(params.get("value"), Some(&ParamValue::Number(28.64)));
        assert_eq!(params.get("currency"), Some(&ParamValue::from("EUR")));
        assert_eq!(params.get("num_items"), Some(&ParamValue::Number(2.0)));
        assert_eq!(params.get("package"), Some(&ParamValue::from("double")));
        assert!(!params.contains_key("source"));
    }

    #[test]
    fn checkout_maps_to_standard_pixel_event() {
        let params = checkout_initiated_params(PackageKey::Family, Some("sticky_cta"));
        let [tag, pixel] = event_beacons(CHECKOUT_INITIATED, &params);
        assert_eq!((tag.command, tag.target.as_str()), ("event", "begin_checkout"));
        assert_eq!((pixel.command, pixel.target.as_str()), ("track", "InitiateCheckout"));
        assert_eq!(pixel.params.get("source"), Some(&ParamValue::from("sticky_cta")));
    }

    #[test]
    fn params_serialize_flat() {
        let params = checkout_initiated_params(PackageKey::Basic, None);
        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json["value"], serde_json::json!(17.9));
        assert_eq!(json["num_items"], serde_json::json!(1.0));
        assert_eq!(json["content_category"], "Toe Separator");
    }
}

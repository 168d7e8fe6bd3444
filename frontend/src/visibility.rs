//! Decides when the sticky call-to-action bar is shown.
//!
//! Two latches can reveal the bar: time on page and scroll depth. Both are
//! monotonic for the session. Two conditions suppress it while they hold: an
//! open checkout dialog and the pricing section being on screen.

pub const TIME_TRIGGER_MS: u32 = 20_000;
pub const SCROLL_TRIGGER_PERCENT: f64 = 50.0;
pub const SCROLL_PADDING_PX: f64 = 20.0;

/// Vertical scroll position as a percentage of the scrollable height.
///
/// Returns 0 when the document is not taller than the viewport.
pub fn scroll_percentage(scroll_y: f64, document_height: f64, viewport_height: f64) -> f64 {
    let scrollable = document_height - viewport_height;
    if scrollable <= 0.0 {
        return 0.0;
    }
    scroll_y / scrollable * 100.0
}

/// True if a box spanning `top..bottom` (viewport coordinates) overlaps the viewport vertically.
pub fn intersects_viewport(top: f64, bottom: f64, viewport_height: f64) -> bool {
    top < viewport_height && bottom > 0.0
}

/// Document offset to scroll to so `section_top` lands just below a fixed header.
pub fn scroll_target(section_top: f64, scroll_y: f64, header_height: f64) -> f64 {
    (section_top + scroll_y - header_height - SCROLL_PADDING_PX).max(0.0)
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct VisibilityState {
    time_latched: bool,
    scroll_latched: bool,
    checkout_open: bool,
    pricing_in_view: bool,
    shown: bool,
}

impl VisibilityState {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn time_latched(&self) -> bool {
        self.time_latched
    }

    #[cfg(test)]
    pub fn scroll_latched(&self) -> bool {
        self.scroll_latched
    }

    pub fn is_visible(&self) -> bool {
        self.shown && !self.checkout_open && !self.pricing_in_view
    }

    pub fn on_time_elapsed(&mut self) {
        self.time_latched = true;
        if !self.checkout_open {
            self.shown = true;
        }
    }

    pub fn on_scroll(&mut self, percent: f64, pricing_in_view: bool) {
        self.pricing_in_view = pricing_in_view;
        self.latch_scroll(percent);
        if self.scroll_latched && !self.checkout_open {
            self.shown = true;
        }
    }

    pub fn on_checkout_opened(&mut self) {
        self.checkout_open = true;
        self.shown = false;
    }

    /// Only the scroll latch brings the bar back after a checkout closes.
    pub fn on_checkout_closed(&mut self, percent: f64) {
        self.checkout_open = false;
        self.latch_scroll(percent);
        self.shown = self.scroll_latched;
    }

    fn latch_scroll(&mut self, percent: f64) {
        if percent >= SCROLL_TRIGGER_PERCENT {
            self.scroll_latched = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_follows_formula() {
        assert_eq!(scroll_percentage(500.0, 3000.0, 1000.0), 25.0);
        assert_eq!(scroll_percentage(1000.0, 3000.0, 1000.0), 50.0);
        assert_eq!(scroll_percentage(2000.0, 3000.0, 1000.0), 100.0);
    }

    #[test]
    fn short_pages_count_as_unscrolled() {
        assert_eq!(scroll_percentage(0.0, 800.0, 1000.0), 0.0);
        assert_eq!(scroll_percentage(0.0, 1000.0, 1000.0), 0.0);
    }

    #[test]
    fn becomes_visible_once_half_scrolled() {
        let mut state = VisibilityState::new();
        let (page, viewport) = (5000.0, 1000.0);
        for y in (0..=4000).step_by(250) {
            let percent = scroll_percentage(y as f64, page, viewport);
            state.on_scroll(percent, false);
            assert_eq!(state.is_visible(), percent >= 50.0, "at y={}", y);
        }
    }

    #[test]
    fn scroll_latch_survives_scrolling_back_up() {
        let mut state = VisibilityState::new();
        state.on_scroll(60.0, false);
        state.on_scroll(5.0, false);
        assert!(state.scroll_latched());
        assert!(state.is_visible());
    }

    #[test]
    fn time_latch_reveals_and_stays() {
        let mut state = VisibilityState::new();
        assert!(!state.is_visible());
        state.on_time_elapsed();
        assert!(state.time_latched());
        assert!(state.is_visible());
        state.on_scroll(0.0, false);
        assert!(state.time_latched());
        assert!(state.is_visible());
    }

    #[test]
    fn opening_checkout_hides_immediately() {
        let mut state = VisibilityState::new();
        state.on_time_elapsed();
        state.on_scroll(80.0, false);
        state.on_checkout_opened();
        assert!(!state.is_visible());
        state.on_scroll(90.0, false);
        assert!(!state.is_visible());
    }

    #[test]
    fn closing_checkout_restores_only_with_scroll_latch() {
        let mut timed = VisibilityState::new();
        timed.on_time_elapsed();
        timed.on_checkout_opened();
        timed.on_checkout_closed(10.0);
        assert!(!timed.is_visible());

        let mut scrolled = VisibilityState::new();
        scrolled.on_scroll(55.0, false);
        scrolled.on_checkout_opened();
        scrolled.on_checkout_closed(30.0);
        assert!(scrolled.is_visible());
    }

    #[test]
    fn close_re_evaluates_scroll_depth() {
        let mut state = VisibilityState::new();
        state.on_checkout_opened();
        state.on_checkout_closed(70.0);
        assert!(state.scroll_latched());
        assert!(state.is_visible());
    }

    #[test]
    fn cycling_checkout_early_keeps_bar_hidden() {
        let mut state = VisibilityState::new();
        for _ in 0..3 {
            state.on_checkout_opened();
            state.on_checkout_closed(20.0);
            assert!(!state.is_visible());
        }
    }

    #[test]
    fn timer_during_open_checkout_does_not_reveal() {
        let mut state = VisibilityState::new();
        state.on_checkout_opened();
        state.on_time_elapsed();
        assert!(!state.is_visible());
        state.on_checkout_closed(0.0);
        assert!(!state.is_visible());
    }

    #[test]
    fn pricing_in_view_suppresses_live() {
        let mut state = VisibilityState::new();
        state.on_scroll(60.0, true);
        assert!(!state.is_visible());
        state.on_scroll(70.0, false);
        assert!(state.is_visible());
    }

    #[test]
    fn viewport_intersection() {
        assert!(intersects_viewport(100.0, 900.0, 800.0));
        assert!(intersects_viewport(-200.0, 10.0, 800.0));
        assert!(!intersects_viewport(800.0, 1600.0, 800.0));
        assert!(!intersects_viewport(-600.0, 0.0, 800.0));
    }

    #[test]
    fn scroll_target_accounts_for_header_and_padding() {
        assert_eq!(scroll_target(400.0, 1000.0, 80.0), 1300.0);
        assert_eq!(scroll_target(10.0, 0.0, 80.0), 0.0);
    }
}

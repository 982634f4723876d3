//! Dual-pane scroll synchronization.
//!
//! Maps the scroll fraction of one pane onto another so two rendered
//! documents stay aligned. Either pane may act as the source for a given
//! scroll event; the mapping is direction-symmetric.

use std::cell::Cell;

/// Scroll geometry of one pane, in the units the rendering layer uses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaneGeometry {
    /// Current scroll offset from the top.
    pub scroll_top: f64,
    /// Total content height.
    pub scroll_height: f64,
    /// Visible viewport height.
    pub client_height: f64,
}

impl PaneGeometry {
    pub fn new(scroll_top: f64, scroll_height: f64, client_height: f64) -> Self {
        Self {
            scroll_top,
            scroll_height,
            client_height,
        }
    }

    /// Scrollable span: content height minus viewport height.
    fn span(&self) -> f64 {
        self.scroll_height - self.client_height
    }
}

/// Map the source pane's scroll fraction onto the target pane.
///
/// `fraction = scroll_top / (scroll_height - client_height)` applied to the
/// target's span. Returns `None` when either span is not positive (content
/// shorter than its viewport) so the caller leaves the target untouched.
pub fn target_scroll_top(source: PaneGeometry, target: PaneGeometry) -> Option<f64> {
    let source_span = source.span();
    let target_span = target.span();
    if source_span <= 0.0 || target_span <= 0.0 {
        return None;
    }

    let fraction = source.scroll_top / source_span;
    Some(fraction * target_span)
}

/// Scroll a pane to a content fraction directly, e.g. when jumping to a
/// companion match rather than mirroring a user scroll.
pub fn scroll_top_for_fraction(fraction: f64, target: PaneGeometry) -> Option<f64> {
    let span = target.span();
    if span <= 0.0 {
        return None;
    }
    Some(fraction.clamp(0.0, 1.0) * span)
}

/// Feedback-loop guard for two panes that both listen for scroll events.
///
/// Setting the target's scroll position fires the target's own scroll
/// handler; without suppression the two handlers would ping-pong forever.
/// `on_scroll` refuses to compute while a programmatic sync is in flight;
/// the caller applies the returned offset and then calls `settled` once the
/// resulting event has been observed (or dropped).
///
/// Single-threaded by design: all scroll events arrive on the UI thread.
#[derive(Debug, Default)]
pub struct ScrollSync {
    syncing: Cell<bool>,
}

impl ScrollSync {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a scroll event on `source`, returning the offset to apply to
    /// `target`. Returns `None` for echo events (a sync is in flight) and
    /// for degenerate geometry.
    pub fn on_scroll(&self, source: PaneGeometry, target: PaneGeometry) -> Option<f64> {
        if self.syncing.get() {
            return None;
        }

        let offset = target_scroll_top(source, target)?;
        self.syncing.set(true);
        Some(offset)
    }

    /// Mark the in-flight sync as applied, re-enabling event handling.
    pub fn settled(&self) {
        self.syncing.set(false);
    }

    /// Whether a programmatic sync is currently in flight.
    pub fn is_syncing(&self) -> bool {
        self.syncing.get()
    }
}

//! Viewport intersection for page elements.

/// Fraction of an element's height inside the viewport.
pub fn intersection_ratio(top: f32, height: f32, scroll: f32, viewport_height: f32) -> f32 {
    if height <= 0.0 {
        return 0.0;
    }

    let visible_top = top.max(scroll);
    let visible_bottom = (top + height).min(scroll + viewport_height);

    ((visible_bottom - visible_top) / height).clamp(0.0, 1.0)
}

/// Boolean in-view signal with a visibility threshold.
///
/// Toggles for as long as the page lives; it does not latch after the
/// first intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InViewSignal {
    threshold: f32,
    in_view: bool,
}

impl InViewSignal {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
            in_view: false,
        }
    }

    /// Feeds the current intersection ratio. Returns the new value on an
    /// edge, `None` otherwise.
    pub fn update(&mut self, ratio: f32) -> Option<bool> {
        let in_view = ratio > 0.0 && ratio >= self.threshold;
        if in_view == self.in_view {
            return None;
        }
        self.in_view = in_view;
        Some(in_view)
    }

    pub fn in_view(&self) -> bool {
        self.in_view
    }
}

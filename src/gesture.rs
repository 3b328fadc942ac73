//! Gesture interpretation.
//! Converts pointer/touch swipes and keyboard input into discrete
//! navigation intents; everything here is pure and stateless apart from
//! the in-progress swipe tracker.

use crate::media::MediaKind;

/// A discrete navigation intent produced from raw input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavIntent {
    Next,
    Previous,
    /// Play/pause the current video; routed straight to the presenter,
    /// never through the navigation state.
    TogglePlayback,
}

/// Interpret a completed vertical swipe. Swiping up (start below end)
/// advances, swiping down retreats; short drags produce nothing.
pub fn swipe_intent(start_y: f32, end_y: f32, min_distance: f32) -> Option<NavIntent> {
    let delta = start_y - end_y;
    if delta.abs() < min_distance {
        return None;
    }
    if delta > 0.0 {
        Some(NavIntent::Next)
    } else {
        Some(NavIntent::Previous)
    }
}

/// Interpret a key press against the current item's kind.
pub fn key_intent(key: egui::Key, current_kind: Option<MediaKind>) -> Option<NavIntent> {
    match key {
        egui::Key::ArrowUp => Some(NavIntent::Previous),
        egui::Key::ArrowDown => Some(NavIntent::Next),
        egui::Key::Space if current_kind == Some(MediaKind::Video) => {
            Some(NavIntent::TogglePlayback)
        }
        _ => None,
    }
}

/// Tracks an in-progress press/drag; consumed on release to produce an
/// intent or nothing.
#[derive(Debug, Default)]
pub struct SwipeTracker {
    start_y: Option<f32>,
}

impl SwipeTracker {
    pub fn press(&mut self, y: f32) {
        self.start_y = Some(y);
    }

    pub fn release(&mut self, y: f32, min_distance: f32) -> Option<NavIntent> {
        let start_y = self.start_y.take()?;
        swipe_intent(start_y, y, min_distance)
    }

    pub fn cancel(&mut self) {
        self.start_y = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const THRESHOLD: f32 = 50.0;

    #[test]
    fn short_swipes_produce_no_intent() {
        for (start, end) in [(0.0, 0.0), (100.0, 60.0), (60.0, 100.0), (10.0, 59.9)] {
            assert_eq!(swipe_intent(start, end, THRESHOLD), None, "{start}->{end}");
        }
    }

    #[test]
    fn swipe_up_is_next_swipe_down_is_previous() {
        assert_eq!(swipe_intent(400.0, 100.0, THRESHOLD), Some(NavIntent::Next));
        assert_eq!(
            swipe_intent(100.0, 400.0, THRESHOLD),
            Some(NavIntent::Previous)
        );
    }

    #[test]
    fn exact_threshold_counts_as_a_swipe() {
        assert_eq!(swipe_intent(50.0, 0.0, THRESHOLD), Some(NavIntent::Next));
    }

    #[test]
    fn arrow_keys_navigate() {
        assert_eq!(
            key_intent(egui::Key::ArrowUp, Some(MediaKind::Image)),
            Some(NavIntent::Previous)
        );
        assert_eq!(
            key_intent(egui::Key::ArrowDown, None),
            Some(NavIntent::Next)
        );
    }

    #[test]
    fn space_toggles_playback_only_on_video() {
        assert_eq!(
            key_intent(egui::Key::Space, Some(MediaKind::Video)),
            Some(NavIntent::TogglePlayback)
        );
        assert_eq!(key_intent(egui::Key::Space, Some(MediaKind::Image)), None);
        assert_eq!(key_intent(egui::Key::Space, None), None);
    }

    #[test]
    fn other_keys_are_ignored() {
        assert_eq!(key_intent(egui::Key::ArrowLeft, Some(MediaKind::Video)), None);
        assert_eq!(key_intent(egui::Key::Enter, Some(MediaKind::Image)), None);
    }

    #[test]
    fn tracker_consumes_press_on_release() {
        let mut tracker = SwipeTracker::default();
        tracker.press(300.0);
        assert_eq!(tracker.release(100.0, THRESHOLD), Some(NavIntent::Next));
        // Consumed: a second release without a press does nothing.
        assert_eq!(tracker.release(100.0, THRESHOLD), None);
    }

    #[test]
    fn cancel_discards_the_pending_press() {
        let mut tracker = SwipeTracker::default();
        tracker.press(300.0);
        tracker.cancel();
        assert_eq!(tracker.release(0.0, THRESHOLD), None);
    }
}

//! Keyboard-driven carousel navigation.
//!
//! Thin adapter from key presses to slider/fullscreen actions.  The caller
//! owns the actual event source and passes `is_typing` so key presses inside
//! text inputs never steal navigation.
//!
//! ## Key bindings
//!
//! | Key       | Closed                              | Fullscreen open |
//! |-----------|-------------------------------------|-----------------|
//! | `←`       | Previous slide (wraps)              | —               |
//! | `→`       | Next slide (wraps)                  | —               |
//! | `Enter`   | Open fullscreen at current slide    | Exit            |
//! | `Escape`  | —                                   | Exit            |
//!
//! Arrow navigation brackets the move with interaction start/end so autoplay
//! pauses and resumes with the same debounce as pointer input, and is a
//! no-op with fewer than two slides.

use std::time::Instant;

use crate::fullscreen::FullscreenController;
use crate::slider::SliderStateMachine;

/// The navigation keys the carousel reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    ArrowLeft,
    ArrowRight,
    Enter,
    Escape,
}

/// Apply a key press to the carousel.  Returns whether the key was
/// consumed, so callers can decide whether to let it propagate.
pub fn handle(
    key: NavKey,
    is_typing: bool,
    now: Instant,
    slider: &mut SliderStateMachine,
    fullscreen: &mut FullscreenController,
) -> bool {
    if is_typing {
        return false;
    }

    if fullscreen.is_open() {
        return match key {
            NavKey::Enter | NavKey::Escape => {
                fullscreen.exit(None, now, slider);
                true
            }
            _ => false,
        };
    }

    match key {
        NavKey::Enter => {
            fullscreen.open_at(slider.current_index(), now, slider);
            true
        }
        NavKey::ArrowLeft | NavKey::ArrowRight if slider.total_slides() > 1 => {
            let total = slider.total_slides();
            let current = slider.current_index();
            let target = match key {
                NavKey::ArrowLeft => (current + total - 1) % total,
                _ => (current + 1) % total,
            };

            slider.start_interaction(now);
            slider.navigate_to(target, now);
            slider.end_interaction(now);
            true
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SliderConfig;

    fn fixture(total: usize) -> (Instant, SliderStateMachine, FullscreenController) {
        let now = Instant::now();
        (
            now,
            SliderStateMachine::new(SliderConfig::default(), total, now),
            FullscreenController::new(),
        )
    }

    #[test]
    fn arrows_navigate_with_wraparound() {
        let (t0, mut slider, mut fullscreen) = fixture(3);

        assert!(handle(NavKey::ArrowLeft, false, t0, &mut slider, &mut fullscreen));
        let delay = slider.config().transition_delay;
        let duration = slider.config().transition_duration;
        slider.poll(t0 + delay + duration);
        assert_eq!(slider.current_index(), 2);

        let t1 = t0 + delay + duration;
        assert!(handle(NavKey::ArrowRight, false, t1, &mut slider, &mut fullscreen));
        slider.poll(t1 + delay + duration);
        assert_eq!(slider.current_index(), 0);
    }

    #[test]
    fn arrows_are_noops_with_a_single_slide() {
        let (t0, mut slider, mut fullscreen) = fixture(1);

        assert!(!handle(NavKey::ArrowRight, false, t0, &mut slider, &mut fullscreen));
        assert!(!slider.is_transitioning());
        assert_eq!(slider.current_index(), 0);
    }

    #[test]
    fn typing_suppresses_everything() {
        let (t0, mut slider, mut fullscreen) = fixture(5);

        assert!(!handle(NavKey::ArrowRight, true, t0, &mut slider, &mut fullscreen));
        assert!(!handle(NavKey::Enter, true, t0, &mut slider, &mut fullscreen));
        assert!(!slider.is_transitioning());
        assert!(!fullscreen.is_open());
    }

    #[test]
    fn enter_toggles_fullscreen() {
        let (t0, mut slider, mut fullscreen) = fixture(5);

        assert!(handle(NavKey::Enter, false, t0, &mut slider, &mut fullscreen));
        assert_eq!(fullscreen.open_index(), Some(0));

        assert!(handle(NavKey::Enter, false, t0, &mut slider, &mut fullscreen));
        assert!(!fullscreen.is_open());
    }

    #[test]
    fn escape_exits_fullscreen_only() {
        let (t0, mut slider, mut fullscreen) = fixture(5);

        assert!(!handle(NavKey::Escape, false, t0, &mut slider, &mut fullscreen));

        assert!(handle(NavKey::Enter, false, t0, &mut slider, &mut fullscreen));
        assert!(handle(NavKey::Escape, false, t0, &mut slider, &mut fullscreen));
        assert!(!fullscreen.is_open());
    }

    #[test]
    fn arrows_do_nothing_while_fullscreen_is_open() {
        let (t0, mut slider, mut fullscreen) = fixture(5);

        assert!(handle(NavKey::Enter, false, t0, &mut slider, &mut fullscreen));
        assert!(!handle(NavKey::ArrowRight, false, t0, &mut slider, &mut fullscreen));
        assert!(!slider.is_transitioning());
    }
}

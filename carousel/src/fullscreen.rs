//! Fullscreen overlay controller.
//!
//! Owns the open/closed state independently of the slider, but reads the
//! slider's drag state and cooldowns to reject opens that are really the
//! tail end of a gesture.

use std::time::Instant;

use log::trace;

use crate::slider::{DragOffset, SliderStateMachine};
use crate::swipe::swipe_target;

#[derive(Debug, Default)]
pub struct FullscreenController {
    open_index: Option<usize>,
    dragging: bool,
    drag_offset_px: f32,
    last_exit_at: Option<Instant>,
}

impl FullscreenController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open_index(&self) -> Option<usize> {
        self.open_index
    }

    pub fn is_open(&self) -> bool {
        self.open_index.is_some()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn drag_offset_px(&self) -> f32 {
        self.drag_offset_px
    }

    /// Request the overlay at `index`.  Returns whether it opened.
    ///
    /// Rejected while the main carousel is mid-drag, within the cooldown of
    /// the last fullscreen exit, or within the swipe cooldown of the last
    /// drag release — a swipe that ends on a card must not read as a tap.
    pub fn open_at(
        &mut self,
        index: usize,
        now: Instant,
        slider: &SliderStateMachine,
    ) -> bool {
        if slider.is_dragging() {
            return false;
        }

        let config = slider.config();

        if self
            .last_exit_at
            .is_some_and(|at| now.duration_since(at) < config.fullscreen_exit_cooldown)
        {
            return false;
        }

        if slider
            .last_drag_release_at()
            .is_some_and(|at| now.duration_since(at) < config.swipe_cooldown)
        {
            return false;
        }

        trace!("fullscreen open at {index}");
        self.open_index = Some(index);
        true
    }

    /// Close the overlay.  When `target` is set, the close also navigates
    /// the carousel there — a fullscreen swipe both dismisses and commits.
    pub fn exit(
        &mut self,
        target: Option<usize>,
        now: Instant,
        slider: &mut SliderStateMachine,
    ) {
        self.open_index = None;
        self.dragging = false;
        self.drag_offset_px = 0.0;
        self.last_exit_at = Some(now);

        if let Some(index) = target {
            slider.navigate_to(index, now);
        }
    }

    pub fn start_drag(&mut self) {
        if self.is_open() {
            self.dragging = true;
            self.drag_offset_px = 0.0;
        }
    }

    pub fn update_drag(&mut self, offset: DragOffset) {
        if self.dragging {
            self.drag_offset_px = offset.x;
        }
    }

    /// Release a fullscreen drag: a resolved swipe exits and navigates,
    /// anything else snaps back with the overlay still open.
    pub fn end_drag(&mut self, now: Instant, slider: &mut SliderStateMachine) {
        let offset = self.drag_offset_px;
        self.dragging = false;
        self.drag_offset_px = 0.0;

        let Some(base) = self.open_index else {
            return;
        };

        if let Some(target) = swipe_target(
            offset,
            slider.config().swipe_threshold_px,
            base,
            slider.total_slides(),
        ) {
            self.exit(Some(target), now, slider);
        }
    }

    /// A plain tap on the open overlay dismisses it.
    pub fn click(&mut self, now: Instant, slider: &mut SliderStateMachine) {
        if self.dragging || !self.is_open() {
            return;
        }
        self.exit(None, now, slider);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SliderConfig;
    use std::time::Duration;

    fn slider(total: usize, now: Instant) -> SliderStateMachine {
        SliderStateMachine::new(SliderConfig::default(), total, now)
    }

    #[test]
    fn open_is_rejected_while_slider_drags() {
        let t0 = Instant::now();
        let mut slider = slider(5, t0);
        slider.start_drag(t0);

        let mut fullscreen = FullscreenController::new();
        assert!(!fullscreen.open_at(2, t0, &slider));
        assert_eq!(fullscreen.open_index(), None);
    }

    #[test]
    fn open_is_rejected_inside_exit_cooldown() {
        let t0 = Instant::now();
        let mut slider = slider(5, t0);
        let mut fullscreen = FullscreenController::new();

        assert!(fullscreen.open_at(2, t0, &slider));
        fullscreen.exit(None, t0, &mut slider);

        let cooldown = slider.config().fullscreen_exit_cooldown;
        assert!(!fullscreen.open_at(2, t0 + cooldown / 2, &slider));
        assert!(fullscreen.open_at(2, t0 + cooldown, &slider));
    }

    #[test]
    fn open_is_rejected_right_after_a_drag_release() {
        let t0 = Instant::now();
        let mut slider = slider(5, t0);
        slider.start_drag(t0);
        slider.end_drag(t0);

        let mut fullscreen = FullscreenController::new();
        assert!(!fullscreen.open_at(0, t0 + Duration::from_millis(100), &slider));

        let cooldown = slider.config().swipe_cooldown;
        assert!(fullscreen.open_at(0, t0 + cooldown, &slider));
    }

    #[test]
    fn fullscreen_swipe_exits_and_navigates() {
        let t0 = Instant::now();
        let mut slider = slider(5, t0);
        let mut fullscreen = FullscreenController::new();
        assert!(fullscreen.open_at(4, t0, &slider));

        fullscreen.start_drag();
        fullscreen.update_drag(DragOffset { x: -60.0, y: 0.0 });
        fullscreen.end_drag(t0, &mut slider);

        assert!(!fullscreen.is_open());
        // Wraps forward from the last slide; the carousel is now in flight.
        assert!(slider.is_transitioning());
        let delay = slider.config().transition_delay;
        slider.poll(t0 + delay);
        assert_eq!(slider.current_index(), 0);
    }

    #[test]
    fn sub_threshold_fullscreen_drag_snaps_back() {
        let t0 = Instant::now();
        let mut slider = slider(5, t0);
        let mut fullscreen = FullscreenController::new();
        assert!(fullscreen.open_at(2, t0, &slider));

        fullscreen.start_drag();
        fullscreen.update_drag(DragOffset { x: 20.0, y: 0.0 });
        fullscreen.end_drag(t0, &mut slider);

        assert!(fullscreen.is_open());
        assert!(!fullscreen.is_dragging());
        assert!(!slider.is_transitioning());
    }

    #[test]
    fn tap_exits_but_drag_then_click_does_not() {
        let t0 = Instant::now();
        let mut slider = slider(5, t0);
        let mut fullscreen = FullscreenController::new();
        assert!(fullscreen.open_at(2, t0, &slider));

        fullscreen.start_drag();
        fullscreen.click(t0, &mut slider);
        assert!(fullscreen.is_open());

        fullscreen.end_drag(t0, &mut slider);
        fullscreen.click(t0, &mut slider);
        assert!(!fullscreen.is_open());
    }
}

//! Carousel slider state machine.
//!
//! Owns the current index, the transition phase and the drag/autoplay
//! bookkeeping.  The machine is driven entirely by its caller: interaction
//! handlers take the event timestamp, and deferred work (the two-phase
//! transition, autoplay ticks, the interaction debounce) is surfaced through
//! [`SliderStateMachine::next_deadline`] and fired by
//! [`SliderStateMachine::poll`].  There are no callbacks or detached timers,
//! so dropping the machine cancels everything outstanding.
//!
//! Guard rejections (navigating while transitioning, releasing a drag inside
//! the swipe cooldown) are deliberate no-ops, not errors.

use std::time::Instant;

use log::trace;

use crate::config::{CardPosition, SliderConfig};
use crate::position::card_position;
use crate::swipe::swipe_target;
use crate::transform::{CardTransform, DragState, card_transform};

/// Framework-agnostic drag reading: accumulated offset from the gesture
/// start, in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DragOffset {
    pub x: f32,
    pub y: f32,
}

/// Rendering contract for one card: everything the view needs to place it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardDescriptor {
    pub position: CardPosition,
    pub transform: CardTransform,
    pub is_center: bool,
}

/// Transition sequencing.
///
/// A committed navigation runs `Idle -> Delay -> Settle -> Idle`: the index
/// flips when the delay elapses, and the transitioning flag only clears once
/// the settle phase ends.  The stagger lets outgoing and incoming cards
/// animate in sequence instead of at once.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    Idle,
    Delay { target: usize, until: Instant },
    Settle { until: Instant },
}

#[derive(Debug)]
pub struct SliderStateMachine {
    config: SliderConfig,
    total_slides: usize,
    current_index: usize,
    phase: Phase,
    dragging: bool,
    drag_offset_px: f32,
    user_interacting: bool,
    page_visible: bool,
    vmin_px: f32,
    /// Next autoplay tick; `None` when autoplay cannot run at all.
    autoplay_at: Option<Instant>,
    /// Pending end of the interaction debounce window.
    resume_at: Option<Instant>,
    /// Most recent committed swipe, for the swipe cooldown.
    last_swipe_at: Option<Instant>,
    /// Most recent drag release of any kind, committed or snapped back.
    last_drag_release_at: Option<Instant>,
}

impl SliderStateMachine {
    pub fn new(config: SliderConfig, total_slides: usize, now: Instant) -> Self {
        let autoplay_at =
            (total_slides > 1).then(|| now + config.effective_autoplay_interval());

        Self {
            config,
            total_slides,
            current_index: 0,
            phase: Phase::Idle,
            dragging: false,
            drag_offset_px: 0.0,
            user_interacting: false,
            page_visible: true,
            vmin_px: 1.0,
            autoplay_at,
            resume_at: None,
            last_swipe_at: None,
            last_drag_release_at: None,
        }
    }

    pub fn config(&self) -> &SliderConfig {
        &self.config
    }

    pub fn total_slides(&self) -> usize {
        self.total_slides
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn is_transitioning(&self) -> bool {
        self.phase != Phase::Idle
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn drag_offset_px(&self) -> f32 {
        self.drag_offset_px
    }

    pub fn is_user_interacting(&self) -> bool {
        self.user_interacting
    }

    pub fn vmin_px(&self) -> f32 {
        self.vmin_px
    }

    pub fn last_drag_release_at(&self) -> Option<Instant> {
        self.last_drag_release_at
    }

    /// Replace the slide count, e.g. after a gallery import or removal.
    ///
    /// The current index is renormalized and autoplay is rearmed or disarmed
    /// to match the new count.
    pub fn set_total_slides(&mut self, total_slides: usize, now: Instant) {
        self.total_slides = total_slides;

        if total_slides == 0 {
            self.current_index = 0;
        } else {
            self.current_index %= total_slides;
        }

        // A transition staged against the old collection may now point at a
        // removed slide; cancel rather than guess.
        if let Phase::Delay { target, .. } = self.phase
            && (total_slides == 0 || target >= total_slides)
        {
            self.phase = Phase::Idle;
        }

        if total_slides > 1 {
            if self.autoplay_at.is_none() {
                self.autoplay_at = Some(now + self.config.effective_autoplay_interval());
            }
        } else {
            self.autoplay_at = None;
        }
    }

    /// Update the viewport unit: min(viewport width, height) / 100, px.
    pub fn set_viewport(&mut self, vmin_px: f32) {
        self.vmin_px = vmin_px.max(0.0);
    }

    /// Host visibility gate: autoplay does not advance in a hidden window.
    pub fn set_page_visible(&mut self, visible: bool) {
        self.page_visible = visible;
    }

    /// Mark the start of a user interaction, pausing autoplay immediately
    /// and cancelling any pending debounce resume.
    pub fn start_interaction(&mut self, _now: Instant) {
        self.resume_at = None;
        self.user_interacting = true;
    }

    /// Mark the end of a user interaction; autoplay resumes once the
    /// debounce window passes without further input.
    pub fn end_interaction(&mut self, now: Instant) {
        self.resume_at = Some(now + self.config.interaction_debounce);
    }

    pub fn start_drag(&mut self, now: Instant) {
        self.dragging = true;
        self.drag_offset_px = 0.0;
        self.start_interaction(now);
    }

    pub fn update_drag(&mut self, offset: DragOffset) {
        if self.dragging {
            self.drag_offset_px = offset.x;
        }
    }

    /// Release the drag: commit a swipe when the offset clears the threshold
    /// and the swipe cooldown allows it, otherwise snap back.
    pub fn end_drag(&mut self, now: Instant) {
        let offset = self.drag_offset_px;
        self.dragging = false;
        self.drag_offset_px = 0.0;
        self.last_drag_release_at = Some(now);

        if self.is_transitioning() {
            self.end_interaction(now);
            return;
        }

        // One continued gesture must not advance twice.
        if self
            .last_swipe_at
            .is_some_and(|at| now.duration_since(at) < self.config.swipe_cooldown)
        {
            self.end_interaction(now);
            return;
        }

        if let Some(target) = swipe_target(
            offset,
            self.config.swipe_threshold_px,
            self.current_index,
            self.total_slides,
        ) {
            trace!("swipe committed: {} -> {target}", self.current_index);
            self.last_swipe_at = Some(now);
            self.begin_transition(target, now);
        }

        self.end_interaction(now);
    }

    /// Explicit navigation (side-card click, keyboard).  Dropped while a
    /// transition is in flight.
    pub fn navigate_to(&mut self, index: usize, now: Instant) {
        if self.is_transitioning() {
            // Ignore, but leave the visuals clean.
            self.dragging = false;
            self.drag_offset_px = 0.0;
            self.end_interaction(now);
            return;
        }
        if self.total_slides == 0 {
            return;
        }

        self.begin_transition(index % self.total_slides, now);
    }

    /// The earliest instant at which [`poll`](Self::poll) has work to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        let phase = match self.phase {
            Phase::Idle => None,
            Phase::Delay { until, .. } | Phase::Settle { until } => Some(until),
        };

        [phase, self.autoplay_at, self.resume_at]
            .into_iter()
            .flatten()
            .min()
    }

    /// Fire every deadline at or before `now`.  Returns whether any state
    /// changed, so hosts know to redraw.
    pub fn poll(&mut self, now: Instant) -> bool {
        let mut changed = false;
        while self.step(now) {
            changed = true;
        }
        changed
    }

    fn step(&mut self, now: Instant) -> bool {
        if let Some(at) = self.resume_at
            && now >= at
        {
            self.resume_at = None;
            self.user_interacting = false;
            return true;
        }

        match self.phase {
            Phase::Delay { target, until } if now >= until => {
                self.current_index = target;
                self.phase = Phase::Settle {
                    until: until + self.config.transition_duration,
                };
                return true;
            }
            Phase::Settle { until } if now >= until => {
                self.phase = Phase::Idle;
                self.dragging = false;
                self.drag_offset_px = 0.0;
                return true;
            }
            _ => {}
        }

        if let Some(at) = self.autoplay_at
            && now >= at
        {
            self.autoplay_at = Some(now + self.config.effective_autoplay_interval());

            if self.can_autoplay() {
                let next = (self.current_index + 1) % self.total_slides;
                trace!("autoplay advance: {} -> {next}", self.current_index);
                self.begin_transition(next, now);
            }
            return true;
        }

        false
    }

    /// Per-card rendering descriptor for the view layer.
    pub fn card_descriptor(&self, card_index: usize) -> CardDescriptor {
        let position = card_position(card_index, self.current_index, self.total_slides);
        let drag = DragState {
            active: self.dragging,
            offset_px: self.drag_offset_px,
        };
        let transform = card_transform(&self.config, position, drag, self.vmin_px);

        CardDescriptor {
            position,
            transform,
            is_center: position.is_center(),
        }
    }

    fn begin_transition(&mut self, target: usize, now: Instant) {
        self.dragging = false;
        self.drag_offset_px = 0.0;
        self.phase = Phase::Delay {
            target,
            until: now + self.config.transition_delay,
        };
    }

    fn can_autoplay(&self) -> bool {
        self.total_slides > 1
            && !self.is_transitioning()
            && !self.user_interacting
            && !self.dragging
            && self.page_visible
    }
}

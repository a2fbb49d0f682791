//! Spring smoothing between the transforms the core emits each frame.
//!
//! The core's descriptors are step functions of the interaction state; this
//! integrates a damped spring per channel so cards glide between presets
//! instead of jumping.

use carousel::config::Spring;
use carousel::transform::CardTransform;

/// Longest integration step, so a stalled tick cannot fling the spring.
const MAX_DT: f32 = 0.1;

#[derive(Debug, Clone, Copy)]
struct Axis {
    value: f32,
    velocity: f32,
}

impl Axis {
    fn new(value: f32) -> Self {
        Self {
            value,
            velocity: 0.0,
        }
    }

    /// Semi-implicit Euler step toward `target`.
    fn step(&mut self, target: f32, spring: Spring, dt: f32) {
        let accel = spring.stiffness * (target - self.value) - spring.damping * self.velocity;
        self.velocity += accel * dt;
        self.value += self.velocity * dt;
    }

    fn snap(&mut self, target: f32) {
        self.value = target;
        self.velocity = 0.0;
    }
}

/// Smoothed visual state for one card.
#[derive(Debug, Clone, Copy)]
pub struct CardMotion {
    x_offset: Axis,
    scale: Axis,
    opacity: Axis,
    blur: Axis,
    z_index: i32,
}

impl CardMotion {
    pub fn new(target: CardTransform) -> Self {
        Self {
            x_offset: Axis::new(target.x_offset),
            scale: Axis::new(target.scale),
            opacity: Axis::new(target.opacity),
            blur: Axis::new(target.blur_px),
            z_index: target.z_index,
        }
    }

    /// Advance toward `target`.  Drag frames snap 1:1 so the card tracks
    /// the pointer exactly; everything else springs.
    pub fn step(&mut self, target: &CardTransform, spring: Spring, dt: f32, tracking: bool) {
        self.z_index = target.z_index;

        if tracking {
            self.snap(target);
            return;
        }

        let dt = dt.min(MAX_DT);
        self.x_offset.step(target.x_offset, spring, dt);
        self.scale.step(target.scale, spring, dt);
        self.opacity.step(target.opacity, spring, dt);
        self.blur.step(target.blur_px, spring, dt);
    }

    pub fn snap(&mut self, target: &CardTransform) {
        self.x_offset.snap(target.x_offset);
        self.scale.snap(target.scale);
        self.opacity.snap(target.opacity);
        self.blur.snap(target.blur_px);
        self.z_index = target.z_index;
    }

    pub fn current(&self) -> CardTransform {
        CardTransform {
            x_offset: self.x_offset.value,
            scale: self.scale.value.max(0.0),
            opacity: self.opacity.value.clamp(0.0, 1.0),
            blur_px: self.blur.value.max(0.0),
            z_index: self.z_index,
        }
    }
}

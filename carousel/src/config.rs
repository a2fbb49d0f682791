use std::time::Duration;

use enum_map::{Enum, EnumMap, enum_map};

/// Relative visual role of a card for the current render.
///
/// Derived from circular distance to the current index, never stored.
/// Prominence decreases from `Center` outward; `Hidden` cards sit behind
/// everything at zero opacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Enum)]
pub enum CardPosition {
    Center,
    Left,
    Right,
    FarLeft,
    FarRight,
    Hidden,
}

impl CardPosition {
    pub fn is_center(self) -> bool {
        self == CardPosition::Center
    }
}

/// Static visual preset for one [`CardPosition`].
///
/// `x_offset_factor` is expressed in units of `(card width + spacing)` so
/// the layout stays resolution-independent until the view converts it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionPreset {
    pub scale: f32,
    pub opacity: f32,
    pub blur: f32,
    pub z_index: i32,
    pub x_offset_factor: f32,
}

/// How the center card reacts while the user drags it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CenterDragResponse {
    /// Shrink rate per unit of drag progress.
    pub shrink_factor: f32,
    /// Cap on the total shrink amount.
    pub max_shrink: f32,
    /// Opacity reduction rate per unit of drag progress.
    pub opacity_factor: f32,
    /// Blur increase rate per unit of drag progress.
    pub blur_factor: f32,
}

/// How a side card reacts while it is being dragged toward the center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SideDragResponse {
    pub scale_factor: f32,
    pub opacity_factor: f32,
    pub blur_factor: f32,
    pub x_offset_factor: f32,
}

/// Spring parameters the view feeds into its animation smoothing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spring {
    pub stiffness: f32,
    pub damping: f32,
}

/// Responsive clamp for horizontal offsets so side cards stay inside the
/// container on narrow viewports.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OffsetResponse {
    /// Viewport min-side in px at which offsets reach 100%.
    pub breakpoint_px: f32,
    /// Floor multiplier applied on very narrow viewports.
    pub min_multiplier: f32,
}

/// Tuned constants for carousel behavior and visuals.
///
/// Immutable after construction; the defaults carry the shipped tuning.
/// Sizes are in viewport-min units (min(width, height) / 100), thresholds
/// in physical pixels, times as [`Duration`]s.
#[derive(Debug, Clone)]
pub struct SliderConfig {
    pub autoplay_interval: Duration,
    /// Divides the autoplay interval; values above 1 speed autoplay up.
    pub autoplay_speed_multiplier: f32,
    /// Minimum horizontal drag distance to commit a slide change.
    pub swipe_threshold_px: f32,
    /// Drag releases within this window of a committed swipe are dropped.
    pub swipe_cooldown: Duration,
    /// Open requests within this window of a fullscreen exit are dropped.
    pub fullscreen_exit_cooldown: Duration,
    /// Time without input before autoplay is allowed to resume.
    pub interaction_debounce: Duration,
    /// Delay before the index flips, so exit/enter animations sequence.
    pub transition_delay: Duration,
    /// Time after the index flip before the transitioning flag clears.
    pub transition_duration: Duration,
    /// Center card width in viewport-min units.
    pub center_card_size: f32,
    /// Side/far card width in viewport-min units.
    pub side_card_size: f32,
    /// Horizontal gap between cards in viewport-min units.
    pub spacing_units: f32,
    /// Lower bound that keeps non-center cards from going fully invisible.
    pub min_side_opacity: f32,
    pub offset_response: OffsetResponse,
    pub positions: EnumMap<CardPosition, PositionPreset>,
    pub center_drag: CenterDragResponse,
    pub side_drag: SideDragResponse,
    pub spring_transitioning: Spring,
    pub spring_idle: Spring,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            autoplay_interval: Duration::from_millis(4000),
            autoplay_speed_multiplier: 1.5,
            swipe_threshold_px: 50.0,
            swipe_cooldown: Duration::from_millis(350),
            fullscreen_exit_cooldown: Duration::from_millis(280),
            interaction_debounce: Duration::ZERO,
            transition_delay: Duration::from_millis(50),
            transition_duration: Duration::from_millis(300),
            center_card_size: 66.0,
            side_card_size: 48.0,
            spacing_units: 3.0,
            min_side_opacity: 0.05,
            offset_response: OffsetResponse {
                breakpoint_px: 1024.0,
                min_multiplier: 0.76,
            },
            positions: enum_map! {
                CardPosition::Center => PositionPreset {
                    scale: 1.1,
                    opacity: 1.0,
                    blur: 0.0,
                    z_index: 50,
                    x_offset_factor: 0.0,
                },
                CardPosition::Left => PositionPreset {
                    scale: 1.05,
                    opacity: 0.8,
                    blur: 1.0,
                    z_index: 40,
                    x_offset_factor: -0.41,
                },
                CardPosition::Right => PositionPreset {
                    scale: 1.05,
                    opacity: 0.8,
                    blur: 1.0,
                    z_index: 40,
                    x_offset_factor: 0.41,
                },
                CardPosition::FarLeft => PositionPreset {
                    scale: 0.8,
                    opacity: 0.5,
                    blur: 2.0,
                    z_index: 30,
                    x_offset_factor: -0.66,
                },
                CardPosition::FarRight => PositionPreset {
                    scale: 0.8,
                    opacity: 0.5,
                    blur: 2.0,
                    z_index: 30,
                    x_offset_factor: 0.66,
                },
                CardPosition::Hidden => PositionPreset {
                    scale: 0.5,
                    opacity: 0.0,
                    blur: 5.0,
                    z_index: 10,
                    x_offset_factor: 0.0,
                },
            },
            center_drag: CenterDragResponse {
                shrink_factor: 0.35,
                max_shrink: 0.4,
                opacity_factor: 0.6,
                blur_factor: 4.0,
            },
            side_drag: SideDragResponse {
                scale_factor: 2.5,
                opacity_factor: 1.3,
                blur_factor: 1.2,
                x_offset_factor: 0.6,
            },
            spring_transitioning: Spring {
                stiffness: 120.0,
                damping: 30.0,
            },
            spring_idle: Spring {
                stiffness: 80.0,
                damping: 25.0,
            },
        }
    }
}

impl SliderConfig {
    /// Card width in viewport-min units for the given position.
    pub fn card_size(&self, position: CardPosition) -> f32 {
        if position.is_center() {
            self.center_card_size
        } else {
            self.side_card_size
        }
    }

    /// Autoplay period after applying the speed multiplier.
    pub fn effective_autoplay_interval(&self) -> Duration {
        if self.autoplay_speed_multiplier > 0.0 {
            self.autoplay_interval
                .div_f32(self.autoplay_speed_multiplier)
        } else {
            self.autoplay_interval
        }
    }
}

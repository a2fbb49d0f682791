//! Per-card visual transform computation.
//!
//! Pure derivation from position preset + live drag state; recomputed every
//! render, never stored.  Offsets stay in viewport-min units so the view
//! decides how they become pixels.

use crate::config::{CardPosition, SliderConfig};

/// Floor for the center card's scale while it is dragged away.
const CENTER_DRAG_MIN_SCALE: f32 = 0.7;
/// Floor for the center card's opacity while it is dragged away.
const CENTER_DRAG_MIN_OPACITY: f32 = 0.4;

/// Snapshot of the live drag gesture, as the transform computation sees it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DragState {
    pub active: bool,
    pub offset_px: f32,
}

/// Visual descriptor for one card.
///
/// `x_offset` is in viewport-min units, `blur_px` in pixels, `scale` and
/// `opacity` unitless, `z_index` the stacking order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardTransform {
    pub x_offset: f32,
    pub scale: f32,
    pub opacity: f32,
    pub blur_px: f32,
    pub z_index: i32,
}

/// Compute the visual transform for a card at `position`.
///
/// `vmin_px` is the viewport unit: min(viewport width, height) / 100, used
/// both for the responsive offset clamp and to convert the drag offset into
/// relative progress.
pub fn card_transform(
    config: &SliderConfig,
    position: CardPosition,
    drag: DragState,
    vmin_px: f32,
) -> CardTransform {
    let preset = config.positions[position];
    let travel = config.card_size(position) + config.spacing_units;

    let mut x_offset = preset.x_offset_factor * travel;

    // Pull side cards inward on narrow viewports so they stay visible.
    let min_viewport_side_px = vmin_px * 100.0;
    let response = config.offset_response;
    let multiplier = (min_viewport_side_px / response.breakpoint_px)
        .min(1.0)
        .max(response.min_multiplier);
    x_offset *= multiplier;

    let mut scale = preset.scale;
    let mut opacity = preset.opacity;
    let mut blur = preset.blur;

    if drag.active && drag.offset_px != 0.0 && vmin_px > 0.0 {
        let progress = drag.offset_px / (travel * vmin_px);
        let magnitude = progress.abs();

        match position {
            CardPosition::Center => {
                let response = config.center_drag;
                let shrink = (magnitude * response.shrink_factor).min(response.max_shrink);
                scale = (scale - shrink).max(CENTER_DRAG_MIN_SCALE);
                opacity =
                    (1.0 - magnitude * response.opacity_factor).max(CENTER_DRAG_MIN_OPACITY);
                blur = magnitude * response.blur_factor;
            }
            CardPosition::Left | CardPosition::Right => {
                let toward_center = (position == CardPosition::Left && progress > 0.0)
                    || (position == CardPosition::Right && progress < 0.0);

                // Cards moving away from the center keep their preset.
                if toward_center {
                    let response = config.side_drag;
                    let target = config.positions[CardPosition::Center];
                    scale += (target.scale - scale) * magnitude * response.scale_factor;
                    opacity += (target.opacity - opacity) * magnitude * response.opacity_factor;
                    blur += (target.blur - blur) * magnitude * response.blur_factor;
                    x_offset +=
                        (target.x_offset_factor - x_offset) * magnitude * response.x_offset_factor;
                }
            }
            _ => {}
        }
    }

    // Keeps side cards from popping in from full transparency when the drag
    // ends and positions reassign in the same frame.
    if !position.is_center() {
        opacity = opacity.max(config.min_side_opacity);
    }

    CardTransform {
        x_offset,
        scale,
        opacity,
        blur_px: blur.max(0.0),
        z_index: preset.z_index,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const VMIN: f32 = 10.24; // 1024 px min side, multiplier exactly 1.0

    fn config() -> SliderConfig {
        SliderConfig::default()
    }

    fn idle() -> DragState {
        DragState::default()
    }

    #[test]
    fn center_preset_passes_through_when_idle() {
        let config = config();
        let t = card_transform(&config, CardPosition::Center, idle(), VMIN);
        assert_eq!(t.x_offset, 0.0);
        assert_eq!(t.scale, 1.1);
        assert_eq!(t.opacity, 1.0);
        assert_eq!(t.blur_px, 0.0);
        assert_eq!(t.z_index, 50);
    }

    #[test]
    fn side_offsets_are_symmetric() {
        let config = config();
        let left = card_transform(&config, CardPosition::Left, idle(), VMIN);
        let right = card_transform(&config, CardPosition::Right, idle(), VMIN);
        assert_eq!(left.x_offset, -right.x_offset);
        assert!(right.x_offset > 0.0);
    }

    #[test]
    fn narrow_viewport_pulls_offsets_inward() {
        let config = config();
        let wide = card_transform(&config, CardPosition::Right, idle(), VMIN);
        // 380 px min side, well under the breakpoint.
        let narrow = card_transform(&config, CardPosition::Right, idle(), 3.8);
        assert!(narrow.x_offset < wide.x_offset);
        let floor = wide.x_offset * config.offset_response.min_multiplier;
        assert!(narrow.x_offset >= floor - 1e-4);
    }

    #[test]
    fn dragged_center_shrinks_and_dims() {
        let config = config();
        let drag = DragState {
            active: true,
            offset_px: 300.0,
        };
        let t = card_transform(&config, CardPosition::Center, drag, VMIN);
        assert!(t.scale < 1.1);
        assert!(t.scale >= 0.7);
        assert!(t.opacity < 1.0);
        assert!(t.opacity >= 0.4);
        assert!(t.blur_px > 0.0);
    }

    #[test]
    fn huge_drag_hits_the_center_floors() {
        let config = config();
        let drag = DragState {
            active: true,
            offset_px: 100_000.0,
        };
        let t = card_transform(&config, CardPosition::Center, drag, VMIN);
        assert_eq!(t.scale, 0.7);
        assert_eq!(t.opacity, 0.4);
    }

    #[test]
    fn left_card_approaches_center_on_rightward_drag() {
        let config = config();
        let drag = DragState {
            active: true,
            offset_px: 150.0,
        };
        let idle_t = card_transform(&config, CardPosition::Left, idle(), VMIN);
        let t = card_transform(&config, CardPosition::Left, drag, VMIN);
        assert!(t.scale > idle_t.scale);
        assert!(t.opacity > idle_t.opacity);
        assert!(t.blur_px < idle_t.blur_px);
        assert!(t.x_offset > idle_t.x_offset);
    }

    #[test]
    fn left_card_ignores_leftward_drag() {
        let config = config();
        let drag = DragState {
            active: true,
            offset_px: -150.0,
        };
        let idle_t = card_transform(&config, CardPosition::Left, idle(), VMIN);
        let t = card_transform(&config, CardPosition::Left, drag, VMIN);
        assert_eq!(t.scale, idle_t.scale);
        assert_eq!(t.opacity, idle_t.opacity);
    }

    #[test]
    fn hidden_card_keeps_minimum_opacity() {
        let config = config();
        let t = card_transform(&config, CardPosition::Hidden, idle(), VMIN);
        assert_eq!(t.opacity, config.min_side_opacity);
    }

    proptest! {
        #[test]
        fn invariants_hold_for_any_drag(
            offset in -5000.0f32..=5000.0,
            active: bool,
            vmin in 0.0f32..=30.0,
            position in prop_oneof![
                Just(CardPosition::Center),
                Just(CardPosition::Left),
                Just(CardPosition::Right),
                Just(CardPosition::FarLeft),
                Just(CardPosition::FarRight),
                Just(CardPosition::Hidden),
            ],
        ) {
            let config = config();
            let drag = DragState { active, offset_px: offset };
            let t = card_transform(&config, position, drag, vmin);

            prop_assert!(t.blur_px >= 0.0);
            if !position.is_center() {
                prop_assert!(t.opacity >= config.min_side_opacity);
            }

            // Pure: identical inputs, identical outputs.
            prop_assert_eq!(t, card_transform(&config, position, drag, vmin));
        }
    }
}

//! Drag-to-swipe resolution.

/// Resolve a horizontal drag release into a navigation target.
///
/// A rightward release (positive offset) reveals the previous card, a
/// leftward one the next, both with wraparound.  Returns `None` when the
/// release should snap back instead: fewer than two slides, or the offset
/// magnitude is within the threshold.
pub fn swipe_target(
    offset_x: f32,
    threshold_px: f32,
    base_index: usize,
    total: usize,
) -> Option<usize> {
    if total < 2 {
        return None;
    }
    if offset_x.abs() <= threshold_px {
        return None;
    }

    if offset_x > 0.0 {
        Some(if base_index == 0 {
            total - 1
        } else {
            base_index - 1
        })
    } else {
        Some((base_index + 1) % total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const THRESHOLD: f32 = 50.0;

    #[test]
    fn within_threshold_snaps_back() {
        assert_eq!(swipe_target(0.0, THRESHOLD, 2, 5), None);
        assert_eq!(swipe_target(THRESHOLD, THRESHOLD, 2, 5), None);
        assert_eq!(swipe_target(-THRESHOLD, THRESHOLD, 2, 5), None);
    }

    #[test]
    fn rightward_release_goes_to_previous() {
        assert_eq!(swipe_target(THRESHOLD + 1.0, THRESHOLD, 2, 5), Some(1));
    }

    #[test]
    fn leftward_release_goes_to_next() {
        assert_eq!(swipe_target(-(THRESHOLD + 1.0), THRESHOLD, 2, 5), Some(3));
    }

    #[test]
    fn wraps_backward_from_first() {
        assert_eq!(swipe_target(THRESHOLD + 1.0, THRESHOLD, 0, 5), Some(4));
    }

    #[test]
    fn wraps_forward_from_last() {
        assert_eq!(swipe_target(-(THRESHOLD + 1.0), THRESHOLD, 4, 5), Some(0));
        assert_eq!(swipe_target(-60.0, 50.0, 4, 5), Some(0));
    }

    #[test]
    fn single_or_empty_collection_never_resolves() {
        assert_eq!(swipe_target(500.0, THRESHOLD, 0, 1), None);
        assert_eq!(swipe_target(-500.0, THRESHOLD, 0, 0), None);
    }

    proptest! {
        #[test]
        fn sub_threshold_never_resolves(
            offset in -50.0f32..=50.0,
            base in 0usize..16,
            total in 0usize..16,
        ) {
            prop_assert_eq!(swipe_target(offset, THRESHOLD, base, total), None);
        }

        #[test]
        fn resolved_target_is_adjacent(
            offset in prop_oneof![51.0f32..500.0, -500.0f32..-51.0],
            base in 0usize..16,
            total in 2usize..16,
        ) {
            let base = base % total;
            let target = swipe_target(offset, THRESHOLD, base, total).unwrap();
            let expected = if offset > 0.0 {
                (base + total - 1) % total
            } else {
                (base + 1) % total
            };
            prop_assert_eq!(target, expected);
            prop_assert!(target < total);
        }
    }
}

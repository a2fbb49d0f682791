//! Circular position assignment.
//!
//! Maps a card's circular distance from the current index to one of the six
//! [`CardPosition`] slots.  With fewer than five cards some slots collide;
//! precedence is Center, Right, Left, FarRight, FarLeft, so the successor
//! index (`+1 mod total`) always wins the Right slot:
//!
//! | total | assignment                                             |
//! |-------|--------------------------------------------------------|
//! | 1     | the only card is Center                                |
//! | 2     | the other card is Right                                |
//! | 3     | `+1` is Right, `-1` is Left, no far slots              |
//! | 4     | the opposite card (`+2`) lands on FarRight             |
//! | ≥ 5   | all five visible slots are distinct                    |

use crate::config::CardPosition;

/// Assign a relative position to `card_index` given the current index.
///
/// Both indices are normalized modulo `total`, so out-of-range input wraps
/// instead of failing.  `total == 0` yields `Hidden` since there is nothing
/// to anchor the layout on.
pub fn card_position(card_index: usize, current_index: usize, total: usize) -> CardPosition {
    if total == 0 {
        return CardPosition::Hidden;
    }

    let card = card_index % total;
    let current = current_index % total;
    let distance = (card + total - current) % total;

    if distance == 0 {
        CardPosition::Center
    } else if distance == 1 {
        CardPosition::Right
    } else if distance == total - 1 {
        CardPosition::Left
    } else if distance == 2 {
        CardPosition::FarRight
    } else if distance == total - 2 {
        CardPosition::FarLeft
    } else {
        CardPosition::Hidden
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn current_card_is_always_center() {
        for total in 1..8 {
            for current in 0..total {
                assert_eq!(
                    card_position(current, current, total),
                    CardPosition::Center,
                    "total={total} current={current}"
                );
            }
        }
    }

    #[test]
    fn five_slides_fill_all_slots() {
        assert_eq!(card_position(2, 2, 5), CardPosition::Center);
        assert_eq!(card_position(3, 2, 5), CardPosition::Right);
        assert_eq!(card_position(4, 2, 5), CardPosition::FarRight);
        assert_eq!(card_position(1, 2, 5), CardPosition::Left);
        assert_eq!(card_position(0, 2, 5), CardPosition::FarLeft);
    }

    #[test]
    fn six_slides_hide_the_opposite_card() {
        assert_eq!(card_position(3, 0, 6), CardPosition::Hidden);
    }

    #[test]
    fn two_slides_use_the_right_slot() {
        assert_eq!(card_position(1, 0, 2), CardPosition::Right);
        assert_eq!(card_position(0, 1, 2), CardPosition::Right);
    }

    #[test]
    fn three_slides_split_left_and_right() {
        assert_eq!(card_position(1, 0, 3), CardPosition::Right);
        assert_eq!(card_position(2, 0, 3), CardPosition::Left);
    }

    #[test]
    fn single_slide_is_center() {
        assert_eq!(card_position(0, 0, 1), CardPosition::Center);
        // Out-of-range indices wrap back onto the only card.
        assert_eq!(card_position(7, 3, 1), CardPosition::Center);
    }

    #[test]
    fn empty_collection_hides_everything() {
        assert_eq!(card_position(0, 0, 0), CardPosition::Hidden);
    }

    proptest! {
        #[test]
        fn wrapping_is_consistent(card in 0usize..64, current in 0usize..64, total in 1usize..16) {
            let direct = card_position(card % total, current % total, total);
            prop_assert_eq!(card_position(card, current, total), direct);
        }

        #[test]
        fn idempotent(card in 0usize..64, current in 0usize..64, total in 0usize..16) {
            prop_assert_eq!(
                card_position(card, current, total),
                card_position(card, current, total)
            );
        }
    }
}

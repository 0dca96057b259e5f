//! Frame Index
//!
//! Pure sibling-index arithmetic shared by live resolution and tests.

/// Adjust a raw sibling position for the slot the recording indicator
/// consumes. With no indicator the raw position is already stable; at
/// or past the indicator's insertion point every position shifts down
/// one so paths stay identical whether or not the overlay is present.
pub fn calculate_frame_index(raw: u32, indicator_index: Option<u32>) -> u32 {
    match indicator_index {
        Some(indicator) if raw >= indicator => raw - 1,
        _ => raw,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_indicator_is_identity() {
        for raw in 0..8 {
            assert_eq!(calculate_frame_index(raw, None), raw);
        }
    }

    #[test]
    fn test_positions_past_the_indicator_shift_down() {
        for raw in 3..8 {
            assert_eq!(calculate_frame_index(raw, Some(3)), raw - 1);
        }
    }

    #[test]
    fn test_positions_before_the_indicator_are_unchanged() {
        for raw in 0..3 {
            assert_eq!(calculate_frame_index(raw, Some(3)), raw);
        }
    }

    #[test]
    fn test_indicator_in_the_middle() {
        // indicator occupies slot 1: slot 0 keeps its index, slots
        // behind it close the gap
        assert_eq!(calculate_frame_index(0, Some(1)), 0);
        assert_eq!(calculate_frame_index(2, Some(1)), 1);
        assert_eq!(calculate_frame_index(3, Some(1)), 2);
    }
}

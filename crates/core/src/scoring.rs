//! Scoring module - line scores, leveling, and gravity speed
//!
//! Line clears pay a fixed table scaled by the level in effect when the
//! piece locked. The level itself is derived from total cleared lines, and
//! the gravity interval shrinks per level down to a floor.

use crate::types::{
    BASE_DROP_MS, DROP_STEP_MS, HARD_DROP_POINTS, LINES_PER_LEVEL, LINE_SCORES, MIN_DROP_MS,
    SOFT_DROP_POINTS,
};

/// Points for clearing `lines` rows at once at the given level.
/// Scores 0/100/300/500/800 for 0-4 rows, multiplied by the level.
pub fn calculate_line_score(lines: usize, level: u32) -> u32 {
    if lines == 0 || lines > 4 {
        return 0;
    }
    LINE_SCORES[lines] * level
}

/// Level reached after clearing `total_lines` rows. Starts at 1 and
/// steps up every [`LINES_PER_LEVEL`] rows.
pub fn calculate_level(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL + 1
}

/// Gravity interval in milliseconds for a level. Each level past the
/// first shaves [`DROP_STEP_MS`] off, clamped at [`MIN_DROP_MS`].
pub fn get_drop_interval_ms(level: u32) -> u32 {
    BASE_DROP_MS
        .saturating_sub(level.saturating_sub(1) * DROP_STEP_MS)
        .max(MIN_DROP_MS)
}

/// Bonus points for dropping a piece `rows` cells under player control
pub fn calculate_drop_score(rows: u32, is_hard_drop: bool) -> u32 {
    if is_hard_drop {
        rows * HARD_DROP_POINTS
    } else {
        rows * SOFT_DROP_POINTS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_score_table_at_level_one() {
        assert_eq!(calculate_line_score(0, 1), 0);
        assert_eq!(calculate_line_score(1, 1), 100);
        assert_eq!(calculate_line_score(2, 1), 300);
        assert_eq!(calculate_line_score(3, 1), 500);
        assert_eq!(calculate_line_score(4, 1), 800);
    }

    #[test]
    fn test_line_score_scales_with_level() {
        assert_eq!(calculate_line_score(2, 3), 900);
        assert_eq!(calculate_line_score(4, 5), 4000);
        assert_eq!(calculate_line_score(1, 10), 1000);
    }

    #[test]
    fn test_line_score_out_of_range() {
        assert_eq!(calculate_line_score(5, 3), 0);
        assert_eq!(calculate_line_score(100, 1), 0);
    }

    #[test]
    fn test_level_thresholds() {
        assert_eq!(calculate_level(0), 1);
        assert_eq!(calculate_level(9), 1);
        assert_eq!(calculate_level(10), 2);
        assert_eq!(calculate_level(19), 2);
        assert_eq!(calculate_level(20), 3);
        assert_eq!(calculate_level(100), 11);
    }

    #[test]
    fn test_drop_interval_curve() {
        assert_eq!(get_drop_interval_ms(1), 800);
        assert_eq!(get_drop_interval_ms(2), 740);
        assert_eq!(get_drop_interval_ms(5), 560);
        assert_eq!(get_drop_interval_ms(12), 140);
    }

    #[test]
    fn test_drop_interval_floor() {
        assert_eq!(get_drop_interval_ms(13), 120);
        assert_eq!(get_drop_interval_ms(50), 120);
        assert_eq!(get_drop_interval_ms(1000), 120);
    }

    #[test]
    fn test_drop_score() {
        assert_eq!(calculate_drop_score(18, true), 36);
        assert_eq!(calculate_drop_score(18, false), 18);
        assert_eq!(calculate_drop_score(0, true), 0);
    }
}

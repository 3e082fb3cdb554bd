//! Classic Nintendo line-clear scoring and the level/speed curve.

use crate::config::RulesConfig;

/// Base points indexed by rows cleared in a single lock.
pub const LINE_SCORES: [u32; 5] = [0, 40, 100, 300, 1200];

/// Points for clearing `lines` rows at once on `level` (0-based).
/// More than four rows scores as a four-row clear.
pub fn line_clear_points(lines: u32, level: u32) -> u32 {
    let base = LINE_SCORES[lines.min(4) as usize];
    base.saturating_mul(level.saturating_add(1))
}

pub fn level_for_lines(total_lines: u32, rules: &RulesConfig) -> u32 {
    total_lines / rules.lines_per_level.max(1)
}

/// Seconds per automatic step, floored at `min_fall_speed`.
pub fn fall_speed_for_level(level: u32, rules: &RulesConfig) -> f32 {
    let speed = rules.initial_fall_speed - level as f32 * rules.fall_speed_step;
    speed.max(rules.min_fall_speed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tetris_scales_with_level() {
        assert_eq!(line_clear_points(4, 0), 1200);
        assert_eq!(line_clear_points(4, 2), 3600);
    }

    #[test]
    fn classic_table() {
        assert_eq!(line_clear_points(0, 5), 0);
        assert_eq!(line_clear_points(1, 0), 40);
        assert_eq!(line_clear_points(2, 1), 200);
        assert_eq!(line_clear_points(3, 3), 1200);
        assert_eq!(line_clear_points(6, 0), 1200);
    }

    #[test]
    fn level_every_ten_lines() {
        let rules = RulesConfig::default();
        assert_eq!(level_for_lines(0, &rules), 0);
        assert_eq!(level_for_lines(9, &rules), 0);
        assert_eq!(level_for_lines(10, &rules), 1);
        assert_eq!(level_for_lines(100, &rules), 10);
    }

    #[test]
    fn speed_curve_is_floored() {
        let rules = RulesConfig::default();
        assert_eq!(fall_speed_for_level(0, &rules), 1.0);
        assert!((fall_speed_for_level(1, &rules) - 0.9).abs() < 1e-6);
        assert!((fall_speed_for_level(level_for_lines(100, &rules), &rules) - 0.1).abs() < 1e-6);
        assert_eq!(fall_speed_for_level(50, &rules), 0.1);

        let mut previous = f32::MAX;
        for level in 0..30 {
            let speed = fall_speed_for_level(level, &rules);
            assert!(speed <= previous);
            assert!(speed >= rules.min_fall_speed);
            previous = speed;
        }
    }
}

//! Level thresholds and point-to-level derivation.

use serde::{Deserialize, Serialize};

/// Minimum points required to reach each level, indexed by level.
///
/// Entry 0 is always 0 and entries are strictly increasing, so every
/// point total maps to exactly one level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LevelTable {
    thresholds: Vec<u64>,
}

impl LevelTable {
    /// Build a table from raw thresholds. Invariants are checked by
    /// [`crate::ProgressionConfig::validate`].
    pub fn new(thresholds: Vec<u64>) -> Self {
        Self { thresholds }
    }

    /// Highest level in the table.
    pub fn max_level(&self) -> u8 {
        (self.thresholds.len().saturating_sub(1)) as u8
    }

    /// Minimum points required to reach `level`, if the level exists.
    pub fn threshold(&self, level: u8) -> Option<u64> {
        self.thresholds.get(level as usize).copied()
    }

    /// Raw thresholds, indexed by level.
    pub fn thresholds(&self) -> &[u64] {
        &self.thresholds
    }

    /// Derive the level for a point total: the highest level whose
    /// threshold is at or below `points`. Scans from the top down; level
    /// zero's threshold is zero so the scan always lands somewhere.
    pub fn level_of(&self, points: u64) -> u8 {
        for level in (0..self.thresholds.len()).rev() {
            if points >= self.thresholds[level] {
                return level as u8;
            }
        }
        0
    }

    /// Progress from a point total toward the next level.
    pub fn progress_toward_next(&self, points: u64, level: u8) -> LevelProgress {
        let max = self.max_level();
        if level >= max {
            return LevelProgress::MaxLevel {
                points,
                max_threshold: self.thresholds[max as usize],
            };
        }

        let level_threshold = self.thresholds[level as usize];
        let next_level = level + 1;
        let next_threshold = self.thresholds[next_level as usize];
        let span = next_threshold - level_threshold;
        let gained = points.saturating_sub(level_threshold);
        let percent = ((gained as f32 / span as f32) * 100.0).clamp(0.0, 100.0);

        LevelProgress::Toward {
            level,
            next_level,
            points,
            level_threshold,
            next_threshold,
            points_needed: next_threshold.saturating_sub(points),
            percent,
        }
    }
}

impl Default for LevelTable {
    fn default() -> Self {
        Self::new(vec![0, 100, 250, 500, 1000, 2000])
    }
}

/// Position within the level ladder.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum LevelProgress {
    /// The top of the ladder has been reached.
    MaxLevel {
        /// Current point total
        points: u64,
        /// Threshold of the highest level
        max_threshold: u64,
    },

    /// Partway through a level band.
    Toward {
        /// Current level
        level: u8,
        /// The level being worked toward
        next_level: u8,
        /// Current point total
        points: u64,
        /// Threshold of the current level
        level_threshold: u64,
        /// Threshold of the next level
        next_threshold: u64,
        /// Points still required to reach the next level
        points_needed: u64,
        /// Completion of the current band, 0..=100
        percent: f32,
    },
}

impl LevelProgress {
    /// Whether the top level has been reached.
    pub fn is_max_level(&self) -> bool {
        matches!(self, LevelProgress::MaxLevel { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_of_matches_thresholds_exactly() {
        let table = LevelTable::default();
        for level in 0..=table.max_level() {
            let threshold = table.threshold(level).unwrap();
            assert_eq!(table.level_of(threshold), level);
        }
    }

    #[test]
    fn level_of_is_monotonic() {
        let table = LevelTable::default();
        let mut last = 0;
        for points in 0..2200 {
            let level = table.level_of(points);
            assert!(level >= last, "level dropped at {} points", points);
            last = level;
        }
    }

    #[test]
    fn level_of_boundary_values() {
        let table = LevelTable::default();
        assert_eq!(table.level_of(0), 0);
        assert_eq!(table.level_of(99), 0);
        assert_eq!(table.level_of(100), 1);
        assert_eq!(table.level_of(249), 1);
        assert_eq!(table.level_of(250), 2);
        assert_eq!(table.level_of(2000), 5);
        assert_eq!(table.level_of(u64::MAX), 5);
    }

    #[test]
    fn progress_within_a_band() {
        let table = LevelTable::default();
        // 175 points: level 1 band runs 100..250
        let progress = table.progress_toward_next(175, 1);
        match progress {
            LevelProgress::Toward {
                next_level,
                points_needed,
                percent,
                ..
            } => {
                assert_eq!(next_level, 2);
                assert_eq!(points_needed, 75);
                assert!((percent - 50.0).abs() < f32::EPSILON);
            }
            LevelProgress::MaxLevel { .. } => panic!("not max level"),
        }
    }

    #[test]
    fn progress_at_max_level() {
        let table = LevelTable::default();
        let progress = table.progress_toward_next(2400, 5);
        assert!(progress.is_max_level());
        assert_eq!(
            progress,
            LevelProgress::MaxLevel {
                points: 2400,
                max_threshold: 2000
            }
        );
    }

    #[test]
    fn progress_percent_is_clamped() {
        let table = LevelTable::default();
        // Points below the band floor still report zero, not negative.
        match table.progress_toward_next(50, 1) {
            LevelProgress::Toward { percent, .. } => assert_eq!(percent, 0.0),
            LevelProgress::MaxLevel { .. } => panic!("not max level"),
        }
    }
}

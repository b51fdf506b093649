//! Score-driven difficulty tiers.

use std::time::Duration;

use anyhow::{Result, ensure};

/// One difficulty step. A tier takes effect at the exact score it is keyed
/// to and stays in effect until another threshold matches.
#[derive(Debug, Clone, PartialEq)]
pub struct DifficultyTier {
    /// Cumulative score at which this tier kicks in.
    pub threshold: u32,
    /// Display label.
    pub label: String,
    /// Delay between ticks while this tier is active.
    pub tick: Duration,
    /// Horizontal distance between consecutive pipes.
    pub pipe_spacing: i32,
}

impl DifficultyTier {
    pub fn new(threshold: u32, label: &str, tick_secs: f64, pipe_spacing: i32) -> Self {
        Self {
            threshold,
            label: label.to_string(),
            tick: Duration::from_secs_f64(tick_secs),
            pipe_spacing,
        }
    }
}

/// Tier table ordered by score threshold.
#[derive(Debug, Clone)]
pub struct DifficultyTable {
    tiers: Vec<DifficultyTier>,
}

impl DifficultyTable {
    pub fn new(mut tiers: Vec<DifficultyTier>) -> Self {
        tiers.sort_by_key(|tier| tier.threshold);
        Self { tiers }
    }

    /// The tuning the game ships with.
    pub fn standard() -> Self {
        Self::new(vec![
            DifficultyTier::new(0, "Baby", 0.050, 30),
            DifficultyTier::new(500, "Easy", 0.045, 25),
            DifficultyTier::new(1000, "Medium", 0.035, 20),
            DifficultyTier::new(3000, "Hard", 0.025, 15),
            DifficultyTier::new(6666, "HELL", 0.015, 10),
        ])
    }

    /// A table without a score-0 entry has no tier to start a session from.
    pub fn validate(&self) -> Result<()> {
        ensure!(!self.tiers.is_empty(), "difficulty table is empty");
        ensure!(
            self.tiers[0].threshold == 0,
            "difficulty table needs an entry at score 0"
        );
        for pair in self.tiers.windows(2) {
            ensure!(
                pair[0].threshold < pair[1].threshold,
                "duplicate difficulty threshold {}",
                pair[1].threshold
            );
        }
        for tier in &self.tiers {
            ensure!(
                tier.tick > Duration::ZERO,
                "tier '{}' has a zero tick interval",
                tier.label
            );
            ensure!(
                tier.pipe_spacing > 0,
                "tier '{}' has a non-positive pipe spacing",
                tier.label
            );
        }
        Ok(())
    }

    /// Exact-threshold lookup. Scores between thresholds return `None` and
    /// the caller keeps whatever tier is already in effect.
    pub fn at_score(&self, score: u32) -> Option<&DifficultyTier> {
        self.tiers.iter().find(|tier| tier.threshold == score)
    }

    pub fn by_label(&self, label: &str) -> Option<&DifficultyTier> {
        self.tiers
            .iter()
            .find(|tier| tier.label.eq_ignore_ascii_case(label))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_table_is_valid() {
        assert!(DifficultyTable::standard().validate().is_ok());
    }

    #[test]
    fn exact_threshold_lookup() {
        let table = DifficultyTable::standard();
        assert_eq!(table.at_score(0).unwrap().label, "Baby");
        // No entry at 499: the caller retains the tier already in effect.
        assert!(table.at_score(499).is_none());
        assert_eq!(table.at_score(500).unwrap().label, "Easy");
        assert_eq!(table.at_score(6666).unwrap().label, "HELL");
    }

    #[test]
    fn tick_interval_converts_to_duration() {
        let table = DifficultyTable::standard();
        assert_eq!(table.at_score(0).unwrap().tick, Duration::from_millis(50));
        assert_eq!(
            table.at_score(500).unwrap().tick,
            Duration::from_millis(45)
        );
    }

    #[test]
    fn lookup_by_label_ignores_case() {
        let table = DifficultyTable::standard();
        assert_eq!(table.by_label("hell").unwrap().threshold, 6666);
        assert!(table.by_label("Nightmare").is_none());
    }

    #[test]
    fn table_without_score_zero_entry_is_rejected() {
        let table = DifficultyTable::new(vec![DifficultyTier::new(5, "Late", 0.05, 30)]);
        assert!(table.validate().is_err());
    }

    #[test]
    fn empty_table_is_rejected() {
        assert!(DifficultyTable::new(Vec::new()).validate().is_err());
    }

    #[test]
    fn duplicate_thresholds_are_rejected() {
        let table = DifficultyTable::new(vec![
            DifficultyTier::new(0, "A", 0.05, 30),
            DifficultyTier::new(0, "B", 0.04, 20),
        ]);
        assert!(table.validate().is_err());
    }

    #[test]
    fn tiers_are_sorted_on_construction() {
        let table = DifficultyTable::new(vec![
            DifficultyTier::new(100, "Later", 0.04, 20),
            DifficultyTier::new(0, "First", 0.05, 30),
        ]);
        assert!(table.validate().is_ok());
        assert_eq!(table.at_score(0).unwrap().label, "First");
    }
}

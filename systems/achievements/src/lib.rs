#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Lifetime statistics and achievement tracking for Snake Arcade.
//!
//! The system listens for [`Event::GameOver`], folds each [`GameSummary`] into
//! the running [`GameStats`], and unlocks catalogue entries whose metric has
//! reached its target. Every entry unlocks at most once.

use log::info;
use serde::{Deserialize, Serialize};
use snake_arcade_core::{Event, GameSummary};

/// Statistic an achievement is measured against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Metric {
    /// Best score of any game.
    Score,
    /// Longest snake of any game.
    Length,
    /// Highest level reached.
    Level,
    /// Foods eaten across all games.
    Foods,
    /// Special foods eaten across all games.
    SpecialFoods,
    /// Whole minutes of play across all games.
    MinutesPlayed,
    /// Longest combo streak.
    Combo,
    /// Number of finished games.
    GamesPlayed,
}

/// Static description of one achievement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AchievementDef {
    /// Display name, also used as the persistence key.
    pub name: &'static str,
    /// Short description of the goal.
    pub description: &'static str,
    /// Statistic the goal is measured against.
    pub metric: Metric,
    /// Value the statistic must reach.
    pub target: u64,
}

const fn def(
    name: &'static str,
    description: &'static str,
    metric: Metric,
    target: u64,
) -> AchievementDef {
    AchievementDef {
        name,
        description,
        metric,
        target,
    }
}

/// Every achievement in display order.
pub const CATALOGUE: [AchievementDef; 29] = [
    def("First Steps", "Score your first 100 points", Metric::Score, 100),
    def("Getting Good", "Reach 1,000 points", Metric::Score, 1_000),
    def("Snake Master", "Reach 5,000 points", Metric::Score, 5_000),
    def("Legend", "Reach 10,000 points", Metric::Score, 10_000),
    def("Godlike", "Reach 25,000 points", Metric::Score, 25_000),
    def("Growing Up", "Reach length of 10", Metric::Length, 10),
    def("Big Snake", "Reach length of 25", Metric::Length, 25),
    def("Huge Snake", "Reach length of 50", Metric::Length, 50),
    def("Colossal", "Reach length of 100", Metric::Length, 100),
    def("Leveling Up", "Reach level 5", Metric::Level, 5),
    def("Experienced", "Reach level 10", Metric::Level, 10),
    def("Expert", "Reach level 20", Metric::Level, 20),
    def("Unstoppable", "Reach level 50", Metric::Level, 50),
    def("Hungry", "Eat 50 foods", Metric::Foods, 50),
    def("Voracious", "Eat 200 foods", Metric::Foods, 200),
    def("Omnivore", "Eat 500 foods", Metric::Foods, 500),
    def("Foodie", "Eat 1000 foods", Metric::Foods, 1_000),
    def("Magic Taste", "Eat 10 special foods", Metric::SpecialFoods, 10),
    def("Power Hunter", "Eat 50 special foods", Metric::SpecialFoods, 50),
    def("Gourmet", "Eat 100 special foods", Metric::SpecialFoods, 100),
    def("Casual Player", "Play for 30 minutes", Metric::MinutesPlayed, 30),
    def("Dedicated", "Play for 2 hours", Metric::MinutesPlayed, 120),
    def("Addicted", "Play for 10 hours", Metric::MinutesPlayed, 600),
    def("Combo Starter", "Eat 5 foods in a combo", Metric::Combo, 5),
    def("Combo Master", "Eat 10 foods in a combo", Metric::Combo, 10),
    def("Combo God", "Eat 15 foods in a combo", Metric::Combo, 15),
    def("Persistent", "Play 10 games", Metric::GamesPlayed, 10),
    def("Determined", "Play 50 games", Metric::GamesPlayed, 50),
    def("Never Give Up", "Play 100 games", Metric::GamesPlayed, 100),
];

/// Aggregated statistics across every finished game.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameStats {
    /// Number of finished games.
    pub games_played: u64,
    /// Best score of any game.
    pub high_score: u64,
    /// Highest level reached.
    pub max_level: u64,
    /// Longest snake of any game.
    pub max_length: u64,
    /// Sum of all final scores.
    pub total_score: u64,
    /// Whole seconds of play across all games.
    pub total_seconds_played: u64,
    /// Foods eaten across all games.
    pub total_foods_eaten: u64,
    /// Special foods eaten across all games.
    pub special_foods_eaten: u64,
    /// Longest combo streak.
    pub max_combo: u64,
}

impl GameStats {
    /// Folds a finished game into the totals and maxima.
    pub fn record(&mut self, summary: &GameSummary) {
        self.games_played = self.games_played.saturating_add(1);
        self.total_score = self.total_score.saturating_add(summary.score);
        self.total_seconds_played = self
            .total_seconds_played
            .saturating_add(summary.duration.as_secs());
        self.total_foods_eaten = self
            .total_foods_eaten
            .saturating_add(u64::from(summary.foods_eaten));
        self.special_foods_eaten = self
            .special_foods_eaten
            .saturating_add(u64::from(summary.special_foods_eaten));

        self.high_score = self.high_score.max(summary.score);
        self.max_level = self.max_level.max(u64::from(summary.level));
        self.max_length = self
            .max_length
            .max(u64::try_from(summary.length).unwrap_or(u64::MAX));
        self.max_combo = self.max_combo.max(u64::from(summary.best_combo));
    }

    /// Current value of the provided metric.
    #[must_use]
    pub const fn metric(&self, metric: Metric) -> u64 {
        match metric {
            Metric::Score => self.high_score,
            Metric::Length => self.max_length,
            Metric::Level => self.max_level,
            Metric::Foods => self.total_foods_eaten,
            Metric::SpecialFoods => self.special_foods_eaten,
            Metric::MinutesPlayed => self.total_seconds_played / 60,
            Metric::Combo => self.max_combo,
            Metric::GamesPlayed => self.games_played,
        }
    }
}

/// Persisted progress of one achievement.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AchievementProgress {
    /// Name of the catalogue entry.
    pub name: String,
    /// Whether the achievement has been unlocked.
    pub unlocked: bool,
    /// Last observed value of the metric.
    pub progress: u64,
}

/// Notification that an achievement was just unlocked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AchievementUnlocked {
    /// Name of the unlocked achievement.
    pub name: &'static str,
    /// Description of the unlocked achievement.
    pub description: &'static str,
}

/// Read-only view pairing a catalogue entry with its progress.
#[derive(Clone, Copy, Debug)]
pub struct AchievementStatus<'a> {
    /// Catalogue entry.
    pub def: &'static AchievementDef,
    /// Progress recorded for the entry.
    pub progress: &'a AchievementProgress,
}

impl AchievementStatus<'_> {
    /// Completion in percent, capped at 100.
    #[must_use]
    pub fn percent(&self) -> f32 {
        if self.progress.unlocked || self.def.target == 0 {
            return 100.0;
        }
        let ratio = self.progress.progress as f64 / self.def.target as f64;
        (ratio * 100.0).min(100.0) as f32
    }
}

/// Pure system that aggregates statistics and unlocks achievements.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Achievements {
    stats: GameStats,
    progress: Vec<AchievementProgress>,
}

impl Achievements {
    /// Creates the system with empty statistics and nothing unlocked.
    #[must_use]
    pub fn new() -> Self {
        Self::restore(GameStats::default(), &[])
    }

    /// Restores previously persisted statistics and progress.
    ///
    /// Saved entries are matched by name; unknown names are ignored and missing
    /// entries start locked.
    #[must_use]
    pub fn restore(stats: GameStats, saved: &[AchievementProgress]) -> Self {
        let progress = CATALOGUE
            .iter()
            .map(|def| {
                saved
                    .iter()
                    .find(|entry| entry.name == def.name)
                    .cloned()
                    .unwrap_or_else(|| AchievementProgress {
                        name: def.name.to_owned(),
                        unlocked: false,
                        progress: 0,
                    })
            })
            .collect();
        Self { stats, progress }
    }

    /// Consumes world events and reports achievements unlocked by finished games.
    pub fn handle(&mut self, events: &[Event], out: &mut Vec<AchievementUnlocked>) {
        for event in events {
            if let Event::GameOver { summary } = event {
                self.stats.record(summary);
                self.evaluate(out);
            }
        }
    }

    fn evaluate(&mut self, out: &mut Vec<AchievementUnlocked>) {
        for (def, entry) in CATALOGUE.iter().zip(self.progress.iter_mut()) {
            entry.progress = self.stats.metric(def.metric);
            if !entry.unlocked && entry.progress >= def.target {
                entry.unlocked = true;
                info!("achievement unlocked: {} ({})", def.name, def.description);
                out.push(AchievementUnlocked {
                    name: def.name,
                    description: def.description,
                });
            }
        }
    }

    /// Aggregated statistics.
    #[must_use]
    pub const fn stats(&self) -> &GameStats {
        &self.stats
    }

    /// Progress of every achievement in catalogue order.
    #[must_use]
    pub fn progress(&self) -> &[AchievementProgress] {
        &self.progress
    }

    /// Iterates catalogue entries alongside their progress.
    pub fn statuses(&self) -> impl Iterator<Item = AchievementStatus<'_>> {
        CATALOGUE
            .iter()
            .zip(self.progress.iter())
            .map(|(def, progress)| AchievementStatus { def, progress })
    }

    /// Number of unlocked achievements.
    #[must_use]
    pub fn unlocked_count(&self) -> usize {
        self.progress.iter().filter(|entry| entry.unlocked).count()
    }
}

impl Default for Achievements {
    fn default() -> Self {
        Self::new()
    }
}

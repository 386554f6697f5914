//! Timed power-ups and the combo streak.

use std::time::Duration;

use snake_arcade_core::{
    PowerUpKind, PowerUpSnapshot, PowerUpStatus, COMBO_TIMEOUT, MAX_COMBO_MULTIPLIER,
};

const FOODS_PER_COMBO_STEP: u32 = 3;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Timer {
    active: bool,
    expires_at: Duration,
}

/// Active power-ups plus the combo streak that scales points.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PowerUps {
    timers: [Timer; 3],
    combo_count: u32,
    combo_multiplier: u32,
    best_combo: u32,
    last_food_at: Duration,
}

impl PowerUps {
    /// Creates a state with no power-ups and no streak.
    #[must_use]
    pub fn new(now: Duration) -> Self {
        Self {
            timers: [Timer::default(); 3],
            combo_count: 0,
            combo_multiplier: 1,
            best_combo: 0,
            last_food_at: now,
        }
    }

    /// Clears every flag and the streak for a new game.
    pub fn reset(&mut self, now: Duration) {
        *self = Self::new(now);
    }

    /// Expires lapsed power-ups and breaks a stale streak.
    ///
    /// Kinds that expired during this call are appended to `expired`. Calling
    /// twice with the same `now` changes nothing the second time.
    pub fn update(&mut self, now: Duration, expired: &mut Vec<PowerUpKind>) {
        for kind in PowerUpKind::ALL {
            let timer = &mut self.timers[slot(kind)];
            if timer.active && now >= timer.expires_at {
                timer.active = false;
                expired.push(kind);
            }
        }

        if now.saturating_sub(self.last_food_at) > COMBO_TIMEOUT {
            self.combo_count = 0;
            self.combo_multiplier = 1;
        }
    }

    /// Extends the streak with a food eaten at `now`.
    pub fn register_food_eaten(&mut self, now: Duration) {
        self.combo_count = self.combo_count.saturating_add(1);
        self.combo_multiplier =
            (1 + self.combo_count / FOODS_PER_COMBO_STEP).min(MAX_COMBO_MULTIPLIER);
        self.best_combo = self.best_combo.max(self.combo_count);
        self.last_food_at = now;
    }

    /// Turns on `kind`, replacing any running expiry, and returns the new expiry.
    pub fn activate(&mut self, kind: PowerUpKind, now: Duration) -> Duration {
        let expires_at = now.saturating_add(kind.duration());
        self.timers[slot(kind)] = Timer {
            active: true,
            expires_at,
        };
        expires_at
    }

    /// Whether `kind` is active.
    #[must_use]
    pub fn is_active(&self, kind: PowerUpKind) -> bool {
        self.timers[slot(kind)].active
    }

    /// Combo multiplier, doubled while double score is active.
    #[must_use]
    pub fn score_multiplier(&self) -> u32 {
        if self.is_active(PowerUpKind::DoubleScore) {
            self.combo_multiplier * 2
        } else {
            self.combo_multiplier
        }
    }

    /// Foods eaten in the current streak.
    #[must_use]
    pub const fn combo_count(&self) -> u32 {
        self.combo_count
    }

    /// Multiplier derived from the current streak.
    #[must_use]
    pub const fn combo_multiplier(&self) -> u32 {
        self.combo_multiplier
    }

    /// Longest streak since the last reset.
    #[must_use]
    pub const fn best_combo(&self) -> u32 {
        self.best_combo
    }

    /// Captures the state, measuring remaining time against `now`.
    #[must_use]
    pub fn snapshot(&self, now: Duration) -> PowerUpSnapshot {
        let statuses = PowerUpKind::ALL.map(|kind| {
            let timer = self.timers[slot(kind)];
            PowerUpStatus {
                kind,
                active: timer.active,
                remaining: if timer.active {
                    timer.expires_at.saturating_sub(now)
                } else {
                    Duration::ZERO
                },
            }
        });
        PowerUpSnapshot {
            statuses,
            combo_count: self.combo_count,
            combo_multiplier: self.combo_multiplier,
            score_multiplier: self.score_multiplier(),
        }
    }
}

impl Default for PowerUps {
    fn default() -> Self {
        Self::new(Duration::ZERO)
    }
}

const fn slot(kind: PowerUpKind) -> usize {
    match kind {
        PowerUpKind::Speed => 0,
        PowerUpKind::DoubleScore => 1,
        PowerUpKind::Phase => 2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn combo_multiplier_steps_every_three_foods_and_caps() {
        let mut power_ups = PowerUps::new(Duration::ZERO);
        let mut multipliers = Vec::new();
        for index in 0..16 {
            power_ups.register_food_eaten(ms(100 * index));
            multipliers.push(power_ups.combo_multiplier());
        }
        assert_eq!(
            multipliers,
            vec![1, 1, 2, 2, 2, 3, 3, 3, 4, 4, 4, 5, 5, 5, 5, 5]
        );
        assert_eq!(power_ups.best_combo(), 16);
    }

    #[test]
    fn stale_streak_resets_after_timeout() {
        let mut power_ups = PowerUps::new(Duration::ZERO);
        for _ in 0..4 {
            power_ups.register_food_eaten(ms(1_000));
        }
        let mut expired = Vec::new();

        power_ups.update(ms(4_000), &mut expired);
        assert_eq!(power_ups.combo_count(), 4);

        power_ups.update(ms(4_001), &mut expired);
        assert_eq!(power_ups.combo_count(), 0);
        assert_eq!(power_ups.combo_multiplier(), 1);
        assert_eq!(power_ups.best_combo(), 4);
        assert!(expired.is_empty());
    }

    #[test]
    fn double_score_doubles_multiplier_until_expiry() {
        let mut power_ups = PowerUps::new(Duration::ZERO);
        assert_eq!(
            power_ups.activate(PowerUpKind::DoubleScore, ms(1_000)),
            ms(6_000)
        );
        assert_eq!(power_ups.score_multiplier(), 2);

        let mut expired = Vec::new();
        power_ups.update(ms(5_999), &mut expired);
        assert!(power_ups.is_active(PowerUpKind::DoubleScore));
        power_ups.update(ms(6_000), &mut expired);
        assert!(!power_ups.is_active(PowerUpKind::DoubleScore));
        assert_eq!(expired, vec![PowerUpKind::DoubleScore]);
        assert_eq!(power_ups.score_multiplier(), 1);
    }

    #[test]
    fn snapshot_reports_remaining_time() {
        let mut power_ups = PowerUps::new(Duration::ZERO);
        let _ = power_ups.activate(PowerUpKind::Phase, ms(500));
        let snapshot = power_ups.snapshot(ms(1_500));
        assert!(snapshot.is_active(PowerUpKind::Phase));
        assert_eq!(snapshot.statuses[2].remaining, ms(3_000));
        assert_eq!(snapshot.statuses[0].remaining, Duration::ZERO);
    }
}

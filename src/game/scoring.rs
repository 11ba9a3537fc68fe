use crate::consts;
use std::time::Duration;

/// The current score and the level derived from it
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Scoreboard {
    score: u32,
    level: u32,
}

impl Scoreboard {
    pub(crate) fn new() -> Scoreboard {
        Scoreboard { score: 0, level: 1 }
    }

    pub(crate) fn score(&self) -> u32 {
        self.score
    }

    pub(crate) fn level(&self) -> u32 {
        self.level
    }

    /// Add `points` to the score.  If this raises the level, the new level is
    /// returned.
    pub(crate) fn add_points(&mut self, points: u32) -> Option<u32> {
        self.score = self.score.saturating_add(points);
        let level = level_for_score(self.score);
        (level > self.level).then(|| {
            self.level = level;
            level
        })
    }

    #[cfg(test)]
    pub(crate) fn with_score(score: u32) -> Scoreboard {
        Scoreboard {
            score,
            level: level_for_score(score),
        }
    }
}

impl Default for Scoreboard {
    fn default() -> Scoreboard {
        Scoreboard::new()
    }
}

pub(crate) fn level_for_score(score: u32) -> u32 {
    score / consts::POINTS_PER_LEVEL + 1
}

/// Compute the time between ticks at `level` for a difficulty whose first
/// level ticks every `base`
pub(crate) fn tick_interval(base: Duration, level: u32) -> Duration {
    let speedup = consts::SPEEDUP_PER_LEVEL.saturating_mul(level.saturating_sub(1));
    base.saturating_sub(speedup).max(consts::MIN_TICK_INTERVAL)
}

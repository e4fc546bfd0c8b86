use crate::info_log;
use crate::storage::KeyValueStore;

pub const SCORE_KEY: &str = "score";
pub const STREAK_KEY: &str = "streak";

/// Points for any win, on top of one point per life left.
pub const WIN_BONUS: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreTracker {
    score: u32,
    streak: u32,
}

impl ScoreTracker {
    pub fn new(score: u32, streak: u32) -> Self {
        Self { score, streak }
    }

    /// Read persisted totals. Missing or malformed values count as zero.
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        Self {
            score: read_count(store, SCORE_KEY),
            streak: read_count(store, STREAK_KEY),
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn record_win<S: KeyValueStore + ?Sized>(&mut self, lives_remaining: u32, store: &mut S) {
        self.score = self
            .score
            .saturating_add(WIN_BONUS.saturating_add(lives_remaining));
        self.streak = self.streak.saturating_add(1);
        info_log!("Win recorded: score={} streak={}", self.score, self.streak);
        self.persist(store);
    }

    pub fn record_loss<S: KeyValueStore + ?Sized>(&mut self, store: &mut S) {
        self.streak = 0;
        info_log!("Loss recorded: score={} streak reset", self.score);
        self.persist(store);
    }

    /// Write both fields. Failures are logged and otherwise ignored so play can continue.
    pub fn persist<S: KeyValueStore + ?Sized>(&self, store: &mut S) {
        for (key, value) in [(SCORE_KEY, self.score), (STREAK_KEY, self.streak)] {
            if let Err(e) = store.set(key, &value.to_string()) {
                log::warn!("Failed to save {key}: {e}");
            }
        }
    }
}

fn read_count<S: KeyValueStore + ?Sized>(store: &S, key: &str) -> u32 {
    match store.get(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            log::debug!("Ignoring stored {key}={raw:?}");
            0
        }),
        None => 0,
    }
}

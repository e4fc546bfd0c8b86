//! Round lifecycle: word selection, guess dispatch, and score bookkeeping.

use crate::difficulty::Difficulty;
use crate::error::{GameError, Result};
use crate::guess::{GuessResult, GuessState, RoundStatus};
use crate::score::ScoreTracker;
use crate::storage::KeyValueStore;
use crate::theme::Theme;
use crate::wordbank::{CategoryFilter, WordBank, WordEntry};
use crate::{debug_log, info_log};
use rand::Rng;

/// What a guess did to the current round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundOutcome {
    pub result: GuessResult,
    /// True only for the guess that moved the round into `Won` or `Lost`.
    pub just_finished: bool,
    /// The secret word, once the round is over.
    pub revealed_word: Option<String>,
    pub snapshot: GuessState,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuessOutcome {
    Applied(RoundOutcome),
    /// Input is frozen; the guess was dropped.
    Suppressed,
}

/// Everything the presentation layer needs to redraw.
#[derive(Debug, Clone, Copy)]
pub struct GameView<'a> {
    pub round: Option<&'a GuessState>,
    /// Category of the current secret word.
    pub word_category: Option<&'a str>,
    pub score: ScoreTracker,
    pub filter: &'a CategoryFilter,
    pub difficulty: Difficulty,
    pub theme: Theme,
    pub categories: &'a [String],
    pub frozen: bool,
}

#[derive(Debug)]
struct Round {
    state: GuessState,
    category: String,
}

pub struct RoundController<S: KeyValueStore> {
    bank: WordBank,
    store: S,
    score: ScoreTracker,
    theme: Theme,
    round: Option<Round>,
    filter: CategoryFilter,
    difficulty: Difficulty,
    frozen: bool,
}

impl<S: KeyValueStore> RoundController<S> {
    /// Load score, streak, and theme from `store`. No round is started yet.
    pub fn new(bank: WordBank, store: S) -> Self {
        let score = ScoreTracker::load(&store);
        let theme = Theme::load(&store);
        info_log!(
            "Controller ready: {} words, score={} streak={} theme={}",
            bank.len(),
            score.score(),
            score.streak(),
            theme
        );
        Self {
            bank,
            store,
            score,
            theme,
            round: None,
            filter: CategoryFilter::All,
            difficulty: Difficulty::Normal,
            frozen: false,
        }
    }

    pub fn start_round(
        &mut self,
        filter: CategoryFilter,
        difficulty: Difficulty,
    ) -> Result<(&GuessState, u32)> {
        self.start_round_with_rng(filter, difficulty, &mut rand::rng())
    }

    /// Replace the current round with a fresh one. On error the previous round and settings stay.
    pub fn start_round_with_rng<R: Rng + ?Sized>(
        &mut self,
        filter: CategoryFilter,
        difficulty: Difficulty,
        rng: &mut R,
    ) -> Result<(&GuessState, u32)> {
        let lives = difficulty.lives();
        let entry = self.bank.select_random(&filter, rng)?;
        info_log!(
            "Starting round: filter={} difficulty={} lives={} length={}",
            filter,
            difficulty,
            lives,
            entry.word().len()
        );
        let round = Round {
            state: GuessState::new(entry.word(), lives),
            category: entry.category().to_string(),
        };
        self.filter = filter;
        self.difficulty = difficulty;
        let round = self.round.insert(round);
        Ok((&round.state, lives))
    }

    /// New round with the current filter and difficulty.
    pub fn new_round(&mut self) -> Result<(&GuessState, u32)> {
        self.start_round(self.filter.clone(), self.difficulty)
    }

    /// Switch category filter and start a new round.
    pub fn set_category(&mut self, name: &str) -> Result<(&GuessState, u32)> {
        let filter = self.resolve_filter(name);
        self.start_round(filter, self.difficulty)
    }

    /// Switch difficulty and start a new round.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) -> Result<(&GuessState, u32)> {
        self.start_round(self.filter.clone(), difficulty)
    }

    /// Map a user-supplied name onto a filter, matching known categories case-insensitively.
    pub fn resolve_filter(&self, name: &str) -> CategoryFilter {
        match CategoryFilter::parse(name) {
            CategoryFilter::All => CategoryFilter::All,
            CategoryFilter::Category(raw) => match self.bank.resolve_category(&raw) {
                Some(known) => CategoryFilter::Category(known.to_string()),
                None => CategoryFilter::Category(raw),
            },
        }
    }

    pub fn submit_guess(&mut self, letter: char) -> Result<GuessOutcome> {
        if self.frozen {
            debug_log!("Input frozen, dropping guess '{}'", letter);
            return Ok(GuessOutcome::Suppressed);
        }
        if !letter.is_ascii_alphabetic() {
            return Err(GameError::InvalidLetter(letter));
        }
        let round = self.round.as_mut().ok_or(GameError::NoActiveRound)?;
        let state = &mut round.state;

        let was_terminal = state.is_terminal();
        let result = state.apply_guess(letter);
        debug_log!("Guess '{}' -> {:?}", letter, result);

        let just_finished = !was_terminal && result.status.is_terminal();
        if just_finished {
            match result.status {
                RoundStatus::Won => self
                    .score
                    .record_win(state.lives_remaining(), &mut self.store),
                RoundStatus::Lost => self.score.record_loss(&mut self.store),
                RoundStatus::InProgress => {}
            }
        }

        Ok(GuessOutcome::Applied(RoundOutcome {
            result,
            just_finished,
            revealed_word: state
                .is_terminal()
                .then(|| state.secret_word().to_string()),
            snapshot: state.clone(),
        }))
    }

    /// Validate and add a custom word. Its category becomes available as a filter.
    pub fn add_word(&mut self, word: &str, category: &str) -> Result<WordEntry> {
        let entry = self.bank.add_entry(word, category)?;
        Ok(entry)
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.theme.persist(&mut self.store);
        self.theme
    }

    pub fn set_frozen(&mut self, frozen: bool) {
        self.frozen = frozen;
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub fn round(&self) -> Option<&GuessState> {
        self.round.as_ref().map(|r| &r.state)
    }

    pub fn score(&self) -> ScoreTracker {
        self.score
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn filter(&self) -> &CategoryFilter {
        &self.filter
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn word_bank(&self) -> &WordBank {
        &self.bank
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn view(&self) -> GameView<'_> {
        GameView {
            round: self.round(),
            word_category: self.round.as_ref().map(|r| r.category.as_str()),
            score: self.score,
            filter: &self.filter,
            difficulty: self.difficulty,
            theme: self.theme,
            categories: self.bank.categories(),
            frozen: self.frozen,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guess::LetterResult;
    use crate::score::{SCORE_KEY, STREAK_KEY};
    use crate::storage::MemoryStore;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn controller_with(words: &[(&str, &str)]) -> RoundController<MemoryStore> {
        let mut bank = WordBank::new();
        for (word, category) in words {
            bank.add_entry(word, category).unwrap();
        }
        RoundController::new(bank, MemoryStore::new())
    }

    fn applied(outcome: GuessOutcome) -> RoundOutcome {
        match outcome {
            GuessOutcome::Applied(outcome) => outcome,
            GuessOutcome::Suppressed => panic!("Expected guess to be applied"),
        }
    }

    #[test]
    fn test_start_round_uses_difficulty_budget() {
        let mut controller = controller_with(&[("cat", "Animals")]);
        let (state, lives) = controller
            .start_round(CategoryFilter::All, Difficulty::Hard)
            .unwrap();
        assert_eq!(lives, 4);
        assert_eq!(state.lives_remaining(), 4);
        assert_eq!(state.secret_word(), "cat");
        assert_eq!(controller.difficulty(), Difficulty::Hard);
        assert_eq!(controller.view().word_category, Some("Animals"));
    }

    #[test]
    fn test_win_scores_ten_plus_lives() {
        let mut controller = controller_with(&[("cat", "Animals")]);
        controller
            .start_round(CategoryFilter::All, Difficulty::Normal)
            .unwrap();

        let first = applied(controller.submit_guess('c').unwrap());
        assert!(!first.just_finished);
        assert_eq!(first.revealed_word, None);
        applied(controller.submit_guess('a').unwrap());
        let last = applied(controller.submit_guess('t').unwrap());

        assert!(last.just_finished);
        assert_eq!(last.result.status, RoundStatus::Won);
        assert_eq!(last.revealed_word.as_deref(), Some("cat"));
        assert_eq!(controller.score().score(), 16);
        assert_eq!(controller.score().streak(), 1);
        assert_eq!(controller.store().get(SCORE_KEY).as_deref(), Some("16"));
    }

    #[test]
    fn test_loss_on_extreme_resets_streak() {
        let mut store = MemoryStore::new();
        store.set(SCORE_KEY, "30").unwrap();
        store.set(STREAK_KEY, "3").unwrap();
        let mut bank = WordBank::new();
        bank.add_entry("dog", "Animals").unwrap();
        let mut controller = RoundController::new(bank, store);

        controller
            .start_round(CategoryFilter::All, Difficulty::Extreme)
            .unwrap();
        applied(controller.submit_guess('x').unwrap());
        applied(controller.submit_guess('y').unwrap());
        let outcome = applied(controller.submit_guess('z').unwrap());

        assert!(outcome.just_finished);
        assert_eq!(outcome.snapshot.lives_remaining(), 0);
        assert_eq!(outcome.result.status, RoundStatus::Lost);
        assert_eq!(outcome.revealed_word.as_deref(), Some("dog"));
        assert_eq!(controller.score().streak(), 0);
        assert_eq!(controller.score().score(), 30);
        assert_eq!(controller.store().get(STREAK_KEY).as_deref(), Some("0"));
    }

    #[test]
    fn test_guesses_after_terminal_do_not_recount() {
        let mut controller = controller_with(&[("ox", "Animals")]);
        controller
            .start_round(CategoryFilter::All, Difficulty::Normal)
            .unwrap();
        applied(controller.submit_guess('o').unwrap());
        applied(controller.submit_guess('x').unwrap());
        assert_eq!(controller.score().score(), 16);

        for c in ['a', 'o', 'x', 'q'] {
            let outcome = applied(controller.submit_guess(c).unwrap());
            assert!(!outcome.just_finished);
            assert_eq!(outcome.result.letter, LetterResult::AlreadyGuessed);
            assert_eq!(outcome.revealed_word.as_deref(), Some("ox"));
        }
        assert_eq!(controller.score().score(), 16);
        assert_eq!(controller.score().streak(), 1);
    }

    #[test]
    fn test_new_round_discards_previous_state() {
        let mut controller = controller_with(&[("cat", "Animals")]);
        controller
            .start_round(CategoryFilter::All, Difficulty::Easy)
            .unwrap();
        applied(controller.submit_guess('z').unwrap());
        applied(controller.submit_guess('c').unwrap());

        let (state, lives) = controller.new_round().unwrap();
        assert_eq!(lives, 8);
        assert_eq!(state.lives_remaining(), 8);
        assert!(state.guessed_wrong().is_empty());
        assert!(state.guessed_correct().is_empty());
        // Abandoning a round is not a loss
        assert_eq!(controller.score(), ScoreTracker::new(0, 0));
    }

    #[test]
    fn test_guess_without_round() {
        let mut controller = controller_with(&[("cat", "Animals")]);
        assert!(matches!(
            controller.submit_guess('a'),
            Err(GameError::NoActiveRound)
        ));
    }

    #[test]
    fn test_invalid_letter_rejected() {
        let mut controller = controller_with(&[("cat", "Animals")]);
        controller.new_round().unwrap();
        assert!(matches!(
            controller.submit_guess('7'),
            Err(GameError::InvalidLetter('7'))
        ));
        assert!(controller.round().unwrap().guessed_wrong().is_empty());
    }

    #[test]
    fn test_uppercase_guess_accepted() {
        let mut controller = controller_with(&[("cat", "Animals")]);
        controller.new_round().unwrap();
        let outcome = applied(controller.submit_guess('C').unwrap());
        assert_eq!(outcome.result.letter, LetterResult::Correct);
    }

    #[test]
    fn test_frozen_input_is_dropped() {
        let mut controller = controller_with(&[("cat", "Animals")]);
        controller.new_round().unwrap();
        controller.set_frozen(true);
        assert!(controller.is_frozen());
        assert_eq!(
            controller.submit_guess('z').unwrap(),
            GuessOutcome::Suppressed
        );

        controller.set_frozen(false);
        let state = controller.round().unwrap();
        assert_eq!(state.lives_remaining(), 6);
        assert!(state.guessed_wrong().is_empty());

        // Dropped, not deferred
        let outcome = applied(controller.submit_guess('z').unwrap());
        assert_eq!(outcome.result.letter, LetterResult::Incorrect);
    }

    #[test]
    fn test_empty_category_surfaces_error() {
        let mut controller = controller_with(&[("cat", "Animals")]);
        controller
            .start_round(CategoryFilter::All, Difficulty::Normal)
            .unwrap();
        applied(controller.submit_guess('c').unwrap());

        let err = controller.set_category("Sports").unwrap_err();
        assert!(matches!(err, GameError::EmptyPool(_)));
        // Previous round and filter survive
        assert_eq!(controller.filter(), &CategoryFilter::All);
        assert!(controller.round().unwrap().guessed_correct().contains(&'c'));
    }

    #[test]
    fn test_set_category_resolves_case() {
        let mut controller = controller_with(&[("cat", "Animals"), ("rust", "Languages")]);
        let (state, _) = controller.set_category("languages").unwrap();
        assert_eq!(state.secret_word(), "rust");
        assert_eq!(
            controller.filter(),
            &CategoryFilter::Category("Languages".to_string())
        );
    }

    #[test]
    fn test_set_difficulty_restarts() {
        let mut controller = controller_with(&[("cat", "Animals")]);
        controller.new_round().unwrap();
        applied(controller.submit_guess('q').unwrap());
        let (state, lives) = controller.set_difficulty(Difficulty::Extreme).unwrap();
        assert_eq!(lives, 3);
        assert!(state.guessed_wrong().is_empty());
    }

    #[test]
    fn test_add_word_registers_category() {
        let mut controller = controller_with(&[("cat", "Animals")]);
        let entry = controller.add_word("HI", "").unwrap();
        assert_eq!(entry.word(), "hi");
        assert!(controller.view().categories.contains(&"Custom".to_string()));

        let (state, _) = controller.set_category("Custom").unwrap();
        assert_eq!(state.secret_word(), "hi");
    }

    #[test]
    fn test_add_word_validation_error() {
        let mut controller = controller_with(&[("cat", "Animals")]);
        let err = controller.add_word("a1b", "Test").unwrap_err();
        assert!(matches!(err, GameError::Validation(_)));
        assert_eq!(controller.word_bank().len(), 1);
    }

    #[test]
    fn test_toggle_theme_persists() {
        let mut controller = controller_with(&[("cat", "Animals")]);
        assert_eq!(controller.theme(), Theme::Dark);
        assert_eq!(controller.toggle_theme(), Theme::Light);
        assert_eq!(controller.store().get("theme").as_deref(), Some("light"));
        assert_eq!(controller.toggle_theme(), Theme::Dark);
    }

    #[test]
    fn test_seeded_selection_stays_in_filter() {
        let mut controller = controller_with(&[
            ("cat", "Animals"),
            ("dog", "Animals"),
            ("rust", "Languages"),
        ]);
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..20 {
            let (state, _) = controller
                .start_round_with_rng(
                    CategoryFilter::Category("Animals".to_string()),
                    Difficulty::Normal,
                    &mut rng,
                )
                .unwrap();
            assert_ne!(state.secret_word(), "rust");
        }
    }

    #[test]
    fn test_loads_persisted_score() {
        let mut store = MemoryStore::new();
        store.set(SCORE_KEY, "NaN").unwrap();
        store.set(STREAK_KEY, "5").unwrap();
        store.set("theme", "light").unwrap();
        let controller = RoundController::new(WordBank::with_defaults(), store);
        assert_eq!(controller.score(), ScoreTracker::new(0, 5));
        assert_eq!(controller.theme(), Theme::Light);
    }
}

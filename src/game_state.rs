use crate::difficulty::Difficulty;
use crate::error::{GameError, Result};
use crate::round::{GameView, GuessOutcome, RoundController, RoundOutcome};
use crate::storage::KeyValueStore;
use crate::wordbank::WordEntry;
use crate::{debug_log, info_log};

/// Input events the presentation layer feeds into the game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    Guess(char),
    NewRound,
    SetCategory(String),
    SetDifficulty(Difficulty),
    AddWord { word: String, category: String },
    ToggleTheme,
    /// The word form gained (`true`) or lost (`false`) focus.
    SetFrozen(bool),
    Exit,
}

/// Presentation layer contract. The game loop calls `render` after every state change.
pub trait GameInterface {
    fn render(&mut self, view: &GameView<'_>);
    /// `None` means the input was unusable and the loop should ask again.
    fn read_action(&mut self) -> Option<UserAction>;
    fn display_round_over(&mut self, outcome: &RoundOutcome);
    fn display_word_added(&mut self, entry: &WordEntry);
    fn display_error(&mut self, error: &GameError);
    fn display_exit_message(&mut self);
}

/// Drive rounds until the interface asks to exit.
///
/// Starts a round first if none is active; failing to do so is the only error returned.
/// Errors from later actions are shown through the interface and play continues.
pub fn game_loop<S, I>(controller: &mut RoundController<S>, interface: &mut I) -> Result<()>
where
    S: KeyValueStore,
    I: GameInterface + ?Sized,
{
    if controller.round().is_none() {
        controller.new_round()?;
    }
    interface.render(&controller.view());

    loop {
        let Some(action) = interface.read_action() else {
            continue;
        };
        debug_log!("game_loop() - action: {:?}", action);

        match action {
            UserAction::Exit => {
                info_log!("game_loop() - exiting");
                interface.display_exit_message();
                break;
            }
            UserAction::Guess(letter) => match controller.submit_guess(letter) {
                Ok(GuessOutcome::Applied(outcome)) => {
                    if outcome.just_finished {
                        interface.display_round_over(&outcome);
                    }
                    interface.render(&controller.view());
                }
                Ok(GuessOutcome::Suppressed) => {}
                Err(e) => interface.display_error(&e),
            },
            UserAction::NewRound => {
                let started = controller.new_round().map(|_| ());
                show_restart(controller, interface, started);
            }
            UserAction::SetCategory(name) => {
                let started = controller.set_category(&name).map(|_| ());
                show_restart(controller, interface, started);
            }
            UserAction::SetDifficulty(difficulty) => {
                let started = controller.set_difficulty(difficulty).map(|_| ());
                show_restart(controller, interface, started);
            }
            UserAction::AddWord { word, category } => {
                match controller.add_word(&word, &category) {
                    Ok(entry) => interface.display_word_added(&entry),
                    Err(e) => interface.display_error(&e),
                }
            }
            UserAction::ToggleTheme => {
                controller.toggle_theme();
                interface.render(&controller.view());
            }
            UserAction::SetFrozen(frozen) => controller.set_frozen(frozen),
        }
    }

    Ok(())
}

fn show_restart<S, I>(controller: &RoundController<S>, interface: &mut I, started: Result<()>)
where
    S: KeyValueStore,
    I: GameInterface + ?Sized,
{
    match started {
        Ok(()) => interface.render(&controller.view()),
        Err(e) => interface.display_error(&e),
    }
}

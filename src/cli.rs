use crate::difficulty::Difficulty;
use crate::error::GameError;
use crate::game_state::{GameInterface, UserAction};
use crate::guess::{GuessState, RoundStatus};
use crate::round::{GameView, RoundOutcome};
use crate::wordbank::WordEntry;
use clap::Parser;
use std::io::BufRead;
use std::path::PathBuf;

/// Hangman CLI options
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to an extra word list (`word,category` per line)
    #[arg(short = 'i', long = "input")]
    pub wordbank_path: Option<String>,

    /// Category to draw words from, or "all"
    #[arg(short = 'c', long = "category", default_value = "all")]
    pub category: String,

    /// easy, normal, hard or extreme (anything else plays as normal)
    #[arg(short = 'd', long = "difficulty", default_value = "normal")]
    pub difficulty: String,

    /// Where score, streak and theme are saved
    #[arg(short = 's', long = "state-file")]
    pub state_file: Option<PathBuf>,
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

const HELP_TEXT: &str = "\
Commands:
  <letter>                guess a letter
  new                     start a new round (ENTER also works once a round is over)
  category <name|all>     switch category
  difficulty <level>      easy, normal, hard or extreme
  add <word> [category]   add a custom word
  theme                   toggle light/dark theme
  help                    show this help
  exit                    quit";

/// Parse one line of input into an action. `round_over` lets a bare ENTER start the next round.
pub fn parse_action(line: &str, round_over: bool) -> Option<UserAction> {
    let line = line.trim();
    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    let mut chars = command.chars();
    if let (Some(letter), None) = (chars.next(), chars.next())
        && rest.is_empty()
    {
        return Some(UserAction::Guess(letter));
    }

    match command.to_ascii_lowercase().as_str() {
        "" if round_over => Some(UserAction::NewRound),
        "" => None,
        "exit" | "quit" => Some(UserAction::Exit),
        "new" | "next" => Some(UserAction::NewRound),
        "theme" => Some(UserAction::ToggleTheme),
        "category" if !rest.is_empty() => Some(UserAction::SetCategory(rest.to_string())),
        "difficulty" if !rest.is_empty() => {
            Some(UserAction::SetDifficulty(Difficulty::from_name(rest)))
        }
        "add" if !rest.is_empty() => {
            let (word, category) = rest
                .split_once(char::is_whitespace)
                .map_or((rest, ""), |(w, c)| (w, c.trim()));
            Some(UserAction::AddWord {
                word: word.to_string(),
                category: category.to_string(),
            })
        }
        "help" => {
            println!("{HELP_TEXT}");
            None
        }
        _ => {
            println!("Unknown command '{line}'. Type 'help' for a list of commands.");
            None
        }
    }
}

/// `C _ T` style word mask.
pub fn format_word(state: &GuessState) -> String {
    let mask = state.masked_word().to_ascii_uppercase();
    let letters: Vec<String> = mask.chars().map(String::from).collect();
    letters.join(" ")
}

pub fn format_wrong_letters(state: &GuessState) -> String {
    if state.guessed_wrong().is_empty() {
        return String::new();
    }
    let letters: Vec<String> = state
        .guessed_wrong()
        .iter()
        .map(|c| c.to_ascii_uppercase().to_string())
        .collect();
    format!("Wrong: {}", letters.join(" "))
}

pub fn format_status_line(view: &GameView<'_>) -> String {
    let lives = view.round.map_or(0, GuessState::lives_remaining);
    let category = view.word_category.unwrap_or("-");
    format!(
        "Category: {category} | Filter: {} | Difficulty: {} | Lives: {lives} | Score: {} | Streak: {}",
        view.filter,
        view.difficulty,
        view.score.score(),
        view.score.streak()
    )
}

pub fn format_round_over(outcome: &RoundOutcome) -> String {
    let headline = match outcome.result.status {
        RoundStatus::Won => "You win!",
        RoundStatus::Lost => "You lost",
        RoundStatus::InProgress => "Guess the word",
    };
    match &outcome.revealed_word {
        Some(word) => format!("{headline} The word was \"{}\"", word.to_ascii_uppercase()),
        None => headline.to_string(),
    }
}

/// CLI implementation of the GameInterface trait
/// This struct wraps a BufRead reader and implements the game interface for CLI interaction
pub struct CliInterface<R: BufRead> {
    reader: R,
    round_over: bool,
}

impl<R: BufRead> CliInterface<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            round_over: false,
        }
    }
}

impl<R: BufRead> GameInterface for CliInterface<R> {
    fn render(&mut self, view: &GameView<'_>) {
        self.round_over = view.round.is_some_and(GuessState::is_terminal);
        println!();
        println!("{}", format_status_line(view));
        if let Some(state) = view.round {
            println!("Word: {}", format_word(state));
            let wrong = format_wrong_letters(state);
            if !wrong.is_empty() {
                println!("{wrong}");
            }
        }
        if self.round_over {
            println!("Press ENTER or type 'new' for another round.");
        }
    }

    fn read_action(&mut self) -> Option<UserAction> {
        println!("\nGuess a letter (or 'help' for commands):");
        let mut input = String::new();
        match self.reader.read_line(&mut input) {
            // End of input
            Ok(0) => Some(UserAction::Exit),
            Ok(_) => parse_action(&input, self.round_over),
            Err(e) => {
                log::warn!("Failed to read input: {e}");
                Some(UserAction::Exit)
            }
        }
    }

    fn display_round_over(&mut self, outcome: &RoundOutcome) {
        println!("{}", format_round_over(outcome));
    }

    fn display_word_added(&mut self, entry: &WordEntry) {
        println!(
            "Added \"{}\" to category {}.",
            entry.word().to_ascii_uppercase(),
            entry.category()
        );
    }

    fn display_error(&mut self, error: &GameError) {
        println!("{error}");
    }

    fn display_exit_message(&mut self) {
        println!("Exiting.");
    }
}

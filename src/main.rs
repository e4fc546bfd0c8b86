use hangman::cli::{CliInterface, Cli, parse_cli};
use hangman::storage::get_state_path;
use hangman::{
    Difficulty, FileStore, KeyValueStore, MemoryStore, RoundController, WordBank, game_loop,
    logging,
};
use std::io;

fn main() {
    logging::init();
    let cli = parse_cli();

    let mut bank = WordBank::with_defaults();
    if let Some(path) = &cli.wordbank_path {
        match bank.extend_from_file(path) {
            Ok(added) => println!("Loaded {added} extra words from '{path}'."),
            Err(e) => {
                eprintln!("Failed to load word list from '{path}': {e}");
                return;
            }
        }
    }

    match cli.state_file.clone().or_else(get_state_path) {
        Some(path) => run(&cli, bank, FileStore::open(path)),
        None => {
            log::warn!("No data directory available; score will not be saved");
            run(&cli, bank, MemoryStore::new());
        }
    }
}

fn run<S: KeyValueStore>(cli: &Cli, bank: WordBank, store: S) {
    let mut controller = RoundController::new(bank, store);
    let filter = controller.resolve_filter(&cli.category);
    let difficulty = Difficulty::from_name(&cli.difficulty);
    if let Err(e) = controller.start_round(filter, difficulty) {
        eprintln!("Cannot start a round: {e}");
        return;
    }

    let stdin = io::stdin();
    let mut interface = CliInterface::new(stdin.lock());
    if let Err(e) = game_loop(&mut controller, &mut interface) {
        eprintln!("Game stopped: {e}");
    }
}

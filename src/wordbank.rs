use crate::error::{EmptyPoolError, ValidationError};
use crate::info_log;
use rand::Rng;
use rand::seq::IndexedRandom;
use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

pub const EMBEDDED_WORDBANK: &str = include_str!("resources/words.txt");

/// Category assigned to submitted words that arrive without one.
pub const CUSTOM_CATEGORY: &str = "Custom";

pub const MIN_WORD_LENGTH: usize = 2;

/// A dictionary word together with the category it is offered under.
///
/// Only constructed through validation, so `word` is always lowercase ASCII
/// letters and at least [`MIN_WORD_LENGTH`] long.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordEntry {
    word: String,
    category: String,
}

impl WordEntry {
    /// Validate and normalize a raw word. A blank category becomes [`CUSTOM_CATEGORY`].
    pub fn new(word: &str, category: &str) -> Result<Self, ValidationError> {
        let word = word.trim();
        let len = word.chars().count();
        if len < MIN_WORD_LENGTH {
            return Err(ValidationError::TooShort {
                len,
                min: MIN_WORD_LENGTH,
            });
        }
        if let Some(bad) = word.chars().find(|c| !c.is_ascii_alphabetic()) {
            return Err(ValidationError::NonAlphabetic(bad));
        }

        let category = category.trim();
        let category = if category.is_empty() {
            CUSTOM_CATEGORY
        } else {
            category
        };

        Ok(Self {
            word: word.to_ascii_lowercase(),
            category: category.to_string(),
        })
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn category(&self) -> &str {
        &self.category
    }
}

/// Which slice of the word bank a round draws from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Category(String),
}

impl CategoryFilter {
    /// `"all"` (any case) selects everything; any other name selects that category.
    pub fn parse(name: &str) -> Self {
        let name = name.trim();
        if name.is_empty() || name.eq_ignore_ascii_case("all") {
            Self::All
        } else {
            Self::Category(name.to_string())
        }
    }

    fn matches(&self, entry: &WordEntry) -> bool {
        match self {
            Self::All => true,
            Self::Category(name) => entry.category == *name,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Category(name) => f.write_str(name),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct WordBank {
    entries: Vec<WordEntry>,
    // Registry of known categories: the set answers membership, the vec keeps display order.
    known_categories: HashSet<String>,
    categories: Vec<String>,
}

impl WordBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in dictionary.
    pub fn with_defaults() -> Self {
        load_wordbank_from_str(EMBEDDED_WORDBANK)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[WordEntry] {
        &self.entries
    }

    /// Known categories in order of first appearance.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn has_category(&self, name: &str) -> bool {
        self.known_categories.contains(name)
    }

    /// Case-insensitive lookup of a known category's canonical spelling.
    pub fn resolve_category(&self, name: &str) -> Option<&str> {
        let name = name.trim();
        if let Some(exact) = self.known_categories.get(name) {
            return Some(exact.as_str());
        }
        self.categories
            .iter()
            .find(|c| c.eq_ignore_ascii_case(name))
            .map(String::as_str)
    }

    /// Validate and append a word. Nothing changes when validation fails.
    pub fn add_entry(&mut self, word: &str, category: &str) -> Result<WordEntry, ValidationError> {
        let entry = WordEntry::new(word, category)?;
        if self.known_categories.insert(entry.category.clone()) {
            info_log!("New category registered: {}", entry.category);
            self.categories.push(entry.category.clone());
        }
        self.entries.push(entry.clone());
        Ok(entry)
    }

    /// Pick one entry uniformly at random among those matching `filter`.
    pub fn select_random<R: Rng + ?Sized>(
        &self,
        filter: &CategoryFilter,
        rng: &mut R,
    ) -> Result<&WordEntry, EmptyPoolError> {
        let pool: Vec<&WordEntry> = self.entries.iter().filter(|e| filter.matches(e)).collect();
        pool.choose(rng).copied().ok_or_else(|| EmptyPoolError {
            filter: filter.to_string(),
        })
    }

    /// Add every valid `word[,category]` line from `data`, returning how many were accepted.
    ///
    /// Blank lines and lines starting with `#` are ignored; invalid words are logged and skipped.
    pub fn extend_from_str(&mut self, data: &str) -> usize {
        let mut added = 0;
        for (lineno, line) in data.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let (word, category) = line.split_once(',').unwrap_or((line, ""));
            match self.add_entry(word, category) {
                Ok(_) => added += 1,
                Err(e) => log::warn!("Skipping word list line {}: {e}", lineno + 1),
            }
        }
        added
    }

    pub fn extend_from_file<P: AsRef<Path>>(&mut self, path: P) -> io::Result<usize> {
        let data = fs::read_to_string(path)?;
        Ok(self.extend_from_str(&data))
    }
}

pub fn load_wordbank_from_str(data: &str) -> WordBank {
    let mut bank = WordBank::new();
    bank.extend_from_str(data);
    bank
}

pub fn load_wordbank_from_file<P: AsRef<Path>>(path: P) -> io::Result<WordBank> {
    let data = fs::read_to_string(path)?;
    Ok(load_wordbank_from_str(&data))
}

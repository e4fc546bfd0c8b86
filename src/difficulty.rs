use std::fmt;

/// How many wrong guesses a round tolerates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
    Extreme,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [Self::Easy, Self::Normal, Self::Hard, Self::Extreme];

    /// Starting life budget for a round.
    pub fn lives(self) -> u32 {
        match self {
            Self::Easy => 8,
            Self::Normal => 6,
            Self::Hard => 4,
            Self::Extreme => 3,
        }
    }

    /// Case-insensitive lookup; anything unrecognized is `Normal`.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "easy" => Self::Easy,
            "hard" => Self::Hard,
            "extreme" => Self::Extreme,
            _ => Self::Normal,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Normal => "normal",
            Self::Hard => "hard",
            Self::Extreme => "extreme",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Life budget for a difficulty given by name.
pub fn lives_for(name: &str) -> u32 {
    Difficulty::from_name(name).lives()
}

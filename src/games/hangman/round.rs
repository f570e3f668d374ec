use std::collections::HashSet;

pub const MAX_WRONG_GUESSES: u32 = 9;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Guess {
    /// Anything other than a single letter; the player is asked again.
    Invalid,
    Correct(char),
    Incorrect(char),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundState {
    InProgress,
    Won,
    Lost,
}

/// One word to guess, from the first prompt to the win or the full drawing.
#[derive(Clone, Debug)]
pub struct Round {
    word: String,
    guessed: HashSet<char>,
    wrong: u32,
}

impl Round {
    /// The first and last letters start out revealed.
    pub fn new(word: impl Into<String>) -> Self {
        let word = word.into();
        let mut guessed = HashSet::new();
        if let Some(first) = word.chars().next() {
            guessed.extend(first.to_lowercase());
        }
        if let Some(last) = word.chars().last() {
            guessed.extend(last.to_lowercase());
        }
        Self { word, guessed, wrong: 0 }
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn guessed(&self) -> &HashSet<char> {
        &self.guessed
    }

    pub fn wrong_guesses(&self) -> u32 {
        self.wrong
    }

    pub fn guess(&mut self, input: &str) -> Guess {
        let mut chars = input.trim().chars();
        let letter = match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_alphabetic() => c,
            _ => return Guess::Invalid,
        };
        let letter = letter.to_lowercase().next().unwrap_or(letter);
        if self.state() != RoundState::InProgress {
            return Guess::Invalid;
        }

        if self.word.to_lowercase().contains(letter) {
            self.guessed.insert(letter);
            Guess::Correct(letter)
        } else {
            self.wrong += 1;
            Guess::Incorrect(letter)
        }
    }

    pub fn state(&self) -> RoundState {
        if is_word_guessed(&self.word, &self.guessed) {
            RoundState::Won
        } else if self.wrong >= MAX_WRONG_GUESSES {
            RoundState::Lost
        } else {
            RoundState::InProgress
        }
    }

    /// Revealed letters as written, `_ ` for hidden ones, a double space
    /// between words.
    pub fn progress(&self) -> String {
        let mut out = String::with_capacity(self.word.len() * 2);
        for ch in self.word.chars() {
            if ch == ' ' {
                out.push_str("  ");
            } else if is_revealed(ch, &self.guessed) {
                out.push(ch);
            } else {
                out.push_str("_ ");
            }
        }
        out
    }
}

fn is_revealed(ch: char, guessed: &HashSet<char>) -> bool {
    ch.to_lowercase().all(|c| guessed.contains(&c))
}

/// True when every non-space character of `word` is in `guessed`,
/// ignoring case.
pub fn is_word_guessed(word: &str, guessed: &HashSet<char>) -> bool {
    word.chars()
        .filter(|&ch| ch != ' ')
        .all(|ch| is_revealed(ch, guessed))
}

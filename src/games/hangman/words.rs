use std::fs;
use std::path::Path;

use crate::error::{GameError, Result};
use crate::rng::GameRng;

/// Built-in word list.
pub const DICTIONARY: &[&str] = &[
    "Zombie",
    "Gopher",
    "Golang",
    "Games",
    "Hangman",
    "Apple",
    "Microsoft",
    "Google",
    "Facebook",
    "Amazon",
    "Netflix",
    "YouTube",
    "Twitter",
    "Instagram",
    "WhatsApp",
    "Snapchat",
    "Tiktok",
    "LinkedIn",
    "Pinterest",
    "Reddit",
    "Tumblr",
    "Dropbox",
    "Github",
    "Gmail",
    "Skype",
    "Telegram",
    "Viber",
    "WeChat",
    "Pakistan Zindabad",
];

pub trait WordSource {
    fn choose(&self, rng: &mut GameRng) -> String;
}

#[derive(Clone, Debug)]
pub struct Dictionary {
    words: Vec<String>,
}

impl Default for Dictionary {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Dictionary {
    pub fn builtin() -> Self {
        Self {
            words: DICTIONARY.iter().map(|w| w.to_string()).collect(),
        }
    }

    /// Words must contain at least one letter; surrounding whitespace is
    /// trimmed.
    pub fn new<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words: Vec<String> = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_string())
            .filter(|w| !w.is_empty())
            .collect();
        if let Some(bad) = words.iter().find(|w| !w.chars().any(char::is_alphabetic)) {
            return Err(GameError::WordList(format!("{:?} has no letters", bad)));
        }
        if words.is_empty() {
            return Err(GameError::WordList("no words".into()));
        }
        Ok(Self { words })
    }

    /// One word (or phrase) per line; blank lines are skipped.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .map_err(|e| GameError::WordList(format!("{}: {}", path.display(), e)))?;
        Self::new(text.lines())
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }
}

impl WordSource for Dictionary {
    fn choose(&self, rng: &mut GameRng) -> String {
        self.words[rng.gen_range(0..self.words.len())].clone()
    }
}

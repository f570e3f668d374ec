use std::fs;
use std::path::PathBuf;

use log::warn;

use crate::error::{GameError, Result};

/// Gallows art for a given number of wrong guesses.
pub trait DrawingSource {
    fn drawing(&self, wrong_guesses: u32) -> String;
}

/// Reads `<dir>/hangman<N>` files. A missing or unreadable file is not
/// fatal; the placeholder text is shown instead.
#[derive(Clone, Debug)]
pub struct AssetDrawings {
    dir: PathBuf,
}

impl AssetDrawings {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, wrong_guesses: u32) -> PathBuf {
        self.dir.join(format!("hangman{}", wrong_guesses))
    }

    pub fn load(&self, wrong_guesses: u32) -> Result<String> {
        let path = self.path_for(wrong_guesses);
        fs::read_to_string(&path).map_err(|source| GameError::Asset { path, source })
    }
}

pub fn placeholder(wrong_guesses: u32) -> String {
    format!("Error loading drawing for state {}", wrong_guesses)
}

impl DrawingSource for AssetDrawings {
    fn drawing(&self, wrong_guesses: u32) -> String {
        self.load(wrong_guesses).unwrap_or_else(|e| {
            warn!("{}", e);
            placeholder(wrong_guesses)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn reads_art_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("hangman3"), "  +---+\n  |   |\n").unwrap();
        let drawings = AssetDrawings::new(dir.path());
        assert_eq!(drawings.drawing(3), "  +---+\n  |   |\n");
    }

    #[test]
    fn missing_art_degrades_to_placeholder() {
        let dir = tempfile::tempdir().unwrap();
        let drawings = AssetDrawings::new(dir.path());
        assert!(matches!(drawings.load(4), Err(GameError::Asset { .. })));
        assert_eq!(drawings.drawing(4), "Error loading drawing for state 4");
    }

    #[test]
    fn shipped_states_cover_every_count() {
        let drawings = AssetDrawings::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("states"));
        for n in 0..=9 {
            assert!(drawings.load(n).is_ok(), "states/hangman{} missing", n);
        }
    }
}

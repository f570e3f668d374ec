pub mod console;
pub mod drawings;
pub mod round;
pub mod words;

use std::path::PathBuf;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent};
use log::{debug, info};
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::error::Result;
use crate::games::{help_line, render_game_over, Game, Phase};
use crate::rng::GameRng;

use drawings::{AssetDrawings, DrawingSource};
use round::{Guess, Round, RoundState, MAX_WRONG_GUESSES};
use words::{Dictionary, WordSource};

const MAX_INPUT_LEN: usize = 16;

#[derive(Clone, Debug)]
pub struct HangmanConfig {
    pub assets: PathBuf,
    pub words: Option<PathBuf>,
    pub tick_rate: Duration,
}

impl Default for HangmanConfig {
    fn default() -> Self {
        Self {
            assets: PathBuf::from("states"),
            words: None,
            tick_rate: Duration::from_millis(250),
        }
    }
}

impl HangmanConfig {
    pub fn dictionary(&self) -> Result<Dictionary> {
        match &self.words {
            Some(path) => Dictionary::from_file(path),
            None => Ok(Dictionary::builtin()),
        }
    }
}

pub struct HangmanGame {
    words: Box<dyn WordSource>,
    drawings: Box<dyn DrawingSource>,
    rng: GameRng,
    round: Round,
    input: String,
    message: Option<(String, Color)>,
    // Art for the current wrong-guess count, so the file is read once per miss
    drawing: (u32, String),
    phase: Phase,
    tick_rate: Duration,
}

impl HangmanGame {
    pub fn new(words: Box<dyn WordSource>, drawings: Box<dyn DrawingSource>, mut rng: GameRng) -> Self {
        let round = Round::new(words.choose(&mut rng));
        let drawing = (0, drawings.drawing(0));
        Self {
            words,
            drawings,
            rng,
            round,
            input: String::new(),
            message: None,
            drawing,
            phase: Phase::Running,
            tick_rate: HangmanConfig::default().tick_rate,
        }
    }

    pub fn from_config(config: &HangmanConfig, rng: GameRng) -> Result<Self> {
        let dictionary = config.dictionary()?;
        let mut game = Self::new(
            Box::new(dictionary),
            Box::new(AssetDrawings::new(&config.assets)),
            rng,
        );
        game.tick_rate = config.tick_rate;
        Ok(game)
    }

    pub fn round(&self) -> &Round {
        &self.round
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_ref().map(|(m, _)| m.as_str())
    }

    fn submit(&mut self) {
        let guess = self.round.guess(&self.input);
        debug!("hangman: {:?} from {:?}", guess, self.input);
        self.input.clear();
        self.message = Some(match guess {
            Guess::Invalid => ("Invalid input. Please enter a single letter.".to_string(), Color::Yellow),
            Guess::Correct(c) => (format!("Yes! '{}' is in the word.", c), Color::Green),
            Guess::Incorrect(c) => (format!("No '{}' in the word.", c), Color::Red),
        });

        let wrong = self.round.wrong_guesses();
        if wrong != self.drawing.0 {
            self.drawing = (wrong, self.drawings.drawing(wrong));
        }

        if self.round.state() != RoundState::InProgress && self.phase.finish() {
            info!(
                "hangman: {:?} on {:?} with {} wrong guesses",
                self.round.state(),
                self.round.word(),
                wrong
            );
        }
    }

    fn guessed_letters(&self) -> String {
        let mut letters: Vec<char> = self.round.guessed().iter().copied().collect();
        letters.sort_unstable();
        letters.into_iter().map(String::from).collect::<Vec<_>>().join(" ")
    }
}

impl Game for HangmanGame {
    fn update(&mut self) {}

    fn handle_input(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Esc {
            self.phase.exit();
            return;
        }
        if self.phase == Phase::GameOver {
            if matches!(key.code, KeyCode::Char('r') | KeyCode::Char('R') | KeyCode::Enter) {
                self.reset();
            }
            return;
        }
        if self.phase != Phase::Running {
            return;
        }
        match key.code {
            KeyCode::Enter => self.submit(),
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Char(c) => {
                if self.input.chars().count() < MAX_INPUT_LEN {
                    self.input.push(c);
                }
            }
            _ => {}
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Rgb(200, 160, 90)))
            .title(" 🪢 Hangman ")
            .title_style(Style::default().fg(Color::Rgb(255, 200, 110)).add_modifier(Modifier::BOLD));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(8),
                Constraint::Length(1),
            ])
            .split(inner);

        let wrong = self.round.wrong_guesses();
        let status = Line::from(vec![
            Span::styled(" 🪢 ", Style::default()),
            Span::styled(
                format!("Misses: {}/{} ", wrong, MAX_WRONG_GUESSES),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::styled(" │ ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("Letters: {}", self.guessed_letters()),
                Style::default().fg(Color::Cyan),
            ),
        ]);
        frame.render_widget(Paragraph::new(status), chunks[0]);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(chunks[1]);

        let art = Paragraph::new(self.drawing.1.clone())
            .style(Style::default().fg(Color::Rgb(220, 220, 230)))
            .block(Block::default().borders(Borders::RIGHT).border_style(Style::default().fg(Color::Rgb(60, 60, 80))));
        frame.render_widget(art, columns[0]);

        let mut lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("  {}", self.round.progress()),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("  > ", Style::default().fg(Color::Rgb(80, 200, 255)).add_modifier(Modifier::BOLD)),
                Span::styled(self.input.clone(), Style::default().fg(Color::White)),
                Span::styled("_", Style::default().fg(Color::Rgb(100, 100, 130)).add_modifier(Modifier::SLOW_BLINK)),
            ]),
            Line::from(""),
        ];
        if let Some((msg, color)) = &self.message {
            lines.push(Line::from(Span::styled(format!("  {}", msg), Style::default().fg(*color))));
        }
        frame.render_widget(Paragraph::new(lines), columns[1]);

        let help = help_line(&[("A-Z", "Type"), ("Enter", "Guess"), ("Esc", "Exit")]);
        frame.render_widget(Paragraph::new(help), chunks[2]);

        if self.phase == Phase::GameOver {
            let (title, color) = match self.round.state() {
                RoundState::Won => ("You Win!", Color::Green),
                _ => ("You Lose...", Color::Red),
            };
            render_game_over(
                frame,
                chunks[1],
                title,
                color,
                vec![
                    Line::from(Span::styled(
                        format!("The word was: {}", self.round.word()),
                        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                    )),
                    Line::from(""),
                    Line::from(Span::styled(
                        "Press ESC to exit or R to play again.",
                        Style::default().fg(Color::Gray),
                    )),
                ],
            );
        }
    }

    fn reset(&mut self) {
        self.round = Round::new(self.words.choose(&mut self.rng));
        self.input.clear();
        self.message = None;
        self.drawing = (0, self.drawings.drawing(0));
        self.phase = Phase::Running;
        info!("hangman: new word with {} letters", self.round.word().chars().filter(|c| *c != ' ').count());
    }

    /// Guesses left over when the word was found.
    fn get_score(&self) -> u32 {
        match self.round.state() {
            RoundState::Won => MAX_WRONG_GUESSES - self.round.wrong_guesses(),
            _ => 0,
        }
    }

    fn phase(&self) -> Phase {
        self.phase
    }

    fn tick_rate(&self) -> Duration {
        self.tick_rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    struct Fixed(&'static str);

    impl WordSource for Fixed {
        fn choose(&self, _rng: &mut GameRng) -> String {
            self.0.to_string()
        }
    }

    struct Plain;

    impl DrawingSource for Plain {
        fn drawing(&self, wrong_guesses: u32) -> String {
            format!("state {}", wrong_guesses)
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_line(game: &mut HangmanGame, text: &str) {
        for c in text.chars() {
            game.handle_input(key(KeyCode::Char(c)));
        }
        game.handle_input(key(KeyCode::Enter));
    }

    fn game(word: &'static str) -> HangmanGame {
        HangmanGame::new(Box::new(Fixed(word)), Box::new(Plain), GameRng::new(0))
    }

    #[test]
    fn typed_guesses_reveal_letters() {
        let mut g = game("Games");
        type_line(&mut g, "a");
        assert_eq!(g.round().progress(), "Ga_ _ s");
        assert_eq!(g.input(), "");
        assert_eq!(g.message(), Some("Yes! 'a' is in the word."));
    }

    #[test]
    fn multi_letter_input_is_rejected() {
        let mut g = game("Games");
        type_line(&mut g, "am");
        assert_eq!(g.message(), Some("Invalid input. Please enter a single letter."));
        assert_eq!(g.round().wrong_guesses(), 0);
    }

    #[test]
    fn backspace_edits_the_prompt() {
        let mut g = game("Games");
        g.handle_input(key(KeyCode::Char('x')));
        g.handle_input(key(KeyCode::Backspace));
        g.handle_input(key(KeyCode::Char('e')));
        assert_eq!(g.input(), "e");
    }

    #[test]
    fn misses_swap_the_drawing() {
        let mut g = game("Games");
        type_line(&mut g, "z");
        assert_eq!(g.drawing, (1, "state 1".to_string()));
    }

    #[test]
    fn round_end_moves_to_game_over_and_restarts() {
        let mut g = game("Games");
        for letter in ["a", "m", "e"] {
            type_line(&mut g, letter);
        }
        assert_eq!(g.phase(), Phase::GameOver);
        assert_eq!(g.get_score(), 9);

        g.handle_input(key(KeyCode::Char('r')));
        assert_eq!(g.phase(), Phase::Running);
        assert_eq!(g.round().wrong_guesses(), 0);
        assert_eq!(g.round().progress(), "G_ _ _ s");
    }

    #[test]
    fn escape_exits() {
        let mut g = game("Games");
        g.handle_input(key(KeyCode::Esc));
        assert_eq!(g.phase(), Phase::Exited);
    }
}

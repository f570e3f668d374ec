use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::info;

use crate::config::Settings;
use crate::error::Result;
use crate::games::hangman::HangmanGame;
use crate::games::pong::Pong;
use crate::games::snake::Snake;
use crate::games::zombies::ZombieAttack;
use crate::games::{Game, Phase};
use crate::rng::GameRng;

const HOME_TICK: Duration = Duration::from_millis(100);
const GAME_COUNT: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tab {
    Home,
    Hangman,
    Pong,
    Snake,
    Zombies,
}

impl Tab {
    pub fn all() -> &'static [Tab] {
        &[Tab::Home, Tab::Hangman, Tab::Pong, Tab::Snake, Tab::Zombies]
    }

    pub fn title(&self) -> &str {
        match self {
            Tab::Home => " Home ",
            Tab::Hangman => " Hangman ",
            Tab::Pong => " Pong ",
            Tab::Snake => " Snake ",
            Tab::Zombies => " Zombie Attack ",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Tab::Home => 0,
            Tab::Hangman => 1,
            Tab::Pong => 2,
            Tab::Snake => 3,
            Tab::Zombies => 4,
        }
    }

    /// Tab for the n-th tile on the home screen.
    pub fn from_game_index(idx: usize) -> Tab {
        match idx {
            0 => Tab::Hangman,
            1 => Tab::Pong,
            2 => Tab::Snake,
            3 => Tab::Zombies,
            _ => Tab::Home,
        }
    }
}

pub struct App {
    pub should_quit: bool,
    pub current_tab: Tab,
    pub selected_game: usize, // 0-3 for home screen game selection
    /// Launched straight into one game; leaving it quits.
    pub standalone: bool,
    pub hangman: HangmanGame,
    pub pong: Pong,
    pub snake: Snake,
    pub zombies: ZombieAttack,
}

impl App {
    pub fn new(settings: &Settings) -> Result<Self> {
        let mut rng = GameRng::from_seed_or_entropy(settings.seed);
        info!("session seed {}", rng.seed());
        let hangman = HangmanGame::from_config(&settings.hangman, rng.fork())?;
        Ok(Self {
            should_quit: false,
            current_tab: settings.launch.unwrap_or(Tab::Home),
            selected_game: 0,
            standalone: settings.launch.is_some(),
            hangman,
            pong: Pong::new(settings.pong.clone()),
            snake: Snake::new(settings.snake.clone(), rng.fork()),
            zombies: ZombieAttack::new(settings.zombies.clone(), rng.fork()),
        })
    }

    pub fn active_game(&self) -> Option<&dyn Game> {
        match self.current_tab {
            Tab::Home => None,
            Tab::Hangman => Some(&self.hangman),
            Tab::Pong => Some(&self.pong),
            Tab::Snake => Some(&self.snake),
            Tab::Zombies => Some(&self.zombies),
        }
    }

    pub fn active_game_mut(&mut self) -> Option<&mut dyn Game> {
        match self.current_tab {
            Tab::Home => None,
            Tab::Hangman => Some(&mut self.hangman),
            Tab::Pong => Some(&mut self.pong),
            Tab::Snake => Some(&mut self.snake),
            Tab::Zombies => Some(&mut self.zombies),
        }
    }

    pub fn tick_rate(&self) -> Duration {
        self.active_game().map_or(HOME_TICK, |g| g.tick_rate())
    }

    pub fn on_tick(&mut self) {
        if let Some(game) = self.active_game_mut() {
            game.update();
        }
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        // Ctrl+C always quits
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        if !self.standalone {
            match key.code {
                KeyCode::Tab => {
                    if key.modifiers.contains(KeyModifiers::SHIFT) {
                        self.prev_tab();
                    } else {
                        self.next_tab();
                    }
                    return;
                }
                KeyCode::BackTab => {
                    self.prev_tab();
                    return;
                }
                _ => {}
            }
        }

        if self.current_tab == Tab::Home {
            self.on_home_key(key);
            return;
        }

        // Forward to active game
        let exited = match self.active_game_mut() {
            Some(game) => {
                game.handle_input(key);
                game.phase() == Phase::Exited
            }
            None => false,
        };
        if exited {
            self.leave_game();
        }
    }

    fn on_home_key(&mut self, key: KeyEvent) {
        if !key.modifiers.is_empty() && key.modifiers != KeyModifiers::SHIFT {
            return;
        }
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char(c @ '1'..='4') => {
                self.current_tab = Tab::from_game_index(c as usize - '1' as usize);
            }
            KeyCode::Right | KeyCode::Down => {
                self.selected_game = (self.selected_game + 1) % GAME_COUNT;
            }
            KeyCode::Left | KeyCode::Up => {
                self.selected_game = (self.selected_game + GAME_COUNT - 1) % GAME_COUNT;
            }
            KeyCode::Enter => self.current_tab = Tab::from_game_index(self.selected_game),
            _ => {}
        }
    }

    fn leave_game(&mut self) {
        if self.standalone {
            self.should_quit = true;
            return;
        }
        if let Some(game) = self.active_game_mut() {
            game.reset();
        }
        self.current_tab = Tab::Home;
    }

    fn next_tab(&mut self) {
        let tabs = Tab::all();
        let idx = self.current_tab.index();
        self.current_tab = tabs[(idx + 1) % tabs.len()];
    }

    fn prev_tab(&mut self) {
        let tabs = Tab::all();
        let idx = self.current_tab.index();
        self.current_tab = tabs[(idx + tabs.len() - 1) % tabs.len()];
    }
}

use std::time::Duration;

use crate::app::Tab;
use crate::cli::{Cli, GameCommand};
use crate::error::Result;
use crate::games::hangman::HangmanConfig;
use crate::games::pong::PongConfig;
use crate::games::snake::SnakeConfig;
use crate::games::zombies::ZombieConfig;

/// Everything the app needs to build its games, resolved from the command
/// line.
#[derive(Clone, Debug, Default)]
pub struct Settings {
    pub seed: Option<u64>,
    /// Game to run on its own; `None` opens the launcher.
    pub launch: Option<Tab>,
    pub plain: bool,
    pub hangman: HangmanConfig,
    pub pong: PongConfig,
    pub snake: SnakeConfig,
    pub zombies: ZombieConfig,
}

impl Settings {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let mut settings = Settings {
            seed: cli.seed,
            ..Settings::default()
        };

        match &cli.game {
            None => {}
            Some(GameCommand::Hangman { assets, words, plain }) => {
                settings.launch = Some(Tab::Hangman);
                settings.plain = *plain;
                settings.hangman.assets = assets.clone();
                settings.hangman.words = words.clone();
            }
            Some(GameCommand::Pong { win_score, paddle_height }) => {
                settings.launch = Some(Tab::Pong);
                settings.pong.win_score = *win_score;
                settings.pong.paddle_height = *paddle_height;
            }
            Some(GameCommand::Snake { width, height }) => {
                settings.launch = Some(Tab::Snake);
                settings.snake.width = *width;
                settings.snake.height = *height;
            }
            Some(GameCommand::Zombies { width, height, zombie_count, health }) => {
                settings.launch = Some(Tab::Zombies);
                settings.zombies.width = *width;
                settings.zombies.height = *height;
                settings.zombies.zombie_count = *zombie_count;
                settings.zombies.health = *health;
            }
        }

        if let Some(ms) = cli.tick_ms {
            let tick = Duration::from_millis(ms);
            settings.pong.tick_rate = tick;
            settings.snake.tick_rate = tick;
            settings.zombies.tick_rate = tick;
        }

        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        self.pong.validate()?;
        self.snake.validate()?;
        self.zombies.validate()?;
        Ok(())
    }
}

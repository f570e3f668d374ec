use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent};
use log::{debug, info};
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::error::{GameError, Result};
use crate::games::canvas::Canvas;
use crate::games::{help_line, render_game_over, Direction as Heading, Game, Phase, Point};
use crate::rng::GameRng;

const PLAYER_CHAR: char = '@';
const ZOMBIE_CHAR: char = 'Z';
const BULLET_CHAR: char = '|';
const MIN_WIDTH: i32 = 10;
const MIN_HEIGHT: i32 = 8;
const MAX_WIDTH: i32 = 500;
const MAX_HEIGHT: i32 = 200;

#[derive(Clone, Debug)]
pub struct ZombieConfig {
    pub width: i32,
    pub height: i32,
    pub zombie_count: usize,
    pub health: u32,
    pub tick_rate: Duration,
}

impl Default for ZombieConfig {
    fn default() -> Self {
        Self {
            width: 40,
            height: 20,
            zombie_count: 5,
            health: 3,
            tick_rate: Duration::from_millis(100),
        }
    }
}

impl ZombieConfig {
    pub fn validate(&self) -> Result<()> {
        if self.width < MIN_WIDTH || self.height < MIN_HEIGHT {
            return Err(GameError::Config(format!(
                "zombie field must be at least {}x{}, got {}x{}",
                MIN_WIDTH, MIN_HEIGHT, self.width, self.height
            )));
        }
        if self.width > MAX_WIDTH || self.height > MAX_HEIGHT {
            return Err(GameError::Config(format!(
                "zombie field can be at most {}x{}, got {}x{}",
                MAX_WIDTH, MAX_HEIGHT, self.width, self.height
            )));
        }
        if self.zombie_count == 0 {
            return Err(GameError::Config("at least one zombie is required".into()));
        }
        if self.zombie_count > self.spawn_cells() {
            return Err(GameError::Config(format!(
                "a {}x{} field has room for {} zombies, got {}",
                self.width,
                self.height,
                self.spawn_cells(),
                self.zombie_count
            )));
        }
        if self.health == 0 {
            return Err(GameError::Config("starting health must be at least 1".into()));
        }
        Ok(())
    }

    /// Interior cells in the upper half, where the horde spawns.
    fn spawn_cells(&self) -> usize {
        ((self.width - 2) * (self.height / 2 - 1)).max(0) as usize
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Zombie {
    pub position: Point,
    pub alive: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bullet {
    pub position: Point,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Move(Heading),
    Fire,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Survived,
    Overrun,
    Quit,
}

pub struct ZombieAttack {
    config: ZombieConfig,
    rng: GameRng,
    player: Point,
    health: u32,
    zombies: Vec<Zombie>,
    bullets: Vec<Bullet>,
    pending: Option<Command>,
    score: u32,
    outcome: Option<Outcome>,
    phase: Phase,
}

impl ZombieAttack {
    pub fn new(config: ZombieConfig, rng: GameRng) -> Self {
        let mut z = Self {
            config,
            rng,
            player: Point::new(0, 0),
            health: 0,
            zombies: Vec::new(),
            bullets: Vec::new(),
            pending: None,
            score: 0,
            outcome: None,
            phase: Phase::Running,
        };
        z.init();
        z
    }

    fn init(&mut self) {
        let (w, h) = (self.config.width, self.config.height);
        self.player = Point::new(w / 2, h - 2);
        self.health = self.config.health;
        self.zombies = (0..self.config.zombie_count)
            .map(|_| Zombie {
                position: Point::new(self.rng.gen_range(1..w - 1), self.rng.gen_range(1..h / 2)),
                alive: true,
            })
            .collect();
        self.bullets.clear();
        self.pending = None;
        self.score = 0;
        self.outcome = None;
        self.phase = Phase::Running;
    }

    pub fn player(&self) -> Point {
        self.player
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn zombies(&self) -> &[Zombie] {
        &self.zombies
    }

    pub fn bullets(&self) -> &[Bullet] {
        &self.bullets
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Replaces the horde, for scripted scenarios.
    pub fn set_zombies(&mut self, positions: &[Point]) {
        self.zombies = positions
            .iter()
            .map(|&position| Zombie { position, alive: true })
            .collect();
    }

    pub fn set_bullets(&mut self, positions: &[Point]) {
        self.bullets = positions.iter().map(|&position| Bullet { position }).collect();
    }

    fn apply(&mut self, command: Command) {
        let (w, h) = (self.config.width, self.config.height);
        match command {
            Command::Move(dir) => {
                let next = dir.step(self.player);
                self.player = Point::new(next.x.clamp(1, w - 2), next.y.clamp(1, h - 2));
            }
            Command::Fire => self.bullets.push(Bullet { position: self.player }),
        }
    }

    fn move_zombies(&mut self) {
        let bottom = self.config.height - 1;
        for zombie in self.zombies.iter_mut().filter(|z| z.alive) {
            zombie.position.y += 1;
            if zombie.position.y >= bottom {
                zombie.alive = false;
                self.health = self.health.saturating_sub(1);
                debug!("zombie broke through at x = {}, health {}", zombie.position.x, self.health);
            }
        }
    }

    fn move_bullets(&mut self) {
        for bullet in &mut self.bullets {
            bullet.position.y -= 1;
        }
        self.bullets.retain(|b| b.position.y >= 1);
    }

    fn resolve_hits(&mut self) {
        let mut spent = vec![false; self.bullets.len()];
        for (i, bullet) in self.bullets.iter().enumerate() {
            // Stacked zombies share a cell and all fall to the same bullet
            for zombie in self
                .zombies
                .iter_mut()
                .filter(|z| z.alive && z.position == bullet.position)
            {
                zombie.alive = false;
                spent[i] = true;
                self.score += 1;
            }
        }
        let mut spent = spent.into_iter();
        self.bullets.retain(|_| !spent.next().unwrap_or(false));
        self.zombies.retain(|z| z.alive);
    }

    fn end(&mut self, outcome: Outcome) {
        if self.phase.finish() {
            self.outcome = Some(outcome);
            info!("zombies: {:?} with score {} and health {}", outcome, self.score, self.health);
        }
    }

    fn render_field(&self) -> Vec<Line<'static>> {
        let bg = Color::Rgb(10, 10, 20);
        let mut canvas = Canvas::new(self.config.width as usize, self.config.height as usize, Style::default().bg(bg));
        canvas.border(Style::default().fg(Color::Black).bg(Color::White));

        canvas.centered_text(
            1,
            &format!("Score: {}", self.score),
            Style::default().fg(Color::Yellow).bg(bg),
        );

        for bullet in &self.bullets {
            canvas.set(
                bullet.position.x,
                bullet.position.y,
                BULLET_CHAR,
                Style::default().fg(Color::Black).bg(Color::Yellow),
            );
        }
        for zombie in self.zombies.iter().filter(|z| z.alive) {
            canvas.set(
                zombie.position.x,
                zombie.position.y,
                ZOMBIE_CHAR,
                Style::default().fg(Color::White).bg(Color::Red).add_modifier(Modifier::BOLD),
            );
        }
        canvas.set(
            self.player.x,
            self.player.y,
            PLAYER_CHAR,
            Style::default().fg(Color::Black).bg(Color::Green).add_modifier(Modifier::BOLD),
        );

        canvas.into_lines()
    }
}

impl Game for ZombieAttack {
    fn update(&mut self) {
        if self.phase != Phase::Running {
            return;
        }
        if let Some(command) = self.pending.take() {
            self.apply(command);
        }
        self.move_zombies();
        self.move_bullets();
        self.resolve_hits();

        if self.health == 0 {
            self.end(Outcome::Overrun);
        } else if self.zombies.is_empty() {
            self.end(Outcome::Survived);
        }
    }

    fn handle_input(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => match self.phase {
                Phase::Running => self.end(Outcome::Quit),
                _ => self.phase.exit(),
            },
            KeyCode::Char('r') | KeyCode::Char('R') => {
                if self.phase == Phase::GameOver {
                    self.reset();
                }
            }
            code => {
                if self.phase != Phase::Running || self.pending.is_some() {
                    return;
                }
                self.pending = match code {
                    KeyCode::Up => Some(Command::Move(Heading::Up)),
                    KeyCode::Down => Some(Command::Move(Heading::Down)),
                    KeyCode::Left => Some(Command::Move(Heading::Left)),
                    KeyCode::Right => Some(Command::Move(Heading::Right)),
                    KeyCode::Enter | KeyCode::Char(' ') => Some(Command::Fire),
                    _ => None,
                };
            }
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Rgb(200, 60, 60)))
            .title(" 🧟 Zombie Attack ")
            .title_style(Style::default().fg(Color::Rgb(255, 90, 90)).add_modifier(Modifier::BOLD));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(inner);

        let alive = self.zombies.iter().filter(|z| z.alive).count();
        let status = Line::from(vec![
            Span::styled(" 🧟 ", Style::default()),
            Span::styled(
                format!("Score: {} ", self.score),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::styled(" │ ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("Health: {} ", "♥ ".repeat(self.health as usize)),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::styled(" │ ", Style::default().fg(Color::DarkGray)),
            Span::styled(format!("Zombies: {}", alive), Style::default().fg(Color::Green)),
        ]);
        frame.render_widget(Paragraph::new(status), chunks[0]);

        let (w, h) = (self.config.width as u16, self.config.height as u16);
        let field = chunks[1];
        if field.width < w || field.height < h {
            let msg = Paragraph::new(format!("Terminal too small: the field needs {}x{}", w, h))
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::Red));
            frame.render_widget(msg, field);
            return;
        }
        let board = Rect::new(
            field.x + (field.width - w) / 2,
            field.y + (field.height - h) / 2,
            w,
            h,
        );
        frame.render_widget(Paragraph::new(self.render_field()), board);

        let help = help_line(&[("↑↓←→", "Move"), ("Enter", "Fire"), ("Esc", "End / Exit"), ("R", "Restart")]);
        frame.render_widget(Paragraph::new(help), chunks[2]);

        if self.phase == Phase::GameOver {
            let (title, color) = match self.outcome {
                Some(Outcome::Survived) => ("You Survived!", Color::Green),
                _ => ("Game Over!", Color::Red),
            };
            render_game_over(
                frame,
                board,
                title,
                color,
                vec![
                    Line::from(Span::styled(
                        format!("Final Score: {}", self.score),
                        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                    )),
                    Line::from(""),
                    Line::from(Span::styled(
                        "Press ESC to exit or R to restart.",
                        Style::default().fg(Color::Gray),
                    )),
                ],
            );
        }
    }

    fn reset(&mut self) {
        info!("zombies: new game");
        self.init();
    }

    fn get_score(&self) -> u32 {
        self.score
    }

    fn phase(&self) -> Phase {
        self.phase
    }

    fn tick_rate(&self) -> Duration {
        self.config.tick_rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn game() -> ZombieAttack {
        ZombieAttack::new(ZombieConfig::default(), GameRng::new(3))
    }

    #[test]
    fn spawns_a_live_horde_in_the_upper_half() {
        let z = game();
        assert_eq!(z.zombies().len(), 5);
        for zombie in z.zombies() {
            assert!(zombie.alive);
            assert!((1..=38).contains(&zombie.position.x));
            assert!((1..10).contains(&zombie.position.y));
        }
        assert_eq!(z.player(), Point::new(20, 18));
        assert_eq!(z.health(), 3);
    }

    #[test]
    fn zombies_advance_one_row_per_tick() {
        let mut z = game();
        z.set_zombies(&[Point::new(5, 2), Point::new(30, 7)]);
        z.update();
        let rows: Vec<i32> = z.zombies().iter().map(|z| z.position.y).collect();
        assert_eq!(rows, vec![3, 8]);
    }

    #[test]
    fn reaching_the_bottom_costs_health() {
        let mut z = game();
        z.set_zombies(&[Point::new(5, 18), Point::new(30, 2)]);
        z.update();
        assert_eq!(z.health(), 2);
        assert_eq!(z.zombies().len(), 1);
        assert_eq!(z.phase(), Phase::Running);
    }

    #[test]
    fn losing_all_health_ends_the_game() {
        let mut z = game();
        z.set_zombies(&[
            Point::new(3, 18),
            Point::new(6, 18),
            Point::new(9, 18),
            Point::new(12, 2),
        ]);
        z.update();
        assert_eq!(z.health(), 0);
        assert_eq!(z.phase(), Phase::GameOver);
        assert_eq!(z.outcome(), Some(Outcome::Overrun));
    }

    #[test]
    fn fired_bullet_travels_up_and_leaves_the_field() {
        let mut z = game();
        z.set_zombies(&[Point::new(2, 1)]);
        z.handle_input(key(KeyCode::Enter));
        z.update();
        assert_eq!(z.bullets(), &[Bullet { position: Point::new(20, 17) }]);
        for _ in 0..16 {
            z.update();
        }
        assert_eq!(z.bullets()[0].position.y, 1);
        assert_eq!(z.phase(), Phase::Running);
        z.update();
        assert!(z.bullets().is_empty());
    }

    #[test]
    fn bullet_and_zombie_on_same_cell_both_go() {
        for order in [false, true] {
            let mut z = game();
            // After one tick the zombie lands on (10, 6) and so does the bullet.
            let mut zombies = vec![Point::new(10, 5), Point::new(25, 3)];
            let mut bullets = vec![Point::new(10, 7), Point::new(30, 12)];
            if order {
                zombies.reverse();
                bullets.reverse();
            }
            z.set_zombies(&zombies);
            z.set_bullets(&bullets);
            z.update();
            assert_eq!(z.get_score(), 1);
            assert_eq!(z.zombies().len(), 1);
            assert_eq!(z.zombies()[0].position, Point::new(25, 4));
            assert_eq!(z.bullets().len(), 1);
            assert_eq!(z.bullets()[0].position, Point::new(30, 11));
        }
    }

    #[test]
    fn one_bullet_clears_a_stacked_cell() {
        let mut z = game();
        z.set_zombies(&[Point::new(10, 5), Point::new(10, 5), Point::new(30, 2)]);
        z.set_bullets(&[Point::new(10, 7)]);
        z.update();
        assert_eq!(z.get_score(), 2);
        assert_eq!(z.zombies().len(), 1);
        assert_eq!(z.zombies()[0].position, Point::new(30, 3));
        assert!(z.bullets().is_empty());
    }

    #[test]
    fn config_bounds() {
        assert!(ZombieConfig::default().validate().is_ok());
        let huge_horde = ZombieConfig {
            zombie_count: usize::MAX / 4,
            ..ZombieConfig::default()
        };
        assert!(matches!(huge_horde.validate(), Err(GameError::Config(_))));
        // 38 columns by 9 spawn rows
        let packed = ZombieConfig {
            zombie_count: 38 * 9,
            ..ZombieConfig::default()
        };
        assert!(packed.validate().is_ok());
        let overfull = ZombieConfig {
            zombie_count: 38 * 9 + 1,
            ..ZombieConfig::default()
        };
        assert!(overfull.validate().is_err());
        let wide = ZombieConfig {
            width: 70_000,
            ..ZombieConfig::default()
        };
        assert!(wide.validate().is_err());
    }

    #[test]
    fn clearing_the_horde_wins() {
        let mut z = game();
        z.set_zombies(&[Point::new(10, 5)]);
        z.set_bullets(&[Point::new(10, 7)]);
        z.update();
        assert_eq!(z.phase(), Phase::GameOver);
        assert_eq!(z.outcome(), Some(Outcome::Survived));
    }

    #[test]
    fn player_stays_inside_the_walls() {
        let mut z = game();
        z.set_zombies(&[Point::new(2, 1)]);
        for _ in 0..3 {
            z.handle_input(key(KeyCode::Down));
            z.update();
        }
        assert_eq!(z.player().y, 18);
    }

    #[test]
    fn one_command_per_tick() {
        let mut z = game();
        z.set_zombies(&[Point::new(2, 1)]);
        z.handle_input(key(KeyCode::Left));
        z.handle_input(key(KeyCode::Enter));
        z.update();
        assert_eq!(z.player(), Point::new(19, 18));
        assert!(z.bullets().is_empty());
    }

    #[test]
    fn escape_ends_then_exits() {
        let mut z = game();
        z.handle_input(key(KeyCode::Esc));
        assert_eq!(z.outcome(), Some(Outcome::Quit));
        z.handle_input(key(KeyCode::Esc));
        assert_eq!(z.phase(), Phase::Exited);
    }
}

use std::collections::VecDeque;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent};
use log::{debug, info};
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::error::{GameError, Result};
use crate::games::canvas::Canvas;
use crate::games::{help_line, render_game_over, Direction as Heading, Game, Phase, Point};
use crate::rng::GameRng;

const SNAKE_CHAR: char = 'O';
const FOOD_CHAR: char = 'X';
const MIN_WIDTH: i32 = 14;
const MIN_HEIGHT: i32 = 12;
const MAX_WIDTH: i32 = 500;
const MAX_HEIGHT: i32 = 200;

#[derive(Clone, Debug)]
pub struct SnakeConfig {
    pub width: i32,
    pub height: i32,
    pub tick_rate: Duration,
}

impl Default for SnakeConfig {
    fn default() -> Self {
        Self {
            width: 40,
            height: 20,
            tick_rate: Duration::from_millis(100),
        }
    }
}

impl SnakeConfig {
    pub fn validate(&self) -> Result<()> {
        if self.width < MIN_WIDTH || self.height < MIN_HEIGHT {
            return Err(GameError::Config(format!(
                "snake board must be at least {}x{}, got {}x{}",
                MIN_WIDTH, MIN_HEIGHT, self.width, self.height
            )));
        }
        if self.width > MAX_WIDTH || self.height > MAX_HEIGHT {
            return Err(GameError::Config(format!(
                "snake board can be at most {}x{}, got {}x{}",
                MAX_WIDTH, MAX_HEIGHT, self.width, self.height
            )));
        }
        Ok(())
    }
}

pub struct Snake {
    config: SnakeConfig,
    rng: GameRng,
    body: VecDeque<Point>,
    dir: Heading,
    // First direction key since the last tick; later ones are dropped.
    pending_dir: Option<Heading>,
    grow: bool,
    food: Point,
    score: u32,
    phase: Phase,
}

impl Snake {
    pub fn new(config: SnakeConfig, rng: GameRng) -> Self {
        let mut s = Self {
            config,
            rng,
            body: VecDeque::new(),
            dir: Heading::Right,
            pending_dir: None,
            grow: false,
            food: Point::new(1, 1),
            score: 0,
            phase: Phase::Running,
        };
        s.init();
        s
    }

    fn init(&mut self) {
        self.body = VecDeque::from(vec![Point::new(10, 10), Point::new(9, 10), Point::new(8, 10)]);
        self.dir = Heading::Right;
        self.pending_dir = None;
        self.grow = false;
        self.score = 0;
        self.phase = Phase::Running;
        self.relocate_food();
    }

    pub fn body(&self) -> &VecDeque<Point> {
        &self.body
    }

    pub fn head(&self) -> Point {
        self.body[0]
    }

    pub fn direction(&self) -> Heading {
        self.dir
    }

    pub fn food(&self) -> Point {
        self.food
    }

    pub fn set_food(&mut self, food: Point) {
        self.food = food;
    }

    pub fn is_growing(&self) -> bool {
        self.grow
    }

    fn is_border(&self, p: Point) -> bool {
        p.x <= 0 || p.x >= self.config.width - 1 || p.y <= 0 || p.y >= self.config.height - 1
    }

    /// Moves the food to a uniformly random interior cell, skipping cells the
    /// snake occupies whenever a free one exists.
    pub fn relocate_food(&mut self) {
        let (w, h) = (self.config.width, self.config.height);
        let free: Vec<Point> = (1..h - 1)
            .flat_map(|y| (1..w - 1).map(move |x| Point::new(x, y)))
            .filter(|p| !self.body.contains(p))
            .collect();
        self.food = if free.is_empty() {
            Point::new(self.rng.gen_range(1..w - 1), self.rng.gen_range(1..h - 1))
        } else {
            free[self.rng.gen_range(0..free.len())]
        };
        debug!("snake: food at ({}, {})", self.food.x, self.food.y);
    }

    fn advance(&mut self) {
        if let Some(dir) = self.pending_dir.take() {
            if dir != self.dir.opposite() {
                self.dir = dir;
            }
        }

        let new_head = self.dir.step(self.head());
        self.body.push_front(new_head);
        if self.grow {
            self.grow = false;
        } else {
            self.body.pop_back();
        }

        if self.is_border(new_head) || self.body.iter().skip(1).any(|p| *p == new_head) {
            if self.phase.finish() {
                info!("snake: crashed at ({}, {}) with score {}", new_head.x, new_head.y, self.score);
            }
            return;
        }

        if new_head == self.food {
            self.grow = true;
            self.score += 1;
            self.relocate_food();
        }
    }

    fn render_board(&self) -> Vec<Line<'static>> {
        let bg = Color::Rgb(10, 10, 20);
        let mut canvas = Canvas::new(self.config.width as usize, self.config.height as usize, Style::default().bg(bg));
        canvas.border(Style::default().fg(Color::Black).bg(Color::White));

        canvas.centered_text(
            1,
            &format!("Score: {}", self.score),
            Style::default().fg(Color::Yellow).bg(bg),
        );

        canvas.set(
            self.food.x,
            self.food.y,
            FOOD_CHAR,
            Style::default().fg(Color::White).bg(Color::Red).add_modifier(Modifier::BOLD),
        );
        for (i, p) in self.body.iter().enumerate() {
            let style = if i == 0 {
                Style::default().fg(Color::White).bg(Color::Rgb(30, 160, 60)).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Black).bg(Color::Green)
            };
            canvas.set(p.x, p.y, SNAKE_CHAR, style);
        }

        canvas.into_lines()
    }
}

impl Game for Snake {
    fn update(&mut self) {
        if self.phase != Phase::Running {
            return;
        }
        self.advance();
    }

    fn handle_input(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => match self.phase {
                Phase::Running => {
                    if self.phase.finish() {
                        info!("snake: ended by player with score {}", self.score);
                    }
                }
                _ => self.phase.exit(),
            },
            KeyCode::Char('r') | KeyCode::Char('R') => {
                if self.phase == Phase::GameOver {
                    self.reset();
                }
            }
            code => {
                if self.phase != Phase::Running || self.pending_dir.is_some() {
                    return;
                }
                let dir = match code {
                    KeyCode::Up => Heading::Up,
                    KeyCode::Down => Heading::Down,
                    KeyCode::Left => Heading::Left,
                    KeyCode::Right => Heading::Right,
                    _ => return,
                };
                if dir != self.dir.opposite() {
                    self.pending_dir = Some(dir);
                }
            }
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Rgb(80, 220, 80)))
            .title(" 🐍 Snake ")
            .title_style(Style::default().fg(Color::Rgb(120, 255, 120)).add_modifier(Modifier::BOLD));

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

        let status = Line::from(vec![
            Span::styled(" 🐍 ", Style::default()),
            Span::styled(
                format!("Score: {} ", self.score),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::styled(" │ ", Style::default().fg(Color::DarkGray)),
            Span::styled(format!("Length: {}", self.body.len()), Style::default().fg(Color::Green)),
        ]);
        frame.render_widget(Paragraph::new(status), chunks[0]);

        let (w, h) = (self.config.width as u16, self.config.height as u16);
        let field = chunks[1];
        if field.width < w || field.height < h {
            let msg = Paragraph::new(format!("Terminal too small: the board needs {}x{}", w, h))
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
        frame.render_widget(Paragraph::new(self.render_board()), board);

        let help = help_line(&[("↑↓←→", "Steer"), ("Esc", "End / Exit"), ("R", "Restart")]);
        frame.render_widget(Paragraph::new(help), chunks[2]);

        if self.phase == Phase::GameOver {
            render_game_over(
                frame,
                board,
                "Game Over!",
                Color::Red,
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
        info!("snake: new game");
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

    fn snake() -> Snake {
        let mut s = Snake::new(SnakeConfig::default(), GameRng::new(1));
        s.set_food(Point::new(1, 1));
        s
    }

    #[test]
    fn starts_with_three_segments_heading_right() {
        let s = Snake::new(SnakeConfig::default(), GameRng::new(9));
        assert_eq!(s.body().len(), 3);
        assert_eq!(s.head(), Point::new(10, 10));
        assert_eq!(s.direction(), Heading::Right);
        assert!(!s.body().contains(&s.food()));
    }

    #[test]
    fn length_is_constant_without_food() {
        let mut s = snake();
        for _ in 0..5 {
            s.update();
            assert_eq!(s.body().len(), 3);
        }
        assert_eq!(s.head(), Point::new(15, 10));
        assert_eq!(s.phase(), Phase::Running);
    }

    #[test]
    fn eating_grows_on_the_following_tick() {
        let mut s = snake();
        s.set_food(Point::new(11, 10));
        s.update();
        assert_eq!(s.get_score(), 1);
        assert!(s.is_growing());
        assert_eq!(s.body().len(), 3);
        assert_ne!(s.food(), Point::new(11, 10));

        s.set_food(Point::new(1, 1));
        s.update();
        assert_eq!(s.body().len(), 4);
        assert!(!s.is_growing());
        s.update();
        assert_eq!(s.body().len(), 4);
    }

    #[test]
    fn hitting_the_wall_ends_the_game() {
        let mut s = snake();
        // Head at x = 10, right wall at x = 39
        for _ in 0..28 {
            s.update();
        }
        assert_eq!(s.phase(), Phase::Running);
        s.update();
        assert_eq!(s.head(), Point::new(39, 10));
        assert_eq!(s.phase(), Phase::GameOver);

        let body = s.body().clone();
        s.update();
        assert_eq!(s.body(), &body);
    }

    #[test]
    fn running_into_itself_ends_the_game() {
        let mut s = snake();
        s.body = VecDeque::from(vec![
            Point::new(10, 10),
            Point::new(9, 10),
            Point::new(9, 11),
            Point::new(10, 11),
            Point::new(11, 11),
            Point::new(11, 10),
            Point::new(12, 10),
        ]);
        s.dir = Heading::Right;
        s.update();
        assert_eq!(s.phase(), Phase::GameOver);
    }

    #[test]
    fn moving_into_the_vacated_tail_is_safe() {
        let mut s = snake();
        s.body = VecDeque::from(vec![
            Point::new(10, 10),
            Point::new(10, 11),
            Point::new(11, 11),
            Point::new(11, 10),
        ]);
        s.dir = Heading::Right;
        s.update();
        assert_eq!(s.phase(), Phase::Running);
        assert_eq!(s.head(), Point::new(11, 10));
    }

    #[test]
    fn reversal_is_ignored() {
        let mut s = snake();
        s.handle_input(key(KeyCode::Left));
        s.update();
        assert_eq!(s.direction(), Heading::Right);
        assert_eq!(s.head(), Point::new(11, 10));
    }

    #[test]
    fn one_turn_per_tick() {
        let mut s = snake();
        s.handle_input(key(KeyCode::Up));
        s.handle_input(key(KeyCode::Left));
        s.update();
        assert_eq!(s.direction(), Heading::Up);
        assert_eq!(s.head(), Point::new(10, 9));
        s.handle_input(key(KeyCode::Left));
        s.update();
        assert_eq!(s.direction(), Heading::Left);
    }

    #[test]
    fn escape_ends_then_exits() {
        let mut s = snake();
        s.handle_input(key(KeyCode::Esc));
        assert_eq!(s.phase(), Phase::GameOver);
        s.handle_input(key(KeyCode::Char('r')));
        assert_eq!(s.phase(), Phase::Running);
        s.handle_input(key(KeyCode::Esc));
        s.handle_input(key(KeyCode::Esc));
        assert_eq!(s.phase(), Phase::Exited);
    }

    #[test]
    fn too_small_board_is_rejected() {
        let config = SnakeConfig {
            width: 10,
            ..SnakeConfig::default()
        };
        assert!(config.validate().is_err());
        assert!(SnakeConfig::default().validate().is_ok());
    }

    #[test]
    fn oversized_board_is_rejected() {
        let wide = SnakeConfig {
            width: 70_000,
            ..SnakeConfig::default()
        };
        assert!(matches!(wide.validate(), Err(GameError::Config(_))));
        let tall = SnakeConfig {
            height: MAX_HEIGHT + 1,
            ..SnakeConfig::default()
        };
        assert!(tall.validate().is_err());
        let largest = SnakeConfig {
            width: MAX_WIDTH,
            height: MAX_HEIGHT,
            ..SnakeConfig::default()
        };
        assert!(largest.validate().is_ok());
    }
}

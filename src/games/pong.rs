use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent};
use log::{debug, info};
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::error::{GameError, Result};
use crate::games::canvas::Canvas;
use crate::games::{help_line, render_game_over, Game, Phase, Point};

const DEFAULT_WIDTH: i32 = 80;
const DEFAULT_HEIGHT: i32 = 24;
const MIN_WIDTH: i32 = 10;
const MIN_HEIGHT: i32 = 6;
const MAX_PADDLE_HEIGHT: i32 = 10;

#[derive(Clone, Debug)]
pub struct PongConfig {
    pub win_score: u32,
    pub paddle_height: i32,
    pub tick_rate: Duration,
}

impl Default for PongConfig {
    fn default() -> Self {
        Self {
            win_score: 3,
            paddle_height: 4,
            tick_rate: Duration::from_millis(50),
        }
    }
}

impl PongConfig {
    pub fn validate(&self) -> Result<()> {
        if self.win_score == 0 {
            return Err(GameError::Config("pong win score must be at least 1".into()));
        }
        if !(1..=MAX_PADDLE_HEIGHT).contains(&self.paddle_height) {
            return Err(GameError::Config(format!(
                "pong paddle height must be between 1 and {}",
                MAX_PADDLE_HEIGHT
            )));
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn label(self) -> &'static str {
        match self {
            Side::Left => "Player 1",
            Side::Right => "Player 2",
        }
    }
}

pub struct Pong {
    config: PongConfig,
    width: i32,
    height: i32,
    ball: Point,
    ball_dx: i32,
    ball_dy: i32,
    left_paddle_y: i32,
    right_paddle_y: i32,
    score_left: u32,
    score_right: u32,
    winner: Option<Side>,
    phase: Phase,
}

impl Pong {
    pub fn new(config: PongConfig) -> Self {
        Self::with_size(config, DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }

    pub fn with_size(config: PongConfig, width: i32, height: i32) -> Self {
        let mut p = Self {
            config,
            width: width.max(MIN_WIDTH),
            height: height.max(MIN_HEIGHT),
            ball: Point::new(0, 0),
            ball_dx: 1,
            ball_dy: 1,
            left_paddle_y: 0,
            right_paddle_y: 0,
            score_left: 0,
            score_right: 0,
            winner: None,
            phase: Phase::Running,
        };
        p.init();
        p
    }

    fn init(&mut self) {
        let (w, h) = (self.width, self.height);
        self.ball = Point::new(w / 2, h / 2);
        self.ball_dx = 1;
        self.ball_dy = 1;
        self.left_paddle_y = h / 2 - self.config.paddle_height / 2;
        self.right_paddle_y = self.left_paddle_y;
        self.score_left = 0;
        self.score_right = 0;
        self.winner = None;
        self.phase = Phase::Running;
    }

    pub fn ball(&self) -> Point {
        self.ball
    }

    pub fn ball_velocity(&self) -> (i32, i32) {
        (self.ball_dx, self.ball_dy)
    }

    pub fn paddles(&self) -> (i32, i32) {
        (self.left_paddle_y, self.right_paddle_y)
    }

    pub fn scores(&self) -> (u32, u32) {
        (self.score_left, self.score_right)
    }

    pub fn winner(&self) -> Option<Side> {
        self.winner
    }

    /// Places the ball directly, for setting up rallies.
    pub fn set_ball(&mut self, position: Point, dx: i32, dy: i32) {
        self.ball = position;
        self.ball_dx = dx;
        self.ball_dy = dy;
    }

    /// Adopt a new field size, pulling the ball and paddles back inside it.
    pub fn resize(&mut self, width: i32, height: i32) {
        let (width, height) = (width.max(MIN_WIDTH), height.max(MIN_HEIGHT));
        if width == self.width && height == self.height {
            return;
        }
        debug!("pong field resized to {}x{}", width, height);
        self.width = width;
        self.height = height;
        let max_paddle = self.max_paddle_y();
        self.left_paddle_y = self.left_paddle_y.clamp(0, max_paddle);
        self.right_paddle_y = self.right_paddle_y.clamp(0, max_paddle);
        self.ball.x = self.ball.x.clamp(1, width - 2);
        self.ball.y = self.ball.y.clamp(1, height - 2);
    }

    fn max_paddle_y(&self) -> i32 {
        (self.height - self.config.paddle_height).max(0)
    }

    fn paddle_covers(&self, paddle_y: i32, y: i32) -> bool {
        y >= paddle_y && y < paddle_y + self.config.paddle_height
    }

    fn move_ball(&mut self) {
        let (w, h) = (self.width, self.height);
        self.ball.x += self.ball_dx;
        self.ball.y += self.ball_dy;

        // Top and bottom walls
        if self.ball.y <= 0 || self.ball.y >= h - 1 {
            self.ball_dy = -self.ball_dy;
        }

        // Paddles
        if self.ball.x == 1 && self.paddle_covers(self.left_paddle_y, self.ball.y) {
            self.ball_dx = -self.ball_dx;
        }
        if self.ball.x == w - 2 && self.paddle_covers(self.right_paddle_y, self.ball.y) {
            self.ball_dx = -self.ball_dx;
        }

        // Out of bounds scores for the other side
        if self.ball.x <= 0 {
            self.point_for(Side::Right);
        } else if self.ball.x >= w - 1 {
            self.point_for(Side::Left);
        }
    }

    fn point_for(&mut self, side: Side) {
        match side {
            Side::Left => {
                self.score_left += 1;
                self.ball_dx = -1;
            }
            Side::Right => {
                self.score_right += 1;
                self.ball_dx = 1;
            }
        }
        self.ball = Point::new(self.width / 2, self.height / 2);
        info!(
            "pong: point for {} ({} - {})",
            side.label(),
            self.score_left,
            self.score_right
        );
        self.check_winner();
    }

    fn check_winner(&mut self) {
        let winner = if self.score_left >= self.config.win_score {
            Side::Left
        } else if self.score_right >= self.config.win_score {
            Side::Right
        } else {
            return;
        };
        if self.phase.finish() {
            self.winner = Some(winner);
            info!("pong: {} wins", winner.label());
        }
    }

    fn render_field(&self, width: usize, height: usize) -> Vec<Line<'static>> {
        let bg = Color::Rgb(10, 10, 20);
        let mut canvas = Canvas::new(width, height, Style::default().bg(bg));

        // Net
        let mid = self.width / 2;
        for y in (0..self.height).step_by(2) {
            canvas.set(mid, y, '┊', Style::default().fg(Color::Rgb(50, 50, 70)).bg(bg));
        }

        canvas.centered_text(
            1,
            &format!("{} - {}", self.score_left, self.score_right),
            Style::default().fg(Color::Yellow).bg(bg).add_modifier(Modifier::BOLD),
        );

        let paddle_style = Style::default().fg(Color::White).bg(bg);
        for i in 0..self.config.paddle_height {
            canvas.set(0, self.left_paddle_y + i, '█', paddle_style);
            canvas.set(self.width - 1, self.right_paddle_y + i, '█', paddle_style);
        }

        canvas.set(
            self.ball.x,
            self.ball.y,
            '●',
            Style::default().fg(Color::Rgb(255, 80, 80)).bg(bg).add_modifier(Modifier::BOLD),
        );

        canvas.into_lines()
    }
}

impl Game for Pong {
    fn update(&mut self) {
        if self.phase != Phase::Running {
            return;
        }
        self.move_ball();
    }

    fn handle_input(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.phase.exit(),
            KeyCode::Char('r') | KeyCode::Char('R') => {
                if self.phase == Phase::GameOver {
                    self.reset();
                }
            }
            _ => {
                if self.phase != Phase::Running {
                    return;
                }
                let max_paddle = self.max_paddle_y();
                match key.code {
                    KeyCode::Char('w') | KeyCode::Char('W') => {
                        self.left_paddle_y = (self.left_paddle_y - 1).max(0);
                    }
                    KeyCode::Char('s') | KeyCode::Char('S') => {
                        self.left_paddle_y = (self.left_paddle_y + 1).min(max_paddle);
                    }
                    KeyCode::Up => {
                        self.right_paddle_y = (self.right_paddle_y - 1).max(0);
                    }
                    KeyCode::Down => {
                        self.right_paddle_y = (self.right_paddle_y + 1).min(max_paddle);
                    }
                    _ => {}
                }
            }
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Rgb(80, 200, 255)))
            .title(" 🏓 Pong ")
            .title_style(Style::default().fg(Color::Rgb(120, 220, 255)).add_modifier(Modifier::BOLD));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(MIN_HEIGHT as u16),
                Constraint::Length(1),
            ])
            .split(inner);

        let status = Line::from(vec![
            Span::styled(" 🏓 ", Style::default()),
            Span::styled(
                format!("Player 1: {} ", self.score_left),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::styled(" │ ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("Player 2: {} ", self.score_right),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::styled(" │ ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("First to {}", self.config.win_score),
                Style::default().fg(Color::Cyan),
            ),
        ]);
        frame.render_widget(Paragraph::new(status), chunks[0]);

        // Field follows the terminal size
        let field = chunks[1];
        self.resize(field.width as i32, field.height as i32);
        let lines = self.render_field(field.width as usize, field.height as usize);
        frame.render_widget(Paragraph::new(lines), field);

        let help = help_line(&[("W/S", "Player 1"), ("↑/↓", "Player 2"), ("Esc", "Exit"), ("R", "Restart")]);
        frame.render_widget(Paragraph::new(help), chunks[2]);

        if self.phase == Phase::GameOver {
            let winner = self.winner.map(Side::label).unwrap_or("Nobody");
            render_game_over(
                frame,
                field,
                &format!("{} Wins!", winner),
                Color::Green,
                vec![
                    Line::from(Span::styled(
                        format!("{} - {}", self.score_left, self.score_right),
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
        info!("pong: new match");
        self.init();
    }

    fn get_score(&self) -> u32 {
        self.score_left.max(self.score_right)
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

    fn pong() -> Pong {
        Pong::with_size(PongConfig::default(), 40, 20)
    }

    #[test]
    fn help_line_lists_restart() {
        let mut p = pong();
        let mut terminal = ratatui::Terminal::new(ratatui::backend::TestBackend::new(80, 24)).unwrap();
        terminal.draw(|f| p.render(f, f.area())).unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(text.contains("R Restart"));
    }

    #[test]
    fn starts_centered() {
        let p = pong();
        assert_eq!(p.ball(), Point::new(20, 10));
        assert_eq!(p.ball_velocity(), (1, 1));
        assert_eq!(p.paddles(), (8, 8));
        assert_eq!(p.phase(), Phase::Running);
    }

    #[test]
    fn ball_reflects_off_top_wall() {
        let mut p = pong();
        p.set_ball(Point::new(20, 1), 1, -1);
        p.update();
        assert_eq!(p.ball(), Point::new(21, 0));
        assert_eq!(p.ball_velocity(), (1, 1));
        p.update();
        assert_eq!(p.ball(), Point::new(22, 1));
    }

    #[test]
    fn left_paddle_returns_ball() {
        let mut p = pong();
        let (left, _) = p.paddles();
        p.set_ball(Point::new(2, left + 1), -1, 0);
        p.update();
        assert_eq!(p.ball().x, 1);
        assert_eq!(p.ball_velocity().0, 1);
        assert_eq!(p.scores(), (0, 0));
    }

    #[test]
    fn right_paddle_returns_ball() {
        let mut p = pong();
        let (_, right) = p.paddles();
        p.set_ball(Point::new(37, right), 1, 0);
        p.update();
        assert_eq!(p.ball().x, 38);
        assert_eq!(p.ball_velocity().0, -1);
    }

    #[test]
    fn missed_ball_scores_for_opponent_and_respawns() {
        let mut p = pong();
        p.set_ball(Point::new(1, 1), -1, 0);
        p.update();
        assert_eq!(p.scores(), (0, 1));
        assert_eq!(p.ball(), Point::new(20, 10));
        assert_eq!(p.ball_velocity().0, 1);

        p.set_ball(Point::new(38, 1), 1, 0);
        p.update();
        assert_eq!(p.scores(), (1, 1));
        assert_eq!(p.ball_velocity().0, -1);
    }

    #[test]
    fn win_fires_exactly_at_threshold() {
        let mut p = pong();
        for expected in 1..=3u32 {
            assert_eq!(p.phase(), Phase::Running);
            assert_eq!(p.winner(), None);
            p.set_ball(Point::new(38, 1), 1, 0);
            p.update();
            assert_eq!(p.scores().0, expected);
        }
        assert_eq!(p.phase(), Phase::GameOver);
        assert_eq!(p.winner(), Some(Side::Left));

        // Frozen after the match ends
        let ball = p.ball();
        p.update();
        assert_eq!(p.ball(), ball);
        assert_eq!(p.scores(), (3, 0));
    }

    #[test]
    fn paddles_are_clamped() {
        let mut p = pong();
        for _ in 0..50 {
            p.handle_input(key(KeyCode::Char('w')));
            p.handle_input(key(KeyCode::Down));
        }
        assert_eq!(p.paddles(), (0, 16));
    }

    #[test]
    fn restart_only_after_game_over() {
        let mut p = pong();
        p.set_ball(Point::new(1, 1), -1, 0);
        p.update();
        p.handle_input(key(KeyCode::Char('r')));
        assert_eq!(p.scores(), (0, 1));

        for _ in 0..2 {
            p.set_ball(Point::new(1, 1), -1, 0);
            p.update();
        }
        assert_eq!(p.winner(), Some(Side::Right));
        p.handle_input(key(KeyCode::Char('r')));
        assert_eq!(p.scores(), (0, 0));
        assert_eq!(p.phase(), Phase::Running);
    }

    #[test]
    fn escape_exits_from_any_phase() {
        let mut p = pong();
        p.handle_input(key(KeyCode::Esc));
        assert_eq!(p.phase(), Phase::Exited);
    }

    #[test]
    fn resize_pulls_entities_inside() {
        let mut p = Pong::with_size(PongConfig::default(), 80, 40);
        p.set_ball(Point::new(70, 35), 1, 1);
        p.resize(30, 12);
        assert_eq!(p.ball(), Point::new(28, 10));
        let (l, r) = p.paddles();
        assert!(l <= 8 && r <= 8);
    }

    #[test]
    fn config_validation() {
        assert!(PongConfig::default().validate().is_ok());
        let bad = PongConfig {
            win_score: 0,
            ..PongConfig::default()
        };
        assert!(bad.validate().is_err());
    }
}

pub mod canvas;
pub mod hangman;
pub mod pong;
pub mod snake;
pub mod zombies;

use std::time::Duration;

use crossterm::event::KeyEvent;
use ratatui::prelude::*;
use ratatui::widgets::*;

/// Session lifecycle shared by every game. `Init` is the constructor (or
/// `reset`), which hands over straight to `Running`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Running,
    GameOver,
    Exited,
}

impl Phase {
    /// Running -> GameOver. Returns false when the session had already ended.
    pub fn finish(&mut self) -> bool {
        if *self == Phase::Running {
            *self = Phase::GameOver;
            true
        } else {
            false
        }
    }

    pub fn exit(&mut self) {
        *self = Phase::Exited;
    }
}

pub trait Game {
    fn update(&mut self);
    fn handle_input(&mut self, key: KeyEvent);
    fn render(&mut self, frame: &mut Frame, area: Rect);
    fn reset(&mut self);
    fn get_score(&self) -> u32;
    fn phase(&self) -> Phase;
    fn tick_rate(&self) -> Duration;

    fn is_game_over(&self) -> bool {
        self.phase() != Phase::Running
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn step(self, p: Point) -> Point {
        match self {
            Direction::Up => Point::new(p.x, p.y - 1),
            Direction::Down => Point::new(p.x, p.y + 1),
            Direction::Left => Point::new(p.x - 1, p.y),
            Direction::Right => Point::new(p.x + 1, p.y),
        }
    }
}

/// Centered game-over box drawn over the playfield.
pub fn render_game_over(frame: &mut Frame, area: Rect, title: &str, title_color: Color, lines: Vec<Line>) {
    let overlay_w = 40u16.min(area.width.saturating_sub(2));
    let overlay_h = (lines.len() as u16 + 4).min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(overlay_w)) / 2;
    let y = area.y + (area.height.saturating_sub(overlay_h)) / 2;
    let overlay_area = Rect::new(x, y, overlay_w, overlay_h);

    frame.render_widget(Clear, overlay_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(title_color))
        .title(format!(" {} ", title))
        .title_alignment(Alignment::Center)
        .title_style(Style::default().fg(title_color).add_modifier(Modifier::BOLD))
        .style(Style::default().bg(Color::Rgb(15, 15, 25)));
    let inner = block.inner(overlay_area);
    frame.render_widget(block, overlay_area);

    let mut body = vec![Line::from("")];
    body.extend(lines);
    let p = Paragraph::new(body)
        .alignment(Alignment::Center)
        .style(Style::default().bg(Color::Rgb(15, 15, 25)));
    frame.render_widget(p, inner);
}

/// Key legend shown under a playfield.
pub fn help_line(entries: &[(&'static str, &'static str)]) -> Line<'static> {
    let mut spans = Vec::with_capacity(entries.len() * 2);
    for (i, (key, action)) in entries.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("│ ", Style::default().fg(Color::Rgb(60, 60, 60))));
        }
        spans.push(Span::styled(
            format!(" {} ", key),
            Style::default().fg(Color::Rgb(80, 200, 255)).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(format!("{} ", action), Style::default().fg(Color::DarkGray)));
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finish_is_idempotent() {
        let mut phase = Phase::Running;
        assert!(phase.finish());
        assert!(!phase.finish());
        assert_eq!(phase, Phase::GameOver);
        phase.exit();
        assert!(!phase.finish());
        assert_eq!(phase, Phase::Exited);
    }

    #[test]
    fn direction_step_and_opposite() {
        let p = Point::new(5, 5);
        for dir in [Direction::Up, Direction::Down, Direction::Left, Direction::Right] {
            assert_eq!(dir.opposite().step(dir.step(p)), p);
        }
        assert_eq!(Direction::Up.step(p), Point::new(5, 4));
    }
}

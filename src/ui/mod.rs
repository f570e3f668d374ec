pub mod home;
pub mod tabs;

use ratatui::prelude::*;

use crate::app::{App, Tab};
use crate::games::Game;

pub fn render(frame: &mut Frame, app: &mut App) {
    // A game launched on its own gets the whole screen
    if app.standalone {
        let area = frame.area();
        render_content(frame, app, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tab bar
            Constraint::Min(0),   // Content
        ])
        .split(frame.area());

    tabs::render_tabs(frame, app, chunks[0]);
    render_content(frame, app, chunks[1]);
}

fn render_content(frame: &mut Frame, app: &mut App, area: Rect) {
    match app.current_tab {
        Tab::Home => home::render_home(frame, area, app.selected_game),
        Tab::Hangman => app.hangman.render(frame, area),
        Tab::Pong => app.pong.render(frame, area),
        Tab::Snake => app.snake.render(frame, area),
        Tab::Zombies => app.zombies.render(frame, area),
    }
}

use ratatui::prelude::*;
use ratatui::widgets::*;

const BANNER: &str = r#"
 ╔═══════════════════════════════════════════════════════════════════╗
 ║  ▀█▀ █▀▀ █▀█ █▀▄▀█   ▄▀█ █▀█ █▀▀ ▄▀█ █▀▄ █▀▀                      ║
 ║   █  ██▄ █▀▄ █ ▀ █   █▀█ █▀▄ █▄▄ █▀█ █▄▀ ██▄                      ║
 ╚═══════════════════════════════════════════════════════════════════╝"#;

struct GameTile {
    key: &'static str,
    icon: &'static str,
    name: &'static str,
    desc: &'static str,
    color: Color,
    border_color: Color,
}

const GAME_TILES: [GameTile; 4] = [
    GameTile { key: "1", icon: "🪢", name: "Hangman", desc: "Guess the word\nletter by letter", color: Color::Rgb(255, 200, 110), border_color: Color::Rgb(140, 100, 50) },
    GameTile { key: "2", icon: "🏓", name: "Pong", desc: "Two players,\nfirst to three", color: Color::Rgb(120, 220, 255), border_color: Color::Rgb(50, 100, 140) },
    GameTile { key: "3", icon: "🐍", name: "Snake", desc: "Eat, grow,\ndon't bite yourself", color: Color::Rgb(120, 255, 120), border_color: Color::Rgb(40, 120, 40) },
    GameTile { key: "4", icon: "🧟", name: "Zombie Attack", desc: "Hold the line\nagainst the horde", color: Color::Rgb(255, 90, 90), border_color: Color::Rgb(120, 40, 40) },
];

fn render_game_tile(frame: &mut Frame, area: Rect, tile: &GameTile, selected: bool) {
    let border_color = if selected { Color::Rgb(255, 220, 80) } else { tile.border_color };
    let border_type = if selected { BorderType::Double } else { BorderType::Rounded };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(border_type)
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height == 0 || inner.width == 0 { return; }

    let mut lines: Vec<Line> = Vec::new();

    let name_color = if selected { Color::Rgb(255, 255, 255) } else { tile.color };
    lines.push(Line::from(vec![
        Span::styled(format!("[{}] ", tile.key), Style::default().fg(Color::Rgb(255, 220, 80)).add_modifier(Modifier::BOLD)),
        Span::styled(format!("{} ", tile.icon), Style::default()),
        Span::styled(tile.name, Style::default().fg(name_color).add_modifier(Modifier::BOLD)),
    ]));

    for desc_line in tile.desc.split('\n') {
        lines.push(Line::from(vec![
            Span::styled(desc_line, Style::default().fg(if selected { Color::Rgb(180, 180, 200) } else { Color::Rgb(120, 120, 140) })),
        ]));
    }

    if selected {
        lines.push(Line::from(vec![
            Span::styled("▶ Enter to play", Style::default().fg(Color::Rgb(255, 220, 80)).add_modifier(Modifier::BOLD)),
        ]));
    }

    let p = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(p, inner);
}

fn control_line(keys: &'static str, action: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("    {:<17}", keys), Style::default().fg(Color::Rgb(80, 200, 255))),
        Span::styled(action, Style::default().fg(Color::Rgb(140, 140, 140))),
    ])
}

fn game_controls(game_idx: usize) -> Vec<Line<'static>> {
    let (tagline, controls): (&str, &[(&'static str, &'static str)]) = match game_idx {
        0 => ("Nine misses and the drawing is complete.", &[
            ("A-Z  Enter", "Guess a letter"),
            ("Backspace", "Edit guess"),
            ("R", "New word (after a round)"),
            ("Esc", "Exit"),
        ]),
        1 => ("Miss the ball and your rival scores.", &[
            ("W / S", "Player 1 paddle"),
            ("↑ / ↓", "Player 2 paddle"),
            ("R", "Restart (after a match)"),
            ("Esc", "Exit"),
        ]),
        2 => ("Walls and your own tail are fatal.", &[
            ("↑ ↓ ← →", "Steer"),
            ("R", "Restart (after a game)"),
            ("Esc", "End, then exit"),
        ]),
        3 => ("Every zombie that gets through costs a heart.", &[
            ("↑ ↓ ← →", "Move"),
            ("Enter / Space", "Fire"),
            ("R", "Restart (after a game)"),
            ("Esc", "End, then exit"),
        ]),
        _ => return vec![],
    };

    let tile = &GAME_TILES[game_idx];
    let mut lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled(format!("  {} {}", tile.icon, tile.name), Style::default().fg(tile.color).add_modifier(Modifier::BOLD)),
        ]),
        Line::from(vec![
            Span::styled(format!("  {}", tagline), Style::default().fg(Color::Rgb(100, 100, 120))),
        ]),
        Line::from(""),
    ];
    lines.extend(controls.iter().map(|&(k, a)| control_line(k, a)));
    lines
}

pub fn render_home(frame: &mut Frame, area: Rect, selected_game: usize) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),  // Banner
            Constraint::Length(2),  // Subtitle
            Constraint::Length(7),  // Game tiles
            Constraint::Min(9),     // Controls area
            Constraint::Length(1),  // Footer
        ])
        .split(area);

    let banner = Paragraph::new(BANNER)
        .style(Style::default().fg(Color::Rgb(80, 200, 255)))
        .alignment(Alignment::Center);
    frame.render_widget(banner, chunks[0]);

    let subtitle = Paragraph::new(Line::from(vec![
        Span::styled(
            "  ⚡ Four games, one terminal ⚡  ",
            Style::default()
                .fg(Color::Rgb(255, 220, 80))
                .add_modifier(Modifier::BOLD | Modifier::ITALIC),
        ),
    ]))
    .alignment(Alignment::Center);
    frame.render_widget(subtitle, chunks[1]);

    let games_block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Rgb(60, 150, 200)))
        .title(" 🎮 Games: ←→ Select, Enter to Play ")
        .title_style(Style::default().fg(Color::Rgb(200, 120, 255)).add_modifier(Modifier::BOLD));
    let games_inner = games_block.inner(chunks[2]);
    frame.render_widget(games_block, chunks[2]);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 4),
            Constraint::Ratio(1, 4),
            Constraint::Ratio(1, 4),
            Constraint::Ratio(1, 4),
        ])
        .split(games_inner);

    for (i, tile) in GAME_TILES.iter().enumerate() {
        render_game_tile(frame, cols[i], tile, selected_game == i);
    }

    let ctrl_cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Percentage(60),
        ])
        .split(chunks[3]);

    let controls = Paragraph::new(vec![
        Line::from(""),
        control_line("1-4", "Launch a game"),
        control_line("← → ↑ ↓", "Select a game"),
        control_line("Enter", "Play selected"),
        control_line("Tab / Shift+Tab", "Switch tabs"),
        control_line("Q / Esc", "Quit"),
    ])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Rgb(60, 150, 200)))
            .title(" ⌨ Navigation ")
            .title_style(Style::default().fg(Color::Rgb(200, 120, 255)).add_modifier(Modifier::BOLD)),
    );
    frame.render_widget(controls, ctrl_cols[0]);

    let selected = selected_game.min(GAME_TILES.len() - 1);
    let game_ctrl = Paragraph::new(game_controls(selected))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::Rgb(50, 100, 140)))
                .title(format!(" 🎮 {} Controls ", GAME_TILES[selected].name))
                .title_style(Style::default().fg(GAME_TILES[selected].color).add_modifier(Modifier::BOLD)),
        );
    frame.render_widget(game_ctrl, ctrl_cols[1]);

    let footer = Paragraph::new(Line::from(vec![
        Span::styled("Ctrl+C", Style::default().fg(Color::Rgb(80, 200, 255)).add_modifier(Modifier::BOLD)),
        Span::styled(" quits from anywhere", Style::default().fg(Color::Rgb(100, 100, 130))),
    ]))
    .alignment(Alignment::Center);
    frame.render_widget(footer, chunks[4]);
}

use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::{App, Tab};

const ACCENT: Color = Color::Rgb(255, 220, 80);
const MUTED: Color = Color::Rgb(120, 120, 140);

fn tab_label(tab: Tab) -> String {
    match tab {
        Tab::Home => tab.title().to_string(),
        _ => format!(" {}:{}", tab.index(), tab.title()),
    }
}

pub fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = Tab::all()
        .iter()
        .map(|&t| {
            let style = if t == app.current_tab {
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(MUTED)
            };
            Line::from(Span::styled(tab_label(t), style))
        })
        .collect();

    let hint = match app.current_tab {
        Tab::Home => " Tab / Shift+Tab switch ",
        _ => " Esc leaves the game ",
    };

    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Rgb(60, 150, 200)))
                .border_type(BorderType::Rounded)
                .title(" 🕹 termarcade ")
                .title_style(
                    Style::default()
                        .fg(Color::Rgb(200, 120, 255))
                        .add_modifier(Modifier::BOLD),
                )
                .title(Line::from(Span::styled(hint, Style::default().fg(MUTED))).right_aligned()),
        )
        .select(app.current_tab.index())
        .style(Style::default().fg(Color::White))
        .highlight_style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD))
        .divider(Span::styled(" │ ", Style::default().fg(Color::Rgb(60, 60, 80))));

    frame.render_widget(tabs, area);
}

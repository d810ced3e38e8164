//! Terminal UI rendering.
//!
//! All drawing logic lives here, separated from application state ([`App`])
//! and input handling ([`crate::input`]).  This makes it easy to change the
//! visual layout without touching business logic.
//!
//! ## For contributors
//!
//! * The layout is a two-row split: a scrollable notification list on top
//!   and a one-line status bar at the bottom.
//! * Colours and styles are defined inline — feel free to extract them into
//!   constants or a theme struct if the palette grows.
//! * [`ratatui`] is the TUI framework; see its docs for widget details.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::app::App;

/// Draw the complete UI for one frame.
///
/// Called once per tick from the main loop.  Delegates to helper functions
/// for each screen region.
pub fn draw(app: &mut App, frame: &mut Frame) {
    let [main_area, status_area] = Layout::vertical([
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    draw_notification_list(app, frame, main_area);
    draw_status_bar(app, frame, status_area);
}

/// Render the scrollable notification list.
fn draw_notification_list(app: &mut App, frame: &mut Frame, area: Rect) {
    let list_items: Vec<ListItem> = app
        .items
        .iter()
        .map(|item| {
            let line = Line::from(vec![
                Span::styled(&item.title, Style::default().fg(Color::White)),
                Span::raw("  "),
                Span::styled(&item.url, Style::default().fg(Color::DarkGray)),
            ]);

            ListItem::new(line)
        })
        .collect();

    let list = List::new(list_items)
        .block(
            Block::default()
                .title(format!(" {} inbox ", app.source_label))
                .borders(Borders::ALL),
        )
        .highlight_style(
            Style::default()
                .add_modifier(Modifier::BOLD)
                .bg(Color::DarkGray),
        )
        .highlight_symbol("▸ ");

    frame.render_stateful_widget(list, area, &mut app.list_state);
}

/// Render the bottom status bar.
fn draw_status_bar(app: &App, frame: &mut Frame, area: Rect) {
    let status = Paragraph::new(Line::from(vec![
        Span::styled(" ", Style::default()),
        Span::styled(&app.status_line, Style::default().fg(Color::Yellow)),
        Span::raw("  "),
        Span::styled(
            format!("{} notifications", app.items.len()),
            Style::default().fg(Color::Green),
        ),
        Span::raw("  q: quit  r: refresh  ↑/↓: scroll  Home/End: jump"),
    ]));
    frame.render_widget(status, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::Item;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn sample_app() -> App {
        let mut app = App::new("GitHub");
        app.set_items(vec![
            Item {
                id: 1,
                title: "PR merged".to_string(),
                url: "https://x/1".to_string(),
            },
            Item {
                id: 2,
                title: "New issue".to_string(),
                url: "https://x/2".to_string(),
            },
        ]);
        app
    }

    // -- rendering (smoke tests) ---------------------------------------------

    #[test]
    fn draw_does_not_panic_with_no_items() {
        let mut app = App::new("GitHub");
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw(&mut app, f)).unwrap();
    }

    #[test]
    fn draw_does_not_panic_with_items() {
        let mut app = sample_app();
        app.select_first();

        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw(&mut app, f)).unwrap();
    }

    #[test]
    fn status_bar_shows_count_and_status() {
        let mut app = sample_app();
        app.status_line = "synced 12:00:05".to_string();

        let backend = TestBackend::new(120, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw(&mut app, f)).unwrap();

        let buf = terminal.backend().buffer().clone();
        let text: String = buf
            .content()
            .iter()
            .map(|c| c.symbol().chars().next().unwrap_or(' '))
            .collect();
        assert!(text.contains("2 notifications"));
        assert!(text.contains("synced 12:00:05"));
    }
}

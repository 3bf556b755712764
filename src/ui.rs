//! Terminal UI rendering.
//!
//! All drawing logic lives here, separated from application state ([`App`])
//! and input handling ([`crate::input`]).  This makes it easy to change the
//! visual layout without touching the acquisition pipeline.
//!
//! ## For contributors
//!
//! * The layout is a two-row split: a scrollable event list on top and a
//!   one-line status bar at the bottom.
//! * Per-record display rules (location splitting, magnitude formatting and
//!   colours, date/time strings) live in [`crate::view`]; keep new display
//!   logic there so it stays unit-testable.
//! * [`ratatui`] is the TUI framework; see its docs for widget details.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::app::App;
use crate::view;

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

    draw_quake_list(app, frame, main_area);
    draw_status_bar(app, frame, status_area);
}

/// Render the scrollable earthquake list.
fn draw_quake_list(app: &mut App, frame: &mut Frame, area: Rect) {
    let list_items: Vec<ListItem> = app
        .quakes
        .iter()
        .map(|quake| {
            let (offset, primary) = view::location_parts(quake);

            let line = Line::from(vec![
                Span::styled(
                    format!("{:>5}", view::format_magnitude(quake.magnitude)),
                    Style::default()
                        .fg(view::magnitude_color(quake.magnitude))
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("  "),
                Span::styled(offset, Style::default().fg(Color::DarkGray)),
                Span::raw(" "),
                Span::styled(primary, Style::default().fg(Color::White)),
                Span::raw("  "),
                Span::styled(
                    format!(
                        "{} {}",
                        view::format_date(quake.time_ms),
                        view::format_time(quake.time_ms)
                    ),
                    Style::default().fg(Color::Cyan),
                ),
            ]);

            ListItem::new(line)
        })
        .collect();

    let list = List::new(list_items)
        .block(
            Block::default()
                .title(" Earthquakes ")
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
        Span::styled(&app.status, Style::default().fg(Color::Yellow)),
        Span::raw("  "),
        Span::styled(
            format!("{} events", app.quakes.len()),
            Style::default().fg(Color::Green),
        ),
        Span::raw("  q: quit  r: refresh  ↑/↓: scroll  Home/End: jump"),
    ]));
    frame.render_widget(status, area);
}

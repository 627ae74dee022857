//! Rendering of the garage screen
//!
//! Layout, top to bottom: header, floor picker, slot table, plate input,
//! status line, key help.

use crate::domain::types::Floor;
use crate::ui::app::App;
use crate::ui::slot_view::SlotView;
use chrono::Utc;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Row, Table, Tabs},
    Frame,
};

pub fn draw_ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(3), // Floor picker
            Constraint::Length(9), // Slots
            Constraint::Length(3), // Input
            Constraint::Length(3), // Status
            Constraint::Min(0),    // Help
        ])
        .split(f.area());

    draw_header(f, chunks[0], app);
    draw_floor_tabs(f, chunks[1], app);
    draw_slot_table(f, chunks[2], app);
    draw_input(f, chunks[3], app);
    draw_status(f, chunks[4], app);
    draw_help(f, chunks[5]);
}

fn draw_header(f: &mut Frame, area: Rect, app: &App) {
    let garage = app.session.garage();
    let occupied = garage.occupied_count();
    let capacity = garage.capacity();
    let occupancy_color = if occupied == capacity { Color::Red } else { Color::Green };

    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            format!("{} ", app.garage_name),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw("| Occupied: "),
        Span::styled(format!("{}/{}", occupied, capacity), Style::default().fg(occupancy_color)),
        Span::raw(" | Revenue: "),
        Span::styled(
            format!("{} {}", app.session.metrics().revenue(), app.session.tariff().currency()),
            Style::default().fg(Color::Yellow),
        ),
        Span::raw(format!(
            " | Rate: {} {}/min",
            app.session.tariff().rate_per_minute(),
            app.session.tariff().currency()
        )),
    ]))
    .block(Block::default().borders(Borders::ALL));

    f.render_widget(header, area);
}

fn draw_floor_tabs(f: &mut Frame, area: Rect, app: &App) {
    let titles: Vec<Line> = Floor::ALL
        .iter()
        .map(|&floor| Line::from(format!("{} ({} free)", floor, app.session.free_count(floor))))
        .collect();

    let tabs = Tabs::new(titles)
        .select(app.session.selected_floor().index())
        .highlight_style(Style::default().fg(Color::Black).bg(Color::Cyan))
        .block(
            Block::default()
                .title(" Floor ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Blue)),
        );

    f.render_widget(tabs, area);
}

fn draw_slot_table(f: &mut Frame, area: Rect, app: &App) {
    let now = Utc::now();
    let tariff = app.session.tariff();

    let rows: Vec<Row> = app
        .session
        .visible_slots()
        .iter()
        .enumerate()
        .map(|(i, slot)| {
            let view = SlotView::new(slot, tariff, now);
            let icon = if view.is_free { "○" } else { "●" };
            let mut style = Style::default().fg(view.color);
            if i == app.cursor() {
                style = style.add_modifier(Modifier::REVERSED);
            }
            Row::new(vec![
                icon.to_string(),
                view.number.to_string(),
                view.info,
                view.since,
                view.running_fee,
            ])
            .style(style)
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(3),  // Status
            Constraint::Length(5),  // Slot
            Constraint::Length(12), // Plate
            Constraint::Length(10), // Since
            Constraint::Length(14), // Fee
        ],
    )
    .header(
        Row::new(vec!["", "Slot", "Vehicle", "Since", "Fee so far"])
            .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
    )
    .block(
        Block::default()
            .title(format!(" Slots {} ", app.session.selected_floor()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Blue)),
    );

    f.render_widget(table, area);
}

fn draw_input(f: &mut Frame, area: Rect, app: &App) {
    let input = Paragraph::new(Line::from(vec![
        Span::raw(app.session.input().to_string()),
        Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
    ]))
    .block(
        Block::default()
            .title(" License plate (e.g. ZH 12345) ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow)),
    );

    f.render_widget(input, area);
}

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
    let status = Paragraph::new(app.session.status().to_string()).block(
        Block::default()
            .title(" Status ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Magenta)),
    );

    f.render_widget(status, area);
}

fn draw_help(f: &mut Frame, area: Rect) {
    let help = Paragraph::new(Line::from(vec![
        Span::styled("←/→", Style::default().fg(Color::Cyan)),
        Span::raw(" floor  "),
        Span::styled("↑/↓", Style::default().fg(Color::Cyan)),
        Span::raw(" slot  "),
        Span::styled("Enter", Style::default().fg(Color::Cyan)),
        Span::raw(" park in  "),
        Span::styled("Del/F2", Style::default().fg(Color::Cyan)),
        Span::raw(" park out  "),
        Span::styled("Esc", Style::default().fg(Color::Cyan)),
        Span::raw(" quit"),
    ]))
    .style(Style::default().fg(Color::DarkGray));

    f.render_widget(help, area);
}

//! Ratatui rendering: search bar, sidebar controls, and the card list.
//!
//! Rendering is read-only with respect to the engine: everything drawn here
//! is derived from the record store and the current param snapshot.

use crate::app_core::state::{AppState, MODE_CHOICES, Pane, SORT_CHOICES};
use crate::model::{ConsultMode, Doctor};
use crate::query::SortKey;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap};
use unicode_width::UnicodeWidthChar;

pub fn render(f: &mut Frame, app: &mut AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Search bar
            Constraint::Min(3),    // Sidebar + cards
            Constraint::Length(1), // Status line
        ])
        .split(f.area());

    render_search_bar(f, app, chunks[0]);

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(32), Constraint::Percentage(68)])
        .split(chunks[1]);

    let sidebar_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Sort radios
            Constraint::Length(5), // Mode radios
            Constraint::Min(4),    // Specialty checkboxes
        ])
        .split(main_chunks[0]);

    render_sort(f, app, sidebar_chunks[0]);
    render_mode(f, app, sidebar_chunks[1]);
    render_specialties(f, app, sidebar_chunks[2]);
    render_cards(f, app, main_chunks[1]);
    render_status(f, app, chunks[2]);

    if app.show_help {
        render_help(f, app);
    }
}

fn border_style(app: &AppState, pane: Pane) -> Style {
    if app.focused_pane == pane {
        app.theme.border_selected
    } else {
        app.theme.border
    }
}

fn render_search_bar(f: &mut Frame, app: &AppState, area: Rect) {
    let width = area.width.max(3) - 3; // borders plus one cell for the cursor
    let visual_cursor: u16 = app
        .search_text
        .chars()
        .take(app.search_cursor)
        .map(|c| c.width().unwrap_or(0) as u16)
        .sum();
    let scroll = visual_cursor.saturating_sub(width);

    let input = Paragraph::new(app.search_text.as_str())
        .scroll((0, scroll))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Search doctors ('/' to focus)")
                .title_style(app.theme.title)
                .border_style(border_style(app, Pane::Search)),
        );
    f.render_widget(input, area);

    if app.focused_pane == Pane::Search {
        f.set_cursor_position((area.x + 1 + visual_cursor - scroll, area.y + 1));
    }
}

fn radio_line<'a>(app: &AppState, label: &'a str, active: bool, under_cursor: bool) -> Line<'a> {
    let mark = if active { "(x) " } else { "( ) " };
    let mark_style = if active {
        app.theme.accent
    } else {
        app.theme.muted
    };
    let label_style = if under_cursor {
        app.theme.list_selected
    } else {
        Style::default()
    };
    Line::from(vec![
        Span::styled(mark, mark_style),
        Span::styled(label, label_style),
    ])
}

fn render_sort(f: &mut Frame, app: &AppState, area: Rect) {
    let query = app.controller.query();
    let focused = app.focused_pane == Pane::Sort;
    let lines: Vec<Line> = SORT_CHOICES
        .iter()
        .enumerate()
        .map(|(idx, choice)| {
            let label = match choice {
                None => "Relevance (none)",
                Some(SortKey::Fees) => "Price: Low - High",
                Some(SortKey::Experience) => "Experience",
            };
            radio_line(
                app,
                label,
                query.sort == *choice,
                focused && app.sort_cursor == idx,
            )
        })
        .collect();

    let title = format!("Sort by [{}]", query.sort_order.as_str());
    let block = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .title_style(app.theme.title)
            .border_style(border_style(app, Pane::Sort)),
    );
    f.render_widget(block, area);
}

fn render_mode(f: &mut Frame, app: &AppState, area: Rect) {
    let query = app.controller.query();
    let focused = app.focused_pane == Pane::Mode;
    let lines: Vec<Line> = MODE_CHOICES
        .iter()
        .enumerate()
        .map(|(idx, choice)| {
            let label = match choice {
                None => "All",
                Some(mode) => mode.label(),
            };
            radio_line(
                app,
                label,
                query.mode == *choice,
                focused && app.mode_cursor == idx,
            )
        })
        .collect();

    let block = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Mode of consultation")
            .title_style(app.theme.title)
            .border_style(border_style(app, Pane::Mode)),
    );
    f.render_widget(block, area);
}

fn render_specialties(f: &mut Frame, app: &AppState, area: Rect) {
    let focused = app.focused_pane == Pane::Specialties;
    let visible = app.visible_specialties();

    let mut lines: Vec<Line> = vec![Line::from(vec![
        Span::styled("Find: ", app.theme.muted),
        Span::raw(app.specialty_search.as_str()),
    ])];

    // Keep the cursor row inside the window below the find line.
    let rows = area.height.saturating_sub(3) as usize;
    let start = if rows == 0 {
        0
    } else {
        (app.specialty_cursor + 1).saturating_sub(rows)
    };

    for (idx, label) in visible.iter().enumerate().skip(start).take(rows.max(1)) {
        let checked = app.controller.is_selected(label);
        let mark = if checked { "[x] " } else { "[ ] " };
        let mark_style = if checked {
            app.theme.accent
        } else {
            app.theme.muted
        };
        let label_style = if focused && idx == app.specialty_cursor {
            app.theme.list_selected
        } else {
            Style::default()
        };
        lines.push(Line::from(vec![
            Span::styled(mark, mark_style),
            Span::styled(label.clone(), label_style),
        ]));
    }

    let block = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Specialities (Space toggles)")
            .title_style(app.theme.title)
            .border_style(border_style(app, Pane::Specialties)),
    );
    f.render_widget(block, area);
}

fn card_item(app: &AppState, doctor: &Doctor) -> ListItem<'static> {
    let mut title = vec![Span::styled(
        doctor.name.clone(),
        Style::default().add_modifier(Modifier::BOLD),
    )];
    if doctor.fees > 0.0 {
        title.push(Span::raw("  "));
        title.push(Span::styled(
            format!("₹ {:.0}", doctor.fees),
            app.theme.accent,
        ));
    }

    let mut specialty_line = doctor.specialties.join(", ");
    if let Some(mode) = doctor.mode {
        if !specialty_line.is_empty() {
            specialty_line.push_str(" · ");
        }
        specialty_line.push_str(match mode {
            ConsultMode::Video => "video",
            ConsultMode::InClinic => "in-clinic",
        });
    }

    let mut detail_line = format!("{} years experience", doctor.experience_years);
    if let Some(clinic) = &doctor.clinic {
        detail_line.push_str(" · ");
        if !clinic.locality.is_empty() {
            detail_line.push_str(&clinic.locality);
            if !clinic.city.is_empty() {
                detail_line.push_str(", ");
            }
        }
        detail_line.push_str(&clinic.city);
    }

    ListItem::new(vec![
        Line::from(title),
        Line::from(Span::styled(specialty_line, app.theme.muted)),
        Line::from(Span::styled(detail_line, app.theme.muted)),
        Line::default(),
    ])
}

fn render_cards(f: &mut Frame, app: &mut AppState, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Doctors")
        .title_style(app.theme.title)
        .border_style(border_style(app, Pane::List));

    if app.view_indices.is_empty() {
        let message = match &app.load_notice {
            Some(notice) => notice.clone(),
            None if app.records.is_empty() => "No doctors loaded.".to_string(),
            None => "No doctors match the current filters.".to_string(),
        };
        let paragraph = Paragraph::new(message)
            .style(app.theme.muted)
            .wrap(Wrap { trim: true })
            .block(block);
        f.render_widget(paragraph, area);
        return;
    }

    let items: Vec<ListItem> = app
        .view_indices
        .iter()
        .map(|&idx| card_item(app, &app.records.doctors()[idx]))
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(app.theme.list_selected)
        .highlight_symbol("> ");
    f.render_stateful_widget(list, area, &mut app.list_state);
}

fn render_status(f: &mut Frame, app: &AppState, area: Rect) {
    let params = app.params_line();
    let line = Line::from(vec![
        Span::styled(
            format!("{}/{} doctors", app.view_indices.len(), app.records.len()),
            app.theme.text,
        ),
        Span::styled(format!(" · {}", app.source_label), app.theme.muted),
        Span::styled(
            if params.is_empty() {
                String::new()
            } else {
                format!(" · {}", params)
            },
            app.theme.muted,
        ),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

fn render_help(f: &mut Frame, app: &AppState) {
    let area = centered_rect(50, 60, f.area());
    let lines = vec![
        Line::from("Tab / Shift-Tab  cycle panes"),
        Line::from("/                focus search"),
        Line::from("Up / Down        move within a pane"),
        Line::from("Space / Enter    toggle or apply the highlighted option"),
        Line::from("c                clear all filters (Ctrl-L in text panes)"),
        Line::from("?                toggle this help"),
        Line::from("q / Esc          quit (from the list pane)"),
    ];
    let help = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Keys")
            .title_style(app.theme.title)
            .border_style(app.theme.border_selected),
    );
    f.render_widget(Clear, area);
    f.render_widget(help, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

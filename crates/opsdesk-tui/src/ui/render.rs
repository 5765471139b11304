use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::app::{App, AppState, DashboardData, Focus, FormField, FormMode, PageData, RecordKind, Screen};
use crate::utils::{format_count, spread, truncate_string};

use super::styles;

/// Sidebar width in columns.
const NAV_WIDTH: u16 = 26;

const LOGO: [&str; 3] = [
    "   ╔═╗╔═╗╔═╗╔╦╗╔═╗╔═╗╦╔═",
    "   ║ ║╠═╝╚═╗ ║║║╣ ╚═╗╠╩╗",
    "   ╚═╝╩  ╚═╝═╩╝╚═╝╚═╝╩ ╩",
];

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Title bar
            Constraint::Min(10),   // Page
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_title_bar(frame, app, chunks[0]);

    match app.screen() {
        Screen::Loading => render_loading(frame, chunks[1]),
        Screen::SignIn | Screen::SignUp => render_auth_form(frame, app, chunks[1]),
        Screen::Unauthorized => render_unauthorized(frame, app, chunks[1]),
        Screen::Dashboard | Screen::Records(_) => render_shell(frame, app, chunks[1]),
        Screen::Blank => {}
    }

    render_status_bar(frame, app, chunks[2]);

    // Render overlays
    match app.state {
        AppState::ShowingHelp => render_help_overlay(frame),
        AppState::ConfirmingQuit => render_quit_overlay(frame),
        AppState::Normal | AppState::Quitting => {}
    }
}

fn render_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let snapshot = app.snapshot();
    let right = match snapshot.session() {
        Some(session) => {
            let role = session
                .role()
                .map(|r| r.display_name().to_string())
                .unwrap_or_else(|| session.role.clone());
            format!("{} ({})  [?] Help", session.label(), role)
        }
        None => "[?] Help".to_string(),
    };
    let line = Line::from(vec![
        Span::styled("  opsdesk", styles::heading()),
        Span::styled(
            spread("", &right, (area.width as usize).saturating_sub(10)),
            styles::dim(),
        ),
    ]);

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::dim());
    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn render_loading(frame: &mut Frame, area: Rect) {
    let area = centered_rect_fixed(40, 5, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::frame_border(false));
    let text = vec![
        Line::from(""),
        Line::from(Span::styled("    Checking your session...", styles::accent())),
    ];
    frame.render_widget(Paragraph::new(text).block(block), area);
}

fn render_auth_form(frame: &mut Frame, app: &App, area: Rect) {
    let form = &app.form;
    let sign_up = form.mode == FormMode::SignUp;

    let mut height = 13;
    if sign_up {
        height += 1;
    }
    if form.error.is_some() {
        height += 2;
    }
    let area = centered_rect_fixed(46, height, area);
    frame.render_widget(Clear, area);

    let mut lines: Vec<Line> = LOGO
        .iter()
        .map(|row| Line::from(Span::styled(*row, styles::heading())))
        .collect();
    lines.push(Line::from(""));

    if sign_up {
        lines.push(field_line("    Name: [", &form.name, form.focus == FormField::Name));
    }
    lines.push(field_line("   Email: [", &form.email, form.focus == FormField::Email));
    let masked = "*".repeat(form.password.chars().count());
    lines.push(field_line("Password: [", &masked, form.focus == FormField::Password));
    lines.push(Line::from(""));

    let (action, switch) = match form.mode {
        FormMode::SignIn => ("Sign in", "Create an account"),
        FormMode::SignUp => ("Sign up", "I already have an account"),
    };
    let action = if form.submitting { "Working..." } else { action };
    lines.push(button_line(action, form.focus == FormField::Submit));
    lines.push(button_line(switch, form.focus == FormField::Switch));

    if let Some(ref error) = form.error {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!(" {}", truncate_string(error, 42)),
            styles::bad(),
        )));
    }

    let title = if sign_up { " Sign up " } else { " Sign in " };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(styles::frame_border(true))
        .style(Style::default());

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn field_line<'a>(label: &'a str, value: &str, focused: bool) -> Line<'a> {
    let style = styles::cursor(focused);
    let cursor = if focused { "▌" } else { "" };
    let shown = truncate_string(value, 24);
    Line::from(vec![
        Span::raw("  "),
        Span::styled(label, styles::dim()),
        Span::styled(format!("{:<24}{}", shown, cursor), style),
        Span::styled("]", styles::dim()),
    ])
}

fn button_line(label: &str, focused: bool) -> Line<'static> {
    let text = if focused {
        format!(" ▶ {} ◀ ", label)
    } else {
        format!("   {}   ", label)
    };
    let style = styles::cursor(focused);
    let pad = 21usize.saturating_sub(text.chars().count() / 2);
    Line::from(vec![Span::raw(" ".repeat(pad)), Span::styled(text, style)])
}

fn render_unauthorized(frame: &mut Frame, app: &App, area: Rect) {
    let area = centered_rect_fixed(52, 9, area);
    let role = app
        .snapshot()
        .session()
        .map(|s| s.role.clone())
        .unwrap_or_default();

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled("  You don't have access to this page.", styles::bad())),
        Line::from(Span::styled(format!("  Signed in with role '{}'.", role), styles::dim())),
        Line::from(""),
        Line::from(vec![
            Span::styled("  [h]", styles::key_hint()),
            Span::styled(" home   ", styles::key_label()),
            Span::styled("[o]", styles::key_hint()),
            Span::styled(" sign out   ", styles::key_label()),
            Span::styled("[q]", styles::key_hint()),
            Span::styled(" quit", styles::key_label()),
        ]),
    ];

    let block = Block::default()
        .title(" Unauthorized ")
        .borders(Borders::ALL)
        .border_style(styles::bad());
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Navigation sidebar around the content slot.
fn render_shell(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(NAV_WIDTH), Constraint::Min(20)])
        .split(area);

    render_navigation(frame, app, chunks[0]);

    match app.screen() {
        Screen::Records(kind) => render_records(frame, app, kind, chunks[1]),
        _ => render_dashboard(frame, app, chunks[1]),
    }
}

fn render_navigation(frame: &mut Frame, app: &App, area: Rect) {
    let current = app.navigator.current();
    let focused = app.focus == Focus::Navigation;

    let lines: Vec<Line> = app
        .navigation()
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let selected = focused && i == app.nav_selection;
            let text = format!(" {} {}", app.icons.glyph(item.icon), item.name);
            Line::from(Span::styled(
                format!("{:<width$}", text, width = NAV_WIDTH as usize - 2),
                styles::nav_entry(selected, item.href == current),
            ))
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::frame_border(focused));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_records(frame: &mut Frame, app: &App, kind: RecordKind, area: Rect) {
    let focused = app.focus == Focus::Content;
    let block = Block::default()
        .title(format!(" {} ", kind.title()))
        .borders(Borders::ALL)
        .border_style(styles::frame_border(focused));

    let rows = match app.records.get(&kind) {
        Some(PageData::Loaded(rows)) => rows,
        Some(PageData::Failed(error)) => {
            let text = Line::from(Span::styled(format!(" {}", error), styles::bad()));
            frame.render_widget(Paragraph::new(text).block(block), area);
            return;
        }
        Some(PageData::Loading) | None => {
            let text = Line::from(Span::styled(" Loading...", styles::dim()));
            frame.render_widget(Paragraph::new(text).block(block), area);
            return;
        }
    };

    if rows.is_empty() {
        let text = Line::from(Span::styled(" Nothing here yet.", styles::dim()));
        frame.render_widget(Paragraph::new(text).block(block), area);
        return;
    }

    let table_rows: Vec<Row> = rows
        .iter()
        .map(|row| {
            Row::new(vec![
                Cell::from(row.title.clone()),
                Cell::from(row.detail.clone()).style(styles::dim()),
            ])
        })
        .collect();

    let table = Table::new(table_rows, [Constraint::Percentage(40), Constraint::Percentage(60)])
        .header(Row::new(vec!["Name", "Details"]).style(styles::heading()))
        .block(block)
        .row_highlight_style(styles::table_cursor(focused));

    let mut state = TableState::default().with_selected(Some(app.record_selection));
    frame.render_stateful_widget(table, area, &mut state);
}

fn render_dashboard(frame: &mut Frame, app: &App, area: Rect) {
    let role = app
        .snapshot()
        .session()
        .and_then(|s| s.role())
        .map(|r| r.display_name())
        .unwrap_or("Dashboard");

    let mut lines = vec![
        Line::from(Span::styled(format!(" {} overview", role), styles::heading())),
        Line::from(""),
    ];

    match app.dashboard {
        Some(DashboardData::Ready(ref tiles)) if tiles.is_empty() => {
            lines.push(Line::from(Span::styled(" No lists on your menu.", styles::dim())));
        }
        Some(DashboardData::Ready(ref tiles)) => {
            for tile in tiles {
                let (value, style) = match tile.count {
                    Ok(count) => (format_count(count, "record"), styles::good()),
                    Err(ref e) => (truncate_string(e, 40), styles::bad()),
                };
                lines.push(Line::from(vec![
                    Span::raw(format!(" {} ", app.icons.glyph(tile.item.icon))),
                    Span::styled(format!("{:<14}", tile.item.name), styles::text()),
                    Span::styled(value, style),
                ]));
            }
        }
        Some(DashboardData::Loading) | None => {
            lines.push(Line::from(Span::styled(" Loading...", styles::dim())));
        }
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::frame_border(app.focus == Focus::Content));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let shortcuts = match app.screen() {
        Screen::Dashboard | Screen::Records(_) => "[u]pdate | [r]efresh session | [o] sign out | [q]uit",
        Screen::SignIn | Screen::SignUp => "[Tab] next field | [Enter] select | [Esc] quit",
        _ => "[q]uit",
    };

    let left = match app.status_message {
        Some(ref msg) => format!(" {} ", msg),
        None => format!(" {} ", app.navigator.current()),
    };
    let right = format!(" {} ", shortcuts);

    let line = Line::from(Span::styled(
        spread(&left, &right, area.width as usize),
        styles::dim(),
    ));
    frame.render_widget(Paragraph::new(line).style(styles::status_bar()), area);
}

fn render_help_overlay(frame: &mut Frame) {
    let area = centered_rect_fixed(52, 19, frame.area());
    frame.render_widget(Clear, area);

    let version = env!("CARGO_PKG_VERSION");
    let key = |k: &'static str, desc: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {:<10}", k), styles::key_hint()),
            Span::styled(desc, styles::key_label()),
        ])
    };

    let mut help_text: Vec<Line> = LOGO
        .iter()
        .map(|row| Line::from(Span::styled(format!("     {}", row), styles::heading())))
        .collect();
    help_text.push(Line::from(Span::styled(
        format!("               version {}", version),
        styles::dim(),
    )));
    help_text.push(Line::from(""));
    help_text.push(Line::from(Span::styled(" Navigation", styles::accent())));
    help_text.push(key("↑/↓", "Move selection"));
    help_text.push(key("Tab", "Switch focus (menu ↔ content)"));
    help_text.push(key("Enter", "Open menu entry"));
    help_text.push(key("h", "Go to your home page"));
    help_text.push(Line::from(""));
    help_text.push(Line::from(Span::styled(" Session", styles::accent())));
    help_text.push(key("u", "Reload the current page"));
    help_text.push(key("r", "Refresh the session"));
    help_text.push(key("o", "Sign out"));
    help_text.push(key("q", "Quit"));
    help_text.push(Line::from(vec![
        Span::styled("       Press ", styles::dim()),
        Span::styled("?", styles::key_hint()),
        Span::styled(" or ", styles::dim()),
        Span::styled("Esc", styles::key_hint()),
        Span::styled(" to close", styles::dim()),
    ]));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::frame_border(true));
    frame.render_widget(Paragraph::new(help_text).block(block), area);
}

fn render_quit_overlay(frame: &mut Frame) {
    let area = centered_rect_fixed(46, 9, frame.area());
    frame.render_widget(Clear, area);

    let mut lines: Vec<Line> = LOGO
        .iter()
        .map(|row| Line::from(Span::styled(*row, styles::heading())))
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "   Are you sure you want to quit?",
        styles::accent(),
    )));
    lines.push(Line::from(vec![
        Span::styled("   Press ", styles::dim()),
        Span::styled("[Y]", styles::key_hint()),
        Span::styled(" to quit, ", styles::dim()),
        Span::styled("[N]", styles::key_hint()),
        Span::styled(" to cancel", styles::dim()),
    ]));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::frame_border(true));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Create a centered rectangle with fixed dimensions
fn centered_rect_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(r.width), height.min(r.height))
}

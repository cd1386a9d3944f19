//! UI rendering functions.

use crate::app::App;
use crate::state::{ActivityInput, DraftField, LoginField, Screen, StatusKind, StatusMessage};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use sustain::types::{Activity, Category};
use unicode_width::UnicodeWidthStr;

/// Render the application based on current screen.
pub fn render_app(f: &mut ratatui::Frame, app: &mut App) {
    match app.screen {
        Screen::Login => render_login(f, app),
        Screen::Activities => render_activities(f, app),
        Screen::Dashboard => render_dashboard(f, app),
    }
}

const fn category_color(category: Category) -> Color {
    match category {
        Category::Energy => Color::Yellow,
        Category::Water => Color::Blue,
        Category::Transport => Color::Magenta,
        Category::Waste => Color::Green,
    }
}

fn render_login(f: &mut ratatui::Frame, app: &App) {
    let size = f.area();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(2)])
        .split(size);

    let block = Block::default()
        .title_top("sustui - Sign in")
        .title_top(Line::from("[Esc] quit").right_aligned())
        .borders(Borders::ALL);
    let inner = block.inner(layout[0]);
    f.render_widget(block, layout[0]);

    let masked = "*".repeat(app.login.password.chars().count());
    let field_style = |field: LoginField| {
        if app.login.field == field {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        }
    };
    let lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("Username: ", field_style(LoginField::Username)),
            Span::raw(app.login.username.clone()),
        ]),
        Line::from(vec![
            Span::styled("Password: ", field_style(LoginField::Password)),
            Span::raw(masked.clone()),
        ]),
        Line::from(""),
        Line::from("Tab: switch field  Enter: sign in"),
    ];
    f.render_widget(Paragraph::new(lines), inner);

    let (row, prefix, buffer_width) = match app.login.field {
        LoginField::Username => (1, "Username: ", app.login.username.width()),
        LoginField::Password => (2, "Password: ", masked.width()),
    };
    f.set_cursor_position(Position::new(
        inner.x + (prefix.width() + buffer_width) as u16,
        inner.y + row,
    ));

    render_status_line(f, app.status.as_ref(), layout[1]);
}

fn render_activities(f: &mut ratatui::Frame, app: &mut App) {
    let size = f.area();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(2)])
        .split(size);

    let user = app.session.user().map(|u| u.username.clone()).unwrap_or_default();
    let block = Block::default()
        .title_top(format!("sustui - {user}"))
        .title_top(
            Line::from("[a]dd [d]elete [r]efresh [g] dashboard [o] sign out [q]uit")
                .right_aligned(),
        )
        .borders(Borders::ALL);
    let inner = block.inner(layout[0]);
    f.render_widget(block, layout[0]);

    let header = Row::new(["Date", "Category", "Action", "Value", "Notes"])
        .style(Style::default().add_modifier(Modifier::BOLD));
    let rows: Vec<Row> = app
        .log
        .activities()
        .iter()
        .map(build_activity_row)
        .collect();
    let widths = [
        Constraint::Length(10),
        Constraint::Length(9),
        Constraint::Min(16),
        Constraint::Length(12),
        Constraint::Min(10),
    ];
    let table = Table::new(rows, widths)
        .header(header)
        .column_spacing(1)
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    if app.log.activities().is_empty() {
        let empty = Paragraph::new("No activities logged yet").alignment(Alignment::Center);
        f.render_widget(empty, inner);
    } else {
        f.render_stateful_widget(table, inner, &mut app.table_state);
    }

    render_footer_activities(f, app, layout[1]);
}

fn build_activity_row(activity: &Activity) -> Row<'static> {
    let notes = activity.notes.clone().unwrap_or_default();
    let cells = vec![
        Cell::from(activity.date.date().to_string()),
        Cell::from(activity.category.to_string()),
        Cell::from(activity.action.clone()),
        Cell::from(format!("{} {}", activity.value, activity.unit)),
        Cell::from(notes),
    ];
    Row::new(cells).style(Style::default().fg(category_color(activity.category)))
}

fn render_footer_activities(f: &mut ratatui::Frame, app: &App, area: Rect) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(area);

    render_status_line(f, app.status.as_ref(), layout[0]);

    match &app.input {
        ActivityInput::Normal => {
            f.render_widget(Paragraph::new("j/k: move  Enter: add"), layout[1]);
        }
        ActivityInput::Add { draft, field } => {
            let prompt = format!(
                "Add [{} {}] action:{} value:{} notes:{}  (editing {}; Tab: field, Up/Down: category, Left/Right: unit)",
                draft.category,
                draft.unit,
                draft.action,
                draft.value,
                draft.notes,
                field.label()
            );
            f.render_widget(Paragraph::new(prompt.clone()), layout[1]);
            f.set_cursor_position(Position::new(
                layout[1].x + prompt.width() as u16,
                layout[1].y,
            ));
        }
        ActivityInput::ConfirmDelete { id } => {
            let prompt = format!("Delete activity {id}? [y/N]");
            f.render_widget(
                Paragraph::new(prompt).style(Style::default().fg(Color::Red)),
                layout[1],
            );
        }
    }
}

fn render_dashboard(f: &mut ratatui::Frame, app: &App) {
    let size = f.area();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(2)])
        .split(size);

    let block = Block::default()
        .title_top("sustui - Dashboard")
        .title_top(Line::from("[r]eload [Esc] back [q]uit").right_aligned())
        .borders(Borders::ALL);
    let inner = block.inner(layout[0]);
    f.render_widget(block, layout[0]);

    let Some(data) = &app.dashboard else {
        let loading = Paragraph::new("Loading...").alignment(Alignment::Center);
        f.render_widget(loading, inner);
        render_status_line(f, app.status.as_ref(), layout[1]);
        return;
    };

    let stats = &data.stats;
    let mut lines = vec![
        Line::from(format!("Total activities:    {}", stats.total_activities)),
        Line::from(Span::styled(
            format!("Energy saved:        {} kWh", stats.energy_saved),
            Style::default().fg(category_color(Category::Energy)),
        )),
        Line::from(Span::styled(
            format!("Water saved:         {} L", stats.water_saved),
            Style::default().fg(category_color(Category::Water)),
        )),
        Line::from(Span::styled(
            format!("Transport emissions: {} kg CO2", stats.transport_emissions),
            Style::default().fg(category_color(Category::Transport)),
        )),
        Line::from(Span::styled(
            format!("Waste reduced:       {} kg", stats.waste_reduced),
            Style::default().fg(category_color(Category::Waste)),
        )),
        Line::from(""),
    ];

    if !stats.recent_activities.is_empty() {
        lines.push(Line::from(Span::styled(
            "Recent",
            Style::default().add_modifier(Modifier::BOLD),
        )));
        for activity in stats
            .recent_activities
            .iter()
            .take(app.config.display.recent_limit)
        {
            lines.push(Line::from(Span::styled(
                format!(
                    "{}  {} ({} {})",
                    activity.date.date(),
                    activity.action,
                    activity.value,
                    activity.unit
                ),
                Style::default().fg(category_color(activity.category)),
            )));
        }
        lines.push(Line::from(""));
    }

    if data.recommendations.is_empty() {
        lines.push(Line::from("No recommendations right now. Keep logging!"));
    } else {
        lines.push(Line::from(Span::styled(
            "Recommendations",
            Style::default().add_modifier(Modifier::BOLD),
        )));
        for rec in &data.recommendations {
            lines.push(Line::from(Span::styled(
                format!("[{}] {}", rec.category, rec.title),
                Style::default().fg(category_color(rec.category)),
            )));
            lines.push(Line::from(format!("  {}", rec.description)));
        }
    }

    f.render_widget(Paragraph::new(lines), inner);
    render_status_line(f, app.status.as_ref(), layout[1]);
}

fn render_status_line(f: &mut ratatui::Frame, status: Option<&StatusMessage>, area: Rect) {
    let widget = status.map(|status| {
        let style = match status.kind {
            StatusKind::Info => Style::default().fg(Color::Blue),
            StatusKind::Success => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        };
        Paragraph::new(status.text.clone()).style(style)
    });

    if let Some(widget) = widget {
        f.render_widget(widget, area);
    } else {
        f.render_widget(Paragraph::new(""), area);
    }
}

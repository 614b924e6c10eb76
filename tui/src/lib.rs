//! TUI rendering for pomo using ratatui.

mod digits;
mod input;
mod theme;

pub use input::{InputPump, apply_event, handle_events};
pub use theme::{Glyphs, Palette, glyphs, palette, styles};

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table},
};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use pomo_engine::{App, Control, FormField, Screen};

use self::digits::{COUNTDOWN_WIDTH, DIGIT_HEIGHT, big_countdown};

const TASK_FIELD_WIDTH: u16 = 32;
const MINUTES_FIELD_WIDTH: u16 = 5;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let options = app.ui_options();
    let palette = palette(options);
    let glyphs = glyphs(options);
    // Clear with background color
    let bg_block = Block::default().style(Style::default().bg(palette.bg_dark));
    frame.render_widget(bg_block, frame.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(1),    // Screen
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    draw_header(frame, app, chunks[0], &palette);
    match app.screen() {
        Screen::Home => draw_home(frame, app, chunks[1], &palette, &glyphs),
        Screen::History => draw_history(frame, app, chunks[1], &palette, &glyphs),
    }
    draw_status_bar(frame, app, chunks[2], &palette, &glyphs);
}

fn draw_header(frame: &mut Frame, app: &App, area: Rect, palette: &Palette) {
    let mut spans = vec![
        Span::styled(
            " pomo ",
            Style::default()
                .fg(palette.primary)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
    ];
    for screen in [Screen::Home, Screen::History] {
        let style = if screen == app.screen() {
            Style::default()
                .fg(palette.bg_dark)
                .bg(palette.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(palette.text_muted)
        };
        spans.push(Span::styled(format!(" {} ", screen.title()), style));
        spans.push(Span::raw(" "));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn screen_block(title: &str, palette: &Palette) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(palette.bg_border))
        .title(Span::styled(
            format!(" {title} "),
            Style::default()
                .fg(palette.text_primary)
                .add_modifier(Modifier::BOLD),
        ))
        .style(Style::default().bg(palette.bg_dark))
}

fn draw_home(frame: &mut Frame, app: &App, area: Rect, palette: &Palette, glyphs: &Glyphs) {
    let block = screen_block(Screen::Home.title(), palette);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),            // Spacer
            Constraint::Length(1),            // Form line
            Constraint::Length(2),            // Field errors
            Constraint::Length(1),            // Suggestions
            Constraint::Length(1),            // Spacer
            Constraint::Length(DIGIT_HEIGHT), // Countdown
            Constraint::Length(1),            // Countdown caption
            Constraint::Length(1),            // Spacer
            Constraint::Length(1),            // Control
            Constraint::Min(0),
        ])
        .split(inner);

    draw_form_line(frame, app, rows[1], palette);
    draw_field_errors(frame, app, rows[2], palette, glyphs);
    draw_suggestions(frame, app, rows[3], palette, glyphs);
    draw_countdown(frame, app, rows[5], rows[6], palette, glyphs);
    draw_control(frame, app, rows[8], palette, glyphs);
}

/// `I will work on [task] for [minutes] minutes.`
fn draw_form_line(frame: &mut Frame, app: &App, area: Rect, palette: &Palette) {
    let form = app.form();
    let enabled = app.control() != Control::Interrupt;
    let focus = form.focus();
    let text_style = Style::default().fg(palette.text_secondary);

    let task_label = "I will work on ";
    let minutes_label = " for ";
    let task_width = TASK_FIELD_WIDTH.min(area.width.saturating_sub(30)).max(8);

    let task = form.task();
    let (task_visible, cursor_x) = visible_window(
        task.text(),
        task.cursor(),
        usize::from(task_width.saturating_sub(1)),
    );
    let task_cell = pad_to(&task_visible, usize::from(task_width));
    let minutes_text = match form.minutes_amount() {
        0 => String::new(),
        minutes => minutes.to_string(),
    };
    let minutes_cell = pad_to(
        &format!(" {minutes_text}"),
        usize::from(MINUTES_FIELD_WIDTH),
    );

    let line = Line::from(vec![
        Span::raw(" "),
        Span::styled(
            task_label,
            styles::field_label(palette, focus == FormField::Task),
        ),
        Span::styled(task_cell, styles::field_value(palette, enabled)),
        Span::styled(
            minutes_label,
            styles::field_label(palette, focus == FormField::MinutesAmount),
        ),
        Span::styled(minutes_cell, styles::field_value(palette, enabled)),
        Span::styled(" minutes.", text_style),
    ]);
    frame.render_widget(Paragraph::new(line), area);

    if !enabled {
        return;
    }
    let (x, y) = match focus {
        FormField::Task => (
            area.x + 1 + width_u16(task_label) + cursor_x,
            area.y,
        ),
        FormField::MinutesAmount => (
            area.x
                + 1
                + width_u16(task_label)
                + task_width
                + width_u16(minutes_label)
                + 1
                + width_u16(&minutes_text),
            area.y,
        ),
    };
    if x < area.right() {
        frame.set_cursor_position((x, y));
    }
}

fn draw_field_errors(frame: &mut Frame, app: &App, area: Rect, palette: &Palette, glyphs: &Glyphs) {
    let Some(errors) = app.form().errors() else {
        return;
    };
    let lines: Vec<Line> = errors
        .iter()
        .map(|error| {
            Line::from(vec![
                Span::raw("   "),
                Span::styled(
                    format!("{} {error}", glyphs.error),
                    styles::error(palette),
                ),
            ])
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), area);
}

fn draw_suggestions(frame: &mut Frame, app: &App, area: Rect, palette: &Palette, glyphs: &Glyphs) {
    if app.form().focus() != FormField::Task || app.control() == Control::Interrupt {
        return;
    }
    let suggestions = app.task_suggestions();
    if suggestions.is_empty() {
        return;
    }
    let mut spans = vec![Span::styled("   Recent: ", styles::key_hint(palette))];
    for (i, suggestion) in suggestions.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(", ", styles::key_hint(palette)));
        }
        let style = if i == 0 {
            Style::default().fg(palette.accent)
        } else {
            Style::default().fg(palette.text_secondary)
        };
        spans.push(Span::styled((*suggestion).to_string(), style));
    }
    spans.push(Span::styled(
        format!("  ({} to complete)", glyphs.arrow_right),
        styles::key_hint(palette),
    ));
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_countdown(
    frame: &mut Frame,
    app: &App,
    digits_area: Rect,
    caption_area: Rect,
    palette: &Palette,
    glyphs: &Glyphs,
) {
    let countdown = app.countdown();
    let style = styles::countdown(palette, countdown.is_active());

    if digits_area.width >= COUNTDOWN_WIDTH {
        let big = Paragraph::new(big_countdown(countdown.digits(), glyphs.digit_fill))
            .style(style)
            .alignment(Alignment::Center);
        frame.render_widget(big, digits_area);
    }

    let caption = match app.cycles().state().active_cycle() {
        Some(cycle) => Line::from(vec![
            Span::styled(countdown.to_string(), style),
            Span::styled(
                format!(" left on {}", cycle.task),
                Style::default().fg(palette.text_secondary),
            ),
        ]),
        None => Line::from(vec![
            Span::styled(countdown.to_string(), style),
            Span::styled(" no active cycle", styles::key_hint(palette)),
        ]),
    };
    frame.render_widget(
        Paragraph::new(caption).alignment(Alignment::Center),
        caption_area,
    );
}

fn draw_control(frame: &mut Frame, app: &App, area: Rect, palette: &Palette, glyphs: &Glyphs) {
    let (label, style) = match app.control() {
        Control::Start { disabled } => (
            format!(" {} Start ", glyphs.in_progress),
            styles::start_button(palette, disabled),
        ),
        Control::Interrupt => (
            format!(" {} Interrupt ", glyphs.interrupted),
            styles::interrupt_button(palette),
        ),
    };
    let button = Paragraph::new(Line::from(Span::styled(label, style))).alignment(Alignment::Center);
    frame.render_widget(button, area);
}

fn draw_history(frame: &mut Frame, app: &App, area: Rect, palette: &Palette, glyphs: &Glyphs) {
    let block = screen_block(Screen::History.title(), palette);
    let rows = app.history_rows();

    if rows.is_empty() {
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "No cycles yet. Start one from the timer screen.",
                styles::key_hint(palette),
            )),
        ])
        .alignment(Alignment::Center)
        .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let total = rows.len();
    let scroll = app.history_scroll().min(total.saturating_sub(1));
    let header = Row::new(["Task", "Duration", "Started", "Status"]).style(
        Style::default()
            .fg(palette.text_secondary)
            .add_modifier(Modifier::BOLD),
    );
    let body: Vec<Row> = rows
        .into_iter()
        .skip(scroll)
        .map(|row| {
            Row::new(vec![
                Cell::from(row.task).style(Style::default().fg(palette.text_primary)),
                Cell::from(row.duration).style(Style::default().fg(palette.text_secondary)),
                Cell::from(row.started).style(Style::default().fg(palette.text_secondary)),
                Cell::from(format!(
                    "{} {}",
                    glyphs.status(row.status),
                    row.status.label()
                ))
                .style(Style::default().fg(palette.status(row.status))),
            ])
        })
        .collect();

    let title_hint = if scroll > 0 {
        format!(" {} {}/{} ", glyphs.arrow_up, scroll + 1, total)
    } else {
        format!(" {}/{} ", scroll + 1, total)
    };
    let table = Table::new(
        body,
        [
            Constraint::Fill(1),
            Constraint::Length(10),
            Constraint::Length(22),
            Constraint::Length(13),
        ],
    )
    .header(header)
    .column_spacing(2)
    .block(block.title_bottom(Line::from(title_hint).right_aligned()));
    frame.render_widget(table, area);
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect, palette: &Palette, glyphs: &Glyphs) {
    if let Some(message) = app.notification() {
        let status = Paragraph::new(Line::from(vec![
            Span::raw(" "),
            Span::styled(message.to_string(), Style::default().fg(palette.warning)),
        ]));
        frame.render_widget(status, area);
        return;
    }

    let arrows = format!("{}/{}", glyphs.arrow_up, glyphs.arrow_down);
    let hints: Vec<(&str, &str)> = match app.screen() {
        Screen::Home if app.control() == Control::Interrupt => vec![
            ("Enter", " interrupt  "),
            ("F2", " history  "),
            ("Ctrl+Q", " quit "),
        ],
        Screen::Home => vec![
            ("Tab", " next field  "),
            (arrows.as_str(), " minutes  "),
            ("Enter", " start  "),
            ("F2", " history  "),
            ("Ctrl+Q", " quit "),
        ],
        Screen::History => vec![
            (arrows.as_str(), " scroll  "),
            ("Esc", " back  "),
            ("Ctrl+Q", " quit "),
        ],
    };
    let mut spans = vec![Span::raw(" ")];
    for (key, label) in hints {
        spans.push(Span::styled(key, styles::key_highlight(palette)));
        spans.push(Span::styled(label, styles::key_hint(palette)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// The tail of `text` that fits in `width` columns with the cursor visible,
/// plus the cursor column within it.
fn visible_window(text: &str, cursor: usize, width: usize) -> (String, u16) {
    let graphemes: Vec<&str> = text.graphemes(true).collect();
    let cursor = cursor.min(graphemes.len());

    let mut start = 0;
    while start < cursor && graphemes[start..cursor].concat().width() > width {
        start += 1;
    }
    let mut visible = String::new();
    let mut used = 0;
    for g in &graphemes[start..] {
        let w = g.width();
        if used + w > width {
            break;
        }
        visible.push_str(g);
        used += w;
    }
    let cursor_x = graphemes[start..cursor].concat().width();
    (visible, u16::try_from(cursor_x).unwrap_or(u16::MAX))
}

fn pad_to(text: &str, width: usize) -> String {
    let used = text.width();
    format!("{text}{}", " ".repeat(width.saturating_sub(used)))
}

fn width_u16(text: &str) -> u16 {
    u16::try_from(text.width()).unwrap_or(u16::MAX)
}

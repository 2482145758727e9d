//! UI rendering helpers for the terminal user interface.
//!
//! Wide terminals get a track sidebar next to the now-playing panel. Narrow
//! ones show a single panel at a time, switched by the transport's
//! now-playing flag. The controls bar is always at the bottom.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::Line,
    widgets::{Block, Borders, LineGauge, List, ListItem, ListState, Padding, Paragraph, Wrap},
};

use crate::app::App;
use crate::audio::PlaybackDriver;
use crate::config::{ControlsSettings, UiSettings};
use crate::timefmt::format_time;
use crate::transport::{PresentationMode, TransportState};

const SIDEBAR_WIDTH: u16 = 36;

/// Key help shown under the transport buttons.
fn controls_text(controls: &ControlsSettings, mode: PresentationMode) -> String {
    let mut parts = vec![
        "[j/k] move".to_string(),
        "[enter] play".to_string(),
        "[space] pause".to_string(),
        "[h/l] prev/next".to_string(),
        format!("[←/→] -/+{}s", controls.scrub_seconds),
        format!("[-/+] vol {}%", percent(controls.volume_step)),
    ];
    if mode == PresentationMode::SinglePanel {
        parts.push("[tab/esc] view".to_string());
    }
    parts.push("[q] quit".to_string());
    parts.join(" | ")
}

fn percent(fraction: f64) -> u32 {
    (fraction.clamp(0.0, 1.0) * 100.0).round() as u32
}

/// Progress as a gauge ratio. Unknown durations render an empty bar.
fn progress_ratio(state: &TransportState) -> f64 {
    if state.duration > 0.0 {
        (state.position / state.duration).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

fn progress_label(state: &TransportState) -> String {
    format!(
        "{} / {}",
        format_time(state.position),
        format_time(state.duration)
    )
}

fn transport_buttons(is_playing: bool) -> String {
    let toggle = if is_playing { "⏸" } else { "▶" };
    format!("⏮   {toggle}   ⏭")
}

/// Render the entire UI into the provided `frame`.
pub fn draw<D: PlaybackDriver>(
    frame: &mut Frame,
    app: &App<D>,
    ui_settings: &UiSettings,
    controls_settings: &ControlsSettings,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(6)])
        .split(frame.area());

    let transport = &app.transport;
    match transport.mode() {
        PresentationMode::MultiPanel => {
            let panes = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(10)])
                .split(chunks[0]);
            draw_track_list(frame, app, ui_settings, panes[0]);
            draw_now_playing(frame, app, false, panes[1]);
        }
        PresentationMode::SinglePanel => {
            if transport.now_playing_visible() {
                draw_now_playing(frame, app, true, chunks[0]);
            } else {
                draw_track_list(frame, app, ui_settings, chunks[0]);
            }
        }
    }

    draw_controls(frame, app, controls_settings, chunks[1]);
}

fn draw_track_list<D: PlaybackDriver>(
    frame: &mut Frame,
    app: &App<D>,
    ui_settings: &UiSettings,
    area: Rect,
) {
    let catalog = app.transport.catalog();
    let playing = app.transport.state().current_index;

    // Center the cursor when possible; only build items for the visible window.
    let total = catalog.len();
    let list_height = area.height.saturating_sub(2) as usize;
    let cursor = app.cursor.min(total.saturating_sub(1));
    let (start, end, cursor_in_window) = if total <= list_height || list_height == 0 {
        (0, total, cursor)
    } else {
        let half = list_height / 2;
        let mut start = cursor.saturating_sub(half);
        if start + list_height > total {
            start = total - list_height;
        }
        (start, start + list_height, cursor - start)
    };

    let items: Vec<ListItem> = catalog
        .iter()
        .enumerate()
        .skip(start)
        .take(end - start)
        .map(|(index, track)| {
            if playing == Some(index) {
                ListItem::new(format!("♪ {}", track.display))
                    .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            } else {
                ListItem::new(format!("  {}", track.display))
            }
        })
        .collect();

    let title = format!(" {} ({}) ", ui_settings.header_text, total);
    let mut block = Block::default().borders(Borders::ALL).title(title);
    if total == 0 {
        block = block.title_bottom(" no tracks ");
    }

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    let mut state = ListState::default();
    if total > 0 {
        state.select(Some(cursor_in_window));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_now_playing<D: PlaybackDriver>(
    frame: &mut Frame,
    app: &App<D>,
    with_back_hint: bool,
    area: Rect,
) {
    let mut block = Block::default()
        .borders(Borders::ALL)
        .title(" now playing ")
        .padding(Padding::uniform(1));
    if with_back_hint {
        block = block.title_bottom(" [esc] back to list ");
    }

    let Some(track) = app.transport.current_track() else {
        let prompt = Paragraph::new("Select a track 🎧")
            .alignment(Alignment::Center)
            .fg(Color::DarkGray)
            .block(block);
        frame.render_widget(prompt, area);
        return;
    };

    let state = app.transport.state();
    let status = if state.is_playing { "Playing" } else { "Paused" };
    let mut lines = vec![
        Line::from(track.display.clone()).bold(),
        Line::from(status).fg(Color::DarkGray),
        Line::from(""),
        Line::from(track.id.clone()).fg(Color::DarkGray),
    ];
    if let Some(dir) = &app.current_dir {
        lines.push(Line::from(dir.clone()).fg(Color::DarkGray));
    }

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(block);
    frame.render_widget(paragraph, area);
}

fn draw_controls<D: PlaybackDriver>(
    frame: &mut Frame,
    app: &App<D>,
    controls_settings: &ControlsSettings,
    area: Rect,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" controls ")
        .padding(Padding::horizontal(1));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

    let state = app.transport.state();

    let progress = LineGauge::default()
        .filled_style(Style::default().fg(Color::Cyan))
        .label(progress_label(state))
        .ratio(progress_ratio(state));
    frame.render_widget(progress, rows[0]);

    let buttons = Paragraph::new(transport_buttons(state.is_playing)).alignment(Alignment::Center);
    frame.render_widget(buttons, rows[1]);

    let volume = LineGauge::default()
        .filled_style(Style::default().fg(Color::Green))
        .label(format!("vol {:>3}%", percent(state.volume)))
        .ratio(state.volume.clamp(0.0, 1.0));
    frame.render_widget(volume, rows[2]);

    let help = Paragraph::new(controls_text(controls_settings, app.transport.mode()))
        .fg(Color::DarkGray);
    frame.render_widget(help, rows[3]);
}

//! Home screen: duration input and the start control

use curfew_core::Engine;
use curfew_util::{format_clock_time, format_duration, MonotonicInstant};
use ratatui::{
    layout::Alignment,
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::view;

pub fn render(frame: &mut Frame, engine: &Engine, input: &str, notice: Option<&str>) {
    let mut lines = vec![
        Line::styled("Screen Time Controller", view::title_style()),
        Line::raw(""),
        Line::raw("Enter Screen Time (minutes):"),
        Line::styled(format!("[ {}_ ]", input), view::title_style()),
        Line::raw(""),
    ];

    if let Some(session) = engine.session() {
        let remaining = session.time_remaining(MonotonicInstant::now());
        lines.push(Line::raw(format!(
            "Session running - {} remaining",
            format_duration(remaining)
        )));
        lines.push(Line::styled(
            format!("Locks at {}", format_clock_time(&session.deadline())),
            view::dim_style(),
        ));
    } else {
        lines.push(Line::styled(
            "[Enter] Start Session    [q] Quit",
            view::dim_style(),
        ));
    }

    if let Some(notice) = notice {
        lines.push(Line::raw(""));
        lines.push(Line::styled(notice.to_string(), view::notice_style()));
    }

    let height = lines.len() as u16 + 2;
    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(" curfew "));

    frame.render_widget(paragraph, view::centered(frame.area(), height));
}

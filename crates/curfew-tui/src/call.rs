//! Fake call view: caller label, status line, elapsed readout

use curfew_core::Engine;
use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::view;

pub fn render(frame: &mut Frame, engine: &Engine) {
    let backdrop = Block::default().style(Style::default().bg(Color::Black));
    frame.render_widget(backdrop, frame.area());

    let Some(call) = engine.call() else {
        return;
    };

    let lines = vec![
        Line::styled(
            engine.config().caller_label.clone(),
            view::title_style(),
        ),
        Line::raw(""),
        Line::styled(call.status().text(), view::dim_style()),
        Line::raw(""),
        Line::styled(
            call.readout(),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Line::raw(""),
        Line::styled("[Enter] End Call", view::dim_style()),
    ];

    let height = lines.len() as u16 + 2;
    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::White).bg(Color::Black))
        .block(Block::default().borders(Borders::ALL).title(" Calling... "));

    frame.render_widget(paragraph, view::centered(frame.area(), height));
}

//! Full-screen lock overlay with decoy actions and the PIN prompt

use curfew_core::{Engine, LockState};
use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::view;

pub fn render(frame: &mut Frame, engine: &Engine, pin_input: &str, notice: Option<&str>) {
    // The overlay claims the entire terminal; everything underneath is
    // repainted black on every frame.
    let backdrop = Block::default().style(Style::default().bg(Color::Black));
    frame.render_widget(backdrop, frame.area());

    if engine.lock_state() == Some(LockState::Unlocking) {
        render_pin_prompt(frame, pin_input);
        return;
    }

    let mut lines = vec![
        Line::styled(
            "SCREEN LOCKED",
            Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
        ),
        Line::raw(""),
        Line::raw("[1] Calling App"),
        Line::raw("[2] Study App"),
        Line::raw("[3] Mail"),
        Line::raw("[4] Parent Override"),
    ];

    if let Some(notice) = notice {
        lines.push(Line::raw(""));
        lines.push(Line::styled(notice.to_string(), view::notice_style()));
    }

    let height = lines.len() as u16;
    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::White).bg(Color::Black));

    frame.render_widget(paragraph, view::centered(frame.area(), height));
}

fn render_pin_prompt(frame: &mut Frame, pin_input: &str) {
    let masked: String = pin_input.chars().map(|_| '*').collect();
    let lines = vec![
        Line::styled("Enter Parent PIN", view::title_style()),
        Line::raw(""),
        Line::styled(format!("[ {}_ ]", masked), view::title_style()),
        Line::raw(""),
        Line::styled("[Enter] Submit    [Esc] Cancel", view::dim_style()),
    ];

    let height = lines.len() as u16 + 2;
    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::White).bg(Color::Black))
        .block(Block::default().borders(Borders::ALL).title(" Parent Override "));

    frame.render_widget(paragraph, view::centered(frame.area(), height));
}

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use facecards_lib::flashcards::{Difficulty, Flashcard};
use facecards_lib::study::SessionPhase;

use super::app_state::TuiState;

pub fn draw(f: &mut Frame, area: Rect, state: &TuiState) {
    let block = Block::default()
        .title(format!(" {} ", state.deck_name))
        .borders(Borders::ALL)
        .border_style(if state.session.is_flipped() {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        });

    let mut lines = match state.session.phase() {
        SessionPhase::Loading => vec![
            Line::from(""),
            dim("  Loading study session..."),
        ],
        SessionPhase::Ready { .. } => match state.session.current_card() {
            Some(card) => card_lines(card, state),
            None => Vec::new(),
        },
        SessionPhase::Complete { .. } => {
            let message = state
                .session
                .summary()
                .map(|s| s.message())
                .unwrap_or_default();
            vec![
                Line::from(""),
                Line::from(Span::styled(
                    "  Session Complete!",
                    Style::default().fg(Color::Green).bold(),
                )),
                Line::from(""),
                Line::from(format!("  {}", message)),
                Line::from(""),
                dim("  Press r to study again."),
            ]
        }
        SessionPhase::Error { message } => vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("  {}", message),
                Style::default().fg(Color::Red),
            )),
            Line::from(""),
            dim("  Press r to try again."),
        ],
    };

    if let Some(error) = state.session.last_error() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("  {}", error),
            Style::default().fg(Color::Red),
        )));
    }

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}

fn card_lines<'a>(card: &'a Flashcard, state: &TuiState) -> Vec<Line<'a>> {
    let photo = card
        .image_filename
        .as_deref()
        .map(|name| state.images.locate(name))
        .unwrap_or_else(|| "(no photo)".to_string());

    let mut lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("  Photo: ", Style::default().fg(Color::DarkGray)),
            Span::raw(photo),
        ]),
    ];
    if let Some(hint) = card.front_text() {
        lines.push(Line::from(format!("  {}", hint)));
    }
    lines.push(Line::from(""));

    if !state.session.is_flipped() {
        lines.push(Line::from(Span::styled(
            "  Who is this?",
            Style::default().fg(Color::Yellow),
        )));
        return lines;
    }

    lines.push(Line::from(Span::styled(
        format!("  {}", card.person_name),
        Style::default().fg(Color::Yellow).bold(),
    )));
    lines.push(Line::from(Span::styled(
        format!("  {}", card.person_role),
        Style::default().fg(Color::Cyan),
    )));
    if let Some(notes) = card.back_text() {
        lines.push(Line::from(""));
        lines.push(Line::from(format!("  {}", notes)));
    }
    lines.push(Line::from(""));
    lines.push(dim("  How well did you remember?"));
    lines.push(rating_line());
    lines
}

fn rating_line() -> Line<'static> {
    let mut spans = vec![Span::raw("  ")];
    for difficulty in Difficulty::ALL {
        spans.push(Span::styled(
            format!(" {} ", difficulty.value()),
            Style::default().bg(Color::DarkGray).fg(Color::White).bold(),
        ));
        spans.push(Span::raw(format!(" {}   ", difficulty.label())));
    }
    Line::from(spans)
}

fn dim(text: &str) -> Line<'_> {
    Line::from(Span::styled(text, Style::default().fg(Color::DarkGray)))
}

use ratatui::layout::{Constraint, Direction, Flex, Layout};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Gauge, Paragraph};

use facecards_lib::flashcards::Difficulty;

use super::app_state::TuiState;
use super::{card_widget, status_bar};

pub fn draw(f: &mut Frame, state: &TuiState) {
    let size = f.area();

    // Progress gauge, card, status bar
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(size);

    draw_progress(f, outer[0], state);
    card_widget::draw(f, outer[1], state);
    status_bar::draw(f, outer[2], state);

    if state.show_help {
        draw_help(f, size);
    }
}

fn draw_progress(f: &mut Frame, area: Rect, state: &TuiState) {
    match (state.session.position(), state.session.progress_fraction()) {
        (Some((current, total)), Some(ratio)) => {
            let gauge = Gauge::default()
                .gauge_style(Style::default().fg(Color::Cyan).bg(Color::Black))
                .ratio(ratio.clamp(0.0, 1.0))
                .label(format!("Team Member {} of {}", current, total));
            f.render_widget(gauge, area);
        }
        _ => {
            let reviewed = state.session.reviewed_count();
            let text = if reviewed > 0 {
                format!(" Reviewed {}", reviewed)
            } else {
                String::new()
            };
            f.render_widget(
                Paragraph::new(text).style(Style::default().fg(Color::DarkGray)),
                area,
            );
        }
    }
}

fn draw_help(f: &mut Frame, area: Rect) {
    let mut lines = vec![
        Line::from(" Space / Enter   show or hide the answer"),
        Line::from(" r               start over with a fresh queue"),
        Line::from(" q / Esc         quit"),
        Line::from(""),
    ];
    for difficulty in Difficulty::ALL {
        lines.push(Line::from(format!(
            " {}               rate {}",
            difficulty.value(),
            difficulty.label()
        )));
    }

    let [popup] = Layout::vertical([Constraint::Length(lines.len() as u16 + 2)])
        .flex(Flex::Center)
        .areas(area);
    let [popup] = Layout::horizontal([Constraint::Length(48)])
        .flex(Flex::Center)
        .areas(popup);

    f.render_widget(Clear, popup);
    f.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .title(" Keys ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        ),
        popup,
    );
}

use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use facecards_lib::study::SessionPhase;

use super::app_state::TuiState;

pub fn draw(f: &mut Frame, area: Rect, state: &TuiState) {
    // Show flash message if present
    if let Some(ref msg) = state.flash_message {
        let flash = Paragraph::new(format!(" {}", msg))
            .style(Style::default().bg(Color::Green).fg(Color::Black));
        f.render_widget(flash, area);
        return;
    }

    if state.session.is_busy() {
        let status = Paragraph::new(" Waiting for the server... ")
            .style(Style::default().bg(Color::Blue).fg(Color::White));
        f.render_widget(status, area);
        return;
    }

    let hints = match state.session.phase() {
        SessionPhase::Loading => " q: quit ",
        SessionPhase::Ready { flipped: false, .. } => " Space: show answer  ?: help  q: quit ",
        SessionPhase::Ready { flipped: true, .. } => {
            " 1-5: rate (Hard .. Easy)  Space: hide answer  ?: help  q: quit "
        }
        SessionPhase::Complete { .. } => " r: study again  q: quit ",
        SessionPhase::Error { .. } => " r: try again  q: quit ",
    };

    let status = Paragraph::new(hints)
        .style(Style::default().bg(Color::DarkGray).fg(Color::White));
    f.render_widget(status, area);
}

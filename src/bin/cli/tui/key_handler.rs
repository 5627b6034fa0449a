use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use facecards_lib::flashcards::Difficulty;

use super::app_state::TuiState;

pub fn handle_key(state: &mut TuiState, key: KeyEvent) {
    // Clear flash message on any keypress
    state.flash_message = None;

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.quit = true;
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => state.quit = true,
        KeyCode::Char(' ') | KeyCode::Enter | KeyCode::Char('f') => state.flip(),
        KeyCode::Char(c @ '1'..='5') => {
            if let Some(difficulty) = difficulty_for(c) {
                state.rate(difficulty);
            }
        }
        KeyCode::Char('r') => state.restart(),
        KeyCode::Char('?') => state.show_help = !state.show_help,
        _ => {}
    }
}

fn difficulty_for(key: char) -> Option<Difficulty> {
    let value = key.to_digit(10)?;
    Difficulty::try_from(i64::from(value)).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digit_keys_map_to_difficulty() {
        assert_eq!(difficulty_for('1'), Some(Difficulty::Hard));
        assert_eq!(difficulty_for('3'), Some(Difficulty::Medium));
        assert_eq!(difficulty_for('5'), Some(Difficulty::Easy));
        assert_eq!(difficulty_for('0'), None);
        assert_eq!(difficulty_for('x'), None);
    }
}

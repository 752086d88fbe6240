use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::editor::EditorPane;

/// What the application should do after an input event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    None,
    /// The text changed and must be re-analyzed
    Edited,
    Run,
    Quit,
    Redraw,
}

pub fn handle_event(pane: &mut EditorPane, event: Event) -> Action {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => handle_key(pane, key),
        Event::Resize(_, _) => Action::Redraw,
        _ => Action::None,
    }
}

fn handle_key(pane: &mut EditorPane, key: KeyEvent) -> Action {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('r') => Action::Run,
            KeyCode::Char('q') | KeyCode::Char('c') => Action::Quit,
            _ => Action::None,
        };
    }

    let edited = match key.code {
        KeyCode::F(5) => return Action::Run,

        KeyCode::Left => {
            pane.move_left();
            false
        }
        KeyCode::Right => {
            pane.move_right();
            false
        }
        KeyCode::Up => {
            pane.move_up();
            false
        }
        KeyCode::Down => {
            pane.move_down();
            false
        }
        KeyCode::Home => {
            pane.move_to_line_start();
            false
        }
        KeyCode::End => {
            pane.move_to_line_end();
            false
        }

        KeyCode::Char(c) => pane.insert_char(c),
        KeyCode::Tab => pane.insert_tab(),
        KeyCode::Enter => pane.insert_newline(),
        KeyCode::Backspace => pane.delete_char_backward(),
        KeyCode::Delete => pane.delete_char_forward(),

        _ => return Action::None,
    };

    if edited { Action::Edited } else { Action::Redraw }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::EditorSurface;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn ctrl(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
    }

    #[test]
    fn typing_is_an_edit() {
        let mut pane = EditorPane::new("", 4);
        assert_eq!(handle_event(&mut pane, key(KeyCode::Char('x'))), Action::Edited);
        assert_eq!(pane.text(), "x");
    }

    #[test]
    fn movement_only_redraws() {
        let mut pane = EditorPane::new("abc", 4);
        assert_eq!(handle_event(&mut pane, key(KeyCode::Right)), Action::Redraw);
        assert_eq!(pane.cursor.col, 1);
    }

    #[test]
    fn backspace_at_origin_is_not_an_edit() {
        let mut pane = EditorPane::new("abc", 4);
        assert_eq!(handle_event(&mut pane, key(KeyCode::Backspace)), Action::Redraw);
    }

    #[test]
    fn run_and_quit_shortcuts() {
        let mut pane = EditorPane::new("", 4);
        assert_eq!(handle_event(&mut pane, ctrl('r')), Action::Run);
        assert_eq!(handle_event(&mut pane, key(KeyCode::F(5))), Action::Run);
        assert_eq!(handle_event(&mut pane, ctrl('q')), Action::Quit);
        assert_eq!(handle_event(&mut pane, ctrl('c')), Action::Quit);
        assert_eq!(pane.text(), "");
    }

    #[test]
    fn resize_triggers_redraw() {
        let mut pane = EditorPane::new("", 4);
        assert_eq!(handle_event(&mut pane, Event::Resize(80, 24)), Action::Redraw);
    }
}

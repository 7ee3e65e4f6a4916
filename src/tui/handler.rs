use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone)]
pub enum AppAction {
    Quit,
    MoveUp,
    MoveDown,
    MoveToTop,
    MoveToBottom,
    TogglePane,
    AddGame,
    DeleteGame,
    ShowHelp,
    HideHelp,
    // Roll entry actions
    RollInputChar(char),
    RollInputBackspace,
    RollInputConfirm,
    RollInputCancel,
    // Notes entry actions
    NotesInputChar(char),
    NotesInputBackspace,
    NotesInputConfirm,
    NotesInputCancel,
}

pub fn handle_key_event(
    key: KeyEvent,
    roll_input_active: bool,
    notes_input_active: bool,
    show_help: bool,
) -> Option<AppAction> {
    // If help is showing, any key closes it
    if show_help {
        return Some(AppAction::HideHelp);
    }

    // Roll entry mode
    if roll_input_active {
        return match key.code {
            KeyCode::Enter => Some(AppAction::RollInputConfirm),
            KeyCode::Esc => Some(AppAction::RollInputCancel),
            KeyCode::Backspace => Some(AppAction::RollInputBackspace),
            KeyCode::Char(c) => Some(AppAction::RollInputChar(c)),
            _ => None,
        };
    }

    // Notes entry mode
    if notes_input_active {
        return match key.code {
            KeyCode::Enter => Some(AppAction::NotesInputConfirm),
            KeyCode::Esc => Some(AppAction::NotesInputCancel),
            KeyCode::Backspace => Some(AppAction::NotesInputBackspace),
            KeyCode::Char(c) => Some(AppAction::NotesInputChar(c)),
            _ => None,
        };
    }

    // Normal mode
    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), _) => Some(AppAction::Quit),
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Some(AppAction::Quit),

        (KeyCode::Char('j'), _) | (KeyCode::Down, _) => Some(AppAction::MoveDown),
        (KeyCode::Char('k'), _) | (KeyCode::Up, _) => Some(AppAction::MoveUp),
        (KeyCode::Char('<'), _) => Some(AppAction::MoveToTop),
        (KeyCode::Char('>'), _) => Some(AppAction::MoveToBottom),

        (KeyCode::Char('v'), _) => Some(AppAction::TogglePane),
        (KeyCode::Char('a'), _) => Some(AppAction::AddGame),
        (KeyCode::Char('d'), _) => Some(AppAction::DeleteGame),

        (KeyCode::Char('?'), _) => Some(AppAction::ShowHelp),

        _ => None,
    }
}
